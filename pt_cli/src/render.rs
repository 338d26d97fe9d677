//! Text rendering for log entries, boards and prompts.

use poker_table::{
    ActionRequest, Card, Evaluation, HandCategory, Street,
    entities::{Action, SeatRole},
    game::{GameEvent, LogEntry},
};

/// Display titles keyed by hand category.
const CATEGORY_TITLES: [(HandCategory, &str); 10] = [
    (HandCategory::HighCard, "High Card"),
    (HandCategory::Pair, "Pair"),
    (HandCategory::TwoPair, "Two Pair"),
    (HandCategory::ThreeOfAKind, "Three of a Kind"),
    (HandCategory::Straight, "Straight"),
    (HandCategory::Flush, "Flush"),
    (HandCategory::FullHouse, "Full House"),
    (HandCategory::FourOfAKind, "Four of a Kind"),
    (HandCategory::StraightFlush, "Straight Flush"),
    (HandCategory::RoyalFlush, "Royal Flush"),
];

/// Glyphs keyed by action verb.
const ACTION_GLYPHS: [(&str, &str); 4] = [
    ("fold", "✗"),
    ("check", "·"),
    ("call", "="),
    ("raise", "▲"),
];

const ROLE_BADGES: [(SeatRole, &str); 4] = [
    (SeatRole::Dealer, "(D)"),
    (SeatRole::SmallBlind, "(SB)"),
    (SeatRole::BigBlind, "(BB)"),
    (SeatRole::Normal, ""),
];

pub fn category_title(category: HandCategory) -> &'static str {
    CATEGORY_TITLES
        .iter()
        .find(|(c, _)| *c == category)
        .map_or("?", |(_, title)| title)
}

pub fn action_glyph(action: Action) -> &'static str {
    ACTION_GLYPHS
        .iter()
        .find(|(verb, _)| *verb == action.verb())
        .map_or("?", |(_, glyph)| glyph)
}

pub fn role_badge(role: SeatRole) -> &'static str {
    ROLE_BADGES
        .iter()
        .find(|(r, _)| *r == role)
        .map_or("", |(_, badge)| badge)
}

pub fn cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn evaluation(evaluation: &Evaluation) -> String {
    format!(
        "{} [{}]",
        category_title(evaluation.category),
        cards(&evaluation.cards)
    )
}

pub fn board(street: Street, board: &[Card]) -> String {
    format!("── {street} ── {}", cards(board))
}

pub fn entry(entry: &LogEntry) -> String {
    match &entry.event {
        GameEvent::Dealt { dealer } => format!("{dealer} {} deals", role_badge(SeatRole::Dealer)),
        GameEvent::PostedBlind {
            player,
            role,
            amount,
        } => format!("  {player} {} posts {amount}", role_badge(*role)),
        GameEvent::Acted {
            player,
            action,
            all_in,
        } => {
            let suffix = if *all_in { " (all in)" } else { "" };
            format!("{} {player} {action}{suffix}", action_glyph(*action))
        }
        GameEvent::Revealed { street, cards: revealed } => {
            format!("── {street} ── {}", cards(revealed))
        }
        GameEvent::ShowedHand { player, evaluation: hand } => {
            format!("  {player} shows {}", evaluation(hand))
        }
        GameEvent::WonPot { player, amount } => format!("★ {player} wins {amount}"),
    }
}

/// The prompt shown when the human is up.
pub fn request(request: &ActionRequest) -> String {
    let mut lines = vec![
        format!(
            "Your turn on the {}: pot {}, balance {}, to call {}",
            request.street, request.pot, request.balance, request.to_call
        ),
        format!("  hand  {}", cards(&request.hole_cards)),
        format!("  board {}", cards(&request.board)),
    ];
    let mut known = request.hole_cards.clone();
    known.extend_from_slice(&request.board);
    if let Ok(best) = poker_table::best_hand(&known) {
        lines.push(format!("  you have {}", evaluation(&best)));
    }
    lines.push(format!("  choices: {}", request.choices));
    lines.join("\n")
}
