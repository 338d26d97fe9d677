//! Drive a session to the end against a decision source.

use log::{info, warn};
use std::time::Duration;
use tokio::time::timeout;

use super::{
    config::TimeoutPolicy,
    transport::{ActionSource, EventSink},
};
use crate::game::{
    GameSession, HandOutcome,
    errors::SessionError,
    events::{GameEvent, LogEntry},
};

/// Deadline for each decision and what to do when it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTimeout {
    pub limit: Duration,
    pub policy: TimeoutPolicy,
}

fn publish<E: EventSink + ?Sized>(sink: &mut E, entries: &[LogEntry]) {
    for entry in entries {
        sink.on_event(entry);
        if let GameEvent::Revealed { street, cards } = &entry.event {
            sink.on_street_advance(*street, cards);
        }
    }
}

/// Ask `source` for decisions until the hand is over. A rejected decision
/// is reported back to the source and the same player is asked again.
/// Without a timeout a source returning `None` folds the player.
pub async fn run_hand<S, E>(
    session: &mut GameSession,
    source: &mut S,
    sink: &mut E,
    action_timeout: Option<ActionTimeout>,
) -> Result<HandOutcome, SessionError>
where
    S: ActionSource + ?Sized,
    E: EventSink + ?Sized,
{
    publish(sink, session.log());

    while let Some(request) = session.awaiting() {
        let decision = match action_timeout {
            Some(limit) => timeout(limit.limit, source.request_action(&request))
                .await
                .ok()
                .flatten(),
            None => source.request_action(&request).await,
        };
        let action = match decision {
            Some(action) => action,
            None => {
                let policy = action_timeout.map(|t| t.policy).unwrap_or_default();
                let action = policy.action_for(&request);
                warn!(
                    "{} didn't answer on the {}, applying {policy}: {}",
                    request.player,
                    request.street,
                    action.verb()
                );
                action
            }
        };

        match session.apply(&request.player, action) {
            Ok(entries) => publish(sink, &entries),
            Err(SessionError::InvalidAction(error)) => {
                source.on_rejected(&request, &error).await;
            }
            Err(error) => return Err(error),
        }
    }

    let outcome = session.outcome().cloned().ok_or(SessionError::Stalled)?;
    info!(
        "session {} finished ({}), {} award(s)",
        session.id(),
        outcome.reason,
        outcome.awards.len()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        ActionRequest, GameSettings, Street,
        entities::{Action, Card, Deck, PlayerId},
        errors::ActionError,
    };
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Plays a fixed script, then goes silent.
    struct Script {
        actions: VecDeque<Action>,
        rejected: Vec<ActionError>,
    }

    #[async_trait]
    impl ActionSource for Script {
        async fn request_action(&mut self, _request: &ActionRequest) -> Option<Action> {
            self.actions.pop_front()
        }

        async fn on_rejected(&mut self, _request: &ActionRequest, error: &ActionError) {
            self.rejected.push(error.clone());
        }
    }

    /// Never answers.
    struct Silent;

    #[async_trait]
    impl ActionSource for Silent {
        async fn request_action(&mut self, _request: &ActionRequest) -> Option<Action> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        streets: Vec<(Street, usize)>,
    }

    impl EventSink for Recorder {
        fn on_event(&mut self, entry: &LogEntry) {
            self.lines.push(entry.to_string());
        }

        fn on_street_advance(&mut self, street: Street, cards: &[Card]) {
            self.streets.push((street, cards.len()));
        }
    }

    fn heads_up() -> GameSession {
        GameSession::with_deck(
            vec![(PlayerId::from("a"), 1000), (PlayerId::from("b"), 1000)],
            GameSettings::default(),
            Deck::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_hand_check_down() {
        let mut session = heads_up();
        let mut script = Script {
            actions: [Action::Call, Action::Check]
                .into_iter()
                .chain(std::iter::repeat_n(Action::Check, 6))
                .collect(),
            rejected: Vec::new(),
        };
        let mut sink = Recorder::default();
        let outcome = run_hand(&mut session, &mut script, &mut sink, None)
            .await
            .unwrap();
        assert_eq!(session.pot_size(), 20);
        assert_eq!(
            sink.streets,
            vec![(Street::Flop, 3), (Street::Turn, 1), (Street::River, 1)]
        );
        assert_eq!(sink.lines.first().map(String::as_str), Some("a deals."));
        let total: i64 = outcome.results.iter().map(|r| r.net()).sum();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_rejected_action_asks_again() {
        let mut session = heads_up();
        let mut script = Script {
            actions: VecDeque::from([Action::Raise(15), Action::Fold]),
            rejected: Vec::new(),
        };
        let outcome = run_hand(&mut session, &mut script, &mut Recorder::default(), None)
            .await
            .unwrap();
        assert_eq!(
            script.rejected,
            vec![ActionError::RaiseTooSmall { min: 20, got: 15 }]
        );
        assert_eq!(outcome.winners(), vec![&PlayerId::from("b")]);
    }

    #[tokio::test]
    async fn test_hung_up_source_folds() {
        let mut session = heads_up();
        let mut script = Script {
            actions: VecDeque::new(),
            rejected: Vec::new(),
        };
        let outcome = run_hand(&mut session, &mut script, &mut Recorder::default(), None)
            .await
            .unwrap();
        assert_eq!(outcome.winners(), vec![&PlayerId::from("b")]);
    }

    #[tokio::test]
    async fn test_timeout_applies_policy() {
        let mut session = heads_up();
        let limit = Some(ActionTimeout {
            limit: Duration::from_millis(20),
            policy: TimeoutPolicy::CheckOrFold,
        });
        let outcome = run_hand(&mut session, &mut Silent, &mut Recorder::default(), limit)
            .await
            .unwrap();
        // The small blind owes chips and folds; nobody else gets asked.
        assert_eq!(outcome.winners(), vec![&PlayerId::from("b")]);
        assert!(session.players()[0].folded);
    }
}
