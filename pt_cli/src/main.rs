//! Play heads-up or ring hold'em against bots in the terminal.

use anyhow::{Context, Error, bail};
use ctrlc::set_handler;
use log::{debug, info};
use pico_args::Arguments;
use poker_table::{
    GameSession,
    bot::{BotDifficulty, BotTable},
    entities::{PlayerId, Usd},
    table::{ActionTimeout, TableConfig},
    table::run_hand,
};
use std::time::Duration;
use tokio::io::BufReader;

use pt_cli::{
    commands::HELP as COMMANDS,
    console::{ConsoleSink, ConsoleTable},
};

const HELP: &str = "\
Play no-limit hold'em against bots

USAGE:
  pt_cli [OPTIONS]

OPTIONS:
  --name        NAME       Your name at the table  [default: env USER or 'you']
  --bots        N          Bots to play against  [default: 3]
  --balance     CHIPS      Starting balance for everyone  [default: env TABLE_STARTING_BALANCE or 1000]
  --hands       N          Stop after N hands  [default: play until someone busts out]
  --timeout     SECS       Seconds you get per decision  [default: env TABLE_ACTION_TIMEOUT_SECS or none]
  --difficulty  STYLE      passive, aggressive or random  [default: aggressive]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TABLE_SMALL_BLIND, TABLE_BIG_BLIND, TABLE_MIN_RAISE, TABLE_TIMEOUT_POLICY
  (read from the environment or a .env file)
";

struct Args {
    name: String,
    bots: usize,
    balance: Option<Usd>,
    hands: Option<usize>,
    timeout: Option<u64>,
    difficulty: BotDifficulty,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        name: pargs.value_from_str("--name").unwrap_or_else(|_| {
            std::env::var("USER").unwrap_or_else(|_| "you".to_string())
        }),
        bots: pargs.value_from_str("--bots").unwrap_or(3),
        balance: pargs.opt_value_from_str("--balance")?,
        hands: pargs.opt_value_from_str("--hands")?,
        timeout: pargs.opt_value_from_str("--timeout")?,
        difficulty: pargs
            .opt_value_from_fn("--difficulty", |s| s.parse::<BotDifficulty>())?
            .unwrap_or_default(),
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    run(args).await
}

fn table_config(args: &Args) -> Result<TableConfig, Error> {
    let mut config = TableConfig::from_env().context("reading TABLE_* settings")?;
    config.max_players = args.bots + 1;
    if let Some(balance) = args.balance {
        config.starting_balance = balance;
    }
    if let Some(secs) = args.timeout {
        config.action_timeout = Some(Duration::from_secs(secs));
    }
    config.settings.shuffle_seats = false;
    config.validate().context("invalid table settings")?;
    Ok(config)
}

async fn run(args: Args) -> Result<(), Error> {
    if args.bots == 0 {
        bail!("need at least one bot to play against");
    }
    let config = table_config(&args)?;
    let human = PlayerId::from(args.name.as_str());

    let mut bots = BotTable::new().with_think_time(Duration::from_millis(400));
    let mut seats: Vec<(PlayerId, Usd)> = vec![(human.clone(), config.starting_balance)];
    for bot in bots.spawn(args.bots, args.difficulty) {
        seats.push((bot, config.starting_balance));
    }
    info!(
        "{human} sits down with {} {} bot(s), blinds {}/{}",
        args.bots, args.difficulty, config.settings.small_blind, config.settings.big_blind
    );
    println!("{COMMANDS}\n");

    let input = BufReader::new(tokio::io::stdin());
    let mut table = ConsoleTable::new(human.clone(), bots, input, std::io::stdout());
    let mut sink = ConsoleSink::new(std::io::stdout());
    let action_timeout = config.action_timeout.map(|limit| ActionTimeout {
        limit,
        policy: config.timeout_policy,
    });

    let mut played = 0;
    while args.hands.is_none_or(|hands| played < hands) {
        let mut session = GameSession::new(seats.clone(), config.settings.clone())
            .context("starting a hand")?;
        let outcome = run_hand(&mut session, &mut table, &mut sink, action_timeout)
            .await
            .context("playing a hand")?;
        played += 1;

        let mut balances = outcome.final_balances();
        // Move the button one seat to the left.
        balances.rotate_left(1);
        seats = balances
            .into_iter()
            .filter(|(player, balance)| {
                if *balance == 0 {
                    println!("{player} is out of chips");
                }
                *balance > 0
            })
            .collect();
        debug!("seats after hand {played}: {seats:?}");

        if table.wants_to_quit() {
            break;
        }
        if !seats.iter().any(|(player, _)| *player == human) {
            println!("You're out of chips. Better luck next time!");
            break;
        }
        if seats.len() < 2 {
            println!("You took every chip at the table!");
            break;
        }
        println!();
    }

    let balance = seats
        .iter()
        .find(|(player, _)| *player == human)
        .map_or(0, |(_, balance)| *balance);
    println!("{played} hand(s) played, you leave with {balance}");
    Ok(())
}
