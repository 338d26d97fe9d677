//! A human at the keyboard, sitting with bots.

use async_trait::async_trait;
use log::debug;
use poker_table::{
    ActionRequest, Street,
    bot::BotTable,
    entities::{Action, Card, PlayerId},
    errors::ActionError,
    game::{GameEvent, LogEntry},
    table::{ActionSource, EventSink},
};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    commands::{Command, HELP, parse_command},
    render,
};

/// Asks the human through `input`/`output` and everyone else through the
/// bots.
pub struct ConsoleTable<R, W> {
    human: PlayerId,
    bots: BotTable,
    input: Lines<R>,
    output: W,
    quit: bool,
}

impl<R, W> ConsoleTable<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(human: PlayerId, bots: BotTable, input: R, output: W) -> Self {
        Self {
            human,
            bots,
            input: input.lines(),
            output,
            quit: false,
        }
    }

    /// Whether the human asked to leave (or closed the input).
    pub fn wants_to_quit(&self) -> bool {
        self.quit
    }

    pub fn bots(&self) -> &BotTable {
        &self.bots
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        // Nothing sensible to do when the terminal is gone.
        let _ = writeln!(self.output, "{text}");
        let _ = self.output.flush();
    }

    async fn ask_human(&mut self, request: &ActionRequest) -> Option<Action> {
        if self.quit {
            return Some(Action::Fold);
        }
        self.say(&render::request(request));
        loop {
            let _ = write!(self.output, "> ");
            let _ = self.output.flush();
            let line = match self.input.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => {
                    debug!("input closed");
                    self.quit = true;
                    return None;
                }
            };
            match parse_command(&line) {
                Ok(Command::TakeAction(action)) => return Some(action),
                Ok(Command::Show) => self.say(&render::request(request)),
                Ok(Command::Help) => self.say(HELP),
                Ok(Command::Quit) => {
                    self.quit = true;
                    return Some(Action::Fold);
                }
                Err(error) => self.say(&error.to_string()),
            }
        }
    }
}

#[async_trait]
impl<R, W> ActionSource for ConsoleTable<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn request_action(&mut self, request: &ActionRequest) -> Option<Action> {
        if request.player == self.human {
            self.ask_human(request).await
        } else {
            self.bots.request_action(request).await
        }
    }

    async fn on_rejected(&mut self, request: &ActionRequest, error: &ActionError) {
        if request.player == self.human {
            self.say(&format!("Can't do that: {error}"));
        } else {
            self.bots.on_rejected(request, error).await;
        }
    }
}

/// Prints every log entry, and the whole board each time it grows.
pub struct ConsoleSink<W> {
    output: W,
    board: Vec<Card>,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            board: Vec::with_capacity(5),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write + Send> EventSink for ConsoleSink<W> {
    fn on_event(&mut self, entry: &LogEntry) {
        match entry.event {
            GameEvent::Dealt { .. } => self.board.clear(),
            // Printed with the rest of the board.
            GameEvent::Revealed { .. } => return,
            _ => {}
        }
        let _ = writeln!(self.output, "{}", render::entry(entry));
    }

    fn on_street_advance(&mut self, street: Street, cards: &[Card]) {
        self.board.extend_from_slice(cards);
        let _ = writeln!(self.output, "{}", render::board(street, &self.board));
    }
}
