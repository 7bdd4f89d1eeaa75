//! Interactive session: one action at a time, table re-rendered after every
//! change. A symbol can be selected like a table row and then removed or
//! charted without typing it again.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tokio::sync::mpsc;

use portfolio_tracker_core::notify::Notifier;
use portfolio_tracker_core::PortfolioTracker;

use crate::commands;

const HELP: &str = "\
Commands:
  add <SYMBOL> <QTY>   add a holding or replace its quantity
  select <SYMBOL>      select a holding
  rm [SYMBOL]          remove a holding (defaults to the selection)
  chart [SYMBOL]       draw the price history (defaults to the selection)
  list                 show holdings and total
  refresh              re-fetch every last price
  export               print the state file contents
  help                 this text
  quit                 leave (also Ctrl-D)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { symbol: String, quantity: String },
    Select(String),
    Remove(Option<String>),
    Chart(Option<String>),
    List,
    Refresh,
    Export,
    Help,
    Quit,
    Empty,
}

/// Parse one input line. The error is a usage message for the user.
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb.to_lowercase().as_str(), args.as_slice()) {
        ("add", [symbol, quantity]) => ShellCommand::Add {
            symbol: symbol.to_string(),
            quantity: quantity.to_string(),
        },
        ("add", _) => return Err("usage: add <SYMBOL> <QTY>".into()),
        ("select", [symbol]) => ShellCommand::Select(symbol.to_string()),
        ("select", _) => return Err("usage: select <SYMBOL>".into()),
        ("rm" | "remove" | "delete", []) => ShellCommand::Remove(None),
        ("rm" | "remove" | "delete", [symbol]) => ShellCommand::Remove(Some(symbol.to_string())),
        ("rm" | "remove" | "delete", _) => return Err("usage: rm [SYMBOL]".into()),
        ("chart", []) => ShellCommand::Chart(None),
        ("chart", [symbol]) => ShellCommand::Chart(Some(symbol.to_string())),
        ("chart", _) => return Err("usage: chart [SYMBOL]".into()),
        ("list" | "ls", []) => ShellCommand::List,
        ("refresh", []) => ShellCommand::Refresh,
        ("export", []) => ShellCommand::Export,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        (other, _) => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

/// Shell state on top of the tracker.
pub struct Session<'a> {
    tracker: &'a mut PortfolioTracker,
    notifier: &'a dyn Notifier,
    selected: Option<String>,
}

impl<'a> Session<'a> {
    pub fn new(tracker: &'a mut PortfolioTracker, notifier: &'a dyn Notifier) -> Self {
        Self {
            tracker,
            notifier,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Run one command. Returns `false` when the session should end.
    /// Action errors are reported and do not end the session.
    pub async fn execute(&mut self, command: ShellCommand) -> bool {
        if let Err(e) = self.dispatch(command.clone()).await {
            self.notifier.error(&e.to_string());
        }
        command != ShellCommand::Quit
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Add { symbol, quantity } => {
                commands::add(self.tracker, self.notifier, &symbol, &quantity).await?;
            }
            ShellCommand::Select(symbol) => self.select(&symbol),
            ShellCommand::Remove(symbol) => {
                let target = symbol.or_else(|| self.selected.clone());
                let removed = commands::remove(self.tracker, self.notifier, target.as_deref())?;
                if removed && self.selected.as_deref().is_some_and(|s| self.tracker.get(s).is_none()) {
                    self.selected = None;
                }
            }
            ShellCommand::Chart(symbol) => {
                match symbol.or_else(|| self.selected.clone()) {
                    Some(symbol) => {
                        commands::chart(self.tracker, self.notifier, &symbol).await;
                    }
                    None => self.notifier.info("Select a holding to chart."),
                }
            }
            ShellCommand::List => commands::list(self.tracker),
            ShellCommand::Refresh => {
                commands::refresh(self.tracker, self.notifier).await?;
            }
            ShellCommand::Export => commands::export(self.tracker)?,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    fn select(&mut self, symbol: &str) {
        let symbol = symbol.trim().to_uppercase();
        if self.tracker.get(&symbol).is_some() {
            self.notifier.info(&format!("Selected {symbol}."));
            self.selected = Some(symbol);
        } else {
            self.notifier.info(&format!("{symbol} is not in the portfolio."));
        }
    }
}

/// Feed lines from `reader` through a channel. The read happens on a plain
/// thread, not the runtime's blocking pool, so a pending read never holds
/// up runtime shutdown.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in reader.lines() {
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Read commands from stdin until `quit`, end of input, or Ctrl-C at the
/// prompt. Ctrl-C during an action cancels only that action.
pub async fn run(tracker: &mut PortfolioTracker, notifier: &dyn Notifier) -> Result<()> {
    let mut session = Session::new(tracker, notifier);
    let lines = spawn_line_reader(io::BufReader::new(io::stdin()));

    commands::list(session.tracker);
    println!("Type 'help' for commands.");

    drive(&mut session, lines).await?;
    tracing::debug!("shell closed");
    Ok(())
}

async fn drive(
    session: &mut Session<'_>,
    mut lines: mpsc::Receiver<io::Result<String>>,
) -> Result<()> {
    loop {
        let prompt = match session.selected() {
            Some(s) => format!("[{s}]> "),
            None => "> ".to_string(),
        };
        print!("{prompt}");
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.recv() => line.transpose()?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            return Ok(());
        };

        match parse_command(&line) {
            Ok(command) => {
                if !session.execute(command).await {
                    return Ok(());
                }
            }
            Err(usage) => session.notifier.error(&usage),
        }
    }
}
