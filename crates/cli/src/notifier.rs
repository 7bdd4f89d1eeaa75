use portfolio_tracker_core::notify::{Level, Notifier};

/// Prints user-facing messages: information to stdout, errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Info => println!("{}", format_message(level, message)),
            Level::Error => eprintln!("{}", format_message(level, message)),
        }
    }
}

pub fn format_message(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        Level::Error => format!("Error: {message}"),
    }
}
