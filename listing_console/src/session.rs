//! # Console Session
//!
//! Runs console commands against a simulated host and a persistent listing
//! manager, writing one transcript line per command.
//!
//! ## Script Format
//!
//! One command per line. Blank lines and lines starting with `#` are
//! skipped. `quit` ends the session early.
//!
//! ```text
//! mkdir /work/src
//! home /work
//! reuse src
//! toggle
//! ls
//! ```

use crate::commands::{CommandError, ListingCommand, ListingCommandParser};
use listing_types::PromptResponse;
use services_listing_host::{ListingHost, SimListingHost};
use services_listing_reuse::{
    HomeOutcome, PersistentViewManager, ReuseConfig, ReuseError, ToggleOutcome,
};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Session error types
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Parse error at line {line}: {source}")]
    Parse { line: usize, source: CommandError },

    #[error(transparent)]
    Reuse(#[from] ReuseError),

    #[error("No listing named {0}")]
    UnknownListing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Console session state
pub struct ListingSession {
    host: SimListingHost,
    manager: PersistentViewManager,
}

impl ListingSession {
    /// Creates a new session
    pub fn new(host: SimListingHost, config: ReuseConfig) -> Self {
        Self {
            host,
            manager: PersistentViewManager::new(config),
        }
    }

    /// Returns the simulated host
    pub fn host(&self) -> &SimListingHost {
        &self.host
    }

    /// Returns the listing manager
    pub fn manager(&self) -> &PersistentViewManager {
        &self.manager
    }

    /// Executes one command and returns its transcript line
    pub fn execute(&mut self, command: ListingCommand) -> Result<String, SessionError> {
        debug!(?command, "executing console command");
        let host = &mut self.host;

        let line = match command {
            ListingCommand::Reuse { path } => {
                self.manager.reuse_navigate(host, path)?.to_string()
            }
            ListingCommand::Up => self.manager.controller_mut().navigate_up(host)?.to_string(),
            ListingCommand::At { path } => self
                .manager
                .controller_mut()
                .navigate_at(host, &path)?
                .to_string(),
            ListingCommand::Home { path } => {
                match self.manager.goto_home(host, path.as_deref())? {
                    HomeOutcome::Opened(l) => format!("opened {} -> {}", l.name, l.directory),
                    HomeOutcome::Replaced(l) => format!("replaced {} -> {}", l.name, l.directory),
                    HomeOutcome::Focused(l) => format!("focused {} -> {}", l.name, l.directory),
                    HomeOutcome::Cancelled => "cancelled".to_string(),
                }
            }
            ListingCommand::Toggle => match self.manager.toggle_naming(host)? {
                ToggleOutcome::PathDerived { name } => format!("renamed -> {}", name),
                ToggleOutcome::Persistent { evicted: Some(_) } => format!(
                    "renamed -> {} (evicted previous holder)",
                    self.manager.config().magic_buffer_name
                ),
                ToggleOutcome::Persistent { evicted: None } => {
                    format!("renamed -> {}", self.manager.config().magic_buffer_name)
                }
            },
            ListingCommand::List => {
                let current = host.current_listing().map(|l| l.id);
                host.listings()
                    .iter()
                    .map(|l| {
                        let marker = if Some(l.id) == current { "*" } else { " " };
                        format!("{} {} -> {}", marker, l.name, l.directory)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            ListingCommand::Focus { name } => {
                let listing = host
                    .lookup_listing(&name)
                    .ok_or_else(|| SessionError::UnknownListing(name.clone()))?;
                host.focus_listing(listing.id).map_err(ReuseError::from)?;
                format!("focused {} -> {}", listing.name, listing.directory)
            }
            ListingCommand::Mkdir { path } => {
                host.add_directory(&path);
                "ok".to_string()
            }
            ListingCommand::Touch { path } => {
                host.add_file(&path);
                "ok".to_string()
            }
            ListingCommand::Deny { path } => {
                host.deny(&path);
                "ok".to_string()
            }
            ListingCommand::Open { path } => {
                let listing = host.open_listing(&path).map_err(ReuseError::from)?;
                format!("opened {} -> {}", listing.name, listing.directory)
            }
            ListingCommand::Point { path } => {
                let listing = host.current_listing().ok_or(ReuseError::NotApplicable)?;
                if !host.focus_entry(listing.id, &path).map_err(ReuseError::from)? {
                    return Err(ReuseError::NoEntryAtPoint.into());
                }
                "ok".to_string()
            }
            ListingCommand::Answer { path } => {
                host.queue_prompt_answer(PromptResponse::Path(path));
                "ok".to_string()
            }
            ListingCommand::Cancel => {
                host.queue_prompt_answer(PromptResponse::Cancelled);
                "ok".to_string()
            }
            ListingCommand::Quit => "bye".to_string(),
        };

        Ok(line)
    }

    /// Runs commands from `input` until it ends or `quit` is read
    ///
    /// Failed operations are reported in the transcript and the session
    /// continues; unparseable lines end it with an error. Returns the number
    /// of commands executed.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<usize, SessionError> {
        let mut executed = 0;

        for (line_num, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let command = ListingCommandParser::parse(line).map_err(|source| {
                SessionError::Parse {
                    line: line_num + 1,
                    source,
                }
            })?;
            let quit = command == ListingCommand::Quit;

            match self.execute(command) {
                Ok(text) if text.is_empty() => {}
                Ok(text) => writeln!(out, "{}", text)?,
                Err(err) => writeln!(out, "error: {}", err)?,
            }
            executed += 1;

            if quit {
                break;
            }
        }

        Ok(executed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ListingSession {
        ListingSession::new(SimListingHost::new(), ReuseConfig::default())
    }

    fn run(session: &mut ListingSession, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_home_then_reuse() {
        let mut session = session();
        let transcript = run(
            &mut session,
            "mkdir /w/src\nhome /w\nreuse src\nls\n",
        );
        assert_eq!(
            transcript,
            "ok\nopened *dired* -> /w\nreplaced -> /w/src\n* *dired* -> /w/src\n"
        );
    }

    #[test]
    fn test_errors_do_not_stop_session() {
        let mut session = session();
        let transcript = run(&mut session, "toggle\nmkdir /a\nopen /a\ntoggle\n");
        assert_eq!(
            transcript,
            "error: Not in a directory listing\nok\nopened /a -> /a\nrenamed -> *dired*\n"
        );
    }

    #[test]
    fn test_comments_and_quit() {
        let mut session = session();
        let mut out = Vec::new();
        let executed = session
            .run("# setup\n\nmkdir /a\nquit\nmkdir /b\n".as_bytes(), &mut out)
            .unwrap();
        assert_eq!(executed, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "ok\nbye\n");
    }

    #[test]
    fn test_parse_error_reports_line() {
        let mut session = session();
        let mut out = Vec::new();
        let result = session.run("mkdir /a\nwhatever\n".as_bytes(), &mut out);
        assert!(matches!(result, Err(SessionError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_prompt_answers() {
        let mut session = session();
        let transcript = run(&mut session, "mkdir /p\ncancel\nhome\nanswer /p\nhome\n");
        assert_eq!(transcript, "ok\nok\ncancelled\nok\nopened *dired* -> /p\n");
    }

    #[test]
    fn test_focus_unknown_listing() {
        let mut session = session();
        let transcript = run(&mut session, "focus nope\n");
        assert_eq!(transcript, "error: No listing named nope\n");
    }
}
