//! Game event logger with in-memory capture
//!
//! Messages go to stdout, to an in-memory buffer, or both. Tests capture to
//! memory and inspect the entries; search and rollouts run silent.

use crate::game::Action;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::fmt::Write as FmtWrite;
use std::ops::Deref;

/// Verbosity level for game output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only outcomes
    Minimal = 1,
    /// Normal - executed actions and sequence boundaries (default)
    #[default]
    Normal = 2,
    /// Verbose - also every menu offered to a player
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g. "menu", "sequence")
    pub category: Option<&'static str>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Centralized logger owned by the game state
///
/// Clones start with an empty buffer so forked states never share or copy
/// captured output.
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,

    /// Scratch arena for building menu listings; reset after each use
    format_bump: RefCell<Bump>,

    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
        self.format_bump.borrow_mut().reset();
    }

    /// Print buffered entries the verbosity allows, then clear the buffer
    pub fn flush_buffer(&mut self) {
        for entry in self.log_buffer.borrow().iter() {
            if entry.level <= self.verbosity {
                println!("{}", entry.message);
            }
        }
        self.clear_logs();
    }

    fn emit(&self, level: VerbosityLevel, category: Option<&'static str>, message: &str) {
        if level == VerbosityLevel::Silent || level > self.verbosity {
            return;
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category,
            });
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            if level == VerbosityLevel::Minimal {
                println!("{message}");
            } else {
                println!("  {message}");
            }
        }
    }

    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, None, message);
    }

    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, None, message);
    }

    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, None, message);
    }

    /// Log a sequence boundary (start or completion) at Normal level
    pub fn sequence(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, Some("sequence"), message);
    }

    /// Log a controller's pick at Verbose level, tagged with the controller kind
    pub fn controller_choice(&self, controller: &str, message: &str) {
        if VerbosityLevel::Verbose > self.verbosity {
            return;
        }
        self.emit(
            VerbosityLevel::Verbose,
            Some("choice"),
            &format!(">>> {controller}: {message}"),
        );
    }

    /// Log the menu offered to a player at Verbose level
    pub fn menu(&self, player_name: &str, options: &[Action]) {
        if VerbosityLevel::Verbose > self.verbosity {
            return;
        }
        let bump = self.format_bump.borrow();
        let mut listing = bumpalo::collections::String::new_in(&bump);
        let _ = write!(listing, "{player_name} chooses from {} option(s):", options.len());
        for (idx, option) in options.iter().enumerate() {
            let _ = write!(listing, " [{idx}] {option};");
        }
        self.emit(VerbosityLevel::Verbose, Some("menu"), &listing);
        drop(listing);
        drop(bump);
        self.format_bump.borrow_mut().reset();
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

impl Clone for GameLogger {
    fn clone(&self) -> Self {
        GameLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture_respects_verbosity() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Normal);
        logger.enable_capture();

        logger.normal("normal message");
        logger.minimal("minimal message");
        logger.verbose("verbose message");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "normal message");
        assert_eq!(logs[1].message, "minimal message");
    }

    #[test]
    fn test_menu_listing() {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();

        logger.menu("Alice", &[Action::DoNothing]);
        logger.menu("Alice", &[Action::DoNothing, Action::DoNothing]);

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].category, Some("menu"));
        assert_eq!(
            logs[0].message,
            "Alice chooses from 1 option(s): [0] Do nothing;"
        );
    }

    #[test]
    fn test_clone_starts_empty() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.normal("before clone");

        let cloned = logger.clone();
        assert!(cloned.is_capturing());
        assert_eq!(cloned.logs().len(), 0);
        assert_eq!(logger.logs().len(), 1);
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.normal("message");

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }
}
