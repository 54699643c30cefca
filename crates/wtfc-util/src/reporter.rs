//! The single diagnostic sink described in `spec.md` §4.5.
//!
//! Every lexer/parser/codegen failure funnels through [`Reporter::error`],
//! which prints `Error: <msg>, in <file>:<line>:<col>` and hands back `None`,
//! the idiomatic-Rust analogue of the reference implementation's
//! null-sentinel propagation (see `SPEC_FULL.md` §9.1). Rather than a
//! process-global singleton, the reporter is threaded explicitly (an
//! `Rc<Reporter>`) into whichever lexer/parser/codegen is currently live,
//! and holds onto the *active* lexer's position indirectly through a shared
//! [`PositionHandle`] so that querying it always reflects wherever the
//! currently-running lexer's cursor actually is.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::position::{new_position_handle, Position, PositionHandle};

/// A single reported diagnostic, kept around so callers (tests, the driver)
/// can inspect what went wrong without re-parsing stderr.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub file: Rc<str>,
    pub position: Position,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error: {}, in {}:{}:{}",
            self.message, self.file, self.position.line, self.position.column
        )
    }
}

pub struct Reporter {
    active_file: RefCell<Rc<str>>,
    active_pos: RefCell<PositionHandle>,
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<u32>,
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            active_file: RefCell::new(Rc::from("<unknown>")),
            active_pos: RefCell::new(new_position_handle()),
            diagnostics: RefCell::new(Vec::new()),
            error_count: Cell::new(0),
        }
    }

    /// Re-points the reporter at a (possibly different) lexer's file name and
    /// live position. The driver calls this once per file it starts driving,
    /// and again after a nested `import` returns, exactly as `spec.md` §4.4
    /// specifies ("re-point the error reporter at this driver's lexer").
    pub fn set_active(&self, file: Rc<str>, position: PositionHandle) {
        *self.active_file.borrow_mut() = file;
        *self.active_pos.borrow_mut() = position;
    }

    /// Reports an error at the currently active lexer's position and returns
    /// `None`, to be propagated directly by the caller (`return
    /// reporter.error("...")`).
    pub fn error<T>(&self, message: impl Into<String>) -> Option<T> {
        let diag = Diagnostic {
            message: message.into(),
            file: self.active_file.borrow().clone(),
            position: self.active_pos.borrow().get(),
        };
        eprintln!("{diag}");
        self.error_count.set(self.error_count.get() + 1);
        self.diagnostics.borrow_mut().push(diag);
        None
    }

    pub fn has_errors(&self) -> bool {
        self.error_count.get() > 0
    }

    pub fn error_count(&self) -> u32 {
        self.error_count.get()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_message_with_active_position() {
        let reporter = Reporter::new();
        let pos = new_position_handle();
        pos.set(Position { line: 3, column: 7 });
        reporter.set_active(Rc::from("main.wtf"), pos);

        let result: Option<i32> = reporter.error("unknown variable 'x'");
        assert!(result.is_none());
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);

        let diags = reporter.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].to_string(),
            "Error: unknown variable 'x', in main.wtf:3:7"
        );
    }

    #[test]
    fn tracks_position_through_shared_handle() {
        let reporter = Reporter::new();
        let pos = new_position_handle();
        reporter.set_active(Rc::from("a.wtf"), pos.clone());

        pos.set(Position { line: 1, column: 1 });
        let _: Option<()> = reporter.error("first");

        pos.set(Position { line: 5, column: 2 });
        let _: Option<()> = reporter.error("second");

        let diags = reporter.diagnostics();
        assert_eq!(diags[0].position, Position { line: 1, column: 1 });
        assert_eq!(diags[1].position, Position { line: 5, column: 2 });
    }

    #[test]
    fn no_errors_on_fresh_reporter() {
        let reporter = Reporter::new();
        assert!(!reporter.has_errors());
        assert_eq!(reporter.error_count(), 0);
    }
}
