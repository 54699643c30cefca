//! Core lexer implementation (`spec.md` §4.1).

use std::path::Path;
use std::rc::Rc;

use wtfc_util::{new_position_handle, Position, PositionHandle, Reporter, WtfError, WtfResult};

use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for `.wtf` source files.
///
/// One instance per source file; each `import` spawns a fresh `Lexer` (and a
/// nested driver) over the imported file, per `spec.md` §4.4.
pub struct Lexer {
    cursor: Cursor,
    last_char: Option<u8>,
    file: Rc<str>,
    position_handle: PositionHandle,
    token_start: usize,
    token_start_line: u32,
    token_start_column: u32,
}

impl Lexer {
    /// Opens `path` for lexing starting at `initial_offset`. Every caller in
    /// this workspace passes 0; the parameter exists because `spec.md`
    /// §4.1's `SetInputFile` takes one, but a nested driver could resume a
    /// parent file's lexer from a saved position if it ever needed to.
    pub fn open(
        path: impl AsRef<Path>,
        initial_offset: u64,
        reporter: Rc<Reporter>,
    ) -> WtfResult<Self> {
        let path = path.as_ref();
        let cursor = Cursor::open(path, initial_offset).map_err(|_| {
            let message = format!("File not found: {}", path.display());
            let _: Option<()> = reporter.error(&message);
            WtfError::FileNotFound(path.display().to_string())
        })?;
        Ok(Self {
            cursor,
            last_char: Some(b' '),
            file: Rc::from(path.display().to_string()),
            position_handle: new_position_handle(),
            token_start: 0,
            token_start_line: 0,
            token_start_column: 0,
        })
    }

    pub fn file(&self) -> Rc<str> {
        self.file.clone()
    }

    /// The shared cell the error reporter reads this lexer's current
    /// position from (see `wtfc_util::Reporter::set_active`).
    pub fn position_handle(&self) -> PositionHandle {
        self.position_handle.clone()
    }

    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub(crate) fn advance(&mut self) -> Option<u8> {
        self.last_char = self.cursor.next_byte();
        self.last_char
    }

    pub(crate) fn current(&self) -> Option<u8> {
        self.last_char
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
        self.position_handle.set(Position {
            line: self.token_start_line,
            column: self.token_start_column,
        });
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.last_char, Some(c) if c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Returns the next token in the source stream, or `Token::Eof` at end of
    /// file. Skips whitespace and `#` comments first.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan_token();
        tracing::trace!(?token, "fetched token");
        token
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();
        self.mark_token_start();

        let Some(c) = self.last_char else {
            return Token::Eof;
        };

        if c.is_ascii_alphabetic() {
            return self.lex_identifier();
        }
        if c.is_ascii_digit() || c == b'.' {
            return self.lex_number();
        }
        if c == b'#' {
            self.skip_comment();
            return self.scan_token();
        }
        if c == b'\'' {
            return self.lex_string();
        }

        self.advance();
        Token::Other(c)
    }
}
