//! `#`-to-end-of-line comment skipping.

use super::core::Lexer;

impl Lexer {
    pub(crate) fn skip_comment(&mut self) {
        while !matches!(self.current(), None | Some(b'\n')) {
            self.advance();
        }
    }
}
