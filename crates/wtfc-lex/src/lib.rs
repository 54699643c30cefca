//! wtfc-lex - the `.wtf` lexer (`spec.md` §4.1).
//!
//! Turns a source file into a [`Token`] stream one token at a time, tracking
//! byte offset, line and column so the shared [`wtfc_util::Reporter`] can
//! report precise error locations.

mod cursor;
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::Token;
