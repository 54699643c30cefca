//! Identifier and keyword lexing.

use super::core::Lexer;
use crate::token::Token;

impl Lexer {
    /// Consumes `[A-Za-z][A-Za-z0-9]*` and classifies it as a keyword or a
    /// plain identifier.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        let mut ident = String::new();
        while matches!(self.current(), Some(c) if c.is_ascii_alphanumeric()) {
            ident.push(self.current().unwrap() as char);
            self.advance();
        }
        keyword_or_ident(ident)
    }
}

fn keyword_or_ident(ident: String) -> Token {
    match ident.as_str() {
        "func" => Token::Func,
        "extern" => Token::Extern,
        "if" => Token::If,
        "then" => Token::Then,
        "else" => Token::Else,
        "elsif" => Token::Elsif,
        "for" => Token::For,
        "in" => Token::In,
        "op" => Token::Op,
        "import" => Token::Import,
        "end" => Token::End,
        "var" => Token::Var,
        _ => Token::Ident(ident),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_keywords() {
        assert_eq!(keyword_or_ident("func".into()), Token::Func);
        assert_eq!(keyword_or_ident("elsif".into()), Token::Elsif);
        assert_eq!(keyword_or_ident("var".into()), Token::Var);
        assert_eq!(
            keyword_or_ident("fibonacci".into()),
            Token::Ident("fibonacci".into())
        );
    }
}
