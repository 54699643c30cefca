//! The `.wtf` parser (`spec.md` §4.2): recursive descent with Pratt-style
//! precedence climbing for binary expressions.

use std::rc::Rc;

use wtfc_lex::{Lexer, Token};
use wtfc_util::Reporter;

use crate::ast::{Block, Expr, Function, Import, Operator, Prototype, TopLevel};
use crate::precedence::PrecedenceTableHandle;

pub struct Parser {
    lexer: Lexer,
    cur_tok: Token,
    precedence: PrecedenceTableHandle,
    reporter: Rc<Reporter>,
}

impl Parser {
    pub fn new(mut lexer: Lexer, precedence: PrecedenceTableHandle, reporter: Rc<Reporter>) -> Self {
        let cur_tok = lexer.next_token();
        Self {
            lexer,
            cur_tok,
            precedence,
            reporter,
        }
    }

    pub fn file(&self) -> Rc<str> {
        self.lexer.file()
    }

    /// The shared cell the error reporter should read from while this
    /// parser's lexer is the active one; used by the driver to re-point the
    /// reporter after a nested `import` returns (`spec.md` §4.4).
    pub fn position_handle(&self) -> wtfc_util::PositionHandle {
        self.lexer.position_handle()
    }

    /// The token the driver's dispatch loop is currently looking at.
    pub fn cur_tok(&self) -> &Token {
        &self.cur_tok
    }

    /// Advances past the current token without parsing anything: the
    /// driver's `end`/`;` dispatch arms, and its error-recovery step after a
    /// failed top-level construct (`spec.md` §7: "recovers at statement
    /// boundaries by advancing one token").
    pub fn skip_token(&mut self) {
        self.advance();
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.cur_tok, next)
    }

    fn error<T>(&self, message: impl Into<String>) -> Option<T> {
        self.reporter.error(message)
    }

    /// Parses one top-level construct: a function, operator, extern, import,
    /// or bare expression wrapped as an anonymous function. Returns `None` at
    /// end of file.
    pub fn parse_top_level(&mut self) -> Option<TopLevel> {
        match self.cur_tok {
            Token::Eof => None,
            Token::Func => self.parse_definition().map(TopLevel::Function),
            Token::Op => self.parse_operator().map(TopLevel::Operator),
            Token::Extern => self.parse_extern().map(TopLevel::Extern),
            Token::Import => self.parse_import().map(TopLevel::Import),
            Token::Other(b';') => {
                self.advance();
                self.parse_top_level()
            }
            _ => self.parse_top_level_expr().map(TopLevel::Function),
        }
    }

    fn cur_op_byte(&self) -> Option<u8> {
        self.cur_tok.as_op_byte()
    }

    fn expect_op(&mut self, byte: u8, context: &str) -> Option<()> {
        if self.cur_op_byte() == Some(byte) {
            self.advance();
            Some(())
        } else {
            self.error(format!("Expected '{}' {context}", byte as char))
        }
    }

    // ---- primary / unary / binary expressions ----

    fn parse_primary(&mut self) -> Option<Expr> {
        match &self.cur_tok {
            Token::Number(v) => {
                let v = *v;
                self.advance();
                Some(Expr::Number(v))
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.advance();
                if self.cur_op_byte() == Some(b'(') {
                    self.advance();
                    let mut args = Vec::new();
                    while self.cur_op_byte() != Some(b')') {
                        if self.cur_tok == Token::End {
                            self.advance();
                            continue;
                        }
                        args.push(self.parse_expression()?);
                        if self.cur_op_byte() == Some(b',') {
                            self.advance();
                        }
                    }
                    self.advance(); // ')'
                    Some(Expr::Call(name, args))
                } else {
                    Some(Expr::Variable(name))
                }
            }
            Token::If => self.parse_conditional(),
            Token::For => self.parse_for(),
            Token::Var => self.parse_var_expr(),
            Token::End => {
                self.advance();
                self.parse_primary()
            }
            Token::Other(b'(') => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_op(b')', "to close parenthesized expression")?;
                Some(inner)
            }
            Token::Eof => self.error("Unexpected end of file while parsing expression"),
            _ => self.error("Expected expression"),
        }
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        match self.cur_op_byte() {
            Some(op) if op != b'(' && op != b',' => {
                self.advance();
                let operand = self.parse_unary()?;
                Some(Expr::Unary(op, Box::new(operand)))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_expression(&mut self) -> Option<Expr> {
        let lhs = self.parse_unary()?;
        self.parse_bin_op_rhs(0, lhs)
    }

    fn parse_bin_op_rhs(&mut self, min_prec: i32, mut lhs: Expr) -> Option<Expr> {
        loop {
            let Some(op) = self.cur_op_byte() else {
                return Some(lhs);
            };
            let Some(prec) = self.precedence.borrow().get(op) else {
                return Some(lhs);
            };
            if prec < min_prec {
                return Some(lhs);
            }
            self.advance();
            let mut rhs = self.parse_unary()?;

            if let Some(next_op) = self.cur_op_byte() {
                if let Some(next_prec) = self.precedence.borrow().get(next_op) {
                    if next_prec > prec {
                        rhs = self.parse_bin_op_rhs(prec + 1, rhs)?;
                    }
                }
            }

            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    // ---- block-structured expressions ----

    fn parse_block_until(&mut self, terminators: &[Token]) -> Option<Block> {
        let mut body = vec![self.parse_expression()?];
        while !terminators.contains(&self.cur_tok) {
            if self.cur_op_byte() == Some(b';') {
                self.advance();
                continue;
            }
            body.push(self.parse_expression()?);
        }
        Some(body)
    }

    fn parse_conditional(&mut self) -> Option<Expr> {
        let mut branches = Vec::new();
        loop {
            self.advance(); // `if` or `elsif`
            let cond = self.parse_expression()?;
            if self.cur_tok != Token::Then {
                return self.error("Expected 'then'");
            }
            self.advance();
            let body = self.parse_block_until(&[Token::Elsif, Token::Else])?;
            branches.push((cond, body));
            if self.cur_tok != Token::Elsif {
                break;
            }
        }
        if self.cur_tok != Token::Else {
            return self.error("Expected 'else'");
        }
        self.advance();
        let else_body = self.parse_block_until(&[Token::End])?;
        self.advance(); // `end`
        Some(Expr::Conditional { branches, else_body })
    }

    fn parse_for(&mut self) -> Option<Expr> {
        self.advance(); // `for`
        let Token::Ident(iter) = self.cur_tok.clone() else {
            return self.error("Expected identifier after 'for'");
        };
        self.advance();
        self.expect_op(b'=', "after for-loop variable")?;
        let init = self.parse_expression()?;
        self.expect_op(b',', "after for-loop initializer")?;
        let end = self.parse_expression()?;
        let step = if self.cur_op_byte() == Some(b',') {
            self.advance();
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        if self.cur_tok != Token::In {
            return self.error("Expected 'in' after for-loop header");
        }
        self.advance();
        let body = self.parse_block_until(&[Token::End])?;
        self.advance(); // `end`
        Some(Expr::For {
            iter,
            init: Box::new(init),
            end: Box::new(end),
            step,
            body,
        })
    }

    fn parse_var_expr(&mut self) -> Option<Expr> {
        self.advance(); // `var`
        let Token::Ident(name) = self.cur_tok.clone() else {
            return self.error("Expected identifier after 'var'");
        };
        self.advance();
        self.expect_op(b'=', "after 'var' binding name")?;
        let init = self.parse_expression()?;
        Some(Expr::Var(name, Box::new(init)))
    }

    // ---- top-level constructs ----

    fn parse_prototype(&mut self) -> Option<Prototype> {
        let Token::Ident(name) = self.cur_tok.clone() else {
            return self.error("Expected function name in prototype");
        };
        self.advance();
        self.expect_op(b'(', "to open parameter list")?;
        let mut params = Vec::new();
        loop {
            match self.cur_tok.clone() {
                Token::Ident(p) => {
                    params.push(p);
                    self.advance();
                }
                _ => break,
            }
            if self.cur_op_byte() == Some(b',') {
                self.advance();
            }
        }
        self.expect_op(b')', "to close parameter list")?;
        Some(Prototype { name, params })
    }

    pub fn parse_definition(&mut self) -> Option<Function> {
        self.advance(); // `func`
        let proto = self.parse_prototype()?;
        let body = self.parse_block_until(&[Token::End])?;
        self.advance(); // `end`
        Some(Function { proto, body })
    }

    pub fn parse_operator(&mut self) -> Option<Operator> {
        self.advance(); // `op`
        let Some(symbol) = self.cur_op_byte() else {
            return self.error("Expected operator character after 'op'");
        };
        self.advance();
        let Token::Number(precedence) = self.cur_tok else {
            return self.error("Expected precedence number after operator character");
        };
        self.advance();
        self.expect_op(b'(', "to open operator parameter list")?;
        let mut params = Vec::new();
        loop {
            match self.cur_tok.clone() {
                Token::Ident(p) => {
                    params.push(p);
                    self.advance();
                }
                _ => break,
            }
            if self.cur_op_byte() == Some(b',') {
                self.advance();
            }
        }
        self.expect_op(b')', "to close operator parameter list")?;
        if params.len() != 1 && params.len() != 2 {
            return self.error("Operator declarations take exactly 1 or 2 parameters");
        }
        let arity_name = if params.len() == 1 { "unary" } else { "binary" };
        let name = format!("{arity_name}{}", symbol as char);
        let body = self.parse_block_until(&[Token::End])?;
        self.advance(); // `end`

        self.precedence.borrow_mut().set(symbol, precedence as i32);

        Some(Operator {
            symbol,
            precedence: precedence as i32,
            proto: Prototype { name, params },
            body,
        })
    }

    pub fn parse_extern(&mut self) -> Option<Prototype> {
        self.advance(); // `extern`
        self.parse_prototype()
    }

    pub fn parse_import(&mut self) -> Option<Import> {
        self.advance(); // `import`
        let Token::Str(filename) = self.cur_tok.clone() else {
            return self.error("Expected string literal after 'import'");
        };
        self.advance();
        Some(Import { filename })
    }

    /// Wraps a bare expression in an anonymous function so the driver can JIT
    /// and run it the same way it runs a named one (`spec.md` §4.2).
    pub fn parse_top_level_expr(&mut self) -> Option<Function> {
        let expr = self.parse_expression()?;
        Some(Function {
            proto: Prototype {
                name: String::new(),
                params: Vec::new(),
            },
            body: vec![expr],
        })
    }
}
