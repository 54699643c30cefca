//! The session driver (`spec.md` §4.4): one instance per source file,
//! dispatching on the parser's current token and feeding completed AST
//! constructs to the shared codegen backend.

use std::path::Path;
use std::rc::Rc;

use wtfc_lex::{Lexer, Token};
use wtfc_gen::{lower_function, lower_operator, lower_prototype, Backend};
use wtfc_par::precedence::PrecedenceTableHandle;
use wtfc_par::Parser;
use wtfc_util::{Reporter, WtfResult};

/// Drives one `.wtf` source file to completion against a shared [`Backend`].
/// An `import` spawns a nested `Driver` over a borrow of the same backend,
/// precedence table, and reporter, reproducing the reference's "nested
/// driver sharing the same Codegen" behavior (`spec.md` §4.4) without a
/// process-global.
pub struct Driver<'ctx, 'backend> {
    parser: Parser,
    backend: &'backend mut Backend<'ctx>,
    precedence: PrecedenceTableHandle,
    reporter: Rc<Reporter>,
    anon_counter: u32,
}

impl<'ctx, 'backend> Driver<'ctx, 'backend> {
    /// Opens `path`, primes the first token, and points the reporter at this
    /// driver's lexer.
    pub fn new(
        path: impl AsRef<Path>,
        backend: &'backend mut Backend<'ctx>,
        precedence: PrecedenceTableHandle,
        reporter: Rc<Reporter>,
    ) -> WtfResult<Self> {
        let lexer = Lexer::open(path, 0, reporter.clone())?;
        reporter.set_active(lexer.file(), lexer.position_handle());
        let parser = Parser::new(lexer, precedence.clone(), reporter.clone());
        Ok(Self {
            parser,
            backend,
            precedence,
            reporter,
            anon_counter: 0,
        })
    }

    /// Runs the dispatch loop to end of file (`spec.md` §4.4 `Go(file)`).
    /// Every branch recovers from a parse/codegen failure by skipping one
    /// token and continuing rather than aborting the session (`spec.md` §7).
    pub fn go(&mut self) {
        loop {
            match self.parser.cur_tok().clone() {
                Token::Eof => return,

                Token::Func => match self.parser.parse_definition() {
                    Some(func) => {
                        tracing::info!(name = %func.proto.name, "defining function");
                        lower_function(self.backend, &func);
                    }
                    None => self.parser.skip_token(),
                },

                Token::Extern => match self.parser.parse_extern() {
                    Some(proto) => {
                        tracing::info!(name = %proto.name, "declaring extern");
                        lower_prototype(self.backend, &proto);
                    }
                    None => self.parser.skip_token(),
                },

                Token::Op => match self.parser.parse_operator() {
                    Some(op) => {
                        tracing::info!(symbol = %(op.symbol as char), "defining operator");
                        lower_operator(self.backend, &op);
                    }
                    None => self.parser.skip_token(),
                },

                Token::Import => match self.parser.parse_import() {
                    Some(import) => self.run_import(&import.filename),
                    None => self.parser.skip_token(),
                },

                Token::End | Token::Other(b';') => self.parser.skip_token(),

                _ => match self.parser.parse_top_level_expr() {
                    Some(mut func) => {
                        func.proto.name = format!("__anon_expr{}", self.anon_counter);
                        self.anon_counter += 1;
                        if let Some(function) = lower_function(self.backend, &func) {
                            let name = function.get_name().to_str().unwrap_or_default().to_string();
                            tracing::info!(%name, "running top-level expression");
                            self.backend.run_function(&name);
                        }
                    }
                    None => self.parser.skip_token(),
                },
            }
        }
    }

    /// Resolves `name` to `<name>.wtf`, runs a nested driver over it sharing
    /// this driver's backend, precedence table, and reporter, then re-points
    /// the reporter at this driver's own lexer and advances one token
    /// (`spec.md` §4.4).
    fn run_import(&mut self, name: &str) {
        let path = format!("{name}.wtf");
        tracing::info!(file = %path, "entering import");
        match Driver::new(&path, &mut *self.backend, self.precedence.clone(), self.reporter.clone()) {
            Ok(mut nested) => nested.go(),
            Err(_) => {} // Lexer::open already reported the error
        }
        self.reporter.set_active(self.parser.file(), self.parser.position_handle());
        self.parser.skip_token();
        tracing::info!(file = %path, "exiting import");
    }
}
