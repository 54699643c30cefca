//! wtfc-par - the `.wtf` parser (`spec.md` §4.2).
//!
//! Token stream to [`ast::TopLevel`] constructs, maintaining the mutable
//! operator-precedence table that `op` declarations write into.

pub mod ast;
mod parser;
pub mod precedence;

pub use parser::Parser;
pub use precedence::{PrecedenceTable, PrecedenceTableHandle};

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{Expr, TopLevel};
    use std::io::Write;
    use std::rc::Rc;
    use wtfc_lex::Lexer;
    use wtfc_util::Reporter;

    fn parse_one(source: &str) -> TopLevel {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{source}").unwrap();
        let reporter = Rc::new(Reporter::new());
        let lexer = Lexer::open(file.path(), 0, reporter.clone()).unwrap();
        let mut parser = Parser::new(lexer, PrecedenceTable::shared(), reporter.clone());
        let top = parser.parse_top_level().expect("expected one construct");
        assert!(!reporter.has_errors());
        top
    }

    #[test]
    fn parses_arithmetic_with_precedence() {
        let top = parse_one("1 + 2 * 3;");
        let TopLevel::Function(func) = top else {
            panic!("expected anonymous function wrapper");
        };
        assert_eq!(
            func.body,
            vec![Expr::Binary(
                b'+',
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Binary(
                    b'*',
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0)),
                )),
            )]
        );
    }

    #[test]
    fn parses_function_definition() {
        let top = parse_one("func add(a b) a + b end");
        let TopLevel::Function(func) = top else {
            panic!("expected function");
        };
        assert_eq!(func.proto.name, "add");
        assert_eq!(func.proto.params, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn parses_conditional_with_elsif_and_mandatory_else() {
        let top = parse_one("if 1 then 2 elsif 3 then 4 else 5 end");
        let TopLevel::Function(func) = top else {
            panic!("expected wrapper");
        };
        let Expr::Conditional { branches, else_body } = &func.body[0] else {
            panic!("expected conditional");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(*else_body, vec![Expr::Number(5.0)]);
    }

    #[test]
    fn parses_for_loop_with_optional_step() {
        let top = parse_one("for i = 1, i < 10, 2 in i end");
        let TopLevel::Function(func) = top else {
            panic!("expected wrapper");
        };
        let Expr::For { iter, step, .. } = &func.body[0] else {
            panic!("expected for loop");
        };
        assert_eq!(iter, "i");
        assert!(step.is_some());
    }

    #[test]
    fn op_declaration_installs_precedence_and_is_visible_to_later_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "op : 1 (a b) a - b end 10 : 20").unwrap();
        let reporter = Rc::new(Reporter::new());
        let lexer = Lexer::open(file.path(), 0, reporter.clone()).unwrap();
        let precedence = PrecedenceTable::shared();
        let mut parser = Parser::new(lexer, precedence.clone(), reporter.clone());

        let op_decl = parser.parse_top_level().unwrap();
        assert!(matches!(op_decl, TopLevel::Operator(_)));
        assert_eq!(precedence.borrow().get(b':'), Some(1));

        let top = parser.parse_top_level().unwrap();
        let TopLevel::Function(func) = top else {
            panic!("expected wrapper");
        };
        assert_eq!(
            func.body,
            vec![Expr::Binary(
                b':',
                Box::new(Expr::Number(10.0)),
                Box::new(Expr::Number(20.0)),
            )]
        );
    }

    #[test]
    fn call_argument_list_eats_stray_end() {
        let top = parse_one("foo(end 1)");
        let TopLevel::Function(func) = top else {
            panic!("expected wrapper");
        };
        let Expr::Call(name, args) = &func.body[0] else {
            panic!("expected call");
        };
        assert_eq!(name, "foo");
        assert_eq!(*args, vec![Expr::Number(1.0)]);
    }
}
