//! wtfc-gen - lowers `.wtf` ASTs to LLVM IR and JIT-executes top-level
//! expressions (`spec.md` §4.3).

mod backend;
mod lower;
mod scope;

pub use backend::{AnonFn, Backend, BUILTINS, PRELUDE};
pub use lower::{lower_function, lower_operator, lower_prototype};

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use wtfc_par::ast::{Block, Expr, Function, Prototype};
    use wtfc_util::Reporter;

    #[test]
    fn lowers_and_runs_arithmetic() {
        let context = inkwell::context::Context::create();
        let reporter = Rc::new(Reporter::new());
        let mut backend = Backend::new(&context, "test", reporter.clone()).unwrap();

        let anon = Function {
            proto: Prototype {
                name: String::new(),
                params: vec![],
            },
            body: vec![Expr::Binary(
                b'+',
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Binary(
                    b'*',
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0)),
                )),
            )],
        };
        let func = lower_function(&mut backend, &anon).expect("lowering should succeed");
        assert_eq!(backend.run_function(func.get_name().to_str().unwrap()), Some(7.0));
    }

    #[test]
    fn reports_unknown_variable() {
        let context = inkwell::context::Context::create();
        let reporter = Rc::new(Reporter::new());
        let mut backend = Backend::new(&context, "test", reporter.clone()).unwrap();

        let anon = Function {
            proto: Prototype {
                name: String::new(),
                params: vec![],
            },
            body: vec![Expr::Variable("missing".into())],
        };
        let result = lower_function(&mut backend, &anon);
        assert!(result.is_none());
        assert!(reporter.has_errors());
    }

    #[test]
    fn calls_a_previously_defined_function() {
        let context = inkwell::context::Context::create();
        let reporter = Rc::new(Reporter::new());
        let mut backend = Backend::new(&context, "test", reporter.clone()).unwrap();

        let square = Function {
            proto: Prototype {
                name: "square".into(),
                params: vec!["x".into()],
            },
            body: vec![Expr::Binary(
                b'*',
                Box::new(Expr::Variable("x".into())),
                Box::new(Expr::Variable("x".into())),
            )],
        };
        lower_function(&mut backend, &square).expect("square should lower");

        let caller: Block = vec![Expr::Call("square".into(), vec![Expr::Number(4.0)])];
        let anon = Function {
            proto: Prototype {
                name: String::new(),
                params: vec![],
            },
            body: caller,
        };
        let func = lower_function(&mut backend, &anon).expect("lowering should succeed");
        assert_eq!(backend.run_function(func.get_name().to_str().unwrap()), Some(16.0));
    }
}
