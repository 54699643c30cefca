//! Flat expression forms: `Number`, `Variable`, `Binary`, `Unary`, `Call`,
//! `Var` (`spec.md` §4.3).

use inkwell::values::{FloatValue, FunctionValue};
use inkwell::FloatPredicate;

use wtfc_par::ast::Expr;

use crate::backend::Backend;
use crate::lower::{control, create_entry_alloca};

pub(crate) fn lower_expr<'ctx>(
    backend: &mut Backend<'ctx>,
    function: FunctionValue<'ctx>,
    expr: &Expr,
) -> Option<FloatValue<'ctx>> {
    match expr {
        Expr::Number(v) => Some(backend.context.f64_type().const_float(*v)),

        Expr::Variable(name) => {
            let Some(slot) = backend.named_values.get(name) else {
                return backend
                    .reporter
                    .error(format!("Unknown variable '{name}'"));
            };
            backend
                .builder
                .build_load(backend.context.f64_type(), slot, name)
                .ok()
                .map(|v| v.into_float_value())
        }

        Expr::Binary(op, lhs, rhs) => lower_binary(backend, function, *op, lhs, rhs),

        Expr::Unary(op, operand) => {
            let name = format!("unary{}", *op as char);
            let Some(callee) = backend.module.get_function(&name) else {
                return backend.reporter.error("Unknown unary operator");
            };
            let arg = lower_expr(backend, function, operand)?;
            call_with_args(backend, callee, &[arg])
        }

        Expr::Call(callee_name, args) => {
            let Some(callee) = backend.module.get_function(callee_name) else {
                return backend
                    .reporter
                    .error(format!("Unknown function referenced: '{callee_name}'"));
            };
            if callee.count_params() as usize != args.len() {
                return backend.reporter.error(format!(
                    "Wrong number of arguments to '{callee_name}': expected {}, got {}",
                    callee.count_params(),
                    args.len()
                ));
            }
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(lower_expr(backend, function, arg)?);
            }
            call_with_args(backend, callee, &values)
        }

        Expr::Var(name, init) => {
            let value = lower_expr(backend, function, init)?;
            let slot = create_entry_alloca(backend, function, name)?;
            backend.builder.build_store(slot, value).ok()?;
            backend.named_values.bind(name.clone(), slot);
            Some(value)
        }

        Expr::Conditional { branches, else_body } => {
            control::lower_conditional(backend, function, branches, else_body)
        }

        Expr::For {
            iter,
            init,
            end,
            step,
            body,
        } => control::lower_for(backend, function, iter, init, end, step.as_deref(), body),
    }
}

fn lower_binary<'ctx>(
    backend: &mut Backend<'ctx>,
    function: FunctionValue<'ctx>,
    op: u8,
    lhs: &Expr,
    rhs: &Expr,
) -> Option<FloatValue<'ctx>> {
    if op == b'=' {
        let Expr::Variable(name) = lhs else {
            return backend
                .reporter
                .error("Left hand of assignment must be a variable");
        };
        let Some(slot) = backend.named_values.get(name) else {
            return backend
                .reporter
                .error(format!("Unknown variable '{name}'"));
        };
        let value = lower_expr(backend, function, rhs)?;
        backend.builder.build_store(slot, value).ok()?;
        return Some(value);
    }

    let lhs_val = lower_expr(backend, function, lhs)?;
    let rhs_val = lower_expr(backend, function, rhs)?;

    match op {
        b'+' => backend.builder.build_float_add(lhs_val, rhs_val, "addtmp").ok(),
        b'-' => backend.builder.build_float_sub(lhs_val, rhs_val, "subtmp").ok(),
        b'*' => backend.builder.build_float_mul(lhs_val, rhs_val, "multmp").ok(),
        b'/' => backend.builder.build_float_div(lhs_val, rhs_val, "divtmp").ok(),
        b'<' => {
            let cmp = backend
                .builder
                .build_float_compare(FloatPredicate::ULT, lhs_val, rhs_val, "cmptmp")
                .ok()?;
            backend
                .builder
                .build_unsigned_int_to_float(cmp, backend.context.f64_type(), "booltmp")
                .ok()
        }
        _ => {
            let name = format!("binary{}", op as char);
            let Some(callee) = backend.module.get_function(&name) else {
                return backend
                    .reporter
                    .error(format!("Unknown binary operator '{}'", op as char));
            };
            call_with_args(backend, callee, &[lhs_val, rhs_val])
        }
    }
}

fn call_with_args<'ctx>(
    backend: &Backend<'ctx>,
    callee: FunctionValue<'ctx>,
    args: &[FloatValue<'ctx>],
) -> Option<FloatValue<'ctx>> {
    let args: Vec<_> = args.iter().map(|v| (*v).into()).collect();
    backend
        .builder
        .build_call(callee, &args, "calltmp")
        .ok()?
        .try_as_basic_value()
        .left()
        .map(|v| v.into_float_value())
}

/// Comparison to a float other than 0.0, shared by `Conditional` and `For`
/// (`spec.md` §4.3: both test "!= 0.0").
pub(crate) fn build_nonzero_test<'ctx>(
    backend: &Backend<'ctx>,
    value: FloatValue<'ctx>,
) -> Option<inkwell::values::IntValue<'ctx>> {
    let zero = backend.context.f64_type().const_float(0.0);
    backend
        .builder
        .build_float_compare(FloatPredicate::ONE, value, zero, "ifcond")
        .ok()
}
