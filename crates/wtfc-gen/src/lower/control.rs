//! Block-structured expressions: `Conditional` (explicit phi merge) and
//! `For` (stack-slot induction variable), per `spec.md` §4.3.

use inkwell::values::{FloatValue, FunctionValue};

use wtfc_par::ast::{Block, Expr};

use crate::backend::Backend;
use crate::lower::expr::{build_nonzero_test, lower_expr};
use crate::lower::{create_entry_alloca, lower_block};

pub(crate) fn lower_conditional<'ctx>(
    backend: &mut Backend<'ctx>,
    function: FunctionValue<'ctx>,
    branches: &[(Expr, Block)],
    else_body: &Block,
) -> Option<FloatValue<'ctx>> {
    let merge_bb = backend.context.append_basic_block(function, "ifcont");
    let mut incoming: Vec<(FloatValue<'ctx>, inkwell::basic_block::BasicBlock<'ctx>)> = Vec::new();

    for (cond, body) in branches {
        let cond_val = lower_expr(backend, function, cond)?;
        let test = build_nonzero_test(backend, cond_val)?;

        let then_bb = backend.context.append_basic_block(function, "then");
        let next_bb = backend.context.append_basic_block(function, "next");
        backend
            .builder
            .build_conditional_branch(test, then_bb, next_bb)
            .ok()?;

        backend.builder.position_at_end(then_bb);
        let then_val = lower_block(backend, function, body)?;
        let then_end_bb = backend.builder.get_insert_block()?;
        backend.builder.build_unconditional_branch(merge_bb).ok()?;
        incoming.push((then_val, then_end_bb));

        backend.builder.position_at_end(next_bb);
    }

    let else_val = lower_block(backend, function, else_body)?;
    let else_end_bb = backend.builder.get_insert_block()?;
    backend.builder.build_unconditional_branch(merge_bb).ok()?;
    incoming.push((else_val, else_end_bb));

    backend.builder.position_at_end(merge_bb);
    let phi = backend
        .builder
        .build_phi(backend.context.f64_type(), "iftmp")
        .ok()?;
    for (value, block) in &incoming {
        phi.add_incoming(&[(value, *block)]);
    }
    Some(phi.as_basic_value().into_float_value())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn lower_for<'ctx>(
    backend: &mut Backend<'ctx>,
    function: FunctionValue<'ctx>,
    iter: &str,
    init: &Expr,
    end: &Expr,
    step: Option<&Expr>,
    body: &Block,
) -> Option<FloatValue<'ctx>> {
    let init_val = lower_expr(backend, function, init)?;

    let slot = create_entry_alloca(backend, function, iter)?;
    backend.builder.build_store(slot, init_val).ok()?;

    let previous_binding = backend.named_values.bind(iter, slot);

    let loop_bb = backend.context.append_basic_block(function, "loop");
    backend.builder.build_unconditional_branch(loop_bb).ok()?;
    backend.builder.position_at_end(loop_bb);

    let body_val = lower_block(backend, function, body)?;

    let step_val = match step {
        Some(step_expr) => lower_expr(backend, function, step_expr)?,
        None => backend.context.f64_type().const_float(1.0),
    };

    let cur = backend
        .builder
        .build_load(backend.context.f64_type(), slot, iter)
        .ok()?
        .into_float_value();
    let next = backend.builder.build_float_add(cur, step_val, "nextvar").ok()?;
    backend.builder.build_store(slot, next).ok()?;

    let end_val = lower_expr(backend, function, end)?;
    let test = build_nonzero_test(backend, end_val)?;

    let after_bb = backend.context.append_basic_block(function, "afterloop");
    backend
        .builder
        .build_conditional_branch(test, loop_bb, after_bb)
        .ok()?;

    backend.builder.position_at_end(after_bb);
    backend.named_values.restore(iter, previous_binding);

    Some(body_val)
}
