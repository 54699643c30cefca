//! AST-to-LLVM-IR lowering (`spec.md` §4.3).
//!
//! Split the way the lexer splits by token kind: `expr` covers the flat
//! expression forms, `control` the two block-structured ones
//! (`Conditional`, `For`), `function` the top-level constructs
//! (`Prototype`, `Function`, `Operator`).

mod control;
mod expr;
mod function;

pub use function::{lower_function, lower_operator, lower_prototype};

use inkwell::values::{FunctionValue, PointerValue};

use wtfc_par::ast::Block;

use crate::backend::Backend;

/// Allocates a stack slot in `function`'s entry block. Every mutable
/// binding in this language lives in one (`spec.md` §4.3 "Stack-slot
/// discipline"), promoted to SSA later by the memory-to-register pass.
pub(crate) fn create_entry_alloca<'ctx>(
    backend: &Backend<'ctx>,
    function: FunctionValue<'ctx>,
    name: &str,
) -> Option<PointerValue<'ctx>> {
    let current_block = backend.builder.get_insert_block();

    let entry = function.get_first_basic_block()?;
    match entry.get_first_instruction() {
        Some(first_instr) => backend.builder.position_before(&first_instr),
        None => backend.builder.position_at_end(entry),
    }
    let alloca = backend
        .builder
        .build_alloca(backend.context.f64_type(), name)
        .ok()?;

    if let Some(block) = current_block {
        backend.builder.position_at_end(block);
    }
    Some(alloca)
}

/// Lowers a `Block` (`spec.md` §3: "value of the block is the value of its
/// last expression"). Every `Function`/`Conditional`/`For` body goes
/// through here.
pub(crate) fn lower_block<'ctx>(
    backend: &mut Backend<'ctx>,
    function: FunctionValue<'ctx>,
    block: &Block,
) -> Option<inkwell::values::FloatValue<'ctx>> {
    let mut last = None;
    for expr in block {
        last = Some(expr::lower_expr(backend, function, expr)?);
    }
    last
}
