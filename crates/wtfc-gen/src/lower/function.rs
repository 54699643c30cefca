//! Top-level constructs: `Prototype`, `Function`, `Operator` (`spec.md`
//! §4.3).

use inkwell::values::FunctionValue;

use wtfc_par::ast::{Function, Operator, Prototype};

use crate::backend::Backend;
use crate::lower::{create_entry_alloca, lower_block};

/// Declares (or validates a matching redeclaration of) an external-linkage
/// function returning `f64` and taking `proto.params.len()` `f64`s.
pub fn lower_prototype<'ctx>(
    backend: &mut Backend<'ctx>,
    proto: &Prototype,
) -> Option<FunctionValue<'ctx>> {
    if let Some(existing) = backend.module.get_function(&proto.name) {
        if existing.count_basic_blocks() == 0 && existing.count_params() as usize == proto.params.len() {
            tracing::debug!(name = %proto.name, "reusing matching extern declaration");
            return Some(existing);
        }
        tracing::debug!(name = %proto.name, "rejecting redefinition");
        return backend.reporter.error("Redefinition of function");
    }

    let f64_type = backend.context.f64_type();
    let param_types = vec![f64_type.into(); proto.params.len()];
    let fn_type = f64_type.fn_type(&param_types, false);
    Some(backend.module.add_function(&proto.name, fn_type, None))
}

/// Clears `NamedValues`, lowers the prototype, binds parameters into
/// entry-block stack slots, lowers the body, and runs the optimization
/// pipeline. Erases the half-built function on any sub-failure (`spec.md`
/// §4.3: "On any sub-failure, erase the half-built function").
pub fn lower_function<'ctx>(backend: &mut Backend<'ctx>, func: &Function) -> Option<FunctionValue<'ctx>> {
    tracing::debug!(name = %func.proto.name, arity = func.proto.params.len(), "lowering function");
    backend.named_values.clear();

    let function = lower_prototype(backend, &func.proto)?;
    let entry = backend.context.append_basic_block(function, "entry");
    backend.builder.position_at_end(entry);

    for (param, value) in func.proto.params.iter().zip(function.get_param_iter()) {
        let Some(slot) = create_entry_alloca(backend, function, param) else {
            unsafe { function.delete() };
            return None;
        };
        if backend.builder.build_store(slot, value.into_float_value()).is_err() {
            unsafe { function.delete() };
            return None;
        }
        backend.named_values.bind(param.clone(), slot);
    }

    let Some(return_val) = lower_block(backend, function, &func.body) else {
        unsafe { function.delete() };
        return None;
    };

    if backend.builder.build_return(Some(&return_val)).is_err() {
        unsafe { function.delete() };
        return None;
    }

    if !function.verify(true) {
        unsafe { function.delete() };
        return backend
            .reporter
            .error(format!("Invalid generated code for function '{}'", func.proto.name));
    }

    backend.fpm.run_on(&function);
    Some(function)
}

/// An `Operator` lowers exactly like a `Function` named `binary<c>`/
/// `unary<c>` (`spec.md` §4.3); the parser already gave it that name.
pub fn lower_operator<'ctx>(backend: &mut Backend<'ctx>, op: &Operator) -> Option<FunctionValue<'ctx>> {
    let as_function = Function {
        proto: op.proto.clone(),
        body: op.body.clone(),
    };
    lower_function(backend, &as_function)
}
