//! The backend: LLVM context/module/builder, the JIT execution engine, and
//! the function-pass pipeline that promotes stack slots to SSA registers
//! (`spec.md` §4.3 "Stack-slot discipline").

use std::rc::Rc;

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::execution_engine::{ExecutionEngine, JitFunction};
use inkwell::module::{Linkage, Module};
use inkwell::passes::PassManager;
use inkwell::values::FunctionValue;
use inkwell::OptimizationLevel;

use wtfc_util::{Reporter, WtfError, WtfResult};

use crate::scope::NamedValues;

/// The five runtime functions every `.wtf` session declares at startup
/// (`spec.md` §6). Their Rust-side definitions live in `wtfc-drv` and are
/// resolved by the JIT's in-process symbol lookup; the backend only needs
/// to know their arity to declare them.
pub const BUILTINS: &[(&str, usize)] = &[
    ("pchar", 1),
    ("pdoub", 1),
    ("pline", 0),
    ("wait", 1),
    ("clrscr", 0),
];

/// The host libm/libc prelude (`spec.md` §6: "Prelude declares `sin`,
/// `cos`, `exit`"). No Rust-side definition: the JIT resolves these
/// against the process's own linked libc. `exit` is declared nullary here,
/// not matching libc's real `void exit(int)`.
pub const PRELUDE: &[(&str, usize)] = &[("sin", 1), ("cos", 1), ("exit", 0)];

pub type AnonFn = unsafe extern "C" fn() -> f64;

pub struct Backend<'ctx> {
    pub context: &'ctx Context,
    pub module: Module<'ctx>,
    pub builder: Builder<'ctx>,
    pub fpm: PassManager<FunctionValue<'ctx>>,
    pub execution_engine: ExecutionEngine<'ctx>,
    pub named_values: NamedValues<'ctx>,
    pub reporter: Rc<Reporter>,
}

impl<'ctx> Backend<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str, reporter: Rc<Reporter>) -> WtfResult<Self> {
        let module = context.create_module(module_name);
        let builder = context.create_builder();

        let execution_engine = module
            .create_jit_execution_engine(OptimizationLevel::None)
            .map_err(|e| WtfError::JitEngineCreation(e.to_string()))?;

        let fpm = PassManager::create(&module);
        fpm.add_basic_alias_analysis_pass();
        fpm.add_promote_memory_to_register_pass();
        fpm.add_instruction_combining_pass();
        fpm.add_reassociate_pass();
        fpm.add_gvn_pass();
        fpm.add_cfg_simplification_pass();
        fpm.initialize();

        let mut backend = Self {
            context,
            module,
            builder,
            fpm,
            execution_engine,
            named_values: NamedValues::new(),
            reporter,
        };
        backend.declare_builtins();
        Ok(backend)
    }

    fn declare_builtins(&mut self) {
        let f64_type = self.context.f64_type();
        for (name, arity) in BUILTINS.iter().chain(PRELUDE) {
            let param_types = vec![f64_type.into(); *arity];
            let fn_type = f64_type.fn_type(&param_types, false);
            self.module
                .add_function(name, fn_type, Some(Linkage::External));
        }
    }

    /// Looks up a named function's JIT address and executes it with no
    /// arguments, per the driver's "run the anonymous top-level expression
    /// immediately" behavior (`spec.md` §4.4).
    pub fn run_function(&self, name: &str) -> Option<f64> {
        let compiled: JitFunction<AnonFn> = unsafe {
            match self.execution_engine.get_function(name) {
                Ok(f) => f,
                Err(e) => return self.reporter.error(format!("Failed to JIT function: {e}")),
            }
        };
        Some(unsafe { compiled.call() })
    }
}
