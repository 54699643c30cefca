//! `wtfc` - JIT-executes a `.wtf` source file (`spec.md` §6 CLI contract).

mod builtins;
mod config;
mod driver;

use std::rc::Rc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use driver::Driver;
use wtfc_gen::Backend;
use wtfc_par::PrecedenceTable;
use wtfc_util::Reporter;

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args()).map_err(anyhow::Error::msg)?;
    init_logging(config.log_filter.as_deref());

    let context = inkwell::context::Context::create();
    let reporter = Rc::new(Reporter::new());
    let mut backend = Backend::new(&context, "wtfc", reporter.clone())
        .context("failed to create JIT execution engine")?;

    let precedence = PrecedenceTable::shared();
    let mut root = Driver::new(&config.entry, &mut backend, precedence, reporter.clone())
        .with_context(|| format!("failed to open {}", config.entry.display()))?;
    root.go();

    // `spec.md` §6: exit 0 on reaching EOF, even if the session reported
    // recoverable parse/codegen diagnostics along the way (§7: "the session
    // continues"). Only file-open and JIT-creation failures are fatal.
    Ok(())
}

fn init_logging(log_filter: Option<&str>) {
    let filter = log_filter
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
