//! Driver configuration (`SPEC_FULL.md` §9.3).
//!
//! `spec.md` §1 scopes CLI argument handling out beyond the single
//! source-file argument, but keeping it in a `Config` struct rather than
//! reading `std::env::args()` ad hoc in `main` keeps the binary testable.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub entry: PathBuf,
    pub log_filter: Option<String>,
}

impl Config {
    /// Parses `args` (typically `std::env::args()`), expecting exactly one
    /// positional argument: the entry `.wtf` source file. The `WTFC_LOG`
    /// filter override is read from the environment, not `args`, since it
    /// governs logging setup rather than program behavior.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "wtfc".to_string());
        let entry = args
            .next()
            .ok_or_else(|| format!("usage: {program} <source-file>"))?;
        if args.next().is_some() {
            return Err(format!("usage: {program} <source-file>"));
        }
        Ok(Self {
            entry: PathBuf::from(entry),
            log_filter: std::env::var("WTFC_LOG").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_single_source_file() {
        let config = Config::from_args(["wtfc".to_string(), "main.wtf".to_string()]).unwrap();
        assert_eq!(config.entry, PathBuf::from("main.wtf"));
    }

    #[test]
    fn log_filter_is_none_without_the_env_var() {
        std::env::remove_var("WTFC_LOG");
        let config = Config::from_args(["wtfc".to_string(), "main.wtf".to_string()]).unwrap();
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn rejects_missing_argument() {
        assert!(Config::from_args(["wtfc".to_string()]).is_err());
    }

    #[test]
    fn rejects_extra_arguments() {
        let args = ["wtfc".to_string(), "a.wtf".to_string(), "b.wtf".to_string()];
        assert!(Config::from_args(args).is_err());
    }
}
