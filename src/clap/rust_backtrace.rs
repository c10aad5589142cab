//! The `$RUST_BACKTRACE` setting, parsed with a [`clap::builder::Arg::value_parser`].

use std::fmt::Display;

/// Whether to display backtraces in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RustBacktrace {
    /// Hide backtraces in errors
    #[value(name = "0")]
    Off,
    /// Display backtraces in errors
    #[value(name = "1")]
    On,
    /// Display backtraces with all stack frames in errors
    #[value(name = "full")]
    Full,
}

impl Display for RustBacktrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RustBacktrace::Off => "0",
            RustBacktrace::On => "1",
            RustBacktrace::Full => "full",
        })
    }
}
