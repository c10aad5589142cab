//! Adapters for parsing [`clap`] arguments to various types.

mod error_message;
mod line_range;
mod normal_path;
mod rust_backtrace;

pub use error_message::value_validation_error;
pub use rust_backtrace::RustBacktrace;
