//! `excise` removes a range of lines from a text file, writing the remaining lines back to the
//! same path.
//!
//! Lines keep their terminators, so everything outside the removed range is written back
//! byte-for-byte. By default the file is replaced atomically by renaming a temporary file over
//! it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod clap;
pub mod cli;
mod cwd;
mod excise;
mod line_range;
mod lines;
mod normal_path;
mod report;
mod tracing;
mod write_mode;

pub use excise::ExciseOpts;
pub use line_range::LineRange;
pub use line_range::ParseLineRangeError;
pub use lines::LineEndings;
pub use lines::Lines;
pub use normal_path::NormalPath;
pub use report::ExcisionReport;
pub use tracing::TracingOpts;
pub use write_mode::WriteMode;
