//! Line counts printed after an excision.

use std::fmt::Display;

/// Line counts before and after removing a range of lines from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcisionReport {
    /// The number of lines in the file before removal.
    pub original: usize,
    /// The number of lines left after removal.
    pub new: usize,
}

impl ExcisionReport {
    /// The number of lines actually removed.
    ///
    /// This can be less than the length of the requested range if the range runs past the end of
    /// the file.
    pub fn removed(&self) -> usize {
        self.original - self.new
    }

    /// The `New lines: N` and `Removed: N` lines.
    pub fn result_lines(&self) -> String {
        format!("New lines: {}\nRemoved: {}", self.new, self.removed())
    }
}

impl Display for ExcisionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Original lines: {}\n{}", self.original, self.result_lines())
    }
}
