//! The [`LineRange`] type, a half-open range of 0-indexed line numbers.

use std::fmt::Display;
use std::ops::Range;
use std::str::FromStr;

use miette::Diagnostic;
use miette::SourceSpan;

use crate::lines::Lines;

/// A half-open range `[start, end)` of 0-indexed line numbers.
///
/// `start <= end` always holds; an empty range (`start == end`) removes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Lines 1820 through 1918 (1-indexed).
    pub const DEFAULT: Self = Self {
        start: 1819,
        end: 1918,
    };

    /// Construct a new range, or `None` if `start > end`.
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The first line removed.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last line removed.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The number of lines in the range, ignoring the length of any particular file.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Is the range empty?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both bounds to `len`, the way slicing past the end of a list yields an empty slice.
    pub fn clamp(&self, len: usize) -> Range<usize> {
        self.start.min(len)..self.end.min(len)
    }

    /// Remove the lines in this range, returning the remaining lines in order.
    ///
    /// Bounds past the end of `lines` are clamped, so a range extending beyond the file removes
    /// every line from `start` onward.
    pub fn remove_from(&self, mut lines: Lines) -> Lines {
        let range = self.clamp(lines.len());
        lines.drain(range);
        lines
    }
}

impl Default for LineRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An error parsing a [`LineRange`] from a string like `1819..1918`.
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ParseLineRangeError {
    /// There's no `..` separator.
    #[diagnostic(help("Ranges are written `START..END`, like `1819..1918`"))]
    MissingSeparator,
    /// A bound isn't a non-negative integer.
    #[diagnostic(help("Line numbers are 0-indexed non-negative integers"))]
    InvalidBound {
        /// The location of the bad bound in the input.
        #[label("Expected a line number")]
        span: SourceSpan,
    },
    /// `start` is after `end`.
    #[diagnostic(help("The end of a range is exclusive and must not come before the start"))]
    Reversed {
        /// The whole input.
        #[label("Start is greater than end")]
        span: SourceSpan,
        /// The start bound.
        start: usize,
        /// The end bound.
        end: usize,
    },
}

impl Display for ParseLineRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseLineRangeError::MissingSeparator => write!(f, "Missing `..` separator"),
            ParseLineRangeError::InvalidBound { .. } => write!(f, "Invalid line number"),
            ParseLineRangeError::Reversed { .. } => write!(f, "Range start is after its end"),
        }
    }
}

impl std::error::Error for ParseLineRangeError {}

impl FromStr for LineRange {
    type Err = ParseLineRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_str, end_str) = s
            .split_once("..")
            .ok_or(ParseLineRangeError::MissingSeparator)?;

        let parse_bound = |bound: &str, offset: usize| {
            bound
                .trim()
                .parse::<usize>()
                .map_err(|_| ParseLineRangeError::InvalidBound {
                    span: (offset, bound.len()).into(),
                })
        };

        let start = parse_bound(start_str, 0)?;
        let end = parse_bound(end_str, start_str.len() + 2)?;

        Self::new(start, end).ok_or(ParseLineRangeError::Reversed {
            span: (0, s.len()).into(),
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn numbered(len: usize) -> Lines {
        (1..=len).map(|n| format!("line {n}\n")).collect()
    }

    #[test]
    fn test_parse() {
        assert_eq!("1819..1918".parse::<LineRange>(), Ok(LineRange::DEFAULT));
        assert_eq!("0..0".parse::<LineRange>(), Ok(LineRange::new(0, 0).unwrap()));
        assert_eq!(" 3 .. 7 ".parse::<LineRange>(), Ok(LineRange::new(3, 7).unwrap()));

        // Negative cases.
        assert_eq!(
            "1819".parse::<LineRange>(),
            Err(ParseLineRangeError::MissingSeparator)
        );
        assert_eq!(
            "1819..puppy".parse::<LineRange>(),
            Err(ParseLineRangeError::InvalidBound {
                span: (6, 5).into()
            })
        );
        assert_eq!(
            "-1..5".parse::<LineRange>(),
            Err(ParseLineRangeError::InvalidBound {
                span: (0, 2).into()
            })
        );
        assert_eq!(
            "10..5".parse::<LineRange>(),
            Err(ParseLineRangeError::Reversed {
                span: (0, 5).into(),
                start: 10,
                end: 5,
            })
        );
    }

    #[test]
    fn test_display_roundtrips() {
        assert_eq!(LineRange::DEFAULT.to_string(), "1819..1918");
        assert_eq!(LineRange::DEFAULT.len(), 99);
    }

    #[test]
    fn test_remove_within_bounds() {
        let lines = numbered(10);
        let range = LineRange::new(2, 5).unwrap();
        let remaining = range.remove_from(lines.clone());

        assert_eq!(remaining.len(), lines.len() - range.len());
        assert_eq!(remaining, [&lines[..2], &lines[5..]].concat());
    }

    #[test]
    fn test_remove_past_end() {
        let lines = numbered(1900);
        let remaining = LineRange::DEFAULT.remove_from(lines.clone());
        assert_eq!(remaining.len(), 1819);
        assert_eq!(remaining, lines[..1819]);
    }

    #[test]
    fn test_remove_start_past_end() {
        let lines = numbered(5);
        assert_eq!(LineRange::DEFAULT.remove_from(lines.clone()), lines);
    }

    #[test]
    fn test_remove_empty_range() {
        let lines = numbered(10);
        let range = LineRange::new(4, 4).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.remove_from(lines.clone()), lines);
    }

    #[test]
    fn test_remove_twice_is_not_idempotent() {
        let lines = numbered(2000);
        let once = LineRange::DEFAULT.remove_from(lines);
        let twice = LineRange::DEFAULT.remove_from(once.clone());
        assert_eq!(once.len(), 1901);
        assert_eq!(twice.len(), 1819);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert_eq!(LineRange::new(5, 4), None);
    }
}
