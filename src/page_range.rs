use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::RangeError;

/// One inclusive page interval, 1-based. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Build an interval from page numbers, with the same checks as [`parse`](Self::parse)
    pub fn new(start: u32, end: u32) -> Result<Self, RangeError> {
        if start == 0 || end == 0 {
            return Err(RangeError::NotANumber(format!("{start}-{end}")));
        }
        if start > end {
            return Err(RangeError::InvalidOrder(format!("{start}-{end}")));
        }
        Ok(PageRange { start, end })
    }

    /// Parse a single token like "5" or "1-3"
    pub fn parse(token: &str) -> Result<Self, RangeError> {
        let caps = token_pattern()
            .captures(token)
            .ok_or_else(|| RangeError::NotANumber(token.to_string()))?;

        let start = parse_page_number(&caps["start"], token)?;
        let end = match caps.name("end") {
            Some(end) => parse_page_number(end.as_str(), token)?,
            None => start,
        };

        if start > end {
            return Err(RangeError::InvalidOrder(token.to_string()));
        }

        Ok(PageRange { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages covered by this interval
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<start>\d+)(?:\s*-\s*(?P<end>\d+))?$").expect("page token pattern is valid")
    })
}

// Pages are positive whole numbers; "0" and overflowing values are rejected
// the same way as non-digits.
fn parse_page_number(digits: &str, token: &str) -> Result<u32, RangeError> {
    match digits.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RangeError::NotANumber(token.to_string())),
    }
}

/// A parsed page range expression.
///
/// Intervals keep the order (and repetitions) the user wrote, since that
/// order decides the page order of the extracted document. No upper bound
/// is checked here; the service validates against the real page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRangeSpec {
    ranges: Vec<PageRange>,
}

impl PageRangeSpec {
    /// Parse a comma-separated expression like "1-3, 5, 7-10".
    ///
    /// Empty tokens from stray commas are skipped.
    pub fn parse(input: &str) -> Result<Self, RangeError> {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(PageRange::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if ranges.is_empty() {
            return Err(RangeError::EmptyInput);
        }

        Ok(PageRangeSpec { ranges })
    }

    pub fn intervals(&self) -> &[PageRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total pages the expression asks for, counting repeats
    pub fn page_count(&self) -> u64 {
        self.ranges.iter().map(PageRange::len).sum()
    }
}

impl fmt::Display for PageRangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

impl FromStr for PageRangeSpec {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageRangeSpec::parse(s)
    }
}
