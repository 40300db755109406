use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Invalid range: line positions start at 1")]
    StartBeforeFirstLine,
    #[error("Invalid range: end line {end} is before start line {start}")]
    EndBeforeStart { start: usize, end: usize },
    #[error("Invalid range: start line {start} is past the end of a {len}-line document")]
    StartPastEnd { start: usize, len: usize },
}

/// An inclusive span of 1-based line positions to remove.
///
/// A range can only be built with `1 <= start <= end`; whether it fits a
/// particular document is decided later by the [`RangePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcisionRange {
    start: usize,
    end: usize,
}

impl ExcisionRange {
    pub fn new(start: usize, end: usize) -> Result<Self, RangeError> {
        if start < 1 {
            return Err(RangeError::StartBeforeFirstLine);
        }
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Zero-based `(keep_before, resume_at)` cut points clamped to `len`.
    ///
    /// Lines `[0, keep_before)` and `[resume_at, len)` survive. Both cut
    /// points are clamped independently, so a range that starts past the end
    /// keeps everything.
    pub(crate) fn cut_points(&self, len: usize) -> (usize, usize) {
        let keep_before = (self.start - 1).min(len);
        let resume_at = self.end.min(len);
        (keep_before, resume_at)
    }
}

impl fmt::Display for ExcisionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// How out-of-bounds ranges are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Reject a range whose start lies beyond `len + 1`
    #[default]
    Strict,
    /// Clamp both cut points to the document and never fail
    Lenient,
}

impl RangePolicy {
    pub fn check(&self, range: ExcisionRange, len: usize) -> Result<(), RangeError> {
        match self {
            RangePolicy::Strict if range.start() > len + 1 => Err(RangeError::StartPastEnd {
                start: range.start(),
                len,
            }),
            _ => Ok(()),
        }
    }
}
