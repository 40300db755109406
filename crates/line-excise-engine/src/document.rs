use crate::range::{ExcisionRange, RangeError, RangePolicy};

/// A file's content as an ordered list of lines.
///
/// Each line keeps its own terminator bytes (`\n`, `\r\n`, or nothing for an
/// unterminated final line), so concatenating the lines reproduces the input
/// exactly. Content is kept as raw bytes; the document never needs to know the
/// encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Vec<u8>>,
}

impl Document {
    /// Split `bytes` after every `\n`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let lines = bytes
            .split_inclusive(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.concat()
    }

    /// Build the document that remains once `range` is removed.
    ///
    /// The prefix `[1, start - 1]` and the suffix `[end + 1, len]` are kept
    /// in order and untouched. An `end` past the last line empties the suffix.
    /// `policy` decides whether a `start` past the end is an error or a no-op.
    pub fn excise(&self, range: ExcisionRange, policy: RangePolicy) -> Result<Self, RangeError> {
        policy.check(range, self.len())?;

        let (keep_before, resume_at) = range.cut_points(self.len());
        log::debug!(
            "excising {range} from {} lines: keeping [0, {keep_before}) and [{resume_at}, {})",
            self.len(),
            self.len()
        );

        let lines = self.lines[..keep_before]
            .iter()
            .chain(&self.lines[resume_at..])
            .cloned()
            .collect();
        Ok(Self { lines })
    }
}
