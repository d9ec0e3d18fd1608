use core::fmt;

/// A half-open interval `[start, end)` of sequence numbers owned exclusively
/// by one allocation level.
///
/// A meta-sequence granted to a client manager is a `SeqRange`, as is the
/// super-sequence the controller itself draws from. Every number in the
/// interval may be handed out exactly once; the owner advances `start` as it
/// consumes numbers and requests a fresh range once `start` reaches `end`.
///
/// The zeroed range (`start == end == 0`) is the canonical "no range granted
/// yet" sentinel: it is sane but exhausted, so the first allocation against
/// it always triggers a remote refresh.
///
/// # Example
///
/// ```
/// use seqfid::SeqRange;
///
/// let r = SeqRange::new(100, 103);
/// assert!(r.is_sane());
/// assert_eq!(r.space(), 3);
/// assert!(!r.is_exhausted());
/// assert!(SeqRange::zeroed().is_exhausted());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeqRange {
    /// First sequence number in the range (inclusive).
    pub start: u64,
    /// One past the last sequence number in the range (exclusive).
    pub end: u64,
}

impl SeqRange {
    /// Creates a range covering `[start, end)`.
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Returns the zeroed sentinel range: sane, exhausted, owns nothing.
    pub const fn zeroed() -> Self {
        Self { start: 0, end: 0 }
    }

    /// A range is sane iff it does not run backwards.
    pub const fn is_sane(&self) -> bool {
        self.start <= self.end
    }

    /// A range is exhausted iff it has no numbers left to hand out.
    pub const fn is_exhausted(&self) -> bool {
        self.start >= self.end
    }

    /// Number of sequence numbers still available in the range.
    pub const fn space(&self) -> u64 {
        if self.end > self.start {
            self.end - self.start
        } else {
            0
        }
    }
}

impl fmt::Display for SeqRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}-{:#x}]", self.start, self.end)
    }
}
