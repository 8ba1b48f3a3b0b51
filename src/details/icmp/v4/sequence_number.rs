type SequenceNumberInnerType = u16;

/// Echo identifier and sequence number of one probe; both fields carry the same value.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct SequenceNumber(SequenceNumberInnerType);

impl SequenceNumber {
    /// Sequence numbers for a run of `count` probes: `count`, `count - 1`, ..., 1.
    pub(crate) fn countdown(count: SequenceNumberInnerType) -> impl Iterator<Item = SequenceNumber> {
        (1..=count).rev().map(SequenceNumber)
    }
}

impl From<SequenceNumber> for SequenceNumberInnerType {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

impl From<SequenceNumberInnerType> for SequenceNumber {
    fn from(value: SequenceNumberInnerType) -> Self {
        SequenceNumber(value)
    }
}

impl std::fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
