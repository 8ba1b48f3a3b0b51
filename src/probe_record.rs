use crate::{EchoPacket, SequenceNumber, Ttl};
use std::time::Duration;

/// What happened to one echo request.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeRecord {
    pub sequence_number: SequenceNumber,
    pub outcome: ProbeOutcome,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeOutcome {
    Reply(ReplyData),
    /// Nothing arrived before the read timeout, or the read failed.
    Timeout,
    /// The request could not be written; only reported under `SendFailurePolicy::CountAsLost`.
    SendFailed,
}

/// The first datagram read after a request was sent. Its content is not checked
/// against the request.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplyData {
    pub package_size: usize,
    pub ttl: Option<Ttl>,
    pub elapsed: Duration,
    pub echo: Option<EchoPacket>,
}

impl ProbeOutcome {
    #[must_use]
    pub fn is_reply(&self) -> bool {
        matches!(self, ProbeOutcome::Reply(_))
    }
}
