#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! ICMPv4 echo latency probe.
//!
//! A [`Prober`] resolves one target, opens a single ICMP socket to it and sends
//! a fixed number of echo requests one after the other, waiting for each reply
//! up to a timeout. The outcome of the run is a [`ProbeStatistics`] record which
//! [`ProbeReport`] renders for the console.

pub use details::icmp::v4::{checksum, EchoPacket, SequenceNumber, Ttl};
pub use details::{PingError, PingErrorKind, PingResult};
pub use probe_record::{ProbeOutcome, ProbeRecord, ReplyData};
pub use probe_statistics::ProbeStatistics;
pub use prober::{ProbeState, Prober};
pub use report::{ProbeLine, ProbeReport};
pub use run_config::{RunConfig, SendFailurePolicy, SocketType, DEFAULT_COUNT, DEFAULT_INTERVAL, DEFAULT_TIMEOUT};

mod details;
mod probe_record;
mod probe_statistics;
mod prober;
mod report;
mod run_config;
