use crate::{ProbeOutcome, ProbeRecord, ProbeStatistics};
use std::fmt;
use std::time::Duration;

/// Console line for one finished probe.
pub struct ProbeLine<'a> {
    pub target: &'a str,
    pub record: &'a ProbeRecord,
}

impl fmt::Display for ProbeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seq = self.record.sequence_number;
        match &self.record.outcome {
            ProbeOutcome::Reply(reply) => {
                let ms = crate::probe_statistics::as_millis_f64(reply.elapsed);
                write!(f, "Reply from {}: bytes={} seq={} time={:.2}ms", self.target, reply.package_size, seq, ms)?;
                if let Some(ttl) = reply.ttl {
                    write!(f, " ttl={ttl}")?;
                }
                match reply.echo {
                    Some(echo) if !echo.is_echo_reply() => {
                        write!(f, " (unexpected icmp type={} code={})", echo.icmp_type, echo.code)
                    }
                    Some(echo) if !echo.has_valid_checksum() => write!(f, " (bad checksum)"),
                    Some(_) => Ok(()),
                    None => write!(f, " (undecodable)"),
                }
            }
            ProbeOutcome::Timeout => write!(f, "Request to {} timed out (seq={})", self.target, seq),
            ProbeOutcome::SendFailed => write!(f, "Could not send request to {} (seq={})", self.target, seq),
        }
    }
}

/// Summary block printed after a run. Figures without any reply are shown as `NaN`.
pub struct ProbeReport<'a> {
    pub target: &'a str,
    pub timeout: Duration,
    pub statistics: &'a ProbeStatistics,
}

impl fmt::Display for ProbeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statistics = self.statistics;
        writeln!(f, "--- {} ping statistics ---", self.target)?;
        writeln!(
            f,
            "{} packets sent, {} received, {:.2}% packet loss, total time {:.2}ms",
            statistics.sent,
            statistics.received(),
            statistics.loss_rate_percent(),
            statistics.total_time_ms,
        )?;
        write!(
            f,
            "max {:.2}ms, min {:.2}ms, avg {:.2}ms",
            statistics.max_time_ms.unwrap_or(f64::NAN),
            statistics.min_time_ms.unwrap_or(f64::NAN),
            statistics.average_time_ms(self.timeout),
        )
    }
}
