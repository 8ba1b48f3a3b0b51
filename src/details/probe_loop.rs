use crate::details::icmp::v4::{EchoPacket, SequenceNumber, TSocket, Ttl, PACKET_SIZE};
use crate::details::{PingError, PingErrorKind, PingResult};
use crate::{ProbeOutcome, ProbeRecord, ProbeStatistics, ReplyData, RunConfig, SendFailurePolicy};
use std::io;
use std::time::{Duration, Instant};

/// Sends echo requests over one connected socket and folds every outcome into
/// the run statistics. The socket is closed when the loop is dropped.
pub(crate) struct ProbeLoop<S> {
    socket: S,
    timeout: Duration,
    send_failure_policy: SendFailurePolicy,
    statistics: ProbeStatistics,
}

impl<S> ProbeLoop<S>
where
    S: TSocket,
{
    pub(crate) fn new(socket: S, config: &RunConfig) -> Self {
        ProbeLoop {
            socket,
            timeout: config.timeout(),
            send_failure_policy: config.send_failure_policy(),
            statistics: ProbeStatistics::default(),
        }
    }

    /// One send-wait-receive round. Only a send failure under `SendFailurePolicy::Abort` is an error.
    pub(crate) fn probe_once(&mut self, sequence_number: SequenceNumber) -> PingResult<ProbeRecord> {
        self.statistics.record_sent();

        // identifier and sequence number carry the same value
        let id = u16::from(sequence_number);
        let request = EchoPacket::echo_request(id, id).to_bytes();

        if let Err(e) = self.socket.send(&request) {
            return match self.send_failure_policy {
                SendFailurePolicy::Abort => Err(PingError::new(
                    PingErrorKind::Send,
                    format!("could not send echo request {sequence_number}: {e}"),
                )),
                SendFailurePolicy::CountAsLost => {
                    tracing::warn!("could not send echo request {}: {}", sequence_number, e);
                    self.statistics.record_lost(self.timeout);
                    Ok(ProbeRecord { sequence_number, outcome: ProbeOutcome::SendFailed })
                }
            };
        }
        tracing::trace!("echo request {} sent", sequence_number);

        let start = Instant::now();
        let outcome = match self.receive() {
            Ok((package_size, ttl, echo)) => {
                let elapsed = start.elapsed();
                tracing::debug!("reply to {} after {:?}", sequence_number, elapsed);
                self.statistics.record_reply(elapsed);
                ProbeOutcome::Reply(ReplyData { package_size, ttl, elapsed, echo })
            }
            Err(e) => {
                tracing::debug!("no reply to {}: {}", sequence_number, e);
                self.statistics.record_lost(self.timeout);
                ProbeOutcome::Timeout
            }
        };
        Ok(ProbeRecord { sequence_number, outcome })
    }

    fn receive(&self) -> io::Result<(usize, Option<Ttl>, Option<EchoPacket>)> {
        self.socket.set_read_timeout(self.timeout)?;
        let mut buf = [0u8; PACKET_SIZE];
        let (package_size, ttl) = self.socket.recv(&mut buf)?;
        Ok((package_size, ttl, EchoPacket::from_bytes(&buf[..package_size])))
    }

    #[cfg(test)]
    pub(crate) fn statistics(&self) -> &ProbeStatistics {
        &self.statistics
    }

    pub(crate) fn into_statistics(self) -> ProbeStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::icmp::v4::tests::{OnReceive, OnSend, SocketMock};
    use crate::details::icmp::v4::ECHO_REPLY;

    fn config() -> RunConfig {
        RunConfig::new("127.0.0.1").with_timeout(Duration::from_millis(200))
    }

    #[test]
    fn probe_once_with_reply() {
        let socket = SocketMock::replying(1);
        let mut probe_loop = ProbeLoop::new(socket.clone(), &config());

        let record = probe_loop.probe_once(SequenceNumber::from(3)).unwrap();

        assert_eq!(SequenceNumber::from(3), record.sequence_number);
        let ProbeOutcome::Reply(reply) = &record.outcome else {
            panic!("expected a reply, got {:?}", record.outcome);
        };
        assert_eq!(PACKET_SIZE, reply.package_size);
        assert_eq!(Some(Ttl(64)), reply.ttl);
        let echo = reply.echo.unwrap();
        assert_eq!(ECHO_REPLY, echo.icmp_type);
        assert_eq!(3, echo.sequence_number);

        let statistics = probe_loop.statistics();
        assert_eq!(1, statistics.sent);
        assert_eq!(0, statistics.lost);
        assert!(statistics.min_time_ms.is_some());
        socket.should_send_number_of_messages(1).should_receive_number_of_messages(1);
        assert_eq!(vec![Duration::from_millis(200)], socket.read_timeouts());
    }

    #[test]
    fn request_uses_sequence_number_as_identifier() {
        let socket = SocketMock::replying(1);
        let mut probe_loop = ProbeLoop::new(socket.clone(), &config());

        probe_loop.probe_once(SequenceNumber::from(0x0102)).unwrap();

        let sent = socket.sent_packets();
        let request = EchoPacket::from_bytes(&sent[0]).unwrap();
        assert_eq!(EchoPacket::echo_request(0x0102, 0x0102), request);
    }

    #[test]
    fn would_block_counts_as_lost() {
        let socket = SocketMock::new(OnSend::ReturnDefault, &[OnReceive::ReturnWouldBlock]);
        let mut probe_loop = ProbeLoop::new(socket.clone(), &config());

        let record = probe_loop.probe_once(SequenceNumber::from(1)).unwrap();

        assert_eq!(ProbeOutcome::Timeout, record.outcome);
        let statistics = probe_loop.statistics();
        assert_eq!(1, statistics.lost);
        assert!((statistics.total_time_ms - 200.0).abs() < 1e-9);
        assert_eq!(None, statistics.max_time_ms);
        socket.should_receive_number_of_messages(0);
    }

    #[test]
    fn read_error_counts_as_lost() {
        let socket = SocketMock::new(OnSend::ReturnDefault, &[OnReceive::ReturnErr]);
        let mut probe_loop = ProbeLoop::new(socket, &config());

        let record = probe_loop.probe_once(SequenceNumber::from(1)).unwrap();

        assert_eq!(ProbeOutcome::Timeout, record.outcome);
        assert_eq!(1, probe_loop.statistics().lost);
    }

    #[test]
    fn when_send_fails_then_probe_aborts() {
        let socket = SocketMock::new(OnSend::ReturnErr, &[OnReceive::ReturnReply]);
        let mut probe_loop = ProbeLoop::new(socket.clone(), &config());

        let result = probe_loop.probe_once(SequenceNumber::from(1));

        assert_eq!(PingErrorKind::Send, result.unwrap_err().kind);
        socket.should_send_number_of_messages(0).should_receive_number_of_messages(0);
    }

    #[test]
    fn when_send_fails_and_tolerated_then_probe_is_lost() {
        let socket = SocketMock::new(OnSend::ReturnErr, &[OnReceive::ReturnReply]);
        let config = config().with_send_failure_policy(SendFailurePolicy::CountAsLost);
        let mut probe_loop = ProbeLoop::new(socket.clone(), &config);

        let record = probe_loop.probe_once(SequenceNumber::from(1)).unwrap();

        assert_eq!(ProbeOutcome::SendFailed, record.outcome);
        assert_eq!(1, probe_loop.statistics().lost);
        assert!(socket.read_timeouts().is_empty());
    }
}
