use crate::details::icmp::v4::{SequenceNumber, Socket, TSocket};
use crate::details::probe_loop::ProbeLoop;
use crate::details::resolve::lookup_host_v4;
use crate::details::{PingError, PingErrorKind, PingResult};
use crate::{ProbeRecord, ProbeStatistics, RunConfig};
use std::io;
use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProbeState {
    Idle,
    Resolving,
    Connected(Ipv4Addr),
    Probing(SequenceNumber),
    Reporting,
}

/// Drives one run: resolve the target, open a single ICMP socket, send
/// `count` echo requests one after the other and collect the statistics.
///
/// Resolution and connection failures abort the run before any probe is sent.
pub struct Prober {
    config: RunConfig,
    states: Vec<ProbeState>,
}

impl Prober {
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Prober { config, states: vec![ProbeState::Idle] }
    }

    #[must_use]
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Every state this prober has passed through, oldest first.
    #[must_use]
    pub fn states(&self) -> &[ProbeState] {
        &self.states
    }

    /// Runs all probes, handing each finished probe to `on_probe`.
    pub fn run<F>(&mut self, on_probe: F) -> PingResult<ProbeStatistics>
    where
        F: FnMut(&ProbeRecord),
    {
        let socket_type = self.config.socket_type();
        self.run_with(|addr| Socket::connect(socket_type, addr), std::thread::sleep, on_probe)
    }

    pub(crate) fn run_with<S, C, P, F>(
        &mut self,
        connect: C,
        mut pause: P,
        mut on_probe: F,
    ) -> PingResult<ProbeStatistics>
    where
        S: TSocket,
        C: FnOnce(Ipv4Addr) -> io::Result<S>,
        P: FnMut(Duration),
        F: FnMut(&ProbeRecord),
    {
        if self.config.target().trim().is_empty() {
            return Err(PingError::new(PingErrorKind::Config, "no target given"));
        }

        self.transition(ProbeState::Resolving);
        let addr = lookup_host_v4(self.config.target())?;

        let socket = connect(addr).map_err(|e| connection_error(addr, &e))?;
        self.transition(ProbeState::Connected(addr));

        let mut probe_loop = ProbeLoop::new(socket, &self.config);
        for sequence_number in SequenceNumber::countdown(self.config.count()) {
            self.transition(ProbeState::Probing(sequence_number));
            let record = probe_loop.probe_once(sequence_number)?;
            on_probe(&record);

            // no pause after the final probe
            if u16::from(sequence_number) > 1 {
                pause(self.config.interval());
            }
        }

        self.transition(ProbeState::Reporting);
        Ok(probe_loop.into_statistics())
    }

    fn transition(&mut self, state: ProbeState) {
        tracing::trace!("prober state {:?}", state);
        self.states.push(state);
    }
}

fn connection_error(addr: Ipv4Addr, e: &io::Error) -> PingError {
    let hint = if e.kind() == io::ErrorKind::PermissionDenied {
        " (raw ICMP sockets need root or CAP_NET_RAW)"
    } else {
        ""
    };
    PingError::new(PingErrorKind::Connection, format!("could not open ICMP socket to {addr}: {e}{hint}"))
}
