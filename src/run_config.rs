use std::time::Duration;

pub const DEFAULT_COUNT: u16 = 5;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SocketType {
    /// Raw IP socket; requires elevated privileges.
    #[default]
    Raw,
    /// Unprivileged ICMP datagram socket.
    Dgram,
}

/// What a failed write of an echo request does to the run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SendFailurePolicy {
    /// End the run with a `PingErrorKind::Send` error.
    #[default]
    Abort,
    /// Record the probe as lost and continue with the next one.
    CountAsLost,
}

/// Immutable description of one probe run.
///
/// The numeric setters treat zero as "use the default", so a `RunConfig` never
/// holds a zero count, timeout or interval.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    target: String,
    count: u16,
    timeout: Duration,
    interval: Duration,
    socket_type: SocketType,
    send_failure_policy: SendFailurePolicy,
}

impl RunConfig {
    pub fn new(target: impl Into<String>) -> Self {
        RunConfig {
            target: target.into(),
            count: DEFAULT_COUNT,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            socket_type: SocketType::default(),
            send_failure_policy: SendFailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: u16) -> Self {
        self.count = if count == 0 { DEFAULT_COUNT } else { count };
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { DEFAULT_TIMEOUT } else { timeout };
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() { DEFAULT_INTERVAL } else { interval };
        self
    }

    #[must_use]
    pub fn with_socket_type(mut self, socket_type: SocketType) -> Self {
        self.socket_type = socket_type;
        self
    }

    #[must_use]
    pub fn with_send_failure_policy(mut self, policy: SendFailurePolicy) -> Self {
        self.send_failure_policy = policy;
        self
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn count(&self) -> u16 {
        self.count
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn socket_type(&self) -> SocketType {
        self.socket_type
    }

    #[must_use]
    pub fn send_failure_policy(&self) -> SendFailurePolicy {
        self.send_failure_policy
    }
}
