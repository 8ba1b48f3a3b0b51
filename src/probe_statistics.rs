use std::time::Duration;

/// Running totals of a probe run. Latencies are in milliseconds.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbeStatistics {
    pub sent: u32,
    pub lost: u32,
    /// Sum over all probes; a lost probe contributes the full timeout.
    pub total_time_ms: f64,
    /// `None` until the first reply.
    pub min_time_ms: Option<f64>,
    pub max_time_ms: Option<f64>,
}

impl ProbeStatistics {
    pub(crate) fn record_sent(&mut self) {
        self.sent += 1;
    }

    pub(crate) fn record_reply(&mut self, elapsed: Duration) {
        let ms = as_millis_f64(elapsed);
        self.total_time_ms += ms;
        self.min_time_ms = Some(self.min_time_ms.map_or(ms, |min| min.min(ms)));
        self.max_time_ms = Some(self.max_time_ms.map_or(ms, |max| max.max(ms)));
    }

    pub(crate) fn record_lost(&mut self, timeout: Duration) {
        self.lost += 1;
        self.total_time_ms += as_millis_f64(timeout);
    }

    /// Never underflows, even for a hand-built record with `lost > sent`.
    #[must_use]
    pub fn received(&self) -> u32 {
        self.sent.saturating_sub(self.lost)
    }

    /// Percentage of lost probes; 0 when nothing was sent.
    #[must_use]
    pub fn loss_rate_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        f64::from(self.lost) / f64::from(self.sent) * 100.0
    }

    /// Mean latency of the replies: `(total - lost * timeout) / received`.
    ///
    /// Not finite (`NaN`) when no reply was received.
    #[must_use]
    pub fn average_time_ms(&self, timeout: Duration) -> f64 {
        let replies_total = self.total_time_ms - f64::from(self.lost) * as_millis_f64(timeout);
        replies_total / f64::from(self.received())
    }
}

/// Nanosecond resolution duration as fractional milliseconds.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1e6
}
