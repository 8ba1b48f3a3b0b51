pub use ping_error::{PingError, PingErrorKind, PingResult};

pub(crate) mod icmp;
mod ping_error;
pub(crate) mod probe_loop;
pub(crate) mod resolve;
