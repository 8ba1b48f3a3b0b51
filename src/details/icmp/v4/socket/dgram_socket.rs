use super::TSocket;
use crate::details::icmp::v4::Ttl;
use socket2::{Domain, Protocol, Type};
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Unprivileged ICMP "ping socket" (Linux, see `net.ipv4.ping_group_range`).
///
/// The kernel strips the IP header and may rewrite the echo identifier. No TTL is reported.
pub(crate) struct DgramSocket {
    socket: socket2::Socket,
}

impl DgramSocket {
    pub(crate) fn connect(addr: Ipv4Addr) -> Result<Self, io::Error> {
        tracing::trace!("creating DgramSocket");
        let socket = socket2::Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::ICMPV4))?;
        socket.connect(&SocketAddr::new(IpAddr::V4(addr), 0).into())?;
        Ok(DgramSocket { socket })
    }
}

impl TSocket for DgramSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        self.socket.set_read_timeout(Some(timeout))
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, Option<Ttl>)> {
        let n = (&self.socket).read(buf)?;
        Ok((n, None))
    }
}
