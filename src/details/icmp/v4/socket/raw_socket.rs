use super::TSocket;
use crate::details::icmp::v4::Ttl;
use pnet_packet::ipv4::Ipv4Packet;
use socket2::{Domain, Protocol, Type};
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const RECV_BUFFER_SIZE: usize = 256;

/// Raw ICMPv4 socket. Needs root or `CAP_NET_RAW`.
pub(crate) struct RawSocket {
    socket: socket2::Socket,
}

impl RawSocket {
    pub(crate) fn connect(addr: Ipv4Addr) -> Result<Self, io::Error> {
        tracing::trace!("creating RawSocket");
        let socket = socket2::Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))?;
        // Connecting restricts inbound datagrams to those from the target.
        socket.connect(&SocketAddr::new(IpAddr::V4(addr), 0).into())?;
        Ok(RawSocket { socket })
    }
}

impl TSocket for RawSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        self.socket.set_read_timeout(Some(timeout))
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, Option<Ttl>)> {
        let mut recv_buf = [0u8; RECV_BUFFER_SIZE];
        let n = (&self.socket).read(&mut recv_buf)?;

        // On a RAW socket we get the whole IP packet.
        let ipv4_packet = Ipv4Packet::new(&recv_buf[..n])
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "datagram shorter than an IPv4 header"))?;
        let header_length = usize::from(ipv4_packet.get_header_length()) * 4;
        let icmp = recv_buf
            .get(header_length..n)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "IPv4 header length exceeds datagram"))?;

        // Return only the ICMP content
        let len = icmp.len().min(buf.len());
        buf[..len].copy_from_slice(&icmp[..len]);
        Ok((len, Some(ipv4_packet.get_ttl().into())))
    }
}
