use crate::details::icmp::v4::Ttl;
use crate::SocketType;
use std::net::Ipv4Addr;
use std::{io, time::Duration};

use super::{DgramSocket, RawSocket};

pub(crate) mod dgram_socket;
pub(crate) mod raw_socket;

/// A connected ICMPv4 endpoint. `recv` yields ICMP bytes only, without any IP header.
pub(crate) trait TSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()>;
    fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, Option<Ttl>)>;
}

pub(crate) enum Socket {
    Raw(RawSocket),
    Dgram(DgramSocket),
}

impl Socket {
    pub(crate) fn connect(socket_type: SocketType, addr: Ipv4Addr) -> Result<Self, io::Error> {
        match socket_type {
            SocketType::Raw => Ok(Socket::Raw(RawSocket::connect(addr)?)),
            SocketType::Dgram => Ok(Socket::Dgram(DgramSocket::connect(addr)?)),
        }
    }
}

impl TSocket for Socket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Socket::Raw(socket) => socket.send(buf),
            Socket::Dgram(socket) => socket.send(buf),
        }
    }

    fn set_read_timeout(&self, timeout: Duration) -> io::Result<()> {
        match self {
            Socket::Raw(socket) => socket.set_read_timeout(timeout),
            Socket::Dgram(socket) => socket.set_read_timeout(timeout),
        }
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, Option<Ttl>)> {
        match self {
            Socket::Raw(socket) => socket.recv(buf),
            Socket::Dgram(socket) => socket.recv(buf),
        }
    }
}
