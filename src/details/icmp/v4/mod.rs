mod echo_packet;
pub use echo_packet::{checksum, EchoPacket};
pub(crate) use echo_packet::PACKET_SIZE;
#[cfg(test)]
pub(crate) use echo_packet::ECHO_REPLY;

mod sequence_number;
pub use sequence_number::SequenceNumber;

mod ttl;
pub use ttl::Ttl;

mod socket;
pub(crate) use socket::dgram_socket::DgramSocket;
pub(crate) use socket::raw_socket::RawSocket;
pub(crate) use socket::{Socket, TSocket};

#[cfg(test)]
pub(crate) use socket::tests;
