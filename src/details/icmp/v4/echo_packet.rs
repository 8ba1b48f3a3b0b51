use pnet_packet::icmp::echo_reply::EchoReplyPacket;
use pnet_packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet_packet::icmp::{IcmpCode, IcmpType};
use pnet_packet::Packet;

pub(crate) const ECHO_REQUEST: u8 = 8;
pub(crate) const ECHO_REPLY: u8 = 0;

pub(crate) const HEADER_SIZE: usize = 8;
pub(crate) const PAYLOAD_SIZE: usize = 32;
pub(crate) const PACKET_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE;

const PAYLOAD_MARKER: &[u8] = b"ping-probe echo";

/// One ICMPv4 echo message with a fixed 32 byte payload (40 bytes on the wire).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EchoPacket {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub identifier: u16,
    pub sequence_number: u16,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl EchoPacket {
    /// Builds a checksummed echo request carrying the marker payload.
    #[must_use]
    pub fn echo_request(identifier: u16, sequence_number: u16) -> Self {
        let mut payload = [0u8; PAYLOAD_SIZE];
        payload[..PAYLOAD_MARKER.len()].copy_from_slice(PAYLOAD_MARKER);

        let mut packet = EchoPacket {
            icmp_type: ECHO_REQUEST,
            code: 0,
            checksum: 0,
            identifier,
            sequence_number,
            payload,
        };
        packet.checksum = checksum(&packet.to_bytes());
        packet
    }

    /// Serializes through pnet's echo packet setters, which write every field big-endian.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        // 40 bytes always hold the 8 byte header, so `new` cannot fail here
        if let Some(mut packet) = MutableEchoRequestPacket::new(&mut buf) {
            packet.set_icmp_type(IcmpType::new(self.icmp_type));
            packet.set_icmp_code(IcmpCode::new(self.code));
            packet.set_checksum(self.checksum);
            packet.set_identifier(self.identifier);
            packet.set_sequence_number(self.sequence_number);
            packet.set_payload(&self.payload);
        }
        buf
    }

    /// Decodes an echo message. A payload shorter than 32 bytes is zero padded, a longer one truncated.
    #[must_use]
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        let packet = EchoReplyPacket::new(buf)?;
        let mut payload = [0u8; PAYLOAD_SIZE];
        let body = packet.payload();
        let n = body.len().min(PAYLOAD_SIZE);
        payload[..n].copy_from_slice(&body[..n]);

        Some(EchoPacket {
            icmp_type: packet.get_icmp_type().0,
            code: packet.get_icmp_code().0,
            checksum: packet.get_checksum(),
            identifier: packet.get_identifier(),
            sequence_number: packet.get_sequence_number(),
            payload,
        })
    }

    #[must_use]
    pub fn is_echo_reply(&self) -> bool {
        self.icmp_type == ECHO_REPLY && self.code == 0
    }

    /// Re-summing a packet that carries its own checksum must give zero.
    #[must_use]
    pub fn has_valid_checksum(&self) -> bool {
        checksum(&self.to_bytes()) == 0
    }
}

/// Internet checksum (RFC 1071) over an arbitrary buffer.
///
/// The buffer is summed as big-endian 16 bit words; an odd trailing byte is
/// padded with a zero byte. Carries are folded back into the low 16 bits and
/// the one's complement of the result is returned.
#[must_use]
pub fn checksum(buf: &[u8]) -> u16 {
    let mut sum: u64 = 0;
    for word in buf.chunks(2) {
        let hi = u64::from(word[0]) << 8;
        let lo = word.get(1).map_or(0, |b| u64::from(*b));
        sum += hi | lo;
    }
    while sum >> 16 != 0 {
        sum = (sum >> 16) + (sum & 0xffff);
    }
    #[allow(clippy::cast_possible_truncation)]
    let folded = sum as u16;
    !folded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet_packet::icmp::echo_request::EchoRequestPacket;
    use pnet_packet::icmp::{IcmpPacket, IcmpTypes};
    use rand::Rng;

    fn ones_complement_sum(buf: &[u8]) -> u16 {
        !checksum(buf)
    }

    #[test]
    fn checksum_of_rfc1071_example() {
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(0x220d, checksum(&data));
    }

    #[test]
    fn checksum_pads_odd_trailing_byte() {
        assert_eq!(checksum(&[0x12, 0x34, 0x56]), checksum(&[0x12, 0x34, 0x56, 0x00]));
        assert_eq!(!0xab00_u16, checksum(&[0xab]));
    }

    #[test]
    fn checksum_of_empty_buffer() {
        assert_eq!(0xffff, checksum(&[]));
    }

    #[test]
    fn echo_request_layout() {
        let bytes = EchoPacket::echo_request(0x0102, 0x0304).to_bytes();

        assert_eq!(PACKET_SIZE, bytes.len());
        assert_eq!(ECHO_REQUEST, bytes[0]);
        assert_eq!(0, bytes[1]);
        assert_eq!(&[0x01, 0x02], &bytes[4..6]);
        assert_eq!(&[0x03, 0x04], &bytes[6..8]);
        assert_eq!(PAYLOAD_MARKER, &bytes[8..8 + PAYLOAD_MARKER.len()]);
        assert!(bytes[8 + PAYLOAD_MARKER.len()..].iter().all(|b| *b == 0));
    }

    #[test]
    fn echo_request_is_deterministic() {
        assert_eq!(EchoPacket::echo_request(5, 5).to_bytes(), EchoPacket::echo_request(5, 5).to_bytes());
        assert_ne!(EchoPacket::echo_request(5, 5).to_bytes(), EchoPacket::echo_request(4, 4).to_bytes());
    }

    #[test]
    fn echo_request_sums_to_all_ones() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let id: u16 = rng.gen();
            let seq: u16 = rng.gen();
            let packet = EchoPacket::echo_request(id, seq);
            assert_eq!(0xffff, ones_complement_sum(&packet.to_bytes()), "id={id} seq={seq}");
            assert!(packet.has_valid_checksum());
        }
    }

    #[test]
    fn echo_request_agrees_with_pnet() {
        let bytes = EchoPacket::echo_request(3, 3).to_bytes();

        let icmp = IcmpPacket::new(&bytes).unwrap();
        assert_eq!(pnet_packet::icmp::checksum(&icmp), icmp.get_checksum());

        let echo = EchoRequestPacket::new(&bytes).unwrap();
        assert_eq!(IcmpTypes::EchoRequest, echo.get_icmp_type());
        assert_eq!(3, echo.get_identifier());
        assert_eq!(3, echo.get_sequence_number());
        assert_eq!(PAYLOAD_SIZE, echo.payload().len());
    }

    #[test]
    fn from_bytes_reads_back_every_field() {
        let packet = EchoPacket::echo_request(0xbeef, 7);
        assert_eq!(Some(packet), EchoPacket::from_bytes(&packet.to_bytes()));
    }

    #[test]
    fn to_bytes_writes_fields_in_network_order() {
        let packet = EchoPacket {
            icmp_type: 3,
            code: 1,
            checksum: 0xa1b2,
            identifier: 0xc3d4,
            sequence_number: 0xe5f6,
            payload: [0x5a; PAYLOAD_SIZE],
        };
        let bytes = packet.to_bytes();

        assert_eq!(&[3, 1, 0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6], &bytes[..HEADER_SIZE]);
        assert!(bytes[HEADER_SIZE..].iter().all(|b| *b == 0x5a));
    }

    #[test]
    fn from_bytes_reads_fields_in_network_order() {
        let mut bytes = [0u8; PACKET_SIZE];
        bytes[..HEADER_SIZE].copy_from_slice(&[0, 0, 0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc]);
        bytes[PACKET_SIZE - 1] = 0xee;

        let decoded = EchoPacket::from_bytes(&bytes).unwrap();
        assert_eq!(0x1234, decoded.checksum);
        assert_eq!(0x5678, decoded.identifier);
        assert_eq!(0x9abc, decoded.sequence_number);
        assert_eq!(0xee, decoded.payload[PAYLOAD_SIZE - 1]);
    }

    #[test]
    fn from_bytes_rejects_truncated_header() {
        assert_eq!(None, EchoPacket::from_bytes(&[0u8; HEADER_SIZE - 1]));
    }

    #[test]
    fn from_bytes_pads_short_payload() {
        let decoded = EchoPacket::from_bytes(&[0, 0, 0xff, 0xff, 0, 1, 0, 2, 0xaa]).unwrap();
        assert!(decoded.is_echo_reply());
        assert_eq!(1, decoded.identifier);
        assert_eq!(2, decoded.sequence_number);
        assert_eq!(0xaa, decoded.payload[0]);
        assert!(decoded.payload[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn corrupted_packet_fails_checksum() {
        let mut bytes = EchoPacket::echo_request(1, 1).to_bytes();
        bytes[10] ^= 0x01;
        assert!(!EchoPacket::from_bytes(&bytes).unwrap().has_valid_checksum());
    }
}
