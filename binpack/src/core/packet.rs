//! # binpack Packet Module
//!
//! The single packet shape sent over the link: a five byte header, the chunk
//! payload and a CRC-16 trailer.
//!
//! ## Byte Layout
//! ```text
//! [1 byte: destination address]
//! [2 bytes: sequence number, little-endian]
//! [2 bytes: total packets, little-endian]
//! [N bytes: payload, N <= MAX_CHUNK_SIZE]
//! [2 bytes: CRC-16/ANSI over the preceding 5 + N bytes, big-endian]
//! ```
//!
//! The header lets a receiver order packets and recognise the final one
//! (`sequence_number == total_packets - 1`) without parsing the payload. The
//! trailer is written high byte first even though the CRC itself is the
//! bit-reflected variant; that pairing is fixed by the wire contract.
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use super::super::binpack_errors::FrameError;
use super::super::constants::{CRC_SIZE, FRAME_OVERHEAD, HEADER_SIZE, MAX_CHUNK_SIZE};
use super::crc16::crc16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub destination_address: u8,
    pub sequence_number: u16,
    pub total_packets: u16,
    pub payload: Vec<u8>,
    pub checksum: u16,
}

impl Packet {
    /// Builds a packet and computes its checksum.
    pub fn new(destination_address: u8, sequence_number: u16, total_packets: u16, payload: Vec<u8>) -> Self {
        let checksum = crc16(&encode_body(destination_address, sequence_number, total_packets, &payload));
        Self {
            destination_address,
            sequence_number,
            total_packets,
            payload,
            checksum,
        }
    }

    /// Total length on the wire: header, payload and trailer.
    pub fn frame_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    pub fn is_final(&self) -> bool {
        self.sequence_number as u32 + 1 == self.total_packets as u32
    }

    /// Serialize to prepare for transmission.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut encoded = encode_body(self.destination_address, self.sequence_number, self.total_packets, &self.payload);
        encoded.extend_from_slice(&self.checksum.to_be_bytes());
        encoded
    }

    /// Parses a received frame and verifies its trailer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() < FRAME_OVERHEAD {
            return Err(FrameError::TooShort(data.len()));
        }

        let payload_len = data.len() - FRAME_OVERHEAD;
        if payload_len > MAX_CHUNK_SIZE as usize {
            return Err(FrameError::PayloadTooLarge(payload_len));
        }

        let (body, trailer) = data.split_at(data.len() - CRC_SIZE);
        let received = u16::from_be_bytes([trailer[0], trailer[1]]);
        let computed = crc16(body);
        if received != computed {
            return Err(FrameError::ChecksumMismatch { received, computed });
        }

        let sequence_number = u16::from_le_bytes([body[1], body[2]]);
        let total_packets = u16::from_le_bytes([body[3], body[4]]);
        if sequence_number >= total_packets {
            return Err(FrameError::SequenceOutOfRange {
                sequence: sequence_number,
                total: total_packets,
            });
        }

        Ok(Self {
            destination_address: body[0],
            sequence_number,
            total_packets,
            payload: body[HEADER_SIZE..].to_vec(),
            checksum: received,
        })
    }
}

fn encode_body(destination_address: u8, sequence_number: u16, total_packets: u16, payload: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(FRAME_OVERHEAD + payload.len());

    encoded.push(destination_address);
    encoded.extend_from_slice(&sequence_number.to_le_bytes());
    encoded.extend_from_slice(&total_packets.to_le_bytes());
    encoded.extend_from_slice(payload);

    encoded
}
