//! # binpack Constants Module
//!
//! Sizes and parameters of the packet wire format. Everything that a receiver
//! on the other end of the link must agree on lives here.
//!
//! ## Wire Layout
//! ```text
//! [1 byte: destination][2 bytes: sequence LE][2 bytes: total LE][N bytes: payload][2 bytes: crc BE]
//! ```
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

/// Upper bound of a packet payload, dictated by the link's packet buffer.
pub const MAX_CHUNK_SIZE: u32 = 1024;

pub const HEADER_SIZE: usize = 5; // destination + sequence + total
pub const CRC_SIZE: usize = 2;
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + CRC_SIZE;
pub const MAX_PACKET_SIZE: usize = MAX_CHUNK_SIZE as usize + FRAME_OVERHEAD;

/// Sequence and total fields are 16 bits wide on the wire.
pub const MAX_WIRE_PACKETS: u32 = u16::MAX as u32;

pub const CRC16_INIT: u16 = 0xFFFF;
pub const CRC16_POLY: u16 = 0xA001; // 0x8005 bit-reflected

pub const DEFAULT_DESTINATION: u8 = 0x01;
