//! # CRC-16/ANSI checksum
//!
//! Bitwise CRC-16 with the reflected polynomial `0xA001` (CRC-16/IBM, the
//! MODBUS variant): register starts at `0xFFFF`, bytes are shifted in
//! least-significant bit first, no final XOR.
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use super::super::constants::{CRC16_INIT, CRC16_POLY};

/// Computes the CRC-16/ANSI of `buffer`. An empty buffer yields `0xFFFF`.
pub fn crc16(buffer: &[u8]) -> u16 {
    let mut crc = CRC16_INIT;

    for &byte in buffer {
        crc ^= byte as u16;
        for _ in 0..8 {
            if crc & 0x0001 != 0 {
                crc = (crc >> 1) ^ CRC16_POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}
