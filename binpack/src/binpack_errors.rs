//! # binpack Error Definitions Module
//!
//! Structured errors returned by the packetizer and the frame decoder. Each
//! operation family gets its own enum so callers can match on exactly the
//! failures that operation can produce:
//!
//! - [`LoadError`]: binding a packetizer to a resource
//! - [`PacketError`]: producing a framed packet from the loaded resource
//! - [`FrameError`]: parsing and verifying a received frame
//!
//! None of these are retried internally. A vanished or truncated resource is
//! not assumed to be transient, so retrying is left to the caller.
//!
//! ## Example
//! ```rust
//! use binpack::prelude::*;
//!
//! let packetizer = Packetizer::new();
//! match packetizer.get_packet(0x01, 0) {
//!     Err(PacketError::NoResourceLoaded) => {}
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("chunk size must be at least 1 byte")]
    InvalidChunkSize,

    #[error("resource not found: {}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("resource unreadable: {}", path.display())]
    ResourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("resource of {total_bytes} bytes needs more than {} packets of {chunk_size} bytes", u32::MAX)]
    ResourceTooLarge { total_bytes: u64, chunk_size: u32 },
}

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("no resource loaded")]
    NoResourceLoaded,

    #[error("packet index {index} out of range (packet count {packet_count})")]
    IndexOutOfRange { index: u32, packet_count: u32 },

    #[error("short read for packet {index}: expected {expected} bytes, got {actual}")]
    ShortRead { index: u32, expected: u32, actual: u32 },

    #[error("resource unavailable: {}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame of {0} bytes is shorter than header and trailer")]
    TooShort(usize),

    #[error("payload of {0} bytes exceeds the maximum chunk size")]
    PayloadTooLarge(usize),

    #[error("checksum mismatch: frame carries {received:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { received: u16, computed: u16 },

    #[error("sequence number {sequence} not below total packets {total}")]
    SequenceOutOfRange { sequence: u16, total: u16 },
}

impl LoadError {
    /// Classifies an open/size failure by its I/O kind.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => LoadError::ResourceNotFound { path, source },
            _ => LoadError::ResourceUnreadable { path, source },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn not_found_is_classified() {
        let err = LoadError::from_io(PathBuf::from("gone.bin"), io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, LoadError::ResourceNotFound { .. }));

        let err = LoadError::from_io(PathBuf::from("locked.bin"), io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, LoadError::ResourceUnreadable { .. }));
    }

    #[test]
    fn messages_carry_context() {
        let err = PacketError::ShortRead { index: 3, expected: 1024, actual: 10 };
        assert_eq!(err.to_string(), "short read for packet 3: expected 1024 bytes, got 10");

        let err = FrameError::ChecksumMismatch { received: 0x1234, computed: 0xabcd };
        assert_eq!(err.to_string(), "checksum mismatch: frame carries 0x1234, computed 0xabcd");
    }
}
