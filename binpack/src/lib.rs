//! # Binary File Packetizer (binpack)
//!
//! Splits an arbitrary binary file into fixed-size chunks and frames each chunk
//! as a self-describing transport packet for a simple point-to-point link
//! (serial line, radio modem, ...).
//!
//! Every packet carries
//!     1. a one byte destination tag chosen by the caller.
//!     2. its own sequence number and the total packet count, so a receiver can
//!         order packets and spot the last one without touching the payload.
//!     3. a CRC-16/ANSI trailer over everything that precedes it.
//!
//! Packets are produced on demand and in any order: the file is only sized at
//! load time and then reopened for each chunk, so arbitrarily large files never
//! sit in memory.
//!
//! ```rust,no_run
//! use binpack::prelude::*;
//!
//! let mut packetizer = Packetizer::new();
//! packetizer.load("firmware.bin", 1024)?;
//! for packet in packetizer.packets(0x01) {
//!     let frame = packet?.to_bytes();
//!     // hand `frame` to the link layer
//! #   let _ = frame;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Copyrights © 2025 binpack Contributors

pub mod binpack_errors;
pub mod config;
pub mod constants;
pub mod core;
pub mod packetizer;
pub mod prelude;
pub mod utils;
