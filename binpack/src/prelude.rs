#![allow(unused_imports)]

pub use crate::binpack_errors::*;
pub use crate::config::*;
pub use crate::constants::*;
pub use crate::core::byte_source::*;
pub use crate::core::crc16::*;
pub use crate::core::packet::*;
pub use crate::packetizer::*;
pub use crate::utils::*;
