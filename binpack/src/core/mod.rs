pub mod byte_source;
pub mod crc16;
pub mod packet;
