//! # binpack Packetizer Module
//!
//! Binds to one resource at a time, derives how many packets it splits into
//! and frames any chunk on demand.
//!
//! ## Key Responsibilities
//! - Clamp the requested chunk size to `MAX_CHUNK_SIZE` and reject zero
//! - Size the resource at load time without reading it into memory
//! - Compute `packet_count = ceil(total_bytes / chunk_size)`
//! - Reopen the resource per request, read one chunk and frame it
//! - Hand back a short final chunk, but refuse short reads anywhere else
//!
//! ## Lifecycle
//! ```text
//! Packetizer::new() -> load(path, chunk) -> packet_count() -> get_packet(da, i)...
//! ```
//!
//! A failed `load` keeps whatever was loaded before, and a failed
//! `get_packet` changes nothing, so a later request for a valid index may
//! still succeed. The resource is not held open between calls: if it changes
//! size after `load`, reads past its new end surface as `ShortRead`.
//!
//! Copyrights © 2025 binpack Contributors. All rights reserved.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::binpack_errors::{LoadError, PacketError};
use crate::constants::{MAX_CHUNK_SIZE, MAX_WIRE_PACKETS};
use crate::core::byte_source::{ByteSource, FileSource};
use crate::core::packet::Packet;
use crate::utils::read_upto;

/// Parameters captured by a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedResource {
    pub path: PathBuf,
    pub chunk_size: u32,
    pub total_bytes: u64,
    pub packet_count: u32,
}

impl LoadedResource {
    /// Payload length of packet `index`; only the last one can be short.
    pub fn payload_len(&self, index: u32) -> u32 {
        if self.packet_count.checked_sub(1) == Some(index) {
            (self.total_bytes - (self.packet_count as u64 - 1) * self.chunk_size as u64) as u32
        } else {
            self.chunk_size
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Packetizer<S = FileSource> {
    source: S,
    resource: Option<LoadedResource>,
}

impl Packetizer<FileSource> {
    /// A packetizer reading from the local filesystem.
    pub fn new() -> Self {
        Self::with_source(FileSource)
    }
}

impl<S: ByteSource> Packetizer<S> {
    pub fn with_source(source: S) -> Self {
        Self { source, resource: None }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Binds the packetizer to `path`, splitting it into chunks of
    /// `requested_chunk_size` bytes (clamped to `MAX_CHUNK_SIZE`).
    pub fn load<P: AsRef<Path>>(&mut self, path: P, requested_chunk_size: u32) -> Result<(), LoadError> {
        let path = path.as_ref();
        if requested_chunk_size == 0 {
            warn!(path = %path.display(), "rejected zero chunk size");
            return Err(LoadError::InvalidChunkSize);
        }

        let chunk_size = requested_chunk_size.min(MAX_CHUNK_SIZE);
        if chunk_size != requested_chunk_size {
            debug!(requested = requested_chunk_size, chunk_size, "chunk size clamped");
        }

        // sizing handle is dropped at the end of this block
        let total_bytes = {
            let mut handle = self.source.open(path).map_err(|e| load_failure(path, e))?;
            self.source.size_of(&mut handle).map_err(|e| load_failure(path, e))?
        };

        let packet_count = match u32::try_from(total_bytes.div_ceil(chunk_size as u64)) {
            Ok(count) => count,
            Err(_) => {
                warn!(path = %path.display(), total_bytes, chunk_size, "resource too large");
                return Err(LoadError::ResourceTooLarge { total_bytes, chunk_size });
            }
        };

        if packet_count > MAX_WIRE_PACKETS {
            warn!(
                path = %path.display(),
                packet_count,
                "packet count exceeds the 16-bit sequence field, packets cannot be framed"
            );
        }

        debug!(path = %path.display(), total_bytes, chunk_size, packet_count, "resource loaded");
        self.resource = Some(LoadedResource {
            path: path.to_path_buf(),
            chunk_size,
            total_bytes,
            packet_count,
        });

        Ok(())
    }

    pub fn resource(&self) -> Option<&LoadedResource> {
        self.resource.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.resource.as_ref().map(|r| r.path.as_path())
    }

    /// Number of packets, `0` when nothing (or an empty resource) is loaded.
    pub fn packet_count(&self) -> u32 {
        self.resource.as_ref().map_or(0, |r| r.packet_count)
    }

    pub fn resource_size_bytes(&self) -> u64 {
        self.resource.as_ref().map_or(0, |r| r.total_bytes)
    }

    pub fn chunk_size(&self) -> u32 {
        self.resource.as_ref().map_or(0, |r| r.chunk_size)
    }

    pub fn is_loaded(&self) -> bool {
        self.packet_count() > 0
    }

    /// Reads chunk `index` and frames it for `destination_address`.
    pub fn get_packet(&self, destination_address: u8, index: u32) -> Result<Packet, PacketError> {
        let resource = match &self.resource {
            Some(r) if r.packet_count > 0 && r.chunk_size > 0 && r.total_bytes > 0 => r,
            _ => {
                warn!(index, "packet requested with no resource loaded");
                return Err(PacketError::NoResourceLoaded);
            }
        };

        if index >= resource.packet_count || resource.packet_count > MAX_WIRE_PACKETS {
            warn!(index, packet_count = resource.packet_count, "packet index out of range");
            return Err(PacketError::IndexOutOfRange {
                index,
                packet_count: resource.packet_count,
            });
        }

        // widened: index * chunk_size overflows u32 for resources above 4 GiB
        let offset = index as u64 * resource.chunk_size as u64;

        let payload = self
            .source
            .open(&resource.path)
            .and_then(|mut handle| read_upto(&mut handle, offset, resource.chunk_size as usize))
            .map_err(|source| {
                warn!(path = %resource.path.display(), index, error = %source, "resource unavailable");
                PacketError::ResourceUnavailable {
                    path: resource.path.clone(),
                    source,
                }
            })?;

        let bytes_read = payload.len() as u32;
        let is_final = index + 1 == resource.packet_count;
        if (bytes_read < resource.chunk_size && !is_final) || bytes_read == 0 {
            let expected = resource.payload_len(index);
            warn!(path = %resource.path.display(), index, expected, bytes_read, "short read");
            return Err(PacketError::ShortRead {
                index,
                expected,
                actual: bytes_read,
            });
        }

        let packet = Packet::new(destination_address, index as u16, resource.packet_count as u16, payload);
        debug!(index, payload = bytes_read, checksum = packet.checksum, "packet framed");

        Ok(packet)
    }

    /// Wire bytes of packet `index`, the frame length being `bytes.len()`.
    pub fn get_frame(&self, destination_address: u8, index: u32) -> Result<Vec<u8>, PacketError> {
        self.get_packet(destination_address, index).map(|packet| packet.to_bytes())
    }

    /// Iterates every packet in order, reading one chunk at a time.
    /// Stops after the first error, so a failing resource yields a single `Err`.
    pub fn packets(&self, destination_address: u8) -> Packets<'_, S> {
        Packets {
            packetizer: self,
            destination_address,
            next: 0,
            failed: false,
        }
    }
}

fn load_failure(path: &Path, source: std::io::Error) -> LoadError {
    warn!(path = %path.display(), error = %source, "failed to load resource");
    LoadError::from_io(path.to_path_buf(), source)
}

pub struct Packets<'a, S> {
    packetizer: &'a Packetizer<S>,
    destination_address: u8,
    next: u32,
    failed: bool,
}

impl<S: ByteSource> Iterator for Packets<'_, S> {
    type Item = Result<Packet, PacketError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next >= self.packetizer.packet_count() {
            return None;
        }

        let result = self.packetizer.get_packet(self.destination_address, self.next);
        self.failed = result.is_err();
        self.next += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.packetizer.packet_count().saturating_sub(self.next) as usize;
        (0, Some(remaining))
    }
}
