use anyhow::{Context, Result, bail};
use binpack::prelude::*;
use clap::Parser;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Split a binary file into CRC-16 framed link packets")]
struct Args {
    /// File to packetize.
    input: PathBuf,

    /// TOML file with chunk size, destination and output directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Payload bytes per packet (clamped to 1024).
    #[arg(long)]
    chunk_size: Option<u32>,

    /// Destination address written into every packet header.
    #[arg(long, value_parser = parse_address)]
    destination: Option<u8>,

    /// Print a single packet as hex instead of the whole file.
    #[arg(long)]
    index: Option<u32>,

    /// Write every frame to `<dir>/packet_NNNNN.bin`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Decode every produced frame again and check its trailer.
    #[arg(long, default_value_t = false)]
    verify: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = args.resolve_config()?;
    let mut packetizer = Packetizer::new();
    packetizer
        .load(&args.input, config.chunk_size)
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    info!(
        "{}: {} bytes, chunk {} bytes, {} packets",
        args.input.display(),
        packetizer.resource_size_bytes(),
        packetizer.chunk_size(),
        packetizer.packet_count()
    );

    if let Some(index) = args.index {
        let frame = packetizer.get_frame(config.destination_address, index)?;
        println!("packet {index} ({} bytes): {}", frame.len(), bytes_to_hex(&frame));
        return Ok(());
    }

    let start = Instant::now();
    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut frames = 0usize;
    let mut bytes = 0usize;
    let mut mismatches = 0usize;
    for packet in packetizer.packets(config.destination_address) {
        let packet = packet?;
        let frame = packet.to_bytes();

        if args.verify {
            if let Err(e) = Packet::from_bytes(&frame) {
                warn!("packet {} failed verification: {e}", packet.sequence_number);
                mismatches += 1;
            }
        }

        if let Some(dir) = &config.output_dir {
            write_frame(dir, packet.sequence_number, &frame)?;
        }

        frames += 1;
        bytes += frame.len();
    }

    info!("produced {frames} frames ({bytes} bytes on the wire) in {:?}", start.elapsed());
    if mismatches > 0 {
        bail!("{mismatches} frames failed verification");
    }

    Ok(())
}

impl Args {
    /// Config file values, overridden by explicit flags.
    fn resolve_config(&self) -> Result<PackConfig> {
        let mut config = match &self.config {
            Some(path) => PackConfig::load(path)?,
            None => PackConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(destination) = self.destination {
            config.destination_address = destination;
        }
        if let Some(dir) = &self.out_dir {
            config.output_dir = Some(dir.clone());
        }

        Ok(config)
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Accepts decimal (`17`) or hex (`0x11`) addresses.
fn parse_address(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid destination address `{value}`: {e}"))
}

fn write_frame(dir: &Path, sequence: u16, frame: &[u8]) -> Result<()> {
    let filename = dir.join(format!("packet_{sequence:05}.bin"));
    let mut file = File::create(&filename).with_context(|| format!("failed to create {}", filename.display()))?;
    file.write_all(frame)?;
    Ok(())
}
