//! Defragmentation driver
//!
//! Reads a dense map from a file (or stdin), runs both compaction policies,
//! and prints one checksum per policy.

use anyhow::Context;
use clap::Parser;
use platter_rs::{BlockDisk, Compactor, DenseMap, ExtentDisk};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "defrag")]
#[command(about = "Defragment a dense-map disk image under both placement policies")]
struct Args {
    /// Path to the dense map file, or `-` for stdin
    input: PathBuf,

    /// Dump the terminal extent layout as JSON to stderr
    #[arg(long)]
    dump_layout: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let raw = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading dense map from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("reading dense map from {}", args.input.display()))?
    };

    let line = raw.lines().next().unwrap_or("");
    let map = DenseMap::parse(line).context("parsing dense map")?;
    info!(
        "decoded {} files over {} blocks",
        map.file_count(),
        map.total_blocks()
    );

    let mut blocks = BlockDisk::from_dense_map(&map);
    blocks.compact();
    println!("{}", blocks.checksum());

    let mut extents = ExtentDisk::from_dense_map(&map);
    extents.compact();
    println!("{}", extents.checksum());

    if args.dump_layout {
        eprintln!("{}", serde_json::to_string_pretty(&extents)?);
    }

    Ok(())
}
