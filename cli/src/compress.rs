use std::{
    fs::File,
    io::{BufWriter, Read, Write},
};

use anyhow::{Context, Result};
use fic::{EncodeOptions, Encoder};
use indicatif::ProgressBar;
use tracing::info;
use zstd_safe::CCtx;

use crate::{
    command::{Capability, human_bytes, with_bar},
    config::Config,
};

/// Compresses the input file into a fic container.
pub struct Compressor;

impl Capability for Compressor {
    fn run(&self, config: &Config) -> Result<()> {
        let in_path = config.input.display();
        let out_path = config.output.display();

        // Open the input first, a missing input must not leave an empty output behind
        let mut reader = File::open(&config.input)
            .with_context(|| format!("Failed to open input file {in_path}"))?;
        let writer = File::create(&config.output)
            .with_context(|| format!("Failed to open output file {out_path}"))?;

        let encoder = EncodeOptions::try_new()
            .context("Failed to create compression context")?
            .quality(config.quality)
            .into_encoder(BufWriter::new(writer))
            .context("Failed to set compression parameters")?;
        let bar = config.verbose.then(|| with_bar(&config.input));
        let (read, written) = compress_reader(&mut reader, encoder, bar.as_ref())?;

        info!(
            "{in_path} : {ratio:.2}% ( {bytes_read} => {bytes_written}, {out_path})",
            ratio = 100. / read.max(1) as f64 * written as f64,
            bytes_read = human_bytes(read),
            bytes_written = human_bytes(written),
        );

        Ok(())
    }
}

/// Streams everything from `reader` through `encoder`.
///
/// Returns the number of bytes read and written.
pub fn compress_reader<R: Read, W: Write>(
    reader: &mut R,
    mut encoder: Encoder<'_, W>,
    bar: Option<&ProgressBar>,
) -> Result<(u64, u64)> {
    let mut buf = vec![0; CCtx::in_size()];

    loop {
        let limit = reader.read(&mut buf).context("Failed to read input")?;
        if limit == 0 {
            break;
        }
        if let Some(b) = bar {
            b.inc(limit as u64);
        }

        encoder
            .compress(&buf[..limit])
            .context("Failed to compress data")?;
    }

    let bytes_read = encoder.read_uncompressed();
    let bytes_written = encoder
        .finish()
        .context("Failed to finish compression")?;

    if let Some(b) = bar {
        b.finish_and_clear();
    }
    Ok((bytes_read, bytes_written))
}
