use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
};

use anyhow::{Context, Result};
use fic::Decoder;
use indicatif::ProgressBar;
use tracing::{debug, info};
use zstd_safe::DCtx;

use crate::{
    command::{Capability, human_bytes, with_bar},
    config::Config,
};

/// Restores the data stored in a fic container.
pub struct Decompressor;

impl Capability for Decompressor {
    fn run(&self, config: &Config) -> Result<()> {
        let in_path = config.input.display();
        let out_path = config.output.display();

        let src = File::open(&config.input)
            .with_context(|| format!("Failed to open input file {in_path}"))?;
        // The header is checked before the output file gets created
        let decoder = Decoder::new(BufReader::new(src))
            .with_context(|| format!("Failed to read fic header of {in_path}"))?;
        debug!("Container was compressed with quality {}", decoder.header().quality());

        let mut writer = BufWriter::new(
            File::create(&config.output)
                .with_context(|| format!("Failed to open output file {out_path}"))?,
        );
        let bar = config.verbose.then(|| with_bar(&config.input));
        let written = decompress_into(decoder, &mut writer, bar.as_ref())?;

        info!(
            "{in_path} : {bytes_written} ({out_path})",
            bytes_written = human_bytes(written)
        );

        Ok(())
    }
}

/// Streams the payload of `decoder` into `writer`.
///
/// Returns the number of bytes written.
pub fn decompress_into<R: Read, W: Write>(
    mut decoder: Decoder<'_, R>,
    writer: &mut W,
    bar: Option<&ProgressBar>,
) -> Result<u64> {
    let mut buf = vec![0; DCtx::out_size()];
    let mut buf_pos = 0;
    let mut written = 0;
    let mut read = decoder.read_compressed();

    loop {
        let n = decoder
            .decompress(&mut buf[buf_pos..])
            .context("Failed to decompress data")?;
        if n == 0 {
            break;
        }
        if let Some(b) = bar {
            let consumed = decoder.read_compressed();
            b.inc(consumed - read);
            read = consumed;
        }
        buf_pos += n;
        if buf_pos == buf.len() {
            writer
                .write_all(&buf)
                .context("Failed to write decompressed data")?;
            written += buf_pos as u64;
            buf_pos = 0;
        }
    }
    writer
        .write_all(&buf[..buf_pos])
        .context("Failed to write decompressed data")?;
    writer.flush().context("Failed to write decompressed data")?;
    written += buf_pos as u64;
    if let Some(b) = bar {
        b.finish_and_clear();
    }

    Ok(written)
}
