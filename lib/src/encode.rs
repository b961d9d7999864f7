use std::io::{self, Write};

use zstd_safe::{CCtx, CParameter, InBuffer, OutBuffer, zstd_sys::ZSTD_EndDirective};

use crate::{DEFAULT_QUALITY, HEADER_SIZE, Header, error::Result, quality_level};

/// Options that configure how data is compressed.
///
/// # Examples
///
/// Supports builder like chaining.
///
/// ```
/// use fic::EncodeOptions;
///
/// let encoder = EncodeOptions::new()
///     .checksum_flag(false)
///     .quality(95)
///     .into_encoder(Vec::<u8>::new())?;
/// # Ok::<(), fic::Error>(())
/// ```
pub struct EncodeOptions<'a> {
    cctx: CCtx<'a>,
    quality: i32,
    checksum_flag: bool,
}

impl Default for EncodeOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EncodeOptions<'a> {
    /// Creates a set of options with default values.
    ///
    /// # Panics
    ///
    /// If allocation of [`CCtx`] fails.
    pub fn new() -> Self {
        Self::with_cctx(CCtx::create())
    }

    /// Tries to create new options with default values.
    ///
    /// Returns `None` if allocation of [`CCtx`] fails.
    pub fn try_new() -> Option<Self> {
        let cctx = CCtx::try_create()?;
        Some(Self::with_cctx(cctx))
    }

    /// Create options with the given compression context.
    pub fn with_cctx(cctx: CCtx<'a>) -> Self {
        Self {
            cctx,
            quality: DEFAULT_QUALITY,
            checksum_flag: true,
        }
    }

    /// Sets the quality. Values outside of `0..=100` are clamped.
    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    /// Whether to write a 32 bit checksum at the end of the payload.
    pub fn checksum_flag(mut self, flag: bool) -> Self {
        self.checksum_flag = flag;
        self
    }

    /// Creates an [`Encoder`] with the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the compression parameters are rejected.
    pub fn into_encoder<W>(self, writer: W) -> Result<Encoder<'a, W>> {
        Encoder::with_opts(writer, self)
    }
}

/// A single-use fic encoder.
///
/// The header is written in front of the first compressed bytes. The payload is only complete
/// after [`Encoder::finish`] was called.
///
/// # Examples
///
/// ```no_run
/// use std::{fs::File, io};
/// use fic::Encoder;
///
/// let mut input = File::open("photo.raw")?;
/// let output = File::create("photo.fic")?;
/// let mut encoder = Encoder::new(output)?;
/// io::copy(&mut input, &mut encoder)?;
/// encoder.finish()?;
/// # Ok::<(), fic::Error>(())
/// ```
pub struct Encoder<'a, W> {
    cctx: CCtx<'a>,
    writer: W,
    header: Option<Header>,
    out_buf: Vec<u8>,
    read: u64,
    written: u64,
}

impl<'a, W> Encoder<'a, W> {
    /// Creates a new `Encoder` with the given [`EncodeOptions`].
    ///
    /// # Errors
    ///
    /// Fails if the compression parameters are rejected.
    pub fn with_opts(writer: W, mut opts: EncodeOptions<'a>) -> Result<Self> {
        opts.cctx
            .set_parameter(CParameter::CompressionLevel(quality_level(opts.quality)))?;
        opts.cctx
            .set_parameter(CParameter::ChecksumFlag(opts.checksum_flag))?;

        Ok(Self {
            cctx: opts.cctx,
            writer,
            header: Some(Header::new(opts.quality)),
            out_buf: vec![0; CCtx::out_size()],
            read: 0,
            written: 0,
        })
    }

    /// The number of uncompressed bytes consumed so far.
    pub fn read_uncompressed(&self) -> u64 {
        self.read
    }

    /// The number of bytes written to the writer so far, header included.
    pub fn written_compressed(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Encoder<'_, W> {
    /// Creates a new `Encoder` with default options.
    ///
    /// # Errors
    ///
    /// Fails if the encoder cannot be created.
    pub fn new(writer: W) -> Result<Self> {
        Self::with_opts(writer, EncodeOptions::new())
    }

    /// Compresses all of `input` and writes the compressed bytes that are ready.
    ///
    /// Returns the number of bytes consumed, which is always `input.len()`.
    ///
    /// # Errors
    ///
    /// If compression or writing fails.
    pub fn compress(&mut self, input: &[u8]) -> Result<usize> {
        self.write_header()?;

        let mut in_buf = InBuffer::around(input);
        while in_buf.pos() < input.len() {
            let mut out_buf = OutBuffer::around(&mut self.out_buf[..]);
            self.cctx.compress_stream2(
                &mut out_buf,
                &mut in_buf,
                ZSTD_EndDirective::ZSTD_e_continue,
            )?;
            let n = out_buf.pos();
            self.writer.write_all(&self.out_buf[..n])?;
            self.written += n as u64;
        }
        self.read += input.len() as u64;

        Ok(input.len())
    }

    /// Ends the payload and flushes the writer.
    ///
    /// Returns the total number of bytes written, header included.
    ///
    /// # Errors
    ///
    /// If the frame epilogue cannot be written.
    pub fn finish(mut self) -> Result<u64> {
        self.write_header()?;

        let mut empty_buf = InBuffer::around(&[]);
        loop {
            let mut out_buf = OutBuffer::around(&mut self.out_buf[..]);
            let data_left = self.cctx.compress_stream2(
                &mut out_buf,
                &mut empty_buf,
                ZSTD_EndDirective::ZSTD_e_end,
            )?;
            let n = out_buf.pos();
            self.writer.write_all(&self.out_buf[..n])?;
            self.written += n as u64;

            if data_left == 0 {
                break;
            }
        }
        self.writer.flush()?;

        Ok(self.written)
    }

    fn write_header(&mut self) -> Result<()> {
        if let Some(header) = self.header.take() {
            self.writer.write_all(&header.to_bytes())?;
            self.written += HEADER_SIZE as u64;
        }

        Ok(())
    }
}

impl<W: Write> Write for Encoder<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.compress(buf).map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
