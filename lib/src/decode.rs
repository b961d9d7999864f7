use std::io::{self, Read};

use zstd_safe::{DCtx, InBuffer, OutBuffer};

use crate::{Error, Header, error::Result};

/// A single-use fic decoder.
///
/// The header is read and checked when the decoder is created.
///
/// # Examples
///
/// ```no_run
/// use std::{fs::File, io};
/// use fic::Decoder;
///
/// let input = File::open("photo.fic")?;
/// let mut output = File::create("photo.raw")?;
/// let mut decoder = Decoder::new(input)?;
/// io::copy(&mut decoder, &mut output)?;
/// # Ok::<(), fic::Error>(())
/// ```
pub struct Decoder<'a, R> {
    dctx: DCtx<'a>,
    reader: R,
    header: Header,
    in_buf: Vec<u8>,
    in_buf_pos: usize,
    in_buf_limit: usize,
    // Whether the last zstd frame was completely decoded and flushed
    frame_done: bool,
    read: u64,
    written: u64,
}

impl<'a, R: Read> Decoder<'a, R> {
    /// Creates a new decoder and reads the container header from `reader`.
    ///
    /// # Errors
    ///
    /// Fails if the decompression context cannot be created or the header is invalid.
    pub fn new(reader: R) -> Result<Self> {
        let dctx =
            DCtx::try_create().ok_or_else(|| Error::zstd_create("decompression context"))?;
        Self::with_dctx(reader, dctx)
    }

    /// Creates a new decoder with the given decompression context.
    ///
    /// # Errors
    ///
    /// Fails if the header cannot be read or is invalid.
    pub fn with_dctx(mut reader: R, dctx: DCtx<'a>) -> Result<Self> {
        let header = Header::read_from(&mut reader)?;

        Ok(Self {
            dctx,
            reader,
            header,
            in_buf: vec![0; DCtx::in_size()],
            in_buf_pos: 0,
            in_buf_limit: 0,
            frame_done: false,
            read: 0,
            written: 0,
        })
    }

    /// Decompresses data into `buf`.
    ///
    /// Returns the number of bytes written into `buf`, zero means the payload has been
    /// completely decompressed.
    ///
    /// # Errors
    ///
    /// If reading or decompression fails, or the payload ends inside a frame.
    pub fn decompress(&mut self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.in_buf_pos == self.in_buf_limit {
                let n = self.reader.read(&mut self.in_buf)?;
                if n == 0 {
                    if !self.frame_done {
                        return Err(Error::truncated_payload());
                    }
                    return Ok(0);
                }
                self.in_buf_pos = 0;
                self.in_buf_limit = n;
                self.read += n as u64;
            }

            let mut in_buffer = InBuffer::around(&self.in_buf[self.in_buf_pos..self.in_buf_limit]);
            let mut out_buffer = OutBuffer::around(&mut buf[..]);
            let hint = self
                .dctx
                .decompress_stream(&mut out_buffer, &mut in_buffer)?;
            self.in_buf_pos += in_buffer.pos();
            self.frame_done = hint == 0;

            let n = out_buffer.pos();
            if n > 0 {
                self.written += n as u64;
                return Ok(n);
            }
        }
    }
}

impl<R> Decoder<'_, R> {
    /// The header of the container.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The number of compressed bytes read so far, header excluded.
    pub fn read_compressed(&self) -> u64 {
        self.read
    }

    /// The number of decompressed bytes produced so far.
    pub fn written_decompressed(&self) -> u64 {
        self.written
    }
}

impl<R: Read> Read for Decoder<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decompress(buf).map_err(io::Error::other)
    }
}
