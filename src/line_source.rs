use std::io::{self, BufRead};

/// Read chunk used by the buffered input path.
pub const CHUNK_SIZE: usize = 1 << 20;

/// Single-pass supplier of raw lines from a byte stream.
///
/// The returned slice borrows an internal buffer that is reused for every
/// line, so a line must be consumed before the next call.
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource {
            reader,
            buf: Vec::with_capacity(256),
        }
    }

    /// Next line without its `\n` / `\r\n` terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(&self.buf)))
    }
}

#[inline]
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
