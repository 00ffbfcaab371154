use crate::error::Result;
use serde::Deserialize;
use std::borrow::Cow;
use std::io::prelude::*;

/// A fixed-width TXT file, read one line at a time.
#[derive(Debug)]
pub struct DataFile<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> DataFile<R> {
    pub fn from_reader(reader: R) -> Self {
        DataFile {
            reader,
            buf: Vec::with_capacity(1536),
        }
    }

    /// Next line without its terminator, or `None` at end of file.
    pub fn next_line(&mut self) -> Result<Option<Cow<'_, str>>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let mut end = self.buf.len();
        while end > 0 && (self.buf[end - 1] == b'\n' || self.buf[end - 1] == b'\r') {
            end -= 1;
        }
        Ok(Some(decode_line(&self.buf[..end])))
    }
}

/// The files are 8-bit; anything that is not valid UTF-8 is taken as Latin-1.
pub fn decode_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// A field as `(position, length)` in characters, position zero-based.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct Span(pub usize, pub usize);

impl Span {
    /// Trimmed contents of the field. Lines that stop short yield whatever is there.
    pub fn extract(self, line: &str) -> &str {
        let Span(p, l) = self;
        let start = byte_offset(line, p);
        let end = byte_offset(line, p.saturating_add(l));
        line[start..end].trim()
    }
}

fn byte_offset(line: &str, column: usize) -> usize {
    if line.is_ascii() {
        column.min(line.len())
    } else {
        line.char_indices()
            .nth(column)
            .map_or(line.len(), |(i, _)| i)
    }
}
