//! Chunked file reader feeding the prefilter/matcher pipeline. Reads fixed-size byte chunks, splits on `\n` (safe to do at the
//! byte level: `\n` never appears as a UTF-8 continuation byte), and carries
//! an incomplete trailing line over to the next chunk.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::errors::{MatchError, StreamResult};

/// Streams `(line, 1-based line number)` pairs out of a reader, chunk by
/// chunk. File descriptors are released when the reader is dropped,
/// including on an early `break` out of iteration.
pub(crate) struct ChunkedLineReader<R> {
    reader: R,
    chunk: Vec<u8>,
    carry: Vec<u8>,
    line_number: usize,
    eof: bool,
}

impl ChunkedLineReader<BufReader<File>> {
    pub(crate) fn open(path: impl AsRef<Path>, chunk_size: usize) -> StreamResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), chunk_size))
    }
}

impl<R: Read> ChunkedLineReader<R> {
    pub(crate) fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk: vec![0u8; chunk_size.max(1)],
            carry: Vec::new(),
            line_number: 0,
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<usize> {
        self.reader.read(&mut self.chunk)
    }
}

impl<R: Read> Iterator for ChunkedLineReader<R> {
    type Item = StreamResult<(String, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pos) = self.carry.iter().position(|&b| b == b'\n') {
                let mut line_bytes: Vec<u8> = self.carry.drain(..=pos).collect();
                line_bytes.pop(); // drop the '\n' itself
                self.line_number += 1;
                let line = String::from_utf8_lossy(&line_bytes).into_owned();
                return Some(Ok((line, self.line_number)));
            }
            if self.eof {
                if self.carry.is_empty() {
                    return None;
                }
                self.line_number += 1;
                let line = String::from_utf8_lossy(&self.carry).into_owned();
                self.carry.clear();
                return Some(Ok((line, self.line_number)));
            }
            match self.fill() {
                Ok(0) => self.eof = true,
                Ok(n) => self.carry.extend_from_slice(&self.chunk[..n]),
                Err(e) => return Some(Err(MatchError::Io(e))),
            }
        }
    }
}

/// Wraps a line iterator with a prefilter predicate, yielding only lines
/// that pass while preserving their original line numbers.
pub(crate) struct PrefilteredLines<I, P> {
    inner: I,
    predicate: P,
}

impl<I, P> PrefilteredLines<I, P>
where
    I: Iterator<Item = StreamResult<(String, usize)>>,
    P: FnMut(&str) -> bool,
{
    pub(crate) fn new(inner: I, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

impl<I, P> Iterator for PrefilteredLines<I, P>
where
    I: Iterator<Item = StreamResult<(String, usize)>>,
    P: FnMut(&str) -> bool,
{
    type Item = StreamResult<(String, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match item {
                Ok((line, line_no)) => {
                    if (self.predicate)(&line) {
                        return Some(Ok((line, line_no)));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
