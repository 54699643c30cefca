//! Byte-at-a-time cursor over a seekable file (`spec.md` §4.1: "Reads bytes
//! from a seekable file handle").

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Tracks the current byte offset, line and column (both 0-indexed) as bytes
/// are pulled one at a time from the underlying file.
pub struct Cursor {
    reader: BufReader<File>,
    position: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    pub fn open(path: &Path, initial_offset: u64) -> io::Result<Self> {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(initial_offset))?;
        Ok(Self {
            reader: BufReader::new(file),
            position: initial_offset as usize,
            line: 0,
            column: 0,
        })
    }

    /// Reads the next byte, or `None` at end of file. Advancing the reader
    /// always increments the offset and column; when the byte read is `\n`
    /// the line advances and the column resets to 0.
    pub fn next_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                self.position += 1;
                self.column += 1;
                if buf[0] == b'\n' {
                    self.line += 1;
                    self.column = 0;
                }
                Some(buf[0])
            }
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}
