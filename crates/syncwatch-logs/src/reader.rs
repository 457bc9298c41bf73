//! Bounded tail reads

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;
use syncwatch_core::{
    Error, Result, TAIL_CHUNK_BYTES, TAIL_MAX_LINES, TAIL_MIN_LINES, TAIL_WHOLE_FILE_MAX_BYTES,
};

/// Clamp a requested line count into the supported range
pub fn clamp_lines(requested: usize) -> usize {
    requested.clamp(TAIL_MIN_LINES, TAIL_MAX_LINES)
}

/// How a file of a given size is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailStrategy {
    WholeFile,
    Backward,
}

impl TailStrategy {
    pub fn for_size(size: u64) -> Self {
        if size <= TAIL_WHOLE_FILE_MAX_BYTES {
            TailStrategy::WholeFile
        } else {
            TailStrategy::Backward
        }
    }
}

/// Log reader for tailing a single file
///
/// The reader does no access control; callers validate the path first.
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the last `n` lines (after clamping), joined with `\n`
    pub fn tail(&self, n: usize) -> Result<String> {
        let mut file =
            File::open(&self.path).map_err(|_| Error::Unreadable(self.path.clone()))?;
        let size = file.metadata()?.len();

        tail_from(&mut file, size, n)
    }
}

/// Tail an opened source whose length was measured as `size`
pub(crate) fn tail_from<R: Read + Seek>(source: &mut R, size: u64, n: usize) -> Result<String> {
    let n = clamp_lines(n);

    if size == 0 {
        return Ok(String::new());
    }

    let content = match TailStrategy::for_size(size) {
        TailStrategy::WholeFile => {
            let mut buffer = Vec::with_capacity(size as usize);
            source.read_to_end(&mut buffer)?;
            buffer
        }
        TailStrategy::Backward => read_backward(source, size, n)?,
    };

    Ok(last_lines(&content, n))
}

/// Read chunks from the end until more than `n` line breaks are buffered
/// or the start of the file is reached
fn read_backward<R: Read + Seek>(source: &mut R, size: u64, n: usize) -> Result<Vec<u8>> {
    let mut chunks: Vec<Vec<u8>> = Vec::new();
    let mut position = size;
    let mut newlines = 0usize;

    // n + 1 breaks guarantee the first buffered line is not cut
    while position > 0 && newlines <= n {
        let read_size = std::cmp::min(TAIL_CHUNK_BYTES, position);
        position -= read_size;

        source.seek(SeekFrom::Start(position))?;

        let mut buffer = vec![0u8; read_size as usize];
        source.read_exact(&mut buffer)?;

        newlines += buffer.iter().filter(|&&b| b == b'\n').count();
        chunks.push(buffer);
    }

    Ok(chunks.into_iter().rev().flatten().collect())
}

/// Split on `\n` / `\r\n`, keep the last `n` lines, join with `\n`
///
/// A single trailing line break terminates the last line and does not
/// produce an empty line of its own.
fn last_lines(content: &[u8], n: usize) -> String {
    let text = String::from_utf8_lossy(content);
    let body = text.strip_suffix('\n').unwrap_or(text.as_ref());

    let lines: Vec<&str> = body
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let skip = lines.len().saturating_sub(n);
    lines[skip..].join("\n")
}
