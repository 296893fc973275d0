// line_source/mod.rs

//! The interface for reading sensor output one line at a time.

#[cfg(test)]
pub(crate) mod mock;
pub mod serial;

use std::io::{self, BufRead, BufReader, Read};

use log::trace;

/// The longest line kept, including its terminator. Longer lines are dropped.
pub const MAX_LINE_LEN: usize = 4096;

/// A line source can be any type that can be used as an `Iterator` of lines.
///
/// Sources yield lines in the order they were received. When the underlying connection is lost,
/// a source yields a single `Err` and then ends. There is no reconnection.
pub trait LineSource: Iterator<Item = io::Result<String>> {}

/// A [`LineSource`] over any byte stream, such as a serial port.
///
/// Lines are terminated by `\n`, with an optional `\r` before it. Invalid UTF-8 is replaced
/// rather than rejected. Reads that time out or are interrupted are retried, and any partial
/// line read so far is kept until its terminator arrives. Lines longer than [`MAX_LINE_LEN`] are
/// dropped whole.
///
/// Reaching the end of the stream counts as losing the connection, as does any other read
/// error.
pub struct Lines<R> {
    reader: BufReader<R>,
    line_buf: Vec<u8>,
    overlong: bool,
    finished: bool,
}

impl<R: Read> Lines<R> {
    /// Read lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_buf: Vec::new(),
            overlong: false,
            finished: false,
        }
    }

    fn take_line(&mut self) -> String {
        self.line_buf.pop();
        if self.line_buf.last() == Some(&b'\r') {
            self.line_buf.pop();
        }
        let line = String::from_utf8_lossy(&self.line_buf).into_owned();
        self.line_buf.clear();
        line
    }

    fn discard_overlong(&mut self) {
        trace!(
            "Discarding {} bytes of overlong line",
            self.line_buf.len()
        );
        self.line_buf.clear();
        self.overlong = true;
    }

    fn finish(&mut self, error: io::Error) -> io::Error {
        self.finished = true;
        if !self.line_buf.is_empty() {
            trace!(
                "Discarding {} bytes of unterminated line",
                self.line_buf.len()
            );
            self.line_buf.clear();
        }
        error
    }
}

impl<R: Read> LineSource for Lines<R> {}

impl<R: Read> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            // `line_buf` never reaches `MAX_LINE_LEN` here, so the limit is at least 1.
            let limit = (MAX_LINE_LEN - self.line_buf.len()) as u64;
            match (&mut self.reader).take(limit).read_until(b'\n', &mut self.line_buf) {
                Ok(0) => {
                    let error = io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream");
                    return Some(Err(self.finish(error)));
                }
                Ok(_) => {
                    if self.line_buf.ends_with(b"\n") {
                        if self.overlong {
                            trace!("Discarding tail of overlong line");
                            self.line_buf.clear();
                            self.overlong = false;
                            continue;
                        }
                        return Some(Ok(self.take_line()));
                    }
                    if self.line_buf.len() >= MAX_LINE_LEN {
                        self.discard_overlong();
                    }
                }
                Err(error)
                    if error.kind() == io::ErrorKind::TimedOut
                        || error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Some(Err(self.finish(error))),
            }
        }
    }
}
