use std::io::BufRead;

use handoverlay::session::{Frame, TickSource};
use log::{error, warn};

/// Reads one JSON encoded [`Frame`] per line.
///
/// Blank lines and lines that fail to parse are skipped. A read error closes the source.
pub struct JsonLinesSource<R> {
    reader: R,
    line_number: usize,
    line: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            line: String::new(),
        }
    }
}

impl<R: BufRead> TickSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Option<Frame> {
        loop {
            self.line.clear();
            self.line_number += 1;
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    error!("Unable to read line {}: {e}", self.line_number);
                    return None;
                }
            }

            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(frame) => return Some(frame),
                Err(e) => warn!("Skipping line {}: {e}", self.line_number),
            }
        }
    }
}
