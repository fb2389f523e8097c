use std::io::Write;

use anyhow::Result;

use crate::AsciiSink;

/// Writes the character grid as plain rows to any writer (stdout in the app).
pub struct ConsoleSink<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> AsciiSink for ConsoleSink<W> {
    fn emit(&mut self, art: &[Vec<char>]) -> Result<()> {
        for row in art {
            let line: String = row.iter().collect();
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_lines() {
        let mut buf = Vec::new();
        {
            let mut sink = ConsoleSink::new(&mut buf);
            sink.emit(&[vec!['a', 'b'], vec!['c', 'd']]).unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "ab\ncd\n");
    }
}
