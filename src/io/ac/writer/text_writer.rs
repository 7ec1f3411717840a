//! Line-oriented AC3D text output

use crate::error::{AcError, Result};
use crate::scene::SurfaceFlags;
use std::io::Write;

/// Writes `.ac` lines and formats the values that go on them.
pub struct AcTextWriter<W: Write> {
    writer: W,
}

impl<W: Write> AcTextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a keyword followed by already formatted fields
    pub fn write_line(&mut self, keyword: &str, fields: &[String]) -> Result<()> {
        self.writer.write_all(keyword.as_bytes())?;
        for field in fields {
            write!(self.writer, " {}", field)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// `keyword "text"`
    pub fn write_string(&mut self, keyword: &str, value: &str) -> Result<()> {
        self.write_line(keyword, &[quote(value)])
    }

    /// `keyword n`
    pub fn write_count(&mut self, keyword: &str, count: usize) -> Result<()> {
        self.write_line(keyword, &[count.to_string()])
    }

    /// `keyword v0 v1 ...`
    pub fn write_numbers(&mut self, keyword: &str, values: &[f64]) -> Result<()> {
        let fields = values
            .iter()
            .map(|v| format_number(*v))
            .collect::<Result<Vec<_>>>()?;
        self.write_line(keyword, &fields)
    }

    /// A line of bare numbers (vertex line)
    pub fn write_values(&mut self, values: &[f64]) -> Result<()> {
        let fields = values
            .iter()
            .map(|v| format_number(*v))
            .collect::<Result<Vec<_>>>()?;
        writeln!(self.writer, "{}", fields.join(" "))?;
        Ok(())
    }

    /// Line written exactly as given
    pub fn write_raw_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }

    /// `data <len>` followed by the block and a line break
    pub fn write_data(&mut self, text: &str) -> Result<()> {
        self.write_count("data", text.len())?;
        self.writer.write_all(text.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Shortest text that reads back to the same `f64`
pub fn format_number(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(AcError::InvalidValue(format!(
            "cannot write non-finite number {}",
            value
        )));
    }
    Ok(format!("{}", value))
}

/// Double-quoted string; embedded quotes cannot be escaped and are dropped,
/// line breaks become spaces.
pub fn quote(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '"')
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("\"{}\"", cleaned)
}

/// SURF flags as `0x` and at least two hex digits
pub fn format_flags(flags: SurfaceFlags) -> String {
    format!("0x{:02x}", flags.bits())
}
