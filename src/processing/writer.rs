use std::io::Write;

use crate::core::TrilaterationResult;
use crate::validation::TrilatResult;

/// Header row of the output table
pub const OUTPUT_HEADER: [&str; 3] = ["name", "long", "lat"];

/// Tab-separated writer for trilateration results
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> ResultWriter<W> {
    /// Wrap `output` and write the header row
    pub fn new(output: W) -> TrilatResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote(b'|')
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(output);

        writer.write_record(OUTPUT_HEADER)?;

        Ok(Self { writer, rows_written: 0 })
    }

    pub fn write_result(&mut self, result: &TrilaterationResult) -> TrilatResult<()> {
        // f64 Display is shortest round-trip; NaN prints as "NaN"
        let lon = result.position.lon.to_string();
        let lat = result.position.lat.to_string();

        self.writer.write_record([result.name.as_str(), lon.as_str(), lat.as_str()])?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn flush(&mut self) -> TrilatResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> TrilatResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}
