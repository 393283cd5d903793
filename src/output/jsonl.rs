use std::io::{BufWriter, Write};

use crate::output::{HistorySink, OutputError};
use crate::parsers::browser::HistoryRecord;

pub struct JsonlSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }
}

impl<W: Write> HistorySink for JsonlSink<W> {
    fn record_history(&mut self, record: &HistoryRecord) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
