//! # Output Module
//!
//! Writers for fetched history: a JSON envelope matching the HTTP payload,
//! JSON Lines, or CSV.

pub mod csv;
pub mod jsonl;

use std::io::Write;

use thiserror::Error;

use crate::api::HistoryResponse;
use crate::parsers::browser::HistoryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Csv,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait HistorySink {
    fn record_history(&mut self, record: &HistoryRecord) -> Result<(), OutputError>;
    fn finish(&mut self) -> Result<(), OutputError>;
}

/// Collects every record and writes a single `{results, count}` document.
pub struct JsonEnvelopeSink<W: Write> {
    records: Vec<HistoryRecord>,
    writer: W,
}

impl<W: Write> JsonEnvelopeSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            records: Vec::new(),
            writer,
        }
    }
}

impl<W: Write> HistorySink for JsonEnvelopeSink<W> {
    fn record_history(&mut self, record: &HistoryRecord) -> Result<(), OutputError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        let response = HistoryResponse::from(std::mem::take(&mut self.records));
        serde_json::to_writer_pretty(&mut self.writer, &response)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn build_sink<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
) -> Result<Box<dyn HistorySink + 'a>, OutputError> {
    match format {
        OutputFormat::Json => Ok(Box::new(JsonEnvelopeSink::new(writer))),
        OutputFormat::Jsonl => Ok(Box::new(jsonl::JsonlSink::new(writer))),
        OutputFormat::Csv => Ok(Box::new(csv::CsvSink::new(writer)?)),
    }
}

pub fn write_history<W: Write>(
    format: OutputFormat,
    records: &[HistoryRecord],
    writer: W,
) -> Result<(), OutputError> {
    let mut sink = build_sink(format, writer)?;
    for record in records {
        sink.record_history(record)?;
    }
    sink.finish()
}
