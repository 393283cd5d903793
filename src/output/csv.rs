use std::io::Write;

use crate::output::{HistorySink, OutputError};
use crate::parsers::browser::HistoryRecord;

const HEADER: [&str; 4] = ["url", "title", "visit_count", "visited_at_utc"];

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// The header is written up front so an empty result is still a valid table.
    pub fn new(writer: W) -> Result<Self, OutputError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }
}

impl<W: Write> HistorySink for CsvSink<W> {
    fn record_history(&mut self, record: &HistoryRecord) -> Result<(), OutputError> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::output::{OutputFormat, write_history};
    use crate::parsers::browser::HistoryRecord;

    #[test]
    fn writes_header_and_rows() {
        let records = vec![HistoryRecord {
            url: "https://a.example".to_string(),
            title: "A, with comma".to_string(),
            visit_count: 2,
            visited_at_utc: None,
        }];
        let mut buf = Vec::new();
        write_history(OutputFormat::Csv, &records, &mut buf).expect("write");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "url,title,visit_count,visited_at_utc");
        assert_eq!(lines[1], "https://a.example,\"A, with comma\",2,");
    }

    #[test]
    fn empty_result_is_header_only() {
        let mut buf = Vec::new();
        write_history(OutputFormat::Csv, &[], &mut buf).expect("write");
        assert_eq!(
            String::from_utf8(buf).expect("utf8"),
            "url,title,visit_count,visited_at_utc\n"
        );
    }
}
