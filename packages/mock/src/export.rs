//! Table export.
//!
//! CSV rows follow [`MockRecord::COLUMNS`]; list columns are joined with
//! `;` and timestamps are RFC 3339.

use std::io::Write;

use disaster_feed_mock_models::{MockRecord, RecordBatch};

/// Errors that can occur while writing a batch.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file write/flush).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn csv_row(record: &MockRecord) -> [String; 18] {
    [
        record.id.to_string(),
        record.text.clone(),
        record.clean_text.clone(),
        record.created_at.to_rfc3339(),
        record.username.clone(),
        record.display_name.clone(),
        record.location.clone(),
        record.retweet_count.to_string(),
        record.like_count.to_string(),
        record.reply_count.to_string(),
        record.hashtags.join(";"),
        record.mentions.join(";"),
        record.sentiment.to_string(),
        record.sentiment_score.to_string(),
        record.disaster_impact.to_string(),
        record.disaster_type.to_string(),
        record.lat.to_string(),
        record.lon.to_string(),
    ]
}

/// Writes `batch` as CSV with a header row.
///
/// # Errors
///
/// Returns [`ExportError`] if writing to `writer` fails.
pub fn write_csv<W: Write>(batch: &RecordBatch, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(MockRecord::COLUMNS)?;
    for record in batch {
        csv_writer.write_record(csv_row(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `batch` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or writing fails.
pub fn write_json<W: Write>(batch: &RecordBatch, mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, batch)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use disaster_feed_disaster_models::CategorySelector;
    use disaster_feed_mock_models::TimeWindow;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::MockGenerator;

    fn batch() -> RecordBatch {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let window = TimeWindow::new(start, start + chrono::Duration::hours(6)).unwrap();
        let generator: MockGenerator = MockGenerator::default();
        generator
            .generate_batch(
                &mut StdRng::seed_from_u64(3),
                10,
                CategorySelector::All,
                Some(window),
            )
            .unwrap()
    }

    #[test]
    fn csv_has_header_and_one_row_per_record() {
        let batch = batch();
        let mut out = Vec::new();
        write_csv(&batch, &mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), MockRecord::COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), batch.len());
        for (row, record) in rows.iter().zip(&batch) {
            assert_eq!(&row[0], record.id.to_string());
            assert_eq!(&row[1], record.text);
            assert_eq!(&row[10], record.hashtags.join(";"));
            assert_eq!(&row[15], record.disaster_type.to_string());
        }
    }

    #[test]
    fn empty_batch_writes_header_only() {
        let mut out = Vec::new();
        write_csv(&RecordBatch::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("id,text,clean_text,created_at"));
    }

    #[test]
    fn json_preserves_records() {
        let batch = batch();
        let mut out = Vec::new();
        write_json(&batch, &mut out).unwrap();
        let parsed: RecordBatch = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), batch.len());
        for (a, b) in parsed.iter().zip(&batch) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.text, b.text);
            assert_eq!(a.created_at, b.created_at);
            assert_eq!(a.hashtags, b.hashtags);
            assert_eq!(a.disaster_type, b.disaster_type);
            assert!((a.lat - b.lat).abs() < 1e-9);
        }
    }
}
