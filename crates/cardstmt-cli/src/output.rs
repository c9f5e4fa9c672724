//! CSV rendering and the append-only ledger of parsed statements.

use std::fs::OpenOptions;
use std::path::Path;

use cardstmt_core::StatementRecord;

/// Ledger column order.
pub const CSV_HEADER: [&str; 8] = [
    "issuer",
    "last4",
    "bill_start",
    "bill_end",
    "payment_due",
    "new_balance",
    "minimum_due",
    "confidence",
];

/// Append one record to the CSV ledger, writing the header only when
/// the file is newly created. Absent fields become empty cells.
pub fn append_csv_row(path: &Path, record: &StatementRecord) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let new_file = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if new_file {
        wtr.write_record(CSV_HEADER)?;
    }
    wtr.write_record(row_cells(record))?;
    wtr.flush()?;

    Ok(())
}

/// Render one record as a standalone CSV document (header plus row).
pub fn csv_document(record: &StatementRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(row_cells(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn row_cells(record: &StatementRecord) -> [String; 8] {
    [
        record.issuer.tag().to_string(),
        record.card_last4.clone().unwrap_or_default(),
        cell(record.billing_period.start),
        cell(record.billing_period.end),
        cell(record.payment_due_date),
        cell(record.new_balance),
        cell(record.minimum_due),
        format!("{:.2}", record.confidence),
    ]
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstmt_core::{BillingPeriod, Issuer, StatementRecord};
    use chrono::NaiveDate;

    fn sample_record() -> StatementRecord {
        StatementRecord {
            issuer: Issuer::OneCard,
            card_last4: Some("1234".to_string()),
            billing_period: BillingPeriod {
                start: NaiveDate::from_ymd_opt(2025, 8, 14),
                end: NaiveDate::from_ymd_opt(2025, 9, 13),
            },
            payment_due_date: NaiveDate::from_ymd_opt(2025, 10, 3),
            minimum_due: Some(5000.0),
            new_balance: Some(25000.0),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_header_written_once_across_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        append_csv_row(&path, &sample_record()).unwrap();
        append_csv_row(&path, &sample_record()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "OneCard,1234,2025-08-14,2025-09-13,2025-10-03,25000,5000,1.00"
        );
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn test_absent_fields_become_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let mut record = StatementRecord::empty(Issuer::Hdfc);
        record.card_last4 = Some("4523".to_string());
        record.confidence = 0.17;
        append_csv_row(&path, &record).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "HDFC,4523,,,,,,0.17");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("results.csv");

        append_csv_row(&path, &sample_record()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_csv_document_is_header_plus_row() {
        let doc = csv_document(&sample_record()).unwrap();
        let lines: Vec<&str> = doc.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert!(lines[1].starts_with("OneCard,1234,"));
    }
}
