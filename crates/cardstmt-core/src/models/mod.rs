pub mod config;
pub mod statement;

pub use config::{CardstmtConfig, OcrConfig, OutputConfig, PdfConfig};
pub use statement::{BillingPeriod, Issuer, StatementRecord, TextSource};
