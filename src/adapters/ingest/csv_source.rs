//! CSV recipient source. Implements RecipientSource with column validation.
//!
//! Accepts `telefone`/`nome` headers (the sheet layout this tool grew up
//! with) or the English `phone`/`name`. Delimiter is sniffed between `;`
//! and `,` since exported Brazilian sheets commonly use semicolons.

use crate::domain::{DomainError, Recipient};
use crate::ports::RecipientSource;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct CsvRecipientSource {
    path: PathBuf,
}

impl CsvRecipientSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl RecipientSource for CsvRecipientSource {
    async fn load(&self) -> Result<Vec<Recipient>, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::Ingest(format!("read {}: {}", self.path.display(), e)))?;
        let recipients = parse_recipients(&raw)?;
        info!(
            path = %self.path.display(),
            count = recipients.len(),
            "recipient list loaded"
        );
        Ok(recipients)
    }
}

/// Pick `;` when the header line carries more of them than `,`.
fn sniff_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

fn column_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.to_lowercase();
        names.iter().any(|n| h == *n)
    })
}

/// Parse and validate the recipient sheet. Rows come back in file order;
/// a row with a missing phone or name fails the whole load (the dispatcher
/// relies on every handed-over row being well-formed).
fn parse_recipients(raw: &str) -> Result<Vec<Recipient>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(raw))
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DomainError::Ingest(format!("header row: {e}")))?
        .clone();
    let phone_idx = column_index(&headers, &["telefone", "phone"]).ok_or_else(|| {
        DomainError::Ingest("file must contain a 'telefone' (or 'phone') column".into())
    })?;
    let name_idx = column_index(&headers, &["nome", "name"]).ok_or_else(|| {
        DomainError::Ingest("file must contain a 'nome' (or 'name') column".into())
    })?;

    let mut recipients = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 2; // 1-based, after the header line
        let record = record.map_err(|e| DomainError::Ingest(format!("row {row}: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let phone = record.get(phone_idx).unwrap_or("");
        let name = record.get(name_idx).unwrap_or("");
        if phone.is_empty() {
            return Err(DomainError::Ingest(format!("row {row}: empty phone")));
        }
        if name.is_empty() {
            return Err(DomainError::Ingest(format!("row {row}: empty name")));
        }
        recipients.push(Recipient {
            phone: phone.to_string(),
            name: name.to_string(),
        });
    }
    Ok(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_sheet() {
        let raw = "telefone,nome\n(11) 99999-0000,Ana\n5521988887777,Bia\n";
        let recipients = parse_recipients(raw).unwrap();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].phone, "(11) 99999-0000");
        assert_eq!(recipients[0].name, "Ana");
        assert_eq!(recipients[1].name, "Bia");
    }

    #[test]
    fn parses_semicolon_separated_sheet() {
        let raw = "telefone;nome\n11 2345-6789;Ana Maria\n";
        let recipients = parse_recipients(raw).unwrap();
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].name, "Ana Maria");
    }

    #[test]
    fn accepts_english_headers_any_case() {
        let raw = "Phone,Name\n123,Ana\n";
        let recipients = parse_recipients(raw).unwrap();
        assert_eq!(recipients[0].phone, "123");
    }

    #[test]
    fn trims_cell_whitespace() {
        let raw = "telefone,nome\n  11 9999 0000 ,  Ana  \n";
        let recipients = parse_recipients(raw).unwrap();
        assert_eq!(recipients[0].phone, "11 9999 0000");
        assert_eq!(recipients[0].name, "Ana");
    }

    #[test]
    fn missing_column_is_an_error() {
        let raw = "telefone,email\n123,a@b.c\n";
        let err = parse_recipients(raw).unwrap_err();
        assert!(err.to_string().contains("nome"));
    }

    #[test]
    fn empty_cell_is_an_error_with_row_number() {
        let raw = "telefone,nome\n123,Ana\n,Bia\n";
        let err = parse_recipients(raw).unwrap_err();
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn skips_blank_trailing_rows_and_keeps_duplicates() {
        let raw = "telefone,nome\n123,Ana\n123,Ana\n,\n";
        let recipients = parse_recipients(raw).unwrap();
        assert_eq!(recipients.len(), 2);
    }
}
