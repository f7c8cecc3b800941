use std::path::Path;

use crate::error::IngestError;

use super::model::{CompanyRow, Dataset};

// ---------------------------------------------------------------------------
// Source format
// ---------------------------------------------------------------------------

/// Text encoding of the delimited source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TextEncoding {
    /// Strict UTF-8; invalid byte sequences are an ingest error.
    #[default]
    #[value(name = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    #[value(name = "latin-1", aliases = ["latin1", "iso-8859-1"])]
    Latin1,
}

impl TextEncoding {
    fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Latin1 => "Latin-1",
        }
    }
}

/// How to read the delimited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
    pub delimiter: u8,
    pub encoding: TextEncoding,
}

impl Default for SourceFormat {
    fn default() -> Self {
        Self {
            delimiter: b';',
            encoding: TextEncoding::Utf8,
        }
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Required columns: canonical name plus the header used by the source files.
const COMPANY: (&str, &str) = ("company", "empresas");
const VALUE: (&str, &str) = ("value", "valor");
const CHANGE_ABS: (&str, &str) = ("change_abs", "change");
const CHANGE_PCT: (&str, &str) = ("change_pct", "change2");

fn column_index(headers: &[String], column: (&'static str, &'static str)) -> Result<usize, IngestError> {
    let (canonical, source) = column;
    headers
        .iter()
        .position(|h| h == canonical || h == source)
        .ok_or_else(|| IngestError::MissingColumn {
            column: canonical,
            found: headers.to_vec(),
        })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a company dataset from a delimited text file.
///
/// Expected layout (header names are matched exactly, extra columns ignored):
///
/// ```text
/// empresas;valor;change;change2
/// NVDA;131.38;4.21;3.31
/// ```
///
/// The canonical names `company;value;change_abs;change_pct` are accepted too.
pub fn ingest(path: &Path, format: &SourceFormat) -> Result<Dataset, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, format.encoding).map_err(|offset| IngestError::Encoding {
        path: path.to_path_buf(),
        encoding: format.encoding.name(),
        offset,
    })?;
    let dataset = parse(&text, format.delimiter)?;
    log::info!("Ingested {} rows from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Decode raw bytes; on failure returns the offset of the first bad byte.
fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<String, usize> {
    let text = match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map_err(|e| e.valid_up_to())?
            .to_string(),
        TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    };
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Parse already-decoded delimited text into a [`Dataset`].
pub fn parse(text: &str, delimiter: u8) -> Result<Dataset, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let company_idx = column_index(&headers, COMPANY)?;
    let value_idx = column_index(&headers, VALUE)?;
    let change_abs_idx = column_index(&headers, CHANGE_ABS)?;
    let change_pct_idx = column_index(&headers, CHANGE_PCT)?;

    let mut rows = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let company = cell(company_idx);
        if company.is_empty() {
            return Err(IngestError::EmptyCompany { row });
        }
        rows.push(CompanyRow::new(
            company,
            parse_number(cell(value_idx), row, VALUE.0)?,
            parse_number(cell(change_abs_idx), row, CHANGE_ABS.0)?,
            parse_number(cell(change_pct_idx), row, CHANGE_PCT.0)?,
        ));
    }

    Ok(Dataset::new(rows))
}

/// Parse a finite numeric cell, tolerating a leading `+` and a trailing `%`.
fn parse_number(s: &str, row: usize, column: &'static str) -> Result<f64, IngestError> {
    let tok = s.trim();
    let tok = tok.strip_suffix('%').unwrap_or(tok).trim_end();
    let tok = tok.strip_prefix('+').unwrap_or(tok);
    tok.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IngestError::Malformed {
            row,
            column,
            value: s.to_string(),
        })
}
