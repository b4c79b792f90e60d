//! CSV reading and node input parsing.
//!
//! - [`read_csv`] turns one CSV file into header-keyed [`Row`]s
//! - [`groups::parse_groups`] splits the multiline node input into [`crate::models::Group`]s
//!
//! Values are kept as raw strings; typing happens when a row is mapped to outputs.

pub mod groups;

pub use groups::parse_groups;

use std::fs;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::Row;

/// A parsed CSV file.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    /// Column headers, in file order
    pub headers: Vec<String>,
    /// Data rows keyed by header
    pub rows: Vec<Row>,
    /// Encoding the bytes were decoded with
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes with the given encoding label.
///
/// Unknown labels fall back to Windows-1252, which maps every byte.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => encoding_rs::Encoding::for_label(label.as_bytes())
            .unwrap_or(encoding_rs::WINDOWS_1252)
            .decode(bytes)
            .0
            .into_owned(),
    }
}

/// Read a CSV file into header-keyed rows.
///
/// UTF-8 content is used as-is. Otherwise, when `detect` is set, the
/// charset is detected and decoded; when it is not, an [`LoadError::Encoding`]
/// is returned.
pub fn read_csv(path: &Path, detect: bool) -> LoadResult<CsvTable> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let (content, encoding) = match String::from_utf8(bytes) {
        Ok(text) => (text, "utf-8".to_string()),
        Err(err) if detect => {
            let bytes = err.into_bytes();
            let encoding = detect_encoding(&bytes);
            let text = decode_content(&bytes, &encoding);
            log::debug!("Decoded {} as {}", path.display(), encoding);
            (text, encoding)
        }
        Err(_) => {
            return Err(LoadError::Encoding {
                path: path.to_path_buf(),
                encoding: "utf-8".to_string(),
            })
        }
    };

    let mut table = parse_csv_str(&content).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    table.encoding = encoding;
    Ok(table)
}

/// Parse comma-separated CSV text with a header line.
///
/// Blank lines are skipped, short rows are padded with empty values and
/// surplus fields are dropped.
pub fn parse_csv_str(content: &str) -> Result<CsvTable, csv::Error> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.as_str(), record.get(i).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(CsvTable {
        headers,
        rows,
        encoding: "utf-8".to_string(),
    })
}
