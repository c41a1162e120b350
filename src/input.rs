use std::io;
use std::path::Path;
use thiserror::Error;

/// One spreadsheet row; only the address cell matters here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub address: Option<String>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file has no [{column}] column, headers found: {headers:?}")]
    MissingAddressColumn { column: String, headers: Vec<String> },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// read address rows from a CSV spreadsheet
pub fn read_addresses_from_path(path: impl AsRef<Path>, column: &str) -> Result<Vec<AddressRecord>, InputError> {
    let rdr = csv::Reader::from_path(path)?;
    read_addresses(rdr, column)
}

/// The address column is located by a case-insensitive header match; a
/// missing column is a schema error up front, not an obscure failure later.
/// Blank cells come back as `None` and contribute nothing downstream.
pub fn read_addresses<R: io::Read>(mut rdr: csv::Reader<R>, column: &str) -> Result<Vec<AddressRecord>, InputError> {
    let headers = rdr.headers()?.clone();
    let idx = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| InputError::MissingAddressColumn {
            column: column.to_string(),
            headers: headers.iter().map(String::from).collect(),
        })?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let address = record
            .get(idx)
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(String::from);
        rows.push(AddressRecord { address });
    }
    Ok(rows)
}
