use std::path::{Path, PathBuf};

use log::debug;

use super::SalesError;

pub const SALES_FILE_EXTENSION: &str = ".rcd";
const SALES_FILE_DIGITS: usize = 8;

/// One entry of a directory listing, as handed over by the filesystem layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub is_file: bool,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>, is_file: bool) -> DirectoryEntry {
        DirectoryEntry {
            path: path.into(),
            is_file,
        }
    }
}

/// A transaction file named `NNNNNNNN.rcd`. Orders by its number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SalesFile {
    number: u32,
    path: PathBuf,
}

impl SalesFile {
    pub fn from_entry(entry: &DirectoryEntry) -> Option<SalesFile> {
        if !entry.is_file {
            return None;
        }

        let name = entry.path.file_name()?.to_str()?;
        let number = parse_sales_file_name(name)?;

        Some(SalesFile {
            number,
            path: entry.path.clone(),
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        format!("{:0width$}{}", self.number, SALES_FILE_EXTENSION, width = SALES_FILE_DIGITS)
    }
}

fn parse_sales_file_name(name: &str) -> Option<u32> {
    let stem = name.strip_suffix(SALES_FILE_EXTENSION)?;
    if stem.len() != SALES_FILE_DIGITS || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    stem.parse().ok()
}

/// Picks the transaction files out of a directory listing, sorted by number.
/// The numbers must run without gaps or repeats; an empty selection is fine.
pub fn select_sales_files<I>(entries: I) -> Result<Vec<SalesFile>, SalesError>
where
    I: IntoIterator<Item = DirectoryEntry>,
{
    let mut files: Vec<SalesFile> = entries.into_iter().filter_map(|entry| SalesFile::from_entry(&entry)).collect();
    files.sort();

    for pair in files.windows(2) {
        if pair[1].number != pair[0].number + 1 {
            debug!("sales files out of sequence, previous={}, next={}", pair[0].file_name(), pair[1].file_name());
            return Err(SalesError::NonSequentialFileNumbers);
        }
    }

    Ok(files)
}

/// Contents of one transaction file: branch code, optional commodity code, amount text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRecord {
    pub branch_code: String,
    pub commodity_code: Option<String>,
    pub amount: String,
}

impl SalesRecord {
    /// Expects two lines, or three when commodities are tallied too.
    pub fn from_lines(file_name: &str, lines: Vec<String>, with_commodity: bool) -> Result<SalesRecord, SalesError> {
        match (lines.as_slice(), with_commodity) {
            ([branch_code, amount], false) => Ok(SalesRecord {
                branch_code: branch_code.clone(),
                commodity_code: None,
                amount: amount.clone(),
            }),
            ([branch_code, commodity_code, amount], true) => Ok(SalesRecord {
                branch_code: branch_code.clone(),
                commodity_code: Some(commodity_code.clone()),
                amount: amount.clone(),
            }),
            _ => {
                debug!("unexpected line count, file={}, commodity={}, got={}", file_name, with_commodity, lines.len());
                Err(SalesError::TransactionFileInvalidFormat {
                    file: file_name.to_string(),
                })
            },
        }
    }
}

/// Amounts are plain runs of ASCII digits: no sign, separator or padding.
pub fn parse_amount(file_name: &str, text: &str) -> Result<u64, SalesError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        debug!("amount is not a plain integer, file={}, amount={:?}", file_name, text);
        return Err(SalesError::AmountFormatInvalid {
            file: file_name.to_string(),
        });
    }

    // Too many digits for u64 is far past the ten digit limit anyway.
    text.parse::<u64>().map_err(|_| {
        debug!("amount does not fit, file={}, amount={}", file_name, text);
        SalesError::TotalAmountOverflow
    })
}
