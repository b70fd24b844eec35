use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::sales::entity::Entity;
use crate::sales::ledger::Ledger;
use crate::sales::records::{select_sales_files, DirectoryEntry, SalesFile};
use crate::sales::table::EntityTable;
use crate::sales::{DuplicatePolicy, EntityKind, SalesError};

/// One line of a summary file: `code,name,total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub code: String,
    pub name: String,
    pub total: u64,
}

impl From<&Entity> for SummaryRecord {
    fn from(entity: &Entity) -> Self {
        SummaryRecord {
            code: entity.code().clone(),
            name: entity.name().clone(),
            total: entity.total(),
        }
    }
}

impl From<csv::Error> for SalesError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(err) => SalesError::UnknownIo(err),
            kind => SalesError::UnknownIo(io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", kind))),
        }
    }
}

/// Reads a whole text file as lines. The handle is closed before this returns.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SalesError> {
    let mut text = String::new();
    BufReader::new(File::open(path)?).read_to_string(&mut text)?;

    Ok(split_lines(&text))
}

/// Splits on `\r\n`, `\n` or a lone `\r`. A terminator at the very end does not start another line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(&['\r', '\n'][..]) else {
            lines.push(rest.to_string());
            break;
        };

        lines.push(rest[..end].to_string());
        let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + terminator..];
    }

    lines
}

pub fn load_definitions(dir: &Path, kind: EntityKind, duplicates: DuplicatePolicy) -> Result<EntityTable, SalesError> {
    let path = dir.join(kind.definition_file());
    if !path.exists() {
        debug!("missing {} definitions, path={}", kind, path.display());
        return Err(SalesError::DefinitionFileMissing { kind });
    }

    let table = EntityTable::from_lines(kind, read_lines(&path)?, duplicates)?;
    info!("loaded {} {} definitions from {}", table.len(), kind, path.display());

    Ok(table)
}

/// Non-recursive listing of `dir`. Symlinks count as files when they point at one.
pub fn list_directory(dir: &Path) -> Result<Vec<DirectoryEntry>, SalesError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_file = path.is_file();
        entries.push(DirectoryEntry::new(path, is_file));
    }

    Ok(entries)
}

pub fn scan_sales_files(dir: &Path) -> Result<Vec<SalesFile>, SalesError> {
    let files = select_sales_files(list_directory(dir)?)?;
    info!("found {} sales files in {}", files.len(), dir.display());

    Ok(files)
}

/// Applies every file in order, stopping at the first one that fails.
pub fn process_sales_files(files: &[SalesFile], ledger: &mut Ledger) -> Result<(), SalesError> {
    for file in files {
        let lines = read_lines(file.path())?;
        ledger.apply_lines(&file.file_name(), lines)?;
    }

    Ok(())
}

/// Writes `table` to its summary file in `dir`, replacing any previous one.
pub fn export_summary(dir: &Path, table: &EntityTable) -> Result<PathBuf, SalesError> {
    let path = dir.join(table.kind().summary_file());
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)?;

    for entity in table {
        csv_writer.serialize(SummaryRecord::from(entity))?;
    }

    csv_writer.flush()?;
    info!("wrote {} {} totals to {}", table.len(), table.kind(), path.display());

    Ok(path)
}

pub fn read_summary(path: &Path) -> Result<Vec<SummaryRecord>, SalesError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).quoting(false).from_path(path)?;
    let records = csv_reader.deserialize::<SummaryRecord>().collect::<Result<Vec<_>, csv::Error>>()?;

    Ok(records)
}
