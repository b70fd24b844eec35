use std::fmt;
use std::io;

use thiserror::Error;

pub mod entity;
pub mod ledger;
pub mod records;
pub mod table;


/// Largest total an entity may carry: ten decimal digits.
pub const MAX_TOTAL: u64 = 9_999_999_999;

#[derive(Debug, Error)]
pub enum SalesError {
    #[error("an unexpected error occurred")]
    ArgumentCountInvalid { count: usize },
    #[error("{kind} definition file does not exist")]
    DefinitionFileMissing { kind: EntityKind },
    #[error("{kind} definition file has an invalid format")]
    DefinitionFileInvalidFormat { kind: EntityKind },
    #[error("{kind} definition file defines code {code} more than once")]
    DuplicateDefinitionCode { kind: EntityKind, code: String },
    #[error("sales file names are not sequential")]
    NonSequentialFileNumbers,
    #[error("{file} has an invalid format")]
    TransactionFileInvalidFormat { file: String },
    #[error("{file} has an invalid branch code")]
    InvalidBranchCode { file: String },
    #[error("{file} has an invalid commodity code")]
    InvalidCommodityCode { file: String },
    // Reported with the generic message; the file only shows up in debug logs.
    #[error("an unexpected error occurred")]
    AmountFormatInvalid { file: String },
    #[error("total amount exceeded 10 digits")]
    TotalAmountOverflow,
    #[error("an unexpected error occurred")]
    UnknownIo(#[from] io::Error),
}

impl SalesError {
    /// Process exit code for this kind of failure. Every kind gets its own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            SalesError::UnknownIo(_) => 1,
            SalesError::ArgumentCountInvalid { .. } => 2,
            SalesError::DefinitionFileMissing { .. } => 3,
            SalesError::DefinitionFileInvalidFormat { .. } => 4,
            SalesError::DuplicateDefinitionCode { .. } => 5,
            SalesError::NonSequentialFileNumbers => 6,
            SalesError::TransactionFileInvalidFormat { .. } => 7,
            SalesError::InvalidBranchCode { .. } => 8,
            SalesError::InvalidCommodityCode { .. } => 9,
            SalesError::AmountFormatInvalid { .. } => 10,
            SalesError::TotalAmountOverflow => 11,
        }
    }
}

/// The two kinds of entity that sales are tallied against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Branch,
    Commodity,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Branch => "branch",
            EntityKind::Commodity => "commodity",
        }
    }

    pub fn definition_file(&self) -> &'static str {
        match self {
            EntityKind::Branch => "branch.lst",
            EntityKind::Commodity => "commodity.lst",
        }
    }

    pub fn summary_file(&self) -> &'static str {
        match self {
            EntityKind::Branch => "branch.out",
            EntityKind::Commodity => "commodity.out",
        }
    }

    pub fn code_format(&self) -> CodeFormat {
        match self {
            EntityKind::Branch => CodeFormat::Digits(3),
            EntityKind::Commodity => CodeFormat::Alphanumeric(8),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-width code shapes, ASCII only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    Digits(usize),
    Alphanumeric(usize),
}

impl CodeFormat {
    pub fn matches(&self, code: &str) -> bool {
        match *self {
            CodeFormat::Digits(len) => code.len() == len && code.bytes().all(|b| b.is_ascii_digit()),
            CodeFormat::Alphanumeric(len) => code.len() == len && code.bytes().all(|b| b.is_ascii_alphanumeric()),
        }
    }
}

/// What a definition file may do with a code it has already seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The later line replaces the earlier name and resets the total.
    #[default]
    LastWriteWins,
    Reject,
}
