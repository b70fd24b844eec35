use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::data;
use crate::sales::ledger::Ledger;
use crate::sales::{DuplicatePolicy, EntityKind, SalesError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Tally commodities as well as branches.
    pub commodity: bool,
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub files_processed: usize,
    pub outputs: Vec<PathBuf>,
}

/// Runs the batch for a command line whose only argument is the sales directory.
/// `args` excludes the program name.
pub fn run_args(args: &[String], options: &RunOptions) -> Result<RunReport, SalesError> {
    let [dir] = args else {
        debug!("expected one argument, got {}", args.len());
        return Err(SalesError::ArgumentCountInvalid { count: args.len() });
    };

    run(Path::new(dir), options)
}

/// Runs the whole batch against `dir`.
///
/// Every definition and transaction file is validated and tallied before the first
/// summary is written, so a failing run leaves no new output behind.
pub fn run(dir: &Path, options: &RunOptions) -> Result<RunReport, SalesError> {
    let branches = data::load_definitions(dir, EntityKind::Branch, options.duplicates)?;
    let mut ledger = if options.commodity {
        let commodities = data::load_definitions(dir, EntityKind::Commodity, options.duplicates)?;
        Ledger::with_commodities(branches, commodities)
    } else {
        Ledger::new(branches)
    };

    let files = data::scan_sales_files(dir)?;
    data::process_sales_files(&files, &mut ledger)?;

    let mut outputs = vec![data::export_summary(dir, ledger.branches())?];
    if let Some(commodities) = ledger.commodities() {
        outputs.push(data::export_summary(dir, commodities)?);
    }

    info!("tallied {} sales files into {} summaries", files.len(), outputs.len());

    Ok(RunReport {
        files_processed: files.len(),
        outputs,
    })
}
