use log::debug;

use super::records::{parse_amount, SalesRecord};
use super::table::EntityTable;
use super::SalesError;

/// Running totals for one run: branches always, commodities when enabled.
pub struct Ledger {
    branches: EntityTable,
    commodities: Option<EntityTable>,
}

impl Ledger {
    pub fn new(branches: EntityTable) -> Ledger {
        Ledger {
            branches,
            commodities: None,
        }
    }

    pub fn with_commodities(branches: EntityTable, commodities: EntityTable) -> Ledger {
        Ledger {
            branches,
            commodities: Some(commodities),
        }
    }

    pub fn tracks_commodities(&self) -> bool {
        self.commodities.is_some()
    }

    pub fn apply_lines(&mut self, file_name: &str, lines: Vec<String>) -> Result<(), SalesError> {
        let record = SalesRecord::from_lines(file_name, lines, self.tracks_commodities())?;
        self.apply(file_name, &record)
    }

    /// Adds one record to the totals. Either every affected total moves or none does.
    ///
    /// A record is rejected when either its branch or its commodity would pass the
    /// ten digit limit, even if the other stays within it.
    pub fn apply(&mut self, file_name: &str, record: &SalesRecord) -> Result<(), SalesError> {
        let branch = self.branches.get(&record.branch_code).ok_or_else(|| SalesError::InvalidBranchCode {
            file: file_name.to_string(),
        })?;

        let commodity = match &self.commodities {
            Some(commodities) => {
                let code = record.commodity_code.as_deref().unwrap_or_default();
                let commodity = commodities.get(code).ok_or_else(|| SalesError::InvalidCommodityCode {
                    file: file_name.to_string(),
                })?;
                Some(commodity)
            },
            None => None,
        };

        let amount = parse_amount(file_name, &record.amount)?;

        let branch_total = branch.projected_total(amount).ok_or_else(|| {
            debug!("branch total overflow, file={}, branch={}, amount={}", file_name, branch.code(), amount);
            SalesError::TotalAmountOverflow
        })?;

        let commodity_total = match commodity {
            Some(commodity) => {
                let total = commodity.projected_total(amount).ok_or_else(|| {
                    debug!("commodity total overflow, file={}, commodity={}, amount={}", file_name, commodity.code(), amount);
                    SalesError::TotalAmountOverflow
                })?;
                Some((commodity.code().clone(), total))
            },
            None => None,
        };

        if let Some(branch) = self.branches.get_mut(&record.branch_code) {
            branch.commit_total(branch_total);
        }

        if let (Some(commodities), Some((code, total))) = (self.commodities.as_mut(), commodity_total) {
            if let Some(commodity) = commodities.get_mut(&code) {
                commodity.commit_total(total);
            }
        }

        debug!("applied {}, branch={}, amount={}", file_name, record.branch_code, amount);

        Ok(())
    }

    pub fn branches(&self) -> &EntityTable {
        &self.branches
    }

    pub fn commodities(&self) -> Option<&EntityTable> {
        self.commodities.as_ref()
    }
}
