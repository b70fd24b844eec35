use getset::{CopyGetters, Getters};

use super::MAX_TOTAL;

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Entity {
    #[getset(get = "pub")]
    code: String,
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    total: u64,
}

impl Entity {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Entity {
        Entity {
            code: code.into(),
            name: name.into(),
            total: 0,
        }
    }

    /// The total after adding `amount`, or `None` if it would pass [`MAX_TOTAL`].
    /// Nothing is modified.
    pub fn projected_total(&self, amount: u64) -> Option<u64> {
        self.total.checked_add(amount).filter(|total| *total <= MAX_TOTAL)
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
        self.total = 0;
    }

    pub(crate) fn commit_total(&mut self, total: u64) {
        debug_assert!(total <= MAX_TOTAL);
        self.total = total;
    }
}
