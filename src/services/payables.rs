//! Payables service
//!
//! Loads an owner's transactions and hands them to the payables classifier.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::PocketResult;
use crate::models::OwnerId;
use crate::scheduling::{classify, PayablesSchedule};
use crate::storage::Storage;

/// Service producing the payables view for one owner
pub struct PayablesService<'a> {
    storage: &'a Storage,
    owner: &'a OwnerId,
}

impl<'a> PayablesService<'a> {
    pub fn new(storage: &'a Storage, owner: &'a OwnerId) -> Self {
        Self { storage, owner }
    }

    /// Unpaid expenses bucketed relative to `reference`
    pub fn schedule(&self, reference: NaiveDate) -> PocketResult<PayablesSchedule> {
        let transactions = self.storage.transactions.get_by_owner(self.owner)?;
        let schedule = classify(&transactions, reference);

        debug!(
            owner = %self.owner,
            %reference,
            overdue = schedule.overdue.len(),
            due = schedule.len(),
            "classified payables"
        );
        Ok(schedule)
    }
}
