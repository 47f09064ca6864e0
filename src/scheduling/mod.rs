//! Date-driven computations over account and transaction snapshots
//!
//! Everything here is pure: functions borrow their input, read no clock
//! unless the name ends in `_now`/`current`, and never touch storage.

pub mod billing_cycle;
pub mod payables;

pub use billing_cycle::{
    bill_total, clamped_date, compute_current_cycle, compute_cycle, cycle_for_terms,
    days_in_month, statement_due_date, BillingCycle,
};
pub use payables::{classify, classify_now, days_until_due, Bucket, PayablesSchedule};
