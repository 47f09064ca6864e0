//! Payables schedule
//!
//! Sorts unpaid expenses into urgency buckets relative to a reference day.
//! The buckets are exclusive: overdue, due today, due within the next week
//! and due within the next 30 days. Anything further out is left out of the
//! schedule.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{Money, Transaction};

/// Last day offset of the "next 7 days" bucket
const NEXT_WEEK_LAST_DAY: i64 = 6;

/// Last day offset of the "next 30 days" bucket
const HORIZON_DAYS: i64 = 30;

/// Urgency class of a payable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucket {
    Overdue,
    DueToday,
    DueNext7,
    DueNext30,
}

impl Bucket {
    /// All buckets, most urgent first
    pub const ALL: [Bucket; 4] = [
        Bucket::Overdue,
        Bucket::DueToday,
        Bucket::DueNext7,
        Bucket::DueNext30,
    ];

    /// Bucket for a payable due `diff_days` days after the reference day
    ///
    /// Returns `None` for payables more than 30 days out.
    pub fn for_days(diff_days: i64) -> Option<Self> {
        match diff_days {
            d if d < 0 => Some(Self::Overdue),
            0 => Some(Self::DueToday),
            1..=NEXT_WEEK_LAST_DAY => Some(Self::DueNext7),
            d if d <= HORIZON_DAYS => Some(Self::DueNext30),
            _ => None,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue => write!(f, "Overdue"),
            Self::DueToday => write!(f, "Due today"),
            Self::DueNext7 => write!(f, "Next 7 days"),
            Self::DueNext30 => write!(f, "Next 30 days"),
        }
    }
}

/// Whole days from `reference` to the transaction's due day
///
/// Time of day is ignored on both sides, so anything dated tomorrow counts
/// as +1 whatever its time.
pub fn days_until_due(transaction: &Transaction, reference: NaiveDate) -> i64 {
    (transaction.day() - reference).num_days()
}

/// Payables split into urgency buckets, each sorted by due date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PayablesSchedule {
    pub overdue: Vec<Transaction>,
    pub due_today: Vec<Transaction>,
    pub due_next_7: Vec<Transaction>,
    pub due_next_30: Vec<Transaction>,
}

impl PayablesSchedule {
    /// Transactions of one bucket
    pub fn bucket(&self, bucket: Bucket) -> &[Transaction] {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::DueToday => &self.due_today,
            Bucket::DueNext7 => &self.due_next_7,
            Bucket::DueNext30 => &self.due_next_30,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Transaction> {
        match bucket {
            Bucket::Overdue => &mut self.overdue,
            Bucket::DueToday => &mut self.due_today,
            Bucket::DueNext7 => &mut self.due_next_7,
            Bucket::DueNext30 => &mut self.due_next_30,
        }
    }

    /// Iterate over buckets in urgency order
    pub fn buckets(&self) -> impl Iterator<Item = (Bucket, &[Transaction])> {
        Bucket::ALL.into_iter().map(move |b| (b, self.bucket(b)))
    }

    /// Sum of amounts in one bucket
    pub fn total(&self, bucket: Bucket) -> Money {
        self.bucket(bucket).iter().map(|t| t.amount).sum()
    }

    /// Sum of amounts across all buckets
    pub fn total_due(&self) -> Money {
        Bucket::ALL.iter().map(|b| self.total(*b)).sum()
    }

    /// Number of scheduled payables
    pub fn len(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the payables schedule for `reference`
///
/// Accepts any transactions; paid ones and income are skipped here, so
/// callers may pass an unfiltered list.
pub fn classify(transactions: &[Transaction], reference: NaiveDate) -> PayablesSchedule {
    let mut schedule = PayablesSchedule::default();

    for txn in transactions.iter().filter(|t| t.is_payable()) {
        if let Some(bucket) = Bucket::for_days(days_until_due(txn, reference)) {
            schedule.bucket_mut(bucket).push(txn.clone());
        }
    }

    for bucket in Bucket::ALL {
        // Stable, so equal due dates keep their input order
        schedule.bucket_mut(bucket).sort_by_key(|t| t.date);
    }

    schedule
}

/// Same as [`classify`] with today's local date as the reference
pub fn classify_now(transactions: &[Transaction]) -> PayablesSchedule {
    classify(transactions, chrono::Local::now().date_naive())
}
