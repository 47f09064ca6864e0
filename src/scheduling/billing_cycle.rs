//! Credit card billing cycles
//!
//! A statement period is a rolling window that ends on the card's closing
//! day, not a calendar month. Closing and due days beyond the length of a
//! month are clamped to its last day, so a card closing on the 31st closes
//! on Feb 28/29, Apr 30, etc.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PocketError, PocketResult};
use crate::models::account::check_day_of_month;
use crate::models::{Account, AccountId, CardTerms, Money, Transaction};

/// One statement period of a credit card (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingCycle {
    /// Day after the previous statement closed
    pub start: NaiveDate,
    /// Closing date of this statement
    pub end: NaiveDate,
}

impl BillingCycle {
    /// Check if a date falls within this cycle
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the cycle
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> PocketResult<u32> {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| PocketError::MalformedDate(format!("{:04}-{:02} is out of range", year, month)))
}

/// The date `day` falls on in the given month, clamped to the month's last day
pub fn clamped_date(year: i32, month: u32, day: u32) -> PocketResult<NaiveDate> {
    let day = day.min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        PocketError::MalformedDate(format!("{:04}-{:02}-{:02} is out of range", year, month, day))
    })
}

/// Move a (year, month) pair by `delta` months
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Compute the statement period that `reference` belongs to
///
/// A reference date on the closing day itself still belongs to the cycle
/// closing that day.
///
/// # Errors
///
/// `InvalidAccountType` if the account is not a credit card with card terms,
/// `InvalidDayOfMonth` if the closing day is outside 1-31.
pub fn compute_cycle(account: &Account, reference: NaiveDate) -> PocketResult<BillingCycle> {
    let terms = account.card_terms()?;
    cycle_for_terms(terms, reference)
}

/// Same as [`compute_cycle`] with today's local date as the reference
pub fn compute_current_cycle(account: &Account) -> PocketResult<BillingCycle> {
    compute_cycle(account, chrono::Local::now().date_naive())
}

/// Compute the statement period from card terms alone
pub fn cycle_for_terms(terms: &CardTerms, reference: NaiveDate) -> PocketResult<BillingCycle> {
    check_day_of_month("closing day", terms.close_day)?;

    let (year, month) = (reference.year(), reference.month());
    let this_close = clamped_date(year, month, terms.close_day)?;

    let (previous_close, end) = if reference <= this_close {
        let (py, pm) = shift_month(year, month, -1);
        (clamped_date(py, pm, terms.close_day)?, this_close)
    } else {
        let (ny, nm) = shift_month(year, month, 1);
        (this_close, clamped_date(ny, nm, terms.close_day)?)
    };

    Ok(BillingCycle {
        start: previous_close + Duration::days(1),
        end,
    })
}

/// Due date of the statement that closes at the end of `cycle`
///
/// When the due day is after the closing day the bill is due in the closing
/// month; otherwise it wraps into the following month.
pub fn statement_due_date(terms: &CardTerms, cycle: &BillingCycle) -> PocketResult<NaiveDate> {
    check_day_of_month("due day", terms.due_day)?;

    let (year, month) = (cycle.end.year(), cycle.end.month());
    if terms.due_day > terms.close_day {
        clamped_date(year, month, terms.due_day)
    } else {
        let (ny, nm) = shift_month(year, month, 1);
        clamped_date(ny, nm, terms.due_day)
    }
}

/// Sum of the card's transactions dated inside the cycle
pub fn bill_total(card_id: AccountId, transactions: &[Transaction], cycle: &BillingCycle) -> Money {
    transactions
        .iter()
        .filter(|t| t.account_id == card_id && cycle.contains(t.day()))
        .map(|t| t.amount)
        .sum()
}
