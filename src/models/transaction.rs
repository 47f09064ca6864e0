//! Transaction model
//!
//! Represents income and expense records, including unpaid expenses that
//! act as payables, and the boundary validation of user input.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, OwnerId, TransactionId};
use super::money::Money;
use crate::error::{PocketError, PocketResult};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    #[serde(alias = "receita")]
    Income,
    /// Money going out
    #[default]
    #[serde(alias = "despesa")]
    Expense,
}

impl TransactionKind {
    /// Parse a transaction kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" | "in" | "receita" => Some(Self::Income),
            "expense" | "out" | "despesa" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// User who owns this transaction
    pub owner_id: OwnerId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    #[serde(default)]
    pub description: String,

    /// Always positive; the direction is carried by `kind`
    pub amount: Money,

    /// Purchase date for card transactions, due date for payables
    pub date: NaiveDateTime,

    #[serde(default)]
    pub is_paid: bool,

    #[serde(default)]
    pub category: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        owner_id: OwnerId,
        account_id: AccountId,
        kind: TransactionKind,
        amount: Money,
        date: NaiveDateTime,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            owner_id,
            account_id,
            kind,
            description: String::new(),
            amount,
            date,
            is_paid: false,
            category: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// An unpaid expense, i.e. something still to be paid
    pub fn is_payable(&self) -> bool {
        !self.is_paid && self.is_expense()
    }

    /// Calendar day of the transaction, time of day dropped
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Amount with sign: positive for income, negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Mark as paid
    pub fn mark_paid(&mut self) {
        self.is_paid = true;
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Parse a transaction date as typed by a user or stored by older clients
///
/// Accepted: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`,
/// `DD/MM/YYYY`. Date-only forms are placed at midnight.
pub fn parse_transaction_date(s: &str) -> PocketResult<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return Err(PocketError::MalformedDate("date is missing".into()));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date.and_time(chrono::NaiveTime::MIN));
        }
    }

    Err(PocketError::MalformedDate(format!(
        "'{}' (expected YYYY-MM-DD or DD/MM/YYYY)",
        s
    )))
}

/// Raw transaction fields as submitted from a form or the command line
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub account_id: Option<AccountId>,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub is_paid: bool,
}

impl TransactionInput {
    /// Input prefilled from an existing transaction, as an edit form starts
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            account_id: Some(txn.account_id),
            kind: txn.kind,
            description: txn.description.clone(),
            amount: txn.amount.to_string(),
            date: txn.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            category: txn.category.clone(),
            is_paid: txn.is_paid,
        }
    }

    /// Validate every field and build a transaction
    ///
    /// All field errors are collected rather than stopping at the first one.
    pub fn validate(
        &self,
        owner_id: OwnerId,
    ) -> Result<Transaction, Vec<TransactionValidationError>> {
        let mut errors = Vec::new();

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(TransactionValidationError::EmptyDescription);
        }

        let amount = match Money::parse(&self.amount) {
            Ok(amount) if amount.is_positive() => Some(amount),
            Ok(amount) => {
                errors.push(TransactionValidationError::NonPositiveAmount(amount));
                None
            }
            Err(_) => {
                errors.push(TransactionValidationError::InvalidAmount(
                    self.amount.trim().to_string(),
                ));
                None
            }
        };

        if self.account_id.is_none() {
            errors.push(TransactionValidationError::MissingAccount);
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(TransactionValidationError::EmptyCategory);
        }

        let date = match parse_transaction_date(&self.date) {
            Ok(date) => Some(date),
            Err(e) => {
                errors.push(TransactionValidationError::MalformedDate(e.to_string()));
                None
            }
        };

        match (self.account_id, amount, date) {
            (Some(account_id), Some(amount), Some(date)) if errors.is_empty() => {
                let mut txn = Transaction::new(owner_id, account_id, self.kind, amount, date);
                txn.description = description.to_string();
                txn.category = category.to_string();
                txn.is_paid = self.is_paid;
                Ok(txn)
            }
            _ => Err(errors),
        }
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    InvalidAmount(String),
    NonPositiveAmount(Money),
    MissingAccount,
    EmptyCategory,
    MalformedDate(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::InvalidAmount(s) => write!(f, "Invalid amount: '{}'", s),
            Self::NonPositiveAmount(m) => write!(f, "Amount must be positive (got {})", m),
            Self::MissingAccount => write!(f, "An account must be selected"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::MalformedDate(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
