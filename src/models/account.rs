//! Account model
//!
//! Represents financial accounts (checking, savings, credit cards, etc.)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, OwnerId};
use super::money::Money;
use crate::error::{PocketError, PocketResult};

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking account
    #[default]
    #[serde(alias = "conta_corrente")]
    Checking,
    /// Savings account
    #[serde(alias = "poupanca")]
    Savings,
    /// Cash/wallet
    #[serde(alias = "carteira")]
    Cash,
    /// Investment account
    #[serde(alias = "investimento")]
    Investment,
    /// Credit card with a monthly statement
    #[serde(alias = "cartao_credito")]
    CreditCard,
}

impl AccountType {
    pub fn is_credit_card(&self) -> bool {
        matches!(self, Self::CreditCard)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" | "conta_corrente" => Some(Self::Checking),
            "savings" | "poupanca" => Some(Self::Savings),
            "cash" | "wallet" | "carteira" => Some(Self::Cash),
            "investment" | "investimento" => Some(Self::Investment),
            "credit" | "credit_card" | "creditcard" | "card" | "cartao_credito" => {
                Some(Self::CreditCard)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
            Self::CreditCard => write!(f, "Credit Card"),
        }
    }
}

/// Statement configuration of a credit card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTerms {
    /// Day of month the statement closes (1-31, clamped to short months)
    pub close_day: u32,

    /// Day of month the payment is due (1-31, clamped to short months)
    pub due_day: u32,

    /// Credit limit
    pub limit: Money,
}

impl CardTerms {
    /// Create validated card terms
    pub fn new(close_day: u32, due_day: u32, limit: Money) -> PocketResult<Self> {
        let terms = Self {
            close_day,
            due_day,
            limit,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check that both days are in 1-31 and the limit is not negative
    pub fn validate(&self) -> PocketResult<()> {
        check_day_of_month("closing day", self.close_day)?;
        check_day_of_month("due day", self.due_day)?;
        if self.limit.is_negative() {
            return Err(PocketError::Validation(format!(
                "Credit limit cannot be negative ({})",
                self.limit
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_day_of_month(field: &'static str, day: u32) -> PocketResult<()> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(PocketError::InvalidDayOfMonth { field, day })
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// User who owns this account
    pub owner_id: OwnerId,

    /// Account name (e.g., "Nubank")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Opening balance (standard accounts only)
    #[serde(default)]
    pub initial_balance: Money,

    /// Statement configuration, present only on credit cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardTerms>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new standard account with a zero opening balance
    pub fn new(owner_id: OwnerId, name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            owner_id,
            name: name.into(),
            account_type,
            initial_balance: Money::zero(),
            card: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new standard account with an opening balance
    pub fn with_initial_balance(
        owner_id: OwnerId,
        name: impl Into<String>,
        account_type: AccountType,
        initial_balance: Money,
    ) -> Self {
        let mut account = Self::new(owner_id, name, account_type);
        account.initial_balance = initial_balance;
        account
    }

    /// Create a credit card account
    pub fn credit_card(owner_id: OwnerId, name: impl Into<String>, terms: CardTerms) -> Self {
        let mut account = Self::new(owner_id, name, AccountType::CreditCard);
        account.card = Some(terms);
        account
    }

    pub fn is_credit_card(&self) -> bool {
        self.account_type.is_credit_card()
    }

    /// Card terms of a credit card account
    ///
    /// Fails with `InvalidAccountType` for standard accounts and for card
    /// records that lost their terms.
    pub fn card_terms(&self) -> PocketResult<&CardTerms> {
        match (&self.account_type, &self.card) {
            (AccountType::CreditCard, Some(terms)) => Ok(terms),
            _ => Err(PocketError::InvalidAccountType {
                account: self.name.clone(),
                account_type: self.account_type,
            }),
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        match (self.is_credit_card(), self.card.is_some()) {
            (true, false) => Err(AccountValidationError::MissingCardTerms),
            (false, true) => Err(AccountValidationError::UnexpectedCardTerms),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    MissingCardTerms,
    UnexpectedCardTerms,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::MissingCardTerms => {
                write!(f, "Credit card accounts need a closing day, due day and limit")
            }
            Self::UnexpectedCardTerms => {
                write!(f, "Only credit card accounts can have card terms")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
