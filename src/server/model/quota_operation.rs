use std::{fmt, str::FromStr};

use crate::server::error::ledger::LedgerError;

/// Direction in which an operation moves the `used` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Increment,
    Decrement,
}

/// Closed vocabulary of quota mutations recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaOperation {
    AddProfile,
}

impl QuotaOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddProfile => "ADD_PROFILE",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Self::AddProfile => Polarity::Increment,
        }
    }

    /// Remark stored alongside the ledger entry when the caller gives none.
    pub fn default_remark(&self) -> &'static str {
        match self {
            Self::AddProfile => "create game profile",
        }
    }

    /// `used` after applying `delta` with this operation's polarity.
    ///
    /// # Returns
    /// - `Ok(i32)` - The resulting `used` value
    /// - `Err(LedgerError::NegativeDelta)` - `delta` is below zero
    /// - `Err(LedgerError::NegativeBalance)` - The result would be below zero or overflow
    pub fn apply(&self, before_used: i32, delta: i32) -> Result<i32, LedgerError> {
        if delta < 0 {
            return Err(LedgerError::NegativeDelta(delta));
        }

        let after_used = match self.polarity() {
            Polarity::Increment => before_used.checked_add(delta),
            Polarity::Decrement => before_used.checked_sub(delta),
        };

        match after_used {
            Some(after_used) if after_used >= 0 => Ok(after_used),
            _ => Err(LedgerError::NegativeBalance {
                op: self.as_str(),
                after_used: after_used.unwrap_or(i32::MIN),
            }),
        }
    }
}

impl fmt::Display for QuotaOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotaOperation {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD_PROFILE" => Ok(Self::AddProfile),
            other => Err(LedgerError::UnknownOperation(other.to_string())),
        }
    }
}
