//! Enumerated select-box choices and their integer codes.
//!
//! Every choice is a closed enum. Parsing an unknown label fails with a
//! [`ChoiceParseError`] instead of falling through to a default category.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChoiceKind {
    YesNo,
    ContractType,
    PaymentMethod,
}

impl ChoiceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChoiceKind::YesNo => "yes/no",
            ChoiceKind::ContractType => "contract type",
            ChoiceKind::PaymentMethod => "payment method",
        }
    }

    /// Option labels in display order. The first entry is the default.
    #[must_use]
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            ChoiceKind::YesNo => YES_NO_LABELS,
            ChoiceKind::ContractType => CONTRACT_TYPE_LABELS,
            ChoiceKind::PaymentMethod => PAYMENT_METHOD_LABELS,
        }
    }
}

impl fmt::Display for ChoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const YES_NO_LABELS: &[&str] = &["Yes", "No"];
const CONTRACT_TYPE_LABELS: &[&str] = &["Month-to-Month", "One Year", "Two Year"];
const PAYMENT_METHOD_LABELS: &[&str] = &["Paper Check", "Credit Card", "Direct Debit"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{raw}'; expected one of: {expected:?}")]
pub struct ChoiceParseError {
    kind: ChoiceKind,
    raw: String,
    expected: &'static [&'static str],
}

impl ChoiceParseError {
    #[must_use]
    pub fn new(kind: ChoiceKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            expected: kind.options(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ChoiceKind {
        self.kind
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

/// Boolean select ("Yes"/"No"), encoded as 1/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[default]
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            YesNo::Yes => 1,
            YesNo::No => 0,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            YesNo::Yes => YesNo::No,
            YesNo::No => YesNo::Yes,
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { YesNo::Yes } else { YesNo::No }
    }
}

impl FromStr for YesNo {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(YesNo::Yes),
            "No" => Ok(YesNo::No),
            _ => Err(ChoiceParseError::new(ChoiceKind::YesNo, s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "Month-to-Month")]
    MonthToMonth,
    #[serde(rename = "One Year")]
    OneYear,
    #[serde(rename = "Two Year")]
    TwoYear,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            ContractType::MonthToMonth => 0,
            ContractType::OneYear => 1,
            ContractType::TwoYear => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "Month-to-Month",
            ContractType::OneYear => "One Year",
            ContractType::TwoYear => "Two Year",
        }
    }
}

impl FromStr for ContractType {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label() == trimmed)
            .ok_or_else(|| ChoiceParseError::new(ChoiceKind::ContractType, s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Paper Check")]
    PaperCheck,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Direct Debit")]
    DirectDebit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::PaperCheck, Self::CreditCard, Self::DirectDebit];

    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            PaymentMethod::PaperCheck => 0,
            PaymentMethod::CreditCard => 1,
            PaymentMethod::DirectDebit => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::PaperCheck => "Paper Check",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DirectDebit => "Direct Debit",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.label() == trimmed)
            .ok_or_else(|| ChoiceParseError::new(ChoiceKind::PaymentMethod, s))
    }
}

/// Step through `all` by one position, wrapping at either end.
fn cycle_in<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let idx = all.iter().position(|c| *c == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    all[next]
}

impl YesNo {
    #[must_use]
    pub fn cycled(self, _forward: bool) -> Self {
        self.toggle()
    }
}

impl ContractType {
    #[must_use]
    pub fn cycled(self, forward: bool) -> Self {
        cycle_in(&Self::ALL, self, forward)
    }
}

impl PaymentMethod {
    #[must_use]
    pub fn cycled(self, forward: bool) -> Self {
        cycle_in(&Self::ALL, self, forward)
    }
}

macro_rules! impl_display_via_label {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

impl_display_via_label!(YesNo, ContractType, PaymentMethod);
