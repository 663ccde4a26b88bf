//! Amounts that may not have been filled in yet.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Money;

/// A cash or check amount as typed into a worksheet.
///
/// `Unset` ("nothing entered") and `Set(Money::ZERO)` ("0.00 entered") sum
/// the same but display differently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum Amount {
    #[default]
    Unset,
    Set(Money),
}

impl Amount {
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Amount::Set(_))
    }

    /// The value used for summation: `Unset` counts as zero.
    #[must_use]
    pub const fn value_or_zero(self) -> Money {
        match self {
            Amount::Unset => Money::ZERO,
            Amount::Set(value) => value,
        }
    }

    #[must_use]
    pub const fn value(self) -> Option<Money> {
        match self {
            Amount::Unset => None,
            Amount::Set(value) => Some(value),
        }
    }

    /// `true` when money was actually recorded (strictly positive).
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.value_or_zero().is_positive()
    }
}

impl From<Money> for Amount {
    fn from(value: Money) -> Self {
        Amount::Set(value)
    }
}

impl From<Option<Money>> for Amount {
    fn from(value: Option<Money>) -> Self {
        value.map_or(Amount::Unset, Amount::Set)
    }
}

/// Renders `Unset` as an empty cell.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Unset => Ok(()),
            Amount::Set(value) => fmt::Display::fmt(value, f),
        }
    }
}
