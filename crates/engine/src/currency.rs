use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

/// ISO-like currency code used by a worksheet and its money values.
///
/// ## Minor units
///
/// The engine stores monetary values as an `i64` number of **minor units** (see `Money`).
/// `minor_units()` returns how many decimal digits are used when converting between:
/// - major units (human input/output, e.g. `10.50 EUR`)
/// - minor units (stored integers, e.g. `1050`)
///
/// Example: EUR has 2 minor units, so `10.50 EUR` ⇄ `1050`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Chf,
    Usd,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Chf => "CHF",
            Currency::Usd => "USD",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Eur | Currency::Chf | Currency::Usd => 2,
        }
    }

    /// Bill and coin face values in circulation, in cents, largest first.
    const fn face_values(self) -> &'static [i64] {
        match self {
            Currency::Eur => &[
                50_000, 20_000, 10_000, 5_000, 2_000, 1_000, 500, 200, 100, 50, 20, 10, 5, 2, 1,
            ],
            Currency::Chf => &[
                100_000, 20_000, 10_000, 5_000, 2_000, 1_000, 500, 200, 100, 50, 20, 10, 5,
            ],
            Currency::Usd => &[10_000, 5_000, 2_000, 1_000, 500, 200, 100, 50, 25, 10, 5, 1],
        }
    }

    /// The built-in denomination catalog for this currency.
    #[must_use]
    pub fn default_catalog(self) -> DenominationCatalog {
        DenominationCatalog {
            currency: self,
            values: self.face_values().iter().copied().map(Money::new).collect(),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "CHF" => Ok(Currency::Chf),
            "USD" => Ok(Currency::Usd),
            other => Err(EngineError::CurrencyMismatch(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}

/// The fixed list of denominations valid for one currency.
///
/// Values are positive, unique and kept largest first. The catalog is
/// read-only once built: reconciliation never invents or drops a denomination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenominationCatalog {
    currency: Currency,
    values: Vec<Money>,
}

impl DenominationCatalog {
    /// Builds a catalog from an externally supplied list of face values.
    pub fn new(currency: Currency, values: impl IntoIterator<Item = Money>) -> ResultEngine<Self> {
        let mut values: Vec<Money> = values.into_iter().collect();
        if let Some(bad) = values.iter().find(|v| !v.is_positive()) {
            return Err(EngineError::InvalidDenomination(format!(
                "denomination must be > 0, got {bad}"
            )));
        }
        values.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(pair) = values.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(EngineError::InvalidDenomination(format!(
                "duplicate denomination {}",
                pair[0]
            )));
        }
        if values.is_empty() {
            return Err(EngineError::InvalidDenomination(
                "catalog must list at least one denomination".to_string(),
            ));
        }
        Ok(Self { currency, values })
    }

    /// Parses a list of major-unit strings (e.g. from configuration).
    pub fn parse<S: AsRef<str>>(currency: Currency, values: &[S]) -> ResultEngine<Self> {
        let parsed = values
            .iter()
            .map(|raw| {
                Money::parse_major(raw.as_ref(), currency).map_err(|_| {
                    EngineError::InvalidDenomination(format!(
                        "invalid denomination: {}",
                        raw.as_ref().trim()
                    ))
                })
            })
            .collect::<ResultEngine<Vec<_>>>()?;
        Self::new(currency, parsed)
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Denominations, largest first.
    #[must_use]
    pub fn values(&self) -> &[Money] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogs_are_valid() {
        for currency in [Currency::Eur, Currency::Chf, Currency::Usd] {
            let catalog = currency.default_catalog();
            let rebuilt = DenominationCatalog::new(currency, catalog.values().to_vec()).unwrap();
            assert_eq!(rebuilt, catalog);
        }
        assert!(Currency::Usd.default_catalog().values().contains(&Money::new(25)));
        assert!(!Currency::Eur.default_catalog().values().contains(&Money::new(25)));
    }

    #[test]
    fn catalog_is_sorted_largest_first() {
        let catalog = DenominationCatalog::parse(Currency::Eur, &["1", "0.50", "20", "5"]).unwrap();
        let cents: Vec<i64> = catalog.values().iter().map(|v| v.cents()).collect();
        assert_eq!(cents, vec![2000, 500, 100, 50]);
    }

    #[test]
    fn catalog_rejects_zero_negative_and_duplicates() {
        assert!(matches!(
            DenominationCatalog::parse(Currency::Eur, &["10", "0"]),
            Err(EngineError::InvalidDenomination(_))
        ));
        assert!(matches!(
            DenominationCatalog::parse(Currency::Eur, &["-5"]),
            Err(EngineError::InvalidDenomination(_))
        ));
        assert!(matches!(
            DenominationCatalog::parse(Currency::Eur, &["10", "10.00"]),
            Err(EngineError::InvalidDenomination(_))
        ));
        assert!(matches!(
            DenominationCatalog::parse::<&str>(Currency::Eur, &[]),
            Err(EngineError::InvalidDenomination(_))
        ));
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!(Currency::try_from(" chf ").unwrap(), Currency::Chf);
        assert!(matches!(
            Currency::try_from("GBP"),
            Err(EngineError::CurrencyMismatch(_))
        ));
    }
}
