//! Settings for the `cassa` binary.
//!
//! Sources, later ones winning: the optional TOML file (`cassa.toml`, or the
//! `--config` path), `CASSA_*` environment variables, then command-line flags.
use config::{Config, Environment, File};
use engine::{Currency, DenominationCatalog};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "cassa";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    /// Currency assumed when a command does not name one.
    pub currency: String,
    /// JSON file holding recorded day totals.
    pub store_path: String,
    /// Replaces the built-in denomination catalog of `currency`.
    pub denominations: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            currency: "EUR".to_string(),
            store_path: "day_totals.json".to_string(),
            denominations: None,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(path.is_some()))
            .add_source(
                Environment::with_prefix("CASSA")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("denominations"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }

    /// Denomination catalog for `currency`; the configured list only applies
    /// to the configured currency.
    pub fn catalog(&self, currency: Currency) -> Result<DenominationCatalog> {
        match &self.denominations {
            Some(values) if currency == self.currency()? => {
                Ok(DenominationCatalog::parse(currency, values)?)
            }
            _ => Ok(currency.default_catalog()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use engine::Money;

    use super::*;

    #[test]
    fn file_overrides_defaults_and_catalog() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "currency = \"chf\"\nstore_path = \"/tmp/totals.json\"\ndenominations = [\"100\", \"20\", \"0.50\"]"
        )
        .unwrap();

        let settings = Settings::load(file.path().to_str()).unwrap();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.currency().unwrap(), Currency::Chf);
        assert_eq!(settings.store_path, "/tmp/totals.json");

        let chf = settings.catalog(Currency::Chf).unwrap();
        assert_eq!(
            chf.values(),
            &[Money::new(10_000), Money::new(2_000), Money::new(50)]
        );
        assert_eq!(
            settings.catalog(Currency::Eur).unwrap(),
            Currency::Eur.default_catalog()
        );
    }

    #[test]
    fn bad_catalog_is_reported() {
        let settings = Settings {
            denominations: Some(vec!["0".to_string()]),
            ..Settings::default()
        };
        assert!(settings.catalog(Currency::Eur).is_err());
    }
}
