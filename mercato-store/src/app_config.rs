use mercato_catalog::display::Locale;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocaleConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_language() -> String {
    "it".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            currency: default_currency(),
        }
    }
}

impl LocaleConfig {
    pub fn to_locale(&self) -> Locale {
        let mut locale = match self.language.as_str() {
            "en" => Locale::english(),
            _ => Locale::italian(),
        };
        locale.currency_symbol = self.currency.clone();
        locale
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of MERCATO)
            // Eg. `MERCATO__DATABASE__URL=...` would set `database.url`
            .add_source(config::Environment::with_prefix("MERCATO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_catalog::display::Language;

    #[test]
    fn locale_defaults_to_italian() {
        let locale = LocaleConfig::default().to_locale();
        assert_eq!(locale.language, Language::Italian);
        assert_eq!(locale.currency_symbol, "€");
        assert_eq!(locale.decimal_separator, ',');
    }

    #[test]
    fn english_language_switches_separator_and_labels() {
        let config = LocaleConfig {
            language: "en".to_string(),
            currency: "$".to_string(),
        };
        let locale = config.to_locale();
        assert_eq!(locale.language, Language::English);
        assert_eq!(locale.currency_symbol, "$");
        assert_eq!(locale.decimal_separator, '.');
    }
}
