use anyhow::{Context, Result};
use beancount_comdirect::{AccountKind, Importer};
use serde::Deserialize;
use std::path::Path;

/// Ledger accounts per export section, in section order.
#[derive(Debug, Deserialize)]
#[serde(try_from = "RawConfigAccounts")]
pub struct ConfigAccounts(pub Vec<(AccountKind, String)>);

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfigAccounts {
    checking: Option<String>,
    savings: Option<String>,
    credit: Option<String>,
    brokerage: Option<String>,
}

impl TryFrom<RawConfigAccounts> for ConfigAccounts {
    type Error = String;

    fn try_from(raw: RawConfigAccounts) -> Result<Self, Self::Error> {
        let configured = [
            (AccountKind::Checking, raw.checking),
            (AccountKind::Savings, raw.savings),
            (AccountKind::Credit, raw.credit),
            (AccountKind::Brokerage, raw.brokerage),
        ];

        let mut accounts = Vec::new();
        for (kind, account) in configured {
            let Some(account) = account else { continue };
            let account = account.trim();
            if account.is_empty() {
                return Err(format!("account for '{kind}' must not be empty"));
            }
            accounts.push((kind, account.to_string()));
        }

        if accounts.is_empty() {
            return Err(
                "accounts section must configure at least one of 'checking', 'savings', 'credit' or 'brokerage'"
                    .to_string(),
            );
        }
        Ok(ConfigAccounts(accounts))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub accounts: ConfigAccounts,
}

impl Config {
    pub fn importers(&self) -> Vec<Importer> {
        self.accounts
            .0
            .iter()
            .map(|(kind, account)| Importer::new(*kind, account.as_str()))
            .collect()
    }

    pub fn account(&self, kind: AccountKind) -> Option<&str> {
        self.accounts
            .0
            .iter()
            .find(|(configured, _)| *configured == kind)
            .map(|(_, account)| account.as_str())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn find_and_load() -> Result<Option<Self>> {
        let config_locations = [
            Path::new("beancount-comdirect.toml"),
            Path::new(".beancount-comdirect.toml"),
        ];

        for location in &config_locations {
            if location.exists() {
                tracing::debug!(path = %location.display(), "using config file");
                return Self::load_from_file(location).map(Some);
            }
        }

        Ok(None)
    }
}
