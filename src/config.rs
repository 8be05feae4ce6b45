use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::checkout::model::Currency;
use crate::net::Priority;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CheckoutConfig {
    #[serde(default = "default_net_name")]
    pub net_name: String,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,
    #[serde(default = "default_reset_history")]
    pub reset_history: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_narrate")]
    pub narrate: bool,
    #[serde(default)]
    pub priorities: TransitionPriorities,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransitionPriorities {
    #[serde(default = "default_to_payment")]
    pub to_payment: Priority,
    #[serde(default = "default_to_confirmed")]
    pub to_confirmed: Priority,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            net_name: default_net_name(),
            max_rounds: default_max_rounds(),
            reset_history: default_reset_history(),
            currency: default_currency(),
            narrate: default_narrate(),
            priorities: TransitionPriorities::default(),
        }
    }
}

impl Default for TransitionPriorities {
    fn default() -> Self {
        Self {
            to_payment: default_to_payment(),
            to_confirmed: default_to_confirmed(),
        }
    }
}

impl CheckoutConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: CheckoutConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Currency used for confirmations of empty baskets.
    pub fn currency(&self) -> Currency {
        let euro = Currency::euro();
        if self.currency.eq_ignore_ascii_case(&euro.code) {
            return euro;
        }
        Currency {
            code: self.currency.to_ascii_uppercase(),
            symbol: self.currency.to_ascii_uppercase(),
            decimal_shift_places: 2,
        }
    }
}

fn default_net_name() -> String {
    "checkout".to_string()
}

fn default_max_rounds() -> usize {
    16
}

fn default_reset_history() -> bool {
    true
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_narrate() -> bool {
    true
}

// Payment runs ahead of confirmation so a full checkout settles in one round.
fn default_to_payment() -> Priority {
    20
}

fn default_to_confirmed() -> Priority {
    10
}
