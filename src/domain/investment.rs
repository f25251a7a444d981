use std::fmt;

use serde::{Deserialize, Serialize};

/// The asset classes the portfolio tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    Stocks,
    Gold,
    Crypto,
    MutualFunds,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssetClass::Stocks => "stocks",
            AssetClass::Gold => "gold",
            AssetClass::Crypto => "crypto",
            AssetClass::MutualFunds => "mutual funds",
        };
        f.write_str(label)
    }
}

/// Per-asset-class balances. Balances are caller-reported valuations, not
/// flows; they only change through explicit rebase/top-up commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Investments {
    pub stocks: f64,
    pub gold: f64,
    pub crypto: f64,
    pub mutual_funds: f64,
}

impl Investments {
    pub fn balance(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Stocks => self.stocks,
            AssetClass::Gold => self.gold,
            AssetClass::Crypto => self.crypto,
            AssetClass::MutualFunds => self.mutual_funds,
        }
    }

    pub fn balance_mut(&mut self, class: AssetClass) -> &mut f64 {
        match class {
            AssetClass::Stocks => &mut self.stocks,
            AssetClass::Gold => &mut self.gold,
            AssetClass::Crypto => &mut self.crypto,
            AssetClass::MutualFunds => &mut self.mutual_funds,
        }
    }

    pub fn total(&self) -> f64 {
        self.stocks + self.gold + self.crypto + self.mutual_funds
    }
}
