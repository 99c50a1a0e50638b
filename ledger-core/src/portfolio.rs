use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::symbols::{resolve_symbol, SymbolResolver};

/// One token account balance as reported by the balance collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub mint: String,
    /// Display units.
    pub amount: f64,
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedHolding {
    pub mint: String,
    pub symbol: String,
    pub amount: f64,
    pub decimals: u8,
    pub price_usd: f64,
    pub value_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub sol_balance: f64,
    pub sol_usd_value: Option<f64>,
    pub total_usd_value: f64,
    pub tokens: Vec<ValuedHolding>,
}

/// Value a wallet's SOL and token balances. Empty token accounts are dropped
/// and tokens without a price are valued at zero.
pub fn summarize(
    sol_balance: f64,
    sol_price: Option<f64>,
    holdings: &[TokenHolding],
    prices: &HashMap<String, f64>,
    resolver: &dyn SymbolResolver,
) -> WalletSummary {
    let mut tokens: Vec<ValuedHolding> = holdings
        .iter()
        .filter(|h| h.amount > 0.0)
        .map(|h| {
            let price_usd = prices.get(&h.mint).copied().unwrap_or(0.0);
            ValuedHolding {
                mint: h.mint.clone(),
                symbol: resolve_symbol(h.symbol.as_deref(), &h.mint, resolver),
                amount: h.amount,
                decimals: h.decimals,
                price_usd,
                value_usd: h.amount * price_usd,
            }
        })
        .collect();

    tokens.sort_by(|a, b| b.value_usd.total_cmp(&a.value_usd).then_with(|| a.mint.cmp(&b.mint)));

    let sol_usd_value = sol_price.map(|price| sol_balance * price);
    let total_usd_value = sol_usd_value.unwrap_or(0.0) + tokens.iter().map(|t| t.value_usd).sum::<f64>();

    WalletSummary {
        sol_balance,
        sol_usd_value,
        total_usd_value,
        tokens,
    }
}
