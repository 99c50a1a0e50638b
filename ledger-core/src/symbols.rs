// Token symbol resolution.
// Symbols come from the leg itself, then a resolver, then a shortened mint.

use std::collections::HashMap;

use tracing::debug;

use crate::models::shorten;

/// Well-known SPL tokens on Solana mainnet (symbol, mint, decimals).
pub const KNOWN_TOKENS: &[(&str, &str, u8)] = &[
    ("SOL", "So11111111111111111111111111111111111111112", 9),
    ("USDC", "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", 6),
    ("USDT", "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", 6),
    ("BONK", "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", 5),
    ("JUP", "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", 6),
    ("RAY", "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R", 6),
    ("PYTH", "HZ1JovNiVvGrGNiiYvEozEVgZ58xaU3RKwX8eACQBCt3", 6),
    ("WIF", "EKpQGSJtjMFqKZ9KQanSqYXRcF8fBopzLHYxdM65zcjm", 6),
    ("MSOL", "mSoLzYCxHdYgdzU16g5QSh3i5K3z3KZK7ytfqcJm7So", 9),
    ("JITOSOL", "J1toso1uCk3RLmjorhTtrVwY9HJ7X8V9yYac6Y7kGCPn", 9),
];

/// Looks up a display symbol for a mint. Lookups may fail; callers fall back
/// to a shortened mint instead of propagating the error.
pub trait SymbolResolver {
    fn resolve(&self, mint: &str) -> anyhow::Result<Option<String>>;
}

/// Resolver that never knows a symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSymbols;

impl SymbolResolver for NoSymbols {
    fn resolve(&self, _mint: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }
}

/// Resolver backed by [`KNOWN_TOKENS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownTokens;

impl SymbolResolver for KnownTokens {
    fn resolve(&self, mint: &str) -> anyhow::Result<Option<String>> {
        Ok(KNOWN_TOKENS
            .iter()
            .find(|(_, addr, _)| *addr == mint)
            .map(|(sym, _, _)| sym.to_string()))
    }
}

impl SymbolResolver for HashMap<String, String> {
    fn resolve(&self, mint: &str) -> anyhow::Result<Option<String>> {
        Ok(self.get(mint).cloned())
    }
}

/// Adapts a closure, e.g. a lookup against a metadata cache.
pub struct FnResolver<F>(pub F);

impl<F> SymbolResolver for FnResolver<F>
where
    F: Fn(&str) -> anyhow::Result<Option<String>>,
{
    fn resolve(&self, mint: &str) -> anyhow::Result<Option<String>> {
        (self.0)(mint)
    }
}

pub fn known_decimals(mint: &str) -> Option<u8> {
    KNOWN_TOKENS
        .iter()
        .find(|(_, addr, _)| *addr == mint)
        .map(|(_, _, dec)| *dec)
}

/// Explicit symbol, then the resolver, then `abcd...wxyz`.
pub fn resolve_symbol(explicit: Option<&str>, mint: &str, resolver: &dyn SymbolResolver) -> String {
    if let Some(symbol) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return symbol.to_string();
    }
    if mint.is_empty() {
        return "Unknown".to_string();
    }

    match resolver.resolve(mint) {
        Ok(Some(symbol)) if !symbol.trim().is_empty() => symbol,
        Ok(_) => shorten(mint),
        Err(err) => {
            debug!(mint, "symbol lookup failed, using shortened mint: {err:#}");
            shorten(mint)
        }
    }
}
