// Forward normalization: what happened in each raw event, as seen by the
// observed address. The balance walk in `history` reads the same shapes with
// the opposite sign convention.

use tracing::{debug, warn};

use crate::config::Thresholds;
use crate::models::{
    account, lamports_to_sol, shorten, CanonicalTransaction, Direction, EventPayload,
    NativeTransfer, NftDetails, NftEvent, RawTransactionEvent, SwapDetails, SwapEvent,
    SwapLegSummary, TokenInfo, TokenLeg, TokenTransfer, TransactionType, NATIVE_DECIMALS,
    NATIVE_SYMBOL,
};
use crate::symbols::{known_decimals, resolve_symbol, SymbolResolver};

pub fn normalize(
    event: &RawTransactionEvent,
    address: &str,
    resolver: &dyn SymbolResolver,
) -> Option<CanonicalTransaction> {
    normalize_with(event, address, resolver, &Thresholds::default())
}

/// Returns `None` for malformed events and for dust transfers.
pub fn normalize_with(
    event: &RawTransactionEvent,
    address: &str,
    resolver: &dyn SymbolResolver,
    thresholds: &Thresholds,
) -> Option<CanonicalTransaction> {
    if let Err(err) = event.validate() {
        warn!("skipping malformed event: {err}");
        return None;
    }

    let base = base_transaction(event);

    match event.payload() {
        EventPayload::Swap(swap) => Some(normalize_swap(base, swap, resolver, thresholds)),
        EventPayload::Nft(nft) => Some(normalize_nft(base, nft, address)),
        EventPayload::NativeTransfer(leg) => normalize_native_transfer(base, leg, address, thresholds),
        EventPayload::TokenTransfer(leg) => {
            normalize_token_transfer(base, leg, address, resolver, thresholds)
        }
        EventPayload::Unrecognized => Some(base),
    }
}

fn base_transaction(event: &RawTransactionEvent) -> CanonicalTransaction {
    CanonicalTransaction {
        signature: event.signature.clone(),
        tx_type: TransactionType::Unknown,
        direction: Direction::Unknown,
        amount: None,
        token: TokenInfo::native(),
        fee: event.fee_sol(),
        block_time: event.timestamp,
        description: String::new(),
        running_balance: None,
        status: event.status_label(),
        error: event.error_message(),
        source: event.source.clone(),
        from: None,
        to: None,
        swap: None,
        nft: None,
    }
}

fn normalize_swap(
    mut tx: CanonicalTransaction,
    swap: &SwapEvent,
    resolver: &dyn SymbolResolver,
    thresholds: &Thresholds,
) -> CanonicalTransaction {
    let input = swap_leg(
        swap.native_input.as_ref().map(|leg| (leg.amount, leg.usd_value)),
        swap.token_inputs.first(),
        resolver,
    );
    let output = swap_leg(
        swap.native_output.as_ref().map(|leg| (leg.amount, leg.usd_value)),
        swap.token_outputs.first(),
        resolver,
    );

    let mut description = format!(
        "Swap: {} {} → {} {}",
        format_swap_amount(input.amount, thresholds.swap_fixed_point_min),
        input.symbol,
        format_swap_amount(output.amount, thresholds.swap_fixed_point_min),
        output.symbol,
    );
    let value_change_usd = match (input.value_usd, output.value_usd) {
        (Some(in_usd), Some(out_usd)) => {
            description.push_str(&format!(" (${in_usd:.2} → ${out_usd:.2})"));
            Some(out_usd - in_usd)
        }
        _ => None,
    };

    tx.tx_type = TransactionType::Swap;
    tx.direction = Direction::Swap;
    tx.amount = Some(input.amount);
    tx.token = TokenInfo {
        symbol: input.symbol.clone(),
        mint: input.mint.clone(),
        decimals: input.decimals,
    };
    tx.description = description;
    if swap.source.is_some() {
        tx.source = swap.source.clone();
    }
    tx.swap = Some(SwapDetails {
        input,
        output,
        value_change_usd,
        venue: swap.source.clone(),
        price_impact: swap.price_impact,
    });
    tx
}

/// Native leg when present, else the first token leg.
fn swap_leg(
    native: Option<(u64, Option<f64>)>,
    token: Option<&TokenLeg>,
    resolver: &dyn SymbolResolver,
) -> SwapLegSummary {
    if let Some((lamports, value_usd)) = native {
        return SwapLegSummary {
            amount: lamports_to_sol(lamports),
            symbol: NATIVE_SYMBOL.to_string(),
            mint: None,
            decimals: Some(NATIVE_DECIMALS),
            value_usd,
        };
    }

    match token {
        Some(leg) => SwapLegSummary {
            amount: leg.amount,
            symbol: resolve_symbol(leg.symbol.as_deref(), &leg.mint, resolver),
            mint: Some(leg.mint.clone()).filter(|m| !m.is_empty()),
            decimals: leg.decimals.or_else(|| known_decimals(&leg.mint)),
            value_usd: leg.usd_value,
        },
        None => SwapLegSummary {
            amount: 0.0,
            symbol: "Unknown".to_string(),
            mint: None,
            decimals: None,
            value_usd: None,
        },
    }
}

/// Tiny amounts would print as `0.000`, so they use two significant digits
/// in exponential form instead.
pub fn format_swap_amount(amount: f64, fixed_point_min: f64) -> String {
    if amount != 0.0 && amount.abs() < fixed_point_min {
        format!("{amount:.1e}")
    } else {
        format!("{amount:.3}")
    }
}

fn normalize_nft(mut tx: CanonicalTransaction, nft: &NftEvent, address: &str) -> CanonicalTransaction {
    let seller = account(&nft.seller).or(account(&nft.authority));
    let buyer = account(&nft.buyer);

    let direction = if seller == Some(address) || account(&nft.authority) == Some(address) {
        Direction::Out
    } else if buyer == Some(address) {
        Direction::In
    } else {
        Direction::Unknown
    };

    let kind = nft
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .unwrap_or("NFT_TRANSACTION")
        .to_uppercase();
    let amount = nft.amount.map(lamports_to_sol);

    tx.description = match nft.description.as_deref().filter(|d| !d.is_empty()) {
        Some(text) => text.to_string(),
        None => describe_nft(direction, &kind, nft.name.as_deref(), amount),
    };
    tx.tx_type = TransactionType::NftTransaction;
    tx.direction = direction;
    tx.amount = amount;
    tx.from = seller.map(str::to_string);
    tx.to = buyer.map(str::to_string);
    if nft.source.is_some() {
        tx.source = nft.source.clone();
    }
    tx.nft = Some(NftDetails {
        kind,
        collection: nft.collection.clone(),
        name: nft.name.clone(),
        marketplace: nft.source.clone(),
    });
    tx
}

fn describe_nft(direction: Direction, kind: &str, name: Option<&str>, amount: Option<f64>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or("NFT");
    let price = amount
        .map(|sol| format!(" for {sol:.3} {NATIVE_SYMBOL}"))
        .unwrap_or_default();

    match direction {
        Direction::Out => format!("Sold {name}{price}"),
        Direction::In => format!("Bought {name}{price}"),
        _ => format!("{kind} {name}{price}"),
    }
}

fn normalize_native_transfer(
    mut tx: CanonicalTransaction,
    leg: &NativeTransfer,
    address: &str,
    thresholds: &Thresholds,
) -> Option<CanonicalTransaction> {
    let amount = lamports_to_sol(leg.amount);
    if amount < thresholds.transfer_dust_sol {
        debug!(signature = %tx.signature, amount, "dropping dust native transfer");
        return None;
    }

    let from = account(&leg.from_user_account);
    let to = account(&leg.to_user_account);
    let direction = Direction::of(address, from, to);

    tx.tx_type = TransactionType::Transfer;
    tx.direction = direction;
    tx.amount = Some(amount);
    tx.description = describe_transfer(direction, amount, NATIVE_SYMBOL, from, to);
    tx.from = from.map(str::to_string);
    tx.to = to.map(str::to_string);
    if tx.source.is_none() {
        tx.source = Some("SYSTEM_PROGRAM".to_string());
    }
    Some(tx)
}

fn normalize_token_transfer(
    mut tx: CanonicalTransaction,
    leg: &TokenTransfer,
    address: &str,
    resolver: &dyn SymbolResolver,
    thresholds: &Thresholds,
) -> Option<CanonicalTransaction> {
    if let Some(usd) = leg.usd_value.filter(|usd| *usd < thresholds.token_dust_usd) {
        debug!(signature = %tx.signature, usd, "dropping dust token transfer");
        return None;
    }

    let from = account(&leg.from_user_account);
    let to = account(&leg.to_user_account);
    let direction = Direction::of(address, from, to);
    let symbol = resolve_symbol(leg.symbol.as_deref(), &leg.mint, resolver);

    tx.tx_type = TransactionType::TokenTransfer;
    tx.direction = direction;
    tx.amount = Some(leg.token_amount);
    tx.description = describe_transfer(direction, leg.token_amount, &symbol, from, to);
    tx.token = TokenInfo {
        symbol,
        mint: Some(leg.mint.clone()).filter(|m| !m.is_empty()),
        decimals: leg.decimals.or_else(|| known_decimals(&leg.mint)),
    };
    tx.from = from.map(str::to_string);
    tx.to = to.map(str::to_string);
    if tx.source.is_none() {
        tx.source = Some("SOLANA_PROGRAM_LIBRARY".to_string());
    }
    Some(tx)
}

fn describe_transfer(
    direction: Direction,
    amount: f64,
    symbol: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> String {
    match (direction, from, to) {
        (Direction::Out, _, Some(to)) => format!("Sent {amount:.6} {symbol} to {}", shorten(to)),
        (Direction::Out, _, None) => format!("Sent {amount:.6} {symbol}"),
        (Direction::In, Some(from), _) => {
            format!("Received {amount:.6} {symbol} from {}", shorten(from))
        }
        (Direction::In, None, _) => format!("Received {amount:.6} {symbol}"),
        _ => format!("Transferred {amount:.6} {symbol}"),
    }
}
