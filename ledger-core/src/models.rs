use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};
use tracing::warn;

use crate::error::{EventError, PipelineError};

pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;
pub const NATIVE_SYMBOL: &str = "SOL";
pub const NATIVE_DECIMALS: u8 = 9;

/// Wrapped SOL mint on mainnet. Transfers of this mint move the native balance.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// `abcd...wxyz` form of an address or mint.
pub fn shorten(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 8 {
        return id.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// The indexer reports unknown accounts as empty strings.
pub fn account(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// One enhanced transaction as returned by the indexing service.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransactionEvent {
    pub signature: String,
    pub timestamp: i64,
    /// Lamports.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub fee: Option<u64>,
    pub fee_payer: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub transaction_error: Option<serde_json::Value>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub native_transfers: Vec<NativeTransfer>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub events: EventPayloads,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    pub from_user_account: Option<String>,
    pub to_user_account: Option<String>,
    /// Lamports.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: u64,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub from_user_account: Option<String>,
    pub to_user_account: Option<String>,
    #[serde(default)]
    pub mint: String,
    /// Display units (already scaled by the mint's decimals).
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub token_amount: f64,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub usd_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayloads {
    pub swap: Option<SwapEvent>,
    pub nft: Option<NftEvent>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapEvent {
    pub native_input: Option<NativeLeg>,
    pub native_output: Option<NativeLeg>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub token_inputs: Vec<TokenLeg>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub token_outputs: Vec<TokenLeg>,
    /// Venue, e.g. `JUPITER`.
    pub source: Option<String>,
    pub price_impact: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeLeg {
    pub account: Option<String>,
    /// Lamports.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: u64,
    pub usd_value: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenLeg {
    pub user_account: Option<String>,
    #[serde(default)]
    pub mint: String,
    /// Display units.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub amount: f64,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub usd_value: Option<f64>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftEvent {
    /// e.g. `NFT_SALE`, `NFT_LISTING`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub seller: Option<String>,
    pub authority: Option<String>,
    pub buyer: Option<String>,
    pub collection: Option<String>,
    pub name: Option<String>,
    /// Sale price in lamports.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub amount: Option<u64>,
    /// Marketplace.
    pub source: Option<String>,
    pub description: Option<String>,
}

/// The payload an event is normalized from, chosen by category precedence.
/// Transfer variants borrow leg 0 only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventPayload<'a> {
    Swap(&'a SwapEvent),
    Nft(&'a NftEvent),
    NativeTransfer(&'a NativeTransfer),
    TokenTransfer(&'a TokenTransfer),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Swap,
    Nft,
    NativeTransfer,
    TokenTransfer,
    Unrecognized,
}

impl EventPayload<'_> {
    pub fn category(&self) -> EventCategory {
        match self {
            EventPayload::Swap(_) => EventCategory::Swap,
            EventPayload::Nft(_) => EventCategory::Nft,
            EventPayload::NativeTransfer(_) => EventCategory::NativeTransfer,
            EventPayload::TokenTransfer(_) => EventCategory::TokenTransfer,
            EventPayload::Unrecognized => EventCategory::Unrecognized,
        }
    }
}

impl RawTransactionEvent {
    /// Swap > NFT > native transfer > token transfer > none.
    pub fn payload(&self) -> EventPayload<'_> {
        if let Some(swap) = &self.events.swap {
            return EventPayload::Swap(swap);
        }
        if let Some(nft) = &self.events.nft {
            return EventPayload::Nft(nft);
        }
        if let Some(leg) = self.native_transfers.first() {
            return EventPayload::NativeTransfer(leg);
        }
        if let Some(leg) = self.token_transfers.first() {
            return EventPayload::TokenTransfer(leg);
        }
        EventPayload::Unrecognized
    }

    pub fn category(&self) -> EventCategory {
        self.payload().category()
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.signature.trim().is_empty() {
            return Err(EventError::MissingSignature);
        }
        // Timestamps are scaled to milliseconds downstream.
        if self.timestamp < 0 || self.timestamp > i64::MAX / 1000 {
            return Err(EventError::InvalidTimestamp {
                signature: self.signature.clone(),
                timestamp: self.timestamp,
            });
        }

        let check = |field: String, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(EventError::InvalidAmount {
                    signature: self.signature.clone(),
                    field,
                    value,
                })
            }
        };

        for (i, t) in self.token_transfers.iter().enumerate() {
            check(format!("tokenTransfers[{i}].tokenAmount"), t.token_amount)?;
        }
        if let Some(swap) = &self.events.swap {
            for (i, leg) in swap.token_inputs.iter().enumerate() {
                check(format!("events.swap.tokenInputs[{i}].amount"), leg.amount)?;
            }
            for (i, leg) in swap.token_outputs.iter().enumerate() {
                check(format!("events.swap.tokenOutputs[{i}].amount"), leg.amount)?;
            }
        }

        Ok(())
    }

    pub fn fee_sol(&self) -> Option<f64> {
        self.fee.map(lamports_to_sol)
    }

    /// Whether `address` paid the network fee. Without an explicit fee payer,
    /// the sender of a native leg is assumed to have paid.
    pub fn fee_paid_by(&self, address: &str) -> bool {
        match account(&self.fee_payer) {
            Some(payer) => payer == address,
            None => self
                .native_transfers
                .iter()
                .any(|t| account(&t.from_user_account) == Some(address)),
        }
    }

    pub fn status_label(&self) -> String {
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            return status.to_string();
        }
        match &self.transaction_error {
            Some(err) if !err.is_null() => "Failed".to_string(),
            _ => "Success".to_string(),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.transaction_error {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Indexer type label, or the category name when the indexer gave none.
    pub fn type_label(&self) -> String {
        match self.kind.as_deref().filter(|s| !s.is_empty()) {
            Some(kind) => kind.to_string(),
            None => TransactionType::from(self.category()).to_string(),
        }
    }
}

/// Decode an indexer feed element by element. Elements that fail to decode
/// are dropped with a warning; the rest are kept.
pub fn decode_feed(feed: &serde_json::Value) -> Vec<RawTransactionEvent> {
    let Some(items) = feed.as_array() else {
        warn!("raw event feed is not a JSON array, ignoring it");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            match serde_json::from_value::<RawTransactionEvent>(item.clone()) {
                Ok(event) => Some(event),
                Err(err) => {
                    let signature = item.get("signature").and_then(|s| s.as_str());
                    warn!(index = i, ?signature, "skipping undecodable raw event: {err}");
                    None
                }
            }
        })
        .collect()
}

/// Like [`decode_feed`], but a document that is not a JSON array is an error.
pub fn decode_feed_str(text: &str) -> Result<Vec<RawTransactionEvent>, serde_json::Error> {
    let feed: serde_json::Value = serde_json::from_str(text)?;
    if !feed.is_array() {
        return Err(serde::de::Error::custom("expected a JSON array of events"));
    }
    Ok(decode_feed(&feed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Transfer,
    TokenTransfer,
    Swap,
    NftTransaction,
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Transfer => "TRANSFER",
            TransactionType::TokenTransfer => "TOKEN_TRANSFER",
            TransactionType::Swap => "SWAP",
            TransactionType::NftTransaction => "NFT_TRANSACTION",
            TransactionType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EventCategory> for TransactionType {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Swap => TransactionType::Swap,
            EventCategory::Nft => TransactionType::NftTransaction,
            EventCategory::NativeTransfer => TransactionType::Transfer,
            EventCategory::TokenTransfer => TransactionType::TokenTransfer,
            EventCategory::Unrecognized => TransactionType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    Swap,
    Unknown,
}

impl Direction {
    /// Direction of a movement from `from` to `to` as seen by `address`.
    pub fn of(address: &str, from: Option<&str>, to: Option<&str>) -> Self {
        if from == Some(address) {
            Direction::Out
        } else if to == Some(address) {
            Direction::In
        } else {
            Direction::Unknown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl TokenInfo {
    pub fn native() -> Self {
        Self {
            symbol: NATIVE_SYMBOL.to_string(),
            mint: None,
            decimals: Some(NATIVE_DECIMALS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapLegSummary {
    pub amount: f64,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    pub value_usd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapDetails {
    pub input: SwapLegSummary,
    pub output: SwapLegSummary,
    /// Output USD value minus input USD value.
    pub value_change_usd: Option<f64>,
    pub venue: Option<String>,
    pub price_impact: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftDetails {
    pub kind: String,
    pub collection: Option<String>,
    pub name: Option<String>,
    pub marketplace: Option<String>,
}

/// Display-oriented normalization of one raw event, from the viewpoint of
/// one observed address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub signature: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub direction: Direction,
    /// Unsigned magnitude; the sign lives in `direction`.
    pub amount: Option<f64>,
    pub token: TokenInfo,
    /// SOL.
    pub fee: Option<f64>,
    /// Unix seconds.
    pub block_time: i64,
    pub description: String,
    pub running_balance: Option<f64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub source: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nft: Option<NftDetails>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One reconstructed balance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancePoint {
    /// Milliseconds since the epoch.
    pub date: i64,
    pub sol_value: f64,
    pub usd_value: Option<f64>,
    /// The event's undo delta in SOL. On a clamped point this is the delta
    /// before clamping, so it can exceed the step from the next newer point.
    pub value_change: f64,
    pub has_transaction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The walk went below zero here and was forced back up.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clamped: bool,
}

impl BalancePoint {
    /// A point not backed by any transaction.
    pub fn synthetic(date: i64, sol_value: f64) -> Self {
        Self {
            date,
            sol_value,
            usd_value: None,
            value_change: 0.0,
            has_transaction: false,
            signature: None,
            tx_type: None,
            description: None,
            clamped: false,
        }
    }

    pub fn priced(mut self, sol_price: Option<f64>) -> Self {
        self.usd_value = sol_price.map(|price| self.sol_value * price);
        self
    }
}

/// Chart time window. `All` is the 30 day option, which covers all history
/// fetched for a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeWindow {
    #[default]
    OneDay,
    ThreeDays,
    FiveDays,
    TenDays,
    All,
}

impl TimeWindow {
    pub const VALUES: [TimeWindow; 5] = [
        TimeWindow::OneDay,
        TimeWindow::ThreeDays,
        TimeWindow::FiveDays,
        TimeWindow::TenDays,
        TimeWindow::All,
    ];

    pub fn days(self) -> u32 {
        match self {
            TimeWindow::OneDay => 1,
            TimeWindow::ThreeDays => 3,
            TimeWindow::FiveDays => 5,
            TimeWindow::TenDays => 10,
            TimeWindow::All => 30,
        }
    }

    pub fn is_all(self) -> bool {
        self == TimeWindow::All
    }

    /// Unsupported day counts fall back to one day.
    pub fn from_days_or_default(days: u32) -> Self {
        Self::try_from(days).unwrap_or_default()
    }

    /// Whether history fetched for `self` is enough to draw `other`.
    pub fn covers(self, other: TimeWindow) -> bool {
        self.days() >= other.days()
    }
}

impl TryFrom<u32> for TimeWindow {
    type Error = PipelineError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::VALUES
            .into_iter()
            .find(|w| w.days() == days)
            .ok_or(PipelineError::UnsupportedWindow(days))
    }
}

impl From<TimeWindow> for u32 {
    fn from(window: TimeWindow) -> Self {
        window.days()
    }
}

impl FromStr for TimeWindow {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(TimeWindow::All);
        }
        let days: u32 = trimmed
            .trim_end_matches(['d', 'D'])
            .parse()
            .map_err(|_| PipelineError::InvalidWindow(s.to_string()))?;
        Self::try_from(days)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_enhanced_transaction() {
        let raw = json!({
            "signature": "sig1",
            "timestamp": 1_700_000_000,
            "fee": 5000,
            "feePayer": "wallet",
            "type": "SWAP",
            "source": "JUPITER",
            "nativeTransfers": null,
            "tokenTransfers": [{
                "fromUserAccount": "wallet",
                "toUserAccount": "pool",
                "mint": "mintA",
                "tokenAmount": 12.5
            }],
            "events": {
                "swap": {
                    "nativeInput": { "account": "wallet", "amount": "1500000000" },
                    "tokenOutputs": [{ "userAccount": "wallet", "mint": "mintA", "amount": 12.5 }],
                    "source": "JUPITER"
                }
            }
        });

        let event: RawTransactionEvent = serde_json::from_value(raw).unwrap();

        assert_eq!(event.fee, Some(5000));
        assert!(event.native_transfers.is_empty());
        let swap = event.events.swap.as_ref().unwrap();
        assert_eq!(swap.native_input.as_ref().unwrap().amount, 1_500_000_000);
        assert_eq!(swap.token_outputs[0].amount, 12.5);
        assert_eq!(event.category(), EventCategory::Swap);
    }

    #[test]
    fn test_payload_precedence() {
        let mut event = RawTransactionEvent {
            signature: "sig".to_string(),
            timestamp: 10,
            token_transfers: vec![TokenTransfer::default()],
            ..Default::default()
        };
        assert_eq!(event.category(), EventCategory::TokenTransfer);

        event.native_transfers.push(NativeTransfer::default());
        assert_eq!(event.category(), EventCategory::NativeTransfer);

        event.events.nft = Some(NftEvent::default());
        assert_eq!(event.category(), EventCategory::Nft);

        event.events.swap = Some(SwapEvent::default());
        assert_eq!(event.category(), EventCategory::Swap);
    }

    #[test]
    fn test_decode_feed_skips_bad_elements() {
        let feed = json!([
            { "signature": "good", "timestamp": 1 },
            { "signature": "bad", "timestamp": "yesterday" },
            { "signature": "also_good", "timestamp": 2, "nativeTransfers": [
                { "fromUserAccount": "a", "toUserAccount": "b", "amount": 10 }
            ]}
        ]);

        let events = decode_feed(&feed);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].signature, "good");
        assert_eq!(events[1].native_transfers[0].amount, 10);
    }

    #[test]
    fn test_validate_rejects_malformed_events() {
        let missing_sig = RawTransactionEvent {
            timestamp: 1,
            ..Default::default()
        };
        assert_eq!(missing_sig.validate(), Err(EventError::MissingSignature));

        let bad_amount = RawTransactionEvent {
            signature: "sig".to_string(),
            timestamp: 1,
            token_transfers: vec![TokenTransfer {
                token_amount: f64::NAN,
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            bad_amount.validate(),
            Err(EventError::InvalidAmount { .. })
        ));

        let negative_time = RawTransactionEvent {
            signature: "sig".to_string(),
            timestamp: -5,
            ..Default::default()
        };
        assert!(negative_time.validate().is_err());

        let overflowing_time = RawTransactionEvent {
            signature: "sig".to_string(),
            timestamp: i64::MAX / 1000 + 1,
            ..Default::default()
        };
        assert!(matches!(
            overflowing_time.validate(),
            Err(EventError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_decode_feed_str_requires_array() {
        assert!(decode_feed_str(r#"{"signature": "one"}"#).is_err());
        assert!(decode_feed_str("not json").is_err());
        assert_eq!(decode_feed_str("[]").unwrap(), Vec::new());
    }

    #[test]
    fn test_fee_payer_inference() {
        let mut event = RawTransactionEvent {
            signature: "sig".to_string(),
            timestamp: 1,
            fee: Some(5000),
            native_transfers: vec![NativeTransfer {
                from_user_account: Some("me".to_string()),
                to_user_account: Some("you".to_string()),
                amount: 1,
            }],
            ..Default::default()
        };
        assert!(event.fee_paid_by("me"));
        assert!(!event.fee_paid_by("you"));

        event.fee_payer = Some("you".to_string());
        assert!(!event.fee_paid_by("me"));
        assert!(event.fee_paid_by("you"));
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("ABCDEFGHIJKL"), "ABCD...IJKL");
        assert_eq!(shorten("short"), "short");
    }

    #[test]
    fn test_time_window_parsing() {
        assert_eq!("3".parse::<TimeWindow>().unwrap(), TimeWindow::ThreeDays);
        assert_eq!("10d".parse::<TimeWindow>().unwrap(), TimeWindow::TenDays);
        assert_eq!("all".parse::<TimeWindow>().unwrap(), TimeWindow::All);
        assert_eq!(
            "7".parse::<TimeWindow>(),
            Err(PipelineError::UnsupportedWindow(7))
        );
        assert_eq!(TimeWindow::from_days_or_default(7), TimeWindow::OneDay);
        assert!(TimeWindow::All.covers(TimeWindow::TenDays));
        assert!(!TimeWindow::ThreeDays.covers(TimeWindow::FiveDays));

        let window: TimeWindow = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(window, TimeWindow::FiveDays);
        assert_eq!(serde_json::to_value(TimeWindow::All).unwrap(), json!(30));
    }
}
