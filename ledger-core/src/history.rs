// Backward balance walk.
//
// Starting from the current balance, each event is undone newest first to
// recover the balance just before it. Sign conventions here are the inverse
// of `normalizer`: SOL that left the wallet is added back, SOL that arrived
// is taken away.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::Thresholds;
use crate::models::{
    account, BalancePoint, NativeTransfer, RawTransactionEvent, SwapEvent, TokenTransfer,
    LAMPORTS_PER_SOL, WRAPPED_SOL_MINT,
};

/// How far back the synthetic point of a flat history sits.
pub const FLAT_LINE_LOOKBACK_MS: i64 = 24 * 60 * 60 * 1000;

pub fn reconstruct(events: &[RawTransactionEvent], current_balance: f64, address: &str) -> Vec<BalancePoint> {
    reconstruct_at(events, current_balance, address, Utc::now())
}

pub fn reconstruct_at(
    events: &[RawTransactionEvent],
    current_balance: f64,
    address: &str,
    now: DateTime<Utc>,
) -> Vec<BalancePoint> {
    reconstruct_with(events, current_balance, address, now, &Thresholds::default())
}

/// Returns points sorted ascending by date. The newest point is the seed at
/// `now`; a history with no meaningful events gets a second flat point one
/// day earlier.
pub fn reconstruct_with(
    events: &[RawTransactionEvent],
    current_balance: f64,
    address: &str,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> Vec<BalancePoint> {
    let now_ms = now.timestamp_millis();
    let mut points = vec![BalancePoint::synthetic(now_ms, current_balance)];

    let mut ordered: Vec<&RawTransactionEvent> = events.iter().collect();
    ordered.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.signature.cmp(&b.signature))
    });

    let mut running = current_balance;
    let mut clamps = 0usize;

    for event in ordered {
        if let Err(err) = event.validate() {
            warn!("skipping malformed event in balance walk: {err}");
            continue;
        }

        let delta = undo_delta(event, address);
        if delta.abs() < thresholds.balance_change_epsilon {
            continue;
        }

        running += delta;
        let clamped = running < 0.0;
        if clamped {
            warn!(
                signature = %event.signature,
                balance = running,
                "reconstructed balance went negative, clamping to zero"
            );
            running = 0.0;
            clamps += 1;
        }

        points.push(BalancePoint {
            date: event.timestamp * 1000,
            sol_value: running,
            usd_value: None,
            value_change: delta,
            has_transaction: true,
            signature: Some(event.signature.clone()),
            tx_type: Some(event.type_label()),
            description: event.description.clone().filter(|d| !d.is_empty()),
            clamped,
        });
    }

    if points.len() == 1 {
        points.push(BalancePoint::synthetic(now_ms - FLAT_LINE_LOOKBACK_MS, current_balance));
    }

    // Walk order is newest first; reversing before the stable sort keeps
    // same-timestamp points in chronological order.
    points.reverse();
    points.sort_by_key(|p| p.date);

    debug!(points = points.len(), clamps, "reconstructed balance history");
    points
}

/// SOL to add to the post-event balance to get the pre-event balance.
pub fn undo_delta(event: &RawTransactionEvent, address: &str) -> f64 {
    let mut lamports: i128 = 0;

    if let Some(swap) = &event.events.swap {
        lamports += undo_swap(swap, address);
    }
    lamports += undo_native_transfers(&event.native_transfers, address);
    if event.fee_paid_by(address) {
        lamports += i128::from(event.fee.unwrap_or(0));
    }

    lamports as f64 / LAMPORTS_PER_SOL + undo_wrapped_native(&event.token_transfers, address)
}

/// SOL paid into a swap comes back, SOL received from it goes away.
fn undo_swap(swap: &SwapEvent, address: &str) -> i128 {
    let involves = |leg_account: &Option<String>| match account(leg_account) {
        Some(acct) => acct == address,
        None => true,
    };

    let mut lamports = 0i128;
    if let Some(leg) = swap.native_input.as_ref().filter(|l| involves(&l.account)) {
        lamports += i128::from(leg.amount);
    }
    if let Some(leg) = swap.native_output.as_ref().filter(|l| involves(&l.account)) {
        lamports -= i128::from(leg.amount);
    }
    lamports
}

fn undo_native_transfers(transfers: &[NativeTransfer], address: &str) -> i128 {
    transfers
        .iter()
        .map(|t| {
            let amount = i128::from(t.amount);
            if account(&t.from_user_account) == Some(address) {
                amount
            } else if account(&t.to_user_account) == Some(address) {
                -amount
            } else {
                0
            }
        })
        .sum()
}

/// Wrapped SOL moves like native SOL. Amounts are already in display units.
fn undo_wrapped_native(transfers: &[TokenTransfer], address: &str) -> f64 {
    transfers
        .iter()
        .filter(|t| t.mint == WRAPPED_SOL_MINT)
        .map(|t| {
            if account(&t.from_user_account) == Some(address) {
                t.token_amount
            } else if account(&t.to_user_account) == Some(address) {
                -t.token_amount
            } else {
                0.0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventPayloads, NativeLeg};
    use chrono::{Duration, TimeZone};

    const WALLET: &str = "WaLLetAddr1111111111111111111111111111111111";
    const OTHER: &str = "OtherAddr22222222222222222222222222222222222";

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).single().unwrap()
    }

    fn transfer(signature: &str, ago: Duration, from: &str, to: &str, lamports: u64) -> RawTransactionEvent {
        RawTransactionEvent {
            signature: signature.to_string(),
            timestamp: (now() - ago).timestamp(),
            native_transfers: vec![NativeTransfer {
                from_user_account: Some(from.to_string()),
                to_user_account: Some(to.to_string()),
                amount: lamports,
            }],
            ..Default::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sent_transfer_is_added_back_with_fee() {
        let mut event = transfer("sent", Duration::hours(1), WALLET, OTHER, 2_000_000_000);
        event.fee = Some(5_000);
        event.fee_payer = Some(WALLET.to_string());

        let points = reconstruct_at(&[event], 10.0, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, (now() - Duration::hours(1)).timestamp_millis());
        assert_close(points[0].sol_value, 12.000005);
        assert!(points[0].has_transaction);
        assert_close(points[0].value_change, 2.000005);
        assert_eq!(points[1].date, now().timestamp_millis());
        assert_eq!(points[1].sol_value, 10.0);
        assert!(!points[1].has_transaction);
    }

    #[test]
    fn test_received_transfer_is_subtracted() {
        let event = transfer("recv", Duration::hours(2), OTHER, WALLET, 3_000_000_000);

        let points = reconstruct_at(&[event], 5.0, WALLET, now());

        assert_close(points[0].sol_value, 2.0);
        assert_close(points[0].value_change, -3.0);
    }

    #[test]
    fn test_fee_only_counted_for_payer() {
        let mut event = transfer("recv", Duration::hours(2), OTHER, WALLET, 1_000_000_000);
        event.fee = Some(10_000);
        event.fee_payer = Some(OTHER.to_string());

        let points = reconstruct_at(&[event], 5.0, WALLET, now());

        assert_close(points[0].sol_value, 4.0);
    }

    #[test]
    fn test_swap_legs_undo_in_opposite_direction() {
        let swap = SwapEvent {
            native_input: Some(NativeLeg {
                account: Some(WALLET.to_string()),
                amount: 1_000_000_000,
                usd_value: None,
            }),
            ..Default::default()
        };
        let event = RawTransactionEvent {
            signature: "swap".to_string(),
            timestamp: (now() - Duration::minutes(30)).timestamp(),
            events: EventPayloads {
                swap: Some(swap),
                nft: None,
            },
            ..Default::default()
        };

        // The swap cost one SOL; undoing it gives that SOL back.
        assert_close(undo_delta(&event, WALLET), 1.0);

        let points = reconstruct_at(&[event], 0.5, WALLET, now());
        assert_close(points[0].sol_value, 1.5);
        assert_eq!(points[0].tx_type.as_deref(), Some("SWAP"));
    }

    #[test]
    fn test_swap_output_leg_for_other_account_is_ignored() {
        let event = RawTransactionEvent {
            signature: "swap".to_string(),
            timestamp: 1,
            events: EventPayloads {
                swap: Some(SwapEvent {
                    native_output: Some(NativeLeg {
                        account: Some(OTHER.to_string()),
                        amount: 1_000_000_000,
                        usd_value: None,
                    }),
                    ..Default::default()
                }),
                nft: None,
            },
            ..Default::default()
        };

        assert_eq!(undo_delta(&event, WALLET), 0.0);
    }

    #[test]
    fn test_wrapped_sol_counts_as_native() {
        let event = RawTransactionEvent {
            signature: "wsol".to_string(),
            timestamp: (now() - Duration::hours(3)).timestamp(),
            token_transfers: vec![
                TokenTransfer {
                    from_user_account: Some(WALLET.to_string()),
                    to_user_account: Some(OTHER.to_string()),
                    mint: WRAPPED_SOL_MINT.to_string(),
                    token_amount: 0.75,
                    usd_value: Some(0.001),
                    ..Default::default()
                },
                TokenTransfer {
                    from_user_account: Some(WALLET.to_string()),
                    to_user_account: Some(OTHER.to_string()),
                    mint: "SomeOtherMint".to_string(),
                    token_amount: 1_000.0,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let points = reconstruct_at(&[event], 1.0, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_close(points[0].sol_value, 1.75);
    }

    #[test]
    fn test_small_changes_are_skipped_independently_of_display_dust() {
        // 0.000005 SOL: below the list's dust cut-off, above the walk's.
        let visible_to_walk = transfer("between", Duration::hours(1), WALLET, OTHER, 5_000);
        // 0.0000005 SOL: below both.
        let invisible = transfer("tiny", Duration::hours(2), WALLET, OTHER, 500);

        let points = reconstruct_at(&[visible_to_walk, invisible], 1.0, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].signature.as_deref(), Some("between"));
        assert_close(points[0].sol_value, 1.000005);
    }

    #[test]
    fn test_negative_balance_is_clamped() {
        let big_receive = transfer("recv", Duration::hours(1), OTHER, WALLET, 50_000_000_000);
        let older_send = transfer("send", Duration::hours(5), WALLET, OTHER, 1_000_000_000);

        let points = reconstruct_at(&[big_receive, older_send], 2.0, WALLET, now());

        assert!(points.iter().all(|p| p.sol_value >= 0.0));
        let clamped = points
            .iter()
            .find(|p| p.signature.as_deref() == Some("recv"))
            .unwrap();
        assert!(clamped.clamped);
        assert_eq!(clamped.sol_value, 0.0);
        // The event's own change is kept even though less was applied.
        assert_close(clamped.value_change, -50.0);
        // The walk continues from zero.
        assert_close(points[0].sol_value, 1.0);
        assert!(!points[0].clamped);
    }

    #[test]
    fn test_output_is_ascending_for_any_input_order() {
        let events = vec![
            transfer("a", Duration::hours(1), WALLET, OTHER, 1_000_000_000),
            transfer("b", Duration::hours(6), OTHER, WALLET, 400_000_000),
            transfer("c", Duration::hours(6), WALLET, OTHER, 300_000_000),
            transfer("d", Duration::days(2), OTHER, WALLET, 2_000_000_000),
        ];
        let reversed: Vec<_> = events.iter().rev().cloned().collect();
        let shuffled = vec![
            events[2].clone(),
            events[0].clone(),
            events[3].clone(),
            events[1].clone(),
        ];

        let expected = reconstruct_at(&events, 10.0, WALLET, now());
        for input in [reversed, shuffled] {
            assert_eq!(reconstruct_at(&input, 10.0, WALLET, now()), expected);
        }

        assert_eq!(expected.len(), 5);
        assert!(expected.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_empty_history_is_flat_line() {
        let points = reconstruct_at(&[], 3.25, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, now().timestamp_millis() - FLAT_LINE_LOOKBACK_MS);
        assert_eq!(points[0].sol_value, 3.25);
        assert_eq!(points[1].sol_value, 3.25);
        assert!(points.iter().all(|p| !p.has_transaction));
    }

    #[test]
    fn test_timestamp_too_large_for_millis_is_skipped() {
        let mut far_future = transfer("far", Duration::hours(1), WALLET, OTHER, 1_000_000_000);
        far_future.timestamp = i64::MAX / 10;
        let good = transfer("good", Duration::hours(2), OTHER, WALLET, 1_000_000_000);

        assert!(far_future.validate().is_err());
        let points = reconstruct_at(&[far_future, good], 4.0, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].signature.as_deref(), Some("good"));
        assert_close(points[0].sol_value, 3.0);
    }

    #[test]
    fn test_malformed_events_are_skipped() {
        let broken = transfer("", Duration::hours(1), WALLET, OTHER, 1_000_000_000);
        let good = transfer("good", Duration::hours(2), OTHER, WALLET, 1_000_000_000);

        let points = reconstruct_at(&[broken, good], 4.0, WALLET, now());

        assert_eq!(points.len(), 2);
        assert_close(points[0].sol_value, 3.0);
    }
}
