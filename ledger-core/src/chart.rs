use chrono::{DateTime, Utc};

use crate::models::{BalancePoint, TimeWindow};

pub const DAY_MS: i64 = 86_400_000;
pub const DEFAULT_INTERPOLATION_GAP_MS: i64 = 2 * 60 * 60 * 1000;

pub fn prepare(series: &[BalancePoint], window: TimeWindow) -> Vec<BalancePoint> {
    prepare_at(series, window, Utc::now())
}

pub fn prepare_at(series: &[BalancePoint], window: TimeWindow, now: DateTime<Utc>) -> Vec<BalancePoint> {
    prepare_with(series, window, now, DEFAULT_INTERPOLATION_GAP_MS)
}

/// Window the series and fill it out so it can be drawn as one continuous
/// line. An empty result means there is nothing to draw.
pub fn prepare_with(
    series: &[BalancePoint],
    window: TimeWindow,
    now: DateTime<Utc>,
    max_gap_ms: i64,
) -> Vec<BalancePoint> {
    let now_ms = now.timestamp_millis();

    let mut points = series.to_vec();
    points.sort_by_key(|p| p.date);

    if !window.is_all() {
        let cutoff = now_ms - i64::from(window.days()) * DAY_MS;
        points.retain(|p| p.date >= cutoff);
    }

    match points.len() {
        0 => points,
        1 => {
            let only = &points[0];
            let flat = BalancePoint {
                usd_value: only.usd_value,
                ..BalancePoint::synthetic(now_ms, only.sol_value)
            };
            points.push(flat);
            points
        }
        _ => interpolate(points, max_gap_ms),
    }
}

/// Insert one midpoint into every gap wider than `max_gap_ms`.
fn interpolate(points: Vec<BalancePoint>, max_gap_ms: i64) -> Vec<BalancePoint> {
    let mut out = Vec::with_capacity(points.len() * 2);
    let mut iter = points.into_iter().peekable();

    while let Some(point) = iter.next() {
        let filler = iter
            .peek()
            .filter(|next| next.date - point.date > max_gap_ms)
            .map(|next| midpoint(&point, next));
        out.push(point);
        out.extend(filler);
    }

    out
}

fn midpoint(a: &BalancePoint, b: &BalancePoint) -> BalancePoint {
    let usd_value = match (a.usd_value, b.usd_value) {
        (Some(x), Some(y)) => Some((x + y) / 2.0),
        _ => None,
    };
    BalancePoint {
        usd_value,
        ..BalancePoint::synthetic(a.date + (b.date - a.date) / 2, (a.sol_value + b.sol_value) / 2.0)
    }
}
