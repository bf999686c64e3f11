//! Pure reductions over a slice of sales.
//!
//! Every function here accepts an empty slice. Sums come back as zero and
//! groupings as empty vectors; averages come back as `None` because the mean
//! of nothing is undefined.
//!
//! Sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.

use crate::report::{GroupCount, GroupTotal, TrendPoint};
use core_types::{Dimension, Sale, StarPolicy};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Rounding used for every displayed average and share. Ties go to the even
/// neighbour, so 2.25 shows as 2.2 and 4.5 stars as 4.
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

pub fn transaction_count(records: &[Sale]) -> usize {
    records.len()
}

/// Sum of `total`, truncated towards zero.
pub fn total_sales(records: &[Sale]) -> i64 {
    let sum = saturating_sum(records.iter().map(|s| s.total));
    sum.trunc().to_i64().unwrap_or(if sum.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// Mean of `rating` to one decimal place.
pub fn average_rating(records: &[Sale]) -> Option<Decimal> {
    mean(records.iter().map(|s| s.rating), records.len()).map(|m| m.round_dp_with_strategy(1, ROUNDING))
}

/// Mean of `total` to two decimal places.
pub fn average_sale_per_transaction(records: &[Sale]) -> Option<Decimal> {
    mean(records.iter().map(|s| s.total), records.len()).map(|m| m.round_dp_with_strategy(2, ROUNDING))
}

fn mean(values: impl Iterator<Item = Decimal>, len: usize) -> Option<Decimal> {
    if len == 0 {
        return None;
    }
    Some(saturating_sum(values) / Decimal::from(len))
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// How many star glyphs to show next to an average rating.
///
/// An undefined average shows no stars.
pub fn star_rating_glyph_count(average_rating: Option<Decimal>, policy: StarPolicy) -> u32 {
    let Some(average) = average_rating else {
        return 0;
    };
    let scaled = match policy {
        StarPolicy::Clamp => average,
        StarPolicy::Halve => average / Decimal::TWO,
    };
    let rounded = scaled.round_dp_with_strategy(0, ROUNDING);
    if rounded <= Decimal::ZERO {
        return 0;
    }
    rounded.to_u32().unwrap_or(u32::MAX).min(StarPolicy::MAX_STARS)
}

fn add_to(running: &mut Decimal, total: Decimal) {
    *running = running.saturating_add(total);
}

/// Sums `total` per distinct value of `dimension`, ordered by value.
///
/// Sales without a value for `dimension` are left out of every group.
pub fn sum_by_category(records: &[Sale], dimension: Dimension) -> Vec<GroupTotal<String>> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut skipped = 0usize;

    for sale in records {
        match sale.dimension(dimension) {
            Some(key) => add_to(groups.entry(key).or_insert(Decimal::ZERO), sale.total),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(%dimension, skipped, "Sales without a value left out of grouping.");
    }

    groups
        .into_iter()
        .map(|(key, total)| GroupTotal::new(key.to_string(), total))
        .collect()
}

/// Sums `total` per hour of day, ordered by hour. Hours with no sales are absent.
pub fn sum_by_hour(records: &[Sale]) -> Vec<GroupTotal<u32>> {
    let mut groups: BTreeMap<u32, Decimal> = BTreeMap::new();
    let mut skipped = 0usize;

    for sale in records {
        match sale.hour() {
            Some(hour) => add_to(groups.entry(hour).or_insert(Decimal::ZERO), sale.total),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Sales with an unreadable time left out of the hourly breakdown.");
    }

    groups
        .into_iter()
        .map(|(hour, total)| GroupTotal::new(hour, total))
        .collect()
}

/// Product line totals in ascending order of total. Equal totals are ordered
/// by product line name.
pub fn sales_by_product_line(records: &[Sale]) -> Vec<GroupTotal<String>> {
    let mut groups = sum_by_category(records, Dimension::ProductLine);
    // Stable: ties keep the name order produced by the grouping.
    groups.sort_by(|a, b| a.total.cmp(&b.total));
    groups
}

pub fn sales_by_branch(records: &[Sale]) -> Vec<GroupTotal<String>> {
    sum_by_category(records, Dimension::Branch)
}

pub fn sales_by_customer_type(records: &[Sale]) -> Vec<GroupTotal<String>> {
    with_shares(sum_by_category(records, Dimension::CustomerType))
}

pub fn sales_by_gender(records: &[Sale]) -> Vec<GroupTotal<String>> {
    with_shares(sum_by_category(records, Dimension::Gender))
}

/// Number of transactions per customer type, with each type's share of the count.
pub fn customer_type_distribution(records: &[Sale]) -> Vec<GroupCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for key in records.iter().filter_map(|s| s.dimension(Dimension::CustomerType)) {
        *counts.entry(key).or_insert(0) += 1;
    }

    let grand: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(key, count)| GroupCount {
            key: key.to_string(),
            count,
            share_pct: percentage(Decimal::from(count), Decimal::from(grand)),
        })
        .collect()
}

/// Every sale as a `(date, total)` point, oldest first. Sales on the same
/// date keep their input order.
pub fn sales_trend(records: &[Sale]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .map(|s| TrendPoint {
            date: s.date,
            total: s.total,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Fills in each group's percentage of the combined total.
///
/// Shares stay `None` when the combined total is zero.
pub fn with_shares<K>(mut groups: Vec<GroupTotal<K>>) -> Vec<GroupTotal<K>> {
    let grand = saturating_sum(groups.iter().map(|g| g.total));
    for group in &mut groups {
        group.share_pct = percentage(group.total, grand);
    }
    groups
}

fn percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    let pct = part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(pct.round_dp_with_strategy(2, ROUNDING))
}
