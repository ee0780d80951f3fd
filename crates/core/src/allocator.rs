//! Market-cap weighted capital allocation.
//!
//! Splits the investable share of a capital pool across a set of assets in
//! proportion to their market capitalization, converts each share into units
//! at the asset's price, and folds any rounding residual into the smallest
//! holding so the percentages sum to exactly 100.

use crate::error::AllocationError;
use crate::model::{AllocationRecord, Asset};

/// Decimal places kept on `AllocationRecord::amount`.
pub const AMOUNT_DECIMALS: usize = 6;

/// Decimal places kept on `AllocationRecord::allocation_percentage`.
pub const PERCENTAGE_DECIMALS: usize = 4;

const FULL_ALLOCATION: f64 = 100.0;

/// Computes the allocation table for `assets`.
///
/// Records are returned in descending market-cap order; assets with equal
/// market caps keep their input order. An empty asset list yields an empty
/// table once the global parameters have been validated.
///
/// # Arguments
/// * `asset_cap` - Fraction of `total_capital` that may be invested, in (0, 1]
/// * `total_capital` - Capital pool in the price currency
/// * `assets` - Candidate assets
///
/// # Errors
/// Returns `AllocationError::InvalidParameter` if `asset_cap` or
/// `total_capital` is out of range or the totals overflow `f64`, or
/// `AllocationError::InvalidAsset` for the first asset whose market cap or
/// price is not a positive finite number, or whose allocated amount overflows.
///
/// # Examples
/// ```
/// use index_fund_core::{compute, Asset};
///
/// let assets = vec![Asset::new("BTC", 20_000.0, 80.0), Asset::new("ETH", 10_000.0, 25.0)];
/// let records = compute(1.0, 1_000.0, &assets).unwrap();
///
/// assert_eq!(records[0].symbol, "BTC");
/// let total: f64 = records.iter().map(|r| r.allocation_percentage).sum();
/// assert_eq!(total, 100.0);
/// ```
pub fn compute(
    asset_cap: f64,
    total_capital: f64,
    assets: &[Asset],
) -> Result<Vec<AllocationRecord>, AllocationError> {
    validate_parameters(asset_cap, total_capital)?;

    if assets.is_empty() {
        return Ok(Vec::new());
    }

    for asset in assets {
        validate_asset(asset)?;
    }

    let ranked = rank_by_market_cap(assets);
    let total_market_cap: f64 = ranked.iter().map(|asset| asset.market_cap).sum();
    if !total_market_cap.is_finite() {
        return Err(AllocationError::invalid_parameter(
            "total market cap overflows f64 range",
        ));
    }
    let investable_capital = total_capital * asset_cap;
    if !is_positive_finite(investable_capital) {
        return Err(AllocationError::invalid_parameter(
            "investable capital is outside f64 range",
        ));
    }

    let mut records = Vec::with_capacity(ranked.len());
    let mut total_percentage = 0.0;

    for asset in ranked {
        let weight = asset.market_cap / total_market_cap;
        let record = allocate(asset, weight, investable_capital)?;
        total_percentage += record.allocation_percentage;
        records.push(record);
    }

    Ok(apply_rounding_correction(records, total_percentage))
}

fn validate_parameters(asset_cap: f64, total_capital: f64) -> Result<(), AllocationError> {
    // Written as negated ranges so NaN is rejected too
    if !(asset_cap > 0.0 && asset_cap <= 1.0) {
        return Err(AllocationError::invalid_parameter(
            "asset cap must be between 0 and 1, exclusive of 0",
        ));
    }

    if !(total_capital > 0.0 && total_capital.is_finite()) {
        return Err(AllocationError::invalid_parameter(
            "total capital must be positive",
        ));
    }

    Ok(())
}

fn validate_asset(asset: &Asset) -> Result<(), AllocationError> {
    if !is_positive_finite(asset.market_cap) {
        return Err(AllocationError::invalid_asset(
            &asset.symbol,
            "market cap must be positive",
        ));
    }

    if !is_positive_finite(asset.price) {
        return Err(AllocationError::invalid_asset(
            &asset.symbol,
            "price must be positive",
        ));
    }

    Ok(())
}

fn is_positive_finite(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

/// Orders assets by market cap, largest first. `sort_by` is stable, so ties
/// keep their input order.
fn rank_by_market_cap(assets: &[Asset]) -> Vec<&Asset> {
    let mut ranked: Vec<&Asset> = assets.iter().collect();
    ranked.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
    ranked
}

fn allocate(
    asset: &Asset,
    weight: f64,
    investable_capital: f64,
) -> Result<AllocationRecord, AllocationError> {
    let allocated_capital = weight * investable_capital;
    let amount = allocated_capital / asset.price;
    // Value of the units actually bought, not the capital earmarked for them
    let allocation_value = amount * asset.price;
    let allocation_percentage = (allocation_value / investable_capital) * FULL_ALLOCATION;

    if !amount.is_finite() || !allocation_percentage.is_finite() {
        return Err(AllocationError::invalid_asset(
            &asset.symbol,
            "allocated amount overflows f64 range",
        ));
    }

    Ok(AllocationRecord {
        symbol: asset.symbol.clone(),
        amount: round_to(amount, AMOUNT_DECIMALS),
        price: asset.price,
        allocation_percentage: round_to(allocation_percentage, PERCENTAGE_DECIMALS),
    })
}

/// Pushes the whole rounding residual onto the last (smallest) record.
///
/// Exact comparison against 100.0 is intentional: any residual, however
/// small, is corrected. The corrected percentage is written as
/// `100 - sum(preceding)`, which is `last + residual` and keeps the
/// left-to-right sum of the returned table at exactly 100.0.
fn apply_rounding_correction(
    records: Vec<AllocationRecord>,
    total_percentage: f64,
) -> Vec<AllocationRecord> {
    if total_percentage == FULL_ALLOCATION {
        return records;
    }

    let Some((last, preceding)) = records.split_last() else {
        return Vec::new();
    };

    let preceding_total: f64 = preceding.iter().map(|r| r.allocation_percentage).sum();
    let corrected = AllocationRecord {
        allocation_percentage: FULL_ALLOCATION - preceding_total,
        ..last.clone()
    };

    tracing::debug!(
        symbol = %corrected.symbol,
        residual = FULL_ALLOCATION - total_percentage,
        "Applied rounding correction to smallest allocation"
    );

    preceding
        .iter()
        .cloned()
        .chain(std::iter::once(corrected))
        .collect()
}

/// Rounds to `places` decimals, nearest to the exact binary value.
///
/// Float formatting is correctly rounded, so this agrees with Python's
/// `round(x, n)`. Only finite values reach here, and their formatted form
/// always parses.
fn round_to(value: f64, places: usize) -> f64 {
    let rounded = format!("{value:.places$}").parse::<f64>();
    debug_assert!(rounded.is_ok(), "formatted f64 failed to parse: {value}");
    rounded.unwrap_or(value)
}
