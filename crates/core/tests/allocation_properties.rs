//! End-to-end checks of the allocator over a spread of inputs.
//!
//! These tests exercise the public API only:
//! - Ordering and symbol preservation
//! - The exact 100% total after rounding correction
//! - Scaling with the asset cap

use index_fund_core::{compute, AllocationError, AllocationRecord, AllocationRequest, Asset};

// =============================================================================
// Helper Functions
// =============================================================================

/// Deterministic pseudo-random universe so failures are reproducible.
fn universe(size: usize, seed: u64) -> Vec<Asset> {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        ((state >> 33) % 1_000_000) as f64 + 1.0
    };

    (0..size)
        .map(|i| {
            let market_cap = next() * 1_000.0;
            let price = next() / 100.0;
            Asset::new(format!("T{i}"), market_cap, price)
        })
        .collect()
}

fn percentage_sum(records: &[AllocationRecord]) -> f64 {
    records.iter().map(|r| r.allocation_percentage).sum()
}

fn sorted_symbols<'a>(symbols: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut symbols: Vec<&str> = symbols.collect();
    symbols.sort_unstable();
    symbols
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_total_is_exactly_one_hundred_across_universes() {
    for seed in 1..40 {
        for size in [1, 2, 3, 5, 8, 13, 50] {
            let assets = universe(size, seed);
            let records = compute(0.8, 25_000.0, &assets).unwrap();
            assert_eq!(percentage_sum(&records), 100.0, "seed={seed} size={size}");
        }
    }
}

#[test]
fn test_output_preserves_symbols_and_ranks_by_market_cap() {
    let assets = universe(20, 7);
    let records = compute(0.6, 10_000.0, &assets).unwrap();

    assert_eq!(records.len(), assets.len());
    assert_eq!(
        sorted_symbols(records.iter().map(|r| r.symbol.as_str())),
        sorted_symbols(assets.iter().map(|a| a.symbol.as_str()))
    );

    let caps: Vec<f64> = records
        .iter()
        .map(|r| {
            assets
                .iter()
                .find(|a| a.symbol == r.symbol)
                .map(|a| a.market_cap)
                .unwrap()
        })
        .collect();
    assert!(caps.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_amounts_scale_with_asset_cap() {
    let assets = universe(4, 3);
    let full = compute(1.0, 1_000.0, &assets).unwrap();
    let half = compute(0.5, 1_000.0, &assets).unwrap();

    for (f, h) in full.iter().zip(&half) {
        assert_eq!(f.symbol, h.symbol);
        assert!((f.amount / 2.0 - h.amount).abs() < 1e-6);
        assert!((f.allocation_percentage - h.allocation_percentage).abs() < 1e-3);
    }
}

#[test]
fn test_reference_request_end_to_end() {
    let request = AllocationRequest {
        asset_cap: 0.5,
        total_capital: 1_000.0,
        assets: vec![
            Asset::new("BTC", 20_000.0, 80.0),
            Asset::new("ETH", 10_000.0, 25.0),
            Asset::new("LTC", 5_000.0, 10.0),
        ],
    };

    let records = request.compute().unwrap();
    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![3.571429, 5.714286, 7.142857]);
    assert_eq!(records[2].symbol, "LTC");
    assert_eq!(percentage_sum(&records), 100.0);
}

#[test]
fn test_failure_returns_no_partial_table() {
    let mut assets = universe(5, 11);
    assets[3].price = -1.0;
    let offending = assets[3].symbol.clone();

    let err = compute(0.5, 1_000.0, &assets).unwrap_err();
    assert_eq!(
        err,
        AllocationError::InvalidAsset {
            symbol: offending,
            reason: "price must be positive".to_string(),
        }
    );
}
