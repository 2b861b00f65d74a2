//! Integration tests for building, serializing and persisting products.
//!
//! Every test builds its context from a fresh hub over the shipped registry
//! files, so runtime registrations never leak between tests.

use approx::assert_relative_eq;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::tempdir;
use tenor_products::prelude::*;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn context() -> ProductContext {
    ProductContext::from_hub(&RegistryHub::with_config(RegistryConfig::default())).unwrap()
}

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn pay_fixed_swap(ctx: &ProductContext, notional: Decimal) -> RfrSwap {
    RfrSwap::builder()
        .effective_date(d(2024, 1, 16))
        .term_or_termination_date("2Y".parse().unwrap())
        .index_name("SOFR", ctx)
        .unwrap()
        .fixed_rate(dec!(0.0415))
        .pay_or_receive(PayOrReceive::Pay)
        .notional(notional)
        .accrual_period(Period::years(1))
        .floating_leg_accrual_period(Period::months(3))
        .accrual_basis(AccrualBasis::Act360)
        .build()
        .unwrap()
}

fn sample_products(ctx: &ProductContext) -> Vec<Product> {
    let bullet = BulletCashflow::new(
        d(2024, 12, 31),
        Currency::EUR,
        dec!(-1_000),
        LongOrShort::Short,
        Some(d(2025, 1, 3)),
    );
    let fixed = FixedAccruedCashflow::new(
        d(2024, 1, 1),
        d(2024, 4, 1),
        Currency::USD,
        dec!(100),
        AccrualBasis::Act360,
    );
    let overnight = OvernightIndexCashflow::new(
        d(2024, 3, 1),
        "3M".parse().unwrap(),
        ctx.index("SONIA").unwrap(),
        CompoundingMethod::Compound,
        dec!(0.0010),
        dec!(5_000_000),
        None,
    )
    .unwrap();
    let future = RfrFuture::from_convention_name(
        d(2024, 3, 20),
        "3M".parse().unwrap(),
        "SOFR-3M-FUTURE",
        LongOrShort::Long,
        dec!(2),
        dec!(94.75),
        ctx,
    )
    .unwrap();

    vec![
        bullet.into(),
        fixed.into(),
        overnight.into(),
        future.into(),
        pay_fixed_swap(ctx, dec!(100)).into(),
    ]
}

// =============================================================================
// DOCUMENTED EXAMPLES
// =============================================================================

#[test]
fn test_quarterly_schedule_example() {
    let schedule = make_schedule(
        d(2024, 1, 15),
        d(2024, 7, 15),
        "3M".parse().unwrap(),
        "USGS".parse().unwrap(),
        "MF".parse().unwrap(),
        "ACT/360".parse().unwrap(),
        DateGenerationRule::Backward,
    )
    .unwrap();

    let ends: Vec<Date> = schedule.rows().iter().map(|row| row.end_date).collect();
    assert_eq!(ends, vec![d(2024, 4, 15), d(2024, 7, 15)]);
    for row in &schedule {
        assert_relative_eq!(row.accrued.to_f64().unwrap(), 90.0 / 360.0, epsilon = 0.01);
    }
}

#[test]
fn test_fixed_accrued_example() {
    let cashflow = FixedAccruedCashflow::new(
        d(2024, 1, 1),
        d(2024, 4, 1),
        Currency::USD,
        dec!(1),
        AccrualBasis::Act360,
    );
    assert_eq!(cashflow.accrued(), dec!(91) / dec!(360));
    assert_relative_eq!(cashflow.accrued().to_f64().unwrap(), 0.252_777, epsilon = 1e-6);
}

#[test]
fn test_pay_fixed_swap_signs() {
    let ctx = context();
    let swap = pay_fixed_swap(&ctx, dec!(100));

    assert_eq!(swap.termination_date(), d(2026, 1, 16));
    assert_eq!(swap.fixed_leg().num_cashflows(), 2);
    assert_eq!(swap.floating_leg().num_cashflows(), 8);
    assert!(swap.fixed_leg().cashflows().iter().all(|cf| cf.notional() == dec!(100)));
    assert!(swap.floating_leg().cashflows().iter().all(|cf| cf.notional() == dec!(-100)));
    assert_eq!(swap.currency(), Currency::USD);
    assert_eq!(swap.long_or_short(), LongOrShort::Long);

    // Two annual fixed periods at +100 against eight quarterly floating at -100
    let net = swap.fixed_leg().portfolio().notional() + swap.floating_leg().portfolio().notional();
    assert_eq!(net, dec!(-600));
}

#[test]
fn test_future_notional() {
    let ctx = context();
    let future = RfrFuture::from_convention_name(
        d(2024, 3, 20),
        "3M".parse().unwrap(),
        "SOFR-3M-FUTURE",
        LongOrShort::Long,
        dec!(2),
        Decimal::ZERO,
        &ctx,
    )
    .unwrap();
    assert_eq!(future.termination_date(), d(2024, 6, 20));
    assert_eq!(future.notional(), dec!(200));
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_every_variant_round_trips() {
    let ctx = context();
    for product in sample_products(&ctx) {
        let record = product.serialize();
        let restored = ctx.deserialize(&record).unwrap();
        assert_eq!(restored, product, "{}", product.product_type());
        assert_eq!(restored.serialize(), record);
    }
}

#[test]
fn test_nested_portfolio_round_trips() {
    let ctx = context();
    let inner = Portfolio::new(sample_products(&ctx), None).unwrap();
    let outer = Portfolio::new(
        vec![inner.into(), pay_fixed_swap(&ctx, dec!(-50)).into()],
        Some(vec![dec!(2), dec!(0.5)]),
    )
    .unwrap();
    let product = Product::from(outer);

    let restored = Product::deserialize(&product.serialize(), &ctx).unwrap();
    assert_eq!(restored, product);
}

#[test]
fn test_large_notional_keeps_every_digit() {
    let ctx = context();
    let notional = dec!(1234567890123456789);
    let bullet = BulletCashflow::new(d(2025, 6, 30), Currency::USD, notional, LongOrShort::Long, None);
    let product = Product::from(bullet);

    let record = product.serialize();
    assert_eq!(record["NOTIONAL"].to_string(), "1234567890123456789");
    let restored = ctx.deserialize(&record).unwrap();
    assert_eq!(restored.notional(), notional);
    assert_eq!(restored, product);
}

#[test]
fn test_fractional_weights_keep_every_digit() {
    let ctx = context();
    let third = dec!(1) / dec!(3);
    let portfolio = Portfolio::new(
        vec![
            pay_fixed_swap(&ctx, dec!(12345678901234567.89)).into(),
            pay_fixed_swap(&ctx, dec!(100)).into(),
        ],
        Some(vec![third, dec!(2) / dec!(3)]),
    )
    .unwrap();
    let product = Product::from(portfolio);

    let text = serde_json::to_string(&product.serialize()).unwrap();
    let record: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text).unwrap();
    let restored = ctx.deserialize(&record).unwrap();
    assert_eq!(restored, product);
    match restored {
        Product::Portfolio(p) => {
            assert_eq!(p.weight(0).unwrap(), third);
            assert_eq!(p.element(0).unwrap().notional(), dec!(12345678901234567.89));
        }
        other => panic!("unexpected product: {}", other.product_type()),
    }
}

#[test]
fn test_unknown_index_in_record() {
    let ctx = context();
    let mut record = Product::from(pay_fixed_swap(&ctx, dec!(100))).serialize();
    record.insert("ON_INDEX".to_string(), "LIBOR".into());

    let err = ctx.deserialize(&record).unwrap_err();
    assert_eq!(
        err,
        ProductError::Market(MarketError::not_found("IndexRegistry", "LIBOR"))
    );
}

#[test]
fn test_runtime_index_registration() {
    let ctx = context();
    let corra = OvernightIndex::new(
        "CORRA",
        Currency::CAD,
        HolidayConvention::None,
        BusinessDayConvention::ModifiedFollowing,
        AccrualBasis::Act365Fixed,
        0,
    );
    ctx.indices().register("CORRA", corra).unwrap();

    let cashflow = OvernightIndexCashflow::new(
        d(2024, 5, 1),
        "1M".parse().unwrap(),
        ctx.index("corra").unwrap(),
        CompoundingMethod::Simple,
        Decimal::ZERO,
        dec!(10),
        None,
    )
    .unwrap();
    let product = Product::from(cashflow);
    assert_eq!(product.currencies().into_iter().collect::<Vec<_>>(), vec![Currency::CAD]);
    assert_eq!(ctx.deserialize(&product.serialize()).unwrap(), product);
}

// =============================================================================
// PORTFOLIOS
// =============================================================================

#[test]
fn test_portfolio_aggregates() {
    let ctx = context();
    let products = sample_products(&ctx);
    let portfolio = Portfolio::new(products.clone(), None).unwrap();

    assert_eq!(portfolio.num_elements(), 5);
    assert_eq!(portfolio.first_date(), d(2024, 1, 1));
    assert_eq!(portfolio.last_date(), d(2026, 1, 16));
    let expected: Decimal = products.iter().map(Product::notional).sum();
    assert_eq!(portfolio.notional(), expected);
    assert_eq!(portfolio.currencies().len(), 3);
    assert_eq!(portfolio.long_or_short().len(), 5);
    assert!(portfolio.element(5).is_err());
    assert!(portfolio.weight(5).is_err());
}

#[test]
fn test_portfolio_rejects_bad_input() {
    assert!(matches!(
        Portfolio::new(Vec::new(), None),
        Err(ProductError::InvariantViolation { .. })
    ));

    let ctx = context();
    let err = Portfolio::new(sample_products(&ctx), Some(vec![dec!(1)])).unwrap_err();
    assert!(matches!(err, ProductError::InvariantViolation { .. }));
}

// =============================================================================
// DISPLAY
// =============================================================================

#[test]
fn test_display_every_variant() {
    let ctx = context();
    for product in sample_products(&ctx) {
        let pairs = display_product(&product).unwrap();
        assert_eq!(pairs[0].0, "TYPE");
        assert_eq!(pairs[0].1, product.product_type());
    }
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[test]
fn test_file_round_trip() {
    let ctx = context();
    let dir = tempdir().unwrap();
    let path = dir.path().join("swap.json");
    let product = Product::from(pay_fixed_swap(&ctx, dec!(25_000_000)));

    write_product_to_file(&product, &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"TYPE\": \"PRODUCT_RFR_SWAP\""));

    let restored = read_product_from_file(&path, &ctx).unwrap();
    assert_eq!(restored, product);
}

#[test]
fn test_read_missing_file() {
    let ctx = context();
    let dir = tempdir().unwrap();
    let err = read_product_from_file(dir.path().join("absent.json"), &ctx).unwrap_err();
    assert!(matches!(err, ProductError::Io { .. }));
}

#[test]
fn test_read_malformed_file() {
    let ctx = context();
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(
        read_product_from_file(&path, &ctx),
        Err(ProductError::Io { .. })
    ));
}
