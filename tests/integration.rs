//! Integration tests for the salary conversion engine.
//!
//! This test suite covers:
//! - Gross → net scenarios across regions, dependents and insurance modes
//! - Net → gross solving and round trips
//! - Report JSON shape and audit trace
//! - Loading the policy table from YAML
//! - Parsing and formatting user-facing amounts
//! - Properties of the conversion functions

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use vn_salary_engine::calculation::{
    SOCIAL_HEALTH_BASE_CAPPED, UNEMPLOYMENT_BASE_CAPPED, compute_tax, convert,
    convert_gross_to_net, convert_net_to_gross, gross_to_net, net_to_gross,
};
use vn_salary_engine::config::{ConfigLoader, PolicyTable};
use vn_salary_engine::error::EngineError;
use vn_salary_engine::format::{format_vnd, parse_dependents, parse_positive_amount};
use vn_salary_engine::models::{
    ConversionDirection, ConversionInput, ConversionReport, InsuranceBasis, Region,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn load_policy() -> PolicyTable {
    ConfigLoader::load("./config/vn_2026")
        .expect("Failed to load config")
        .into_table()
}

fn create_input(amount: &str, basis: InsuranceBasis, dependents: u32, region: Region) -> ConversionInput {
    ConversionInput {
        amount: decimal(amount),
        insurance_basis: basis,
        dependents,
        region,
    }
}

fn input_from_json(body: Value) -> ConversionInput {
    serde_json::from_value(body).expect("Failed to parse input")
}

fn assert_amount(report: &Value, field: &str, expected: &str) {
    let actual = report["result"][field].as_str().unwrap();
    let actual_normalized = decimal(actual).normalize().to_string();
    let expected_normalized = decimal(expected).normalize().to_string();
    assert_eq!(
        actual_normalized, expected_normalized,
        "Expected {} {}, got {}",
        field, expected_normalized, actual_normalized
    );
}

// =============================================================================
// SECTION 1: Gross to Net
// =============================================================================

#[test]
fn test_gross_20m_region_one_no_dependents() {
    let policy = load_policy();
    let gross = decimal("20000000");
    let result = gross_to_net(&policy, gross, gross, 0, Region::One).unwrap();

    assert_eq!(result.mandatory_insurance, decimal("2100000"));
    assert_eq!(result.taxable_income, decimal("2400000"));
    assert_eq!(result.pit_amount, decimal("120000"));
    assert_eq!(result.net_salary, decimal("17780000"));
}

#[test]
fn test_gross_with_one_dependent() {
    let policy = load_policy();
    let gross = decimal("40000000");
    let result = gross_to_net(&policy, gross, gross, 1, Region::One).unwrap();

    // 40M - 4.2M insurance - 21.7M deductions = 14.1M taxable
    assert_eq!(result.mandatory_insurance, decimal("4200000"));
    assert_eq!(result.taxable_income, decimal("14100000"));
    assert_eq!(result.pit_amount, decimal("910000"));
    assert_eq!(result.net_salary, decimal("34890000"));
}

#[test]
fn test_gross_between_caps_region_four() {
    let policy = load_policy();
    let gross = decimal("60000000");
    let result = gross_to_net(&policy, gross, gross, 0, Region::Four).unwrap();

    // Social/health capped at 46.8M, unemployment uncapped (74M cap)
    assert_eq!(result.social_health_contribution, decimal("4446000"));
    assert_eq!(result.unemployment_contribution, decimal("600000"));
    assert_eq!(result.taxable_income, decimal("39454000"));
    assert_eq!(result.pit_amount, decimal("4390800"));
    assert_eq!(result.net_salary, decimal("50563200"));
}

#[test]
fn test_whole_dong_rounding_keeps_invariants() {
    let policy = load_policy();
    let gross = decimal("12345679");
    let result = gross_to_net(&policy, gross, gross, 0, Region::Three).unwrap();
    let whole = result.to_whole_dong();

    for amount in [
        whole.net_salary,
        whole.mandatory_insurance,
        whole.pit_amount,
        whole.taxable_income,
    ] {
        assert_eq!(amount.fract(), Decimal::ZERO);
    }
    assert_eq!(
        whole.gross_salary,
        whole.net_salary + whole.mandatory_insurance + whole.pit_amount
    );
    assert!((whole.net_salary - result.net_salary).abs() <= Decimal::ONE);
}

// =============================================================================
// SECTION 2: Net to Gross
// =============================================================================

#[test]
fn test_net_17_78m_recovers_20m() {
    let policy = load_policy();
    let outcome = net_to_gross(
        &policy,
        decimal("17780000"),
        InsuranceBasis::SameAsGross,
        0,
        Region::One,
    )
    .unwrap();

    assert!(outcome.converged);
    assert!(
        (outcome.gross_salary - decimal("20000000")).abs() <= Decimal::ONE,
        "Expected gross near 20000000, got {}",
        outcome.gross_salary
    );
}

#[test]
fn test_net_to_gross_with_custom_base() {
    let policy = load_policy();
    let outcome = net_to_gross(
        &policy,
        decimal("28548205"),
        InsuranceBasis::Custom(decimal("5310000")),
        0,
        Region::One,
    )
    .unwrap();

    assert!(outcome.converged);
    assert_eq!(outcome.gross_salary, decimal("30000000"));
    assert_eq!(outcome.details.mandatory_insurance, decimal("557550"));
}

#[test]
fn test_net_to_gross_every_region() {
    let policy = load_policy();

    for region in Region::ALL {
        let gross = decimal("120000000");
        let forward = gross_to_net(&policy, gross, gross, 1, region).unwrap();
        let outcome = net_to_gross(
            &policy,
            forward.net_salary,
            InsuranceBasis::SameAsGross,
            1,
            region,
        )
        .unwrap();

        assert!(outcome.converged, "region {} did not converge", region);
        assert!(
            (outcome.gross_salary - gross).abs() <= Decimal::TWO,
            "region {}: expected gross near {}, got {}",
            region,
            gross,
            outcome.gross_salary
        );
    }
}

#[test]
fn test_round_trip_gross_stays_within_two_dong() {
    let policy = load_policy();
    let gross = decimal("89889040");

    for region in Region::ALL {
        for dependents in 0..3 {
            let forward = gross_to_net(&policy, gross, gross, dependents, region).unwrap();
            let outcome = net_to_gross(
                &policy,
                forward.net_salary,
                InsuranceBasis::SameAsGross,
                dependents,
                region,
            )
            .unwrap();

            assert!(outcome.converged);
            assert!((outcome.details.net_salary - forward.net_salary).abs() <= Decimal::ONE);
            assert!(
                (outcome.gross_salary - gross).abs() <= Decimal::TWO,
                "region {}, {} dependents: got {}",
                region,
                dependents,
                outcome.gross_salary
            );
        }
    }
}

#[test]
fn test_solver_is_deterministic() {
    let policy = load_policy();
    let solve = || {
        net_to_gross(
            &policy,
            decimal("43210987"),
            InsuranceBasis::SameAsGross,
            2,
            Region::Two,
        )
        .unwrap()
    };

    assert_eq!(solve(), solve());
}

// =============================================================================
// SECTION 3: Reports
// =============================================================================

#[test]
fn test_report_from_json_input() {
    let policy = load_policy();
    let input = input_from_json(json!({
        "amount": "20000000",
        "insurance_basis": { "mode": "same_as_gross" },
        "dependents": 0,
        "region": 1
    }));

    let report = convert(&policy, ConversionDirection::GrossToNet, &input).unwrap();
    let body = serde_json::to_value(&report).unwrap();

    assert_eq!(body["direction"], "gross_to_net");
    assert_eq!(body["policy_code"], "VN-PIT-2026");
    assert!(body.get("solver").is_none());
    assert_amount(&body, "net_salary", "17780000");
    assert_amount(&body, "pit_amount", "120000");
    assert_eq!(body["audit_trace"]["steps"].as_array().unwrap().len(), 5);
}

#[test]
fn test_net_to_gross_report_json() {
    let policy = load_policy();
    let input = input_from_json(json!({
        "amount": "17780000",
        "region": 1
    }));

    let report = convert_net_to_gross(&policy, &input).unwrap();
    let body = serde_json::to_value(&report).unwrap();

    assert_eq!(body["direction"], "net_to_gross");
    assert_eq!(body["solver"]["converged"], true);
    assert_eq!(body["audit_trace"]["steps"][0]["rule_id"], "net_to_gross_solver");

    let reparsed: ConversionReport = serde_json::from_value(body).unwrap();
    assert_eq!(reparsed, report);
}

#[test]
fn test_report_warns_on_capped_base() {
    let policy = load_policy();
    let input = create_input("200000000", InsuranceBasis::SameAsGross, 0, Region::One);
    let report = convert_gross_to_net(&policy, &input).unwrap();

    assert!(report.audit_trace.has_warning(SOCIAL_HEALTH_BASE_CAPPED));
    assert!(report.audit_trace.has_warning(UNEMPLOYMENT_BASE_CAPPED));
    assert!(
        report
            .audit_trace
            .warnings
            .iter()
            .all(|w| w.severity == "low")
    );
}

#[test]
fn test_report_rejects_invalid_input() {
    let policy = load_policy();
    let input = create_input("0", InsuranceBasis::SameAsGross, 0, Region::One);

    match convert_net_to_gross(&policy, &input) {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "amount"),
        other => panic!("Expected InvalidInput error, got {:?}", other),
    }
}

#[test]
fn test_oversized_net_amount_is_rejected() {
    let policy = load_policy();
    let input = input_from_json(json!({
        "amount": "79228162514264337593543950335",
        "region": 1
    }));

    match convert_net_to_gross(&policy, &input) {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "target_net"),
        other => panic!("Expected InvalidInput error, got {:?}", other),
    }
}

#[test]
fn test_unknown_region_in_json_is_rejected() {
    let result: Result<ConversionInput, _> = serde_json::from_value(json!({
        "amount": "20000000",
        "region": 5
    }));

    let err = result.unwrap_err().to_string();
    assert!(err.contains("Invalid region"), "unexpected error: {}", err);
}

// =============================================================================
// SECTION 4: Configuration
// =============================================================================

#[test]
fn test_loaded_policy_matches_builtin() {
    assert_eq!(load_policy(), PolicyTable::statutory());
}

#[test]
fn test_missing_config_directory() {
    match ConfigLoader::load("./config/does_not_exist") {
        Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("policy.yaml")),
        other => panic!("Expected ConfigNotFound error, got {:?}", other),
    }
}

// =============================================================================
// SECTION 5: Parsing and Formatting
// =============================================================================

#[test]
fn test_parse_convert_and_format() {
    let policy = load_policy();
    let gross = parse_positive_amount("amount", " 20.000.000 ").unwrap();
    let dependents = parse_dependents("").unwrap();

    let result = gross_to_net(&policy, gross, gross, dependents, Region::One).unwrap();

    assert_eq!(format_vnd(result.net_salary), "17.780.000 ₫");
    assert_eq!(format_vnd(result.pit_amount), "120.000 ₫");
    assert_eq!(format_vnd(result.taxable_income_for_display()), "2.400.000 ₫");
}

#[test]
fn test_parse_rejects_zero_and_text() {
    assert!(matches!(
        parse_positive_amount("amount", "0"),
        Err(EngineError::InvalidInput { .. })
    ));
    assert!(matches!(
        parse_positive_amount("amount", "20,000,000"),
        Err(EngineError::InvalidInput { .. })
    ));
    assert!(matches!(
        parse_dependents("-1"),
        Err(EngineError::InvalidInput { .. })
    ));
}

// =============================================================================
// SECTION 6: Properties
// =============================================================================

fn region_strategy() -> impl Strategy<Value = Region> {
    prop_oneof![
        Just(Region::One),
        Just(Region::Two),
        Just(Region::Three),
        Just(Region::Four),
    ]
}

proptest! {
    #[test]
    fn prop_net_plus_deductions_equals_gross(
        gross in 0u64..500_000_000u64,
        dependents in 0u32..6,
        region in region_strategy(),
    ) {
        let policy = PolicyTable::statutory();
        let gross = Decimal::from(gross);
        let result = gross_to_net(&policy, gross, gross, dependents, region).unwrap();

        prop_assert_eq!(
            result.gross_salary,
            result.net_salary + result.mandatory_insurance + result.pit_amount
        );
        prop_assert_eq!(
            result.mandatory_insurance,
            result.social_health_contribution + result.unemployment_contribution
        );
        prop_assert!(result.pit_amount >= Decimal::ZERO);
    }

    #[test]
    fn prop_net_is_monotonic_in_gross(
        gross in 0u64..400_000_000u64,
        raise in 1u64..10_000_000u64,
        dependents in 0u32..4,
        region in region_strategy(),
    ) {
        let policy = PolicyTable::statutory();
        let low = Decimal::from(gross);
        let high = Decimal::from(gross + raise);

        let low_net = gross_to_net(&policy, low, low, dependents, region).unwrap().net_salary;
        let high_net = gross_to_net(&policy, high, high, dependents, region).unwrap().net_salary;

        prop_assert!(high_net >= low_net);
    }

    #[test]
    fn prop_tax_is_non_decreasing(
        income in -50_000_000i64..300_000_000i64,
        raise in 0u64..5_000_000u64,
    ) {
        let policy = PolicyTable::statutory();
        let low = Decimal::from(income);
        let high = low + Decimal::from(raise);

        prop_assert!(compute_tax(&policy, high) >= compute_tax(&policy, low));
    }

    #[test]
    fn prop_round_trip_with_custom_base(
        gross in 10_000_000u64..200_000_000u64,
        base in 4_000_000u64..50_000_000u64,
        region in region_strategy(),
    ) {
        let policy = PolicyTable::statutory();
        let gross = Decimal::from(gross);
        let basis = InsuranceBasis::Custom(Decimal::from(base));
        let forward = gross_to_net(&policy, gross, basis.resolve(gross), 0, region).unwrap();

        let outcome = net_to_gross(&policy, forward.net_salary, basis, 0, region).unwrap();

        prop_assert!(outcome.converged);
        prop_assert!((outcome.gross_salary - gross).abs() <= Decimal::TWO);
        prop_assert_eq!(outcome.details.insurance_base_used, Decimal::from(base));
    }
}
