// Property-based tests for the tax rule evaluator.
//
// The deduction order is fixed: the 2% invoice deduction comes off the gross
// first, and the 10.21% withholding is computed on the remainder. Every step
// floors to whole yen.

use proptest::prelude::*;

use tierpay::modules::agencies::models::{CompanyType, FiscalProfile};
use tierpay::modules::taxes::services::TaxEvaluator;

fn profile(invoice_registered: bool, company_type: CompanyType) -> FiscalProfile {
    FiscalProfile {
        invoice_registered,
        company_type,
    }
}

fn company_type_from(individual: bool) -> CompanyType {
    if individual {
        CompanyType::Individual
    } else {
        CompanyType::Corporation
    }
}

proptest! {
    #[test]
    fn test_evaluation_is_deterministic(
        gross in 0i64..1_000_000_000i64,
        invoice_registered: bool,
        individual: bool,
    ) {
        let evaluator = TaxEvaluator::new();
        let profile = profile(invoice_registered, company_type_from(individual));

        let first = evaluator.evaluate(gross, &profile).unwrap();
        let second = evaluator.evaluate(gross, &profile).unwrap();

        prop_assert_eq!(first, second, "Evaluation must be deterministic");
    }

    #[test]
    fn test_breakdown_always_balances(
        gross in 0i64..1_000_000_000i64,
        invoice_registered: bool,
        individual: bool,
    ) {
        let breakdown = TaxEvaluator::new()
            .evaluate(gross, &profile(invoice_registered, company_type_from(individual)))
            .unwrap();

        prop_assert_eq!(
            gross,
            breakdown.net_amount + breakdown.invoice_deduction + breakdown.withholding_tax,
            "gross must equal net plus deductions"
        );
    }

    #[test]
    fn test_deductions_are_non_negative_and_net_bounded(
        gross in 0i64..1_000_000_000i64,
        invoice_registered: bool,
        individual: bool,
    ) {
        let breakdown = TaxEvaluator::new()
            .evaluate(gross, &profile(invoice_registered, company_type_from(individual)))
            .unwrap();

        prop_assert!(breakdown.invoice_deduction >= 0);
        prop_assert!(breakdown.withholding_tax >= 0);
        prop_assert!(breakdown.net_amount <= gross);
        prop_assert!(breakdown.net_amount >= 0);
    }

    #[test]
    fn test_registered_corporation_is_untaxed(
        gross in 0i64..1_000_000_000i64,
    ) {
        let breakdown = TaxEvaluator::new()
            .evaluate(gross, &profile(true, CompanyType::Corporation))
            .unwrap();

        prop_assert_eq!(breakdown.invoice_deduction, 0);
        prop_assert_eq!(breakdown.withholding_tax, 0);
        prop_assert_eq!(breakdown.net_amount, gross);
    }

    #[test]
    fn test_withholding_base_shrinks_with_invoice_deduction(
        gross in 1_000i64..1_000_000_000i64,
    ) {
        // The unregistered individual's withholding is computed after the 2%
        // deduction, so it can never exceed the registered individual's.
        let evaluator = TaxEvaluator::new();
        let registered = evaluator
            .evaluate(gross, &profile(true, CompanyType::Individual))
            .unwrap();
        let unregistered = evaluator
            .evaluate(gross, &profile(false, CompanyType::Individual))
            .unwrap();

        prop_assert!(unregistered.withholding_tax <= registered.withholding_tax);
        prop_assert!(unregistered.invoice_deduction > 0);
    }
}

#[test]
fn test_known_deduction_example() {
    // 100,000 gross, unregistered individual:
    //   invoice deduction = floor(100000 * 0.02)        = 2000
    //   withholding       = floor(98000 * 0.1021)        = 10005
    //   net               = 100000 - 2000 - 10005        = 87995
    let breakdown = TaxEvaluator::new()
        .evaluate(100_000, &profile(false, CompanyType::Individual))
        .unwrap();

    assert_eq!(breakdown.invoice_deduction, 2_000);
    assert_eq!(breakdown.withholding_tax, 10_005);
    assert_eq!(breakdown.net_amount, 87_995);
}

#[test]
fn test_floor_applies_per_step_not_at_the_end() {
    // 99,999 gross, unregistered individual:
    //   invoice deduction = floor(99999 * 0.02) = floor(1999.98) = 1999
    //   withholding       = floor(98000 * 0.1021) = 10005
    // A single floor over unrounded intermediates would deduct on 1999.98.
    let breakdown = TaxEvaluator::new()
        .evaluate(99_999, &profile(false, CompanyType::Individual))
        .unwrap();

    assert_eq!(breakdown.invoice_deduction, 1_999);
    assert_eq!(breakdown.withholding_tax, 10_005);
    assert_eq!(breakdown.net_amount, 99_999 - 1_999 - 10_005);
}
