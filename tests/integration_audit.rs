//! Integration tests for the region table and savings calculator.

mod common;

use std::sync::Arc;
use std::thread;

use solar_audit::AuditError;
use solar_audit::calc::audit::{
    annual_consumption_kwh, installed_power_kwp, panel_count, required_power_kwp,
};

#[test]
fn every_region_has_positive_parameters() {
    let calc = common::chile_calculator();
    for r in calc.regions().iter() {
        let found = calc.lookup_region(r.id()).expect("listed region should resolve");
        assert!(found.generation_factor() > 0.0);
        assert!(found.price_kwh() > 0.0);
    }
}

#[test]
fn absent_ids_are_not_found() {
    let calc = common::chile_calculator();
    for id in ["nonexistent-slug", "", "SANTIAGO", "santiago ", "las condes"] {
        assert_eq!(
            calc.lookup_region(id),
            Err(AuditError::UnknownRegion(id.to_string()))
        );
        assert_eq!(
            calc.compute_audit(50_000.0, id),
            Err(AuditError::UnknownRegion(id.to_string()))
        );
    }
}

#[test]
fn installed_power_never_undersizes() {
    let calc = common::chile_calculator();
    let constants = calc.constants();
    for r in calc.regions().iter() {
        for bill in common::bill_grid().into_iter().filter(|b| *b > 0.0) {
            let consumption = annual_consumption_kwh(bill, r.price_kwh());
            let required = required_power_kwp(consumption, r.generation_factor(), constants);
            let installed = installed_power_kwp(panel_count(required, constants), constants);
            assert!(
                installed >= required,
                "{} @ {bill}: installed {installed} < required {required}",
                r.id()
            );

            let result = calc.compute_audit(bill, r.id()).expect("known region");
            assert!(result.installed_power_kwp >= result.required_power_kwp);
        }
    }
}

#[test]
fn panel_count_is_minimal() {
    let calc = common::chile_calculator();
    let constants = calc.constants();
    for r in calc.regions().iter() {
        for bill in common::bill_grid().into_iter().filter(|b| *b > 0.0) {
            let consumption = annual_consumption_kwh(bill, r.price_kwh());
            let required = required_power_kwp(consumption, r.generation_factor(), constants);
            let panels = panel_count(required, constants);
            assert!(panels >= 1);
            // one panel fewer would fall short
            let fewer = installed_power_kwp(panels - 1, constants);
            assert!(fewer < required, "{} @ {bill}: {panels} panels is not minimal", r.id());
        }
    }
}

#[test]
fn bill_with_solar_never_negative() {
    let calc = common::chile_calculator();
    for r in calc.regions().iter() {
        for bill in common::bill_grid() {
            let result = calc.compute_audit(bill, r.id()).expect("known region");
            assert!(result.monthly_bill_with_solar >= 0);
        }
    }
}

#[test]
fn payback_sentinel_iff_no_savings() {
    let calc = common::chile_calculator();
    for bill in [0.0, -1.0, -80_000.0] {
        let result = calc.compute_audit(bill, "santiago").expect("known region");
        assert!(result.annual_savings <= 0);
        assert_eq!(result.payback_years, 999.0);
    }
    let result = calc.compute_audit(80_000.0, "santiago").expect("known region");
    assert!(result.payback_years < 999.0);
}

#[test]
fn reference_scenario_end_to_end() {
    let calc = common::reference_calculator();
    let r = calc.compute_audit(80_000.0, "reference").expect("reference region");
    assert_eq!(r.annual_consumption_kwh, 5818);
    assert!((r.required_power_kwp - 4.28).abs() < 1e-9);
    assert_eq!(r.panel_count, 8);
    assert_eq!(r.installation_cost, 4_180_000);
    assert!((r.payback_years - 4.2).abs() < 1e-9);
}

#[test]
fn zero_bill_boundary() {
    let calc = common::reference_calculator();
    let r = calc.compute_audit(0.0, "reference").expect("reference region");
    assert_eq!(r.annual_consumption_kwh, 0);
    assert_eq!(r.required_power_kwp, 0.0);
    assert_eq!(r.panel_count, 0);
    assert_eq!(r.annual_savings, 0);
    assert_eq!(r.payback_years, 999.0);
    assert_eq!(r.monthly_bill_with_solar, 0);
}

#[test]
fn sunnier_region_needs_fewer_panels() {
    let calc = common::chile_calculator();
    let calama = calc.compute_audit(200_000.0, "calama").expect("calama");
    let puerto_montt = calc.compute_audit(200_000.0, "puerto-montt").expect("puerto-montt");
    assert!(calama.panel_count < puerto_montt.panel_count);
    assert!(calama.payback_years < puerto_montt.payback_years);
}

#[test]
fn identical_inputs_give_identical_results() {
    let calc = common::chile_calculator();
    let a = calc.compute_audit(123_456.0, "la-serena").expect("la-serena");
    let b = calc.compute_audit(123_456.0, "la-serena").expect("la-serena");
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_vec(&a).expect("serializable"),
        serde_json::to_vec(&b).expect("serializable")
    );
}

#[test]
fn concurrent_callers_share_one_calculator() {
    let calc = Arc::new(common::chile_calculator());
    let expected = calc.compute_audit(150_000.0, "calama").expect("calama");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let calc = Arc::clone(&calc);
            thread::spawn(move || calc.compute_audit(150_000.0, "calama"))
        })
        .collect();

    for h in handles {
        let got = h.join().expect("worker should not panic");
        assert_eq!(got.as_ref(), Ok(&expected));
    }
}
