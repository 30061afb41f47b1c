//! Integration tests for the production-plan pipeline.

mod common;

use std::collections::BTreeSet;

use common::{fuels, plant, reference_request};
use plant_dispatch::config::ModelConfig;
use plant_dispatch::plan::planner::Planner;
use plant_dispatch::plan::types::{DispatchRequest, PlantOutput, PlantType};
use plant_dispatch::request::parse_request;

const TOLERANCE: f64 = 1e-6;

fn total(outputs: &[PlantOutput]) -> f64 {
    outputs.iter().map(|o| o.power).sum()
}

fn power_of(outputs: &[PlantOutput], name: &str) -> f64 {
    outputs
        .iter()
        .find(|o| o.name == name)
        .map(|o| o.power)
        .unwrap_or_else(|| panic!("missing plant {name}"))
}

/// Sum of fossil `pmax` and current wind capacity.
fn available_capacity(request: &DispatchRequest) -> f64 {
    request
        .powerplants
        .iter()
        .map(|p| match p.plant_type {
            PlantType::WindTurbine => p.pmax * request.fuels.wind_pct / 100.0,
            _ => p.pmax,
        })
        .sum()
}

#[test]
fn single_wind_plant_delivers_wind_share() {
    let request = DispatchRequest {
        total_load: 100.0,
        fuels: fuels(60.0),
        powerplants: vec![plant("windpark1", PlantType::WindTurbine, 1.0, 0.0, 100.0)],
    };
    let plan = Planner::default().plan(&request).expect("plan should succeed");
    assert_eq!(
        plan.outputs(),
        [PlantOutput {
            name: "windpark1".to_string(),
            power: 60.0
        }]
    );
}

#[test]
fn wind_dispatches_before_gas() {
    let request = DispatchRequest {
        total_load: 480.0,
        fuels: fuels(60.0),
        powerplants: vec![
            plant("gasfiredbig1", PlantType::GasFired, 0.53, 100.0, 460.0),
            plant("windpark1", PlantType::WindTurbine, 0.0, 0.0, 150.0),
        ],
    };
    let plan = Planner::default().plan(&request).expect("plan should succeed");
    let outputs = plan.outputs();

    assert_eq!(outputs[0].name, "windpark1");
    assert_eq!(outputs[0].power, 90.0);
    assert_eq!(outputs[1].name, "gasfiredbig1");
    assert_eq!(outputs[1].power, 390.0);
}

#[test]
fn reference_payloads_match_expected_plans() {
    let planner = Planner::default();
    for i in 1..=3 {
        let request = parse_request(&common::read_payload(&format!("payload{i}.json")))
            .expect("payload should validate");
        let expected: Vec<PlantOutput> =
            serde_json::from_str(&common::read_payload(&format!("response{i}.json")))
                .expect("response should parse");

        let plan = planner.plan(&request).expect("plan should succeed");
        let outputs = plan.outputs();

        assert_eq!(outputs.len(), expected.len(), "payload{i}");
        for (got, want) in outputs.iter().zip(&expected) {
            assert_eq!(got.name, want.name, "payload{i}");
            assert!(
                (got.power - want.power).abs() < TOLERANCE,
                "payload{i}: {} got {} want {}",
                got.name,
                got.power,
                want.power
            );
        }
        assert!((total(outputs) - request.total_load).abs() < TOLERANCE);
    }
}

#[test]
fn plan_invariants_hold_across_loads_and_wind() {
    let planner = Planner::default();
    for wind_pct in [0.0, 100.0] {
        for load in [0.0, 100.0, 480.0, 910.0, 1200.0, 2000.0] {
            let request = reference_request(load, wind_pct);
            let plan = planner.plan(&request).expect("plan should succeed");
            let outputs = plan.outputs();
            let context = format!("load={load} wind={wind_pct}");

            // One entry per plant, same names
            let got: BTreeSet<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
            let want: BTreeSet<&str> = request.powerplants.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(outputs.len(), request.powerplants.len(), "{context}");
            assert_eq!(got, want, "{context}");

            for spec in &request.powerplants {
                let power = power_of(outputs, &spec.name);
                assert!(power >= 0.0, "{context}: {} negative", spec.name);
                if spec.plant_type == PlantType::WindTurbine {
                    let capacity = spec.pmax * wind_pct / 100.0;
                    assert!(
                        power == 0.0 || (power - capacity).abs() < TOLERANCE,
                        "{context}: wind {} at {power}",
                        spec.name
                    );
                } else if power > 0.0 {
                    assert!(
                        power >= spec.pmin - TOLERANCE && power <= spec.pmax + TOLERANCE,
                        "{context}: {} at {power} outside [{}, {}]",
                        spec.name,
                        spec.pmin,
                        spec.pmax
                    );
                }
            }

            let dispatched = total(outputs);
            assert!(dispatched <= load + TOLERANCE, "{context}: over-delivered");
            let expected = load.min(available_capacity(&request));
            assert!(
                (dispatched - expected).abs() < TOLERANCE,
                "{context}: dispatched {dispatched}, expected {expected}"
            );
        }
    }
}

#[test]
fn zero_load_assigns_zero_everywhere() {
    let plan = Planner::default()
        .plan(&reference_request(0.0, 60.0))
        .expect("plan should succeed");
    assert!(plan.outputs().iter().all(|o| o.power == 0.0));
}

#[test]
fn over_demand_saturates_without_error() {
    let request = reference_request(5000.0, 60.0);
    let plan = Planner::default().plan(&request).expect("plan should succeed");
    let outputs = plan.outputs();

    assert_eq!(power_of(outputs, "windpark1"), 90.0);
    assert_eq!(power_of(outputs, "windpark2"), 21.6);
    assert_eq!(power_of(outputs, "gasfiredbig1"), 460.0);
    assert_eq!(power_of(outputs, "gasfiredbig2"), 460.0);
    assert_eq!(power_of(outputs, "gasfiredsomewhatsmaller"), 210.0);
    assert_eq!(power_of(outputs, "tj1"), 16.0);

    let summary = plan.summary();
    assert!(summary.unmet_load_mw > 3000.0);
    assert_eq!(summary.running_plants, 6);
}

#[test]
fn planning_is_idempotent() {
    let planner = Planner::default();
    let request = reference_request(910.0, 60.0);
    let first = planner.plan(&request).expect("plan should succeed");
    let second = planner.plan(&request).expect("plan should succeed");
    assert_eq!(first, second);
}

#[test]
fn request_order_keeps_payload_sequence() {
    let request = reference_request(480.0, 60.0);
    let plan = Planner::default().plan(&request).expect("plan should succeed");
    let reordered = plan.in_request_order(&request);

    let names: Vec<&str> = reordered.iter().map(|o| o.name.as_str()).collect();
    let payload_names: Vec<&str> = request.powerplants.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, payload_names);
    assert!((total(&reordered) - total(plan.outputs())).abs() < TOLERANCE);
}

#[test]
fn co2_factor_only_moves_cost_not_dispatch() {
    let request = reference_request(480.0, 60.0);
    let standard = Planner::default().plan(&request).expect("plan should succeed");
    let no_co2 = Planner::new(ModelConfig {
        co2_factor: 0.0,
        ..ModelConfig::default()
    })
    .plan(&request)
    .expect("plan should succeed");

    assert_eq!(standard.outputs(), no_co2.outputs());
    assert!(no_co2.summary().hourly_cost_eur < standard.summary().hourly_cost_eur);
}

#[test]
fn fractional_loads_keep_plants_within_limits() {
    let planner = Planner::default();
    for wind_pct in [25.0, 60.0] {
        for k in 0..40 {
            let load = k as f64 * 37.3;
            let request = reference_request(load, wind_pct);
            let plan = planner.plan(&request).expect("plan should succeed");
            let outputs = plan.outputs();
            let context = format!("load={load} wind={wind_pct}");

            for spec in &request.powerplants {
                let power = power_of(outputs, &spec.name);
                if spec.plant_type == PlantType::WindTurbine {
                    let capacity = spec.pmax * wind_pct / 100.0;
                    assert!(
                        power == 0.0 || (power - capacity).abs() < TOLERANCE,
                        "{context}: wind {} at {power}",
                        spec.name
                    );
                } else if power > 0.0 {
                    assert!(
                        power >= spec.pmin && power <= spec.pmax,
                        "{context}: {} at {power} outside [{}, {}]",
                        spec.name,
                        spec.pmin,
                        spec.pmax
                    );
                }
            }

            // Each output is rounded to 2 decimals
            assert!(total(outputs) <= load + 0.05, "{context}: over-delivered");
        }
    }
}
