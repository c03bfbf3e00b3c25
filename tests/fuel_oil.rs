//! 중유 가연→작업 질량 환산 회귀 테스트.
use fuel_composition_toolbox::fuel::{
    convert_fuel_oil, try_convert_fuel_oil, Element, FuelCalcError, MassBasis, MazutComposition,
};
use fuel_composition_toolbox::report::{fuel_oil_report, Unit};
use fuel_composition_toolbox::units::HeatingValueUnit;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.3e}, tol {tol})"
    );
}

fn reference_mazut() -> MazutComposition {
    MazutComposition {
        carbon_combustible: 85.0,
        hydrogen_combustible: 11.0,
        oxygen_combustible: 0.5,
        sulfur_combustible: 2.0,
        vanadium_combustible: 200.0,
        moisture_content: 3.0,
        ash_dry: 0.15,
        heating_value_combustible: 40.0,
    }
}

#[test]
fn reference_mazut_working_mass() {
    let res = convert_fuel_oil(&reference_mazut());
    let comp = &res.working_composition;
    assert_eq!(comp.basis, MassBasis::Working);
    assert_close("C^P", comp.get(Element::Carbon).unwrap(), 82.3225, 1e-9);
    assert_close("H^P", comp.get(Element::Hydrogen).unwrap(), 11.0 * 0.9685, 1e-9);
    assert_close("O^P", comp.get(Element::Oxygen).unwrap(), 0.5 * 0.9685, 1e-9);
    assert_close("S^P", comp.get(Element::Sulfur).unwrap(), 2.0 * 0.9685, 1e-9);
    assert_close("V^P", comp.get(Element::Vanadium).unwrap(), 194.0, 1e-9);
    assert_close("A^P", comp.get(Element::Ash).unwrap(), 0.1455, 1e-9);
    assert_close("Q^P", res.working_heating_value, 38.665, 1e-9);
}

#[test]
fn working_composition_order_matches_screen() {
    let res = convert_fuel_oil(&reference_mazut());
    let labels: Vec<String> = res.working_composition.labeled().map(|(l, _)| l).collect();
    assert_eq!(labels, ["C^P", "H^P", "O^P", "S^P", "V^P", "A^P"]);
}

#[test]
fn dry_moisture_free_input_passes_through() {
    let input = MazutComposition {
        moisture_content: 0.0,
        ash_dry: 0.0,
        ..reference_mazut()
    };
    let res = convert_fuel_oil(&input);
    assert_eq!(res.working_composition.get(Element::Carbon), Some(85.0));
    assert_eq!(res.working_composition.get(Element::Vanadium), Some(200.0));
    assert_eq!(res.working_heating_value, 40.0);
}

#[test]
fn repeated_conversion_is_identical() {
    let input = reference_mazut();
    assert_eq!(convert_fuel_oil(&input), convert_fuel_oil(&input));
}

#[test]
fn moisture_plus_ash_at_hundred_is_rejected() {
    let input = MazutComposition {
        moisture_content: 60.0,
        ash_dry: 40.0,
        ..reference_mazut()
    };
    // 환산 계수가 0이 되어 작업 질량 값이 모두 0이 된다
    let raw = convert_fuel_oil(&input);
    assert_eq!(raw.working_composition.get(Element::Carbon), Some(0.0));

    match try_convert_fuel_oil(&input) {
        Err(FuelCalcError::UndefinedRatio { basis, denominator }) => {
            assert_eq!(basis, MassBasis::Combustible);
            assert_eq!(denominator, 0.0);
        }
        other => panic!("expected undefined ratio, got {other:?}"),
    }
}

#[test]
fn report_marks_vanadium_in_mg_per_kg() {
    let res = convert_fuel_oil(&reference_mazut());
    let sections = fuel_oil_report(&res, HeatingValueUnit::MjPerKg);
    let rows = &sections[0].rows;
    let vanadium = rows.iter().find(|r| r.label == "V^P").unwrap();
    assert_eq!(vanadium.unit, Unit::MilligramPerKg);
    assert_eq!(vanadium.display(2), "194.00 mg/kg");
    let carbon = rows.iter().find(|r| r.label == "C^P").unwrap();
    assert_eq!(carbon.display(2), "82.32%");
    assert_eq!(sections[1].rows[0].display(2), "38.66 MJ/kg");
}
