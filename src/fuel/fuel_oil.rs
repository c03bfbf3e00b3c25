use serde::{Deserialize, Serialize};
use tracing::debug;

use super::component::{Composition, Element, MassBasis};
use super::{ensure_positive, FuelCalcError};
use crate::input::parse_or_zero;

/// 가연 질량 기준으로 주어진 중유(마주트) 조성.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazutComposition {
    /// 탄소 C^Г [%]
    pub carbon_combustible: f64,
    /// 수소 H^Г [%]
    pub hydrogen_combustible: f64,
    /// 산소 O^Г [%]
    pub oxygen_combustible: f64,
    /// 황 S^Г [%]
    pub sulfur_combustible: f64,
    /// 바나듐 V^Г [mg/kg]
    pub vanadium_combustible: f64,
    /// 작업 질량 수분 [%]
    pub moisture_content: f64,
    /// 건조 질량 회분 [%]
    pub ash_dry: f64,
    /// 가연 질량 저위발열량 [MJ/kg]
    pub heating_value_combustible: f64,
}

impl MazutComposition {
    /// 입력 필드 순서(C, H, O, S, V, 수분, 회분, 발열량)대로 조성을 만든다.
    pub fn from_fields(fields: [&str; 8]) -> Self {
        let [c, h, o, s, v, w, a, q] = fields.map(parse_or_zero);
        Self {
            carbon_combustible: c,
            hydrogen_combustible: h,
            oxygen_combustible: o,
            sulfur_combustible: s,
            vanadium_combustible: v,
            moisture_content: w,
            ash_dry: a,
            heating_value_combustible: q,
        }
    }
}

/// 중유 작업 질량 환산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazutResults {
    /// 작업 질량 조성(C, H, O, S, V, A). V만 mg/kg, 나머지는 %.
    pub working_composition: Composition,
    /// 작업 질량 저위발열량 [MJ/kg]
    pub working_heating_value: f64,
}

/// 가연→작업 질량 환산 계수: (100 - W - A^C) / 100.
pub fn working_mass_factor(moisture: f64, ash_dry: f64) -> f64 {
    (100.0 - moisture - ash_dry) / 100.0
}

/// 중유 조성을 작업 질량 기준으로 환산한다.
///
/// 바나듐과 회분은 건조 질량 기준 값이므로 수분만 보정한다.
pub fn convert_fuel_oil(c: &MazutComposition) -> MazutResults {
    let factor = working_mass_factor(c.moisture_content, c.ash_dry);

    let working_composition = Composition::new(MassBasis::Working)
        .with(Element::Carbon, c.carbon_combustible * factor)
        .with(Element::Hydrogen, c.hydrogen_combustible * factor)
        .with(Element::Oxygen, c.oxygen_combustible * factor)
        .with(Element::Sulfur, c.sulfur_combustible * factor)
        .with(
            Element::Vanadium,
            c.vanadium_combustible * (100.0 - c.moisture_content) / 100.0,
        )
        .with(Element::Ash, c.ash_dry * (100.0 - c.moisture_content) / 100.0);

    let working_heating_value = c.heating_value_combustible
        * (100.0 - c.moisture_content - c.ash_dry)
        / 100.0
        - 0.025 * c.moisture_content;

    debug!(factor, working_heating_value, "fuel oil converted");

    MazutResults {
        working_composition,
        working_heating_value,
    }
}

/// 환산 분모(100 - W, 100 - W - A^C)가 0 이하이면 오류를 돌려주는 버전.
pub fn try_convert_fuel_oil(c: &MazutComposition) -> Result<MazutResults, FuelCalcError> {
    ensure_positive(MassBasis::Dry, 100.0 - c.moisture_content)?;
    ensure_positive(
        MassBasis::Combustible,
        100.0 - c.moisture_content - c.ash_dry,
    )?;
    Ok(convert_fuel_oil(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn vanadium_and_ash_use_moisture_only_correction() {
        let c = MazutComposition {
            vanadium_combustible: 100.0,
            moisture_content: 10.0,
            ash_dry: 20.0,
            ..Default::default()
        };
        let res = convert_fuel_oil(&c);
        assert_abs_diff_eq!(
            res.working_composition.get(Element::Vanadium).unwrap(),
            90.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            res.working_composition.get(Element::Ash).unwrap(),
            18.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn from_fields_reads_in_screen_order() {
        let c = MazutComposition::from_fields(["85", "11", "0.5", "2", "200", "3", "0.15", "40"]);
        assert_eq!(c.carbon_combustible, 85.0);
        assert_eq!(c.vanadium_combustible, 200.0);
        assert_eq!(c.ash_dry, 0.15);
        assert_eq!(c.heating_value_combustible, 40.0);
    }

    #[test]
    fn try_convert_rejects_full_moisture() {
        let c = MazutComposition {
            moisture_content: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            try_convert_fuel_oil(&c),
            Err(FuelCalcError::UndefinedRatio {
                basis: MassBasis::Dry,
                ..
            })
        ));
    }
}
