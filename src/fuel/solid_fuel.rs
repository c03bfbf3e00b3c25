use serde::{Deserialize, Serialize};
use tracing::debug;

use super::component::{Composition, Element, MassBasis};
use super::{ensure_positive, FuelCalcError};
use crate::input::parse_or_zero;

/// 작업 질량 기준 고체(액체) 연료 조성 [%].
///
/// 합계가 100%가 되는지는 검사하지 않는다. 누락된 값은 0으로 본다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelComposition {
    /// 수소 H^P
    pub hp: f64,
    /// 탄소 C^P
    pub cp: f64,
    /// 황 S^P
    pub sp: f64,
    /// 질소 N^P
    pub np: f64,
    /// 산소 O^P
    pub op: f64,
    /// 수분 W^P
    pub wp: f64,
    /// 회분 A^P
    pub ap: f64,
}

impl FuelComposition {
    /// 입력 필드 순서(H, C, S, N, O, W, A)대로 문자열을 받아 조성을 만든다.
    /// 숫자가 아닌 입력은 0으로 취급한다.
    pub fn from_fields(fields: [&str; 7]) -> Self {
        let [hp, cp, sp, np, op, wp, ap] = fields.map(parse_or_zero);
        Self {
            hp,
            cp,
            sp,
            np,
            op,
            wp,
            ap,
        }
    }
}

/// 고체 연료 환산 결과. 발열량은 MJ/kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    /// 작업→건조 질량 환산 계수 K^PC
    pub dry_mass_coefficient: f64,
    /// 작업→가연 질량 환산 계수 K^PГ
    pub combustible_mass_coefficient: f64,
    /// 건조 질량 조성(H, C, S, N, O, A)
    pub dry_composition: Composition,
    /// 가연 질량 조성(H, C, S, N, O)
    pub combustible_composition: Composition,
    /// 작업 질량 저위발열량 Q^P_H
    pub lower_heating_value: f64,
    /// 건조 질량 저위발열량 Q^C_H
    pub lower_dry_heating_value: f64,
    /// 가연 질량 저위발열량 Q^Г_H
    pub lower_combustible_heating_value: f64,
}

/// 작업→건조 질량 환산 계수: 100 / (100 - W).
pub fn dry_mass_coefficient(wp: f64) -> f64 {
    100.0 / (100.0 - wp)
}

/// 작업→가연 질량 환산 계수: 100 / (100 - W - A).
pub fn combustible_mass_coefficient(wp: f64, ap: f64) -> f64 {
    100.0 / (100.0 - wp - ap)
}

/// 작업 질량 저위발열량 [MJ/kg].
///
/// Q = (339·C + 1030·H - 108.8·(O - S) - 25·W) / 1000
pub fn working_lower_heating_value(c: &FuelComposition) -> f64 {
    (339.0 * c.cp + 1030.0 * c.hp - 108.8 * (c.op - c.sp) - 25.0 * c.wp) / 1000.0
}

/// 작업 질량 조성을 건조/가연 질량으로 환산하고 각 기준의 저위발열량을 계산한다.
///
/// 수분이 100%이면 계수가 무한대가 되는 등 분모가 0인 입력은 IEEE 규칙대로
/// 전파된다. 오류로 받고 싶으면 [`try_convert_solid_fuel`]을 사용한다.
pub fn convert_solid_fuel(c: &FuelComposition) -> CalculationResults {
    let kpc = dry_mass_coefficient(c.wp);
    let kpg = combustible_mass_coefficient(c.wp, c.ap);

    let dry_composition = Composition::new(MassBasis::Dry)
        .with(Element::Hydrogen, c.hp * kpc)
        .with(Element::Carbon, c.cp * kpc)
        .with(Element::Sulfur, c.sp * kpc)
        .with(Element::Nitrogen, c.np * kpc)
        .with(Element::Oxygen, c.op * kpc)
        .with(Element::Ash, c.ap * kpc);

    // 가연 질량에는 회분이 없다
    let combustible_composition = Composition::new(MassBasis::Combustible)
        .with(Element::Hydrogen, c.hp * kpg)
        .with(Element::Carbon, c.cp * kpg)
        .with(Element::Sulfur, c.sp * kpg)
        .with(Element::Nitrogen, c.np * kpg)
        .with(Element::Oxygen, c.op * kpg);

    let qph = working_lower_heating_value(c);
    // 수분 증발 잠열(0.025 MJ/kg per %)을 되돌린 뒤 환산
    let moisture_free = qph + 0.025 * c.wp;
    let qch = moisture_free * kpc;
    let qgh = moisture_free * kpg;

    debug!(kpc, kpg, qph, qch, qgh, "solid fuel converted");

    CalculationResults {
        dry_mass_coefficient: kpc,
        combustible_mass_coefficient: kpg,
        dry_composition,
        combustible_composition,
        lower_heating_value: qph,
        lower_dry_heating_value: qch,
        lower_combustible_heating_value: qgh,
    }
}

/// 환산 분모(100 - W, 100 - W - A)가 0 이하이면 오류를 돌려주는 버전.
pub fn try_convert_solid_fuel(c: &FuelComposition) -> Result<CalculationResults, FuelCalcError> {
    ensure_positive(MassBasis::Dry, 100.0 - c.wp)?;
    ensure_positive(MassBasis::Combustible, 100.0 - c.wp - c.ap)?;
    Ok(convert_solid_fuel(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn from_fields_defaults_garbage_to_zero() {
        let c = FuelComposition::from_fields(["3", "50.5", "x", "", " 1 ", "15,5", "abc"]);
        assert_eq!(c.hp, 3.0);
        assert_eq!(c.cp, 50.5);
        assert_eq!(c.sp, 0.0);
        assert_eq!(c.np, 0.0);
        assert_eq!(c.op, 1.0);
        assert_eq!(c.wp, 15.5);
        assert_eq!(c.ap, 0.0);
    }

    #[test]
    fn heating_value_keeps_oxygen_sulfur_grouping() {
        let c = FuelComposition {
            op: 10.0,
            sp: 1.0,
            ..Default::default()
        };
        assert_abs_diff_eq!(working_lower_heating_value(&c), -0.9792, epsilon = 1e-12);
    }

    #[test]
    fn coefficients_match_closed_form() {
        assert_abs_diff_eq!(dry_mass_coefficient(20.0), 1.25, epsilon = 1e-12);
        assert_abs_diff_eq!(combustible_mass_coefficient(20.0, 30.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn try_convert_rejects_total_above_hundred() {
        let c = FuelComposition {
            wp: 60.0,
            ap: 50.0,
            ..Default::default()
        };
        let err = try_convert_solid_fuel(&c).unwrap_err();
        assert!(matches!(
            err,
            FuelCalcError::UndefinedRatio {
                basis: MassBasis::Combustible,
                ..
            }
        ));
    }
}
