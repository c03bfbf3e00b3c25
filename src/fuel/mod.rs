//! 연료 조성 환산 계산 모듈 모음.
//! 고체 연료(작업→건조/가연 질량)와 중유(가연→작업 질량) 환산으로 구성한다.

pub mod component;
pub mod fuel_oil;
pub mod solid_fuel;

pub use component::{Composition, Element, MassBasis};
pub use fuel_oil::{convert_fuel_oil, try_convert_fuel_oil, MazutComposition, MazutResults};
pub use solid_fuel::{
    convert_solid_fuel, try_convert_solid_fuel, CalculationResults, FuelComposition,
};

use thiserror::Error;

/// 환산 기준 분모가 0 이하라 결과가 정의되지 않을 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuelCalcError {
    /// 수분(+회분) 합이 100% 이상이라 환산 계수를 정의할 수 없음
    #[error("{basis} 환산 분모가 0 이하입니다 (분모={denominator})")]
    UndefinedRatio { basis: MassBasis, denominator: f64 },
}

/// 환산 분모가 양수인지 확인한다.
pub(crate) fn ensure_positive(basis: MassBasis, denominator: f64) -> Result<(), FuelCalcError> {
    // NaN 입력도 여기서 걸러진다
    if denominator > 0.0 {
        Ok(())
    } else {
        tracing::warn!(%basis, denominator, "undefined mass basis ratio");
        Err(FuelCalcError::UndefinedRatio { basis, denominator })
    }
}
