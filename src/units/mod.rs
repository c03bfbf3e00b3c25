//! 단위 정의 및 변환 모듈 모음.

pub mod heating_value;

pub use heating_value::{convert_heating_value, HeatingValueUnit};
