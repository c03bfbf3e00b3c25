//! 연료 조성 환산 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod fuel;
pub mod input;
pub mod logging;
pub mod report;
pub mod ui_cli;
pub mod units;

pub use fuel::{convert_fuel_oil, convert_solid_fuel};
