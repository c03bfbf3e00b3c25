use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 발열량 단위. 내부 기준은 kJ/kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatingValueUnit {
    MjPerKg,
    KjPerKg,
    KcalPerKg,
    BtuPerPound,
}

impl HeatingValueUnit {
    pub const ALL: [HeatingValueUnit; 4] = [
        HeatingValueUnit::MjPerKg,
        HeatingValueUnit::KjPerKg,
        HeatingValueUnit::KcalPerKg,
        HeatingValueUnit::BtuPerPound,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            HeatingValueUnit::MjPerKg => "MJ/kg",
            HeatingValueUnit::KjPerKg => "kJ/kg",
            HeatingValueUnit::KcalPerKg => "kcal/kg",
            HeatingValueUnit::BtuPerPound => "Btu/lb",
        }
    }
}

impl fmt::Display for HeatingValueUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for HeatingValueUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mj/kg" | "mj" => Ok(HeatingValueUnit::MjPerKg),
            "kj/kg" | "kj" => Ok(HeatingValueUnit::KjPerKg),
            "kcal/kg" | "kcal" => Ok(HeatingValueUnit::KcalPerKg),
            "btu/lb" | "btu/lbm" | "btu" => Ok(HeatingValueUnit::BtuPerPound),
            _ => Err(format!("알 수 없는 발열량 단위: {s}")),
        }
    }
}

fn to_base(value: f64, unit: HeatingValueUnit) -> f64 {
    match unit {
        HeatingValueUnit::MjPerKg => value * 1000.0,
        HeatingValueUnit::KjPerKg => value,
        HeatingValueUnit::KcalPerKg => value * 4.184,
        HeatingValueUnit::BtuPerPound => value * 2.326,
    }
}

fn from_base(value: f64, unit: HeatingValueUnit) -> f64 {
    match unit {
        HeatingValueUnit::MjPerKg => value / 1000.0,
        HeatingValueUnit::KjPerKg => value,
        HeatingValueUnit::KcalPerKg => value / 4.184,
        HeatingValueUnit::BtuPerPound => value / 2.326,
    }
}

/// 발열량을 변환한다.
pub fn convert_heating_value(value: f64, from: HeatingValueUnit, to: HeatingValueUnit) -> f64 {
    if from == to {
        return value;
    }
    from_base(to_base(value, from), to)
}
