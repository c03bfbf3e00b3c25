//! 계산 결과를 (라벨, 값, 단위) 행 목록으로 바꿔 CLI/GUI가 같은 순서로 표시하게 한다.

use serde::Serialize;
use std::fmt::Write as _;

use crate::fuel::component::{coefficient_label, label};
use crate::fuel::{CalculationResults, Composition, Element, MassBasis, MazutResults};
use crate::units::{convert_heating_value, HeatingValueUnit};

/// 결과 표시에 쓰는 기본 소수 자릿수.
pub const DEFAULT_DECIMALS: usize = 2;

/// 허용하는 최대 소수 자릿수. CLI 인자, 설정 파일, 설정 메뉴, GUI가 모두 이 값을 쓴다.
pub const MAX_DECIMALS: usize = 10;

/// 결과 행의 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Percent,
    MilligramPerKg,
    HeatingValue(HeatingValueUnit),
    Dimensionless,
}

impl Unit {
    /// 값 뒤에 붙는 접미사. 퍼센트는 공백 없이 붙인다.
    pub fn suffix(&self) -> String {
        match self {
            Unit::Percent => "%".into(),
            Unit::MilligramPerKg => " mg/kg".into(),
            Unit::HeatingValue(u) => format!(" {}", u.symbol()),
            Unit::Dimensionless => String::new(),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::MilligramPerKg => "mg/kg",
            Unit::HeatingValue(u) => u.symbol(),
            Unit::Dimensionless => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: f64,
    pub unit: Unit,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            label: label.into(),
            value,
            unit,
        }
    }

    /// `58.82%`, `194.00 mg/kg`, `18.69 MJ/kg` 형태로 값을 만든다.
    /// 정의되지 않은 값에는 단위를 붙이지 않는다.
    pub fn display(&self, decimals: usize) -> String {
        if self.value.is_finite() {
            format!("{}{}", format_value(self.value, decimals), self.unit.suffix())
        } else {
            format_value(self.value, decimals)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: &str, rows: Vec<ReportRow>) -> Self {
        Self {
            title: title.to_string(),
            rows,
        }
    }
}

/// 고정 소수 자릿수로 값을 쓴다. 무한대/NaN은 `undefined`.
/// 자릿수는 [`MAX_DECIMALS`]에서 잘린다.
pub fn format_value(value: f64, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "undefined".to_string()
    }
}

fn composition_unit(element: Element) -> Unit {
    match element {
        Element::Vanadium => Unit::MilligramPerKg,
        _ => Unit::Percent,
    }
}

fn composition_rows(composition: &Composition) -> Vec<ReportRow> {
    composition
        .iter()
        .map(|(e, v)| ReportRow::new(label(e, composition.basis), v, composition_unit(e)))
        .collect()
}

fn heating_row(title: &str, value_mj_per_kg: f64, unit: HeatingValueUnit) -> ReportRow {
    ReportRow::new(
        title,
        convert_heating_value(value_mj_per_kg, HeatingValueUnit::MjPerKg, unit),
        Unit::HeatingValue(unit),
    )
}

/// 고체 연료 결과를 계수/건조/가연/발열량 네 구역으로 정리한다.
pub fn solid_fuel_report(
    results: &CalculationResults,
    heating_unit: HeatingValueUnit,
) -> Vec<ReportSection> {
    let coefficients = vec![
        ReportRow::new(
            coefficient_label(MassBasis::Working, MassBasis::Dry),
            results.dry_mass_coefficient,
            Unit::Dimensionless,
        ),
        ReportRow::new(
            coefficient_label(MassBasis::Working, MassBasis::Combustible),
            results.combustible_mass_coefficient,
            Unit::Dimensionless,
        ),
    ];
    let heating = vec![
        heating_row("Working mass", results.lower_heating_value, heating_unit),
        heating_row("Dry mass", results.lower_dry_heating_value, heating_unit),
        heating_row(
            "Combustible mass",
            results.lower_combustible_heating_value,
            heating_unit,
        ),
    ];
    vec![
        ReportSection::new("Conversion coefficients", coefficients),
        ReportSection::new("Dry mass", composition_rows(&results.dry_composition)),
        ReportSection::new(
            "Combustible mass",
            composition_rows(&results.combustible_composition),
        ),
        ReportSection::new("Lower heating value", heating),
    ]
}

/// 중유 결과를 작업 질량 조성과 발열량 두 구역으로 정리한다.
pub fn fuel_oil_report(
    results: &MazutResults,
    heating_unit: HeatingValueUnit,
) -> Vec<ReportSection> {
    vec![
        ReportSection::new(
            "Working mass composition",
            composition_rows(&results.working_composition),
        ),
        ReportSection::new(
            "Lower heating value",
            vec![heating_row(
                "Working mass",
                results.working_heating_value,
                heating_unit,
            )],
        ),
    ]
}

/// 구역별로 라벨과 값을 정렬한 텍스트 표를 만든다.
pub fn render_text(sections: &[ReportSection], decimals: usize) -> String {
    let label_width = sections
        .iter()
        .flat_map(|s| s.rows.iter())
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "{}:", section.title);
        for row in &section.rows {
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                row.label,
                row.display(decimals),
                width = label_width
            );
        }
    }
    out
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    sections: Vec<ExportSection<'a>>,
}

#[derive(Serialize)]
struct ExportSection<'a> {
    title: &'a str,
    rows: Vec<ExportRow<'a>>,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    label: &'a str,
    value: f64,
    unit: &'static str,
}

/// 결과 표를 TOML 문서(`[[sections]]`, `[[sections.rows]]`)로 직렬화한다.
/// 값은 반올림하지 않는다.
pub fn render_toml(sections: &[ReportSection]) -> Result<String, toml::ser::Error> {
    let doc = ExportDocument {
        sections: sections
            .iter()
            .map(|s| ExportSection {
                title: &s.title,
                rows: s
                    .rows
                    .iter()
                    .map(|r| ExportRow {
                        label: &r.label,
                        value: r.value,
                        unit: r.unit.symbol(),
                    })
                    .collect(),
            })
            .collect(),
    };
    toml::to_string_pretty(&doc)
}
