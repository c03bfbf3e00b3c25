use std::io::{BufRead, Write};

use crate::app::{render, AppError, OutputFormat};
use crate::config::DisplaySettings;
use crate::fuel::{self, FuelCalcError, FuelComposition, MazutComposition};
use crate::report::{self, MAX_DECIMALS};
use crate::units::HeatingValueUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SolidFuel,
    FuelOil,
    Settings,
    Exit,
}

/// 고체 연료 입력 프롬프트(필드 순서 = FuelComposition::from_fields 순서)
const SOLID_FUEL_PROMPTS: [&str; 7] = [
    "H^P, %: ",
    "C^P, %: ",
    "S^P, %: ",
    "N^P, %: ",
    "O^P, %: ",
    "W^P, %: ",
    "A^P, %: ",
];

const FUEL_OIL_PROMPTS: [&str; 8] = [
    "탄소 C^Г, %: ",
    "수소 H^Г, %: ",
    "산소 O^Г, %: ",
    "황 S^Г, %: ",
    "바나듐 V^Г, mg/kg: ",
    "수분 W^P, %: ",
    "건조 회분 A^C, %: ",
    "가연 질량 저위발열량, MJ/kg: ",
];

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<MenuChoice, AppError> {
    writeln!(out, "\n=== Fuel Composition Toolbox ===")?;
    writeln!(out, "1) 고체 연료 조성 환산")?;
    writeln!(out, "2) 중유 조성 환산")?;
    writeln!(out, "3) 설정")?;
    writeln!(out, "0) 종료")?;
    loop {
        let Some(sel) = read_line(input, out, "메뉴 선택: ")? else {
            return Ok(MenuChoice::Exit);
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::SolidFuel),
            "2" => return Ok(MenuChoice::FuelOil),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => writeln!(out, "잘못된 입력입니다. 다시 선택하세요.")?,
        }
    }
}

/// 고체 연료 메뉴를 처리한다. 숫자가 아닌 입력은 0으로 읽는다.
pub fn handle_solid_fuel<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    display: &DisplaySettings,
) -> Result<(), AppError> {
    writeln!(out, "\n-- 고체 연료 조성 (작업 질량 기준) --")?;
    let fields = read_fields(input, out, SOLID_FUEL_PROMPTS)?;
    let composition = FuelComposition::from_fields(fields.each_ref().map(String::as_str));
    let sections = match fuel::try_convert_solid_fuel(&composition) {
        Ok(results) => report::solid_fuel_report(&results, display.heating_value_unit),
        Err(e) => return print_calc_error(out, &e),
    };
    let text = render(&sections, OutputFormat::Text, display.decimals)?;
    writeln!(out, "\n결과:\n{text}")?;
    Ok(())
}

/// 중유 메뉴를 처리한다.
pub fn handle_fuel_oil<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    display: &DisplaySettings,
) -> Result<(), AppError> {
    writeln!(out, "\n-- 중유 조성 (가연 질량 기준) --")?;
    let fields = read_fields(input, out, FUEL_OIL_PROMPTS)?;
    let composition = MazutComposition::from_fields(fields.each_ref().map(String::as_str));
    let sections = match fuel::try_convert_fuel_oil(&composition) {
        Ok(results) => report::fuel_oil_report(&results, display.heating_value_unit),
        Err(e) => return print_calc_error(out, &e),
    };
    let text = render(&sections, OutputFormat::Text, display.decimals)?;
    writeln!(out, "\n결과:\n{text}")?;
    Ok(())
}

/// 설정 메뉴를 처리한다. 빈 입력은 현재 값을 유지한다.
pub fn handle_settings<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    display: &mut DisplaySettings,
) -> Result<(), AppError> {
    writeln!(out, "\n-- 설정 --")?;
    writeln!(out, "현재 소수 자릿수: {}", display.decimals)?;
    let prompt = format!("새 소수 자릿수 0..={MAX_DECIMALS} (유지하려면 엔터): ");
    let sel = read_line(input, out, &prompt)?.unwrap_or_default();
    if !sel.trim().is_empty() {
        match sel.trim().parse::<usize>() {
            Ok(n) if n <= MAX_DECIMALS => display.decimals = n,
            _ => writeln!(out, "잘못된 입력이므로 변경하지 않습니다.")?,
        }
    }

    writeln!(out, "현재 발열량 단위: {}", display.heating_value_unit.symbol())?;
    for (i, unit) in HeatingValueUnit::ALL.iter().enumerate() {
        write!(out, "{}) {}  ", i + 1, unit.symbol())?;
    }
    writeln!(out)?;
    let sel = read_line(input, out, "변경할 번호(유지하려면 엔터): ")?.unwrap_or_default();
    if !sel.trim().is_empty() {
        let unit = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| HeatingValueUnit::ALL.get(i).copied());
        match unit {
            Some(u) => display.heating_value_unit = u,
            None => writeln!(out, "잘못된 입력이므로 변경하지 않습니다.")?,
        }
    }
    writeln!(
        out,
        "설정: 소수 {}자리, 발열량 {}",
        display.decimals,
        display.heating_value_unit.symbol()
    )?;
    Ok(())
}

fn print_calc_error<W: Write>(out: &mut W, err: &FuelCalcError) -> Result<(), AppError> {
    writeln!(out, "계산할 수 없습니다: {err}")?;
    Ok(())
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 `None`.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// 프롬프트마다 한 줄씩 읽는다. 입력이 끝난 뒤의 필드는 빈 문자열로 둔다.
fn read_fields<R: BufRead, W: Write, const N: usize>(
    input: &mut R,
    out: &mut W,
    prompts: [&str; N],
) -> Result<[String; N], AppError> {
    let mut fields: [String; N] = std::array::from_fn(|_| String::new());
    for (slot, prompt) in fields.iter_mut().zip(prompts) {
        *slot = read_line(input, out, prompt)?.unwrap_or_default();
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_with<F>(script: &str, f: F) -> String
    where
        F: FnOnce(&mut Cursor<Vec<u8>>, &mut Vec<u8>) -> Result<(), AppError>,
    {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        f(&mut input, &mut out).expect("handler");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn menu_retries_until_valid_and_exits_on_eof() {
        let mut input = Cursor::new(b"9\n2\n".to_vec());
        let mut out = Vec::new();
        assert_eq!(main_menu(&mut input, &mut out).unwrap(), MenuChoice::FuelOil);
        assert_eq!(main_menu(&mut input, &mut out).unwrap(), MenuChoice::Exit);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("잘못된 입력입니다"));
    }

    #[test]
    fn solid_fuel_prints_table_and_treats_garbage_as_zero() {
        let display = DisplaySettings::default();
        let text = run_with("3\n50\n1\n1\n10\n15\n20\n", |i, o| handle_solid_fuel(i, o, &display));
        assert!(text.contains("K^PC"), "{text}");
        assert!(text.contains("1.18"), "{text}");
        assert!(text.contains("18.69 MJ/kg"), "{text}");

        let text = run_with("abc\n\n", |i, o| handle_solid_fuel(i, o, &display));
        assert!(text.contains("H^C"), "{text}");
        assert!(text.contains("0.00%"), "{text}");
    }

    #[test]
    fn solid_fuel_reports_undefined_ratio() {
        let display = DisplaySettings::default();
        let text = run_with("0\n0\n0\n0\n0\n100\n0\n", |i, o| handle_solid_fuel(i, o, &display));
        assert!(text.contains("계산할 수 없습니다"), "{text}");
        assert!(!text.contains("K^PC"), "{text}");
    }

    #[test]
    fn fuel_oil_prints_vanadium_in_mg_per_kg() {
        let display = DisplaySettings::default();
        let text = run_with("85\n11\n0.5\n2\n200\n3\n0.15\n40\n", |i, o| {
            handle_fuel_oil(i, o, &display)
        });
        assert!(text.contains("V^P"), "{text}");
        assert!(text.contains("194.00 mg/kg"), "{text}");
        assert!(text.contains("82.32%"), "{text}");
    }

    #[test]
    fn settings_update_decimals_and_unit() {
        let mut display = DisplaySettings::default();
        run_with("3\n3\n", |i, o| handle_settings(i, o, &mut display));
        assert_eq!(display.decimals, 3);
        assert_eq!(display.heating_value_unit, HeatingValueUnit::KcalPerKg);

        run_with("x\n\n", |i, o| handle_settings(i, o, &mut display));
        assert_eq!(display.decimals, 3);
        assert_eq!(display.heating_value_unit, HeatingValueUnit::KcalPerKg);
    }

    #[test]
    fn settings_reject_decimals_above_limit() {
        let mut display = DisplaySettings::default();
        let text = run_with("11\n\n", |i, o| handle_settings(i, o, &mut display));
        assert!(text.contains("변경하지 않습니다"), "{text}");
        assert_eq!(display.decimals, 2);

        run_with("10\n\n", |i, o| handle_settings(i, o, &mut display));
        assert_eq!(display.decimals, MAX_DECIMALS);
    }

    #[test]
    fn menu_answers_parse_like_from_fields() {
        let answers = [" 3 ", "50", "abc", "1", "10", "", "20"];
        let script: String = answers.iter().map(|a| format!("{a}\n")).collect();
        let mut input = Cursor::new(script.into_bytes());
        let mut out = Vec::new();
        let fields = read_fields(&mut input, &mut out, SOLID_FUEL_PROMPTS).unwrap();
        assert_eq!(
            FuelComposition::from_fields(fields.each_ref().map(String::as_str)),
            FuelComposition::from_fields(answers)
        );
    }
}
