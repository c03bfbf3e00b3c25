use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::config::{Config, ConfigError, DisplaySettings, CONFIG_FILE};
use crate::fuel::{self, FuelCalcError, FuelComposition, MazutComposition};
use crate::report::{self, ReportSection, MAX_DECIMALS};
use crate::ui_cli::{self, MenuChoice};
use crate::units::HeatingValueUnit;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("계산 오류: {0}")]
    Calc(#[from] FuelCalcError),
    #[error("결과 직렬화 오류: {0}")]
    Report(#[from] toml::ser::Error),
}

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Toml,
}

/// 연료 조성 환산 CLI. 하위 명령이 없으면 대화형 메뉴를 실행한다.
#[derive(Debug, Parser)]
#[command(name = "fuel_composition_toolbox_cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 출력 형식
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// 소수 자릿수 0..=10 (설정값 대신 사용, 저장하지 않음)
    #[arg(long, global = true, value_parser = parse_decimals)]
    pub decimals: Option<usize>,

    /// 발열량 단위: MJ/kg, kJ/kg, kcal/kg, Btu/lb
    #[arg(long, global = true)]
    pub unit: Option<HeatingValueUnit>,
}

impl Cli {
    pub fn overrides(&self) -> DisplayOverrides {
        DisplayOverrides {
            decimals: self.decimals,
            unit: self.unit,
        }
    }
}

fn parse_decimals(s: &str) -> Result<usize, String> {
    let n: usize = s.trim().parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if n > MAX_DECIMALS {
        return Err(format!("0..={MAX_DECIMALS} 범위여야 합니다"));
    }
    Ok(n)
}

/// 명령줄에서 이번 실행에만 적용하는 표시 설정. config.toml에는 저장되지 않는다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayOverrides {
    pub decimals: Option<usize>,
    pub unit: Option<HeatingValueUnit>,
}

impl DisplayOverrides {
    pub fn apply(&self, base: &DisplaySettings) -> DisplaySettings {
        DisplaySettings {
            decimals: self.decimals.unwrap_or(base.decimals),
            heating_value_unit: self.unit.unwrap_or(base.heating_value_unit),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 작업 질량 조성 → 건조/가연 질량 조성과 저위발열량
    Solid(SolidArgs),
    /// 가연 질량 기준 중유 조성 → 작업 질량 조성과 저위발열량
    Oil(OilArgs),
}

/// 숫자가 아닌 값은 0으로 읽는다.
#[derive(Debug, Args)]
pub struct SolidArgs {
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub hp: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub cp: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub sp: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub np: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub op: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub wp: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ap: String,
}

impl SolidArgs {
    pub fn composition(&self) -> FuelComposition {
        FuelComposition::from_fields([
            self.hp.as_str(),
            self.cp.as_str(),
            self.sp.as_str(),
            self.np.as_str(),
            self.op.as_str(),
            self.wp.as_str(),
            self.ap.as_str(),
        ])
    }
}

#[derive(Debug, Args)]
pub struct OilArgs {
    /// C^Г [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub carbon: String,
    /// H^Г [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub hydrogen: String,
    /// O^Г [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub oxygen: String,
    /// S^Г [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub sulfur: String,
    /// V^Г [mg/kg]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub vanadium: String,
    /// 작업 질량 수분 [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub moisture: String,
    /// 건조 질량 회분 [%]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ash_dry: String,
    /// 가연 질량 저위발열량 [MJ/kg]
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub heating_value: String,
}

impl OilArgs {
    pub fn composition(&self) -> MazutComposition {
        MazutComposition::from_fields([
            self.carbon.as_str(),
            self.hydrogen.as_str(),
            self.oxygen.as_str(),
            self.sulfur.as_str(),
            self.vanadium.as_str(),
            self.moisture.as_str(),
            self.ash_dry.as_str(),
            self.heating_value.as_str(),
        ])
    }
}

/// 결과 구역을 요청한 형식의 문자열로 만든다.
pub fn render(
    sections: &[ReportSection],
    format: OutputFormat,
    decimals: usize,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(report::render_text(sections, decimals)),
        OutputFormat::Toml => Ok(report::render_toml(sections)?),
    }
}

/// 명령줄 인자에 따라 한 번 계산하거나 대화형 메뉴를 실행한다.
pub fn run(cli: Cli, config: &mut Config) -> Result<(), AppError> {
    let overrides = cli.overrides();
    match cli.command {
        Some(command) => {
            let display = overrides.apply(&config.display);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_command(&command, cli.format, &display, &mut out)
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(
                &mut stdin.lock(),
                &mut stdout.lock(),
                config,
                overrides,
                Path::new(CONFIG_FILE),
            )
        }
    }
}

/// 하위 명령 하나를 실행하고 결과를 출력한다.
pub fn run_command<W: Write>(
    command: &Command,
    format: OutputFormat,
    display: &DisplaySettings,
    out: &mut W,
) -> Result<(), AppError> {
    let unit = display.heating_value_unit;
    let sections = match command {
        Command::Solid(args) => {
            let results = fuel::try_convert_solid_fuel(&args.composition())?;
            report::solid_fuel_report(&results, unit)
        }
        Command::Oil(args) => {
            let results = fuel::try_convert_fuel_oil(&args.composition())?;
            report::fuel_oil_report(&results, unit)
        }
    };
    let text = render(&sections, format, display.decimals)?;
    write!(out, "{text}")?;
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 설정 메뉴는 저장된 설정만 고쳐 `config_path`에 쓰고, 그 뒤로는 덮어쓰기를 해제한다.
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &mut Config,
    mut overrides: DisplayOverrides,
    config_path: &Path,
) -> Result<(), AppError> {
    loop {
        let display = overrides.apply(&config.display);
        match ui_cli::main_menu(input, out)? {
            MenuChoice::SolidFuel => ui_cli::handle_solid_fuel(input, out, &display)?,
            MenuChoice::FuelOil => ui_cli::handle_fuel_oil(input, out, &display)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(input, out, &mut config.display)?;
                config.save_to(config_path)?;
                overrides = DisplayOverrides::default();
            }
            MenuChoice::Exit => {
                writeln!(out, "종료합니다.")?;
                break;
            }
        }
    }
    Ok(())
}
