#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use fuel_composition_toolbox::{
    config, fuel,
    fuel::{FuelComposition, MazutComposition},
    logging,
    report::{self, ReportSection, MAX_DECIMALS},
    units::HeatingValueUnit,
};
use image::GenericImageView;
use std::{fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    let (app_cfg, load_error) = match config::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            eprintln!("Config error: {e}");
            (config::Config::default(), Some(e.to_string()))
        }
    };
    logging::init(&app_cfg.log_level);
    if let Some(err) = &load_error {
        tracing::warn!(%err, "config load failed, using defaults");
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([760.0, 720.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Fuel Composition Toolbox",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, load_error))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// (라벨, 도움말) 입력 필드 정의. 순서는 `from_fields` 순서와 같다.
const SOLID_FIELDS: [(&str, &str); 7] = [
    ("H^P, %", "Hydrogen, working mass"),
    ("C^P, %", "Carbon, working mass"),
    ("S^P, %", "Sulfur, working mass"),
    ("N^P, %", "Nitrogen, working mass"),
    ("O^P, %", "Oxygen, working mass"),
    ("W^P, %", "Moisture, working mass"),
    ("A^P, %", "Ash, working mass"),
];

const OIL_FIELDS: [(&str, &str); 8] = [
    ("Carbon C^Г, %", "Carbon, combustible mass"),
    ("Hydrogen H^Г, %", "Hydrogen, combustible mass"),
    ("Oxygen O^Г, %", "Oxygen, combustible mass"),
    ("Sulfur S^Г, %", "Sulfur, combustible mass"),
    ("Vanadium V^Г, mg/kg", "Vanadium content, mg per kg"),
    ("Moisture W^P, %", "Moisture of the working mass"),
    ("Ash A^C, %", "Ash content of the dry mass"),
    ("LHV Q^Г, MJ/kg", "Lower heating value of the combustible mass"),
];

/// 계산 결과 또는 계산 불가 사유.
type Outcome = Option<Result<Vec<ReportSection>, String>>;

struct GuiApp {
    config: config::Config,
    tab: Tab,
    // 고체 연료
    solid_inputs: [String; 7],
    solid_result: Outcome,
    // 중유
    oil_inputs: [String; 8],
    oil_result: Outcome,
    // 설정
    ui_scale: f32,
    show_settings_modal: bool,
    show_formula_modal: bool,
    settings_status: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    SolidFuel,
    FuelOil,
}

impl GuiApp {
    /// 설정 파일을 읽지 못했으면 설정 창을 열어 두고 저장 시 덮어쓴다는 것을 알린다.
    fn new(config: config::Config, load_error: Option<String>) -> Self {
        let settings_status = load_error.map(|e| {
            format!(
                "Could not load {}: {e}. Defaults are in use; saving will overwrite the file.",
                config::CONFIG_FILE
            )
        });
        Self {
            config,
            tab: Tab::SolidFuel,
            solid_inputs: Default::default(),
            solid_result: None,
            oil_inputs: Default::default(),
            oil_result: None,
            ui_scale: 1.0,
            show_settings_modal: settings_status.is_some(),
            show_formula_modal: false,
            settings_status,
        }
    }

    fn heating_unit(&self) -> HeatingValueUnit {
        self.config.display.heating_value_unit
    }

    fn calculate_solid(&mut self) {
        let fields = self.solid_inputs.each_ref().map(|s| s.as_str());
        let composition = FuelComposition::from_fields(fields);
        let unit = self.heating_unit();
        self.solid_result = Some(
            fuel::try_convert_solid_fuel(&composition)
                .map(|res| report::solid_fuel_report(&res, unit))
                .map_err(|e| e.to_string()),
        );
    }

    fn calculate_oil(&mut self) {
        let fields = self.oil_inputs.each_ref().map(|s| s.as_str());
        let composition = MazutComposition::from_fields(fields);
        let unit = self.heating_unit();
        self.oil_result = Some(
            fuel::try_convert_fuel_oil(&composition)
                .map(|res| report::fuel_oil_report(&res, unit))
                .map_err(|e| e.to_string()),
        );
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Menu");
            ui.add_space(8.0);
        });
        for (tab, label) in [(Tab::SolidFuel, "Solid fuel"), (Tab::FuelOil, "Fuel oil")] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).on_hover_text("Switch calculator").clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_solid_fuel(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(
            ui,
            "Solid fuel composition",
            "Working mass → dry and combustible mass, lower heating value.",
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            input_grid(ui, "solid_grid", &SOLID_FIELDS, &mut self.solid_inputs);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Calculate").clicked() {
                    self.calculate_solid();
                }
                if ui.button("Clear").clicked() {
                    self.solid_inputs = Default::default();
                    self.solid_result = None;
                }
            });
        });
        show_outcome(ui, "solid_result", &self.solid_result, self.config.display.decimals);
    }

    fn ui_fuel_oil(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(
            ui,
            "Fuel oil composition",
            "Combustible mass → working mass, working lower heating value.",
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(egui::RichText::new("Combustible mass composition").strong());
            input_grid(ui, "oil_comp_grid", &OIL_FIELDS[..5], &mut self.oil_inputs[..5]);
            ui.add_space(6.0);
            ui.label(egui::RichText::new("Additional parameters").strong());
            input_grid(ui, "oil_extra_grid", &OIL_FIELDS[5..], &mut self.oil_inputs[5..]);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Calculate").clicked() {
                    self.calculate_oil();
                }
                if ui.button("Clear").clicked() {
                    self.oil_inputs = Default::default();
                    self.oil_result = None;
                }
            });
        });
        show_outcome(ui, "oil_result", &self.oil_result, self.config.display.decimals);
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        egui::Window::new("Settings")
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Decimal places");
                ui.add(egui::Slider::new(&mut self.config.display.decimals, 0..=MAX_DECIMALS));
                ui.separator();
                ui.label("Heating value unit");
                egui::ComboBox::from_id_source("heating_unit")
                    .selected_text(self.config.display.heating_value_unit.symbol())
                    .show_ui(ui, |ui| {
                        for unit in HeatingValueUnit::ALL {
                            ui.selectable_value(
                                &mut self.config.display.heating_value_unit,
                                unit,
                                unit.symbol(),
                            );
                        }
                    });
                ui.separator();
                ui.label("UI scale");
                let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                if ui.add(scale_slider).changed() {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.separator();
                if ui.button("Save settings").clicked() {
                    self.settings_status = Some(match self.config.save() {
                        Ok(()) => "Saved.".to_string(),
                        Err(e) => format!("Save error: {e}"),
                    });
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        self.show_settings_modal = open;
    }
}

fn input_grid(ui: &mut egui::Ui, id: &str, fields: &[(&str, &str)], values: &mut [String]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for ((label, tip), value) in fields.iter().zip(values.iter_mut()) {
                label_with_tip(ui, label, tip);
                ui.add(egui::TextEdit::singleline(value).desired_width(140.0));
                ui.end_row();
            }
        });
}

fn show_outcome(ui: &mut egui::Ui, id: &str, outcome: &Outcome, decimals: usize) {
    let Some(outcome) = outcome else {
        return;
    };
    ui.add_space(10.0);
    match outcome {
        Ok(sections) => {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.heading("Results");
                for (i, section) in sections.iter().enumerate() {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(format!("{}:", section.title)).strong());
                    egui::Grid::new((id, i))
                        .num_columns(2)
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            for row in &section.rows {
                                ui.label(&row.label);
                                ui.label(row.display(decimals));
                                ui.end_row();
                            }
                        });
                }
            });
        }
        Err(msg) => {
            let color = ui.visuals().error_fg_color;
            ui.colored_label(color, format!("Error: {msg}"));
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Fuel Composition Toolbox");
                ui.separator();
                if ui.button("Formula reference").clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button("Settings").clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_formula_modal {
            egui::Window::new("Formula reference")
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.heading("Solid fuel (working mass input)");
                    ui.label("K^PC = 100 / (100 - W^P),  K^PГ = 100 / (100 - W^P - A^P)");
                    ui.label("X^C = X^P · K^PC (H, C, S, N, O, A)");
                    ui.label("X^Г = X^P · K^PГ (H, C, S, N, O)");
                    ui.label("Q^P = (339·C + 1030·H - 108.8·(O - S) - 25·W) / 1000  [MJ/kg]");
                    ui.label("Q^C = (Q^P + 0.025·W) · K^PC,  Q^Г = (Q^P + 0.025·W) · K^PГ");
                    ui.separator();
                    ui.heading("Fuel oil (combustible mass input)");
                    ui.label("X^P = X^Г · (100 - W - A^C) / 100 (C, H, O, S)");
                    ui.label("V^P = V^Г · (100 - W) / 100,  A^P = A^C · (100 - W) / 100");
                    ui.label("Q^P = Q^Г · (100 - W - A^C) / 100 - 0.025·W");
                });
        }

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(120.0)
            .default_width(160.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::SolidFuel => self.ui_solid_fuel(ui),
                    Tab::FuelOil => self.ui_fuel_oil(ui),
                });
        });
    }
}
