#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release
#![expect(rustdoc::missing_crate_level_docs)] // it's an example

use eframe::egui;
use egui_calendar::{CalendarInput, NaiveDate, format_date};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "egui_calendar demo",
        options,
        Box::new(|_cc| Ok(Box::<MyApp>::default())),
    )
}

#[derive(Default)]
struct MyApp {
    departure: Option<NaiveDate>,
    arrival: Option<NaiveDate>,
}

impl eframe::App for MyApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.heading("Trip planner");
            ui.add_space(8.0);

            ui.add(
                CalendarInput::new()
                    .id_salt("departure")
                    .label("Departure")
                    .on_change(|date| {
                        log::info!("Departure set to {date}");
                        self.departure = Some(date);
                    }),
            );

            ui.add_space(8.0);

            ui.add(
                CalendarInput::new()
                    .id_salt("arrival")
                    .label("Arrival")
                    .initial_date(NaiveDate::from_ymd_opt(2024, 12, 24))
                    .on_change(|date| {
                        log::info!("Arrival set to {date}");
                        self.arrival = Some(date);
                    }),
            );

            ui.add_space(16.0);
            ui.separator();
            ui.label(format!("Departure: {}", format_date(self.departure)));
            ui.label(format!("Arrival: {}", format_date(self.arrival)));
        });
    }
}
