use chrono::NaiveDate;
use egui::{Align, Button, Grid, Layout, RichText, Ui, Vec2};

use crate::{CalendarState, DayCell};

const DAY_SIZE: f32 = 24.0;
const SPACING: f32 = 4.0;

/// Matches the Monday-first grid.
const WEEKDAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub(crate) struct CalendarPopup<'a> {
    pub state: &'a mut CalendarState,
    pub today: NaiveDate,
}

impl CalendarPopup<'_> {
    /// Returns the date if the user picked one this frame.
    pub fn draw(self, ui: &mut Ui) -> Option<NaiveDate> {
        let Self { state, today } = self;

        ui.spacing_mut().item_spacing = Vec2::splat(SPACING);

        ui.horizontal(|ui| {
            if ui.button("⏴").on_hover_text("Previous month").clicked() {
                state.prev_month();
                log::debug!("Calendar moved back to {}", state.displayed);
                ui.ctx().request_repaint();
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("⏵").on_hover_text("Next month").clicked() {
                    state.next_month();
                    log::debug!("Calendar moved on to {}", state.displayed);
                    ui.ctx().request_repaint();
                }
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(state.displayed.title()).strong());
                });
            });
        });

        ui.separator();

        let mut picked = None;
        let cells = state.cells();

        Grid::new("calendar_days")
            .num_columns(WEEKDAY_NAMES.len())
            .min_col_width(DAY_SIZE)
            .spacing(Vec2::splat(SPACING))
            .show(ui, |ui| {
                for name in WEEKDAY_NAMES {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(name).weak());
                    });
                }
                ui.end_row();

                for week in cells.chunks(WEEKDAY_NAMES.len()) {
                    for cell in week {
                        match *cell {
                            DayCell::Empty => {
                                ui.allocate_space(Vec2::splat(DAY_SIZE));
                            }
                            DayCell::Day(day) => {
                                if day_button(ui, state, day, today).clicked() {
                                    picked = state.select_day(day);
                                }
                            }
                        }
                    }
                    ui.end_row();
                }
            });

        picked
    }
}

fn day_button(ui: &mut Ui, state: &CalendarState, day: u32, today: NaiveDate) -> egui::Response {
    let visuals = ui.visuals();
    let (fill, text_color) = if state.is_selected(day) {
        (visuals.selection.bg_fill, visuals.selection.stroke.color)
    } else {
        (
            visuals.extreme_bg_color,
            visuals.widgets.inactive.text_color(),
        )
    };
    let today_stroke = visuals.widgets.inactive.fg_stroke;

    let response = ui.add(
        Button::new(RichText::new(day.to_string()).color(text_color))
            .fill(fill)
            .min_size(Vec2::splat(DAY_SIZE)),
    );

    if state.is_today(day, today) {
        // Encircle today's date
        ui.painter()
            .circle_stroke(response.rect.center(), DAY_SIZE * 0.5, today_stroke);
    }

    response
}
