use chrono::NaiveDate;
use egui::{Area, Button, Context, Frame, Id, InnerResponse, Order, RichText, Ui, Widget, WidgetText};

use super::popup::CalendarPopup;
use crate::CalendarState;

/// Earliest and latest date a calendar is meant to offer.
///
/// These are carried along for the host to read back, but navigation and
/// selection do not enforce them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DateBounds {
    pub min: Option<NaiveDate>,
    pub max: Option<NaiveDate>,
}

/// A labeled input showing the picked date, which toggles a month calendar popup when clicked.
///
/// The popup closes when a day is picked or when the pointer is pressed anywhere outside
/// the input and the popup.
///
/// ```
/// # egui::__run_test_ui(|ui| {
/// let mut picked = None;
/// let response = ui.add(
///     egui_calendar::CalendarInput::new()
///         .id_salt("birthday")
///         .label("Birthday")
///         .on_change(|date| picked = Some(date)),
/// );
/// if response.changed() {
///     // A day was picked this frame.
/// }
/// # });
/// ```
#[must_use = "You should put this widget in a ui with `ui.add(widget);`"]
pub struct CalendarInput<'a> {
    id_salt: Id,
    label: Option<WidgetText>,
    initial_date: Option<NaiveDate>,
    bounds: DateBounds,
    on_change: Option<Box<dyn FnMut(NaiveDate) + 'a>>,
    show_icon: bool,
    popup_width: f32,
    today: Option<NaiveDate>,
}

impl Default for CalendarInput<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CalendarInput<'a> {
    /// A closed calendar with no label and nothing selected.
    pub fn new() -> Self {
        Self {
            id_salt: Id::new("egui_calendar"),
            label: None,
            initial_date: None,
            bounds: DateBounds::default(),
            on_change: None,
            show_icon: true,
            popup_width: 240.0,
            today: None,
        }
    }

    /// Must be set if multiple calendars are in the same Ui.
    #[inline]
    pub fn id_salt(mut self, id_salt: impl std::hash::Hash) -> Self {
        self.id_salt = Id::new(id_salt);
        self
    }

    /// Text shown above the input.
    #[inline]
    pub fn label(mut self, label: impl Into<WidgetText>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Seeds both the selection and the displayed month the first time the calendar is shown.
    ///
    /// Later frames keep whatever the user has done since.
    #[inline]
    pub fn initial_date(mut self, initial_date: impl Into<Option<NaiveDate>>) -> Self {
        self.initial_date = initial_date.into();
        self
    }

    /// Not enforced, see [`DateBounds`].
    #[inline]
    pub fn min_date(mut self, min_date: NaiveDate) -> Self {
        self.bounds.min = Some(min_date);
        self
    }

    /// Not enforced, see [`DateBounds`].
    #[inline]
    pub fn max_date(mut self, max_date: NaiveDate) -> Self {
        self.bounds.max = Some(max_date);
        self
    }

    /// Called once, on the frame a day is picked, with the new date.
    #[inline]
    pub fn on_change(mut self, on_change: impl FnMut(NaiveDate) + 'a) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    /// Show the calendar icon on the input. (Default: true)
    #[inline]
    pub fn show_icon(mut self, show_icon: bool) -> Self {
        self.show_icon = show_icon;
        self
    }

    /// Width of the popup. (Default: 240)
    #[inline]
    pub fn popup_width(mut self, popup_width: f32) -> Self {
        self.popup_width = popup_width;
        self
    }

    /// Use this date as "today" instead of the local clock.
    #[inline]
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The `min_date`/`max_date` given so far.
    pub fn bounds(&self) -> DateBounds {
        self.bounds
    }
}

impl Widget for CalendarInput<'_> {
    fn ui(self, ui: &mut Ui) -> egui::Response {
        profiling::function_scope!();

        let Self {
            id_salt,
            label,
            initial_date,
            bounds: _,
            mut on_change,
            show_icon,
            popup_width,
            today,
        } = self;

        let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
        let id = ui.make_persistent_id(id_salt);
        let mut state = CalendarState::load_if_shown_last_pass(ui.ctx(), id)
            .unwrap_or_else(|| {
                log::debug!("Creating calendar state for {id:?}");
                CalendarState::new(initial_date, today)
            });

        let InnerResponse {
            inner: mut input_response,
            response: widget_response,
        } = ui.vertical(|ui| {
            if let Some(label) = label {
                ui.label(label);
            }

            let mut text = if show_icon {
                RichText::new(format!("{} 📆", state.display_text()))
            } else {
                RichText::new(state.display_text())
            };
            let visuals = ui.visuals().widgets.open;
            if state.open {
                text = text.color(visuals.text_color());
            }
            let mut button = Button::new(text);
            if state.open {
                button = button.fill(visuals.weak_bg_fill).stroke(visuals.bg_stroke);
            }
            ui.add(button)
        });

        if input_response.clicked() {
            state.toggle();
            log::debug!("Calendar {id:?} open: {}", state.open);
        }

        if state.open {
            let width_with_padding = popup_width
                + ui.style().spacing.item_spacing.x
                + ui.style().spacing.window_margin.leftf()
                + ui.style().spacing.window_margin.rightf();
            let mut pos = input_response.rect.left_bottom();
            if pos.x + width_with_padding > ui.clip_rect().right() {
                pos.x = input_response.rect.right() - width_with_padding;
            }

            // Never place the popup outside the window.
            pos.x = pos.x.max(ui.style().spacing.window_margin.leftf());

            let InnerResponse {
                inner: picked,
                response: popup_response,
            } = Area::new(id.with("popup"))
                .kind(egui::UiKind::Picker)
                .order(Order::Foreground)
                .fixed_pos(pos)
                .show(ui.ctx(), |ui| {
                    Frame::popup(ui.style())
                        .show(ui, |ui| {
                            ui.set_min_width(popup_width);
                            ui.set_max_width(popup_width);

                            CalendarPopup {
                                state: &mut state,
                                today,
                            }
                            .draw(ui)
                        })
                        .inner
                });

            if let Some(date) = picked {
                log::debug!("Calendar {id:?} picked {date}");
                if let Some(on_change) = &mut on_change {
                    on_change(date);
                }
                input_response.mark_changed();
            }

            let widget_region = widget_response.rect.union(popup_response.rect);
            let pressed_outside = ui.input(|i| {
                i.pointer.any_pressed()
                    && i.pointer
                        .press_origin()
                        .is_some_and(|pos| !widget_region.contains(pos))
            });
            if pressed_outside && state.outside_press() {
                log::debug!("Calendar {id:?} closed by a press outside");
            }
        }

        state.store(ui.ctx(), id);

        input_response
    }
}

/// What is kept in egui's memory for one calendar.
#[derive(Clone, Copy)]
struct Mounted {
    state: CalendarState,

    /// [`Context::cumulative_pass_nr`] of the last pass that drew the calendar.
    last_pass: u64,
}

/// The state is kept in egui's temporary memory under `ui.make_persistent_id(id_salt)`.
/// It is never written to disk.
///
/// A calendar that is skipped for a pass is considered gone: the next time it is
/// drawn it starts over from its initial date, closed.
impl CalendarState {
    pub fn load(ctx: &Context, id: Id) -> Option<Self> {
        ctx.data(|data| data.get_temp::<Mounted>(id)).map(|mounted| mounted.state)
    }

    /// Store the state as drawn in the current pass.
    pub fn store(self, ctx: &Context, id: Id) {
        let mounted = Mounted {
            state: self,
            last_pass: ctx.cumulative_pass_nr(),
        };
        ctx.data_mut(|data| data.insert_temp(id, mounted));
    }

    /// Discard the state right away instead of waiting for the calendar to be skipped.
    pub fn forget(ctx: &Context, id: Id) {
        ctx.data_mut(|data| data.remove::<Mounted>(id));
    }

    /// The stored state, unless the calendar was not drawn in the previous pass.
    fn load_if_shown_last_pass(ctx: &Context, id: Id) -> Option<Self> {
        let mounted = ctx.data(|data| data.get_temp::<Mounted>(id))?;
        if mounted.last_pass.saturating_add(1) < ctx.cumulative_pass_nr() {
            log::debug!("Calendar {id:?} was hidden, dropping its state");
            Self::forget(ctx, id);
            return None;
        }
        Some(mounted.state)
    }
}
