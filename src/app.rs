use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::layout::{DragController, Viewport, VisibleRange};
use crate::model::Item;
use crate::ui;
use crate::ui::timeline_chart::RenameState;

/// Main application state. Owns the canonical item sequence; the visible
/// range and lane layout are derived from it, never cached across an edit.
pub struct TimelineApp {
    pub items: Vec<Item>,
    pub viewport: Viewport,
    pub drag: DragController,
    pub selected_item: Option<Uuid>,
    pub rename: RenameState,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_add_item: bool,
    pub show_about: bool,
    pub new_item_name: String,
    pub new_item_start: NaiveDate,
    pub new_item_end: NaiveDate,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let items = Self::sample_items();
        let viewport = Viewport::new(VisibleRange::compute(&items));
        let today = chrono::Local::now().date_naive();

        Self {
            items,
            viewport,
            drag: DragController::new(),
            selected_item: None,
            rename: RenameState::default(),
            file_path: None,
            show_add_item: false,
            show_about: false,
            new_item_name: String::new(),
            new_item_start: today,
            new_item_end: today + chrono::Duration::days(7),
            status_message: "Ready".to_string(),
        }
    }

    /// Generate a sample item list for demonstration.
    fn sample_items() -> Vec<Item> {
        let today = chrono::Local::now().date_naive();
        let day = |n: i64| today + chrono::Duration::days(n);

        let specs: &[(&str, i64, i64)] = &[
            ("Research", -12, -4),
            ("Prototype", -6, 3),
            ("Design Review", -2, 1),
            ("Implementation", 2, 18),
            ("Docs", 4, 9),
            ("Beta Testing", 14, 24),
            ("Launch Prep", 20, 27),
        ];
        specs
            .iter()
            .enumerate()
            .map(|(i, &(name, from, to))| {
                let mut item = Item::new(name, day(from), day(to));
                item.color = Some(ui::theme::item_color(i));
                item
            })
            .collect()
    }

    // --- File operations ---

    pub fn new_timeline(&mut self) {
        self.items.clear();
        self.file_path = None;
        self.selected_item = None;
        self.drag.finish();
        self.refit();
        self.status_message = "New timeline created".to_string();
    }

    pub fn open_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline", &["timeline.json", "json"])
            .pick_file()
        {
            match crate::io::load_items(&path) {
                Ok((items, degraded)) => {
                    self.items = items;
                    self.file_path = Some(path);
                    self.selected_item = None;
                    self.refit();
                    self.status_message = if degraded > 0 {
                        format!(
                            "Loaded {} items ({} with unreadable dates, shown at today)",
                            self.items.len(),
                            degraded
                        )
                    } else {
                        format!("Loaded {} items", self.items.len())
                    };
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_file(&mut self) {
        if let Some(path) = self.file_path.clone() {
            match crate::io::save_items(&self.items, &path) {
                Ok(()) => self.status_message = "Timeline saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_file_as();
        }
    }

    pub fn save_file_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Timeline", &["timeline.json", "json"])
            .set_file_name("items.timeline.json")
            .save_file()
        {
            self.file_path = Some(path.clone());
            match crate::io::save_items(&self.items, &path) {
                Ok(()) => self.status_message = "Timeline saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    // --- Item operations ---

    pub fn create_item_from_dialog(&mut self) {
        let name = if self.new_item_name.is_empty() {
            "New Item".to_string()
        } else {
            self.new_item_name.clone()
        };
        let mut item = Item::new(name, self.new_item_start, self.new_item_end);
        item.color = Some(ui::theme::item_color(self.items.len()));
        self.selected_item = Some(item.id);
        self.items.push(item);
        self.refit();
        self.reset_dialog_fields();
        self.status_message = "Item added".to_string();
    }

    pub fn delete_item(&mut self, id: Uuid) {
        self.items.retain(|i| i.id != id);
        if self.selected_item == Some(id) {
            self.selected_item = None;
        }
        if self.rename.target == Some(id) {
            self.rename = RenameState::default();
        }
        self.refit();
        self.status_message = "Item deleted".to_string();
    }

    fn reset_dialog_fields(&mut self) {
        let today = chrono::Local::now().date_naive();
        self.new_item_name = String::new();
        self.new_item_start = today;
        self.new_item_end = today + chrono::Duration::days(7);
    }

    /// Re-derive the visible range from the current items.
    fn refit(&mut self) {
        self.viewport.fit_to(&self.items);
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keyboard shortcuts, handled outside panel closures
        let renaming = self.rename.target.is_some();
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        let zoom_in = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Equals));
        let zoom_out = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Minus));
        let delete = !renaming
            && !self.drag.is_dragging()
            && ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if should_save {
            self.save_file();
        }
        if zoom_in {
            self.viewport.zoom_in();
        }
        if zoom_out {
            self.viewport.zoom_out();
        }
        if delete {
            if let Some(id) = self.selected_item {
                self.delete_item(id);
            }
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dim = |text: String| {
                            egui::RichText::new(text).size(10.5).color(ui::theme::TEXT_DIM)
                        };
                        ui.label(dim(format!("Items: {}", self.items.len())));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!("Span: {} days", self.viewport.range.total_days())));
                        ui.label(dim(" · ".to_string()));
                        ui.label(dim(format!("Zoom: {:.0}%", self.viewport.zoom * 100.0)));
                    });
                });
            });

        // Central panel: timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::timeline_chart::show_timeline_chart(
                &mut self.items,
                &mut self.viewport,
                &mut self.drag,
                &mut self.selected_item,
                &mut self.rename,
                ui,
            );
            if interaction.changed {
                self.viewport.fit_to(&self.items);
                if let Some(item) = self
                    .selected_item
                    .and_then(|id| self.items.iter().find(|i| i.id == id))
                {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        item.name,
                        item.start.format("%Y-%m-%d"),
                        item.end.format("%Y-%m-%d")
                    );
                } else {
                    self.status_message = "Timeline updated".to_string();
                }
            }
        });

        // Dialogs
        if self.show_add_item {
            ui::dialogs::show_add_item_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
