use crate::layout::{assign_lanes, lane_rows, DragController, DragMode, Viewport};
use crate::model::Item;
use crate::ui::theme;
use chrono::Datelike;
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

const LANE_HEIGHT: f32 = theme::LANE_HEIGHT;
const LANE_GAP: f32 = theme::LANE_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;

/// Inline rename state: which item is being edited and the working text.
#[derive(Debug, Clone, Default)]
pub struct RenameState {
    pub target: Option<Uuid>,
    pub text: String,
    focus_pending: bool,
}

impl RenameState {
    fn begin(&mut self, item: &Item) {
        self.target = Some(item.id);
        self.text = item.name.clone();
        self.focus_pending = true;
    }

    fn clear(&mut self) {
        self.target = None;
        self.text.clear();
        self.focus_pending = false;
    }
}

/// Result details from interactions in the timeline chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub changed: bool,
}

/// Render the timeline area: date header, lane rows, item bars with resize
/// handles, today line. Lanes and bar geometry are re-derived from the
/// current items every frame, so layout can never go stale after an edit.
pub fn show_timeline_chart(
    items: &mut [Item],
    viewport: &mut Viewport,
    drag: &mut DragController,
    selected_item: &mut Option<Uuid>,
    rename: &mut RenameState,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    let lanes = assign_lanes(items);
    let rows = lane_rows(&lanes);
    let lane_count = lanes.len();

    let available = ui.available_size();
    let chart_width = viewport.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + (lane_count as f32 * (LANE_HEIGHT + LANE_GAP)) + 40.0;

    // Ctrl+scroll zooms
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        if scroll_delta.y > 0.0 {
            viewport.zoom_in();
        } else if scroll_delta.y < 0.0 {
            viewport.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let origin = response.rect.min;
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_date_header(&painter, origin, viewport, chart_width);
            draw_today_line(&painter, origin, viewport, chart_height);

            // Alternating lane backgrounds
            for row in 0..lane_count {
                let y = origin.y + HEADER_HEIGHT + row as f32 * (LANE_HEIGHT + LANE_GAP);
                if row % 2 == 0 {
                    painter.rect_filled(
                        Rect::from_min_size(
                            Pos2::new(origin.x, y),
                            Vec2::new(chart_width, LANE_HEIGHT + LANE_GAP),
                        ),
                        0.0,
                        theme::BG_PANEL,
                    );
                }
                painter.line_segment(
                    [
                        Pos2::new(origin.x, y + LANE_HEIGHT + LANE_GAP),
                        Pos2::new(origin.x + chart_width, y + LANE_HEIGHT + LANE_GAP),
                    ],
                    Stroke::new(0.5, theme::BORDER_SUBTLE),
                );
            }

            // Item bars. Pointer events are collected here and fed to the
            // drag controller after the loop (it needs the whole item slice).
            let mut pending_begin: Option<(Uuid, DragMode, f32)> = None;
            let mut drag_pointer_x: Option<f32> = None;
            let mut drag_released = false;
            let mut rename_commit: Option<(Uuid, String)> = None;
            let dragging_id = drag.session().map(|s| s.item_id);

            for item in items.iter() {
                let row = rows.get(&item.id).copied().unwrap_or(0);
                let y = origin.y + HEADER_HEIGHT + row as f32 * (LANE_HEIGHT + LANE_GAP) + LANE_GAP;
                let is_selected =
                    *selected_item == Some(item.id) || dragging_id == Some(item.id);

                let geom = viewport.item_geometry(item);
                let bar_rect = Rect::from_min_size(
                    Pos2::new(origin.x + geom.left, y + theme::BAR_INSET),
                    Vec2::new(geom.width, LANE_HEIGHT - theme::BAR_INSET * 2.0),
                );
                draw_item_bar(&painter, item, bar_rect, is_selected);

                // Inline rename replaces the label and all bar interactions
                // until committed or cancelled.
                if rename.target == Some(item.id) {
                    let edit_rect = bar_rect.shrink2(Vec2::new(6.0, 2.0));
                    let edit = ui.put(
                        edit_rect,
                        egui::TextEdit::singleline(&mut rename.text)
                            .font(theme::font_bar())
                            .margin(egui::Margin::symmetric(4.0, 2.0)),
                    );
                    if rename.focus_pending {
                        edit.request_focus();
                        rename.focus_pending = false;
                    }
                    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        rename.clear();
                    } else if ui.input(|i| i.key_pressed(egui::Key::Enter)) || edit.lost_focus() {
                        // Empty or unchanged text is accepted as-is.
                        rename_commit = Some((item.id, rename.text.clone()));
                        rename.clear();
                    }
                    continue;
                }

                let bar_response = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("item-bar", item.id)),
                    Sense::click_and_drag(),
                );
                let left_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.left() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.left() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let right_handle_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.right() - HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.right() + HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let left_response = ui.interact(
                    left_handle_rect.expand(4.0),
                    ui.make_persistent_id(("item-resize-left", item.id)),
                    Sense::drag(),
                );
                let right_response = ui.interact(
                    right_handle_rect.expand(4.0),
                    ui.make_persistent_id(("item-resize-right", item.id)),
                    Sense::drag(),
                );

                if bar_response.clicked() {
                    *selected_item = Some(item.id);
                    consumed_click = true;
                }
                if bar_response.double_clicked() {
                    rename.begin(item);
                    consumed_click = true;
                }

                // Handle presses win over the bar body: a resize drag must
                // never also start a move.
                let pointer_x = |r: &egui::Response| {
                    r.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0)
                };
                if left_response.drag_started() {
                    pending_begin = Some((item.id, DragMode::Start, pointer_x(&left_response)));
                } else if right_response.drag_started() {
                    pending_begin = Some((item.id, DragMode::End, pointer_x(&right_response)));
                } else if bar_response.drag_started() {
                    pending_begin = Some((item.id, DragMode::Move, pointer_x(&bar_response)));
                }

                if left_response.dragged() || right_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    let r = if left_response.dragged() {
                        &left_response
                    } else {
                        &right_response
                    };
                    drag_pointer_x = Some(pointer_x(r));
                } else if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                    drag_pointer_x = Some(pointer_x(&bar_response));
                }

                if left_response.drag_stopped()
                    || right_response.drag_stopped()
                    || bar_response.drag_stopped()
                {
                    drag_released = true;
                }

                // Handle affordances
                if is_selected || left_response.hovered() || right_response.hovered() {
                    if left_response.hovered() || right_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                    } else if bar_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    let handle_h = bar_rect.height() * 0.55;
                    let handle_y = bar_rect.center().y - handle_h / 2.0;
                    let lh = Rect::from_min_size(
                        Pos2::new(bar_rect.left() - 1.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    let rh = Rect::from_min_size(
                        Pos2::new(bar_rect.right() - 2.5, handle_y),
                        Vec2::new(4.0, handle_h),
                    );
                    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
                    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
                }

                if bar_response.hovered() || left_response.hovered() || right_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        Id::new(("item-tip", item.id)),
                        |ui| {
                            ui.strong(&item.name);
                            ui.label(format!(
                                "{} → {}  ({} days)",
                                item.start.format("%d/%m/%Y"),
                                item.end.format("%d/%m/%Y"),
                                item.duration_days(),
                            ));
                        },
                    );
                }
            }

            if let Some((id, new_name)) = rename_commit {
                if let Some(item) = items.iter_mut().find(|i| i.id == id) {
                    item.name = new_name;
                    interaction.changed = true;
                }
            }

            if let Some((id, mode, x)) = pending_begin {
                drag.begin(id, mode, x);
                *selected_item = Some(id);
                consumed_click = true;
            }
            if let Some(x) = drag_pointer_x {
                if drag.update(items, x, viewport) {
                    interaction.changed = true;
                }
            }
            if drag_released {
                drag.finish();
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_item = None;
            }
        });

    interaction
}

fn draw_date_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &Viewport,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let day_width = crate::layout::viewport::BASE_DAY_WIDTH * viewport.zoom;
    let mut date = viewport.range.min;
    let end = viewport.range.max;

    while date <= end {
        let x = origin.x + viewport.date_to_x(date);
        let month_start = date.day() == 1;

        if month_start || day_width >= 15.0 {
            painter.line_segment(
                [
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Pos2::new(x, origin.y + 2000.0),
                ],
                Stroke::new(if month_start { 1.0 } else { 0.5 }, theme::GRID_LINE),
            );
        }

        if day_width >= 20.0 {
            let is_weekend = date.weekday().num_days_from_monday() >= 5;
            painter.text(
                Pos2::new(x + 3.0, origin.y + 28.0),
                egui::Align2::LEFT_CENTER,
                date.format("%d").to_string(),
                theme::font_sub(),
                if is_weekend {
                    theme::TEXT_DIM
                } else {
                    theme::TEXT_SECONDARY
                },
            );
        }

        // Month labels at each first-of-month, plus one at the left edge so
        // the window never starts unlabeled.
        if month_start || date == viewport.range.min {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        date += chrono::Duration::days(1);
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, viewport: &Viewport, height: f32) {
    let today = chrono::Local::now().date_naive();
    if today < viewport.range.min || today > viewport.range.max {
        return;
    }
    let x = origin.x + viewport.date_to_x(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_item_bar(painter: &egui::Painter, item: &Item, bar_rect: Rect, is_selected: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = item.color.unwrap_or(theme::DEFAULT_BAR_COLOR);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, color);
    // Lighter top highlight
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Item name (single line, clipped to bar bounds)
    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(item.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}
