use uuid::Uuid;

use crate::layout::viewport::Viewport;
use crate::model::{date, Item};

/// Which date field(s) a pointer drag mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Start,
    End,
    Move,
}

/// State of one in-progress drag. Created on pointer-down, destroyed
/// unconditionally on pointer-up.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub item_id: Uuid,
    pub mode: DragMode,
    /// Pointer x at the last applied day step. Kept in place across
    /// zero-delta move events so sub-day motion accumulates (see update).
    pub last_x: f32,
}

/// Translates pointer movement into day-granularity date mutations on a
/// single item, preserving `start < end` throughout.
///
/// Two states: idle (no session) and dragging. At most one session exists at
/// a time; beginning a drag while one is active replaces the session without
/// committing anything further to the old one.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Pointer-down on a bar body (`Move`) or edge handle (`Start`/`End`).
    pub fn begin(&mut self, item_id: Uuid, mode: DragMode, pointer_x: f32) {
        self.session = Some(DragSession {
            item_id,
            mode,
            last_x: pointer_x,
        });
    }

    /// Pointer-move. Converts the pixel delta since `last_x` into whole days
    /// and applies the mode's mutation to the target item. Returns true if
    /// an item actually changed.
    ///
    /// Remainder policy: on a zero-day delta, `last_x` is left untouched so
    /// sub-day motion carries over into the next event instead of being
    /// discarded each frame. On a non-zero delta `last_x` advances to the
    /// current pointer x even when the mutation is rejected, so the next
    /// event recomputes from the unchanged dates.
    pub fn update(&mut self, items: &mut [Item], pointer_x: f32, viewport: &Viewport) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let day_delta = viewport.days_for_delta(pointer_x - session.last_x);
        if day_delta == 0 {
            return false;
        }
        session.last_x = pointer_x;

        let Some(item) = items.iter_mut().find(|i| i.id == session.item_id) else {
            return false;
        };
        match session.mode {
            DragMode::Move => {
                item.shift(day_delta);
                true
            }
            DragMode::Start => item.try_set_start(date::add_days(item.start, day_delta)),
            DragMode::End => item.try_set_end(date::add_days(item.end, day_delta)),
        }
    }

    /// Pointer-up. Unconditional; no pending state survives.
    pub fn finish(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::viewport::{VisibleRange, BASE_DAY_WIDTH};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn viewport(zoom: f32) -> Viewport {
        let mut vp = Viewport::new(VisibleRange {
            min: d(2024, 1, 1),
            max: d(2024, 3, 1),
        });
        vp.set_zoom(zoom);
        vp
    }

    fn items() -> Vec<Item> {
        vec![Item::new("A", d(2024, 1, 1), d(2024, 1, 5))]
    }

    #[test]
    fn move_drag_shifts_both_dates_by_whole_days() {
        let vp = viewport(1.0);
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(items[0].id, DragMode::Move, 100.0);

        // Exactly three days to the right at zoom 1.
        assert!(drag.update(&mut items, 100.0 + 3.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].start, d(2024, 1, 4));
        assert_eq!(items[0].end, d(2024, 1, 8));
        assert_eq!(items[0].duration_days(), 4);
    }

    #[test]
    fn start_drag_never_crosses_end() {
        let vp = viewport(1.0);
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(items[0].id, DragMode::Start, 0.0);

        // Ten days right would put start past end; mutation dropped.
        assert!(!drag.update(&mut items, 10.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].start, d(2024, 1, 1));
        assert_eq!(items[0].end, d(2024, 1, 5));

        // Dragging back left recomputes from the unchanged start.
        assert!(drag.update(&mut items, 8.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].start, d(2023, 12, 30));
        assert!(items[0].start < items[0].end);
    }

    #[test]
    fn end_drag_never_crosses_start() {
        let vp = viewport(1.0);
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(items[0].id, DragMode::End, 0.0);

        // Ten days left would put end past start; mutation dropped, but the
        // reference x still advances to the current pointer.
        assert!(!drag.update(&mut items, -10.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].end, d(2024, 1, 5));

        // Two days back to the right, measured from the advanced reference.
        assert!(drag.update(&mut items, -8.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].end, d(2024, 1, 7));
        assert!(items[0].end > items[0].start);
    }

    #[test]
    fn sub_day_motion_accumulates_across_move_events() {
        // Pins the remainder policy: 10 px at zoom 1 is under half a day, so
        // the first event is a no-op and last_x stays put; the second event's
        // cumulative 20 px then rounds to one day.
        let vp = viewport(1.0);
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(items[0].id, DragMode::Move, 0.0);

        assert!(!drag.update(&mut items, 10.0, &vp));
        assert_eq!(drag.session().unwrap().last_x, 0.0);
        assert_eq!(items[0].start, d(2024, 1, 1));

        assert!(drag.update(&mut items, 20.0, &vp));
        assert_eq!(drag.session().unwrap().last_x, 20.0);
        assert_eq!(items[0].start, d(2024, 1, 2));
    }

    #[test]
    fn delta_scales_with_zoom() {
        let vp = viewport(5.0);
        let mut items = items();
        let mut drag = DragController::new();
        drag.begin(items[0].id, DragMode::Move, 0.0);

        // 120 px at zoom 5 is one day, not five.
        assert!(drag.update(&mut items, 5.0 * BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].start, d(2024, 1, 2));
    }

    #[test]
    fn finish_clears_the_session_unconditionally() {
        let mut drag = DragController::new();
        drag.begin(Uuid::new_v4(), DragMode::Move, 0.0);
        assert!(drag.is_dragging());
        drag.finish();
        assert!(!drag.is_dragging());
        drag.finish();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn begin_while_dragging_replaces_the_session() {
        let vp = viewport(1.0);
        let mut items = vec![
            Item::new("A", d(2024, 1, 1), d(2024, 1, 5)),
            Item::new("B", d(2024, 2, 1), d(2024, 2, 5)),
        ];
        let first = items[0].id;
        let second = items[1].id;

        let mut drag = DragController::new();
        drag.begin(first, DragMode::Move, 0.0);
        drag.begin(second, DragMode::End, 50.0);

        let session = drag.session().unwrap();
        assert_eq!(session.item_id, second);
        assert_eq!(session.mode, DragMode::End);
        assert_eq!(session.last_x, 50.0);

        // Updates now target the new item only.
        assert!(drag.update(&mut items, 50.0 + BASE_DAY_WIDTH, &vp));
        assert_eq!(items[0].start, d(2024, 1, 1));
        assert_eq!(items[1].end, d(2024, 2, 6));
    }

    #[test]
    fn update_without_session_is_a_no_op() {
        let vp = viewport(1.0);
        let mut items = items();
        let mut drag = DragController::new();
        assert!(!drag.update(&mut items, 500.0, &vp));
        assert_eq!(items[0].start, d(2024, 1, 1));
    }
}
