use chrono::NaiveDate;

use crate::model::date;
use crate::model::Item;

/// Width of one day in pixels at zoom 1.0.
pub const BASE_DAY_WIDTH: f32 = 24.0;
/// Bars never render narrower than this, so short items stay legible.
/// Cosmetic only; never fed back into date math.
pub const MIN_ITEM_WIDTH: f32 = 80.0;
/// Days of margin added on each side of the items when fitting the range.
pub const RANGE_PADDING_DAYS: i64 = 7;
/// Window shown when there are no items: `[today, today + 30]`.
pub const DEFAULT_SPAN_DAYS: i64 = 30;

pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 5.0;
const ZOOM_STEP: f32 = 1.2;

/// The padded date window that is the origin for all pixel math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl VisibleRange {
    /// Padded window covering all items, or the default window when empty.
    /// Total: always returns a usable range.
    pub fn compute(items: &[Item]) -> Self {
        let bounds = items
            .iter()
            .map(|i| i.start)
            .min()
            .zip(items.iter().map(|i| i.end).max());
        match bounds {
            Some((min, max)) => Self {
                min: date::add_days(min, -RANGE_PADDING_DAYS),
                max: date::add_days(max, RANGE_PADDING_DAYS),
            },
            None => Self::default_window(),
        }
    }

    pub fn default_window() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            min: today,
            max: date::add_days(today, DEFAULT_SPAN_DAYS),
        }
    }

    pub fn total_days(&self) -> i64 {
        date::days_between(self.min, self.max)
    }
}

/// Visible date window plus zoom factor; converts between calendar dates and
/// pixel offsets.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub range: VisibleRange,
    /// Multiplier on [`BASE_DAY_WIDTH`], kept within `[ZOOM_MIN, ZOOM_MAX]`
    /// by the zoom controls. The mapping functions trust the stored value.
    pub zoom: f32,
}

/// Pixel placement for one item bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub left: f32,
    pub width: f32,
}

impl Viewport {
    pub fn new(range: VisibleRange) -> Self {
        Self { range, zoom: 1.0 }
    }

    /// Recompute the range from the current item set. Called after every
    /// load or edit so the window never goes stale.
    pub fn fit_to(&mut self, items: &[Item]) {
        self.range = VisibleRange::compute(items);
    }

    fn day_width(&self) -> f32 {
        BASE_DAY_WIDTH * self.zoom
    }

    /// Convert a date to an x-pixel offset from the range start.
    pub fn date_to_x(&self, d: NaiveDate) -> f32 {
        date::days_between(self.range.min, d) as f32 * self.day_width()
    }

    /// Pixel extent of one item's bar.
    pub fn item_geometry(&self, item: &Item) -> ItemGeometry {
        let left = self.date_to_x(item.start);
        let width = (self.date_to_x(item.end) - left).max(MIN_ITEM_WIDTH);
        ItemGeometry { left, width }
    }

    /// Inverse of `date_to_x` for drag handling: whole days nearest to a
    /// pixel delta. Rounds, so motion below half a day's width maps to zero.
    pub fn days_for_delta(&self, delta_x: f32) -> i64 {
        (delta_x / self.day_width()).round() as i64
    }

    /// Total width in pixels of the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.range.max)
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }
}
