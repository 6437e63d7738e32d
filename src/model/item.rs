use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single schedulable item on the timeline.
///
/// Invariant: `start < end` at all times. Construction normalizes the dates;
/// every later mutation goes through [`Item::shift`], [`Item::try_set_start`]
/// or [`Item::try_set_end`], which reject violating values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Display color for the bar (stored as RGBA). Has no effect on layout.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "color_serde")]
    pub color: Option<Color32>,
}

impl Item {
    /// Create a new item. If `end <= start`, the end is pushed to the day
    /// after `start` so the invariant holds from the outset.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let end = if end > start {
            end
        } else {
            start + chrono::Duration::days(1)
        };
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            color: None,
        }
    }

    pub fn duration_days(&self) -> i64 {
        super::date::days_between(self.start, self.end)
    }

    /// Move both dates by `days`, preserving duration. Always valid.
    pub fn shift(&mut self, days: i64) {
        self.start = super::date::add_days(self.start, days);
        self.end = super::date::add_days(self.end, days);
    }

    /// Set a new start date; returns false (item unchanged) if it would
    /// reach or pass the end date.
    pub fn try_set_start(&mut self, candidate: NaiveDate) -> bool {
        if candidate < self.end {
            self.start = candidate;
            true
        } else {
            false
        }
    }

    /// Set a new end date; returns false (item unchanged) if it would
    /// reach or pass the start date.
    pub fn try_set_end(&mut self, candidate: NaiveDate) -> bool {
        if candidate > self.start {
            self.end = candidate;
            true
        } else {
            false
        }
    }
}

/// Serde helper for `Option<Color32>`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = color.map(|c| [c.r(), c.g(), c.b(), c.a()]);
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: Option<[u8; 4]> = Deserialize::deserialize(deserializer)?;
        Ok(rgba.map(|[r, g, b, a]| Color32::from_rgba_premultiplied(r, g, b, a)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_normalizes_inverted_dates() {
        let item = Item::new("a", d(2024, 1, 5), d(2024, 1, 5));
        assert!(item.start < item.end);
        assert_eq!(item.duration_days(), 1);
    }

    #[test]
    fn shift_preserves_duration() {
        let mut item = Item::new("a", d(2024, 1, 1), d(2024, 1, 5));
        let before = item.duration_days();
        item.shift(-13);
        assert_eq!(item.duration_days(), before);
        assert_eq!(item.start, d(2023, 12, 19));
    }

    #[test]
    fn set_start_rejects_crossing_end() {
        let mut item = Item::new("a", d(2024, 1, 1), d(2024, 1, 5));
        assert!(!item.try_set_start(d(2024, 1, 5)));
        assert!(!item.try_set_start(d(2024, 1, 9)));
        assert_eq!(item.start, d(2024, 1, 1));
        assert!(item.try_set_start(d(2024, 1, 4)));
        assert_eq!(item.start, d(2024, 1, 4));
    }

    #[test]
    fn set_end_rejects_crossing_start() {
        let mut item = Item::new("a", d(2024, 1, 1), d(2024, 1, 5));
        assert!(!item.try_set_end(d(2024, 1, 1)));
        assert!(!item.try_set_end(d(2023, 12, 25)));
        assert_eq!(item.end, d(2024, 1, 5));
        assert!(item.try_set_end(d(2024, 1, 2)));
        assert_eq!(item.end, d(2024, 1, 2));
    }

    #[test]
    fn serde_uses_iso_calendar_days() {
        let mut item = Item::new("Launch", d(2024, 3, 1), d(2024, 3, 8));
        item.color = Some(Color32::from_rgb(66, 133, 244));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"start\":\"2024-03-01\""));
        assert!(json.contains("\"end\":\"2024-03-08\""));

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, item.id);
        assert_eq!(back.start, item.start);
        assert_eq!(back.color, item.color);
    }

    #[test]
    fn serde_color_is_optional() {
        let item = Item::new("a", d(2024, 1, 1), d(2024, 1, 2));
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("color"));
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back.color, None);
    }
}
