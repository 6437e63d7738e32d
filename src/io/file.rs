use std::path::Path;

use egui::Color32;
use serde::Deserialize;
use uuid::Uuid;

use crate::model::{date, Item};

/// Save the item list to a JSON file (array of items, ISO-8601 dates).
pub fn save_items(items: &[Item], path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(items).map_err(|e| e.to_string())?;
    std::fs::write(path, json).map_err(|e| e.to_string())
}

/// On-disk record, before date validation.
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    color: Option<[u8; 4]>,
}

/// Load the item list from a JSON file.
///
/// Date handling is fail-soft: a record with a missing or unparseable date is
/// kept and given a substitute one-day range at today, so it still renders
/// (at a default position) instead of taking the whole load down. The second
/// value is the number of records degraded this way.
pub fn load_items(path: &Path) -> Result<(Vec<Item>, usize), String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: Vec<RawItem> = serde_json::from_str(&json).map_err(|e| e.to_string())?;

    let today = chrono::Local::now().date_naive();
    let mut degraded = 0usize;
    let items = raw
        .into_iter()
        .map(|r| {
            let parsed = r
                .start
                .as_deref()
                .and_then(date::parse_day)
                .zip(r.end.as_deref().and_then(date::parse_day));
            let (start, end) = match parsed {
                Some(range) => range,
                None => {
                    degraded += 1;
                    (today, date::add_days(today, 1))
                }
            };
            let mut item = Item::new(r.name.unwrap_or_else(|| "Untitled".to_string()), start, end);
            if let Some(id) = r.id {
                item.id = id;
            }
            item.color = r
                .color
                .map(|[red, g, b, a]| Color32::from_rgba_premultiplied(red, g, b, a));
            item
        })
        .collect();
    Ok((items, degraded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn save_then_load_keeps_items_intact() {
        let dir = std::env::temp_dir().join("timeline-io-roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("items.json");

        let mut items = vec![
            Item::new("Design", d(2024, 1, 1), d(2024, 1, 10)),
            Item::new("Build", d(2024, 1, 8), d(2024, 2, 1)),
        ];
        items[0].color = Some(Color32::from_rgb(66, 133, 244));

        save_items(&items, &path).unwrap();
        let (loaded, degraded) = load_items(&path).unwrap();

        assert_eq!(degraded, 0);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, items[0].id);
        assert_eq!(loaded[0].name, "Design");
        assert_eq!(loaded[0].start, d(2024, 1, 1));
        assert_eq!(loaded[1].end, d(2024, 2, 1));
        assert!(loaded[0].color.is_some());
    }

    #[test]
    fn unparseable_dates_degrade_instead_of_failing() {
        let dir = std::env::temp_dir().join("timeline-io-degraded");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("items.json");

        std::fs::write(
            &path,
            r#"[
                {"name": "ok", "start": "2024-01-01", "end": "2024-01-05"},
                {"name": "bad", "start": "01/02/2024", "end": "2024-01-05"},
                {"name": "missing"}
            ]"#,
        )
        .unwrap();

        let (loaded, degraded) = load_items(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(degraded, 2);
        assert_eq!(loaded[0].start, d(2024, 1, 1));
        for item in &loaded {
            assert!(item.start < item.end);
        }
    }

    #[test]
    fn malformed_file_reports_an_error() {
        let dir = std::env::temp_dir().join("timeline-io-malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("items.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_items(&path).is_err());
        assert!(load_items(&dir.join("does-not-exist.json")).is_err());
    }
}
