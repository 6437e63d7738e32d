use std::collections::HashMap;

use uuid::Uuid;

use crate::model::Item;

/// A horizontal track of mutually non-overlapping items, ascending by start.
#[derive(Debug, Clone, Default)]
pub struct Lane {
    pub items: Vec<Item>,
}

impl Lane {
    fn fits(&self, item: &Item) -> bool {
        match self.items.last() {
            Some(last) => last.end < item.start,
            None => true,
        }
    }
}

/// Pack items into the minimum number of lanes such that no two items in the
/// same lane overlap.
///
/// Greedy first-fit over the items sorted by start date (stable, so equal
/// starts keep their input order): each item goes into the first lane whose
/// last item ends strictly before the item starts, or opens a new lane.
/// Lanes come out in creation order. The greedy pass is optimal for interval
/// packing: the lane count equals the maximum number of items overlapping at
/// any single instant.
pub fn assign_lanes(items: &[Item]) -> Vec<Lane> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by_key(|item| item.start);

    let mut lanes: Vec<Lane> = Vec::new();
    for item in sorted {
        match lanes.iter_mut().find(|lane| lane.fits(item)) {
            Some(lane) => lane.items.push(item.clone()),
            None => lanes.push(Lane {
                items: vec![item.clone()],
            }),
        }
    }
    lanes
}

/// Lane row index per item id, for positioning bars during rendering.
pub fn lane_rows(lanes: &[Lane]) -> HashMap<Uuid, usize> {
    let mut rows = HashMap::new();
    for (row, lane) in lanes.iter().enumerate() {
        for item in &lane.items {
            rows.insert(item.id, row);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> Item {
        Item::new(
            name,
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn empty_input_yields_no_lanes() {
        assert!(assign_lanes(&[]).is_empty());
    }

    #[test]
    fn overlap_chain_splits_into_two_lanes() {
        // A and C chain in the first lane (A ends 01-05, strictly before
        // C's 01-06 start); B overlaps both ends and gets its own lane.
        let items = vec![
            item("A", (2024, 1, 1), (2024, 1, 5)),
            item("B", (2024, 1, 3), (2024, 1, 7)),
            item("C", (2024, 1, 6), (2024, 1, 10)),
        ];
        let lanes = assign_lanes(&items);
        assert_eq!(lanes.len(), 2);
        let names: Vec<Vec<&str>> = lanes
            .iter()
            .map(|l| l.items.iter().map(|i| i.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["A", "C"], vec!["B"]]);
    }

    #[test]
    fn touching_endpoints_do_not_share_a_lane() {
        // end == next start is still treated as overlap (placement test is
        // strict `end < start`).
        let items = vec![
            item("A", (2024, 1, 1), (2024, 1, 5)),
            item("B", (2024, 1, 5), (2024, 1, 9)),
        ];
        assert_eq!(assign_lanes(&items).len(), 2);
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let items = vec![
            item("first", (2024, 1, 1), (2024, 1, 3)),
            item("second", (2024, 1, 1), (2024, 1, 4)),
        ];
        let lanes = assign_lanes(&items);
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0].items[0].name, "first");
        assert_eq!(lanes[1].items[0].name, "second");
    }

    #[test]
    fn every_item_lands_in_exactly_one_lane() {
        let items = vec![
            item("A", (2024, 2, 1), (2024, 2, 10)),
            item("B", (2024, 2, 2), (2024, 2, 4)),
            item("C", (2024, 2, 5), (2024, 2, 12)),
            item("D", (2024, 2, 11), (2024, 2, 15)),
            item("E", (2024, 1, 20), (2024, 1, 25)),
        ];
        let lanes = assign_lanes(&items);
        let mut seen: Vec<uuid::Uuid> = lanes
            .iter()
            .flat_map(|l| l.items.iter().map(|i| i.id))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), items.len());
    }

    #[test]
    fn lanes_are_internally_ordered_and_disjoint() {
        let items = vec![
            item("A", (2024, 3, 1), (2024, 3, 8)),
            item("B", (2024, 3, 2), (2024, 3, 5)),
            item("C", (2024, 3, 9), (2024, 3, 12)),
            item("D", (2024, 3, 6), (2024, 3, 20)),
            item("E", (2024, 3, 13), (2024, 3, 14)),
        ];
        for lane in assign_lanes(&items) {
            for pair in lane.items.windows(2) {
                assert!(pair[0].start <= pair[1].start);
                assert!(pair[0].end < pair[1].start);
            }
        }
    }

    #[test]
    fn lane_count_matches_peak_concurrency() {
        // Three items overlap on 03-04; peak concurrency is 3.
        let items = vec![
            item("A", (2024, 1, 1), (2024, 1, 6)),
            item("B", (2024, 1, 2), (2024, 1, 4)),
            item("C", (2024, 1, 3), (2024, 1, 8)),
            item("D", (2024, 1, 7), (2024, 1, 9)),
        ];
        assert_eq!(assign_lanes(&items).len(), 3);
    }

    #[test]
    fn lane_rows_map_covers_all_items() {
        let items = vec![
            item("A", (2024, 1, 1), (2024, 1, 5)),
            item("B", (2024, 1, 3), (2024, 1, 7)),
            item("C", (2024, 1, 6), (2024, 1, 10)),
        ];
        let lanes = assign_lanes(&items);
        let rows = lane_rows(&lanes);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[&items[0].id], 0);
        assert_eq!(rows[&items[1].id], 1);
        assert_eq!(rows[&items[2].id], 0);
    }
}
