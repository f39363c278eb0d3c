//! # Loot Summaries
//!
//! Groups generated entries by resolved name for display.

use crate::{GeneratedLootEntry, Points};
use serde::Serialize;
use std::fmt;

/// All entries that share a resolved name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootLine {
    pub name: String,
    pub count: usize,
    /// Sum of the entries' final point values
    pub total_value: Points,
}

/// Generated loot grouped by name, in the order names first appeared.
///
/// # Examples
///
/// ```
/// use loot_generator::{
///     Catalog, FilterSpec, LootGenerator, LootItem, LootSummary, Points, ScriptedSource,
/// };
///
/// let catalog = Catalog::new(vec![LootItem::new("Arrow", 1, Points::from_whole(1))]);
/// let loot = LootGenerator::default()
///     .generate(&catalog, &FilterSpec::new(3), &mut ScriptedSource::default())
///     .unwrap();
///
/// let summary = LootSummary::from_entries(&loot);
/// assert_eq!(summary.to_string(), "3x Arrow (3)\nTotal: 3 points");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LootSummary {
    pub lines: Vec<LootLine>,
    pub total_value: Points,
}

impl LootSummary {
    pub fn from_entries(entries: &[GeneratedLootEntry]) -> Self {
        let mut lines: Vec<LootLine> = Vec::new();
        for entry in entries {
            match lines.iter_mut().find(|line| line.name == entry.name) {
                Some(line) => {
                    line.count += 1;
                    line.total_value += entry.point_value;
                }
                None => lines.push(LootLine {
                    name: entry.name.clone(),
                    count: 1,
                    total_value: entry.point_value,
                }),
            }
        }

        Self {
            total_value: entries.iter().map(|entry| entry.point_value).sum(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.lines.iter().map(|line| line.count).sum()
    }
}

impl fmt::Display for LootSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No loot matched criteria");
        }
        for line in &self.lines {
            writeln!(f, "{}x {} ({})", line.count, line.name, line.total_value)?;
        }
        write!(f, "Total: {} points", self.total_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Period, Size};
    use std::collections::BTreeSet;

    fn entry(name: &str, value: u32) -> GeneratedLootEntry {
        GeneratedLootEntry {
            name: name.to_string(),
            rarity: 1,
            description: String::new(),
            tags: BTreeSet::new(),
            size: Size::Midsize,
            period: Period::Medieval,
            base_value: Points::from_whole(value),
            modifier: 1.0,
            point_value: Points::from_whole(value),
        }
    }

    #[test]
    fn test_groups_by_name_in_first_seen_order() {
        let entries = vec![
            entry("Iron Ring", 5),
            entry("Gold Ring", 8),
            entry("Iron Ring", 5),
        ];
        let summary = LootSummary::from_entries(&entries);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].name, "Iron Ring");
        assert_eq!(summary.lines[0].count, 2);
        assert_eq!(summary.lines[0].total_value, Points::from_whole(10));
        assert_eq!(summary.lines[1].name, "Gold Ring");
        assert_eq!(summary.total_value, Points::from_whole(18));
        assert_eq!(summary.item_count(), 3);
    }

    #[test]
    fn test_display() {
        let summary = LootSummary::from_entries(&[entry("Iron Ring", 5), entry("Iron Ring", 5)]);
        assert_eq!(summary.to_string(), "2x Iron Ring (10)\nTotal: 10 points");
    }

    #[test]
    fn test_empty_summary() {
        let summary = LootSummary::from_entries(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total_value, Points::ZERO);
        assert_eq!(summary.to_string(), "No loot matched criteria");
    }
}
