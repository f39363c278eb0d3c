//! # Filter Specifications
//!
//! The per-call request: a point budget plus the predicates an item must
//! satisfy to be eligible.

use crate::{LootError, LootItem, LootResult, Period, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the include-tag set is matched against an item's tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatch {
    /// The item carries at least one included tag
    #[default]
    Any,
    /// The item carries every included tag
    All,
}

/// A generation request.
///
/// Unset predicates do not filter. Presets are stored as serialized
/// `FilterSpec`s, so every field has a serde default.
///
/// # Examples
///
/// ```
/// use loot_generator::{FilterSpec, LootItem, Points, Size};
///
/// let spec = FilterSpec::new(50)
///     .include_tag("weapon")
///     .exclude_tag("cursed")
///     .max_size(Size::Large);
///
/// let sword = LootItem::new("Sword", 1, Points::from_whole(10)).with_tags(["weapon"]);
/// let idol = LootItem::new("Idol", 3, Points::from_whole(10)).with_tags(["weapon", "cursed"]);
/// assert!(spec.matches(&sword));
/// assert!(!spec.matches(&idol));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Points available to spend
    pub budget: u32,
    #[serde(default)]
    pub include_tags: BTreeSet<String>,
    #[serde(default)]
    pub tag_match: TagMatch,
    #[serde(default)]
    pub exclude_tags: BTreeSet<String>,
    /// Inclusive lower rarity bound
    #[serde(default)]
    pub min_rarity: Option<u32>,
    /// Inclusive upper rarity bound
    #[serde(default)]
    pub max_rarity: Option<u32>,
    /// Largest size class allowed (inclusive)
    #[serde(default)]
    pub max_size: Option<Size>,
    /// Allowed periods; empty allows every period
    #[serde(default)]
    pub periods: BTreeSet<Period>,
}

impl FilterSpec {
    /// Creates a request that accepts every item.
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            include_tags: BTreeSet::new(),
            tag_match: TagMatch::Any,
            exclude_tags: BTreeSet::new(),
            min_rarity: None,
            max_rarity: None,
            max_size: None,
            periods: BTreeSet::new(),
        }
    }

    pub fn include_tag(mut self, tag: impl Into<String>) -> Self {
        self.include_tags.insert(tag.into());
        self
    }

    /// Requires items to carry every included tag instead of any one.
    pub fn require_all_tags(mut self) -> Self {
        self.tag_match = TagMatch::All;
        self
    }

    pub fn exclude_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclude_tags.insert(tag.into());
        self
    }

    pub fn min_rarity(mut self, rarity: u32) -> Self {
        self.min_rarity = Some(rarity);
        self
    }

    pub fn max_rarity(mut self, rarity: u32) -> Self {
        self.max_rarity = Some(rarity);
        self
    }

    pub fn max_size(mut self, size: Size) -> Self {
        self.max_size = Some(size);
        self
    }

    pub fn allow_period(mut self, period: Period) -> Self {
        self.periods.insert(period);
        self
    }

    /// Rejects requests no catalog could satisfy coherently.
    pub fn validate(&self) -> LootResult<()> {
        if let (Some(min), Some(max)) = (self.min_rarity, self.max_rarity) {
            if min > max {
                return Err(LootError::InvalidFilter(format!(
                    "min rarity {} exceeds max rarity {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Evaluates every predicate against one item.
    pub fn matches(&self, item: &LootItem) -> bool {
        self.matches_include(item)
            && self.exclude_tags.is_disjoint(&item.tags)
            && self.min_rarity.map_or(true, |min| item.rarity >= min)
            && self.max_rarity.map_or(true, |max| item.rarity <= max)
            && self.max_size.map_or(true, |max| item.size <= max)
            && (self.periods.is_empty() || self.periods.contains(&item.period))
    }

    fn matches_include(&self, item: &LootItem) -> bool {
        if self.include_tags.is_empty() {
            return true;
        }
        match self.tag_match {
            TagMatch::Any => !self.include_tags.is_disjoint(&item.tags),
            TagMatch::All => self.include_tags.is_subset(&item.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Points;

    fn item(tags: &[&str]) -> LootItem {
        LootItem::new("Thing", 2, Points::from_whole(5)).with_tags(tags.iter().copied())
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = FilterSpec::new(10);
        assert!(spec.matches(&item(&[])));
        assert!(spec.matches(&item(&["weapon"])));
    }

    #[test]
    fn test_include_any() {
        let spec = FilterSpec::new(10).include_tag("weapon").include_tag("armor");
        assert!(spec.matches(&item(&["weapon"])));
        assert!(spec.matches(&item(&["armor", "heavy"])));
        assert!(!spec.matches(&item(&["consumable"])));
        assert!(!spec.matches(&item(&[])));
    }

    #[test]
    fn test_include_all() {
        let spec = FilterSpec::new(10)
            .include_tag("weapon")
            .include_tag("melee")
            .require_all_tags();
        assert!(spec.matches(&item(&["weapon", "melee", "heavy"])));
        assert!(!spec.matches(&item(&["weapon"])));
    }

    #[test]
    fn test_exclude() {
        let spec = FilterSpec::new(10).exclude_tag("magic");
        assert!(spec.matches(&item(&["weapon"])));
        assert!(!spec.matches(&item(&["weapon", "magic"])));
    }

    #[test]
    fn test_tags_match_case_sensitively() {
        let spec = FilterSpec::new(10).include_tag("Weapon");
        assert!(!spec.matches(&item(&["weapon"])));
    }

    #[test]
    fn test_rarity_bounds_inclusive() {
        let spec = FilterSpec::new(10).min_rarity(2).max_rarity(3);
        let mut thing = item(&[]);
        for (rarity, expected) in [(1, false), (2, true), (3, true), (4, false)] {
            thing.rarity = rarity;
            assert_eq!(spec.matches(&thing), expected, "rarity {}", rarity);
        }
    }

    #[test]
    fn test_max_size_inclusive() {
        let spec = FilterSpec::new(10).max_size(Size::Midsize);
        assert!(spec.matches(&item(&[]).with_size(Size::Tiny)));
        assert!(spec.matches(&item(&[]).with_size(Size::Midsize)));
        assert!(!spec.matches(&item(&[]).with_size(Size::Large)));
    }

    #[test]
    fn test_period_membership() {
        let spec = FilterSpec::new(10)
            .allow_period(Period::Modern)
            .allow_period(Period::Spacer);
        assert!(spec.matches(&item(&[]).with_period(Period::Spacer)));
        assert!(!spec.matches(&item(&[]).with_period(Period::Tribal)));
    }

    #[test]
    fn test_validate_rarity_order() {
        assert!(FilterSpec::new(10).min_rarity(3).max_rarity(3).validate().is_ok());
        assert!(matches!(
            FilterSpec::new(10).min_rarity(4).max_rarity(2).validate(),
            Err(LootError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_deserialize_minimal_preset() {
        let spec: FilterSpec = serde_json::from_str(r#"{"budget": 5, "include_tags": ["weapon"]}"#).unwrap();
        assert_eq!(spec, FilterSpec::new(5).include_tag("weapon"));
    }
}
