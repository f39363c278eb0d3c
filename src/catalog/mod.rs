//! # Catalog Module
//!
//! Loot item templates, materials, and the collaborators that load them.
//!
//! Everything in this module is plain data. The generation engine reads a
//! [`Catalog`] by reference and never mutates it.

pub mod points;
pub mod store;
pub mod text;

pub use points::*;
pub use store::*;
pub use text::*;

use crate::{LootError, LootResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Physical size class of an item, ordered smallest to largest.
///
/// # Examples
///
/// ```
/// use loot_generator::Size;
///
/// assert!(Size::Tiny < Size::Huge);
/// assert_eq!("LARGE".parse::<Size>().unwrap(), Size::Large);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Midsize,
    Large,
    Huge,
}

impl Size {
    pub const ALL: [Size; 5] = [Size::Tiny, Size::Small, Size::Midsize, Size::Large, Size::Huge];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Tiny => "tiny",
            Size::Small => "small",
            Size::Midsize => "midsize",
            Size::Large => "large",
            Size::Huge => "huge",
        }
    }
}

/// Era an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Tribal,
    #[default]
    Medieval,
    Modern,
    Postmodern,
    Spacer,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Tribal,
        Period::Medieval,
        Period::Modern,
        Period::Postmodern,
        Period::Spacer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Tribal => "tribal",
            Period::Medieval => "medieval",
            Period::Modern => "modern",
            Period::Postmodern => "postmodern",
            Period::Spacer => "spacer",
        }
    }
}

/// Category a material belongs to; placeholder tokens name these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialType {
    Metal,
    Stone,
    Wood,
    Fabric,
    Leather,
    Bone,
    Glass,
}

impl MaterialType {
    pub const ALL: [MaterialType; 7] = [
        MaterialType::Metal,
        MaterialType::Stone,
        MaterialType::Wood,
        MaterialType::Fabric,
        MaterialType::Leather,
        MaterialType::Bone,
        MaterialType::Glass,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Metal => "Metal",
            MaterialType::Stone => "Stone",
            MaterialType::Wood => "Wood",
            MaterialType::Fabric => "Fabric",
            MaterialType::Leather => "Leather",
            MaterialType::Bone => "Bone",
            MaterialType::Glass => "Glass",
        }
    }

    /// Case-insensitive name comparison, as used by placeholder tokens.
    pub fn matches_name(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

macro_rules! impl_vocabulary {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = LootError;

            fn from_str(s: &str) -> LootResult<Self> {
                let s = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| LootError::InvalidCatalog(format!("unknown {}: {:?}", $label, s)))
            }
        }
    };
}

impl_vocabulary!(Size, "size");
impl_vocabulary!(Period, "period");
impl_vocabulary!(MaterialType, "material type");

/// A catalog entry: the template from which generated loot is drawn.
///
/// The name may embed placeholder tokens such as `[Metal]` that are resolved
/// per drawn occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootItem {
    /// Display name, possibly containing placeholder tokens
    pub name: String,
    /// Higher is rarer; used only as a filter
    pub rarity: u32,
    /// Free text shown to the game master
    #[serde(default)]
    pub description: String,
    /// Cost charged against the budget before material modifiers
    pub point_value: Points,
    /// Case-sensitive descriptive tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub period: Period,
}

impl LootItem {
    /// Creates an untagged, midsize, medieval item with no description.
    ///
    /// # Examples
    ///
    /// ```
    /// use loot_generator::{LootItem, Points, Size};
    ///
    /// let item = LootItem::new("Sword", 1, Points::from_whole(10))
    ///     .with_tags(["weapon", "melee"])
    ///     .with_size(Size::Large);
    /// assert!(item.has_tag("weapon"));
    /// assert_eq!(item.size, Size::Large);
    /// ```
    pub fn new(name: impl Into<String>, rarity: u32, point_value: Points) -> Self {
        Self {
            name: name.into(),
            rarity,
            description: String::new(),
            point_value,
            tags: BTreeSet::new(),
            size: Size::default(),
            period: Period::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A material that can be substituted into item names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Multiplier applied to the point value of any item it is substituted into
    pub modifier: f64,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
}

impl Material {
    pub fn new(name: impl Into<String>, modifier: f64, material_type: MaterialType) -> Self {
        Self {
            name: name.into(),
            modifier,
            material_type,
        }
    }
}

/// The items and materials a generation call draws from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<LootItem>,
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Declared tag vocabulary; may list tags no item uses yet
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Catalog {
    pub fn new(items: Vec<LootItem>) -> Self {
        Self {
            items,
            materials: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the declared tag vocabulary, or the sorted union of item tags
    /// when none was declared.
    pub fn all_tags(&self) -> Vec<String> {
        if !self.tags.is_empty() {
            return self.tags.clone();
        }
        self.items
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Checks every item cost is positive and every modifier is a positive
    /// finite number.
    pub fn validate(&self) -> LootResult<()> {
        let free: Vec<&str> = self
            .items
            .iter()
            .filter(|item| item.point_value.is_zero())
            .map(|item| item.name.as_str())
            .collect();
        if !free.is_empty() {
            return Err(LootError::InvalidCatalog(format!(
                "items with non-positive point value: {}",
                free.join(", ")
            )));
        }

        if let Some(material) = self
            .materials
            .iter()
            .find(|m| !m.modifier.is_finite() || m.modifier <= 0.0)
        {
            return Err(LootError::InvalidCatalog(format!(
                "material {} has invalid modifier {}",
                material.name, material.modifier
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            LootItem::new("Sword", 1, Points::from_whole(10)).with_tags(["weapon", "melee"]),
            LootItem::new("Potion", 2, Points::from_whole(5)).with_tags(["consumable"]),
        ])
    }

    #[test]
    fn test_size_ordering() {
        let mut sizes = vec![Size::Huge, Size::Tiny, Size::Large, Size::Midsize, Size::Small];
        sizes.sort();
        assert_eq!(sizes, Size::ALL.to_vec());
    }

    #[test]
    fn test_vocabulary_parsing() {
        assert_eq!("tiny".parse::<Size>().unwrap(), Size::Tiny);
        assert_eq!(" Spacer ".parse::<Period>().unwrap(), Period::Spacer);
        assert_eq!("metal".parse::<MaterialType>().unwrap(), MaterialType::Metal);
        assert!("gigantic".parse::<Size>().is_err());
        assert!("Plastic".parse::<MaterialType>().is_err());
    }

    #[test]
    fn test_material_type_name_matching() {
        assert!(MaterialType::Stone.matches_name("stone"));
        assert!(MaterialType::Stone.matches_name("STONE"));
        assert!(!MaterialType::Stone.matches_name("Stones"));
    }

    #[test]
    fn test_item_defaults() {
        let item = LootItem::new("Rope", 1, Points::from_whole(1));
        assert_eq!(item.size, Size::Midsize);
        assert_eq!(item.period, Period::Medieval);
        assert!(item.tags.is_empty());
        assert!(item.description.is_empty());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let item = LootItem::new("Sword", 1, Points::from_whole(10)).with_tags(["Weapon"]);
        assert!(item.has_tag("Weapon"));
        assert!(!item.has_tag("weapon"));
    }

    #[test]
    fn test_all_tags_derived_from_items() {
        let catalog = sample_catalog();
        assert_eq!(catalog.all_tags(), vec!["consumable", "melee", "weapon"]);
    }

    #[test]
    fn test_all_tags_prefers_declared() {
        let mut catalog = sample_catalog();
        catalog.tags = vec!["armor".to_string()];
        assert_eq!(catalog.all_tags(), vec!["armor"]);
    }

    #[test]
    fn test_validate_rejects_free_items() {
        let catalog = Catalog::new(vec![LootItem::new("Dust", 1, Points::ZERO)]);
        assert!(matches!(catalog.validate(), Err(LootError::InvalidCatalog(_))));
    }

    #[test]
    fn test_validate_rejects_bad_modifiers() {
        let catalog = sample_catalog()
            .with_materials(vec![Material::new("Void", 0.0, MaterialType::Stone)]);
        assert!(catalog.validate().is_err());

        let catalog = sample_catalog()
            .with_materials(vec![Material::new("Chaos", f64::NAN, MaterialType::Metal)]);
        assert!(catalog.validate().is_err());

        let catalog = sample_catalog()
            .with_materials(vec![Material::new("Tin", 0.5, MaterialType::Metal)]);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_item_deserializes_without_size_and_period() {
        let json = r#"{"name":"Sword","rarity":1,"description":"A sword","point_value":10,"tags":["weapon"]}"#;
        let item: LootItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.point_value, Points::from_whole(10));
        assert_eq!(item.size, Size::Midsize);
        assert_eq!(item.period, Period::Medieval);
    }

    #[test]
    fn test_material_serializes_type_key() {
        let material = Material::new("Iron", 1.0, MaterialType::Metal);
        let json = serde_json::to_value(&material).unwrap();
        assert_eq!(json["type"], "Metal");
    }
}
