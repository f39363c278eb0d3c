//! # Catalog Storage
//!
//! JSON files for catalog items, materials, and saved filter presets.
//!
//! Item files come in two shapes: an object with `items` and an optional
//! `tags` vocabulary, or a bare array of items from older saves. Material
//! files likewise accept `{ "materials": [...] }` or a bare array.

use crate::{Catalog, FilterSpec, LootItem, LootResult, Material};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Named filter presets, ordered by name.
pub type Presets = BTreeMap<String, FilterSpec>;

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsFile {
    Tagged {
        #[serde(default)]
        items: Vec<LootItem>,
        #[serde(default)]
        tags: Vec<String>,
    },
    Bare(Vec<LootItem>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialsFile {
    Wrapped { materials: Vec<Material> },
    Bare(Vec<Material>),
}

#[derive(Serialize)]
struct ItemsFileRef<'a> {
    items: &'a [LootItem],
    tags: Vec<String>,
}

#[derive(Serialize)]
struct MaterialsFileRef<'a> {
    materials: &'a [Material],
}

/// Loads catalog items and the tag vocabulary; materials are left empty.
///
/// A file without a `tags` key gets an empty vocabulary, so
/// [`Catalog::all_tags`] falls back to the tags the items use.
pub fn load_items(path: impl AsRef<Path>) -> LootResult<Catalog> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let catalog = match serde_json::from_str::<ItemsFile>(&data)? {
        ItemsFile::Tagged { items, tags } => Catalog {
            items,
            materials: Vec::new(),
            tags,
        },
        ItemsFile::Bare(items) => Catalog::new(items),
    };
    log::debug!("Loaded {} items from {}", catalog.items.len(), path.display());
    Ok(catalog)
}

/// Saves items with the catalog's full tag vocabulary.
pub fn save_items(catalog: &Catalog, path: impl AsRef<Path>) -> LootResult<()> {
    let file = ItemsFileRef {
        items: &catalog.items,
        tags: catalog.all_tags(),
    };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

/// Loads materials. A missing file means no materials have been defined yet.
pub fn load_materials(path: impl AsRef<Path>) -> LootResult<Vec<Material>> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No material file at {}", path.display());
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    let materials = match serde_json::from_str::<MaterialsFile>(&data)? {
        MaterialsFile::Wrapped { materials } | MaterialsFile::Bare(materials) => materials,
    };
    log::debug!("Loaded {} materials from {}", materials.len(), path.display());
    Ok(materials)
}

pub fn save_materials(materials: &[Material], path: impl AsRef<Path>) -> LootResult<()> {
    let file = MaterialsFileRef { materials };
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

/// Loads items and materials into one validated catalog.
pub fn load_catalog(
    items_path: impl AsRef<Path>,
    materials_path: impl AsRef<Path>,
) -> LootResult<Catalog> {
    let catalog = load_items(items_path)?.with_materials(load_materials(materials_path)?);
    catalog.validate()?;
    Ok(catalog)
}

/// Loads saved presets. A missing file yields no presets.
pub fn load_presets(path: impl AsRef<Path>) -> LootResult<Presets> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Presets::new());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_presets(presets: &Presets, path: impl AsRef<Path>) -> LootResult<()> {
    fs::write(path, serde_json::to_string_pretty(presets)?)?;
    Ok(())
}
