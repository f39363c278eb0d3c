//! # Loot Generator
//!
//! Randomized loot collections for tabletop game masters, drawn from a catalog
//! under a point budget and filtered by tags, rarity, size, and era.
//!
//! ## Architecture Overview
//!
//! The crate is split into two areas:
//!
//! - **Catalog**: item and material records, fixed-point [`Points`], and the
//!   JSON / pipe-delimited text collaborators that load them
//! - **Generation**: the [`FilterSpec`] predicates, the budget-driven
//!   [`selector`], the placeholder [`templater`], and the [`LootGenerator`]
//!   that ties them together
//!
//! The engine holds no state between calls. Catalogs are passed in by
//! reference and randomness comes through an injected [`RandomSource`], so a
//! seeded or scripted source makes every run reproducible.
//!
//! ```
//! use loot_generator::{
//!     Catalog, FilterSpec, GenerationConfig, LootGenerator, LootItem, Material,
//!     MaterialType, Points, ScriptedSource,
//! };
//!
//! let catalog = Catalog::new(vec![LootItem::new("[Metal] Dagger", 1, Points::from_whole(10))])
//!     .with_materials(vec![Material::new("Iron", 1.0, MaterialType::Metal)]);
//!
//! let generator = LootGenerator::new(GenerationConfig::default());
//! let mut rng = ScriptedSource::new(vec![0]);
//! let loot = generator.generate(&catalog, &FilterSpec::new(10), &mut rng).unwrap();
//!
//! assert_eq!(loot.len(), 1);
//! assert_eq!(loot[0].name, "Iron Dagger");
//! ```

pub mod catalog;
pub mod generation;

pub use catalog::*;
pub use generation::*;

/// Core error type for the loot generator.
#[derive(thiserror::Error, Debug)]
pub enum LootError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A required placeholder had no material of any listed type
    #[error("No material matches placeholder {token} in \"{template}\"")]
    Resolution { template: String, token: String },

    /// Filter values that cannot describe any generation request
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Catalog records that break the engine's invariants
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Bulk text record could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Named preset does not exist
    #[error("Preset not found: {0}")]
    PresetNotFound(String),
}

/// Result type used throughout the loot generator.
pub type LootResult<T> = Result<T, LootError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default locations and limits.
pub mod config {
    /// Catalog item file, relative to the working directory
    pub const DEFAULT_ITEMS_FILE: &str = "data/loot_items.json";

    /// Material file, relative to the working directory
    pub const DEFAULT_MATERIALS_FILE: &str = "data/materials.json";

    /// Saved filter presets, relative to the working directory
    pub const DEFAULT_PRESETS_FILE: &str = "data/presets.json";

    /// Budget used when none is given on the command line
    pub const DEFAULT_BUDGET: u32 = 100;

    /// Fractional units per whole point (four decimal places)
    pub const POINT_SCALE: u64 = 10_000;

    /// Material re-rolls for a drawn item whose resolved cost overshoots the
    /// remaining budget before the item is dropped from the pool
    pub const MAX_RESOLUTION_ATTEMPTS: usize = 8;
}
