//! # Loot Generation
//!
//! Runs the selection loop and templates every drawn occurrence, producing
//! the concrete loot list a game master sees.

use crate::{
    cheapest_modifier, config, draw_within_budget, eligible, resolve_name, BudgetPolicy, Catalog,
    Draw, FilterSpec, GenerationConfig, LootItem, LootResult, Period, Points, RandomSource, Size,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One piece of generated loot with its name resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLootEntry {
    /// Display name with every placeholder expanded
    pub name: String,
    pub rarity: u32,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub size: Size,
    pub period: Period,
    /// Catalog cost before material modifiers
    pub base_value: Points,
    /// Product of the modifiers of every substituted material
    pub modifier: f64,
    /// `base_value` scaled by `modifier`
    pub point_value: Points,
}

impl GeneratedLootEntry {
    fn resolved(item: &LootItem, name: String, modifier: f64) -> Self {
        Self {
            name,
            rarity: item.rarity,
            description: item.description.clone(),
            tags: item.tags.clone(),
            size: item.size,
            period: item.period,
            base_value: item.point_value,
            modifier,
            point_value: item.point_value.scale(modifier),
        }
    }
}

/// Budget-driven loot generator.
///
/// # Examples
///
/// ```
/// use loot_generator::{
///     Catalog, FilterSpec, GenerationConfig, LootGenerator, LootItem, Material,
///     MaterialType, Points,
/// };
///
/// let catalog = Catalog::new(vec![
///     LootItem::new("[Metal] Dagger", 1, Points::from_whole(10)).with_tags(["weapon"]),
///     LootItem::new("Potion", 1, Points::from_whole(5)).with_tags(["consumable"]),
/// ])
/// .with_materials(vec![Material::new("Iron", 1.0, MaterialType::Metal)]);
///
/// let config = GenerationConfig::for_testing(42);
/// let generator = LootGenerator::new(config.clone());
/// let mut rng = loot_generator::utils::create_rng(&config);
///
/// let loot = generator
///     .generate(&catalog, &FilterSpec::new(30).include_tag("weapon"), &mut rng)
///     .unwrap();
/// assert_eq!(loot.len(), 3);
/// assert!(loot.iter().all(|entry| entry.name == "Iron Dagger"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LootGenerator {
    pub config: GenerationConfig,
}

impl LootGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Generator charging catalog values only.
    pub fn base_cost() -> Self {
        Self::new(GenerationConfig {
            budget_policy: BudgetPolicy::BaseCost,
            ..GenerationConfig::new()
        })
    }

    /// Generator charging the material-adjusted value of each entry.
    pub fn modified_cost() -> Self {
        Self::new(GenerationConfig {
            budget_policy: BudgetPolicy::ModifiedCost,
            ..GenerationConfig::new()
        })
    }

    /// Generates loot from `catalog` for `spec`.
    ///
    /// Each drawn occurrence is templated on its own, so two draws of
    /// `[Metal] Ring` can come out as different metals.
    ///
    /// When the resolved cost of a draw overshoots the remaining budget, the
    /// materials are rolled again, up to
    /// [`MAX_RESOLUTION_ATTEMPTS`](crate::config::MAX_RESOLUTION_ATTEMPTS)
    /// times. The item leaves the pool once no roll fits or even its
    /// cheapest materials cannot.
    ///
    /// # Errors
    ///
    /// - [`LootError::InvalidFilter`](crate::LootError::InvalidFilter) for an
    ///   incoherent `spec`
    /// - [`LootError::Resolution`](crate::LootError::Resolution) when a drawn
    ///   item has a required placeholder no material can fill; no partial
    ///   loot is returned
    pub fn generate<R>(
        &self,
        catalog: &Catalog,
        spec: &FilterSpec,
        rng: &mut R,
    ) -> LootResult<Vec<GeneratedLootEntry>>
    where
        R: RandomSource + ?Sized,
    {
        spec.validate()?;
        let candidates = eligible(&catalog.items, spec);
        log::debug!(
            "{} of {} items eligible for a {} point budget",
            candidates.len(),
            catalog.items.len(),
            spec.budget
        );

        let budget = Points::from_whole(spec.budget);
        let policy = self.config.budget_policy;
        let materials = &catalog.materials;

        let loot = draw_within_budget(&candidates, budget, rng, |item, remaining, rng| {
            // The base cost fits, but the chosen materials may not.
            for _ in 0..config::MAX_RESOLUTION_ATTEMPTS {
                let resolution = resolve_name(&item.name, materials, &mut *rng)?;
                let entry = GeneratedLootEntry::resolved(item, resolution.name, resolution.modifier);
                let cost = policy.cost(entry.base_value, entry.point_value);
                if cost <= remaining {
                    return Ok(Draw::Take { value: entry, cost });
                }

                let floor = item.point_value.scale(cheapest_modifier(&item.name, materials));
                if policy.cost(item.point_value, floor) > remaining {
                    break;
                }
                log::trace!("{} costs {} with {} remaining, rerolling", entry.name, cost, remaining);
            }

            log::debug!("Dropping {}: no affordable materials with {} remaining", item.name, remaining);
            Ok(Draw::Reject)
        })?;

        log::info!(
            "Generated {} loot entries worth {} points",
            loot.len(),
            loot.iter().map(|entry| entry.point_value).sum::<Points>()
        );
        Ok(loot)
    }
}
