//! # Loot Selection
//!
//! Draws eligible catalog items uniformly at random, with replacement, until
//! the point budget runs out.
//!
//! Each round recomputes the affordable set (eligible items whose base cost
//! fits the remaining budget) and draws one item from it. Every accepted
//! draw spends at least `0.0001` points, so the loop always ends.

use crate::{FilterSpec, LootItem, LootResult, Points, RandomSource};

/// Outcome of handing one drawn item to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Draw<T> {
    /// Keep the result and charge `cost` against the budget.
    ///
    /// `cost` must be positive and no more than the remaining budget.
    Take { value: T, cost: Points },
    /// Discard the draw and stop offering this catalog item for the rest of
    /// the call.
    Reject,
}

/// Items in `items` that satisfy every predicate in `spec`.
///
/// Items with a zero point value are skipped with a warning; charging them
/// would never shrink the budget.
pub fn eligible<'a>(items: &'a [LootItem], spec: &FilterSpec) -> Vec<&'a LootItem> {
    items
        .iter()
        .filter(|item| {
            if item.point_value.is_zero() {
                log::warn!("Skipping {} with non-positive point value", item.name);
                return false;
            }
            spec.matches(item)
        })
        .collect()
}

/// Runs the budget loop over `candidates`, handing each drawn item and the
/// remaining budget to `accept`.
pub fn draw_within_budget<'a, T, R, F>(
    candidates: &[&'a LootItem],
    budget: Points,
    rng: &mut R,
    mut accept: F,
) -> LootResult<Vec<T>>
where
    R: RandomSource + ?Sized,
    F: FnMut(&'a LootItem, Points, &mut R) -> LootResult<Draw<T>>,
{
    let mut pool: Vec<&'a LootItem> = candidates.to_vec();
    let mut remaining = budget;
    let mut drawn = Vec::new();

    while !remaining.is_zero() {
        let affordable: Vec<&'a LootItem> = pool
            .iter()
            .copied()
            .filter(|item| item.point_value <= remaining)
            .collect();
        if affordable.is_empty() {
            break;
        }

        let item = affordable[rng.pick(affordable.len())];
        log::trace!("Drew {} with {} points remaining", item.name, remaining);

        match accept(item, remaining, &mut *rng)? {
            Draw::Take { value, cost } => {
                let cost = cost.max(Points::MIN_POSITIVE);
                remaining = remaining.saturating_sub(cost);
                drawn.push(value);
            }
            Draw::Reject => pool.retain(|candidate| !std::ptr::eq(*candidate, item)),
        }
    }

    log::debug!(
        "Drew {} items from {} candidates, {} points unspent",
        drawn.len(),
        candidates.len(),
        remaining
    );
    Ok(drawn)
}

/// Selects catalog items for `spec`, charging each draw its base cost.
///
/// The result is untemplated: placeholder names are expanded per occurrence
/// by the generator. An empty catalog, a zero budget, or a catalog where
/// nothing is affordable all yield an empty list.
///
/// # Examples
///
/// ```
/// use loot_generator::{select, FilterSpec, LootItem, Points, ScriptedSource};
///
/// let items = vec![LootItem::new("Coin", 1, Points::from_whole(1))];
/// let mut rng = ScriptedSource::default();
/// let picked = select(&items, &FilterSpec::new(3), &mut rng).unwrap();
/// assert_eq!(picked.len(), 3);
/// ```
pub fn select<'a, R>(items: &'a [LootItem], spec: &FilterSpec, rng: &mut R) -> LootResult<Vec<&'a LootItem>>
where
    R: RandomSource + ?Sized,
{
    spec.validate()?;
    let candidates = eligible(items, spec);
    log::debug!("{} of {} items eligible", candidates.len(), items.len());

    draw_within_budget(&candidates, Points::from_whole(spec.budget), rng, |item, _, _| {
        Ok(Draw::Take {
            value: item,
            cost: item.point_value,
        })
    })
}
