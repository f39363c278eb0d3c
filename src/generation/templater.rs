//! # Name Templating
//!
//! Expands material placeholders in item names.
//!
//! A placeholder is a bracketed list of material types, optionally ending in
//! an `o` segment that makes it optional:
//!
//! ```text
//! [Metal]              one Metal material
//! [Wood/Metal/Stone]   one material of any listed type
//! [Stone/o]            a Stone material, or nothing
//! ```
//!
//! Type names match [`MaterialType`](crate::MaterialType) names without
//! regard to case. Bracketed text outside this grammar (`[+1]`, `[]`,
//! `[Metal/]`) is ordinary name text and is left alone.
//!
//! An optional placeholder first flips a fair coin between staying empty and
//! being filled. Filled placeholders pick uniformly among the matching
//! materials and multiply the running modifier by the pick's modifier.

use crate::{LootError, LootResult, Material, RandomSource};

/// A placeholder found in a name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte range of the token, brackets included
    pub span: std::ops::Range<usize>,
    /// Type names as written
    pub types: Vec<String>,
    pub optional: bool,
}

impl Placeholder {
    /// Materials whose type is one of this placeholder's types.
    pub fn candidates<'m>(&self, materials: &'m [Material]) -> Vec<&'m Material> {
        materials
            .iter()
            .filter(|m| self.types.iter().any(|t| m.material_type.matches_name(t)))
            .collect()
    }
}

/// A fully expanded name and the product of the modifiers used.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub name: String,
    pub modifier: f64,
}

/// Parses the inside of a bracket pair; `None` when it is not a placeholder.
fn parse_token(inner: &str) -> Option<(Vec<String>, bool)> {
    let segments: Vec<&str> = inner.split('/').collect();
    let is_type = |s: &&str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
    if !segments.iter().all(is_type) {
        return None;
    }

    match segments.split_last() {
        Some((last, rest)) if !rest.is_empty() && last.eq_ignore_ascii_case("o") => {
            Some((rest.iter().map(|s| s.to_string()).collect(), true))
        }
        _ => Some((segments.iter().map(|s| s.to_string()).collect(), false)),
    }
}

/// Finds every placeholder in `template`, left to right.
///
/// # Examples
///
/// ```
/// use loot_generator::parse_placeholders;
///
/// let tokens = parse_placeholders("[Metal] [Stone/o] Earring");
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].types, vec!["Metal"]);
/// assert!(tokens[1].optional);
///
/// assert!(parse_placeholders("Sword [+1]").is_empty());
/// ```
pub fn parse_placeholders(template: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut offset = 0;

    while let Some(open) = template[offset..].find('[').map(|i| i + offset) {
        let Some(close) = template[open + 1..].find(']').map(|i| i + open + 1) else {
            break;
        };
        let inner = &template[open + 1..close];

        // A stray '[' inside the brackets means the real token starts later.
        if let Some(nested) = inner.rfind('[') {
            offset = open + 1 + nested;
            continue;
        }

        match parse_token(inner) {
            Some((types, optional)) => {
                placeholders.push(Placeholder {
                    span: open..close + 1,
                    types,
                    optional,
                });
                offset = close + 1;
            }
            None => offset = open + 1,
        }
    }

    placeholders
}

/// Smallest modifier any resolution of `template` can produce.
///
/// Optional placeholders may stay empty, so they contribute at most 1.
/// Required placeholders without candidates contribute 1; resolving them
/// fails anyway.
///
/// # Examples
///
/// ```
/// use loot_generator::{cheapest_modifier, Material, MaterialType};
///
/// let materials = vec![
///     Material::new("Iron", 1.0, MaterialType::Metal),
///     Material::new("Gold", 1.5, MaterialType::Metal),
///     Material::new("Ruby", 2.0, MaterialType::Stone),
/// ];
/// assert_eq!(cheapest_modifier("[Metal] [Stone/o] Earring", &materials), 1.0);
/// assert_eq!(cheapest_modifier("[Stone] Idol", &materials), 2.0);
/// ```
pub fn cheapest_modifier(template: &str, materials: &[Material]) -> f64 {
    parse_placeholders(template)
        .iter()
        .map(|placeholder| {
            let cheapest = placeholder
                .candidates(materials)
                .iter()
                .map(|m| m.modifier)
                .reduce(f64::min);
            match (cheapest, placeholder.optional) {
                (Some(modifier), true) => modifier.min(1.0),
                (Some(modifier), false) => modifier,
                (None, _) => 1.0,
            }
        })
        .product()
}

/// Expands every placeholder in `template` using `materials`.
///
/// Names without placeholders come back unchanged with a modifier of 1.
/// Otherwise the expanded name has its whitespace collapsed and trimmed, so
/// an empty optional placeholder leaves no double space behind.
///
/// Draws from `rng` left to right: one pick per required placeholder, and
/// for an optional one a coin flip, then a pick only when filled with
/// candidates available.
///
/// # Errors
///
/// [`LootError::Resolution`] when a required placeholder has no material of
/// any listed type.
///
/// # Examples
///
/// ```
/// use loot_generator::{resolve_name, Material, MaterialType, ScriptedSource};
///
/// let materials = vec![Material::new("Iron", 1.0, MaterialType::Metal)];
/// let mut rng = ScriptedSource::new(vec![0]);
///
/// let resolved = resolve_name("[Metal] Dagger", &materials, &mut rng).unwrap();
/// assert_eq!(resolved.name, "Iron Dagger");
/// assert_eq!(resolved.modifier, 1.0);
/// ```
pub fn resolve_name<R>(template: &str, materials: &[Material], rng: &mut R) -> LootResult<Resolution>
where
    R: RandomSource + ?Sized,
{
    let placeholders = parse_placeholders(template);
    if placeholders.is_empty() {
        return Ok(Resolution {
            name: template.to_string(),
            modifier: 1.0,
        });
    }

    let mut expanded = String::with_capacity(template.len());
    let mut modifier = 1.0;
    let mut cursor = 0;

    for placeholder in &placeholders {
        expanded.push_str(&template[cursor..placeholder.span.start]);
        cursor = placeholder.span.end;

        let token = &template[placeholder.span.clone()];
        if placeholder.optional && rng.pick(2) == 0 {
            log::trace!("Optional placeholder {} left empty", token);
            continue;
        }

        let candidates = placeholder.candidates(materials);
        if candidates.is_empty() {
            if placeholder.optional {
                log::trace!("No material for optional placeholder {}", token);
                continue;
            }
            return Err(LootError::Resolution {
                template: template.to_string(),
                token: token.to_string(),
            });
        }

        let material = candidates[rng.pick(candidates.len())];
        log::trace!("Placeholder {} resolved to {}", token, material.name);
        expanded.push_str(&material.name);
        modifier *= material.modifier;
    }
    expanded.push_str(&template[cursor..]);

    Ok(Resolution {
        name: expanded.split_whitespace().collect::<Vec<_>>().join(" "),
        modifier,
    })
}
