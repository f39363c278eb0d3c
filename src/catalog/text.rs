//! # Bulk Text Records
//!
//! Pipe-delimited item and material records, one per line, for pasting many
//! catalog entries at once.
//!
//! Items: `name|rarity|description|point_value|tag1,tag2[|size|period]`
//!
//! Materials: `name|modifier|type`

use crate::{LootError, LootItem, LootResult, Material, MaterialType, Period, Points, Size};

/// Splits non-empty lines into trimmed fields, keeping 1-based line numbers.
fn records(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line.split('|').map(str::trim).collect()))
}

fn parse_error(line: usize, reason: impl Into<String>) -> LootError {
    LootError::Parse {
        line,
        reason: reason.into(),
    }
}

/// Parses item records.
///
/// Size and period may be left off together, in which case the item gets the
/// default size and period.
///
/// # Examples
///
/// ```
/// use loot_generator::{parse_items_text, Points, Size};
///
/// let items = parse_items_text("Sword|1|Sharp blade|10|weapon,melee|large|medieval").unwrap();
/// assert_eq!(items[0].point_value, Points::from_whole(10));
/// assert_eq!(items[0].size, Size::Large);
/// ```
pub fn parse_items_text(text: &str) -> LootResult<Vec<LootItem>> {
    records(text)
        .map(|(line, fields)| {
            if fields.len() != 5 && fields.len() != 7 {
                return Err(parse_error(
                    line,
                    format!("expected 5 or 7 '|' separated fields, found {}", fields.len()),
                ));
            }

            let rarity: u32 = fields[1]
                .parse()
                .map_err(|_| parse_error(line, format!("invalid rarity {:?}", fields[1])))?;
            let point_value: Points = fields[3]
                .parse()
                .map_err(|e: LootError| parse_error(line, e.to_string()))?;
            if point_value.is_zero() {
                return Err(parse_error(line, "point value must be positive"));
            }
            let tags = fields[4]
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty());

            let mut item = LootItem::new(fields[0], rarity, point_value)
                .with_description(fields[2])
                .with_tags(tags);

            if fields.len() == 7 {
                item.size = fields[5]
                    .parse::<Size>()
                    .map_err(|e| parse_error(line, e.to_string()))?;
                item.period = fields[6]
                    .parse::<Period>()
                    .map_err(|e| parse_error(line, e.to_string()))?;
            }

            Ok(item)
        })
        .collect()
}

/// Parses material records.
pub fn parse_materials_text(text: &str) -> LootResult<Vec<Material>> {
    records(text)
        .map(|(line, fields)| {
            if fields.len() != 3 {
                return Err(parse_error(
                    line,
                    format!("expected 3 '|' separated fields, found {}", fields.len()),
                ));
            }

            let modifier: f64 = fields[1]
                .parse()
                .map_err(|_| parse_error(line, format!("invalid modifier {:?}", fields[1])))?;
            if !modifier.is_finite() || modifier <= 0.0 {
                return Err(parse_error(line, "modifier must be a positive number"));
            }
            let material_type = fields[2]
                .parse::<MaterialType>()
                .map_err(|e| parse_error(line, e.to_string()))?;

            Ok(Material::new(fields[0], modifier, material_type))
        })
        .collect()
}
