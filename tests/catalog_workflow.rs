//! End-to-end: bulk text records saved to disk, reloaded, and turned into loot.

use loot_generator::{
    load_catalog, load_presets, parse_items_text, parse_materials_text, save_items,
    save_materials, save_presets, Catalog, FilterSpec, LootError, LootGenerator, LootResult,
    LootSummary, Period, Presets, ScriptedSource, Size,
};

const ITEMS: &str = "
[Metal] Dagger|1|A short blade|10|weapon,melee|small|medieval
[Metal] [Stone/o] Earring|2|Jewelry|4|jewelry|tiny|medieval
Healing Draught|1|Restores vigor|3|consumable|tiny|medieval
Plasma Rifle|4|Hums quietly|25|weapon,ranged|midsize|spacer
";

const MATERIALS: &str = "
Iron|1.0|Metal
Gold|1.5|Metal
Ruby|2.0|Stone
";

#[test]
fn test_text_to_disk_to_loot() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let items_path = dir.path().join("loot_items.json");
    let materials_path = dir.path().join("materials.json");

    let catalog = Catalog::new(parse_items_text(ITEMS)?);
    save_items(&catalog, &items_path)?;
    save_materials(&parse_materials_text(MATERIALS)?, &materials_path)?;

    let catalog = load_catalog(&items_path, &materials_path)?;
    assert_eq!(catalog.items.len(), 4);
    assert_eq!(catalog.materials.len(), 3);
    assert!(catalog.all_tags().contains(&"jewelry".to_string()));

    // Only the earring is tiny jewelry; every draw takes the first option.
    let spec = FilterSpec::new(8).include_tag("jewelry").max_size(Size::Tiny);
    let loot = LootGenerator::default().generate(&catalog, &spec, &mut ScriptedSource::default())?;

    assert_eq!(loot.len(), 2);
    assert!(loot.iter().all(|entry| entry.name == "Iron Earring"));
    assert_eq!(
        LootSummary::from_entries(&loot).to_string(),
        "2x Iron Earring (8)\nTotal: 8 points"
    );
    Ok(())
}

#[test]
fn test_optional_stone_filled() -> LootResult<()> {
    let catalog = Catalog::new(parse_items_text(ITEMS)?).with_materials(parse_materials_text(MATERIALS)?);
    // Enough for one earring at its resolved 12 points.
    let spec = FilterSpec::new(12).include_tag("jewelry");
    // item, metal (Gold), optional coin flip (filled), stone (Ruby)
    let mut rng = ScriptedSource::new(vec![0, 1, 1, 0]);

    let loot = LootGenerator::default().generate(&catalog, &spec, &mut rng)?;
    assert_eq!(loot.len(), 1);
    assert_eq!(loot[0].name, "Gold Ruby Earring");
    assert!((loot[0].modifier - 3.0).abs() < 1e-12);
    assert_eq!(loot[0].point_value.to_string(), "12");
    Ok(())
}

#[test]
fn test_period_filter_excludes_spacer_gear() -> LootResult<()> {
    let catalog = Catalog::new(parse_items_text(ITEMS)?).with_materials(parse_materials_text(MATERIALS)?);
    let spec = FilterSpec::new(100)
        .include_tag("weapon")
        .allow_period(Period::Spacer);

    let loot = LootGenerator::default().generate(&catalog, &spec, &mut ScriptedSource::default())?;
    assert_eq!(loot.len(), 4);
    assert!(loot.iter().all(|entry| entry.name == "Plasma Rifle"));
    Ok(())
}

#[test]
fn test_missing_materials_fail_generation() -> LootResult<()> {
    let catalog = Catalog::new(parse_items_text(ITEMS)?);
    let spec = FilterSpec::new(10).include_tag("melee");

    let result = LootGenerator::default().generate(&catalog, &spec, &mut ScriptedSource::default());
    assert!(matches!(result, Err(LootError::Resolution { .. })));
    Ok(())
}

#[test]
fn test_presets_drive_generation() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let presets_path = dir.path().join("presets.json");

    let mut presets = Presets::new();
    presets.insert(
        "Potion Shelf".to_string(),
        FilterSpec::new(9).include_tag("consumable"),
    );
    save_presets(&presets, &presets_path)?;

    let spec = load_presets(&presets_path)?
        .remove("Potion Shelf")
        .ok_or_else(|| LootError::PresetNotFound("Potion Shelf".to_string()))?;
    let catalog = Catalog::new(parse_items_text(ITEMS)?);
    let loot = LootGenerator::default().generate(&catalog, &spec, &mut ScriptedSource::default())?;

    assert_eq!(loot.len(), 3);
    assert!(loot.iter().all(|entry| entry.name == "Healing Draught"));
    Ok(())
}
