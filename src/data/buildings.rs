use crate::shared::*;

/// Populate the BuildingRegistry with all building definitions.
///
/// Costs and incomes follow a roughly ×2.5 progression so each tier is a
/// meaningful saving target. Income shown is per 1 s tick at level 1; the
/// level curve is floor(base × 1.5^(level−1)).
pub fn populate_buildings(registry: &mut BuildingRegistry) {
    let defs = vec![
        BuildingDef {
            kind: BuildingKind::ToyMaker,
            name: "Toy Maker",
            description: "Crafts wooden toys",
            base_cost: 100,
            base_income: 5,
        },
        BuildingDef {
            kind: BuildingKind::GiftWrapper,
            name: "Gift Wrapper",
            description: "Wraps presents beautifully",
            base_cost: 250,
            base_income: 15,
        },
        BuildingDef {
            kind: BuildingKind::CookieFactory,
            name: "Cookie Factory",
            description: "Bakes festive cookies",
            base_cost: 500,
            base_income: 35,
        },
        BuildingDef {
            kind: BuildingKind::ElfHouse,
            name: "Elf House",
            description: "Houses productive elves",
            base_cost: 1_000,
            base_income: 100,
        },
        BuildingDef {
            kind: BuildingKind::ReindeerStable,
            name: "Reindeer Stable",
            description: "Trains magical reindeer",
            base_cost: 2_500,
            base_income: 250,
        },
        BuildingDef {
            kind: BuildingKind::CandyCaneForge,
            name: "Candy Cane Forge",
            description: "Forges striped candy canes",
            base_cost: 5_000,
            base_income: 500,
        },
        BuildingDef {
            kind: BuildingKind::StockingStuffer,
            name: "Stocking Stuffer",
            description: "Fills stockings with goodies",
            base_cost: 10_000,
            base_income: 1_000,
        },
        BuildingDef {
            kind: BuildingKind::SnowglobeFactory,
            name: "Snow Globe Factory",
            description: "Creates magical snow globes",
            base_cost: 25_000,
            base_income: 2_500,
        },
        BuildingDef {
            kind: BuildingKind::OrnamentWorkshop,
            name: "Ornament Workshop",
            description: "Crafts delicate ornaments",
            base_cost: 50_000,
            base_income: 5_000,
        },
        BuildingDef {
            kind: BuildingKind::SantasOffice,
            name: "Santa's Office",
            description: "The big man himself!",
            base_cost: 100_000,
            base_income: 10_000,
        },
    ];

    for def in defs {
        registry.defs.insert(def.kind, def);
    }
}
