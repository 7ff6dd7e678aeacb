use crate::shared::*;

/// Populate the ResearchRegistry with all upgrade definitions.
///
/// Every upgrade starts at level 0 and its cost grows ×1.5 (floored) per
/// purchase. `effect_per_level` feeds the multiplier derivations:
/// bonus kinds read `1 + level × effect`, discount kinds `1 − level × effect`
/// (never below zero). Catalog order is the presentation order of each
/// category tab.
pub fn populate_research(registry: &mut ResearchRegistry) {
    registry.defs = vec![
        // ── Trees ───────────────────────────────────────────────────────
        ResearchDef {
            id: "tree_value",
            name: "Richer Sap",
            description: "Tree coins are worth 20% more per level",
            category: ResearchCategory::Tree,
            effect: ResearchEffectKind::TreeCoinValue,
            base_cost: 100,
            max_level: 10,
            effect_per_level: 0.20,
        },
        ResearchDef {
            id: "tree_cooldown",
            name: "Quick Shake",
            description: "Tree shake cooldown reduced 6% per level",
            category: ResearchCategory::Tree,
            effect: ResearchEffectKind::TreeCooldown,
            base_cost: 150,
            max_level: 10,
            effect_per_level: 0.06,
        },
        ResearchDef {
            id: "tree_batch",
            name: "Bountiful Branches",
            description: "Trees drop 15% more coins per shake per level",
            category: ResearchCategory::Tree,
            effect: ResearchEffectKind::TreeBatch,
            base_cost: 200,
            max_level: 10,
            effect_per_level: 0.15,
        },
        // ── Buildings ───────────────────────────────────────────────────
        ResearchDef {
            id: "prod_speed",
            name: "Faster Production",
            description: "All building production speed +5% per level",
            category: ResearchCategory::Building,
            effect: ResearchEffectKind::ProductionSpeed,
            base_cost: 100,
            max_level: 10,
            effect_per_level: 0.05,
        },
        ResearchDef {
            id: "upgrade_cost",
            name: "Cheaper Upgrades",
            description: "Building upgrade costs −3% per level",
            category: ResearchCategory::Building,
            effect: ResearchEffectKind::UpgradeCost,
            base_cost: 150,
            max_level: 10,
            effect_per_level: 0.03,
        },
        ResearchDef {
            id: "building_eff",
            name: "Efficient Buildings",
            description: "All buildings produce 4% more income per level",
            category: ResearchCategory::Building,
            effect: ResearchEffectKind::BuildingEfficiency,
            base_cost: 250,
            max_level: 10,
            effect_per_level: 0.04,
        },
        // ── Universal ───────────────────────────────────────────────────
        ResearchDef {
            id: "coin_value",
            name: "Valuable Coins",
            description: "Collected coins are worth 2% more per level",
            category: ResearchCategory::Universal,
            effect: ResearchEffectKind::CoinValue,
            base_cost: 200,
            max_level: 10,
            effect_per_level: 0.02,
        },
        ResearchDef {
            id: "player_speed",
            name: "Swift Boots",
            description: "Move 5% faster per level",
            category: ResearchCategory::Universal,
            effect: ResearchEffectKind::PlayerSpeed,
            base_cost: 120,
            max_level: 8,
            effect_per_level: 0.05,
        },
        ResearchDef {
            id: "magnet",
            name: "Pocket Magnet",
            description: "Passively pulls nearby coins; range grows per level",
            category: ResearchCategory::Universal,
            effect: ResearchEffectKind::Magnet,
            base_cost: 300,
            max_level: 5,
            effect_per_level: 1.0,
        },
        ResearchDef {
            id: "holiday_synergy",
            name: "Holiday Synergy",
            description: "Income +2% per level for each active cookie buff",
            category: ResearchCategory::Universal,
            effect: ResearchEffectKind::HolidaySynergy,
            base_cost: 500,
            max_level: 5,
            effect_per_level: 0.02,
        },
    ];
}
