use crate::shared::*;

/// Populate the DecorationRegistry. Bonuses are additive fractions summed
/// over every placed decoration and consumed as `1 + total` by the income
/// pipeline — no diminishing returns.
pub fn populate_decorations(registry: &mut DecorationRegistry) {
    registry.defs = vec![
        DecorationDef {
            id: "lights",
            name: "Christmas Lights",
            description: "Productivity +2%",
            cost: 500,
            bonus: 0.02,
        },
        DecorationDef {
            id: "ornament",
            name: "Glass Ornament",
            description: "Productivity +1%",
            cost: 300,
            bonus: 0.01,
        },
        DecorationDef {
            id: "candy_cane",
            name: "Candy Cane",
            description: "Productivity +1%",
            cost: 200,
            bonus: 0.01,
        },
        DecorationDef {
            id: "snowman",
            name: "Snowman",
            description: "Productivity +3%",
            cost: 800,
            bonus: 0.03,
        },
        DecorationDef {
            id: "wreath",
            name: "Wreath",
            description: "Productivity +2.5%",
            cost: 600,
            bonus: 0.025,
        },
        DecorationDef {
            id: "north_star",
            name: "North Star",
            description: "Productivity +5%",
            cost: 1_500,
            bonus: 0.05,
        },
    ];
}
