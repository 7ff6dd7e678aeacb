use crate::shared::*;

/// Populate the CookieRegistry with the bakery's five perks.
///
/// Production magnitudes are income multipliers; Speed multiplies player
/// movement; Magnet has no magnitude of its own (the pull radius comes from
/// the buff being active plus the magnet research level).
pub fn populate_cookies(registry: &mut CookieRegistry) {
    registry.cookies = vec![
        CookieDef {
            kind: CookieKind::Basic,
            name: "Basic Cookie",
            description: "Production +25% for 60s",
            cost: 50,
            buff_type: BuffType::Production,
            magnitude: 1.25,
            duration_secs: 60.0,
        },
        CookieDef {
            kind: CookieKind::Chocolate,
            name: "Chocolate Cookie",
            description: "Production +50% for 90s",
            cost: 120,
            buff_type: BuffType::Production,
            magnitude: 1.5,
            duration_secs: 90.0,
        },
        CookieDef {
            kind: CookieKind::Gingerbread,
            name: "Gingerbread Cookie",
            description: "Production +100% for 45s",
            cost: 250,
            buff_type: BuffType::Production,
            magnitude: 2.0,
            duration_secs: 45.0,
        },
        CookieDef {
            kind: CookieKind::NorthPoleMagnet,
            name: "North Pole Magnet",
            description: "Pulls nearby coins to you for 45s",
            cost: 180,
            buff_type: BuffType::Magnet,
            magnitude: 1.0,
            duration_secs: 45.0,
        },
        CookieDef {
            kind: CookieKind::SugarRush,
            name: "Sugar Rush",
            description: "Movement speed +50% for 45s",
            cost: 200,
            buff_type: BuffType::Speed,
            magnitude: 1.5,
            duration_secs: 45.0,
        },
    ];
}
