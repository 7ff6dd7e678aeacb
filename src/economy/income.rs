//! The passive income pipeline.
//!
//! Once per second the tick sums every active building's per-level income,
//! applies the global multipliers in a fixed order, floors once at the end,
//! and credits the ledger. Multiplier order:
//!
//!   floor(base_sum × building_efficiency × production_speed
//!         × production_buff × holiday_synergy × (1 + decoration_bonus))
//!
//! Offline catch-up uses `base_income_sum` alone: multipliers are a reward
//! for being present.

use bevy::prelude::*;

use crate::research;
use crate::shared::*;

#[derive(Resource, Debug)]
pub struct IncomeTick {
    pub timer: Timer,
}

impl Default for IncomeTick {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(INCOME_TICK_SECS, TimerMode::Repeating),
        }
    }
}

/// Sum of per-level incomes over every active building, before multipliers.
pub fn base_income_sum(workshop: &WorkshopState, registry: &BuildingRegistry) -> u64 {
    workshop
        .buildings
        .iter()
        .filter_map(|spot| registry.get(spot.kind).map(|def| spot.income(def)))
        .sum()
}

/// Full pipeline for one tick's payout.
pub fn income_per_tick(
    workshop: &WorkshopState,
    buildings: &BuildingRegistry,
    research_state: &ResearchState,
    research_registry: &ResearchRegistry,
    buffs: &ActiveBuffs,
    decorations: &DecorationState,
    decoration_registry: &DecorationRegistry,
) -> u64 {
    let base = base_income_sum(workshop, buildings) as f64;
    if base == 0.0 {
        return 0;
    }
    let efficiency = research::building_efficiency_multiplier(research_state, research_registry);
    let speed = research::production_speed_multiplier(research_state, research_registry);
    let production_buff = buffs.multiplier(BuffType::Production);
    let synergy =
        research::holiday_synergy_multiplier(research_state, research_registry, buffs.buffs.len());
    let decoration = 1.0 + decorations.total_bonus(decoration_registry);

    (base
        * efficiency as f64
        * speed as f64
        * production_buff as f64
        * synergy as f64
        * decoration as f64)
        .floor() as u64
}

pub fn tick_income(
    time: Res<Time>,
    mut tick: ResMut<IncomeTick>,
    workshop: Res<WorkshopState>,
    buildings: Res<BuildingRegistry>,
    research_state: Res<ResearchState>,
    research_registry: Res<ResearchRegistry>,
    buffs: Res<ActiveBuffs>,
    decorations: Res<DecorationState>,
    decoration_registry: Res<DecorationRegistry>,
    mut ledger: ResMut<EconomyLedger>,
) {
    tick.timer.tick(time.delta());
    if !tick.timer.just_finished() {
        return;
    }

    // A frame hitch can complete the repeating timer more than once.
    let ticks = tick.timer.times_finished_this_tick() as u64;
    let payout = income_per_tick(
        &workshop,
        &buildings,
        &research_state,
        &research_registry,
        &buffs,
        &decorations,
        &decoration_registry,
    ) * ticks;

    if payout > 0 {
        ledger.add_coins(payout);
    }
}

/// Credits the offline amount computed by the save plugin and tells the
/// player what happened while they were away.
pub fn credit_offline_income(
    mut events: EventReader<OfflineIncomeEvent>,
    mut ledger: ResMut<EconomyLedger>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        if event.amount == 0 {
            continue;
        }
        ledger.add_coins(event.amount);
        let minutes = event.elapsed_secs / 60;
        info!(
            "[Economy] Offline income: +{} coins for {}s away",
            event.amount, event.elapsed_secs
        );
        toasts.send(ToastEvent {
            message: format!(
                "Welcome back! Your workshop earned {} coins in {}m",
                event.amount,
                minutes.max(1)
            ),
            duration_secs: 5.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn active_workshop() -> (WorkshopState, BuildingRegistry) {
        let mut registry = BuildingRegistry::default();
        data::buildings::populate_buildings(&mut registry);
        let mut workshop = data::fresh_workshop_state();
        // Repair the two starter toy makers: 5 income each at level 1.
        workshop.building_mut("toy_1").unwrap().state = BuildingState::Active;
        workshop.building_mut("toy_2").unwrap().state = BuildingState::Active;
        (workshop, registry)
    }

    fn neutral_research() -> (ResearchState, ResearchRegistry) {
        let mut registry = ResearchRegistry::default();
        data::research::populate_research(&mut registry);
        let state = data::fresh_research_state(&registry);
        (state, registry)
    }

    #[test]
    fn test_base_sum_counts_only_active_buildings() {
        let (workshop, registry) = active_workshop();
        // Nine of eleven slots are still broken.
        assert_eq!(base_income_sum(&workshop, &registry), 10);
    }

    #[test]
    fn test_pipeline_neutral_equals_base() {
        let (workshop, buildings) = active_workshop();
        let (research_state, research_registry) = neutral_research();
        let payout = income_per_tick(
            &workshop,
            &buildings,
            &research_state,
            &research_registry,
            &ActiveBuffs::default(),
            &DecorationState::default(),
            &DecorationRegistry::default(),
        );
        assert_eq!(payout, 10);
    }

    #[test]
    fn test_pipeline_multiplies_then_floors_once() {
        let (workshop, buildings) = active_workshop();
        let (mut research_state, research_registry) = neutral_research();
        research_state.upgrades.get_mut("building_eff").unwrap().level = 5; // ×1.2
        let buffs = ActiveBuffs {
            buffs: vec![ActiveBuff {
                buff_type: BuffType::Production,
                magnitude: 1.25,
                remaining_secs: 30.0,
            }],
        };
        let payout = income_per_tick(
            &workshop,
            &buildings,
            &research_state,
            &research_registry,
            &buffs,
            &DecorationState::default(),
            &DecorationRegistry::default(),
        );
        // floor(10 × 1.2 × 1.25) = 15, not floor(10×1.2) then ×1.25.
        assert_eq!(payout, 15);
    }

    #[test]
    fn test_decoration_bonus_is_additive_fraction() {
        let (workshop, buildings) = active_workshop();
        let (research_state, research_registry) = neutral_research();
        let mut deco_registry = DecorationRegistry::default();
        data::decorations::populate_decorations(&mut deco_registry);
        let decorations = DecorationState {
            placed: vec![
                PlacedDecoration {
                    serial: 1,
                    def_id: "north_star".into(), // +5%
                    x: 100.0,
                    y: 100.0,
                },
                PlacedDecoration {
                    serial: 2,
                    def_id: "north_star".into(),
                    x: 200.0,
                    y: 100.0,
                },
            ],
            next_serial: 3,
        };
        let payout = income_per_tick(
            &workshop,
            &buildings,
            &research_state,
            &research_registry,
            &ActiveBuffs::default(),
            &decorations,
            &deco_registry,
        );
        assert_eq!(payout, 11); // floor(10 × 1.10)
    }

    #[test]
    fn test_all_broken_pays_nothing() {
        let mut registry = BuildingRegistry::default();
        data::buildings::populate_buildings(&mut registry);
        let workshop = data::fresh_workshop_state();
        assert_eq!(base_income_sum(&workshop, &registry), 0);
    }
}
