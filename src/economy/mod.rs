//! Economy domain — the income tick and ledger bookkeeping.
//!
//! All cross-domain communication goes through `crate::shared::*` events and
//! resources. No other domain module is imported here except the research
//! derivation helpers, which are pure functions.

use bevy::prelude::*;

use crate::shared::*;

pub mod income;

use income::{credit_offline_income, tick_income, IncomeTick};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<IncomeTick>();

        app.add_systems(
            Update,
            (
                // Passive income accrues only while actually playing; panel
                // states pause the tick along with everything else.
                tick_income.run_if(in_state(GameState::Playing)),
                // Offline credit arrives from the save plugin right after
                // load, possibly before the first Playing frame.
                credit_offline_income,
            ),
        );

        info!("[Economy] EconomyPlugin registered.");
    }
}
