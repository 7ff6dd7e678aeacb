//! UI domain — HUD, panels, toasts, floating text, and audio playback.
//!
//! The UI reads shared resources and writes typed intent events; it never
//! mutates gameplay state directly.

pub mod audio;
pub mod cookie_shop;
pub mod floating_text;
pub mod hud;
pub mod panels;
pub mod research_panel;
pub mod toast;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<panels::PlacementSelection>()
            .init_resource::<research_panel::ResearchPanelTab>();

        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);

        // Toasts and floating text work in every state.
        app.add_systems(
            Update,
            (
                toast::handle_toast_events,
                toast::update_toasts,
                toast::wire_save_toasts,
                floating_text::handle_floating_text_events,
                floating_text::update_floating_text,
                audio::handle_play_sfx,
            ),
        );

        app.add_systems(
            Update,
            (
                hud::update_hud,
                panels::open_panels,
                panels::handle_placement_keys,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ── Research panel ─────────────────────────────────────────────
        app.add_systems(OnEnter(GameState::Research), research_panel::spawn_panel);
        app.add_systems(OnExit(GameState::Research), research_panel::despawn_panel);
        app.add_systems(
            Update,
            (
                research_panel::panel_input,
                research_panel::refresh_panel,
            )
                .run_if(in_state(GameState::Research)),
        );

        // ── Cookie shop ────────────────────────────────────────────────
        app.add_systems(OnEnter(GameState::CookieShop), cookie_shop::spawn_panel);
        app.add_systems(OnExit(GameState::CookieShop), cookie_shop::despawn_panel);
        app.add_systems(
            Update,
            (cookie_shop::panel_input, cookie_shop::refresh_panel)
                .run_if(in_state(GameState::CookieShop)),
        );

        info!("[UI] UiPlugin registered.");
    }
}
