//! MouseHunt Shields entry point
//!
//! Wires page-change notifications to shield swapping and settings-row
//! registration.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use mh_shields::SHIELD_CHOICES;
    use mh_shields::page::{DomPageWatcher, PageWatcher};
    use mh_shields::panel::{self, DomSettingsPanel};
    use mh_shields::settings::LocalStorageStore;
    use mh_shields::shield;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("MouseHunt Shields starting...");

        let watcher = DomPageWatcher::new();

        // Reroll and reapply the badge skin on every page change.
        watcher.on_change(Box::new(|| {
            let store = LocalStorageStore;
            shield::swap_shield(
                &SHIELD_CHOICES,
                &store,
                shield::badge_class_list().as_ref(),
                shield::random_index,
            );
        }));

        // Keep the preferences rows registered; off the preferences page
        // this is a no-op.
        watcher.on_change(Box::new(|| {
            let panel = DomSettingsPanel::new(LocalStorageStore);
            panel::register_shield_settings(&panel, &SHIELD_CHOICES);
        }));

        log::info!("MouseHunt Shields running");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("MouseHunt Shields (native) starting...");
    log::info!("Native mode is a dry run - build with `trunk serve` for the browser version");

    println!("\nRunning selection dry run...");
    demo_selection();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_selection() {
    use mh_shields::SHIELD_CHOICES;
    use mh_shields::settings::{MemoryStore, SettingsStore};
    use mh_shields::shield::{self, TokenSet};
    use rand::Rng;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let store = MemoryStore::new();
    store.set("halloween-shield", true);
    store.set("valentines-shield", true);

    let badge = TokenSet::with_tokens(&["mousehuntHud-shield"]);
    let mut rng = Pcg32::seed_from_u64(7);

    for _ in 0..5 {
        shield::swap_shield(&SHIELD_CHOICES, &store, Some(&badge), |n| {
            rng.random_range(0..n)
        });
        println!("badge classes: {}", badge.snapshot().join(" "));
    }

    let skins: Vec<String> = badge
        .snapshot()
        .into_iter()
        .filter(|token| token != "mousehuntHud-shield")
        .collect();
    assert_eq!(skins.len(), 1, "exactly one skin should be applied");
    println!("✓ Selection dry run passed!");
}
