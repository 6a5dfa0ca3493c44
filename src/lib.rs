//! MouseHunt Shields - seasonal skins for the HUD shield badge
//!
//! Core modules:
//! - `settings`: Persisted toggles in a shared LocalStorage blob
//! - `variant`: The shield skin catalog
//! - `shield`: Skin selection and badge class application
//! - `page`: Page-change detection over the HUD container
//! - `panel`: Toggle rows on the host's preferences page

pub mod page;
pub mod panel;
pub mod settings;
pub mod shield;
pub mod variant;

pub use settings::{SettingsBlob, SettingsStore};
pub use variant::{ShieldVariant, SHIELD_CHOICES};

/// Host page anchors, storage keys, and timing
pub mod consts {
    /// LocalStorage key for the settings blob. Sibling scripts from the
    /// same family share this key, so unknown entries must survive round
    /// trips.
    pub const SETTINGS_STORAGE_KEY: &str = "mh-mouseplace-settings";

    /// Id of the HUD container whose first class names the current page.
    pub const CONTAINER_ID: &str = "mousehuntContainer";

    /// Selector for the HUD shield badge.
    pub const SHIELD_SELECTOR: &str = ".mousehuntHud-shield";

    /// Selector for the pane on the preferences page that hosts setting rows.
    pub const SETTINGS_PANE_SELECTOR: &str = ".mousehuntHud-page-tabContent.game_settings";

    /// Page slug under which setting rows may be injected.
    pub const PREFERENCES_PAGE: &str = "preferences";

    /// Id prefix for injected setting rows; the full id appends the key.
    pub const SETTING_ROW_PREFIX: &str = "mh-mouseplace-setting-";

    /// How long the saved-confirmation style stays on a toggled row, in ms.
    pub const SAVED_FLASH_MS: i32 = 1_000;
}
