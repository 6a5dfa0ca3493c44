//! Toggle rows injected into the host's preferences page
//!
//! Rows live under a shared "Userscript Settings" header inside the game
//! settings pane. Everything here degrades to a no-op when the expected
//! markup is missing, and re-registering a row that already exists does
//! nothing, so registration can run on every page change.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::settings::{LocalStorageStore, SettingsStore};
use crate::variant::ShieldVariant;

/// The injected section header a group of rows lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSection {
    pub id: &'static str,
    pub title: &'static str,
}

/// Section holding the shield toggles. Shared with sibling scripts, hence
/// the generic title.
pub const SHIELD_SECTION: PanelSection = PanelSection {
    id: "mh-mouseplace-settings",
    title: "Userscript Settings",
};

/// One toggle row: label, storage key, default, and help text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    pub label: String,
    pub key: String,
    pub default_on: bool,
    pub description: String,
}

impl ToggleSpec {
    /// Row spec for one shield skin. All skins ship disabled.
    pub fn for_variant(variant: &ShieldVariant) -> Self {
        Self {
            label: format!("Enable {} shield", variant.label),
            key: variant.setting_key(),
            default_on: false,
            description: variant.description(),
        }
    }
}

/// Surface that can host toggle rows.
pub trait SettingsPanel {
    /// Add one toggle row under `section`. Adding a key that already has a
    /// row is a no-op.
    fn add_toggle(&self, section: &PanelSection, spec: &ToggleSpec);
}

/// Register one toggle per catalog skin. Safe to call on every page change.
pub fn register_shield_settings(panel: &dyn SettingsPanel, choices: &[ShieldVariant]) {
    for variant in choices {
        panel.add_toggle(&SHIELD_SECTION, &ToggleSpec::for_variant(variant));
    }
}

/// In-memory panel for tests and the native harness.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    rows: std::cell::RefCell<Vec<ToggleSpec>>,
}

impl RecordingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows added so far, in insertion order.
    pub fn rows(&self) -> Vec<ToggleSpec> {
        self.rows.borrow().clone()
    }
}

impl SettingsPanel for RecordingPanel {
    fn add_toggle(&self, _section: &PanelSection, spec: &ToggleSpec) {
        let mut rows = self.rows.borrow_mut();
        if rows.iter().any(|row| row.key == spec.key) {
            return;
        }
        rows.push(spec.clone());
    }
}

/// Panel that builds real rows in the host's preferences page (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct DomSettingsPanel {
    store: LocalStorageStore,
}

#[cfg(target_arch = "wasm32")]
impl DomSettingsPanel {
    pub fn new(store: LocalStorageStore) -> Self {
        Self { store }
    }
}

#[cfg(target_arch = "wasm32")]
impl SettingsPanel for DomSettingsPanel {
    fn add_toggle(&self, section: &PanelSection, spec: &ToggleSpec) {
        if crate::page::current_page().as_deref() != Some(crate::consts::PREFERENCES_PAGE) {
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(Some(container)) =
            document.query_selector(crate::consts::SETTINGS_PANE_SELECTOR)
        else {
            return;
        };
        if ensure_section(&document, &container, section).is_none() {
            return;
        }

        let row_id = format!("{}{}", crate::consts::SETTING_ROW_PREFIX, spec.key);
        if document.get_element_by_id(&row_id).is_some() {
            return;
        }
        if build_row(&document, &container, self.store, &row_id, spec).is_none() {
            log::warn!("could not build setting row for {}", spec.key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn div(document: &web_sys::Document, class: &str) -> Option<web_sys::Element> {
    let el = document.create_element("div").ok()?;
    el.set_class_name(class);
    Some(el)
}

/// Create the section header and separator unless they already exist.
#[cfg(target_arch = "wasm32")]
fn ensure_section(
    document: &web_sys::Document,
    container: &web_sys::Element,
    section: &PanelSection,
) -> Option<()> {
    if document.get_element_by_id(section.id).is_some() {
        return Some(());
    }

    let title = div(document, "gameSettingTitle")?;
    title.set_id(section.id);
    title.set_text_content(Some(section.title));
    container.append_child(&title).ok()?;

    let separator = div(document, "separator")?;
    container.append_child(&separator).ok()?;
    Some(())
}

/// Build one toggle row with the host's own settings markup and wire its
/// click handler. The handler re-reads the stored value on every click, so
/// the written value always flips the current one.
#[cfg(target_arch = "wasm32")]
fn build_row(
    document: &web_sys::Document,
    container: &web_sys::Element,
    store: LocalStorageStore,
    row_id: &str,
    spec: &ToggleSpec,
) -> Option<()> {
    let row = div(document, "settingRowTable")?;
    row.set_id(row_id);

    let setting_row = div(document, "settingRow")?;

    let label = div(document, "settingRow-label")?;
    let name = div(document, "name")?;
    name.set_text_content(Some(&spec.label));
    let default_text = div(document, "defaultSettingText")?;
    default_text.set_text_content(Some(if spec.default_on {
        "Enabled"
    } else {
        "Disabled"
    }));
    let description = div(document, "description")?;
    description.set_text_content(Some(&spec.description));
    label.append_child(&name).ok()?;
    label.append_child(&default_text).ok()?;
    label.append_child(&description).ok()?;

    let action = div(document, "settingRow-action")?;
    let input = div(document, "settingRow-action-inputContainer")?;
    let slider = div(document, "mousehuntSettingSlider")?;
    if store.get(&spec.key, spec.default_on) {
        let _ = slider.class_list().add_1("active");
    }

    let key = spec.key.clone();
    let default_on = spec.default_on;
    let slider_in_click = slider.clone();
    let input_in_click = input.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        let next = !store.get(&key, default_on);
        store.set(&key, next);

        let classes = slider_in_click.class_list();
        let _ = if next {
            classes.add_1("active")
        } else {
            classes.remove_1("active")
        };
        flash_completed(&input_in_click);
    });
    slider
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .ok()?;
    onclick.forget();

    input.append_child(&slider).ok()?;
    action.append_child(&input).ok()?;
    setting_row.append_child(&label).ok()?;
    setting_row.append_child(&action).ok()?;
    row.append_child(&setting_row).ok()?;
    container.append_child(&row).ok()?;
    Some(())
}

/// Flash the row's input container with the saved-confirmation style.
#[cfg(target_arch = "wasm32")]
fn flash_completed(input_container: &web_sys::Element) {
    let classes = input_container.class_list();
    let _ = classes.add_1("completed");

    let Some(window) = web_sys::window() else {
        return;
    };
    let clear = Closure::once_into_js(move || {
        let _ = classes.remove_1("completed");
    });
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        clear.unchecked_ref(),
        crate::consts::SAVED_FLASH_MS,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SHIELD_CHOICES;

    #[test]
    fn test_for_variant_formats_the_row() {
        let spec = ToggleSpec::for_variant(&SHIELD_CHOICES[0]);
        assert_eq!(spec.label, "Enable Halloween shield");
        assert_eq!(spec.key, "halloween-shield");
        assert!(!spec.default_on);
        assert!(spec.description.contains("the Halloween shield"));
    }

    #[test]
    fn test_dotted_variant_label_keeps_year() {
        let year12 = SHIELD_CHOICES
            .iter()
            .find(|v| v.id == "birthday.year12")
            .unwrap();
        let spec = ToggleSpec::for_variant(year12);
        assert_eq!(spec.label, "Enable Birthday (Year 12) shield");
        assert_eq!(spec.key, "birthday.year12-shield");
    }

    #[test]
    fn test_register_adds_one_row_per_skin_in_order() {
        let panel = RecordingPanel::new();
        register_shield_settings(&panel, &SHIELD_CHOICES);

        let rows = panel.rows();
        assert_eq!(rows.len(), SHIELD_CHOICES.len());
        for (row, variant) in rows.iter().zip(&SHIELD_CHOICES) {
            assert_eq!(row.key, variant.setting_key());
            assert!(!row.default_on);
        }
    }

    #[test]
    fn test_reregistration_is_a_noop() {
        let panel = RecordingPanel::new();
        register_shield_settings(&panel, &SHIELD_CHOICES);
        register_shield_settings(&panel, &SHIELD_CHOICES);

        assert_eq!(panel.rows().len(), SHIELD_CHOICES.len());
    }

    #[test]
    fn test_duplicate_key_is_skipped_even_with_new_text() {
        let panel = RecordingPanel::new();
        let first = ToggleSpec::for_variant(&SHIELD_CHOICES[0]);
        let mut relabeled = first.clone();
        relabeled.label = "Something else".to_string();

        panel.add_toggle(&SHIELD_SECTION, &first);
        panel.add_toggle(&SHIELD_SECTION, &relabeled);

        let rows = panel.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, first.label);
    }
}
