//! Shield selection and badge class application
//!
//! On every page change the badge is rebuilt from scratch: strip every class
//! the catalog could ever have applied, then put back the class-set of one
//! enabled skin. With several skins enabled the winner is rerolled on each
//! pass, the "random skin among favorites" behavior.

use crate::settings::SettingsStore;
use crate::variant::ShieldVariant;

/// Minimal view of the badge element's class list.
///
/// The DOM implementation is `web_sys::DomTokenList`; tests and the native
/// harness use [`TokenSet`]. Methods take `&self` because the underlying DOM
/// object is externally mutable anyway.
pub trait ClassList {
    fn add(&self, token: &str);
    fn remove(&self, token: &str);
    fn contains(&self, token: &str) -> bool;
}

/// The skins whose toggles are currently on, in catalog order.
pub fn enabled_variants(
    choices: &[ShieldVariant],
    store: &dyn SettingsStore,
) -> Vec<ShieldVariant> {
    choices
        .iter()
        .filter(|v| store.get(&v.setting_key(), false))
        .copied()
        .collect()
}

/// Strip every known skin class, then apply at most one enabled skin.
///
/// `pick` maps a count to an index in `0..count`; it is only consulted when
/// more than one skin is enabled, with a fresh draw on every call. Classes
/// the catalog does not know about are left untouched.
pub fn apply_selection<C: ClassList + ?Sized>(
    choices: &[ShieldVariant],
    enabled: &[ShieldVariant],
    badge: &C,
    mut pick: impl FnMut(usize) -> usize,
) {
    for variant in choices {
        for token in variant.class_tokens() {
            badge.remove(token);
        }
    }

    if enabled.is_empty() {
        return;
    }
    let idx = if enabled.len() > 1 {
        pick(enabled.len()) % enabled.len()
    } else {
        0
    };
    let chosen = enabled[idx];

    for token in chosen.class_tokens() {
        badge.add(token);
    }
    log::debug!("shield set to {}", chosen.id);
}

/// One full pass of the page-change callback: read toggles, reroll, apply.
///
/// A missing badge (wrong page, HUD not rendered yet) is a no-op.
pub fn swap_shield<C: ClassList>(
    choices: &[ShieldVariant],
    store: &dyn SettingsStore,
    badge: Option<&C>,
    pick: impl FnMut(usize) -> usize,
) {
    let Some(badge) = badge else {
        return;
    };
    let enabled = enabled_variants(choices, store);
    apply_selection(choices, &enabled, badge, pick);
}

/// Production pick source: an unseeded uniform draw, fresh per call.
pub fn random_index(len: usize) -> usize {
    use rand::Rng;
    rand::rng().random_range(0..len)
}

/// Plain-set stand-in for a DOM class list (tests and the native harness).
#[derive(Debug, Default)]
pub struct TokenSet {
    tokens: std::cell::RefCell<std::collections::BTreeSet<String>>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate, e.g. with the host page's own classes.
    pub fn with_tokens(tokens: &[&str]) -> Self {
        let set = tokens.iter().map(|t| t.to_string()).collect();
        Self {
            tokens: std::cell::RefCell::new(set),
        }
    }

    /// Current tokens, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        self.tokens.borrow().iter().cloned().collect()
    }
}

impl ClassList for TokenSet {
    fn add(&self, token: &str) {
        self.tokens.borrow_mut().insert(token.to_string());
    }

    fn remove(&self, token: &str) {
        self.tokens.borrow_mut().remove(token);
    }

    fn contains(&self, token: &str) -> bool {
        self.tokens.borrow().contains(token)
    }
}

#[cfg(target_arch = "wasm32")]
impl ClassList for web_sys::DomTokenList {
    fn add(&self, token: &str) {
        let _ = self.add_1(token);
    }

    fn remove(&self, token: &str) {
        let _ = self.remove_1(token);
    }

    fn contains(&self, token: &str) -> bool {
        web_sys::DomTokenList::contains(self, token)
    }
}

/// The HUD badge element's class list, if the badge is on the page.
#[cfg(target_arch = "wasm32")]
pub fn badge_class_list() -> Option<web_sys::DomTokenList> {
    let document = web_sys::window()?.document()?;
    let badge = document
        .query_selector(crate::consts::SHIELD_SELECTOR)
        .ok()
        .flatten()?;
    Some(badge.class_list())
}
