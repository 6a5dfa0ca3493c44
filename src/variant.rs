//! Shield skin catalog
//!
//! Every skin the script knows about, in a fixed order. The order matters:
//! it is the iteration order for the preferences rows, for the enabled-subset
//! computation, and for stripping stale classes off the badge.

/// One selectable shield skin.
///
/// `id` doubles as the CSS class; a dotted id ("birthday.year12") expands to
/// multiple class tokens when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldVariant {
    /// Stable identifier, also the stem of the settings key.
    pub id: &'static str,
    /// Display name for the preferences row.
    pub label: &'static str,
}

impl ShieldVariant {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }

    /// Settings blob key for this skin's toggle.
    pub fn setting_key(&self) -> String {
        format!("{}-shield", self.id)
    }

    /// CSS class tokens to apply ("birthday.year12" -> "birthday", "year12").
    pub fn class_tokens(self) -> impl Iterator<Item = &'static str> {
        self.id.split('.')
    }

    /// Description line under the preferences row label.
    pub fn description(&self) -> String {
        format!(
            "Replaces the normal shield with the {} shield. If multiple shields are enabled, a random one will be used.",
            self.label
        )
    }
}

/// All known skins, in display and evaluation order.
pub const SHIELD_CHOICES: [ShieldVariant; 7] = [
    ShieldVariant::new("halloween", "Halloween"),
    ShieldVariant::new("birthday", "Birthday"),
    ShieldVariant::new("birthday.year10", "Birthday (Year 10)"),
    ShieldVariant::new("birthday.year11", "Birthday (Year 11)"),
    ShieldVariant::new("birthday.year12", "Birthday (Year 12)"),
    ShieldVariant::new("valentines", "Valentine's"),
    ShieldVariant::new("remembrance_day", "Remembrance Day"),
];
