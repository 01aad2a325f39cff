//! Compliance module keys and the set of modules requested for a check.

use serde::{Deserialize, Serialize};

/// One compliance module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKey {
    /// Staff-to-child ratio ("BeroepsKracht-Kindratio").
    #[serde(rename = "BKR")]
    Bkr,
    /// Stable-faces continuity of care ("Vaste Gezichten Criterium").
    #[serde(rename = "VGC")]
    Vgc,
    /// Three-hour flexibility rule.
    #[serde(rename = "3-UURS")]
    ThreeHours,
}

impl ModuleKey {
    /// The slice field that carries this module's verdict.
    pub fn field_name(self) -> &'static str {
        match self {
            ModuleKey::Bkr => "BKR",
            ModuleKey::Vgc => "VGC",
            ModuleKey::ThreeHours => "3-UURS",
        }
    }
}

/// The modules a check was run with.
///
/// BKR is always part of a check; VGC and the three-hour rule are optional.
///
/// # Example
///
/// ```
/// use ggd_compliance::models::{ActiveModules, ModuleKey};
///
/// let modules: ActiveModules = serde_json::from_str(r#"{"vgc": true}"#).unwrap();
/// assert!(modules.contains(ModuleKey::Bkr));
/// assert!(modules.contains(ModuleKey::Vgc));
/// assert!(!modules.contains(ModuleKey::ThreeHours));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveModules {
    /// BKR was requested.
    #[serde(default = "default_true")]
    pub bkr: bool,
    /// VGC was requested.
    #[serde(default)]
    pub vgc: bool,
    /// The three-hour rule was requested.
    #[serde(default, alias = "threeHours")]
    pub three_hours: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ActiveModules {
    fn default() -> Self {
        Self::bkr_only()
    }
}

impl ActiveModules {
    /// Only BKR.
    pub fn bkr_only() -> Self {
        Self {
            bkr: true,
            vgc: false,
            three_hours: false,
        }
    }

    /// Every module.
    pub fn all() -> Self {
        Self {
            bkr: true,
            vgc: true,
            three_hours: true,
        }
    }

    /// Returns true if `module` was requested.
    pub fn contains(&self, module: ModuleKey) -> bool {
        match module {
            ModuleKey::Bkr => self.bkr,
            ModuleKey::Vgc => self.vgc,
            ModuleKey::ThreeHours => self.three_hours,
        }
    }
}

impl FromIterator<ModuleKey> for ActiveModules {
    fn from_iter<I: IntoIterator<Item = ModuleKey>>(iter: I) -> Self {
        let mut modules = ActiveModules {
            bkr: false,
            vgc: false,
            three_hours: false,
        };
        for key in iter {
            match key {
                ModuleKey::Bkr => modules.bkr = true,
                ModuleKey::Vgc => modules.vgc = true,
                ModuleKey::ThreeHours => modules.three_hours = true,
            }
        }
        modules
    }
}
