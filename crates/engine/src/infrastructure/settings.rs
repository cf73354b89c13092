//! Rules settings with environment overrides.

use pr20_domain::{CreationRules, Essence20System};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the creation essence total.
pub const CREATION_ESSENCE_POINTS_VAR: &str = "PR20_CREATION_ESSENCE_POINTS";

const ESSENCE_POINTS_RANGE: std::ops::RangeInclusive<i32> = 4..=40;

/// Tunable rules parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesSettings {
    /// Essence points a level 1 character is expected to spend
    pub creation_essence_points: i32,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            creation_essence_points: CreationRules::default().essence_points,
        }
    }
}

impl RulesSettings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env_overrides();
        settings
    }

    /// Apply overrides from the process environment.
    ///
    /// Supported environment variables:
    /// - PR20_CREATION_ESSENCE_POINTS: expected essence total at creation (range: 4-40)
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Invalid values are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(CREATION_ESSENCE_POINTS_VAR) {
            if let Ok(points) = val.trim().parse::<i32>() {
                if ESSENCE_POINTS_RANGE.contains(&points) {
                    self.creation_essence_points = points;
                    tracing::info!(points, "Applied PR20_CREATION_ESSENCE_POINTS environment variable");
                } else {
                    tracing::warn!(
                        points,
                        "PR20_CREATION_ESSENCE_POINTS out of range [4, 40], ignoring"
                    );
                }
            } else {
                tracing::warn!(
                    val = %val,
                    "PR20_CREATION_ESSENCE_POINTS is not a valid integer, ignoring"
                );
            }
        }
    }

    pub fn creation_rules(&self) -> CreationRules {
        CreationRules {
            essence_points: self.creation_essence_points,
        }
    }

    /// The rules bundle built from these settings.
    pub fn system(&self) -> Essence20System {
        Essence20System::with_creation_rules(self.creation_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| (key == CREATION_ESSENCE_POINTS_VAR).then(|| value.to_string())
    }

    #[test]
    fn defaults_to_twelve_points() {
        let settings = RulesSettings::default();
        assert_eq!(settings.creation_essence_points, 12);
        assert_eq!(settings.system().creation_rules().essence_points, 12);
    }

    #[test]
    fn valid_override_applies() {
        let mut settings = RulesSettings::default();
        settings.apply_overrides(lookup("16"));
        assert_eq!(settings.creation_essence_points, 16);
    }

    #[test]
    fn out_of_range_override_is_ignored() {
        let mut settings = RulesSettings::default();
        settings.apply_overrides(lookup("99"));
        assert_eq!(settings.creation_essence_points, 12);
    }

    #[test]
    fn garbage_override_is_ignored() {
        let mut settings = RulesSettings::default();
        settings.apply_overrides(lookup("twelve"));
        assert_eq!(settings.creation_essence_points, 12);
    }

    #[test]
    fn missing_override_keeps_default() {
        let mut settings = RulesSettings::default();
        settings.apply_overrides(|_| None);
        assert_eq!(settings, RulesSettings::default());
    }
}
