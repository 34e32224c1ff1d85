use serde::{Deserialize, Serialize};

/// Default maximum number of suggestions returned by a related query
const DEFAULT_MAX_N: usize = 10;
/// Default similarity threshold (tau) for a candidate to qualify
const DEFAULT_TAU: f32 = 0.65;

/// User-adjustable bounds for `max_n`
const MAX_N_MIN: usize = 5;
const MAX_N_MAX: usize = 20;
/// User-adjustable bounds for `tau`
const TAU_MIN: f32 = 0.4;
const TAU_MAX: f32 = 0.9;

/// Tunable preferences for related-idea queries.
///
/// Values are passed explicitly into the query call rather than read
/// from ambient storage; callers persist this struct however they like
/// (YAML helpers below match the host application's config format).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelatedPreferences {
    /// Maximum number of suggestions [5, 20]
    #[serde(default = "default_max_n")]
    pub max_n: usize,

    /// Minimum similarity score for a suggestion [0.4, 0.9]
    #[serde(default = "default_tau")]
    pub tau: f32,
}

impl Default for RelatedPreferences {
    fn default() -> Self {
        Self {
            max_n: DEFAULT_MAX_N,
            tau: DEFAULT_TAU,
        }
    }
}

fn default_max_n() -> usize {
    DEFAULT_MAX_N
}

fn default_tau() -> f32 {
    DEFAULT_TAU
}

/// Errors raised when loading preferences from serialized form.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Malformed preferences: {0}")]
    Malformed(#[from] serde_yml::Error),
}

impl RelatedPreferences {
    /// Copy with both fields forced into their documented ranges.
    pub fn clamped(&self) -> Self {
        Self {
            max_n: self.max_n.clamp(MAX_N_MIN, MAX_N_MAX),
            tau: self.tau.clamp(TAU_MIN, TAU_MAX),
        }
    }

    /// Parse from YAML, clamping out-of-range values like the getters
    /// of the host application do.
    pub fn from_yaml_str(s: &str) -> Result<Self, PreferencesError> {
        let prefs: Self = serde_yml::from_str(s)?;
        Ok(prefs.clamped())
    }

    pub fn to_yaml_string(&self) -> Result<String, PreferencesError> {
        Ok(serde_yml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = RelatedPreferences::default();
        assert_eq!(prefs.max_n, 10);
        assert!((prefs.tau - 0.65).abs() < f32::EPSILON);
    }

    #[test]
    fn clamping_forces_documented_ranges() {
        let prefs = RelatedPreferences { max_n: 100, tau: 0.05 }.clamped();
        assert_eq!(prefs.max_n, 20);
        assert!((prefs.tau - 0.4).abs() < f32::EPSILON);

        let prefs = RelatedPreferences { max_n: 1, tau: 1.5 }.clamped();
        assert_eq!(prefs.max_n, 5);
        assert!((prefs.tau - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let prefs = RelatedPreferences::from_yaml_str("max_n: 12\n").unwrap();
        assert_eq!(prefs.max_n, 12);
        assert!((prefs.tau - 0.65).abs() < f32::EPSILON);
    }

    #[test]
    fn yaml_load_clamps() {
        let prefs = RelatedPreferences::from_yaml_str("max_n: 50\ntau: 0.2\n").unwrap();
        assert_eq!(prefs.max_n, 20);
        assert!((prefs.tau - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(RelatedPreferences::from_yaml_str("max_n: [nope").is_err());
    }
}
