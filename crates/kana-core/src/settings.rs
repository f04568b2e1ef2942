//! Global settings loaded from TOML, following the same OnceLock pattern as the kana table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scoring: ScoringSettings,
    pub input: InputSettings,
    pub survival: SurvivalSettings,
    pub time_attack: TimeAttackSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    pub chars_per_word: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub fold_uppercase: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurvivalSettings {
    pub lives: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeAttackSettings {
    pub limit_secs: f64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(scoring.chars_per_word);
    check_positive!(survival.lives);
    if !(s.time_attack.limit_secs > 0.0 && s.time_attack.limit_secs.is_finite()) {
        return Err(SettingsError::InvalidValue {
            field: "time_attack.limit_secs".to_string(),
            reason: "must be a positive number of seconds".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.scoring.chars_per_word, 5);
        assert!(s.input.fold_uppercase);
        assert_eq!(s.survival.lives, 3);
        assert!((s.time_attack.limit_secs - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[scoring]
chars_per_word = 4

[input]
fold_uppercase = false

[survival]
lives = 1

[time_attack]
limit_secs = 30.5
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.scoring.chars_per_word, 4);
        assert!(!s.input.fold_uppercase);
        assert_eq!(s.survival.lives, 1);
        assert!((s.time_attack.limit_secs - 30.5).abs() < f64::EPSILON);
    }

    #[test]
    fn error_zero_chars_per_word() {
        let toml = DEFAULT_SETTINGS_TOML.replace("chars_per_word = 5", "chars_per_word = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        match err {
            SettingsError::InvalidValue { field, .. } => assert_eq!(field, "scoring.chars_per_word"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn error_zero_lives() {
        let toml = DEFAULT_SETTINGS_TOML.replace("lives = 3", "lives = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn error_non_positive_limit() {
        let toml = DEFAULT_SETTINGS_TOML.replace("limit_secs = 60.0", "limit_secs = -1.0");
        let err = parse_settings_toml(&toml).unwrap_err();
        match err {
            SettingsError::InvalidValue { field, .. } => assert_eq!(field, "time_attack.limit_secs"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[scoring]\nchars_per_word = 5\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn global_settings_use_defaults() {
        assert_eq!(settings().scoring.chars_per_word, 5);
    }
}
