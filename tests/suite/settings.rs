//! Config file + environment → running app.

use std::collections::HashMap;
use std::fs;

use tempfile::tempdir;

use churn_config::{
    ChurnConfig, DEFAULT_MODEL_PATH, HexColor, MODEL_PATH_ENV, Settings, THEME_ENV, ThemePreset,
};
use churn_engine::{App, AppOptions, Outcome, ThemeStore};

use crate::common::fixture_model_path;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn config_file_selects_model_and_theme() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[model]\npath = {:?}\n\n[theme]\npreset = \"dark\"\naccent = \"#FF8800\"\n",
            fixture_model_path().display().to_string()
        ),
    )
    .unwrap();

    let config = ChurnConfig::load_from(&config_path).unwrap();
    let settings = Settings::resolve(config.as_ref(), env_from(&[]));
    assert_eq!(settings.model_path, fixture_model_path());
    assert_eq!(settings.theme.preset, ThemePreset::Dark);
    assert_eq!(
        settings.theme.colors().accent,
        HexColor::new(0xFF, 0x88, 0x00)
    );

    let classifier = churn_model::load_classifier(&settings.model_path).unwrap();
    let mut app = App::new(
        classifier,
        AppOptions {
            theme_store: ThemeStore::Memory,
            ..AppOptions::from_settings(&settings)
        },
    );
    assert_eq!(app.theme().preset, ThemePreset::Dark);
    assert!(matches!(app.submit(), Outcome::Scored(_)));
}

#[test]
fn environment_overrides_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[model]\npath = \"from-config.json\"\n").unwrap();
    let config = ChurnConfig::load_from(&config_path).unwrap();

    let settings = Settings::resolve(
        config.as_ref(),
        env_from(&[(MODEL_PATH_ENV, "/srv/models/churn.json"), (THEME_ENV, "DARK")]),
    );
    assert_eq!(settings.model_path.to_str(), Some("/srv/models/churn.json"));
    assert_eq!(settings.theme.preset, ThemePreset::Dark);
}

#[test]
fn missing_config_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = ChurnConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(config.is_none());

    let settings = Settings::resolve(config.as_ref(), env_from(&[]));
    assert_eq!(settings.model_path.to_str(), Some(DEFAULT_MODEL_PATH));
    assert_eq!(settings.theme.preset, ThemePreset::Light);
    assert!(!settings.ascii_only);
}

#[test]
fn missing_model_is_fatal_before_the_form_starts() {
    let dir = tempdir().unwrap();
    let settings = Settings::resolve(
        None,
        env_from(&[(
            MODEL_PATH_ENV,
            dir.path().join("best_XGB_model.json").to_str().unwrap(),
        )]),
    );
    let err = churn_model::load_classifier(&settings.model_path).unwrap_err();
    assert!(
        err.to_string().starts_with("failed to read model artifact"),
        "{err}"
    );
}
