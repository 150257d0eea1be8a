//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the settings derived
//! from it ([`ViewSettings`], [`PageOptions`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call-site)
//! 2. `FOLIO_*` environment variables, `__` between levels
//!    (`FOLIO_RENDER__OUTPUT_DIR=public`)
//! 3. Config file (`--config`, or the platform default path)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use chrono::Datelike as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use folio_core::domain::{
    Boundary, PageOptions, ScrollThreshold, SectionId, StaggerPlan, ViewSettings,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Page and view defaults for `render`, `outline` and `simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
    /// `<title>` override.
    pub title: Option<String>,
    /// Scroll offset, in pixels, past which the navbar goes compact.
    pub scroll_threshold: f64,
    pub scroll_boundary: Boundary,
    pub services_stagger_ms: u64,
    pub experience_stagger_ms: u64,
    pub show_certifications: bool,
    /// Footer year; the current year when unset.
    pub copyright_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let threshold = ScrollThreshold::default();
        Self {
            output_dir: PathBuf::from("site"),
            file_name: "index.html".into(),
            title: None,
            scroll_threshold: threshold.offset,
            scroll_boundary: threshold.boundary,
            services_stagger_ms: 200,
            experience_stagger_ms: 100,
            show_certifications: false,
            copyright_year: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment over the defaults.
    ///
    /// A file passed with `--config` must exist; the default file is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        tracing::debug!(path = %path.display(), required, "loading configuration");

        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix("FOLIO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.folio.toml` in the
    /// current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "folio", "folio")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| Self::local_path())
    }

    /// Per-project config file in the working directory.
    pub fn local_path() -> PathBuf {
        PathBuf::from(".folio.toml")
    }

    /// Look up a dotted key such as `render.output_dir`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        tree.pointer(&pointer).cloned()
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            threshold: ScrollThreshold::new(
                self.render.scroll_threshold,
                self.render.scroll_boundary,
            ),
            stagger: self.stagger(),
        }
    }

    pub fn stagger(&self) -> StaggerPlan {
        StaggerPlan::none()
            .with_step(
                SectionId::Services,
                Duration::from_millis(self.render.services_stagger_ms),
            )
            .with_step(
                SectionId::Experience,
                Duration::from_millis(self.render.experience_stagger_ms),
            )
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            show_certifications: self.render.show_certifications,
            copyright_year: Some(
                self.render
                    .copyright_year
                    .unwrap_or_else(|| chrono::Local::now().year()),
            ),
            title: self.render.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behaviour() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.render.output_dir, PathBuf::from("site"));
        assert_eq!(cfg.render.scroll_threshold, 50.0);
        assert_eq!(cfg.render.scroll_boundary, Boundary::Exclusive);
        assert_eq!(cfg.stagger(), StaggerPlan::default());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_default_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.render.file_name, "index.html");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(
            &path,
            r#"
[render]
output_dir = "public"
scroll_threshold = 80.0
scroll_boundary = "inclusive"
services_stagger_ms = 0
copyright_year = 2023
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.render.output_dir, PathBuf::from("public"));
        assert_eq!(cfg.render.experience_stagger_ms, 100);

        let settings = cfg.view_settings();
        assert!(settings.threshold.is_past(80.0));
        assert_eq!(settings.stagger.step_for(SectionId::Services), Duration::ZERO);
        assert_eq!(cfg.page_options().copyright_year, Some(2023));
    }

    #[test]
    fn dotted_get() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("render.file_name"),
            Some(serde_json::Value::from("index.html"))
        );
        assert_eq!(cfg.get("render.title"), Some(serde_json::Value::Null));
        assert!(cfg.get("render.nope").is_none());
    }

    #[test]
    fn copyright_year_defaults_to_now() {
        let year = AppConfig::default().page_options().copyright_year;
        assert!(year.is_some_and(|y| y >= 2024));
    }
}
