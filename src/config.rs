use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bank::client::DEFAULT_CREATE_PATH;
use crate::bank::record::Difficulty;
use crate::error::{QbError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path (argument or `QBANK_CONFIG`) replaces the global and
    /// project layers. Environment overrides always apply last.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("QBANK_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(QbError::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Path of the per-user config file, if a config directory exists.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qbank/config.toml"))
    }

    /// Path of the project config file under `root`.
    #[must_use]
    pub fn project_path(root: &Path) -> PathBuf {
        root.join(".qbank/config.toml")
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::project_path(root))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| QbError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| QbError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.api {
            self.api.merge(patch);
        }
        if let Some(patch) = patch.import {
            self.import.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("QBANK_API_BASE_URL") {
            self.api.base_url = value;
        }
        if let Some(value) = env_string("QBANK_API_CREATE_PATH") {
            self.api.create_path = value;
        }
        if let Some(value) = env_string("QBANK_API_TOKEN") {
            self.api.token = Some(value).filter(|t| !t.trim().is_empty());
        }
        if let Some(value) = env_u64("QBANK_API_TIMEOUT_SECS")? {
            self.api.timeout_secs = value;
        }

        if let Some(value) = env_string("QBANK_IMPORT_FOLDER_ID") {
            self.import.folder_id = Some(value).filter(|f| !f.trim().is_empty());
        }
        if let Some(value) = env_string("QBANK_IMPORT_DIFFICULTY") {
            self.import.difficulty = value.parse()?;
        }
        if let Some(value) = env_f64("QBANK_IMPORT_DEFAULT_MARK")? {
            self.import.default_mark = value;
        }
        if let Some(value) = env_bool("QBANK_IMPORT_STRICT") {
            self.import.strict = value;
        }

        if let Some(value) = env_string("QBANK_OUTPUT_FORMAT") {
            self.output.format = value;
        }

        Ok(())
    }

    /// Copy with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api.token.is_some() {
            copy.api.token = Some("********".to_string());
        }
        copy
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub create_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            create_path: DEFAULT_CREATE_PATH.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    fn merge(&mut self, patch: ApiPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.create_path {
            self.create_path = value;
        }
        if let Some(value) = patch.token {
            self.token = Some(value).filter(|t| !t.trim().is_empty());
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub default_mark: f64,
    #[serde(default)]
    pub strict: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            folder_id: None,
            difficulty: Difficulty::Medium,
            default_mark: 1.0,
            strict: false,
        }
    }
}

impl ImportConfig {
    fn merge(&mut self, patch: ImportPatch) {
        if let Some(value) = patch.folder_id {
            self.folder_id = Some(value).filter(|f| !f.trim().is_empty());
        }
        if let Some(value) = patch.difficulty {
            self.difficulty = value;
        }
        if let Some(value) = patch.default_mark {
            self.default_mark = value;
        }
        if let Some(value) = patch.strict {
            self.strict = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    api: Option<ApiPatch>,
    import: Option<ImportPatch>,
    output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiPatch {
    base_url: Option<String>,
    create_path: Option<String>,
    token: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ImportPatch {
    folder_id: Option<String>,
    difficulty: Option<Difficulty>,
    default_mark: Option<f64>,
    strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    format: Option<String>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            QbError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<f64>().map(Some).map_err(|err| {
            QbError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.api.base_url.is_empty());
        assert_eq!(config.api.create_path, "/api/questions");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.token.is_none());
        assert!(config.import.folder_id.is_none());
        assert_eq!(config.import.difficulty, Difficulty::Medium);
        assert!((config.import.default_mark - 1.0).abs() < f64::EPSILON);
        assert!(!config.import.strict);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let mut config = Config::default();
        let patch: ConfigPatch = toml::from_str(
            r#"
[api]
base_url = "https://bank.example.com"

[import]
difficulty = "hard"
"#,
        )
        .unwrap();
        config.merge_patch(patch);

        assert_eq!(config.api.base_url, "https://bank.example.com");
        assert_eq!(config.api.create_path, "/api/questions");
        assert_eq!(config.import.difficulty, Difficulty::Hard);
        assert!((config.import.default_mark - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn later_patch_wins() {
        let mut config = Config::default();
        let global: ConfigPatch = toml::from_str(
            r#"
[import]
folder_id = "global-folder"
default_mark = 2.0
"#,
        )
        .unwrap();
        let project: ConfigPatch = toml::from_str(
            r#"
[import]
folder_id = "project-folder"
"#,
        )
        .unwrap();
        config.merge_patch(global);
        config.merge_patch(project);

        assert_eq!(config.import.folder_id.as_deref(), Some("project-folder"));
        assert!((config.import.default_mark - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_token_and_folder_are_unset() {
        let mut config = Config::default();
        let patch: ConfigPatch = toml::from_str(
            r#"
[api]
token = "  "

[import]
folder_id = ""
"#,
        )
        .unwrap();
        config.merge_patch(patch);
        assert!(config.api.token.is_none());
        assert!(config.import.folder_id.is_none());
    }

    #[test]
    fn load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "custom.toml",
            r#"
[api]
base_url = "http://localhost:9000"
timeout_secs = 5
"#,
        );

        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, QbError::Config(_)));
    }

    #[test]
    fn load_invalid_toml_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "bad.toml", "[api\nbase_url = ");
        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("parse config"));
    }

    #[test]
    fn invalid_difficulty_in_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "bad.toml", "[import]\ndifficulty = \"extreme\"\n");
        assert!(Config::load(Some(&path), dir.path()).is_err());
    }

    #[test]
    fn mixed_case_difficulty_in_file_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "case.toml", "[import]\ndifficulty = \"Easy\"\n");
        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert_eq!(config.import.difficulty, Difficulty::Easy);
    }

    #[test]
    fn project_path_under_root() {
        let root = Path::new("/work/course");
        assert_eq!(
            Config::project_path(root),
            PathBuf::from("/work/course/.qbank/config.toml")
        );
    }

    #[test]
    fn redacted_masks_token() {
        let mut config = Config::default();
        config.api.token = Some("secret-token".to_string());
        let redacted = config.redacted();
        assert_eq!(redacted.api.token.as_deref(), Some("********"));
        assert_eq!(config.api.token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.import.folder_id = Some("f-1".to_string());
        let raw = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.import.folder_id.as_deref(), Some("f-1"));
        assert_eq!(parsed.api.create_path, "/api/questions");
    }
}
