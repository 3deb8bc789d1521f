//! Configuration file loading for cropplan.
//!
//! Discovers and loads `cropplan.toml` from the working directory (or an explicit path).
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cropplan_domain::DEFAULT_RESET_CEILING;
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "cropplan.toml";

/// Rank used when neither the CLI nor the config names one.
pub const DEFAULT_RANK: &str = "F";

/// Top-level configuration from cropplan.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CropplanConfig {
    pub catalog: CatalogConfig,
    pub defaults: DefaultsConfig,
    pub planner: PlannerSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog CSV. Relative paths resolve against the config file's directory.
    pub path: Option<Utf8PathBuf>,

    /// Fail instead of skipping rows that do not validate.
    pub strict: bool,
}

/// Request defaults, used when the matching flag is absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub rank: Option<String>,
    pub gold: Option<u64>,
    pub min_seeds: Option<u32>,
    pub allow_multi_harvest: bool,
    pub exclude: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rank: None,
            gold: None,
            min_seeds: None,
            allow_multi_harvest: true,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    /// Price ceiling for every purchase after the first.
    pub reset_ceiling: f64,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            reset_ceiling: DEFAULT_RESET_CEILING,
        }
    }
}

/// Discover the cropplan.toml config file.
///
/// Returns `None` if `dir` has no config file.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a cropplan.toml config file.
///
/// A relative `catalog.path` is rebased onto the config file's directory.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<CropplanConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("parse config file {}", path))?;

    if let (Some(catalog), Some(dir)) = (config.catalog.path.as_mut(), path.parent())
        && catalog.is_relative()
    {
        *catalog = dir.join(&*catalog);
    }
    Ok(config)
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<CropplanConfig> {
    let config: CropplanConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config if given, else discover one in `dir`, else use defaults.
pub fn load_or_default(
    explicit: Option<&Utf8Path>,
    dir: &Utf8Path,
) -> anyhow::Result<CropplanConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(CropplanConfig::default()),
    }
}

/// `plan` arguments that can override the config file.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    pub rank: Option<String>,
    pub gold: Option<u64>,
    pub min_seeds: Option<u32>,
    pub exclude: Vec<String>,
    pub no_multi_harvest: bool,
    pub catalog: Option<Utf8PathBuf>,
    pub strict: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub rank: String,
    pub gold: Option<u64>,
    pub min_seeds: u32,
    pub allow_multi_harvest: bool,
    /// Lowercased crop names, from config file, extended by CLI.
    pub exclude: BTreeSet<String>,
    pub catalog_path: Option<Utf8PathBuf>,
    pub strict: bool,
    pub reset_ceiling: f64,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: CropplanConfig,
}

impl ConfigMerger {
    pub fn new(config: CropplanConfig) -> Self {
        Self { config }
    }

    /// Merge with plan command CLI arguments.
    ///
    /// Scalars from the CLI win. CLI exclusions extend the config list.
    /// `no_multi_harvest` forces multi-harvest crops off.
    pub fn merge_plan_args(self, cli: &PlanOverrides) -> MergedConfig {
        let defaults = self.config.defaults;

        let exclude = defaults
            .exclude
            .iter()
            .chain(cli.exclude.iter())
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        MergedConfig {
            rank: cli
                .rank
                .clone()
                .or(defaults.rank)
                .unwrap_or_else(|| DEFAULT_RANK.to_string()),
            gold: cli.gold.or(defaults.gold),
            min_seeds: cli.min_seeds.or(defaults.min_seeds).unwrap_or(1),
            allow_multi_harvest: defaults.allow_multi_harvest && !cli.no_multi_harvest,
            exclude,
            catalog_path: cli.catalog.clone().or(self.config.catalog.path),
            strict: cli.strict || self.config.catalog.strict,
            reset_ceiling: self.config.planner.reset_ceiling,
        }
    }

    /// Merge with crops command CLI arguments.
    pub fn merge_crops_args(
        self,
        cli_rank: Option<String>,
        cli_catalog: Option<Utf8PathBuf>,
    ) -> MergedConfig {
        self.merge_plan_args(&PlanOverrides {
            rank: cli_rank,
            catalog: cli_catalog,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[catalog]
path = "seeds.csv"
strict = true

[defaults]
rank = "C"
gold = 500
min_seeds = 10
allow_multi_harvest = false
exclude = ["sugarcane"]

[planner]
reset_ceiling = 250.0
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.catalog.path, Some(Utf8PathBuf::from("seeds.csv")));
        assert!(config.catalog.strict);
        assert_eq!(config.defaults.rank.as_deref(), Some("C"));
        assert_eq!(config.defaults.gold, Some(500));
        assert_eq!(config.defaults.min_seeds, Some(10));
        assert!(!config.defaults.allow_multi_harvest);
        assert_eq!(config.defaults.exclude, vec!["sugarcane"]);
        assert_eq!(config.planner.reset_ceiling, 250.0);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.catalog.path.is_none());
        assert!(!config.catalog.strict);
        assert!(config.defaults.allow_multi_harvest);
        assert!(config.defaults.exclude.is_empty());
        assert_eq!(config.planner.reset_ceiling, DEFAULT_RESET_CEILING);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let err = parse_config("[defaults]\ngold = \"lots\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_merge_cli_overrides_scalars() {
        let config = parse_config("[defaults]\nrank = \"C\"\ngold = 500\nmin_seeds = 10\n").unwrap();
        let merged = ConfigMerger::new(config).merge_plan_args(&PlanOverrides {
            rank: Some("A".to_string()),
            gold: Some(2000),
            ..Default::default()
        });

        assert_eq!(merged.rank, "A");
        assert_eq!(merged.gold, Some(2000));
        assert_eq!(merged.min_seeds, 10);
    }

    #[test]
    fn test_merge_defaults_without_config() {
        let merged = ConfigMerger::new(CropplanConfig::default())
            .merge_plan_args(&PlanOverrides::default());

        assert_eq!(merged.rank, DEFAULT_RANK);
        assert_eq!(merged.gold, None);
        assert_eq!(merged.min_seeds, 1);
        assert!(merged.allow_multi_harvest);
        assert!(merged.exclude.is_empty());
        assert!(!merged.strict);
    }

    #[test]
    fn test_merge_exclude_extends_and_dedups() {
        let config = parse_config("[defaults]\nexclude = [\"Sugarcane\", \"melon\"]\n").unwrap();
        let merged = ConfigMerger::new(config).merge_plan_args(&PlanOverrides {
            exclude: vec!["MELON".to_string(), " hot pepper ".to_string()],
            ..Default::default()
        });

        let names: Vec<&str> = merged.exclude.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["hot pepper", "melon", "sugarcane"]);
    }

    #[test]
    fn test_merge_no_multi_harvest_forces_false() {
        let merged = ConfigMerger::new(CropplanConfig::default()).merge_plan_args(&PlanOverrides {
            no_multi_harvest: true,
            ..Default::default()
        });
        assert!(!merged.allow_multi_harvest);
    }

    #[test]
    fn test_merge_strict_from_either_side() {
        let config = parse_config("[catalog]\nstrict = true\n").unwrap();
        assert!(ConfigMerger::new(config).merge_plan_args(&PlanOverrides::default()).strict);

        let merged = ConfigMerger::new(CropplanConfig::default()).merge_plan_args(&PlanOverrides {
            strict: true,
            ..Default::default()
        });
        assert!(merged.strict);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_config_rebases_catalog_path() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let path = root.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[catalog]\npath = \"data/seeds.csv\"\n").expect("write config");

        let config = load_config(&path).expect("load config");
        assert_eq!(config.catalog.path, Some(root.join("data/seeds.csv")));
    }

    #[test]
    fn test_load_or_default_prefers_explicit_path() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let explicit = root.join("other.toml");
        std::fs::write(&explicit, "[defaults]\nrank = \"B\"\n").expect("write config");
        std::fs::write(root.join(CONFIG_FILE_NAME), "[defaults]\nrank = \"E\"\n")
            .expect("write config");

        let cfg = load_or_default(Some(&explicit), &root).expect("load explicit");
        assert_eq!(cfg.defaults.rank.as_deref(), Some("B"));

        let cfg = load_or_default(None, &root).expect("load discovered");
        assert_eq!(cfg.defaults.rank.as_deref(), Some("E"));
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(None, &root).expect("load default");
        assert!(cfg.catalog.path.is_none());
        assert!(cfg.defaults.exclude.is_empty());
    }

    #[test]
    fn test_load_config_missing_file_errors() {
        let err = load_config(Utf8Path::new("/definitely/not/here/cropplan.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("read config file"));
    }
}
