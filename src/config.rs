//! Configuration discovery and effective settings resolution.
//!
//! Vantage reads `vantage.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `report_dir`: `test-results`
//! - `output`: `human`
//! - `[validator].docs_dir`: `openspec`
//! - `[ux].base_url`: `http://localhost:8080`
//! - `[ux].driver`: `simulated`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Validator-related section under `[validator]`.
pub struct ValidatorCfg {
    /// Documentation root, relative to the project root.
    pub docs_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// UX-probe section under `[ux]`.
pub struct UxCfg {
    pub base_url: Option<String>,
    /// Driver selection: `simulated` or `none`.
    pub driver: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `vantage.toml|yaml`.
pub struct FileConfig {
    pub report_dir: Option<String>,
    pub output: Option<String>,
    /// Per-category argv overrides: `[commands]` with `unit = ["...", ...]`.
    #[serde(default)]
    pub commands: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    pub validator: Option<ValidatorCfg>,
    #[serde(default)]
    pub ux: Option<UxCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub project_root: PathBuf,
    pub report_dir: PathBuf,
    pub output: String,
    pub docs_dir: String,
    pub base_url: String,
    pub driver: String,
    /// Category name -> argv override.
    pub commands: HashMap<String, Vec<String>>,
}

/// Config file names probed at each candidate root, in priority order.
const CONFIG_FILES: [&str; 3] = ["vantage.toml", "vantage.yaml", "vantage.yml"];

/// Walk upward from `start` to detect the project root.
///
/// The root is the first ancestor holding a vantage config file or a
/// `.git` marker; with neither, `start` itself is the root.
pub fn detect_project_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        let has_config = CONFIG_FILES.iter().any(|name| dir.join(name).exists());
        if has_config || dir.join(".git").exists() {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Load `FileConfig` from the first config file present at `root`.
pub fn load_config(root: &Path) -> Option<FileConfig> {
    let path = CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())?;
    let raw = fs::read_to_string(&path).ok()?;
    if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&raw).ok()
    } else {
        serde_yaml::from_str(&raw).ok()
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_project_root: Option<&str>,
    cli_report_dir: Option<&str>,
    cli_output: Option<&str>,
    cli_base_url: Option<&str>,
    cli_driver: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_project_root.unwrap_or("."));
    let project_root = detect_project_root(&start);
    let cfg = load_config(&project_root).unwrap_or_default();

    let report_dir = cli_report_dir
        .map(|s| s.to_string())
        .or(cfg.report_dir)
        .unwrap_or_else(|| "test-results".to_string());

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let docs_dir = cfg
        .validator
        .as_ref()
        .and_then(|v| v.docs_dir.clone())
        .unwrap_or_else(|| "openspec".to_string());

    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| cfg.ux.as_ref().and_then(|u| u.base_url.clone()))
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let driver = cli_driver
        .map(|s| s.to_string())
        .or_else(|| cfg.ux.as_ref().and_then(|u| u.driver.clone()))
        .unwrap_or_else(|| "simulated".to_string());

    let report_dir = project_root.join(report_dir);

    Effective {
        project_root,
        report_dir,
        output,
        docs_dir,
        base_url,
        driver,
        commands: cfg.commands.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("vantage.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
report_dir = "out/reports"
output = "json"
[validator]
docs_dir = "docs/spec"
[ux]
driver = "none"
"#
        )
        .unwrap();

        // Resolve using explicit project_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.report_dir, root.join("out/reports"));
        assert_eq!(eff.output, "json");
        assert_eq!(eff.docs_dir, "docs/spec");
        assert_eq!(eff.driver, "none");
        // Unset values fall through to defaults
        assert_eq!(eff.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("vantage.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
ux:
  base_url: http://localhost:9999
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.base_url, "http://localhost:9999");
        assert_eq!(eff.report_dir, root.join("test-results"));
        assert_eq!(eff.docs_dir, "openspec");
        assert_eq!(eff.driver, "simulated");
    }

    #[test]
    fn test_cli_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("vantage.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[ux]
driver = "none"
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, Some("human"), None, Some("simulated"));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.driver, "simulated");
    }

    #[test]
    fn test_command_overrides_parsed() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("vantage.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
[commands]
unit = ["cargo", "test", "--lib"]
"#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(
            eff.commands.get("unit").map(Vec::as_slice),
            Some(["cargo".to_string(), "test".to_string(), "--lib".to_string()].as_slice())
        );
    }

    #[test]
    fn test_toml_preferred_when_both_present() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("vantage.toml"), "output = \"json\"\n").unwrap();
        fs::write(root.join("vantage.yaml"), "output: human\n").unwrap();

        let eff = resolve_effective(root.to_str(), None, None, None, None);
        assert_eq!(eff.output, "json");
    }

    #[test]
    fn test_detect_stops_at_git_marker() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        let nested = root.join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        let found = detect_project_root(&nested);
        assert_eq!(found, root);
    }
}
