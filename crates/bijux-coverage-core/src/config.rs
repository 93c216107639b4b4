// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::ENV_BIJUX_COVERAGE_CATALOG;

pub const CATALOG_FILE_NAME: &str = "service-catalog.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogPathSource {
    Env,
    BaseDir,
    UserConfig,
}

impl CatalogPathSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::BaseDir => "base_dir",
            Self::UserConfig => "user_config",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalogPath {
    pub path: PathBuf,
    pub source: CatalogPathSource,
}

/// Locates the service catalog document for a run rooted at `base_dir`.
///
/// Lookup order: `BIJUX_COVERAGE_CATALOG`, `<base_dir>/service-catalog.json`,
/// then the user config directory (`$XDG_CONFIG_HOME/bijux` or
/// `$HOME/.config/bijux`). Only the base-dir and user-config candidates are
/// checked for existence; an explicit env path is returned as given.
#[must_use]
pub fn resolve_catalog_path(base_dir: &Path) -> Option<ResolvedCatalogPath> {
    resolve_catalog_path_with(base_dir, |key| std::env::var(key).ok())
}

pub fn resolve_catalog_path_with<F>(base_dir: &Path, lookup: F) -> Option<ResolvedCatalogPath>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(explicit) = non_empty(ENV_BIJUX_COVERAGE_CATALOG) {
        return Some(ResolvedCatalogPath {
            path: PathBuf::from(explicit),
            source: CatalogPathSource::Env,
        });
    }

    let local = base_dir.join(CATALOG_FILE_NAME);
    if local.is_file() {
        return Some(ResolvedCatalogPath {
            path: local,
            source: CatalogPathSource::BaseDir,
        });
    }

    let user_dir = non_empty("XDG_CONFIG_HOME")
        .map(|xdg| PathBuf::from(xdg).join("bijux"))
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".config").join("bijux")));
    user_dir
        .map(|dir| dir.join(CATALOG_FILE_NAME))
        .filter(|candidate| candidate.is_file())
        .map(|path| ResolvedCatalogPath {
            path,
            source: CatalogPathSource::UserConfig,
        })
}

/// Reads a boolean flag from the environment; `1`, `true`, `yes` and `on` enable it.
#[must_use]
pub fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_catalog_path_with, CatalogPathSource, CATALOG_FILE_NAME};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn lookup<'a>(vars: &'a BTreeMap<&'a str, String>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn explicit_env_path_wins_even_when_base_dir_has_catalog() {
        let base = tempdir().expect("tempdir");
        fs::write(base.path().join(CATALOG_FILE_NAME), "{}").expect("write");
        let vars = BTreeMap::from([("BIJUX_COVERAGE_CATALOG", "/etc/catalog.json".to_string())]);
        let resolved = resolve_catalog_path_with(base.path(), lookup(&vars)).expect("resolved");
        assert_eq!(resolved.source, CatalogPathSource::Env);
        assert_eq!(resolved.path.to_str(), Some("/etc/catalog.json"));
    }

    #[test]
    fn blank_env_value_falls_through_to_base_dir() {
        let base = tempdir().expect("tempdir");
        fs::write(base.path().join(CATALOG_FILE_NAME), "{}").expect("write");
        let vars = BTreeMap::from([("BIJUX_COVERAGE_CATALOG", "   ".to_string())]);
        let resolved = resolve_catalog_path_with(base.path(), lookup(&vars)).expect("resolved");
        assert_eq!(resolved.source, CatalogPathSource::BaseDir);
    }

    #[test]
    fn user_config_dir_is_last_resort() {
        let base = tempdir().expect("tempdir");
        let xdg = tempdir().expect("tempdir");
        fs::create_dir_all(xdg.path().join("bijux")).expect("mkdir");
        fs::write(xdg.path().join("bijux").join(CATALOG_FILE_NAME), "{}").expect("write");
        let vars = BTreeMap::from([("XDG_CONFIG_HOME", xdg.path().display().to_string())]);
        let resolved = resolve_catalog_path_with(base.path(), lookup(&vars)).expect("resolved");
        assert_eq!(resolved.source, CatalogPathSource::UserConfig);
    }

    #[test]
    fn nothing_found_yields_none() {
        let base = tempdir().expect("tempdir");
        let vars = BTreeMap::new();
        assert!(resolve_catalog_path_with(base.path(), lookup(&vars)).is_none());
    }
}
