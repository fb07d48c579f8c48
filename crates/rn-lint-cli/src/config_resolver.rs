//! Locates the configuration file for a run.
//!
//! Priority order:
//!
//! 1. `--config` flag (or `$RN_LINT_CONFIG`)
//! 2. `{project}/rn-lint.toml`, then `{project}/.rn-lint.toml`
//! 3. `$RN_LINT_CONFIG_DIR/config.toml`, else `~/.rn-lint/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the analyzed project.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the user-wide config.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["rn-lint.toml", ".rn-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a run over `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Takes `global_dir` as a parameter so tests need not touch the environment.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // An explicit path is trusted as-is; loading reports a missing file.
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    if let Some(candidate) = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
    {
        tracing::debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

/// Returns the user-wide config directory: `$RN_LINT_CONFIG_DIR`, else
/// `~/.rn-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("RN_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".rn-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "rn-lint.toml");

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            resolve_inner(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn project_names_in_order() {
        let project = TempDir::new().unwrap();
        let dotted = touch(project.path(), ".rn-lint.toml");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(project.path(), "rn-lint.toml");
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("rn-lint.toml")).unwrap();
        assert_eq!(
            resolve_inner(project.path(), None, None),
            ConfigSource::Default
        );
    }

    #[test]
    fn global_fallback() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let dir = Some(global.path().to_path_buf());
        assert_eq!(
            resolve_inner(project.path(), None, dir.clone()),
            ConfigSource::Default
        );

        let config = touch(global.path(), "config.toml");
        let source = resolve_inner(project.path(), None, dir.clone());
        assert!(source.is_global());
        assert_eq!(source, ConfigSource::Global(config));

        touch(project.path(), "rn-lint.toml");
        assert!(matches!(
            resolve_inner(project.path(), None, dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn source_paths() {
        let p = PathBuf::from("/tmp/rn-lint.toml");
        assert_eq!(ConfigSource::Explicit(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Project(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Global(p.clone()).path(), Some(p.as_path()));
        assert!(ConfigSource::Default.path().is_none());
        assert!(!ConfigSource::Project(p).is_global());
    }
}
