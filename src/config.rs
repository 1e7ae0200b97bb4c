use std::path::{Path, PathBuf};

use figment::providers::{Format, Serialized, Toml};
use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// name of the configuration file expected at the root of a project
pub const CONFIG_FILE: &str = "config.toml";

/// default directory values
pub const TEMPLATE_DIR: &str = "templates";
pub const DATA_DIR: &str = "data";
pub const STATIC_DIR: &str = "static";
pub const OUT_DIR: &str = "_site";

/// config for a single build of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// the name of the site, only used for logging
    pub name: String,
    /// the jinja templates, one page per file
    pub templates_dir: PathBuf,
    /// toml files holding the data for the pages
    pub data_dir: PathBuf,
    /// files copied verbatim like css, javascript, and media
    pub static_dir: PathBuf,
    /// the output directory, wiped on every build
    pub out_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "site".into(),
            templates_dir: TEMPLATE_DIR.into(),
            data_dir: DATA_DIR.into(),
            static_dir: STATIC_DIR.into(),
            out_dir: OUT_DIR.into(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Self::default())
    }

    /// load `config.toml` from the current directory
    pub fn load() -> Result<Self> {
        Self::load_in(".")
    }

    /// load `config.toml` from `root`, relative directories are taken relative to `root`
    pub fn load_in<T: AsRef<Path>>(root: T) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(CONFIG_FILE);
        // figment treats a missing file as empty, so check explicitly
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path));
        }
        let config: Config = Self::figment().merge(Toml::file(&path)).extract()?;
        log::debug!("Loaded config from {path:?}: {config:?}");
        Ok(config.relative_to(root))
    }

    fn relative_to(self, root: &Path) -> Self {
        let resolve = |dir: PathBuf| {
            if dir.is_relative() {
                root.join(dir)
            } else {
                dir
            }
        };
        Self {
            name: self.name,
            templates_dir: resolve(self.templates_dir),
            data_dir: resolve(self.data_dir),
            static_dir: resolve(self.static_dir),
            out_dir: resolve(self.out_dir),
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Site config")
    }
    fn data(&self) -> std::result::Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_config_is_not_found() {
        let tmp = TempDir::new().unwrap();
        match Config::load_in(tmp.path()) {
            Err(Error::ConfigNotFound(path)) => assert_eq!(path, tmp.path().join(CONFIG_FILE)),
            other => panic!("expected ConfigNotFound, got {other:?}"),
        }
    }

    #[test]
    fn loads_all_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
name = "My Site"
templates_dir = "pages"
data_dir = "content"
static_dir = "assets"
out_dir = "dist"
"#,
        )
        .unwrap();

        let config = Config::load_in(tmp.path()).unwrap();
        assert_eq!(config.name, "My Site");
        assert_eq!(config.templates_dir, tmp.path().join("pages"));
        assert_eq!(config.data_dir, tmp.path().join("content"));
        assert_eq!(config.static_dir, tmp.path().join("assets"));
        assert_eq!(config.out_dir, tmp.path().join("dist"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "name = \"blog\"\n").unwrap();

        let config = Config::load_in(tmp.path()).unwrap();
        assert_eq!(config.name, "blog");
        assert_eq!(config.templates_dir, tmp.path().join(TEMPLATE_DIR));
        assert_eq!(config.out_dir, tmp.path().join(OUT_DIR));
    }

    #[test]
    fn absolute_dirs_are_kept() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("elsewhere");
        fs::write(
            tmp.path().join(CONFIG_FILE),
            format!("out_dir = {:?}\n", out.to_str().unwrap()),
        )
        .unwrap();

        let config = Config::load_in(tmp.path()).unwrap();
        assert_eq!(config.out_dir, out);
    }

    #[test]
    fn wrong_type_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "name = [\"a\", \"b\"]\n").unwrap();

        assert!(matches!(Config::load_in(tmp.path()), Err(Error::Config(_))));
    }
}
