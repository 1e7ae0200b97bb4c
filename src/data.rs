use std::{fs, path::Path};

use crate::error::{Error, Result};

/// extension of the per-page data files
pub const DATA_EXT: &str = "toml";

/// the values a page gets rendered with
pub type PageData = toml::Table;

/// the data file belonging to a page, `index.html` -> `index.toml`
///
/// everything from the first `.` on is dropped, so `about.en.html` maps to `about.toml`
pub fn data_file_name(page_name: &str) -> String {
    let stem = page_name.split('.').next().unwrap_or(page_name);
    format!("{stem}.{DATA_EXT}")
}

/// read the data for a page, a page without a data file gets an empty table
pub fn resolve_data<T: AsRef<Path>>(page_name: &str, data_dir: T) -> Result<PageData> {
    let path = data_dir.as_ref().join(data_file_name(page_name));
    if !path.is_file() {
        log::debug!("No data for '{page_name}' at {path:?}");
        return Ok(PageData::new());
    }
    let text = fs::read_to_string(&path)?;
    text.parse::<PageData>()
        .map_err(|source| Error::DataParse { path, source })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn data_file_name_strips_at_first_dot() {
        assert_eq!(data_file_name("index.html"), "index.toml");
        assert_eq!(data_file_name("about.en.html"), "about.toml");
        assert_eq!(data_file_name("README"), "README.toml");
        assert_eq!(data_file_name(".hidden"), ".toml");
    }

    #[test]
    fn missing_data_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let data = resolve_data("index.html", tmp.path()).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn missing_data_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let data = resolve_data("index.html", tmp.path().join("nope")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn parses_nested_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("index.toml"),
            r#"
title = "Home"
tags = ["a", "b"]

[author]
name = "Sam"
"#,
        )
        .unwrap();

        let data = resolve_data("index.html", tmp.path()).unwrap();
        assert_eq!(data["title"].as_str(), Some("Home"));
        assert_eq!(data["tags"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(data["author"]["name"].as_str(), Some("Sam"));
    }

    #[test]
    fn malformed_data_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("index.toml"), "title = \n").unwrap();

        match resolve_data("index.html", tmp.path()) {
            Err(Error::DataParse { path, .. }) => assert_eq!(path, tmp.path().join("index.toml")),
            other => panic!("expected DataParse, got {other:?}"),
        }
    }

    #[test]
    fn directory_with_data_name_is_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("index.toml")).unwrap();

        let data = resolve_data("index.html", tmp.path()).unwrap();
        assert!(data.is_empty());
    }
}
