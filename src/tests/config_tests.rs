#[cfg(test)]
mod tests {
    use crate::config::{self, BrowserConfig};
    use crate::types::{MetadataColumn, SortDirection, SortKey};
    use std::fs;
    use tempfile::NamedTempFile;

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let loaded = config::load_from_str("").unwrap();
        assert_eq!(loaded, BrowserConfig::default());
    }

    #[test]
    fn test_default_config() {
        let cfg = BrowserConfig::default();
        assert_eq!(cfg.api.base_url, "");
        assert!(cfg.viewer.show_download_button);
        assert!(cfg.viewer.show_content_viewer);
        assert_eq!(cfg.view.page_size, 25);
        assert_eq!(cfg.view.page_size_options, vec![10, 25, 50, 100]);
        assert_eq!(cfg.view.sort_key, SortKey::Name);
        assert_eq!(cfg.view.sort_direction, SortDirection::Asc);
        assert!(!cfg.view.show_time);
        assert_eq!(cfg.view.metadata, vec![MetadataColumn::Size]);
    }

    #[test]
    fn test_overrides_are_layered_on_defaults() {
        let cfg = config::load_from_str(
            r#"
[viewer]
show_content_viewer = false

[view]
sort_key = "name-numeric"
sort_direction = "desc"
metadata = ["size", "modified"]
"#,
        )
        .unwrap();
        assert!(!cfg.viewer.show_content_viewer);
        assert!(cfg.viewer.show_download_button);
        assert_eq!(cfg.view.sort_key, SortKey::NaturalName);
        assert_eq!(cfg.view.sort_direction, SortDirection::Desc);
        assert_eq!(cfg.view.metadata, vec![MetadataColumn::Size, MetadataColumn::Modified]);
        assert_eq!(cfg.view.page_size, 25);
    }

    #[test]
    fn test_invalid_page_size() {
        let result = config::load_from_str("[view]\npage_size = 0\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("view.page_size must be > 0"));
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let result = config::load_from_str("[view]\npage_size = 30\n");
        assert!(result.unwrap_err().to_string().contains("is not one of view.page_size_options"));
    }

    #[test]
    fn test_empty_page_size_options() {
        let result = config::load_from_str("[view]\npage_size_options = []\n");
        assert!(result.unwrap_err().to_string().contains("must not be empty"));
    }

    #[test]
    fn test_unknown_sort_key_is_rejected() {
        assert!(config::load_from_str("[view]\nsort_key = \"color\"\n").is_err());
    }

    #[test]
    fn test_load_file() {
        let file = write_temp_config(
            r#"
[api]
base_url = "http://localhost:5000"

[view]
page_size = 50
show_time = true
"#,
        );
        let cfg = config::load_file(file.path()).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:5000");
        assert_eq!(cfg.view.page_size, 50);
        assert!(cfg.view.show_time);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("browser.toml");
        assert!(config::load_file(&missing).is_err());
    }

    #[test]
    fn test_trailing_slash_is_accepted() {
        let cfg = config::load_from_str("[api]\nbase_url = \"http://h/\"\n").unwrap();
        assert_eq!(cfg.api.base_url, "http://h/");
    }
}
