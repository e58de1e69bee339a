//! Configuration file support
//!
//! Loads settings from ~/.vitric.toml (or %USERPROFILE%\.vitric.toml on
//! Windows). A missing or malformed file yields the defaults.
//!
//! Example:
//! ```text
//! # vitric configuration
//! tab-width = 4
//! show-hidden = false
//! tree-width = 30
//! shell-rows = 8
//! ```

use std::fs;
use std::path::PathBuf;

use toml::Table;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Tab stop width for display
    pub tab_width: usize,
    /// Whether the file tree shows hidden entries
    pub show_hidden: bool,
    /// File tree panel width in columns
    pub tree_width: u16,
    /// Shell output panel height in rows
    pub shell_rows: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            show_hidden: false,
            tree_width: 30,
            shell_rows: 8,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".vitric.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".vitric.toml"))
        }
    }

    /// Load configuration from file
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                if let Ok(table) = contents.parse::<Table>() {
                    config.apply(&table);
                }
            }
        }

        config
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) {
        if let Some(n) = table.get("tab-width").and_then(|v| v.as_integer()) {
            self.tab_width = n.clamp(1, 16) as usize;
        }

        if let Some(b) = table.get("show-hidden").and_then(|v| v.as_bool()) {
            self.show_hidden = b;
        }

        if let Some(n) = table.get("tree-width").and_then(|v| v.as_integer()) {
            self.tree_width = n.clamp(16, 60) as u16;
        }

        if let Some(n) = table.get("shell-rows").and_then(|v| v.as_integer()) {
            self.shell_rows = n.clamp(3, 20) as u16;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_settings() {
        let table: Table = r#"
tab-width = 8
show-hidden = true
tree-width = 40
shell-rows = 12
"#
        .parse()
        .unwrap();

        let mut config = Config::default();
        config.apply(&table);

        assert_eq!(config.tab_width, 8);
        assert!(config.show_hidden);
        assert_eq!(config.tree_width, 40);
        assert_eq!(config.shell_rows, 12);
    }

    #[test]
    fn test_apply_clamps_ranges() {
        let table: Table = "tab-width = 99\ntree-width = 2\nshell-rows = 100\n"
            .parse()
            .unwrap();

        let mut config = Config::default();
        config.apply(&table);

        assert_eq!(config.tab_width, 16);
        assert_eq!(config.tree_width, 16);
        assert_eq!(config.shell_rows, 20);
    }

    #[test]
    fn test_unknown_and_mistyped_keys_ignored() {
        let table: Table = "tab-width = \"wide\"\nmystery = 1\n".parse().unwrap();

        let mut config = Config::default();
        config.apply(&table);

        assert_eq!(config.tab_width, Config::default().tab_width);
    }

    #[test]
    fn test_malformed_file_contents() {
        assert!("not [valid toml".parse::<Table>().is_err());
    }
}
