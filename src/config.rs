// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use flipcards_core::error::ErrorReport;
use flipcards_core::error::Fallible;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CARDS_FILE: &str = "flipcards.json";
const DEFAULT_CONFIG_FILE: &str = "flipcards.toml";

/// Optional settings from `flipcards.toml`. Command-line flags take
/// precedence over the file; every key is optional.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    host: Option<String>,
    port: Option<u16>,
    cards: Option<String>,
    open_browser: Option<bool>,
}

impl Config {
    /// Load the configuration file. An explicitly given path must exist and
    /// parse; the default path is read only if present.
    pub fn load(path: Option<&str>) -> Fallible<Self> {
        match path {
            Some(path) => Self::read(Path::new(path)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Fallible<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ErrorReport::new(format!("invalid configuration: {e}")))
    }

    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn cards(&self) -> String {
        self.cards
            .clone()
            .unwrap_or_else(|| DEFAULT_CARDS_FILE.to_string())
    }

    pub fn open_browser(&self) -> bool {
        self.open_browser.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 8000);
        assert_eq!(config.cards(), "flipcards.json");
        assert!(config.open_browser());
    }

    #[test]
    fn test_load_full_file() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flipcards.toml");
        write(
            &path,
            "host = \"0.0.0.0\"\nport = 9000\ncards = \"deck.json\"\nopen-browser = false\n",
        )?;
        let config = Config::load(Some(path.to_str().unwrap()))?;
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.cards(), "deck.json");
        assert!(!config.open_browser());
        Ok(())
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flipcards.toml");
        write(&path, "port = 9000\n")?;
        let config = Config::load(Some(path.to_str().unwrap()))?;
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9000);
        Ok(())
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        assert!(Config::load(Some("./does-not-exist.toml")).is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() -> Fallible<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flipcards.toml");
        write(&path, "hosst = \"oops\"\n")?;
        assert!(Config::load(Some(path.to_str().unwrap())).is_err());
        Ok(())
    }
}
