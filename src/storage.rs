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

use std::fs;
use std::path::PathBuf;

use flipcards_core::error::Fallible;
use flipcards_core::seed::seed_deck;
use flipcards_core::types::card::Card;

/// The saved card collection: one JSON file holding the full card list.
///
/// The file is read once at startup and rewritten in full after every
/// change. There is no versioning and no migration.
pub struct CardFile {
    path: PathBuf,
}

impl CardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the collection, falling back to the starter deck when the file
    /// is absent or malformed. The fallback is recovery, not an error, so
    /// it is logged and never surfaced.
    pub fn load(&self) -> Vec<Card> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => {
                log::debug!(
                    "no saved collection at {}, starting from the seed deck",
                    self.path.display()
                );
                return seed_deck();
            }
        };
        match serde_json::from_str(&content) {
            Ok(cards) => cards,
            Err(e) => {
                log::warn!(
                    "discarding malformed collection at {}: {e}",
                    self.path.display()
                );
                seed_deck()
            }
        }
    }

    /// Rewrite the whole collection.
    pub fn save(&self, cards: &[Card]) -> Fallible<()> {
        let content = serde_json::to_string_pretty(cards)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
