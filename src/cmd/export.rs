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

use std::fs::write;

use flipcards_core::error::Fallible;

use crate::config::DEFAULT_CARDS_FILE;
use crate::storage::CardFile;

pub fn export_collection(cards: Option<String>, output: Option<String>) -> Fallible<()> {
    let path = cards.unwrap_or_else(|| DEFAULT_CARDS_FILE.to_string());
    let cards = CardFile::new(path).load();
    let content = serde_json::to_string_pretty(&cards)?;
    match output {
        Some(output) => write(output, content)?,
        None => println!("{content}"),
    }
    Ok(())
}
