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

use flipcards_core::error::Fallible;
use flipcards_core::session::ReviewSession;
use flipcards_core::store::CardStore;

use crate::config::DEFAULT_CARDS_FILE;
use crate::storage::CardFile;

pub fn reset_collection(cards: Option<String>) -> Fallible<()> {
    let path = cards.unwrap_or_else(|| DEFAULT_CARDS_FILE.to_string());
    let file = CardFile::new(path);
    let mut store = CardStore::new(file.load());
    let mut session = ReviewSession::new();
    session.reset_all(&mut store);
    file.save(store.cards())?;
    println!("Reset {} cards.", store.len());
    Ok(())
}
