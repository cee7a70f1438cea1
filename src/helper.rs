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

//! Helpers shared by the test suites.

use std::fs::create_dir_all;

use flipcards_core::error::Fallible;
use tempfile::tempdir;

use crate::assistant::Assistant;

/// An assistant that has already finished its handshake.
pub fn connected_assistant() -> Assistant {
    let mut assistant = Assistant::new();
    assistant.mark_connected();
    assistant
}

/// A collection path inside a fresh temporary directory, with no saved
/// file yet, so a server starting there loads the seed deck.
pub fn create_tmp_cards_path() -> Fallible<String> {
    let dir = tempdir()?.path().to_path_buf();
    create_dir_all(&dir)?;
    Ok(dir.join("flipcards.json").display().to_string())
}
