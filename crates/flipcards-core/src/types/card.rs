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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// The stable identity of a card within a collection.
///
/// Identifiers are unique and assigned monotonically; they are never reused,
/// even conceptually, since cards are never deleted.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u64);

impl CardId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single English/Chinese study item with its review status.
///
/// `correct` is meaningful only when `reviewed` is true. Nothing in this
/// crate produces `correct == true` with `reviewed == false`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub english: String,
    pub chinese: String,
    pub reviewed: bool,
    pub correct: bool,
}

impl Card {
    /// A freshly created card, not yet reviewed.
    pub fn new(id: CardId, english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self {
            id,
            english: english.into(),
            chinese: chinese.into(),
            reviewed: false,
            correct: false,
        }
    }
}

/// The user's judgment of the currently displayed card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Grade {
    /// The user did not remember the card.
    Forgot,
    /// The user remembered the card.
    Good,
}

impl Grade {
    pub fn is_correct(self) -> bool {
        matches!(self, Grade::Good)
    }
}
