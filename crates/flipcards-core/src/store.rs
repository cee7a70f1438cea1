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

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;

/// The ordered collection of cards.
///
/// Cards keep their insertion order for the lifetime of the collection.
/// There are exactly two mutation entry points: [`CardStore::add`] and
/// [`CardStore::update`].
pub struct CardStore {
    cards: Vec<Card>,
}

impl CardStore {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a new, unreviewed card.
    ///
    /// Both sides are trimmed before being stored. If either side is blank
    /// the collection is left unmodified.
    pub fn add(&mut self, english: &str, chinese: &str) -> Fallible<CardId> {
        let english = english.trim();
        let chinese = chinese.trim();
        if english.is_empty() || chinese.is_empty() {
            return fail("the English and Chinese fields must both be filled in.");
        }
        let id = self.next_id();
        self.cards.push(Card::new(id, english, chinese));
        Ok(id)
    }

    /// Replace the card whose identifier matches `updated`, leaving every
    /// other card untouched and the order unchanged. Last writer wins; an
    /// unknown identifier is ignored.
    pub fn update(&mut self, updated: Card) {
        for card in self.cards.iter_mut() {
            if card.id == updated.id {
                *card = updated;
                return;
            }
        }
    }

    fn next_id(&self) -> CardId {
        let max = self
            .cards
            .iter()
            .map(|card| card.id.into_inner())
            .max()
            .unwrap_or(0);
        CardId::new(max + 1)
    }
}
