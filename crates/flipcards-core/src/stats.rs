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

use serde::Serialize;

use crate::types::card::Card;

/// Aggregate counts over a card collection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Statistics {
    pub total_cards: usize,
    pub reviewed_cards: usize,
    pub correct_cards: usize,
    pub incorrect_cards: usize,
}

impl Statistics {
    pub fn measure(cards: &[Card]) -> Self {
        let total_cards = cards.len();
        let reviewed_cards = cards.iter().filter(|card| card.reviewed).count();
        let correct_cards = cards
            .iter()
            .filter(|card| card.reviewed && card.correct)
            .count();
        Self {
            total_cards,
            reviewed_cards,
            correct_cards,
            incorrect_cards: reviewed_cards - correct_cards,
        }
    }

    pub fn remaining_cards(&self) -> usize {
        self.total_cards - self.reviewed_cards
    }

    /// Share of the collection that has been reviewed, as a percentage.
    pub fn reviewed_percentage(&self) -> f64 {
        percentage(self.reviewed_cards, self.total_cards)
    }

    /// Share of reviewed cards graded correct, as a percentage.
    pub fn correct_percentage(&self) -> f64 {
        percentage(self.correct_cards, self.reviewed_cards)
    }

    /// Share of reviewed cards graded incorrect, as a percentage.
    pub fn incorrect_percentage(&self) -> f64 {
        percentage(self.incorrect_cards, self.reviewed_cards)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::seed::seed_deck;
    use crate::store::CardStore;

    #[test]
    fn test_empty_collection() {
        let stats = Statistics::measure(&[]);
        assert_eq!(stats.total_cards, 0);
        assert_eq!(stats.reviewed_percentage(), 0.0);
        assert_eq!(stats.correct_percentage(), 0.0);
    }

    #[test]
    fn test_fresh_seed_deck() {
        let stats = Statistics::measure(&seed_deck());
        assert_eq!(stats.total_cards, 10);
        assert_eq!(stats.reviewed_cards, 0);
        assert_eq!(stats.remaining_cards(), 10);
        assert_eq!(stats.reviewed_percentage(), 0.0);
    }

    #[test]
    fn test_mixed_collection() -> Fallible<()> {
        let mut store = CardStore::new(seed_deck());
        let cards = store.cards().to_vec();
        for (i, mut card) in cards.into_iter().enumerate().take(4) {
            card.reviewed = true;
            card.correct = i < 3;
            store.update(card);
        }
        let stats = Statistics::measure(store.cards());
        assert_eq!(stats.total_cards, 10);
        assert_eq!(stats.reviewed_cards, 4);
        assert_eq!(stats.correct_cards, 3);
        assert_eq!(stats.incorrect_cards, 1);
        assert_eq!(stats.remaining_cards(), 6);
        assert_eq!(stats.reviewed_percentage(), 40.0);
        assert_eq!(stats.correct_percentage(), 75.0);
        assert_eq!(stats.incorrect_percentage(), 25.0);
        Ok(())
    }
}
