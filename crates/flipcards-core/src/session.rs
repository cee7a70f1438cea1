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

use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::card::Grade;

/// The cards from `cards` that have not been reviewed in the current pass,
/// in their original relative order.
///
/// This is recomputed on demand rather than cached, so it can never go
/// stale against the store.
pub fn reviewable_cards(cards: &[Card]) -> Vec<&Card> {
    cards.iter().filter(|card| !card.reviewed).collect()
}

/// Where a review session stands with respect to the collection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionStatus {
    /// No cards exist at all.
    Empty,
    /// Cards exist, but every one of them has been reviewed.
    Exhausted,
    /// Unreviewed cards remain.
    Active,
}

/// Position within the reviewable subset, for display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Progress {
    /// 1-based position of the displayed card. Zero when nothing is
    /// reviewable.
    pub position: usize,
    /// Number of reviewable cards.
    pub total: usize,
}

/// A pass over the unreviewed cards of a collection.
///
/// The session owns nothing but a cursor. The reviewable subset is derived
/// from the store on every operation, so any store mutation (a new card, a
/// graded card, a reset) is picked up on the next call. The cursor indexes
/// into the *current* reviewable list, not a particular card: when the list
/// shrinks underneath it, the cursor keeps its index and so lands on what
/// was the next card, clamping to the last index when it points past the
/// end.
pub struct ReviewSession {
    cursor: usize,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    pub fn status(&self, store: &CardStore) -> SessionStatus {
        if store.is_empty() {
            SessionStatus::Empty
        } else if reviewable_cards(store.cards()).is_empty() {
            SessionStatus::Exhausted
        } else {
            SessionStatus::Active
        }
    }

    /// The card under the cursor, if any card is reviewable.
    pub fn current_card<'a>(&self, store: &'a CardStore) -> Option<&'a Card> {
        let reviewable = reviewable_cards(store.cards());
        if reviewable.is_empty() {
            return None;
        }
        Some(reviewable[self.clamped(reviewable.len())])
    }

    pub fn progress(&self, store: &CardStore) -> Progress {
        let total = reviewable_cards(store.cards()).len();
        if total == 0 {
            return Progress { position: 0, total: 0 };
        }
        Progress {
            position: self.clamped(total) + 1,
            total,
        }
    }

    /// Record the user's judgment of the current card.
    ///
    /// The card is rewritten as reviewed and propagated to the store; it
    /// drops out of the reviewable list on the next derivation. The cursor
    /// does not move: grading and navigating are independent gestures.
    /// Outside of an active session this is a no-op.
    pub fn grade(&self, store: &mut CardStore, grade: Grade) {
        let Some(card) = self.current_card(store) else {
            return;
        };
        let mut updated = card.clone();
        updated.reviewed = true;
        updated.correct = grade.is_correct();
        store.update(updated);
    }

    /// Move the cursor one card back, saturating at the first card.
    pub fn navigate_previous(&mut self, store: &CardStore) {
        let total = reviewable_cards(store.cards()).len();
        if total == 0 {
            return;
        }
        self.cursor = self.clamped(total).saturating_sub(1);
    }

    /// Move the cursor one card forward, saturating at the last card.
    pub fn navigate_next(&mut self, store: &CardStore) {
        let total = reviewable_cards(store.cards()).len();
        if total == 0 {
            return;
        }
        let cursor = self.clamped(total);
        self.cursor = if cursor < total - 1 { cursor + 1 } else { cursor };
    }

    /// Forget all grading and start a fresh pass over the whole collection.
    ///
    /// Every card in the source collection is marked unreviewed, including
    /// cards graded in this pass, and each update is propagated through the
    /// store. The cursor returns to the first card.
    pub fn reset_all(&mut self, store: &mut CardStore) {
        let cards: Vec<Card> = store.cards().to_vec();
        for mut card in cards {
            card.reviewed = false;
            card.correct = false;
            store.update(card);
        }
        self.cursor = 0;
    }

    /// The cursor clamped into the current reviewable range. Callers must
    /// ensure `total > 0`.
    fn clamped(&self, total: usize) -> usize {
        self.cursor.min(total - 1)
    }
}

impl Default for ReviewSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::card::CardId;

    fn store_of(pairs: &[(&str, &str)]) -> Fallible<CardStore> {
        let mut store = CardStore::new(Vec::new());
        for (english, chinese) in pairs {
            store.add(english, chinese)?;
        }
        Ok(store)
    }

    fn three_card_store() -> Fallible<CardStore> {
        store_of(&[("Hello", "你好"), ("Thank you", "谢谢"), ("Goodbye", "再见")])
    }

    #[test]
    fn test_reviewable_filters_and_preserves_order() -> Fallible<()> {
        let mut store = three_card_store()?;
        let mut middle = store.cards()[1].clone();
        middle.reviewed = true;
        store.update(middle);

        let reviewable = reviewable_cards(store.cards());
        let englishes: Vec<&str> = reviewable.iter().map(|c| c.english.as_str()).collect();
        assert_eq!(englishes, vec!["Hello", "Goodbye"]);
        Ok(())
    }

    #[test]
    fn test_status_transitions() -> Fallible<()> {
        let mut store = CardStore::new(Vec::new());
        let mut session = ReviewSession::new();
        assert_eq!(session.status(&store), SessionStatus::Empty);

        store.add("Hello", "你好")?;
        assert_eq!(session.status(&store), SessionStatus::Active);

        session.grade(&mut store, Grade::Good);
        assert_eq!(session.status(&store), SessionStatus::Exhausted);

        session.reset_all(&mut store);
        assert_eq!(session.status(&store), SessionStatus::Active);
        Ok(())
    }

    #[test]
    fn test_grade_marks_and_propagates() -> Fallible<()> {
        let mut store = three_card_store()?;
        let session = ReviewSession::new();
        assert_eq!(session.current_card(&store).unwrap().english, "Hello");

        session.grade(&mut store, Grade::Good);
        assert!(store.cards()[0].reviewed);
        assert!(store.cards()[0].correct);

        // The graded card drops out on the next derivation; the cursor now
        // names what was the next card.
        let reviewable = reviewable_cards(store.cards());
        assert_eq!(reviewable.len(), 2);
        assert_eq!(session.current_card(&store).unwrap().english, "Thank you");
        assert_eq!(session.progress(&store), Progress { position: 1, total: 2 });
        Ok(())
    }

    #[test]
    fn test_grade_is_idempotent_on_field_values() -> Fallible<()> {
        let mut store = store_of(&[("Hello", "你好")])?;
        let session = ReviewSession::new();
        session.grade(&mut store, Grade::Forgot);
        let after_first = store.cards()[0].clone();
        // A second identical grade would overwrite with the same values.
        let mut again = after_first.clone();
        again.reviewed = true;
        again.correct = Grade::Forgot.is_correct();
        store.update(again);
        assert_eq!(store.cards()[0], after_first);
        Ok(())
    }

    #[test]
    fn test_grade_outside_active_is_noop() -> Fallible<()> {
        let mut store = CardStore::new(Vec::new());
        let session = ReviewSession::new();
        session.grade(&mut store, Grade::Good);
        assert!(store.is_empty());

        store.add("Hello", "你好")?;
        session.grade(&mut store, Grade::Good);
        // Exhausted: grading again changes nothing.
        session.grade(&mut store, Grade::Forgot);
        assert!(store.cards()[0].correct);
        Ok(())
    }

    #[test]
    fn test_navigation_round_trip() -> Fallible<()> {
        let store = three_card_store()?;
        let mut session = ReviewSession::new();
        session.navigate_next(&store);
        assert_eq!(session.progress(&store).position, 2);

        session.navigate_next(&store);
        session.navigate_previous(&store);
        assert_eq!(session.progress(&store).position, 2);

        session.navigate_previous(&store);
        session.navigate_next(&store);
        assert_eq!(session.progress(&store).position, 2);
        Ok(())
    }

    #[test]
    fn test_navigation_saturates_at_boundaries() -> Fallible<()> {
        let store = three_card_store()?;
        let mut session = ReviewSession::new();
        session.navigate_previous(&store);
        assert_eq!(session.progress(&store).position, 1);

        session.navigate_next(&store);
        session.navigate_next(&store);
        session.navigate_next(&store);
        assert_eq!(session.progress(&store).position, 3);
        Ok(())
    }

    #[test]
    fn test_navigation_on_empty_store_is_noop() {
        let store = CardStore::new(Vec::new());
        let mut session = ReviewSession::new();
        session.navigate_next(&store);
        session.navigate_previous(&store);
        assert!(session.current_card(&store).is_none());
        assert_eq!(session.progress(&store), Progress { position: 0, total: 0 });
    }

    #[test]
    fn test_cursor_clamps_when_list_shrinks_past_it() -> Fallible<()> {
        let mut store = three_card_store()?;
        let mut session = ReviewSession::new();
        session.navigate_next(&store);
        session.navigate_next(&store);
        assert_eq!(session.current_card(&store).unwrap().english, "Goodbye");

        // Grading the last card leaves the cursor pointing past the end of
        // the shrunken list; it clamps to the new last index.
        session.grade(&mut store, Grade::Good);
        assert_eq!(session.current_card(&store).unwrap().english, "Thank you");
        assert_eq!(session.progress(&store), Progress { position: 2, total: 2 });
        Ok(())
    }

    #[test]
    fn test_reset_all_restores_the_whole_collection() -> Fallible<()> {
        let mut store = three_card_store()?;
        let mut session = ReviewSession::new();
        session.grade(&mut store, Grade::Good);
        session.grade(&mut store, Grade::Forgot);
        session.grade(&mut store, Grade::Good);
        assert_eq!(session.status(&store), SessionStatus::Exhausted);

        session.reset_all(&mut store);
        let reviewable = reviewable_cards(store.cards());
        assert_eq!(reviewable.len(), store.len());
        for card in store.cards() {
            assert!(!card.reviewed);
            assert!(!card.correct);
        }
        assert_eq!(session.progress(&store), Progress { position: 1, total: 3 });
        Ok(())
    }

    #[test]
    fn test_single_card_exhaust_and_restart() -> Fallible<()> {
        let mut store = store_of(&[("Hello", "你好")])?;
        let mut session = ReviewSession::new();
        session.grade(&mut store, Grade::Good);
        assert_eq!(session.status(&store), SessionStatus::Exhausted);
        assert!(session.current_card(&store).is_none());

        session.reset_all(&mut store);
        assert_eq!(session.status(&store), SessionStatus::Active);
        assert_eq!(session.current_card(&store).unwrap().id, CardId::new(1));
        Ok(())
    }

    #[test]
    fn test_new_card_wakes_an_exhausted_session() -> Fallible<()> {
        let mut store = store_of(&[("Hello", "你好")])?;
        let session = ReviewSession::new();
        session.grade(&mut store, Grade::Good);
        assert_eq!(session.status(&store), SessionStatus::Exhausted);

        store.add("Goodbye", "再见")?;
        assert_eq!(session.status(&store), SessionStatus::Active);
        assert_eq!(session.current_card(&store).unwrap().english, "Goodbye");
        Ok(())
    }
}
