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

//! A stand-in for an AI study assistant.
//!
//! There is no service behind this module: the "connection" is a timer and
//! every reply is canned or derived locally from the card collection. The
//! rest of the program treats it as an opaque collaborator, so swapping in
//! a real backend would not disturb the core. While disconnected, every
//! call returns an absent or empty reply, which callers must display as a
//! valid "no analysis yet" state rather than a fault.

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

use flipcards_core::stats::Statistics;
use flipcards_core::types::card::Card;
use serde::Serialize;
use tokio::time::sleep;

/// How long the fake connection handshake takes at startup.
pub const CONNECT_DELAY: Duration = Duration::from_millis(1500);

/// Simulated latency before each canned reply.
const REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
}

impl Display for ConnectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionStatus::Connecting => write!(f, "connecting to the assistant..."),
            ConnectionStatus::Connected => write!(f, "connected to the assistant"),
        }
    }
}

/// A snapshot of the assistant connection. Handlers copy this out of the
/// server state, await a reply without holding the lock, and write the
/// result back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Assistant {
    status: ConnectionStatus,
}

impl Assistant {
    pub fn new() -> Self {
        Self {
            status: ConnectionStatus::Connecting,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn mark_connected(&mut self) {
        self.status = ConnectionStatus::Connected;
    }

    /// Run the fake handshake. Always succeeds.
    pub async fn test_connection() -> TestOutcome {
        sleep(REPLY_DELAY).await;
        TestOutcome {
            success: true,
            message: "Connected to the assistant service.".to_string(),
        }
    }

    /// Summarize the user's progress and the words they keep missing.
    pub async fn analyze(self, cards: &[Card]) -> Option<Analysis> {
        if !self.is_connected() {
            log::warn!("assistant not connected, skipping analysis");
            return None;
        }
        sleep(REPLY_DELAY).await;
        let stats = Statistics::measure(cards);
        let difficult_words = cards
            .iter()
            .filter(|card| card.reviewed && !card.correct)
            .map(|card| card.english.clone())
            .collect();
        Some(Analysis {
            learning_progress: stats.reviewed_percentage().round() as u32,
            difficult_words,
            recommended_review_strategy:
                "Review five cards a day, focusing on the words you have not remembered yet."
                    .to_string(),
        })
    }

    /// General study advice. Empty while disconnected.
    pub async fn learning_tips(self) -> Vec<String> {
        if !self.is_connected() {
            log::warn!("assistant not connected, no learning tips");
            return Vec::new();
        }
        sleep(REPLY_DELAY).await;
        vec![
            "Try using these words in sentences of your own to deepen the memory.".to_string(),
            "Studying related words together in groups improves efficiency.".to_string(),
            "Regular review is the key to retention.".to_string(),
            "Work these words into everyday conversation.".to_string(),
        ]
    }

    /// Lay out a plan for finishing the unreviewed cards, assuming the
    /// collection should be worked through in about two weeks.
    pub async fn study_plan(self, cards: &[Card], days_per_week: usize) -> Option<StudyPlan> {
        if !self.is_connected() {
            log::warn!("assistant not connected, no study plan");
            return None;
        }
        sleep(REPLY_DELAY).await;
        let days_per_week = days_per_week.max(1);
        let remaining = Statistics::measure(cards).remaining_cards();
        let cards_per_day = remaining.div_ceil(days_per_week * 2);
        let days_needed = if cards_per_day == 0 {
            0
        } else {
            remaining.div_ceil(cards_per_day)
        };
        let estimated_completion_weeks = if cards_per_day == 0 {
            0
        } else {
            remaining.div_ceil(cards_per_day * days_per_week)
        };
        Some(StudyPlan {
            cards_per_day,
            days_needed,
            estimated_completion_weeks,
            daily_time_estimate: format!("{}-{} minutes", cards_per_day * 2, cards_per_day * 5),
            plan: vec![
                format!("Learn {cards_per_day} new words every day"),
                format!("Review {} previously studied words every day", cards_per_day * 2),
                "Do a full review over the weekend".to_string(),
            ],
        })
    }

    /// Mnemonics for a word. Canned lists for the three seeded greetings,
    /// generic advice otherwise.
    pub async fn memory_techniques(self, word: &str) -> Vec<String> {
        if !self.is_connected() {
            log::warn!("assistant not connected, no memory techniques");
            return Vec::new();
        }
        sleep(REPLY_DELAY).await;
        let canned: Option<&[&str]> = match word {
            "Hello" => Some(&[
                "Association: picture the moment of greeting someone you run into.",
                "Sound link: \"Hello\" sounds close to the Chinese 嗨罗.",
                "Repetition: say \"Hello\" to at least three people every day.",
            ]),
            "Thank you" => Some(&[
                "Scene association: picture saying thanks while receiving a gift.",
                "Gesture memory: pair \"Thank you\" with a small gesture of thanks.",
                "Repetition: say \"Thank you\" every time someone helps you.",
            ]),
            "Goodbye" => Some(&[
                "Scene association: picture parting ways with a friend.",
                "Decomposition: break the word into \"good\" + \"bye\".",
                "Repetition: say \"Goodbye\" at the end of every conversation.",
            ]),
            _ => None,
        };
        match canned {
            Some(techniques) => techniques.iter().map(|t| t.to_string()).collect(),
            None => vec![
                "Association: tie this word to a familiar image or situation.".to_string(),
                "Sound link: connect its pronunciation to a similar Chinese sound.".to_string(),
                "Sentence building: put it in a short sentence and repeat it often.".to_string(),
                "Flashcards: keep reviewing this word in your deck.".to_string(),
            ],
        }
    }

    /// Example sentences for a word, truncated to `count`. Canned lists for
    /// the three seeded greetings, templated sentences otherwise.
    pub async fn example_sentences(self, word: &str, count: usize) -> Vec<String> {
        if !self.is_connected() {
            log::warn!("assistant not connected, no example sentences");
            return Vec::new();
        }
        sleep(REPLY_DELAY).await;
        let canned: Option<&[&str]> = match word {
            "Hello" => Some(&[
                "Hello, how are you today?",
                "I said hello to my neighbor this morning.",
                "She waved hello from across the street.",
                "Hello, is anyone there?",
                "The children shouted hello when they saw their teacher.",
            ]),
            "Thank you" => Some(&[
                "Thank you for your help with my project.",
                "I received the gift and wanted to say thank you.",
                "Thank you for coming to my birthday party.",
                "The audience applauded to say thank you to the performers.",
                "She wrote a thank you note after the interview.",
            ]),
            "Goodbye" => Some(&[
                "We said goodbye to our friends at the airport.",
                "It's hard to say goodbye to someone you love.",
                "She waved goodbye as the train departed.",
                "The children said goodbye to their teacher on the last day of school.",
                "He didn't even say goodbye before he left.",
            ]),
            _ => None,
        };
        let sentences: Vec<String> = match canned {
            Some(sentences) => sentences.iter().map(|s| s.to_string()).collect(),
            None => vec![
                format!("This is an example sentence using the word \"{word}\"."),
                format!("I need to practice using \"{word}\" in conversation."),
                format!("Can you help me understand how to use \"{word}\" correctly?"),
                format!("The teacher explained the meaning of \"{word}\" to the class."),
                format!("I learned the word \"{word}\" in my English class today."),
            ],
        };
        sentences.into_iter().take(count).collect()
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Analysis {
    pub learning_progress: u32,
    pub difficult_words: Vec<String>,
    pub recommended_review_strategy: String,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct StudyPlan {
    pub cards_per_day: usize,
    pub days_needed: usize,
    pub estimated_completion_weeks: usize,
    pub daily_time_estimate: String,
    pub plan: Vec<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct TestOutcome {
    pub success: bool,
    pub message: String,
}
