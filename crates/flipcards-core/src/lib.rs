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

//! flipcards-core: Core library for the flipcards study tool.
//!
//! This library provides the domain logic shared by the CLI and the web
//! interface:
//! - Card types and the ordered card store
//! - The review session (filtering, cursor navigation, grading)
//! - Collection statistics
//! - The built-in starter deck

pub mod error;
pub mod seed;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use seed::seed_deck;
pub use session::{Progress, ReviewSession, SessionStatus, reviewable_cards};
pub use stats::Statistics;
pub use store::CardStore;
pub use types::card::{Card, CardId, Grade};
