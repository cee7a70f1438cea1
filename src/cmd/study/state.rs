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

use std::sync::Arc;
use std::sync::Mutex;

use chrono::NaiveDateTime;
use flipcards_core::session::ReviewSession;
use flipcards_core::store::CardStore;
use tokio::sync::oneshot::Sender;

use crate::assistant::Assistant;
use crate::storage::CardFile;

/// The five tabs of the interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    Create,
    Search,
    Review,
    Stats,
    Assistant,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Create,
        Tab::Search,
        Tab::Review,
        Tab::Stats,
        Tab::Assistant,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Tab::Create => "/create",
            Tab::Search => "/search",
            Tab::Review => "/review",
            Tab::Stats => "/stats",
            Tab::Assistant => "/assistant",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Create => "Create",
            Tab::Search => "Search",
            Tab::Review => "Review",
            Tab::Stats => "Statistics",
            Tab::Assistant => "Assistant",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tab::Create => "\u{270F}\u{FE0F}",
            Tab::Search => "\u{1F50D}",
            Tab::Review => "\u{1F4DA}",
            Tab::Stats => "\u{1F4CA}",
            Tab::Assistant => "\u{1F916}",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message on the Create tab.
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// The last assistant reply, kept as pretty-printed JSON for display.
pub struct Report {
    pub title: &'static str,
    pub body: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub session_started_at: NaiveDateTime,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub file: CardFile,
    pub store: CardStore,
    pub session: ReviewSession,
    pub active_tab: Tab,
    /// Whether the displayed card is showing its back. Cleared whenever the
    /// displayed card changes.
    pub flipped: bool,
    pub notice: Option<Notice>,
    /// Bumped on every new notice, so a stale expiry timer never clears a
    /// newer notice.
    pub notice_generation: u64,
    pub search_query: String,
    pub assistant: Assistant,
    pub report: Option<Report>,
    /// Number of cards graded since the server started.
    pub graded_this_session: usize,
}
