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

use std::time::Duration;

use axum::extract::Form;
use axum::extract::State;
use axum::response::Redirect;
use flipcards_core::session::SessionStatus;
use flipcards_core::types::card::Card;
use flipcards_core::types::card::Grade;
use serde::Deserialize;
use serde::Serialize;
use tokio::spawn;
use tokio::time::sleep;

use crate::assistant::Assistant;
use crate::cmd::study::state::MutableState;
use crate::cmd::study::state::Notice;
use crate::cmd::study::state::NoticeKind;
use crate::cmd::study::state::Report;
use crate::cmd::study::state::ServerState;

/// How long a success notice stays visible on the Create tab.
const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
    english: Option<String>,
    chinese: Option<String>,
    query: Option<String>,
    word: Option<String>,
    days_per_week: Option<String>,
    sentence_count: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    match form.action.as_str() {
        "Create" => create(&state, &form),
        "Search" => search(&state, &form),
        "Flip" => flip(&state),
        "Forgot" => grade(&state, Grade::Forgot),
        "Good" => grade(&state, Grade::Good),
        "Previous" => navigate(&state, false),
        "Next" => navigate(&state, true),
        "Restart" => restart(&state),
        "Connect" => connect(&state).await,
        "Analyze" => analyze(&state).await,
        "Tips" => tips(&state).await,
        "Plan" => plan(&state, &form).await,
        "Techniques" => techniques(&state, &form).await,
        "Sentences" => sentences(&state, &form).await,
        "Shutdown" => shutdown(&state),
        _ => Redirect::to("/"),
    }
}

/// Write the collection through to disk. A failed save is logged rather
/// than surfaced: the in-memory state stays authoritative for the session.
fn persist(m: &MutableState) {
    if let Err(e) = m.file.save(m.store.cards()) {
        log::error!("failed to save the collection: {e}");
    }
}

// ── Create ─────────────────────────────────────────────────────

fn create(state: &ServerState, form: &ActionForm) -> Redirect {
    let english = form.english.clone().unwrap_or_default();
    let chinese = form.chinese.clone().unwrap_or_default();
    let expiring_generation = {
        let mut guard = state.mutable.lock().unwrap();
        let m = &mut *guard;
        m.notice_generation += 1;
        match m.store.add(&english, &chinese) {
            Ok(_) => {
                persist(m);
                m.notice = Some(Notice {
                    text: "Card created!".to_string(),
                    kind: NoticeKind::Success,
                });
                Some(m.notice_generation)
            }
            Err(e) => {
                m.notice = Some(Notice {
                    text: e.to_string(),
                    kind: NoticeKind::Error,
                });
                None
            }
        }
    };
    // Success notices clear themselves after a fixed delay; error notices
    // stay until the next action. The generation check keeps a stale timer
    // from clearing a newer notice.
    if let Some(generation) = expiring_generation {
        let state = state.clone();
        spawn(async move {
            sleep(NOTICE_TTL).await;
            let mut m = state.mutable.lock().unwrap();
            if m.notice_generation == generation {
                m.notice = None;
            }
        });
    }
    Redirect::to("/create")
}

// ── Search ─────────────────────────────────────────────────────

fn search(state: &ServerState, form: &ActionForm) -> Redirect {
    let mut m = state.mutable.lock().unwrap();
    m.search_query = form.query.clone().unwrap_or_default().trim().to_string();
    Redirect::to("/search")
}

// ── Review ─────────────────────────────────────────────────────

fn flip(state: &ServerState) -> Redirect {
    let mut guard = state.mutable.lock().unwrap();
    let m = &mut *guard;
    if m.session.current_card(&m.store).is_some() {
        m.flipped = !m.flipped;
    }
    Redirect::to("/review")
}

fn grade(state: &ServerState, grade: Grade) -> Redirect {
    let mut guard = state.mutable.lock().unwrap();
    let m = &mut *guard;
    if m.session.status(&m.store) == SessionStatus::Active {
        m.session.grade(&mut m.store, grade);
        m.graded_this_session += 1;
        m.flipped = false;
        persist(m);
    }
    Redirect::to("/review")
}

fn navigate(state: &ServerState, forward: bool) -> Redirect {
    let mut guard = state.mutable.lock().unwrap();
    let m = &mut *guard;
    let before = m.session.current_card(&m.store).map(|card| card.id);
    if forward {
        m.session.navigate_next(&m.store);
    } else {
        m.session.navigate_previous(&m.store);
    }
    let after = m.session.current_card(&m.store).map(|card| card.id);
    // The flip face belongs to the displayed card; a saturated move at the
    // boundary keeps the card and its face.
    if before != after {
        m.flipped = false;
    }
    Redirect::to("/review")
}

fn restart(state: &ServerState) -> Redirect {
    let mut guard = state.mutable.lock().unwrap();
    let m = &mut *guard;
    m.session.reset_all(&mut m.store);
    m.flipped = false;
    persist(m);
    Redirect::to("/review")
}

// ── Assistant ──────────────────────────────────────────────────
//
// The assistant calls sleep to fake latency, so the lock is never held
// across them: handlers snapshot the connection and the cards, await the
// reply, then lock again to store the report.

fn snapshot(state: &ServerState) -> (Assistant, Vec<Card>) {
    let m = state.mutable.lock().unwrap();
    (m.assistant, m.store.cards().to_vec())
}

fn render_report<T: Serialize>(title: &'static str, payload: &T) -> Option<Report> {
    match serde_json::to_string_pretty(payload) {
        Ok(body) => Some(Report { title, body }),
        Err(e) => {
            log::error!("failed to render an assistant reply: {e}");
            None
        }
    }
}

async fn connect(state: &ServerState) -> Redirect {
    let outcome = Assistant::test_connection().await;
    let mut m = state.mutable.lock().unwrap();
    m.assistant.mark_connected();
    m.report = render_report("Connection test", &outcome);
    Redirect::to("/assistant")
}

async fn analyze(state: &ServerState) -> Redirect {
    let (assistant, cards) = snapshot(state);
    let reply = assistant.analyze(&cards).await;
    let mut m = state.mutable.lock().unwrap();
    m.report = reply.and_then(|analysis| render_report("Analysis", &analysis));
    Redirect::to("/assistant")
}

async fn tips(state: &ServerState) -> Redirect {
    let (assistant, _) = snapshot(state);
    let reply = assistant.learning_tips().await;
    let mut m = state.mutable.lock().unwrap();
    m.report = if assistant.is_connected() {
        render_report("Learning tips", &reply)
    } else {
        None
    };
    Redirect::to("/assistant")
}

async fn plan(state: &ServerState, form: &ActionForm) -> Redirect {
    let days_per_week = form
        .days_per_week
        .as_deref()
        .and_then(|days| days.parse().ok())
        .unwrap_or(5);
    let (assistant, cards) = snapshot(state);
    let reply = assistant.study_plan(&cards, days_per_week).await;
    let mut m = state.mutable.lock().unwrap();
    m.report = reply.and_then(|plan| render_report("Study plan", &plan));
    Redirect::to("/assistant")
}

async fn techniques(state: &ServerState, form: &ActionForm) -> Redirect {
    let word = form.word.clone().unwrap_or_default();
    let word = word.trim();
    if word.is_empty() {
        return Redirect::to("/assistant");
    }
    let (assistant, _) = snapshot(state);
    let reply = assistant.memory_techniques(word).await;
    let mut m = state.mutable.lock().unwrap();
    m.report = if assistant.is_connected() {
        render_report("Memory techniques", &reply)
    } else {
        None
    };
    Redirect::to("/assistant")
}

async fn sentences(state: &ServerState, form: &ActionForm) -> Redirect {
    let word = form.word.clone().unwrap_or_default();
    let word = word.trim();
    if word.is_empty() {
        return Redirect::to("/assistant");
    }
    let count = form
        .sentence_count
        .as_deref()
        .and_then(|count| count.parse().ok())
        .unwrap_or(3);
    let (assistant, _) = snapshot(state);
    let reply = assistant.example_sentences(word, count).await;
    let mut m = state.mutable.lock().unwrap();
    m.report = if assistant.is_connected() {
        render_report("Example sentences", &reply)
    } else {
        None
    };
    Redirect::to("/assistant")
}

// ── Shutdown ───────────────────────────────────────────────────

fn shutdown(state: &ServerState) -> Redirect {
    let mut shutdown_tx = state.shutdown_tx.lock().unwrap();
    if let Some(tx) = shutdown_tx.take() {
        let _ = tx.send(());
    }
    Redirect::to("/")
}
