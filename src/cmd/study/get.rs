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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::Redirect;
use flipcards_core::session::SessionStatus;
use flipcards_core::stats::Statistics;
use flipcards_core::types::card::Card;
use maud::Markup;
use maud::html;

use crate::cmd::study::state::MutableState;
use crate::cmd::study::state::NoticeKind;
use crate::cmd::study::state::ServerState;
use crate::cmd::study::state::Tab;
use crate::cmd::study::template::page_template;

pub async fn root_handler(State(state): State<ServerState>) -> Redirect {
    let mutable = state.mutable.lock().unwrap();
    Redirect::to(mutable.active_tab.path())
}

pub async fn create_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    tab_page(&state, Tab::Create)
}

pub async fn search_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    tab_page(&state, Tab::Search)
}

pub async fn review_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    tab_page(&state, Tab::Review)
}

pub async fn stats_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    tab_page(&state, Tab::Stats)
}

pub async fn assistant_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    tab_page(&state, Tab::Assistant)
}

fn tab_page(state: &ServerState, tab: Tab) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    mutable.active_tab = tab;
    let content = match tab {
        Tab::Create => render_create(&mutable),
        Tab::Search => render_search(&mutable),
        Tab::Review => render_review(state, &mutable),
        Tab::Stats => render_stats(&mutable),
        Tab::Assistant => render_assistant(&mutable),
    };
    let body = html! {
        div.app {
            (render_sidebar(tab))
            main.content {
                (content)
            }
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

fn render_sidebar(active: Tab) -> Markup {
    html! {
        div.sidebar {
            div.sidebar-title { "English Flashcards" }
            ul.nav {
                @for tab in Tab::ALL {
                    li.nav-item.active[tab == active] {
                        a href=(tab.path()) {
                            span.nav-icon { (tab.icon()) }
                            (tab.label())
                        }
                    }
                }
            }
        }
    }
}

// ── Create ─────────────────────────────────────────────────────

fn render_create(m: &MutableState) -> Markup {
    html! {
        div.panel {
            h2.panel-title { "Create a Card" }
            form.create-form action="/" method="post" {
                div.form-group {
                    label for="english" { "English word or phrase:" }
                    input #english type="text" name="english" placeholder="Enter the English side";
                }
                div.form-group {
                    label for="chinese" { "Chinese translation:" }
                    input #chinese type="text" name="chinese" placeholder="Enter the Chinese side";
                }
                input.primary type="submit" name="action" value="Create";
            }
            @if let Some(notice) = &m.notice {
                div.notice.notice-success[notice.kind == NoticeKind::Success]
                    .notice-error[notice.kind == NoticeKind::Error] {
                    (notice.text)
                }
            }
        }
    }
}

// ── Search ─────────────────────────────────────────────────────

/// Cards matching the query: case-insensitive on the English side, plain
/// substring on the Chinese side. A blank query matches everything.
fn search_cards<'a>(cards: &'a [Card], query: &str) -> Vec<&'a Card> {
    let query = query.trim();
    if query.is_empty() {
        return cards.iter().collect();
    }
    let lowered = query.to_lowercase();
    cards
        .iter()
        .filter(|card| {
            card.english.to_lowercase().contains(&lowered) || card.chinese.contains(query)
        })
        .collect()
}

fn render_search(m: &MutableState) -> Markup {
    let results = search_cards(m.store.cards(), &m.search_query);
    html! {
        div.panel {
            h2.panel-title { "Search Cards" }
            form.search-form action="/" method="post" {
                input.search-input type="text" name="query" value=(m.search_query)
                    placeholder="Search by English or Chinese...";
                input type="submit" name="action" value="Search";
            }
            @if results.is_empty() {
                div.no-results { "No matching cards." }
            } @else {
                div.results-grid {
                    @for card in results {
                        div.result-card {
                            div.result-english { (card.english) }
                            div.result-chinese { (card.chinese) }
                            @if card.reviewed {
                                @if card.correct {
                                    div.result-status.remembered { "remembered" }
                                } @else {
                                    div.result-status.missed { "missed" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ── Review ─────────────────────────────────────────────────────

fn render_review(state: &ServerState, m: &MutableState) -> Markup {
    match m.session.status(&m.store) {
        SessionStatus::Empty => render_review_empty(),
        SessionStatus::Exhausted => render_review_finished(state, m),
        SessionStatus::Active => render_review_active(m),
    }
}

fn render_review_empty() -> Markup {
    html! {
        div.panel {
            h2.panel-title { "Review Cards" }
            div.no-cards { "There are no flashcards yet. Create some first." }
        }
    }
}

fn render_review_active(m: &MutableState) -> Markup {
    let progress = m.session.progress(&m.store);
    let percent = (progress.position - 1) * 100 / progress.total;
    let progress_style = format!("width: {percent}%;");
    // The session is active, so a current card exists.
    let card = m.session.current_card(&m.store).unwrap();
    html! {
        div.panel {
            h2.panel-title { "Review Cards" }
            div.progress {
                div.progress-text {
                    span { "Progress: " (progress.position) " / " (progress.total) }
                    span { (percent) "%" }
                }
                div.progress-bar {
                    div.progress-fill style=(progress_style) {}
                }
            }
            (render_card(card, m.flipped))
            div.navigation {
                form action="/" method="post" {
                    (nav_button("previous", "Previous", "\u{2190} Previous", progress.position == 1))
                }
                form action="/" method="post" {
                    (nav_button("next", "Next", "Next \u{2192}", progress.position == progress.total))
                }
            }
            div.instructions {
                p { "Click the card or press space to flip it. Navigate with the arrow keys." }
                p { "After checking the back, pick \"Forgot\" or \"Good\" to record your progress." }
            }
        }
    }
}

fn render_card(card: &Card, flipped: bool) -> Markup {
    html! {
        div.card-container {
            form action="/" method="post" {
                button #flip .card .flipped[flipped] type="submit" name="action" value="Flip"
                    title="Flip the card. Shortcut: space." {
                    @if flipped {
                        div.card-text { (card.chinese) }
                    } @else {
                        div.card-text { (card.english) }
                    }
                }
            }
            @if flipped {
                form.grades action="/" method="post" {
                    input #forgot .forgot type="submit" name="action" value="Forgot"
                        title="Mark the card as forgotten. Shortcut: 1.";
                    input #good .good type="submit" name="action" value="Good"
                        title="Mark the card as remembered. Shortcut: 2.";
                }
            }
        }
    }
}

fn nav_button(id: &str, value: &str, label: &str, disabled: bool) -> Markup {
    html! {
        button.nav-button id=(id) type="submit" name="action" value=(value) disabled[disabled] {
            (label)
        }
    }
}

fn render_review_finished(state: &ServerState, m: &MutableState) -> Markup {
    let duration = chrono::Local::now().naive_local() - state.session_started_at;
    html! {
        div.panel {
            div.finished {
                h1 { "All Cards Reviewed \u{1F389}" }
                div.summary {
                    "Congratulations! You have reviewed every card in the collection."
                }
                h2 { "Session Stats" }
                div.stats {
                    table {
                        tbody {
                            tr {
                                td.key { "Total Cards" }
                                td.val { (m.store.len()) }
                            }
                            tr {
                                td.key { "Graded This Session" }
                                td.val { (m.graded_this_session) }
                            }
                            tr {
                                td.key { "Started" }
                                td.val { (state.session_started_at.format("%Y-%m-%d %H:%M:%S")) }
                            }
                            tr {
                                td.key { "Duration (seconds)" }
                                td.val { (duration.num_seconds()) }
                            }
                        }
                    }
                }
                form action="/" method="post" {
                    input #restart .restart type="submit" name="action" value="Restart"
                        title="Mark every card unreviewed and start a fresh pass";
                }
                div.shutdown-container {
                    form action="/" method="post" {
                        input #shutdown .shutdown-button type="submit" name="action" value="Shutdown"
                            title="Shut down the server";
                    }
                }
            }
        }
    }
}

// ── Statistics ─────────────────────────────────────────────────

fn render_stats(m: &MutableState) -> Markup {
    let stats = Statistics::measure(m.store.cards());
    html! {
        div.panel {
            h2.panel-title { "Statistics" }
            div.stats-grid {
                (stat_tile(stats.total_cards, "Total Cards"))
                (stat_tile(stats.reviewed_cards, "Reviewed"))
                (stat_tile(stats.correct_cards, "Correct"))
                (stat_tile(stats.incorrect_cards, "Incorrect"))
            }
            div.meters {
                (meter("Reviewed share", stats.reviewed_percentage(), "meter-reviewed"))
                (meter("Correct share", stats.correct_percentage(), "meter-correct"))
                (meter("Incorrect share", stats.incorrect_percentage(), "meter-incorrect"))
            }
        }
    }
}

fn stat_tile(value: usize, label: &str) -> Markup {
    html! {
        div.stat-tile {
            div.stat-value { (value) }
            div.stat-label { (label) }
        }
    }
}

fn meter(label: &str, percentage: f64, class: &str) -> Markup {
    let style = format!("width: {percentage:.0}%;");
    html! {
        div.meter-row {
            div.meter-label {
                span { (label) }
                span { (format!("{percentage:.0}%")) }
            }
            div.meter {
                div.meter-fill.(class) style=(style) {}
            }
        }
    }
}

// ── Assistant ──────────────────────────────────────────────────

fn render_assistant(m: &MutableState) -> Markup {
    let connected = m.assistant.is_connected();
    html! {
        div.panel {
            h2.panel-title { "AI Assistant" }
            div.status-bar.status-connected[connected].status-disconnected[!connected] {
                span { (m.assistant.status()) }
                form action="/" method="post" {
                    input type="submit" name="action" value="Connect"
                        title="Run the connection handshake again";
                }
            }
            div.tools {
                form.tool action="/" method="post" {
                    input type="submit" name="action" value="Analyze"
                        title="Summarize progress and difficult words";
                }
                form.tool action="/" method="post" {
                    input type="submit" name="action" value="Tips" title="General study advice";
                }
                form.tool action="/" method="post" {
                    label { "Days per week:" }
                    input type="number" name="days_per_week" value="5" min="1" max="7";
                    input type="submit" name="action" value="Plan"
                        title="Lay out a plan for the remaining cards";
                }
                form.tool action="/" method="post" {
                    label { "Word:" }
                    (word_select(m))
                    input type="submit" name="action" value="Techniques"
                        title="Mnemonics for the chosen word";
                }
                form.tool action="/" method="post" {
                    label { "Word:" }
                    (word_select(m))
                    input type="number" name="sentence_count" value="3" min="1" max="5";
                    input type="submit" name="action" value="Sentences"
                        title="Example sentences for the chosen word";
                }
            }
            @if let Some(report) = &m.report {
                div.report {
                    h3 { (report.title) }
                    pre { (report.body) }
                }
            } @else {
                div.report-placeholder { "No reply yet." }
            }
        }
    }
}

fn word_select(m: &MutableState) -> Markup {
    html! {
        select name="word" {
            @for card in m.store.cards() {
                option value=(card.english) { (card.english) }
            }
        }
    }
}
