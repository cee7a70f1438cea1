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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flipcards_core::error::Fallible;
    use flipcards_core::types::card::Card;
    use flipcards_core::types::card::CardId;
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tokio::spawn;

    use crate::cmd::study::server::ServerConfig;
    use crate::cmd::study::server::start_server;
    use crate::helper::create_tmp_cards_path;
    use crate::storage::CardFile;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn test_config(cards: String, port: u16) -> ServerConfig {
        ServerConfig {
            cards,
            host: TEST_HOST.to_string(),
            port,
            session_started_at: chrono::Local::now().naive_local(),
        }
    }

    async fn spawn_server(cards: String) -> Fallible<u16> {
        let port = pick_unused_port().unwrap();
        let config = test_config(cards, port);
        spawn(async move { start_server(config).await });
        wait_for_server(TEST_HOST, port).await?;
        Ok(port)
    }

    async fn get_page(port: u16, path: &str) -> reqwest::Response {
        reqwest::get(format!("http://{TEST_HOST}:{port}{path}"))
            .await
            .unwrap()
    }

    /// Post an action form and return the page it redirects to.
    async fn post_action(port: u16, form: &[(&str, &str)]) -> String {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        response.text().await.unwrap()
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let config = test_config("./derpherp/flipcards.json".to_string(), port);
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: collection directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let cards = create_tmp_cards_path()?;
        let port = spawn_server(cards.clone()).await?;

        // Hit the `style.css` endpoint.
        let response = get_page(port, "/style.css").await;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the `script.js` endpoint.
        let response = get_page(port, "/script.js").await;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        // Hit the not found endpoint.
        let response = get_page(port, "/herp-derp").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The root endpoint redirects to the active tab, initially Create.
        let response = get_page(port, "/").await;
        assert!(response.status().is_success());
        assert!(response.url().path().ends_with("/create"));
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Create a Card"));

        // Create a card; the redirected page carries the success notice.
        let html = post_action(
            port,
            &[
                ("action", "Create"),
                ("english", "See you tomorrow"),
                ("chinese", "明天见"),
            ],
        )
        .await;
        assert!(html.contains("Card created!"));

        // The new card was written through to disk.
        let saved: Vec<Card> = serde_json::from_str(&std::fs::read_to_string(&cards)?)?;
        assert_eq!(saved.len(), 11);
        assert_eq!(saved[10].english, "See you tomorrow");
        assert_eq!(saved[10].id, CardId::new(11));

        // A blank side is rejected with a notice, leaving the deck alone.
        let html = post_action(port, &[("action", "Create"), ("english", "Hi")]).await;
        assert!(html.contains("must both be filled in"));
        let saved: Vec<Card> = serde_json::from_str(&std::fs::read_to_string(&cards)?)?;
        assert_eq!(saved.len(), 11);

        // Search for a word.
        let html = post_action(port, &[("action", "Search"), ("query", "hello")]).await;
        assert!(html.contains("Hello"));
        assert!(html.contains("你好"));
        let html = post_action(port, &[("action", "Search"), ("query", "zebra")]).await;
        assert!(html.contains("No matching cards."));

        // The review tab starts at the first seeded card, front side up.
        let response = get_page(port, "/review").await;
        let html = response.text().await.unwrap();
        assert!(html.contains("Progress: 1 / 11"));
        assert!(html.contains("Hello"));
        assert!(!html.contains("id=\"forgot\""));

        // Flip it; the back shows the translation and the grade buttons.
        let html = post_action(port, &[("action", "Flip")]).await;
        assert!(html.contains("你好"));
        assert!(html.contains("id=\"forgot\""));
        assert!(html.contains("id=\"good\""));

        // Grade it; the next derivation shows the next card, front side up.
        let html = post_action(port, &[("action", "Good")]).await;
        assert!(html.contains("Progress: 1 / 10"));
        assert!(html.contains("Thank you"));
        assert!(!html.contains("id=\"forgot\""));
        let saved: Vec<Card> = serde_json::from_str(&std::fs::read_to_string(&cards)?)?;
        assert!(saved[0].reviewed);
        assert!(saved[0].correct);

        // Navigating back saturates at the first card.
        let html = post_action(port, &[("action", "Previous")]).await;
        assert!(html.contains("Progress: 1 / 10"));

        // Forward and back again returns to the same card.
        let html = post_action(port, &[("action", "Next")]).await;
        assert!(html.contains("Progress: 2 / 10"));
        let html = post_action(port, &[("action", "Previous")]).await;
        assert!(html.contains("Progress: 1 / 10"));

        // The statistics tab reflects the graded card.
        let response = get_page(port, "/stats").await;
        let html = response.text().await.unwrap();
        assert!(html.contains("Total Cards"));
        assert!(html.contains("11"));

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausting_and_restarting_a_session() -> Fallible<()> {
        let cards = create_tmp_cards_path()?;
        CardFile::new(&cards).save(&[Card::new(CardId::new(1), "Hello", "你好")])?;
        let port = spawn_server(cards).await?;

        // Grade the only card; the session is exhausted.
        let html = post_action(port, &[("action", "Good")]).await;
        assert!(html.contains("All Cards Reviewed"));
        assert!(html.contains("Graded This Session"));

        // Grading without a current card is ignored.
        let html = post_action(port, &[("action", "Forgot")]).await;
        assert!(html.contains("All Cards Reviewed"));

        // Restart: the card is reviewable again.
        let html = post_action(port, &[("action", "Restart")]).await;
        assert!(html.contains("Progress: 1 / 1"));
        assert!(html.contains("Hello"));
        Ok(())
    }

    #[tokio::test]
    async fn test_assistant_flow() -> Fallible<()> {
        let cards = create_tmp_cards_path()?;
        let port = spawn_server(cards).await?;

        // Before the handshake finishes, replies are absent but valid.
        let html = post_action(port, &[("action", "Tips")]).await;
        assert!(html.contains("No reply yet."));

        // Run the handshake explicitly.
        let html = post_action(port, &[("action", "Connect")]).await;
        assert!(html.contains("connected to the assistant"));
        assert!(html.contains("Connection test"));

        // Analysis of the fresh seed deck.
        let html = post_action(port, &[("action", "Analyze")]).await;
        assert!(html.contains("Analysis"));
        assert!(html.contains("learning_progress"));

        // Canned example sentences, truncated to the requested count.
        let html = post_action(
            port,
            &[
                ("action", "Sentences"),
                ("word", "Hello"),
                ("sentence_count", "2"),
            ],
        )
        .await;
        assert!(html.contains("Hello, how are you today?"));
        assert!(!html.contains("She waved hello from across the street."));

        // A study plan for the default five days a week.
        let html = post_action(port, &[("action", "Plan"), ("days_per_week", "5")]).await;
        assert!(html.contains("cards_per_day"));
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown() -> Fallible<()> {
        let cards = create_tmp_cards_path()?;
        let port = spawn_server(cards).await?;

        // Hit shutdown without following the redirect, since the server
        // goes away underneath it.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();
        let response = client
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(&[("action", "Shutdown")])
            .send()
            .await
            .unwrap();
        assert!(response.status().is_redirection());

        // The server stops accepting connections.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(
            reqwest::get(format!("http://{TEST_HOST}:{port}/"))
                .await
                .is_err()
        );
        Ok(())
    }
}
