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

use std::process::exit;

use clap::Parser;
use flipcards_core::error::Fallible;
use tokio::spawn;

use crate::cmd::export::export_collection;
use crate::cmd::reset::reset_collection;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::study::server::ServerConfig;
use crate::cmd::study::server::start_server;
use crate::config::Config;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study cards through a web interface.
    Study {
        /// Path to the saved card collection. By default, `flipcards.json` in the current working directory is used.
        cards: Option<String>,
        /// Path to an optional TOML configuration file. By default, `flipcards.toml` is read if present.
        #[arg(long)]
        config: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server. Default is 8000.
        #[arg(long)]
        port: Option<u16>,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the saved card collection. By default, `flipcards.json` in the current working directory is used.
        cards: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Export a collection as JSON.
    Export {
        /// Path to the saved card collection. By default, `flipcards.json` in the current working directory is used.
        cards: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Mark every card as unreviewed, forgetting all grading.
    Reset {
        /// Path to the saved card collection. By default, `flipcards.json` in the current working directory is used.
        cards: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study {
            cards,
            config,
            host,
            port,
            open_browser,
        } => {
            let config = Config::load(config.as_deref())?;
            let host = host.unwrap_or_else(|| config.host());
            let port = port.unwrap_or_else(|| config.port());
            let cards = cards.unwrap_or_else(|| config.cards());
            let open_browser = open_browser.unwrap_or_else(|| config.open_browser());
            if open_browser {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                cards,
                host,
                port,
                session_started_at: chrono::Local::now().naive_local(),
            };
            start_server(config).await
        }
        Command::Stats { cards, format } => print_stats(cards, format),
        Command::Export { cards, output } => export_collection(cards, output),
        Command::Reset { cards } => reset_collection(cards),
    }
}
