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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use flipcards_core::error::Fallible;
use flipcards_core::stats::Statistics;

use crate::config::DEFAULT_CARDS_FILE;
use crate::storage::CardFile;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// A human-readable table.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(cards: Option<String>, format: StatsFormat) -> Fallible<()> {
    let path = cards.unwrap_or_else(|| DEFAULT_CARDS_FILE.to_string());
    let cards = CardFile::new(path).load();
    let stats = Statistics::measure(&cards);
    match format {
        StatsFormat::Text => {
            println!("Total cards:     {}", stats.total_cards);
            println!("Reviewed:        {}", stats.reviewed_cards);
            println!("Correct:         {}", stats.correct_cards);
            println!("Incorrect:       {}", stats.incorrect_cards);
            println!("Remaining:       {}", stats.remaining_cards());
            println!("Reviewed share:  {:.0}%", stats.reviewed_percentage());
            println!("Correct share:   {:.0}%", stats.correct_percentage());
        }
        StatsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
