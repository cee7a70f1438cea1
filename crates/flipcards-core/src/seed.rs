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

use crate::types::card::Card;
use crate::types::card::CardId;

const SEED_PAIRS: [(&str, &str); 10] = [
    ("Hello", "你好"),
    ("Thank you", "谢谢"),
    ("Goodbye", "再见"),
    ("Excuse me", "对不起/打扰一下"),
    ("How are you?", "你好吗？"),
    ("My name is...", "我的名字是..."),
    ("I don't understand", "我不明白"),
    ("Where is the bathroom?", "洗手间在哪里？"),
    ("How much is this?", "这个多少钱？"),
    ("I love learning English", "我喜欢学习英语"),
];

/// The built-in starter deck, used whenever no saved collection can be
/// loaded.
pub fn seed_deck() -> Vec<Card> {
    SEED_PAIRS
        .iter()
        .enumerate()
        .map(|(i, (english, chinese))| Card::new(CardId::new(i as u64 + 1), *english, *chinese))
        .collect()
}
