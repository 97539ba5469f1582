//! Token metrics, price history and the people/project suggestion feed.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// Price points kept in the chart window.
pub const PRICE_WINDOW: usize = 10;
pub const SUGGESTION_COUNT: usize = 20;

const NAMES: [&str; 10] = [
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Jessie", "Jamie", "Kai", "Rowan",
];
const SKILLS: [&str; 5] = [
    "Smart Contract Dev",
    "UI/UX Designer",
    "Frontend Dev",
    "Backend Dev",
    "DevOps Engineer",
];
const PROJECT_KINDS: [&str; 5] = [
    "DeFi Platform",
    "NFT Marketplace",
    "DAO Tooling",
    "Web3 Game",
    "Wallet App",
];
const TAGS: [[&str; 2]; 5] = [
    ["Solidity", "DeFi"],
    ["Figma", "Web3"],
    ["React", "Ethers.js"],
    ["Node.js", "API"],
    ["CI/CD", "Security"],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetrics {
    pub total_supply: u64,
    pub circulating_supply: i64,
    pub total_staked: u64,
    pub total_unstaking: u64,
    pub total_burned: u64,
}

impl Default for TokenMetrics {
    fn default() -> Self {
        Self {
            total_supply: 1_000_000_000,
            circulating_supply: 994_550_000,
            total_staked: 4_520_000,
            total_unstaking: 120_000,
            total_burned: 1_250_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Worker,
    Project,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub id: u32,
    pub kind: SuggestionKind,
    pub name: String,
    pub title: String,
    pub tags: Vec<String>,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub metrics: TokenMetrics,
    pub price_history: Vec<PricePoint>,
    pub suggestions: Vec<Suggestion>,
}

pub struct Dashboard {
    metrics: TokenMetrics,
    price_history: VecDeque<PricePoint>,
    next_day: u32,
    suggestions: Vec<Suggestion>,
    rng: StdRng,
}

impl Dashboard {
    pub fn new(rng: StdRng) -> Self {
        let price_history: VecDeque<PricePoint> =
            [0.015, 0.018, 0.017, 0.021, 0.025, 0.023, 0.028]
                .iter()
                .enumerate()
                .map(|(i, price)| PricePoint {
                    name: format!("Day {}", i + 1),
                    price: *price,
                })
                .collect();
        Self {
            metrics: TokenMetrics::default(),
            next_day: price_history.len() as u32 + 1,
            price_history,
            suggestions: Vec::new(),
            rng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Random-walk the token metrics and append one price point.
    pub fn refresh_metrics(&mut self) {
        let rng = &mut self.rng;
        self.metrics.circulating_supply += rng.gen_range(-10_000..=10_000);
        self.metrics.total_staked += rng.gen_range(1_000..=5_000);
        self.metrics.total_unstaking = rng.gen_range(5_000..=20_000);

        let last = self.price_history.back().map_or(0.0, |p| p.price);
        let moved = last * (1.0 + rng.gen_range(-0.1..=0.1));
        self.price_history.push_back(PricePoint {
            name: format!("Day {}", self.next_day),
            price: (moved * 1_000.0).round() / 1_000.0,
        });
        self.next_day += 1;
        while self.price_history.len() > PRICE_WINDOW {
            self.price_history.pop_front();
        }
        debug!(
            staked = self.metrics.total_staked,
            points = self.price_history.len(),
            "Metrics refreshed"
        );
    }

    /// Build the suggestion feed if empty: even ids are workers, odd ids projects.
    pub fn seed_suggestions(&mut self) -> usize {
        if !self.suggestions.is_empty() {
            return 0;
        }
        let rng = &mut self.rng;
        self.suggestions = (0..SUGGESTION_COUNT as u32)
            .map(|id| {
                let name = *NAMES.choose(rng).unwrap_or(&NAMES[0]);
                let tags = TAGS
                    .choose(rng)
                    .unwrap_or(&TAGS[0])
                    .iter()
                    .map(|t| (*t).to_string())
                    .collect();
                if id % 2 == 0 {
                    Suggestion {
                        id,
                        kind: SuggestionKind::Worker,
                        name: name.to_string(),
                        title: (*SKILLS.choose(rng).unwrap_or(&SKILLS[0])).to_string(),
                        tags,
                        avatar: format!("https://api.dicebear.com/9.x/initials/svg?seed={name}"),
                    }
                } else {
                    Suggestion {
                        id,
                        kind: SuggestionKind::Project,
                        name: format!("Project by {name}"),
                        title: (*PROJECT_KINDS.choose(rng).unwrap_or(&PROJECT_KINDS[0]))
                            .to_string(),
                        tags,
                        avatar: format!(
                            "https://api.dicebear.com/9.x/notionists/svg?seed={name}"
                        ),
                    }
                }
            })
            .collect();
        self.suggestions.len()
    }

    pub fn metrics(&self) -> &TokenMetrics {
        &self.metrics
    }

    pub fn price_history(&self) -> impl Iterator<Item = &PricePoint> {
        self.price_history.iter()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn suggestion(&self, id: u32) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            metrics: self.metrics.clone(),
            price_history: self.price_history.iter().cloned().collect(),
            suggestions: self.suggestions.clone(),
        }
    }
}
