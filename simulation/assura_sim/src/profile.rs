//! Worker / client profile with its own seeded transaction history.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimError};
use crate::notify::{emit, NoticeKind, Notification};
use crate::types::{parse_keyed, Transaction};
use crate::wallet::{generate_transactions, SEED_TRANSACTION_COUNT};

/// Sections a fresh profile starts with, and whether each is expanded.
const DEFAULT_SECTIONS: [(&str, bool); 4] = [
    ("portfolio", true),
    ("job_history", false),
    ("tx_history", false),
    ("posted_projects", true),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileView {
    #[default]
    Worker,
    Client,
}

impl FromStr for ProfileView {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed(
            "profile view",
            s,
            &[ProfileView::Worker, ProfileView::Client],
            |v| match v {
                ProfileView::Worker => ("worker", "Worker"),
                ProfileView::Client => ("client", "Client"),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerStats {
    pub rating: f32,
    pub rank: u32,
    pub completed_jobs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub projects_posted: u32,
    pub total_spending: u64,
    pub dao_votes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioItem {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub view: ProfileView,
    pub expanded_sections: BTreeMap<String, bool>,
    pub worker: WorkerStats,
    pub client: ClientStats,
    pub portfolio: Vec<PortfolioItem>,
    pub transaction_history: Vec<Transaction>,
}

pub struct ProfileState {
    view: ProfileView,
    expanded_sections: BTreeMap<String, bool>,
    worker: WorkerStats,
    client: ClientStats,
    portfolio: Vec<PortfolioItem>,
    transaction_history: Vec<Transaction>,
    rng: StdRng,
}

impl ProfileState {
    pub fn new(rng: StdRng) -> Self {
        Self {
            view: ProfileView::default(),
            expanded_sections: DEFAULT_SECTIONS
                .iter()
                .map(|(name, open)| ((*name).to_string(), *open))
                .collect(),
            worker: WorkerStats {
                rating: 4.9,
                rank: 12,
                completed_jobs: 34,
            },
            client: ClientStats {
                projects_posted: 8,
                total_spending: 120_500,
                dao_votes: 42,
            },
            portfolio: Vec::new(),
            transaction_history: Vec::new(),
            rng,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn on_load(&mut self) {
        self.on_load_on(Local::now().date_naive());
    }

    /// Seed portfolio and history on first load only.
    pub fn on_load_on(&mut self, today: NaiveDate) {
        if !self.portfolio.is_empty() {
            return;
        }
        self.portfolio = vec![
            PortfolioItem {
                title: "DeFi Dashboard".to_string(),
                description: "A comprehensive analytics dashboard for a lending protocol."
                    .to_string(),
                image_url: "/placeholder.svg".to_string(),
            },
            PortfolioItem {
                title: "NFT Minting Site".to_string(),
                description: "Frontend for a generative art NFT collection.".to_string(),
                image_url: "/placeholder.svg".to_string(),
            },
        ];
        if self.transaction_history.is_empty() {
            self.transaction_history =
                generate_transactions(&mut self.rng, today, SEED_TRANSACTION_COUNT);
        }
    }

    pub fn set_view(&mut self, view: ProfileView) {
        self.view = view;
    }

    /// Flip a section open/closed. Unknown sections count as closed.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        let open = self.expanded_sections.entry(section.to_string()).or_insert(false);
        *open = !*open;
        *open
    }

    pub fn download_job_id(&self) -> Option<Notification> {
        emit(
            NoticeKind::DownloadStarted,
            "Simulating JobID file download...",
        )
    }

    pub fn view(&self) -> ProfileView {
        self.view
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.expanded_sections.get(section).copied().unwrap_or(false)
    }

    pub fn transaction_history(&self) -> &[Transaction] {
        &self.transaction_history
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            view: self.view,
            expanded_sections: self.expanded_sections.clone(),
            worker: self.worker.clone(),
            client: self.client.clone(),
            portfolio: self.portfolio.clone(),
            transaction_history: self.transaction_history.clone(),
        }
    }
}
