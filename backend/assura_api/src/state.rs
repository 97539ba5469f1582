//! Shared application state: one lock per simulation slice.
//!
//! Handlers lock exactly the slice they touch, so no request ever needs
//! two locks at once. The chat room manages its own lock internally.

use assura_sim::chat::ChatRoom;
use assura_sim::dao::ProposalTally;
use assura_sim::dashboard::Dashboard;
use assura_sim::entropy::slice_rng;
use assura_sim::profile::ProfileState;
use assura_sim::projects::ProjectBoard;
use assura_sim::session::SessionState;
use assura_sim::wallet::WalletLedger;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::errors::Result;

pub struct AppState {
    pub session: Mutex<SessionState>,
    pub dashboard: Mutex<Dashboard>,
    pub wallet: Mutex<WalletLedger>,
    pub projects: Mutex<ProjectBoard>,
    pub dao: Mutex<ProposalTally>,
    pub profile: Mutex<ProfileState>,
    pub chat: ChatRoom,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let seed = config.sim_seed;
        Ok(AppState {
            session: Mutex::new(SessionState::new(slice_rng(seed, 1))),
            dashboard: Mutex::new(Dashboard::new(slice_rng(seed, 2))),
            wallet: Mutex::new(WalletLedger::new(slice_rng(seed, 3))),
            projects: Mutex::new(ProjectBoard::new(slice_rng(seed, 4))),
            dao: Mutex::new(ProposalTally::new(slice_rng(seed, 5))),
            profile: Mutex::new(ProfileState::new(slice_rng(seed, 6))),
            chat: ChatRoom::new(config.chat_config()?, slice_rng(seed, 7)),
        })
    }

    /// First page view: seed every lazily populated slice once.
    pub async fn on_load(&self) {
        let suggestions = self.dashboard.lock().await.seed_suggestions();
        let proposals = self.dao.lock().await.seed_proposals();
        let transactions = self.wallet.lock().await.seed_transactions();
        let projects = self.projects.lock().await.seed_projects();
        self.profile.lock().await.on_load();
        info!(
            suggestions,
            proposals,
            transactions,
            projects,
            persona = %self.chat.config().persona,
            "Simulation state seeded"
        );
    }
}
