//! # DAO Proposal Tally
//!
//! Curated governance proposals whose vote counts grow with every vote.
//! Crossing the threshold is informational only: status is never
//! advanced by this slice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::notify::{emit, NoticeKind, Notification};
use crate::types::{Proposal, ProposalStatus};

/// Smallest weight a single vote adds.
pub const VOTE_WEIGHT_MIN: u64 = 100;
/// Largest weight a single vote adds.
pub const VOTE_WEIGHT_MAX: u64 = 1_000;

fn curated_proposals() -> Vec<Proposal> {
    let entry = |id, title: &str, description: &str, votes, threshold, status| Proposal {
        id,
        title: title.to_string(),
        description: description.to_string(),
        votes,
        threshold,
        status,
    };
    vec![
        entry(
            101,
            "Add New Staking Tier: Platinum",
            "Proposal to add a new top-tier staking level with higher rewards.",
            47_000,
            50_000,
            ProposalStatus::Voting,
        ),
        entry(
            102,
            "Increase Project Dispute Fee",
            "Increase the dispute fee from 50 ASRA to 100 ASRA to prevent spam.",
            62_000,
            50_000,
            ProposalStatus::Passed,
        ),
        entry(
            103,
            "Community Grant for Dev Tooling",
            "Fund a project to build better developer tools for the Assura ecosystem.",
            35_000,
            60_000,
            ProposalStatus::Voting,
        ),
        entry(
            104,
            "Marketing Campaign for Q3",
            "Allocate funds for a major marketing push to attract new users.",
            88_000,
            75_000,
            ProposalStatus::Executed,
        ),
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalView {
    #[serde(flatten)]
    pub proposal: Proposal,
    pub progress_percent: f64,
    pub action_label: &'static str,
    pub action_enabled: bool,
}

impl From<&Proposal> for ProposalView {
    fn from(p: &Proposal) -> Self {
        Self {
            proposal: p.clone(),
            progress_percent: p.progress_percent(),
            action_label: p.status.badge().label,
            action_enabled: p.status.action_enabled(),
        }
    }
}

pub struct ProposalTally {
    proposals: Vec<Proposal>,
    rng: StdRng,
}

impl ProposalTally {
    pub fn new(rng: StdRng) -> Self {
        Self::with_proposals(Vec::new(), rng)
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn with_proposals(proposals: Vec<Proposal>, rng: StdRng) -> Self {
        Self { proposals, rng }
    }

    /// Load the curated list if empty. Returns the number of proposals added.
    pub fn seed_proposals(&mut self) -> usize {
        if !self.proposals.is_empty() {
            return 0;
        }
        self.proposals = curated_proposals();
        self.proposals.len()
    }

    /// Add a random weight in `[100, 1000]` to the proposal's tally.
    ///
    /// There is no voter identity, so repeated votes all count.
    pub fn vote(&mut self, id: u64) -> Option<Notification> {
        let weight = self.rng.gen_range(VOTE_WEIGHT_MIN..=VOTE_WEIGHT_MAX);
        let Some(proposal) = self.proposals.iter_mut().find(|p| p.id == id) else {
            debug!(proposal_id = id, "Ignoring vote for unknown proposal");
            return None;
        };
        let was_reached = proposal.threshold_reached();
        proposal.votes = proposal.votes.saturating_add(weight);
        if !was_reached && proposal.threshold_reached() {
            debug!(
                proposal_id = id,
                votes = proposal.votes,
                threshold = proposal.threshold,
                "Threshold reached; status left as {}",
                proposal.status.as_str()
            );
        }
        emit(NoticeKind::VoteCast, "Your vote has been recorded.")
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn get(&self, id: u64) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    pub fn views(&self) -> Vec<ProposalView> {
        self.proposals.iter().map(ProposalView::from).collect()
    }
}
