//! # Project Lifecycle
//!
//! A fixed board of projects driven through their lifecycle by named
//! actions keyed on project id. Unknown ids are ignored without a
//! notification.
//!
//! | Action              | Status change          | Notification         |
//! |---------------------|------------------------|----------------------|
//! | `confirm_work`      | any → `Completed`      | Work Confirmed       |
//! | `submit_work`       | none                   | Work Submitted       |
//! | `request_revision`  | none                   | Revision Requested   |
//! | `open_dispute`      | none (opens context)   | none                 |
//! | `submit_dispute`    | any → `Disputed`       | Dispute Opened       |
//!
//! At most one dispute context is open. `submit_dispute` always targets
//! the id captured by `open_dispute`.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entropy::short_address;
use crate::errors::{Result, SimError};
use crate::notify::{emit, NoticeKind, Notification};
use crate::types::{parse_keyed, Project, ProjectStatus};

pub const SEED_PROJECT_COUNT: usize = 6;
pub const FIRST_PROJECT_ID: u64 = 201;

const PROJECT_TITLES: [&str; SEED_PROJECT_COUNT] = [
    "DeFi Lending Protocol",
    "NFT Art Marketplace",
    "DAO Voting System",
    "Web3 Gaming Platform",
    "Multi-sig Wallet UI",
    "Token Bridge Audit",
];

/// Flat dispute fee in ASRA.
pub const FIXED_DISPUTE_FEE_ASRA: u64 = 50;
/// Share of the project budget charged by the percentage fee.
pub const DISPUTE_FEE_PERCENT: u64 = 10;

/// Fee attached to a dispute. Shown to the user, never deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DisputeFee {
    FixedAsra,
    PercentOfBudget,
}

impl DisputeFee {
    pub const ALL: [DisputeFee; 2] = [DisputeFee::FixedAsra, DisputeFee::PercentOfBudget];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedAsra => "asra",
            Self::PercentOfBudget => "percentage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FixedAsra => "50 ASRA (Standard)",
            Self::PercentOfBudget => "10% of Budget",
        }
    }

    /// Fee the user would owe for a project with `budget`.
    pub fn amount_for(&self, budget: u64) -> u64 {
        match self {
            Self::FixedAsra => FIXED_DISPUTE_FEE_ASRA,
            Self::PercentOfBudget => budget.saturating_mul(DISPUTE_FEE_PERCENT) / 100,
        }
    }
}

impl TryFrom<String> for DisputeFee {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DisputeFee> for String {
    fn from(fee: DisputeFee) -> Self {
        fee.as_str().to_string()
    }
}

impl std::str::FromStr for DisputeFee {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_keyed("dispute fee", s, &DisputeFee::ALL, |f| (f.as_str(), f.label()))
    }
}

/// Fields of the dispute form. Only the fee type is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeForm {
    pub reason: String,
    pub proof_link: String,
    pub fee_type: DisputeFee,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsSnapshot {
    pub projects: Vec<Project>,
    pub dispute_project_id: Option<u64>,
    pub is_dispute_modal_open: bool,
}

pub struct ProjectBoard {
    projects: Vec<Project>,
    dispute_project_id: Option<u64>,
    rng: StdRng,
}

impl ProjectBoard {
    pub fn new(rng: StdRng) -> Self {
        Self::with_projects(Vec::new(), rng)
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Start from an explicit project list instead of the random seed.
    pub fn with_projects(projects: Vec<Project>, rng: StdRng) -> Self {
        Self {
            projects,
            dispute_project_id: None,
            rng,
        }
    }

    /// Populate the board if it is empty. Returns the number of projects added.
    pub fn seed_projects(&mut self) -> usize {
        if !self.projects.is_empty() {
            return 0;
        }
        let rng = &mut self.rng;
        self.projects = PROJECT_TITLES
            .iter()
            .zip(FIRST_PROJECT_ID..)
            .map(|(title, id)| Project {
                id,
                title: (*title).to_string(),
                budget: rng.gen_range(5_000..=20_000),
                reward: rng.gen_range(100..=1_000),
                status: *ProjectStatus::ALL
                    .choose(rng)
                    .unwrap_or(&ProjectStatus::InProgress),
                client: short_address(rng),
                worker: short_address(rng),
            })
            .collect();
        debug!("Seeded {} projects", self.projects.len());
        self.projects.len()
    }

    fn find_mut(&mut self, id: u64) -> Option<&mut Project> {
        let found = self.projects.iter_mut().find(|p| p.id == id);
        if found.is_none() {
            debug!(project_id = id, "Ignoring action for unknown project");
        }
        found
    }

    /// Client accepts the work: status becomes `Completed` whatever it was.
    pub fn confirm_work(&mut self, id: u64) -> Option<Notification> {
        let project = self.find_mut(id)?;
        project.status = ProjectStatus::Completed;
        emit(
            NoticeKind::WorkConfirmed,
            format!("Project #{id} marked as complete."),
        )
    }

    /// Worker hands in work. Status is unchanged.
    pub fn submit_work(&mut self, id: u64) -> Option<Notification> {
        self.find_mut(id)?;
        emit(
            NoticeKind::WorkSubmitted,
            format!("Client has been notified to review your work for project #{id}."),
        )
    }

    /// Client asks for changes. Status is unchanged.
    pub fn request_revision(&mut self, id: u64) -> Option<Notification> {
        self.find_mut(id)?;
        emit(
            NoticeKind::RevisionRequested,
            format!("Worker notified for project #{id}."),
        )
    }

    /// Open the dispute form for `id`, replacing any open one.
    pub fn open_dispute(&mut self, id: u64) {
        if self.find_mut(id).is_some() {
            self.dispute_project_id = Some(id);
        }
    }

    pub fn close_dispute(&mut self) {
        self.dispute_project_id = None;
    }

    /// File the open dispute. No-op when no dispute context is open.
    pub fn submit_dispute(&mut self, form: &DisputeForm) -> Option<Notification> {
        let Some(id) = self.dispute_project_id.take() else {
            debug!("Dispute submitted with no open dispute context");
            return None;
        };
        let project = self.find_mut(id)?;
        project.status = ProjectStatus::Disputed;
        debug!(
            project_id = id,
            fee = form.fee_type.amount_for(project.budget),
            fee_type = form.fee_type.as_str(),
            "Dispute filed"
        );
        emit(
            NoticeKind::DisputeOpened,
            format!("A DAO proposal has been created for project #{id}."),
        )
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn dispute_project_id(&self) -> Option<u64> {
        self.dispute_project_id
    }

    pub fn snapshot(&self) -> ProjectsSnapshot {
        ProjectsSnapshot {
            projects: self.projects.clone(),
            dispute_project_id: self.dispute_project_id,
            is_dispute_modal_open: self.dispute_project_id.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::assert_valid_status_transition;

    fn project(id: u64, status: ProjectStatus) -> Project {
        Project {
            id,
            title: format!("Project {id}"),
            budget: 10_000,
            reward: 500,
            status,
            client: "0x...client".into(),
            worker: "0x...worker".into(),
        }
    }

    fn board(statuses: &[ProjectStatus]) -> ProjectBoard {
        let projects = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| project(i as u64 + 1, *s))
            .collect();
        ProjectBoard::with_projects(projects, StdRng::seed_from_u64(0))
    }

    fn form(fee_type: DisputeFee) -> DisputeForm {
        DisputeForm {
            reason: "Work not delivered".into(),
            proof_link: "https://example.com/proof".into(),
            fee_type,
        }
    }

    #[test]
    fn seed_creates_fixed_board_once() {
        let mut board = ProjectBoard::from_seed(11);
        assert_eq!(board.seed_projects(), SEED_PROJECT_COUNT);
        assert_eq!(board.seed_projects(), 0);

        let ids: Vec<u64> = board.projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![201, 202, 203, 204, 205, 206]);
        for p in board.projects() {
            assert!((5_000..=20_000).contains(&p.budget));
            assert!((100..=1_000).contains(&p.reward));
            assert!(p.client.starts_with("0x..."));
        }
        assert_eq!(board.get(203).unwrap().title, "DAO Voting System");
    }

    #[test]
    fn confirm_work_completes_from_any_status() {
        let mut board = board(&ProjectStatus::ALL);
        for id in 1..=4 {
            let before = board.get(id).unwrap().status;
            let notice = board.confirm_work(id).unwrap();
            assert_eq!(notice.kind, NoticeKind::WorkConfirmed);
            assert_eq!(notice.description, format!("Project #{id} marked as complete."));
            assert_eq!(board.get(id).unwrap().status, ProjectStatus::Completed);
            if before != ProjectStatus::Completed {
                assert_valid_status_transition(before, ProjectStatus::Completed);
            }
        }
    }

    #[test]
    fn notify_only_actions_leave_status_alone() {
        let mut board = board(&[ProjectStatus::InProgress]);
        assert_eq!(board.submit_work(1).unwrap().kind, NoticeKind::WorkSubmitted);
        assert_eq!(board.request_revision(1).unwrap().kind, NoticeKind::RevisionRequested);
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn unknown_ids_are_silent() {
        let mut board = board(&[ProjectStatus::InProgress]);
        assert!(board.confirm_work(99).is_none());
        assert!(board.submit_work(99).is_none());
        assert!(board.request_revision(99).is_none());
        board.open_dispute(99);
        assert_eq!(board.dispute_project_id(), None);
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn dispute_uses_captured_id_and_clears_context() {
        let mut board = board(&[ProjectStatus::InProgress, ProjectStatus::PendingConfirmation]);
        board.open_dispute(2);
        assert_eq!(board.dispute_project_id(), Some(2));
        assert!(board.snapshot().is_dispute_modal_open);

        let notice = board.submit_dispute(&form(DisputeFee::PercentOfBudget)).unwrap();
        assert_eq!(notice.kind, NoticeKind::DisputeOpened);
        assert_eq!(notice.duration_ms, 4_000);
        assert_eq!(board.get(2).unwrap().status, ProjectStatus::Disputed);
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::InProgress);
        assert_eq!(board.dispute_project_id(), None);

        assert!(board.submit_dispute(&form(DisputeFee::FixedAsra)).is_none());
    }

    #[test]
    fn closing_dispute_makes_submit_a_noop() {
        let mut board = board(&[ProjectStatus::InProgress]);
        board.open_dispute(1);
        board.close_dispute();
        assert!(board.submit_dispute(&form(DisputeFee::FixedAsra)).is_none());
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::InProgress);
    }

    #[test]
    fn reopening_replaces_dispute_target() {
        let mut board = board(&[ProjectStatus::InProgress, ProjectStatus::InProgress]);
        board.open_dispute(1);
        board.open_dispute(2);
        board.submit_dispute(&form(DisputeFee::FixedAsra));
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::InProgress);
        assert_eq!(board.get(2).unwrap().status, ProjectStatus::Disputed);
    }

    #[test]
    fn dispute_fee_amounts_and_parsing() {
        assert_eq!(DisputeFee::FixedAsra.amount_for(12_000), 50);
        assert_eq!(DisputeFee::PercentOfBudget.amount_for(12_000), 1_200);
        assert_eq!("asra".parse::<DisputeFee>().unwrap(), DisputeFee::FixedAsra);
        assert_eq!("percentage".parse::<DisputeFee>().unwrap(), DisputeFee::PercentOfBudget);
        assert_eq!("10% of Budget".parse::<DisputeFee>().unwrap(), DisputeFee::PercentOfBudget);
        assert!("bitcoin".parse::<DisputeFee>().is_err());
    }

    #[test]
    fn dispute_fee_wire_names_round_trip() {
        for fee in DisputeFee::ALL {
            let wire = serde_json::to_string(&fee).unwrap();
            assert_eq!(wire, format!("\"{}\"", fee.as_str()));
            assert_eq!(serde_json::from_str::<DisputeFee>(&wire).unwrap(), fee);
        }
    }

    #[test]
    fn percentage_fee_saturates_on_huge_budget() {
        assert_eq!(DisputeFee::PercentOfBudget.amount_for(u64::MAX), u64::MAX / 100);

        let mut huge = project(1, ProjectStatus::InProgress);
        huge.budget = u64::MAX;
        let mut board = ProjectBoard::with_projects(vec![huge], StdRng::seed_from_u64(0));
        board.open_dispute(1);
        let notice = board.submit_dispute(&form(DisputeFee::PercentOfBudget));
        assert!(notice.is_some());
        assert_eq!(board.get(1).unwrap().status, ProjectStatus::Disputed);
    }
}
