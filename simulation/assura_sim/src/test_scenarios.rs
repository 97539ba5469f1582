use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::dao::ProposalTally;
use crate::invariants::{
    assert_amount_matches_kind, assert_project_immutable_fields, assert_short_hash,
    assert_transaction_immutable_fields, assert_votes_monotonic,
};
use crate::projects::{DisputeFee, DisputeForm, ProjectBoard};
use crate::wallet::{WalletLedger, SEED_TRANSACTION_COUNT};
use crate::{FormInputs, Project, ProjectStatus, Proposal, ProposalStatus, TxKind};

fn project(id: u64, status: ProjectStatus) -> Project {
    Project {
        id,
        title: format!("Project {id}"),
        budget: 8_000,
        reward: 400,
        status,
        client: "0x...c11e0700".into(),
        worker: "0x...0b0e4e40".into(),
    }
}

#[test]
fn seed_ten_transactions_with_kind_formatting() {
    let mut wallet = WalletLedger::from_seed(2024);
    let today = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();

    assert_eq!(wallet.seed_transactions_on(today), SEED_TRANSACTION_COUNT);
    assert_eq!(wallet.transactions().len(), 10);

    for tx in wallet.transactions() {
        assert_amount_matches_kind(tx);
        assert_short_hash(tx);
        if tx.kind == TxKind::Swap {
            assert!(tx.amount_display.contains("->"));
            assert!(tx.amount_display.contains("USDT"));
            assert!(tx.amount_display.contains("ASRA"));
        }
    }
}

#[test]
fn ledger_entries_survive_later_actions_unchanged() {
    let mut wallet = WalletLedger::from_seed(77);
    let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    wallet.seed_transactions_on(today);
    let original = wallet.transactions().to_vec();

    wallet.open_modal(TxKind::Deposit);
    wallet.record_mock_transaction(&FormInputs::default());
    wallet.close_modal();
    wallet.seed_transactions_on(today);

    assert_eq!(wallet.transactions().len(), original.len());
    for (before, after) in original.iter().zip(wallet.transactions()) {
        assert_transaction_immutable_fields(before, after);
    }
}

#[test]
fn five_votes_never_auto_pass() {
    let proposal = Proposal {
        id: 1,
        title: "Raise staking cap".into(),
        description: "Lift the per-wallet staking cap.".into(),
        votes: 47_000,
        threshold: 50_000,
        status: ProposalStatus::Voting,
    };
    let mut tally = ProposalTally::with_proposals(vec![proposal], StdRng::seed_from_u64(5));

    let mut last = 47_000;
    for _ in 0..5 {
        assert!(tally.vote(1).is_some());
        let now = tally.get(1).unwrap().votes;
        assert_votes_monotonic(last, now);
        assert!(now >= last + 100 && now <= last + 1_000);
        last = now;
    }

    let after = tally.get(1).unwrap();
    assert!((47_500..=52_000).contains(&after.votes));
    assert_eq!(after.status, ProposalStatus::Voting);
}

#[test]
fn dispute_flow_on_project_seven() {
    let mut board = ProjectBoard::with_projects(
        vec![
            project(6, ProjectStatus::InProgress),
            project(7, ProjectStatus::InProgress),
        ],
        StdRng::seed_from_u64(0),
    );
    let original = board.get(7).unwrap().clone();
    let form = DisputeForm {
        reason: "Missed deadline".into(),
        proof_link: "ipfs://proof".into(),
        fee_type: DisputeFee::FixedAsra,
    };

    board.open_dispute(7);
    assert!(board.submit_dispute(&form).is_some());
    assert_eq!(board.get(7).unwrap().status, ProjectStatus::Disputed);
    assert_eq!(board.dispute_project_id(), None);
    assert_project_immutable_fields(&original, board.get(7).unwrap());

    // No open context: nothing changes.
    board.confirm_work(7);
    assert!(board.submit_dispute(&form).is_none());
    assert_eq!(board.get(7).unwrap().status, ProjectStatus::Completed);
    assert_eq!(board.get(6).unwrap().status, ProjectStatus::InProgress);
}

#[test]
fn seeded_board_actions_keep_other_projects_intact() {
    let mut board = ProjectBoard::from_seed(31);
    board.seed_projects();
    let before = board.projects().to_vec();

    board.confirm_work(204);
    board.submit_work(201);
    board.request_revision(202);

    for (old, new) in before.iter().zip(board.projects()) {
        assert_project_immutable_fields(old, new);
        match new.id {
            204 => assert_eq!(new.status, ProjectStatus::Completed),
            _ => assert_eq!(new.status, old.status),
        }
    }
}
