#![allow(dead_code)]

use crate::entropy::SHORT_HASH_HEX_LEN;
use crate::types::{Project, ProjectStatus, Transaction, TxKind};

/// Transaction ids run `1..=n` in ledger order.
pub fn assert_sequential_transaction_ids(transactions: &[Transaction]) {
    for (i, tx) in transactions.iter().enumerate() {
        assert_eq!(
            tx.id,
            (i + 1).to_string(),
            "ledger ids out of sequence at position {}",
            i
        );
    }
}

/// `amount_display` follows the formatting rule of the transaction's kind.
pub fn assert_amount_matches_kind(tx: &Transaction) {
    let amount = tx.amount_display.as_str();
    match tx.kind {
        TxKind::Swap => {
            assert!(
                amount.contains(" -> ") && amount.contains("USDT") && amount.contains("ASRA"),
                "swap {} has malformed amount {:?}",
                tx.id,
                amount
            );
        }
        TxKind::Stake | TxKind::Unstake => {
            assert!(
                amount.ends_with(" ASRA") && !amount.contains("USDT"),
                "{:?} {} has malformed amount {:?}",
                tx.kind,
                tx.id,
                amount
            );
        }
        TxKind::Deposit | TxKind::Withdraw => {
            assert!(
                amount.starts_with('$') && amount[1..].parse::<f64>().is_ok(),
                "{:?} {} has malformed amount {:?}",
                tx.kind,
                tx.id,
                amount
            );
        }
    }
}

/// Ledger hashes are `0x` + 12 hex digits + `...`.
pub fn assert_short_hash(tx: &Transaction) {
    let digits = tx
        .hash
        .strip_prefix("0x")
        .and_then(|h| h.strip_suffix("..."))
        .unwrap_or_else(|| panic!("hash {:?} lacks 0x/... framing", tx.hash));
    assert_eq!(digits.len(), SHORT_HASH_HEX_LEN);
    assert!(digits.chars().all(|c| c.is_ascii_hexdigit()));
}

/// `id` and `kind` never change after creation.
pub fn assert_transaction_immutable_fields(original: &Transaction, current: &Transaction) {
    assert_eq!(original.id, current.id, "transaction id changed");
    assert_eq!(original.kind, current.kind, "transaction kind changed");
    assert_eq!(original.hash, current.hash, "transaction hash changed");
}

/// Lifecycle actions only move projects into an outcome state.
pub fn assert_valid_status_transition(from: ProjectStatus, to: ProjectStatus) {
    assert!(
        from.can_transition_to(to),
        "invalid project status transition from {:?} to {:?}",
        from,
        to
    );
}

/// Project fields other than `status` stay fixed.
pub fn assert_project_immutable_fields(original: &Project, current: &Project) {
    assert_eq!(original.id, current.id, "project id changed");
    assert_eq!(original.title, current.title, "project title changed");
    assert_eq!(original.budget, current.budget, "project budget changed");
    assert_eq!(original.reward, current.reward, "project reward changed");
    assert_eq!(original.client, current.client, "project client changed");
    assert_eq!(original.worker, current.worker, "project worker changed");
}

/// Vote tallies never decrease.
pub fn assert_votes_monotonic(before: u64, after: u64) {
    assert!(
        after >= before,
        "votes decreased from {} to {}",
        before,
        after
    );
}
