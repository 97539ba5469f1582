//! Random identifiers and per-slice generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hex digits kept in a truncated ledger hash.
pub const SHORT_HASH_HEX_LEN: usize = 12;

/// `0x` followed by 64 hex digits.
pub fn full_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 32] = rng.gen();
    format!("0x{}", hex::encode(bytes))
}

/// `0x` followed by 12 hex digits and an ellipsis, as shown in ledgers.
pub fn short_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; SHORT_HASH_HEX_LEN / 2] = rng.gen();
    format!("0x{}...", hex::encode(bytes))
}

/// Abbreviated account address, e.g. `0x...a1b2c3d4`.
pub fn short_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 4] = rng.gen();
    format!("0x...{}", hex::encode(bytes))
}

/// Build the generator for one slice.
///
/// With a session seed every slice gets its own reproducible stream
/// (`salt` keeps the streams apart); without one, OS entropy is used.
pub fn slice_rng(seed: Option<u64>, salt: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    #[test]
    fn hash_shapes() {
        let mut rng = StdRng::seed_from_u64(1);

        let full = full_hash(&mut rng);
        assert_eq!(full.len(), 66);
        assert!(full.starts_with("0x"));
        assert!(is_lower_hex(&full[2..]));

        let short = short_hash(&mut rng);
        assert_eq!(short.len(), 2 + SHORT_HASH_HEX_LEN + 3);
        assert!(short.ends_with("..."));
        assert!(is_lower_hex(&short[2..2 + SHORT_HASH_HEX_LEN]));

        let addr = short_address(&mut rng);
        assert!(addr.starts_with("0x..."));
        assert_eq!(addr.len(), 5 + 8);
    }

    #[test]
    fn seeded_slices_are_reproducible_and_distinct() {
        let a1: u64 = slice_rng(Some(7), 1).gen();
        let a2: u64 = slice_rng(Some(7), 1).gen();
        let b: u64 = slice_rng(Some(7), 2).gen();
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
    }
}
