//! Deterministic digests of field snapshots.
//!
//! FNV-1a over the bit patterns of every stored value. Not
//! cryptographic: two runs that produce equal digests produced
//! bit-identical snapshots with overwhelming likelihood, which is all
//! determinism checks need.

use crate::snapshot::FieldSnapshot;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fold_u64(mut hash: u64, v: u64) -> u64 {
    for b in v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

#[inline]
fn fold_f64(hash: u64, v: f64) -> u64 {
    fold_u64(hash, v.to_bits())
}

/// Digest a snapshot's timestamp, shape, and all three grids.
///
/// Grids are folded in the order field, divergence, curl, each preceded
/// by its tag so that moving values between grids changes the digest.
pub fn snapshot_digest(snapshot: &FieldSnapshot) -> u64 {
    let (nx, ny) = snapshot.shape();
    let mut hash = FNV_OFFSET;
    hash = fold_f64(hash, snapshot.timestamp());
    hash = fold_u64(hash, nx as u64);
    hash = fold_u64(hash, ny as u64);

    hash = fold_u64(hash, 0);
    for f in snapshot.field_grid() {
        hash = fold_f64(hash, f.x);
        hash = fold_f64(hash, f.y);
    }
    hash = fold_u64(hash, 1);
    for &d in snapshot.divergence_grid() {
        hash = fold_f64(hash, d);
    }
    hash = fold_u64(hash, 2);
    for c in snapshot.curl_grid() {
        hash = fold_f64(hash, c.x);
        hash = fold_f64(hash, c.y);
        hash = fold_f64(hash, c.z);
    }
    hash
}
