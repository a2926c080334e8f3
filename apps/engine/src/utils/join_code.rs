//! Join code generation for games.
//!
//! Join codes are 6-character strings using Crockford's Base32
//! alphabet, short enough to type from another screen.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const CODE_LEN: usize = 6;

/// Generate a join code for a game. Uniqueness is enforced at the
/// lookup-key level, not here.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    let mut s = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        s.push(CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char);
    }
    s
}
