//! Session identifier generation.

use rand::Rng;

/// Length of a generated token, in characters.
pub const TOKEN_LEN: usize = 32;

/// Generates a random 32-character hex string (128 bits of entropy).
///
/// 128 bits is enough that guessing a live token is computationally
/// infeasible, and that two tokens minted in the same process colliding
/// is vanishingly unlikely. The store still checks for collisions with
/// live tokens before handing one out.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    // 16 random bytes, each formatted as two lowercase hex digits.
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
