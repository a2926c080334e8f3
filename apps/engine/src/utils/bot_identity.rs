//! Bot identity generation.
//!
//! Produces unique `{id, name, avatar}` tuples for filler seats. The
//! engine only requires uniqueness; the `is_bot` marking happens when
//! the identity is seated.

use uuid::Uuid;

use crate::domain::state::PlayerIdentity;

const BOT_NAMES: [&str; 8] = [
    "Ada", "Blaise", "Curie", "Dijkstra", "Euler", "Fermat", "Grace", "Hopper",
];

/// Generate `n` unique bot identities, numbered past the seats already
/// taken so names stay distinct within one game.
pub fn generate_bots(n: usize, already_seated: usize) -> Vec<PlayerIdentity> {
    (0..n)
        .map(|i| {
            let seat = already_seated + i;
            let id = Uuid::new_v4().to_string();
            PlayerIdentity {
                name: format!("{} (bot)", BOT_NAMES[seat % BOT_NAMES.len()]),
                username: format!("bot-{}", &id[..8]),
                avatar: format!("bot-{}", seat % BOT_NAMES.len()),
                id,
            }
        })
        .collect()
}
