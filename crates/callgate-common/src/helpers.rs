//! Common helper functions for callgate.

use rand::Rng;

/// Length of generated peer ids.
pub const PEER_ID_LEN: usize = 10;

const PEER_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generates a random peer id of `len` ASCII letters.
pub fn random_peer_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| PEER_ID_ALPHABET[rng.gen_range(0..PEER_ID_ALPHABET.len())] as char)
        .collect()
}
