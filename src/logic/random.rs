//! Random ordering and id generation shared by the builders.
//!
//! Everything random goes through a caller-supplied [`Rng`], so a seeded
//! `StdRng` reproduces a whole tournament (ids included).

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut result = items.to_vec();
    result.shuffle(rng);
    result
}

/// A v4 uuid built from the given random source.
pub fn random_id<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}
