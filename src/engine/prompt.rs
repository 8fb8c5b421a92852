//! Supportive phrases shown when the tracker opens

use rand::seq::IndexedRandom;
use rand::Rng;

/// The built-in phrase pool
pub const SOOTHING_PHRASES: [&str; 8] = [
    "Be gentle with your heart today.",
    "Your body is a garden, seasonal and wise.",
    "Rest is a beautiful form of movement.",
    "Listen to the soft rhythm of your breath.",
    "You are exactly where you need to be.",
    "Choose kindness toward yourself.",
    "Peace is a quiet place inside you.",
    "Honour the natural tides of your body.",
];

/// Pick a phrase uniformly at random. `None` only for an empty pool.
pub fn pick_prompt<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> Option<&'a str> {
    pool.choose(rng).copied()
}
