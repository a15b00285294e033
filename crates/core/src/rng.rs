//! RNG module - string-seeded deterministic generator and shuffling
//!
//! Boards must be reproducible from a text seed (players share a seed to get
//! the same layout), so the generator folds the seed's UTF-16 code units into a
//! 32-bit state and then runs a 32-bit xorshift-multiply mixer on each draw.
//! All arithmetic wraps at 32 bits, which keeps the stream bit-identical with
//! other implementations of the same mixer.
//!
//! [`SeededRng`] implements [`rand::RngCore`], so everything that takes an
//! injected random source (shuffles, the bot's easy and medium tiers) accepts
//! either a seeded generator or any `rand` generator.

use rand::{Error, Rng, RngCore};

/// Increment added to the state before each draw
const STATE_STEP: u32 = 0x6D2B_79F5;

/// 2^32 as a float, the divisor that maps a `u32` into `[0, 1)`
const U32_SPAN: f64 = 4_294_967_296.0;

/// String-seeded 32-bit generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a text seed
    ///
    /// The same seed always yields the same infinite sequence.
    pub fn new(seed: &str) -> Self {
        Self {
            state: fold_seed(seed),
        }
    }

    /// Create a generator from an already folded state
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next float in `[0, 1)`
    pub fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / U32_SPAN
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STATE_STEP);
        let h = self.state;
        let mut t = (h ^ (h >> 15)).wrapping_mul(1 | h);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Fold a seed into the initial state: `h = 31 * h + unit` per UTF-16 code unit
pub fn fold_seed(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32))
}

/// Draw a float in `[0, 1)` from any generator
///
/// Uses a single `u32` draw, so a [`SeededRng`] gives exactly the value of
/// [`SeededRng::next_unit`].
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / U32_SPAN
}

/// Uniform index in `[0, len)` as `floor(unit * len)`
///
/// `len` must be non-zero.
pub fn index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    ((unit(rng) * len as f64) as usize).min(len - 1)
}

/// Shuffle a slice in place using Fisher-Yates, last index down to 1
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = index(rng, i + 1);
        slice.swap(i, j);
    }
}

/// Shuffled copy of `items`, leaving the input untouched
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

/// Shuffled copy using the thread-local entropy generator
pub fn shuffled_unseeded<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled(items, &mut rand::thread_rng())
}

/// A fresh seed string for callers that did not supply one
pub fn entropy_seed() -> String {
    rand::random::<u64>().to_string()
}
