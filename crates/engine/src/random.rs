//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible match execution.
//! Uses a simple but effective xorshift64* algorithm. Every match gets
//! its own stream derived from the run-level seed, and each player gets
//! an independent per-round sub-stream within the match.

const STREAM_MIX: u64 = 0x517cc1b727220a95;
const ROUND_MIX: u64 = 0x9e3779b97f4a7c15;

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a run seed and a stream index
    pub fn new(seed: u64, stream: u64) -> Self {
        let mut state = seed ^ stream.wrapping_mul(STREAM_MIX);
        // xorshift state must never be zero
        if state == 0 {
            state = STREAM_MIX;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Derive an independent RNG for one sub-stream within a match
    pub fn for_round(&self, index: u64) -> Self {
        let mut state = self.state ^ index.wrapping_mul(ROUND_MIX);
        if state == 0 {
            state = ROUND_MIX;
        }

        let mut rng = Self { state };
        rng.next_u64(); // Mix
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }

    /// Generate a uniform value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits give the full double mantissa
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// True with probability `p`; values outside [0, 1] saturate
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.next_f64() < p
    }
}
