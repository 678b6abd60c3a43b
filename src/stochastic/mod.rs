//! # Stochastic Module
//!
//! Uniform variate source for the failure model.
//!
//! ## Generator
//!
//! WELL512a (Well Equidistributed Long-period Linear), 512 bits of state
//! held as 16 × 32-bit words with a rotating index:
//!
//! ```text
//! z0 = V[i-1]
//! z1 = M0(-16, V[i]) ^ M0(-15, V[i+M1])
//! z2 = M0(+11, V[i+M2])
//! V[i]   = z1 ^ z2
//! V[i-1] = M0(-2, z0) ^ M0(-18, z1) ^ M3(-28, z2) ^ M4(-5, b, V[i])
//! i      = i - 1 (mod 16)
//! ```
//!
//! Period 2^512 - 1. All arithmetic is on `u32` so streams are bit-identical
//! across platforms.
//!
//! ## Streams
//!
//! Each replication (scenario id) gets its own generator. The id is expanded
//! into the 512-bit state with SplitMix64, so neighbouring ids give
//! unrelated streams.
//!
//! ## References
//!
//! [1] Panneton, L'Ecuyer, Matsumoto, "Improved Long-Period Generators Based
//!     on Linear Recurrences Modulo 2", ACM TOMS 32(1), 2006
//! [2] Steele, Lea, Flood, "Fast Splittable Pseudorandom Number Generators",
//!     OOPSLA 2014

use rand::{Error as RandError, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ReliabilityError, Result};

/// WELL family parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellParams {
    /// Word size (bits)
    pub word_size: u32,
    /// Number of state words
    pub state_words: usize,
    /// Taps (P, M1, M2, M3)
    pub taps: (usize, usize, usize, usize),
}

impl Default for WellParams {
    fn default() -> Self {
        Self {
            word_size: WELL_WORD_BITS,
            state_words: WELL_STATE_WORDS,
            taps: WELL_DEFAULT_TAPS,
        }
    }
}

impl WellParams {
    fn validate(&self) -> Result<()> {
        if self.word_size != WELL_WORD_BITS {
            return Err(ReliabilityError::UnsupportedGenerator {
                reason: format!("word size {} (only 32 supported)", self.word_size),
            });
        }
        if self.state_words != WELL_STATE_WORDS {
            return Err(ReliabilityError::UnsupportedGenerator {
                reason: format!("{} state words (only 16 supported)", self.state_words),
            });
        }
        let (p, m1, m2, m3) = self.taps;
        if p != 0 {
            return Err(ReliabilityError::UnsupportedGenerator {
                reason: format!("P = {p} (full-word recurrence requires 0)"),
            });
        }
        for m in [m1, m2, m3] {
            if m == 0 || m >= WELL_STATE_WORDS {
                return Err(ReliabilityError::UnsupportedGenerator {
                    reason: format!("tap {m} outside 1..{WELL_STATE_WORDS}"),
                });
            }
        }
        Ok(())
    }
}

/// WELL512a pseudo-random generator
///
/// Sole randomness source of the model. Produces `f64` in [0, 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Well512 {
    scenario: u32,
    params: WellParams,
    state: [u32; WELL_STATE_WORDS],
    index: usize,
}

#[inline]
fn mat0_pos(t: u32, v: u32) -> u32 {
    v ^ (v >> t)
}

#[inline]
fn mat0_neg(t: u32, v: u32) -> u32 {
    v ^ (v << t)
}

#[inline]
fn mat3_neg(t: u32, v: u32) -> u32 {
    v << t
}

#[inline]
fn mat4_neg(t: u32, b: u32, v: u32) -> u32 {
    v ^ ((v << t) & b)
}

impl Well512 {
    /// Create a generator for a scenario with the default WELL512a taps
    pub fn new(scenario: u32) -> Self {
        Self {
            scenario,
            params: WellParams::default(),
            state: Self::scenario_state(scenario),
            index: 0,
        }
    }

    /// Create a generator with explicit WELL parameters
    pub fn with_params(scenario: u32, params: WellParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            scenario,
            params,
            state: Self::scenario_state(scenario),
            index: 0,
        })
    }

    /// Expand a scenario id into 512 bits of state (SplitMix64)
    fn scenario_state(scenario: u32) -> [u32; WELL_STATE_WORDS] {
        let mut s = scenario as u64;
        let mut state = [0u32; WELL_STATE_WORDS];
        for pair in state.chunks_exact_mut(2) {
            s = s.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = s;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^= z >> 31;
            pair[0] = z as u32;
            pair[1] = (z >> 32) as u32;
        }
        state
    }

    /// Scenario id this stream was seeded from (0 for generators built
    /// from raw bytes through `SeedableRng::from_seed`)
    pub fn scenario(&self) -> u32 {
        self.scenario
    }

    /// Parameters in use
    pub fn params(&self) -> WellParams {
        self.params
    }

    /// Advance the recurrence and return the new word
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        let (_, m1, m2, _) = self.params.taps;
        let i = self.index;
        let last = (i + WELL_INDEX_MASK) & WELL_INDEX_MASK;

        let z0 = self.state[last];
        let z1 = mat0_neg(16, self.state[i]) ^ mat0_neg(15, self.state[(i + m1) & WELL_INDEX_MASK]);
        let z2 = mat0_pos(11, self.state[(i + m2) & WELL_INDEX_MASK]);

        let new_v1 = z1 ^ z2;
        self.state[i] = new_v1;
        self.state[last] = mat0_neg(2, z0)
            ^ mat0_neg(18, z1)
            ^ mat3_neg(28, z2)
            ^ mat4_neg(5, WELL_TEMPER_MASK, new_v1);

        self.index = last;
        self.state[self.index]
    }

    /// Generate uniform [0, 1)
    #[inline]
    pub fn next_variate(&mut self) -> f64 {
        self.next_word() as f64 * WELL_FACT
    }
}

impl RngCore for Well512 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_word() as u64;
        let lo = self.next_word() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// 64-byte seed wrapper (`SeedableRng` needs `Default + AsMut<[u8]>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellSeed(pub [u8; 4 * WELL_STATE_WORDS]);

impl Default for WellSeed {
    fn default() -> Self {
        Self([0u8; 4 * WELL_STATE_WORDS])
    }
}

impl AsMut<[u8]> for WellSeed {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl SeedableRng for Well512 {
    type Seed = WellSeed;

    /// Raw state seeding. An all-zero seed is a fixed point of the
    /// recurrence and falls back to scenario 0.
    ///
    /// The resulting generator has no scenario id: [`Well512::scenario`]
    /// reports 0, which does not mean the stream equals `Well512::new(0)`.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u32; WELL_STATE_WORDS];
        for (word, bytes) in state.iter_mut().zip(seed.0.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        if state.iter().all(|&w| w == 0) {
            return Self::new(0);
        }
        Self {
            scenario: 0,
            params: WellParams::default(),
            state,
            index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chi_square(samples: &[f64], bins: usize) -> f64 {
        let mut counts = vec![0usize; bins];
        for &x in samples {
            counts[(x * bins as f64) as usize] += 1;
        }
        let expected = samples.len() as f64 / bins as f64;
        counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum()
    }

    #[test]
    fn test_known_answer_scenario_42() {
        let mut rng = Well512::new(42);
        let words: Vec<u32> = (0..5).map(|_| rng.next_word()).collect();
        assert_eq!(
            words,
            vec![1353942151, 1606557378, 3975884847, 554032833, 3391249161]
        );
    }

    #[test]
    fn test_known_answer_scenario_0() {
        let mut rng = Well512::new(0);
        assert_eq!(rng.next_word(), 2934872201);
        assert_eq!(rng.next_word(), 1598712697);
        let mut rng = Well512::new(0);
        assert!((rng.next_variate() - 0.683328183600679).abs() < 1e-15);
    }

    #[test]
    fn test_rng_uniform() {
        let mut rng = Well512::new(12345);
        let samples: Vec<f64> = (0..100_000).map(|_| rng.next_variate()).collect();

        assert!(samples.iter().all(|&x| (0.0..1.0).contains(&x)));

        let mean: f64 = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 0.5).abs() < 0.01, "Mean {} should be ~0.5", mean);

        // 9 degrees of freedom, p = 0.999 critical value is 27.9
        let chi2 = chi_square(&samples, 10);
        assert!(chi2 < 40.0, "Chi-square {} too large", chi2);
    }

    #[test]
    fn test_same_scenario_same_stream() {
        let mut a = Well512::new(7);
        let mut b = Well512::new(7);
        for _ in 0..10_000 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_different_scenarios_independent() {
        let n = 100_000;
        let mut a = Well512::new(1);
        let mut b = Well512::new(2);
        let x: Vec<f64> = (0..n).map(|_| a.next_variate()).collect();
        let y: Vec<f64> = (0..n).map(|_| b.next_variate()).collect();

        let mx = x.iter().sum::<f64>() / n as f64;
        let my = y.iter().sum::<f64>() / n as f64;
        let cov: f64 = x.iter().zip(&y).map(|(p, q)| (p - mx) * (q - my)).sum();
        let vx: f64 = x.iter().map(|p| (p - mx).powi(2)).sum();
        let vy: f64 = y.iter().map(|q| (q - my).powi(2)).sum();
        let r = cov / (vx * vy).sqrt();
        assert!(r.abs() < 0.02, "Correlation {} between streams", r);
    }

    #[test]
    fn test_rng_core_u64_is_two_words() {
        let mut a = Well512::new(42);
        let mut b = Well512::new(42);
        let hi = b.next_word() as u64;
        let lo = b.next_word() as u64;
        assert_eq!(a.next_u64(), (hi << 32) | lo);
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut a = Well512::new(3);
        let mut b = Well512::new(3);
        let mut buf = [0u8; 6];
        a.fill_bytes(&mut buf);
        let w0 = b.next_word().to_le_bytes();
        let w1 = b.next_word().to_le_bytes();
        assert_eq!(&buf[..4], &w0);
        assert_eq!(&buf[4..], &w1[..2]);
    }

    #[test]
    fn test_params_validation() {
        assert!(Well512::with_params(1, WellParams::default()).is_ok());

        let wide = WellParams { word_size: 64, ..Default::default() };
        assert!(matches!(
            Well512::with_params(1, wide),
            Err(ReliabilityError::UnsupportedGenerator { .. })
        ));

        let bad_tap = WellParams { taps: (0, 16, 9, 5), ..Default::default() };
        assert!(Well512::with_params(1, bad_tap).is_err());

        let partial = WellParams { taps: (3, 13, 9, 5), ..Default::default() };
        assert!(Well512::with_params(1, partial).is_err());
    }

    #[test]
    fn test_taps_change_stream() {
        let mut a = Well512::new(9);
        let alt = WellParams { taps: (0, 11, 7, 5), ..Default::default() };
        let mut b = Well512::with_params(9, alt).unwrap();
        let same = (0..32).filter(|_| a.next_word() == b.next_word()).count();
        assert!(same < 32);
    }

    #[test]
    fn test_zero_seed_falls_back() {
        let mut zero = Well512::from_seed(WellSeed::default());
        let mut s0 = Well512::new(0);
        assert_eq!(zero.next_word(), s0.next_word());
    }

    #[test]
    fn test_byte_seed_reports_no_scenario() {
        let mut seed = WellSeed::default();
        seed.0[0] = 1;
        let mut raw = Well512::from_seed(seed);
        let mut s0 = Well512::new(0);
        assert_eq!(raw.scenario(), 0);
        assert_ne!(raw.next_word(), s0.next_word());
    }
}
