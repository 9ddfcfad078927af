//! The [`Behavior`] strategy trait and the reference [`TrailBehavior`].
//!
//! A behavior decides where an agent moves and how much pheromone it
//! leaves behind. Different agent species are different `Behavior`
//! implementations chosen at configuration time; the world is
//! parameterized over the strategy rather than subclassing per species.
//!
//! Respects the determinism contract: all randomness comes from the
//! world-owned seeded `ChaCha8Rng` passed into [`Behavior::choose`];
//! behaviors hold no RNG state of their own.

use formic_core::Position;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A movement/deposit strategy for agents.
///
/// # Contract
///
/// - `choose()` MUST be deterministic given the candidate slice and the
///   RNG state: same inputs produce the same index.
/// - `&self`: behaviors are stateless, and anything that varies per tick
///   belongs on the grid, not in the strategy.
/// - The returned index MUST be within `candidates`; the world treats a
///   stray index as a behavior failure, not a crash.
///
/// # Object safety
///
/// This trait is object-safe; the world stores its strategy as
/// `Box<dyn Behavior>`.
pub trait Behavior: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Pick the index of the next position among `candidates`, each
    /// paired with its current pheromone reading.
    ///
    /// Returning `None` means the agent stays in place this tick.
    fn choose(&self, candidates: &[(Position, f32)], rng: &mut ChaCha8Rng) -> Option<usize>;

    /// Pheromone amount written (overwrite) at the cell the agent moves to.
    fn deposit(&self, from: Position, to: Position) -> f32;
}

/// The classic stigmergic transition rule.
///
/// Neighbours with higher pheromone are proportionally more likely to be
/// chosen (roulette-wheel selection over `reading^bias`), falling back
/// to a uniform choice when all weights are equal, including the
/// all-zero field of an untouched grid. The deposit is a fixed amount
/// per move; trail strength reflects most-recent visitation because the
/// world overwrites rather than accumulates.
///
/// # Construction
///
/// Use the builder pattern:
///
/// ```
/// use formic_world::TrailBehavior;
///
/// let behavior = TrailBehavior::builder()
///     .deposit_amount(2.0)
///     .bias(1.5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct TrailBehavior {
    deposit_amount: f32,
    bias: f32,
}

/// Builder for [`TrailBehavior`].
///
/// All fields have defaults: deposit amount 1.0, bias 1.0.
pub struct TrailBehaviorBuilder {
    deposit_amount: f32,
    bias: f32,
}

impl TrailBehavior {
    /// Create a new builder for configuring a `TrailBehavior`.
    pub fn builder() -> TrailBehaviorBuilder {
        TrailBehaviorBuilder {
            deposit_amount: 1.0,
            bias: 1.0,
        }
    }
}

impl Default for TrailBehavior {
    fn default() -> Self {
        Self {
            deposit_amount: 1.0,
            bias: 1.0,
        }
    }
}

impl TrailBehaviorBuilder {
    /// Set the pheromone amount written per move (default: 1.0).
    pub fn deposit_amount(mut self, amount: f32) -> Self {
        self.deposit_amount = amount;
        self
    }

    /// Set the selection exponent (default: 1.0).
    ///
    /// Weights are `reading^bias`: values above 1.0 sharpen the
    /// preference for strong trails, values below 1.0 flatten it.
    pub fn bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    /// Build the behavior, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `deposit_amount` is not finite and positive, or
    /// if `bias` is not finite and positive.
    pub fn build(self) -> Result<TrailBehavior, String> {
        if !self.deposit_amount.is_finite() || self.deposit_amount <= 0.0 {
            return Err(format!(
                "deposit_amount must be finite and > 0, got {}",
                self.deposit_amount
            ));
        }
        if !self.bias.is_finite() || self.bias <= 0.0 {
            return Err(format!("bias must be finite and > 0, got {}", self.bias));
        }
        Ok(TrailBehavior {
            deposit_amount: self.deposit_amount,
            bias: self.bias,
        })
    }
}

impl Behavior for TrailBehavior {
    fn name(&self) -> &str {
        "TrailBehavior"
    }

    fn choose(&self, candidates: &[(Position, f32)], rng: &mut ChaCha8Rng) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<f32> = candidates
            .iter()
            .map(|&(_, v)| v.max(0.0).powf(self.bias))
            .collect();

        // Uniform fallback when no weight distinguishes the candidates
        // (covers the all-zero field of an untouched grid).
        let all_equal = weights.iter().all(|&w| w == weights[0]);
        if all_equal {
            return Some(rng.random_range(0..candidates.len()));
        }

        // Roulette wheel over the cumulative weight. Zero-weight
        // candidates never advance the accumulator, so they are only
        // reachable through the positive-weight fallback below.
        let total: f32 = weights.iter().sum();
        let x = rng.random::<f32>() * total;
        let mut acc = 0.0;
        let mut last_positive = 0;
        for (i, &w) in weights.iter().enumerate() {
            if w > 0.0 {
                last_positive = i;
            }
            acc += w;
            if x < acc {
                return Some(i);
            }
        }
        Some(last_positive)
    }

    fn deposit(&self, _from: Position, _to: Position) -> f32 {
        self.deposit_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    // ── Builder validation ──────────────────────────────────────

    #[test]
    fn build_rejects_bad_deposit() {
        assert!(TrailBehavior::builder().deposit_amount(0.0).build().is_err());
        assert!(TrailBehavior::builder()
            .deposit_amount(f32::NAN)
            .build()
            .is_err());
        assert!(TrailBehavior::builder().deposit_amount(-1.0).build().is_err());
    }

    #[test]
    fn build_rejects_bad_bias() {
        assert!(TrailBehavior::builder().bias(0.0).build().is_err());
        assert!(TrailBehavior::builder().bias(f32::INFINITY).build().is_err());
    }

    #[test]
    fn build_defaults_are_valid() {
        let b = TrailBehavior::builder().build().unwrap();
        assert_eq!(b.deposit(p(0, 0), p(0, 1)), 1.0);
    }

    // ── Selection ───────────────────────────────────────────────

    #[test]
    fn empty_candidates_yield_none() {
        let b = TrailBehavior::default();
        assert_eq!(b.choose(&[], &mut rng(1)), None);
    }

    #[test]
    fn single_positive_weight_always_wins() {
        let b = TrailBehavior::default();
        let candidates = [(p(0, 0), 0.0), (p(0, 1), 5.0), (p(0, 2), 0.0)];
        let mut r = rng(7);
        for _ in 0..100 {
            assert_eq!(b.choose(&candidates, &mut r), Some(1));
        }
    }

    #[test]
    fn all_zero_field_uses_uniform_choice() {
        let b = TrailBehavior::default();
        let candidates = [(p(0, 0), 0.0), (p(0, 1), 0.0), (p(0, 2), 0.0)];
        let mut r = rng(11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let idx = b.choose(&candidates, &mut r).unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn choice_is_deterministic_for_fixed_seed() {
        let b = TrailBehavior::default();
        let candidates = [(p(0, 0), 1.0), (p(0, 1), 2.0), (p(0, 2), 3.0)];
        let picks_a: Vec<_> = {
            let mut r = rng(42);
            (0..50).map(|_| b.choose(&candidates, &mut r)).collect()
        };
        let picks_b: Vec<_> = {
            let mut r = rng(42);
            (0..50).map(|_| b.choose(&candidates, &mut r)).collect()
        };
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn strong_trail_dominates_selection() {
        let b = TrailBehavior::default();
        let candidates = [(p(0, 0), 1.0), (p(0, 1), 99.0)];
        let mut r = rng(3);
        let wins = (0..1000)
            .filter(|_| b.choose(&candidates, &mut r) == Some(1))
            .count();
        assert!(wins > 900, "expected ~99% wins for the strong trail, got {wins}");
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn chosen_index_is_always_valid(
            readings in prop::collection::vec(0.0f32..100.0, 1..9),
            seed in 0u64..1000,
        ) {
            let b = TrailBehavior::default();
            let candidates: Vec<(Position, f32)> = readings
                .iter()
                .enumerate()
                .map(|(i, &v)| (p(0, i as i32), v))
                .collect();
            let idx = b.choose(&candidates, &mut rng(seed)).unwrap();
            prop_assert!(idx < candidates.len());
        }

        #[test]
        fn unequal_weights_never_select_zero(
            readings in prop::collection::vec(0.0f32..100.0, 2..9),
            seed in 0u64..1000,
        ) {
            prop_assume!(readings.iter().any(|&v| v != readings[0]));
            let b = TrailBehavior::default();
            let candidates: Vec<(Position, f32)> = readings
                .iter()
                .enumerate()
                .map(|(i, &v)| (p(0, i as i32), v))
                .collect();
            let idx = b.choose(&candidates, &mut rng(seed)).unwrap();
            prop_assert!(
                candidates[idx].1 > 0.0,
                "picked zero-weight candidate {} of {:?}",
                idx,
                readings,
            );
        }
    }
}
