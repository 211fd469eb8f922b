//! Fixed-point ranks and the fractional-indexing allocator.
//!
//! Items inside a day are ordered by a [`Rank`], a decimal with ten
//! fractional digits stored as a signed count of `1e-10` units. Inserting an
//! item between two neighbours only requires a rank strictly between theirs,
//! so a drag-and-drop reorder rewrites exactly one row.
//!
//! Repeated bisection of the same gap eventually reaches the precision floor.
//! [`RankAllocator::needs_rebalance`] reports when a sequence is getting close
//! to it and [`RankAllocator::rebalanced_ranks`] produces a fresh, evenly
//! spaced sequence. The allocator itself never rewrites existing ranks.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::rank::{Rank, RankAllocator};
//!
//! let allocator = RankAllocator::default();
//! let one: Rank = "1.0".parse()?;
//! let three: Rank = "3.0".parse()?;
//!
//! assert_eq!(allocator.rank_for_position(&[one, three], 1).to_string(), "2.0");
//! assert_eq!(allocator.rank_between(None, Some(one)).to_string(), "0.5");
//! # Ok::<(), waypoint_core::PlannerError>(())
//! ```

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PlannerError, Result};

/// Position of an item within its day, as a fixed-point decimal.
///
/// Ranks are only comparable within the same day. They never round-trip
/// through floating point: the text form is an exact decimal string and the
/// database column holds the raw unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rank(i64);

impl Rank {
    /// Number of fractional digits a rank can hold.
    pub const SCALE: u32 = 10;

    /// Units in one whole rank step (`10^SCALE`).
    pub const UNITS_PER_WHOLE: i64 = 10_000_000_000;

    pub const ZERO: Rank = Rank(0);
    pub const ONE: Rank = Rank(Self::UNITS_PER_WHOLE);
    pub const MAX: Rank = Rank(i64::MAX);

    /// Creates a rank from a raw count of `1e-10` units.
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Raw count of `1e-10` units, as persisted.
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Creates a whole-number rank, saturating at the representable range.
    pub fn from_integer(value: i64) -> Self {
        Self(value.saturating_mul(Self::UNITS_PER_WHOLE))
    }

    fn saturating_from_wide(units: i128) -> Self {
        Self(units.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_whole = Self::UNITS_PER_WHOLE.unsigned_abs();
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / per_whole;
        let fraction = magnitude % per_whole;

        let digits = format!("{:0width$}", fraction, width = Self::SCALE as usize);
        let trimmed = digits.trim_end_matches('0');
        let fraction_str = if trimmed.is_empty() { "0" } else { trimmed };

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{whole}.{fraction_str}")
    }
}

impl FromStr for Rank {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| PlannerError::InvalidRank {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole_str, fraction_str) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole_str.is_empty() && fraction_str.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole_str.bytes().chain(fraction_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected only digits and a single decimal point"));
        }
        if fraction_str.len() > Self::SCALE as usize {
            return Err(invalid("more than 10 fractional digits"));
        }

        let whole: i128 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| invalid("integer part out of range"))?
        };
        let fraction: i128 = if fraction_str.is_empty() {
            0
        } else {
            let padding = Self::SCALE - fraction_str.len() as u32;
            fraction_str.parse::<i128>().map_err(|_| invalid("bad fraction"))? * 10i128.pow(padding)
        };

        let magnitude = whole
            .checked_mul(Self::UNITS_PER_WHOLE as i128)
            .and_then(|w| w.checked_add(fraction))
            .ok_or_else(|| invalid("out of range"))?;
        let units = if negative { -magnitude } else { magnitude };

        i64::try_from(units)
            .map(Rank)
            .map_err(|_| invalid("out of range"))
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Tuning knobs for rank allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankConfig {
    /// Fractional digits new ranks are rounded to (at most [`Rank::SCALE`]).
    pub precision: u32,
    /// Adjacent gaps smaller than this trigger [`RankAllocator::needs_rebalance`].
    pub rebalance_threshold: Rank,
    /// Rank given to the first item of an empty day.
    pub base: Rank,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            precision: Rank::SCALE,
            // 0.000001
            rebalance_threshold: Rank::from_units(10_000),
            base: Rank::ONE,
        }
    }
}

impl RankConfig {
    /// Smallest rank increment representable at the configured precision.
    pub fn step(&self) -> Rank {
        Rank::from_units(10i64.pow(Rank::SCALE - self.precision.min(Rank::SCALE)))
    }

    /// Checks that precision and threshold are consistent with each other.
    ///
    /// A positive threshold finer than one precision step would never fire
    /// before bisection hits the precision floor.
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 {
            return Err(PlannerError::Configuration {
                message: "rank precision must allow at least one fractional digit".to_string(),
            });
        }
        if self.precision > Rank::SCALE {
            return Err(PlannerError::Configuration {
                message: format!(
                    "rank precision {} exceeds the storage scale of {} digits",
                    self.precision,
                    Rank::SCALE
                ),
            });
        }
        if self.rebalance_threshold < Rank::ZERO {
            return Err(PlannerError::Configuration {
                message: "rebalance threshold must not be negative".to_string(),
            });
        }
        if self.rebalance_threshold > Rank::ZERO && self.rebalance_threshold <= self.step() {
            return Err(PlannerError::Configuration {
                message: format!(
                    "rebalance threshold {} must be coarser than the precision step {}",
                    self.rebalance_threshold,
                    self.step()
                ),
            });
        }
        if self.base <= Rank::ZERO {
            return Err(PlannerError::Configuration {
                message: "base rank must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Computes ranks for insertion points and detects degraded sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankAllocator {
    config: RankConfig,
}

impl RankAllocator {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Returns a rank between `prev` and `next`.
    ///
    /// - both absent: the configured base rank
    /// - `prev` absent: `next / 2`
    /// - `next` absent: `prev + 1`
    /// - both present: the midpoint
    ///
    /// The result is rounded half-up to the configured precision. It lies
    /// strictly between the bounds unless their gap is already at the
    /// precision floor.
    pub fn rank_between(&self, prev: Option<Rank>, next: Option<Rank>) -> Rank {
        let (numerator, denominator) = match (prev, next) {
            (None, None) => (self.config.base.units() as i128, 1),
            (None, Some(next)) => (next.units() as i128, 2),
            (Some(prev), None) => (prev.units() as i128 + Rank::UNITS_PER_WHOLE as i128, 1),
            (Some(prev), Some(next)) => (prev.units() as i128 + next.units() as i128, 2),
        };
        self.quantize(numerator, denominator)
    }

    /// Neighbouring ranks around a 0-based insertion `position`.
    ///
    /// The position is clamped into `[0, len]`.
    pub fn bounds_for_position(
        &self,
        ordered_ranks: &[Rank],
        position: i64,
    ) -> (Option<Rank>, Option<Rank>) {
        let len = ordered_ranks.len();
        if position <= 0 {
            return (None, ordered_ranks.first().copied());
        }
        if position as u64 >= len as u64 {
            return (ordered_ranks.last().copied(), None);
        }
        let index = position as usize;
        (Some(ordered_ranks[index - 1]), Some(ordered_ranks[index]))
    }

    /// Rank for inserting at 0-based `position` among `ordered_ranks`.
    pub fn rank_for_position(&self, ordered_ranks: &[Rank], position: i64) -> Rank {
        let (prev, next) = self.bounds_for_position(ordered_ranks, position);
        self.rank_between(prev, next)
    }

    /// True when any adjacent gap is smaller than the rebalance threshold.
    pub fn needs_rebalance(&self, ordered_ranks: &[Rank]) -> bool {
        let threshold = self.config.rebalance_threshold.units() as i128;
        ordered_ranks
            .windows(2)
            .any(|pair| (pair[1].units() as i128 - pair[0].units() as i128) < threshold)
    }

    /// Evenly spaced whole ranks `1..=count`.
    pub fn rebalanced_ranks(&self, count: usize) -> Vec<Rank> {
        (1..=count as i64).map(Rank::from_integer).collect()
    }

    /// Rounds `numerator / denominator` units to the precision step, ties away
    /// from zero.
    fn quantize(&self, numerator: i128, denominator: i128) -> Rank {
        let divisor = denominator * self.config.step().units() as i128;
        let quotient = numerator / divisor;
        let remainder = numerator % divisor;
        let rounded = if 2 * remainder.abs() >= divisor {
            quotient + numerator.signum()
        } else {
            quotient
        };
        Rank::saturating_from_wide(rounded * self.config.step().units() as i128)
    }
}

/// Whether `rank` lies strictly inside the (possibly open) interval.
pub fn is_strictly_between(prev: Option<Rank>, rank: Rank, next: Option<Rank>) -> bool {
    prev.map_or(true, |p| p < rank) && next.map_or(true, |n| rank < n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(s: &str) -> Rank {
        s.parse().expect("valid rank literal")
    }

    #[test]
    fn test_rank_between_reference_cases() {
        let allocator = RankAllocator::default();
        assert_eq!(allocator.rank_between(None, None), r("1.0"));
        assert_eq!(allocator.rank_between(None, Some(r("1.0"))), r("0.5"));
        assert_eq!(allocator.rank_between(Some(r("1.0")), Some(r("2.0"))), r("1.5"));
        assert_eq!(allocator.rank_between(Some(r("5.0")), None), r("6.0"));
    }

    #[test]
    fn test_rank_between_is_strictly_inside() {
        let allocator = RankAllocator::default();
        let pairs = [
            ("0.0000000001", "0.0000000003"),
            ("1.0", "1.0000000004"),
            ("2.5", "1000.0"),
            ("0.3333333333", "0.3333333335"),
        ];
        for (lo, hi) in pairs {
            let mid = allocator.rank_between(Some(r(lo)), Some(r(hi)));
            assert!(r(lo) < mid && mid < r(hi), "{lo} < {mid} < {hi}");
        }
    }

    #[test]
    fn test_rank_between_rounds_half_up() {
        let allocator = RankAllocator::default();
        // midpoint is 1.00000000005, which rounds up to the upper bound
        let mid = allocator.rank_between(Some(r("1.0")), Some(r("1.0000000001")));
        assert_eq!(mid, r("1.0000000001"));
        assert!(!is_strictly_between(
            Some(r("1.0")),
            mid,
            Some(r("1.0000000001"))
        ));
    }

    #[test]
    fn test_rank_between_respects_coarser_precision() {
        let allocator = RankAllocator::new(RankConfig {
            precision: 2,
            rebalance_threshold: r("0.05"),
            base: Rank::ONE,
        });
        assert_eq!(allocator.rank_between(Some(r("1.0")), Some(r("1.05"))), r("1.03"));
        assert_eq!(allocator.rank_between(None, Some(r("0.01"))), r("0.01"));
    }

    #[test]
    fn test_rank_for_position() {
        let allocator = RankAllocator::default();
        assert_eq!(allocator.rank_for_position(&[], 0), r("1.0"));
        assert_eq!(allocator.rank_for_position(&[], 7), r("1.0"));
        assert_eq!(allocator.rank_for_position(&[], -3), r("1.0"));

        let ranks = [r("1.0"), r("3.0")];
        assert_eq!(allocator.rank_for_position(&ranks, 1), r("2.0"));
        assert_eq!(allocator.rank_for_position(&ranks, 0), r("0.5"));
        assert_eq!(allocator.rank_for_position(&ranks, -5), r("0.5"));
        assert_eq!(allocator.rank_for_position(&ranks, 2), r("4.0"));
        assert_eq!(allocator.rank_for_position(&ranks, 99), r("4.0"));
    }

    #[test]
    fn test_needs_rebalance() {
        let allocator = RankAllocator::default();
        assert!(allocator.needs_rebalance(&[r("1.0"), r("1.0000000001"), r("3.0")]));
        assert!(!allocator.needs_rebalance(&[r("1.0"), r("1.5"), r("3.0")]));
        assert!(!allocator.needs_rebalance(&[]));
        assert!(!allocator.needs_rebalance(&[r("1.0")]));
        // exactly the threshold is not below it
        assert!(!allocator.needs_rebalance(&[r("1.0"), r("1.000001")]));
    }

    #[test]
    fn test_rebalanced_ranks() {
        let allocator = RankAllocator::default();
        assert_eq!(
            allocator.rebalanced_ranks(5),
            vec![r("1.0"), r("2.0"), r("3.0"), r("4.0"), r("5.0")]
        );
        assert!(allocator.rebalanced_ranks(0).is_empty());
    }

    #[test]
    fn test_rebalance_warning_precedes_precision_floor() {
        let allocator = RankAllocator::default();
        let lower = r("1.0");
        let mut upper = r("2.0");
        let mut warned = false;

        loop {
            let mid = allocator.rank_between(Some(lower), Some(upper));
            if !is_strictly_between(Some(lower), mid, Some(upper)) {
                break;
            }
            if allocator.needs_rebalance(&[lower, mid, upper]) {
                warned = true;
            }
            upper = mid;
        }

        assert!(warned, "needs_rebalance must fire before the floor");
    }

    #[test]
    fn test_append_saturates_at_max() {
        let allocator = RankAllocator::default();
        let top = allocator.rank_between(Some(Rank::MAX), None);
        assert!(top <= Rank::MAX);
        assert!(!is_strictly_between(Some(Rank::MAX), top, None));
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::ONE.to_string(), "1.0");
        assert_eq!(Rank::from_units(15_000_000_000).to_string(), "1.5");
        assert_eq!(Rank::from_units(1).to_string(), "0.0000000001");
        assert_eq!(Rank::from_units(-5_000_000_000).to_string(), "-0.5");
        assert_eq!(Rank::ZERO.to_string(), "0.0");
    }

    #[test]
    fn test_rank_parse() {
        assert_eq!(r("2"), Rank::from_integer(2));
        assert_eq!(r(".5"), Rank::from_units(5_000_000_000));
        assert_eq!(r("+1.25"), Rank::from_units(12_500_000_000));
        assert_eq!(r("-3.0"), Rank::from_integer(-3));
        assert!("1.00000000001".parse::<Rank>().is_err());
        assert!("abc".parse::<Rank>().is_err());
        assert!(".".parse::<Rank>().is_err());
        assert!("1.2.3".parse::<Rank>().is_err());
        assert!("99999999999999".parse::<Rank>().is_err());
    }

    #[test]
    fn test_rank_serde_uses_exact_text() {
        let json = serde_json::to_string(&r("1.0000000001")).expect("serialize");
        assert_eq!(json, "\"1.0000000001\"");
        let back: Rank = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, r("1.0000000001"));
    }

    #[test]
    fn test_config_validation() {
        assert!(RankConfig::default().validate().is_ok());

        let too_precise = RankConfig {
            precision: 12,
            ..RankConfig::default()
        };
        assert!(too_precise.validate().is_err());

        let whole_numbers_only = RankConfig {
            precision: 0,
            ..RankConfig::default()
        };
        assert!(whole_numbers_only.validate().is_err());

        let threshold_below_step = RankConfig {
            precision: 4,
            rebalance_threshold: r("0.00001"),
            base: Rank::ONE,
        };
        assert!(threshold_below_step.validate().is_err());

        let disabled = RankConfig {
            rebalance_threshold: Rank::ZERO,
            ..RankConfig::default()
        };
        assert!(disabled.validate().is_ok());
    }
}
