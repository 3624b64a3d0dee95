//! Fee schedule model and tier resolution.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A bracket of INR transfer amount mapped to a percentage fee rate.
///
/// Bounds are inclusive. The top tier of a schedule carries no `max` and
/// covers everything above the tier below it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FeeTier {
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    pub rate: f64,
}

/// A named list of fee tiers covering `(0, ∞)`.
///
/// A schedule with a single unbounded tier denotes a flat rate.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeeSchedule {
    pub name: String,
    pub tiers: Vec<FeeTier>,
}

impl FeeSchedule {
    /// Checks that the tiers form an ordered, non-overlapping partition
    /// with an open-ended top tier.
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            bail!("Fee schedule '{}' has no tiers", self.name);
        }

        let first = &self.tiers[0];
        if first.min != 0.0 {
            bail!(
                "Fee schedule '{}' must start at 0, found {}",
                self.name,
                first.min
            );
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if !tier.rate.is_finite() || tier.rate < 0.0 || tier.rate >= 1.0 {
                bail!(
                    "Fee schedule '{}' tier {} has rate {} outside [0, 1)",
                    self.name,
                    i,
                    tier.rate
                );
            }

            let last = i == self.tiers.len() - 1;
            match tier.max {
                None if !last => {
                    bail!(
                        "Fee schedule '{}' tier {} is unbounded but not the last tier",
                        self.name,
                        i
                    );
                }
                Some(max) if last => {
                    bail!(
                        "Fee schedule '{}' top tier must be open-ended, found max {}",
                        self.name,
                        max
                    );
                }
                Some(max) if max < tier.min => {
                    bail!(
                        "Fee schedule '{}' tier {} has max {} below min {}",
                        self.name,
                        i,
                        max,
                        tier.min
                    );
                }
                _ => {}
            }

            if i > 0 {
                // Tiers are written with inclusive integer bounds (e.g. 8350
                // then 8351), so the next min must sit within one unit above
                // the previous max.
                let prev_max = self.tiers[i - 1]
                    .max
                    .expect("non-last tiers are bounded, checked above");
                if tier.min <= prev_max || tier.min > prev_max + 1.0 {
                    bail!(
                        "Fee schedule '{}' tiers {} and {} are not contiguous ({} then {})",
                        self.name,
                        i - 1,
                        i,
                        prev_max,
                        tier.min
                    );
                }
            }
        }

        Ok(())
    }

    /// Resolves the tier for an INR amount.
    ///
    /// Resolution is by upper bound: the first tier whose `max` covers the
    /// amount wins, so fractional amounts between the integer bounds of
    /// adjacent tiers land in the upper tier. Returns `None` only for
    /// structurally invalid schedules.
    pub fn tier_for(&self, inr_amount: f64) -> Option<&FeeTier> {
        self.tiers
            .iter()
            .find(|tier| tier.max.is_none_or(|max| inr_amount <= max))
    }

    pub fn is_flat(&self) -> bool {
        self.tiers.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> FeeSchedule {
        FeeSchedule {
            name: "standard".to_string(),
            tiers: vec![
                FeeTier {
                    min: 0.0,
                    max: Some(8350.0),
                    rate: 0.03,
                },
                FeeTier {
                    min: 8351.0,
                    max: Some(12500.0),
                    rate: 0.04,
                },
                FeeTier {
                    min: 12501.0,
                    max: Some(16700.0),
                    rate: 0.045,
                },
                FeeTier {
                    min: 16701.0,
                    max: None,
                    rate: 0.05,
                },
            ],
        }
    }

    fn flat() -> FeeSchedule {
        FeeSchedule {
            name: "flat".to_string(),
            tiers: vec![FeeTier {
                min: 0.0,
                max: None,
                rate: 0.05,
            }],
        }
    }

    #[test]
    fn test_standard_schedule_is_valid() {
        standard().validate().unwrap();
    }

    #[test]
    fn test_flat_schedule_is_valid_and_flat() {
        let schedule = flat();
        schedule.validate().unwrap();
        assert!(schedule.is_flat());
        assert!(!standard().is_flat());
    }

    #[test]
    fn test_lookup_at_tier_boundaries() {
        let schedule = standard();
        assert_eq!(schedule.tier_for(8350.0).unwrap().rate, 0.03);
        assert_eq!(schedule.tier_for(8351.0).unwrap().rate, 0.04);
        assert_eq!(schedule.tier_for(12500.0).unwrap().rate, 0.04);
        assert_eq!(schedule.tier_for(12501.0).unwrap().rate, 0.045);
        assert_eq!(schedule.tier_for(16700.0).unwrap().rate, 0.045);
        assert_eq!(schedule.tier_for(16701.0).unwrap().rate, 0.05);
    }

    #[test]
    fn test_lookup_between_integer_bounds_uses_upper_tier() {
        let schedule = standard();
        assert_eq!(schedule.tier_for(8350.5).unwrap().rate, 0.04);
        assert_eq!(schedule.tier_for(16700.01).unwrap().rate, 0.05);
    }

    #[test]
    fn test_lookup_covers_extremes() {
        let schedule = standard();
        assert_eq!(schedule.tier_for(0.01).unwrap().rate, 0.03);
        assert_eq!(schedule.tier_for(1_000_000_000.0).unwrap().rate, 0.05);
    }

    #[test]
    fn test_empty_schedule_is_rejected() {
        let schedule = FeeSchedule {
            name: "empty".to_string(),
            tiers: vec![],
        };
        assert!(schedule.validate().is_err());
        assert!(schedule.tier_for(100.0).is_none());
    }

    #[test]
    fn test_schedule_must_start_at_zero() {
        let schedule = FeeSchedule {
            name: "late".to_string(),
            tiers: vec![FeeTier {
                min: 100.0,
                max: None,
                rate: 0.05,
            }],
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_bounded_top_tier_is_rejected() {
        let schedule = FeeSchedule {
            name: "capped".to_string(),
            tiers: vec![FeeTier {
                min: 0.0,
                max: Some(1000.0),
                rate: 0.05,
            }],
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_overlapping_tiers_are_rejected() {
        let schedule = FeeSchedule {
            name: "overlap".to_string(),
            tiers: vec![
                FeeTier {
                    min: 0.0,
                    max: Some(10000.0),
                    rate: 0.03,
                },
                FeeTier {
                    min: 9000.0,
                    max: None,
                    rate: 0.05,
                },
            ],
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_gapped_tiers_are_rejected() {
        let schedule = FeeSchedule {
            name: "gap".to_string(),
            tiers: vec![
                FeeTier {
                    min: 0.0,
                    max: Some(5000.0),
                    rate: 0.03,
                },
                FeeTier {
                    min: 7000.0,
                    max: None,
                    rate: 0.05,
                },
            ],
        };
        assert!(schedule.validate().is_err());
    }

    #[test]
    fn test_rate_outside_unit_interval_is_rejected() {
        for rate in [1.0, 1.5, -0.1, f64::NAN] {
            let schedule = FeeSchedule {
                name: "bad-rate".to_string(),
                tiers: vec![FeeTier {
                    min: 0.0,
                    max: None,
                    rate,
                }],
            };
            assert!(schedule.validate().is_err(), "rate {rate} should fail");
        }
    }

    #[test]
    fn test_unbounded_middle_tier_is_rejected() {
        let schedule = FeeSchedule {
            name: "open-middle".to_string(),
            tiers: vec![
                FeeTier {
                    min: 0.0,
                    max: None,
                    rate: 0.03,
                },
                FeeTier {
                    min: 5000.0,
                    max: None,
                    rate: 0.05,
                },
            ],
        };
        assert!(schedule.validate().is_err());
    }
}
