//! Health, armour and fall damage.
//!
//! Armour absorbs 80% of incoming damage at a cost of 0.4 AP per point of
//! damage. Fall and drown damage bypass armour entirely; for those the
//! health loss is just the truncated damage.

use crate::common::{float_equal, float_zero};
use serde::{Deserialize, Serialize};

/// How the lower end of an [`ArmorInterval`] is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LowerBound {
    Open,
    Closed,
}

/// How the upper end of an [`ArmorInterval`] is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpperBound {
    Open,
    Closed,
    /// Inclusive bound at which the damage just uses up all the armour.
    /// Any larger AP gives the same health loss but leaves armour behind.
    Saturating,
}

/// Range of starting armour that yields a given health loss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmorInterval {
    pub lower: f64,
    pub upper: f64,
    pub lower_bound: LowerBound,
    pub upper_bound: UpperBound,
}

/// New health and armour after taking `dmg` damage.
///
/// Negative damage heals (and tops up armour), as with the infinite
/// health doors in the campaign.
pub fn hpap_damage(hp: i32, ap: f64, dmg: f64) -> (i32, f64) {
    let new_ap = if float_zero(ap) { 0.0 } else { (ap - 0.4 * dmg).max(0.0) };
    let loss = if float_zero(new_ap) { dmg - 2.0 * ap } else { 0.2 * dmg };
    (hp - loss as i32, new_ap)
}

/// Starting armour needed so that `dmg` removes exactly `dhp` health.
///
/// `dhp` is truncated first. Returns `None` when no amount of armour
/// produces that loss. A `dmg` of zero still counts as a hit, which
/// matters for the negative armour values this can return.
pub fn ap_for_health_loss(dhp: f64, dmg: f64) -> Option<ArmorInterval> {
    let dhp = dhp.trunc();

    let (lower, lower_bound, upper_bound) = if dhp < 0.0 {
        if float_equal(dmg, dhp) {
            return Some(ArmorInterval {
                lower: 0.0,
                upper: 0.0,
                lower_bound: LowerBound::Closed,
                upper_bound: UpperBound::Closed,
            });
        }
        if dmg > 5.0 * dhp {
            return None;
        }
        let upper_bound = if dmg <= 5.0 * (dhp - 1.0) {
            UpperBound::Open
        } else {
            UpperBound::Saturating
        };
        (0.5 * (dmg - dhp), LowerBound::Closed, upper_bound)
    } else {
        if dmg >= 5.0 * (dhp + 1.0) {
            return None;
        }
        let upper_bound = if dmg < 5.0 * dhp {
            UpperBound::Closed
        } else {
            UpperBound::Saturating
        };
        (0.5 * (dmg - dhp - 1.0), LowerBound::Open, upper_bound)
    };

    Some(ArmorInterval {
        lower,
        upper: (lower + 0.5).min(0.4 * dmg),
        lower_bound,
        upper_bound,
    })
}

/// Untruncated fall damage for a touchdown vertical speed `vfz`
pub fn fall_damage(vfz: f64) -> f64 {
    (25.0 * (vfz - 580.0) / 111.0).max(0.0)
}
