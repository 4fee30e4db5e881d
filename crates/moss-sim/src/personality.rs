//! Care metrics and personality derivation.
//!
//! [`derive`] is the only place personality is computed. The Pet Actor
//! and the need poller both call it on the same snapshot shape, and the
//! cached `personality` field on the state is only ever written from it.

use chrono::{DateTime, Utc};
use moss_types::{CareMetrics, Personality};

use crate::config::VitalsConfig;

/// Fold one user-initiated action into the running care metrics.
///
/// The first interaction seeds both averages directly; later ones apply
/// an exponential moving average with `config.ema_alpha`.
pub fn record_interaction(
    care: &mut CareMetrics,
    fullness: f64,
    bond: f64,
    now: DateTime<Utc>,
    config: &VitalsConfig,
) {
    if care.total_interactions == 0 {
        care.avg_fullness = fullness;
        care.avg_bond = bond;
    } else {
        let alpha = config.ema_alpha.clamp(0.0, 1.0);
        care.avg_fullness = alpha.mul_add(fullness, (1.0 - alpha) * care.avg_fullness);
        care.avg_bond = alpha.mul_add(bond, (1.0 - alpha) * care.avg_bond);
    }
    care.total_interactions = care.total_interactions.saturating_add(1);
    care.last_interaction_at = now;
}

/// Whether the creature currently feels neglected.
pub fn is_neglected(care: &CareMetrics, now: DateTime<Utc>, config: &VitalsConfig) -> bool {
    let since_last = now
        .signed_duration_since(care.last_interaction_at)
        .num_seconds();
    since_last > config.neglect_after_secs
        || care.total_interactions < config.neglect_min_interactions
}

/// Derive personality from care history and current bond.
///
/// - No interactions yet: shy
/// - Neglected and bond below 40: sassy
/// - Neglected otherwise: dramatic
/// - Bond above 70 and average fullness above 60: cheerful
/// - Bond below 30: shy
/// - Otherwise: stoic
pub fn derive(
    care: &CareMetrics,
    bond: f64,
    now: DateTime<Utc>,
    config: &VitalsConfig,
) -> Personality {
    if care.total_interactions == 0 {
        return Personality::Shy;
    }

    if is_neglected(care, now, config) {
        return if bond < 40.0 {
            Personality::Sassy
        } else {
            Personality::Dramatic
        };
    }

    if bond > 70.0 && care.avg_fullness > 60.0 {
        Personality::Cheerful
    } else if bond < 30.0 {
        Personality::Shy
    } else {
        Personality::Stoic
    }
}

/// Human-readable description of a bond level, for generation prompts.
pub fn bond_description(bond: f64) -> &'static str {
    if bond >= 80.0 {
        "deeply bonded"
    } else if bond >= 60.0 {
        "close companions"
    } else if bond >= 40.0 {
        "developing a bond"
    } else if bond >= 20.0 {
        "new acquaintances"
    } else {
        "barely met"
    }
}
