/// Combo / multiplier scoring and the power-up drop policy.

use rand::Rng;

use crate::config::SimConfig;
use crate::entities::{PowerUpKind, ScoreState};

/// What a single kill did to the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub points: u64,
    /// How many times the multiplier went up during this kill.
    pub multiplier_steps: u32,
}

/// Award `base_score` at the current multiplier, then advance the combo.
///
/// Every `combo_threshold` combo points raise the multiplier by one, with
/// the remainder carried over. Once the multiplier sits at its cap the
/// combo is held at the threshold instead of growing.
pub fn on_enemy_destroyed(
    scoring: &mut ScoreState,
    cfg: &SimConfig,
    base_score: u32,
    combo_bonus: u32,
) -> ScoreOutcome {
    let threshold = cfg.combo_threshold.max(1);
    let cap = cfg.max_multiplier.max(1);
    scoring.multiplier = scoring.multiplier.clamp(1, cap);

    let points = (base_score as f64 * scoring.multiplier as f64).round() as u64;
    scoring.score = scoring.score.saturating_add(points);

    scoring.combo_count = scoring.combo_count.saturating_add(combo_bonus);
    let mut steps = 0;
    while scoring.combo_count >= threshold && scoring.multiplier < cap {
        scoring.multiplier += 1;
        scoring.combo_count -= threshold;
        steps += 1;
    }
    if scoring.multiplier >= cap {
        scoring.combo_count = scoring.combo_count.min(threshold);
    }

    ScoreOutcome {
        points,
        multiplier_steps: steps,
    }
}

/// Drop the streak. Called only when the player actually takes damage.
pub fn reset_combo(scoring: &mut ScoreState) {
    scoring.combo_count = 0;
    scoring.multiplier = 1;
}

/// Weighted table for ordinary kills; rapid fire is twice as common.
const DROP_TABLE: [(PowerUpKind, u32); 5] = [
    (PowerUpKind::RapidFire, 2),
    (PowerUpKind::Shield, 1),
    (PowerUpKind::Life, 1),
    (PowerUpKind::Laser, 1),
    (PowerUpKind::Missile, 1),
];

const BOSS_DROPS: [PowerUpKind; 3] = [PowerUpKind::Laser, PowerUpKind::Missile, PowerUpKind::Shield];

/// Roll for a drop after an ordinary kill.
pub fn roll_drop(cfg: &SimConfig, rng: &mut impl Rng) -> Option<PowerUpKind> {
    if rng.gen::<f64>() >= cfg.powerup_drop_chance {
        return None;
    }
    Some(pick_weighted(rng))
}

fn pick_weighted(rng: &mut impl Rng) -> PowerUpKind {
    let total: u32 = DROP_TABLE.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in DROP_TABLE {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    PowerUpKind::RapidFire
}

/// Bosses always drop one of the stronger pickups.
pub fn boss_drop(rng: &mut impl Rng) -> PowerUpKind {
    BOSS_DROPS[rng.gen_range(0..BOSS_DROPS.len())]
}
