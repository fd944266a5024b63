//! CP and HP formulas over the multiplier table, plus HP breakpoint detection.
//!
//! Inputs are never validated: IVs outside 0..=15 flow straight into the arithmetic.
//! A CP whose square-root argument goes negative is reported as `None` so callers can
//! show a placeholder instead of a number.

use serde::Serialize;

use crate::stats::multiplier::{is_table_level, multiplier_or, Fallback};

pub const MIN_COMBAT_POWER: u64 = 10;
pub const DEFAULT_CP_LEVEL: f64 = 50.0;
pub const DEFAULT_HP_LEVEL: f64 = 40.0;
pub const DEFAULT_HP_IV: i32 = 15;
pub const BREAKPOINT_IV_LOW: i32 = 14;
pub const BREAKPOINT_IV_HIGH: i32 = 15;

/// Base attack / defense / stamina of a species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseStats {
    pub atk: u32,
    pub def: u32,
    pub hit: u32,
}

impl BaseStats {
    pub fn new(atk: u32, def: u32, hit: u32) -> Self {
        Self { atk, def, hit }
    }
}

/// Individual values for attack, defense and HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ivs {
    pub atk: i32,
    pub def: i32,
    pub hp: i32,
}

impl Ivs {
    /// 15/15/15, the top of the CP range and the formula default.
    pub const PERFECT: Ivs = Ivs::uniform(15);
    /// 10/10/10, the bottom of the displayed CP range.
    pub const RANGE_FLOOR: Ivs = Ivs::uniform(10);

    pub const fn new(atk: i32, def: i32, hp: i32) -> Self {
        Self { atk, def, hp }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value)
    }
}

impl Default for Ivs {
    fn default() -> Self {
        Self::PERFECT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpRange {
    pub level: LevelLabel,
    pub low: Option<u64>,
    pub high: Option<u64>,
}

/// A table level kept as twice its value so it can be compared and serialized exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "f64")]
pub struct LevelLabel(u32);

impl LevelLabel {
    pub fn from_level(level: f64) -> Self {
        Self((level * 2.0).round().max(0.0) as u32)
    }

    pub fn level(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl From<LevelLabel> for f64 {
    fn from(label: LevelLabel) -> f64 {
        label.level()
    }
}

impl std::fmt::Display for LevelLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "L{}", self.0 / 2)
        } else {
            write!(f, "L{}.5", self.0 / 2)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HpBreakpoint {
    pub equal: bool,
    pub hp_low: i64,
    pub hp_high: i64,
}

/// `floor(max(10, (atkIV + atk) * sqrt(defIV + def) * sqrt(hpIV + hit) * m(level)^2 / 10))`.
///
/// Off-table levels use the level 50 multiplier.
pub fn combat_power(stats: &BaseStats, ivs: Ivs, level: f64) -> Option<u64> {
    let multiplier = multiplier_or(level, Fallback::CombatPower);
    let attack = f64::from(ivs.atk) + f64::from(stats.atk);
    let defense = f64::from(ivs.def) + f64::from(stats.def);
    let stamina = f64::from(ivs.hp) + f64::from(stats.hit);

    let raw = attack * defense.sqrt() * stamina.sqrt() * multiplier.powi(2) / 10.0;
    if raw.is_nan() {
        return None;
    }
    Some(raw.max(MIN_COMBAT_POWER as f64).floor() as u64)
}

/// CP at 10/10/10 and 15/15/15 for one level.
///
/// The label names the level the numbers were computed at, so an off-table request is
/// labelled with the combat power fallback level.
pub fn cp_range(stats: &BaseStats, level: f64) -> CpRange {
    let resolved = if is_table_level(level) {
        level
    } else {
        Fallback::CombatPower.level()
    };
    CpRange {
        level: LevelLabel::from_level(resolved),
        low: combat_power(stats, Ivs::RANGE_FLOOR, level),
        high: combat_power(stats, Ivs::PERFECT, level),
    }
}

/// `floor((hit + hpIV) * m(level))`. Off-table levels use the level 40 multiplier.
pub fn hit_points(stats: &BaseStats, hp_iv: i32, level: f64) -> i64 {
    let multiplier = multiplier_or(level, Fallback::HitPoints);
    ((f64::from(stats.hit) + f64::from(hp_iv)) * multiplier).floor() as i64
}

pub fn hit_point_breakpoint_between(
    stats: &BaseStats,
    level: f64,
    iv_low: i32,
    iv_high: i32,
) -> HpBreakpoint {
    let hp_low = hit_points(stats, iv_low, level);
    let hp_high = hit_points(stats, iv_high, level);
    HpBreakpoint {
        equal: hp_low == hp_high,
        hp_low,
        hp_high,
    }
}

/// Whether HP IV 14 and 15 round to the same HP at `level`.
pub fn hit_point_breakpoint(stats: &BaseStats, level: f64) -> HpBreakpoint {
    hit_point_breakpoint_between(stats, level, BREAKPOINT_IV_LOW, BREAKPOINT_IV_HIGH)
}
