//! Level → CP multiplier table. Defined only at half-level steps from 1.0 to 51.0.
//! Lookups never interpolate; callers choose a fallback level for anything off the table.

pub const MIN_LEVEL: f64 = 1.0;
pub const MAX_LEVEL: f64 = 51.0;

/// Multipliers indexed by `level * 2 - 2`, so index 0 is level 1.0 and index 100 is level 51.0.
pub const CP_MULTIPLIERS: [f64; 101] = [
    0.094, 0.135137432, 0.16639787, 0.192650919,
    0.21573247, 0.236572661, 0.25572005, 0.273530381,
    0.29024988, 0.306057377, 0.3210876, 0.335445036,
    0.34921268, 0.362457751, 0.37523559, 0.387592406,
    0.39956728, 0.411193551, 0.42250001, 0.432926419,
    0.44310755, 0.4530599578, 0.46279839, 0.472336083,
    0.48168495, 0.4908558, 0.49985844, 0.508701765,
    0.51739395, 0.525942511, 0.53435433, 0.542635767,
    0.55079269, 0.558830586, 0.56675452, 0.574569153,
    0.58227891, 0.589887917, 0.59740001, 0.604818814,
    0.61215729, 0.619399365, 0.62656713, 0.633644533,
    0.64065295, 0.647576426, 0.65443563, 0.661214806,
    0.667934, 0.674577537, 0.68116492, 0.687680648,
    0.69414365, 0.700538673, 0.70688421, 0.713164996,
    0.71939909, 0.725571552, 0.7317, 0.734741009,
    0.73776948, 0.740785574, 0.74378943, 0.746781211,
    0.74976104, 0.752729087, 0.75568551, 0.758630378,
    0.76156384, 0.764486065, 0.76739717, 0.770297266,
    0.7731865, 0.776064962, 0.77893275, 0.781790055,
    0.78463697, 0.787473578, 0.79030001, 0.792803968,
    0.79530001, 0.797803921, 0.80030001, 0.802803876,
    0.80530001, 0.807803833, 0.81030001, 0.812803792,
    0.81530001, 0.817803753, 0.82030001, 0.822803716,
    0.82530001, 0.827803681, 0.83030001, 0.832803648,
    0.83530001, 0.837803617, 0.84029999, 0.842803586,
    0.84530001,
];

/// Which default level an off-table lookup resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Combat power falls back to level 50.
    CombatPower,
    /// Hit points fall back to level 40.
    HitPoints,
}

impl Fallback {
    pub fn level(self) -> f64 {
        match self {
            Self::CombatPower => 50.0,
            Self::HitPoints => 40.0,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::CombatPower => CP_MULTIPLIERS[98],
            Self::HitPoints => CP_MULTIPLIERS[78],
        }
    }
}

fn table_index(level: f64) -> Option<usize> {
    let doubled = level * 2.0;
    if !doubled.is_finite() || doubled.fract() != 0.0 {
        return None;
    }
    let index = usize::try_from(doubled as i64 - 2).ok()?;
    (index < CP_MULTIPLIERS.len()).then_some(index)
}

/// Exact table entry for `level`, or None when the level is not a half-level step in range.
pub fn multiplier_for_level(level: f64) -> Option<f64> {
    table_index(level).map(|index| CP_MULTIPLIERS[index])
}

/// Table entry for `level`, silently degrading to the fallback level's entry when absent.
pub fn multiplier_or(level: f64, fallback: Fallback) -> f64 {
    multiplier_for_level(level).unwrap_or_else(|| fallback.multiplier())
}

pub fn is_table_level(level: f64) -> bool {
    table_index(level).is_some()
}

/// Every level the table defines, ascending.
pub fn table_levels() -> impl Iterator<Item = f64> {
    (0..CP_MULTIPLIERS.len()).map(|index| (index as f64 + 2.0) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_endpoints_and_known_levels() {
        assert_eq!(multiplier_for_level(MIN_LEVEL), Some(0.094));
        assert_eq!(multiplier_for_level(MAX_LEVEL), Some(0.84530001));
        assert_eq!(multiplier_for_level(40.0), Some(0.79030001));
        assert_eq!(multiplier_for_level(50.0), Some(0.84029999));
        assert_eq!(multiplier_for_level(11.5), Some(0.4530599578));
    }

    #[test]
    fn off_table_levels_have_no_entry() {
        for level in [0.0, 0.5, -1.0, 51.5, 999.0, 10.25, f64::NAN, f64::INFINITY] {
            assert_eq!(multiplier_for_level(level), None, "level {level}");
        }
    }

    #[test]
    fn fallback_levels_differ_by_stat() {
        assert_eq!(multiplier_or(999.0, Fallback::CombatPower), 0.84029999);
        assert_eq!(multiplier_or(999.0, Fallback::HitPoints), 0.79030001);
        assert_eq!(
            Some(Fallback::CombatPower.multiplier()),
            multiplier_for_level(Fallback::CombatPower.level())
        );
        assert_eq!(
            Some(Fallback::HitPoints.multiplier()),
            multiplier_for_level(Fallback::HitPoints.level())
        );
    }

    #[test]
    fn table_is_strictly_increasing() {
        for pair in CP_MULTIPLIERS.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn table_levels_cover_every_entry() {
        let levels: Vec<f64> = table_levels().collect();
        assert_eq!(levels.len(), 101);
        assert_eq!(levels[0], 1.0);
        assert_eq!(levels[1], 1.5);
        assert_eq!(levels[100], 51.0);
        assert!(levels.iter().all(|&level| is_table_level(level)));
    }
}
