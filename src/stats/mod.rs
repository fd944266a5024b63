pub mod elapsed;
pub mod engine;
pub mod multiplier;

pub use elapsed::{days_ago, days_since, start_of_day};
pub use engine::{
    combat_power, cp_range, hit_point_breakpoint, hit_point_breakpoint_between, hit_points,
    BaseStats, CpRange, HpBreakpoint, Ivs, LevelLabel, BREAKPOINT_IV_HIGH, BREAKPOINT_IV_LOW,
    DEFAULT_CP_LEVEL, DEFAULT_HP_IV, DEFAULT_HP_LEVEL, MIN_COMBAT_POWER,
};
pub use multiplier::{
    is_table_level, multiplier_for_level, multiplier_or, table_levels, Fallback, CP_MULTIPLIERS,
    MAX_LEVEL, MIN_LEVEL,
};
