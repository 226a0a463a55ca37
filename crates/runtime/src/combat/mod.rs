//! Attack and damage resolution against host defenses.
mod attack;

pub use attack::{
    AttackOptions, AttackOutcome, AttackResult, DEFAULT_CRIT_THRESHOLD, DamageResult, Power,
    attack_and_damage, is_critical, roll_attack, roll_damage, roll_formula,
};
