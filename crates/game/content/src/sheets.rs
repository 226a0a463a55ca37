//! Actor sheets: the per-actor numbers powers read and write.

use std::collections::BTreeMap;

use tactics_core::ActorId;

/// Ability scores, addressed by their usual three-letter keys.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ability {
    Str,
    Con,
    Dex,
    Int,
    Wis,
    Cha,
}

/// Defenses an attack can target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Defense {
    #[default]
    Ac,
    #[strum(to_string = "fort", serialize = "fortitude")]
    #[cfg_attr(feature = "serde", serde(alias = "fortitude"))]
    Fort,
    #[strum(to_string = "ref", serialize = "reflex")]
    #[cfg_attr(feature = "serde", serde(alias = "reflex"))]
    Ref,
    Will,
}

/// Healing surges left for the day and the hit points one surge restores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurgePool {
    pub remaining: u32,
    pub value: i32,
}

impl SurgePool {
    pub const fn new(remaining: u32, value: i32) -> Self {
        Self { remaining, value }
    }

    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitPoints {
    pub value: i32,
    pub max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub temp: i32,
}

impl HitPoints {
    pub const fn full(max: i32) -> Self {
        Self {
            value: max,
            max,
            temp: 0,
        }
    }

    /// Restores hit points, starting from 0 when the actor is below it and
    /// never exceeding the maximum.
    pub fn heal(&mut self, amount: i32) {
        self.value = (self.value.max(0) + amount.max(0)).min(self.max);
    }

    /// Temporary hit points do not stack: the larger grant wins.
    pub fn grant_temp(&mut self, amount: i32) {
        self.temp = self.temp.max(amount);
    }

    /// Damage is absorbed by temporary hit points first.
    pub fn take_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        let absorbed = amount.min(self.temp);
        self.temp -= absorbed;
        self.value -= amount - absorbed;
    }
}

/// Everything the powers need to know about one actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSheet {
    pub actor: ActorId,
    pub name: String,
    /// Ability modifiers (not raw scores).
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: BTreeMap<Ability, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defenses: BTreeMap<Defense, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub surges: SurgePool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_points: HitPoints,
}

impl ActorSheet {
    pub fn new(actor: ActorId, name: impl Into<String>) -> Self {
        Self {
            actor,
            name: name.into(),
            abilities: BTreeMap::new(),
            defenses: BTreeMap::new(),
            surges: SurgePool::default(),
            hit_points: HitPoints::default(),
        }
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability, modifier: i32) -> Self {
        self.abilities.insert(ability, modifier);
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: Defense, value: i32) -> Self {
        self.defenses.insert(defense, value);
        self
    }

    #[must_use]
    pub fn with_surges(mut self, remaining: u32, value: i32) -> Self {
        self.surges = SurgePool::new(remaining, value);
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hit_points: HitPoints) -> Self {
        self.hit_points = hit_points;
        self
    }

    /// Ability modifier, 0 when the sheet does not list the ability.
    pub fn ability_mod(&self, ability: Ability) -> i32 {
        self.abilities.get(&ability).copied().unwrap_or(0)
    }

    pub fn defense(&self, defense: Defense) -> Option<i32> {
        self.defenses.get(&defense).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ability_falls_back_to_zero() {
        let sheet = ActorSheet::new(ActorId::new("pal"), "Paladin").with_ability(Ability::Cha, 4);
        assert_eq!(sheet.ability_mod(Ability::Cha), 4);
        assert_eq!(sheet.ability_mod(Ability::Wis), 0);
        assert_eq!(sheet.defense(Defense::Ref), None);
    }

    #[test]
    fn defense_parses_long_and_short_names() {
        assert_eq!("fortitude".parse::<Defense>().unwrap(), Defense::Fort);
        assert_eq!("REF".parse::<Defense>().unwrap(), Defense::Ref);
        assert_eq!("cha".parse::<Ability>().unwrap(), Ability::Cha);
        assert_eq!(Ability::Con.to_string(), "con");
    }

    #[test]
    fn healing_starts_from_zero_and_caps_at_max() {
        let mut hp = HitPoints {
            value: -5,
            max: 40,
            temp: 0,
        };
        hp.heal(12);
        assert_eq!(hp.value, 12);
        hp.heal(100);
        assert_eq!(hp.value, 40);
    }

    #[test]
    fn temp_hit_points_absorb_damage_and_do_not_stack() {
        let mut hp = HitPoints::full(30);
        hp.grant_temp(5);
        hp.grant_temp(3);
        assert_eq!(hp.temp, 5);

        hp.take_damage(8);
        assert_eq!(hp.temp, 0);
        assert_eq!(hp.value, 27);
    }
}
