//! Numeric state of the character the tools operate on.
//!
//! [`EntityState`] is a plain data holder. It is owned by the conversation
//! for the lifetime of the process and only mutated through the tool
//! dispatcher. Values have no enforced range and may go negative.

use std::fmt;

use crate::config::CharacterConfig;

/// One of the character's numeric attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Health,
    Strength,
    Agility,
    Intelligence,
}

impl Attribute {
    /// Every attribute, in registry order.
    pub const ALL: [Attribute; 4] = [
        Attribute::Health,
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Intelligence,
    ];

    /// Lowercase name used in tool names and result sentences.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Health => "health",
            Attribute::Strength => "strength",
            Attribute::Agility => "agility",
            Attribute::Intelligence => "intelligence",
        }
    }

    /// Parses the attribute part of a tool name (`"health"` in `get_health`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mutable attributes of the character.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub health: f64,
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
}

impl EntityState {
    pub fn new(health: f64, strength: f64, agility: f64, intelligence: f64) -> Self {
        Self {
            health,
            strength,
            agility,
            intelligence,
        }
    }

    /// Mutable slot for `attribute`.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut f64 {
        match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
        }
    }
}

impl From<&CharacterConfig> for EntityState {
    fn from(character: &CharacterConfig) -> Self {
        Self::new(
            character.health,
            character.strength,
            character.agility,
            character.intelligence,
        )
    }
}

/// Compact one-line stats display printed after every turn.
impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "⛑️ {} 💪 {} 🏃 {} 🧠 {}",
            self.health, self.strength, self.agility, self.intelligence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trips_through_name() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
        }
        assert_eq!(Attribute::from_name("charisma"), None);
    }

    #[test]
    fn test_get_mut_writes_only_one_attribute() {
        let mut state = EntityState::new(100.0, 80.0, 70.0, 60.0);
        *state.get_mut(Attribute::Agility) -= 75.0;
        assert_eq!(state.agility, -5.0);
        assert_eq!(state.health, 100.0);
        assert_eq!(state.strength, 80.0);
        assert_eq!(state.intelligence, 60.0);
    }

    #[test]
    fn test_from_character_config_defaults() {
        let state = EntityState::from(&CharacterConfig::default());
        assert_eq!(state, EntityState::new(100.0, 80.0, 70.0, 60.0));
    }

    #[test]
    fn test_display_uses_plain_numbers() {
        let state = EntityState::new(100.0, 80.5, 70.0, 62.0);
        assert_eq!(state.to_string(), "⛑️ 100 💪 80.5 🏃 70 🧠 62");
    }
}
