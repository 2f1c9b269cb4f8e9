//! Character records and their store

use crate::types::Attribute;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CharacterError {
    #[error("Character not found: {0}")]
    NotFound(Uuid),
    #[error("Invalid character: {0}")]
    Invalid(String),
    #[error("Failed to (de)serialize characters: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Modifier for an attribute score: floor((score - 10) / 2)
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// The six attribute scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

impl Attributes {
    pub fn score(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        ability_modifier(self.score(attribute))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPool {
    pub current: u32,
    pub max: u32,
}

/// Spell slots for levels 1-5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    pub levels: [SlotPool; 5],
}

impl SpellSlots {
    pub fn get(&self, level: u32) -> Option<&SlotPool> {
        level.checked_sub(1).and_then(|i| self.levels.get(i as usize))
    }

    /// Spend one slot; false when none is left or the level is out of range
    pub fn spend(&mut self, level: u32) -> bool {
        match level.checked_sub(1).and_then(|i| self.levels.get_mut(i as usize)) {
            Some(pool) if pool.current > 0 => {
                pool.current -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn restore_all(&mut self) {
        for pool in &mut self.levels {
            pool.current = pool.max;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub max_hp: i32,
    pub current_hp: i32,
    pub attributes: Attributes,
    pub spell_slots: SpellSlots,
    pub proficiency_bonus: i32,
    pub created_at: DateTime<Utc>,
}

impl Character {
    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.attributes.modifier(attribute)
    }
}

/// Everything but the store-assigned id and creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub max_hp: i32,
    pub current_hp: i32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub spell_slots: SpellSlots,
    pub proficiency_bonus: i32,
}

impl NewCharacter {
    /// Level-1 character at full health with default attributes
    pub fn new(name: impl Into<String>, class: CharacterClass, max_hp: i32) -> Self {
        NewCharacter {
            name: name.into(),
            class,
            level: 1,
            max_hp,
            current_hp: max_hp,
            attributes: Attributes::default(),
            spell_slots: SpellSlots::default(),
            proficiency_bonus: 2,
        }
    }
}

/// Persistence collaborator for characters
pub trait CharacterStore {
    fn create(&mut self, character: NewCharacter) -> Result<Character, CharacterError>;
    fn update(&mut self, character: Character) -> Result<(), CharacterError>;
    fn delete(&mut self, id: Uuid) -> Result<Character, CharacterError>;
    fn get(&self, id: Uuid) -> Option<&Character>;
    /// Characters in creation order
    fn list(&self) -> Vec<&Character>;
}

/// In-memory store with JSON snapshots
#[derive(Debug, Clone, Default)]
pub struct MemoryCharacterStore {
    characters: HashMap<Uuid, Character>,
}

impl MemoryCharacterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, CharacterError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }

    pub fn from_json(json: &str) -> Result<Self, CharacterError> {
        let characters: Vec<Character> = serde_json::from_str(json)?;
        Ok(MemoryCharacterStore {
            characters: characters.into_iter().map(|c| (c.id, c)).collect(),
        })
    }
}

impl CharacterStore for MemoryCharacterStore {
    fn create(&mut self, character: NewCharacter) -> Result<Character, CharacterError> {
        if character.name.trim().is_empty() {
            return Err(CharacterError::Invalid("name is empty".to_string()));
        }
        let created = Character {
            id: Uuid::new_v4(),
            name: character.name,
            class: character.class,
            level: character.level,
            max_hp: character.max_hp,
            current_hp: character.current_hp,
            attributes: character.attributes,
            spell_slots: character.spell_slots,
            proficiency_bonus: character.proficiency_bonus,
            created_at: Utc::now(),
        };
        self.characters.insert(created.id, created.clone());
        Ok(created)
    }

    fn update(&mut self, character: Character) -> Result<(), CharacterError> {
        match self.characters.get_mut(&character.id) {
            Some(existing) => {
                *existing = character;
                Ok(())
            }
            None => Err(CharacterError::NotFound(character.id)),
        }
    }

    fn delete(&mut self, id: Uuid) -> Result<Character, CharacterError> {
        self.characters.remove(&id).ok_or(CharacterError::NotFound(id))
    }

    fn get(&self, id: Uuid) -> Option<&Character> {
        self.characters.get(&id)
    }

    fn list(&self) -> Vec<&Character> {
        let mut characters: Vec<&Character> = self.characters.values().collect();
        characters.sort_by_key(|c| (c.created_at, c.id));
        characters
    }
}
