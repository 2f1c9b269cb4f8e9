//! Initiative order, rounds and conditions for one encounter

use crate::character::Character;
use crate::dice::{DiceSource, D20};
use crate::error::CombatError;
use crate::types::Attribute;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conditions a combatant can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Poisoned,
    Stunned,
    Blinded,
    Paralyzed,
    Frightened,
    Burning,
    Slowed,
}

impl Condition {
    pub fn all() -> &'static [Condition] {
        &[
            Condition::Poisoned,
            Condition::Stunned,
            Condition::Blinded,
            Condition::Paralyzed,
            Condition::Frightened,
            Condition::Burning,
            Condition::Slowed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Poisoned => "Poisoned",
            Condition::Stunned => "Stunned",
            Condition::Blinded => "Blinded",
            Condition::Paralyzed => "Paralyzed",
            Condition::Frightened => "Frightened",
            Condition::Burning => "Burning",
            Condition::Slowed => "Slowed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: Uuid,
    pub name: String,
    /// Last rolled initiative, 0 before rolling
    pub initiative: i32,
    pub initiative_modifier: i32,
    pub is_enemy: bool,
    pub hp: i32,
    pub max_hp: i32,
    pub conditions: Vec<Condition>,
}

impl Combatant {
    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }
}

/// Turn order for an encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitiativeTracker {
    combatants: Vec<Combatant>,
    round: u32,
    turn: usize,
    started: bool,
}

impl InitiativeTracker {
    pub fn new() -> Self {
        InitiativeTracker {
            round: 1,
            ..Default::default()
        }
    }

    /// Add a character; its dexterity modifier is the initiative modifier
    pub fn add_character(&mut self, character: &Character) -> Uuid {
        self.push(Combatant {
            id: Uuid::new_v4(),
            name: character.name.clone(),
            initiative: 0,
            initiative_modifier: character.modifier(Attribute::Dexterity),
            is_enemy: false,
            hp: character.current_hp,
            max_hp: character.max_hp,
            conditions: Vec::new(),
        })
    }

    pub fn add_enemy(&mut self, name: &str, initiative_modifier: i32, hp: i32) -> Result<Uuid, CombatError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CombatError::invalid("enemy name is empty"));
        }
        Ok(self.push(Combatant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            initiative: 0,
            initiative_modifier,
            is_enemy: true,
            hp,
            max_hp: hp,
            conditions: Vec::new(),
        }))
    }

    fn push(&mut self, combatant: Combatant) -> Uuid {
        let id = combatant.id;
        self.combatants.push(combatant);
        id
    }

    /// Roll d20 + modifier for everyone and sort descending; ties keep insertion order
    pub fn roll_initiative(&mut self, dice: &mut impl DiceSource) {
        for combatant in &mut self.combatants {
            combatant.initiative = dice.roll_die(D20) as i32 + combatant.initiative_modifier;
        }
        self.combatants.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        self.round = 1;
        self.turn = 0;
        self.started = true;
        tracing::debug!(combatants = self.combatants.len(), "initiative rolled");
    }

    /// Advance to the next combatant, wrapping into a new round
    pub fn next_turn(&mut self) {
        if self.combatants.is_empty() {
            return;
        }
        if self.turn + 1 >= self.combatants.len() {
            self.turn = 0;
            self.round += 1;
        } else {
            self.turn += 1;
        }
    }

    /// End the encounter; combatants stay, initiative is cleared
    pub fn reset(&mut self) {
        for combatant in &mut self.combatants {
            combatant.initiative = 0;
        }
        self.round = 1;
        self.turn = 0;
        self.started = false;
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Combatant> {
        let index = self.combatants.iter().position(|c| c.id == id)?;
        let removed = self.combatants.remove(index);
        if index < self.turn {
            self.turn -= 1;
        }
        if self.turn >= self.combatants.len() {
            self.turn = 0;
        }
        Some(removed)
    }

    /// Add the condition if absent, remove it if present; false for an unknown id
    pub fn toggle_condition(&mut self, id: Uuid, condition: Condition) -> bool {
        let Some(combatant) = self.combatants.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        if let Some(index) = combatant.conditions.iter().position(|c| *c == condition) {
            combatant.conditions.remove(index);
        } else {
            combatant.conditions.push(condition);
        }
        true
    }

    /// Whose turn it is, once initiative has been rolled
    pub fn current(&self) -> Option<&Combatant> {
        if !self.started {
            return None;
        }
        self.combatants.get(self.turn)
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterClass, CharacterStore, MemoryCharacterStore, NewCharacter};
    use crate::dice::ScriptedDice;

    fn tracker() -> (InitiativeTracker, Vec<Uuid>) {
        let mut tracker = InitiativeTracker::new();
        let ids = vec![
            tracker.add_enemy("Goblin", 2, 7).unwrap(),
            tracker.add_enemy("Orc", 0, 15).unwrap(),
            tracker.add_enemy("Wolf", 2, 11).unwrap(),
        ];
        (tracker, ids)
    }

    #[test]
    fn test_roll_sorts_descending_and_stable() {
        let (mut tracker, ids) = tracker();
        let mut dice = ScriptedDice::new(vec![10, 18, 10]);
        tracker.roll_initiative(&mut dice);

        let order: Vec<Uuid> = tracker.combatants().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[2]]);
        assert_eq!(tracker.combatants()[0].initiative, 18);
        assert_eq!(tracker.round(), 1);
        assert_eq!(tracker.current().map(|c| c.id), Some(ids[1]));
    }

    #[test]
    fn test_next_turn_wraps() {
        let (mut tracker, _) = tracker();
        tracker.roll_initiative(&mut ScriptedDice::new(vec![5]));
        tracker.next_turn();
        tracker.next_turn();
        assert_eq!(tracker.turn(), 2);
        tracker.next_turn();
        assert_eq!(tracker.turn(), 0);
        assert_eq!(tracker.round(), 2);
    }

    #[test]
    fn test_reset_keeps_combatants() {
        let (mut tracker, _) = tracker();
        tracker.roll_initiative(&mut ScriptedDice::new(vec![12]));
        tracker.next_turn();
        tracker.reset();
        assert_eq!(tracker.combatants().len(), 3);
        assert!(tracker.combatants().iter().all(|c| c.initiative == 0));
        assert!(tracker.current().is_none());
        assert_eq!(tracker.round(), 1);
    }

    #[test]
    fn test_empty_enemy_name() {
        let mut tracker = InitiativeTracker::new();
        assert!(tracker.add_enemy("   ", 0, 5).is_err());
    }

    #[test]
    fn test_character_uses_dex_modifier() {
        let mut store = MemoryCharacterStore::new();
        let mut new = NewCharacter::new("Kestrel", CharacterClass::Rogue, 10);
        new.attributes.dexterity = 17;
        let kestrel = store.create(new).unwrap();

        let mut tracker = InitiativeTracker::new();
        tracker.add_character(&kestrel);
        tracker.roll_initiative(&mut ScriptedDice::new(vec![10]));
        assert_eq!(tracker.combatants()[0].initiative, 13);
    }

    #[test]
    fn test_toggle_condition_and_remove() {
        let (mut tracker, ids) = tracker();
        assert!(tracker.toggle_condition(ids[0], Condition::Poisoned));
        assert!(tracker.combatants()[0].has_condition(Condition::Poisoned));
        tracker.toggle_condition(ids[0], Condition::Poisoned);
        assert!(tracker.combatants()[0].conditions.is_empty());

        assert!(tracker.remove(ids[0]).is_some());
        assert!(!tracker.toggle_condition(ids[0], Condition::Stunned));
        assert_eq!(tracker.combatants().len(), 2);
    }
}
