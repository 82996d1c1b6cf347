//! Rosters: one side's ordered team of combatants.
//!
//! Member order is turn order. Slot `i` acts only while member `i` is
//! alive; a dead occupant's turn is skipped, never handed to someone else.

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;

/// A named, ordered team.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    name: String,
    members: Vec<Combatant>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Create a roster from members in turn order.
    #[must_use]
    pub fn with_members(name: impl Into<String>, members: Vec<Combatant>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Append a member (builder pattern).
    #[must_use]
    pub fn with_member(mut self, member: Combatant) -> Self {
        self.members.push(member);
        self
    }

    /// Append a member in place.
    pub fn add_member(&mut self, member: Combatant) {
        self.members.push(member);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn member_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    // === Liveness ===

    /// True when no member is alive. An empty roster is defeated.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        !self.members.iter().any(Combatant::is_alive)
    }

    /// First living member, if any.
    #[must_use]
    pub fn any_living(&self) -> Option<&Combatant> {
        self.members.iter().find(|c| c.is_alive())
    }

    /// Member at `index` if it exists and is alive.
    #[must_use]
    pub fn living_at(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index).filter(|c| c.is_alive())
    }

    /// Mutable access to a living member at `index`.
    pub fn living_at_mut(&mut self, index: usize) -> Option<&mut Combatant> {
        self.members.get_mut(index).filter(|c| c.is_alive())
    }

    /// Indices of living members, in roster order.
    #[must_use]
    pub fn living_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    // === Broadcasts ===

    /// Run round-end upkeep on every living member.
    pub fn end_round(&mut self) {
        for member in self.members.iter_mut().filter(|c| c.is_alive()) {
            member.end_round();
        }
    }

    /// Heal every living member to full health and resource.
    ///
    /// Used between battles; defeated members stay down.
    pub fn restore_living(&mut self) {
        for member in self.members.iter_mut().filter(|c| c.is_alive()) {
            member.restore_full();
        }
    }

    /// One status line per member.
    #[must_use]
    pub fn summary(&self) -> String {
        self.members
            .iter()
            .map(|c| {
                if c.is_alive() {
                    c.to_string()
                } else {
                    format!("{} [DEFEATED]", c)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
