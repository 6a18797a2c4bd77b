//! Participant record (C1)

use serde::{Deserialize, Serialize};

use crate::model::Item;

/// One participant in a tournament, one-to-one with an input item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// The item this participant represents. Immutable after creation.
    pub item: Item,
    /// Decisive rounds won.
    pub wins: u32,
    /// Decisive rounds lost.
    pub losses: u32,
}

impl Participant {
    /// Create a fresh participant for an item, zero wins and losses.
    pub fn new(item: Item) -> Self {
        Self {
            item,
            wins: 0,
            losses: 0,
        }
    }

    /// True once this participant has lost `count` or more rounds.
    pub fn is_eliminated(&self, count: u32) -> bool {
        self.losses >= count
    }

    pub(crate) fn record_win(&mut self) {
        self.wins += 1;
    }

    pub(crate) fn record_loss(&mut self) {
        self.losses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_participant_is_not_eliminated() {
        let p = Participant::new(Item::new("a"));
        assert!(!p.is_eliminated(1));
        assert_eq!(p.wins, 0);
        assert_eq!(p.losses, 0);
    }

    #[test]
    fn elimination_bound_is_inclusive() {
        let mut p = Participant::new(Item::new("a"));
        p.record_loss();
        assert!(!p.is_eliminated(2));
        p.record_loss();
        assert!(p.is_eliminated(2));
    }
}
