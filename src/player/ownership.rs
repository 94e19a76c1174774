use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::property::Property,
    foundation::core::{ElementId, PlayerId},
};

/// Who may write each `(element, property)` right now. The most recent claim wins.
#[derive(Clone, Debug, Default)]
pub struct Ownership {
    owners: BTreeMap<(ElementId, Property), PlayerId>,
}

impl Ownership {
    /// Claim `props` on `target` for `player`, returning the players that lost something.
    pub fn claim(
        &mut self,
        target: ElementId,
        props: impl IntoIterator<Item = Property>,
        player: PlayerId,
    ) -> BTreeSet<PlayerId> {
        let mut displaced = BTreeSet::new();
        for p in props {
            if let Some(prev) = self.owners.insert((target, p), player)
                && prev != player
            {
                displaced.insert(prev);
            }
        }
        displaced
    }

    pub fn owner(&self, target: ElementId, prop: Property) -> Option<PlayerId> {
        self.owners.get(&(target, prop)).copied()
    }

    pub fn owns(&self, target: ElementId, prop: Property, player: PlayerId) -> bool {
        self.owner(target, prop) == Some(player)
    }

    pub fn holds_any(&self, player: PlayerId) -> bool {
        self.owners.values().any(|p| *p == player)
    }

    pub fn release(&mut self, player: PlayerId) {
        self.owners.retain(|_, p| *p != player);
    }
}
