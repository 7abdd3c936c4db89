//! Hook registration by stable key.
//!
//! A player's hook lists hold `(tile, kind)` keys, never the effects
//! themselves. Firing a hook looks the effects up in the registry; removing
//! a one-shot or released hook removes its key. Keys stay valid across
//! clones, serialization and replay.

use serde::{Deserialize, Serialize};

use super::definition::TileId;

/// When a hook fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookKind {
    /// Once, on acquisition.
    Immediate,
    /// At the start of every round.
    Income,
    /// When the owner passes.
    Pass,
    /// During setup, after the draft.
    Setup,
}

/// Stable identity of a registered hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookKey {
    pub tile: TileId,
    pub kind: HookKind,
}

impl HookKey {
    #[must_use]
    pub const fn new(tile: TileId, kind: HookKind) -> Self {
        Self { tile, kind }
    }
}

impl std::fmt::Display for HookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:?}", self.tile, self.kind)
    }
}

/// The three ordered hook lists of a player.
///
/// Order is registration order; firing follows it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookLists {
    income: Vec<HookKey>,
    pass: Vec<HookKey>,
    setup: Vec<HookKey>,
}

impl HookLists {
    fn list_mut(&mut self, kind: HookKind) -> Option<&mut Vec<HookKey>> {
        match kind {
            HookKind::Income => Some(&mut self.income),
            HookKind::Pass => Some(&mut self.pass),
            HookKind::Setup => Some(&mut self.setup),
            HookKind::Immediate => None,
        }
    }

    /// Keys of one list, in registration order.
    #[must_use]
    pub fn keys(&self, kind: HookKind) -> &[HookKey] {
        match kind {
            HookKind::Income => &self.income,
            HookKind::Pass => &self.pass,
            HookKind::Setup => &self.setup,
            HookKind::Immediate => &[],
        }
    }

    /// Append a key. Immediate hooks are never stored; duplicates are ignored.
    pub fn register(&mut self, key: HookKey) {
        if let Some(list) = self.list_mut(key.kind) {
            if !list.contains(&key) {
                list.push(key);
            }
        }
    }

    /// Remove a key. Returns whether it was present.
    pub fn unregister(&mut self, key: HookKey) -> bool {
        let Some(list) = self.list_mut(key.kind) else {
            return false;
        };
        match list.iter().position(|k| *k == key) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every key contributed by `tile`.
    pub fn unregister_tile(&mut self, tile: TileId) {
        for list in [&mut self.income, &mut self.pass, &mut self.setup] {
            list.retain(|k| k.tile != tile);
        }
    }

    #[must_use]
    pub fn contains(&self, key: HookKey) -> bool {
        self.keys(key.kind).contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tile: u16, kind: HookKind) -> HookKey {
        HookKey::new(TileId::new(tile), kind)
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut hooks = HookLists::default();
        hooks.register(key(4, HookKind::Income));
        hooks.register(key(1, HookKind::Income));
        hooks.register(key(4, HookKind::Income));

        assert_eq!(
            hooks.keys(HookKind::Income),
            &[key(4, HookKind::Income), key(1, HookKind::Income)]
        );
    }

    #[test]
    fn test_immediate_hooks_are_not_stored() {
        let mut hooks = HookLists::default();
        hooks.register(key(2, HookKind::Immediate));
        assert!(hooks.keys(HookKind::Immediate).is_empty());
        assert!(!hooks.unregister(key(2, HookKind::Immediate)));
    }

    #[test]
    fn test_unregister_by_stable_key() {
        let mut hooks = HookLists::default();
        hooks.register(key(1, HookKind::Setup));
        hooks.register(key(2, HookKind::Setup));

        let copy = hooks.clone();
        assert!(hooks.unregister(key(1, HookKind::Setup)));
        assert!(!hooks.unregister(key(1, HookKind::Setup)));
        assert_eq!(hooks.keys(HookKind::Setup), &[key(2, HookKind::Setup)]);
        // The clone is unaffected.
        assert!(copy.contains(key(1, HookKind::Setup)));
    }

    #[test]
    fn test_unregister_tile_clears_all_kinds() {
        let mut hooks = HookLists::default();
        hooks.register(key(3, HookKind::Income));
        hooks.register(key(3, HookKind::Pass));
        hooks.register(key(5, HookKind::Pass));
        hooks.unregister_tile(TileId::new(3));

        assert!(hooks.keys(HookKind::Income).is_empty());
        assert_eq!(hooks.keys(HookKind::Pass), &[key(5, HookKind::Pass)]);
    }
}
