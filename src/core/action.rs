//! Action ids and the replayable action log.
//!
//! An action is a bare integer id into the action catalog. The log of
//! `(player, phase tag, id)` triples is the only artifact needed to rebuild
//! a game: same config + same log = same game.
//!
//! The log is an `im::Vector`, so look-ahead clones copy it in O(1) and
//! extend their copy without touching the live game's log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::player::PlayerId;

/// An integer id in the action catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u16);

impl ActionId {
    /// Create a new action ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a decision was a regular turn or an immediate sub-decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseTag {
    Normal,
    Immediate,
}

/// One recorded decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntry {
    pub player: PlayerId,
    pub tag: PhaseTag,
    pub id: ActionId,
}

impl LogEntry {
    #[must_use]
    pub fn new(player: PlayerId, tag: PhaseTag, id: ActionId) -> Self {
        Self { player, tag, id }
    }
}

/// Append-only sequence of decisions.
///
/// ```
/// use innovation_rules::core::{ActionId, ActionLog, LogEntry, PhaseTag, PlayerId};
///
/// let mut live = ActionLog::new();
/// live.push(LogEntry::new(PlayerId::new(0), PhaseTag::Normal, ActionId::new(741)));
///
/// let probe = live.extended([LogEntry::new(PlayerId::new(1), PhaseTag::Normal, ActionId::new(742))]);
/// assert_eq!(live.len(), 1);
/// assert_eq!(probe.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: Vector<LogEntry>,
}

impl ActionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decision.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
    }

    /// Number of recorded decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Iterate entries front to back.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Copy of the first `len` entries.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            entries: self.entries.take(len.min(self.entries.len())),
        }
    }

    /// Copy of this log with `suffix` appended. `self` is untouched.
    #[must_use]
    pub fn extended(&self, suffix: impl IntoIterator<Item = LogEntry>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(suffix);
        Self { entries }
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        let flat: Vec<LogEntry> = self.entries.iter().copied().collect();
        bincode::serialize(&flat)
            .map_err(|e| EngineError::Configuration(format!("cannot encode action log: {e}")))
    }

    /// Decode a log produced by [`ActionLog::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        let flat: Vec<LogEntry> = bincode::deserialize(bytes)
            .map_err(|e| EngineError::Configuration(format!("cannot decode action log: {e}")))?;
        Ok(flat.into_iter().collect())
    }
}

impl FromIterator<LogEntry> for ActionLog {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
