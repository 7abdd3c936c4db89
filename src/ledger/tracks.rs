//! The shared discipline race board: crowns and worker slots.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

use super::resources::Discipline;

/// Advance granted by each worker slot, in fill order.
pub const SLOT_MAGNITUDES: [u8; 4] = [3, 2, 2, 2];
/// Advance once every slot of a track is taken.
pub const OVERFLOW_MAGNITUDE: u8 = 1;

/// Crowns and worker slots of all four tracks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackBoard {
    crowned_by: [Option<PlayerId>; 4],
    slots: [[Option<PlayerId>; 4]; 4],
}

impl TrackBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Who reached level 12 first, if anyone.
    #[must_use]
    pub fn crowned_by(&self, track: Discipline) -> Option<PlayerId> {
        self.crowned_by[track.index()]
    }

    /// Record the crown. Only the first crowning sticks.
    pub fn crown(&mut self, track: Discipline, player: PlayerId) {
        self.crowned_by[track.index()].get_or_insert(player);
    }

    /// Whether someone other than `player` holds the crown.
    #[must_use]
    pub fn crowned_by_other(&self, track: Discipline, player: PlayerId) -> bool {
        self.crowned_by(track).is_some_and(|p| p != player)
    }

    /// First open slot of a track and its magnitude.
    #[must_use]
    pub fn open_slot(&self, track: Discipline) -> Option<(usize, u8)> {
        self.slots[track.index()]
            .iter()
            .position(Option::is_none)
            .map(|i| (i, SLOT_MAGNITUDES[i]))
    }

    /// Magnitude the next worker sent to `track` would get.
    #[must_use]
    pub fn next_magnitude(&self, track: Discipline) -> u8 {
        self.open_slot(track).map_or(OVERFLOW_MAGNITUDE, |(_, m)| m)
    }

    /// Occupy the first open slot (if any) and return the granted magnitude.
    pub fn insert_worker(&mut self, track: Discipline, player: PlayerId) -> u8 {
        match self.open_slot(track) {
            Some((idx, magnitude)) => {
                self.slots[track.index()][idx] = Some(player);
                magnitude
            }
            None => OVERFLOW_MAGNITUDE,
        }
    }

    /// Slot occupants of a track.
    #[must_use]
    pub fn slots(&self, track: Discipline) -> &[Option<PlayerId>; 4] {
        &self.slots[track.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_magnitudes_decrease() {
        let mut board = TrackBoard::new();
        let p = PlayerId::new(0);
        let got: Vec<u8> = (0..6).map(|_| board.insert_worker(Discipline::Law, p)).collect();
        assert_eq!(got, vec![3, 2, 2, 2, 1, 1]);
        assert_eq!(board.next_magnitude(Discipline::Law), OVERFLOW_MAGNITUDE);
        assert_eq!(board.next_magnitude(Discipline::Banking), 3);
    }

    #[test]
    fn test_first_crown_sticks() {
        let mut board = TrackBoard::new();
        board.crown(Discipline::Medicine, PlayerId::new(2));
        board.crown(Discipline::Medicine, PlayerId::new(0));
        assert_eq!(board.crowned_by(Discipline::Medicine), Some(PlayerId::new(2)));
        assert!(board.crowned_by_other(Discipline::Medicine, PlayerId::new(0)));
        assert!(!board.crowned_by_other(Discipline::Medicine, PlayerId::new(2)));
    }
}
