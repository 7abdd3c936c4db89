//! Turn order: the cyclic active queue, the pass queue, and the fixed
//! orders of the draft and the setup build.

use serde::{Deserialize, Serialize};

use crate::catalog::SetupBuildStep;
use crate::core::{EngineError, EngineResult, PlayerId};
use crate::tiles::{SetupStyle, TileKind};

/// Who acts next during the action phase.
///
/// `active` cycles; a passing player moves to the back of `passed`. The
/// two queues always partition the seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    active: Vec<PlayerId>,
    passed: Vec<PlayerId>,
    cursor: usize,
}

impl TurnOrder {
    /// First round order: the seating.
    #[must_use]
    pub fn new(seating: &[PlayerId]) -> Self {
        Self {
            active: seating.to_vec(),
            passed: Vec::new(),
            cursor: 0,
        }
    }

    /// Player whose turn it is; `None` once everyone passed.
    #[must_use]
    pub fn current(&self) -> Option<PlayerId> {
        self.active.get(self.cursor).copied()
    }

    #[must_use]
    pub fn active(&self) -> &[PlayerId] {
        &self.active
    }

    /// Players in the order they passed.
    #[must_use]
    pub fn passed(&self) -> &[PlayerId] {
        &self.passed
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.active.is_empty()
    }

    /// Hand the turn to the next active player.
    pub fn end_turn(&mut self) {
        if !self.active.is_empty() {
            self.cursor = (self.cursor + 1) % self.active.len();
        }
    }

    /// Move `player` from the active to the passed queue.
    pub fn pass(&mut self, player: PlayerId) -> EngineResult<()> {
        let index = self
            .active
            .iter()
            .position(|&p| p == player)
            .ok_or_else(|| EngineError::InternalConsistency(format!("{player} is not active")))?;
        self.active.remove(index);
        self.passed.push(player);

        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.active.len() {
            self.cursor = 0;
        }
        Ok(())
    }

    /// Next round acts in this round's pass order.
    pub fn new_round(&mut self) {
        self.active = std::mem::take(&mut self.passed);
        self.cursor = 0;
    }

    /// Whether `active` and `passed` partition seats `0..player_count`.
    #[must_use]
    pub fn is_partition(&self, player_count: usize) -> bool {
        let mut all: Vec<usize> = self
            .active
            .iter()
            .chain(&self.passed)
            .map(|p| p.index())
            .collect();
        all.sort_unstable();
        all == (0..player_count).collect::<Vec<_>>()
    }
}

/// Draft picks in order: home cards forward, factions in reverse, palace
/// tiles forward, boosters in reverse.
#[must_use]
pub fn draft_picks(seating: &[PlayerId]) -> Vec<(PlayerId, TileKind)> {
    let forward = || seating.iter().copied();
    let sub_rounds: [(TileKind, bool); 4] = [
        (TileKind::HomeCard, false),
        (TileKind::Faction, true),
        (TileKind::PalaceTile, false),
        (TileKind::Booster, true),
    ];

    let mut picks = Vec::with_capacity(seating.len() * 4);
    for (kind, reverse) in sub_rounds {
        if reverse {
            picks.extend(forward().rev().map(|p| (p, kind)));
        } else {
            picks.extend(forward().map(|p| (p, kind)));
        }
    }
    picks
}

/// Setup build sequence.
///
/// Standard players build once going forward and once in reverse. A `Late`
/// player reserves a cell in its forward slot, skips the reverse pass and
/// builds on the reserved cell at the very end. An `Extra` player builds a
/// third workshop after the reverse pass, before any `Late` player.
///
/// ```
/// use innovation_rules::catalog::SetupBuildStep::*;
/// use innovation_rules::core::PlayerId;
/// use innovation_rules::tiles::SetupStyle;
/// use innovation_rules::turn::setup_build_steps;
///
/// let seats = [PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)];
/// let steps = setup_build_steps(&seats, |_| SetupStyle::Standard);
/// let order: Vec<_> = steps.iter().map(|(p, _)| p.0).collect();
/// assert_eq!(order, vec![0, 1, 2, 2, 1, 0]);
/// assert!(steps.iter().all(|(_, s)| *s == Workshop));
/// ```
pub fn setup_build_steps(
    seating: &[PlayerId],
    style: impl Fn(PlayerId) -> SetupStyle,
) -> Vec<(PlayerId, SetupBuildStep)> {
    let mut steps = Vec::with_capacity(seating.len() * 2 + 2);

    for &p in seating {
        let step = match style(p) {
            SetupStyle::Late => SetupBuildStep::Reserve,
            _ => SetupBuildStep::Workshop,
        };
        steps.push((p, step));
    }
    for &p in seating.iter().rev() {
        if style(p) != SetupStyle::Late {
            steps.push((p, SetupBuildStep::Workshop));
        }
    }
    for &p in seating {
        if style(p) == SetupStyle::Extra {
            steps.push((p, SetupBuildStep::Workshop));
        }
    }
    for &p in seating {
        if style(p) == SetupStyle::Late {
            steps.push((p, SetupBuildStep::BuildReserved));
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use SetupBuildStep::*;

    fn seats(n: u8) -> Vec<PlayerId> {
        (0..n).map(PlayerId::new).collect()
    }

    fn ids(steps: &[(PlayerId, SetupBuildStep)]) -> Vec<(u8, SetupBuildStep)> {
        steps.iter().map(|(p, s)| (p.0, *s)).collect()
    }

    #[test]
    fn test_cycle_and_pass() {
        let mut order = TurnOrder::new(&seats(3));
        assert_eq!(order.current(), Some(PlayerId::new(0)));
        order.end_turn();
        assert_eq!(order.current(), Some(PlayerId::new(1)));

        order.pass(PlayerId::new(1)).unwrap();
        assert_eq!(order.current(), Some(PlayerId::new(2)));
        order.end_turn();
        assert_eq!(order.current(), Some(PlayerId::new(0)));
        assert!(order.is_partition(3));

        order.pass(PlayerId::new(0)).unwrap();
        assert_eq!(order.current(), Some(PlayerId::new(2)));
        order.pass(PlayerId::new(2)).unwrap();
        assert!(order.is_round_over());
        assert_eq!(order.current(), None);
        assert_eq!(order.passed(), &[PlayerId::new(1), PlayerId::new(0), PlayerId::new(2)]);

        order.new_round();
        assert_eq!(order.active(), &[PlayerId::new(1), PlayerId::new(0), PlayerId::new(2)]);
        assert!(order.passed().is_empty());
        assert!(order.is_partition(3));
    }

    #[test]
    fn test_last_seat_passing_wraps_cursor() {
        let mut order = TurnOrder::new(&seats(3));
        order.end_turn();
        order.end_turn();
        order.pass(PlayerId::new(2)).unwrap();
        assert_eq!(order.current(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_passing_twice_is_fatal() {
        let mut order = TurnOrder::new(&seats(3));
        order.pass(PlayerId::new(0)).unwrap();
        assert!(order.pass(PlayerId::new(0)).is_err());
    }

    #[test]
    fn test_draft_snake() {
        let picks = draft_picks(&seats(3));
        let order: Vec<u8> = picks.iter().map(|(p, _)| p.0).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0, 0, 1, 2, 2, 1, 0]);
        assert_eq!(picks[3].1, TileKind::Faction);
        assert_eq!(picks[11].1, TileKind::Booster);
    }

    #[test]
    fn test_setup_with_extra_only() {
        let steps = setup_build_steps(&seats(3), |p| {
            if p.0 == 1 {
                SetupStyle::Extra
            } else {
                SetupStyle::Standard
            }
        });
        assert_eq!(
            ids(&steps),
            vec![
                (0, Workshop),
                (1, Workshop),
                (2, Workshop),
                (2, Workshop),
                (1, Workshop),
                (0, Workshop),
                (1, Workshop),
            ]
        );
    }

    #[test]
    fn test_setup_with_late_only() {
        let steps = setup_build_steps(&seats(3), |p| {
            if p.0 == 0 {
                SetupStyle::Late
            } else {
                SetupStyle::Standard
            }
        });
        assert_eq!(
            ids(&steps),
            vec![
                (0, Reserve),
                (1, Workshop),
                (2, Workshop),
                (2, Workshop),
                (1, Workshop),
                (0, BuildReserved),
            ]
        );
    }

    #[test]
    fn test_setup_with_late_and_extra() {
        let steps = setup_build_steps(&seats(4), |p| match p.0 {
            1 => SetupStyle::Late,
            3 => SetupStyle::Extra,
            _ => SetupStyle::Standard,
        });
        assert_eq!(
            ids(&steps),
            vec![
                (0, Workshop),
                (1, Reserve),
                (2, Workshop),
                (3, Workshop),
                (3, Workshop),
                (2, Workshop),
                (0, Workshop),
                (3, Workshop),
                (1, BuildReserved),
            ]
        );
    }
}
