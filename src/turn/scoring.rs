//! Final scoring and ranking.
//!
//! ## Final scoring
//!
//! - Track majorities: 8 / 4 / 2 per track.
//! - Largest connected area: 18 / 12 / 6.
//! - Leftover resources: one point per three of coins, ore, workers and
//!   books together.
//!
//! Only players above zero compete for a majority. Tied players share the
//! prizes of the places they occupy, rounded down.

use std::cmp::Ordering;

use tracing::debug;

use crate::core::{GameState, PlayerId};
use crate::ledger::{Discipline, ScoreBucket};

pub const TRACK_PRIZES: [u32; 3] = [8, 4, 2];
pub const AREA_PRIZES: [u32; 3] = [18, 12, 6];

/// Split `prizes` among `values` by descending value.
#[must_use]
pub fn award_majority(values: &[(PlayerId, u32)], prizes: [u32; 3]) -> Vec<(PlayerId, u32)> {
    let mut contenders: Vec<(PlayerId, u32)> = values.iter().copied().filter(|&(_, v)| v > 0).collect();
    contenders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut awards = Vec::new();
    let mut place = 0;
    for group in contenders.chunk_by(|a, b| a.1 == b.1) {
        let pot: u32 = prizes.iter().skip(place).take(group.len()).sum();
        let share = pot / group.len() as u32;
        if share > 0 {
            awards.extend(group.iter().map(|&(p, _)| (p, share)));
        }
        place += group.len();
    }
    awards
}

/// Apply final scoring to every player.
pub fn final_scoring(state: &mut GameState) {
    let players: Vec<PlayerId> = state.player_ids().collect();

    for track in Discipline::ALL {
        let levels: Vec<(PlayerId, u32)> = players
            .iter()
            .map(|&p| (p, u32::from(state.players[p].track(track))))
            .collect();
        for (p, points) in award_majority(&levels, TRACK_PRIZES) {
            state.players[p].add_score(ScoreBucket::Tracks, points);
        }
    }

    let areas: Vec<(PlayerId, u32)> = players
        .iter()
        .map(|&p| (p, state.board.largest_area(p) as u32))
        .collect();
    for (p, points) in award_majority(&areas, AREA_PRIZES) {
        state.players[p].add_score(ScoreBucket::Area, points);
    }

    for &p in &players {
        let ledger = &mut state.players[p];
        let leftover = ledger.coins + ledger.ore + ledger.workers + ledger.total_books();
        ledger.add_score(ScoreBucket::Resources, leftover / 3);
        debug!(player = %p, total = ledger.total_score(), "final score");
    }
}

/// One line of the ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub total: u32,
    /// Position in the seating order.
    pub seat: usize,
}

/// Orders standings, best first.
pub trait RankingComparator {
    fn compare(&self, a: &Standing, b: &Standing) -> Ordering;
}

impl<F> RankingComparator for F
where
    F: Fn(&Standing, &Standing) -> Ordering,
{
    fn compare(&self, a: &Standing, b: &Standing) -> Ordering {
        self(a, b)
    }
}

/// Highest total first; ties go to the earlier seat.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRanking;

impl RankingComparator for DefaultRanking {
    fn compare(&self, a: &Standing, b: &Standing) -> Ordering {
        b.total.cmp(&a.total).then(a.seat.cmp(&b.seat))
    }
}

/// Current standings sorted by `comparator`.
#[must_use]
pub fn rank(state: &GameState, seating: &[PlayerId], comparator: &dyn RankingComparator) -> Vec<Standing> {
    let mut standings: Vec<Standing> = seating
        .iter()
        .enumerate()
        .map(|(seat, &player)| Standing {
            player,
            total: state.players[player].total_score(),
            seat,
        })
        .collect();
    standings.sort_by(|a, b| comparator.compare(a, b));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_majority_without_ties() {
        let awards = award_majority(&[(p(0), 3), (p(1), 9), (p(2), 5), (p(3), 1)], TRACK_PRIZES);
        assert_eq!(awards, vec![(p(1), 8), (p(2), 4), (p(0), 2)]);
    }

    #[test]
    fn test_tie_for_first_splits_rounding_down() {
        let awards = award_majority(&[(p(0), 4), (p(1), 4), (p(2), 2)], TRACK_PRIZES);
        // (8 + 4) / 2 = 6 each, third place gets 2.
        assert_eq!(awards, vec![(p(0), 6), (p(1), 6), (p(2), 2)]);

        let awards = award_majority(&[(p(0), 4), (p(1), 4), (p(2), 4)], AREA_PRIZES);
        assert_eq!(awards, vec![(p(0), 12), (p(1), 12), (p(2), 12)]);

        let awards = award_majority(&[(p(0), 9), (p(1), 4), (p(2), 4), (p(3), 4)], TRACK_PRIZES);
        // 4 + 2 + 0 over three players.
        assert_eq!(awards, vec![(p(0), 8), (p(1), 2), (p(2), 2), (p(3), 2)]);
    }

    #[test]
    fn test_zero_does_not_compete() {
        let awards = award_majority(&[(p(0), 0), (p(1), 0)], TRACK_PRIZES);
        assert!(awards.is_empty());
    }

    #[test]
    fn test_leftover_resources() {
        let mut state = GameState::for_tests(3);
        let player = p(0);
        state.players[player].coins = 7;
        state.players[player].ore = 1;
        state.players[player].books = [1, 0, 0, 0];
        let before = state.players[player].score(ScoreBucket::Resources);
        final_scoring(&mut state);
        assert_eq!(state.players[player].score(ScoreBucket::Resources) - before, 3);
    }

    #[test]
    fn test_default_ranking_breaks_ties_by_seat() {
        let mut state = GameState::for_tests(3);
        state.players[p(2)].add_score(ScoreBucket::Round, 4);
        let seating = [p(1), p(2), p(0)];
        let standings = rank(&state, &seating, &DefaultRanking);
        let order: Vec<PlayerId> = standings.iter().map(|s| s.player).collect();
        assert_eq!(order, vec![p(2), p(1), p(0)]);
    }

    #[test]
    fn test_closure_comparator() {
        let state = GameState::for_tests(3);
        let seating = [p(0), p(1), p(2)];
        let reverse_seat = |a: &Standing, b: &Standing| b.seat.cmp(&a.seat);
        let standings = rank(&state, &seating, &reverse_seat);
        assert_eq!(standings[0].player, p(2));
    }
}
