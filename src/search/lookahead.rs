//! Replay-based look-ahead.
//!
//! Every hypothetical game is a new engine rebuilt from the live game's
//! config and log plus a suffix, run in scripted-replay mode. The live
//! game is never cloned or touched.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{ActionId, ActionLog, EngineResult, GameRng, LogEntry, PlayerId};
use crate::rules::RulesEngine;
use crate::turn::{DecisionPoint, DefaultPolicy, ExecutionMode, Game, NullSink, Standing};

use super::config::LookAheadConfig;

/// What a replayed suffix leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeekOutcome {
    /// The next decision after the suffix.
    Decision(DecisionPoint),
    /// The suffix ends the game.
    Finished(Vec<Standing>),
}

/// Rollout statistics of one candidate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateScore {
    pub id: ActionId,
    /// Mean of (own total - best opponent total) at game end.
    pub mean_margin: f64,
    pub rollouts: u32,
}

/// Look-ahead context.
///
/// Owns the configuration and the root random stream; every rollout gets
/// its own fork.
#[derive(Clone, Debug)]
pub struct LookAhead {
    config: LookAheadConfig,
    rng: GameRng,
}

impl LookAhead {
    #[must_use]
    pub fn new(config: LookAheadConfig) -> Self {
        let rng = GameRng::new(config.seed).for_context("lookahead");
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &LookAheadConfig {
        &self.config
    }

    /// Rebuild `game` from its config and `log`, silently.
    fn rebuild(game: &Game, log: &ActionLog) -> EngineResult<Game> {
        Game::replay(Arc::clone(game.config()), log, Arc::new(NullSink))
    }

    /// Replay `game`'s log extended by `suffix` in a new engine.
    ///
    /// `None` means no information: the suffix is longer than the
    /// configured depth, names the wrong player or phase, or is illegal.
    #[must_use]
    pub fn peek(&self, game: &Game, suffix: &[LogEntry]) -> Option<PeekOutcome> {
        if suffix.len() > self.config.depth {
            return None;
        }
        let log = game.log().extended(suffix.iter().copied());
        let replayed = match Self::rebuild(game, &log) {
            Ok(replayed) => replayed,
            Err(err) => {
                trace!(%err, "suffix diverged");
                return None;
            }
        };
        Some(match RulesEngine::decision_point(&replayed) {
            Some(point) => PeekOutcome::Decision(point),
            None => PeekOutcome::Finished(RulesEngine::ranking(&replayed)),
        })
    }

    /// Score every legal id of the pending decision by rollouts.
    ///
    /// Each rollout replays the candidate's log in a new engine and plays
    /// on with a forked default policy. Empty once the game is over.
    pub fn evaluate(&mut self, game: &Game) -> Vec<CandidateScore> {
        let Some(point) = RulesEngine::decision_point(game) else {
            return Vec::new();
        };
        let searcher = point.player;

        let mut scores = Vec::with_capacity(point.legal.len());
        for &id in &point.legal {
            let log = game
                .log()
                .extended([LogEntry::new(point.player, point.tag, id)]);

            let mut total = 0i64;
            let mut played = 0u32;
            for _ in 0..self.config.rollouts {
                let policy = DefaultPolicy::new(self.rng.fork());
                let finished = Self::rebuild(game, &log).and_then(|rollout| {
                    let mut rollout = rollout.with_policy(policy);
                    rollout.run(ExecutionMode::DefaultPolicy)?;
                    Ok(rollout)
                });
                match finished {
                    Ok(rollout) => {
                        total += margin(&RulesEngine::ranking(&rollout), searcher);
                        played += 1;
                    }
                    Err(err) => trace!(%id, %err, "rollout failed"),
                }
            }
            if played == 0 {
                continue;
            }

            let mean_margin = total as f64 / f64::from(played);
            debug!(%id, mean_margin, played, "candidate scored");
            scores.push(CandidateScore {
                id,
                mean_margin,
                rollouts: played,
            });
        }
        scores
    }

    /// The candidate with the best mean margin; ties go to the lower id.
    pub fn best_action(&mut self, game: &Game) -> Option<ActionId> {
        let mut best: Option<CandidateScore> = None;
        for score in self.evaluate(game) {
            if best.is_none_or(|b| score.mean_margin > b.mean_margin) {
                best = Some(score);
            }
        }
        best.map(|s| s.id)
    }
}

/// Own total minus the best opponent total.
fn margin(standings: &[Standing], player: PlayerId) -> i64 {
    let own = standings
        .iter()
        .find(|s| s.player == player)
        .map_or(0, |s| i64::from(s.total));
    let rival = standings
        .iter()
        .filter(|s| s.player != player)
        .map(|s| i64::from(s.total))
        .max()
        .unwrap_or(0);
    own - rival
}
