//! The game driver.
//!
//! `Game` owns the state, the stage machine, the turn order, the pending
//! interrupt and the action log. It is always left settled: either at a
//! decision point with a non-empty legal set, or finished. Everything
//! between decisions (setup hooks, income, round-end rewards, final
//! scoring) runs inside `advance`.
//!
//! ## Example
//!
//! ```
//! use innovation_rules::core::GameConfig;
//! use innovation_rules::turn::{ExecutionMode, Game};
//!
//! let config = GameConfig::builder().player_count(3).seed(11).build().unwrap();
//! let mut game = Game::new(config.clone()).unwrap();
//! game.run(ExecutionMode::DefaultPolicy).unwrap();
//! assert!(game.is_finished());
//!
//! // Same config + same log = same game.
//! let again = Game::replay(config, game.log(), game.sink()).unwrap();
//! assert_eq!(again.ranking(), game.ranking());
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::catalog::{choice_for, decode, execute, legal_actions, CatalogEntry, LegalityMode, PhaseView, TurnSignal};
use crate::core::{
    ActionId, ActionLog, EngineError, EngineResult, GameConfig, GameRng, GameState, LogEntry, PhaseTag, PlayerId,
};
use crate::effects::ownership::fire_hook;
use crate::effects::{Choice, Effect, EffectResolver, Interrupt, Resolution};
use crate::tiles::{HookKind, SetupStyle};

use super::decision::{DecisionContext, DecisionSource, DefaultPolicy, ExecutionMode};
use super::interrupt::InterruptSlot;
use super::order::{draft_picks, setup_build_steps, TurnOrder};
use super::phase::{IncomeSource, Stage};
use super::present::{NullSink, PresentationSink, Style, TracingSink};
use super::scoring::{final_scoring, rank, DefaultRanking, RankingComparator, Standing};

/// A pending decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionPoint {
    pub player: PlayerId,
    pub tag: PhaseTag,
    /// Sorted, never empty.
    pub legal: Vec<ActionId>,
}

/// A game in progress.
#[derive(Clone)]
pub struct Game {
    config: Arc<GameConfig>,
    state: GameState,
    stage: Stage,
    order: TurnOrder,
    pending: InterruptSlot,
    log: ActionLog,
    policy: DefaultPolicy,
    sink: Arc<dyn PresentationSink>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("stage", &self.stage)
            .field("round", &self.state.round)
            .field("order", &self.order)
            .field("pending", &self.pending)
            .field("log_len", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Start a game narrated through `tracing`.
    pub fn new(config: impl Into<Arc<GameConfig>>) -> EngineResult<Self> {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Start a game with an explicit presentation sink.
    #[instrument(level = "debug", skip_all)]
    pub fn with_sink(
        config: impl Into<Arc<GameConfig>>,
        sink: Arc<dyn PresentationSink>,
    ) -> EngineResult<Self> {
        let config: Arc<GameConfig> = config.into();
        config.validate()?;
        let state = GameState::new(&config)?;
        let policy = DefaultPolicy::new(GameRng::new(config.seed).for_context("policy"));

        let mut game = Self {
            stage: Stage::Draft {
                picks: draft_picks(&config.seating),
                cursor: 0,
            },
            order: TurnOrder::new(&config.seating),
            pending: InterruptSlot::new(),
            log: ActionLog::new(),
            state,
            policy,
            sink,
            config,
        };
        info!(players = game.config.player_count, seed = game.config.seed, "game created");
        game.sink.update_phase(game.stage.label());
        game.advance()?;
        Ok(game)
    }

    /// Rebuild a game from its config and log.
    pub fn replay(
        config: impl Into<Arc<GameConfig>>,
        log: &ActionLog,
        sink: Arc<dyn PresentationSink>,
    ) -> EngineResult<Self> {
        let mut game = Self::with_sink(config, sink)?;
        game.run(ExecutionMode::ScriptedReplay(log))?;
        Ok(game)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    #[must_use]
    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    #[must_use]
    pub fn pending(&self) -> Option<&Interrupt> {
        self.pending.get()
    }

    #[must_use]
    pub fn sink(&self) -> Arc<dyn PresentationSink> {
        Arc::clone(&self.sink)
    }

    #[must_use]
    pub fn phase(&self) -> &'static str {
        self.stage.label()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.stage.is_finished()
    }

    /// Replace the default policy's random stream.
    #[must_use]
    pub fn with_policy(mut self, policy: DefaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Copy that narrates nothing.
    #[must_use]
    pub fn silent_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.sink = Arc::new(NullSink);
        copy
    }

    // === Decisions ===

    /// Who decides next and how, without enumerating.
    fn mode(&self) -> Option<(PlayerId, PhaseTag, LegalityMode<'_>)> {
        if let Some(interrupt) = self.pending.get() {
            return Some((
                interrupt.player,
                PhaseTag::Immediate,
                LegalityMode::Immediate(interrupt),
            ));
        }
        let normal = |player: PlayerId, view: PhaseView| (player, PhaseTag::Normal, LegalityMode::Normal(view));
        match &self.stage {
            Stage::Draft { picks, cursor } => picks
                .get(*cursor)
                .map(|&(player, kind)| normal(player, PhaseView::Draft(kind))),
            Stage::SetupBuild { steps, cursor } => steps
                .get(*cursor)
                .map(|&(player, step)| normal(player, PhaseView::SetupBuild(step))),
            Stage::Action => self.order.current().map(|player| normal(player, PhaseView::Action)),
            _ => None,
        }
    }

    /// The current decision point; `None` once the game is over.
    #[must_use]
    pub fn decision_point(&self) -> Option<DecisionPoint> {
        let (player, tag, mode) = self.mode()?;
        Some(DecisionPoint {
            player,
            tag,
            legal: legal_actions(&self.state, player, mode),
        })
    }

    /// Apply one decision and run the game up to the next one.
    ///
    /// An id outside the legal set is rejected with `IllegalAction` and
    /// changes nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, id: ActionId) -> EngineResult<()> {
        let (player, tag, mode) = self
            .mode()
            .ok_or_else(|| EngineError::InternalConsistency("the game is over".into()))?;
        if legal_actions(&self.state, player, mode).binary_search(&id).is_err() {
            return Err(EngineError::IllegalAction { player, id });
        }
        let view = match mode {
            LegalityMode::Normal(view) => Some(view),
            LegalityMode::Immediate(_) => None,
        };

        let entry = decode(id)?;
        self.log.push(LogEntry::new(player, tag, id));
        debug!(%player, ?tag, ?entry, "applying");

        match view {
            Some(view) => self.execute_normal(player, view, entry)?,
            None => self.answer_interrupt(entry)?,
        }
        self.sink
            .notify("action", &format!("{player}: {entry:?}"), Style::Plain);
        self.advance()
    }

    /// Drive the game in `mode`.
    ///
    /// Interactive and default-policy runs go to the end of the game; a
    /// scripted replay stops when its log runs out.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&mut self, mode: ExecutionMode<'_>) -> EngineResult<()> {
        match mode {
            ExecutionMode::ScriptedReplay(log) => self.follow(log),
            ExecutionMode::Interactive(source) => self.drive(Some(source)),
            ExecutionMode::DefaultPolicy => self.drive(None),
        }
    }

    fn drive(&mut self, mut source: Option<&mut dyn DecisionSource>) -> EngineResult<()> {
        while let Some(point) = self.decision_point() {
            let picked = match source.as_deref_mut() {
                Some(source) => {
                    let context = DecisionContext {
                        state: &self.state,
                        player: point.player,
                        tag: point.tag,
                        request: self.pending.get().map(|i| &i.request),
                        phase: self.stage.label(),
                    };
                    match source.get_decision(&point.legal, &context) {
                        Some(id) if point.legal.binary_search(&id).is_ok() => Some(id),
                        other => {
                            warn!(player = %point.player, ?other, "falling back to default policy");
                            None
                        }
                    }
                }
                None => None,
            };
            let id = match picked {
                Some(id) => id,
                None => self.policy.choose(&point.legal).ok_or_else(|| {
                    EngineError::InternalConsistency(format!("{} has no legal action", point.player))
                })?,
            };
            self.apply(id)?;
        }
        Ok(())
    }

    /// Apply the entries of `log` past the game's own log.
    fn follow(&mut self, log: &ActionLog) -> EngineResult<()> {
        for index in self.log.len()..log.len() {
            let Some(&entry) = log.get(index) else {
                break;
            };
            let (player, tag, mode) = self.mode().ok_or_else(|| {
                EngineError::Configuration(format!("log entry {index} comes after the end of the game"))
            })?;
            if player != entry.player || tag != entry.tag {
                return Err(EngineError::ReplayDivergence {
                    index,
                    expected_player: player,
                    expected_tag: tag,
                    found_player: entry.player,
                    found_tag: entry.tag,
                });
            }
            // The log is authoritative: an illegal id is never re-prompted.
            if legal_actions(&self.state, player, mode).binary_search(&entry.id).is_err() {
                return Err(EngineError::ReplayIllegalAction {
                    index,
                    player,
                    id: entry.id,
                });
            }
            self.apply(entry.id)?;
        }
        Ok(())
    }

    fn execute_normal(&mut self, player: PlayerId, view: PhaseView, entry: CatalogEntry) -> EngineResult<()> {
        let outcome = execute(&mut self.state, player, view, entry)?;
        if let Stage::Draft { cursor, .. } | Stage::SetupBuild { cursor, .. } = &mut self.stage {
            *cursor += 1;
        }
        match outcome.signal {
            TurnSignal::Stay => {}
            TurnSignal::EndTurn => {
                self.state.players[player].main_action_done = false;
                self.order.end_turn();
            }
            TurnSignal::Passed => self.order.pass(player)?,
        }
        self.settle(outcome.resolution)
    }

    fn answer_interrupt(&mut self, entry: CatalogEntry) -> EngineResult<()> {
        let choice = choice_for(entry).ok_or_else(|| {
            EngineError::InternalConsistency(format!("{entry:?} does not answer an interrupt"))
        })?;
        let interrupt = self
            .pending
            .take()
            .ok_or_else(|| EngineError::InternalConsistency("no interrupt is pending".into()))?;
        let resolution = EffectResolver::resume(&mut self.state, interrupt, choice)?;
        self.settle(resolution)
    }

    // === Automatic progress ===

    fn settle(&mut self, resolution: Resolution) -> EngineResult<()> {
        match resolution {
            Resolution::Complete => Ok(()),
            Resolution::Suspended(interrupt) => self.pending.raise(interrupt),
        }
    }

    fn resolve(&mut self, player: PlayerId, effects: &[Effect]) -> EngineResult<()> {
        let resolution = EffectResolver::adjust(&mut self.state, player, effects)?;
        self.settle(resolution)
    }

    /// Run automatic work until a decision is due or the game ends.
    fn advance(&mut self) -> EngineResult<()> {
        loop {
            if let Some(interrupt) = self.pending.get() {
                let player = interrupt.player;
                if !legal_actions(&self.state, player, LegalityMode::Immediate(interrupt)).is_empty() {
                    return Ok(());
                }
                if let Some(interrupt) = self.pending.take() {
                    debug!(%player, request = ?interrupt.request, "no legal answer, skipping");
                    let resolution = EffectResolver::resume(&mut self.state, interrupt, Choice::Decline)?;
                    self.settle(resolution)?;
                }
                continue;
            }

            match &mut self.stage {
                Stage::Draft { picks, cursor } => {
                    if *cursor < picks.len() {
                        return Ok(());
                    }
                    self.begin_setup_hooks();
                }
                Stage::SetupHooks { queue } => match queue.pop_front() {
                    Some((player, key)) => {
                        let effects = fire_hook(&mut self.state, player, key)?;
                        self.resolve(player, &effects)?;
                    }
                    None => self.begin_setup_build(),
                },
                Stage::SetupBuild { steps, cursor } => match steps.get(*cursor).copied() {
                    Some((player, step)) => {
                        let mode = LegalityMode::Normal(PhaseView::SetupBuild(step));
                        if !legal_actions(&self.state, player, mode).is_empty() {
                            return Ok(());
                        }
                        debug!(%player, ?step, "no legal setup build, skipping");
                        *cursor += 1;
                    }
                    None => self.begin_round(),
                },
                Stage::Income { queue } => match queue.pop_front() {
                    Some((player, source)) => {
                        let effects = match source {
                            IncomeSource::Buildings => vec![Effect::BuildingIncome],
                            IncomeSource::Hook(key) => fire_hook(&mut self.state, player, key)?,
                        };
                        self.resolve(player, &effects)?;
                    }
                    None => self.enter(Stage::Action),
                },
                Stage::Action => {
                    if !self.order.is_round_over() {
                        return Ok(());
                    }
                    let queue = self.order.passed().iter().copied().collect();
                    self.enter(Stage::RoundEnd { queue });
                }
                Stage::RoundEnd { queue } => match queue.pop_front() {
                    Some(player) => {
                        let reward = self
                            .state
                            .current_scoring()
                            .map(|tile| tile.round_reward(self.state.players[player].track(tile.track)))
                            .unwrap_or_default();
                        self.resolve(player, &reward)?;
                    }
                    None => self.finish_round(),
                },
                Stage::Finished => return Ok(()),
            }
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        let label = self.stage.label();
        info!(round = self.state.round, phase = label, "entering phase");
        self.sink.update_phase(label);
    }

    fn begin_setup_hooks(&mut self) {
        let mut queue = VecDeque::new();
        for &player in &self.config.seating {
            for &key in self.state.players[player].hooks.keys(HookKind::Setup) {
                queue.push_back((player, key));
            }
        }
        self.enter(Stage::SetupHooks { queue });
    }

    fn begin_setup_build(&mut self) {
        let state = &self.state;
        let style = |player: PlayerId| {
            state.players[player]
                .faction
                .and_then(|tile| state.tiles.get(tile))
                .map_or(SetupStyle::Standard, |def| def.setup_style)
        };
        let steps = setup_build_steps(&self.config.seating, style);
        self.enter(Stage::SetupBuild { steps, cursor: 0 });
    }

    fn begin_round(&mut self) {
        self.state.round += 1;
        for (_, ledger) in self.state.players.iter_mut() {
            ledger.main_action_done = false;
            ledger.has_passed = false;
        }
        self.sink.update_round(self.state.round);

        let mut queue = VecDeque::new();
        for &player in self.order.active() {
            queue.push_back((player, IncomeSource::Buildings));
            for &key in self.state.players[player].hooks.keys(HookKind::Income) {
                queue.push_back((player, IncomeSource::Hook(key)));
            }
        }
        self.enter(Stage::Income { queue });
    }

    fn finish_round(&mut self) {
        self.state.reset_round_spots();
        self.state.accrue_booster_coins();
        self.order.new_round();

        if self.state.is_final_round() {
            final_scoring(&mut self.state);
            self.enter(Stage::Finished);
            if let Some(best) = self.ranking().first() {
                self.sink.notify(
                    "result",
                    &format!("{} wins with {} points", best.player, best.total),
                    Style::Emphasis,
                );
            }
        } else {
            self.begin_round();
        }
    }

    // === Results ===

    /// Standings by total score, ties to the earlier seat.
    #[must_use]
    pub fn ranking(&self) -> Vec<Standing> {
        self.ranking_with(&DefaultRanking)
    }

    /// Standings under a custom comparator.
    #[must_use]
    pub fn ranking_with(&self, comparator: &dyn RankingComparator) -> Vec<Standing> {
        rank(&self.state, &self.config.seating, comparator)
    }
}
