//! Replay determinism.
//!
//! A config and an action log fully determine a game: replaying them
//! must land on the same state, whatever produced the log.

use std::sync::Arc;

use innovation_rules::core::{ActionId, ActionLog, EngineError, GameConfig, LogEntry, PhaseTag};
use innovation_rules::turn::{DecisionContext, DecisionSource, ExecutionMode, Game, NullSink};

fn config(players: usize, seed: u64) -> GameConfig {
    GameConfig::builder().player_count(players).seed(seed).build().unwrap()
}

fn finished(config: &GameConfig) -> Game {
    let mut game = Game::with_sink(config.clone(), Arc::new(NullSink)).unwrap();
    game.run(ExecutionMode::DefaultPolicy).unwrap();
    game
}

#[test]
fn test_same_seed_same_game() {
    let config = config(4, 2024);
    let a = finished(&config);
    let b = finished(&config);
    assert_eq!(a.log(), b.log());
    assert_eq!(a.ranking(), b.ranking());
}

#[test]
fn test_replay_reproduces_state() {
    for players in 3..=5 {
        let config = config(players, 500 + players as u64);
        let live = finished(&config);
        let replayed = Game::replay(config, live.log(), Arc::new(NullSink)).unwrap();

        assert!(replayed.is_finished());
        assert_eq!(replayed.ranking(), live.ranking());
        assert_eq!(replayed.state().board, live.state().board);
        assert_eq!(replayed.state().pool, live.state().pool);
        for player in live.state().player_ids() {
            assert_eq!(
                replayed.state().players[player].total_score(),
                live.state().players[player].total_score()
            );
        }
    }
}

#[test]
fn test_log_survives_serialization() {
    let config = config(3, 9);
    let live = finished(&config);

    let bytes = live.log().to_bytes().unwrap();
    let log = ActionLog::from_bytes(&bytes).unwrap();
    assert_eq!(&log, live.log());

    let json = serde_json::to_string(&config).unwrap();
    let config: GameConfig = serde_json::from_str(&json).unwrap();
    let replayed = Game::replay(config, &log, Arc::new(NullSink)).unwrap();
    assert_eq!(replayed.ranking(), live.ranking());
}

#[test]
fn test_rollback_by_truncation() {
    let config = config(3, 17);
    let live = finished(&config);
    let cut = live.log().len() / 2;

    let earlier = Game::replay(config.clone(), &live.log().prefix(cut), Arc::new(NullSink)).unwrap();
    assert_eq!(earlier.log().len(), cut);
    assert!(!earlier.is_finished());

    // Continuing the truncated game with the rest of the log rejoins it.
    let mut resumed = earlier.silent_copy();
    resumed.run(ExecutionMode::ScriptedReplay(live.log())).unwrap();
    assert_eq!(resumed.log(), live.log());
    assert_eq!(resumed.ranking(), live.ranking());
}

#[test]
fn test_mislabelled_entry_diverges() {
    let config = config(3, 23);
    let live = finished(&config);
    let mut entries: Vec<LogEntry> = live.log().iter().copied().collect();
    let index = 5;
    let flipped = match entries[index].tag {
        PhaseTag::Normal => PhaseTag::Immediate,
        PhaseTag::Immediate => PhaseTag::Normal,
    };
    entries[index] = LogEntry::new(entries[index].player, flipped, entries[index].id);
    let log: ActionLog = entries.into_iter().collect();

    let err = Game::replay(config, &log, Arc::new(NullSink)).unwrap_err();
    assert!(matches!(err, EngineError::ReplayDivergence { index: 5, .. }));
}

#[test]
fn test_illegal_id_in_log_is_fatal() {
    let config = config(3, 31);
    let live = finished(&config);
    let mut entries: Vec<LogEntry> = live.log().iter().copied().collect();
    let index = 7;
    entries[index] = LogEntry::new(entries[index].player, entries[index].tag, ActionId::new(u16::MAX));
    let log: ActionLog = entries.into_iter().collect();

    let err = Game::replay(config, &log, Arc::new(NullSink)).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, EngineError::ReplayIllegalAction { index: 7, .. }));
}

/// Takes the highest id outside the action phase, defers inside it.
#[derive(Default)]
struct HighestOutsideActions {
    answered: usize,
}

impl DecisionSource for HighestOutsideActions {
    fn get_decision(&mut self, legal: &[ActionId], context: &DecisionContext<'_>) -> Option<ActionId> {
        if context.tag == PhaseTag::Normal && context.phase == "action" {
            return None;
        }
        self.answered += 1;
        legal.last().copied()
    }
}

#[test]
fn test_interactive_game_replays_from_its_log() {
    let config = config(4, 37);
    let mut live = Game::with_sink(config.clone(), Arc::new(NullSink)).unwrap();
    let mut source = HighestOutsideActions::default();
    live.run(ExecutionMode::Interactive(&mut source)).unwrap();
    assert!(live.is_finished());
    assert!(source.answered > 0);

    let replayed = Game::replay(config, live.log(), Arc::new(NullSink)).unwrap();
    assert!(replayed.is_finished());
    assert_eq!(replayed.log(), live.log());
    assert_eq!(replayed.ranking(), live.ranking());
    assert_eq!(replayed.state().board, live.state().board);
}

#[test]
fn test_entries_after_the_end_are_rejected() {
    let config = config(3, 29);
    let live = finished(&config);
    let last = *live.log().get(live.log().len() - 1).unwrap();
    let log = live.log().extended([last]);

    let err = Game::replay(config, &log, Arc::new(NullSink)).unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}
