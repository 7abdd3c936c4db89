//! Decision sources and execution modes.
//!
//! The driver asks a `DecisionSource` exactly once per decision point. A
//! source that returns `None`, or an id outside the legal set, is replaced
//! by the `DefaultPolicy` for that decision.

use crate::catalog::ids::{DECLINE, END_TURN};
use crate::core::{ActionId, ActionLog, GameRng, GameState, PhaseTag, PlayerId};
use crate::effects::DecisionRequest;

/// What a decision source sees besides the legal ids.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub state: &'a GameState,
    pub player: PlayerId,
    pub tag: PhaseTag,
    /// The pending request, for immediate decisions.
    pub request: Option<&'a DecisionRequest>,
    pub phase: &'static str,
}

/// Something that picks actions: a UI, a network peer, a bot.
pub trait DecisionSource {
    /// Pick one of `legal`, or `None` to defer to the default policy.
    fn get_decision(&mut self, legal: &[ActionId], context: &DecisionContext<'_>) -> Option<ActionId>;
}

/// How `Game::run` obtains decisions.
pub enum ExecutionMode<'a> {
    /// Ask a source, falling back to the default policy.
    Interactive(&'a mut dyn DecisionSource),
    /// Follow a recorded log; stop when it runs out.
    ScriptedReplay(&'a ActionLog),
    /// Default policy for every seat.
    DefaultPolicy,
}

/// Seeded no-frills policy.
///
/// Ends the turn and declines optional decisions whenever it may;
/// otherwise picks uniformly. Passing gets no preference: it is legal at
/// the start of every turn, so preferring it would end each round at once.
#[derive(Clone, Debug)]
pub struct DefaultPolicy {
    rng: GameRng,
}

impl DefaultPolicy {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Pick from a sorted legal set.
    pub fn choose(&mut self, legal: &[ActionId]) -> Option<ActionId> {
        for preferred in [ActionId::new(END_TURN), ActionId::new(DECLINE)] {
            if legal.binary_search(&preferred).is_ok() {
                return Some(preferred);
            }
        }
        self.rng.choose(legal).copied()
    }
}

impl DecisionSource for DefaultPolicy {
    fn get_decision(&mut self, legal: &[ActionId], _context: &DecisionContext<'_>) -> Option<ActionId> {
        self.choose(legal)
    }
}
