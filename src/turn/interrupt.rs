//! The single pending-interrupt slot.

use tracing::debug;

use crate::core::{EngineError, EngineResult};
use crate::effects::Interrupt;

/// Holds at most one unserviced interrupt.
///
/// Raising a second one while the first is pending is an ordering fault.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterruptSlot {
    pending: Option<Interrupt>,
}

impl InterruptSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an interrupt.
    pub fn raise(&mut self, interrupt: Interrupt) -> EngineResult<()> {
        if let Some(pending) = &self.pending {
            return Err(EngineError::InterruptOverflow {
                pending: pending.player,
                raised: interrupt.player,
            });
        }
        debug!(player = %interrupt.player, request = ?interrupt.request, "interrupt pending");
        self.pending = Some(interrupt);
        Ok(())
    }

    /// Remove the pending interrupt for servicing.
    pub fn take(&mut self) -> Option<Interrupt> {
        self.pending.take()
    }

    #[must_use]
    pub fn get(&self) -> Option<&Interrupt> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::effects::DecisionRequest;

    fn interrupt(p: u8) -> Interrupt {
        Interrupt {
            player: PlayerId::new(p),
            request: DecisionRequest::TrackSplit { total: 1 },
            continuation: vec![],
        }
    }

    #[test]
    fn test_second_raise_overflows() {
        let mut slot = InterruptSlot::new();
        slot.raise(interrupt(0)).unwrap();
        let err = slot.raise(interrupt(2)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InterruptOverflow {
                pending: PlayerId::new(0),
                raised: PlayerId::new(2),
            }
        );
        // The original is untouched.
        assert_eq!(slot.get().map(|i| i.player), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_take_frees_the_slot() {
        let mut slot = InterruptSlot::new();
        slot.raise(interrupt(1)).unwrap();
        assert!(slot.take().is_some());
        assert!(!slot.is_pending());
        slot.raise(interrupt(1)).unwrap();
    }
}
