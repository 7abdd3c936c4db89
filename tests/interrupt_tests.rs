//! Interrupt protocol: suspension, answering through the catalog, and
//! the single pending slot.

use std::sync::Arc;

use innovation_rules::catalog::{choice_for, decode, legal_actions, CatalogEntry, LegalityMode};
use innovation_rules::core::{EngineError, GameConfig, GameState, PhaseTag, PlayerId};
use innovation_rules::effects::{BookDirection, DecisionRequest, Effect, EffectResolver, Interrupt, Resolution};
use innovation_rules::turn::{Game, InterruptSlot, NullSink};

fn state() -> GameState {
    let config = GameConfig::builder().player_count(3).seed(1).build().unwrap();
    GameState::new(&config).unwrap()
}

fn suspended(resolution: Resolution) -> Interrupt {
    match resolution {
        Resolution::Suspended(interrupt) => interrupt,
        Resolution::Complete => panic!("expected an interrupt"),
    }
}

#[test]
fn test_book_split_answered_through_catalog() {
    let mut s = state();
    let p = PlayerId::new(1);
    let coins = s.players[p].coins;
    let books = s.players[p].total_books();

    let interrupt = suspended(
        EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(2), Effect::coins(1)]).unwrap(),
    );
    assert_eq!(
        interrupt.request,
        DecisionRequest::BookSplit {
            total: 2,
            direction: BookDirection::Gain
        }
    );
    assert_eq!(interrupt.continuation, vec![Effect::coins(1)]);
    // Nothing after the interrupt has run yet.
    assert_eq!(s.players[p].coins, coins);

    let legal = legal_actions(&s, p, LegalityMode::Immediate(&interrupt));
    // Two books over four disciplines: C(5, 3) splits.
    assert_eq!(legal.len(), 10);
    for &id in &legal {
        match decode(id).unwrap() {
            CatalogEntry::BookSplit(split) => assert_eq!(split.iter().sum::<u32>(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    let choice = choice_for(decode(legal[0]).unwrap()).unwrap();
    let done = EffectResolver::resume(&mut s, interrupt, choice).unwrap();
    assert_eq!(done, Resolution::Complete);
    assert_eq!(s.players[p].coins, coins + 1);
    assert_eq!(s.players[p].total_books(), books + 2);
}

#[test]
fn test_five_books_offer_every_composition() {
    let mut s = state();
    let p = PlayerId::new(0);
    let interrupt = suspended(EffectResolver::adjust(&mut s, p, &[Effect::GainAnyBooks(5)]).unwrap());

    let legal = legal_actions(&s, p, LegalityMode::Immediate(&interrupt));
    // C(8, 3) ways to spread five books over four disciplines.
    assert_eq!(legal.len(), 56);
    let splits: Vec<[u32; 4]> = legal
        .iter()
        .map(|&id| match decode(id).unwrap() {
            CatalogEntry::BookSplit(split) => split,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert!(splits.contains(&[5, 0, 0, 0]));
    assert!(splits.contains(&[0, 0, 0, 5]));
    assert!(splits.contains(&[2, 1, 1, 1]));
    assert!(splits.iter().all(|split| split.iter().sum::<u32>() == 5));
    assert!(legal.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_second_interrupt_overflows() {
    let mut slot = InterruptSlot::new();
    let first = Interrupt {
        player: PlayerId::new(0),
        request: DecisionRequest::TrackSplit { total: 1 },
        continuation: Vec::new(),
    };
    let second = Interrupt {
        player: PlayerId::new(2),
        ..first.clone()
    };
    slot.raise(first).unwrap();

    let err = slot.raise(second).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        EngineError::InterruptOverflow { pending, raised }
            if pending == PlayerId::new(0) && raised == PlayerId::new(2)
    ));
    assert!(slot.is_pending());
}

#[test]
fn test_pending_interrupt_owns_the_decision() {
    let config = GameConfig::builder().player_count(4).seed(61).build().unwrap();
    let mut game = Game::with_sink(config, Arc::new(NullSink)).unwrap();

    let mut immediates = 0;
    while let Some(point) = game.decision_point() {
        match game.pending() {
            Some(interrupt) => {
                immediates += 1;
                assert_eq!(point.tag, PhaseTag::Immediate);
                assert_eq!(point.player, interrupt.player);
            }
            None => assert_eq!(point.tag, PhaseTag::Normal),
        }
        game.apply(point.legal[point.legal.len() / 2]).unwrap();
    }
    assert!(game.is_finished());
    assert!(immediates > 0, "no interrupt raised in a whole game");
}
