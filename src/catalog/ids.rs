//! The action id space.
//!
//! Every action kind owns one contiguous range; ranges are laid end to end
//! in a fixed order and never overlap. `encode` and `decode` convert
//! between `CatalogEntry` and `ActionId` in O(1).
//!
//! | kind          | size                 |
//! |---------------|----------------------|
//! | pass          | one per tile id      |
//! | pass (final)  | 1                    |
//! | end turn      | 1                    |
//! | build         | one per cell         |
//! | upgrade       | cell × 4 targets     |
//! | send worker   | 4                    |
//! | magic action  | 6                    |
//! | book action   | 4                    |
//! | convert       | 6                    |
//! | boom          | 6 (amounts 1..=6)    |
//! | extra action  | one per tile id      |
//! | draft         | one per tile id      |
//! | book split    | 494                  |
//! | track split   | 494                  |
//! | position      | one per cell         |
//! | tile choice   | one per tile id      |
//! | decline       | 1                    |

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, EngineError, EngineResult};
use crate::ledger::{BuildingType, CellId, Discipline, CELL_COUNT};
use crate::tiles::{TileId, TILE_ID_LIMIT};

use super::split;

const CELLS: u16 = CELL_COUNT as u16;
const TILES: u16 = TILE_ID_LIMIT;

pub const MAGIC_ACTION_COUNT: u16 = 6;
pub const BOOK_ACTION_COUNT: u16 = 4;
pub const CONVERT_COUNT: u16 = 6;
pub const MAX_BOOM: u16 = 6;

pub const PASS_BASE: u16 = 0;
pub const PASS_FINAL: u16 = PASS_BASE + TILES;
pub const END_TURN: u16 = PASS_FINAL + 1;
pub const BUILD_BASE: u16 = END_TURN + 1;
pub const UPGRADE_BASE: u16 = BUILD_BASE + CELLS;
pub const SEND_WORKER_BASE: u16 = UPGRADE_BASE + CELLS * 4;
pub const MAGIC_ACTION_BASE: u16 = SEND_WORKER_BASE + 4;
pub const BOOK_ACTION_BASE: u16 = MAGIC_ACTION_BASE + MAGIC_ACTION_COUNT;
pub const CONVERT_BASE: u16 = BOOK_ACTION_BASE + BOOK_ACTION_COUNT;
pub const BOOM_BASE: u16 = CONVERT_BASE + CONVERT_COUNT;
pub const EXTRA_ACTION_BASE: u16 = BOOM_BASE + MAX_BOOM;
pub const DRAFT_BASE: u16 = EXTRA_ACTION_BASE + TILES;
pub const BOOK_SPLIT_BASE: u16 = DRAFT_BASE + TILES;
pub const TRACK_SPLIT_BASE: u16 = BOOK_SPLIT_BASE + split::SPLIT_COUNT;
pub const POSITION_BASE: u16 = TRACK_SPLIT_BASE + split::SPLIT_COUNT;
pub const TILE_CHOICE_BASE: u16 = POSITION_BASE + CELLS;
pub const DECLINE: u16 = TILE_CHOICE_BASE + TILES;
/// Total number of ids.
pub const CATALOG_SIZE: u16 = DECLINE + 1;

/// A decoded action id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogEntry {
    /// Pass and take this booster.
    Pass(TileId),
    /// Pass in the final round.
    PassFinal,
    EndTurn,
    Build(CellId),
    Upgrade(CellId, BuildingType),
    SendWorker(Discipline),
    MagicAction(u8),
    BookAction(u8),
    Convert(u8),
    /// Boom this many tokens (1..=6).
    Boom(u8),
    ExtraAction(TileId),
    Draft(TileId),

    // === Immediate decisions ===
    BookSplit([u32; 4]),
    TrackSplit([u32; 4]),
    Position(CellId),
    TileChoice(TileId),
    Decline,
}

impl CatalogEntry {
    /// Whether this entry answers an immediate decision.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        matches!(
            self,
            CatalogEntry::BookSplit(_)
                | CatalogEntry::TrackSplit(_)
                | CatalogEntry::Position(_)
                | CatalogEntry::TileChoice(_)
                | CatalogEntry::Decline
        )
    }
}

fn bad(entry: CatalogEntry) -> EngineError {
    EngineError::Configuration(format!("{entry:?} has no catalog id"))
}

fn tile_offset(entry: CatalogEntry, tile: TileId) -> EngineResult<u16> {
    if tile.raw() < TILES {
        Ok(tile.raw())
    } else {
        Err(bad(entry))
    }
}

fn small_offset(entry: CatalogEntry, value: u8, count: u16) -> EngineResult<u16> {
    if u16::from(value) < count {
        Ok(u16::from(value))
    } else {
        Err(bad(entry))
    }
}

/// Id of an entry. Out-of-range parameters are configuration faults.
pub fn encode(entry: CatalogEntry) -> EngineResult<ActionId> {
    let id = match entry {
        CatalogEntry::Pass(tile) => PASS_BASE + tile_offset(entry, tile)?,
        CatalogEntry::PassFinal => PASS_FINAL,
        CatalogEntry::EndTurn => END_TURN,
        CatalogEntry::Build(cell) => BUILD_BASE + u16::from(cell.0),
        CatalogEntry::Upgrade(cell, to) => {
            let target = BuildingType::UPGRADES
                .iter()
                .position(|&b| b == to)
                .ok_or_else(|| bad(entry))?;
            UPGRADE_BASE + u16::from(cell.0) * 4 + target as u16
        }
        CatalogEntry::SendWorker(track) => SEND_WORKER_BASE + track.index() as u16,
        CatalogEntry::MagicAction(spot) => {
            MAGIC_ACTION_BASE + small_offset(entry, spot, MAGIC_ACTION_COUNT)?
        }
        CatalogEntry::BookAction(spot) => {
            BOOK_ACTION_BASE + small_offset(entry, spot, BOOK_ACTION_COUNT)?
        }
        CatalogEntry::Convert(kind) => CONVERT_BASE + small_offset(entry, kind, CONVERT_COUNT)?,
        CatalogEntry::Boom(amount) => {
            BOOM_BASE + small_offset(entry, amount.wrapping_sub(1), MAX_BOOM)?
        }
        CatalogEntry::ExtraAction(tile) => EXTRA_ACTION_BASE + tile_offset(entry, tile)?,
        CatalogEntry::Draft(tile) => DRAFT_BASE + tile_offset(entry, tile)?,
        CatalogEntry::BookSplit(s) => BOOK_SPLIT_BASE + split::rank(s).ok_or_else(|| bad(entry))?,
        CatalogEntry::TrackSplit(s) => {
            TRACK_SPLIT_BASE + split::rank(s).ok_or_else(|| bad(entry))?
        }
        CatalogEntry::Position(cell) => POSITION_BASE + u16::from(cell.0),
        CatalogEntry::TileChoice(tile) => TILE_CHOICE_BASE + tile_offset(entry, tile)?,
        CatalogEntry::Decline => DECLINE,
    };
    if matches!(entry, CatalogEntry::Build(c) | CatalogEntry::Upgrade(c, _) | CatalogEntry::Position(c) if c.index() >= CELL_COUNT)
    {
        return Err(bad(entry));
    }
    Ok(ActionId::new(id))
}

/// Entry of an id. Ids outside the catalog are configuration faults.
pub fn decode(id: ActionId) -> EngineResult<CatalogEntry> {
    let raw = id.raw();
    let tile = |base: u16| TileId::new(raw - base);
    let cell = |offset: u16| CellId::new(offset as u8);

    let entry = match raw {
        r if r < PASS_FINAL => CatalogEntry::Pass(tile(PASS_BASE)),
        PASS_FINAL => CatalogEntry::PassFinal,
        END_TURN => CatalogEntry::EndTurn,
        r if r < UPGRADE_BASE => CatalogEntry::Build(cell(r - BUILD_BASE)),
        r if r < SEND_WORKER_BASE => {
            let offset = r - UPGRADE_BASE;
            CatalogEntry::Upgrade(
                cell(offset / 4),
                BuildingType::UPGRADES[usize::from(offset % 4)],
            )
        }
        r if r < MAGIC_ACTION_BASE => {
            let track = Discipline::from_index(usize::from(r - SEND_WORKER_BASE))
                .ok_or_else(|| EngineError::Configuration(format!("unknown action {id}")))?;
            CatalogEntry::SendWorker(track)
        }
        r if r < BOOK_ACTION_BASE => CatalogEntry::MagicAction((r - MAGIC_ACTION_BASE) as u8),
        r if r < CONVERT_BASE => CatalogEntry::BookAction((r - BOOK_ACTION_BASE) as u8),
        r if r < BOOM_BASE => CatalogEntry::Convert((r - CONVERT_BASE) as u8),
        r if r < EXTRA_ACTION_BASE => CatalogEntry::Boom((r - BOOM_BASE) as u8 + 1),
        r if r < DRAFT_BASE => CatalogEntry::ExtraAction(tile(EXTRA_ACTION_BASE)),
        r if r < BOOK_SPLIT_BASE => CatalogEntry::Draft(tile(DRAFT_BASE)),
        r if r < TRACK_SPLIT_BASE => CatalogEntry::BookSplit(unrank(id, r - BOOK_SPLIT_BASE)?),
        r if r < POSITION_BASE => CatalogEntry::TrackSplit(unrank(id, r - TRACK_SPLIT_BASE)?),
        r if r < TILE_CHOICE_BASE => CatalogEntry::Position(cell(r - POSITION_BASE)),
        r if r < DECLINE => CatalogEntry::TileChoice(tile(TILE_CHOICE_BASE)),
        DECLINE => CatalogEntry::Decline,
        _ => {
            return Err(EngineError::Configuration(format!(
                "unknown action {id}"
            )))
        }
    };
    Ok(entry)
}

fn unrank(id: ActionId, index: u16) -> EngineResult<[u32; 4]> {
    split::unrank(index).ok_or_else(|| EngineError::Configuration(format!("unknown action {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_are_contiguous() {
        assert_eq!(PASS_FINAL, 64);
        assert_eq!(BUILD_BASE, 66);
        assert_eq!(UPGRADE_BASE - BUILD_BASE, 117);
        assert_eq!(SEND_WORKER_BASE - UPGRADE_BASE, 468);
        assert_eq!(TRACK_SPLIT_BASE - BOOK_SPLIT_BASE, 494);
        assert_eq!(CATALOG_SIZE, DECLINE + 1);
    }

    #[test]
    fn test_every_id_round_trips() {
        for raw in 0..CATALOG_SIZE {
            let id = ActionId::new(raw);
            let entry = decode(id).unwrap();
            assert_eq!(encode(entry).unwrap(), id, "{entry:?}");
        }
        assert!(decode(ActionId::new(CATALOG_SIZE)).is_err());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(encode(CatalogEntry::Boom(0)).is_err());
        assert!(encode(CatalogEntry::Boom(7)).is_err());
        assert!(encode(CatalogEntry::MagicAction(6)).is_err());
        assert!(encode(CatalogEntry::Upgrade(CellId::new(0), BuildingType::Workshop)).is_err());
        assert!(encode(CatalogEntry::Draft(TileId::new(TILE_ID_LIMIT))).is_err());
        assert!(encode(CatalogEntry::BookSplit([0, 0, 0, 0])).is_err());
        assert!(encode(CatalogEntry::Position(CellId::new(200))).is_err());
    }

    #[test]
    fn test_immediate_kinds() {
        assert!(decode(ActionId::new(DECLINE)).unwrap().is_immediate());
        assert!(decode(ActionId::new(POSITION_BASE)).unwrap().is_immediate());
        assert!(!decode(ActionId::new(END_TURN)).unwrap().is_immediate());
        assert!(!decode(ActionId::new(DRAFT_BASE)).unwrap().is_immediate());
    }
}
