//! Built-in tile content.
//!
//! A small but complete set: enough home cards, factions, palace tiles,
//! boosters, competency tiles and round scoring tiles to seat five players
//! and play a full game.
//!
//! Id blocks:
//!
//! | kind        | ids    |
//! |-------------|--------|
//! | home cards  | 0..7   |
//! | factions    | 7..14  |
//! | palace      | 14..20 |
//! | boosters    | 20..29 |
//! | competency  | 29..37 |

use crate::effects::{Effect, PositionFilter, PositionPurpose, PositionRequest, Predicate};
use crate::ledger::{BuildingType, Discipline, Resource, ScoreBucket, Terrain};

use super::definition::{ExtraAction, Hook, SetupStyle, TileDefinition, TileId, TileKind};
use super::hooks::HookKind;
use super::scoring::ScoringTile;

pub const HOME_CARD_IDS: std::ops::Range<u16> = 0..7;
pub const FACTION_IDS: std::ops::Range<u16> = 7..14;
pub const PALACE_IDS: std::ops::Range<u16> = 14..20;
pub const BOOSTER_IDS: std::ops::Range<u16> = 20..29;
pub const COMPETENCY_IDS: std::ops::Range<u16> = 29..37;

fn tile(id: u16, name: &str, kind: TileKind) -> TileDefinition {
    TileDefinition::new(TileId::new(id), name, kind)
}

fn pass_points(building: BuildingType, points: u32) -> Effect {
    Effect::ScorePerBuilding {
        building,
        points,
        bucket: ScoreBucket::Pass,
    }
}

fn home_cards() -> Vec<TileDefinition> {
    let starts: [(&str, Vec<Effect>, Vec<Effect>); 7] = [
        (
            "Meadow Folk",
            vec![Effect::books(Discipline::Banking, 1)],
            vec![Effect::coins(1)],
        ),
        (
            "Marsh Dwellers",
            vec![Effect::GainAnyBooks(1)],
            vec![Effect::GainMagic(1)],
        ),
        (
            "Lake Wardens",
            vec![Effect::Gain(Resource::Bridges, 1)],
            vec![Effect::coins(1)],
        ),
        (
            "Woodland Circle",
            vec![Effect::AdvanceTrack(Discipline::Medicine, 1)],
            vec![Effect::GainMagic(2)],
        ),
        (
            "Hill Clans",
            vec![Effect::ore(1)],
            vec![Effect::ore(1)],
        ),
        (
            "Ash Walkers",
            vec![Effect::AdvanceTrack(Discipline::Engineering, 1)],
            vec![Effect::coins(1)],
        ),
        (
            "Dune Riders",
            vec![Effect::workers(1)],
            vec![Effect::GainMagic(1)],
        ),
    ];

    starts
        .into_iter()
        .zip(Terrain::LAND)
        .zip(HOME_CARD_IDS)
        .map(|(((name, setup, income), terrain), id)| {
            tile(id, name, TileKind::HomeCard)
                .with_home_terrain(terrain)
                .with_hook(HookKind::Setup, Hook::once(setup))
                .with_hook(HookKind::Income, Hook::new(income))
        })
        .collect()
}

fn start_resources(coins: u32, ore: u32, workers: u32) -> Vec<Effect> {
    vec![Effect::coins(coins), Effect::ore(ore), Effect::workers(workers)]
}

fn factions() -> Vec<TileDefinition> {
    vec![
        tile(7, "Merchants", TileKind::Faction)
            .with_hook(HookKind::Setup, Hook::once(start_resources(17, 3, 3)))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(2)])),
        tile(8, "Scholars", TileKind::Faction)
            .with_hook(HookKind::Setup, Hook::once({
                let mut e = start_resources(15, 3, 3);
                e.push(Effect::books(Discipline::Law, 1));
                e
            }))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainMagic(2)])),
        tile(9, "Miners", TileKind::Faction).with_hook(
            HookKind::Setup,
            Hook::once({
                let mut e = start_resources(15, 4, 3);
                e.push(Effect::SetOrePerSpade(1));
                e
            }),
        ),
        tile(10, "Seafarers", TileKind::Faction)
            .with_hook(HookKind::Setup, Hook::once({
                let mut e = start_resources(15, 3, 3);
                e.push(Effect::Gain(Resource::Bridges, 1));
                e
            }))
            .with_extra_action(ExtraAction {
                requires: vec![Predicate::Has(Resource::Ore, 1)],
                cost: vec![Effect::pay_ore(1)],
                effects: vec![Effect::Gain(Resource::Bridges, 1)],
                main: false,
            }),
        tile(11, "Nomads", TileKind::Faction)
            .with_setup_style(SetupStyle::Late)
            .with_hook(HookKind::Setup, Hook::once(start_resources(17, 3, 4))),
        tile(12, "Builders", TileKind::Faction)
            .with_setup_style(SetupStyle::Extra)
            .with_hook(HookKind::Setup, Hook::once(start_resources(13, 3, 3))),
        tile(13, "Mystics", TileKind::Faction)
            .with_hook(HookKind::Setup, Hook::once({
                let mut e = start_resources(15, 3, 3);
                e.push(Effect::AddMagicTokens(3));
                e
            }))
            .with_extra_action(ExtraAction {
                requires: vec![Predicate::HasMagic(2)],
                cost: vec![Effect::UseMagic(2)],
                effects: vec![Effect::AdvanceAnyTracks(1)],
                main: true,
            }),
    ]
}

fn palace_tiles() -> Vec<TileDefinition> {
    vec![
        tile(14, "Treasury", TileKind::PalaceTile)
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::coins(10)]))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(2)])),
        tile(15, "Forge", TileKind::PalaceTile)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::ore(2)])),
        tile(16, "Observatory", TileKind::PalaceTile)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainMagic(4)])),
        tile(17, "Archive", TileKind::PalaceTile)
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::GainAnyBooks(2)]))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainMagic(2)])),
        tile(18, "Harbor", TileKind::PalaceTile)
            .with_hook(
                HookKind::Immediate,
                Hook::new(vec![Effect::Gain(Resource::Bridges, 2)]),
            )
            .with_extra_action(ExtraAction {
                requires: vec![],
                cost: vec![],
                effects: vec![Effect::PickPosition(PositionRequest::spades(2))],
                main: true,
            }),
        tile(19, "Academy", TileKind::PalaceTile)
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::AdvanceAnyTracks(2)])),
    ]
}

fn boosters() -> Vec<TileDefinition> {
    vec![
        tile(20, "Coin Purse", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(4)])),
        tile(21, "Smelter", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::ore(1), Effect::GainMagic(3)])),
        tile(22, "Craft Fair", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::workers(1)]))
            .with_hook(HookKind::Pass, Hook::new(vec![pass_points(BuildingType::Workshop, 1)])),
        tile(23, "Market Day", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(2)]))
            .with_hook(HookKind::Pass, Hook::new(vec![pass_points(BuildingType::Guild, 2)])),
        tile(24, "Lecture Hall", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::ore(1)]))
            .with_hook(HookKind::Pass, Hook::new(vec![pass_points(BuildingType::School, 3)])),
        tile(25, "Library Card", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainAnyBooks(1)])),
        tile(26, "Shovels", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(2)]))
            .with_extra_action(ExtraAction {
                requires: vec![],
                cost: vec![],
                effects: vec![Effect::PickPosition(PositionRequest::spades(1))],
                main: true,
            }),
        tile(27, "Study Tour", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::workers(1)]))
            .with_extra_action(ExtraAction {
                requires: vec![],
                cost: vec![],
                effects: vec![Effect::AdvanceAnyTracks(1)],
                main: true,
            }),
        tile(28, "Royal Favor", TileKind::Booster)
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainMagic(4)]))
            .with_hook(HookKind::Pass, Hook::new(vec![pass_points(BuildingType::Palace, 4)])),
    ]
}

fn competency_tiles() -> Vec<TileDefinition> {
    let comp = |id: u16, name: &str| tile(id, name, TileKind::Competency).with_max_owners(2);
    vec![
        comp(29, "Bookkeeping")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::AdvanceTrack(Discipline::Banking, 1)]))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::coins(3)])),
        comp(30, "Jurisprudence")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::AdvanceTrack(Discipline::Law, 1)]))
            .with_hook(
                HookKind::Income,
                Hook::new(vec![Effect::books(Discipline::Law, 1)]),
            ),
        comp(31, "Mechanics")
            .with_hook(
                HookKind::Immediate,
                Hook::new(vec![Effect::AdvanceTrack(Discipline::Engineering, 1)]),
            )
            .with_hook(HookKind::Income, Hook::new(vec![Effect::ore(1)])),
        comp(32, "Anatomy")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::AdvanceTrack(Discipline::Medicine, 1)]))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::GainMagic(3)])),
        comp(33, "Surveying")
            .with_hook(
                HookKind::Immediate,
                Hook::new(vec![Effect::AdvanceTrack(Discipline::Engineering, 2)]),
            )
            .with_extra_action(ExtraAction {
                requires: vec![Predicate::HasMagic(3)],
                cost: vec![Effect::UseMagic(3)],
                effects: vec![Effect::PickPosition(
                    PositionRequest::new(
                        PositionFilter::Controlled {
                            building: Some(BuildingType::Workshop),
                            allow_isolated: true,
                        },
                        PositionPurpose::Upgrade { to: BuildingType::Guild },
                    ),
                )],
                main: true,
            }),
        comp(34, "Patronage")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::score(ScoreBucket::Tiles, 5)]))
            .with_hook(HookKind::Pass, Hook::new(vec![pass_points(BuildingType::Guild, 1)])),
        comp(35, "Brokerage")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::coins(5)]))
            .with_extra_action(ExtraAction {
                requires: vec![Predicate::Has(Resource::Ore, 1)],
                cost: vec![Effect::pay_ore(1)],
                effects: vec![Effect::coins(3)],
                main: false,
            }),
        comp(36, "Pilgrimage")
            .with_hook(HookKind::Immediate, Hook::new(vec![Effect::AdvanceAnyTracks(1)]))
            .with_hook(HookKind::Income, Hook::new(vec![Effect::workers(1)])),
    ]
}

/// Every built-in tile, in id order.
#[must_use]
pub fn builtin_tiles() -> Vec<TileDefinition> {
    let mut tiles = home_cards();
    tiles.extend(factions());
    tiles.extend(palace_tiles());
    tiles.extend(boosters());
    tiles.extend(competency_tiles());
    tiles
}

/// The eight built-in round scoring tiles.
#[must_use]
pub fn builtin_scoring_tiles() -> Vec<ScoringTile> {
    use BuildingType::*;
    use Discipline::*;

    vec![
        ScoringTile::new("Workshop Boom", Engineering, 4, vec![Effect::ore(1)])
            .with_build_bonus(Workshop, 2),
        ScoringTile::new("Guild Fair", Banking, 3, vec![Effect::coins(2)])
            .with_build_bonus(Guild, 3),
        ScoringTile::new("Guild Rush", Law, 4, vec![Effect::workers(1)])
            .with_build_bonus(Guild, 3),
        ScoringTile::new("School Days", Medicine, 2, vec![Effect::GainMagic(2)])
            .with_build_bonus(School, 3),
        ScoringTile::new("Palace Gala", Law, 2, vec![Effect::books(Law, 1)])
            .with_build_bonus(Palace, 5),
        ScoringTile::new(
            "Academic Year",
            Medicine,
            3,
            vec![Effect::PickPosition(PositionRequest::spades(1))],
        )
        .with_build_bonus(University, 5),
        ScoringTile::new("Settlers", Banking, 4, vec![Effect::GainAnyBooks(1)])
            .with_build_bonus(Workshop, 2),
        ScoringTile::new("City Charter", Engineering, 3, vec![Effect::coins(3)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{choice_for, legal_actions, CatalogEntry, LegalityMode};
    use crate::core::{ActionId, GameConfig, GameState, PlayerId};
    use crate::effects::{EffectResolver, Resolution};
    use crate::ledger::{CellId, MagicZones, CELL_COUNT};
    use crate::tiles::TileRegistry;

    #[test]
    fn test_builtin_ids_match_blocks() {
        let tiles = builtin_tiles();
        let blocks = [
            (HOME_CARD_IDS, TileKind::HomeCard),
            (FACTION_IDS, TileKind::Faction),
            (PALACE_IDS, TileKind::PalaceTile),
            (BOOSTER_IDS, TileKind::Booster),
            (COMPETENCY_IDS, TileKind::Competency),
        ];
        for (range, kind) in blocks {
            for id in range {
                assert_eq!(tiles[id as usize].id, TileId::new(id));
                assert_eq!(tiles[id as usize].kind, kind, "tile {id}");
            }
        }
        assert_eq!(tiles.len(), 37);
    }

    #[test]
    fn test_surveying_upgrades_a_workshop_for_free() {
        let config = GameConfig::builder()
            .player_count(3)
            .map(vec![Terrain::Plains; CELL_COUNT])
            .tiles(builtin_tiles())
            .build()
            .unwrap();
        let mut state = GameState::new(&config).unwrap();
        let p = PlayerId::new(0);
        state.players[p].home_terrain = Some(Terrain::Plains);
        state.players[p].magic = MagicZones::new([0, 0, 3]);
        let own = CellId::new(40);
        crate::effects::build::place_workshop(&mut state, p, own).unwrap();
        let coins = state.players[p].coins;

        let surveying = builtin_tiles()[33].extra_action.clone().unwrap();
        let mut effects = surveying.cost;
        effects.extend(surveying.effects);
        let interrupt = match EffectResolver::adjust(&mut state, p, &effects).unwrap() {
            Resolution::Suspended(interrupt) => interrupt,
            Resolution::Complete => panic!("expected a position pick"),
        };

        let legal: Vec<CatalogEntry> = legal_actions(&state, p, LegalityMode::Immediate(&interrupt))
            .into_iter()
            .map(|id: ActionId| crate::catalog::decode(id).unwrap())
            .collect();
        assert_eq!(legal, vec![CatalogEntry::Position(own)]);

        let choice = choice_for(CatalogEntry::Position(own)).unwrap();
        EffectResolver::resume(&mut state, interrupt, choice).unwrap();
        assert_eq!(state.board.cell(own).building, Some(BuildingType::Guild));
        assert_eq!(state.players[p].coins, coins);
        assert_eq!(state.players[p].magic.zones(), [3, 0, 0]);
    }

    #[test]
    fn test_builtin_registers_cleanly() {
        let reg = TileRegistry::from_definitions(builtin_tiles()).unwrap();
        assert_eq!(reg.len(), 37);
    }

    #[test]
    fn test_every_home_card_has_a_distinct_terrain() {
        let mut terrains: Vec<_> = home_cards().iter().filter_map(|t| t.home_terrain).collect();
        terrains.sort_by_key(|t| *t as u8);
        terrains.dedup();
        assert_eq!(terrains.len(), 7);
    }

    #[test]
    fn test_one_late_and_one_extra_faction() {
        let styles: Vec<_> = factions().iter().map(|f| f.setup_style).collect();
        assert_eq!(styles.iter().filter(|s| **s == SetupStyle::Late).count(), 1);
        assert_eq!(styles.iter().filter(|s| **s == SetupStyle::Extra).count(), 1);
    }

    #[test]
    fn test_scoring_tiles() {
        assert_eq!(builtin_scoring_tiles().len(), 8);
    }
}
