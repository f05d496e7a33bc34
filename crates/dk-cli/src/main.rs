//! Arena runner: sets up a small map with two opposing creatures and runs
//! the simulation until one side wins or the turn limit is reached.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dk_core::action::CreatureAction;
use dk_core::creature::{Creature, CreatureDefinition};
use dk_core::entity::{EntityHandle, GameEntity};
use dk_core::game::GameMap;
use dk_core::map::{Tile, TileContainer};
use dk_core::skill::{
    CreatureSkill, HealSelfSkill, MeleeFightSkill, MissileLaunchSkill, SkillPayload,
};

#[derive(Parser, Debug)]
#[command(name = "dk", about = "Run a small dungeon arena skirmish")]
struct Args {
    /// Side length of the square arena map.
    #[arg(long, default_value_t = 9)]
    map_size: i32,

    /// Maximum number of turns to simulate.
    #[arg(long, default_value_t = 50)]
    turns: u64,
}

fn arena(size: i32) -> GameMap {
    let mut tiles = TileContainer::new();
    tiles.allocate_map_memory(size, size);
    for x in 0..size {
        for y in 0..size {
            tiles.add_tile(Tile::ground(x, y));
            tiles.set_tile_neighbors(x, y);
        }
    }
    GameMap::new(tiles)
}

fn knight() -> Arc<CreatureDefinition> {
    Arc::new(
        CreatureDefinition::new("Knight", 15.0, 1.0)
            .with_defenses(2.0, 0.0, 0.0)
            .with_skill(CreatureSkill::new(
                2,
                0,
                SkillPayload::MeleeFight(MeleeFightSkill {
                    level_min: 1,
                    phy_atk: 4.0,
                    phy_atk_per_lvl: 0.6,
                    mag_atk: 0.0,
                    mag_atk_per_lvl: 0.0,
                    ele_atk: 0.0,
                    ele_atk_per_lvl: 0.0,
                }),
            ))
            .with_skill(CreatureSkill::new(
                8,
                0,
                SkillPayload::HealSelf(HealSelfSkill {
                    level_min: 1,
                    effect_duration: 3,
                    effect_value: 2.0,
                }),
            )),
    )
}

fn archer() -> Arc<CreatureDefinition> {
    Arc::new(
        CreatureDefinition::new("Archer", 15.0, 1.0).with_skill(CreatureSkill::new(
            3,
            0,
            SkillPayload::MissileLaunch(MissileLaunchSkill {
                range_max: 5.0,
                range_per_lvl: 0.2,
                level_min: 1,
                missile_mesh: "Arrow".to_string(),
                missile_part_script: String::new(),
                missile_speed: 2.0,
                phy_atk: 3.0,
                phy_atk_per_lvl: 0.4,
                mag_atk: 0.0,
                mag_atk_per_lvl: 0.0,
                ele_atk: 0.0,
                ele_atk_per_lvl: 0.0,
            }),
        )),
    )
}

fn spawn(
    game: &mut GameMap,
    definition: Arc<CreatureDefinition>,
    name: &str,
    seat: i32,
    at: (i32, i32),
) -> EntityHandle {
    game.entities.add(GameEntity::Creature(Creature::new(
        name, seat, 2, 30.0, at, definition,
    )))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let mut game = arena(args.map_size);
    let far = args.map_size - 1;
    let knight = spawn(&mut game, knight(), "knight", 0, (0, 0));
    let archer = spawn(&mut game, archer(), "archer", 1, (far, far));
    if let Some(creature) = game.entities.creature_mut(knight) {
        creature.push_action(CreatureAction::FightArena { target: archer });
    }
    if let Some(creature) = game.entities.creature_mut(archer) {
        creature.push_action(CreatureAction::FightArena { target: knight });
    }

    for _ in 0..args.turns {
        game.tick();
        for event in game.drain_events() {
            info!(turn = game.turn, ?event, "event");
        }
        let knight_up = game
            .entities
            .creature(knight)
            .is_some_and(|c| c.is_attackable(1));
        let archer_up = game
            .entities
            .creature(archer)
            .is_some_and(|c| c.is_attackable(0));
        if !knight_up || !archer_up {
            break;
        }
    }

    println!("turns simulated: {}", game.turn);
    for handle in game.entities.handles() {
        if let Some(creature) = game.entities.creature(handle) {
            println!(
                "{}: hp {:.1}/{:.1} at {:?}{}",
                creature.name,
                creature.hp,
                creature.max_hp,
                creature.position,
                if creature.ko { " (knocked out)" } else { "" },
            );
        }
    }
}
