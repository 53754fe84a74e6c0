//! Shared test worlds.

use rw_core::{
    Coords, Descriptions, Openness, Qualities, Relation, Thing, ThingId, World, WorldMeta,
};

use crate::config::SessionConfig;
use crate::session::Session;

/// Two rooms side by side with a door between them. The study holds a
/// table (movable but too big to carry) with a key on it, a heavy chest, a
/// box, and a wardrobe.
pub(crate) fn test_world(door: Openness) -> World {
    let mut world = World::new(WorldMeta::new("Test Manor"));
    world
        .add_thing(
            Thing::room("rm_0101", "the study")
                .unwrap()
                .with_short_names(["study"])
                .with_descriptions(Descriptions {
                    looks: vec!["A dusty study.".into(), "The study again.".into()],
                    sounds: vec!["A clock ticks somewhere.".into()],
                    feels: Vec::new(),
                }),
        )
        .unwrap();
    world
        .add_thing(
            Thing::room("rm_0102", "the hall")
                .unwrap()
                .with_short_names(["hall"]),
        )
        .unwrap();
    world
        .add_thing(
            Thing::portal(
                "po_door",
                "the oak door",
                Coords::new(1, 2),
                Coords::new(1, 1),
            )
            .with_short_names(["door", "oak door"])
            .with_qualities(Qualities {
                openable: true,
                ..Qualities::default()
            })
            .with_openness(door),
        )
        .unwrap();
    world
        .add_thing(
            Thing::furniture("fu_table", "the table")
                .with_short_names(["table"])
                .with_descriptions(Descriptions {
                    looks: vec!["A sturdy oak table.".into()],
                    feels: vec!["The wood is smooth and cool.".into()],
                    ..Descriptions::default()
                })
                .with_qualities(Qualities {
                    movable: true,
                    can_put_things_on_it: true,
                    weight: Some(40),
                    ..Qualities::default()
                }),
        )
        .unwrap();
    world
        .add_thing(
            Thing::furniture("fu_chest", "an iron chest")
                .with_short_names(["chest"])
                .with_qualities(Qualities {
                    movable: true,
                    liftable: true,
                    is_vessel: true,
                    openable: true,
                    weight: Some(500),
                    ..Qualities::default()
                })
                .with_openness(Openness::Locked),
        )
        .unwrap();
    world
        .add_thing(
            Thing::furniture("fu_wardrobe", "the wardrobe")
                .with_short_names(["wardrobe"])
                .with_qualities(Qualities {
                    is_vessel: true,
                    openable: true,
                    ..Qualities::default()
                })
                .with_openness(Openness::Closed),
        )
        .unwrap();
    world
        .add_thing(
            Thing::item("it_key", "a brass key")
                .with_short_names(["key", "brass key"])
                .with_qualities(Qualities {
                    movable: true,
                    liftable: true,
                    weight: Some(1),
                    ..Qualities::default()
                }),
        )
        .unwrap();
    world
        .add_thing(
            Thing::item("it_box", "a small box")
                .with_short_names(["box"])
                .with_qualities(Qualities {
                    movable: true,
                    liftable: true,
                    is_vessel: true,
                    weight: Some(3),
                    ..Qualities::default()
                }),
        )
        .unwrap();
    let rel = |world: &mut World, x: &str, r: Relation, y: &str| {
        world
            .add_relation(&ThingId::new(x), r, &ThingId::new(y))
            .unwrap();
    };
    rel(&mut world, "fu_table", Relation::In, "rm_0101");
    rel(&mut world, "fu_chest", Relation::In, "rm_0101");
    rel(&mut world, "fu_wardrobe", Relation::In, "rm_0101");
    rel(&mut world, "it_box", Relation::In, "rm_0101");
    rel(&mut world, "it_key", Relation::On, "fu_table");
    world
}

pub(crate) fn session(door: Openness) -> Session {
    let config = SessionConfig::default()
        .with_start_room("rm_0101")
        .with_player_name("Ada");
    Session::new(test_world(door), config).unwrap()
}

pub(crate) fn contains(session: &Session, x: &str, r: Relation, y: &str) -> bool {
    session
        .world()
        .graph()
        .contains(&ThingId::new(x), r, &ThingId::new(y))
}
