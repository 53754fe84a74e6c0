//! Property tests: arbitrary command sequences never break the world.

use proptest::prelude::*;
use rw_core::{Descriptions, Openness, Qualities, Relation, Thing, ThingId, World, WorldMeta};
use rw_fiction::{Outcome, Session, SessionConfig};

const COMMANDS: &[&str] = &[
    "look",
    "look on table",
    "look in crate",
    "go to table",
    "go to crate",
    "go on table",
    "go under table",
    "go into crate",
    "get key",
    "get coin",
    "get crate",
    "drop key",
    "drop coin",
    "put key on table",
    "put key in crate",
    "put coin under table",
    "put coin by crate",
    "move crate",
    "move crate to table",
    "shift crate under table",
    "move table to crate",
    "move coin by table",
    "open crate",
    "close crate",
    "is key near table",
    "is coin in crate",
    "n",
    "e",
    "s",
    "w",
    "inventory",
    "dance",
];

fn world() -> World {
    let mut world = World::new(WorldMeta::new("Cellar"));
    world
        .add_thing(
            Thing::room("rm_0505", "the cellar")
                .unwrap()
                .with_descriptions(Descriptions::looks("Damp stone walls.")),
        )
        .unwrap();
    world
        .add_thing(
            Thing::furniture("fu_table", "a trestle table")
                .with_short_names(["table"])
                .with_qualities(Qualities {
                    can_put_things_on_it: true,
                    ..Qualities::default()
                }),
        )
        .unwrap();
    world
        .add_thing(
            Thing::furniture("fu_crate", "a wooden crate")
                .with_short_names(["crate"])
                .with_qualities(Qualities {
                    movable: true,
                    liftable: true,
                    is_vessel: true,
                    openable: true,
                    weight: Some(20),
                    ..Qualities::default()
                })
                .with_openness(Openness::Closed),
        )
        .unwrap();
    for (id, name, short) in [("it_key", "a key", "key"), ("it_coin", "a coin", "coin")] {
        world
            .add_thing(Thing::item(id, name).with_short_names([short]).with_qualities(
                Qualities {
                    movable: true,
                    liftable: true,
                    weight: Some(1),
                    ..Qualities::default()
                },
            ))
            .unwrap();
    }
    let room = ThingId::new("rm_0505");
    for id in ["fu_table", "fu_crate", "it_coin"] {
        world.add_relation(&ThingId::new(id), Relation::In, &room).unwrap();
    }
    world
        .add_relation(&ThingId::new("it_key"), Relation::On, &ThingId::new("fu_table"))
        .unwrap();
    world
}

fn session() -> Session {
    Session::new(world(), SessionConfig::default().with_start_room("rm_0505")).unwrap()
}

proptest! {
    #[test]
    fn graph_stays_symmetric(script in prop::collection::vec(0..COMMANDS.len(), 0..40)) {
        let mut session = session();
        for i in script {
            session.process(COMMANDS[i]);
            prop_assert!(session.world().graph().is_consistent(), "after {:?}", COMMANDS[i]);
        }
    }

    #[test]
    fn refused_commands_change_nothing(script in prop::collection::vec(0..COMMANDS.len(), 0..40)) {
        let mut session = session();
        for i in script {
            let before = session.world().graph().clone();
            let reply = session.process(COMMANDS[i]);
            if matches!(reply.outcome, Outcome::Rejected | Outcome::NoOp) {
                prop_assert_eq!(session.world().graph(), &before, "{:?}", COMMANDS[i]);
            }
        }
    }

    #[test]
    fn things_are_never_lost(script in prop::collection::vec(0..COMMANDS.len(), 0..40)) {
        let mut session = session();
        let room = ThingId::new("rm_0505");
        for i in script {
            session.process(COMMANDS[i]);
        }
        for id in ["it_key", "it_coin", "fu_crate", "fu_table"] {
            prop_assert!(
                session.world().is_in_room(&ThingId::new(id), &room),
                "{} went missing",
                id
            );
        }
    }
}
