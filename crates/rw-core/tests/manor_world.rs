//! The bundled demo world loads and answers relation queries.

use std::path::PathBuf;

use rw_core::{Coords, Openness, ThingId, ThingKind, World, load_world};

fn manor() -> World {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../worlds/manor");
    load_world(&dir).unwrap()
}

#[test]
fn loads_every_collection() {
    let world = manor();
    assert_eq!(world.meta.name, "manor");
    assert_eq!(world.things_by_kind(ThingKind::Room).count(), 6);
    assert_eq!(world.things_by_kind(ThingKind::Portal).count(), 4);
    assert!(world.graph().is_consistent());
}

#[test]
fn start_room_is_on_the_grid() {
    let world = manor();
    let hall = world.room_at(Coords::new(3, 7)).unwrap();
    assert_eq!(hall.id.as_str(), "rm_0307");
    let door = world
        .portal_between(Coords::new(3, 7), Coords::new(2, 7))
        .unwrap();
    assert_eq!(door.openness(), Openness::Closed);
    assert!(
        world
            .portal_between(Coords::new(3, 7), Coords::new(4, 7))
            .is_none()
    );
}

#[test]
fn portal_state_defaults_to_open() {
    let world = manor();
    assert!(world.get("po_dining_arch").unwrap().is_open());
    assert_eq!(
        world.get("fu_chest").unwrap().openness(),
        Openness::Locked
    );
}

#[test]
fn relation_queries_on_content() {
    let world = manor();
    assert!(world.relation_holds("it_key", "on", "fu_hall_table").unwrap());
    assert!(world.relation_holds("fu_hall_table", "has", "it_key").unwrap());
    assert!(world.relation_holds("it_key", "near", "fx_clock").unwrap());
    assert!(!world.relation_holds("it_key", "near", "it_candle").unwrap());
    assert!(world.relation_holds("it_coin", "near", "fu_armchair").unwrap());
}

#[test]
fn things_are_found_in_their_rooms() {
    let world = manor();
    let apple = ThingId::new("it_apple");
    let kitchen = ThingId::new("rm_0407");
    assert!(world.is_in_room(&apple, &kitchen));
    let door = ThingId::new("po_library_door");
    assert_eq!(world.rooms_of(&door).len(), 2);
}
