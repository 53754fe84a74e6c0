//! Building a [`World`] from JSON content.
//!
//! Content is six keyed collections: `rooms`, `portals`, `fixtures`,
//! `furniture`, `items` (id → record) and `relations` (id → kind → targets).
//! They can live in one JSON document or as one file per collection in a
//! directory (`rooms.json`, `portals.json`, ...). Within a collection, things
//! are registered in id order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::openness::Openness;
use crate::relation::Relation;
use crate::thing::{Coords, Descriptions, Qualities, Thing, ThingId};
use crate::world::{World, WorldMeta};

/// Construction record for rooms, fixtures, furniture, and items.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThingRecord {
    /// Optional copy of the collection key; must match it when present.
    #[serde(default, alias = "thing_id")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Names the player can type.
    #[serde(default)]
    pub short_names: Vec<String>,
    /// Sensory descriptions.
    #[serde(default)]
    pub descriptions: Descriptions,
    /// Trait overrides.
    #[serde(default)]
    pub qualities: Qualities,
    /// Initial openness, for things that open.
    #[serde(default)]
    pub state: Option<Openness>,
}

/// Construction record for portals.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortalRecord {
    /// Optional copy of the collection key; must match it when present.
    #[serde(default, alias = "thing_id")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Names the player can type.
    #[serde(default)]
    pub short_names: Vec<String>,
    /// Sensory descriptions.
    #[serde(default)]
    pub descriptions: Descriptions,
    /// Trait overrides.
    #[serde(default)]
    pub qualities: Qualities,
    /// Room ID north or east of `room2`.
    #[serde(alias = "room1_thing_id")]
    pub room1: String,
    /// Room ID south or west of `room1`.
    #[serde(alias = "room2_thing_id")]
    pub room2: String,
    /// Initial openness; open when omitted.
    #[serde(default)]
    pub state: Option<Openness>,
}

/// One target or a list of targets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    /// A single target ID.
    One(String),
    /// Several target IDs.
    Many(Vec<String>),
}

impl Targets {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}

/// All content needed to build a world.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldContent {
    /// Rooms keyed by `rm_RRCC` ID.
    pub rooms: BTreeMap<String, ThingRecord>,
    /// Portals keyed by ID.
    pub portals: BTreeMap<String, PortalRecord>,
    /// Fixtures keyed by ID.
    pub fixtures: BTreeMap<String, ThingRecord>,
    /// Furniture keyed by ID.
    pub furniture: BTreeMap<String, ThingRecord>,
    /// Items keyed by ID.
    pub items: BTreeMap<String, ThingRecord>,
    /// Relations: thing ID → relation kind → target IDs.
    pub relations: BTreeMap<String, BTreeMap<String, Targets>>,
}

impl WorldContent {
    /// Parse a single JSON document holding every collection.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|source| CoreError::Json {
            path: "<inline>".to_string(),
            source,
        })
    }

    /// Read one file per collection from `dir`. Only `rooms.json` is required.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        Ok(Self {
            rooms: read_collection(dir, "rooms", true)?,
            portals: read_collection(dir, "portals", false)?,
            fixtures: read_collection(dir, "fixtures", false)?,
            furniture: read_collection(dir, "furniture", false)?,
            items: read_collection(dir, "items", false)?,
            relations: read_collection(dir, "relations", false)?,
        })
    }

    /// Register every thing, then apply the relations.
    pub fn build(self, meta: WorldMeta) -> CoreResult<World> {
        let mut world = World::new(meta);

        for (id, record) in self.rooms {
            check_id(&id, record.id.as_deref())?;
            let room = Thing::room(id, record.name.clone())?;
            world.add_thing(apply(room, record))?;
        }

        for (id, record) in self.portals {
            check_id(&id, record.id.as_deref())?;
            let room1 = Coords::from_room_id(&record.room1)?;
            let room2 = Coords::from_room_id(&record.room2)?;
            let portal = Thing::portal(id, record.name, room1, room2)
                .with_short_names(record.short_names)
                .with_descriptions(record.descriptions)
                .with_qualities(record.qualities)
                .with_openness(record.state.unwrap_or(Openness::Open));
            world.add_thing(portal)?;
        }

        for (id, record) in self.fixtures {
            check_id(&id, record.id.as_deref())?;
            let thing = Thing::fixture(id, record.name.clone());
            world.add_thing(apply(thing, record))?;
        }
        for (id, record) in self.furniture {
            check_id(&id, record.id.as_deref())?;
            let thing = Thing::furniture(id, record.name.clone());
            world.add_thing(apply(thing, record))?;
        }
        for (id, record) in self.items {
            check_id(&id, record.id.as_deref())?;
            let thing = Thing::item(id, record.name.clone());
            world.add_thing(apply(thing, record))?;
        }

        let mut edges = 0usize;
        for (source, kinds) in self.relations {
            let source = world.thing(&source)?.id.clone();
            for (kind, targets) in kinds {
                let relation: Relation = kind.parse()?;
                for target in targets.into_vec() {
                    let target = ThingId::new(target);
                    world.add_relation(&source, relation, &target)?;
                    edges += 1;
                }
            }
        }

        info!(
            world = %world.meta.name,
            things = world.thing_count(),
            relations = edges,
            "world built"
        );
        Ok(world)
    }
}

/// Load and build the world stored in `dir`, named after the directory.
pub fn load_world(dir: &Path) -> CoreResult<World> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world".to_string());
    WorldContent::load_dir(dir)?.build(WorldMeta::new(name))
}

fn apply(thing: Thing, record: ThingRecord) -> Thing {
    let thing = thing
        .with_short_names(record.short_names)
        .with_descriptions(record.descriptions)
        .with_qualities(record.qualities);
    match record.state {
        Some(state) => thing.with_openness(state),
        None => thing,
    }
}

fn check_id(key: &str, declared: Option<&str>) -> CoreResult<()> {
    match declared {
        Some(declared) if declared != key => Err(CoreError::Validation(format!(
            "record \"{key}\" declares a different id \"{declared}\""
        ))),
        _ => Ok(()),
    }
}

fn read_collection<T: DeserializeOwned + Default>(
    dir: &Path,
    name: &str,
    required: bool,
) -> CoreResult<T> {
    let path = dir.join(format!("{name}.json"));
    if !required && !path.exists() {
        debug!(path = %path.display(), "collection file absent; treating as empty");
        return Ok(T::default());
    }
    let text = fs::read_to_string(&path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thing::ThingKind;

    const CONTENT: &str = r#"{
        "rooms": {
            "rm_0101": {
                "name": "the bedroom",
                "short_names": ["bedroom"],
                "descriptions": { "looks": ["A small bedroom."] }
            },
            "rm_0102": { "name": "the landing", "short_names": ["landing"] }
        },
        "portals": {
            "po_door": {
                "name": "the bedroom door",
                "short_names": ["door"],
                "room1_thing_id": "rm_0102",
                "room2_thing_id": "rm_0101",
                "state": "closed",
                "qualities": { "openable": true }
            }
        },
        "furniture": {
            "fu_table": {
                "name": "a table",
                "short_names": ["table"],
                "qualities": { "can_put_things_on_it": true, "weight": 40 }
            }
        },
        "items": {
            "it_key": {
                "id": "it_key",
                "name": "a brass key",
                "short_names": ["key"],
                "qualities": { "movable": true, "liftable": true, "weight": 1 }
            }
        },
        "relations": {
            "fu_table": { "in": "rm_0101" },
            "it_key": { "on": ["fu_table"] }
        }
    }"#;

    fn id(s: &str) -> ThingId {
        ThingId::new(s)
    }

    #[test]
    fn build_from_inline_json() {
        let world = WorldContent::from_json_str(CONTENT)
            .unwrap()
            .build(WorldMeta::new("inline"))
            .unwrap();

        assert_eq!(world.thing_count(), 5);
        let door = world.thing("po_door").unwrap();
        assert_eq!(door.kind(), ThingKind::Portal);
        assert_eq!(door.openness(), Openness::Closed);
        assert!(door.qualities().openable);

        let key = world.thing("it_key").unwrap();
        assert_eq!(key.qualities().weight, Some(1));
        assert!(world.graph().contains(&id("fu_table"), Relation::Has, &id("it_key")));
        assert!(world.graph().contains(&id("rm_0101"), Relation::Has, &id("fu_table")));
        assert!(world.graph().is_consistent());
    }

    #[test]
    fn portal_state_defaults_to_open() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a" }, "rm_0201": { "name": "b" } },
            "portals": { "po_arch": { "name": "an arch", "room1": "rm_0101", "room2": "rm_0201" } }
        }"#;
        let world = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap();
        assert!(world.thing("po_arch").unwrap().is_open());
    }

    #[test]
    fn malformed_room_id_fails() {
        let json = r#"{ "rooms": { "kitchen": { "name": "the kitchen" } } }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedRoomId(_)));
    }

    #[test]
    fn portal_to_missing_room_fails() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a" } },
            "portals": { "po_x": { "name": "x", "room1": "rm_0101", "room2": "rm_0909" } }
        }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingRoom { room, .. } if room == "rm_0909"));
    }

    #[test]
    fn duplicate_id_across_collections_fails() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a" } },
            "fixtures": { "thing": { "name": "x" } },
            "items": { "thing": { "name": "y" } }
        }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
    }

    #[test]
    fn unknown_relation_kind_fails() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a" } },
            "items": { "it_x": { "name": "x" } },
            "relations": { "it_x": { "inside": "rm_0101" } }
        }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownRelation(_)));
    }

    #[test]
    fn relation_to_unknown_thing_fails() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a" } },
            "relations": { "rm_0101": { "has": "it_ghost" } }
        }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownEntity(id) if id == "it_ghost"));
    }

    #[test]
    fn mismatched_record_id_fails() {
        let json = r#"{ "rooms": { "rm_0101": { "id": "rm_0102", "name": "a" } } }"#;
        let err = WorldContent::from_json_str(json)
            .unwrap()
            .build(WorldMeta::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_quality_is_rejected() {
        let json = r#"{
            "rooms": { "rm_0101": { "name": "a", "qualities": { "sparkly": true } } }
        }"#;
        assert!(matches!(
            WorldContent::from_json_str(json),
            Err(CoreError::Json { .. })
        ));
    }

    #[test]
    fn load_directory_of_collections() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("rooms.json"),
            r#"{ "rm_0101": { "name": "a room", "short_names": ["room"] } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("items.json"),
            r#"{ "it_cup": { "name": "a cup", "short_names": ["cup"] } }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("relations.json"),
            r#"{ "it_cup": { "in": "rm_0101" } }"#,
        )
        .unwrap();

        let world = load_world(dir.path()).unwrap();
        assert_eq!(world.thing_count(), 2);
        assert!(world.is_in_room(&id("it_cup"), &id("rm_0101")));
    }

    #[test]
    fn missing_rooms_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_world(dir.path()), Err(CoreError::Io { .. })));
    }
}
