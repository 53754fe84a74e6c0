use std::collections::{BTreeSet, HashMap, VecDeque};

use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::graph::RelationGraph;
use crate::relation::{ALL, Relation, RelationQuery};
use crate::thing::{Coords, Thing, ThingId, ThingKind, Variant};

/// Minimum similarity for a short name to be offered as a suggestion.
const SUGGEST_THRESHOLD: f64 = 0.8;

/// Metadata about the world itself.
#[derive(Debug, Clone, Default)]
pub struct WorldMeta {
    /// Display name of the world.
    pub name: String,
}

impl WorldMeta {
    /// Metadata with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The world registry. Owns every thing and the relation graph between them.
#[derive(Debug, Clone)]
pub struct World {
    /// World metadata.
    pub meta: WorldMeta,
    things: HashMap<ThingId, Thing>,
    graph: RelationGraph,

    // Indexes
    order: Vec<ThingId>,
    rooms: HashMap<Coords, ThingId>,
    portals: Vec<ThingId>,
    by_short_name: HashMap<String, ThingId>,
}

impl World {
    /// An empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            things: HashMap::new(),
            graph: RelationGraph::new(),
            order: Vec::new(),
            rooms: HashMap::new(),
            portals: Vec::new(),
            by_short_name: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a thing. Rooms claim their coordinates; portals must join
    /// rooms that are already registered.
    pub fn add_thing(&mut self, thing: Thing) -> CoreResult<ThingId> {
        if self.things.contains_key(&thing.id) {
            return Err(CoreError::DuplicateId(thing.id.clone()));
        }

        match thing.variant() {
            // Room ids encode coordinates one-to-one, so a unique id is a
            // unique grid cell.
            Variant::Room { coords } => {
                self.rooms.insert(*coords, thing.id.clone());
            }
            Variant::Portal { room1, room2 } => {
                for coords in [room1, room2] {
                    if !self.rooms.contains_key(coords) {
                        let room = coords
                            .to_room_id()
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| coords.to_string());
                        return Err(CoreError::MissingRoom {
                            portal: thing.id.clone(),
                            room,
                        });
                    }
                }
                self.portals.push(thing.id.clone());
            }
            _ => {}
        }

        for name in &thing.short_names {
            match self.by_short_name.get(name) {
                Some(first) => warn!(
                    short_name = %name,
                    kept = %first,
                    ignored = %thing.id,
                    "short name already taken; the first registration wins"
                ),
                None => {
                    self.by_short_name.insert(name.clone(), thing.id.clone());
                }
            }
        }

        let id = thing.id.clone();
        debug!(%id, kind = %thing.kind(), "thing registered");
        self.order.push(id.clone());
        self.things.insert(id.clone(), thing);
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a thing by ID.
    pub fn get(&self, id: &str) -> Option<&Thing> {
        self.things.get(id)
    }

    /// Get a mutable thing by ID.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Thing> {
        self.things.get_mut(id)
    }

    /// Get a thing by ID, failing with [`CoreError::UnknownEntity`].
    pub fn thing(&self, id: &str) -> CoreResult<&Thing> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownEntity(id.to_string()))
    }

    /// True if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.things.contains_key(id)
    }

    /// All things, in registration order.
    pub fn things(&self) -> impl Iterator<Item = &Thing> {
        self.order.iter().filter_map(|id| self.things.get(id))
    }

    /// All things of one kind, in registration order.
    pub fn things_by_kind(&self, kind: ThingKind) -> impl Iterator<Item = &Thing> {
        self.things().filter(move |t| t.kind() == kind)
    }

    /// Number of registered things.
    pub fn thing_count(&self) -> usize {
        self.things.len()
    }

    /// The room at `coords`.
    pub fn room_at(&self, coords: Coords) -> Option<&Thing> {
        self.rooms.get(&coords).and_then(|id| self.things.get(id))
    }

    /// All portals, in registration order.
    pub fn portals(&self) -> impl Iterator<Item = &Thing> {
        self.portals.iter().filter_map(|id| self.things.get(id))
    }

    /// The portal joining the rooms at `a` and `b`, in either order.
    pub fn portal_between(&self, a: Coords, b: Coords) -> Option<&Thing> {
        self.portals().find(|p| {
            p.portal_rooms()
                .is_some_and(|(r1, r2)| (r1 == a && r2 == b) || (r1 == b && r2 == a))
        })
    }

    /// The thing answering to `name` (lower case). Shared names resolve to
    /// the first thing registered with them.
    pub fn find_by_short_name(&self, name: &str) -> Option<&Thing> {
        self.by_short_name
            .get(name)
            .and_then(|id| self.things.get(id))
    }

    // -----------------------------------------------------------------------
    // Reference resolution
    // -----------------------------------------------------------------------

    /// Resolve the thing named at the front of `words`.
    ///
    /// Tries, in order: the first word alone; the first two words joined with
    /// a space; the second word alone (the first is then taken as a qualifier,
    /// as in "old bed"). Consumed words are dropped from the returned
    /// remainder. On failure the words come back untouched.
    pub fn resolve_words<S: AsRef<str>>(&self, words: &[S]) -> (Option<ThingId>, Vec<String>) {
        let owned: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
        let Some(first) = owned.first() else {
            return (None, owned);
        };

        if let Some(thing) = self.find_by_short_name(first) {
            return (Some(thing.id.clone()), owned[1..].to_vec());
        }
        if let Some(second) = owned.get(1) {
            let joined = format!("{first} {second}");
            if let Some(thing) = self.find_by_short_name(&joined) {
                return (Some(thing.id.clone()), owned[2..].to_vec());
            }
            if let Some(thing) = self.find_by_short_name(second) {
                return (Some(thing.id.clone()), owned[2..].to_vec());
            }
        }
        (None, owned)
    }

    /// Short names similar to `input`, best first.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<String> {
        let input = input.to_lowercase();
        let mut scored: Vec<(&String, f64)> = self
            .by_short_name
            .keys()
            .map(|name| (name, jaro_winkler(&input, name)))
            .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(name, _)| name.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Relations
    // -----------------------------------------------------------------------

    /// The relation graph.
    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    /// Relate two registered things. See [`RelationGraph::add`].
    pub fn add_relation(
        &mut self,
        x: &ThingId,
        relation: Relation,
        y: &ThingId,
    ) -> CoreResult<bool> {
        self.thing(x.as_str())?;
        self.thing(y.as_str())?;
        self.graph.add(x, relation, y)
    }

    /// Remove a relation between two registered things. See [`RelationGraph::remove`].
    pub fn remove_relation(
        &mut self,
        x: &ThingId,
        relation: Relation,
        y: &ThingId,
    ) -> CoreResult<bool> {
        self.thing(x.as_str())?;
        self.thing(y.as_str())?;
        Ok(self.graph.remove(x, relation, y))
    }

    /// Strip the given kinds from `x`. See [`RelationGraph::clear`].
    pub fn clear_relations(
        &mut self,
        x: &ThingId,
        kinds: &[Relation],
    ) -> CoreResult<Vec<(Relation, ThingId)>> {
        self.thing(x.as_str())?;
        Ok(self.graph.clear(x, kinds))
    }

    /// Things `x` holds `relation` with.
    pub fn related(&self, x: &ThingId, relation: Relation) -> Vec<&Thing> {
        self.graph
            .related(x, relation)
            .filter_map(|id| self.things.get(id))
            .collect()
    }

    /// Things holding `relation` with `x` (e.g. with `On`: what is on `x`).
    pub fn sources(&self, x: &ThingId, relation: Relation) -> Vec<&Thing> {
        self.graph
            .sources(x, relation)
            .iter()
            .filter_map(|id| self.things.get(id))
            .collect()
    }

    /// Evaluate a typed relation query between two registered things.
    pub fn holds(&self, x: &ThingId, query: RelationQuery, y: &ThingId) -> CoreResult<bool> {
        self.thing(x.as_str())?;
        self.thing(y.as_str())?;
        Ok(self.graph.holds(x, query, y))
    }

    /// Evaluate a relation query given as text: `x` and `y` are IDs, `relation`
    /// is a graph kind or `near`.
    pub fn relation_holds(&self, x: &str, relation: &str, y: &str) -> CoreResult<bool> {
        let x = self.thing(x)?.id.clone();
        let y = self.thing(y)?.id.clone();
        let query: RelationQuery = relation.parse()?;
        Ok(self.graph.holds(&x, query, &y))
    }

    /// Rooms a thing can be found in, following the relation graph until a
    /// room is met. Portals belong to both their rooms, the player to the room
    /// it stands in.
    pub fn rooms_of(&self, id: &ThingId) -> BTreeSet<ThingId> {
        self.reachable_rooms(id, true)
    }

    /// True if the relation graph ties `id` to a room without passing through
    /// the player, who may walk off. Rooms, portals, and the player itself
    /// are always anchored.
    pub fn is_anchored(&self, id: &ThingId) -> bool {
        !self.reachable_rooms(id, false).is_empty()
    }

    fn reachable_rooms(&self, id: &ThingId, via_player: bool) -> BTreeSet<ThingId> {
        let mut found = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([id.clone()]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(thing) = self.things.get(&current) else {
                continue;
            };
            match thing.variant() {
                Variant::Room { .. } => {
                    found.insert(current);
                }
                Variant::Portal { room1, room2 } => {
                    found.extend(
                        [room1, room2]
                            .into_iter()
                            .filter_map(|c| self.rooms.get(c).cloned()),
                    );
                }
                Variant::Player(data) => {
                    if via_player || current == *id {
                        found.insert(data.room.clone());
                    }
                }
                Variant::Fixture | Variant::Furniture | Variant::Item => {
                    for kind in ALL {
                        queue.extend(self.graph.related(&current, kind).cloned());
                    }
                }
            }
        }
        found
    }

    /// True if `id` is the room itself or can be found in it.
    pub fn is_in_room(&self, id: &ThingId, room: &ThingId) -> bool {
        id == room || self.rooms_of(id).contains(room)
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    /// Run `f` against the world; if it fails, the relation graph is restored
    /// to what it was before `f` started.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.graph.clone();
        let result = f(self);
        if result.is_err() {
            debug!("transaction failed; relation graph restored");
            self.graph = snapshot;
        }
        result
    }
}
