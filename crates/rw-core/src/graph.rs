use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::relation::{HAS_SOURCES, Relation};
use crate::thing::ThingId;

type Edges = BTreeMap<Relation, BTreeSet<ThingId>>;

/// Typed relations between things, kept symmetric under [`Relation::inverse`].
///
/// The graph only guarantees pairwise symmetry. It does not stop a thing from
/// being `on` one thing and `under` another at the same time; callers clear
/// stale relations before adding new ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    edges: HashMap<ThingId, Edges>,
}

impl RelationGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Relate `x` to `y` and record the inverse on `y`.
    ///
    /// Returns `true` if either side changed.
    pub fn add(&mut self, x: &ThingId, relation: Relation, y: &ThingId) -> CoreResult<bool> {
        if x == y {
            return Err(CoreError::SelfRelation(x.clone()));
        }
        let forward = self.insert(x, relation, y);
        let backward = self.insert(y, relation.inverse(), x);
        if forward || backward {
            debug!(%x, %relation, %y, "relation added");
        }
        Ok(forward || backward)
    }

    /// Remove `x -relation-> y` and its inverse. Returns `true` if anything changed.
    ///
    /// A `has` edge on `y` survives while `x` still relates to `y` through
    /// another kind that inverts to `has`.
    pub fn remove(&mut self, x: &ThingId, relation: Relation, y: &ThingId) -> bool {
        let mut changed = self.erase(x, relation, y);
        match relation {
            Relation::Has => {
                for kind in HAS_SOURCES {
                    changed |= self.erase(y, kind, x);
                }
            }
            r if r.inverse() == Relation::Has => {
                let still_held = HAS_SOURCES.iter().any(|k| self.contains(x, *k, y));
                if !still_held {
                    changed |= self.erase(y, Relation::Has, x);
                }
            }
            r => changed |= self.erase(y, r.inverse(), x),
        }
        if changed {
            debug!(%x, %relation, %y, "relation removed");
        }
        changed
    }

    /// Strip every relation of the given kinds from `x`, with their inverses.
    ///
    /// Returns the removed `(relation, other)` pairs.
    pub fn clear(&mut self, x: &ThingId, kinds: &[Relation]) -> Vec<(Relation, ThingId)> {
        let mut removed = Vec::new();
        for &kind in kinds {
            let others: Vec<ThingId> = self.related(x, kind).cloned().collect();
            for other in others {
                if self.remove(x, kind, &other) {
                    removed.push((kind, other));
                }
            }
        }
        removed
    }

    /// True if `y ∈ x.relations[relation]`.
    pub fn contains(&self, x: &ThingId, relation: Relation, y: &ThingId) -> bool {
        self.edges
            .get(x)
            .and_then(|e| e.get(&relation))
            .is_some_and(|set| set.contains(y))
    }

    /// Everything `x` holds `relation` with, in ID order.
    pub fn related<'a>(
        &'a self,
        x: &ThingId,
        relation: Relation,
    ) -> impl Iterator<Item = &'a ThingId> + use<'a> {
        self.edges
            .get(x)
            .and_then(|e| e.get(&relation))
            .into_iter()
            .flatten()
    }

    /// Everything that holds `relation` with `x`, i.e. every `t` with
    /// `x ∈ t.relations[relation]`.
    pub fn sources(&self, x: &ThingId, relation: Relation) -> BTreeSet<ThingId> {
        let candidates: BTreeSet<&ThingId> = if relation == Relation::Has {
            HAS_SOURCES
                .iter()
                .flat_map(|k| self.related(x, *k))
                .collect()
        } else {
            self.related(x, relation.inverse()).collect()
        };
        candidates
            .into_iter()
            .filter(|t| self.contains(t, relation, x))
            .cloned()
            .collect()
    }

    /// Every edge as `(x, relation, y)`.
    pub fn edges(&self) -> impl Iterator<Item = (&ThingId, Relation, &ThingId)> {
        self.edges.iter().flat_map(|(x, kinds)| {
            kinds
                .iter()
                .flat_map(move |(r, ys)| ys.iter().map(move |y| (x, *r, y)))
        })
    }

    /// Number of stored edges (each direction counted separately).
    pub fn len(&self) -> usize {
        self.edges().count()
    }

    /// True if no edges are stored.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check the inverse-symmetry invariant over the whole graph.
    pub fn is_consistent(&self) -> bool {
        self.edges().all(|(x, r, y)| {
            x != y
                && match r {
                    Relation::Has => HAS_SOURCES.iter().any(|k| self.contains(y, *k, x)),
                    r => self.contains(y, r.inverse(), x),
                }
        })
    }

    fn insert(&mut self, x: &ThingId, relation: Relation, y: &ThingId) -> bool {
        self.edges
            .entry(x.clone())
            .or_default()
            .entry(relation)
            .or_default()
            .insert(y.clone())
    }

    fn erase(&mut self, x: &ThingId, relation: Relation, y: &ThingId) -> bool {
        let Some(kinds) = self.edges.get_mut(x) else {
            return false;
        };
        let Some(set) = kinds.get_mut(&relation) else {
            return false;
        };
        let removed = set.remove(y);
        if set.is_empty() {
            kinds.remove(&relation);
        }
        if kinds.is_empty() {
            self.edges.remove(x);
        }
        removed
    }
}
