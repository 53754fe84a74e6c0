//! Direct and indirect relation inference.
//!
//! A query first looks for a direct edge, then tries "uncle" inference
//! (X relates to some Z that Y is close to) and finally "sibling" inference
//! (X and Y are both close to the same Z). The first kind in a `near`
//! expansion that holds answers the query.

use std::collections::BTreeSet;

use crate::graph::RelationGraph;
use crate::relation::{Relation, RelationQuery};
use crate::thing::ThingId;

/// How a relation was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inference {
    /// An edge stored in the graph.
    Direct(Relation),
    /// Through an intermediate thing X is related to.
    Uncle(Relation),
    /// Through an intermediate thing both are related to.
    Sibling(Relation),
}

impl Inference {
    /// The concrete kind that matched.
    pub fn relation(self) -> Relation {
        match self {
            Self::Direct(r) | Self::Uncle(r) | Self::Sibling(r) => r,
        }
    }
}

impl RelationGraph {
    /// True if `x` stands in `query` to `y`, directly or by inference.
    pub fn holds(&self, x: &ThingId, query: RelationQuery, y: &ThingId) -> bool {
        self.explain(x, query, y).is_some()
    }

    /// Like [`holds`](Self::holds), but reports which rule matched first.
    pub fn explain(&self, x: &ThingId, query: RelationQuery, y: &ThingId) -> Option<Inference> {
        if x == y {
            return None;
        }
        query
            .expand()
            .into_iter()
            .find_map(|r| self.explain_kind(x, r, y))
    }

    fn explain_kind(&self, x: &ThingId, r: Relation, y: &ThingId) -> Option<Inference> {
        if self.contains(x, r, y) {
            return Some(Inference::Direct(r));
        }
        if self.uncle(x, r, y) {
            return Some(Inference::Uncle(r));
        }
        if self.sibling(x, r, y) {
            return Some(Inference::Sibling(r));
        }
        None
    }

    fn uncle(&self, x: &ThingId, r: Relation, y: &ThingId) -> bool {
        let neighborhood = r.uncle_neighborhood();
        if neighborhood.is_empty() {
            return false;
        }
        self.related(x, r)
            .any(|z| neighborhood.iter().any(|k| self.contains(y, *k, z)))
    }

    fn sibling(&self, x: &ThingId, r: Relation, y: &ThingId) -> bool {
        let neighborhood = r.sibling_neighborhood();
        if neighborhood.is_empty() {
            return false;
        }
        let reach = |t: &ThingId| -> BTreeSet<ThingId> {
            neighborhood
                .iter()
                .flat_map(|k| self.related(t, *k))
                .cloned()
                .collect()
        };
        let from_x = reach(x);
        !from_x.is_empty() && !from_x.is_disjoint(&reach(y))
    }
}
