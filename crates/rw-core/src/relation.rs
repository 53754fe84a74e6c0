use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kinds of edge the relation graph stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Part of something (a handle of a door).
    Of,
    /// Beside something. Its own inverse.
    By,
    /// Held or accompanied by something.
    With,
    /// Holds something. Shared inverse of `of`, `with`, `on`, and `in`.
    Has,
    /// Above something.
    Over,
    /// Beneath something.
    Under,
    /// Resting on top of something.
    On,
    /// Inside something.
    In,
}

/// Every relation kind, in declaration order.
pub const ALL: [Relation; 8] = [
    Relation::Of,
    Relation::By,
    Relation::With,
    Relation::Has,
    Relation::Over,
    Relation::Under,
    Relation::On,
    Relation::In,
];

/// What `near` expands to.
pub const NEAR: [Relation; 7] = [
    Relation::By,
    Relation::With,
    Relation::Has,
    Relation::Over,
    Relation::Under,
    Relation::On,
    Relation::In,
];

/// Kinds whose inverse is `has`.
pub const HAS_SOURCES: [Relation; 4] = [Relation::Of, Relation::With, Relation::On, Relation::In];

/// Where a thing currently is. Stripped when it is picked up.
pub const POSITIONS: [Relation; 6] = [
    Relation::By,
    Relation::With,
    Relation::Over,
    Relation::Under,
    Relation::On,
    Relation::In,
];

/// Where the player currently stands. Replaced whenever the player goes somewhere.
pub const PLAYER_POSITIONS: [Relation; 5] = [
    Relation::By,
    Relation::With,
    Relation::Over,
    Relation::Under,
    Relation::On,
];

impl Relation {
    /// The kind recorded on the other end of an edge.
    ///
    /// `has` is the inverse of four kinds; adding a `has` edge directly
    /// records `with` on the other side.
    pub fn inverse(self) -> Self {
        match self {
            Self::Of | Self::With | Self::On | Self::In => Self::Has,
            Self::By => Self::By,
            Self::Has => Self::With,
            Self::Over => Self::Under,
            Self::Under => Self::Over,
        }
    }

    /// Kinds an intermediate thing may be related to the second party by,
    /// for "X r Z and Z relates to Y" inference.
    pub fn uncle_neighborhood(self) -> &'static [Relation] {
        match self {
            Self::By => &NEAR,
            Self::Over => &[Self::Under, Self::With, Self::In, Self::On],
            Self::Under => &[Self::Over, Self::With, Self::In, Self::On],
            _ => &[],
        }
    }

    /// Kinds through which two things sharing a neighbor relate to each other.
    pub fn sibling_neighborhood(self) -> &'static [Relation] {
        match self {
            Self::By => &POSITIONS,
            _ => &[],
        }
    }

    /// The word used in commands and narration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Of => "of",
            Self::By => "by",
            Self::With => "with",
            Self::Has => "has",
            Self::Over => "over",
            Self::Under => "under",
            Self::On => "on",
            Self::In => "in",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRelation(s.to_string()))
    }
}

/// A relation token accepted by inference queries: a graph kind or `near`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationQuery {
    /// A single graph kind.
    Kind(Relation),
    /// Any of the close-proximity kinds.
    Near,
}

impl RelationQuery {
    /// The concrete kinds to test, in evaluation order.
    pub fn expand(self) -> Vec<Relation> {
        match self {
            Self::Kind(r) => vec![r],
            Self::Near => NEAR.to_vec(),
        }
    }
}

impl From<Relation> for RelationQuery {
    fn from(r: Relation) -> Self {
        Self::Kind(r)
    }
}

impl fmt::Display for RelationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(r) => write!(f, "{r}"),
            Self::Near => f.write_str("near"),
        }
    }
}

impl FromStr for RelationQuery {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "near" {
            Ok(Self::Near)
        } else {
            s.parse().map(Self::Kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverses_pair_up() {
        assert_eq!(Relation::Of.inverse(), Relation::Has);
        assert_eq!(Relation::With.inverse(), Relation::Has);
        assert_eq!(Relation::On.inverse(), Relation::Has);
        assert_eq!(Relation::In.inverse(), Relation::Has);
        assert_eq!(Relation::By.inverse(), Relation::By);
        assert_eq!(Relation::Over.inverse(), Relation::Under);
        assert_eq!(Relation::Under.inverse(), Relation::Over);
        assert_eq!(Relation::Has.inverse(), Relation::With);
    }

    #[test]
    fn has_sources_all_invert_to_has() {
        for r in HAS_SOURCES {
            assert_eq!(r.inverse(), Relation::Has);
        }
    }

    #[test]
    fn only_by_over_under_have_uncles() {
        for r in ALL {
            let expected = matches!(r, Relation::By | Relation::Over | Relation::Under);
            assert_eq!(!r.uncle_neighborhood().is_empty(), expected, "{r}");
        }
        assert_eq!(Relation::By.uncle_neighborhood().len(), 7);
    }

    #[test]
    fn only_by_has_siblings() {
        assert_eq!(Relation::By.sibling_neighborhood().len(), 6);
        assert!(!Relation::By.sibling_neighborhood().contains(&Relation::Has));
        assert!(Relation::On.sibling_neighborhood().is_empty());
    }

    #[test]
    fn parse_tokens() {
        assert_eq!("under".parse::<Relation>().unwrap(), Relation::Under);
        assert_eq!("near".parse::<RelationQuery>().unwrap(), RelationQuery::Near);
        assert_eq!(
            "in".parse::<RelationQuery>().unwrap(),
            RelationQuery::Kind(Relation::In)
        );
        assert!(matches!(
            "beside".parse::<RelationQuery>(),
            Err(CoreError::UnknownRelation(t)) if t == "beside"
        ));
        assert!("near".parse::<Relation>().is_err());
    }

    #[test]
    fn near_expands_in_order() {
        assert_eq!(RelationQuery::Near.expand()[0], Relation::By);
        assert_eq!(RelationQuery::Near.expand().len(), 7);
        assert_eq!(RelationQuery::Kind(Relation::Of).expand(), vec![Relation::Of]);
    }
}
