//! Preposition tables for `look`, `go`, `put`, and `move`.

use rw_core::Relation;

/// Which side of a thing `look` examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookFocus {
    /// The thing itself and what is by, over, or with it.
    At,
    /// Its contents.
    In,
    /// What lies under it.
    Under,
    /// What lies on it.
    On,
}

/// Map a leading word of a `look` command to its focus.
pub fn look_focus(word: &str) -> Option<LookFocus> {
    match word {
        "at" => Some(LookFocus::At),
        "in" | "into" | "inside" => Some(LookFocus::In),
        "under" | "underneath" | "beneath" => Some(LookFocus::Under),
        "on" | "onto" => Some(LookFocus::On),
        _ => None,
    }
}

/// What a `go` preposition asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoTarget {
    /// Take up a position relative to a thing.
    Position(Relation),
    /// Pass through a portal.
    Through,
}

/// Map a leading word of a `go` command to its target.
pub fn go_target(word: &str) -> Option<GoTarget> {
    let relation = match word {
        "to" | "beside" | "near" | "around" | "by" => Relation::By,
        "in" | "into" => Relation::In,
        "on" | "onto" => Relation::On,
        "under" | "underneath" => Relation::Under,
        "over" => Relation::Over,
        "through" => return Some(GoTarget::Through),
        _ => return None,
    };
    Some(GoTarget::Position(relation))
}

/// Map a `put` preposition to the relation it creates.
pub fn put_relation(word: &str) -> Option<Relation> {
    match word {
        "on" | "onto" => Some(Relation::On),
        "in" | "into" | "inside" => Some(Relation::In),
        "under" | "underneath" | "beneath" => Some(Relation::Under),
        "over" | "above" => Some(Relation::Over),
        "by" | "beside" | "near" => Some(Relation::By),
        _ => None,
    }
}

/// Map a `move` preposition to the relation it creates. `to` means `by`.
pub fn move_relation(word: &str) -> Option<Relation> {
    match word {
        "to" => Some(Relation::By),
        _ => put_relation(word),
    }
}
