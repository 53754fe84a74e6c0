//! Command parsing: tokenizing, the verb table, directions, and prepositions.

mod command;
mod direction;
mod preposition;

pub use command::{Command, Verb, parse_command, tokenize};
pub use direction::Direction;
pub use preposition::{GoTarget, LookFocus, go_target, look_focus, move_relation, put_relation};
