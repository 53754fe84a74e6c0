//! Error types for the command interpreter.
//!
//! Most variants are not failures of the program but refusals of the game:
//! their `Display` text is the narration the player reads.

use rw_core::{CoreError, TransitionError};
use thiserror::Error;

/// Result type for interpreter operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors raised while setting up a session or running a command.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The configured start room does not exist or is not a room.
    #[error("start room not found: {0}")]
    StartRoomNotFound(String),

    /// The first word is not a known verb.
    #[error("Sorry, you don't know how to \"{0}\" here.")]
    UnknownVerb(String),

    /// A command is missing its object or destination; the payload is the question to ask back.
    #[error("{0}")]
    Incomplete(String),

    /// No thing answers to the words typed.
    #[error("You can't see any \"{phrase}\" here.{}", hint(.suggestion))]
    NotFound {
        /// The words that did not resolve.
        phrase: String,
        /// A similar short name, if there is one.
        suggestion: Option<String>,
    },

    /// The thing exists but not in the player's room.
    #[error("{0} is not here.")]
    NotHere(String),

    /// The player must move closer first.
    #[error("You can't reach {0} from here. Try going to it first.")]
    NotNear(String),

    /// The player is not carrying the thing.
    #[error("You are not holding {0}.")]
    NotHolding(String),

    /// The player already carries the thing.
    #[error("You are already holding {0}.")]
    AlreadyHolding(String),

    /// Rooms, portals, fixtures, and immovable things cannot be taken.
    #[error("You can't take {0}.")]
    CannotTake(String),

    /// The thing cannot be pushed around.
    #[error("You can't move {0}.")]
    CannotMove(String),

    /// The thing is shut inside a closed container; the payload names it.
    #[error("{0} is closed.")]
    Enclosed(String),

    /// Heavier than the player can lift.
    #[error("{0} is too heavy for you to lift.")]
    TooHeavy(String),

    /// The destination does not accept things that way.
    #[error("You can't put anything {preposition} {target}.")]
    CannotPlace {
        /// The preposition typed.
        preposition: String,
        /// Display name of the destination.
        target: String,
    },

    /// A thing cannot be placed relative to itself.
    #[error("You can't put {0} on or in itself.")]
    SelfPlacement(String),

    /// The player tried to go somewhere that is not a place to stand.
    #[error("You can't go {preposition} {target}.")]
    CannotGo {
        /// The preposition typed.
        preposition: String,
        /// Display name of the destination.
        target: String,
    },

    /// There is no room in that direction. The payload is the flavor text.
    #[error("{0}")]
    Wall(String),

    /// A `test` subject or object is not a known thing.
    #[error("I don't know what \"{0}\" is.")]
    UnknownThing(String),

    /// A `test` relation token is not a relation kind.
    #[error(
        "\"{0}\" is not a relation I know. Try of, by, with, has, over, under, on, in, or near."
    )]
    UnknownRelation(String),

    /// An open or close request was refused.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// An error from the world model.
    #[error("Something went wrong: {0}")]
    Core(#[from] CoreError),
}

fn hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" Did you mean \"{name}\"?"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_suggestion() {
        let err = FictionError::NotFound {
            phrase: "kye".into(),
            suggestion: Some("key".into()),
        };
        assert_eq!(
            err.to_string(),
            "You can't see any \"kye\" here. Did you mean \"key\"?"
        );

        let err = FictionError::NotFound {
            phrase: "unicorn".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "You can't see any \"unicorn\" here.");
    }

    #[test]
    fn unknown_verb_quotes_the_verb() {
        let err = FictionError::UnknownVerb("dance".into());
        assert_eq!(
            err.to_string(),
            "Sorry, you don't know how to \"dance\" here."
        );
    }

    #[test]
    fn transition_errors_pass_through() {
        let err: FictionError = TransitionError::Locked("The chest".into()).into();
        assert_eq!(err.to_string(), "The chest is locked.");
    }
}
