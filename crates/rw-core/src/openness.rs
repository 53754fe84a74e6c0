use std::fmt;

use serde::{Deserialize, Serialize};

use crate::thing::{Thing, capitalize};

/// Whether a door, lid, or drawer is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Openness {
    /// Open; things can pass.
    Open,
    /// Shut but not locked.
    Closed,
    /// Shut and locked. There is no transition out of this state.
    Locked,
}

impl Openness {
    /// The state as an adjective.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Locked => "locked",
        }
    }
}

impl fmt::Display for Openness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an open or close request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Already in the open state.
    #[error("{0} is already open.")]
    AlreadyOpen(String),
    /// Already closed (or locked).
    #[error("{0} is already closed.")]
    AlreadyClosed(String),
    /// The thing cannot be opened or closed at all.
    #[error("{0} can't be opened or closed.")]
    NotOpenable(String),
    /// The thing is locked.
    #[error("{0} is locked.")]
    Locked(String),
}

impl Thing {
    /// Current openness, treating things without a state as closed.
    pub fn openness(&self) -> Openness {
        self.states.openness.unwrap_or(Openness::Closed)
    }

    /// True if the thing is in the open state.
    pub fn is_open(&self) -> bool {
        self.states.openness == Some(Openness::Open)
    }

    /// Move to `open`. Fails if already open, not openable, or locked.
    pub fn open(&mut self) -> Result<(), TransitionError> {
        let state = self.openness();
        if state == Openness::Open {
            return Err(TransitionError::AlreadyOpen(capitalize(&self.name)));
        }
        if !self.qualities().openable {
            return Err(TransitionError::NotOpenable(capitalize(&self.name)));
        }
        if state == Openness::Locked {
            return Err(TransitionError::Locked(capitalize(&self.name)));
        }
        self.states.openness = Some(Openness::Open);
        Ok(())
    }

    /// Move to `closed`. Fails if already closed or locked, or not openable.
    pub fn close(&mut self) -> Result<(), TransitionError> {
        // An openable thing without a recorded state counts as closed.
        let state = self
            .states
            .openness
            .or(self.qualities().openable.then_some(Openness::Closed));
        let Some(state) = state else {
            return Err(TransitionError::NotOpenable(capitalize(&self.name)));
        };
        if matches!(state, Openness::Closed | Openness::Locked) {
            return Err(TransitionError::AlreadyClosed(capitalize(&self.name)));
        }
        if !self.qualities().openable {
            return Err(TransitionError::NotOpenable(capitalize(&self.name)));
        }
        self.states.openness = Some(Openness::Closed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thing::Qualities;

    fn wardrobe(state: Openness) -> Thing {
        Thing::furniture("fu_wardrobe", "the wardrobe")
            .with_qualities(Qualities {
                openable: true,
                is_vessel: true,
                ..Qualities::default()
            })
            .with_openness(state)
    }

    #[test]
    fn open_then_close() {
        let mut w = wardrobe(Openness::Closed);
        w.open().unwrap();
        assert_eq!(w.openness(), Openness::Open);
        w.close().unwrap();
        assert_eq!(w.openness(), Openness::Closed);
    }

    #[test]
    fn open_twice_is_refused() {
        let mut w = wardrobe(Openness::Open);
        assert_eq!(
            w.open(),
            Err(TransitionError::AlreadyOpen("The wardrobe".into()))
        );
        assert!(w.is_open());
    }

    #[test]
    fn locked_stays_locked() {
        let mut w = wardrobe(Openness::Locked);
        assert!(matches!(w.open(), Err(TransitionError::Locked(_))));
        assert!(matches!(w.close(), Err(TransitionError::AlreadyClosed(_))));
        assert_eq!(w.openness(), Openness::Locked);
    }

    #[test]
    fn stateless_openable_starts_closed() {
        let mut cupboard = Thing::furniture("fu_cupboard", "the cupboard").with_qualities(
            Qualities {
                openable: true,
                ..Qualities::default()
            },
        );
        assert_eq!(
            cupboard.close(),
            Err(TransitionError::AlreadyClosed("The cupboard".into()))
        );
        assert_eq!(cupboard.states.openness, None);
        cupboard.open().unwrap();
        assert!(cupboard.is_open());
        cupboard.close().unwrap();
        assert_eq!(cupboard.openness(), Openness::Closed);
    }

    #[test]
    fn not_openable_refused_without_mutation() {
        let mut table = Thing::furniture("fu_table", "the table");
        assert!(matches!(table.open(), Err(TransitionError::NotOpenable(_))));
        assert!(matches!(table.close(), Err(TransitionError::NotOpenable(_))));
        assert_eq!(table.states.openness, None);
    }
}
