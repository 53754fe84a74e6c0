//! Configuration for an adventure session.

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible flavor text.
    pub seed: u64,
    /// Column width narration is wrapped to.
    pub wrap_width: usize,
    /// How much weight the player can lift.
    pub lift_capacity: u32,
    /// ID of the room the player starts in.
    pub start_room: String,
    /// The player's name.
    pub player_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            wrap_width: 78,
            lift_capacity: 50,
            start_room: "rm_0307".to_string(),
            player_name: "Player".to_string(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the wrap width (at least 20 columns).
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width.max(20);
        self
    }

    /// Set how much the player can lift.
    pub fn with_lift_capacity(mut self, capacity: u32) -> Self {
        self.lift_capacity = capacity;
        self
    }

    /// Set the start room.
    pub fn with_start_room(mut self, room: impl Into<String>) -> Self {
        self.start_room = room.into();
        self
    }

    /// Set the player's name.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }
}
