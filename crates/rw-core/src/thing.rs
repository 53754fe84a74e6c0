use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::openness::Openness;

/// Stable identifier of a thing, e.g. `rm_0307` or `it_key`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingId(String);

impl ThingId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ThingId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThingId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Grid position of a room as `(row, col)`. Row grows southwards, column eastwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coords {
    /// Row index; north is `row - 1`.
    pub row: i32,
    /// Column index; east is `col + 1`.
    pub col: i32,
}

impl Coords {
    /// Create coordinates from a row and a column.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Decode a room ID of the form `rm_RRCC`.
    pub fn from_room_id(id: &str) -> CoreResult<Self> {
        let malformed = || CoreError::MalformedRoomId(id.to_string());
        let digits = id.strip_prefix("rm_").ok_or_else(malformed)?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let row = digits[..2].parse().map_err(|_| malformed())?;
        let col = digits[2..].parse().map_err(|_| malformed())?;
        Ok(Self { row, col })
    }

    /// Encode these coordinates as a room ID, if both fit in two digits.
    pub fn to_room_id(self) -> Option<ThingId> {
        let fits = |n: i32| (0..100).contains(&n);
        (fits(self.row) && fits(self.col))
            .then(|| ThingId::new(format!("rm_{:02}{:02}", self.row, self.col)))
    }

    /// Shift by a `(row, col)` delta.
    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A sensory aspect a thing can be described by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// What the player sees.
    Looks,
    /// What the player hears.
    Sounds,
    /// What the player feels.
    Feels,
}

/// Description variants per aspect, indexed by familiarity (0 = first encounter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Descriptions {
    /// Visual descriptions.
    pub looks: Vec<String>,
    /// Sounds.
    pub sounds: Vec<String>,
    /// Touch.
    pub feels: Vec<String>,
}

impl Descriptions {
    /// Descriptions with a single `looks` variant.
    pub fn looks(text: impl Into<String>) -> Self {
        Self {
            looks: vec![text.into()],
            ..Self::default()
        }
    }

    /// The variant for `aspect` at `index`, falling back to the last one
    /// available once the index runs past the authored variants.
    pub fn get(&self, aspect: Aspect, index: usize) -> Option<&str> {
        let variants = match aspect {
            Aspect::Looks => &self.looks,
            Aspect::Sounds => &self.sounds,
            Aspect::Feels => &self.feels,
        };
        variants
            .get(index)
            .or_else(|| variants.last())
            .map(String::as_str)
    }
}

/// Static traits of a thing. Fixed once the thing is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Qualities {
    /// Can be moved from where it stands.
    pub movable: bool,
    /// Can be picked up.
    pub liftable: bool,
    /// Can hold things inside it.
    pub is_vessel: bool,
    /// Can be opened and closed.
    pub openable: bool,
    /// Has a lock.
    pub lockable: bool,
    /// Accepts things put on, over, under, or by it.
    pub can_put_things_on_it: bool,
    /// Weight in arbitrary units.
    pub weight: Option<u32>,
    /// How much it can hold (for the player: how much it can lift).
    pub capacity: Option<u32>,
}

/// Vital statistics of the player, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    /// How hungry the player is.
    pub hunger: u8,
    /// How thirsty the player is.
    pub thirst: u8,
    /// Remaining energy.
    pub energy: u8,
    /// Remaining health.
    pub health: u8,
    /// General mood.
    pub mood: u8,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: 0,
            thirst: 0,
            energy: 100,
            health: 100,
            mood: 50,
        }
    }
}

/// Mutable state of a thing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct States {
    /// Open/closed/locked state, for things that have one.
    pub openness: Option<Openness>,
    /// How many times the thing has been described in full.
    pub seen_count: u32,
}

/// State only the player carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerData {
    /// The room the player is standing in.
    pub room: ThingId,
    /// Vital statistics.
    pub vitals: Vitals,
}

/// The closed set of thing variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingKind {
    /// A location on the room grid.
    Room,
    /// A door, window, or passage between two rooms.
    Portal,
    /// Something built into a room.
    Fixture,
    /// Large, sometimes movable furnishings.
    Furniture,
    /// Small things that can usually be carried.
    Item,
    /// The player.
    Player,
}

impl fmt::Display for ThingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Room => "room",
            Self::Portal => "portal",
            Self::Fixture => "fixture",
            Self::Furniture => "furniture",
            Self::Item => "item",
            Self::Player => "player",
        };
        f.write_str(name)
    }
}

/// Variant-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// A room and its grid position.
    Room {
        /// Decoded from the room ID.
        coords: Coords,
    },
    /// A portal and the rooms it joins; `room1` is north or east of `room2`.
    Portal {
        /// The north/east room.
        room1: Coords,
        /// The south/west room.
        room2: Coords,
    },
    /// A fixture.
    Fixture,
    /// A piece of furniture.
    Furniture,
    /// An item.
    Item,
    /// The player.
    Player(PlayerData),
}

impl Variant {
    /// The tag of this variant.
    pub fn kind(&self) -> ThingKind {
        match self {
            Self::Room { .. } => ThingKind::Room,
            Self::Portal { .. } => ThingKind::Portal,
            Self::Fixture => ThingKind::Fixture,
            Self::Furniture => ThingKind::Furniture,
            Self::Item => ThingKind::Item,
            Self::Player(_) => ThingKind::Player,
        }
    }
}

/// Every object in the world is a Thing.
#[derive(Debug, Clone)]
pub struct Thing {
    /// Unique identifier.
    pub id: ThingId,
    /// Display name, e.g. "an old bed".
    pub name: String,
    /// Names the player may use, lower case. The first is the canonical one.
    pub short_names: Vec<String>,
    /// Sensory descriptions.
    pub descriptions: Descriptions,
    /// Mutable state.
    pub states: States,
    qualities: Qualities,
    variant: Variant,
}

impl Thing {
    fn with_variant(id: ThingId, name: impl Into<String>, variant: Variant) -> Self {
        let name = name.into();
        Self {
            short_names: vec![name.to_lowercase()],
            id,
            name,
            descriptions: Descriptions::default(),
            states: States::default(),
            qualities: Qualities::default(),
            variant,
        }
    }

    /// A room; its coordinates are decoded from `id`.
    pub fn room(id: impl Into<String>, name: impl Into<String>) -> CoreResult<Self> {
        let id = ThingId::new(id);
        let coords = Coords::from_room_id(id.as_str())?;
        Ok(Self::with_variant(id, name, Variant::Room { coords }))
    }

    /// A portal joining the rooms at `room1` and `room2`. Starts open.
    pub fn portal(
        id: impl Into<String>,
        name: impl Into<String>,
        room1: Coords,
        room2: Coords,
    ) -> Self {
        Self::with_variant(ThingId::new(id), name, Variant::Portal { room1, room2 })
            .with_openness(Openness::Open)
    }

    /// A fixture.
    pub fn fixture(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_variant(ThingId::new(id), name, Variant::Fixture)
    }

    /// A piece of furniture.
    pub fn furniture(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_variant(ThingId::new(id), name, Variant::Furniture)
    }

    /// An item.
    pub fn item(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_variant(ThingId::new(id), name, Variant::Item)
    }

    /// The player, standing in `room`.
    pub fn player(id: impl Into<String>, name: impl Into<String>, room: ThingId) -> Self {
        let name = name.into();
        let mut short_names = vec!["me".to_string(), "myself".to_string(), "player".to_string()];
        let lower = name.to_lowercase();
        if !lower.is_empty() && !short_names.contains(&lower) {
            short_names.push(lower);
        }
        let data = PlayerData {
            room,
            vitals: Vitals::default(),
        };
        Self::with_variant(ThingId::new(id), name, Variant::Player(data))
            .with_short_names(short_names)
    }

    /// Replace the short names. An empty list keeps the lower-cased name.
    pub fn with_short_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.into().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        if !names.is_empty() {
            self.short_names = names;
        }
        self
    }

    /// Replace the descriptions.
    pub fn with_descriptions(mut self, descriptions: Descriptions) -> Self {
        self.descriptions = descriptions;
        self
    }

    /// Replace the qualities.
    pub fn with_qualities(mut self, qualities: Qualities) -> Self {
        self.qualities = qualities;
        self
    }

    /// Set the initial openness.
    pub fn with_openness(mut self, openness: Openness) -> Self {
        self.states.openness = Some(openness);
        self
    }

    /// Static traits.
    pub fn qualities(&self) -> &Qualities {
        &self.qualities
    }

    /// Variant data.
    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// Variant tag.
    pub fn kind(&self) -> ThingKind {
        self.variant.kind()
    }

    /// The name the player is expected to type.
    pub fn reference_name(&self) -> &str {
        self.short_names
            .first()
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    /// Coordinates, for rooms.
    pub fn coords(&self) -> Option<Coords> {
        match self.variant {
            Variant::Room { coords } => Some(coords),
            _ => None,
        }
    }

    /// The two joined coordinates, for portals.
    pub fn portal_rooms(&self) -> Option<(Coords, Coords)> {
        match self.variant {
            Variant::Portal { room1, room2 } => Some((room1, room2)),
            _ => None,
        }
    }

    /// Player data, for the player.
    pub fn player_data(&self) -> Option<&PlayerData> {
        match &self.variant {
            Variant::Player(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable player data, for the player.
    pub fn player_data_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.variant {
            Variant::Player(data) => Some(data),
            _ => None,
        }
    }

    /// Description for `aspect` at the current familiarity.
    pub fn describe(&self, aspect: Aspect) -> Option<&str> {
        self.descriptions
            .get(aspect, self.states.seen_count as usize)
    }
}

impl fmt::Display for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (AKA \"{}\")", self.name, self.short_names.join("\" or \""))
    }
}

/// Upper-case the first letter of `s`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
