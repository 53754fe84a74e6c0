//! Adventure session management.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rw_core::relation::POSITIONS;
use rw_core::thing::{PlayerData, capitalize};
use rw_core::{
    CoreError, Qualities, Relation, RelationQuery, Thing, ThingId, ThingKind, World,
};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{FictionError, FictionResult};
use crate::narrator::{join_names, wrap_text};
use crate::parser::{Command, Direction, Verb, move_relation, parse_command, put_relation};

/// ID the player is registered under.
pub const PLAYER_ID: &str = "player";

const FAREWELL: &str = "Thanks for playing. Bye.";
const PROMPT_AGAIN: &str = "What would you like to do?";

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran.
    Done,
    /// The command was refused; the world is unchanged.
    Rejected,
    /// Empty input or an unknown verb.
    NoOp,
    /// The player asked to stop.
    Quit,
}

/// The narration for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text to show the player.
    pub text: String,
    /// How the turn ended.
    pub outcome: Outcome,
}

impl Reply {
    fn new(text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }
}

/// An adventure session: a world, the player in it, and the turn counter.
pub struct Session {
    pub(crate) world: World,
    pub(crate) player: ThingId,
    pub(crate) config: SessionConfig,
    pub(crate) rng: StdRng,
    started_at: DateTime<Utc>,
    turns: u64,
}

impl Session {
    /// Create a session, registering the player in the configured start room.
    pub fn new(mut world: World, config: SessionConfig) -> FictionResult<Self> {
        let start = match world.get(&config.start_room) {
            Some(room) if room.kind() == ThingKind::Room => room.id.clone(),
            _ => return Err(FictionError::StartRoomNotFound(config.start_room.clone())),
        };

        let player = Thing::player(PLAYER_ID, config.player_name.clone(), start.clone())
            .with_qualities(Qualities {
                capacity: Some(config.lift_capacity),
                ..Qualities::default()
            });
        let player = world.add_thing(player)?;
        info!(%player, %start, world = %world.meta.name, "session started");

        Ok(Self {
            world,
            player,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            started_at: Utc::now(),
            turns: 0,
        })
    }

    /// The world being explored.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player's ID.
    pub fn player_id(&self) -> &ThingId {
        &self.player
    }

    /// The player.
    pub fn player(&self) -> Option<&Thing> {
        self.world.get(self.player.as_str())
    }

    /// The room the player stands in.
    pub fn current_room(&self) -> Option<&Thing> {
        self.player()
            .and_then(Thing::player_data)
            .and_then(|data| self.world.get(data.room.as_str()))
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of turns processed so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }

    /// Narration for the start of the session.
    pub fn intro(&mut self) -> FictionResult<String> {
        self.describe_room()
    }

    /// Wrap narration to the configured width.
    pub fn wrap(&self, text: &str) -> String {
        wrap_text(text, self.config.wrap_width).join("\n")
    }

    /// Process a line of player input.
    pub fn process(&mut self, input: &str) -> Reply {
        let command = parse_command(input);
        self.turns += 1;
        debug!(turn = self.turns, ?command, "dispatching");

        let outcome_on_success = match command {
            Command::Quit => Outcome::Quit,
            Command::Empty | Command::Unknown { .. } => Outcome::NoOp,
            _ => Outcome::Done,
        };
        match self.execute(command) {
            Ok(text) => Reply::new(text, outcome_on_success),
            Err(err) if outcome_on_success == Outcome::NoOp => {
                Reply::new(err.to_string(), Outcome::NoOp)
            }
            Err(err) => {
                debug!(error = %err, "command rejected");
                Reply::new(err.to_string(), Outcome::Rejected)
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> FictionResult<String> {
        match command {
            Command::Empty => Ok(PROMPT_AGAIN.to_string()),
            Command::Quit => Ok(FAREWELL.to_string()),
            Command::Unknown { verb } => Err(FictionError::UnknownVerb(verb)),
            Command::Move { direction } => self.go_direction(direction),
            Command::Act { verb, modifiers } => match verb {
                Verb::Look => self.do_look(&modifiers),
                Verb::Listen => self.do_listen(&modifiers),
                Verb::Feel => self.do_feel(&modifiers),
                Verb::Go => self.do_go(&modifiers),
                Verb::Get => self.do_get(&modifiers),
                Verb::Drop => self.do_drop(&modifiers),
                Verb::Put => self.do_put(&modifiers),
                Verb::Move => self.do_move(&modifiers),
                Verb::Open => self.do_open(&modifiers),
                Verb::Close => self.do_close(&modifiers),
                Verb::Test => self.do_test(&modifiers),
                Verb::Inventory => self.do_inventory(),
                Verb::Status => self.do_status(),
                Verb::Help => Ok(help_text()),
            },
        }
    }

    // -----------------------------------------------------------------------
    // Helpers shared by the handlers
    // -----------------------------------------------------------------------

    pub(crate) fn player_data(&self) -> FictionResult<&PlayerData> {
        self.player()
            .and_then(Thing::player_data)
            .ok_or_else(|| CoreError::UnknownEntity(self.player.to_string()).into())
    }

    pub(crate) fn room_id(&self) -> FictionResult<ThingId> {
        Ok(self.player_data()?.room.clone())
    }

    pub(crate) fn name_of(&self, id: &ThingId) -> String {
        self.world
            .get(id.as_str())
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Resolve the thing named at the front of `words`, wherever it is.
    pub(crate) fn resolve(&self, words: &[String]) -> FictionResult<(ThingId, Vec<String>)> {
        match self.world.resolve_words(words) {
            (Some(id), rest) => Ok((id, rest)),
            (None, _) => {
                let phrase = words.join(" ");
                let suggestion = self.world.suggest(&phrase, 1).into_iter().next();
                Err(FictionError::NotFound { phrase, suggestion })
            }
        }
    }

    /// Fail unless `id` can be found in the player's room.
    pub(crate) fn ensure_present(&self, id: &ThingId) -> FictionResult<()> {
        let room = self.room_id()?;
        if *id == self.player || self.world.is_in_room(id, &room) {
            Ok(())
        } else {
            Err(FictionError::NotHere(capitalize(&self.name_of(id))))
        }
    }

    /// Resolve `words` to a thing in the player's room.
    pub(crate) fn resolve_present(&self, words: &[String]) -> FictionResult<ThingId> {
        let (id, _) = self.resolve(words)?;
        self.ensure_present(&id)?;
        Ok(id)
    }

    pub(crate) fn is_near(&self, id: &ThingId) -> FictionResult<bool> {
        Ok(self.world.holds(&self.player, RelationQuery::Near, id)?)
    }

    pub(crate) fn ensure_near(&self, id: &ThingId) -> FictionResult<()> {
        if self.is_near(id)? {
            Ok(())
        } else {
            Err(FictionError::NotNear(self.name_of(id)))
        }
    }

    pub(crate) fn is_holding(&self, id: &ThingId) -> bool {
        self.world.graph().contains(&self.player, Relation::Has, id)
    }

    /// True if the player stands on `id` or is inside it.
    pub(crate) fn is_supported_by(&self, id: &ThingId) -> bool {
        [Relation::On, Relation::In]
            .into_iter()
            .any(|kind| self.world.graph().contains(&self.player, kind, id))
    }

    /// Name of a closed container `id` is shut in, following nested `in`
    /// relations outwards.
    pub(crate) fn closed_container(&self, id: &ThingId) -> Option<String> {
        let mut pending = vec![id.clone()];
        let mut seen = BTreeSet::new();
        while let Some(current) = pending.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            for container in self.world.related(&current, Relation::In) {
                if container.kind() == ThingKind::Room {
                    continue;
                }
                if container.qualities().openable && !container.is_open() {
                    return Some(container.name.clone());
                }
                pending.push(container.id.clone());
            }
        }
        None
    }

    /// True if `target` takes things placed `relation` to it.
    fn accepts(&self, target: &ThingId, relation: Relation) -> FictionResult<bool> {
        let thing = self.world.thing(target.as_str())?;
        let qualities = thing.qualities();
        Ok(match relation {
            Relation::In => qualities.is_vessel && (!qualities.openable || thing.is_open()),
            _ => qualities.can_put_things_on_it,
        })
    }

    pub(crate) fn mark_seen(&mut self, id: &ThingId) {
        if let Some(thing) = self.world.get_mut(id.as_str()) {
            thing.states.seen_count = thing.states.seen_count.saturating_add(1);
        }
    }

    // -----------------------------------------------------------------------
    // Handling things
    // -----------------------------------------------------------------------

    fn do_get(&mut self, modifiers: &[String]) -> FictionResult<String> {
        let words = match modifiers.first().map(String::as_str) {
            Some("up") => &modifiers[1..],
            _ => modifiers,
        };
        if words.is_empty() {
            return Err(FictionError::Incomplete("Get what?".into()));
        }

        let target = self.resolve_present(words)?;
        let name = self.name_of(&target);
        if self.is_holding(&target) {
            return Err(FictionError::AlreadyHolding(name));
        }
        self.ensure_near(&target)?;
        if let Some(container) = self.closed_container(&target) {
            return Err(FictionError::Enclosed(capitalize(&container)));
        }

        let thing = self.world.thing(target.as_str())?;
        let qualities = thing.qualities();
        let takeable = matches!(thing.kind(), ThingKind::Furniture | ThingKind::Item)
            && qualities.movable
            && qualities.liftable;
        if !takeable || self.is_supported_by(&target) {
            return Err(FictionError::CannotTake(name));
        }
        let weight = qualities.weight.unwrap_or(0);
        let capacity = self
            .player()
            .and_then(|p| p.qualities().capacity)
            .unwrap_or(self.config.lift_capacity);
        if weight > capacity {
            return Err(FictionError::TooHeavy(capitalize(&name)));
        }

        let room = self.room_id()?;
        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            let loosened = world.clear_relations(&target, &POSITIONS)?;
            world.add_relation(&target, Relation::With, &player)?;
            let loosened: Vec<ThingId> = loosened.into_iter().map(|(_, other)| other).collect();
            settle(world, &loosened, &room)?;
            Ok(())
        })?;
        debug!(%target, "taken");
        Ok(format!("You take {name}."))
    }

    fn do_drop(&mut self, modifiers: &[String]) -> FictionResult<String> {
        if modifiers.is_empty() {
            return Err(FictionError::Incomplete("Drop what?".into()));
        }
        let (target, _) = self.resolve(modifiers)?;
        let name = self.name_of(&target);
        if !self.is_holding(&target) {
            return Err(FictionError::NotHolding(name));
        }

        let room = self.room_id()?;
        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            world.remove_relation(&player, Relation::Has, &target)?;
            world.add_relation(&target, Relation::In, &room)?;
            Ok(())
        })?;
        debug!(%target, %room, "dropped");
        Ok(format!("You drop {name}."))
    }

    fn do_put(&mut self, modifiers: &[String]) -> FictionResult<String> {
        if modifiers.is_empty() {
            return Err(FictionError::Incomplete("Put what?".into()));
        }
        let (item, rest) = self.resolve(modifiers)?;
        let item_name = self.name_of(&item);
        let Some((word, destination)) = rest.split_first() else {
            return Err(FictionError::Incomplete(format!("Put {item_name} where?")));
        };
        let Some(relation) = put_relation(word) else {
            return Err(FictionError::Incomplete(format!("Put {item_name} where?")));
        };
        if destination.is_empty() {
            return Err(FictionError::Incomplete(format!(
                "Put {item_name} {word} what?"
            )));
        }
        let target = self.resolve_present(destination)?;
        let target_name = self.name_of(&target);

        if !self.is_holding(&item) {
            return Err(FictionError::NotHolding(item_name));
        }
        if item == target {
            return Err(FictionError::SelfPlacement(item_name));
        }
        self.ensure_near(&target)?;

        if !self.accepts(&target, relation)? {
            return Err(FictionError::CannotPlace {
                preposition: relation.to_string(),
                target: target_name,
            });
        }

        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            world.remove_relation(&player, Relation::Has, &item)?;
            world.add_relation(&item, relation, &target)?;
            Ok(())
        })?;
        debug!(%item, %relation, %target, "placed");
        Ok(format!("You put {item_name} {relation} {target_name}."))
    }

    fn do_move(&mut self, modifiers: &[String]) -> FictionResult<String> {
        if modifiers.is_empty() {
            return Err(FictionError::Incomplete("Move what?".into()));
        }
        let (target, rest) = self.resolve(modifiers)?;
        self.ensure_present(&target)?;
        let name = self.name_of(&target);
        if self.is_holding(&target) {
            return Err(FictionError::CannotMove(name));
        }
        self.ensure_near(&target)?;
        if let Some(container) = self.closed_container(&target) {
            return Err(FictionError::Enclosed(capitalize(&container)));
        }
        let movable = {
            let thing = self.world.thing(target.as_str())?;
            matches!(thing.kind(), ThingKind::Furniture | ThingKind::Item)
                && thing.qualities().movable
        };
        if !movable || self.is_supported_by(&target) {
            return Err(FictionError::CannotMove(name));
        }

        let destination = match rest.split_first() {
            None => None,
            Some((word, words)) => {
                let (relation, words) = match move_relation(word) {
                    Some(relation) => (relation, words),
                    None => (Relation::By, rest.as_slice()),
                };
                if words.is_empty() {
                    return Err(FictionError::Incomplete(format!("Move {name} {word} what?")));
                }
                let other = self.resolve_present(words)?;
                let other_name = self.name_of(&other);
                if other == target {
                    return Err(FictionError::SelfPlacement(name));
                }
                let refuse = || FictionError::CannotPlace {
                    preposition: relation.to_string(),
                    target: other_name.clone(),
                };
                if self.is_holding(&other) {
                    return Err(refuse());
                }
                self.ensure_near(&other)?;
                if relation != Relation::By && !self.accepts(&other, relation)? {
                    return Err(refuse());
                }
                Some((relation, other, other_name))
            }
        };

        let room = self.room_id()?;
        let player = self.player.clone();
        let settled = self.world.transaction(|world| -> FictionResult<Vec<ThingId>> {
            let loosened = world.clear_relations(&target, &POSITIONS)?;
            match &destination {
                Some((relation, other, _)) => world.add_relation(&target, *relation, other)?,
                None => world.add_relation(&target, Relation::In, &room)?,
            };
            if loosened.contains(&(Relation::By, player.clone())) {
                world.add_relation(&player, Relation::By, &target)?;
            }
            let mut loosened: Vec<ThingId> = loosened.into_iter().map(|(_, other)| other).collect();
            loosened.push(target.clone());
            settle(world, &loosened, &room)
        })?;
        debug!(%target, ?settled, "moved");

        let Some((relation, _, other_name)) = destination else {
            let found: Vec<String> = settled
                .iter()
                .filter(|id| **id != target && **id != self.player)
                .map(|id| self.name_of(id))
                .collect();
            if found.is_empty() {
                return Ok(format!("You move {name} aside."));
            }
            return Ok(format!(
                "You move {name} aside. You find {} where it stood.",
                join_names(&found)
            ));
        };
        Ok(format!("You move {name} {relation} {other_name}."))
    }

    fn do_open(&mut self, modifiers: &[String]) -> FictionResult<String> {
        if modifiers.is_empty() {
            return Err(FictionError::Incomplete("Open what?".into()));
        }
        let target = self.resolve_present(modifiers)?;
        self.ensure_near(&target)?;
        let thing = self
            .world
            .get_mut(target.as_str())
            .ok_or_else(|| CoreError::UnknownEntity(target.to_string()))?;
        thing.open()?;
        Ok(format!("You open {}.", thing.name))
    }

    fn do_close(&mut self, modifiers: &[String]) -> FictionResult<String> {
        if modifiers.is_empty() {
            return Err(FictionError::Incomplete("Close what?".into()));
        }
        let target = self.resolve_present(modifiers)?;
        self.ensure_near(&target)?;
        let thing = self
            .world
            .get_mut(target.as_str())
            .ok_or_else(|| CoreError::UnknownEntity(target.to_string()))?;
        thing.close()?;
        Ok(format!("You close {}.", thing.name))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    fn do_test(&self, modifiers: &[String]) -> FictionResult<String> {
        let Some(first) = modifiers.first() else {
            return Err(FictionError::Incomplete("Is what where?".into()));
        };
        let (Some(subject), rest) = self.world.resolve_words(modifiers) else {
            return Err(FictionError::UnknownThing(first.clone()));
        };
        let subject_name = self.name_of(&subject);

        let Some((token, rest)) = rest.split_first() else {
            return Err(FictionError::Incomplete(format!("Is {subject_name} what?")));
        };
        let query: RelationQuery = token
            .parse()
            .map_err(|_| FictionError::UnknownRelation(token.clone()))?;
        if rest.is_empty() {
            return Err(FictionError::Incomplete(format!(
                "Is {subject_name} {query} what?"
            )));
        }
        let (Some(object), _) = self.world.resolve_words(rest) else {
            return Err(FictionError::UnknownThing(rest.join(" ")));
        };
        let object_name = self.name_of(&object);

        if self.world.holds(&subject, query, &object)? {
            Ok(format!("Yes, {subject_name} is {query} {object_name}."))
        } else {
            Ok(format!("No, {subject_name} is not {query} {object_name}."))
        }
    }

    fn do_inventory(&self) -> FictionResult<String> {
        let held: Vec<&str> = self
            .world
            .related(&self.player, Relation::Has)
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        if held.is_empty() {
            Ok("You are carrying nothing.".to_string())
        } else {
            Ok(format!("You are carrying {}.", join_names(&held)))
        }
    }

    fn do_status(&self) -> FictionResult<String> {
        let vitals = self.player_data()?.vitals;
        let minutes = self.elapsed().num_minutes();
        Ok(format!(
            "Health {}, energy {}, hunger {}, thirst {}, mood {}.\n\
             You have been exploring for {} minute{} over {} turn{}.",
            vitals.health,
            vitals.energy,
            vitals.hunger,
            vitals.thirst,
            vitals.mood,
            minutes,
            plural(minutes.unsigned_abs()),
            self.turns,
            plural(self.turns),
        ))
    }
}

/// Put each of `loosened` that the graph no longer ties to a room into `room`.
/// Returns the things placed.
fn settle(
    world: &mut World,
    loosened: &[ThingId],
    room: &ThingId,
) -> FictionResult<Vec<ThingId>> {
    let mut settled = Vec::new();
    for id in loosened {
        if !settled.contains(id) && !world.is_anchored(id) {
            world.add_relation(id, Relation::In, room)?;
            settled.push(id.clone());
        }
    }
    Ok(settled)
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn help_text() -> String {
    let mut lines = vec!["You can:".to_string()];
    for verb in Verb::all() {
        let others: Vec<&str> = verb.synonyms().iter().skip(1).copied().collect();
        if others.is_empty() {
            lines.push(format!("  {}", verb.name()));
        } else {
            lines.push(format!("  {} ({})", verb.name(), others.join(", ")));
        }
    }
    let directions: Vec<&str> = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ]
    .iter()
    .map(|d| d.name())
    .collect();
    lines.push(format!("  {} (or just the first letter)", directions.join(", ")));
    lines.push("  quit (q, exit, leave, stop, end)".to_string());
    lines.join("\n")
}
