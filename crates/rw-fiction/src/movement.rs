//! Moving between rooms and taking up positions within one.

use rand::Rng;
use rw_core::relation::{PLAYER_POSITIONS, POSITIONS};
use rw_core::thing::capitalize;
use rw_core::{CoreError, Coords, Openness, Relation, Thing, ThingId};
use tracing::debug;

use crate::error::{FictionError, FictionResult};
use crate::narrator::position_phrase;
use crate::parser::{Direction, GoTarget, go_target};
use crate::session::Session;

/// Refusals for walking into a wall; one is picked at random.
pub const WALL_MESSAGES: [&str; 5] = [
    "Sorry, there is not another room in that direction.",
    "Woops, you bump into a wall. Ouch!",
    "Sorry, it's just a wall there.",
    "Sorry, you can't go in that direction. It's blocked by a rather stubborn wall.",
    "Not possible, sorry. There's a wall in the way.",
];

impl Session {
    pub(crate) fn do_go(&mut self, modifiers: &[String]) -> FictionResult<String> {
        let Some(first) = modifiers.first() else {
            return Err(FictionError::Incomplete("Go where?".into()));
        };
        if let Some(direction) = Direction::parse(first) {
            return self.go_direction(direction);
        }
        match go_target(first) {
            Some(GoTarget::Through) => self.go_through(&modifiers[1..]),
            Some(GoTarget::Position(relation)) => self.go_to(relation, first, &modifiers[1..]),
            None => self.go_to(Relation::By, "to", modifiers),
        }
    }

    /// Step one room in `direction`, unless a wall or a shut portal is in the way.
    pub(crate) fn go_direction(&mut self, direction: Direction) -> FictionResult<String> {
        let here = self.room_coords()?;
        let there = here.offset(direction.delta());

        let Some(room) = self.world.room_at(there) else {
            let line = WALL_MESSAGES[self.rng.random_range(0..WALL_MESSAGES.len())];
            debug!(direction = direction.name(), %here, "no room that way");
            return Err(FictionError::Wall(line.to_string()));
        };
        let room = room.id.clone();

        match self.world.portal_between(here, there) {
            Some(portal) if !portal.is_open() => {
                let portal = portal.id.clone();
                let blocked = self.blocked_by(&portal);
                self.stand_by(&portal)?;
                Ok(format!("You head {}, but {blocked}", direction.name()))
            }
            _ => self.enter_room(&room, &format!("You go {}.", direction.name())),
        }
    }

    fn go_through(&mut self, words: &[String]) -> FictionResult<String> {
        if words.is_empty() {
            return Err(FictionError::Incomplete("Go through what?".into()));
        }
        let portal = self.resolve_present(words)?;
        let thing = self.world.thing(portal.as_str())?;
        let Some((room1, room2)) = thing.portal_rooms() else {
            return Err(FictionError::CannotGo {
                preposition: "through".into(),
                target: thing.name.clone(),
            });
        };
        let opening = format!("You go through {}.", thing.name);
        let is_open = thing.is_open();

        let here = self.room_coords()?;
        let there = if here == room1 { room2 } else { room1 };
        if !is_open {
            let blocked = capitalize(&self.blocked_by(&portal));
            self.stand_by(&portal)?;
            return Ok(blocked);
        }
        let room = self
            .world
            .room_at(there)
            .map(|r| r.id.clone())
            .ok_or_else(|| CoreError::UnknownEntity(there.to_string()))?;
        self.enter_room(&room, &opening)
    }

    fn go_to(
        &mut self,
        relation: Relation,
        preposition: &str,
        words: &[String],
    ) -> FictionResult<String> {
        if words.is_empty() {
            return Err(FictionError::Incomplete(format!("Go {preposition} what?")));
        }
        let target = self.resolve_present(words)?;
        let name = self.name_of(&target);
        let refuse = || FictionError::CannotGo {
            preposition: preposition.to_string(),
            target: name.clone(),
        };

        let room = self.room_id()?;
        if target == room {
            let player = self.player.clone();
            self.world
                .transaction(|world| world.clear_relations(&player, &POSITIONS))?;
            return Ok(format!("You step into the middle of {name}."));
        }
        if target == self.player || self.is_holding(&target) {
            return Err(refuse());
        }
        if relation == Relation::In {
            let thing = self.world.thing(target.as_str())?;
            let qualities = thing.qualities();
            if !qualities.is_vessel || (qualities.openable && !thing.is_open()) {
                return Err(refuse());
            }
        }

        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            world.clear_relations(&player, &PLAYER_POSITIONS)?;
            world.add_relation(&player, relation, &target)?;
            Ok(())
        })?;
        debug!(%relation, %target, "player repositioned");
        Ok(format!("You are now {} {name}.", position_phrase(relation)))
    }

    /// Move the player into `room` and describe it.
    fn enter_room(&mut self, room: &ThingId, opening: &str) -> FictionResult<String> {
        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            world.clear_relations(&player, &POSITIONS)?;
            let data = world
                .get_mut(player.as_str())
                .and_then(Thing::player_data_mut)
                .ok_or_else(|| CoreError::UnknownEntity(player.to_string()))?;
            data.room = room.clone();
            Ok(())
        })?;
        debug!(%room, "entered room");
        let description = self.describe_room()?;
        Ok(format!("{opening}\n{description}"))
    }

    /// Replace the player's position with standing by `portal`.
    fn stand_by(&mut self, portal: &ThingId) -> FictionResult<()> {
        let player = self.player.clone();
        self.world.transaction(|world| -> FictionResult<()> {
            world.clear_relations(&player, &POSITIONS)?;
            world.add_relation(&player, Relation::By, portal)?;
            Ok(())
        })
    }

    fn blocked_by(&self, portal: &ThingId) -> String {
        let state = self
            .world
            .get(portal.as_str())
            .map(Thing::openness)
            .unwrap_or(Openness::Closed);
        format!("{} is {state}. You stop by it.", self.name_of(portal))
    }

    pub(crate) fn room_coords(&self) -> FictionResult<Coords> {
        let room = self.room_id()?;
        self.world
            .thing(room.as_str())?
            .coords()
            .ok_or_else(|| CoreError::MalformedRoomId(room.to_string()).into())
    }
}
