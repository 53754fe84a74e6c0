//! `look`, `listen`, and `feel`.

use rw_core::relation::POSITIONS;
use rw_core::thing::capitalize;
use rw_core::{Aspect, Relation, ThingId};

use crate::error::{FictionError, FictionResult};
use crate::narrator::{join_names, position_phrase};
use crate::parser::{Direction, LookFocus, look_focus};
use crate::session::Session;

impl Session {
    pub(crate) fn do_look(&mut self, modifiers: &[String]) -> FictionResult<String> {
        match modifiers {
            [] => return self.describe_room(),
            [only] if only == "around" || only == "room" => return self.describe_room(),
            _ => {}
        }

        let (focus, words) = match look_focus(&modifiers[0]) {
            Some(focus) => (focus, &modifiers[1..]),
            None => (LookFocus::At, modifiers),
        };
        if words.is_empty() {
            return Err(FictionError::Incomplete(format!(
                "Look {} what?",
                modifiers[0]
            )));
        }

        let target = self.resolve_present(words)?;
        if target == self.room_id()? {
            return self.describe_room();
        }
        let text = self.describe_thing(&target, focus)?;
        self.mark_seen(&target);
        Ok(text)
    }

    pub(crate) fn do_listen(&mut self, modifiers: &[String]) -> FictionResult<String> {
        self.sense(Aspect::Sounds, strip_leading(modifiers, &["to", "at"]))
    }

    pub(crate) fn do_feel(&mut self, modifiers: &[String]) -> FictionResult<String> {
        self.sense(Aspect::Feels, strip_leading(modifiers, &["at", "on"]))
    }

    fn sense(&self, aspect: Aspect, words: &[String]) -> FictionResult<String> {
        let target = if words.is_empty() {
            self.room_id()?
        } else {
            self.resolve_present(words)?
        };
        let is_room = target == self.room_id()?;
        if aspect == Aspect::Feels && !is_room {
            self.ensure_near(&target)?;
        }

        let thing = self.world.thing(target.as_str())?;
        if let Some(text) = thing.describe(aspect) {
            return Ok(text.to_string());
        }
        Ok(match (aspect, is_room) {
            (Aspect::Sounds, true) => "You hear nothing in particular.".to_string(),
            (Aspect::Sounds, false) => format!("{} makes no sound.", capitalize(&thing.name)),
            (_, true) => "You feel nothing unusual.".to_string(),
            (_, false) => format!("You feel nothing special about {}.", thing.name),
        })
    }

    /// Narrate the player's room: name, description, contents, exits, and
    /// where the player stands.
    pub(crate) fn describe_room(&mut self) -> FictionResult<String> {
        let room_id = self.room_id()?;
        let room = self.world.thing(room_id.as_str())?;
        let mut lines = vec![capitalize(&room.name)];
        if let Some(text) = room.describe(Aspect::Looks) {
            lines.push(text.to_string());
        }

        let contents = self.names_related_to(&room_id, Relation::In);
        if !contents.is_empty() {
            lines.push(format!("You see {}.", join_names(&contents)));
        }

        if let Some(here) = room.coords() {
            let mut exits = Vec::new();
            for direction in [
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West,
            ] {
                let there = here.offset(direction.delta());
                if self.world.room_at(there).is_none() {
                    continue;
                }
                match self.world.portal_between(here, there) {
                    Some(portal) => lines.push(format!(
                        "To the {}, {} is {}.",
                        direction.name(),
                        portal.name,
                        portal.openness()
                    )),
                    None => exits.push(direction.name()),
                }
            }
            if !exits.is_empty() {
                lines.push(format!("You can go {}.", join_names(&exits)));
            }
        }

        for kind in POSITIONS {
            for thing in self.world.related(&self.player, kind) {
                lines.push(format!("You are {} {}.", position_phrase(kind), thing.name));
            }
        }

        self.mark_seen(&room_id);
        Ok(lines.join("\n"))
    }

    fn describe_thing(&self, target: &ThingId, focus: LookFocus) -> FictionResult<String> {
        let thing = self.world.thing(target.as_str())?;
        let name = thing.name.as_str();
        let mut lines = vec![
            thing
                .describe(Aspect::Looks)
                .map(str::to_string)
                .unwrap_or_else(|| format!("You see nothing special about {name}.")),
        ];

        match focus {
            LookFocus::At => {
                if let Some(state) = thing.states.openness {
                    lines.push(format!("{} is {state}.", capitalize(name)));
                }
                for kind in [Relation::By, Relation::Over, Relation::With] {
                    let names = self.names_related_to(target, kind);
                    if !names.is_empty() {
                        lines.push(format!("You see {} {kind} {name}.", join_names(&names)));
                    }
                }
            }
            LookFocus::In => {
                let qualities = thing.qualities();
                if !qualities.is_vessel {
                    lines.push(format!("You can't see inside {name}."));
                } else if qualities.openable && !thing.is_open() {
                    lines.push(format!("{} is closed.", capitalize(name)));
                } else {
                    lines.push(self.listing(target, Relation::In, name));
                }
            }
            LookFocus::Under => lines.push(self.listing(target, Relation::Under, name)),
            LookFocus::On => lines.push(self.listing(target, Relation::On, name)),
        }
        Ok(lines.join("\n"))
    }

    fn listing(&self, target: &ThingId, kind: Relation, name: &str) -> String {
        let names = self.names_related_to(target, kind);
        if names.is_empty() {
            format!("There is nothing {kind} {name}.")
        } else {
            format!("{} {name} you see {}.", capitalize(kind.as_str()), join_names(&names))
        }
    }

    /// Names of the things standing in `kind` to `target`, the player excluded.
    fn names_related_to(&self, target: &ThingId, kind: Relation) -> Vec<String> {
        self.world
            .sources(target, kind)
            .into_iter()
            .filter(|t| t.id != self.player)
            .map(|t| t.name.clone())
            .collect()
    }
}

fn strip_leading<'a>(words: &'a [String], fillers: &[&str]) -> &'a [String] {
    match words.split_first() {
        Some((first, rest)) if fillers.contains(&first.as_str()) => rest,
        _ => words,
    }
}
