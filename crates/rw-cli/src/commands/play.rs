use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;

use rw_fiction::{Outcome, Session, SessionConfig};

const NAME_PROMPT: &str = "Please enter the player's name:";
const NEXT_PROMPT: &str = "What's next?:";
const FAREWELL: &str = "Thanks for playing. Bye.";

/// Flags for a play session.
pub struct PlayOptions {
    pub world: PathBuf,
    pub start: String,
    pub seed: u64,
    pub width: usize,
    pub name: Option<String>,
}

pub fn run(options: &PlayOptions) -> Result<(), String> {
    let world = super::load_world(&options.world)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let name = match &options.name {
        Some(name) => title_case(name).ok_or_else(|| format!("invalid player name \"{name}\""))?,
        None => match ask_name(&mut reader, &mut out).map_err(|e| e.to_string())? {
            Some(name) => name,
            None => return Ok(()), // EOF before a name was given
        },
    };

    let config = SessionConfig::default()
        .with_seed(options.seed)
        .with_wrap_width(options.width)
        .with_start_room(options.start.as_str())
        .with_player_name(name.as_str());
    let mut session =
        Session::new(world, config).map_err(|e| format!("failed to start session: {e}"))?;

    play(&mut session, &name, &mut reader, &mut out).map_err(|e| e.to_string())
}

/// Prompt until the player types a purely alphabetic name. `None` on EOF.
fn ask_name(reader: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<String>> {
    let mut line = String::new();
    loop {
        write!(out, "{NAME_PROMPT} ")?;
        out.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if let Some(name) = title_case(line.trim()) {
            return Ok(Some(name));
        }
    }
}

/// The REPL: narrate the start room, then answer commands until quit or EOF.
fn play(
    session: &mut Session,
    name: &str,
    reader: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "{}", format!("Welcome, {name}.").bold())?;
    match session.intro() {
        Ok(text) => writeln!(out, "{}", session.wrap(&text))?,
        Err(e) => writeln!(out, "{}", e.to_string().yellow())?,
    }

    let mut line = String::new();
    loop {
        write!(out, "\n{NEXT_PROMPT} ")?;
        out.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            writeln!(out, "\n{FAREWELL}")?;
            break; // EOF
        }

        let reply = session.process(&line);
        let text = session.wrap(&reply.text);
        match reply.outcome {
            Outcome::Rejected => writeln!(out, "{}", text.yellow())?,
            Outcome::NoOp => writeln!(out, "{}", text.dimmed())?,
            Outcome::Done => writeln!(out, "{text}")?,
            Outcome::Quit => {
                writeln!(out, "{text}")?;
                break;
            }
        }
    }
    Ok(())
}

/// "aDa" -> "Ada". `None` unless the name is non-empty and purely alphabetic.
fn title_case(name: &str) -> Option<String> {
    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        return None;
    }
    let mut chars = name.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_core::{Coords, Thing, World, WorldMeta};

    fn two_rooms() -> World {
        let mut world = World::new(WorldMeta::new("Two Rooms"));
        world
            .add_thing(Thing::room("rm_0101", "the west room").unwrap())
            .unwrap();
        world
            .add_thing(Thing::room("rm_0102", "the east room").unwrap())
            .unwrap();
        world
            .add_thing(Thing::portal(
                "po_arch",
                "an archway",
                Coords::new(1, 2),
                Coords::new(1, 1),
            ))
            .unwrap();
        world
    }

    fn run_script(script: &str) -> String {
        colored::control::set_override(false);
        let config = SessionConfig::default().with_start_room("rm_0101");
        let mut session = Session::new(two_rooms(), config).unwrap();
        let mut reader = script.as_bytes();
        let mut out = Vec::new();
        play(&mut session, "Ada", &mut reader, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn title_case_names() {
        assert_eq!(title_case("aDA").as_deref(), Some("Ada"));
        assert_eq!(title_case("bob").as_deref(), Some("Bob"));
        assert_eq!(title_case("R2D2"), None);
        assert_eq!(title_case("Mary Ann"), None);
        assert_eq!(title_case(""), None);
    }

    #[test]
    fn ask_name_repeats_until_alphabetic() {
        let mut reader = "42\n\nzoe\n".as_bytes();
        let mut out = Vec::new();
        let name = ask_name(&mut reader, &mut out).unwrap();
        assert_eq!(name.as_deref(), Some("Zoe"));
        let prompts = String::from_utf8(out).unwrap().matches(NAME_PROMPT).count();
        assert_eq!(prompts, 3);
    }

    #[test]
    fn ask_name_stops_at_eof() {
        let mut reader = "".as_bytes();
        let mut out = Vec::new();
        assert_eq!(ask_name(&mut reader, &mut out).unwrap(), None);
    }

    #[test]
    fn play_until_quit() {
        let out = run_script("e\nlook\nquit\nlook\n");
        assert!(out.starts_with("Welcome, Ada.\nThe west room"));
        assert!(out.contains("You go east.\nThe east room"));
        assert!(out.ends_with("Thanks for playing. Bye.\n"));
        assert_eq!(out.matches(NEXT_PROMPT).count(), 3);
    }

    #[test]
    fn play_ends_at_eof() {
        let out = run_script("dance\n");
        assert!(out.contains("Sorry, you don't know how to \"dance\" here."));
        assert!(out.ends_with("Thanks for playing. Bye.\n"));
    }
}
