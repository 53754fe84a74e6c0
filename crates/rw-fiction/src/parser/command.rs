//! Turning a line of player input into a [`Command`].

use super::direction::Direction;

/// A verb the interpreter has a handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Describe the room or a thing.
    Look,
    /// Describe what the room or a thing sounds like.
    Listen,
    /// Describe what a thing feels like.
    Feel,
    /// Move within or between rooms.
    Go,
    /// Pick something up.
    Get,
    /// Put something down in the room.
    Drop,
    /// Place a held thing relative to another.
    Put,
    /// Push something too big to carry.
    Move,
    /// Open a door or lid.
    Open,
    /// Close a door or lid.
    Close,
    /// Ask whether a relation holds.
    Test,
    /// List what the player carries.
    Inventory,
    /// Show the player's vitals.
    Status,
    /// List the verbs.
    Help,
}

const LOOK_VERBS: &[&str] = &["look", "l", "examine", "x", "study", "survey", "inspect"];
const LISTEN_VERBS: &[&str] = &["listen", "hear"];
const FEEL_VERBS: &[&str] = &["feel", "touch"];
const GO_VERBS: &[&str] = &["go", "head", "walk", "run", "jog", "crawl", "climb"];
const GET_VERBS: &[&str] = &["get", "take", "grab", "pick", "lift"];
const DROP_VERBS: &[&str] = &["drop", "release"];
const PUT_VERBS: &[&str] = &["put", "place", "set"];
const MOVE_VERBS: &[&str] = &["move", "shift"];
const OPEN_VERBS: &[&str] = &["open"];
const CLOSE_VERBS: &[&str] = &["close", "shut"];
const TEST_VERBS: &[&str] = &["is", "test"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const STATUS_VERBS: &[&str] = &["status", "health"];
const HELP_VERBS: &[&str] = &["help", "?"];

const VERB_TABLE: &[(&[&str], Verb)] = &[
    (LOOK_VERBS, Verb::Look),
    (LISTEN_VERBS, Verb::Listen),
    (FEEL_VERBS, Verb::Feel),
    (GO_VERBS, Verb::Go),
    (GET_VERBS, Verb::Get),
    (DROP_VERBS, Verb::Drop),
    (PUT_VERBS, Verb::Put),
    (MOVE_VERBS, Verb::Move),
    (OPEN_VERBS, Verb::Open),
    (CLOSE_VERBS, Verb::Close),
    (TEST_VERBS, Verb::Test),
    (INVENTORY_VERBS, Verb::Inventory),
    (STATUS_VERBS, Verb::Status),
    (HELP_VERBS, Verb::Help),
];

/// Words that end the session when typed on their own.
pub const QUIT_WORDS: &[&str] = &["q", "quit", "exit", "leave", "stop", "end"];

const ARTICLES: &[&str] = &["the", "a", "an"];

impl Verb {
    /// Look up a (lower case) word in the verb table.
    pub fn parse(word: &str) -> Option<Self> {
        VERB_TABLE
            .iter()
            .find(|(words, _)| words.contains(&word))
            .map(|(_, verb)| *verb)
    }

    /// The canonical word for this verb.
    pub fn name(self) -> &'static str {
        VERB_TABLE
            .iter()
            .find(|(_, verb)| *verb == self)
            .and_then(|(words, _)| words.first())
            .copied()
            .unwrap_or("?")
    }

    /// All words accepted for this verb.
    pub fn synonyms(self) -> &'static [&'static str] {
        VERB_TABLE
            .iter()
            .find(|(_, verb)| *verb == self)
            .map(|(words, _)| *words)
            .unwrap_or(&[])
    }

    /// Every verb, in help order.
    pub fn all() -> impl Iterator<Item = Verb> {
        VERB_TABLE.iter().map(|(_, verb)| *verb)
    }
}

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing but whitespace, punctuation, or articles.
    Empty,
    /// End the session.
    Quit,
    /// A bare direction such as `n` or `west`.
    Move {
        /// Where to go.
        direction: Direction,
    },
    /// A known verb and the words after it.
    Act {
        /// The verb.
        verb: Verb,
        /// Remaining tokens, articles removed.
        modifiers: Vec<String>,
    },
    /// The first word is not in the verb table.
    Unknown {
        /// The word typed.
        verb: String,
    },
}

/// Lower-case `input`, split on whitespace, trim punctuation from each word,
/// and drop articles.
pub fn tokenize(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .filter_map(|raw| {
            let word = raw.to_lowercase();
            let trimmed = word.trim_matches(|c: char| c.is_ascii_punctuation());
            if trimmed.is_empty() {
                // A lone "?" is the help verb.
                (word == "?").then_some(word)
            } else {
                Some(trimmed.to_string())
            }
        })
        .filter(|word| !ARTICLES.contains(&word.as_str()))
        .collect()
}

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let mut tokens = tokenize(input);
    if tokens.is_empty() {
        return Command::Empty;
    }
    if tokens.len() == 1 && QUIT_WORDS.contains(&tokens[0].as_str()) {
        return Command::Quit;
    }

    let verb = tokens.remove(0);
    if let Some(direction) = Direction::parse(&verb) {
        return Command::Move { direction };
    }
    match Verb::parse(&verb) {
        Some(verb) => Command::Act {
            verb,
            modifiers: tokens,
        },
        None => Command::Unknown { verb },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act(verb: Verb, modifiers: &[&str]) -> Command {
        Command::Act {
            verb,
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn tokenize_strips_articles_and_punctuation() {
        assert_eq!(
            tokenize("Put the KEY on a table!"),
            vec!["put", "key", "on", "table"]
        );
        assert_eq!(tokenize("  \"look\",  around.  "), vec!["look", "around"]);
        assert!(tokenize("the a an").is_empty());
    }

    #[test]
    fn parse_known_verbs() {
        assert_eq!(parse_command("look"), act(Verb::Look, &[]));
        assert_eq!(parse_command("x the bed"), act(Verb::Look, &["bed"]));
        assert_eq!(parse_command("pick up key"), act(Verb::Get, &["up", "key"]));
        assert_eq!(parse_command("shut door"), act(Verb::Close, &["door"]));
        assert_eq!(
            parse_command("shift the chair to fireplace"),
            act(Verb::Move, &["chair", "to", "fireplace"])
        );
        assert_eq!(
            parse_command("is key on table"),
            act(Verb::Test, &["key", "on", "table"])
        );
        assert_eq!(parse_command("?"), act(Verb::Help, &[]));
        assert_eq!(parse_command("i"), act(Verb::Inventory, &[]));
    }

    #[test]
    fn parse_direction_shortcuts() {
        assert_eq!(
            parse_command("n"),
            Command::Move {
                direction: Direction::North
            }
        );
        assert_eq!(
            parse_command("West"),
            Command::Move {
                direction: Direction::West
            }
        );
        assert_eq!(parse_command("go east"), act(Verb::Go, &["east"]));
    }

    #[test]
    fn parse_quit_only_on_its_own() {
        for word in QUIT_WORDS {
            assert_eq!(parse_command(word), Command::Quit);
        }
        assert_eq!(parse_command("QUIT."), Command::Quit);
        assert_eq!(
            parse_command("leave room"),
            Command::Unknown {
                verb: "leave".into()
            }
        );
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("   ...  "), Command::Empty);
        assert_eq!(
            parse_command("dance wildly"),
            Command::Unknown {
                verb: "dance".into()
            }
        );
    }

    #[test]
    fn verb_names_and_synonyms() {
        assert_eq!(Verb::Get.name(), "get");
        assert!(Verb::Look.synonyms().contains(&"survey"));
        assert_eq!(Verb::Move.name(), "move");
        assert_eq!(Verb::all().count(), 14);
    }
}
