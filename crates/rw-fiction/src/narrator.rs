//! Text helpers for narration: word wrapping and name lists.

use rw_core::Relation;

/// Word-wrap text to fit within `max_chars` columns.
///
/// Existing line breaks are kept; words longer than a line are broken.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let width = word.chars().count();
            if current.is_empty() {
                if width > max_chars {
                    // Force-break long words
                    let chars: Vec<char> = word.chars().collect();
                    for chunk in chars.chunks(max_chars) {
                        lines.push(chunk.iter().collect());
                    }
                } else {
                    current = word.to_string();
                }
            } else if current.chars().count() + 1 + width <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Join names as English prose: "a", "a and b", "a, b and c".
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", init.join(", "), last.as_ref())
        }
    }
}

/// The phrase for the player standing in `relation` to something.
pub fn position_phrase(relation: Relation) -> &'static str {
    match relation {
        Relation::By | Relation::With => "by",
        Relation::Over => "over",
        Relation::Under => "under",
        Relation::On => "on",
        Relation::In => "in",
        Relation::Of => "part of",
        Relation::Has => "holding",
    }
}
