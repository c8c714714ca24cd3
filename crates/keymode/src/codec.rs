//! Chord code derivation.
//!
//! A command name marks its chord letters by capitalising them. The code is the
//! sequence of marked letters, lower-cased, in order of appearance:
//!
//! - `"Delete Word"` → `"dw"`
//! - `"Switch windowS"` → `"ss"`
//! - `"undo"` → `""`

/// Derive the chord code for a command name.
pub fn derive(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_uppercase())
        .flat_map(char::to_lowercase)
        .collect()
}
