//! Per-scope command sets.
//!
//! A [`CommandSet`] is built once from a scope's `name → payload` mapping. Codes
//! are derived from the names and must form a prefix-free set: no code may
//! equal or be a proper prefix of another, otherwise incremental matching would
//! be ambiguous.

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    Error, Result, codec,
    index::{IndexError, PrefixIndex},
};

/// A named command with its derived chord code and opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<M> {
    /// Full configured name, capitals marking the chord letters.
    pub name: String,
    /// Chord code derived from `name`.
    pub code: String,
    /// Macro payload handed unchanged to the runner.
    pub payload: M,
}

/// Validated commands for one scope plus the index over their codes.
#[derive(Debug, Clone)]
pub struct CommandSet<M> {
    /// Application this set was built for; `None` for the general scope.
    app: Option<String>,
    /// Commands in declaration order.
    commands: Vec<Command<M>>,
    /// Code → position in `commands`.
    index: PrefixIndex<usize>,
}

impl<M> CommandSet<M> {
    /// Build an application scope: the general mapping with `overrides` merged
    /// over it by command name.
    ///
    /// Overrides replace same-named general entries in place; new names are
    /// appended in their own declaration order.
    pub fn for_app(
        app: &str,
        general: &IndexMap<String, M>,
        overrides: &IndexMap<String, M>,
    ) -> Result<Self>
    where
        M: Clone,
    {
        let mut merged = general.clone();
        for (name, payload) in overrides {
            merged.insert(name.clone(), payload.clone());
        }
        Self::build(Some(app), merged)
    }

    /// Build the general scope.
    pub fn general(commands: IndexMap<String, M>) -> Result<Self> {
        Self::build(None, commands)
    }

    /// Derive codes, validate prefix-freeness and index the commands.
    pub fn build(app: Option<&str>, mapping: IndexMap<String, M>) -> Result<Self> {
        let commands: Vec<Command<M>> = mapping
            .into_iter()
            .map(|(name, payload)| Command {
                code: codec::derive(&name),
                name,
                payload,
            })
            .collect();

        // Indexing first rejects empty codes, which would otherwise surface as
        // prefix conflicts with every other command.
        let mut index = PrefixIndex::new();
        for (pos, cmd) in commands.iter().enumerate() {
            index
                .add(&cmd.code, pos)
                .map_err(|IndexError::EmptyCode| Error::EmptyCode {
                    app: app.map(str::to_string),
                    name: cmd.name.clone(),
                })?;
        }
        validate_prefix_free(app, &commands)?;

        debug!(
            app = app.unwrap_or("<general>"),
            commands = commands.len(),
            "command set built"
        );
        Ok(Self {
            app: app.map(str::to_string),
            commands,
            index,
        })
    }

    /// Application scope name, `None` for the general scope.
    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    /// Commands in declaration order.
    pub fn commands(&self) -> &[Command<M>] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when the scope has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command whose code is exactly `code`.
    pub fn get(&self, code: &str) -> Option<&Command<M>> {
        self.index.get(code).map(|&pos| &self.commands[pos])
    }

    /// Command with the lexicographically smallest code starting with `prefix`.
    pub fn first_completion(&self, prefix: &str) -> Option<&Command<M>> {
        self.completions(prefix).next()
    }

    /// True if some command's code starts with `prefix`.
    pub fn has_completion(&self, prefix: &str) -> bool {
        self.index.has_completion(prefix)
    }

    /// Commands whose codes start with `prefix`, ordered by code.
    pub fn completions<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = &'a Command<M>> + use<'a, M> {
        self.index
            .completions(prefix)
            .map(move |&pos| &self.commands[pos])
    }
}

/// Reject any code that more than one command's code is a prefix of.
///
/// A command's own code counts, so this catches both duplicates and proper
/// prefixes.
fn validate_prefix_free<M>(app: Option<&str>, commands: &[Command<M>]) -> Result<()> {
    let mut seen: Vec<&str> = Vec::new();
    for cmd in commands {
        let code = cmd.code.as_str();
        if seen.contains(&code) {
            continue;
        }
        seen.push(code);
        let colliding: Vec<String> = commands
            .iter()
            .filter(|other| code.starts_with(other.code.as_str()))
            .map(|other| other.name.clone())
            .collect();
        if colliding.len() > 1 {
            return Err(Error::Conflict {
                app: app.map(str::to_string),
                code: code.to_uppercase(),
                names: colliding,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(n, m)| (n.to_string(), m.to_string()))
            .collect()
    }

    #[test]
    fn builds_codes_in_declaration_order() {
        let set = CommandSet::general(mapping(&[
            ("Delete Word", "ctrl+BackSpace"),
            ("Undo", "ctrl+z"),
            ("Switch windowS", "alt+Tab"),
        ]))
        .unwrap();
        let codes: Vec<&str> = set.commands().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["dw", "u", "ss"]);
        assert_eq!(set.get("ss").unwrap().payload, "alt+Tab");
        assert!(set.get("s").is_none());
        assert_eq!(set.app(), None);
    }

    #[test]
    fn duplicate_codes_conflict() {
        let err = CommandSet::general(mapping(&[
            ("Delete Word", "d+w"),
            ("Undo", "ctrl+z"),
            ("Do Work", "d+o+w"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            Error::Conflict {
                app: None,
                code: "DW".into(),
                names: vec!["Delete Word".into(), "Do Work".into()],
            }
        );
    }

    #[test]
    fn proper_prefix_conflicts() {
        let err = CommandSet::general(mapping(&[
            ("Delete Word Forward", "a"),
            ("Delete Word", "b"),
        ]))
        .unwrap_err();
        match err {
            Error::Conflict { code, names, .. } => {
                assert_eq!(code, "DWF");
                assert_eq!(names, vec!["Delete Word Forward", "Delete Word"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_code_rejected() {
        let err = CommandSet::general(mapping(&[("Undo", "u"), ("redo", "r")])).unwrap_err();
        assert_eq!(
            err,
            Error::EmptyCode {
                app: None,
                name: "redo".into()
            }
        );
    }

    #[test]
    fn empty_code_reported_before_conflicts() {
        let err = CommandSet::general(mapping(&[
            ("Delete Word", "a"),
            ("Do Work", "b"),
            ("redo", "r"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::EmptyCode { ref name, .. } if name == "redo"));
    }

    #[test]
    fn app_overrides_replace_in_place() {
        let general = mapping(&[("Both General Specific", "G"), ("Undo", "u")]);
        let overrides = mapping(&[("Both General Specific", "S"), ("Switch Tab", "t")]);
        let set = CommandSet::for_app("firefox", &general, &overrides).unwrap();
        let names: Vec<&str> = set.commands().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Both General Specific", "Undo", "Switch Tab"]);
        assert_eq!(set.get("bgs").unwrap().payload, "S");
        assert_eq!(set.app(), Some("firefox"));
    }

    #[test]
    fn app_conflict_names_application() {
        let general = mapping(&[("Switch Tab", "a")]);
        let overrides = mapping(&[("Save Tabs", "b")]);
        let err = CommandSet::for_app("firefox", &general, &overrides).unwrap_err();
        assert_eq!(
            err,
            Error::Conflict {
                app: Some("firefox".into()),
                code: "ST".into(),
                names: vec!["Switch Tab".into(), "Save Tabs".into()],
            }
        );
    }

    #[test]
    fn first_completion_is_smallest_code() {
        let set = CommandSet::general(mapping(&[
            ("Switch Workspace", "w"),
            ("Switch windowS", "s"),
            ("Switch Tab", "t"),
        ]))
        .unwrap();
        assert_eq!(set.first_completion("s").unwrap().name, "Switch windowS");
        assert_eq!(set.first_completion("st").unwrap().name, "Switch Tab");
        assert!(set.first_completion("x").is_none());
        assert!(set.has_completion("s"));
    }

    proptest! {
        #[test]
        fn built_sets_are_prefix_free(names in prop::collection::vec("[A-C][A-Ca-c ]{0,7}", 0..8)) {
            let map: IndexMap<String, usize> =
                names.into_iter().enumerate().map(|(i, n)| (n, i)).collect();
            if let Ok(set) = CommandSet::general(map) {
                for a in set.commands() {
                    for b in set.commands() {
                        if a.name != b.name {
                            prop_assert!(!b.code.starts_with(a.code.as_str()));
                        }
                    }
                }
            }
        }
    }
}
