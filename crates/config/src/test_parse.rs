#[cfg(test)]
mod tests {
    use std::{
        env, fs,
        path::{Path, PathBuf},
        process,
        time::Duration,
    };

    use crate::*;

    const SAMPLE: &str = r#"(
        settings: (
            timeout_ms: 2500,
            announce_completion: true,
            focus_command: "echo firefox",
            focus_pattern: None,
        ),
        general: {
            "Delete Word": "Control_L+Left Shift+Control_L+Right Delete",
            "Undo": "Control_L+z",
            "Switch windowS": "Alt_L+Tab",
        },
        app_specific: {
            "firefox": {
                "Switch Tab": "Control_L+Tab",
            },
        },
    )"#;

    #[test]
    fn ron_sample_parses() {
        let cfg = load_from_str(SAMPLE, Format::Ron).unwrap();
        assert_eq!(cfg.settings.timeout(), Duration::from_millis(2500));
        assert!(cfg.settings.announce_completion);
        assert_eq!(cfg.settings.focus_command.as_deref(), Some("echo firefox"));
        assert_eq!(cfg.settings.focus_pattern, None);
        let names: Vec<&str> = cfg.general.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Delete Word", "Undo", "Switch windowS"]);
        assert_eq!(cfg.apps().collect::<Vec<_>>(), vec!["firefox"]);
        assert_eq!(
            cfg.app_specific["firefox"]["Switch Tab"],
            "Control_L+Tab".to_string()
        );
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = load_from_str("(general: {\"Undo\": \"ctrl+z\"})", Format::Ron).unwrap();
        assert_eq!(cfg.settings, Settings::default());
        assert_eq!(cfg.settings.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.settings.macro_command, "xdotool key {macro}");
        assert!(cfg.settings.focus_command.is_some());
        assert!(cfg.app_specific.is_empty());
    }

    #[test]
    fn json_is_accepted() {
        let json = r#"{
            "general": {"Undo": "ctrl+z", "Redo": "ctrl+shift+z"},
            "app_specific": {"code": {"Go To File": "ctrl+p"}},
            "settings": {"focus_command": null}
        }"#;
        let cfg = load_from_str(json, Format::Json).unwrap();
        assert_eq!(cfg.general.len(), 2);
        assert_eq!(cfg.settings.focus_command, None);
        assert_eq!(cfg.app_specific["code"]["Go To File"], "ctrl+p");
    }

    #[test]
    fn unknown_fields_are_rejected_with_location() {
        let src = "(\n  general: {},\n  bogus: 1,\n)";
        match load_from_str(src, Format::Ron) {
            Err(Error::Parse {
                location, excerpt, ..
            }) => {
                assert_eq!(location.line, 3);
                assert!(excerpt.contains("bogus"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_syntax_error_has_location() {
        match load_from_str("{\n\"general\": {\"Undo\" \"z\"}\n}", Format::Json) {
            Err(Error::Parse { location, .. }) => assert_eq!(location.line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn macro_command_needs_placeholder() {
        let err = load_from_str("(settings: (macro_command: \"xdotool key\"))", Format::Ron)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "settings.macro_command",
                ..
            }
        ));
        assert!(err.to_string().contains("{macro}"));
    }

    #[test]
    fn bad_focus_regex_is_rejected() {
        let err =
            load_from_str("(settings: (focus_pattern: \"(unclosed\"))", Format::Ron).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation {
                field: "settings.focus_pattern",
                ..
            }
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/config.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a/config.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a/config.ron")), Format::Ron);
        assert_eq!(Format::from_path(Path::new("a/config")), Format::Ron);
    }

    #[test]
    fn load_from_path_attaches_path() {
        let dir = env::temp_dir().join(format!("capchord-config-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let good = dir.join("good.ron");
        fs::write(&good, SAMPLE).unwrap();
        assert_eq!(load_from_path(&good).unwrap().general.len(), 3);

        let bad = dir.join("bad.json");
        fs::write(&bad, "{ nope").unwrap();
        let err = load_from_path(&bad).unwrap_err();
        assert_eq!(err.path(), Some(bad.as_path()));
        assert!(err.pretty().starts_with("Config parse error at "));

        let missing = dir.join("missing.ron");
        assert!(matches!(
            load_from_path(&missing),
            Err(Error::Read { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn explicit_path_wins() {
        let p = Path::new("/etc/capchord.ron");
        assert_eq!(resolve_config_path(Some(p)).unwrap(), p);
    }

    #[test]
    fn environment_path_beats_fallback() {
        let env_path = PathBuf::from("/srv/chords.json");
        let missing = PathBuf::from("/nonexistent/capchord/config.ron");
        assert_eq!(
            resolve_with(None, Some(env_path.clone()), missing.clone()).unwrap(),
            env_path
        );
        let err = resolve_with(None, None, missing.clone()).unwrap_err();
        assert_eq!(err.path(), Some(missing.as_path()));
        assert!(err.to_string().contains("--config"));
    }
}
