// Defaults for the settings block

/// Idle gap after which a partial chord is discarded.
pub(crate) const TIMEOUT_MS: u64 = 5_000;

/// Placeholder replaced by the macro payload in `macro_command`.
pub const MACRO_PLACEHOLDER: &str = "{macro}";

/// Send the payload as X11 key presses.
pub(crate) const MACRO_COMMAND: &str = "xdotool key {macro}";

/// Ask X11 for the WM_CLASS of the focused window.
pub(crate) const FOCUS_COMMAND: &str = "xprop -id \"$(xdotool getwindowfocus)\" WM_CLASS";

/// Pick the class name (second WM_CLASS string) out of the xprop output.
pub(crate) const FOCUS_PATTERN: &str = r#"WM_CLASS\(STRING\) = "[^"]*", "(?P<app>[^"]*)""#;

// Serde default functions
pub(crate) const fn default_timeout_ms() -> u64 {
    TIMEOUT_MS
}
pub(crate) fn default_macro_command() -> String {
    MACRO_COMMAND.to_string()
}
pub(crate) fn default_focus_command() -> Option<String> {
    Some(FOCUS_COMMAND.to_string())
}
pub(crate) fn default_focus_pattern() -> Option<String> {
    Some(FOCUS_PATTERN.to_string())
}
