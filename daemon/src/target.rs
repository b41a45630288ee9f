/// Identity of the one application this watcher reacts to.
///
/// Matching is deliberately loose: any identifier containing
/// [`TARGET_IDENTIFIER_FRAGMENT`] (stable, Beta, Dev and Canary channels all
/// share it) or a display name exactly equal to [`TARGET_DISPLAY_NAME`].
/// Both comparisons are case-sensitive.
use crate::event::TerminationEvent;

pub const TARGET_DISPLAY_NAME: &str = "Microsoft Edge";
pub const TARGET_IDENTIFIER_FRAGMENT: &str = "com.microsoft.edgemac";

/// Executable names the target runs under where no bundle identifier exists.
/// Compared case-insensitively against the process table.
pub const TARGET_EXECUTABLES: &[&str] = &[
    "msedge",
    "msedge.exe",
    "microsoft-edge",
    "microsoft-edge-stable",
    "microsoft-edge-beta",
    "microsoft-edge-dev",
];

/// Returns `true` if `event` describes a termination of the target.
///
/// The "Unknown" logging fallback never takes part here: absent fields
/// simply fail their predicate.
pub fn is_target(event: &TerminationEvent) -> bool {
    let by_identifier = event
        .identifier
        .as_deref()
        .is_some_and(|id| id.contains(TARGET_IDENTIFIER_FRAGMENT));
    let by_name = event.name.as_deref() == Some(TARGET_DISPLAY_NAME);
    by_identifier || by_name
}

/// Maps an executable name from the process table to the display name the
/// native notification facility would report for it.
pub fn display_name_for_executable(exe: &str) -> Option<&'static str> {
    let exe = exe.to_lowercase();
    TARGET_EXECUTABLES
        .iter()
        .any(|known| *known == exe)
        .then_some(TARGET_DISPLAY_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: Option<&str>, id: Option<&str>) -> TerminationEvent {
        TerminationEvent::new(name.map(str::to_string), id.map(str::to_string))
    }

    // ── is_target ─────────────────────────────────────────────────────────────

    #[test]
    fn matches_every_channel_identifier() {
        for id in [
            "com.microsoft.edgemac",
            "com.microsoft.edgemac.Beta",
            "com.microsoft.edgemac.Dev",
            "com.microsoft.edgemac.Canary",
        ] {
            assert!(is_target(&event(None, Some(id))), "{id} should match");
        }
    }

    #[test]
    fn matches_display_name_with_any_identifier() {
        assert!(is_target(&event(Some("Microsoft Edge"), Some("org.example.other"))));
        assert!(is_target(&event(Some("Microsoft Edge"), None)));
    }

    #[test]
    fn matches_when_both_predicates_hold() {
        assert!(is_target(&event(
            Some("Microsoft Edge"),
            Some("com.microsoft.edgemac.Canary")
        )));
    }

    #[test]
    fn identifier_substring_matches_anywhere() {
        assert!(is_target(&event(None, Some("x.com.microsoft.edgemac.helper"))));
    }

    #[test]
    fn rejects_unrelated_application() {
        assert!(!is_target(&event(Some("Safari"), Some("com.apple.Safari"))));
    }

    #[test]
    fn rejects_event_without_identity() {
        assert!(!is_target(&event(None, None)));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!is_target(&event(Some("microsoft edge"), None)));
        assert!(!is_target(&event(None, Some("COM.MICROSOFT.EDGEMAC"))));
    }

    #[test]
    fn name_must_match_exactly() {
        assert!(!is_target(&event(Some("Microsoft Edge Helper"), None)));
        assert!(!is_target(&event(Some(" Microsoft Edge"), None)));
    }

    #[test]
    fn unknown_sentinel_never_matches() {
        assert!(!is_target(&event(Some("Unknown"), Some("Unknown"))));
    }

    // ── display_name_for_executable ───────────────────────────────────────────

    #[test]
    fn known_executables_map_to_display_name() {
        assert_eq!(display_name_for_executable("msedge"), Some(TARGET_DISPLAY_NAME));
        assert_eq!(display_name_for_executable("MSEDGE.EXE"), Some(TARGET_DISPLAY_NAME));
        assert_eq!(
            display_name_for_executable("microsoft-edge-beta"),
            Some(TARGET_DISPLAY_NAME)
        );
    }

    #[test]
    fn other_executables_have_no_mapping() {
        assert_eq!(display_name_for_executable("firefox"), None);
        assert_eq!(display_name_for_executable("msedgewebview2.exe"), None);
    }
}
