//! Per-run build parameters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A step the caller asked the packager to perform.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Action {
    /// Copy selected files into the staging tree.
    Copy,
    /// Produce the final installer artifact.
    Package,
    /// Prepare the staged tree for running in place (no artifact).
    Unpacked,
}

impl Action {
    /// Parses an action name as given on the command line.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "copy" => Some(Action::Copy),
            "package" => Some(Action::Package),
            "unpacked" => Some(Action::Unpacked),
            _ => None,
        }
    }

    /// Lowercase action name.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Package => "package",
            Action::Unpacked => "unpacked",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Build parameters for one packaging run.
///
/// Immutable once handed to [`Settings`](super::Settings); every component
/// reads channel, grid and version from here instead of process-wide state.
///
/// `channel` and `grid` are optional at construction time so that a missing
/// value surfaces as a configuration error from the naming policy, at the
/// point where it is first needed.
#[derive(Clone, Debug, Default)]
pub struct BuildContext {
    /// Build configuration (`Debug`, `Release`, `RelWithDebInfo`).
    pub configuration: String,

    /// Channel name, e.g. "Second Life Release".
    pub channel: Option<String>,

    /// Target grid, e.g. "agni".
    pub grid: Option<String>,

    /// Channel reported at login only, for A/B testing.
    ///
    /// Never defaulted to `channel`; its absence is meaningful.
    pub login_channel: Option<String>,

    /// Ordered version components, e.g. `["1", "22", "11", "113941"]`.
    pub version: Vec<String>,

    /// Requested actions.
    pub actions: BTreeSet<Action>,

    /// Explicit installer file name, overriding the derived one.
    pub installer_name: Option<String>,

    /// Additional free-form arguments (`--extra key=value`).
    pub extra_args: BTreeMap<String, String>,
}

impl BuildContext {
    /// Whether `action` was requested.
    pub fn wants(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    /// Version components joined with `sep`.
    pub fn version_joined(&self, sep: &str) -> String {
        self.version.join(sep)
    }

    /// Version without its last (build number) component, joined with dots.
    pub fn version_short(&self) -> String {
        let end = self.version.len().saturating_sub(1);
        self.version[..end].join(".")
    }

    /// Looks up a free-form `--extra` argument.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra_args.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_forms() {
        let context = BuildContext {
            version: vec!["1".into(), "22".into(), "11".into(), "113941".into()],
            ..Default::default()
        };
        assert_eq!(context.version_joined("."), "1.22.11.113941");
        assert_eq!(context.version_joined("-"), "1-22-11-113941");
        assert_eq!(context.version_short(), "1.22.11");
    }

    #[test]
    fn test_version_short_of_empty_version() {
        assert_eq!(BuildContext::default().version_short(), "");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse(" Package "), Some(Action::Package));
        assert_eq!(Action::parse("deploy"), None);
    }
}
