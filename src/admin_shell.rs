use serde::Serialize;
use serde_json::{Map, Value};

use crate::{auth::AuthUser, config::Environment};

/// EnvironmentBadge
///
/// The (label, colour-key) pair shown in the admin shell's top bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentBadge {
    pub label: String,
    /// One of "warning", "info", "success", "neutral".
    pub color: &'static str,
}

/// AdminShell
///
/// Typed configuration for the externally-rendered admin shell. Instead of
/// resolving callbacks from dotted string paths at render time, the shell
/// holds direct function references, so a missing callback is a compile
/// error rather than a runtime lookup failure.
#[derive(Clone)]
pub struct AdminShell {
    pub environment_badge: fn(&Environment) -> EnvironmentBadge,
    pub title_prefix: fn(&Environment) -> String,
    pub sidebar_badge: fn(Option<&AuthUser>) -> Option<u32>,
    pub sidebar_visible: fn(Option<&AuthUser>) -> bool,
}

impl Default for AdminShell {
    fn default() -> Self {
        Self {
            environment_badge,
            title_prefix: environment_title_prefix,
            sidebar_badge,
            sidebar_visible,
        }
    }
}

/// Adds the project name and the capitalized environment label to the
/// supplied dashboard context mapping and returns the augmented mapping.
pub fn dashboard_context(
    project_name: &str,
    environment: &Environment,
    mut context: Map<String, Value>,
) -> Map<String, Value> {
    context.insert("project".to_string(), Value::String(project_name.to_string()));
    context.insert(
        "environment".to_string(),
        Value::String(environment.label()),
    );
    context
}

/// Maps the environment to the top-bar badge. Total: unrecognized
/// environments keep their (capitalized) name and fall back to the
/// "neutral" colour key.
pub fn environment_badge(environment: &Environment) -> EnvironmentBadge {
    EnvironmentBadge {
        label: environment.label(),
        color: environment.color(),
    }
}

/// Page-title prefix showing the environment, e.g. `"[Development] "`.
pub fn environment_title_prefix(environment: &Environment) -> String {
    format!("[{}] ", environment.label())
}

/// Sidebar badge count: a fixed 3 for authenticated superusers, no badge for
/// everyone else. Anonymous callers (None) never get a badge.
pub fn sidebar_badge(user: Option<&AuthUser>) -> Option<u32> {
    match user {
        Some(u) if u.is_superuser => Some(3),
        _ => None,
    }
}

/// Sidebar visibility: authenticated staff only.
pub fn sidebar_visible(user: Option<&AuthUser>) -> bool {
    matches!(user, Some(u) if u.is_staff)
}
