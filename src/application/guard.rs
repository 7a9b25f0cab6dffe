//! Route guard: a pure predicate over route metadata and session state.
//!
//! The embedding router owns navigation; this module only decides. A
//! `Forbidden` decision carries the message the UI should surface.

use crate::domain::types::Role;

/// Access requirements attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    /// `None` means any authenticated role may enter.
    pub allowed_roles: Option<Vec<Role>>,
}

impl RouteMeta {
    pub fn open() -> Self {
        Self {
            requires_auth: false,
            allowed_roles: None,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            allowed_roles: None,
        }
    }

    pub fn roles(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            requires_auth: true,
            allowed_roles: Some(roles.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub meta: RouteMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    Forbidden { message: String },
}

/// The console's route table: list and recycle bin are gated by role,
/// everything else is open.
pub fn console_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry {
            path: "/login",
            meta: RouteMeta::open(),
        },
        RouteEntry {
            path: "/register",
            meta: RouteMeta::open(),
        },
        RouteEntry {
            path: "/travel-list",
            meta: RouteMeta::roles([Role::Admin, Role::Auditor]),
        },
        RouteEntry {
            path: "/recycle-bin",
            meta: RouteMeta::roles([Role::Admin]),
        },
    ]
}

/// Evaluate one navigation against a route's requirements.
pub fn evaluate(meta: &RouteMeta, token: Option<&str>, role: Option<Role>) -> GuardDecision {
    if !meta.requires_auth {
        return GuardDecision::Allow;
    }

    if token.is_none_or(str::is_empty) {
        return GuardDecision::RedirectToLogin;
    }

    if let Some(allowed) = &meta.allowed_roles {
        let permitted = role.is_some_and(|role| allowed.contains(&role));
        if !permitted {
            return GuardDecision::Forbidden {
                message: "You do not have permission to access this page".to_string(),
            };
        }
    }

    GuardDecision::Allow
}

/// Table lookup + evaluation; paths absent from the table pass, matching
/// routes that declare no metadata.
pub fn evaluate_path(
    routes: &[RouteEntry],
    path: &str,
    token: Option<&str>,
    role: Option<Role>,
) -> GuardDecision {
    match routes.iter().find(|entry| entry.path == path) {
        Some(entry) => evaluate(&entry.meta, token, role),
        None => GuardDecision::Allow,
    }
}
