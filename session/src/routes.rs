//! Application route table and role-based destinations.
//!
//! SYSTEM CONTEXT
//! ==============
//! The web router, the route guard, and the session store all agree on paths
//! and access classes through this table.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::types::Role;

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const DEPOSIT: &str = "/deposit";
pub const WITHDRAW: &str = "/withdraw";
pub const TRANSFER: &str = "/transfer";
pub const HISTORY: &str = "/history";
pub const ADMIN: &str = "/admin";
pub const ADMIN_USERS: &str = "/admin/users";
pub const ADMIN_TRANSACTIONS: &str = "/admin/transactions";

/// Any authenticated role.
pub const ANY_ROLE: &[Role] = &[];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires a session; an empty role set means any authenticated role.
    Protected(&'static [Role]),
}

pub const ROUTES: &[(&str, Access)] = &[
    (HOME, Access::Public),
    (LOGIN, Access::Public),
    (REGISTER, Access::Public),
    (DASHBOARD, Access::Protected(ANY_ROLE)),
    (DEPOSIT, Access::Protected(ANY_ROLE)),
    (WITHDRAW, Access::Protected(ANY_ROLE)),
    (TRANSFER, Access::Protected(ANY_ROLE)),
    (HISTORY, Access::Protected(ANY_ROLE)),
    (ADMIN, Access::Protected(ADMIN_ONLY)),
    (ADMIN_USERS, Access::Protected(ADMIN_ONLY)),
    (ADMIN_TRANSACTIONS, Access::Protected(ADMIN_ONLY)),
];

/// Access class for a location, ignoring query, fragment, and trailing slash.
#[must_use]
pub fn access_for(location: &str) -> Option<Access> {
    let path = strip_location(location);
    ROUTES.iter().find(|(p, _)| *p == path).map(|(_, access)| *access)
}

/// Default view for a freshly authenticated user.
#[must_use]
pub fn landing_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN,
        Role::Customer => DASHBOARD,
    }
}

/// Whether `role` satisfies `required` (empty means any role).
#[must_use]
pub fn role_permits(role: Role, required: &[Role]) -> bool {
    required.is_empty() || required.contains(&role)
}

/// Login URL carrying the location to return to after sign-in.
#[must_use]
pub fn login_with_return(from: &str) -> String {
    if !is_safe_return(from) || strip_location(from) == HOME || strip_location(from) == LOGIN {
        return LOGIN.to_owned();
    }
    format!("{LOGIN}?from={}", encode_query_value(from))
}

/// Rejoin a router location split into pathname and search string.
///
/// `search` may carry its leading `?` or not.
#[must_use]
pub fn full_location(pathname: &str, search: &str) -> String {
    match search.trim_start_matches('?') {
        "" => pathname.to_owned(),
        query => format!("{pathname}?{query}"),
    }
}

/// A local absolute path, not a scheme-relative or absolute URL.
#[must_use]
pub fn is_safe_return(location: &str) -> bool {
    location.starts_with('/') && !location.starts_with("//") && !location.contains('\\') && !location.contains("://")
}

/// Where to go after login: the requested protected location when the role
/// may open it, otherwise the role's landing view.
#[must_use]
pub fn post_login_destination(role: Role, return_to: Option<&str>) -> String {
    let Some(location) = return_to.filter(|l| is_safe_return(l)) else {
        return landing_for(role).to_owned();
    };
    match access_for(location) {
        Some(Access::Protected(required)) if role_permits(role, required) => location.to_owned(),
        _ => landing_for(role).to_owned(),
    }
}

fn strip_location(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    if path.len() > 1 { path.trim_end_matches('/') } else { path }
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
