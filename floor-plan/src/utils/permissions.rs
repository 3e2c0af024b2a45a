//! Permission Definitions
//!
//! Simplified RBAC permission system.
//!
//! - Viewing layouts and logs needs no permission, signing in is enough
//! - Module permissions grant create/update/delete within one module
//! - `module:*` grants every permission of a module, `all` grants everything

/// Layout editing (zones and tables)
pub const TABLES_MANAGE: &str = "tables:manage";
/// Walking the food-safety alert workflow
pub const ALERTS_HANDLE: &str = "alerts:handle";

/// Configurable permissions
pub const ALL_PERMISSIONS: &[&str] = &[
    TABLES_MANAGE,
    "zones:manage",
    "reservations:manage",
    ALERTS_HANDLE,
    "temperatures:log",
    "cleaning:log",
    "reports:view",
    "settings:manage",
];

/// Admin-only permissions (not in the configurable list)
pub const ADMIN_ONLY_PERMISSIONS: &[&str] = &["users:manage", "all"];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_MANAGER_PERMISSIONS: &[&str] = &[
    TABLES_MANAGE,
    "zones:manage",
    "reservations:manage",
    ALERTS_HANDLE,
    "temperatures:log",
    "cleaning:log",
    "reports:view",
    "settings:manage",
];

pub const DEFAULT_USER_PERMISSIONS: &[&str] = &[ALERTS_HANDLE, "temperatures:log", "cleaning:log"];

/// Get permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<String> {
    let perms: &[&str] = match role_name {
        "admin" => DEFAULT_ADMIN_PERMISSIONS,
        "manager" => DEFAULT_MANAGER_PERMISSIONS,
        "user" => DEFAULT_USER_PERMISSIONS,
        _ => &[],
    };
    perms.iter().map(|s| s.to_string()).collect()
}

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    ALL_PERMISSIONS.contains(&permission)
        || ADMIN_ONLY_PERMISSIONS.contains(&permission)
        || permission.ends_with(":*")
}

/// Whether `granted` satisfies `required`
pub fn permission_granted(granted: &[String], required: &str) -> bool {
    let module = required.split(':').next().unwrap_or(required);
    granted.iter().any(|p| {
        p == "all"
            || p == required
            || p.strip_suffix(":*").is_some_and(|m| m == module)
    })
}
