//! Owner and group name lookup for the long format.
//!
//! [NameResolver] is the seam the renderer talks to. [SystemNames] backs it with the
//! system user and group databases; [NumericNames] never looks anything up.

use uzers::{Groups, Users, UsersCache};

/// Turns numeric owner and group IDs into display strings.
///
/// Implementations must not fail: when no symbolic name exists the decimal ID is returned.
pub trait NameResolver {
    fn resolve_user(&self, uid: u32) -> String;
    fn resolve_group(&self, gid: u32) -> String;
}

/// Resolver backed by the system user and group databases.
/// Lookups are cached for the lifetime of the resolver.
pub struct SystemNames {
    cache: UsersCache,
}

impl SystemNames {
    pub fn new() -> Self {
        Self {
            cache: UsersCache::new(),
        }
    }
}

impl Default for SystemNames {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver for SystemNames {
    fn resolve_user(&self, uid: u32) -> String {
        self.cache
            .get_user_by_uid(uid)
            .map(|user| user.name().to_string_lossy().into_owned())
            .unwrap_or_else(|| uid.to_string())
    }

    fn resolve_group(&self, gid: u32) -> String {
        self.cache
            .get_group_by_gid(gid)
            .map(|group| group.name().to_string_lossy().into_owned())
            .unwrap_or_else(|| gid.to_string())
    }
}

/// Resolver that always renders the numeric IDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericNames;

impl NameResolver for NumericNames {
    fn resolve_user(&self, uid: u32) -> String {
        uid.to_string()
    }

    fn resolve_group(&self, gid: u32) -> String {
        gid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_names_render_ids() {
        assert_eq!(NumericNames.resolve_user(1000), "1000");
        assert_eq!(NumericNames.resolve_group(0), "0");
    }

    #[test]
    fn unknown_ids_fall_back_to_numbers() {
        let names = SystemNames::new();
        // Far outside any allocated id range on a normal system.
        let uid = 3_999_999_991;
        assert_eq!(names.resolve_user(uid), uid.to_string());
        assert_eq!(names.resolve_group(uid), uid.to_string());
    }

    #[test]
    fn repeated_lookups_are_stable() {
        let names = SystemNames::new();
        let first = names.resolve_user(0);
        let second = names.resolve_user(0);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
