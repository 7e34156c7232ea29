//! Local/remote branch correspondence.
//!
//! A local branch "corresponds" to a remote branch when some remote branch
//! has the same leaf name, i.e. the local `foo` matches `origin/foo` or
//! `upstream/foo`. Only names are compared; which remote published the
//! leaf, and where either branch points, do not matter.

use std::collections::HashSet;

/// Returns the leaf of a short remote branch name: everything after the
/// first `/`. Names without a separator have no leaf.
///
/// ```
/// use tips_core::classify::leaf_name;
///
/// assert_eq!(leaf_name("origin/feature/x"), Some("feature/x"));
/// assert_eq!(leaf_name("HEAD"), None);
/// ```
pub fn leaf_name(remote_short: &str) -> Option<&str> {
    remote_short.split_once('/').map(|(_, leaf)| leaf)
}

/// Returns the local branch names that have no corresponding remote
/// branch, in their original order.
///
/// Each local name is compared whole against the set of remote leaves, so
/// a local branch literally called `origin/main` only matches a remote
/// whose leaf is `origin/main`.
pub fn local_only_branches<'a, R, L>(remote_shorts: R, local_shorts: L) -> Vec<&'a str>
where
    R: IntoIterator<Item = &'a str>,
    L: IntoIterator<Item = &'a str>,
{
    let leaves: HashSet<&str> = remote_shorts.into_iter().filter_map(leaf_name).collect();
    local_shorts
        .into_iter()
        .filter(|local| !leaves.contains(local))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_unmatched_locals_remain() {
        let remotes = ["origin/main", "origin/dev", "upstream/main"];
        let locals = ["main", "dev", "experiment"];
        assert_eq!(local_only_branches(remotes, locals), vec!["experiment"]);
    }

    #[test]
    fn no_remotes_means_everything_is_local_only() {
        let remotes: [&str; 0] = [];
        assert_eq!(local_only_branches(remotes, ["main"]), vec!["main"]);
    }

    #[test]
    fn leaf_published_by_several_remotes_still_matches() {
        let remotes = ["origin/topic", "fork/topic"];
        assert!(local_only_branches(remotes, ["topic"]).is_empty());
    }

    #[test]
    fn leaf_keeps_nested_path() {
        let remotes = ["origin/feature/login"];
        let locals = ["feature/login", "login"];
        assert_eq!(local_only_branches(remotes, locals), vec!["login"]);
    }

    #[test]
    fn remote_without_separator_contributes_nothing() {
        let remotes = ["main"];
        assert_eq!(local_only_branches(remotes, ["main"]), vec!["main"]);
    }

    #[test]
    fn local_named_like_a_remote_is_compared_whole() {
        let remotes = ["origin/main"];
        assert_eq!(
            local_only_branches(remotes, ["origin/main"]),
            vec!["origin/main"]
        );

        let remotes = ["upstream/origin/main"];
        assert!(local_only_branches(remotes, ["origin/main"]).is_empty());
    }

    #[test]
    fn preserves_local_order() {
        let remotes = ["origin/b"];
        let locals = ["d", "b", "a", "c"];
        assert_eq!(local_only_branches(remotes, locals), vec!["d", "a", "c"]);
    }
}
