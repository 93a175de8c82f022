use std::collections::BTreeMap;

use crate::domain::link::{group_prefix, Link};

/// Group name for links whose name carries no `-` prefix.
pub const UNGROUPED: &str = "others";

/// Outcome of resolving a queried name against the directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Exact(Link),
    Group(Vec<Link>),
    NotFound,
}

/// Resolves `query` with the `/go` precedence: an exact name match wins,
/// otherwise every link sharing `query` as its group prefix, otherwise
/// nothing.
pub fn resolve(links: &[Link], query: &str) -> Resolution {
    if let Some(link) = links.iter().find(|link| link.name == query) {
        return Resolution::Exact(link.clone());
    }

    let members = group_matches(links, query);
    if members.is_empty() {
        Resolution::NotFound
    } else {
        Resolution::Group(members)
    }
}

/// All links whose name's segment before the first `-` equals `prefix`,
/// sorted by name.
pub fn group_matches(links: &[Link], prefix: &str) -> Vec<Link> {
    let mut members: Vec<Link> =
        links.iter().filter(|link| group_prefix(&link.name) == Some(prefix)).cloned().collect();
    members.sort_by(|left, right| left.name.cmp(&right.name));
    members
}

/// A titled bucket of links for the `/list` view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkGroup {
    pub name: String,
    pub links: Vec<Link>,
}

/// Buckets the whole directory by group prefix for `/list`.
///
/// Groups come back sorted lexicographically by group name and links
/// within a group sorted by link name, so the rendered list is stable
/// across calls regardless of store iteration order. Names without a
/// prefix land in the [`UNGROUPED`] bucket.
pub fn group_links(links: &[Link]) -> Vec<LinkGroup> {
    let mut buckets: BTreeMap<&str, Vec<Link>> = BTreeMap::new();
    for link in links {
        let group = group_prefix(&link.name).unwrap_or(UNGROUPED);
        buckets.entry(group).or_default().push(link.clone());
    }

    buckets
        .into_iter()
        .map(|(name, mut members)| {
            members.sort_by(|left, right| left.name.cmp(&right.name));
            LinkGroup { name: name.to_string(), links: members }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{group_links, group_matches, resolve, Resolution, UNGROUPED};
    use crate::domain::link::Link;

    fn directory() -> Vec<Link> {
        vec![
            Link::new("eng-wiki", "https://wiki.example.com"),
            Link::new("eng-oncall", "https://oncall.example.com"),
            Link::new("meet", "https://meet.google.com"),
            Link::new("hr-handbook", "https://handbook.example.com"),
        ]
    }

    #[test]
    fn exact_match_wins_over_group_match() {
        let mut links = directory();
        links.push(Link::new("eng", "https://eng.example.com"));

        let resolution = resolve(&links, "eng");
        assert_eq!(resolution, Resolution::Exact(Link::new("eng", "https://eng.example.com")));
    }

    #[test]
    fn prefix_query_returns_group_members_sorted_by_name() {
        let resolution = resolve(&directory(), "eng");
        let members = match resolution {
            Resolution::Group(members) => members,
            other => panic!("expected group resolution, got {other:?}"),
        };
        let names: Vec<&str> = members.iter().map(|link| link.name.as_str()).collect();
        assert_eq!(names, ["eng-oncall", "eng-wiki"]);
    }

    #[test]
    fn unknown_name_resolves_to_not_found() {
        assert_eq!(resolve(&directory(), "nosuchname"), Resolution::NotFound);
        assert_eq!(resolve(&directory(), ""), Resolution::NotFound);
    }

    #[test]
    fn group_matches_requires_full_prefix_segment() {
        // "en" is a substring of "eng" but not its own group.
        assert!(group_matches(&directory(), "en").is_empty());
    }

    #[test]
    fn list_grouping_is_deterministic_and_complete() {
        let groups = group_links(&directory());
        let titles: Vec<&str> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(titles, ["eng", "hr", UNGROUPED]);

        let total: usize = groups.iter().map(|group| group.links.len()).sum();
        assert_eq!(total, 4, "every stored name appears in exactly one group");

        let eng: Vec<&str> = groups[0].links.iter().map(|link| link.name.as_str()).collect();
        assert_eq!(eng, ["eng-oncall", "eng-wiki"]);
    }

    #[test]
    fn dashless_names_bucket_under_the_fallback_group() {
        let groups = group_links(&[Link::new("meet", "https://meet.google.com")]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, UNGROUPED);
    }

    #[test]
    fn empty_directory_produces_no_groups() {
        assert!(group_links(&[]).is_empty());
    }
}
