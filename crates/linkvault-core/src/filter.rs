//! Link filtering
//!
//! A [`LinkFilter`] combines a case-insensitive search term with an exact
//! platform match. Filtering never reorders or mutates the input.

use std::collections::BTreeMap;

use crate::models::Link;

/// Search term plus platform selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    search: String,
    platform: String,
}

impl LinkFilter {
    /// Build a filter; empty strings match everything
    pub fn new(search: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            search: search.into().to_lowercase(),
            platform: platform.into(),
        }
    }

    /// Filter that matches every link
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.platform.is_empty()
    }

    /// Check a single link against both predicates
    pub fn matches(&self, link: &Link) -> bool {
        self.matches_search(link) && self.matches_platform(link)
    }

    fn matches_search(&self, link: &Link) -> bool {
        let term = self.search.as_str();
        term.is_empty()
            || link.url.to_lowercase().contains(term)
            || link.platform.to_lowercase().contains(term)
            || link.description.to_lowercase().contains(term)
            || link.tags.iter().any(|t| t.to_lowercase().contains(term))
    }

    fn matches_platform(&self, link: &Link) -> bool {
        self.platform.is_empty() || link.platform == self.platform
    }

    /// Keep the matching links in their original order
    pub fn apply<'a, I>(&self, links: I) -> Vec<&'a Link>
    where
        I: IntoIterator<Item = &'a Link>,
    {
        links.into_iter().filter(|l| self.matches(l)).collect()
    }
}

/// Shorthand for `LinkFilter::new(search, platform).apply(links)`
pub fn filter_links<'a>(links: &'a [Link], search: &str, platform: &str) -> Vec<&'a Link> {
    LinkFilter::new(search, platform).apply(links)
}

/// Distinct platforms with usage counts, sorted by name
pub fn platforms_with_counts<'a, I>(links: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Link>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for link in links {
        *counts.entry(link.platform.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// Distinct tags with usage counts, sorted by name
pub fn tags_with_counts<'a, I>(links: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Link>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for link in links {
        for tag in &link.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(id: &str, platform: &str, url: &str, tags: &[&str], description: &str) -> Link {
        let now = Utc::now();
        Link {
            id: id.to_string(),
            url: url.to_string(),
            platform: platform.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: description.to_string(),
            date_added: now,
            date_modified: now,
        }
    }

    fn sample() -> Vec<Link> {
        vec![
            link("1", "GitHub", "https://github.com/a", &[], ""),
            link("2", "Reddit", "https://reddit.com/b", &["fun"], ""),
        ]
    }

    fn ids(links: &[&Link]) -> Vec<String> {
        links.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let links = sample();
        let result = filter_links(&links, "", "");
        assert_eq!(ids(&result), vec!["1", "2"]);
        assert!(LinkFilter::all().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let links = sample();
        assert_eq!(ids(&filter_links(&links, "git", "")), vec!["1"]);
        assert_eq!(ids(&filter_links(&links, "GIT", "")), vec!["1"]);
    }

    #[test]
    fn test_platform_is_exact() {
        let links = sample();
        assert_eq!(ids(&filter_links(&links, "", "Reddit")), vec!["2"]);
        assert!(filter_links(&links, "", "reddit").is_empty());
        assert!(filter_links(&links, "", "Red").is_empty());
    }

    #[test]
    fn test_no_match() {
        let links = sample();
        assert!(filter_links(&links, "zzz", "").is_empty());
    }

    #[test]
    fn test_search_covers_tags_and_description() {
        let mut links = sample();
        links.push(link(
            "3",
            "Blog",
            "https://example.com",
            &[],
            "A Fun read",
        ));
        assert_eq!(ids(&filter_links(&links, "fun", "")), vec!["2", "3"]);
    }

    #[test]
    fn test_both_predicates_required() {
        let links = sample();
        assert!(filter_links(&links, "git", "Reddit").is_empty());
        assert_eq!(ids(&filter_links(&links, "fun", "Reddit")), vec!["2"]);
    }

    #[test]
    fn test_idempotent() {
        let mut links = sample();
        links.push(link("3", "GitHub", "https://github.com/c", &["fun"], ""));
        let filter = LinkFilter::new("fun", "GitHub");

        let once = filter.apply(&links);
        let twice = filter.apply(once.iter().copied());
        assert_eq!(once, twice);
        assert_eq!(ids(&twice), vec!["3"]);
    }

    #[test]
    fn test_platform_and_tag_counts() {
        let mut links = sample();
        links.push(link("3", "GitHub", "https://github.com/c", &["fun", "rust"], ""));

        assert_eq!(
            platforms_with_counts(&links),
            vec![("GitHub".to_string(), 2), ("Reddit".to_string(), 1)]
        );
        assert_eq!(
            tags_with_counts(&links),
            vec![("fun".to_string(), 2), ("rust".to_string(), 1)]
        );
    }
}
