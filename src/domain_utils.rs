/// Minimal URL and domain helpers
pub struct DomainUtils;

/// The pieces of a URL the static checks look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme-completed URL, as handed to the probe
    pub url: String,
    /// Lower-cased host, without userinfo or port
    pub domain: String,
    /// Lower-cased raw query string, without the leading `?`
    pub query: String,
}

impl DomainUtils {
    /// Prepend `http://` unless the URL already names an http(s) scheme
    pub fn with_scheme(url: &str) -> String {
        let trimmed = url.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        }
    }

    /// Split a URL into domain and query without rejecting anything
    ///
    /// Malformed input still yields parts, rejecting it is left to the transport
    pub fn split(url: &str) -> UrlParts {
        let url = Self::with_scheme(url);

        let after_scheme = url.split_once("://").map_or(url.as_str(), |(_, rest)| rest);
        let authority_end = after_scheme
            .find(|c| matches!(c, '/' | '?' | '#'))
            .unwrap_or(after_scheme.len());
        let authority = &after_scheme[..authority_end];

        let without_fragment = url.split('#').next().unwrap_or("");
        let query = without_fragment
            .split_once('?')
            .map_or("", |(_, q)| q)
            .to_lowercase();

        UrlParts {
            domain: Self::host_of(authority),
            query,
            url,
        }
    }

    /// Host part of an authority (`user:pw@host:port`), lower-cased
    pub fn host_of(authority: &str) -> String {
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

        let host = if host_port.starts_with('[') {
            // IPv6 literal, keep the brackets
            match host_port.find(']') {
                Some(end) => &host_port[..=end],
                None => host_port,
            }
        } else {
            host_port.split(':').next().unwrap_or("")
        };

        host.to_lowercase()
    }

    /// Form compared against reference domains: lower-cased, one leading
    /// `www.` and any trailing root dot removed
    pub fn typo_candidate(domain: &str) -> String {
        let lower = domain.to_lowercase();
        let without_root = lower.trim_end_matches('.');
        without_root
            .strip_prefix("www.")
            .unwrap_or(without_root)
            .to_string()
    }
}
