use crate::config::ClassifierConfig;
use crate::domain_utils::{DomainUtils, UrlParts};
use crate::probe::{FetchError, Fetcher, HttpFetcher};
use crate::similarity;
use crate::verdict::Verdict;
use anyhow::Context;
use regex::{Regex, RegexBuilder};
use std::time::Duration;

/// Ordered guard pipeline that turns a raw URL into a [`Verdict`].
///
/// Guards run blacklist, typo, SQL injection, XSS and finally the optional
/// reachability probe; the first one that fires decides the verdict.
pub struct UrlClassifier {
    known_domains: Vec<String>,
    blacklisted_domains: Vec<String>,
    sqli_patterns: Vec<Regex>,
    xss_patterns: Vec<Regex>,
    similarity_threshold: f64,
    timeout: Duration,
    fetcher: HttpFetcher,
}

fn compile_patterns(patterns: &[String], kind: &str) -> anyhow::Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .with_context(|| format!("Invalid {kind} pattern '{pattern}'"))
        })
        .collect()
}

impl UrlClassifier {
    pub fn new(config: ClassifierConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let sqli_patterns = compile_patterns(&config.sqli_patterns, "SQL injection")?;
        let xss_patterns = compile_patterns(&config.xss_patterns, "XSS")?;
        let fetcher =
            HttpFetcher::new(&config.probe).context("Failed to build HTTP client for probe")?;

        Ok(Self {
            known_domains: config.known_domains.iter().map(|d| d.to_lowercase()).collect(),
            blacklisted_domains: config
                .blacklisted_domains
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
            sqli_patterns,
            xss_patterns,
            similarity_threshold: config.similarity_threshold,
            timeout: config.probe.timeout(),
            fetcher,
        })
    }

    /// Classify using the built-in HTTP fetcher for the reachability probe
    pub async fn check(&self, url: &str) -> Verdict {
        self.classify(url, Some(&self.fetcher)).await
    }

    /// Classify a URL. Never fails: every problem is reported as a verdict.
    ///
    /// Without a fetcher the reachability probe is skipped.
    pub async fn classify(&self, url: &str, fetcher: Option<&dyn Fetcher>) -> Verdict {
        let parts = DomainUtils::split(url);

        if let Some(verdict) = self.static_verdict(&parts) {
            return verdict;
        }

        let Some(fetcher) = fetcher else {
            log::debug!("No fetcher supplied, skipping reachability probe for {}", parts.url);
            return Verdict::safe("No issues detected (reachability not checked)");
        };

        let outcome = match tokio::time::timeout(self.timeout, fetcher.get(&parts.url, self.timeout))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };

        let verdict = probe_verdict(outcome);
        log::info!("{} -> {}", parts.url, verdict);
        verdict
    }

    /// Run the static guards only
    pub fn static_verdict(&self, parts: &UrlParts) -> Option<Verdict> {
        if let Some(bad) = self.blacklisted_match(&parts.domain) {
            log::debug!("Blacklist guard hit for {}: {}", parts.domain, bad);
            return Some(Verdict::unsafe_(format!("Domain {bad} is blacklisted"), 0));
        }

        if let Some(reference) = self.typo_match(&parts.domain) {
            log::debug!("Typo guard hit for {}: resembles {}", parts.domain, reference);
            return Some(Verdict::risky(
                format!("Domain looks like a typo of a known domain ({reference})"),
                20,
            ));
        }

        if let Some(pattern) = first_match(&self.sqli_patterns, &parts.query) {
            log::debug!("SQL injection guard hit on query '{}': {}", parts.query, pattern);
            return Some(Verdict::unsafe_("Potential SQL Injection detected", 30));
        }

        if let Some(pattern) = first_match(&self.xss_patterns, &parts.query) {
            log::debug!("XSS guard hit on query '{}': {}", parts.query, pattern);
            return Some(Verdict::unsafe_("Potential XSS detected", 40));
        }

        None
    }

    /// Substring match, so subdomains and embedded labels are caught too
    pub fn blacklisted_match(&self, domain: &str) -> Option<&str> {
        let domain = domain.to_lowercase();
        self.blacklisted_domains
            .iter()
            .find(|bad| domain.contains(bad.as_str()))
            .map(String::as_str)
    }

    /// Known domain this one is a near miss of, if any
    pub fn typo_match(&self, domain: &str) -> Option<&str> {
        let candidate = DomainUtils::typo_candidate(domain);
        self.known_domains
            .iter()
            .find(|known| {
                candidate != **known
                    && similarity::lookalike_ratio(&candidate, known) > self.similarity_threshold
            })
            .map(String::as_str)
    }
}

fn first_match<'a>(patterns: &'a [Regex], query: &str) -> Option<&'a str> {
    patterns
        .iter()
        .find(|re| re.is_match(query))
        .map(Regex::as_str)
}

/// Map the outcome of the reachability probe onto a verdict
pub fn probe_verdict(outcome: Result<u16, FetchError>) -> Verdict {
    match outcome {
        Ok(status) if status >= 400 => Verdict::risky(format!("HTTP status {status}"), 50),
        Ok(_) => Verdict::safe("No issues detected"),
        Err(FetchError::Timeout) => Verdict::unsafe_("Connection timed out", 10),
        Err(FetchError::Connect(_)) => Verdict::unsafe_("Could not connect to the server", 10),
        Err(FetchError::TooManyRedirects) => {
            Verdict::unsafe_("Too many redirects (possible redirect loop)", 15)
        }
        Err(FetchError::Tls(_)) => {
            Verdict::unsafe_("SSL certificate error (site may be unsafe)", 20)
        }
        Err(FetchError::InvalidUrl(_)) => Verdict::unsafe_("Invalid URL format", 5),
        Err(FetchError::Other(e)) => Verdict::unsafe_(format!("Unexpected error: {e}"), 10),
    }
}
