use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Reference domains that lookalikes are measured against
    pub known_domains: Vec<String>,
    /// Any domain containing one of these is rejected outright
    pub blacklisted_domains: Vec<String>,
    pub sqli_patterns: Vec<String>,
    pub xss_patterns: Vec<String>,
    /// A similarity ratio must be strictly greater than this to count as a typo
    pub similarity_threshold: f64,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub timeout_seconds: f64,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Honour HTTP(S)_PROXY from the environment
    pub use_system_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            timeout_seconds: 5.0,
            max_redirects: 30,
            user_agent: format!("url-checker/{}", env!("CARGO_PKG_VERSION")),
            use_system_proxy: true,
        }
    }
}

/// Longest probe timeout a configuration may ask for
pub const MAX_TIMEOUT_SECONDS: f64 = 3600.0;

impl ProbeConfig {
    /// Probe timeout; out-of-range values fall back to the default.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds.min(MAX_TIMEOUT_SECONDS))
            .unwrap_or_else(|_| Duration::from_secs(5))
    }
}

const KNOWN_DOMAINS: &[&str] = &[
    "google.com",
    "facebook.com",
    "twitter.com",
    "github.com",
    "youtube.com",
    "chatgpt.com",
    "stackoverflow.com",
    "reddit.com",
    "wikipedia.org",
    "amazon.com",
    "ebay.com",
    "microsoft.com",
    "apple.com",
    "netflix.com",
    "openai.com",
    "dropbox.com",
    "pinterest.com",
    "tumblr.com",
    "paypal.com",
    "quora.com",
    "medium.com",
    "nytimes.com",
    "bbc.com",
    "cnn.com",
    "yahoo.com",
    "bing.com",
    "whatsapp.com",
    "telegram.org",
    "tiktok.com",
    "spotify.com",
    "soundcloud.com",
    "slack.com",
    "notion.so",
    "airbnb.com",
    "uber.com",
    "zoom.us",
];

const BLACKLISTED_DOMAINS: &[&str] = &[
    "malicious.com",
    "phishing.com",
    "badwebsite.net",
    "evil.com",
    "hacksite.org",
    "dangeroussite.io",
    "fakebank.com",
    "stealsinfo.net",
    "clickfraud.com",
    "virusdownload.com",
    "spammydomain.org",
    "scamalert.com",
    "fakepaypal.com",
    "fakegoogle.com",
    "malwaretest.com",
    "phishingsite.com",
    "trojanexample.com",
    "dangerouslink.net",
    "keyloggerdownload.com",
    "untrustedsite.org",
];

const SQLI_PATTERNS: &[&str] = &[
    // quote, comment or encoded hash anywhere in the query
    r"(%27)|(')|(--)|(%23)|(#)",
    // an assignment followed by a quote, comment or terminator; the run in
    // between may not contain a backslash or the letter n
    r"((%3D)|(=))[^\\n]*((%27)|(')|(--)|(%3B)|(;))",
];

const XSS_PATTERNS: &[&str] = &[
    r"<script.*?>",
    r"</script>",
    r"javascript:",
    r"onerror=",
    r"onload=",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            known_domains: owned(KNOWN_DOMAINS),
            blacklisted_domains: owned(BLACKLISTED_DOMAINS),
            sqli_patterns: owned(SQLI_PATTERNS),
            xss_patterns: owned(XSS_PATTERNS),
            similarity_threshold: 0.85,
            probe: ProbeConfig::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            bail!(
                "similarity_threshold must be within 0.0..=1.0, got {}",
                self.similarity_threshold
            );
        }
        let timeout = self.probe.timeout_seconds;
        if !timeout.is_finite() || timeout <= 0.0 {
            bail!("probe.timeout_seconds must be a positive number, got {timeout}");
        }
        if timeout > MAX_TIMEOUT_SECONDS {
            bail!("probe.timeout_seconds must not exceed {MAX_TIMEOUT_SECONDS}, got {timeout}");
        }
        if self.probe.user_agent.trim().is_empty() {
            bail!("probe.user_agent must not be empty");
        }
        Ok(())
    }
}
