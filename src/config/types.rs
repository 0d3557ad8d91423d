use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    #[serde(default = "default_true")]
    pub headless: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Upper bound for page navigation.
    #[serde(default = "default_nav_timeout")]
    pub nav_timeout_secs: u64,
    /// Upper bound for the result container to become visible.
    #[serde(default = "default_ready_timeout")]
    pub ready_timeout_secs: u64,
    /// Fixed grace period after committing to a row, before polling
    /// readiness again. The only tolerated unconditional wait.
    #[serde(default = "default_settle_wait")]
    pub settle_wait_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            user_agent: default_user_agent(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            nav_timeout_secs: default_nav_timeout(),
            ready_timeout_secs: default_ready_timeout(),
            settle_wait_ms: default_settle_wait(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Ordered airline vocabulary scanned against each rendered row.
    /// First substring match wins, so keep more specific names earlier.
    #[serde(default = "default_airlines")]
    pub airlines: Vec<String>,
    /// Directory for failure screenshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            airlines: default_airlines(),
            snapshot_dir: default_snapshot_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36".into()
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_nav_timeout() -> u64 {
    30
}

fn default_ready_timeout() -> u64 {
    10
}

fn default_settle_wait() -> u64 {
    3000
}

fn default_base_url() -> String {
    "https://www.google.com/travel/flights".into()
}

fn default_airlines() -> Vec<String> {
    [
        "JetBlue",
        "Delta",
        "American",
        "United",
        "Southwest",
        "Alaska",
        "Spirit",
        "Frontier",
        "Hawaiian",
        "Breeze",
        "British Airways",
        "Virgin Atlantic",
        "Air France",
        "KLM",
        "Lufthansa",
        "Iberia",
        "Aer Lingus",
        "Turkish Airlines",
        "Emirates",
        "Qatar Airways",
        "Air Canada",
        "WestJet",
        "Avianca",
        "Copa",
        "LATAM",
        "ANA",
        "Japan Airlines",
        "Korean Air",
        "Singapore Airlines",
        "Cathay Pacific",
        "Qantas",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_snapshot_dir() -> String {
    "logs".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_config_defaults() {
        let config = Config::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.viewport_width, 1280);
        assert_eq!(config.browser.viewport_height, 720);
        assert_eq!(config.browser.nav_timeout_secs, 30);
        assert_eq!(config.browser.ready_timeout_secs, 10);
        assert_eq!(config.browser.settle_wait_ms, 3000);
        assert!(config.browser.user_agent.contains("Mozilla"));
    }

    #[test]
    fn search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url, "https://www.google.com/travel/flights");
        assert_eq!(config.snapshot_dir, "logs");
        assert!(config.airlines.iter().any(|a| a == "JetBlue"));
        assert!(config.airlines.iter().any(|a| a == "Delta"));
    }

    #[test]
    fn config_serde_roundtrip() {
        let original = Config::default();
        let yaml = serde_yml::to_string(&original).unwrap();
        let restored: Config = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(restored.browser.headless, original.browser.headless);
        assert_eq!(restored.search.airlines, original.search.airlines);
        assert_eq!(
            restored.browser.settle_wait_ms,
            original.browser.settle_wait_ms
        );
    }

    #[test]
    fn config_deserialize_with_overrides() {
        let yaml = "browser:\n  headless: false\n  ready_timeout_secs: 20";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.browser.ready_timeout_secs, 20);
        // Other fields get defaults
        assert_eq!(config.browser.nav_timeout_secs, 30);
        assert!(!config.search.airlines.is_empty());
    }

    #[test]
    fn airline_vocabulary_override_replaces_list() {
        let yaml = "search:\n  airlines: [\"Ryanair\", \"easyJet\"]";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.search.airlines, vec!["Ryanair", "easyJet"]);
    }
}
