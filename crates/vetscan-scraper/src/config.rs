//! Scraper settings: browser stealth profile, target platform, and timings.

use std::path::PathBuf;
use std::time::Duration;

use vetscan_core::AppConfig;

/// Hard cap on scroll iterations per search.
pub const MAX_SCROLL_ITERATIONS: usize = 8;

/// Hard cap on result nodes handed to field extraction per search.
pub const MAX_RESULT_NODES: usize = 30;

/// Patch evaluated before any page script runs; hides the common
/// automation markers.
pub const AUTOMATION_MARKER_PATCH: &str = r"
Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3, 4, 5] });
window.chrome = window.chrome || { runtime: {} };
";

/// Browser launch profile tuned to look like an ordinary desktop Chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StealthConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    /// Appended after the built-in launch flags.
    pub extra_args: Vec<String>,
    pub patch_script: String,
}

impl Default for StealthConfig {
    fn default() -> Self {
        Self {
            user_agent: vetscan_core::config::DEFAULT_USER_AGENT.to_string(),
            viewport_width: 1920,
            viewport_height: 1080,
            headless: true,
            chrome_executable: None,
            extra_args: Vec::new(),
            patch_script: AUTOMATION_MARKER_PATCH.to_string(),
        }
    }
}

impl StealthConfig {
    /// Launch flags for Chrome, without the automation switch Chrome adds by
    /// default.
    #[must_use]
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-dev-shm-usage".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-gpu".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-popup-blocking".to_string(),
            format!("--user-agent={}", self.user_agent),
            format!(
                "--window-size={},{}",
                self.viewport_width, self.viewport_height
            ),
        ];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Where and how to search, and which parts of the result page matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    pub search_base_url: String,
    /// Links whose host is this domain (or a subdomain) are not websites.
    pub domain: String,
    /// Lower-cased branding text that disqualifies a name candidate.
    pub brand: String,
    pub feed_selector: String,
    pub result_selector: String,
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self {
            search_base_url: vetscan_core::config::DEFAULT_SEARCH_BASE_URL.to_string(),
            domain: "google.com".to_string(),
            brand: "google".to_string(),
            feed_selector: "[role='feed']".to_string(),
            result_selector: "[role='feed'] > div > div > div".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long to wait for the results feed after navigating.
    pub feed_timeout: Duration,
    /// Pause after the feed appears, before scrolling starts.
    pub settle_delay: Duration,
    /// Pause after each scroll before re-measuring the feed.
    pub scroll_settle: Duration,
    /// Deadline for one whole search.
    pub search_timeout: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            feed_timeout: Duration::from_secs(15),
            settle_delay: Duration::from_secs(2),
            scroll_settle: Duration::from_secs(2),
            search_timeout: Duration::from_secs(120),
        }
    }
}

impl Timings {
    /// All waits zeroed; only the search deadline is kept.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            feed_timeout: Duration::ZERO,
            settle_delay: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            search_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScraperConfig {
    pub stealth: StealthConfig,
    pub platform: PlatformProfile,
    pub timings: Timings,
}

impl ScraperConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            stealth: StealthConfig {
                user_agent: config.user_agent.clone(),
                viewport_width: config.viewport_width,
                viewport_height: config.viewport_height,
                headless: config.headless,
                chrome_executable: config.chrome_executable.clone(),
                ..StealthConfig::default()
            },
            platform: PlatformProfile {
                search_base_url: config.search_base_url.clone(),
                domain: config.platform_domain.clone(),
                brand: config.platform_brand.clone(),
                ..PlatformProfile::default()
            },
            timings: Timings {
                feed_timeout: Duration::from_secs(config.feed_timeout_secs),
                settle_delay: Duration::from_millis(config.settle_delay_ms),
                scroll_settle: Duration::from_millis(config.scroll_settle_ms),
                search_timeout: Duration::from_secs(config.search_timeout_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_args_drop_automation_switch_and_carry_profile() {
        let stealth = StealthConfig {
            user_agent: "UA/1.0".to_string(),
            viewport_width: 1280,
            viewport_height: 720,
            extra_args: vec!["--lang=ar".to_string()],
            ..StealthConfig::default()
        };
        let args = stealth.launch_args();
        assert!(!args.iter().any(|a| a == "--enable-automation"));
        assert!(args.contains(&"--disable-blink-features=AutomationControlled".to_string()));
        assert!(args.contains(&"--user-agent=UA/1.0".to_string()));
        assert!(args.contains(&"--window-size=1280,720".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("--lang=ar"));
    }

    #[test]
    fn patch_hides_webdriver_flag() {
        assert!(StealthConfig::default()
            .patch_script
            .contains("navigator, 'webdriver'"));
    }

    #[test]
    fn from_app_config_maps_every_setting() {
        let app = AppConfig {
            env: vetscan_core::Environment::Test,
            log_level: "debug".to_string(),
            search_base_url: "http://127.0.0.1:9000/maps/search/".to_string(),
            platform_domain: "example.com".to_string(),
            platform_brand: "example".to_string(),
            user_agent: "UA/2.0".to_string(),
            viewport_width: 800,
            viewport_height: 600,
            headless: false,
            chrome_executable: Some(PathBuf::from("/opt/chrome")),
            feed_timeout_secs: 3,
            settle_delay_ms: 10,
            scroll_settle_ms: 20,
            search_timeout_secs: 40,
        };
        let cfg = ScraperConfig::from_app_config(&app);
        assert_eq!(cfg.stealth.user_agent, "UA/2.0");
        assert_eq!(cfg.stealth.viewport_width, 800);
        assert!(!cfg.stealth.headless);
        assert_eq!(cfg.stealth.chrome_executable, Some(PathBuf::from("/opt/chrome")));
        assert_eq!(cfg.platform.search_base_url, "http://127.0.0.1:9000/maps/search/");
        assert_eq!(cfg.platform.domain, "example.com");
        assert_eq!(cfg.platform.brand, "example");
        assert_eq!(cfg.platform.feed_selector, "[role='feed']");
        assert_eq!(cfg.timings.feed_timeout, Duration::from_secs(3));
        assert_eq!(cfg.timings.settle_delay, Duration::from_millis(10));
        assert_eq!(cfg.timings.scroll_settle, Duration::from_millis(20));
        assert_eq!(cfg.timings.search_timeout, Duration::from_secs(40));
    }
}
