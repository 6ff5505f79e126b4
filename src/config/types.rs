use serde::Deserialize;

/// Main configuration structure for Krisha-Scout
///
/// Every section is optional; missing sections and keys fall back to the
/// defaults for the Aktobe apartment catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub pacing: PacingConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Target site and request identity
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Catalog endpoint; the city slug is appended as a path segment
    pub base_url: String,

    /// Absolute origin prepended to relative listing links
    pub origin: String,

    /// City path segment (e.g. "aktobe")
    pub city_slug: String,

    /// City name written into every record and stripped from addresses
    pub city_name: String,

    /// Browser identity sent with every request
    pub user_agent: String,

    /// Accept-Language header value
    pub accept_language: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Query parameter carrying the room-count filter
    pub rooms_param: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://krisha.kz/prodazha/kvartiry".to_string(),
            origin: "https://krisha.kz".to_string(),
            city_slug: "aktobe".to_string(),
            city_name: "Aktobe".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            accept_language: "ru-RU,ru;q=0.9".to_string(),
            timeout_secs: 15,
            rooms_param: "das[flat.rooms]".to_string(),
        }
    }
}

/// CSS selectors describing the listing card markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per ad card
    pub listing: String,
    pub title: String,
    pub price: String,
    /// Subtitle holding the "city, street" address
    pub address: String,
    pub link: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: "div.a-card".to_string(),
            title: ".a-card__title".to_string(),
            price: ".a-card__price".to_string(),
            address: ".a-card__subtitle".to_string(),
            link: "a.a-card__link".to_string(),
        }
    }
}

/// Randomized delays between requests (milliseconds)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PacingConfig {
    pub listing_delay_min_ms: u64,
    pub listing_delay_max_ms: u64,
    pub page_delay_min_ms: u64,
    pub page_delay_max_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            listing_delay_min_ms: 500,
            listing_delay_max_ms: 1000,
            page_delay_min_ms: 1500,
            page_delay_max_ms: 2500,
        }
    }
}

/// Crawl loop limits
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Stop after this many pages; unbounded when absent
    pub max_pages: Option<u32>,
}

/// Output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the CSV result file
    pub csv_path: String,

    /// Path to the persistent log file
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "results.csv".to_string(),
            log_path: "parser.log".to_string(),
        }
    }
}
