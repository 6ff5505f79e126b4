use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, PacingConfig, SelectorConfig, SiteConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_selectors(&config.selectors)?;
    validate_pacing_config(&config.pacing)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("base-url", &config.base_url)?;
    validate_http_url("origin", &config.origin)?;

    if config.city_slug.is_empty() {
        return Err(ConfigError::Validation(
            "city-slug cannot be empty".to_string(),
        ));
    }

    if !config
        .city_slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "city-slug must contain only lowercase letters, digits and hyphens, got '{}'",
            config.city_slug
        )));
    }

    if config.city_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "city-name cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.rooms_param.is_empty() {
        return Err(ConfigError::Validation(
            "rooms-param cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every selector compiles
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.listing,
        &config.title,
        &config.price,
        &config.address,
        &config.link,
    ] {
        compile_selector(selector)?;
    }
    Ok(())
}

/// Compiles a CSS selector, mapping failures to a config error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Validates pacing ranges
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.listing_delay_min_ms > config.listing_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "listing delay range is inverted: {}ms > {}ms",
            config.listing_delay_min_ms, config.listing_delay_max_ms
        )));
    }

    if config.page_delay_min_ms > config.page_delay_max_ms {
        return Err(ConfigError::Validation(format!(
            "page delay range is inverted: {}ms > {}ms",
            config.page_delay_min_ms, config.page_delay_max_ms
        )));
    }

    Ok(())
}

/// Validates crawl limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Requires an absolute http(s) URL
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_city_slug() {
        let mut site = SiteConfig::default();
        site.city_slug = "ust-kamenogorsk".to_string();
        assert!(validate_site_config(&site).is_ok());

        site.city_slug = String::new();
        assert!(validate_site_config(&site).is_err());

        site.city_slug = "Aktobe".to_string();
        assert!(validate_site_config(&site).is_err());

        site.city_slug = "akt/obe".to_string();
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_validate_urls() {
        assert!(validate_http_url("origin", "https://krisha.kz").is_ok());
        assert!(validate_http_url("origin", "http://127.0.0.1:8080").is_ok());

        assert!(matches!(
            validate_http_url("origin", "krisha.kz"),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_http_url("origin", "ftp://krisha.kz"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_timeout() {
        let mut site = SiteConfig::default();
        site.timeout_secs = 0;
        assert!(validate_site_config(&site).is_err());

        site.timeout_secs = 301;
        assert!(validate_site_config(&site).is_err());
    }

    #[test]
    fn test_invalid_selector() {
        let mut selectors = SelectorConfig::default();
        selectors.price = "div[".to_string();

        let err = validate_selectors(&selectors).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSelector { selector, .. } if selector == "div["));
    }

    #[test]
    fn test_pacing_ranges() {
        let mut pacing = PacingConfig::default();
        assert!(validate_pacing_config(&pacing).is_ok());

        pacing.listing_delay_min_ms = 0;
        pacing.listing_delay_max_ms = 0;
        assert!(validate_pacing_config(&pacing).is_ok());

        pacing.listing_delay_min_ms = 10;
        assert!(validate_pacing_config(&pacing).is_err());
    }

    #[test]
    fn test_max_pages() {
        assert!(validate_crawler_config(&CrawlerConfig { max_pages: None }).is_ok());
        assert!(validate_crawler_config(&CrawlerConfig { max_pages: Some(3) }).is_ok());
        assert!(validate_crawler_config(&CrawlerConfig { max_pages: Some(0) }).is_err());
    }
}
