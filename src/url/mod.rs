//! URL handling for catalog pages and listing links

use ::url::Url;

/// Builds the catalog URL for a city: `{base}/{slug}/`
///
/// Pagination and filter parameters are added to the request as query pairs.
///
/// # Examples
///
/// ```
/// use krisha_scout::url::catalog_url;
///
/// let url = catalog_url("https://krisha.kz/prodazha/kvartiry", "aktobe").unwrap();
/// assert_eq!(url.as_str(), "https://krisha.kz/prodazha/kvartiry/aktobe/");
/// ```
pub fn catalog_url(base_url: &str, city_slug: &str) -> Result<Url, ::url::ParseError> {
    Url::parse(&format!(
        "{}/{}/",
        base_url.trim_end_matches('/'),
        city_slug.trim_matches('/')
    ))
}

/// Resolves a listing href against the site origin
///
/// Returns an empty string when the href is blank or cannot be resolved.
/// Absolute hrefs are kept as they are.
pub fn resolve_listing_link(origin: &Url, href: &str) -> String {
    let href = href.trim();

    if href.is_empty() {
        return String::new();
    }

    match origin.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            absolute.to_string()
        }
        _ => String::new(),
    }
}
