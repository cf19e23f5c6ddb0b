//! Clinic website.

use url::Url;

use crate::extract::strategy::{FieldChain, Source, Strategy};

const WEBSITE_SELECTORS: [&str; 5] = [
    "[data-item-id*='authority']",
    "[class*='website']",
    "a[href*='http']",
    "button[aria-label*='website']",
    "div[class*='fontBodyMedium'] a",
];

/// Whether `href` is an absolute http(s) URL off the platform's `domain`.
#[must_use]
pub fn is_external_website(href: &str, domain: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    domain.is_empty() || (host != domain && !host.ends_with(&format!(".{domain}")))
}

#[must_use]
pub fn chain(domain: &str) -> FieldChain<String> {
    let domain = domain.to_ascii_lowercase();
    WEBSITE_SELECTORS
        .iter()
        .fold(FieldChain::new("website"), |chain, &sel| {
            let domain = domain.clone();
            chain.then(Strategy::new(sel, Source::Attribute(sel, "href"), move |href| {
                is_external_website(href, &domain).then(|| href.to_string())
            }))
        })
}
