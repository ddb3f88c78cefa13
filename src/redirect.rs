//! Share-link resolution.
//!
//! Links from sharing services (Pinterest and friends) point at a wrapper
//! page rather than the recipe itself. The wrapper usually carries an
//! Open Graph `og:url` tag naming the canonical page, so we fetch the
//! wrapper once and follow that tag. Every failure mode degrades to
//! returning the input URL unchanged: resolution is best-effort, never fatal.

use log::debug;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use scraper::{Html, Selector};

fn host_matches(url: &str, domains: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    domains
        .iter()
        .any(|d| host == d || host.ends_with(&format!(".{}", d)))
}

fn og_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:url"]"#).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.to_string())
}

/// Resolve a possibly-indirected URL to the page that should be fetched.
///
/// If the host is not a known sharing domain the URL passes through
/// untouched, without any network traffic.
pub async fn resolve_share_link(
    client: &Client,
    url: &str,
    share_domains: &[String],
    user_agent: &str,
) -> String {
    if !host_matches(url, share_domains) {
        return url.to_string();
    }

    let response = match client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            debug!("Share-link fetch failed, keeping original URL: {}", err);
            return url.to_string();
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            debug!("Share-link body read failed, keeping original URL: {}", err);
            return url.to_string();
        }
    };

    match og_url(&body) {
        // Only follow the canonical URL when it leaves the sharing domain,
        // otherwise we would loop on the wrapper page.
        Some(canonical) if !host_matches(&canonical, share_domains) => {
            debug!("Resolved share link {} -> {}", url, canonical);
            canonical
        }
        _ => url.to_string(),
    }
}
