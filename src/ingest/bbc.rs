/// BBC Weather observation feed client.
///
/// Each station publishes an RSS document at a URL derived from its
/// numeric id. Only three values are read from it:
///   - `channel[0].title`         : "<prefix><name>, <country>"
///   - `channel[0].item[0].lat`   : latitude (degrees) or "N/A"
///   - `channel[0].item[0].long`  : longitude (degrees) or "N/A"
///
/// The feed is deserialized into a fixed schema. A missing element is a
/// parse error, never a silently defaulted value.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::ingest::FeedSource;
use crate::model::{COORDINATE_SENTINEL, CandidateStation, FetchError};

/// Placeholder substituted with the station id in a feed URL template.
pub const ID_PLACEHOLDER: &str = "{id}";

// ---------------------------------------------------------------------------
// Serde structures for the RSS feed
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Rss {
    #[serde(rename = "channel", default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: String,
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

// Elements are `geo:lat` / `geo:long` in the feed.
#[derive(Debug, Deserialize)]
struct Item {
    #[serde(rename = "lat", alias = "geo:lat")]
    lat: String,
    #[serde(rename = "long", alias = "geo:long")]
    long: String,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Substitutes `id` into every `{id}` placeholder of `template`.
pub fn build_feed_url(template: &str, id: u32) -> String {
    template.replace(ID_PLACEHOLDER, &id.to_string())
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Splits a feed title into `(name, country)`.
///
/// `prefix` is removed if present, then the remainder is split on the
/// first `", "`. A title without a comma yields an empty country.
pub fn split_title(title: &str, prefix: &str) -> (String, String) {
    let title = title.trim();
    let remainder = title.strip_prefix(prefix).unwrap_or(title);

    match remainder.split_once(", ") {
        Some((name, country)) => (name.trim().to_string(), country.trim().to_string()),
        None => (remainder.trim().to_string(), String::new()),
    }
}

/// Parses a raw RSS document for station `id` into a candidate.
///
/// # Errors
/// - `FetchError::Parse`: malformed markup, no channel, no item, a
///   missing title/lat/long element, an empty station name, or a
///   coordinate that is neither numeric nor the sentinel.
/// - `FetchError::MissingCoordinates`: latitude or longitude is `"N/A"`.
pub fn parse_feed(id: u32, xml: &str, title_prefix: &str) -> Result<CandidateStation, FetchError> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| FetchError::Parse(format!("RSS deserialization failed: {}", e)))?;

    let channel = rss
        .channels
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("feed has no channel".to_string()))?;

    let item = channel
        .items
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("channel has no item".to_string()))?;

    let lat = item.lat.trim();
    let long = item.long.trim();

    if lat == COORDINATE_SENTINEL || long == COORDINATE_SENTINEL {
        return Err(FetchError::MissingCoordinates {
            latitude: lat.to_string(),
            longitude: long.to_string(),
        });
    }

    let latitude = parse_coordinate("latitude", lat)?;
    let longitude = parse_coordinate("longitude", long)?;

    let (name, country) = split_title(&channel.title, title_prefix);
    if name.is_empty() {
        return Err(FetchError::Parse(format!(
            "no station name in title '{}'",
            channel.title
        )));
    }

    Ok(CandidateStation {
        id,
        name,
        country,
        latitude,
        longitude,
    })
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, FetchError> {
    let value: f64 = raw
        .parse()
        .map_err(|e| FetchError::Parse(format!("failed to parse {} '{}': {}", field, raw, e)))?;

    if !value.is_finite() {
        return Err(FetchError::Parse(format!("{} '{}' is not finite", field, raw)));
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Fetches station feeds over HTTP, one blocking request per id.
pub struct BbcFeedClient {
    http: reqwest::blocking::Client,
    url_template: String,
    title_prefix: String,
}

impl BbcFeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            url_template: config.url_template.clone(),
            title_prefix: config.title_prefix.clone(),
        })
    }

    pub fn feed_url(&self, id: u32) -> String {
        build_feed_url(&self.url_template, id)
    }
}

impl FeedSource for BbcFeedClient {
    fn fetch(&self, id: u32) -> Result<CandidateStation, FetchError> {
        let url = self.feed_url(id);
        debug!(id, %url, "fetching observation feed");

        let transport = |message: String| FetchError::Transport {
            url: url.clone(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| transport(e.to_string()))?;

        if !response.status().is_success() {
            warn!(id, status = %response.status(), "feed request rejected");
            return Err(transport(format!("HTTP {}", response.status())));
        }

        let body = response.text().map_err(|e| transport(e.to_string()))?;
        parse_feed(id, &body, &self.title_prefix)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
