/// Test fixtures: representative BBC observation RSS feeds.
///
/// Trimmed to the elements the parser touches plus enough surrounding
/// markup to prove unknown elements are ignored. Shape of a real feed:
///
///   rss
///     channel
///       title     : "BBC - Weather Centre - Latest Observations for <name>, <country>"
///       link, description, language, image, ...
///       item
///         title   : current conditions summary
///         description
///         geo:lat : latitude as text, or "N/A"
///         geo:long: longitude as text, or "N/A"

/// London (id 42), well-formed with numeric coordinates.
#[cfg(test)]
pub(crate) fn fixture_london_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for London, United Kingdom</title>
    <link>http://www.bbc.co.uk/weather/5day.shtml?world=0008</link>
    <description>Latest observations for London from BBC Weather</description>
    <language>en</language>
    <item>
      <title>Monday at 13:00 GMT: sunny intervals. 12&#xB0;C (54&#xB0;F)</title>
      <description>Temperature: 12&#xB0;C (54&#xB0;F), Wind Direction: SW, Wind Speed: 9mph</description>
      <geo:lat>51.5</geo:lat>
      <geo:long>-0.12</geo:long>
    </item>
  </channel>
</rss>"#
}

/// Station (id 7) whose feed has no latitude.
#[cfg(test)]
pub(crate) fn fixture_missing_latitude_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Kabul, Afghanistan</title>
    <item>
      <title>Monday at 13:00 GMT: N/A.</title>
      <geo:lat>N/A</geo:lat>
      <geo:long>69.2</geo:long>
    </item>
  </channel>
</rss>"#
}

/// Station whose feed has no longitude.
#[cfg(test)]
pub(crate) fn fixture_missing_longitude_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Nowhere, Atlantis</title>
    <item>
      <geo:lat>10.0</geo:lat>
      <geo:long>N/A</geo:long>
    </item>
  </channel>
</rss>"#
}

/// Title with no country part.
#[cfg(test)]
pub(crate) fn fixture_no_country_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Antarctica</title>
    <item>
      <geo:lat>-75.1</geo:lat>
      <geo:long>123.3</geo:long>
    </item>
  </channel>
</rss>"#
}

/// Channel present but without any item.
#[cfg(test)]
pub(crate) fn fixture_no_items_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Paris, France</title>
  </channel>
</rss>"#
}

/// Item without a longitude element at all.
#[cfg(test)]
pub(crate) fn fixture_missing_long_element_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Paris, France</title>
    <item>
      <geo:lat>48.85</geo:lat>
    </item>
  </channel>
</rss>"#
}

/// Coordinates that are neither numeric nor the sentinel.
#[cfg(test)]
pub(crate) fn fixture_garbled_coordinates_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Paris, France</title>
    <item>
      <geo:lat>n/a</geo:lat>
      <geo:long>2.35</geo:long>
    </item>
  </channel>
</rss>"#
}

/// Truncated markup, as served when a request is cut off mid-body.
#[cfg(test)]
pub(crate) fn fixture_truncated_rss() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>BBC - Weather Centre - Latest Observations for Par"#
}

/// Builds a well-formed feed for arbitrary values.
#[cfg(test)]
pub(crate) fn feed_for(title: &str, lat: &str, long: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#">
  <channel>
    <title>{}</title>
    <item>
      <geo:lat>{}</geo:lat>
      <geo:long>{}</geo:long>
    </item>
  </channel>
</rss>"#,
        title, lat, long
    )
}
