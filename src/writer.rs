/// Catalog document writer and reader.
///
/// The emitted document is the only thing the rendering front end sees:
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <StationList>
///   <Station>
///     <name>London</name>
///     <Country>United Kingdom</Country>
///     <id>42</id>
///     <priority>32</priority>
///     <Point><coordinates>-0.12,51.5</coordinates></Point>
///   </Station>
/// </StationList>
/// ```
///
/// Stations appear in catalog order (ascending id). Coordinates are
/// longitude first. `parse_catalog` reads the same format back.

use std::fs;
use std::path::Path;

use quick_xml::escape::escape;
use serde::Deserialize;

use crate::model::{CatalogError, StationRecord};

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Renders `records` as a catalog document.
pub fn write_catalog(records: &[StationRecord]) -> String {
    let mut doc = String::with_capacity(64 + records.len() * 192);

    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    doc.push_str("<StationList>\n");

    for record in records {
        doc.push_str("  <Station>\n");
        doc.push_str(&format!("    <name>{}</name>\n", escape(record.name())));
        doc.push_str(&format!("    <Country>{}</Country>\n", escape(record.country())));
        doc.push_str(&format!("    <id>{}</id>\n", record.id()));
        doc.push_str(&format!("    <priority>{}</priority>\n", record.priority()));
        doc.push_str(&format!(
            "    <Point><coordinates>{},{}</coordinates></Point>\n",
            record.longitude(),
            record.latitude()
        ));
        doc.push_str("  </Station>\n");
    }

    doc.push_str("</StationList>\n");
    doc
}

/// Writes the catalog document for `records` to `path`.
pub fn write_catalog_file(path: &Path, records: &[StationRecord]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CatalogError::Io(parent.to_path_buf(), e))?;
    }

    fs::write(path, write_catalog(records)).map_err(|e| CatalogError::Io(path.to_path_buf(), e))
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One station as it appears in a catalog document.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub country: String,
    pub id: u32,
    pub priority: u8,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<&StationRecord> for CatalogEntry {
    fn from(record: &StationRecord) -> Self {
        CatalogEntry {
            name: record.name().to_string(),
            country: record.country().to_string(),
            id: record.id(),
            priority: record.priority(),
            longitude: record.longitude(),
            latitude: record.latitude(),
        }
    }
}

#[derive(Deserialize)]
struct StationList {
    #[serde(rename = "Station", default)]
    stations: Vec<StationElement>,
}

#[derive(Deserialize)]
struct StationElement {
    name: String,
    #[serde(rename = "Country", default)]
    country: String,
    id: u32,
    priority: u8,
    #[serde(rename = "Point")]
    point: PointElement,
}

#[derive(Deserialize)]
struct PointElement {
    coordinates: String,
}

/// Parses a catalog document back into entries, in document order.
pub fn parse_catalog(xml: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let list: StationList = quick_xml::de::from_str(xml)
        .map_err(|e| CatalogError::Document(format!("XML deserialization failed: {}", e)))?;

    list.stations
        .into_iter()
        .map(|s| {
            let (longitude, latitude) = parse_coordinates(&s.point.coordinates)?;
            Ok(CatalogEntry {
                name: s.name,
                country: s.country,
                id: s.id,
                priority: s.priority,
                longitude,
                latitude,
            })
        })
        .collect()
}

/// Reads and parses the catalog document at `path`.
pub fn read_catalog_file(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let xml = fs::read_to_string(path).map_err(|e| CatalogError::Io(path.to_path_buf(), e))?;
    parse_catalog(&xml)
}

/// Splits `"<lon>,<lat>"`.
fn parse_coordinates(raw: &str) -> Result<(f64, f64), CatalogError> {
    let malformed = || CatalogError::Document(format!("malformed coordinates '{}'", raw));

    let (lon, lat) = raw.trim().split_once(',').ok_or_else(malformed)?;
    let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;
    let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;

    Ok((lon, lat))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::CandidateStation;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, name, country, lat, lon) in [
            (42, "London", "United Kingdom", 51.5, -0.12),
            (43, "Heathrow", "United Kingdom", 51.47, -0.45),
            (57, "Paris", "France", 48.8566, 2.3522),
            (99, "Antarctica", "", -75.1, 123.3),
        ] {
            catalog.accept(CandidateStation {
                id,
                name: name.to_string(),
                country: country.to_string(),
                latitude: lat,
                longitude: lon,
            });
        }
        catalog
    }

    #[test]
    fn test_empty_catalog_is_a_bare_station_list() {
        let doc = write_catalog(&[]);
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<StationList>\n</StationList>\n"
        );
    }

    #[test]
    fn test_single_station_layout() {
        let mut catalog = Catalog::new();
        catalog.accept(CandidateStation {
            id: 42,
            name: "London".to_string(),
            country: "United Kingdom".to_string(),
            latitude: 51.5,
            longitude: -0.12,
        });

        let doc = write_catalog(catalog.records());
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<StationList>\n",
            "  <Station>\n",
            "    <name>London</name>\n",
            "    <Country>United Kingdom</Country>\n",
            "    <id>42</id>\n",
            "    <priority>32</priority>\n",
            "    <Point><coordinates>-0.12,51.5</coordinates></Point>\n",
            "  </Station>\n",
            "</StationList>\n",
        );
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_coordinates_are_longitude_first() {
        let catalog = sample_catalog();
        let doc = write_catalog(catalog.records());
        assert!(doc.contains("<coordinates>2.3522,48.8566</coordinates>"), "{}", doc);
    }

    #[test]
    fn test_stations_are_emitted_in_catalog_order() {
        let catalog = sample_catalog();
        let doc = write_catalog(catalog.records());

        let positions: Vec<usize> = ["<id>42</id>", "<id>43</id>", "<id>57</id>", "<id>99</id>"]
            .iter()
            .map(|tag| doc.find(tag).expect("every id should be present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "ids out of order: {:?}", positions);
    }

    #[test]
    fn test_markup_in_names_is_escaped() {
        let mut catalog = Catalog::new();
        catalog.accept(CandidateStation {
            id: 1,
            name: "Trinidad & Tobago <Piarco>".to_string(),
            country: "T&T".to_string(),
            latitude: 10.6,
            longitude: -61.3,
        });

        let doc = write_catalog(catalog.records());
        assert!(doc.contains("<name>Trinidad &amp; Tobago &lt;Piarco&gt;</name>"), "{}", doc);
        assert!(doc.contains("<Country>T&amp;T</Country>"), "{}", doc);
    }

    #[test]
    fn test_document_round_trips() {
        let catalog = sample_catalog();
        let doc = write_catalog(catalog.records());

        let parsed = parse_catalog(&doc).expect("emitted document should parse");
        let expected: Vec<CatalogEntry> = catalog.records().iter().map(CatalogEntry::from).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_escaped_names_round_trip() {
        let mut catalog = Catalog::new();
        catalog.accept(CandidateStation {
            id: 1,
            name: "Trinidad & Tobago".to_string(),
            country: "\"Caribbean\"".to_string(),
            latitude: 10.6,
            longitude: -61.3,
        });

        let parsed = parse_catalog(&write_catalog(catalog.records())).expect("should parse");
        assert_eq!(parsed[0].name, "Trinidad & Tobago");
        assert_eq!(parsed[0].country, "\"Caribbean\"");
    }

    #[test]
    fn test_parse_rejects_malformed_coordinates() {
        let doc = "<StationList><Station><name>X</name><Country>Y</Country><id>1</id>\
                   <priority>3</priority><Point><coordinates>12.5</coordinates></Point>\
                   </Station></StationList>";
        let result = parse_catalog(doc);
        assert!(matches!(result, Err(CatalogError::Document(_))), "got {:?}", result);
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        let result = parse_catalog("<StationList><Station><name>X</name>");
        assert!(matches!(result, Err(CatalogError::Document(_))), "got {:?}", result);
    }

    #[test]
    fn test_file_round_trip_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("stations.xml");
        let catalog = sample_catalog();

        write_catalog_file(&path, catalog.records()).expect("write should succeed");
        let entries = read_catalog_file(&path).expect("read should succeed");

        assert_eq!(entries.len(), catalog.len());
        assert_eq!(entries[0].name, "London");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.xml");
        let err = read_catalog_file(&path).expect_err("missing file must fail");
        assert!(matches!(err, CatalogError::Io(ref p, _) if p == &path), "got {:?}", err);
    }
}
