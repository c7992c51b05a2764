#!/usr/bin/env rust
//! Catalog Inspection
//!
//! Reads an emitted StationList document and reports what a renderer
//! would see at each priority cut-off:
//! 1. Station count and number of distinct countries
//! 2. Stations per priority level
//! 3. Cumulative stations visible when showing priority >= N
//!
//! Usage:
//!   cargo run --bin inspect_catalog -- stations.xml

use station_catalog::model::MAX_PRIORITY;
use station_catalog::writer::{CatalogEntry, read_catalog_file};

use std::collections::BTreeSet;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("stations.xml"));

    println!("🔎 Catalog Inspection: {}", path.display());
    println!("================================\n");

    let entries = read_catalog_file(&path)?;
    let countries: BTreeSet<&str> = entries
        .iter()
        .map(|e| e.country.as_str())
        .filter(|c| !c.is_empty())
        .collect();

    println!("Stations:  {}", entries.len());
    println!("Countries: {}\n", countries.len());

    println!("priority  stations  visible at >= priority");
    let histogram = priority_histogram(&entries);
    let mut visible = 0;
    for priority in (0..=MAX_PRIORITY).rev() {
        let count = histogram[priority as usize];
        visible += count;
        if count > 0 {
            println!("{:>8}  {:>8}  {:>8}", priority, count, visible);
        }
    }

    Ok(())
}

/// Station count per priority level, indexed by priority.
fn priority_histogram(entries: &[CatalogEntry]) -> Vec<usize> {
    let mut histogram = vec![0; MAX_PRIORITY as usize + 1];
    for entry in entries {
        let slot = usize::from(entry.priority.min(MAX_PRIORITY));
        histogram[slot] += 1;
    }
    histogram
}
