//! Conversion of district flood-impact CSV records into a GeoJSON
//! FeatureCollection of points.

use std::{collections::HashMap, fs::File, io, path::Path};

use anyhow::Context;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

pub const DEFAULT_INPUT: &str = "District_FloodImpact.csv";
pub const DEFAULT_OUTPUT: &str = "india_flood.geojson";

/// Reads CSV records with a header row. Records without parseable
/// `Latitude`/`Longitude` are skipped.
pub fn convert<R: io::Read>(input: R) -> anyhow::Result<FeatureCollection> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers().context("cannot read CSV header")?.clone();

    let mut features = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log::debug!("skipping unreadable record {}: {e}", line + 1);
                continue;
            }
        };
        let row: HashMap<&str, &str> = headers.iter().zip(record.iter()).collect();
        match point_feature(&row) {
            Some(feature) => features.push(feature),
            None => log::debug!("skipping record {} without coordinates", line + 1),
        }
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn point_feature(row: &HashMap<&str, &str>) -> Option<Feature> {
    let lat = coordinate(row, "Latitude")?;
    let lon = coordinate(row, "Longitude")?;

    let area = match row.get("FloodedArea") {
        Some(area) if !area.is_empty() => Some(*area),
        _ => row.get("Impact").copied(),
    };

    let mut properties = JsonObject::new();
    properties.insert("district".to_string(), text(row.get("District").copied()));
    properties.insert("year".to_string(), text(row.get("Year").copied()));
    properties.insert("area_affected".to_string(), text(area));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

fn coordinate(row: &HashMap<&str, &str>, column: &str) -> Option<f64> {
    row.get(column)?.trim().parse().ok()
}

fn text(value: Option<&str>) -> JsonValue {
    value.map_or(JsonValue::Null, |v| JsonValue::String(v.to_owned()))
}

/// Converts `input` and writes pretty-printed GeoJSON to `output`. Returns
/// the number of features written.
pub fn convert_file(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let collection = convert(file)?;

    let out = File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    serde_json::to_writer_pretty(out, &collection)
        .with_context(|| format!("cannot write {}", output.display()))?;
    Ok(collection.features.len())
}
