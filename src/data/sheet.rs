//! Header-driven decoding of the two spreadsheet CSV feeds, and ingestion of
//! geometry rows into a renderable feature collection.

use csv::ReaderBuilder;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::data::geometry::{self, FeatureCollection, Properties};

/// Rows opt in to the geometry layer with this exact flag value.
pub const INCLUDE_FLAG: &str = "y";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeometryRow {
    pub include: String,
    pub geometry: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PointRow {
    pub lat: String,
    pub lon: String,
    pub name: String,
    pub description: String,
    pub color: String,
}

pub fn read_geometry_rows(text: &str) -> Vec<GeometryRow> {
    read_rows(text)
}

pub fn read_point_rows(text: &str) -> Vec<PointRow> {
    read_rows(text)
}

// Missing columns fall back to empty strings via serde defaults; rows that
// fail to decode at all are skipped with a warning rather than failing the
// feed.
fn read_rows<T>(text: &str) -> Vec<T>
    where T: serde::de::DeserializeOwned
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => warn!("Skipping unreadable sheet row: {}", e),
        }
    }
    rows
}

/// Runs the payload normalizer over every included row and collects the
/// results into one feature collection, attaching row metadata to each
/// produced feature. A bad geometry cell skips that row only.
pub fn build_feature_collection(rows: &[GeometryRow]) -> FeatureCollection {
    let mut collection = FeatureCollection::empty();

    for row in rows {
        if row.include != INCLUDE_FLAG {
            continue;
        }

        let payload: Value = match serde_json::from_str(&row.geometry) {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping row \"{}\": geometry cell is not valid JSON: {}", row.name, e);
                continue;
            }
        };

        match geometry::normalise_payload(payload) {
            Ok(features) => {
                for mut feature in features {
                    feature.properties = Properties {
                        name: row.name.clone(),
                        description: row.description.clone(),
                    };
                    collection.features.push(feature);
                }
            }
            Err(e) => warn!("Skipping row \"{}\": {}", row.name, e),
        }
    }

    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geometry::Geometry;

    #[test]
    fn test_geometry_rows_from_csv() {
        let text = "include,geometry,name,description\n\
                    y,\"[22.95, 40.63]\",Cafe,Open late\n\
                    n,\"[1.0, 2.0]\",Hidden,Not shown\n";

        let rows = read_geometry_rows(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].include, "y");
        assert_eq!(rows[0].name, "Cafe");
        assert_eq!(rows[1].include, "n");
    }

    #[test]
    fn test_only_included_rows_contribute() {
        let rows = vec![
            GeometryRow {
                include: "y".to_string(),
                geometry: "[22.95, 40.63]".to_string(),
                name: "Cafe".to_string(),
                description: "Open late".to_string(),
            },
            GeometryRow {
                include: "n".to_string(),
                geometry: "[1.0, 2.0]".to_string(),
                ..GeometryRow::default()
            },
            GeometryRow {
                include: String::new(),
                geometry: "[3.0, 4.0]".to_string(),
                ..GeometryRow::default()
            },
        ];

        let collection = build_feature_collection(&rows);
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].geometry, Geometry::Point { coordinates: vec![22.95, 40.63] });
        assert_eq!(collection.features[0].properties.name, "Cafe");
        assert_eq!(collection.features[0].properties.description, "Open late");
    }

    #[test]
    fn test_excluded_rows_skip_even_invalid_geometry() {
        let rows = vec![GeometryRow {
            include: "no".to_string(),
            geometry: "this is not json".to_string(),
            ..GeometryRow::default()
        }];

        assert!(build_feature_collection(&rows).features.is_empty());
    }

    #[test]
    fn test_bad_geometry_cell_skips_that_row_only() {
        let rows = vec![
            GeometryRow {
                include: "y".to_string(),
                geometry: "this is not json".to_string(),
                name: "Broken".to_string(),
                ..GeometryRow::default()
            },
            GeometryRow {
                include: "y".to_string(),
                geometry: "[]".to_string(),
                name: "Empty".to_string(),
                ..GeometryRow::default()
            },
            GeometryRow {
                include: "y".to_string(),
                geometry: "[[0.0, 0.0], [1.0, 1.0]]".to_string(),
                name: "Track".to_string(),
                ..GeometryRow::default()
            },
        ];

        let collection = build_feature_collection(&rows);
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].properties.name, "Track");
    }

    #[test]
    fn test_row_metadata_attached_to_every_feature() {
        let rows = vec![GeometryRow {
            include: "y".to_string(),
            geometry: r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[3.0,4.0]}}
            ]}"#.to_string(),
            name: "Pair".to_string(),
            description: "Two points".to_string(),
            ..GeometryRow::default()
        }];

        let collection = build_feature_collection(&rows);
        assert_eq!(collection.features.len(), 2);
        assert!(collection.features.iter().all(|f| f.properties.name == "Pair"));
        assert!(collection.features.iter().all(|f| f.properties.description == "Two points"));
    }

    #[test]
    fn test_point_rows_tolerate_missing_colour_column() {
        let text = "lat,lon,name,description\n\
                    40.6263,22.9482,Stop A,First stop\n";

        let rows = read_point_rows(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lat, "40.6263");
        assert_eq!(rows[0].color, "");
    }
}
