//! Geometry model and the spreadsheet-payload normalizer.
//!
//! Geometry cells hold a JSON value in one of several relaxed forms: a full
//! FeatureCollection, a single Feature, a bare tagged geometry object, or an
//! untagged coordinate array whose kind is inferred from nesting depth.
//! Everything is normalized into a flat list of `Feature`s; malformed input
//! is rejected with a `GeometryError` rather than guessed at.

use failure::Fail;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub name: String,
    pub description: String,
}

// The GeoJSON-style "type" keys on features and collections are dispatched on
// before decoding, then ignored here as unknown fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn empty() -> Self {
        Self { features: vec![] }
    }
}

#[derive(Debug, Fail)]
pub enum GeometryError {
    #[fail(display = "unsupported geometry type \"{}\"", _0)]
    UnsupportedType(String),

    #[fail(display = "geometry payload has no coordinates")]
    EmptyCoordinates,

    #[fail(display = "coordinates do not decode as {}: {}", _0, _1)]
    BadCoordinates(String, #[fail(cause)] serde_json::Error),

    #[fail(display = "payload is neither a tagged object nor a coordinate array")]
    Unrecognised,
}

const TAGGED_GEOMETRIES: [&str; 4] = ["Point", "LineString", "Polygon", "MultiPolygon"];

/// Normalizes one decoded geometry payload into a list of features.
pub fn normalise_payload(value: Value) -> Result<Vec<Feature>, GeometryError> {
    let tag = value.get("type").and_then(Value::as_str).map(str::to_owned);

    match tag.as_ref().map(String::as_str) {
        Some("FeatureCollection") => {
            let collection: FeatureCollection = decode("FeatureCollection", value)?;
            Ok(collection.features)
        }
        Some("Feature") => {
            let feature: Feature = decode("Feature", value)?;
            Ok(vec![feature])
        }
        Some(tag) if TAGGED_GEOMETRIES.contains(&tag) => {
            let geometry: Geometry = decode(tag, value)?;
            Ok(vec![wrap(geometry)])
        }
        Some(tag) => Err(GeometryError::UnsupportedType(tag.to_string())),
        None => match value {
            Value::Array(elements) => Ok(vec![wrap(infer_untagged(elements)?)]),
            _ => Err(GeometryError::Unrecognised),
        },
    }
}

fn wrap(geometry: Geometry) -> Feature {
    Feature { geometry, properties: Properties::default() }
}

/// Untagged payloads are classified by the nesting depth of their first
/// element, then validated by decoding as the classified kind.
fn infer_untagged(elements: Vec<Value>) -> Result<Geometry, GeometryError> {
    let kind = untagged_kind(&elements)?;
    let coordinates = Value::Array(elements);

    Ok(match kind {
        "Point" => Geometry::Point { coordinates: decode(kind, coordinates)? },
        "LineString" => Geometry::LineString { coordinates: decode(kind, coordinates)? },
        "Polygon" => Geometry::Polygon { coordinates: decode(kind, coordinates)? },
        _ => Geometry::MultiPolygon { coordinates: decode(kind, coordinates)? },
    })
}

fn untagged_kind(elements: &[Value]) -> Result<&'static str, GeometryError> {
    let depth_1 = elements.first().ok_or(GeometryError::EmptyCoordinates)?;
    if depth_1.is_number() {
        return Ok("Point");
    }

    let depth_2 = first_element(depth_1)?;
    if depth_2.is_number() {
        return Ok("LineString");
    }

    let depth_3 = first_element(depth_2)?;
    if depth_3.is_number() {
        return Ok("Polygon");
    }

    // Anything nested deeper is treated as a MultiPolygon; the decode step
    // rejects shapes that do not actually fit.
    Ok("MultiPolygon")
}

fn first_element(value: &Value) -> Result<&Value, GeometryError> {
    value.as_array()
        .and_then(|elements| elements.first())
        .ok_or(GeometryError::EmptyCoordinates)
}

fn decode<T>(kind: &str, value: Value) -> Result<T, GeometryError>
    where T: serde::de::DeserializeOwned
{
    serde_json::from_value(value)
        .map_err(|e| GeometryError::BadCoordinates(kind.to_string(), e))
}
