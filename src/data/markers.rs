//! Proximity filtering of point rows around the reference location.

use crate::data::sheet::PointRow;
use crate::geo::coords::{haversine_distance_m, LatLon};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    /// Raw colour name from the sheet; resolved to a tint at render time.
    pub colour: String,
    pub name: String,
    pub description: String,
}

/// Selects the point rows within `limit_m` metres of the reference location
/// (boundary inclusive). Rows with non-numeric coordinates are skipped.
///
/// Returns the complete desired marker set for the given reference, so the
/// caller can replace its displayed markers wholesale when the reference
/// moves, rather than accumulating a second pass on top of the first.
pub fn nearby_markers(rows: &[PointRow], reference: LatLon, limit_m: f64) -> Vec<Marker> {
    rows.iter()
        .filter_map(|row| {
            let lat = row.lat.trim().parse::<f64>().ok()?;
            let lon = row.lon.trim().parse::<f64>().ok()?;
            Some((row, LatLon::new(lat, lon)))
        })
        .filter(|&(_, position)| haversine_distance_m(reference, position) <= limit_m)
        .map(|(row, position)| Marker {
            position,
            colour: row.color.clone(),
            name: row.name.clone(),
            description: row.description.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: LatLon = LatLon { lat: 40.6263, lon: 22.9482 };

    fn row(lat: &str, lon: &str, name: &str) -> PointRow {
        PointRow {
            lat: lat.to_string(),
            lon: lon.to_string(),
            name: name.to_string(),
            description: String::new(),
            color: String::new(),
        }
    }

    #[test]
    fn test_row_at_reference_is_included() {
        let rows = vec![row("40.6263", "22.9482", "here")];
        let markers = nearby_markers(&rows, REFERENCE, 1000.0);

        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "here");
        assert_eq!(markers[0].colour, "");
    }

    #[test]
    fn test_distant_row_is_excluded() {
        // Roughly 2 km north of the reference
        let rows = vec![row("40.6443", "22.9482", "far")];
        assert!(nearby_markers(&rows, REFERENCE, 1000.0).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let near = LatLon::new(40.6300, 22.9482);
        let exact = haversine_distance_m(REFERENCE, near);
        let rows = vec![row("40.6300", "22.9482", "edge")];

        assert_eq!(nearby_markers(&rows, REFERENCE, exact).len(), 1);
        assert!(nearby_markers(&rows, REFERENCE, exact - 1.0).is_empty());
    }

    #[test]
    fn test_non_numeric_coordinates_are_skipped() {
        let rows = vec![
            row("not-a-number", "22.9482", "bad lat"),
            row("40.6263", "", "bad lon"),
            row("40.6263", "22.9482", "good"),
        ];

        let markers = nearby_markers(&rows, REFERENCE, 1000.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "good");
    }

    #[test]
    fn test_colour_name_carried_through() {
        let mut tinted = row("40.6263", "22.9482", "tinted");
        tinted.color = "red".to_string();

        let markers = nearby_markers(&[tinted], REFERENCE, 1000.0);
        assert_eq!(markers[0].colour, "red");
    }
}
