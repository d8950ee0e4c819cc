/// Mean earth radius used for great-circle distances, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Haversine great-circle distance between two coordinates, in metres.
pub fn haversine_distance_m(a: LatLon, b: LatLon) -> f64 {
    let (lat_a, lat_b) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon * 0.5).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Projects lon/lat into the [0, 1] equirectangular world space.
pub fn normalised_equirectangular_coords(lon: f64, lat: f64) -> (f64, f64) {
    (
        (lon + 180.0) * (1.0 / 360.0),
        ((lat * -1.0) + 90.0) * (1.0 / 180.0)
    )
}

pub fn window_to_map(x: f64, y: f64, window_size: &[f64; 2], view_origin: &[f64; 2], zoom_level: f64) -> (f64, f64) {
    screen_coords_to_map((x / window_size[0], y / window_size[1]), view_origin, zoom_level)
}

pub fn lon_lat_to_map(lon: f64, lat: f64, view_origin: &[f64; 2], zoom_level: f64) -> (f64, f64) {
    screen_coords_to_map(
        normalised_equirectangular_coords(lon, lat),
        view_origin, zoom_level)
}

fn screen_coords_to_map(coord: (f64, f64), view_origin: &[f64; 2], zoom_level: f64) -> (f64, f64) {
    (
        (coord.0 - view_origin[0]) * zoom_level,
        (coord.1 - view_origin[1]) * zoom_level
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        let p = LatLon::new(40.6263, 22.9482);
        assert_eq!(haversine_distance_m(p, p), 0.0);
    }

    #[test]
    fn test_haversine_known_city_pair() {
        // Berlin to Paris is roughly 878 km
        let berlin = LatLon::new(52.5200, 13.4050);
        let paris = LatLon::new(48.8566, 2.3522);
        let d = haversine_distance_m(berlin, paris);
        assert!((d - 878_000.0).abs() < 10_000.0, "unexpected distance {}", d);
    }

    #[test]
    fn test_equirectangular_projection() {
        assert_eq!(normalised_equirectangular_coords(0.0, 0.0), (0.5, 0.5));
        assert_eq!(normalised_equirectangular_coords(-180.0, 90.0), (0.0, 0.0));
        assert_eq!(normalised_equirectangular_coords(180.0, -90.0), (1.0, 1.0));
    }

    #[test]
    fn test_window_and_lonlat_agree() {
        let origin = [0.25, 0.25];
        let window = [800.0, 600.0];
        let zoom = 512.0;

        let (mx, my) = lon_lat_to_map(22.9482, 40.6263, &origin, zoom);
        let (nx, ny) = normalised_equirectangular_coords(22.9482, 40.6263);
        let (cx, cy) = window_to_map(nx * window[0], ny * window[1], &window, &origin, zoom);

        assert!((mx - cx).abs() < 1e-9);
        assert!((my - cy).abs() < 1e-9);
    }
}
