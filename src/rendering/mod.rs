pub mod colour;

use piston_window::*;

use crate::data::geometry::{Feature, FeatureCollection, Geometry};
use crate::data::markers::Marker;
use crate::geo::coords::{self, LatLon};
use crate::panel::PanelState;

const GEOM_WEIGHT: f64 = 0.0015;
const GEOM_HOVER_WEIGHT: f64 = 0.0022;
const GEOM_POINT_RADIUS: f64 = 0.006;
const MARKER_RADIUS: f64 = 0.008;
const USER_MARKER_RADIUS: f64 = 0.007;

const PANEL_WIDTH: f64 = 0.32;
const PANEL_MARGIN: f64 = 0.02;
const STATUS_ORIGIN: [f64; 2] = [0.02, 0.04];
const LINE_HEIGHT: f64 = 0.035;
const BODY_WRAP_COLUMNS: usize = 34;

// Metres per degree of latitude, for scaling the accuracy circle
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Draws the geometry overlay. `hovered` restyles one feature.
pub fn draw_overlay(g: &mut G2d, context: &Context, zoom_level: f64, view_origin: &[f64; 2],
                    collection: &FeatureCollection, hovered: Option<usize>) {
    for (index, feature) in collection.features.iter().enumerate() {
        draw_feature(g, context, zoom_level, view_origin, feature, hovered == Some(index));
    }
}

fn draw_feature(g: &mut G2d, context: &Context, zoom_level: f64, view_origin: &[f64; 2],
                feature: &Feature, hover: bool) {
    let (stroke, fill, weight) = if hover {
        (colour::GEOM_HOVER_STROKE, colour::GEOM_HOVER_FILL, GEOM_HOVER_WEIGHT)
    } else {
        (colour::GEOM_STROKE, colour::GEOM_FILL, GEOM_WEIGHT)
    };

    match &feature.geometry {
        Geometry::Point { coordinates } => {
            if coordinates.len() >= 2 {
                let (x, y) = coords::lon_lat_to_map(coordinates[0], coordinates[1], view_origin, zoom_level);
                ellipse(stroke, centred_square(x, y, GEOM_POINT_RADIUS), context.transform, g);
            }
        }
        Geometry::LineString { coordinates } => {
            draw_path(g, context, &project_path(coordinates, view_origin, zoom_level), stroke, weight, false);
        }
        Geometry::Polygon { coordinates } => {
            draw_polygon(g, context, coordinates, view_origin, zoom_level, stroke, fill, weight);
        }
        Geometry::MultiPolygon { coordinates } => {
            for polygon in coordinates {
                draw_polygon(g, context, polygon, view_origin, zoom_level, stroke, fill, weight);
            }
        }
    }
}

fn draw_polygon(g: &mut G2d, context: &Context, rings: &[Vec<Vec<f64>>],
                view_origin: &[f64; 2], zoom_level: f64,
                stroke: [f32; 4], fill: [f32; 4], weight: f64) {
    if let Some(outer) = rings.first() {
        polygon(fill, &project_path(outer, view_origin, zoom_level), context.transform, g);
    }
    for ring in rings {
        draw_path(g, context, &project_path(ring, view_origin, zoom_level), stroke, weight, true);
    }
}

fn draw_path(g: &mut G2d, context: &Context, points: &[[f64; 2]],
             stroke: [f32; 4], weight: f64, close: bool) {
    if points.len() < 2 {
        return;
    }
    for ix in 0..(points.len() - 1) {
        line_from_to(stroke, weight, points[ix], points[ix + 1], context.transform, g);
    }
    if close {
        line_from_to(stroke, weight, points[points.len() - 1], points[0], context.transform, g);
    }
}

fn project_path(path: &[Vec<f64>], view_origin: &[f64; 2], zoom_level: f64) -> Vec<[f64; 2]> {
    path.iter()
        .filter(|position| position.len() >= 2)
        .map(|position| {
            let (x, y) = coords::lon_lat_to_map(position[0], position[1], view_origin, zoom_level);
            [x, y]
        })
        .collect()
}

pub fn draw_markers(g: &mut G2d, context: &Context, zoom_level: f64, view_origin: &[f64; 2],
                    markers: &[Marker]) {
    for marker in markers {
        let (x, y) = coords::lon_lat_to_map(marker.position.lon, marker.position.lat, view_origin, zoom_level);

        ellipse(colour::MARKER_OUTLINE, centred_square(x, y, MARKER_RADIUS * 1.25), context.transform, g);
        ellipse(colour::marker_colour(&marker.colour), centred_square(x, y, MARKER_RADIUS), context.transform, g);
    }
}

/// Draws the viewer's resolved position, with a translucent accuracy circle
/// when the locator reported one.
pub fn draw_user_location(g: &mut G2d, context: &Context, zoom_level: f64, view_origin: &[f64; 2],
                          position: LatLon, accuracy_m: Option<f64>) {
    let (x, y) = coords::lon_lat_to_map(position.lon, position.lat, view_origin, zoom_level);

    if let Some(radius_m) = accuracy_m {
        let radius = (radius_m / METRES_PER_DEGREE) / 180.0 * zoom_level;
        ellipse(colour::ACCURACY_FILL, centred_square(x, y, radius), context.transform, g);
    }

    ellipse(colour::MARKER_OUTLINE, centred_square(x, y, USER_MARKER_RADIUS * 1.3), context.transform, g);
    ellipse(colour::USER_LOCATION, centred_square(x, y, USER_MARKER_RADIUS), context.transform, g);
}

pub fn draw_status(g: &mut G2d, context: &Context, glyphs: &mut Glyphs,
                   lines: &[(String, [f32; 4])], draw_size: &[f64; 2]) {
    for (ix, (line, tint)) in lines.iter().enumerate() {
        let pos = [STATUS_ORIGIN[0], STATUS_ORIGIN[1] + ix as f64 * LINE_HEIGHT];
        draw_text(g, context, glyphs, line, pos, *tint, 14, draw_size);
    }
}

pub fn draw_panel(g: &mut G2d, context: &Context, glyphs: &mut Glyphs,
                  state: &PanelState, draw_size: &[f64; 2]) {
    if let PanelState::Open { title, body } = state {
        rectangle(colour::PANEL_BACK, panel_rect(), context.transform, g);

        let x = 1.0 - PANEL_WIDTH + PANEL_MARGIN;
        draw_text(g, context, glyphs, title, [x, 0.07], colour::PANEL_TITLE, 20, draw_size);

        for (ix, line) in wrap_text(body, BODY_WRAP_COLUMNS).iter().enumerate() {
            let pos = [x, 0.14 + ix as f64 * LINE_HEIGHT];
            draw_text(g, context, glyphs, line, pos, colour::PANEL_BODY, 14, draw_size);
        }
    }
}

/// Panel bounds in window-normalised coordinates, for click containment.
pub fn panel_rect() -> [f64; 4] {
    [1.0 - PANEL_WIDTH, 0.0, PANEL_WIDTH, 1.0]
}

fn draw_text(g: &mut G2d, context: &Context, glyphs: &mut Glyphs, text: &str,
             pos: [f64; 2], tint: [f32; 4], font_size: u32, draw_size: &[f64; 2]) {
    piston_window::text::Text::new_color(tint, font_size).draw(
        text,
        glyphs,
        &context.draw_state,
        context.transform
            .scale(1.0 / draw_size[0], 1.0 / draw_size[1])
            .trans(pos[0] * draw_size[0], pos[1] * draw_size[1]),
        g)
        .unwrap_or_else(|e| panic!("Text rendering failed ({:?})", e));
}

fn centred_square(x: f64, y: f64, radius: f64) -> [f64; 4] {
    [x - radius, y - radius, radius * 2.0, radius * 2.0]
}

// Greedy word wrap; words longer than the column budget get their own line.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > columns {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::wrap_text;

    #[test]
    fn test_wrap_short_text_single_line() {
        assert_eq!(wrap_text("open late", 20), vec!["open late"]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        assert_eq!(
            wrap_text("a cosy cafe near the waterfront", 12),
            vec!["a cosy cafe", "near the", "waterfront"]
        );
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 12).is_empty());
        assert!(wrap_text("   ", 12).is_empty());
    }
}
