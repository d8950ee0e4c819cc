pub const BACKGROUND: [f32; 4] = [0.07, 0.07, 0.09, 1.0];

// Overlay styling, default and hover
pub const GEOM_STROKE: [f32; 4] = [44.0/255.0, 162.0/255.0, 95.0/255.0, 1.0];
pub const GEOM_FILL: [f32; 4] = [153.0/255.0, 216.0/255.0, 201.0/255.0, 0.5];
pub const GEOM_HOVER_STROKE: [f32; 4] = [0.0/255.0, 128.0/255.0, 0.0/255.0, 1.0];
pub const GEOM_HOVER_FILL: [f32; 4] = [44.0/255.0, 162.0/255.0, 95.0/255.0, 0.6];

// Marker tints, keyed by sheet colour name
pub const MARKER_BLUE: [f32; 4] = [38.0/255.0, 120.0/255.0, 219.0/255.0, 1.0];
pub const MARKER_RED: [f32; 4] = [215.0/255.0, 63.0/255.0, 42.0/255.0, 1.0];
pub const MARKER_GREEN: [f32; 4] = [114.0/255.0, 175.0/255.0, 38.0/255.0, 1.0];
pub const MARKER_ORANGE: [f32; 4] = [242.0/255.0, 149.0/255.0, 54.0/255.0, 1.0];
pub const MARKER_PURPLE: [f32; 4] = [208.0/255.0, 82.0/255.0, 184.0/255.0, 1.0];
pub const MARKER_DARKRED: [f32; 4] = [163.0/255.0, 35.0/255.0, 23.0/255.0, 1.0];
pub const MARKER_CADETBLUE: [f32; 4] = [67.0/255.0, 105.0/255.0, 120.0/255.0, 1.0];
pub const MARKER_DEFAULT: [f32; 4] = MARKER_BLUE;
pub const MARKER_OUTLINE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];

// Viewer's own position
pub const USER_LOCATION: [f32; 4] = [19.0/255.0, 106.0/255.0, 236.0/255.0, 1.0];
pub const ACCURACY_FILL: [f32; 4] = [19.0/255.0, 106.0/255.0, 236.0/255.0, 0.15];

// Status area and panel
pub const STATUS_TEXT: [f32; 4] = [220.0/255.0, 220.0/255.0, 220.0/255.0, 1.0];
pub const STATUS_ERROR: [f32; 4] = [235.0/255.0, 90.0/255.0, 90.0/255.0, 1.0];
pub const NOTICE: [f32; 4] = [235.0/255.0, 190.0/255.0, 90.0/255.0, 1.0];
pub const PANEL_BACK: [f32; 4] = [0.12, 0.12, 0.15, 0.92];
pub const PANEL_TITLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const PANEL_BODY: [f32; 4] = [200.0/255.0, 200.0/255.0, 200.0/255.0, 1.0];

/// Resolves a sheet colour name to a marker tint; unknown or absent names
/// use the default.
pub fn marker_colour(name: &str) -> [f32; 4] {
    match name.trim() {
        "blue" => MARKER_BLUE,
        "red" => MARKER_RED,
        "green" => MARKER_GREEN,
        "orange" => MARKER_ORANGE,
        "purple" => MARKER_PURPLE,
        "darkred" => MARKER_DARKRED,
        "cadetblue" => MARKER_CADETBLUE,
        _ => MARKER_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_colour_uses_default() {
        assert_eq!(marker_colour(""), MARKER_DEFAULT);
        assert_eq!(marker_colour("  "), MARKER_DEFAULT);
    }

    #[test]
    fn test_unknown_colour_uses_default() {
        assert_eq!(marker_colour("chartreuse"), MARKER_DEFAULT);
    }

    #[test]
    fn test_named_colour_resolves() {
        assert_eq!(marker_colour("red"), MARKER_RED);
        assert_ne!(marker_colour("red"), MARKER_DEFAULT);
    }
}
