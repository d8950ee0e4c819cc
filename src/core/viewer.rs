use std::cell::{Ref, RefCell, RefMut};
use std::sync::mpsc;

use chrono::{DateTime, Local};
use log::{info, warn};
use piston_window::*;

use crate::data::geometry::{Feature, FeatureCollection, Geometry};
use crate::data::markers::{self, Marker};
use crate::data::sheet::PointRow;
use crate::geo::coords::{self, LatLon};
use crate::geo::hit;
use crate::loader::{self, LocationFix, Update};
use crate::panel::Panel;
use crate::rendering;
use crate::rendering::colour;
use crate::sources::sources::SourceProvider;
use crate::text;

const MOUSE_LEFT: usize = 0;
const MOUSE_RIGHT: usize = 1;
const MOUSE_BUTTON_COUNT: usize = 2;

const SCROLL_ZOOM_STEP: f64 = 0.1;
const PAN_SCALING_FACTOR: f64 = 1.5;
const DRAG_THRESHOLD: f64 = 4.0;            // window px, below this a press is a click
const PICK_TOLERANCE: f64 = 0.012;          // window-normalised units

const INITIAL_ZOOM: f64 = 4096.0;
const MIN_ZOOM: f64 = 1.0;

/// Point rows are shown only within this distance of the reference location.
const DISTANCE_LIMIT_M: f64 = 1000.0;

/// Reference location until (and unless) the viewer's real location resolves:
/// Thessaloniki.
pub const FALLBACK_REFERENCE: LatLon = LatLon { lat: 40.6263, lon: 22.9482 };

enum FeedStatus {
    Loading,
    Loaded(usize),
    Failed(String),
}

impl FeedStatus {
    fn line(&self, label: &str) -> (String, [f32; 4]) {
        match self {
            FeedStatus::Loading => (format!("{}: loading...", label), colour::STATUS_TEXT),
            FeedStatus::Loaded(count) => (format!("{}: {} shown", label, count), colour::STATUS_TEXT),
            FeedStatus::Failed(message) => (format!("{}: failed ({})", label, message), colour::STATUS_ERROR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Feature(usize),
    Marker(usize),
}

pub struct MapViewer {
    window: RefCell<PistonWindow>,
    text_manager: RefCell<text::TextManager>,
    source_provider: SourceProvider,

    geometry: FeatureCollection,
    geometry_status: FeedStatus,
    point_rows: Vec<PointRow>,
    points_status: FeedStatus,
    markers: Vec<Marker>,

    reference: LatLon,
    location: Option<LocationFix>,
    notice: Option<String>,
    updated: Option<DateTime<Local>>,

    draw_sizef: [f64; 2],
    window_size: [f64; 2],
    zoom_level: f64,
    view_origin: [f64; 2],
    cursor_pos: [f64; 2],
    hovered: Option<Hit>,
    panel: Panel,

    mouse_down_point: [Option<[f64; 2]>; MOUSE_BUTTON_COUNT],
}

impl MapViewer {
    pub fn execute(&mut self) {
        let (tx_updates, rx_updates) = mpsc::channel();
        loader::start(&self.source_provider, tx_updates);

        loop {
            let e_next = self.window_mut().next();
            let e = match e_next {
                Some(e) => e,
                None => break,
            };

            match e {
                Event::Input(event, _timestamp) => match event {
                    Input::Resize(args) => {
                        let window_size = self.window().size();
                        self.update_size(&args.draw_size, window_size);
                    },
                    Input::Button(args) => match args.button {
                        Button::Mouse(button) if args.state == ButtonState::Press => self.mouse_down(&button),
                        Button::Mouse(button) if args.state == ButtonState::Release => self.mouse_up(&button),
                        _ => ()
                    },
                    Input::Move(args) => match args {
                        Motion::MouseCursor(cursor) => self.mouse_move(&cursor),
                        Motion::MouseRelative(movement) => self.mouse_move_relative(&movement),
                        Motion::MouseScroll(scroll) => self.perform_zoom(scroll),
                        _ => ()
                    },
                    _ => ()
                },
                Event::Loop(event) => match event {
                    Loop::Render(_) => self.render(&e),
                    Loop::AfterRender(_) => {
                        while let Ok(update) = rx_updates.try_recv() {
                            self.apply_update(update);
                        }
                    },
                    _ => ()
                },
                _ => ()
            }
        }
    }

    fn render(&self, e: &Event) {
        let zoom_level = self.zoom_level;
        let view_origin = self.view_origin;
        let render_size = self.draw_sizef;
        let status_lines = self.status_lines();
        let hovered_feature = match self.hovered {
            Some(Hit::Feature(index)) => Some(index),
            _ => None,
        };

        let mut text_manager = self.text_manager.borrow_mut();
        let glyphs = text_manager.glyph_cache();

        self.window.borrow_mut().draw_2d(e, |_context: Context, g, device| {
            // Global transform to a [0.0 1.0] coordinate space, in each axis
            let context = piston_window::Context::new_abs(render_size[0], render_size[1])
                .scale(render_size[0], render_size[1]);

            clear(colour::BACKGROUND, g);

            rendering::draw_overlay(g, &context, zoom_level, &view_origin, &self.geometry, hovered_feature);
            rendering::draw_markers(g, &context, zoom_level, &view_origin, &self.markers);

            if let Some(fix) = self.location {
                rendering::draw_user_location(g, &context, zoom_level, &view_origin,
                                              LatLon::new(fix.latitude, fix.longitude), fix.accuracy);
            }

            rendering::draw_status(g, &context, glyphs, &status_lines, &render_size);
            rendering::draw_panel(g, &context, glyphs, self.panel.state(), &render_size);

            glyphs.factory.encoder.flush(device);
        });
    }

    fn apply_update(&mut self, update: Update) {
        match update {
            Update::Geometry(Ok(collection)) => {
                info!("Geometry layer loaded ({} features)", collection.features.len());
                self.geometry_status = FeedStatus::Loaded(collection.features.len());
                self.geometry = collection;
                self.hovered = None;
            }
            Update::Geometry(Err(e)) => {
                warn!("Geometry feed failed: {}", e);
                self.geometry_status = FeedStatus::Failed(e.to_string());
            }
            Update::Points(Ok(rows)) => {
                info!("Point feed loaded ({} rows)", rows.len());
                self.points_status = FeedStatus::Loaded(0);
                self.point_rows = rows;
                self.refresh_markers();
            }
            Update::Points(Err(e)) => {
                warn!("Point feed failed: {}", e);
                self.points_status = FeedStatus::Failed(e.to_string());
            }
            Update::Location(Ok(fix)) => {
                info!("Viewer location resolved to {:.4}, {:.4}", fix.latitude, fix.longitude);
                self.reference = LatLon::new(fix.latitude, fix.longitude);
                self.location = Some(fix);
                self.centre_on(self.reference);
                self.refresh_markers();
            }
            Update::Location(Err(e)) => {
                warn!("Geolocation failed: {}", e);
                self.notice = Some("Could not determine your location - showing points near Thessaloniki".to_string());
                self.refresh_markers();
            }
        }

        self.updated = Some(Local::now());
    }

    // The filter yields the complete desired set for the current reference,
    // so re-running it after geolocation replaces rather than stacks markers.
    fn refresh_markers(&mut self) {
        self.markers = markers::nearby_markers(&self.point_rows, self.reference, DISTANCE_LIMIT_M);
        if let FeedStatus::Loaded(_) = self.points_status {
            self.points_status = FeedStatus::Loaded(self.markers.len());
        }
        self.hovered = None;
    }

    fn status_lines(&self) -> Vec<(String, [f32; 4])> {
        let mut lines = vec![
            self.geometry_status.line("geometry"),
            self.points_status.line("points"),
        ];

        if let Some(notice) = &self.notice {
            lines.push((notice.clone(), colour::NOTICE));
        }
        if let Some(updated) = self.updated {
            lines.push((format!("updated {}", updated.format("%H:%M:%S")), colour::STATUS_TEXT));
        }
        lines
    }

    fn mouse_down(&mut self, button: &MouseButton) {
        if let Some(ix) = MapViewer::mouse_button_index(button) {
            self.mouse_down_point[ix] = Some(self.cursor_pos);
        }
    }

    fn mouse_up(&mut self, button: &MouseButton) {
        if let Some(ix) = MapViewer::mouse_button_index(button) {
            if ix == MOUSE_LEFT && !self.is_mouse_dragging(ix) {
                self.map_click(self.cursor_pos);
            }
            self.mouse_down_point[ix] = None;
        }
    }

    fn mouse_move(&mut self, cursor: &[f64; 2]) {
        self.cursor_pos = *cursor;
        self.hovered = self.hit_test(cursor);
    }

    fn mouse_move_relative(&mut self, movement: &[f64; 2]) {
        if self.mouse_is_down(MOUSE_RIGHT) {
            self.pan_view([
                (-(movement[0] / self.draw_sizef[0]) * PAN_SCALING_FACTOR) / self.zoom_level,
                (-(movement[1] / self.draw_sizef[1]) * PAN_SCALING_FACTOR) / self.zoom_level,
            ]);
        }
    }

    fn mouse_is_down(&self, button: usize) -> bool {
        self.mouse_down_point[button].is_some()
    }

    fn is_mouse_dragging(&self, button: usize) -> bool {
        self.mouse_down_point[button]
            .map(|start| {
                (start[0] - self.cursor_pos[0]).abs() + (start[1] - self.cursor_pos[1]).abs() > DRAG_THRESHOLD
            })
            .unwrap_or(false)
    }

    /// Click dispatch: a hit on a marker or feature opens the panel and never
    /// doubles as a background click; a click inside the open panel is
    /// contained; anything else is background and closes the panel.
    fn map_click(&mut self, location: [f64; 2]) {
        if self.panel.is_open() && self.in_panel(&location) {
            return;
        }

        match self.hit_test(&location) {
            Some(Hit::Marker(index)) => {
                let (name, description) = {
                    let marker = &self.markers[index];
                    (marker.name.clone(), marker.description.clone())
                };
                self.panel.open(&name, &description);
            }
            Some(Hit::Feature(index)) => {
                let properties = self.geometry.features[index].properties.clone();
                self.panel.open(&properties.name, &properties.description);
            }
            None => self.panel.close(),
        }
    }

    fn in_panel(&self, location: &[f64; 2]) -> bool {
        let rect = rendering::panel_rect();
        let (nx, ny) = (location[0] / self.window_size[0], location[1] / self.window_size[1]);

        nx >= rect[0] && nx <= rect[0] + rect[2] && ny >= rect[1] && ny <= rect[1] + rect[3]
    }

    fn hit_test(&self, location: &[f64; 2]) -> Option<Hit> {
        let loc = coords::window_to_map(location[0], location[1],
                                        &self.window_size, &self.view_origin, self.zoom_level);
        let tolerance_sq = PICK_TOLERANCE * PICK_TOLERANCE;

        // Markers draw on top of the overlay, so they pick first
        let marker_hit = self.markers.iter()
            .enumerate()
            .map(|(ix, marker)| {
                let pos = self.project(marker.position.lon, marker.position.lat);
                (ix, (pos.0 - loc.0).powi(2) + (pos.1 - loc.1).powi(2))
            })
            .filter(|&(_, dist_sq)| dist_sq <= tolerance_sq)
            .fold(None, |best: Option<(usize, f64)>, (ix, dist_sq)| match best {
                Some((_, best_sq)) if best_sq <= dist_sq => best,
                _ => Some((ix, dist_sq)),
            })
            .map(|(ix, _)| Hit::Marker(ix));

        if marker_hit.is_some() {
            return marker_hit;
        }

        self.geometry.features.iter()
            .enumerate()
            .find(|(_, feature)| self.feature_contains(feature, loc, tolerance_sq))
            .map(|(ix, _)| Hit::Feature(ix))
    }

    fn feature_contains(&self, feature: &Feature, loc: (f64, f64), tolerance_sq: f64) -> bool {
        match &feature.geometry {
            Geometry::Point { coordinates } => {
                coordinates.len() >= 2 && {
                    let pos = self.project(coordinates[0], coordinates[1]);
                    (pos.0 - loc.0).powi(2) + (pos.1 - loc.1).powi(2) <= tolerance_sq
                }
            }
            Geometry::LineString { coordinates } => {
                let path = self.project_path(coordinates);
                path.windows(2)
                    .any(|segment| hit::point_segment_distance_sq(loc, segment[0], segment[1]) <= tolerance_sq)
            }
            Geometry::Polygon { coordinates } => self.polygon_contains(coordinates, loc),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().any(|polygon| self.polygon_contains(polygon, loc))
            }
        }
    }

    fn polygon_contains(&self, rings: &[Vec<Vec<f64>>], loc: (f64, f64)) -> bool {
        rings.first()
            .map(|outer| hit::point_in_ring(loc, &self.project_path(outer)))
            .unwrap_or(false)
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        coords::lon_lat_to_map(lon, lat, &self.view_origin, self.zoom_level)
    }

    fn project_path(&self, path: &[Vec<f64>]) -> Vec<(f64, f64)> {
        path.iter()
            .filter(|position| position.len() >= 2)
            .map(|position| self.project(position[0], position[1]))
            .collect()
    }

    fn perform_zoom(&mut self, scroll: [f64; 2]) {
        let (_h_scroll, v_scroll) = (scroll[0], scroll[1]);

        let original_zoom_level = self.zoom_level;
        self.zoom_level = (self.zoom_level * (1.0 + v_scroll * SCROLL_ZOOM_STEP)).max(MIN_ZOOM);

        // Pan so the point under the cursor stays fixed through the zoom
        let size = self.window_size;
        let scale_change = 1.0 / self.zoom_level - 1.0 / original_zoom_level;
        let zoom_point = [self.cursor_pos[0] / size[0], self.cursor_pos[1] / size[1]];

        self.view_origin[0] -= zoom_point[0] * scale_change;
        self.view_origin[1] -= zoom_point[1] * scale_change;
    }

    fn pan_view(&mut self, pan: [f64; 2]) {
        self.view_origin = [
            self.view_origin[0] + pan[0],
            self.view_origin[1] + pan[1]
        ];
    }

    fn centre_on(&mut self, position: LatLon) {
        let (x, y) = coords::normalised_equirectangular_coords(position.lon, position.lat);
        self.view_origin = [x - 0.5 / self.zoom_level, y - 0.5 / self.zoom_level];
    }

    fn update_size(&mut self, draw_size: &[u32; 2], window_size: Size) {
        self.draw_sizef = [draw_size[0] as f64, draw_size[1] as f64];
        self.window_size = [window_size.width, window_size.height];
    }

    fn window(&self) -> Ref<PistonWindow> {
        self.window.borrow()
    }

    fn window_mut(&self) -> RefMut<PistonWindow> {
        self.window.borrow_mut()
    }

    pub fn create(options: BuildOptions) -> Self {
        let mut window = MapViewer::init_window(&options);
        let text_manager = MapViewer::init_text_manager(text::DEFAULT_FONT.to_string(), &mut window);
        info!("Loaded font {}", text_manager.font());

        let draw_size = [window.draw_size().width as f64, window.draw_size().height as f64];
        let window_size = [window.size().width, window.size().height];

        let mut viewer = Self {
            window: RefCell::new(window),
            text_manager: RefCell::new(text_manager),
            source_provider: SourceProvider::new(),

            geometry: FeatureCollection::empty(),
            geometry_status: FeedStatus::Loading,
            point_rows: vec![],
            points_status: FeedStatus::Loading,
            markers: vec![],

            reference: FALLBACK_REFERENCE,
            location: None,
            notice: None,
            updated: None,

            draw_sizef: draw_size,
            window_size,
            zoom_level: INITIAL_ZOOM,
            view_origin: [0.0, 0.0],
            cursor_pos: [0.0, 0.0],
            hovered: None,
            panel: Panel::new(),

            mouse_down_point: [None; MOUSE_BUTTON_COUNT]
        };

        viewer.centre_on(FALLBACK_REFERENCE);
        viewer
    }

    fn init_window(options: &BuildOptions) -> PistonWindow {
        let mut window: PistonWindow = WindowSettings::new("sheetmap", [900, 640])
            .graphics_api(options.gl_version)
            .exit_on_esc(true)
            .build()
            .unwrap_or_else(|_| panic!("Cannot initialise window"));

        window.set_lazy(false);
        window
    }

    fn init_text_manager(font: String, window: &mut PistonWindow) -> text::TextManager {
        let glyphs = window.load_font(font.as_str())
            .unwrap_or_else(|e| panic!("Failed to initialise text manager ({:?})", e));

        text::TextManager::create(font, glyphs)
    }

    fn mouse_button_index(button: &MouseButton) -> Option<usize> {
        match button {
            MouseButton::Left => Some(MOUSE_LEFT),
            MouseButton::Right => Some(MOUSE_RIGHT),

            _ => None
        }
    }
}

pub struct BuildOptions {
    pub gl_version: OpenGL,
}
