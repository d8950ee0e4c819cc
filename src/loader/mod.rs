//! Background loading of the two feeds and the viewer location. Each load is
//! a one-shot thread; results arrive on a shared channel in whatever order
//! the network yields them, and the event loop applies them between frames.

use std::sync::mpsc::Sender;
use std::thread;

use failure::Error;
use log::info;
use serde::Deserialize;

use crate::data::geometry::FeatureCollection;
use crate::data::sheet::{self, PointRow};
use crate::sources::httpclient;
use crate::sources::sources::{Source, SourceProvider};

pub enum Update {
    Geometry(Result<FeatureCollection, Error>),
    Points(Result<Vec<PointRow>, Error>),
    Location(Result<LocationFix, Error>),
}

/// Resolved viewer location, decoded from the locator response.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Spawns the three one-shot background loads. Send failures mean the viewer
/// has already shut down, so they are ignored.
pub fn start(provider: &SourceProvider, out: Sender<Update>) {
    let geometry = provider.geometry_feed();
    let points = provider.points_feed();
    let locator = provider.locator();

    let tx = out.clone();
    thread::spawn(move || { let _ = tx.send(Update::Geometry(fetch_geometry(&geometry))); });

    let tx = out.clone();
    thread::spawn(move || { let _ = tx.send(Update::Points(fetch_points(&points))); });

    thread::spawn(move || { let _ = out.send(Update::Location(fetch_location(&locator))); });
}

fn fetch_geometry(source: &Source) -> Result<FeatureCollection, Error> {
    info!("Fetching {}", source.name());

    let body = httpclient::get(source.url())?;
    let rows = sheet::read_geometry_rows(&body);
    Ok(sheet::build_feature_collection(&rows))
}

fn fetch_points(source: &Source) -> Result<Vec<PointRow>, Error> {
    info!("Fetching {}", source.name());

    let body = httpclient::get(source.url())?;
    Ok(sheet::read_point_rows(&body))
}

fn fetch_location(source: &Source) -> Result<LocationFix, Error> {
    info!("Resolving viewer location via {}", source.name());

    let body = httpclient::get(source.url())?;
    let fix: LocationFix = serde_json::from_str(&body)?;
    Ok(fix)
}
