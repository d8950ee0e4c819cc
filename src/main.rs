use piston_window::OpenGL;

mod core;
mod data;
mod geo;
mod loader;
mod panel;
mod rendering;
mod sources;
mod text;

use crate::core::viewer::{BuildOptions, MapViewer};

fn main() {
    env_logger::init();

    let mut viewer = MapViewer::create(BuildOptions { gl_version: OpenGL::V4_5 });
    viewer.execute();
}
