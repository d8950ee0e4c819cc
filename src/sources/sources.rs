//! The published spreadsheet exports and the locator endpoint. Source URLs
//! are compile-time constants; there is no configuration surface.

const GEOMETRY_FEED_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vR1SmQbmmPu6tfv6yWjFn3KAsgmp6w61cZSyj0n_2Gf18-zJozWoH9ibO5iIdEEzNCV_YatKFhMES7R/pub?output=csv";
const POINTS_FEED_URL: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vR5_L7aJDIUlWJTIeQLK5y1n_gk726epUZTwvnvB9hHKEYXjVOOlcN-mvlW4kxxPNBdp-nfiCtY24jt/pub?output=csv";
const LOCATOR_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone)]
pub struct Source {
    name: &'static str,
    url: &'static str,
}

impl Source {
    fn new(name: &'static str, url: &'static str) -> Self {
        Self { name, url }
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn url(&self) -> &'static str { self.url }
}

pub struct SourceProvider;

impl SourceProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn geometry_feed(&self) -> Source {
        Source::new("geometry feed", GEOMETRY_FEED_URL)
    }

    pub fn points_feed(&self) -> Source {
        Source::new("points feed", POINTS_FEED_URL)
    }

    pub fn locator(&self) -> Source {
        Source::new("locator", LOCATOR_URL)
    }
}
