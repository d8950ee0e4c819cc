use piston_window::Glyphs;

pub const DEFAULT_FONT: &str = "resources/DejaVuSans.ttf";

pub struct TextManager {
    font: String,
    glyphs: Glyphs,
}

impl TextManager {
    pub fn create(font: String, glyphs: Glyphs) -> Self {
        Self { font, glyphs }
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn glyph_cache(&mut self) -> &mut Glyphs {
        &mut self.glyphs
    }
}
