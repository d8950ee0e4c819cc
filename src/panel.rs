//! Detail side panel, shared by both layers.

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Closed,
    Open { title: String, body: String },
}

#[derive(Debug)]
pub struct Panel {
    state: PanelState,
}

impl Panel {
    pub fn new() -> Self {
        Self { state: PanelState::Closed }
    }

    /// Opens the panel on the given content, replacing whatever is currently
    /// shown; no intermediate close is required.
    pub fn open(&mut self, title: &str, body: &str) {
        self.state = PanelState::Open {
            title: title.to_string(),
            body: body.to_string(),
        };
    }

    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }

    pub fn is_open(&self) -> bool {
        match self.state {
            PanelState::Open { .. } => true,
            PanelState::Closed => false,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let panel = Panel::new();
        assert!(!panel.is_open());
        assert_eq!(*panel.state(), PanelState::Closed);
    }

    #[test]
    fn test_open_then_open_replaces_content() {
        let mut panel = Panel::new();

        panel.open("Feature A", "first");
        panel.open("Feature B", "second");

        assert_eq!(*panel.state(), PanelState::Open {
            title: "Feature B".to_string(),
            body: "second".to_string(),
        });
    }

    #[test]
    fn test_background_click_closes() {
        let mut panel = Panel::new();

        panel.open("Feature A", "first");
        assert!(panel.is_open());

        panel.close();
        assert!(!panel.is_open());
    }
}
