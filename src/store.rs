// Dashboard selection state shared between the input layer and the director.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// 3D globe view.
    Globe,
    /// Flat county drill-down for the selected state.
    StateCounties,
}

pub struct SelectionStore {
    view_mode: ViewMode,
    selected_state: Option<String>,
    hovered_state: Option<String>,
    /// External zoom request (search box etc.); consumed once per frame.
    pending_state_zoom: Option<String>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            view_mode: ViewMode::Globe,
            selected_state: None,
            hovered_state: None,
            pending_state_zoom: None,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_county_view(&self) -> bool {
        self.view_mode() == ViewMode::StateCounties
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    pub fn hovered_state(&self) -> Option<&str> {
        self.hovered_state.as_deref()
    }

    /// Selecting the already selected state drills into its counties instead
    /// of re-selecting it.
    pub fn select_state(&mut self, name: &str) {
        if self.selected_state.as_deref() == Some(name) {
            debug!("entering county view for {name}");
            self.view_mode = ViewMode::StateCounties;
            return;
        }
        debug!("selected {name}");
        self.selected_state = Some(name.to_string());
    }

    pub fn set_hovered_state(&mut self, name: Option<&str>) {
        self.hovered_state = name.map(str::to_string);
    }

    pub fn clear_selection(&mut self) {
        if self.selected_state.is_some() {
            debug!("selection cleared");
        }
        self.selected_state = None;
        self.view_mode = ViewMode::Globe;
    }

    pub fn exit_county_view(&mut self) {
        self.view_mode = ViewMode::Globe;
    }

    pub fn request_state_zoom(&mut self, name: &str) {
        self.pending_state_zoom = Some(name.to_string());
    }

    pub fn take_pending_zoom(&mut self) -> Option<String> {
        self.pending_state_zoom.take()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}
