use crate::config::DashboardConfig;

/// The coordinator's mutable state: which attribute drives color and
/// bar height, and which region (if any) is hover-highlighted. Held as
/// one value by the view layer so every transition is testable without
/// a rendering surface, and so several dashboards could coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    expressed: String,
    highlight: Option<String>,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            expressed: config.default_attribute.clone(),
            highlight: None,
        }
    }

    pub fn expressed(&self) -> &str {
        &self.expressed
    }

    pub fn highlight(&self) -> Option<&str> {
        self.highlight.as_deref()
    }

    pub fn is_highlighted(&self, code: &str) -> bool {
        self.highlight.as_deref() == Some(code)
    }

    /// Pointer entered a region or its bar. Replaces any previous
    /// highlight without requiring a leave first.
    pub fn pointer_enter(&mut self, code: &str) {
        self.highlight = Some(code.to_string());
    }

    /// Pointer left a region or bar. Overlapping shapes can deliver a
    /// leave for an element that was already superseded by a newer
    /// enter; only a leave matching the current highlight clears it.
    /// Returns whether the highlight was cleared.
    pub fn pointer_leave(&mut self, code: &str) -> bool {
        if self.highlight.as_deref() == Some(code) {
            self.highlight = None;
            true
        } else {
            false
        }
    }

    /// The dropdown changed. The highlight survives the switch, so a
    /// hovered element immediately shows the new attribute's value.
    /// Unknown keys are rejected. Returns whether the selection changed.
    pub fn select_attribute(&mut self, key: &str, config: &DashboardConfig) -> bool {
        if key != self.expressed && config.has_attribute(key) {
            self.expressed = key.to_string();
            true
        } else {
            false
        }
    }

    /// Bar opacity under the current highlight: invisible bars stay at
    /// zero, everything else dims to 0.3 unless it is the highlight.
    pub fn bar_opacity(&self, code: &str, invisible: bool) -> f64 {
        if invisible {
            0.0
        } else if self.highlight.is_none() || self.is_highlighted(code) {
            1.0
        } else {
            0.3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardState;
    use crate::config::DashboardConfig;

    fn state() -> (DashboardState, DashboardConfig) {
        let config = DashboardConfig::default();
        (DashboardState::new(&config), config)
    }

    #[test]
    fn starts_idle_on_the_default_attribute() {
        let (state, config) = state();
        assert_eq!(state.expressed(), config.default_attribute);
        assert_eq!(state.highlight(), None);
    }

    #[test]
    fn enter_replaces_a_previous_highlight() {
        let (mut state, _) = state();
        state.pointer_enter("MX-01");
        state.pointer_enter("MX-02");
        assert_eq!(state.highlight(), Some("MX-02"));
    }

    #[test]
    fn stale_leave_does_not_clear_the_highlight() {
        let (mut state, _) = state();
        state.pointer_enter("MX-01");
        assert!(!state.pointer_leave("MX-02"));
        assert_eq!(state.highlight(), Some("MX-01"));
    }

    #[test]
    fn matching_leave_returns_to_idle() {
        let (mut state, _) = state();
        state.pointer_enter("MX-01");
        assert!(state.pointer_leave("MX-01"));
        assert_eq!(state.highlight(), None);
    }

    #[test]
    fn attribute_switch_leaves_the_highlight_alone() {
        let (mut state, config) = state();
        state.pointer_enter("MX-01");
        assert!(state.select_attribute("MurderRate", &config));
        assert_eq!(state.expressed(), "MurderRate");
        assert_eq!(state.highlight(), Some("MX-01"));
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let (mut state, config) = state();
        assert!(!state.select_attribute("NotAColumn", &config));
        assert_eq!(state.expressed(), config.default_attribute);
    }

    #[test]
    fn reselecting_the_current_attribute_is_a_no_op() {
        let (mut state, config) = state();
        let current = state.expressed().to_string();
        assert!(!state.select_attribute(&current, &config));
    }

    #[test]
    fn bar_opacity_dims_everything_but_the_highlight() {
        let (mut state, _) = state();
        assert_eq!(state.bar_opacity("MX-01", false), 1.0);

        state.pointer_enter("MX-01");
        assert_eq!(state.bar_opacity("MX-01", false), 1.0);
        assert_eq!(state.bar_opacity("MX-02", false), 0.3);
        assert_eq!(state.bar_opacity("MX-03", true), 0.0);

        state.pointer_leave("MX-01");
        assert_eq!(state.bar_opacity("MX-02", false), 1.0);
    }
}
