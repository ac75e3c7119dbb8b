use egui::Vec2;

/// Options for [`super::DockManager`].
#[derive(Clone, Debug)]
pub struct DockOptions {
    /// Pointer travel (in points, per axis) before a press on a tab becomes a drag.
    ///
    /// Anything shorter is a plain click and never mutates the layout.
    pub drag_threshold: f32,

    /// Height of the caption bar carrying the float/maximize/minimize/close buttons.
    pub caption_height: f32,

    /// Height of the tab row below the caption bar.
    pub tab_strip_height: f32,

    /// Initial width of the left column (left-top and left-bottom slots).
    pub left_column_width: f32,

    /// Initial height of the left-top slot.
    pub left_top_height: f32,

    /// Initial height of the bottom strip.
    pub bottom_height: f32,

    /// Smallest extent a split child is squeezed to, when the split is large enough.
    pub min_pane_size: f32,

    /// Fraction given to the new container when a region drop splits a target.
    pub region_split_fraction: f32,

    /// Size of a freshly created floating host.
    pub floating_default_size: Vec2,

    /// Opacity of the drag ghost that follows the pointer.
    pub ghost_opacity: f32,

    /// If true, record debug events (drops, layout changes, integrity checks) in a small ring
    /// buffer, readable with [`super::DockManager::debug_log`].
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, audit the pane registry after each mutation.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for DockOptions {
    fn default() -> Self {
        Self {
            drag_threshold: 6.0,
            caption_height: 22.0,
            tab_strip_height: 26.0,
            left_column_width: 220.0,
            left_top_height: 200.0,
            bottom_height: 150.0,
            min_pane_size: 100.0,
            region_split_fraction: 0.5,
            floating_default_size: Vec2::new(400.0, 300.0),
            ghost_opacity: 0.6,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: cfg!(debug_assertions),
            debug_integrity_panic: false,
        }
    }
}

impl DockOptions {
    /// True once the pointer moved far enough from `press` to count as a drag.
    pub(crate) fn exceeds_drag_threshold(&self, press: egui::Pos2, now: egui::Pos2) -> bool {
        (now.x - press.x).abs() >= self.drag_threshold
            || (now.y - press.y).abs() >= self.drag_threshold
    }
}
