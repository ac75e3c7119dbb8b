use egui::{Pos2, Rect, pos2, vec2};

use super::DockManager;
use super::options::DockOptions;
use super::types::{ContainerId, DockPos, PageContent, PageParent};

/// Content handle that records what the engine did to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TestPane {
    pub name: &'static str,
    pub parent: Option<PageParent>,
    pub shown: bool,
}

impl TestPane {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            shown: false,
        }
    }
}

impl PageContent for TestPane {
    fn name(&self) -> Option<String> {
        Some(self.name.to_owned())
    }

    fn reparent(&mut self, parent: PageParent) {
        self.parent = Some(parent);
    }

    fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }
}

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) const BOUNDS: Rect = Rect {
    min: Pos2 { x: 0.0, y: 0.0 },
    max: Pos2 { x: 1000.0, y: 800.0 },
};

/// Default layout in a 1000×800 window with a 200-wide left column:
///
/// - left-top: x 0..200, y 0..200
/// - left-bottom: x 0..200, y 200..650
/// - center: x 200..1000, y 0..650
/// - bottom: x 0..1000, y 650..800
pub(crate) fn manager() -> DockManager<TestPane> {
    init_logging();
    let options = DockOptions {
        left_column_width: 200.0,
        debug_integrity: true,
        debug_integrity_panic: true,
        debug_event_log: true,
        ..Default::default()
    };
    let mut docking = DockManager::new(options);
    docking.set_bounds(BOUNDS);
    docking
}

pub(crate) fn slot(docking: &DockManager<TestPane>, pos: DockPos) -> ContainerId {
    docking.slot(pos).expect("default slot")
}

pub(crate) fn labels(docking: &DockManager<TestPane>, id: ContainerId) -> Vec<String> {
    docking
        .container(id)
        .map(|c| c.tabs().labels().map(str::to_owned).collect())
        .unwrap_or_default()
}

/// Point inside the tab row of `id`, `local_x` from its left edge.
pub(crate) fn strip_point(docking: &DockManager<TestPane>, id: ContainerId, local_x: f32) -> Pos2 {
    let strip = docking.container(id).expect("container").strip_rect();
    pos2(strip.left() + local_x, strip.center().y)
}

pub(crate) fn assert_registry_ok(docking: &DockManager<TestPane>) {
    let issues = docking.integrity_issues();
    assert!(
        issues.is_empty(),
        "registry integrity failed:\n{}",
        issues.join("\n")
    );
}

pub(crate) fn offset(p: Pos2, dx: f32, dy: f32) -> Pos2 {
    p + vec2(dx, dy)
}
