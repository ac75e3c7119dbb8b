use egui::{Pos2, Rect, Vec2};

use super::DockManager;
use super::region::{DockRegion, region_preview_rect, resolve_region};
use super::types::{ContainerId, DockPos, PageContent};

/// Highlight of where a region drop will land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionPreview {
    /// Container the drop applies to. For a target with docking disabled this is the default
    /// center slot the drop falls back to.
    pub target: ContainerId,
    pub region: DockRegion,
    pub rect: Rect,
}

/// Caret between tabs showing where a tab drop will be inserted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertionPreview {
    pub target: ContainerId,
    pub index: usize,
    pub strip_rect: Rect,
    pub caret_x: f32,
}

/// Semi-transparent stand-in for the dragged page, following the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct DragGhost {
    pub label: String,
    pub rect: Rect,
    pub opacity: f32,
}

/// Everything the overlay shows during a drag. Derived state only; empty outside of a drag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DockPreview {
    pub region: Option<RegionPreview>,
    pub insertion: Option<InsertionPreview>,
    pub ghost: Option<DragGhost>,
}

impl DockPreview {
    pub fn is_visible(&self) -> bool {
        self.region.is_some() || self.insertion.is_some() || self.ghost.is_some()
    }
}

/// Offset of the drag ghost from the pointer.
const GHOST_GRAB_OFFSET: Vec2 = Vec2::new(20.0, 10.0);

impl<C: PageContent> DockManager<C> {
    pub fn preview(&self) -> &DockPreview {
        &self.preview
    }

    /// Region of `container` under `screen_point`, or `None` if the container is unknown.
    pub fn compute_region_for_point(
        &self,
        container: ContainerId,
        screen_point: Pos2,
    ) -> Option<DockRegion> {
        let rect = self.containers.get(&container)?.rect();
        Some(resolve_region(rect, screen_point))
    }

    /// Show the region highlight for whatever container is under `screen_point`.
    ///
    /// The highlight is half of the hovered container on the resolved side, or the whole
    /// container for Center. Hides the highlight when nothing is hovered.
    pub fn show_dock_preview(&mut self, screen_point: Pos2) -> Option<RegionPreview> {
        let preview = self.region_preview_at(screen_point);
        self.preview.region = preview;
        if let Some(p) = &preview {
            log::trace!(
                "dock preview target={} region={:?}",
                p.target.as_u64(),
                p.region
            );
        }
        preview
    }

    fn region_preview_at(&self, screen_point: Pos2) -> Option<RegionPreview> {
        let hovered = self.container_at(screen_point)?;
        let container = self.containers.get(&hovered)?;

        if !container.docking_enabled() {
            let fallback = self.slot(DockPos::Center)?;
            let rect = self.containers.get(&fallback)?.rect();
            return Some(RegionPreview {
                target: fallback,
                region: DockRegion::Center,
                rect,
            });
        }

        let mut region = resolve_region(container.rect(), screen_point);
        if container.is_floating() {
            region = DockRegion::Center;
        }
        Some(RegionPreview {
            target: hovered,
            region,
            rect: region_preview_rect(container.rect(), region),
        })
    }

    /// Show (or with `target == None`, clear) the tab insertion caret.
    pub fn set_insertion_preview(
        &mut self,
        target: Option<ContainerId>,
        index: usize,
        strip_rect: Rect,
        caret_x: f32,
    ) {
        self.preview.insertion = target.map(|target| InsertionPreview {
            target,
            index,
            strip_rect,
            caret_x,
        });
    }

    /// Hide every preview (region, caret and ghost).
    pub fn hide_dock_preview(&mut self) {
        if self.preview.is_visible() {
            log::trace!("dock preview hidden");
        }
        self.preview = DockPreview::default();
    }

    pub(crate) fn update_ghost(&mut self, label: String, size: Vec2, pointer: Pos2) {
        self.preview.ghost = Some(DragGhost {
            label,
            rect: Rect::from_min_size(pointer - GHOST_GRAB_OFFSET, size),
            opacity: self.options.ghost_opacity,
        });
    }

    pub(crate) fn move_ghost(&mut self, pointer: Pos2) {
        if let Some(ghost) = &mut self.preview.ghost {
            ghost.rect = Rect::from_min_size(pointer - GHOST_GRAB_OFFSET, ghost.rect.size());
        }
    }
}
