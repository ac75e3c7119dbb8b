use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use egui::{Pos2, Rect};

mod actions;
mod buttons;
mod container;
mod debug;
mod drag;
mod error;
mod floating;
mod integrity;
mod options;
mod paint;
mod persistence;
mod pointer;
mod preview;
mod region;
mod split_tree;
mod tab_strip;
mod types;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod drag_tests;

pub use actions::{ActionOutcome, ContextAction};
pub use buttons::CaptionButton;
pub use container::{ContainerHost, DockContainer};
pub use drag::{DragPhase, DragSession};
pub use error::{DockError, Rejected};
pub use floating::{FloatingClose, FloatingCloseHandle, FloatingHost};
pub use options::DockOptions;
pub use paint::{paint_caption_buttons, paint_dock_preview};
pub use pointer::DropOutcome;
pub use preview::{DockPreview, DragGhost, InsertionPreview, RegionPreview};
pub use region::{CENTER_INSET_FRACTION, DockRegion, region_preview_rect, resolve_region};
pub use split_tree::{LayoutNode, NodeId, Sash, Split, SplitAxis, SplitTree, TreeLayout};
pub use tab_strip::{CARET_OFFSET, MIN_TAB_WIDTH, Page, TabStrip};
pub use types::{ContainerId, DockPos, FloatingId, PageContent, PageParent};

use drag::DragTracker;
use types::label_for;

/// A manager shared with deferred callbacks, see [`FloatingCloseHandle`].
pub type SharedDockManager<C> = Rc<RefCell<DockManager<C>>>;

/// The well-known containers created by [`DockManager::new`].
#[derive(Clone, Copy, Debug, Default)]
struct DefaultSlots {
    left_top: Option<ContainerId>,
    left_bottom: Option<ContainerId>,
    center: Option<ContainerId>,
    bottom: Option<ContainerId>,
}

impl DefaultSlots {
    fn get(&self, pos: DockPos) -> Option<ContainerId> {
        match pos {
            DockPos::LeftTop => self.left_top,
            DockPos::LeftBottom => self.left_bottom,
            DockPos::Center => self.center,
            DockPos::Bottom => self.bottom,
        }
    }

    fn clear(&mut self, id: ContainerId) {
        for slot in [
            &mut self.left_top,
            &mut self.left_bottom,
            &mut self.center,
            &mut self.bottom,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }
}

/// Panel docking engine: a split tree of tabbed containers plus floating hosts.
///
/// Layout:
/// - Four default slots (left-top, left-bottom, center, bottom) are created up front.
/// - Dropping a page on a container edge splits that container's slot in two.
/// - Dropping a page outside every container floats it in a new host.
///
/// The manager does not own a window. Feed it the dock area with [`Self::set_bounds`] and pointer
/// input with [`Self::on_pointer_press`], [`Self::on_pointer_move`] and
/// [`Self::on_pointer_release`]; read back container geometry and [`Self::preview`] to paint.
#[derive(Debug)]
pub struct DockManager<C> {
    pub options: DockOptions,

    containers: BTreeMap<ContainerId, DockContainer<C>>,
    tree: SplitTree,
    slots: DefaultSlots,
    root_splitter: Option<NodeId>,
    main_splitter: Option<NodeId>,
    left_splitter: Option<NodeId>,
    next_container_serial: u64,

    floating: BTreeMap<FloatingId, FloatingHost>,
    z_order: Vec<FloatingId>,
    next_floating_serial: u64,

    maximized: Option<ContainerId>,
    bounds: Rect,

    drag: DragTracker,
    pressed_button: Option<(ContainerId, CaptionButton)>,
    last_pointer: Option<Pos2>,
    preview: DockPreview,

    being_destroyed: bool,

    debug_log: VecDeque<String>,
    debug_event_serial: u64,
}

impl<C: PageContent> DockManager<C> {
    /// Create a manager with the default four-slot layout.
    ///
    /// ```text
    /// +-----------+---------------------+
    /// | left-top  |                     |
    /// +-----------+       center        |
    /// |left-bottom|                     |
    /// +-----------+---------------------+
    /// |             bottom              |
    /// +---------------------------------+
    /// ```
    pub fn new(options: DockOptions) -> Self {
        let mut docking = Self {
            options,
            containers: BTreeMap::new(),
            tree: SplitTree::default(),
            slots: DefaultSlots::default(),
            root_splitter: None,
            main_splitter: None,
            left_splitter: None,
            next_container_serial: 0,
            floating: BTreeMap::new(),
            z_order: Vec::new(),
            next_floating_serial: 0,
            maximized: None,
            bounds: Rect::NOTHING,
            drag: DragTracker::default(),
            pressed_button: None,
            last_pointer: None,
            preview: DockPreview::default(),
            being_destroyed: false,
            debug_log: VecDeque::new(),
            debug_event_serial: 0,
        };
        docking.build_default_layout();
        docking
    }

    pub fn new_shared(options: DockOptions) -> SharedDockManager<C> {
        Rc::new(RefCell::new(Self::new(options)))
    }

    fn build_default_layout(&mut self) {
        let left_top = self.alloc_container(ContainerHost::Docked);
        let left_bottom = self.alloc_container(ContainerHost::Docked);
        let center = self.alloc_container(ContainerHost::Docked);
        let bottom = self.alloc_container(ContainerHost::Docked);

        let lt = self.tree.insert_leaf(left_top);
        let lb = self.tree.insert_leaf(left_bottom);
        let c = self.tree.insert_leaf(center);
        let b = self.tree.insert_leaf(bottom);

        let left = self.tree.insert_split(
            SplitAxis::Vertical,
            Sash::FirstPx(self.options.left_top_height),
            lt,
            lb,
        );
        let main = self.tree.insert_split(
            SplitAxis::Horizontal,
            Sash::FirstPx(self.options.left_column_width),
            left,
            c,
        );
        let root = self.tree.insert_split(
            SplitAxis::Vertical,
            Sash::SecondPx(self.options.bottom_height),
            main,
            b,
        );
        self.tree.set_root(root);

        self.slots = DefaultSlots {
            left_top: Some(left_top),
            left_bottom: Some(left_bottom),
            center: Some(center),
            bottom: Some(bottom),
        };
        self.root_splitter = Some(root);
        self.main_splitter = Some(main);
        self.left_splitter = Some(left);
        log::debug!(
            "default dock layout: left_top={} left_bottom={} center={} bottom={}",
            left_top.as_u64(),
            left_bottom.as_u64(),
            center.as_u64(),
            bottom.as_u64()
        );
    }

    pub(crate) fn alloc_container(&mut self, host: ContainerHost) -> ContainerId {
        self.next_container_serial = self.next_container_serial.saturating_add(1);
        let id = ContainerId::from_u64(self.next_container_serial);
        self.containers.insert(id, DockContainer::new(id, host));
        id
    }

    // ------------------------------------------------------------------------
    // Queries

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn container(&self, id: ContainerId) -> Option<&DockContainer<C>> {
        self.containers.get(&id)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut DockContainer<C>> {
        self.containers.get_mut(&id)
    }

    /// Every live container, docked and floating, in id order.
    pub fn containers(&self) -> impl Iterator<Item = &DockContainer<C>> + '_ {
        self.containers.values()
    }

    /// Docked containers in layout order (first child before second).
    pub fn docked_containers(&self) -> Vec<ContainerId> {
        self.tree.containers()
    }

    /// The container in a default slot, if it has not been closed.
    pub fn slot(&self, pos: DockPos) -> Option<ContainerId> {
        self.slots
            .get(pos)
            .filter(|id| self.containers.contains_key(id))
    }

    pub fn tree(&self) -> &SplitTree {
        &self.tree
    }

    /// Left column | center split, while both sides still exist.
    pub fn main_splitter(&self) -> Option<NodeId> {
        self.main_splitter.filter(|id| self.tree.split(*id).is_some())
    }

    /// Left-top | left-bottom split, while both sides still exist.
    pub fn left_splitter(&self) -> Option<NodeId> {
        self.left_splitter.filter(|id| self.tree.split(*id).is_some())
    }

    /// Main area | bottom strip split.
    pub fn root_splitter(&self) -> Option<NodeId> {
        self.root_splitter.filter(|id| self.tree.split(*id).is_some())
    }

    pub fn maximized(&self) -> Option<ContainerId> {
        self.maximized
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    pub fn is_being_destroyed(&self) -> bool {
        self.being_destroyed
    }

    /// The container under `pos`.
    ///
    /// Floating hosts win over docked containers, topmost first. Among docked containers the
    /// smallest one containing `pos` wins, so a shared edge resolves deterministically.
    pub fn container_at(&self, pos: Pos2) -> Option<ContainerId> {
        for floating_id in self.z_order.iter().rev() {
            if let Some(host) = self.floating.get(floating_id)
                && host.rect.contains(pos)
            {
                return Some(host.container);
            }
        }

        self.containers
            .values()
            .filter(|c| !c.is_floating())
            .filter(|c| c.rect().is_positive() && c.rect().contains(pos))
            .min_by(|a, b| {
                a.rect()
                    .area()
                    .total_cmp(&b.rect().area())
                    .then(a.id().cmp(&b.id()))
            })
            .map(|c| c.id())
    }

    // ------------------------------------------------------------------------
    // Geometry

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            log::trace!("dock bounds {bounds:?}");
        }
        self.bounds = bounds;
        self.relayout();
    }

    /// Move a splitter's divider and relayout.
    pub fn set_sash(&mut self, node: NodeId, sash: Sash) -> bool {
        let Some(split) = self.tree.split_mut(node) else {
            return false;
        };
        split.sash = sash;
        self.relayout();
        true
    }

    pub(crate) fn relayout(&mut self) {
        // A later dock can put a minimized container side by side with another.
        for (id, container) in &mut self.containers {
            if container.is_minimized() && !self.tree.can_collapse(*id) {
                container.set_minimized(false);
            }
        }

        let caption_height = self.options.caption_height;
        let layout_rects: BTreeMap<ContainerId, Rect> = if !self.bounds.is_positive() {
            BTreeMap::new()
        } else if let Some(maximized) = self
            .maximized
            .filter(|id| self.tree.leaf_of(*id).is_some())
        {
            BTreeMap::from([(maximized, self.bounds)])
        } else {
            let containers = &self.containers;
            self.tree
                .layout(self.bounds, self.options.min_pane_size, |id| {
                    containers
                        .get(&id)
                        .filter(|c| c.is_minimized())
                        .map(|_| caption_height)
                })
                .containers
        };

        for (id, container) in &mut self.containers {
            let rect = match container.host() {
                ContainerHost::Docked => layout_rects.get(id).copied().unwrap_or(Rect::NOTHING),
                ContainerHost::Floating(floating_id) => self
                    .floating
                    .get(&floating_id)
                    .map_or(Rect::NOTHING, |host| host.rect),
            };
            container.handle_size_event(rect, &self.options, |_| {});
        }
    }

    // ------------------------------------------------------------------------
    // Pane API

    /// Add content to a default slot, labelled with [`PageContent::name`] (or "Pane").
    ///
    /// # Errors
    /// Hands the content back when the manager is tearing down or the slot was closed.
    pub fn add_pane(&mut self, content: C, pos: DockPos) -> Result<ContainerId, Rejected<C>> {
        let label = label_for(&content);
        self.add_page(Page::new(content, label), pos)
            .map_err(|rejected| rejected.map(|page| page.content))
    }

    /// Like [`Self::add_pane`], also resizing the slot.
    ///
    /// `size_px` sets the left-top pane height for [`DockPos::LeftTop`] and the bottom strip
    /// height for [`DockPos::Bottom`]; it is ignored for the other positions and when not positive.
    ///
    /// # Errors
    /// See [`Self::add_pane`].
    pub fn add_pane_sized(
        &mut self,
        content: C,
        pos: DockPos,
        size_px: f32,
    ) -> Result<ContainerId, Rejected<C>> {
        let id = self.add_pane(content, pos)?;
        if size_px > 0.0 {
            let sized = match pos {
                DockPos::LeftTop => self
                    .left_splitter()
                    .map(|node| (node, Sash::FirstPx(size_px))),
                DockPos::Bottom => self
                    .root_splitter()
                    .map(|node| (node, Sash::SecondPx(size_px))),
                DockPos::LeftBottom | DockPos::Center => None,
            };
            if let Some((node, sash)) = sized {
                self.set_sash(node, sash);
            }
        }
        Ok(id)
    }

    /// Add a labelled page to a default slot and select it.
    ///
    /// # Errors
    /// Hands the page back when the manager is tearing down or the slot was closed.
    pub fn add_page(
        &mut self,
        page: Page<C>,
        pos: DockPos,
    ) -> Result<ContainerId, Rejected<Page<C>>> {
        if self.being_destroyed {
            return Err(Rejected::new(DockError::TearingDown, page));
        }
        let Some(id) = self.slot(pos) else {
            return Err(Rejected::new(DockError::NoDefaultSlot(pos), page));
        };
        let Some(container) = self.containers.get_mut(&id) else {
            return Err(Rejected::new(DockError::UnknownContainer(id), page));
        };
        let label = page.label.clone();
        container.add_page(page, true);
        self.after_mutation(format!("add_pane '{label}' -> {pos:?} container={}", id.as_u64()));
        Ok(id)
    }

    /// Dock a page, either into `target` or (with `None`) into the default slot for `region`.
    ///
    /// - `Some(target)` + [`DockRegion::Center`]: appended to `target` as a new tab.
    /// - `Some(target)` + an edge region: `target`'s slot is split and a new container holding
    ///   the page takes the `region` side. Floating targets only accept Center.
    /// - `None`: appended to [`DockPos::for_region`]'s slot.
    ///
    /// Returns the container now holding the page.
    ///
    /// # Errors
    /// Hands the page back untouched when tearing down, when `target` is unknown or when the
    /// default slot was closed.
    pub fn perform_dock(
        &mut self,
        page: Page<C>,
        target: Option<ContainerId>,
        region: DockRegion,
    ) -> Result<ContainerId, Rejected<Page<C>>> {
        if self.being_destroyed {
            return Err(Rejected::new(DockError::TearingDown, page));
        }

        let Some(target) = target else {
            let pos = DockPos::for_region(region);
            let Some(slot) = self.slot(pos) else {
                return Err(Rejected::new(DockError::NoDefaultSlot(pos), page));
            };
            return Ok(self.dock_as_tab(page, slot));
        };

        let Some(container) = self.containers.get(&target) else {
            return Err(Rejected::new(DockError::UnknownContainer(target), page));
        };
        if region == DockRegion::Center || container.is_floating() {
            return Ok(self.dock_as_tab(page, target));
        }
        if self.tree.leaf_of(target).is_none() {
            return Err(Rejected::new(DockError::UnknownContainer(target), page));
        }

        let new_id = self.alloc_container(ContainerHost::Docked);
        if self
            .tree
            .split_leaf(target, new_id, region, self.options.region_split_fraction)
            .is_none()
        {
            self.containers.remove(&new_id);
            return Err(Rejected::new(DockError::UnknownContainer(target), page));
        }
        self.maximized = None;

        let label = page.label.clone();
        if let Some(container) = self.containers.get_mut(&new_id) {
            container.add_page(page, true);
        }
        self.relayout();
        self.after_mutation(format!(
            "dock '{label}' {region:?} of container={} -> new container={}",
            target.as_u64(),
            new_id.as_u64()
        ));
        Ok(new_id)
    }

    fn dock_as_tab(&mut self, page: Page<C>, target: ContainerId) -> ContainerId {
        let label = page.label.clone();
        if let Some(container) = self.containers.get_mut(&target) {
            container.accept_dragged_page(page);
        }
        self.after_mutation(format!("dock '{label}' as tab of container={}", target.as_u64()));
        target
    }

    /// Close a container, collapsing its slot, and hand its pages back unparented and hidden.
    ///
    /// Works for docked and floating containers alike; a floating host goes away with its
    /// container. Returns `None` for an unknown id.
    pub fn close_container(&mut self, id: ContainerId) -> Option<Vec<Page<C>>> {
        let mut container = self.containers.remove(&id)?;
        match container.host() {
            ContainerHost::Docked => {
                self.tree.remove_leaf(id);
            }
            ContainerHost::Floating(floating_id) => {
                self.floating.remove(&floating_id);
                self.z_order.retain(|f| *f != floating_id);
            }
        }
        self.forget_container(id);

        let pages = container.release_pages();
        self.relayout();
        self.after_mutation(format!(
            "close container={} released {} page(s)",
            id.as_u64(),
            pages.len()
        ));
        Some(pages)
    }

    /// Drop every reference to a container that just left the registry.
    fn forget_container(&mut self, id: ContainerId) {
        self.slots.clear(id);
        if self.maximized == Some(id) {
            self.maximized = None;
        }
        if self.pressed_button.is_some_and(|(c, _)| c == id) {
            self.pressed_button = None;
        }
        if self.drag.cancel_if_source(id) {
            log::debug!("drag cancelled: source container {} closed", id.as_u64());
            self.hide_dock_preview();
        }
        let preview_target = self.preview.region.map(|p| p.target);
        let caret_target = self.preview.insertion.map(|p| p.target);
        if preview_target == Some(id) || caret_target == Some(id) {
            self.preview.region = None;
            self.preview.insertion = None;
        }
    }

    /// Stop accepting content. Any drag in progress is dropped without effect.
    pub fn begin_teardown(&mut self) {
        if self.being_destroyed {
            return;
        }
        self.being_destroyed = true;
        self.drag.take();
        self.pressed_button = None;
        self.hide_dock_preview();
        self.debug_log_event("teardown begun");
        log::debug!("dock manager teardown");
    }

    /// Bookkeeping after every structural change.
    fn after_mutation(&mut self, what: String) {
        log::debug!("{what}");
        self.debug_log_event(what);
        self.debug_check_integrity();
    }
}
