use egui::{Pos2, Rect};

use super::buttons::{CaptionButton, caption_button_at, caption_button_rects};
use super::options::DockOptions;
use super::tab_strip::{Page, TabStrip};
use super::types::{ContainerId, FloatingId, PageContent, PageParent};

/// Where a container lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerHost {
    /// A leaf of the manager's split tree.
    Docked,
    Floating(FloatingId),
}

/// A tabbed host for one or more content handles occupying one layout slot.
///
/// A container is never destroyed automatically when it runs out of pages; check
/// [`Self::page_count`] and close it through the manager.
#[derive(Debug)]
pub struct DockContainer<C> {
    id: ContainerId,
    host: ContainerHost,
    tabs: TabStrip<C>,
    docking_enabled: bool,
    minimized: bool,

    rect: Rect,
    caption_rect: Rect,
    strip_rect: Rect,
    body_rect: Rect,

    in_size_event: bool,
}

impl<C: PageContent> DockContainer<C> {
    pub(crate) fn new(id: ContainerId, host: ContainerHost) -> Self {
        Self {
            id,
            host,
            tabs: TabStrip::default(),
            docking_enabled: true,
            minimized: false,
            rect: Rect::NOTHING,
            caption_rect: Rect::NOTHING,
            strip_rect: Rect::NOTHING,
            body_rect: Rect::NOTHING,
            in_size_event: false,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn host(&self) -> ContainerHost {
        self.host
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.host, ContainerHost::Floating(_))
    }

    pub fn tabs(&self) -> &TabStrip<C> {
        &self.tabs
    }

    pub fn page_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn selection(&self) -> Option<usize> {
        self.tabs.active()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tabs.labels().collect()
    }

    pub fn docking_enabled(&self) -> bool {
        self.docking_enabled
    }

    pub fn set_docking_enabled(&mut self, enabled: bool) {
        self.docking_enabled = enabled;
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub(crate) fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    /// Whole container, in screen space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Caption bar; the action buttons are overlaid on it.
    pub fn caption_rect(&self) -> Rect {
        self.caption_rect
    }

    /// Tab row, where drags start and where drops transfer or reorder tabs.
    pub fn strip_rect(&self) -> Rect {
        self.strip_rect
    }

    /// Area left for the active page's content.
    pub fn body_rect(&self) -> Rect {
        self.body_rect
    }

    pub fn caption_buttons(&self) -> Vec<(CaptionButton, Rect)> {
        caption_button_rects(self.caption_rect)
    }

    pub fn button_at(&self, pos: Pos2) -> Option<CaptionButton> {
        caption_button_at(self.caption_rect, pos)
    }

    /// Append a page, reparenting its content here.
    pub fn add_page(&mut self, mut page: Page<C>, select: bool) -> usize {
        page.content.reparent(PageParent::Container(self.id));
        let index = self.tabs.add_page(page, select);
        self.sync_shown();
        index
    }

    /// Insert a page at `index` (clamped), reparenting its content here.
    pub fn insert_page(&mut self, index: usize, mut page: Page<C>, select: bool) -> usize {
        page.content.reparent(PageParent::Container(self.id));
        let index = self.tabs.insert_page(index, page, select);
        self.sync_shown();
        index
    }

    /// Receive a page dropped from elsewhere: append and select it.
    pub fn accept_dragged_page(&mut self, page: Page<C>) -> usize {
        self.add_page(page, true)
    }

    /// Detach the page at `index`; out of range is a no-op.
    ///
    /// The returned content still believes it lives here until it is added elsewhere.
    pub fn remove_page(&mut self, index: usize) -> Option<Page<C>> {
        let page = self.tabs.remove_page(index)?;
        self.sync_shown();
        Some(page)
    }

    pub fn select_page(&mut self, index: usize) -> bool {
        let changed = self.tabs.select(index);
        if changed {
            self.sync_shown();
        }
        changed
    }

    /// Detach every page, unparented and hidden, for handing back to the application.
    pub(crate) fn release_pages(&mut self) -> Vec<Page<C>> {
        let mut pages = self.tabs.drain();
        for page in &mut pages {
            page.content.set_shown(false);
            page.content.reparent(PageParent::Unparented);
        }
        pages
    }

    pub(crate) fn take_pages(&mut self) -> Vec<Page<C>> {
        self.tabs.drain()
    }

    fn sync_shown(&mut self) {
        let active = self.tabs.active();
        for (i, page) in self.tabs.pages_mut().enumerate() {
            page.content.set_shown(Some(i) == active);
        }
    }

    /// Apply a new size, then run `on_layout` for dependent relayout.
    ///
    /// A relayout can itself deliver size events to this container; those nested calls are
    /// ignored (returning `false`) until the outer one finishes.
    pub fn handle_size_event(
        &mut self,
        rect: Rect,
        options: &DockOptions,
        on_layout: impl FnOnce(&mut Self),
    ) -> bool {
        if self.in_size_event {
            return false;
        }
        self.in_size_event = true;
        self.apply_rect(rect, options);
        on_layout(self);
        self.in_size_event = false;
        true
    }

    fn apply_rect(&mut self, rect: Rect, options: &DockOptions) {
        self.rect = rect;
        if !rect.is_positive() {
            self.caption_rect = Rect::NOTHING;
            self.strip_rect = Rect::NOTHING;
            self.body_rect = Rect::NOTHING;
            return;
        }

        let caption_bottom = (rect.top() + options.caption_height).min(rect.bottom());
        let strip_bottom = (caption_bottom + options.tab_strip_height).min(rect.bottom());
        self.caption_rect = Rect::from_min_max(rect.min, Pos2::new(rect.right(), caption_bottom));
        self.strip_rect = Rect::from_min_max(
            Pos2::new(rect.left(), caption_bottom),
            Pos2::new(rect.right(), strip_bottom),
        );
        self.body_rect = Rect::from_min_max(Pos2::new(rect.left(), strip_bottom), rect.max);
    }

    /// Whether `pos` hits the tab row (and there is something to drag).
    pub fn strip_contains(&self, pos: Pos2) -> bool {
        self.strip_rect.is_positive() && self.strip_rect.contains(pos)
    }

    /// Insertion index for a screen-space pointer over this container's tab row.
    pub fn insert_index_at(&self, pos: Pos2) -> usize {
        let local_x = pos.x - self.strip_rect.left();
        self.tabs
            .compute_insert_index_from_local_x(local_x, self.strip_rect.width())
    }

    /// Screen-space x of the insertion caret for `index`.
    pub fn caret_x(&self, index: usize) -> f32 {
        self.strip_rect.left() + self.tabs.caret_x(index, self.strip_rect.width())
    }
}
