use std::cell::RefCell;
use std::rc::{Rc, Weak};

use egui::{Pos2, Rect};

use super::container::ContainerHost;
use super::tab_strip::Page;
use super::types::{ContainerId, DockPos, FloatingId, PageContent};
use super::{DockManager, SharedDockManager};

/// A detached top-level window wrapping exactly one container.
///
/// The manager only keeps the record; creating and moving the actual window is up to the
/// application, which reports moves back with [`DockManager::set_floating_rect`].
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingHost {
    pub id: FloatingId,
    pub container: ContainerId,
    pub rect: Rect,

    /// Label of the page the host was created for.
    pub title: String,
}

/// What happened to the content of a closed floating host.
#[derive(Debug)]
pub enum FloatingClose<C> {
    /// Pages went back to the center slot.
    Returned { container: ContainerId, pages: usize },

    /// The manager could not take the pages back (tearing down, or no center slot);
    /// they are unparented and hidden.
    Released(Vec<Page<C>>),

    UnknownHost,

    /// The manager was dropped, and the content with it.
    ManagerGone,

    /// The manager was borrowed elsewhere; nothing was closed.
    ManagerBusy,
}

impl<C: PageContent> DockManager<C> {
    /// Floating hosts, back to front.
    pub fn floating_hosts(&self) -> impl Iterator<Item = &FloatingHost> + '_ {
        self.z_order.iter().filter_map(|id| self.floating.get(id))
    }

    pub fn floating_host(&self, id: FloatingId) -> Option<&FloatingHost> {
        self.floating.get(&id)
    }

    /// Put a page in a new floating host at `pos` and bring it to the front.
    pub fn float_page(&mut self, page: Page<C>, pos: Pos2) -> FloatingId {
        self.next_floating_serial = self.next_floating_serial.saturating_add(1);
        let floating_id = FloatingId::from_u64(self.next_floating_serial);
        let container_id = self.alloc_container(ContainerHost::Floating(floating_id));

        let label = page.label.clone();
        self.floating.insert(
            floating_id,
            FloatingHost {
                id: floating_id,
                container: container_id,
                rect: Rect::from_min_size(pos, self.options.floating_default_size),
                title: label.clone(),
            },
        );
        self.z_order.push(floating_id);
        if let Some(container) = self.containers.get_mut(&container_id) {
            container.add_page(page, true);
        }

        self.relayout();
        self.after_mutation(format!(
            "float '{label}' -> host={} container={}",
            floating_id.as_u64(),
            container_id.as_u64()
        ));
        floating_id
    }

    /// Float the selected page of `container`.
    pub fn float_selected(&mut self, container: ContainerId, pos: Pos2) -> Option<FloatingId> {
        let source = self.containers.get_mut(&container)?;
        let index = source.selection()?;
        let page = source.remove_page(index)?;
        Some(self.float_page(page, pos))
    }

    pub fn set_floating_rect(&mut self, id: FloatingId, rect: Rect) -> bool {
        let Some(host) = self.floating.get_mut(&id) else {
            return false;
        };
        host.rect = rect;
        let container = host.container;
        if let Some(container) = self.containers.get_mut(&container) {
            container.handle_size_event(rect, &self.options, |_| {});
        }
        true
    }

    pub fn bring_to_front(&mut self, id: FloatingId) {
        if !self.floating.contains_key(&id) || self.z_order.last() == Some(&id) {
            return;
        }
        self.z_order.retain(|f| *f != id);
        self.z_order.push(id);
        log::trace!("floating host {} to front", id.as_u64());
    }

    /// The floating host's window was closed.
    ///
    /// Its pages go back to the center slot. While tearing down, or once the center slot is gone,
    /// they are handed back to the caller instead.
    pub fn close_floating(&mut self, id: FloatingId) -> FloatingClose<C> {
        let Some(host) = self.floating.remove(&id) else {
            return FloatingClose::UnknownHost;
        };
        self.z_order.retain(|f| *f != id);
        let Some(mut container) = self.containers.remove(&host.container) else {
            self.debug_check_integrity();
            return FloatingClose::Released(Vec::new());
        };
        self.forget_container(host.container);

        let center = self.slot(DockPos::Center);
        let outcome = match center {
            Some(center) if !self.being_destroyed => {
                let pages = container.take_pages();
                let count = pages.len();
                if let Some(target) = self.containers.get_mut(&center) {
                    for page in pages {
                        target.add_page(page, true);
                    }
                }
                FloatingClose::Returned {
                    container: center,
                    pages: count,
                }
            }
            _ => {
                let pages = container.release_pages();
                log::warn!(
                    "floating host {} closed with no center slot; releasing {} page(s)",
                    id.as_u64(),
                    pages.len()
                );
                FloatingClose::Released(pages)
            }
        };

        self.relayout();
        self.after_mutation(format!(
            "close floating host={} container={}",
            id.as_u64(),
            host.container.as_u64()
        ));
        outcome
    }

    /// A handle for closing floating host `id` later, from a window callback.
    pub fn floating_close_handle(
        manager: &SharedDockManager<C>,
        id: FloatingId,
    ) -> FloatingCloseHandle<C> {
        FloatingCloseHandle {
            manager: Rc::downgrade(manager),
            id,
        }
    }
}

/// Deferred close of a floating host that does not keep the manager alive.
#[derive(Debug)]
pub struct FloatingCloseHandle<C> {
    manager: Weak<RefCell<DockManager<C>>>,
    id: FloatingId,
}

impl<C> Clone for FloatingCloseHandle<C> {
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            id: self.id,
        }
    }
}

impl<C: PageContent> FloatingCloseHandle<C> {
    pub fn id(&self) -> FloatingId {
        self.id
    }

    pub fn close(&self) -> FloatingClose<C> {
        let Some(manager) = self.manager.upgrade() else {
            log::debug!(
                "floating host {} closed after its manager was dropped",
                self.id.as_u64()
            );
            return FloatingClose::ManagerGone;
        };
        let Ok(mut manager) = manager.try_borrow_mut() else {
            log::warn!(
                "floating host {} close ignored: dock manager is busy",
                self.id.as_u64()
            );
            return FloatingClose::ManagerBusy;
        };
        manager.close_floating(self.id)
    }
}
