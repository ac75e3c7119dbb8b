use egui::{Pos2, Rect};

use super::DockManager;
use super::actions::ActionOutcome;
use super::buttons::CaptionButton;
use super::container::ContainerHost;
use super::drag::{DragMotion, DragPhase, DragSession};
use super::preview::RegionPreview;
use super::region::{DockRegion, resolve_region};
use super::tab_strip::Page;
use super::types::{ContainerId, DockPos, FloatingId, PageContent};

/// What a pointer release did.
#[derive(Debug)]
pub enum DropOutcome<C> {
    /// Nothing was pressed.
    None,

    /// Pressed and released on a tab without moving past the threshold.
    Click { container: ContainerId },

    /// A drag ended where it would not change anything.
    Unchanged { container: ContainerId },

    Reordered {
        container: ContainerId,
        from: usize,
        to: usize,
    },

    /// Moved onto another container's tab row.
    Transferred { from: ContainerId, to: ContainerId },

    Docked {
        from: ContainerId,
        to: ContainerId,
        region: DockRegion,
    },

    Floated {
        from: ContainerId,
        floating: FloatingId,
    },

    /// The session was stale (source page gone).
    Cancelled,

    /// Released on the caption button that was pressed.
    Button {
        container: ContainerId,
        button: CaptionButton,
        outcome: ActionOutcome<C>,
    },
}

impl<C> DropOutcome<C> {
    /// Variant name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Click { .. } => "Click",
            Self::Unchanged { .. } => "Unchanged",
            Self::Reordered { .. } => "Reordered",
            Self::Transferred { .. } => "Transferred",
            Self::Docked { .. } => "Docked",
            Self::Floated { .. } => "Floated",
            Self::Cancelled => "Cancelled",
            Self::Button { .. } => "Button",
        }
    }
}

impl<C: PageContent> DockManager<C> {
    /// Pointer pressed at `pos` (screen space). Returns `true` if the press was captured.
    ///
    /// A press on a caption button arms that button; a press on a tab row starts a drag session
    /// for the selected page. Pressing on a floating host raises it.
    pub fn on_pointer_press(&mut self, pos: Pos2) -> bool {
        self.last_pointer = Some(pos);
        if self.being_destroyed {
            return false;
        }
        if self.drag.phase() != DragPhase::Idle {
            // The previous release never arrived.
            self.drag.take();
            self.hide_dock_preview();
        }
        self.pressed_button = None;

        let Some(id) = self.container_at(pos) else {
            return false;
        };
        let Some(container) = self.containers.get(&id) else {
            return false;
        };
        let host = container.host();
        let button = container.button_at(pos);
        let pressed_tab = container
            .selection()
            .filter(|_| container.strip_contains(pos));

        if let ContainerHost::Floating(floating_id) = host {
            self.bring_to_front(floating_id);
        }

        if let Some(button) = button {
            self.pressed_button = Some((id, button));
            log::trace!("caption button {button:?} pressed on container {}", id.as_u64());
            return true;
        }

        let Some(page_index) = pressed_tab else {
            return false;
        };
        let session = self.drag.press(id, page_index, pos);
        self.debug_log_event(format!(
            "session START id={session} container={} page={page_index}",
            id.as_u64()
        ));
        true
    }

    pub fn on_pointer_move(&mut self, pos: Pos2) {
        self.last_pointer = Some(pos);
        match self.drag.motion(pos, &self.options) {
            DragMotion::Ignored | DragMotion::Pending => {}
            DragMotion::Started => {
                self.start_ghost(pos);
                self.update_drag_preview(pos);
                if let Some(session) = self.drag.session() {
                    let message = format!("session DRAG id={}", session.id);
                    self.debug_log_event(message);
                }
            }
            DragMotion::Continued => {
                self.move_ghost(pos);
                self.update_drag_preview(pos);
            }
        }
    }

    /// Pointer released at `pos`. Always ends the session and clears the preview.
    pub fn on_pointer_release(&mut self, pos: Pos2) -> DropOutcome<C> {
        self.last_pointer = Some(pos);
        let button = self.pressed_button.take();
        let session = self.drag.take();
        self.hide_dock_preview();

        if let Some((container, button)) = button {
            let still_on_button = self
                .containers
                .get(&container)
                .and_then(|c| c.button_at(pos))
                == Some(button);
            if !still_on_button {
                return DropOutcome::None;
            }
            let outcome = self.apply_caption_button(container, button, pos);
            return DropOutcome::Button {
                container,
                button,
                outcome,
            };
        }

        let Some(session) = session else {
            return DropOutcome::None;
        };
        if !session.started {
            self.debug_log_event(format!("session CLICK id={}", session.id));
            return DropOutcome::Click {
                container: session.source,
            };
        }

        let outcome = self.resolve_drop(session, pos);
        self.debug_log_event(format!("session END id={} {}", session.id, outcome.name()));
        outcome
    }

    /// The pointer capture was taken away mid-gesture.
    ///
    /// A drag resolves exactly as if released at the last known position; an armed caption
    /// button is disarmed without firing.
    pub fn on_capture_lost(&mut self) -> DropOutcome<C> {
        self.pressed_button = None;
        let Some(pos) = self
            .drag
            .session()
            .map(|s| s.last_pos)
            .or(self.last_pointer)
        else {
            self.hide_dock_preview();
            return DropOutcome::None;
        };
        log::debug!("pointer capture lost; releasing at {pos:?}");
        self.on_pointer_release(pos)
    }

    fn start_ghost(&mut self, pos: Pos2) {
        let Some(session) = self.drag.session().copied() else {
            return;
        };
        let Some(source) = self.containers.get(&session.source) else {
            return;
        };
        let Some(page) = source.tabs().page(session.page_index) else {
            return;
        };
        let default_size = self.options.floating_default_size;
        let size = if source.body_rect().is_positive() {
            source.body_rect().size().min(default_size)
        } else {
            default_size
        };
        let label = page.label.clone();
        self.update_ghost(label, size, pos);
    }

    fn update_drag_preview(&mut self, pos: Pos2) {
        let Some(session) = self.drag.session().copied() else {
            return;
        };

        // Reordering within the source row.
        if let Some(source) = self.containers.get(&session.source)
            && source.strip_contains(pos)
            && self.container_at(pos) == Some(session.source)
        {
            let index = source.insert_index_at(pos);
            let (strip, caret) = (source.strip_rect(), source.caret_x(index));
            self.preview.region = None;
            self.set_insertion_preview(Some(session.source), index, strip, caret);
            return;
        }

        // Transfer onto another row.
        if let Some(target) = self.container_at(pos).filter(|t| *t != session.source)
            && let Some(container) = self.containers.get(&target)
            && container.strip_contains(pos)
        {
            let index = container.page_count();
            let (strip, caret, rect) = (
                container.strip_rect(),
                container.caret_x(index),
                container.rect(),
            );
            self.set_insertion_preview(Some(target), index, strip, caret);
            self.preview.region = Some(RegionPreview {
                target,
                region: DockRegion::Center,
                rect,
            });
            return;
        }

        self.set_insertion_preview(None, 0, Rect::NOTHING, 0.0);
        let preview = self.show_dock_preview(pos);

        // Dropping on the source's own center leaves it unchanged, so nothing to highlight.
        if preview.is_some_and(|p| p.target == session.source && p.region == DockRegion::Center) {
            self.preview.region = None;
        }
    }

    fn take_dragged_page(&mut self, session: &DragSession) -> Option<Page<C>> {
        self.containers
            .get_mut(&session.source)?
            .remove_page(session.page_index)
    }

    fn resolve_drop(&mut self, session: DragSession, pos: Pos2) -> DropOutcome<C> {
        let from = session.source;
        let Some(source) = self.containers.get(&from) else {
            return DropOutcome::Cancelled;
        };
        if session.page_index >= source.page_count() {
            return DropOutcome::Cancelled;
        }

        if source.strip_contains(pos) && self.container_at(pos) == Some(from) {
            let to = source.insert_index_at(pos);
            if to == session.page_index {
                return DropOutcome::Unchanged { container: from };
            }
            let Some(source) = self.containers.get_mut(&from) else {
                return DropOutcome::Cancelled;
            };
            let Some(page) = source.remove_page(session.page_index) else {
                return DropOutcome::Cancelled;
            };
            let to = source.insert_page(to, page, true);
            self.after_mutation(format!(
                "reorder container={} {} -> {to}",
                from.as_u64(),
                session.page_index
            ));
            return DropOutcome::Reordered {
                container: from,
                from: session.page_index,
                to,
            };
        }

        let Some(target) = self.container_at(pos) else {
            return match self.take_dragged_page(&session) {
                Some(page) => DropOutcome::Floated {
                    from,
                    floating: self.float_page(page, pos),
                },
                None => DropOutcome::Cancelled,
            };
        };
        let Some(target_container) = self.containers.get(&target) else {
            return DropOutcome::Cancelled;
        };

        if target != from && target_container.strip_contains(pos) {
            let Some(page) = self.take_dragged_page(&session) else {
                return DropOutcome::Cancelled;
            };
            if let Some(target_container) = self.containers.get_mut(&target) {
                target_container.accept_dragged_page(page);
            }
            self.after_mutation(format!(
                "transfer container={} -> container={}",
                from.as_u64(),
                target.as_u64()
            ));
            return DropOutcome::Transferred { from, to: target };
        }

        let docking_enabled = target_container.docking_enabled();
        let region = if docking_enabled && !target_container.is_floating() {
            resolve_region(target_container.rect(), pos)
        } else {
            DockRegion::Center
        };
        let dock_target = if docking_enabled {
            Some(target)
        } else {
            self.slot(DockPos::Center)
        };
        if dock_target == Some(from) && region == DockRegion::Center {
            return DropOutcome::Unchanged { container: from };
        }

        let Some(page) = self.take_dragged_page(&session) else {
            return DropOutcome::Cancelled;
        };
        let docked = if docking_enabled {
            self.perform_dock(page, Some(target), region)
        } else {
            self.perform_dock(page, None, DockRegion::Center)
        };
        match docked {
            Ok(to) => DropOutcome::Docked { from, to, region },
            Err(rejected) => {
                log::debug!("dock refused ({}); floating instead", rejected.error);
                DropOutcome::Floated {
                    from,
                    floating: self.float_page(rejected.into_inner(), pos),
                }
            }
        }
    }
}
