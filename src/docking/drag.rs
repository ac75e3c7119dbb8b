use egui::Pos2;

use super::options::DockOptions;
use super::types::ContainerId;

/// Where the press/move/release state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,

    /// Pressed on a tab, pointer has not yet travelled past the drag threshold.
    PressedOnTab,

    Dragging,
}

/// The single active drag, from press to release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub id: u64,
    pub source: ContainerId,
    pub page_index: usize,
    pub press_pos: Pos2,
    pub last_pos: Pos2,

    /// Set once the pointer moved past the threshold; never reset within a session.
    pub started: bool,
}

/// What a pointer move did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DragMotion {
    /// No session.
    Ignored,

    /// Still within the threshold; a click so far.
    Pending,

    /// This move crossed the threshold.
    Started,

    Continued,
}

#[derive(Debug, Default)]
pub(crate) struct DragTracker {
    next_id: u64,
    active: Option<DragSession>,
}

impl DragTracker {
    pub(crate) fn phase(&self) -> DragPhase {
        match &self.active {
            None => DragPhase::Idle,
            Some(session) if session.started => DragPhase::Dragging,
            Some(_) => DragPhase::PressedOnTab,
        }
    }

    pub(crate) fn session(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    /// `Idle → PressedOnTab`. A press while a session is active replaces it.
    pub(crate) fn press(&mut self, source: ContainerId, page_index: usize, pos: Pos2) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        if let Some(previous) = self.active.take() {
            log::debug!("drag session {} replaced by {id}", previous.id);
        }
        self.active = Some(DragSession {
            id,
            source,
            page_index,
            press_pos: pos,
            last_pos: pos,
            started: false,
        });
        id
    }

    pub(crate) fn motion(&mut self, pos: Pos2, options: &DockOptions) -> DragMotion {
        let Some(session) = &mut self.active else {
            return DragMotion::Ignored;
        };
        session.last_pos = pos;
        if session.started {
            return DragMotion::Continued;
        }
        if options.exceeds_drag_threshold(session.press_pos, pos) {
            session.started = true;
            DragMotion::Started
        } else {
            DragMotion::Pending
        }
    }

    /// End the session, whatever happens next.
    pub(crate) fn take(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    /// Forget the session if it drags from `container`.
    pub(crate) fn cancel_if_source(&mut self, container: ContainerId) -> bool {
        if self.active.is_some_and(|s| s.source == container) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
