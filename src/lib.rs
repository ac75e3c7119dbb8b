//! Panel docking for `egui` applications: a split tree of tabbed containers with drag-and-drop
//! reordering, five-way region docking and floating hosts.
//!
//! See [`DockManager`] for the entry point.

#![forbid(unsafe_code)]

pub mod docking;

pub use docking::{
    ActionOutcome, CaptionButton, ContainerHost, ContainerId, ContextAction, DockContainer,
    DockError, DockManager, DockOptions, DockPos, DockPreview, DockRegion, DragPhase, DropOutcome,
    FloatingClose, FloatingCloseHandle, FloatingHost, FloatingId, Page, PageContent, PageParent,
    Rejected, SharedDockManager, TabStrip, paint_caption_buttons, paint_dock_preview,
    resolve_region,
};
