use egui::Pos2;

use super::DockManager;
use super::buttons::CaptionButton;
use super::container::ContainerHost;
use super::tab_strip::Page;
use super::types::{ContainerId, DockPos, FloatingId, PageContent};

/// Entries of a tab's context menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ContextAction {
    /// Close the whole container.
    Close,

    /// Move the selected page to a default slot.
    MoveTo(DockPos),

    Float,
}

impl ContextAction {
    /// The menu, in display order.
    pub const MENU: [Self; 5] = [
        Self::Close,
        Self::MoveTo(DockPos::LeftTop),
        Self::MoveTo(DockPos::Center),
        Self::MoveTo(DockPos::Bottom),
        Self::Float,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Close => "Close",
            Self::MoveTo(DockPos::LeftTop | DockPos::LeftBottom) => "Move to Left",
            Self::MoveTo(DockPos::Center) => "Move to Center",
            Self::MoveTo(DockPos::Bottom) => "Move to Bottom",
            Self::Float => "Float",
        }
    }
}

/// Result of a context menu action or caption button.
#[derive(Debug)]
pub enum ActionOutcome<C> {
    /// Nothing to do (unknown container, no selection, already there).
    Nothing,

    Floated(FloatingId),

    /// The selected page now lives in this container.
    Moved(ContainerId),

    /// New maximized state.
    Maximized(bool),

    /// New minimized state.
    Minimized(bool),

    /// The container was closed; its pages are handed back unparented and hidden.
    Closed(Vec<Page<C>>),
}

impl<C: PageContent> DockManager<C> {
    /// Apply a context menu entry to `container`'s selected tab.
    ///
    /// `pointer` is where a floated page's host is placed.
    pub fn apply_context_action(
        &mut self,
        container: ContainerId,
        action: ContextAction,
        pointer: Pos2,
    ) -> ActionOutcome<C> {
        log::debug!("context action {action:?} on container {}", container.as_u64());
        match action {
            ContextAction::Close => self.close_action(container),
            ContextAction::Float => self.float_action(container, pointer),
            ContextAction::MoveTo(pos) => self.move_selected_to(container, pos),
        }
    }

    /// Run the action behind a caption button of `container`.
    pub fn apply_caption_button(
        &mut self,
        container: ContainerId,
        button: CaptionButton,
        pointer: Pos2,
    ) -> ActionOutcome<C> {
        log::debug!("caption button {button:?} on container {}", container.as_u64());
        match button {
            CaptionButton::Float => self.float_action(container, pointer),
            CaptionButton::MaximizeRestore => {
                if self.containers.contains_key(&container) {
                    ActionOutcome::Maximized(self.toggle_maximized(container))
                } else {
                    ActionOutcome::Nothing
                }
            }
            CaptionButton::Minimize => {
                if self.containers.contains_key(&container) {
                    ActionOutcome::Minimized(self.toggle_minimized(container))
                } else {
                    ActionOutcome::Nothing
                }
            }
            CaptionButton::Close => self.close_action(container),
        }
    }

    fn close_action(&mut self, container: ContainerId) -> ActionOutcome<C> {
        self.close_container(container)
            .map_or(ActionOutcome::Nothing, ActionOutcome::Closed)
    }

    fn float_action(&mut self, container: ContainerId, pointer: Pos2) -> ActionOutcome<C> {
        self.float_selected(container, pointer)
            .map_or(ActionOutcome::Nothing, ActionOutcome::Floated)
    }

    fn move_selected_to(&mut self, container: ContainerId, pos: DockPos) -> ActionOutcome<C> {
        if self.slot(pos) == Some(container) {
            return ActionOutcome::Nothing;
        }
        let Some(source) = self.containers.get_mut(&container) else {
            return ActionOutcome::Nothing;
        };
        let Some(index) = source.selection() else {
            return ActionOutcome::Nothing;
        };
        let Some(page) = source.remove_page(index) else {
            return ActionOutcome::Nothing;
        };

        match self.add_page(page, pos) {
            Ok(target) => ActionOutcome::Moved(target),
            Err(rejected) => {
                log::debug!("move to {pos:?} refused: {}", rejected.error);
                if let Some(source) = self.containers.get_mut(&container) {
                    source.insert_page(index, rejected.into_inner(), true);
                }
                ActionOutcome::Nothing
            }
        }
    }

    /// Maximize a docked container over the whole dock area, or restore it.
    ///
    /// Returns whether `container` is maximized afterwards. Floating containers cannot be
    /// maximized.
    pub fn toggle_maximized(&mut self, container: ContainerId) -> bool {
        if self.containers.get(&container).map(|c| c.host()) != Some(ContainerHost::Docked) {
            return false;
        }
        let maximize = self.maximized != Some(container);
        self.maximized = maximize.then_some(container);
        if maximize && let Some(c) = self.containers.get_mut(&container) {
            c.set_minimized(false);
        }
        self.relayout();
        self.after_mutation(format!(
            "container={} maximized={maximize}",
            container.as_u64()
        ));
        maximize
    }

    /// Collapse a docked container to its caption bar, or expand it again.
    ///
    /// Only a container stacked above or below a neighbour can collapse; one that sits side by
    /// side with its neighbour (the center slot, or a Left/Right dock) stays expanded.
    ///
    /// Returns whether `container` is minimized afterwards.
    pub fn toggle_minimized(&mut self, container: ContainerId) -> bool {
        let Some(c) = self
            .containers
            .get_mut(&container)
            .filter(|c| !c.is_floating())
        else {
            return false;
        };
        let minimize = !c.is_minimized();
        if minimize && !self.tree.can_collapse(container) {
            log::debug!(
                "container={} has no top/bottom neighbour to collapse against",
                container.as_u64()
            );
            return false;
        }
        c.set_minimized(minimize);
        if minimize && self.maximized == Some(container) {
            self.maximized = None;
        }
        self.relayout();
        self.after_mutation(format!(
            "container={} minimized={minimize}",
            container.as_u64()
        ));
        minimize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_labels() {
        let labels: Vec<_> = ContextAction::MENU.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            ["Close", "Move to Left", "Move to Center", "Move to Bottom", "Float"]
        );
    }
}
