use super::region::DockRegion;

/// Stable id of a [`super::DockContainer`] inside a [`super::DockManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ContainerId(u64);

impl ContainerId {
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Stable id of a [`super::FloatingHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FloatingId(u64);

impl FloatingId {
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Well-known layout slots of the default layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DockPos {
    LeftTop,
    LeftBottom,
    Center,
    Bottom,
}

impl DockPos {
    pub const ALL: [Self; 4] = [Self::LeftTop, Self::LeftBottom, Self::Center, Self::Bottom];

    /// Default slot used when a region drop has no specific target container.
    ///
    /// Right and Top have no dedicated slot and land in the center.
    pub fn for_region(region: DockRegion) -> Self {
        match region {
            DockRegion::Left => Self::LeftTop,
            DockRegion::Bottom => Self::Bottom,
            DockRegion::Right | DockRegion::Top | DockRegion::Center => Self::Center,
        }
    }
}

/// Where a content handle currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageParent {
    Container(ContainerId),

    /// Handed back to the application (container closed, host torn down).
    Unparented,
}

/// The only operations the docking engine performs on hosted content.
///
/// Implement this for whatever handle your application uses for a panel (an id, an `Rc`, a
/// window handle…). The engine never renders the content; it only tells it where it lives and
/// whether it is the visible tab.
pub trait PageContent {
    /// Label used when the content is added without an explicit one.
    fn name(&self) -> Option<String> {
        None
    }

    fn reparent(&mut self, parent: PageParent) {
        let _ = parent;
    }

    fn set_shown(&mut self, shown: bool) {
        let _ = shown;
    }
}

pub(crate) const DEFAULT_PAGE_LABEL: &str = "Pane";

pub(crate) fn label_for<C: PageContent>(content: &C) -> String {
    content
        .name()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PAGE_LABEL.to_owned())
}
