use super::types::{ContainerId, DockPos};

/// Why a docking operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockError {
    /// The manager is being torn down and no longer accepts content.
    TearingDown,

    /// No target container was given and the default slot for this position is gone.
    NoDefaultSlot(DockPos),

    UnknownContainer(ContainerId),

    NotImplemented(&'static str),
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TearingDown => write!(f, "dock manager is being torn down"),
            Self::NoDefaultSlot(pos) => write!(f, "no container in default slot {pos:?}"),
            Self::UnknownContainer(id) => write!(f, "unknown dock container {}", id.as_u64()),
            Self::NotImplemented(what) => write!(f, "{what}: not yet implemented"),
        }
    }
}

impl std::error::Error for DockError {}

/// A refused operation, handing the value it was given back to the caller.
///
/// Content is never lost on failure: whatever was passed in comes back here untouched.
#[derive(Debug)]
pub struct Rejected<T> {
    pub error: DockError,
    pub value: T,
}

impl<T> Rejected<T> {
    pub(crate) fn new(error: DockError, value: T) -> Self {
        Self { error, value }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Rejected<U> {
        Rejected {
            error: self.error,
            value: f(self.value),
        }
    }
}

impl<T> std::fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.error.fmt(f)
    }
}

impl<T: std::fmt::Debug> std::error::Error for Rejected<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            DockError::NoDefaultSlot(DockPos::Bottom).to_string(),
            "no container in default slot Bottom"
        );
        assert_eq!(
            DockError::NotImplemented("save layout").to_string(),
            "save layout: not yet implemented"
        );
        let rejected = Rejected::new(DockError::TearingDown, 5_u8);
        assert_eq!(rejected.to_string(), "dock manager is being torn down");
        assert_eq!(rejected.into_inner(), 5);
    }
}
