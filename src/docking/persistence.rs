use std::path::Path;

use super::DockManager;
use super::error::DockError;
use super::types::PageContent;

// Layout files are not supported yet. The entry points exist so applications can wire up
// their menus now.

impl<C: PageContent> DockManager<C> {
    /// # Errors
    /// Always [`DockError::NotImplemented`].
    pub fn save_layout(&self, path: &Path) -> Result<(), DockError> {
        log::info!("save_layout({}) requested", path.display());
        Err(DockError::NotImplemented("save_layout"))
    }

    /// # Errors
    /// Always [`DockError::NotImplemented`].
    pub fn load_layout(&mut self, path: &Path) -> Result<(), DockError> {
        log::info!("load_layout({}) requested", path.display());
        Err(DockError::NotImplemented("load_layout"))
    }

    /// # Errors
    /// Always [`DockError::NotImplemented`].
    pub fn reset_layout(&mut self) -> Result<(), DockError> {
        log::info!("reset_layout requested");
        Err(DockError::NotImplemented("reset_layout"))
    }
}
