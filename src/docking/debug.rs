use super::DockManager;
use super::types::PageContent;

impl<C: PageContent> DockManager<C> {
    /// Lines recorded while [`super::DockOptions::debug_event_log`] (or `debug_integrity`) is on,
    /// oldest first.
    pub fn debug_log(&self) -> impl Iterator<Item = &str> + '_ {
        self.debug_log.iter().map(String::as_str)
    }

    pub fn debug_log_text(&self) -> String {
        self.debug_log
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }

    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn debug_integrity_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_integrity {
            return;
        }
        self.push_debug_log_line(message.into());
    }

    fn push_debug_log_line(&mut self, message: String) {
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_event_serial = self.debug_event_serial.wrapping_add(1);
        self.debug_log
            .push_back(format!("[event {}] {message}", self.debug_event_serial));
    }

    /// Run the registry audit if `debug_integrity` is on.
    pub(super) fn debug_check_integrity(&mut self) {
        if !self.options.debug_integrity {
            return;
        }
        let issues = self.integrity_issues();
        if issues.is_empty() {
            return;
        }

        log::warn!("dock registry integrity failure: {} issue(s)", issues.len());
        self.debug_integrity_log_event(format!("integrity FAIL issues={}", issues.len()));
        for issue in &issues {
            log::warn!("{issue}");
            self.debug_integrity_log_event(issue.clone());
        }

        if self.options.debug_integrity_panic && cfg!(debug_assertions) {
            panic!("egui_flatdock integrity failure\n{}", issues.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::docking::DockPos;
    use crate::docking::test_support::{TestPane, manager};

    #[test]
    fn event_log_is_a_bounded_ring() {
        let mut docking = manager();
        docking.options.debug_event_log_capacity = 3;
        docking.debug_log_clear();
        for name in ["a", "b", "c", "d", "e"] {
            docking
                .add_pane(TestPane::new(name), DockPos::Center)
                .expect("add");
        }
        let lines: Vec<&str> = docking.debug_log().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("'c'"), "{lines:?}");
        assert!(lines[2].contains("'e'"), "{lines:?}");
    }

    #[test]
    fn event_log_off_records_nothing() {
        let mut docking = manager();
        docking.options.debug_event_log = false;
        docking.debug_log_clear();
        docking
            .add_pane(TestPane::new("a"), DockPos::Center)
            .expect("add");
        assert_eq!(docking.debug_log().count(), 0);
        assert!(docking.debug_log_text().is_empty());
    }
}
