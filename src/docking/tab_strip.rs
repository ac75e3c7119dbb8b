/// Minimum estimated width of one tab (in points) when hit-testing insertion positions.
pub const MIN_TAB_WIDTH: f32 = 60.0;

/// Horizontal offset of the insertion caret from the start of a tab.
pub const CARET_OFFSET: f32 = 12.0;

/// One tab: an opaque content handle plus its display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<C> {
    pub content: C,
    pub label: String,
}

impl<C> Page<C> {
    pub fn new(content: C, label: impl Into<String>) -> Self {
        Self {
            content,
            label: label.into(),
        }
    }
}

/// Ordered tabs with a single active selection.
///
/// Order is the visual left-to-right order. `active` is `None` iff the strip is empty.
#[derive(Clone, Debug)]
pub struct TabStrip<C> {
    pages: Vec<Page<C>>,
    active: Option<usize>,
}

impl<C> Default for TabStrip<C> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            active: None,
        }
    }
}

impl<C> TabStrip<C> {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_page(&self) -> Option<&Page<C>> {
        self.active.and_then(|i| self.pages.get(i))
    }

    pub fn page(&self, index: usize) -> Option<&Page<C>> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page<C>> {
        self.pages.get_mut(index)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page<C>> + '_ {
        self.pages.iter()
    }

    pub(crate) fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page<C>> + '_ {
        self.pages.iter_mut()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.iter().map(|p| p.label.as_str())
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.label == label)
    }

    /// Append a page. Selects it if `select` is set or if the strip was empty.
    pub fn add_page(&mut self, page: Page<C>, select: bool) -> usize {
        let index = self.pages.len();
        self.pages.push(page);
        if select || self.active.is_none() {
            self.active = Some(index);
        }
        index
    }

    /// Insert a page, clamping `index` into `0..=len`.
    pub fn insert_page(&mut self, index: usize, page: Page<C>, select: bool) -> usize {
        let index = index.min(self.pages.len());
        self.pages.insert(index, page);
        self.active = match self.active {
            _ if select => Some(index),
            None => Some(index),
            Some(active) if active >= index => Some(active + 1),
            Some(active) => Some(active),
        };
        index
    }

    /// Remove the page at `index`; out of range is a no-op.
    ///
    /// If the active page is removed, the page now at `index` (or the new last page) becomes
    /// active. Removing a page before the active one keeps the same page active.
    pub fn remove_page(&mut self, index: usize) -> Option<Page<C>> {
        if index >= self.pages.len() {
            return None;
        }
        let page = self.pages.remove(index);
        let len = self.pages.len();
        self.active = match self.active {
            _ if len == 0 => None,
            Some(active) if active == index => Some(index.min(len - 1)),
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(page)
    }

    /// Select the page at `index`; out of range is a no-op.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<Page<C>> {
        self.active = None;
        std::mem::take(&mut self.pages)
    }

    /// Estimated width of one tab when the strip is `strip_width` wide.
    ///
    /// Tabs are assumed to share the strip evenly, but never narrower than [`MIN_TAB_WIDTH`].
    pub fn tab_width(&self, strip_width: f32) -> f32 {
        let count = self.pages.len().max(1) as f32;
        (strip_width / count).max(MIN_TAB_WIDTH)
    }

    /// Insertion index for a pointer at `local_x` (relative to the strip's left edge).
    ///
    /// This is an even-width approximation rather than exact tab-boundary hit-testing, but it is
    /// monotonic in `local_x`. Returns a value in `0..=len`.
    pub fn compute_insert_index_from_local_x(&self, local_x: f32, strip_width: f32) -> usize {
        let count = self.pages.len();
        if count == 0 {
            return 0;
        }
        let index = (local_x / self.tab_width(strip_width)).floor();
        if index.is_nan() || index <= 0.0 {
            0
        } else {
            (index as usize).min(count)
        }
    }

    /// Local x of the insertion caret drawn before tab `index`.
    pub fn caret_x(&self, index: usize, strip_width: f32) -> f32 {
        CARET_OFFSET + index as f32 * self.tab_width(strip_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(labels: &[&'static str]) -> TabStrip<&'static str> {
        let mut strip = TabStrip::default();
        for label in labels {
            strip.add_page(Page::new(*label, *label), false);
        }
        strip
    }

    fn labels<'a>(strip: &'a TabStrip<&'static str>) -> Vec<&'a str> {
        strip.labels().collect()
    }

    #[test]
    fn first_page_is_selected_even_without_select() {
        let s = strip(&["a", "b"]);
        assert_eq!(s.active(), Some(0));
    }

    #[test]
    fn add_then_remove_restores_previous_pages() {
        let mut s = strip(&["a", "b", "c"]);
        let index = s.add_page(Page::new("x", "x"), true);
        assert_eq!(labels(&s), ["a", "b", "c", "x"]);
        let removed = s.remove_page(index).expect("page");
        assert_eq!(removed.label, "x");
        assert_eq!(labels(&s), ["a", "b", "c"]);
        assert_eq!(s.active(), Some(2));
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut s = strip(&["a"]);
        assert!(s.remove_page(5).is_none());
        assert_eq!(labels(&s), ["a"]);
        assert_eq!(s.active(), Some(0));
    }

    #[test]
    fn remove_active_selects_neighbour() {
        let mut s = strip(&["a", "b", "c"]);
        s.select(1);
        s.remove_page(1);
        assert_eq!(s.active(), Some(1));
        assert_eq!(s.active_page().map(|p| p.label.as_str()), Some("c"));

        s.remove_page(1);
        assert_eq!(s.active(), Some(0));
        s.remove_page(0);
        assert_eq!(s.active(), None);
        assert!(s.is_empty());
    }

    #[test]
    fn remove_before_active_keeps_same_page_active() {
        let mut s = strip(&["a", "b", "c"]);
        s.select(2);
        s.remove_page(0);
        assert_eq!(s.active_page().map(|p| p.label.as_str()), Some("c"));
    }

    #[test]
    fn insert_clamps_and_shifts_active() {
        let mut s = strip(&["a", "b"]);
        s.select(1);
        let at = s.insert_page(99, Page::new("z", "z"), false);
        assert_eq!(at, 2);
        assert_eq!(s.active(), Some(1));

        s.insert_page(0, Page::new("y", "y"), false);
        assert_eq!(labels(&s), ["y", "a", "b", "z"]);
        assert_eq!(s.active_page().map(|p| p.label.as_str()), Some("b"));

        s.insert_page(1, Page::new("w", "w"), true);
        assert_eq!(s.active(), Some(1));
    }

    #[test]
    fn insert_index_example_from_two_tabs() {
        // width 200, 2 pages → tab width 100 → x = 80 lands on index 0.
        let s = strip(&["Objects", "Properties"]);
        assert_eq!(s.compute_insert_index_from_local_x(80.0, 200.0), 0);
        assert_eq!(s.compute_insert_index_from_local_x(120.0, 200.0), 1);
        assert_eq!(s.compute_insert_index_from_local_x(250.0, 200.0), 2);
        assert_eq!(s.compute_insert_index_from_local_x(-40.0, 200.0), 0);
    }

    #[test]
    fn insert_index_uses_minimum_tab_width() {
        let s = strip(&["a", "b", "c", "d"]);
        // 100 / 4 = 25 < 60
        assert_eq!(s.tab_width(100.0), MIN_TAB_WIDTH);
        assert_eq!(s.compute_insert_index_from_local_x(59.0, 100.0), 0);
        assert_eq!(s.compute_insert_index_from_local_x(61.0, 100.0), 1);
    }

    #[test]
    fn insert_index_is_monotonic() {
        for count in 1..6 {
            let s = strip(&["a", "b", "c", "d", "e"][..count]);
            for width in [0.0, 50.0, 200.0, 777.0] {
                let mut previous = 0;
                for step in -20..400 {
                    let x = step as f32 * 2.5;
                    let index = s.compute_insert_index_from_local_x(x, width);
                    assert!(index >= previous, "count={count} width={width} x={x}");
                    assert!(index <= count);
                    previous = index;
                }
            }
        }
    }

    #[test]
    fn empty_strip_inserts_at_zero() {
        let s: TabStrip<()> = TabStrip::default();
        assert_eq!(s.compute_insert_index_from_local_x(500.0, 100.0), 0);
    }

    #[test]
    fn caret_sits_at_tab_start() {
        let s = strip(&["a", "b"]);
        assert_eq!(s.caret_x(0, 200.0), 12.0);
        assert_eq!(s.caret_x(1, 200.0), 112.0);
    }
}
