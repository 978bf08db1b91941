//! Column pagination over the group list.
//!
//! The group set changes whenever the course/parity filter changes, so the
//! current page is re-clamped on every input change and can never point
//! past the last page.

/// A bounded window over an ordered list of group columns.
///
/// # Example
///
/// ```
/// use u_timetable::grid::ColumnPager;
///
/// let groups: Vec<String> = (0..23).map(|i| format!("G{i}")).collect();
/// let mut pager = ColumnPager::new(10);
/// pager.set_groups(groups);
/// assert_eq!(pager.max_page(), 2);
///
/// pager.set_page(2);
/// assert_eq!(pager.visible_groups().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPager {
    groups: Vec<String>,
    page_size: usize,
    page: usize,
}

impl ColumnPager {
    /// Creates an empty pager. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            groups: Vec::new(),
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Replaces the group list and re-clamps the page.
    pub fn set_groups(&mut self, groups: Vec<String>) {
        self.groups = groups;
        self.clamp();
    }

    /// Changes the page size (minimum 1) and re-clamps the page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp();
    }

    /// Jumps to `page`, clamped to `max_page`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Last valid page index (0 when there are no groups).
    pub fn max_page(&self) -> usize {
        self.groups.len().div_ceil(self.page_size).saturating_sub(1)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Groups shown on the current page.
    pub fn visible_groups(&self) -> &[String] {
        let start = (self.page * self.page_size).min(self.groups.len());
        let end = start.saturating_add(self.page_size).min(self.groups.len());
        &self.groups[start..end]
    }

    fn clamp(&mut self) {
        let max = self.max_page();
        if self.page > max {
            self.page = max;
        }
    }
}

impl Default for ColumnPager {
    fn default() -> Self {
        Self::new(10)
    }
}
