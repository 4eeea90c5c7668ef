//! Shared selection-menu mechanism.
//!
//! One cursor over a list of labelled items, where disabled items are
//! invisible to navigation. All three battle menus are built on this.

/// One selectable row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub enabled: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
        }
    }
}

/// Cursor-over-items state with cyclic, disabled-skipping navigation.
#[derive(Clone, Debug, Default)]
pub struct MenuState {
    items: Vec<MenuItem>,
    cursor: usize,
}

impl MenuState {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let mut state = Self { items, cursor: 0 };
        state.select(0);
        state
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the item list and re-normalizes the cursor onto an enabled
    /// item (or leaves it at 0 when none exists).
    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.cursor = 0;
        self.select(0);
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.enabled = enabled;
        }
    }

    fn has_enabled(&self) -> bool {
        self.items.iter().any(|i| i.enabled)
    }

    /// Index under the cursor, only while it points at an enabled item.
    pub fn selected(&self) -> Option<usize> {
        self.items
            .get(self.cursor)
            .filter(|i| i.enabled)
            .map(|_| self.cursor)
    }

    /// Moves the cursor up cyclically, skipping disabled items. No-op when
    /// every item is disabled.
    pub fn move_up(&mut self) {
        self.step(|cursor, len| (cursor + len - 1) % len);
    }

    /// Moves the cursor down cyclically, skipping disabled items. No-op when
    /// every item is disabled.
    pub fn move_down(&mut self) {
        self.step(|cursor, len| (cursor + 1) % len);
    }

    fn step(&mut self, next: impl Fn(usize, usize) -> usize) {
        let len = self.items.len();
        if len == 0 || !self.has_enabled() {
            return;
        }
        let mut cursor = self.cursor;
        loop {
            cursor = next(cursor, len);
            if self.items[cursor].enabled {
                self.cursor = cursor;
                return;
            }
        }
    }

    /// Places the cursor on `index`, scanning forward cyclically to the next
    /// enabled item when `index` itself is disabled. Returns whether the
    /// cursor landed on an enabled item; on `false` the menu holds no valid
    /// selection and must not be confirmed.
    pub fn select(&mut self, index: usize) -> bool {
        let len = self.items.len();
        if len == 0 {
            return false;
        }
        let start = index % len;
        let mut cursor = start;
        loop {
            if self.items[cursor].enabled {
                self.cursor = cursor;
                return true;
            }
            cursor = (cursor + 1) % len;
            if cursor == start {
                return false;
            }
        }
    }
}
