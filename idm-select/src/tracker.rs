//! Bulk selection operations and derived indicator state.

use crate::keyed::Keyed;
use crate::menu::{BulkMenu, InputCapture, MenuInput, MenuOutcome};
use crate::set::SelectionSet;
use std::collections::HashSet;
use tracing::debug;

/// Inputs the row provider supplies on every evaluation.
pub struct PageSnapshot<'a, R> {
    pub visible_page: &'a [R],
    pub selectable_universe: &'a [R],
    /// Size of the whole remote collection, selectable or not.
    pub total_count: usize,
    pub is_selectable: fn(&R) -> bool,
}

impl<'a, R> PageSnapshot<'a, R> {
    pub fn new(
        visible_page: &'a [R],
        selectable_universe: &'a [R],
        total_count: usize,
        is_selectable: fn(&R) -> bool,
    ) -> Self {
        Self {
            visible_page,
            selectable_universe,
            total_count,
            is_selectable,
        }
    }

    pub fn selectable_rows(&self) -> impl Iterator<Item = &'a R> + 'a {
        let is_selectable = self.is_selectable;
        self.visible_page.iter().filter(move |row| is_selectable(*row))
    }
}

/// Checkbox state of the bulk-select toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl TriState {
    /// `Some(true)` full, `None` partial, `Some(false)` empty.
    pub fn as_checkbox(self) -> Option<bool> {
        match self {
            TriState::Checked => Some(true),
            TriState::Indeterminate => None,
            TriState::Unchecked => Some(false),
        }
    }
}

pub fn tri_state<R: Keyed>(selected: &SelectionSet<R>, universe: &[R]) -> TriState {
    if selected.is_empty() {
        return TriState::Unchecked;
    }
    let universe_keys: HashSet<&R::Key> = universe.iter().map(Keyed::key).collect();
    let covers_universe = universe_keys.len() == selected.len()
        && selected.keys().all(|key| universe_keys.contains(key));
    if covers_universe {
        TriState::Checked
    } else {
        TriState::Indeterminate
    }
}

/// Selection size after a "select page" action, clamped to the collection size.
///
/// Counts only distinct selectable keys on the page that are not yet
/// selected, so a fully selected page reports the current size unchanged.
pub fn select_page_estimate<R: Keyed>(selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> usize {
    let mut pending: HashSet<&R::Key> = HashSet::new();
    for row in page.selectable_rows() {
        if !selected.contains(row) {
            pending.insert(row.key());
        }
    }
    selected
        .len()
        .saturating_add(pending.len())
        .min(page.total_count)
}

pub fn page_fully_selected<R: Keyed>(selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> bool {
    page.selectable_rows().all(|row| selected.contains(row))
}

pub fn selected_on_page<R: Keyed>(selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> usize {
    page.visible_page
        .iter()
        .filter(|row| selected.contains(row))
        .count()
}

/// Receives the enable/disable signal for actions that need a selection.
pub trait SelectionConsumer {
    fn selection_changed(&mut self, has_selection: bool);
}

impl<F: FnMut(bool)> SelectionConsumer for F {
    fn selection_changed(&mut self, has_selection: bool) {
        self(has_selection)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    UnselectPage,
    UnselectAll,
    SelectPage,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::UnselectPage, MenuItem::UnselectAll, MenuItem::SelectPage];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub item: MenuItem,
    pub label: String,
}

/// Bulk selector for one table. Holds only the menu and the count added by
/// the last "select page"; the selection itself is passed in.
#[derive(Debug, Default)]
pub struct BulkSelector {
    menu: BulkMenu,
    last_page_added: usize,
}

impl BulkSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self) -> &BulkMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut BulkMenu {
        &mut self.menu
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn last_page_added(&self) -> usize {
        self.last_page_added
    }

    pub fn toggle_menu(&mut self, capture: &InputCapture) -> MenuOutcome {
        self.menu.handle_input(MenuInput::ToggleClick, capture)
    }

    pub fn handle_menu_input(&mut self, input: MenuInput, capture: &InputCapture) -> MenuOutcome {
        self.menu.handle_input(input, capture)
    }

    /// Add every selectable row of the visible page. Returns how many rows
    /// were added.
    pub fn select_page<R: Keyed + Clone>(
        &mut self,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) -> usize {
        let added = page
            .selectable_rows()
            .filter(|row| selected.insert((*row).clone()))
            .count();
        self.last_page_added = added;
        debug!(added, selected = selected.len(), "select page");
        consumer.selection_changed(!selected.is_empty());
        added
    }

    /// Remove every visible row from the selection, selectable or not.
    pub fn unselect_page<R: Keyed>(
        &mut self,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) -> usize {
        let removed = page
            .visible_page
            .iter()
            .filter(|row| selected.remove_key(row.key()).is_some())
            .count();
        self.last_page_added = 0;
        debug!(removed, selected = selected.len(), "unselect page");
        consumer.selection_changed(!selected.is_empty());
        removed
    }

    pub fn select_all_across_pages<R: Keyed + Clone>(
        &mut self,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) {
        selected.replace_with(page.selectable_universe);
        debug!(selected = selected.len(), "select all");
        consumer.selection_changed(!selected.is_empty());
    }

    pub fn unselect_all<R: Keyed>(
        &mut self,
        selected: &mut SelectionSet<R>,
        consumer: &mut impl SelectionConsumer,
    ) {
        selected.clear();
        self.last_page_added = 0;
        debug!("unselect all");
        consumer.selection_changed(false);
    }

    /// The toggle's checkbox: checking selects the whole universe, unchecking
    /// clears the visible page.
    pub fn checkbox_changed<R: Keyed + Clone>(
        &mut self,
        checked: bool,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) {
        if checked {
            self.select_all_across_pages(selected, page, consumer);
        } else {
            self.unselect_page(selected, page, consumer);
        }
    }

    /// Run a menu item and close the menu.
    pub fn activate<R: Keyed + Clone>(
        &mut self,
        item: MenuItem,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) {
        match item {
            MenuItem::UnselectPage => {
                self.unselect_page(selected, page, consumer);
            }
            MenuItem::UnselectAll => self.unselect_all(selected, consumer),
            MenuItem::SelectPage => {
                self.select_page(selected, page, consumer);
            }
        }
        self.menu.close();
    }

    pub fn activate_highlighted<R: Keyed + Clone>(
        &mut self,
        selected: &mut SelectionSet<R>,
        page: &PageSnapshot<'_, R>,
        consumer: &mut impl SelectionConsumer,
    ) -> Option<MenuItem> {
        let item = *MenuItem::ALL.get(self.menu.highlighted())?;
        self.activate(item, selected, page, consumer);
        Some(item)
    }

    /// Reset the per-page counter once nothing on the visible page is
    /// selected any more (page change, external unselect).
    pub fn sync_page<R: Keyed>(&mut self, selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) {
        if selected_on_page(selected, page) == 0 {
            self.last_page_added = 0;
        }
    }

    pub fn tri_state<R: Keyed>(&self, selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> TriState {
        tri_state(selected, page.selectable_universe)
    }

    pub fn all_selected<R: Keyed>(&self, selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> bool {
        self.tri_state(selected, page) == TriState::Checked
    }

    pub fn menu_entries<R: Keyed>(&self, selected: &SelectionSet<R>, page: &PageSnapshot<'_, R>) -> Vec<MenuEntry> {
        MenuItem::ALL
            .iter()
            .map(|&item| {
                let label = match item {
                    MenuItem::UnselectPage => {
                        format!("Unselect page ({} items)", selected_on_page(selected, page))
                    }
                    MenuItem::UnselectAll => format!("Unselect all ({} items)", selected.len()),
                    MenuItem::SelectPage => {
                        format!("Select page ({} items)", select_page_estimate(selected, page))
                    }
                };
                MenuEntry { item, label }
            })
            .collect()
    }
}
