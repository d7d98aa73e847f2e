//! Application state and view state definitions.

use crate::config::TuiConfig;
use crate::forms::AddHostGroupForm;
use crate::model::{is_host_group_selectable, HostGroup, HostGroupPage, IdView};
use crate::nav::View;
use crate::notifications::{Alerts, NotificationLevel};
use crate::rpc::RpcClient;
use crate::theme::ConsoleTheme;
use chrono::{DateTime, Utc};
use idm_select::{
    BulkSelector, InputCapture, Keyed, MenuEntry, MenuItem, PageSnapshot, SelectionSet, TriState,
};
use serde_json::{Map, Value};

pub const PER_PAGE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

pub struct App {
    pub config: TuiConfig,
    pub theme: ConsoleTheme,
    pub rpc: RpcClient,
    pub active_view: View,
    /// Shared with every bulk menu; active while one is open.
    pub capture: InputCapture,

    pub host_groups: HostGroupsViewState,
    pub id_view: IdViewSettingsState,

    pub alerts: Alerts,
    pub modal: Option<Modal>,
    /// Search prompt contents while the prompt is open.
    pub search_input: Option<String>,
}

impl App {
    pub fn new(config: TuiConfig, rpc: RpcClient) -> Self {
        let theme = ConsoleTheme::midnight();
        let per_page = config.page_size;
        Self {
            config,
            theme,
            rpc,
            active_view: View::HostGroups,
            capture: InputCapture::new(),
            host_groups: HostGroupsViewState::new(per_page),
            id_view: IdViewSettingsState::new(),
            alerts: Alerts::new(),
            modal: None,
            search_input: None,
        }
    }

    pub fn notify(&mut self, key: &str, level: NotificationLevel, message: impl Into<String>) {
        self.alerts.add(key, level, message);
    }

    /// Periodic housekeeping run by the event loop between inputs.
    pub fn on_tick(&mut self, now: DateTime<Utc>) {
        self.alerts.expire(now);
    }

    pub fn switch_view(&mut self, view: View) {
        // leaving the table must not leave its menu holding the capture
        self.host_groups.bulk.menu_mut().close();
        self.active_view = view;
    }
}

#[derive(Debug, Clone)]
pub enum Modal {
    Help,
    AddHostGroup(AddHostGroupForm),
    DeleteHostGroups { keys: Vec<String> },
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Help => "Keybindings",
            Modal::AddHostGroup(_) => "Add host group",
            Modal::DeleteHostGroups { .. } => "Remove host groups",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Half-open row range `[start, stop)` of the current page.
    pub fn page_bounds(&self) -> (usize, usize) {
        ((self.page - 1) * self.per_page, self.page * self.per_page)
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    pub fn next(&mut self, total: usize) -> bool {
        if self.page < self.page_count(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to the next per-page option and back to page 1.
    pub fn cycle_per_page(&mut self) {
        self.per_page = PER_PAGE_OPTIONS
            .iter()
            .copied()
            .find(|option| *option > self.per_page)
            .unwrap_or(PER_PAGE_OPTIONS[0]);
        self.page = 1;
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }
}

/// Host group table: the visible page, every selectable key across pages,
/// and the selection that survives page changes.
#[derive(Debug)]
pub struct HostGroupsViewState {
    pub rows: Vec<HostGroup>,
    pub universe: Vec<HostGroup>,
    pub total_count: usize,
    pub pagination: Pagination,
    pub cursor: usize,
    pub selection: SelectionSet<HostGroup>,
    pub bulk: BulkSelector,
    /// Mirrors the selection consumer signal; gates the delete action.
    pub delete_enabled: bool,
    /// False while a fetch is in flight.
    pub show_rows: bool,
    pub search_value: String,
}

impl HostGroupsViewState {
    pub fn new(per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            universe: Vec::new(),
            total_count: 0,
            pagination: Pagination::new(per_page),
            cursor: 0,
            selection: SelectionSet::new(),
            bulk: BulkSelector::new(),
            delete_enabled: false,
            show_rows: false,
            search_value: String::new(),
        }
    }

    fn with_page<T>(
        &mut self,
        f: impl FnOnce(
            &mut BulkSelector,
            &mut SelectionSet<HostGroup>,
            &PageSnapshot<'_, HostGroup>,
            &mut bool,
        ) -> T,
    ) -> T {
        let page = PageSnapshot::new(
            &self.rows,
            &self.universe,
            self.total_count,
            is_host_group_selectable,
        );
        f(&mut self.bulk, &mut self.selection, &page, &mut self.delete_enabled)
    }

    pub fn page_bounds(&self) -> (usize, usize) {
        self.pagination.page_bounds()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.total_count)
    }

    pub fn begin_loading(&mut self) {
        self.show_rows = false;
    }

    pub fn apply_page(&mut self, page: HostGroupPage) {
        self.rows = page.rows;
        self.universe = page.universe;
        self.total_count = page.total_count;
        self.show_rows = true;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        let page = PageSnapshot::new(
            &self.rows,
            &self.universe,
            self.total_count,
            is_host_group_selectable,
        );
        self.bulk.sync_page(&self.selection, &page);
    }

    pub fn cursor_row(&self) -> Option<&HostGroup> {
        self.rows.get(self.cursor)
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + 1) % self.rows.len();
        }
    }

    pub fn move_up(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.rows.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    pub fn is_row_selected(&self, row: &HostGroup) -> bool {
        self.selection.contains(row)
    }

    /// Toggle the row under the cursor. Unselectable rows are left alone.
    pub fn toggle_row_selected(&mut self) -> bool {
        let Some(row) = self.rows.get(self.cursor) else {
            return false;
        };
        if !is_host_group_selectable(row) {
            return false;
        }
        if self.selection.remove_key(row.key()).is_none() {
            self.selection.insert(row.clone());
        }
        self.delete_enabled = !self.selection.is_empty();
        let page = PageSnapshot::new(
            &self.rows,
            &self.universe,
            self.total_count,
            is_host_group_selectable,
        );
        self.bulk.sync_page(&self.selection, &page);
        true
    }

    pub fn clear_selection(&mut self) {
        self.with_page(|bulk, selection, _, enabled| {
            bulk.unselect_all(selection, &mut |on: bool| *enabled = on)
        });
    }

    /// Refresh and search both start over: empty selection, first page.
    pub fn reset_for_reload(&mut self) {
        self.clear_selection();
        self.pagination.reset();
        self.cursor = 0;
        self.begin_loading();
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next(self.total_count);
        if moved {
            self.cursor = 0;
        }
        moved
    }

    pub fn previous_page(&mut self) -> bool {
        let moved = self.pagination.previous();
        if moved {
            self.cursor = 0;
        }
        moved
    }

    pub fn cycle_per_page(&mut self) {
        self.pagination.cycle_per_page();
        self.cursor = 0;
    }

    pub fn select_page(&mut self) -> usize {
        self.with_page(|bulk, selection, page, enabled| {
            bulk.select_page(selection, page, &mut |on: bool| *enabled = on)
        })
    }

    pub fn unselect_page(&mut self) -> usize {
        self.with_page(|bulk, selection, page, enabled| {
            bulk.unselect_page(selection, page, &mut |on: bool| *enabled = on)
        })
    }

    pub fn select_all(&mut self) {
        self.with_page(|bulk, selection, page, enabled| {
            bulk.select_all_across_pages(selection, page, &mut |on: bool| *enabled = on)
        });
    }

    /// Flip the bulk checkbox: anything short of all selected checks it.
    pub fn toggle_bulk_checkbox(&mut self) {
        let checked = self.tri_state() != TriState::Checked;
        self.with_page(|bulk, selection, page, enabled| {
            bulk.checkbox_changed(checked, selection, page, &mut |on: bool| *enabled = on)
        });
    }

    pub fn activate_menu_item(&mut self, item: MenuItem) {
        self.with_page(|bulk, selection, page, enabled| {
            bulk.activate(item, selection, page, &mut |on: bool| *enabled = on)
        });
    }

    pub fn activate_highlighted(&mut self) -> Option<MenuItem> {
        self.with_page(|bulk, selection, page, enabled| {
            bulk.activate_highlighted(selection, page, &mut |on: bool| *enabled = on)
        })
    }

    pub fn tri_state(&self) -> TriState {
        idm_select::tri_state(&self.selection, &self.universe)
    }

    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        let page = PageSnapshot::new(
            &self.rows,
            &self.universe,
            self.total_count,
            is_host_group_selectable,
        );
        self.bulk.menu_entries(&self.selection, &page)
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.iter().map(|row| row.cn.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdViewField {
    DomainResolutionOrder,
    Description,
}

impl IdViewField {
    pub fn label(&self) -> &'static str {
        match self {
            IdViewField::DomainResolutionOrder => "Domain resolution order",
            IdViewField::Description => "Description",
        }
    }

    pub fn all() -> &'static [IdViewField] {
        &[IdViewField::DomainResolutionOrder, IdViewField::Description]
    }

    fn slot(self, view: &mut IdView) -> &mut Option<String> {
        match self {
            IdViewField::DomainResolutionOrder => &mut view.domain_resolution_order,
            IdViewField::Description => &mut view.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdViewSettingsState {
    pub original: Option<IdView>,
    pub current: Option<IdView>,
    pub focused: IdViewField,
    /// Edit buffer for the focused field while editing.
    pub editing: Option<String>,
    pub is_loading: bool,
    pub is_saving: bool,
}

impl Default for IdViewSettingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl IdViewSettingsState {
    pub fn new() -> Self {
        Self {
            original: None,
            current: None,
            focused: IdViewField::DomainResolutionOrder,
            editing: None,
            is_loading: false,
            is_saving: false,
        }
    }

    pub fn apply_loaded(&mut self, view: IdView) {
        self.original = Some(view.clone());
        self.current = Some(view);
        self.editing = None;
        self.is_loading = false;
    }

    pub fn is_modified(&self) -> bool {
        match (&self.current, &self.original) {
            (Some(current), Some(original)) => current.is_modified(original),
            _ => false,
        }
    }

    pub fn modified_values(&self) -> Map<String, Value> {
        match (&self.current, &self.original) {
            (Some(current), Some(original)) => current.modified_values(original),
            _ => Map::new(),
        }
    }

    pub fn field_value(&self, field: IdViewField) -> &str {
        let Some(view) = &self.current else {
            return "";
        };
        let value = match field {
            IdViewField::DomainResolutionOrder => &view.domain_resolution_order,
            IdViewField::Description => &view.description,
        };
        value.as_deref().unwrap_or("")
    }

    pub fn focus_next(&mut self) {
        self.focused = match self.focused {
            IdViewField::DomainResolutionOrder => IdViewField::Description,
            IdViewField::Description => IdViewField::DomainResolutionOrder,
        };
    }

    pub fn begin_edit(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.editing = Some(self.field_value(self.focused).to_string());
        true
    }

    pub fn commit_edit(&mut self) {
        let (Some(buffer), Some(current)) = (self.editing.take(), self.current.as_mut()) else {
            return;
        };
        *self.focused.slot(current) = Some(buffer);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Restore the last loaded values. Returns false when there was nothing
    /// to revert.
    pub fn revert(&mut self) -> bool {
        self.editing = None;
        if !self.is_modified() {
            return false;
        }
        self.current = self.original.clone();
        true
    }

    /// The backend accepted the change; what is shown becomes the baseline.
    pub fn mark_saved(&mut self, saved: IdView) {
        self.original = Some(saved.clone());
        self.current = Some(saved);
        self.is_saving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Test Fixtures
    // ========================================================================

    fn numbered(count: usize) -> Vec<HostGroup> {
        (0..count)
            .map(|i| HostGroup::named(format!("group{i:02}")))
            .collect()
    }

    fn page_of(all: &[HostGroup], pagination: Pagination) -> HostGroupPage {
        let (start, stop) = pagination.page_bounds();
        let stop = stop.min(all.len());
        let start = start.min(stop);
        HostGroupPage {
            rows: all[start..stop].to_vec(),
            universe: all.iter().filter(|g| is_host_group_selectable(g)).cloned().collect(),
            total_count: all.len(),
        }
    }

    fn loaded(all: &[HostGroup], per_page: usize) -> HostGroupsViewState {
        let mut state = HostGroupsViewState::new(per_page);
        state.apply_page(page_of(all, state.pagination));
        state
    }

    fn sample_view() -> IdView {
        IdView {
            cn: "Default Trust View".into(),
            description: Some("Trust view".into()),
            domain_resolution_order: Some("ad.test:ipa.test".into()),
        }
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    #[test]
    fn test_page_bounds() {
        let mut pagination = Pagination::new(5);
        assert_eq!(pagination.page_bounds(), (0, 5));
        assert!(pagination.next(12));
        assert_eq!(pagination.page_bounds(), (5, 10));
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let mut pagination = Pagination::new(10);
        assert!(!pagination.previous());
        assert!(pagination.next(11));
        assert!(!pagination.next(11));
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.page_count(0), 1);
    }

    #[test]
    fn test_cycle_per_page_wraps_and_resets_page() {
        let mut pagination = Pagination::new(10);
        pagination.next(100);
        pagination.cycle_per_page();
        assert_eq!((pagination.per_page, pagination.page), (20, 1));
        pagination.cycle_per_page();
        pagination.cycle_per_page();
        assert_eq!(pagination.per_page, 100);
        pagination.cycle_per_page();
        assert_eq!(pagination.per_page, 10);

        let mut odd = Pagination::new(30);
        odd.cycle_per_page();
        assert_eq!(odd.per_page, 50);
    }

    // ========================================================================
    // Host group selection
    // ========================================================================

    #[test]
    fn test_selection_survives_page_change() {
        let all = numbered(10);
        let mut state = loaded(&all, 5);
        state.select_page();
        assert!(state.delete_enabled);
        assert_eq!(state.tri_state(), TriState::Indeterminate);

        assert!(state.next_page());
        state.apply_page(page_of(&all, state.pagination));
        assert_eq!(state.selection.len(), 5);
        assert_eq!(state.bulk.last_page_added(), 0);

        state.select_page();
        assert_eq!(state.tri_state(), TriState::Checked);
    }

    #[test]
    fn test_toggle_row_skips_unselectable() {
        let all = vec![HostGroup::named(""), HostGroup::named("web")];
        let mut state = loaded(&all, 10);
        assert!(!state.toggle_row_selected());
        assert!(!state.delete_enabled);

        state.move_down();
        assert!(state.toggle_row_selected());
        assert!(state.delete_enabled);
        assert!(state.toggle_row_selected());
        assert!(state.selection.is_empty());
        assert!(!state.delete_enabled);
    }

    #[test]
    fn test_bulk_checkbox_cycles() {
        let all = numbered(6);
        let mut state = loaded(&all, 3);
        state.toggle_bulk_checkbox();
        assert_eq!(state.selection.len(), 6);
        assert_eq!(state.tri_state(), TriState::Checked);

        state.toggle_bulk_checkbox();
        assert_eq!(state.selection.len(), 3);
        assert_eq!(state.tri_state(), TriState::Indeterminate);
    }

    #[test]
    fn test_reset_for_reload() {
        let all = numbered(30);
        let mut state = loaded(&all, 10);
        state.select_all();
        state.next_page();
        state.reset_for_reload();
        assert!(state.selection.is_empty());
        assert!(!state.delete_enabled);
        assert!(!state.show_rows);
        assert_eq!(state.pagination.page, 1);
    }

    #[test]
    fn test_menu_entries_use_live_counts() {
        let all = numbered(10);
        let mut state = loaded(&all, 5);
        state.activate_menu_item(MenuItem::SelectPage);
        let labels: Vec<String> = state.menu_entries().into_iter().map(|e| e.label).collect();
        assert_eq!(labels[0], "Unselect page (5 items)");
        assert_eq!(labels[1], "Unselect all (5 items)");
        assert_eq!(labels[2], "Select page (5 items)");
    }

    // ========================================================================
    // ID view settings
    // ========================================================================

    #[test]
    fn test_edit_marks_modified_and_revert_restores() {
        let mut state = IdViewSettingsState::new();
        state.apply_loaded(sample_view());
        assert!(!state.is_modified());
        assert!(!state.revert());

        assert!(state.begin_edit());
        if let Some(buffer) = state.editing.as_mut() {
            buffer.push_str(":extra.test");
        }
        state.commit_edit();
        assert!(state.is_modified());
        assert_eq!(
            state.field_value(IdViewField::DomainResolutionOrder),
            "ad.test:ipa.test:extra.test"
        );
        assert_eq!(state.modified_values().len(), 1);

        assert!(state.revert());
        assert!(!state.is_modified());
    }

    #[test]
    fn test_mark_saved_resets_baseline() {
        let mut state = IdViewSettingsState::new();
        state.apply_loaded(sample_view());
        state.focus_next();
        state.begin_edit();
        state.editing = Some(String::new());
        state.commit_edit();
        let saved = state.current.clone().unwrap();
        state.mark_saved(saved);
        assert!(!state.is_modified());
    }

    #[test]
    fn test_begin_edit_requires_loaded_view() {
        let mut state = IdViewSettingsState::new();
        assert!(!state.begin_edit());
        assert_eq!(state.field_value(IdViewField::Description), "");
    }
}
