//! Page-level state addressed by element id.
//!
//! This is the thin layer between the pure table/CSV functions and whatever
//! renders them: tables by id, text elements by id, widget triggers and the
//! banners that were present when the page loaded.

use crate::core::alerts::{AlertStack, SharedAlerts};
use crate::core::{csv_export, table};
use crate::domain::model::{Row, Severity, SortDirection, Table, WidgetTrigger};
use crate::domain::ports::DownloadTarget;
use crate::utils::error::{DashError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TABLE_ID: &str = "keysTable";
pub const DEFAULT_COUNTER_ID: &str = "totalKeys";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Tooltip,
    Popover,
}

/// Maps `data-bs-toggle` triggers to widgets; other toggles are ignored.
pub fn init_widgets(triggers: &[WidgetTrigger]) -> Vec<(String, Widget)> {
    triggers
        .iter()
        .filter_map(|trigger| {
            let widget = match trigger.toggle.as_str() {
                "tooltip" => Widget::Tooltip,
                "popover" => Widget::Popover,
                _ => return None,
            };
            Some((trigger.element_id.clone(), widget))
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub path: String,
    pub counter_id: String,
    tables: HashMap<String, Table>,
    text: HashMap<String, String>,
    triggers: Vec<WidgetTrigger>,
    existing_alerts: Vec<(String, Severity)>,
}

/// What page-load initialisation produced.
pub struct PageLoad {
    pub widgets: Vec<(String, Widget)>,
    pub alerts: SharedAlerts,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            counter_id: DEFAULT_COUNTER_ID.to_string(),
            ..Default::default()
        }
    }

    pub fn with_counter_id(mut self, counter_id: impl Into<String>) -> Self {
        self.counter_id = counter_id.into();
        self
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.id.clone(), table);
    }

    pub fn set_text(&mut self, element_id: impl Into<String>, text: impl Into<String>) {
        self.text.insert(element_id.into(), text.into());
    }

    pub fn text(&self, element_id: &str) -> Option<&str> {
        self.text.get(element_id).map(String::as_str)
    }

    pub fn add_trigger(&mut self, element_id: impl Into<String>, toggle: impl Into<String>) {
        self.triggers.push(WidgetTrigger {
            element_id: element_id.into(),
            toggle: toggle.into(),
        });
    }

    pub fn add_existing_alert(&mut self, message: impl Into<String>, severity: Severity) {
        self.existing_alerts.push((message.into(), severity));
    }

    pub fn table(&self, table_id: &str) -> Result<&Table> {
        self.tables
            .get(table_id)
            .ok_or_else(|| DashError::TableNotFound {
                table_id: table_id.to_string(),
            })
    }

    fn table_mut(&mut self, table_id: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(table_id)
            .ok_or_else(|| DashError::TableNotFound {
                table_id: table_id.to_string(),
            })
    }

    /// Initialises widgets and starts the countdown on banners already shown.
    pub fn on_load(&self, dismiss_after: Duration) -> PageLoad {
        let widgets = init_widgets(&self.triggers);
        let stack = AlertStack::from_existing(
            dismiss_after,
            self.existing_alerts.iter().cloned(),
            Instant::now(),
        );

        tracing::debug!(
            path = %self.path,
            widgets = widgets.len(),
            alerts = stack.len(),
            "page initialised"
        );

        PageLoad {
            widgets,
            alerts: SharedAlerts::new(stack),
        }
    }

    pub fn sort_table(&mut self, table_id: &str, column: usize) -> Result<SortDirection> {
        table::sort(self.table_mut(table_id)?, column)
    }

    pub fn search_table(&mut self, table_id: &str, term: &str) -> Result<usize> {
        table::search(self.table_mut(table_id)?, term);
        self.update_row_count(table_id)
    }

    pub fn filter_table<F>(&mut self, table_id: &str, predicate: F) -> Result<usize>
    where
        F: FnMut(&Row) -> bool,
    {
        table::filter(self.table_mut(table_id)?, predicate);
        self.update_row_count(table_id)
    }

    /// 計數元素不存在時只回傳數量，不寫入
    pub fn update_row_count(&mut self, table_id: &str) -> Result<usize> {
        let visible = table::visible_count(self.table(table_id)?);
        if let Some(counter) = self.text.get_mut(&self.counter_id) {
            *counter = visible.to_string();
        }
        Ok(visible)
    }

    pub async fn export_table<T: DownloadTarget>(
        &self,
        table_id: &str,
        filename: &str,
        target: &T,
    ) -> Result<Option<PathBuf>> {
        csv_export::export(self.table(table_id)?, filename, target).await
    }
}
