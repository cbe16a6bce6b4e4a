use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 表格中的一列，以位置識別；隱藏的列仍然存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl Row {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            hidden: false,
        }
    }

    /// Full row text, the way a rendered row reads when its cells are concatenated.
    pub fn text(&self) -> String {
        self.cells.join(" ")
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub header: Option<Row>,
    pub rows: Vec<Row>,
    /// 最後一次排序的方向，沒有排序過則為 None
    pub sort_direction: Option<SortDirection>,
}

impl Table {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(Row::new(cells));
        self
    }

    pub fn with_rows<R, I, S>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.extend(rows.into_iter().map(Row::new));
        self
    }

    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows.iter().filter_map(|row| row.cell(index)).collect()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| !row.hidden)
    }
}

/// 單一模組的統計數字
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStats {
    pub total: u64,
    pub active: u64,
    pub expired: u64,
    pub used_up: u64,
}

pub type StatsSnapshot = BTreeMap<String, ModuleStats>;

/// Body of `GET /admin/api/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: StatsSnapshot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
    pub required: bool,
    pub invalid: bool,
}

impl FormField {
    pub fn required(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            required: true,
            invalid: false,
        }
    }

    pub fn optional(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, value)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

/// 帶有 `data-bs-toggle` 屬性的元素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetTrigger {
    pub element_id: String,
    pub toggle: String,
}
