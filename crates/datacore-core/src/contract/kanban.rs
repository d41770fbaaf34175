//! Kanban columns.

use serde::{Deserialize, Serialize};

use crate::contract::crud::CrudCallbacks;
use crate::error::{DatacoreError, PreconditionError, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanColumn {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub wip_limit: Option<u32>,
    pub is_done_column: bool,
    pub task_count: u32,
}

impl KanbanColumn {
    pub fn over_wip(&self) -> bool {
        self.wip_limit.is_some_and(|limit| self.task_count > limit)
    }

    /// `3 / 5` with a WIP limit, `3` without.
    pub fn count_label(&self) -> String {
        match self.wip_limit {
            Some(limit) => format!("{} / {}", self.task_count, limit),
            None => self.task_count.to_string(),
        }
    }
}

/// The editable fields of a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnUpdate {
    pub name: String,
    pub color: Option<String>,
    pub wip_limit: Option<u32>,
}

impl ColumnUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "Column name is required"));
        }
        if self.wip_limit == Some(0) {
            return Err(ValidationError::new("wip_limit", "WIP limit must be at least 1"));
        }
        if self.color.as_deref().is_some_and(|c| !is_hex_color(c)) {
            return Err(ValidationError::new("color", "Color must be #RRGGBB"));
        }
        Ok(())
    }
}

impl From<&KanbanColumn> for ColumnUpdate {
    fn from(column: &KanbanColumn) -> Self {
        Self {
            name: column.name.clone(),
            color: column.color.clone(),
            wip_limit: column.wip_limit,
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// A column may only be deleted once it is empty.
pub fn guard_delete(column: &KanbanColumn) -> Result<(), PreconditionError> {
    if column.task_count > 0 {
        return Err(PreconditionError::ColumnNotEmpty {
            name: column.name.clone(),
            task_count: column.task_count,
        });
    }
    Ok(())
}

/// Validate then forward an update.
pub async fn update_column(
    column: &KanbanColumn,
    update: ColumnUpdate,
    callbacks: &CrudCallbacks<ColumnUpdate>,
) -> Result<(), DatacoreError> {
    update.validate()?;
    callbacks.update(column.id, update).await?;
    Ok(())
}

/// Check the precondition, then forward the delete. A non-empty column
/// never reaches the back-end.
pub async fn delete_column(
    column: &KanbanColumn,
    callbacks: &CrudCallbacks<ColumnUpdate>,
) -> Result<(), DatacoreError> {
    guard_delete(column)?;
    callbacks.delete(column.id).await?;
    Ok(())
}
