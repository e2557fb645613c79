//! Sparse field reconciliation.
//!
//! A [`Diff`] collects only the fields whose externally-reported value
//! differs from the locally stored one. Handlers stage candidate fields,
//! check [`Diff::is_empty`], and persist the staged values plus one activity
//! entry built from [`Diff::into_details`].
//!
//! Status fields are staged after passing through the integration's static
//! mapping table; an unmapped external code never reaches the diff, so it
//! produces no update and no error.

use serde::Serialize;

// ---------------------------------------------------------------------------
// FieldChange
// ---------------------------------------------------------------------------

/// One staged change: field name plus before/after values for the audit
/// trail.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub from: serde_json::Value,
    pub to: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Accumulates the sparse set of fields that actually changed.
#[derive(Debug, Default)]
pub struct Diff {
    changes: Vec<FieldChange>,
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `field` if the external value is present and differs from the
    /// local one. Absent external values mean "no opinion", never "clear".
    pub fn stage<T>(&mut self, field: &'static str, local: &T, external: Option<&T>)
    where
        T: PartialEq + Serialize,
    {
        let Some(incoming) = external else { return };
        if incoming == local {
            return;
        }
        self.changes.push(FieldChange {
            field,
            from: serde_json::to_value(local).unwrap_or(serde_json::Value::Null),
            to: serde_json::to_value(incoming).unwrap_or(serde_json::Value::Null),
        });
    }

    /// True when nothing differs and no update should be written.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether a specific field was staged.
    pub fn contains(&self, field: &str) -> bool {
        self.changes.iter().any(|c| c.field == field)
    }

    /// The staged changes, in staging order.
    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Render the diff as the `details` JSON for an activity log entry:
    /// `{ "<field>": { "from": ..., "to": ... }, ... }`.
    pub fn into_details(self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for change in self.changes {
            map.insert(
                change.field.to_string(),
                serde_json::json!({ "from": change.from, "to": change.to }),
            );
        }
        serde_json::Value::Object(map)
    }
}
