//! The popup state model and its partial-update wire body.
//!
//! [`PopupState`] is a singleton record: a visibility flag plus the text an
//! embedded popup displays. Both the API and the storage backends parse
//! untrusted JSON through [`PopupState::from_value`], which applies the
//! uniform coercion rule: wrongly typed fields are silently dropped and
//! replaced by the field default, never propagated as errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// PopupState
// ---------------------------------------------------------------------------

/// The shared popup record: whether the popup is shown, and what it says.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupState {
    /// Whether the popup is currently visible on embedding pages.
    pub show: bool,
    /// The text displayed inside the popup. Empty by default.
    pub content: String,
}

impl PopupState {
    /// Extract a `PopupState` from arbitrary JSON.
    ///
    /// A missing or non-boolean `show` becomes `false`; a missing or
    /// non-string `content` becomes the empty string. Non-object values
    /// (arrays, strings, `null`) yield the defaults.
    pub fn from_value(value: &Value) -> Self {
        Self {
            show: value.get("show").and_then(Value::as_bool).unwrap_or(false),
            content: value
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Apply a partial update, leaving unspecified fields untouched.
    pub fn apply(&mut self, update: &StateUpdate) {
        if let Some(show) = update.show {
            self.show = show;
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// StateUpdate
// ---------------------------------------------------------------------------

/// A partial update to the popup state ("patch" semantics).
///
/// Serialized by the clients as the POST body; parsed by the API via
/// [`StateUpdate::from_value`] so that wrongly typed fields are ignored
/// rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StateUpdate {
    /// An update that only changes the visibility flag.
    pub fn show(show: bool) -> Self {
        Self {
            show: Some(show),
            content: None,
        }
    }

    /// An update that only changes the content text.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            show: None,
            content: Some(content.into()),
        }
    }

    /// Extract the correctly typed fields from arbitrary JSON.
    ///
    /// Fields that are absent or carry the wrong type are left `None`
    /// (ignored), matching the API contract for lenient partial updates.
    pub fn from_value(value: &Value) -> Self {
        Self {
            show: value.get("show").and_then(Value::as_bool),
            content: value
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// `true` when the update carries no applicable field.
    pub fn is_empty(&self) -> bool {
        self.show.is_none() && self.content.is_none()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_well_typed_fields() {
        let state = PopupState::from_value(&json!({"show": true, "content": "Hi"}));
        assert!(state.show);
        assert_eq!(state.content, "Hi");
    }

    #[test]
    fn from_value_defaults_wrongly_typed_fields() {
        let state = PopupState::from_value(&json!({"show": "yes", "content": 42}));
        assert!(!state.show);
        assert_eq!(state.content, "");
    }

    #[test]
    fn from_value_defaults_on_non_object() {
        assert_eq!(PopupState::from_value(&json!(null)), PopupState::default());
        assert_eq!(
            PopupState::from_value(&json!(["show", true])),
            PopupState::default()
        );
    }

    #[test]
    fn apply_leaves_unspecified_fields_untouched() {
        let mut state = PopupState {
            show: false,
            content: "Hello".to_string(),
        };
        state.apply(&StateUpdate::show(true));
        assert!(state.show);
        assert_eq!(state.content, "Hello");

        state.apply(&StateUpdate::content("Bye"));
        assert!(state.show);
        assert_eq!(state.content, "Bye");
    }

    #[test]
    fn update_from_value_ignores_wrong_types() {
        let update = StateUpdate::from_value(&json!({"show": "yes", "content": 42}));
        assert!(update.is_empty());

        let update = StateUpdate::from_value(&json!({"show": false, "content": "ok"}));
        assert_eq!(update.show, Some(false));
        assert_eq!(update.content.as_deref(), Some("ok"));
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let body = serde_json::to_value(StateUpdate::show(true)).unwrap();
        assert_eq!(body, json!({"show": true}));

        let body = serde_json::to_value(StateUpdate::content("Hi")).unwrap();
        assert_eq!(body, json!({"content": "Hi"}));
    }
}
