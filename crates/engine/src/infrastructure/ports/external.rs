//! External service port traits (die roller, message log, dialogs).

use async_trait::async_trait;
use pr20_domain::{CreationWarning, DiceFormula, FormData};
use serde::{Deserialize, Serialize};

use super::error::{DialogError, DiceRollError, LogError};

// =============================================================================
// Die Roller
// =============================================================================

/// Evaluates dice formulas such as `2d20kh1` or `1d6`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DieRollerPort: Send + Sync {
    async fn evaluate(&self, formula: &DiceFormula) -> Result<i32, DiceRollError>;
}

// =============================================================================
// Message Log
// =============================================================================

/// One entry in the shared message feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub speaker: String,
    pub content: String,
}

/// Shared feed that roll summaries are posted to.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLogPort: Send + Sync {
    async fn post(&self, speaker: &str, content: &str) -> Result<(), LogError>;
}

// =============================================================================
// Dialogs
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An input shown in a dialog. The submitted value comes back under `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DialogField {
    Select {
        name: String,
        label: String,
        options: Vec<SelectOption>,
        value: String,
    },
    Number {
        name: String,
        label: String,
        value: i32,
    },
    Checkbox {
        name: String,
        label: String,
        checked: bool,
    },
}

impl DialogField {
    pub fn name(&self) -> &str {
        match self {
            DialogField::Select { name, .. }
            | DialogField::Number { name, .. }
            | DialogField::Checkbox { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogButton {
    pub id: String,
    pub label: String,
}

impl DialogButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A modal prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    pub title: String,
    pub content: String,
    pub fields: Vec<DialogField>,
    pub buttons: Vec<DialogButton>,
    pub default_button: String,
}

/// Button id of the pre-roll dialog's confirm button.
pub const ROLL_BUTTON: &str = "roll";
/// Button id of the warnings dialog's proceed button.
pub const PROCEED_BUTTON: &str = "yes";

impl Dialog {
    /// Pre-roll options: roll mode, flat bonus, specialization toggle.
    pub fn skill_roll_options(skill_label: &str, specialized_default: bool) -> Self {
        Self {
            title: format!("Roll: {}", skill_label),
            content: "Heads up: if you have 0 ranks, Snag is applied automatically \
                      (unless you have Edge that cancels it)."
                .to_string(),
            fields: vec![
                DialogField::Select {
                    name: "mode".into(),
                    label: "Roll mode".into(),
                    options: vec![
                        SelectOption::new("normal", "Normal"),
                        SelectOption::new("edge", "Edge (keep higher)"),
                        SelectOption::new("snag", "Snag (keep lower)"),
                    ],
                    value: "normal".into(),
                },
                DialogField::Number {
                    name: "bonus".into(),
                    label: "Bonus (flat)".into(),
                    value: 0,
                },
                DialogField::Checkbox {
                    name: "specialized".into(),
                    label: "Use specialization (if eligible)".into(),
                    checked: specialized_default,
                },
            ],
            buttons: vec![
                DialogButton::new(ROLL_BUTTON, "Roll"),
                DialogButton::new("cancel", "Cancel"),
            ],
            default_button: ROLL_BUTTON.into(),
        }
    }

    /// "Proceed with warnings?" confirmation for the character builder.
    pub fn confirm_warnings(warnings: &[CreationWarning]) -> Self {
        let list = warnings
            .iter()
            .map(|w| format!("- {}", w))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            title: "Proceed with warnings?".into(),
            content: format!("Warnings (you can still proceed):\n{}", list),
            fields: Vec::new(),
            buttons: vec![
                DialogButton::new(PROCEED_BUTTON, "Proceed"),
                DialogButton::new("no", "Go Back"),
            ],
            default_button: "no".into(),
        }
    }
}

/// What the user did with a dialog.
///
/// `button` is `None` when the dialog was dismissed without choosing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub button: Option<String>,
    pub fields: FormData,
}

impl DialogResponse {
    pub fn dismissed() -> Self {
        Self::default()
    }

    pub fn clicked(button: impl Into<String>) -> Self {
        Self {
            button: Some(button.into()),
            fields: FormData::new(),
        }
    }

    pub fn with_fields(mut self, fields: FormData) -> Self {
        self.fields = fields;
        self
    }

    pub fn is(&self, button: &str) -> bool {
        self.button.as_deref() == Some(button)
    }
}

/// Modal dialog service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogPort: Send + Sync {
    async fn present(&self, dialog: Dialog) -> Result<DialogResponse, DialogError>;
}
