//! Destroy decisions, kept apart from prompting.
//!
//! The application service asks a `Confirmer` port one [`DestroyQuestion`]
//! at a time; answers may come from a terminal prompt or be pre-supplied.

use crate::domain::error::InstanceError;
use crate::domain::instance::InstanceName;

/// The three independent questions `destroy` asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyQuestion {
    /// Proceed at all. Declining leaves everything untouched.
    Proceed,
    /// Delete the state directory.
    DeleteState,
    /// Delete the workspace directory.
    DeleteWorkspace,
}

impl DestroyQuestion {
    /// Prompt text for `name`.
    #[must_use]
    pub fn prompt(self, name: &InstanceName) -> String {
        match self {
            DestroyQuestion::Proceed => format!("Destroy instance '{name}'?"),
            DestroyQuestion::DeleteState => {
                format!("Delete state directory for '{name}' (config, credentials, sessions)?")
            }
            DestroyQuestion::DeleteWorkspace => {
                format!("Delete workspace directory for '{name}'?")
            }
        }
    }
}

/// Pre-supplied answers. `None` means "ask".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestroyAnswers {
    pub proceed: Option<bool>,
    pub delete_state: Option<bool>,
    pub delete_workspace: Option<bool>,
}

impl DestroyAnswers {
    /// The pre-supplied answer to `question`, if any.
    #[must_use]
    pub fn answer(&self, question: DestroyQuestion) -> Option<bool> {
        match question {
            DestroyQuestion::Proceed => self.proceed,
            DestroyQuestion::DeleteState => self.delete_state,
            DestroyQuestion::DeleteWorkspace => self.delete_workspace,
        }
    }
}

/// Reject destroying the reserved instance before any question is asked.
///
/// # Errors
///
/// Returns [`InstanceError::Protected`] for the default instance.
pub fn ensure_destroyable(name: &InstanceName) -> Result<(), InstanceError> {
    if name.is_default() {
        return Err(InstanceError::Protected(name.to_string(), "destroyed"));
    }
    Ok(())
}

/// What destroy did to the instance's data directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyOutcome {
    /// The operator declined; nothing changed.
    Aborted,
    /// Registration revoked.
    Destroyed {
        state_deleted: bool,
        workspace_deleted: bool,
    },
}
