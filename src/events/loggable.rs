use serde::{Deserialize, Serialize};

/// Severity of an activity event. Decides the log level the listener uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Deletions, state changes and organizational changes.
    Critical,
    #[default]
    Important,
    /// High-volume chatter such as comment edits.
    Noise,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Noise => "noise",
        }
    }
}

/// Records that can appear in the activity stream.
///
/// An implementor only names its entity type and key; [`super::log_activity`]
/// derives the event name and severity from them.
pub trait Loggable: Serialize + Send + Sync {
    /// Prefix of event names, e.g. `task` in `task.created`.
    fn entity_type() -> &'static str;

    /// Primary key of the record the event is about.
    fn subject_id(&self) -> i64;

    /// Baseline used for creations and edits of this entity.
    fn severity(&self) -> Severity {
        Severity::default()
    }

    /// Deletions are always critical, creations and edits take the
    /// baseline, anything else is important. Entities with richer
    /// actions override this.
    fn severity_for_action(&self, action: &str) -> Severity {
        if action == "deleted" {
            Severity::Critical
        } else if matches!(action, "created" | "updated") {
            self.severity()
        } else {
            Severity::Important
        }
    }
}
