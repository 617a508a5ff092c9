use schemars::JsonSchema;
use serde::{Serialize, Serializer};

/// One evaluated rule in the audit trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TraceEntry {
    pub rule: &'static str,
    pub passed: bool,
    pub details: String,
    pub article: &'static str,
}

/// Audit trace of an evaluation.
///
/// `Disabled` means the caller did not ask for a trace, which is distinct
/// from `Enabled` with no entries. Serializes as `null` or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Trace {
    #[default]
    Disabled,
    Enabled(Vec<TraceEntry>),
}

impl Trace {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Trace::Enabled(Vec::new())
        } else {
            Trace::Disabled
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Trace::Disabled)
    }

    /// Append an entry; a no-op when tracing is disabled
    pub fn record(
        &mut self,
        rule: &'static str,
        passed: bool,
        details: impl Into<String>,
        article: &'static str,
    ) {
        if let Trace::Enabled(entries) = self {
            entries.push(TraceEntry {
                rule,
                passed,
                details: details.into(),
                article,
            });
        }
    }

    pub fn entries(&self) -> Option<&[TraceEntry]> {
        match self {
            Trace::Disabled => None,
            Trace::Enabled(entries) => Some(entries),
        }
    }
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}
