//! Output configuration.

use serde::{Deserialize, Serialize};

/// Controls which columns the serializers emit.
///
/// The timestamp, author and text are always written. Calendar fields are
/// opt-in because they are derivable from the timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include year, month, weekday, hour, minute and period bucket
    pub include_time_fields: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_time_fields(mut self) -> Self {
        self.include_time_fields = true;
        self
    }
}
