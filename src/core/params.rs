use serde::{Deserialize, Serialize};

/// Run options for a conversion, suitable for config files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionParams {
    /// Keep converting the remaining matches when one file fails
    pub continue_on_error: bool,
    /// Resolve and list matches without writing anything
    pub dry_run: bool,
}
