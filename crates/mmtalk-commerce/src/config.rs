//! Option sheet configuration.

use serde::{Deserialize, Serialize};

use crate::money::Currency;
use crate::sheet::DismissThresholds;

/// Maximum quantity allowed per selection line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Prompt shown in place of the optional-group selector until a required
/// option has been chosen.
pub const DEFAULT_REQUIRED_PROMPT: &str = "필수옵션 선택 시 구매 가능합니다";

/// Configuration for a product detail session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Drag-to-dismiss thresholds.
    #[serde(default)]
    pub dismiss: DismissThresholds,

    /// Upper bound for a single line's quantity.
    #[serde(default = "default_max_quantity")]
    pub max_quantity_per_line: i64,

    /// Currency the catalog prices in.
    #[serde(default)]
    pub currency: Currency,

    /// Text shown on the gated optional selector.
    #[serde(default = "default_required_prompt")]
    pub required_prompt: String,
}

fn default_max_quantity() -> i64 {
    MAX_QUANTITY_PER_LINE
}

fn default_required_prompt() -> String {
    DEFAULT_REQUIRED_PROMPT.to_string()
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            dismiss: DismissThresholds::default(),
            max_quantity_per_line: default_max_quantity(),
            currency: Currency::default(),
            required_prompt: default_required_prompt(),
        }
    }
}
