use serde::{Deserialize, Serialize};

/// Metadata describing which campaign link caused an app open.
///
/// Cached briefly (24 hours by default) so a later session can attribute
/// opens and report them; see `LocalStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionInfo {
    /// The campaign that sent the link.
    pub campaign_id: i64,
    /// The template within the campaign.
    pub template_id: i64,
    /// The individual message that was clicked.
    pub message_id: String,
}

impl AttributionInfo {
    /// Create a new attribution record.
    pub fn new(campaign_id: i64, template_id: i64, message_id: impl Into<String>) -> Self {
        AttributionInfo {
            campaign_id,
            template_id,
            message_id: message_id.into(),
        }
    }
}
