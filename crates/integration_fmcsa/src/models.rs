//! FMCSA response models
//!
//! Types for the carrier lookup envelope returned by QCMobile.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Carrier record as reported by the registry
///
/// Fields the registry sends as numbers or booleans are kept as text;
/// `null` and missing fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(default, deserialize_with = "lenient_text")]
    pub legal_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dba_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub dot_number: Option<String>,
    /// `Y` when the carrier holds operating authority
    #[serde(default, deserialize_with = "lenient_text")]
    pub allowed_to_operate: Option<String>,
    /// `A` (active), `I` (inactive) or `N` (not authorized)
    #[serde(default, deserialize_with = "lenient_text")]
    pub status_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phy_street: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phy_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phy_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phy_zipcode: Option<String>,
}

/// Top-level lookup envelope
#[derive(Debug, Deserialize)]
pub(crate) struct CarrierEnvelope {
    #[serde(default)]
    content: Option<ContentField>,
}

/// `content` is normally a list, but single-record responses send an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentField {
    Many(Vec<ContentItem>),
    One(ContentItem),
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    carrier: Option<Carrier>,
}

impl CarrierEnvelope {
    /// Carrier of the first content entry, if any
    ///
    /// A carrier object with no fields set counts as absent.
    pub(crate) fn into_carrier(self) -> Option<Carrier> {
        let carrier = match self.content? {
            ContentField::Many(items) => items.into_iter().next()?.carrier,
            ContentField::One(item) => item.carrier,
        };
        carrier.filter(|c| c != &Carrier::default())
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
