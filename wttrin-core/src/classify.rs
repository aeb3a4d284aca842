//! Classification of fully-read text bodies.

use crate::defaults::OutageSignature;

/// True when the body is the service's outage page.
///
/// Both substrings must be present: ordinary forecasts can contain a long
/// rule of `=` on their own.
pub fn is_service_unavailable(body: &str, signature: &OutageSignature) -> bool {
    body.contains(&signature.rule) && body.contains(&signature.marker)
}

pub fn is_unknown_location(body: &str, marker: &str) -> bool {
    body.contains(marker)
}
