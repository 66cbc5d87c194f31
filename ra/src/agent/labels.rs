//! Approval-choice labels
//!
//! Listing choices shown to the user carry the listing id in a trailing
//! `(id: ...)` marker so answers can be mapped back to listings without
//! guessing from addresses.

use crate::domain::Listing;

/// Render a numbered approval choice for a listing
pub fn approval_label(index: usize, listing: &Listing) -> String {
    format!(
        "[{}] {} — {} (id: {})",
        index,
        listing.address,
        listing.display_price(),
        listing.id
    )
}

/// Extract the listing id from an approval label, if it carries one
pub fn listing_id_from_label(label: &str) -> Option<&str> {
    let marker = " (id: ";
    let start = label.rfind(marker)? + marker.len();
    let rest = &label[start..];
    let end = rest.find(')')?;
    let id = &rest[..end];
    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_round_trip() {
        let listing = Listing::from_value(json!({
            "id": "R2801234",
            "title": "123 Main St",
            "url": "https://example.com/1",
            "address": "123 Main St, Vancouver",
            "price": 2500.0,
            "bedrooms": 2,
        }))
        .unwrap();

        let label = approval_label(1, &listing);
        assert_eq!(label, "[1] 123 Main St, Vancouver — $2,500 (id: R2801234)");
        assert_eq!(listing_id_from_label(&label), Some("R2801234"));
    }

    #[test]
    fn test_free_text_has_no_id() {
        assert_eq!(listing_id_from_label("just book them all"), None);
        assert_eq!(listing_id_from_label("trailing (id: )"), None);
    }

    #[test]
    fn test_parentheses_in_address() {
        let label = "[2] 9 Oak Ave (rear unit) — $1,900 (id: R99)";
        assert_eq!(listing_id_from_label(label), Some("R99"));
    }
}
