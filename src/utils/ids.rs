//! Entry identifier utilities

use uuid::Uuid;

/// Generate a new random entry identifier
pub fn generate_entry_id() -> Uuid {
    Uuid::new_v4()
}

/// Format an identifier the way references spell it: 32 upper-case hex digits, no dashes
pub fn uuid_to_hex(id: &Uuid) -> String {
    id.simple().to_string().to_uppercase()
}
