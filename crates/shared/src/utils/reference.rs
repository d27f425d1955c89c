use uuid::Uuid;

/// Generates a ledger reference: the first three groups of a time based UUID,
/// concatenated into 16 hex characters.
pub fn generate_reference() -> String {
    let node_id: [u8; 6] = rand::random();
    let uuid = Uuid::now_v1(&node_id).to_string();

    uuid.split('-').take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_sixteen_hex_chars() {
        let reference = generate_reference();
        assert_eq!(reference.len(), 16);
        assert!(reference.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn references_differ() {
        assert_ne!(generate_reference(), generate_reference());
    }
}
