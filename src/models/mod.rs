//! Database models and DTOs for all domain entities.

pub mod owner;
pub mod pagination;
pub mod pet;
pub mod vet;
pub mod visit;

use validator::ValidationError;

/// Reject empty or whitespace-only text.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("").is_err());
        assert!(not_blank("\t \n").is_err());
        assert!(not_blank(" Leo ").is_ok());
    }
}
