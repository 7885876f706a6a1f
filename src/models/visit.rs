//! Visits booked for a pet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Visit {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub visit_date: Option<NaiveDate>,
    pub description: String,
}

/// Payload for booking a visit. The date defaults to today when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VisitForm {
    pub date: Option<NaiveDate>,
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_rejected() {
        let form = VisitForm {
            date: None,
            description: " \t".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn long_description_is_rejected() {
        let mut form = VisitForm {
            date: None,
            description: "d".repeat(255),
        };
        assert!(form.validate().is_ok());

        form.description.push('d');
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field_errors()["description"][0].code, "length");
    }

    #[test]
    fn date_is_optional() {
        let form: VisitForm = serde_json::from_str(r#"{"description":"rabies shot"}"#).unwrap();
        assert!(form.date.is_none());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn date_parses_iso_format() {
        let form: VisitForm =
            serde_json::from_str(r#"{"date":"2013-01-02","description":"neutered"}"#).unwrap();
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2013, 1, 2));
    }
}
