use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient profile held by the patient service.
///
/// Keyed by the patient service's own id, not the auth account id; the two
/// are only ever correlated by email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_date: Option<NaiveDate>,
}

/// Body for creating a patient profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub name: String,
    pub email: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub registered_date: NaiveDate,
}

/// Partial update for an existing profile; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_deserializes_with_missing_optionals() {
        let json = r#"{"id": "17", "name": "Jane Doe", "email": "jdoe@example.com"}"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.id, "17");
        assert!(patient.address.is_none());
        assert!(patient.date_of_birth.is_none());
    }

    #[test]
    fn test_patient_draft_wire_format() {
        let draft = PatientDraft {
            name: "Jane Doe".to_string(),
            email: "jdoe@example.com".to_string(),
            address: "Not provided".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            registered_date: NaiveDate::from_ymd_opt(2025, 8, 25).unwrap(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-01-01");
        assert_eq!(json["registeredDate"], "2025-08-25");
    }

    #[test]
    fn test_patient_update_skips_absent_fields() {
        let update = PatientUpdate {
            address: Some("12 Main St".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["address"], "12 Main St");
        assert!(json.get("name").is_none());
        assert!(json.get("dateOfBirth").is_none());
    }
}
