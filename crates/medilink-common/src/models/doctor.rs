use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Doctor record from the doctor directory service. Read-mostly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_deserialization() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Dr. Gregory House",
            "email": "house@example.com",
            "specialization": "Diagnostics",
            "licenseNumber": "MD-12345",
            "yearsOfExperience": 20
        }"#;
        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.specialization, "Diagnostics");
        assert_eq!(doctor.years_of_experience, Some(20));
        assert!(doctor.phone_number.is_none());
    }
}
