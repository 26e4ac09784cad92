use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Appointment lifecycle. SCHEDULED moves through CONFIRMED/RESCHEDULED and
/// IN_PROGRESS to COMPLETED, or to CANCELLED/NO_SHOW at any point before
/// completion. The client never derives status; it renders what the
/// appointment service asserts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    Rescheduled,
    NoShow,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Emergency,
    RoutineCheckup,
    SpecialistVisit,
    Vaccination,
    LabTest,
    Imaging,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date_time: NaiveDateTime,
    pub duration_minutes: u32,
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::NoShow).unwrap(),
            r#""NO_SHOW""#
        );
        let status: AppointmentStatus = serde_json::from_str(r#""IN_PROGRESS""#).unwrap();
        assert_eq!(status, AppointmentStatus::InProgress);
    }

    #[test]
    fn test_appointment_deserialization() {
        // LocalDateTime on the wire has no timezone suffix.
        let json = r#"{
            "id": 42,
            "patientId": 17,
            "doctorId": 3,
            "appointmentDateTime": "2025-09-01T10:30:00",
            "durationMinutes": 30,
            "type": "CONSULTATION",
            "status": "SCHEDULED",
            "notes": "Bring previous lab results"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.patient_id, 17);
        assert_eq!(appt.appointment_type, AppointmentType::Consultation);
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.appointment_date_time.to_string(), "2025-09-01 10:30:00");
    }
}
