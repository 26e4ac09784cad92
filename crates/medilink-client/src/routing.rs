use medilink_common::models::auth::Role;

/// Where a freshly authenticated user lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    PatientDashboard,
    DoctorDashboard,
    AdminDashboard,
}

impl Destination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::PatientDashboard => "patient-dashboard",
            Destination::DoctorDashboard => "doctor-dashboard",
            Destination::AdminDashboard => "admin-dashboard",
        }
    }
}

/// Total role dispatch. Unknown roles are deliberately down-routed to the
/// patient experience, never rejected.
pub fn route(role: Role) -> Destination {
    match role {
        Role::Doctor => Destination::DoctorDashboard,
        Role::Admin => Destination::AdminDashboard,
        Role::Patient | Role::Unknown => Destination::PatientDashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_is_total_and_deterministic() {
        assert_eq!(route(Role::Doctor).as_str(), "doctor-dashboard");
        assert_eq!(route(Role::Admin).as_str(), "admin-dashboard");
        assert_eq!(route(Role::Patient).as_str(), "patient-dashboard");
        assert_eq!(route(Role::Unknown).as_str(), "patient-dashboard");
    }

    #[test]
    fn test_unrecognized_wire_role_down_routes_to_patient() {
        let role: Role = serde_json::from_str(r#""AUDITOR""#).unwrap();
        assert_eq!(route(role), Destination::PatientDashboard);
    }
}
