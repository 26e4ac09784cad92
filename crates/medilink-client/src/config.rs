use serde::{Deserialize, Serialize};

fn default_auth_url() -> String {
    "http://localhost:4002".to_string()
}
fn default_patient_url() -> String {
    "http://localhost:4000".to_string()
}
fn default_doctor_url() -> String {
    "http://localhost:4001".to_string()
}
fn default_appointment_url() -> String {
    "http://localhost:4003".to_string()
}
fn default_session_dir() -> String {
    match std::env::var("HOME") {
        Ok(home) => format!("{}/.medilink", home),
        Err(_) => ".medilink".to_string(),
    }
}

/// Client configuration: one base address per backend service, plus where
/// the session is persisted. Service addresses are configuration, not
/// logic; every field has a local default so the file is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_patient_url")]
    pub patient_url: String,
    #[serde(default = "default_doctor_url")]
    pub doctor_url: String,
    #[serde(default = "default_appointment_url")]
    pub appointment_url: String,
    #[serde(default = "default_session_dir")]
    pub session_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: default_auth_url(),
            patient_url: default_patient_url(),
            doctor_url: default_doctor_url(),
            appointment_url: default_appointment_url(),
            session_dir: default_session_dir(),
        }
    }
}

/// Load client config from a YAML file with MEDILINK__ env var overrides.
pub fn load_config(path: &str) -> anyhow::Result<ClientConfig> {
    use anyhow::Context;
    let config: ClientConfig = config::Config::builder()
        .add_source(config::File::new(path, config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("MEDILINK")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build config from: {}", path))?
        .try_deserialize()
        .with_context(|| format!("Failed to deserialize config from: {}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
auth_url: "http://auth.internal:8080"
patient_url: "http://patients.internal:8080"
doctor_url: "http://doctors.internal:8080"
appointment_url: "http://appointments.internal:8080"
session_dir: "/var/lib/medilink"
"#;
        let config: ClientConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.auth_url, "http://auth.internal:8080");
        assert_eq!(config.session_dir, "/var/lib/medilink");
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let yaml = r#"
auth_url: "http://auth.internal:8080"
"#;
        let config: ClientConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.auth_url, "http://auth.internal:8080");
        assert_eq!(config.patient_url, "http://localhost:4000");
        assert_eq!(config.doctor_url, "http://localhost:4001");
        assert_eq!(config.appointment_url, "http://localhost:4003");
    }

    #[test]
    fn test_default_ports_match_the_platform_layout() {
        let config = ClientConfig::default();
        assert_eq!(config.auth_url, "http://localhost:4002");
        assert_eq!(config.patient_url, "http://localhost:4000");
        assert_eq!(config.doctor_url, "http://localhost:4001");
        assert_eq!(config.appointment_url, "http://localhost:4003");
    }

    /// Serialize access to env vars in tests to avoid races between parallel tests
    static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn test_env_override_doctor_url() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let yaml = r#"
doctor_url: "http://placeholder:1"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, yaml.as_bytes()).unwrap();
        std::io::Write::flush(&mut file).unwrap();

        std::env::set_var("MEDILINK__DOCTOR_URL", "http://doctors.internal:9090");

        let config = load_config(file.path().to_str().unwrap()).unwrap();

        std::env::remove_var("MEDILINK__DOCTOR_URL");

        assert_eq!(config.doctor_url, "http://doctors.internal:9090");
    }
}
