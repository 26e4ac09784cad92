use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use medilink_client::config::{load_config, ClientConfig};
use medilink_client::dashboard::DashboardAggregator;
use medilink_client::error::ReconcileError;
use medilink_client::flow::AuthFlow;
use medilink_client::gateway::Gateway;
use medilink_client::reconcile::IdentityReconciler;
use medilink_client::routing::route;
use medilink_client::services::{
    AppointmentClient, AuthClient, DoctorClient, MedicalRecordClient, PatientClient,
};
use medilink_client::session::SessionStore;
use medilink_common::models::auth::{RegisterRequest, Role, Session};
use medilink_common::models::patient::PatientUpdate;

#[derive(Parser)]
#[command(name = "medilink", version, about = "MediLink - patient portal client")]
struct Cli {
    /// Path to a YAML config file; defaults apply when absent
    #[arg(long, env = "MEDILINK_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (and, for patients, a profile)
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// PATIENT or DOCTOR
        #[arg(long, default_value = "PATIENT")]
        role: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Aggregate the patient dashboard
    Dashboard,
    /// List all doctors
    Doctors,
    /// List upcoming appointments
    Appointments {
        /// Include past appointments
        #[arg(long)]
        all: bool,
    },
    /// List medical records
    Records {
        /// Print only the record count
        #[arg(long)]
        count: bool,
    },
    /// Show or update the patient profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

/// Everything wired against one config: the session store, the gateway and
/// the per-service clients.
struct Services {
    store: Arc<SessionStore>,
    auth: Arc<AuthClient>,
    patients: Arc<PatientClient>,
    doctors: Arc<DoctorClient>,
    appointments: Arc<AppointmentClient>,
    records: MedicalRecordClient,
}

impl Services {
    fn build(config: &ClientConfig) -> Self {
        let store = Arc::new(SessionStore::file_backed(&config.session_dir));
        let gateway = Gateway::new(Arc::clone(&store));
        Self {
            store,
            auth: Arc::new(AuthClient::new(&config.auth_url)),
            patients: Arc::new(PatientClient::new(gateway.clone(), &config.patient_url)),
            doctors: Arc::new(DoctorClient::new(gateway.clone(), &config.doctor_url)),
            appointments: Arc::new(AppointmentClient::new(
                gateway.clone(),
                &config.appointment_url,
            )),
            records: MedicalRecordClient::new(gateway, &config.patient_url),
        }
    }

    fn flow(&self) -> AuthFlow {
        AuthFlow::new(
            Arc::clone(&self.auth) as _,
            Arc::clone(&self.store),
            Arc::clone(&self.patients) as _,
        )
    }

    fn reconciler(&self) -> IdentityReconciler {
        IdentityReconciler::new(Arc::clone(&self.patients) as _)
    }

    fn require_session(&self) -> Result<Session> {
        self.store
            .current()
            .context("Not logged in. Run `medilink login` first.")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    let services = Services::build(&config);

    match cli.command {
        Commands::Login { username, password } => {
            cmd_login(&services, &username, &password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let draft = RegisterRequest {
                username,
                email,
                password,
                first_name,
                last_name,
                role: role.parse::<Role>()?,
            };
            cmd_register(&services, draft).await?;
        }
        Commands::Logout => {
            services.store.clear();
            println!("Logged out.");
        }
        Commands::Whoami => {
            cmd_whoami(&services)?;
        }
        Commands::Dashboard => {
            cmd_dashboard(&services).await?;
        }
        Commands::Doctors => {
            cmd_doctors(&services).await?;
        }
        Commands::Appointments { all } => {
            cmd_appointments(&services, all).await?;
        }
        Commands::Records { count } => {
            cmd_records(&services, count).await?;
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Show => cmd_profile_show(&services).await?,
            ProfileCommands::Update {
                name,
                email,
                address,
            } => {
                cmd_profile_update(
                    &services,
                    PatientUpdate {
                        name,
                        email,
                        address,
                        date_of_birth: None,
                    },
                )
                .await?
            }
        },
    }

    Ok(())
}

async fn cmd_login(services: &Services, username: &str, password: &str) -> Result<()> {
    let session = services.flow().login(username, password).await?;
    println!(
        "Logged in as {} ({})",
        session.display_name(),
        session.role.as_str()
    );
    println!("Next: {}", route(session.role).as_str());
    Ok(())
}

async fn cmd_register(services: &Services, draft: RegisterRequest) -> Result<()> {
    let registration = services.flow().register(draft).await?;
    println!(
        "Account created for {} ({})",
        registration.session.username,
        registration.session.role.as_str()
    );
    // Give the best-effort profile write a chance to finish before the
    // process exits; its failure is already logged and never fatal.
    if let Some(task) = registration.profile_task {
        let _ = task.await;
    }
    println!("Next: {}", route(registration.session.role).as_str());
    Ok(())
}

fn cmd_whoami(services: &Services) -> Result<()> {
    match services.store.current() {
        Some(session) => {
            println!("User:  {}", session.username);
            println!("Name:  {}", session.display_name());
            println!("Email: {}", session.email);
            println!("Role:  {}", session.role.as_str());
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

async fn cmd_dashboard(services: &Services) -> Result<()> {
    let session = services.require_session()?;
    let aggregator = DashboardAggregator::new(
        Arc::clone(&services.patients) as _,
        Arc::clone(&services.doctors) as _,
        Arc::clone(&services.appointments) as _,
    );

    let dashboard = aggregator.load(&session).await;
    println!("Welcome back, {}!", session.display_name());
    for line in dashboard.summary() {
        println!("  {}", line);
    }

    if let Some(appointments) = dashboard.appointments.loaded() {
        if !appointments.is_empty() {
            println!("\nUpcoming:");
            for appt in appointments {
                println!(
                    "  {}  {:?} ({} min, {:?})",
                    appt.appointment_date_time,
                    appt.appointment_type,
                    appt.duration_minutes,
                    appt.status
                );
            }
        }
    }
    Ok(())
}

async fn cmd_doctors(services: &Services) -> Result<()> {
    services.require_session()?;
    let doctors = services.doctors.list_all().await?;

    if doctors.is_empty() {
        println!("No doctors found.");
        return Ok(());
    }

    println!("{:30} {:25} EXPERIENCE", "NAME", "SPECIALIZATION");
    println!("{}", "-".repeat(70));
    for doctor in doctors {
        let years = doctor
            .years_of_experience
            .map(|y| format!("{} years", y))
            .unwrap_or_else(|| "-".to_string());
        println!("{:30} {:25} {}", doctor.name, doctor.specialization, years);
    }
    Ok(())
}

async fn cmd_appointments(services: &Services, all: bool) -> Result<()> {
    let session = services.require_session()?;
    let patient = match services.reconciler().resolve(&session).await {
        Ok(patient) => patient,
        Err(ReconcileError::ProfileNotFound { .. }) => {
            println!("No patient profile yet; nothing is booked.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let appointments = if all {
        services.appointments.all_for_patient(&patient.id).await?
    } else {
        services.appointments.upcoming_for_patient(&patient.id).await?
    };
    if appointments.is_empty() {
        println!("No appointments found.");
        return Ok(());
    }

    println!("{:20} {:18} {:12} NOTES", "WHEN", "TYPE", "STATUS");
    println!("{}", "-".repeat(70));
    for appt in appointments {
        println!(
            "{:20} {:18} {:12} {}",
            appt.appointment_date_time.to_string(),
            format!("{:?}", appt.appointment_type),
            format!("{:?}", appt.status),
            appt.notes.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn cmd_records(services: &Services, count_only: bool) -> Result<()> {
    let session = services.require_session()?;
    let patient = match services.reconciler().resolve(&session).await {
        Ok(patient) => patient,
        Err(ReconcileError::ProfileNotFound { .. }) => {
            println!("No patient profile yet; no medical records.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if count_only {
        let count = services.records.count_for_patient(&patient.id).await?;
        println!("{} medical record(s)", count);
        return Ok(());
    }

    let records = services.records.for_patient(&patient.id).await?;
    if records.is_empty() {
        println!("No medical records found.");
        return Ok(());
    }

    for record in records {
        let date = record
            .record_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("[{}] {}", date, record.attending_doctor.as_deref().unwrap_or("-"));
        if let Some(complaint) = record.chief_complaint.as_deref() {
            println!("  Complaint: {}", complaint);
        }
        if let Some(plan) = record.treatment_plan.as_deref() {
            println!("  Plan:      {}", plan);
        }
    }
    Ok(())
}

async fn cmd_profile_show(services: &Services) -> Result<()> {
    let session = services.require_session()?;
    match services.reconciler().resolve(&session).await {
        Ok(patient) => {
            println!("Name:       {}", patient.name);
            println!("Email:      {}", patient.email);
            println!("Address:    {}", patient.address.as_deref().unwrap_or("-"));
            println!(
                "Born:       {}",
                patient
                    .date_of_birth
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
        }
        Err(ReconcileError::ProfileNotFound { .. }) => {
            println!("No patient profile yet. It may still be provisioning.");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

async fn cmd_profile_update(services: &Services, update: PatientUpdate) -> Result<()> {
    let session = services.require_session()?;
    let patient = services
        .reconciler()
        .resolve(&session)
        .await
        .context("Cannot update a profile that does not exist yet")?;

    let updated = services.patients.update(&patient.id, &update).await?;
    println!("Profile updated for {}.", updated.name);
    Ok(())
}
