mod app;

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use student_portal::controller::ViewController;
use student_portal::login::{AcceptNonEmpty, Argon2Verifier, CredentialVerifier};
use student_portal::notify::RecordingSink;
use student_portal::profile::{JsonProfileStore, ProfileStore, StaticProfileStore};

/// Student academic portal in the terminal
#[derive(Parser, Debug)]
#[command(name = "portal")]
struct Args {
    /// JSON profile to read instead of the built-in demo student
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Only accept this student id (needs --password)
    #[arg(long, requires = "password")]
    student_id: Option<String>,

    /// Password for --student-id; hashed on start-up, never kept in clear
    #[arg(long, requires = "student_id")]
    password: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let store: Box<dyn ProfileStore> = match &args.profile {
        Some(path) => Box::new(JsonProfileStore::from_path(path)?),
        None => Box::new(StaticProfileStore),
    };

    // Without an explicit account any non-empty id and password get in
    let verifier: Box<dyn CredentialVerifier> = match (args.student_id, args.password) {
        (Some(id), Some(password)) => Box::new(Argon2Verifier::new(id, &password)?),
        _ => Box::new(AcceptNonEmpty),
    };

    let portal = ViewController::new(store, verifier, RecordingSink::new());
    app::run(portal)
}
