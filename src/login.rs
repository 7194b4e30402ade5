use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::profile::{AcademicProfile, StudentIdentity};

/// Decides whether a student id and password may sign in
///
/// The controller only ever sees this trait, so no secret is embedded in
/// the view logic.
pub trait CredentialVerifier {
    fn verify(&self, student_id: &str, password: &str) -> bool;
}

impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Box<T> {
    fn verify(&self, student_id: &str, password: &str) -> bool {
        (**self).verify(student_id, password)
    }
}

/// Accepts any pair where both fields are filled in
///
/// This is the demonstration portal's behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptNonEmpty;

impl CredentialVerifier for AcceptNonEmpty {
    fn verify(&self, student_id: &str, password: &str) -> bool {
        !student_id.is_empty() && !password.is_empty()
    }
}

/// Accepts exactly one student id, checking the password against an Argon2 hash
///
/// Only the hash is kept after construction.
#[derive(Clone, Debug)]
pub struct Argon2Verifier {
    student_id: String,
    password_hash: String,
}

impl Argon2Verifier {
    /// Hash `password` and bind it to `student_id`
    ///
    /// # Errors
    /// * Returns an error if the password hashing fails
    pub fn new(student_id: impl Into<String>, password: &str) -> Result<Self, String> {
        Ok(Argon2Verifier {
            student_id: student_id.into(),
            password_hash: hash_password(password)?,
        })
    }

    /// Use a PHC-format hash produced elsewhere
    ///
    /// # Errors
    /// * Returns an error if the hash is not in PHC format
    pub fn from_hash(student_id: impl Into<String>, hash: impl Into<String>) -> Result<Self, String> {
        let password_hash = hash.into();
        if PasswordHash::new(&password_hash).is_err() {
            return Err("Invalid password hash format".to_string());
        }
        Ok(Argon2Verifier {
            student_id: student_id.into(),
            password_hash,
        })
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, student_id: &str, password: &str) -> bool {
        if student_id != self.student_id {
            return false;
        }
        match verify_password(password, &self.password_hash) {
            Ok(matched) => matched,
            Err(e) => {
                log::warn!("credential check failed: {}", e);
                false
            }
        }
    }
}

/// Hash a password using Argon2id with a random salt
///
/// # Errors
/// * Returns an error if the password hashing fails
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    match argon2.hash_password(password.as_bytes(), &salt) {
        Ok(hash) => Ok(hash.to_string()),
        Err(_) => Err("Password hashing failed".to_string()),
    }
}

/// Check a plaintext password against a stored Argon2 hash
///
/// # Errors
/// * Returns an error if the hash is in an invalid format
fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(_) => return Err("Invalid password hash format".to_string()),
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// An authenticated stay in the portal
///
/// Lives only in memory; logging out drops it.
#[derive(Clone, Debug)]
pub struct Session {
    pub id: Uuid,
    pub identity: StudentIdentity,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for `student_id`
    ///
    /// Name and programme come from the profile; the id is the one typed in.
    pub fn start(student_id: &str, profile: &AcademicProfile) -> Self {
        Session {
            id: Uuid::new_v4(),
            identity: StudentIdentity {
                name: profile.identity.name.clone(),
                student_id: student_id.to_string(),
                program: profile.identity.program.clone(),
            },
            started_at: Utc::now(),
        }
    }
}
