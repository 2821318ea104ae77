//! Password hashing and prompting for administrator accounts.
//!
//! Passwords are stored as argon2 PHC strings with a random salt; plaintext
//! never reaches the database.

use crate::libs::error::{RecordError, RecordResult};
use crate::libs::messages::Message;
use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use dialoguer::{theme::ColorfulTheme, Password};

pub fn hash_password(password: &str) -> RecordResult<String> {
    if password.is_empty() {
        return Err(RecordError::validation(Message::PasswordEmpty));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RecordError::internal(Message::PasswordHashFailed(e.to_string())))
}

/// Checks `password` against a stored hash. A malformed hash never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

/// Asks twice for a hidden password on the terminal.
pub fn prompt_new_password() -> Result<String> {
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptAdminPassword.to_string())
        .with_confirmation(Message::PromptAdminPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;
    Ok(password)
}
