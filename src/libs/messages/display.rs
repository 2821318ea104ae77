//! Display implementation for cmetrack application messages.
//!
//! Every user-facing string lives here: HTTP error bodies, CLI feedback, log
//! lines and the fixed wording printed on certificates. Call sites only ever
//! build a [`Message`] variant and let `Display` produce the text.
//!
//! ```rust
//! use cmetrack::libs::messages::Message;
//!
//! assert_eq!(Message::EmployeeNotFound(7).to_string(), "Employee 7 not found");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === EMPLOYEE MESSAGES ===
            Message::EmployeeNotFound(id) => format!("Employee {} not found", id),
            Message::EmployeeNameRequired => "Employee full name is required".to_string(),
            Message::EmployeeCreated(name) => format!("Employee '{}' created", name),
            Message::EmployeeDeleted => "Employee deleted successfully".to_string(),
            Message::EmployeesImported(count) => format!("Successfully imported {} employees", count),
            Message::ImportInvalidFormat => "Invalid data format: 'employees' must be an array".to_string(),
            Message::ImportRowInvalid(row, reason) => format!("Import row {} is invalid: {}", row, reason),

            // === TRAINING MESSAGES ===
            Message::TrainingNotFound(id) => format!("Training record {} not found", id),
            Message::TrainingTypeRequired => "Training type is required".to_string(),
            Message::TrainingDeleted => "Training record deleted successfully".to_string(),
            Message::InvalidTotalHour(value) => format!("Total hours '{}' is not a number", value),
            Message::NegativeTotalHour(value) => format!("Total hours cannot be negative (got {})", value),
            Message::InvalidDate(value) => format!("'{}' is not a valid date (expected YYYY-MM-DD or RFC 3339)", value),
            Message::InvalidDateWindow(start, end) => format!("Start date {} is after end date {}", start, end),
            Message::ReportWindowRequired => "Both startDate and endDate are required".to_string(),

            // === ADMIN & SESSION MESSAGES ===
            Message::AdminCreated(username) => format!("Admin '{}' created", username),
            Message::AdminUsernameRequired => "Admin username is required".to_string(),
            Message::AdminListHeader => "Administrators:".to_string(),
            Message::NoAdminsFound => "No administrators found. Create one with `cmetrack admin create`.".to_string(),
            Message::InvalidCredentials => "Invalid username or password".to_string(),
            Message::SessionRequired => "Please log in first".to_string(),
            Message::SessionExpired => "Session expired".to_string(),
            Message::SessionInvalid(reason) => format!("Invalid session: {}", reason),
            Message::SessionIssueFailed(reason) => format!("Failed to issue session token: {}", reason),
            Message::LoggedOut => "Logged out".to_string(),
            Message::PasswordHashFailed(reason) => format!("Failed to hash password: {}", reason),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::PasswordEmpty => "Password cannot be empty".to_string(),
            Message::JwtSecretMissing => {
                "CMETRACK_JWT_SECRET is not set; using a random secret, sessions end when the server restarts".to_string()
            }
            Message::PromptAdminUsername => "Admin username".to_string(),
            Message::PromptAdminPassword => "Admin password".to_string(),
            Message::PromptAdminPasswordConfirm => "Repeat password".to_string(),

            // === EXPORT MESSAGES ===
            Message::BackupSaved(path) => format!("Backup saved to {}", path),
            Message::ReportSaved(path) => format!("Training report saved to {}", path),
            Message::ReportHeader(start, end) => format!("Training report from {} to {}", start, end),
            Message::ReportEmpty(start, end) => format!("No training data between {} and {}", start, end),
            Message::ExportFailed(reason) => format!("Export failed: {}", reason),

            // === CERTIFICATE MESSAGES ===
            Message::CertificateTitle => "CERTIFICATE".to_string(),
            Message::CertificateSubtitle => "OF PARTICIPATION IN CONTINUING MEDICAL EDUCATION".to_string(),
            Message::CertificateRecipient(name) => format!("This certifies that: {}", name),
            Message::CertificateBirthDate(date) => format!("Date of birth: {}", date),
            Message::CertificateWorkplace(org) => format!("Workplace: {}", org),
            Message::CertificateCompleted => "Has completed continuing medical education as follows:".to_string(),
            Message::CertificateNoData => "No training data in the selected range".to_string(),
            Message::CertificateTotalRow => "Total".to_string(),
            Message::CertificateTimeSpan(start, end) => format!("From {} to {}", start, end),
            Message::CertificateRangeBoth(start, end) => format!("from {} to {}", start, end),
            Message::CertificateRangeFrom(start) => format!("from {}", start),
            Message::CertificateRangeTo(end) => format!("to {}", end),
            Message::CertificateSummary(range, hours) => {
                if range.is_empty() {
                    format!("Total continuing education: {} credit hours", hours)
                } else {
                    format!("Total continuing education {}: {} credit hours", range, hours)
                }
            }
            Message::CertificateDateLine(city, day, month, year) => format!("{}, {:02}/{:02}/{}", city, day, month, year),
            Message::CertificateColumnNo => "No.".to_string(),
            Message::CertificateColumnType => "Training type".to_string(),
            Message::CertificateColumnContent => "Content".to_string(),
            Message::CertificateColumnOrganizer => "Organizer".to_string(),
            Message::CertificateColumnTime => "Time".to_string(),
            Message::CertificateColumnHours => "Credit hours".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerStarting(addr) => format!("Training records server listening on http://{}", addr),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::DatabaseOpened(path) => format!("Database opened at {}", path),
            Message::DatabaseClosed => "Database connection closed".to_string(),
            Message::InvalidRequestBody(reason) => format!("Invalid request: {}", reason),
            Message::InternalError(reason) => format!("Internal error: {}", reason),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError(reason) => format!("Failed to parse configuration: {}", reason),
            Message::CertificateSettingsHeader => "Certificate settings".to_string(),
            Message::PromptServerHost => "Server host".to_string(),
            Message::PromptServerPort => "Server port".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::PromptOrganization => "Organization printed on certificates".to_string(),
            Message::PromptParentOrganization => "Parent authority printed above it".to_string(),
            Message::PromptCity => "City for the certificate date line".to_string(),
            Message::PromptSignatory => "Signatory title".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };

        write!(f, "{}", text)
    }
}
