#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === EMPLOYEE MESSAGES ===
    EmployeeNotFound(i64),
    EmployeeNameRequired,
    EmployeeCreated(String),
    EmployeeDeleted,
    EmployeesImported(usize),
    ImportInvalidFormat,
    ImportRowInvalid(usize, String),

    // === TRAINING MESSAGES ===
    TrainingNotFound(i64),
    TrainingTypeRequired,
    TrainingDeleted,
    InvalidTotalHour(String),
    NegativeTotalHour(f64),
    InvalidDate(String),
    InvalidDateWindow(String, String),
    ReportWindowRequired,

    // === ADMIN & SESSION MESSAGES ===
    AdminCreated(String),
    AdminUsernameRequired,
    AdminListHeader,
    NoAdminsFound,
    InvalidCredentials,
    SessionRequired,
    SessionExpired,
    SessionInvalid(String),
    SessionIssueFailed(String),
    LoggedOut,
    PasswordHashFailed(String),
    PasswordMismatch,
    PasswordEmpty,
    JwtSecretMissing,
    PromptAdminUsername,
    PromptAdminPassword,
    PromptAdminPasswordConfirm,

    // === EXPORT MESSAGES ===
    BackupSaved(String),
    ReportSaved(String),
    ReportHeader(String, String),
    ReportEmpty(String, String),
    ExportFailed(String),

    // === CERTIFICATE MESSAGES ===
    CertificateTitle,
    CertificateSubtitle,
    CertificateRecipient(String),
    CertificateBirthDate(String),
    CertificateWorkplace(String),
    CertificateCompleted,
    CertificateNoData,
    CertificateTotalRow,
    CertificateTimeSpan(String, String),
    CertificateRangeBoth(String, String),
    CertificateRangeFrom(String),
    CertificateRangeTo(String),
    CertificateSummary(String, String),
    CertificateDateLine(String, u32, u32, i32),
    CertificateColumnNo,
    CertificateColumnType,
    CertificateColumnContent,
    CertificateColumnOrganizer,
    CertificateColumnTime,
    CertificateColumnHours,

    // === SERVER MESSAGES ===
    ServerStarting(String),
    ServerStopped,
    DatabaseOpened(String),
    DatabaseClosed,
    InvalidRequestBody(String),
    InternalError(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError(String),
    CertificateSettingsHeader,
    PromptServerHost,
    PromptServerPort,
    PromptDatabasePath,
    PromptOrganization,
    PromptParentOrganization,
    PromptCity,
    PromptSignatory,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
