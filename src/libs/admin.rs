use serde::Serialize;

/// A stored administrator. Has no `Serialize` impl; expose [`AdminSummary`] instead.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// What listings and the backup workbook expose.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSummary {
    pub id: i64,
    pub username: String,
}

impl From<&Admin> for AdminSummary {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}
