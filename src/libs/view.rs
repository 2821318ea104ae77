use super::admin::AdminSummary;
use super::formatter::format_hours;
use super::summary::TrainingReport;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn report(report: &TrainingReport) -> anyhow::Result<()> {
        let mut table = Table::new();

        table.add_row(row!["NO", "FULL NAME", "BIRTH DATE", "POSITION", "DEPARTMENT", "TRAINING TYPES", "HOURS"]);
        for row in &report.rows {
            table.add_row(row![
                row.no,
                row.full_name,
                row.birth_date.as_deref().unwrap_or_default(),
                row.position.as_deref().unwrap_or_default(),
                row.department.as_deref().unwrap_or_default(),
                row.training_types,
                r->format_hours(row.total_hours)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn admins(admins: &[AdminSummary]) -> anyhow::Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME"]);
        for admin in admins {
            table.add_row(row![admin.id, admin.username]);
        }
        table.printstd();

        Ok(())
    }

    /// Applied migrations as `(version, name, applied_at)`.
    pub fn migrations(history: &[(u32, String, String)]) -> anyhow::Result<()> {
        let mut table = Table::new();

        table.add_row(row!["VERSION", "NAME", "APPLIED AT"]);
        for (version, name, applied_at) in history {
            table.add_row(row![r->version, name, applied_at]);
        }
        table.printstd();

        Ok(())
    }
}
