use crate::{
    db::db::Db,
    libs::{
        export::{ExportFormat, Exporter},
        filter::DateWindow,
        formatter::format_date,
        messages::Message,
        summary::TrainingReport,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    from: String,
    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    to: String,
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ReportArgs) -> Result<()> {
    let window = DateWindow::parse(Some(&args.from), Some(&args.to))?;
    let db = Db::new()?;
    let report = TrainingReport::load(&db.conn, window)?;

    // Without a target file or format the report goes to the terminal.
    if args.output.is_none() && args.format.is_none() {
        let (start, end) = (format_date(window.start), format_date(window.end));
        if report.rows.is_empty() {
            msg_info!(Message::ReportEmpty(start, end));
            return Ok(());
        }
        msg_print!(Message::ReportHeader(start, end), true);
        return View::report(&report);
    }

    Exporter::new(args.output).write_report(&report, args.format.unwrap_or_default())?;
    Ok(())
}
