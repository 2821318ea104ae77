use crate::{
    db::{admins::Admins, db::Db},
    libs::{messages::Message, secret::prompt_new_password, view::View},
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// Create an administrator account
    Create {
        #[arg(short, long)]
        username: Option<String>,
        /// Prompted for (hidden) when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List administrator accounts
    List,
}

pub fn cmd(args: AdminArgs) -> Result<()> {
    let db = Db::new()?;
    let admins = Admins::new(&db.conn);

    match args.command {
        AdminCommand::Create { username, password } => {
            let username = match username {
                Some(username) => username,
                None => Input::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptAdminUsername.to_string())
                    .interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => prompt_new_password()?,
            };

            let admin = admins.create(&username, &password)?;
            msg_success!(Message::AdminCreated(admin.username));
        }
        AdminCommand::List => {
            let list = admins.list()?;
            if list.is_empty() {
                msg_warning!(Message::NoAdminsFound);
                return Ok(());
            }
            msg_print!(Message::AdminListHeader, true);
            View::admins(&list)?;
        }
    }

    Ok(())
}
