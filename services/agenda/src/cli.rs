//! Command-line front end
//!
//! Each command plays the part of one screen action: it rehydrates the state
//! it needs from the store, performs the action and prints the result.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use common::KeyValueStore;

use crate::agenda::Agenda;
use crate::error::{AgendaError, AgendaResult};
use crate::form::{EventForm, parse_time_display};
use crate::identity::IdentityStore;
use crate::models::{EventCategory, LoginCredentials, Registration};
use crate::repositories::EventRepository;

#[derive(Parser, Debug)]
#[command(name = "agenda", version, about = "Personal agenda backed by local storage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Log in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List registered users
    Users,
    /// Create an event
    Add(EventArgs),
    /// Edit an event
    Edit {
        id: String,
        #[command(flatten)]
        changes: EventArgs,
    },
    /// Delete an event
    Delete { id: String },
    /// List events: today, then upcoming, then past
    List,
    /// Delete all stored data
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct EventArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// reunion, estudio, personal or otro
    #[arg(long)]
    pub category: Option<EventCategory>,
    /// Day of the event (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Time of the event (`15:30` or `03:30 PM`)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,
    #[arg(long)]
    pub participants: Option<String>,
}

impl EventArgs {
    fn apply(self, form: &mut EventForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(category) = self.category {
            form.select_category(category);
        }
        if let Some(date) = self.date {
            form.select_date(local_midnight(date));
        }
        if let Some(time) = self.time {
            form.select_time(time);
        }
        if let Some(participants) = self.participants {
            form.participants = participants;
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("invalid date: {}", e))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    parse_time_display(value).ok_or_else(|| format!("invalid time `{}`", value))
}

/// Start of `date` in the local time zone
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Run one command against `store`
pub async fn run<S: KeyValueStore + Clone>(command: Command, store: S) -> AgendaResult<()> {
    let identity = IdentityStore::new(store.clone());

    match command {
        Command::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let registration = Registration {
                name,
                email,
                password,
                confirm_password: confirm,
            };
            let user_id = identity.register(&registration).await?;
            println!("Registered and logged in as {}", user_id);
        }
        Command::Login { email, password } => {
            let user_id = identity.login(&LoginCredentials { email, password }).await?;
            println!("Logged in as {}", user_id);
        }
        Command::Logout => {
            identity.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match identity.current_user().await? {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
            None => println!("Not logged in"),
        },
        Command::Users => {
            for user in identity.users().await? {
                println!("{}  {} <{}>", user.id, user.name, user.email);
            }
        }
        Command::Add(args) => {
            let mut agenda = load_agenda(&identity, store).await?;
            let mut form = EventForm::new(Local::now());
            args.apply(&mut form);
            let event = agenda.save(&form).await?;
            println!("Created event {}", event.id);
        }
        Command::Edit { id, changes } => {
            let mut agenda = load_agenda(&identity, store).await?;
            let mut form = agenda.edit_form(&id)?;
            changes.apply(&mut form);
            agenda.save(&form).await?;
            println!("Updated event {}", id);
        }
        Command::Delete { id } => {
            let mut agenda = load_agenda(&identity, store).await?;
            agenda.delete(&id).await?;
            println!("Deleted event {}", id);
        }
        Command::List => {
            let agenda = load_agenda(&identity, store).await?;
            let items = agenda.items(&Local::now());
            if items.is_empty() {
                println!("No events yet. Add one with `agenda add`.");
            }
            for item in items {
                let event = item.event;
                print!(
                    "[{:<6}] {}  {}  {}  {} ({})",
                    item.bucket,
                    event.id,
                    event.date.with_timezone(&Local).format("%a %d %b %Y"),
                    event.time,
                    event.title,
                    event.category
                );
                match &event.participants {
                    Some(participants) => println!(" with {}", participants),
                    None => println!(),
                }
            }
        }
        Command::Reset => {
            store.clear().await?;
            println!("All data deleted");
        }
    }

    Ok(())
}

async fn load_agenda<S: KeyValueStore + Clone>(
    identity: &IdentityStore<S>,
    store: S,
) -> AgendaResult<Agenda<S>> {
    let agenda = Agenda::load(EventRepository::new(store), identity.sessions()).await?;
    if agenda.user_id().is_none() {
        return Err(AgendaError::NotAuthenticated);
    }
    Ok(agenda)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "agenda",
            "add",
            "--title",
            "Team sync",
            "--category",
            "reunion",
            "--date",
            "2026-10-16",
            "--time",
            "3:30 PM",
        ])
        .unwrap();

        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.category, Some(EventCategory::Meeting));
                assert_eq!(args.time, NaiveTime::from_hms_opt(15, 30, 0));
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2026, 10, 16));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["agenda", "add", "--category", "party"]).is_err());
    }
}
