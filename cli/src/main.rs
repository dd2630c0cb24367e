//! Terminal front-end for the pet record API.
//!
//! Each subcommand mounts one client screen, performs its action over HTTP,
//! and prints what the screen would show.

mod render;
mod transport;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use petclinic_core::{
    AddScreen, ListScreen, Navigation, RecordClient, RecordForm, Session, UpdateScreen,
};
use tracing_subscriber::EnvFilter;

use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "petclinic", about = "Manage pet clinic records")]
struct Cli {
    /// Base URL of the record API.
    #[arg(long, env = "PETCLINIC_URL", default_value = "http://localhost:3000", global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a pet record.
    Add(AddArgs),
    /// List all pet records.
    List,
    /// Show one record as the update form would.
    Show { id: String },
    /// Edit a record. Fields not given keep their loaded values.
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record and print the refreshed list.
    Delete { id: String },
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    pet_name: String,
    #[arg(long)]
    owner_name: String,
    #[arg(long, default_value = "")]
    pet_breed: String,
    #[arg(long, default_value = "")]
    pet_age: String,
    #[arg(long, default_value = "")]
    special_notes: String,
}

impl From<AddArgs> for RecordForm {
    fn from(args: AddArgs) -> Self {
        RecordForm {
            pet_name: args.pet_name,
            owner_name: args.owner_name,
            pet_breed: args.pet_breed,
            pet_age: args.pet_age,
            special_notes: args.special_notes,
        }
    }
}

#[derive(Debug, Args, Default)]
struct FieldArgs {
    #[arg(long)]
    pet_name: Option<String>,
    #[arg(long)]
    owner_name: Option<String>,
    #[arg(long)]
    pet_breed: Option<String>,
    #[arg(long)]
    pet_age: Option<String>,
    #[arg(long)]
    special_notes: Option<String>,
}

impl FieldArgs {
    /// Overwrite the form fields that were given on the command line.
    fn apply(self, form: &mut RecordForm) {
        let pairs = [
            (self.pet_name, &mut form.pet_name),
            (self.owner_name, &mut form.owner_name),
            (self.pet_breed, &mut form.pet_breed),
            (self.pet_age, &mut form.pet_age),
            (self.special_notes, &mut form.special_notes),
        ];
        for (value, field) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let mut session = Session::new(RecordClient::new(&cli.base_url), UreqTransport::new());

    match cli.command {
        Command::Add(args) => {
            let mut screen = AddScreen::new();
            screen.form = args.into();
            if let Err(err) = screen.submit(&mut session) {
                tracing::warn!(error = %err, "create failed");
                bail!("{}", screen.error().unwrap_or("Failed to add pet record"));
            }
            if let Some(notice) = screen.notice() {
                println!("{notice}");
            }
        }
        Command::List => {
            let mut screen = ListScreen::new();
            load_list(&mut screen, &mut session)?;
            print!("{}", render::record_table(screen.rows()));
        }
        Command::Show { id } => {
            let (screen, loaded) = UpdateScreen::open(&mut session, id);
            if let Err(err) = loaded {
                tracing::warn!(error = %err, "fetch failed");
                bail!("{}", screen.error().unwrap_or("Failed to fetch pet record"));
            }
            print!("{}", render::form(&screen.form));
        }
        Command::Update { id, fields } => {
            let (mut screen, loaded) = UpdateScreen::open(&mut session, id);
            if let Err(err) = loaded {
                tracing::warn!(error = %err, "fetch failed");
                bail!("{}", screen.error().unwrap_or("Failed to fetch pet record"));
            }
            fields.apply(&mut screen.form);
            match screen.submit(&mut session) {
                Navigation::ToList => {
                    println!("Pet record updated successfully!");
                    let mut list = ListScreen::new();
                    load_list(&mut list, &mut session)?;
                    print!("{}", render::record_table(list.rows()));
                }
                Navigation::Stay => {
                    if let Some(cause) = screen.cause() {
                        tracing::warn!(cause, "update failed");
                    }
                    bail!("{}", screen.error().unwrap_or("Failed to update pet record"));
                }
            }
        }
        Command::Delete { id } => {
            let mut screen = ListScreen::new();
            screen
                .delete(&mut session, &id)
                .with_context(|| screen_error(&screen))?;
            print!("{}", render::record_table(screen.rows()));
        }
    }

    Ok(())
}

fn load_list(screen: &mut ListScreen, session: &mut Session<UreqTransport>) -> anyhow::Result<()> {
    screen.load(session).with_context(|| screen_error(screen))
}

fn screen_error(screen: &ListScreen) -> String {
    screen
        .error()
        .unwrap_or("Failed to fetch pet records")
        .to_string()
}
