use crate::{
    cli::read_command,
    prelude::{
        AppError, Contact, ContactPatch, ContactStore, FieldValue, JsonStorage, Storage,
        command::{Cli, Commands},
    },
};
use clap::Parser;
use dotenv::dotenv;
use log::debug;
use std::io::{self, BufRead, Write};

pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    let stdin = io::stdin();
    execute(cli, io::stdout(), stdin.lock())
}

/// Runs one parsed command against the phone book file named in `cli`.
pub fn execute<W: Write, R: BufRead>(cli: Cli, out: W, input: R) -> Result<(), AppError> {
    let storage = JsonStorage::new(&cli.file);
    debug!("Using phone book {}", storage.path.display());

    let mut store = ContactStore::with_output(storage, out).underflow(cli.underflow);

    match cli.command {
        Commands::Init { force } => {
            let created = store.storage().init(force)?;
            let path = store.storage().path.clone();
            if created {
                writeln!(store.output_mut(), "Created empty phone book at {}", path.display())?;
            } else {
                writeln!(
                    store.output_mut(),
                    "Phone book {} already exists, use --force to overwrite it",
                    path.display()
                )?;
            }
            Ok(())
        }

        Commands::List { page } => {
            store.goto_page(page)?;
            Ok(())
        }

        Commands::Add {
            name,
            lastname,
            surname,
            organization,
            work_phone,
            personal_phone,
        } => {
            let new_contact = Contact {
                name: name.map(FieldValue::from),
                lastname: lastname.map(FieldValue::from),
                surname: surname.map(FieldValue::from),
                organization: organization.map(FieldValue::from),
                work_phone_number: work_phone.map(FieldValue::from),
                personal_number: personal_phone.map(FieldValue::from),
                ..Contact::default()
            };

            store.create(new_contact)?;
            writeln!(store.output_mut(), "Contact added successfully")?;
            Ok(())
        }

        Commands::Find { values } => {
            let queries: Vec<FieldValue> = values.into_iter().map(FieldValue::from).collect();
            store.find(&queries)?;
            Ok(())
        }

        Commands::Update {
            name,
            lastname,
            new_name,
            new_lastname,
            new_surname,
            new_organization,
            new_work_phone,
            new_personal_phone,
        } => {
            let patch = ContactPatch {
                name: new_name.map(FieldValue::from),
                lastname: new_lastname.map(FieldValue::from),
                surname: new_surname.map(FieldValue::from),
                organization: new_organization.map(FieldValue::from),
                work_phone_number: new_work_phone.map(FieldValue::from),
                personal_number: new_personal_phone.map(FieldValue::from),
            };

            if patch.is_empty() {
                return Err(AppError::Validation(
                    "Provide at least one --new-* field to update".to_string(),
                ));
            }

            store.update(&name, &lastname, &patch)?;
            Ok(())
        }

        Commands::Delete { name, lastname } => {
            store.delete(&name, &lastname)?;
            Ok(())
        }

        Commands::Browse => browse(&mut store, input),

        Commands::Import { src } => {
            let total = store.import_csv(&src)?;
            writeln!(
                store.output_mut(),
                "Successfully imported {} contacts from {:?}.",
                total, src
            )?;
            Ok(())
        }

        Commands::Export { des } => {
            let (path, total) = store.export_csv(&des)?;
            writeln!(
                store.output_mut(),
                "Successfully exported {} contacts to {:?}.",
                total, path
            )?;
            Ok(())
        }
    }
}

/// Interactive paging over `input` until `q` or end of input.
pub fn browse<S: Storage, W: Write, R: BufRead>(
    store: &mut ContactStore<S, W>,
    mut input: R,
) -> Result<(), AppError> {
    store.render_page()?;

    'browse: loop {
        write!(store.output_mut(), "\n[n]ext, [p]rev, [r]ead, [q]uit\n> ")?;
        store.output_mut().flush()?;

        let Some(action) = read_command(&mut input)? else {
            break 'browse;
        };

        match action.as_str() {
            "n" | "next" => {
                store.page_forward()?;
            }
            "p" | "prev" => match store.page_backward() {
                Ok(_) => {}
                Err(e @ AppError::PageUnderflow { .. }) => {
                    writeln!(store.output_mut(), "{}", e)?;
                }
                Err(e) => return Err(e),
            },
            "r" | "read" => {
                store.render_page()?;
            }
            "q" | "quit" => break 'browse,
            "" => continue 'browse,
            other => {
                writeln!(
                    store.output_mut(),
                    "{}",
                    AppError::ParseCommand(other.to_string())
                )?;
            }
        }
    }

    Ok(())
}
