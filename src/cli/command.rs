use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::pagination::Underflow;

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Paginated phone book backed by a JSON file")]
pub struct Cli {
    /// Phone book JSON file
    #[arg(long, env = "PHONEBOOK_FILE", default_value = "./phonebook.json")]
    pub file: PathBuf,

    /// What paging back from the first two pages does
    #[arg(long, env = "PHONEBOOK_UNDERFLOW", value_enum, default_value_t = Underflow::Clamp)]
    pub underflow: Underflow,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty phone book file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show one page of contacts (11 on the first page, 10 after)
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Add a new contact. Every field is optional
    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        lastname: Option<String>,

        /// Patronymic
        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        #[arg(long)]
        work_phone: Option<String>,

        #[arg(long)]
        personal_phone: Option<String>,
    },
    /// List every contact holding one of the values exactly
    Find {
        /// Values to look for in any field
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },
    /// Edit the first contact with this name and lastname.
    /// Only the fields given with --new-* flags change
    Update {
        /// Contact current name
        #[arg(long)]
        name: String,

        /// Contact current lastname
        #[arg(long)]
        lastname: String,

        #[arg(long)]
        new_name: Option<String>,

        #[arg(long)]
        new_lastname: Option<String>,

        #[arg(long)]
        new_surname: Option<String>,

        #[arg(long)]
        new_organization: Option<String>,

        #[arg(long)]
        new_work_phone: Option<String>,

        #[arg(long)]
        new_personal_phone: Option<String>,
    },
    /// Delete the first contact with this name and lastname
    Delete {
        #[arg(long)]
        name: String,

        #[arg(long)]
        lastname: String,
    },
    /// Page through contacts interactively
    Browse,

    /// Import contacts from .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: String,
    },

    /// Export contacts to a .csv file
    Export {
        /// File path or directory for the export file
        #[arg(short, long)]
        des: String,
    },
}
