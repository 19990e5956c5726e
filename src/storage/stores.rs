use super::*;

use csv::{Reader, Writer};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use std::cell::RefCell;
use std::path::PathBuf;

use crate::domain::contact::{FIELD_NAMES, FieldValue};

const JSON_INDENT: &[u8] = b"    ";
const EXPORT_FILE_NAME: &str = "exported.csv";

/// The phone book file: one JSON array of contact objects.
///
/// `save` truncates and rewrites the file in place. There is no temporary
/// file or rename, so an interrupted write can leave the file corrupt.
pub struct JsonStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            medium: "json".to_string(),
            path: path.into(),
        }
    }

    /// Writes an empty collection. Returns `false` when the file already
    /// exists and `force` is not set.
    pub fn init(&self, force: bool) -> Result<bool, AppError> {
        if self.path.exists() && !force {
            return Ok(false);
        }

        create_file_parent(&self.path)?;
        self.save(&[])?;
        Ok(true)
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        let data = fs::read_to_string(&self.path).map_err(|e| AppError::read(&self.path, e))?;

        let contacts: Vec<Contact> =
            serde_json::from_str(&data).map_err(|e| AppError::read(&self.path, e))?;

        debug!("Loaded {} contacts from {}", contacts.len(), self.path.display());
        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
        contacts
            .serialize(&mut serializer)
            .map_err(|e| AppError::write(&self.path, e))?;

        fs::write(&self.path, buffer).map_err(|e| AppError::write(&self.path, e))?;

        debug!("Saved {} contacts to {}", contacts.len(), self.path.display());
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}

/// Keeps the collection in memory. Used by tests and benches.
#[derive(Default)]
pub struct MemStorage {
    pub data: RefCell<Vec<Contact>>,
}

impl MemStorage {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            data: RefCell::new(contacts),
        }
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.data.borrow().clone()
    }
}

impl Storage for MemStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        *self.data.borrow_mut() = contacts.to_vec();
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}

/// Flat CSV with one column per contact field, used for import and export.
pub struct CsvStorage {
    pub medium: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: Option<String>,
    lastname: Option<String>,
    surname: Option<String>,
    organization: Option<String>,
    work_phone_number: Option<String>,
    personal_number: Option<String>,
}

impl From<CsvRow> for Contact {
    fn from(row: CsvRow) -> Self {
        Contact {
            name: row.name.map(FieldValue::from),
            lastname: row.lastname.map(FieldValue::from),
            surname: row.surname.map(FieldValue::from),
            organization: row.organization.map(FieldValue::from),
            work_phone_number: row.work_phone_number.map(FieldValue::from),
            personal_number: row.personal_number.map(FieldValue::from),
            ..Contact::default()
        }
    }
}

impl CsvStorage {
    /// A directory gets `exported.csv` appended.
    pub fn for_export(path: &str) -> Result<Self, AppError> {
        let mut file_path = PathBuf::from(path);

        if file_path.is_dir() {
            file_path = file_path.join(EXPORT_FILE_NAME);
        } else if file_path.extension().is_none_or(|ext| ext != "csv") {
            return Err(AppError::Validation(
                "Export file must be a .csv file".to_string(),
            ));
        }

        Ok(Self {
            medium: "csv".to_string(),
            path: file_path,
        })
    }

    pub fn for_import(path: &str) -> Result<Self, AppError> {
        let file_path = PathBuf::from(path);

        if !file_path.exists() {
            return Err(AppError::NotFound("CSV file".to_string()));
        }

        if file_path.extension().is_none_or(|ext| ext != "csv") {
            return Err(AppError::Validation("File not .csv".to_string()));
        }

        Ok(Self {
            medium: "csv".to_string(),
            path: file_path,
        })
    }
}

impl Storage for CsvStorage {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        let mut reader = Reader::from_path(&self.path)?;

        let mut contacts = Vec::new();
        for result in reader.deserialize() {
            let row: CsvRow = result?;
            contacts.push(Contact::from(row));
        }

        Ok(contacts)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let mut writer = Writer::from_path(&self.path)?;

        writer.write_record(FIELD_NAMES)?;
        for contact in contacts {
            writer.write_record(contact.cells())?;
        }

        writer.flush()?;
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}
