pub use crate::cli::{command, run_app};
pub use crate::domain::{
    Contact, ContactPatch, ContactStore, Cursor, FieldValue, Outcome, PageView, Underflow,
    contact, pagination, search,
};
pub use crate::errors::AppError;
pub use crate::render::render_table;
pub use crate::storage::{CsvStorage, JsonStorage, MemStorage, Storage};
