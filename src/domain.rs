pub mod contact;
pub mod pagination;
pub mod search;
pub mod store;

pub use contact::{Contact, ContactPatch, FieldValue};
pub use pagination::{Cursor, Underflow};
pub use store::{ContactStore, Outcome, PageView};
