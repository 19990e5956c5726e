use std::io::{Stdout, Write};
use std::ops::Range;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::domain::contact::{Contact, ContactPatch, FieldValue};
use crate::domain::pagination::{Cursor, Retreat, Underflow};
use crate::domain::search;
use crate::errors::AppError;
use crate::render::render_table;
use crate::storage::{CsvStorage, Storage};

/// What `render_page` put on the console.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Rendered {
        page: usize,
        window: Range<usize>,
        contacts: Vec<Contact>,
    },
    /// The window starts past the last contact.
    Empty { page: usize },
}

/// Result of `update` and `delete`. `NotFound` prints nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Updated(Contact),
    Deleted(Contact),
    NotFound,
}

/// A phone book file plus a pagination cursor.
///
/// Every operation reloads the whole collection from storage, and every
/// mutation writes the whole collection back. Nothing guards against another
/// process writing the same file in between; the last writer wins.
pub struct ContactStore<S: Storage, W: Write = Stdout> {
    storage: S,
    out: W,
    cursor: Cursor,
    underflow: Underflow,
}

impl<S: Storage, W: Write> ContactStore<S, W> {
    pub fn with_output(storage: S, out: W) -> Self {
        Self {
            storage,
            out,
            cursor: Cursor::first(),
            underflow: Underflow::default(),
        }
    }

    pub fn underflow(mut self, strategy: Underflow) -> Self {
        self.underflow = strategy;
        self
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn load(&self) -> Result<Vec<Contact>, AppError> {
        debug!("Loading contacts from {} storage", self.storage.get_medium());
        self.storage.load()
    }

    pub fn persist(&self, contacts: &[Contact]) -> Result<(), AppError> {
        self.storage.save(contacts)
    }

    pub fn render_page(&mut self) -> Result<PageView, AppError> {
        let contacts = self.load()?;
        let page = self.cursor.page();

        let Some(window) = self.cursor.visible(contacts.len()) else {
            debug!("Page {} starts past {} contacts", page, contacts.len());
            writeln!(self.out, "There are no contacts at page {}", page)?;
            return Ok(PageView::Empty { page });
        };

        let shown = contacts[window.clone()].to_vec();
        writeln!(self.out, "Page {}", page)?;
        write!(self.out, "{}", render_table(&shown))?;

        Ok(PageView::Rendered {
            page,
            window,
            contacts: shown,
        })
    }

    pub fn page_forward(&mut self) -> Result<PageView, AppError> {
        self.cursor.advance();
        debug!("Paged forward to {:?}", self.cursor);
        self.render_page()
    }

    /// Renders only when the cursor actually moved back a page.
    pub fn page_backward(&mut self) -> Result<Option<PageView>, AppError> {
        match self.cursor.retreat(self.underflow) {
            Ok(Retreat::Moved) => {
                debug!("Paged backward to {:?}", self.cursor);
                self.render_page().map(Some)
            }
            Ok(Retreat::Reset) => {
                debug!("Paging backward reset the cursor to the first page");
                Ok(None)
            }
            Ok(Retreat::Stayed) => Ok(None),
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    pub fn goto_page(&mut self, page: usize) -> Result<PageView, AppError> {
        self.cursor = Cursor::at_page(page)?;
        self.render_page()
    }

    pub fn create(&mut self, contact: Contact) -> Result<(), AppError> {
        let mut contacts = self.load()?;
        info!("Adding contact {}", contact.full_name());
        contacts.push(contact);
        self.persist(&contacts)
    }

    /// Contacts holding a value equal to any query, once per matching query.
    pub fn find(&mut self, queries: &[FieldValue]) -> Result<Vec<Contact>, AppError> {
        let contacts = self.load()?;
        let found: Vec<Contact> = search::matches(&contacts, queries)
            .map(|(_, contact)| contact.clone())
            .collect();

        if found.is_empty() {
            writeln!(self.out, "Nothing found for your query")?;
        } else {
            writeln!(self.out, "Search results:")?;
            write!(self.out, "{}", render_table(&found))?;
        }

        Ok(found)
    }

    pub fn update(
        &mut self,
        name: &str,
        lastname: &str,
        patch: &ContactPatch,
    ) -> Result<Outcome, AppError> {
        let mut contacts = self.load()?;

        let Some(index) = search::position_of(&contacts, name, lastname) else {
            debug!("No contact named {} {} to update", name, lastname);
            return Ok(Outcome::NotFound);
        };

        contacts[index].apply(patch);
        self.persist(&contacts)?;

        let updated = contacts.swap_remove(index);
        info!("Updated contact at index {}", index);
        writeln!(self.out, "Contact {} successfully updated", updated.full_name())?;
        Ok(Outcome::Updated(updated))
    }

    pub fn delete(&mut self, name: &str, lastname: &str) -> Result<Outcome, AppError> {
        let mut contacts = self.load()?;

        let Some(index) = search::position_of(&contacts, name, lastname) else {
            debug!("No contact named {} {} to delete", name, lastname);
            return Ok(Outcome::NotFound);
        };

        let removed = contacts.remove(index);
        self.persist(&contacts)?;

        info!("Deleted contact at index {}", index);
        writeln!(self.out, "Contact {} has been deleted", removed.full_name())?;
        Ok(Outcome::Deleted(removed))
    }

    /// Appends every row of a CSV file. Returns the number imported.
    pub fn import_csv(&mut self, path: &str) -> Result<usize, AppError> {
        let mut contacts = self.load()?;
        let imported = CsvStorage::for_import(path)?.load()?;
        let total = imported.len();

        contacts.extend(imported);
        self.persist(&contacts)?;

        info!("Imported {} contacts from {}", total, path);
        Ok(total)
    }

    pub fn export_csv(&mut self, path: &str) -> Result<(PathBuf, usize), AppError> {
        let contacts = self.load()?;
        let export = CsvStorage::for_export(path)?;
        export.save(&contacts)?;

        info!("Exported {} contacts to {}", contacts.len(), export.path.display());
        Ok((export.path, contacts.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStorage, MemStorage};
    use std::fs;
    use tempfile::tempdir;

    fn numbered(n: usize) -> Vec<Contact> {
        (0..n)
            .map(|i| {
                Contact::new(
                    &format!("User{i}"),
                    &format!("Last{i}"),
                    "",
                    "Acme",
                    &format!("10-{i:02}"),
                    &format!("555-{i:04}"),
                )
            })
            .collect()
    }

    fn mem_store(contacts: Vec<Contact>) -> ContactStore<MemStorage, Vec<u8>> {
        ContactStore::with_output(MemStorage::new(contacts), Vec::new())
    }

    fn printed(store: &ContactStore<MemStorage, Vec<u8>>) -> String {
        String::from_utf8_lossy(store.output()).to_string()
    }

    #[test]
    fn first_page_shows_eleven_contacts() -> Result<(), AppError> {
        let mut store = mem_store(numbered(25));

        let view = store.render_page()?;

        match view {
            PageView::Rendered {
                page,
                window,
                contacts,
            } => {
                assert_eq!(page, 1);
                assert_eq!(window, 0..11);
                assert_eq!(contacts.len(), 11);
            }
            PageView::Empty { .. } => panic!("expected a table"),
        }
        assert!(printed(&store).starts_with("Page 1\n┌"));
        Ok(())
    }

    #[test]
    fn later_pages_overlap_by_nothing_and_clamp_at_the_end() -> Result<(), AppError> {
        let mut store = mem_store(numbered(25));

        let second = store.page_forward()?;
        let third = store.page_forward()?;

        assert!(matches!(second, PageView::Rendered { ref window, .. } if *window == (10..21)));
        assert!(matches!(third, PageView::Rendered { ref window, .. } if *window == (20..25)));
        // Rendering never shrinks the cursor itself.
        assert_eq!(store.cursor().window(), 20..31);
        Ok(())
    }

    #[test]
    fn forward_paging_is_unbounded() -> Result<(), AppError> {
        let mut store = mem_store(numbered(5));

        store.page_forward()?;
        store.page_forward()?;
        let view = store.page_forward()?;

        assert_eq!(view, PageView::Empty { page: 4 });
        assert_eq!(store.cursor().window(), 30..40);
        assert!(printed(&store).contains("There are no contacts at page 4"));
        Ok(())
    }

    #[test]
    fn window_starting_at_the_end_renders_an_empty_table() -> Result<(), AppError> {
        let mut store = mem_store(numbered(10));

        let view = store.goto_page(2)?;

        assert!(matches!(view, PageView::Rendered { ref contacts, .. } if contacts.is_empty()));
        assert!(printed(&store).starts_with("Page 2\n"));
        Ok(())
    }

    #[test]
    fn backward_from_first_page_resets_without_output() -> Result<(), AppError> {
        let mut store = mem_store(numbered(25));

        assert_eq!(store.page_backward()?, None);
        assert_eq!(*store.cursor(), Cursor::first());
        assert!(printed(&store).is_empty());
        Ok(())
    }

    #[test]
    fn backward_from_page_three_renders_page_two() -> Result<(), AppError> {
        let mut store = mem_store(numbered(40));
        store.goto_page(3)?;

        let view = store.page_backward()?;

        assert!(matches!(view, Some(PageView::Rendered { page: 2, .. })));
        assert_eq!(store.cursor().window(), 10..21);
        Ok(())
    }

    #[test]
    fn underflow_error_strategy() -> Result<(), AppError> {
        let mut store = mem_store(numbered(3)).underflow(Underflow::Error);

        assert!(matches!(
            store.page_backward(),
            Err(AppError::PageUnderflow { page: 1 })
        ));
        Ok(())
    }

    #[test]
    fn create_appends_at_the_end() -> Result<(), AppError> {
        let mut store = mem_store(numbered(3));
        let before = store.load()?;
        let new_contact =
            Contact::new("Iliya", "Ovechkin", "Iliich", "NHL", "77-77", "777-11133");

        store.create(new_contact.clone())?;

        let after = store.load()?;
        assert_eq!(after.len(), 4);
        assert_eq!(&after[..3], &before[..]);
        assert_eq!(after[3], new_contact);
        Ok(())
    }

    #[test]
    fn find_keeps_duplicates_across_queries() -> Result<(), AppError> {
        let mut store = mem_store(numbered(3));
        let queries: Vec<FieldValue> = vec!["User1".into(), "555-0001".into(), "Acme".into()];

        let found = store.find(&queries)?;

        assert_eq!(found.len(), 5);
        assert_eq!(found[0], found[1]);
        assert!(printed(&store).starts_with("Search results:\n"));
        Ok(())
    }

    #[test]
    fn find_without_matches_says_so() -> Result<(), AppError> {
        let mut store = mem_store(numbered(3));

        let found = store.find(&[FieldValue::from("Nobody")])?;

        assert!(found.is_empty());
        assert_eq!(printed(&store), "Nothing found for your query\n");
        Ok(())
    }

    #[test]
    fn update_only_touches_the_first_match() -> Result<(), AppError> {
        let mut contacts = numbered(2);
        contacts.push(Contact::new("User0", "Last0", "Second", "Other", "", ""));
        let mut store = mem_store(contacts.clone());
        let patch = ContactPatch {
            organization: Some("Westwood".into()),
            surname: Some("Gideonovich".into()),
            ..ContactPatch::default()
        };

        let outcome = store.update("User0", "Last0", &patch)?;

        let after = store.load()?;
        assert!(matches!(outcome, Outcome::Updated(_)));
        assert_eq!(after[0].organization, Some("Westwood".into()));
        assert_eq!(after[0].surname, Some("Gideonovich".into()));
        assert_eq!(after[0].work_phone_number, contacts[0].work_phone_number);
        assert_eq!(&after[1..], &contacts[1..]);
        assert_eq!(
            printed(&store),
            "Contact User0 Last0 successfully updated\n"
        );
        Ok(())
    }

    #[test]
    fn update_without_match_is_silent() -> Result<(), AppError> {
        let mut store = mem_store(numbered(3));
        let patch = ContactPatch {
            name: Some("Changed".into()),
            ..ContactPatch::default()
        };

        assert_eq!(store.update("John", "Doe", &patch)?, Outcome::NotFound);
        assert_eq!(store.load()?, numbered(3));
        assert!(printed(&store).is_empty());
        Ok(())
    }

    #[test]
    fn delete_removes_exactly_the_first_match() -> Result<(), AppError> {
        let mut contacts = numbered(3);
        contacts.push(Contact::new("User1", "Last1", "Twin", "", "", ""));
        let mut store = mem_store(contacts.clone());

        let outcome = store.delete("User1", "Last1")?;

        let after = store.load()?;
        assert_eq!(outcome, Outcome::Deleted(contacts[1].clone()));
        assert_eq!(after.len(), 3);
        assert_eq!(after[2].surname, Some("Twin".into()));
        Ok(())
    }

    #[test]
    fn deleting_twice_leaves_an_empty_book() -> Result<(), AppError> {
        let mut store = mem_store(vec![Contact::new("A", "B", "", "", "", "")]);

        assert!(matches!(store.delete("A", "B")?, Outcome::Deleted(_)));
        assert!(store.load()?.is_empty());

        assert_eq!(store.delete("A", "B")?, Outcome::NotFound);
        assert!(store.load()?.is_empty());
        assert_eq!(printed(&store), "Contact A B has been deleted\n");
        Ok(())
    }

    #[test]
    fn every_operation_reloads_from_the_file() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("phonebook.json");
        let storage = JsonStorage::new(&path);
        storage.init(false)?;
        let mut store = ContactStore::with_output(storage, Vec::new());

        store.create(Contact::new("A", "B", "", "", "", ""))?;
        // Another writer replaces the file between operations.
        fs::write(&path, r#"[{"name": "C", "lastname": "D"}]"#)?;

        assert_eq!(store.delete("A", "B")?, Outcome::NotFound);
        assert!(matches!(store.delete("C", "D")?, Outcome::Deleted(_)));
        Ok(())
    }

    #[test]
    fn missing_file_aborts_the_operation() -> Result<(), AppError> {
        let dir = tempdir()?;
        let storage = JsonStorage::new(dir.path().join("phonebook.json"));
        let mut store = ContactStore::with_output(storage, Vec::new());

        assert!(matches!(
            store.render_page(),
            Err(AppError::StorageRead { .. })
        ));
        assert!(matches!(
            store.create(Contact::default()),
            Err(AppError::StorageRead { .. })
        ));
        assert!(store.output().is_empty());
        Ok(())
    }

    #[test]
    fn csv_round_trip_through_the_store() -> Result<(), AppError> {
        let dir = tempdir()?;
        let csv_path = dir.path().join("contacts.csv");
        let csv_path = csv_path.to_string_lossy();
        let mut store = mem_store(numbered(2));

        let (written_to, exported) = store.export_csv(&csv_path)?;
        assert_eq!(exported, 2);
        assert!(written_to.exists());

        let imported = store.import_csv(&csv_path)?;

        let after = store.load()?;
        assert_eq!(imported, 2);
        assert_eq!(after.len(), 4);
        assert_eq!(after[2].full_name(), after[0].full_name());
        assert_eq!(after[3].personal_number, after[1].personal_number);
        Ok(())
    }
}
