use crate::domain::contact::{Contact, FieldValue};

/// Every `(query, contact)` pair where the contact holds a value equal to the
/// query. Queries are taken in order and each one scans the whole collection,
/// so a contact matching two queries is yielded twice.
pub fn matches<'a>(
    contacts: &'a [Contact],
    queries: &'a [FieldValue],
) -> impl Iterator<Item = (&'a FieldValue, &'a Contact)> + 'a {
    queries.iter().flat_map(move |query| {
        contacts
            .iter()
            .filter(move |contact| contact.has_value(query))
            .map(move |contact| (query, contact))
    })
}

/// Index of the first contact with exactly this name and lastname.
pub fn position_of(contacts: &[Contact], name: &str, lastname: &str) -> Option<usize> {
    contacts
        .iter()
        .position(|contact| contact.identified_by(name, lastname))
}
