use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// JSON keys of the six contact fields, in display order.
pub const FIELD_NAMES: [&str; 6] = [
    "name",
    "lastname",
    "surname",
    "organization",
    "work_phone_number",
    "personal_number",
];

/// A single stored value. Phone numbers may be kept as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    /// Anything else a hand-edited file may hold: null, bools, arrays, objects.
    Other(Value),
}

impl FieldValue {
    pub fn is_text(&self, text: &str) -> bool {
        matches!(self, FieldValue::Text(value) if value == text)
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Number(number) => Value::Number(number.clone()),
            FieldValue::Other(value) => value.clone(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Other(Value::Null) => Ok(()),
            FieldValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

// A key that is present keeps its value, `null` included.
fn present<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<FieldValue>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub lastname: Option<FieldValue>,

    /// Patronymic.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub surname: Option<FieldValue>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub organization: Option<FieldValue>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub work_phone_number: Option<FieldValue>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_number: Option<FieldValue>,

    // Unknown keys survive a load/persist cycle untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn new(
        name: &str,
        lastname: &str,
        surname: &str,
        organization: &str,
        work_phone_number: &str,
        personal_number: &str,
    ) -> Self {
        Contact {
            name: Some(name.into()),
            lastname: Some(lastname.into()),
            surname: Some(surname.into()),
            organization: Some(organization.into()),
            work_phone_number: Some(work_phone_number.into()),
            personal_number: Some(personal_number.into()),
            extra: Map::new(),
        }
    }

    pub fn fields(&self) -> [Option<&FieldValue>; 6] {
        [
            self.name.as_ref(),
            self.lastname.as_ref(),
            self.surname.as_ref(),
            self.organization.as_ref(),
            self.work_phone_number.as_ref(),
            self.personal_number.as_ref(),
        ]
    }

    /// Display cells in column order, absent fields as empty strings.
    pub fn cells(&self) -> [String; 6] {
        self.fields()
            .map(|field| field.map(|value| value.to_string()).unwrap_or_default())
    }

    /// True when any stored value, known or extra, equals `query` exactly.
    pub fn has_value(&self, query: &FieldValue) -> bool {
        if self.fields().iter().flatten().any(|&value| value == query) {
            return true;
        }

        let query = query.to_json();
        self.extra.values().any(|value| *value == query)
    }

    pub fn identified_by(&self, name: &str, lastname: &str) -> bool {
        let name_matches = self.name.as_ref().is_some_and(|value| value.is_text(name));
        let lastname_matches = self
            .lastname
            .as_ref()
            .is_some_and(|value| value.is_text(lastname));

        name_matches && lastname_matches
    }

    /// Overwrites only the fields the patch supplies.
    pub fn apply(&mut self, patch: &ContactPatch) {
        let targets = [
            (&mut self.name, &patch.name),
            (&mut self.lastname, &patch.lastname),
            (&mut self.surname, &patch.surname),
            (&mut self.organization, &patch.organization),
            (&mut self.work_phone_number, &patch.work_phone_number),
            (&mut self.personal_number, &patch.personal_number),
        ];

        for (field, new_value) in targets {
            if let Some(value) = new_value {
                *field = Some(value.clone());
            }
        }
    }

    pub fn full_name(&self) -> String {
        let [name, lastname, ..] = self.cells();
        format!("{} {}", name, lastname)
    }
}

/// New values for an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub name: Option<FieldValue>,
    pub lastname: Option<FieldValue>,
    pub surname: Option<FieldValue>,
    pub organization: Option<FieldValue>,
    pub work_phone_number: Option<FieldValue>,
    pub personal_number: Option<FieldValue>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        *self == ContactPatch::default()
    }
}
