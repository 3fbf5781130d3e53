//! Declarative form descriptors for the three record editors.
//!
//! Each record type exposes an ordered field list; one generic dialog in
//! `ui::editor` renders any such list, so the three forms stay structurally
//! identical.

use crate::core::document::{Repository, ServerEntry, UrlEntry, UrlKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Free text plus a native folder picker.
    Path,
    Flag,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validate {
    None,
    Integer,
}

impl Validate {
    /// Port fields are recognized by key, matching the persisted naming.
    fn for_key(key: &str) -> Self {
        if key.contains("port") {
            Validate::Integer
        } else {
            Validate::None
        }
    }

    fn check(self, value: &FieldValue) -> Result<(), FormError> {
        match (self, value) {
            (Validate::Integer, FieldValue::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map(|_| ())
                .map_err(|_| FormError::new("port_number_error")),
            _ => Ok(()),
        }
    }
}

pub struct FieldSpec {
    pub key: &'static str,
    pub label_key: &'static str,
    pub kind: FieldKind,
    pub validate: Validate,
}

impl FieldSpec {
    fn text(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            kind: FieldKind::Text,
            validate: Validate::for_key(key),
        }
    }

    fn path(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            kind: FieldKind::Path,
            validate: Validate::None,
        }
    }

    fn flag(key: &'static str, label_key: &'static str) -> Self {
        Self {
            key,
            label_key,
            kind: FieldKind::Flag,
            validate: Validate::None,
        }
    }

    fn choice(
        key: &'static str,
        label_key: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label_key,
            kind: FieldKind::Choice(options),
            validate: Validate::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Choice(usize),
}

impl FieldValue {
    fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text | FieldKind::Path => FieldValue::Text(String::new()),
            FieldKind::Flag => FieldValue::Flag(false),
            FieldKind::Choice(_) => FieldValue::Choice(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub message_key: &'static str,
}

impl FormError {
    fn new(message_key: &'static str) -> Self {
        Self { message_key }
    }
}

fn text_at(values: &[FieldValue], index: usize) -> String {
    match values.get(index) {
        Some(FieldValue::Text(text)) => text.clone(),
        _ => String::new(),
    }
}

fn flag_at(values: &[FieldValue], index: usize) -> bool {
    matches!(values.get(index), Some(FieldValue::Flag(true)))
}

fn choice_at(values: &[FieldValue], index: usize) -> usize {
    match values.get(index) {
        Some(FieldValue::Choice(selected)) => *selected,
        _ => 0,
    }
}

fn int_at(values: &[FieldValue], index: usize) -> Result<i64, FormError> {
    text_at(values, index)
        .trim()
        .parse::<i64>()
        .map_err(|_| FormError::new("port_number_error"))
}

/// A record type editable through the generic form dialog.
pub trait FormModel: Sized {
    const ADD_TITLE_KEY: &'static str;
    const EDIT_TITLE_KEY: &'static str;

    fn fields() -> Vec<FieldSpec>;
    fn to_values(&self) -> Vec<FieldValue>;
    fn from_values(values: &[FieldValue]) -> Result<Self, FormError>;
}

impl FormModel for Repository {
    const ADD_TITLE_KEY: &'static str = "add_repository";
    const EDIT_TITLE_KEY: &'static str = "edit_repository";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("repo_name", "repo_name"),
            FieldSpec::text("url", "url"),
            FieldSpec::path("repo_path", "local_path"),
            FieldSpec::flag("has_core", "has_core"),
            FieldSpec::path("core_path", "core_path"),
            FieldSpec::path("data_path", "data_path"),
            FieldSpec::path("script_path", "script_path"),
            FieldSpec::flag("should_update", "auto_update"),
            FieldSpec::flag("should_read", "auto_read"),
        ]
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.repo_name.clone()),
            FieldValue::Text(self.url.clone()),
            FieldValue::Text(self.repo_path.clone()),
            FieldValue::Flag(self.has_core),
            FieldValue::Text(self.core_path.clone()),
            FieldValue::Text(self.data_path.clone()),
            FieldValue::Text(self.script_path.clone()),
            FieldValue::Flag(self.should_update),
            FieldValue::Flag(self.should_read),
        ]
    }

    fn from_values(values: &[FieldValue]) -> Result<Self, FormError> {
        Ok(Self {
            repo_name: text_at(values, 0),
            url: text_at(values, 1),
            repo_path: text_at(values, 2),
            has_core: flag_at(values, 3),
            core_path: text_at(values, 4),
            data_path: text_at(values, 5),
            script_path: text_at(values, 6),
            should_update: flag_at(values, 7),
            should_read: flag_at(values, 8),
        })
    }
}

impl FormModel for UrlEntry {
    const ADD_TITLE_KEY: &'static str = "add_url";
    const EDIT_TITLE_KEY: &'static str = "edit_url";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice("type", "type", UrlKind::CODES),
            FieldSpec::text("url", "url"),
        ]
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Choice(self.kind.index()),
            FieldValue::Text(self.url.clone()),
        ]
    }

    fn from_values(values: &[FieldValue]) -> Result<Self, FormError> {
        Ok(Self {
            kind: UrlKind::from_index(choice_at(values, 0)),
            url: text_at(values, 1),
        })
    }
}

impl FormModel for ServerEntry {
    const ADD_TITLE_KEY: &'static str = "add_server";
    const EDIT_TITLE_KEY: &'static str = "edit_server";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("name", "name"),
            FieldSpec::text("address", "address"),
            FieldSpec::text("duelport", "duel_port"),
            FieldSpec::text("roomaddress", "room_address"),
            FieldSpec::text("roomlistprotocol", "protocol"),
            FieldSpec::text("roomlistport", "list_port"),
        ]
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.name.clone()),
            FieldValue::Text(self.address.clone()),
            FieldValue::Text(self.duelport.to_string()),
            FieldValue::Text(self.roomaddress.clone()),
            FieldValue::Text(self.roomlistprotocol.clone()),
            FieldValue::Text(self.roomlistport.to_string()),
        ]
    }

    fn from_values(values: &[FieldValue]) -> Result<Self, FormError> {
        Ok(Self {
            name: text_at(values, 0),
            address: text_at(values, 1),
            duelport: int_at(values, 2)?,
            roomaddress: text_at(values, 3),
            roomlistprotocol: text_at(values, 4),
            roomlistport: int_at(values, 5)?,
        })
    }
}

/// One open editor form: the target index (`None` = add), the current value
/// per declared field, and the pending validation error, if any.
pub struct FormState {
    pub index: Option<usize>,
    pub values: Vec<FieldValue>,
    pub error: Option<FormError>,
}

impl FormState {
    pub fn add<R: FormModel>() -> Self {
        Self {
            index: None,
            values: R::fields()
                .iter()
                .map(|field| FieldValue::empty(field.kind))
                .collect(),
            error: None,
        }
    }

    pub fn edit<R: FormModel>(index: usize, record: &R) -> Self {
        Self {
            index: Some(index),
            values: record.to_values(),
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.index.is_some()
    }
}

/// Runs every declared validator over the form values and builds the record.
pub fn commit<R: FormModel>(state: &FormState) -> Result<R, FormError> {
    for (spec, value) in R::fields().iter().zip(&state.values) {
        spec.validate.check(value)?;
    }
    R::from_values(&state.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_keys_get_the_integer_validator() {
        let specs = ServerEntry::fields();
        for spec in &specs {
            let expected = if spec.key.contains("port") {
                Validate::Integer
            } else {
                Validate::None
            };
            assert_eq!(spec.validate, expected, "key {}", spec.key);
        }
    }

    #[test]
    fn non_numeric_port_aborts_the_save() {
        let mut state = FormState::add::<ServerEntry>();
        state.values[0] = FieldValue::Text("A".to_string());
        state.values[2] = FieldValue::Text("abcd".to_string());
        state.values[5] = FieldValue::Text("7922".to_string());

        let result = commit::<ServerEntry>(&state);
        assert_eq!(
            result.unwrap_err(),
            FormError {
                message_key: "port_number_error"
            }
        );
    }

    #[test]
    fn numeric_ports_build_the_record() {
        let mut state = FormState::add::<ServerEntry>();
        state.values[0] = FieldValue::Text("A".to_string());
        state.values[2] = FieldValue::Text("7911".to_string());
        state.values[5] = FieldValue::Text(" 7922 ".to_string());

        let server = commit::<ServerEntry>(&state).unwrap();
        assert_eq!(server.name, "A");
        assert_eq!(server.duelport, 7911);
        assert_eq!(server.roomlistport, 7922);
    }

    #[test]
    fn repository_round_trips_through_values() {
        let repo = Repository {
            repo_name: "R1".to_string(),
            url: "u".to_string(),
            repo_path: "/srv/r1".to_string(),
            has_core: true,
            should_read: true,
            ..Repository::default()
        };
        let state = FormState::edit(0, &repo);
        let back = commit::<Repository>(&state).unwrap();
        assert_eq!(back, repo);
    }

    #[test]
    fn url_type_choice_maps_to_the_enum() {
        let mut state = FormState::add::<UrlEntry>();
        state.values[0] = FieldValue::Choice(2);
        state.values[1] = FieldValue::Text("http://x".to_string());

        let entry = commit::<UrlEntry>(&state).unwrap();
        assert_eq!(entry.kind, UrlKind::Cover);
        assert_eq!(entry.url, "http://x");
    }

    #[test]
    fn add_state_starts_empty_per_field_kind() {
        let state = FormState::add::<Repository>();
        assert_eq!(state.values.len(), Repository::fields().len());
        assert_eq!(state.values[0], FieldValue::Text(String::new()));
        assert_eq!(state.values[3], FieldValue::Flag(false));
        assert!(!state.is_edit());
    }
}
