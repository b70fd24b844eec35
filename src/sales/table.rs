use std::collections::HashMap;
use std::slice::Iter;

use log::debug;

use super::entity::Entity;
use super::{DuplicatePolicy, EntityKind, SalesError};

/// Entities of one kind, keyed by code and kept in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTable {
    kind: EntityKind,
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl EntityTable {
    pub fn new(kind: EntityKind) -> EntityTable {
        EntityTable {
            kind,
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a table from the lines of a definition file, one `code,name` pair per line.
    /// Any bad line rejects the whole file.
    pub fn from_lines<I, S>(kind: EntityKind, lines: I, duplicates: DuplicatePolicy) -> Result<EntityTable, SalesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let format = kind.code_format();
        let mut table = EntityTable::new(kind);

        for (number, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match split_fields(line)[..] {
                [code, name] if format.matches(code) => table.insert(code, name, duplicates)?,
                _ => {
                    debug!("invalid {} definition, line={}, text={:?}", kind, number + 1, line);
                    return Err(SalesError::DefinitionFileInvalidFormat { kind });
                },
            }
        }

        Ok(table)
    }

    pub fn insert(&mut self, code: &str, name: &str, duplicates: DuplicatePolicy) -> Result<(), SalesError> {
        if let Some(&position) = self.index.get(code) {
            if duplicates == DuplicatePolicy::Reject {
                return Err(SalesError::DuplicateDefinitionCode {
                    kind: self.kind,
                    code: code.to_string(),
                });
            }

            debug!("{} code {} redefined, keeping the later name", self.kind, code);
            self.entities[position].rename(name.to_string());
            return Ok(());
        }

        self.index.insert(code.to_string(), self.entities.len());
        self.entities.push(Entity::new(code, name));

        Ok(())
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&Entity> {
        self.index.get(code).map(|&position| &self.entities[position])
    }

    pub(crate) fn get_mut(&mut self, code: &str) -> Option<&mut Entity> {
        self.index.get(code).map(|&position| &mut self.entities[position])
    }

    /// Entities in the order their codes first appeared.
    pub fn iter(&self) -> Iter<'_, Entity> {
        self.entities.iter()
    }
}

impl<'a> IntoIterator for &'a EntityTable {
    type Item = &'a Entity;
    type IntoIter = Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Comma-separated fields with trailing empty fields dropped, so `001,Tokyo,` has two fields.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    fields
}
