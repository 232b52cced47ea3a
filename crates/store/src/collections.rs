//! Typed access to the persisted record collections
//!
//! Each collection is one JSON array under a fixed key. Reads are lenient:
//! a missing key is an empty collection and a corrupt one is logged and
//! treated as empty, so a damaged file never blocks the designer.

use crate::{KeyValueStore, Result};
use doc_model::Template;
use mail_merge::{AgeGroup, Diagnosis, Doctor, Gender};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Logical collection names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Diagnoses,
    Doctors,
    Templates,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Diagnoses, Self::Doctors, Self::Templates];

    pub fn key(self) -> &'static str {
        match self {
            Self::Diagnoses => "diagnoses",
            Self::Doctors => "doctors",
            Self::Templates => "templates",
        }
    }
}

pub struct Collections<S> {
    store: S,
}

impl<S: KeyValueStore> Collections<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(collection.key())? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(collection = collection.key(), "Corrupt stored collection, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&mut self, collection: Collection, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.store.set(collection.key(), &json)
    }

    pub fn diagnoses(&self) -> Result<Vec<Diagnosis>> {
        self.load(Collection::Diagnoses)
    }

    pub fn add_diagnosis(&mut self, text: impl Into<String>, age_group: AgeGroup, gender: Gender) -> Result<Diagnosis> {
        let diagnosis = Diagnosis::new(text, age_group, gender);
        let mut all = self.diagnoses()?;
        all.push(diagnosis.clone());
        self.save(Collection::Diagnoses, &all)?;
        Ok(diagnosis)
    }

    /// Returns whether a record was removed
    pub fn delete_diagnosis(&mut self, id: &str) -> Result<bool> {
        let mut all = self.diagnoses()?;
        let before = all.len();
        all.retain(|d| d.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.save(Collection::Diagnoses, &all)?;
        Ok(true)
    }

    pub fn doctors(&self) -> Result<Vec<Doctor>> {
        self.load(Collection::Doctors)
    }

    pub fn add_doctor(&mut self, name: impl Into<String>) -> Result<Doctor> {
        let doctor = Doctor::new(name);
        let mut all = self.doctors()?;
        all.push(doctor.clone());
        self.save(Collection::Doctors, &all)?;
        Ok(doctor)
    }

    pub fn delete_doctor(&mut self, id: &str) -> Result<bool> {
        let mut all = self.doctors()?;
        let before = all.len();
        all.retain(|d| d.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.save(Collection::Doctors, &all)?;
        Ok(true)
    }

    /// Stored templates, normalized. A template that fails validation is
    /// skipped with a warning.
    pub fn templates(&self) -> Result<Vec<Template>> {
        let stored: Vec<Template> = self.load(Collection::Templates)?;
        Ok(stored
            .into_iter()
            .filter_map(|mut template| match template.normalize() {
                Ok(()) => Some(template),
                Err(e) => {
                    tracing::warn!(template = %template.id, "Skipping invalid stored template: {}", e);
                    None
                }
            })
            .collect())
    }

    pub fn template(&self, id: &str) -> Result<Option<Template>> {
        Ok(self.templates()?.into_iter().find(|t| t.id == id))
    }

    /// Replace the template with the same id, or append it. A template
    /// without an id is given a fresh one.
    pub fn save_template(&mut self, mut template: Template) -> Result<Template> {
        if template.id.trim().is_empty() {
            template.id = Uuid::new_v4().to_string();
        }
        let mut all = self.templates()?;
        match all.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => all.push(template.clone()),
        }
        self.save(Collection::Templates, &all)?;
        tracing::debug!(template = %template.id, "template saved");
        Ok(template)
    }

    pub fn delete_template(&mut self, id: &str) -> Result<bool> {
        let mut all = self.templates()?;
        let before = all.len();
        all.retain(|t| t.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.save(Collection::Templates, &all)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileStore, MemoryStore};
    use doc_model::ElementKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_collections_are_empty() {
        let collections = Collections::new(MemoryStore::new());
        assert!(collections.diagnoses().unwrap().is_empty());
        assert!(collections.doctors().unwrap().is_empty());
        assert!(collections.templates().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_collection_reads_as_empty() {
        let mut store = MemoryStore::new();
        store.set("doctors", "{not json").unwrap();
        let collections = Collections::new(store);
        assert!(collections.doctors().unwrap().is_empty());
    }

    #[test]
    fn test_add_and_delete_records() {
        let mut collections = Collections::new(MemoryStore::new());
        let asthma = collections.add_diagnosis("ربو", AgeGroup::Children, Gender::Male).unwrap();
        collections.add_diagnosis("سكري", AgeGroup::Adults, Gender::Female).unwrap();
        let doctor = collections.add_doctor("د. سامي").unwrap();

        assert_eq!(collections.diagnoses().unwrap().len(), 2);
        assert_ne!(asthma.id, "");

        assert!(collections.delete_diagnosis(&asthma.id).unwrap());
        assert!(!collections.delete_diagnosis(&asthma.id).unwrap());
        assert_eq!(collections.diagnoses().unwrap()[0].text, "سكري");

        assert!(collections.delete_doctor(&doctor.id).unwrap());
        assert!(collections.doctors().unwrap().is_empty());
    }

    #[test]
    fn test_save_template_upserts_by_id() {
        let mut collections = Collections::new(MemoryStore::new());
        let mut template = Template::with_id("t1", "تقرير");
        template.add(ElementKind::Text, None);

        collections.save_template(template.clone()).unwrap();
        template.name = "تقرير معدل".to_string();
        collections.save_template(template).unwrap();

        let stored = collections.templates().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "تقرير معدل");
        assert_eq!(stored[0].len(), 1);
    }

    #[test]
    fn test_save_template_assigns_missing_id() {
        let mut collections = Collections::new(MemoryStore::new());
        let saved = collections.save_template(Template::with_id("", "جديد")).unwrap();
        assert!(!saved.id.is_empty());
        assert!(collections.template(&saved.id).unwrap().is_some());
        assert!(collections.delete_template(&saved.id).unwrap());
    }

    #[test]
    fn test_templates_are_normalized_on_load() {
        let mut store = MemoryStore::new();
        store
            .set(
                "templates",
                r#"[{"id":"t1","name":"n","elements":[
                    {"id":"a","type":"text","content":"x","position":{"x":5,"y":5},"width":0.5,"height":1}
                ]},
                {"id":"t2","name":"dup","elements":[
                    {"id":"a","type":"text","content":"x","position":{"x":5,"y":5},"width":10,"height":10},
                    {"id":"a","type":"text","content":"y","position":{"x":5,"y":5},"width":10,"height":10}
                ]}]"#,
            )
            .unwrap();
        let templates = Collections::new(store).templates().unwrap();

        assert_eq!(templates.len(), 1);
        let element = &templates[0].elements()[0];
        assert_eq!(element.width, doc_model::MIN_DIMENSION);
        assert_eq!(element.height, doc_model::MIN_DIMENSION);
    }

    #[test]
    fn test_file_backed_collections_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let mut collections = Collections::new(FileStore::new(temp_dir.path()));
        collections.add_doctor("د. ليلى").unwrap();

        let reopened = Collections::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.doctors().unwrap()[0].name, "د. ليلى");
        assert!(temp_dir.path().join("doctors.json").exists());
    }
}
