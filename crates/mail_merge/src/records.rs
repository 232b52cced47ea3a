//! Catalog records referenced by a report: diagnoses and doctors

use crate::{AgeGroup, Gender};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A diagnosis in the catalog, filed under one age group and gender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub id: String,
    pub text: String,
    pub age_group: AgeGroup,
    pub gender: Gender,
}

impl Diagnosis {
    pub fn new(text: impl Into<String>, age_group: AgeGroup, gender: Gender) -> Self {
        Self { id: Uuid::new_v4().to_string(), text: text.into(), age_group, gender }
    }
}

/// A doctor who can sign a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
}

impl Doctor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), name: name.into() }
    }
}

/// Diagnoses offered for one report slot, in catalog order
pub fn diagnoses_for(catalog: &[Diagnosis], age_group: AgeGroup, gender: Gender) -> Vec<&Diagnosis> {
    catalog.iter().filter(|d| d.age_group == age_group && d.gender == gender).collect()
}
