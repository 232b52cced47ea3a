//! Report data: the flat set of values a template is rendered against

use crate::{MailMergeError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Separator between diagnoses in the combined value
pub const DIAGNOSIS_SEPARATOR: &str = "، ";

/// Combined diagnoses value when every slot is empty
pub const NO_DIAGNOSES: &str = "لا يوجد";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup { Children, Youth, Adults }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender { Male, Female }

/// One of the six diagnosis slots (age group x gender)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosisSlot {
    pub age_group: AgeGroup,
    pub gender: Gender,
}

impl DiagnosisSlot {
    /// All slots in report order
    pub const ALL: [DiagnosisSlot; 6] = [
        DiagnosisSlot::new(AgeGroup::Children, Gender::Male),
        DiagnosisSlot::new(AgeGroup::Children, Gender::Female),
        DiagnosisSlot::new(AgeGroup::Youth, Gender::Male),
        DiagnosisSlot::new(AgeGroup::Youth, Gender::Female),
        DiagnosisSlot::new(AgeGroup::Adults, Gender::Male),
        DiagnosisSlot::new(AgeGroup::Adults, Gender::Female),
    ];

    pub const fn new(age_group: AgeGroup, gender: Gender) -> Self {
        Self { age_group, gender }
    }

    /// Field name of this slot, also used as its placeholder token
    pub fn field_name(self) -> &'static str {
        match (self.age_group, self.gender) {
            (AgeGroup::Children, Gender::Male) => "diagnosisChildrenMale",
            (AgeGroup::Children, Gender::Female) => "diagnosisChildrenFemale",
            (AgeGroup::Youth, Gender::Male) => "diagnosisYouthMale",
            (AgeGroup::Youth, Gender::Female) => "diagnosisYouthFemale",
            (AgeGroup::Adults, Gender::Male) => "diagnosisAdultsMale",
            (AgeGroup::Adults, Gender::Female) => "diagnosisAdultsFemale",
        }
    }
}

/// Values entered for one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub patient_name: String,
    pub date: String,
    pub doctor_name: String,
    pub diagnosis_children_male: String,
    pub diagnosis_children_female: String,
    pub diagnosis_youth_male: String,
    pub diagnosis_youth_female: String,
    pub diagnosis_adults_male: String,
    pub diagnosis_adults_female: String,
}

impl ReportData {
    /// Empty report dated today
    pub fn new() -> Self {
        Self { date: Local::now().date_naive().format("%Y-%m-%d").to_string(), ..Default::default() }
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_patient(mut self, name: impl Into<String>) -> Self {
        self.patient_name = name.into();
        self
    }

    pub fn with_doctor(mut self, name: impl Into<String>) -> Self {
        self.doctor_name = name.into();
        self
    }

    /// Set the report date, checking it is a calendar date
    pub fn with_date(mut self, date: &str) -> Result<Self> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| MailMergeError::InvalidDate(date.to_string()))?;
        self.date = date.to_string();
        Ok(self)
    }

    pub fn with_diagnosis(mut self, slot: DiagnosisSlot, text: impl Into<String>) -> Self {
        self.set_diagnosis(slot, text);
        self
    }

    pub fn diagnosis(&self, slot: DiagnosisSlot) -> &str {
        match (slot.age_group, slot.gender) {
            (AgeGroup::Children, Gender::Male) => &self.diagnosis_children_male,
            (AgeGroup::Children, Gender::Female) => &self.diagnosis_children_female,
            (AgeGroup::Youth, Gender::Male) => &self.diagnosis_youth_male,
            (AgeGroup::Youth, Gender::Female) => &self.diagnosis_youth_female,
            (AgeGroup::Adults, Gender::Male) => &self.diagnosis_adults_male,
            (AgeGroup::Adults, Gender::Female) => &self.diagnosis_adults_female,
        }
    }

    pub fn set_diagnosis(&mut self, slot: DiagnosisSlot, text: impl Into<String>) {
        let field = match (slot.age_group, slot.gender) {
            (AgeGroup::Children, Gender::Male) => &mut self.diagnosis_children_male,
            (AgeGroup::Children, Gender::Female) => &mut self.diagnosis_children_female,
            (AgeGroup::Youth, Gender::Male) => &mut self.diagnosis_youth_male,
            (AgeGroup::Youth, Gender::Female) => &mut self.diagnosis_youth_female,
            (AgeGroup::Adults, Gender::Male) => &mut self.diagnosis_adults_male,
            (AgeGroup::Adults, Gender::Female) => &mut self.diagnosis_adults_female,
        };
        *field = text.into();
    }

    /// Non-empty diagnoses joined in slot order, or [`NO_DIAGNOSES`].
    ///
    /// Derived on demand; never stored.
    pub fn all_diagnoses(&self) -> String {
        let present: Vec<&str> = DiagnosisSlot::ALL
            .iter()
            .map(|slot| self.diagnosis(*slot))
            .filter(|text| !text.is_empty())
            .collect();
        if present.is_empty() { NO_DIAGNOSES.to_string() } else { present.join(DIAGNOSIS_SEPARATOR) }
    }

    /// Parse a report record from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_dated_today() {
        let data = ReportData::new();
        assert!(NaiveDate::parse_from_str(&data.date, "%Y-%m-%d").is_ok());
        assert!(data.patient_name.is_empty());
    }

    #[test]
    fn test_all_diagnoses_joins_non_empty() {
        let data = ReportData::default()
            .with_diagnosis(DiagnosisSlot::new(AgeGroup::Youth, Gender::Female), "ب")
            .with_diagnosis(DiagnosisSlot::new(AgeGroup::Children, Gender::Male), "أ");
        assert_eq!(data.all_diagnoses(), "أ، ب");
        assert_eq!(ReportData::default().all_diagnoses(), NO_DIAGNOSES);
    }

    #[test]
    fn test_slot_roundtrip_through_fields() {
        let mut data = ReportData::default();
        for (i, slot) in DiagnosisSlot::ALL.iter().enumerate() {
            data.set_diagnosis(*slot, i.to_string());
        }
        for (i, slot) in DiagnosisSlot::ALL.iter().enumerate() {
            assert_eq!(data.diagnosis(*slot), i.to_string());
        }
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["diagnosisAdultsFemale"], "5");
    }

    #[test]
    fn test_with_date_validates() {
        assert!(ReportData::default().with_date("2024-01-01").is_ok());
        assert!(matches!(ReportData::default().with_date("01/01/2024"), Err(MailMergeError::InvalidDate(_))));
    }

    #[test]
    fn test_from_json_partial_record() {
        let data = ReportData::from_json(r#"{"patientName":"سارة","templateId":"t1"}"#).unwrap();
        assert_eq!(data.patient_name, "سارة");
        assert_eq!(data.template_id.as_deref(), Some("t1"));
        assert!(data.date.is_empty());
    }
}
