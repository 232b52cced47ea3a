//! Placeholder fields recognized in template text

use crate::report_data::{DiagnosisSlot, ReportData};

/// Fallback for patient name, date and doctor name
pub const NOT_SPECIFIED: &str = "غير محدد";

/// A field that a `{{token}}` placeholder can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    PatientName,
    Date,
    DoctorName,
    Diagnosis(DiagnosisSlot),
    AllDiagnoses,
}

impl ReportField {
    /// Every recognized field
    pub fn all() -> Vec<ReportField> {
        let mut fields = vec![Self::PatientName, Self::Date, Self::DoctorName];
        fields.extend(DiagnosisSlot::ALL.iter().map(|slot| Self::Diagnosis(*slot)));
        fields.push(Self::AllDiagnoses);
        fields
    }

    /// Look up a field by its token name (case-sensitive, no trimming)
    pub fn from_token(name: &str) -> Option<ReportField> {
        match name {
            "patientName" => Some(Self::PatientName),
            "date" => Some(Self::Date),
            "doctorName" => Some(Self::DoctorName),
            "allDiagnoses" => Some(Self::AllDiagnoses),
            other => DiagnosisSlot::ALL.iter().find(|slot| slot.field_name() == other).map(|slot| Self::Diagnosis(*slot)),
        }
    }

    pub fn token_name(&self) -> &'static str {
        match self {
            Self::PatientName => "patientName",
            Self::Date => "date",
            Self::DoctorName => "doctorName",
            Self::Diagnosis(slot) => slot.field_name(),
            Self::AllDiagnoses => "allDiagnoses",
        }
    }

    /// The placeholder as written in template content
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.token_name())
    }

    /// Value substituted for this field, with its fallback applied
    pub fn resolve(&self, data: &ReportData) -> String {
        match self {
            Self::PatientName => or_not_specified(&data.patient_name),
            Self::Date => or_not_specified(&data.date),
            Self::DoctorName => or_not_specified(&data.doctor_name),
            Self::Diagnosis(slot) => data.diagnosis(*slot).to_string(),
            Self::AllDiagnoses => data.all_diagnoses(),
        }
    }
}

fn or_not_specified(value: &str) -> String {
    if value.is_empty() { NOT_SPECIFIED.to_string() } else { value.to_string() }
}

/// A labelled placeholder offered by the designer's insert menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderPreset {
    pub label: &'static str,
    pub token: &'static str,
}

/// Presets in menu order
pub const PLACEHOLDER_PRESETS: [PlaceholderPreset; 4] = [
    PlaceholderPreset { label: "اسم المريض", token: "{{patientName}}" },
    PlaceholderPreset { label: "اسم الطبيب", token: "{{doctorName}}" },
    PlaceholderPreset { label: "التاريخ", token: "{{date}}" },
    PlaceholderPreset { label: "كل التشخيصات", token: "{{allDiagnoses}}" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgeGroup, Gender};

    #[test]
    fn test_token_lookup_is_exact() {
        assert_eq!(ReportField::from_token("patientName"), Some(ReportField::PatientName));
        assert_eq!(
            ReportField::from_token("diagnosisYouthMale"),
            Some(ReportField::Diagnosis(DiagnosisSlot::new(AgeGroup::Youth, Gender::Male)))
        );
        assert_eq!(ReportField::from_token(" patientName"), None);
        assert_eq!(ReportField::from_token("PatientName"), None);
    }

    #[test]
    fn test_every_field_round_trips_token() {
        let fields = ReportField::all();
        assert_eq!(fields.len(), 10);
        for field in fields {
            assert_eq!(ReportField::from_token(field.token_name()), Some(field));
        }
    }

    #[test]
    fn test_fallbacks() {
        let data = ReportData::default();
        assert_eq!(ReportField::PatientName.resolve(&data), NOT_SPECIFIED);
        assert_eq!(ReportField::Date.resolve(&data), NOT_SPECIFIED);
        assert_eq!(ReportField::Diagnosis(DiagnosisSlot::ALL[0]).resolve(&data), "");
        assert_eq!(ReportField::AllDiagnoses.resolve(&data), crate::NO_DIAGNOSES);
    }

    #[test]
    fn test_presets_name_known_fields() {
        for preset in PLACEHOLDER_PRESETS {
            let name = preset.token.trim_start_matches("{{").trim_end_matches("}}");
            assert!(ReportField::from_token(name).is_some(), "{}", preset.token);
        }
    }
}
