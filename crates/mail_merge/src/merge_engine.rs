//! Placeholder substitution
//!
//! Scans template text for `{{name}}` tokens in a single pass. Recognized
//! tokens are replaced by their resolved value; anything else is copied
//! through verbatim. Substituted values are never rescanned.

use crate::merge_field::ReportField;
use crate::report_data::ReportData;
use crate::{MailMergeError, Result};
use regex_lite::{Captures, Regex};

const TOKEN_PATTERN: &str = r"\{\{([^{}]*)\}\}";

#[derive(Debug, Clone)]
pub struct MergeEngine {
    token: Regex,
}

impl MergeEngine {
    pub fn new() -> Result<Self> {
        let token = Regex::new(TOKEN_PATTERN).map_err(|e| MailMergeError::InvalidPattern(e.to_string()))?;
        Ok(Self { token })
    }

    /// Replace every recognized token in `content` with its value from `data`
    pub fn substitute(&self, content: &str, data: &ReportData) -> String {
        self.token
            .replace_all(content, |caps: &Captures| match ReportField::from_token(&caps[1]) {
                Some(field) => field.resolve(data),
                None => {
                    tracing::debug!(token = &caps[1], "leaving unknown placeholder verbatim");
                    caps[0].to_string()
                }
            })
            .into_owned()
    }

    /// Fields referenced by `content`, in order of first appearance
    pub fn fields_in(&self, content: &str) -> Vec<ReportField> {
        let mut fields = Vec::new();
        for caps in self.token.captures_iter(content) {
            if let Some(field) = ReportField::from_token(&caps[1]) {
                if !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }
        fields
    }

    /// Tokens in `content` that will be left verbatim
    pub fn unknown_tokens(&self, content: &str) -> Vec<String> {
        let mut unknown: Vec<String> = Vec::new();
        for caps in self.token.captures_iter(content) {
            if ReportField::from_token(&caps[1]).is_none() && !unknown.iter().any(|t| t == &caps[0]) {
                unknown.push(caps[0].to_string());
            }
        }
        unknown
    }
}
