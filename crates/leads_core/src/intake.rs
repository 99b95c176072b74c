//! Lead intake form.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::domain::{fields, Record};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropdownOption {
    Yes,
    #[default]
    No,
    Maybe,
    #[serde(rename = "Don't know")]
    DontKnow,
}

impl DropdownOption {
    pub const ALL: [DropdownOption; 4] = [Self::Yes, Self::No, Self::Maybe, Self::DontKnow];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Maybe => "Maybe",
            Self::DontKnow => "Don't know",
        }
    }
}

impl fmt::Display for DropdownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropdownOption {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "yes" | "y" => Ok(Self::Yes),
            "no" | "n" => Ok(Self::No),
            "maybe" => Ok(Self::Maybe),
            "dontknow" => Ok(Self::DontKnow),
            _ => Err(ClientError::Validation(format!(
                "'{s}' is not one of Yes, No, Maybe, Don't know"
            ))),
        }
    }
}

/// Answers collected for one new lead. Expiry dates are kept as typed (`YYYY-MM-DD`)
/// and only sent when the matching coverage answer is `Yes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub sip_lumpsum: DropdownOption,
    pub health_insurance: DropdownOption,
    pub term_insurance: DropdownOption,
    pub two_wheeler: DropdownOption,
    pub four_wheeler: DropdownOption,
    pub health_insurance_expiry: String,
    pub term_insurance_expiry: String,
    pub two_w_insurance_expiry: String,
    pub four_w_insurance_expiry: String,
    pub referred_by: String,
}

impl LeadForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn coverage(&self) -> [(&'static str, DropdownOption, &str); 4] {
        [
            (
                fields::HEALTH_INSURANCE_EXPIRY,
                self.health_insurance,
                &self.health_insurance_expiry,
            ),
            (
                fields::TERM_INSURANCE_EXPIRY,
                self.term_insurance,
                &self.term_insurance_expiry,
            ),
            (
                fields::TWO_W_INSURANCE_EXPIRY,
                self.two_wheeler,
                &self.two_w_insurance_expiry,
            ),
            (
                fields::FOUR_W_INSURANCE_EXPIRY,
                self.four_wheeler,
                &self.four_w_insurance_expiry,
            ),
        ]
    }

    /// Checks everything the service would otherwise reject, before any request is made.
    pub fn validate(&self) -> Result<(), ClientError> {
        let mut problems = Vec::new();
        for (field, value) in [
            (fields::NAME, &self.name),
            (fields::EMAIL, &self.email),
            (fields::PHONE, &self.phone),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{field} is required"));
            }
        }
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            problems.push("email must contain '@'".to_string());
        }
        for (field, option, raw) in self.coverage() {
            let raw = raw.trim();
            if option == DropdownOption::Yes
                && !raw.is_empty()
                && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err()
            {
                problems.push(format!("{field} must be a YYYY-MM-DD date"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(problems.join("; ")))
        }
    }

    /// Upload body: every form field, no `createdAt`.
    pub fn to_record(&self) -> Record {
        let expiry = |option: DropdownOption, raw: &str| {
            if option == DropdownOption::Yes {
                raw.trim().to_string()
            } else {
                String::new()
            }
        };
        Record::from_pairs([
            (fields::NAME, self.name.trim().to_string()),
            (fields::EMAIL, self.email.trim().to_string()),
            (fields::PHONE, self.phone.trim().to_string()),
            (fields::SIP_LUMPSUM, self.sip_lumpsum.to_string()),
            (fields::HEALTH_INSURANCE, self.health_insurance.to_string()),
            (fields::TERM_INSURANCE, self.term_insurance.to_string()),
            (fields::TWO_WHEELER, self.two_wheeler.to_string()),
            (fields::FOUR_WHEELER, self.four_wheeler.to_string()),
            (
                fields::HEALTH_INSURANCE_EXPIRY,
                expiry(self.health_insurance, &self.health_insurance_expiry),
            ),
            (
                fields::TERM_INSURANCE_EXPIRY,
                expiry(self.term_insurance, &self.term_insurance_expiry),
            ),
            (
                fields::TWO_W_INSURANCE_EXPIRY,
                expiry(self.two_wheeler, &self.two_w_insurance_expiry),
            ),
            (
                fields::FOUR_W_INSURANCE_EXPIRY,
                expiry(self.four_wheeler, &self.four_w_insurance_expiry),
            ),
            (fields::REFERRED_BY, self.referred_by.trim().to_string()),
        ])
    }
}

#[cfg(test)]
#[path = "tests/intake_tests.rs"]
mod tests;
