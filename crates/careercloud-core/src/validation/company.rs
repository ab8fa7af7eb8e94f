//! Company rules: codes 106-107 and 200-601.

use chrono::{DateTime, Utc};

use super::{is_allowed_website, is_missing, is_phone_number, required_min_len, Verify};
use crate::error::RuleViolation;
use crate::types::{
    CompanyDescription, CompanyJob, CompanyJobDescription, CompanyJobEducation, CompanyJobSkill,
    CompanyLocation, CompanyProfile,
};

impl Verify for CompanyDescription {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let id = self.id;
        required_min_len(
            self.company_name.as_deref(),
            3,
            106,
            || format!("Company Name for {id} cannot be null."),
            || "Company Name must be of more than 2 characters.".to_string(),
        )
        .into_iter()
        .chain(required_min_len(
            self.company_description.as_deref(),
            3,
            107,
            || format!("Company Description for {id} cannot be null."),
            || "Company Description must be of more than 2 characters.".to_string(),
        ))
        .collect()
    }
}

/// No rules yet.
impl Verify for CompanyJob {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        Vec::new()
    }
}

impl Verify for CompanyJobDescription {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if is_missing(self.job_name.as_deref()) {
            out.push(RuleViolation::new(
                300,
                format!("Job Name for {} cannot be null.", self.id),
            ));
        }
        if is_missing(self.job_descriptions.as_deref()) {
            out.push(RuleViolation::new(
                301,
                format!("Job Description for {} cannot be null.", self.id),
            ));
        }

        out
    }
}

impl Verify for CompanyJobEducation {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let id = self.id;
        let mut out: Vec<RuleViolation> = required_min_len(
            self.major.as_deref(),
            2,
            200,
            || format!("Major for {id} cannot be empty"),
            || format!("Major for {id} must be at least 2 characters."),
        )
        .into_iter()
        .collect();

        if self.importance < 0 {
            out.push(RuleViolation::new(
                201,
                "Importance field's value cannot be less than 0",
            ));
        }

        out
    }
}

impl Verify for CompanyJobSkill {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        if self.importance < 0 {
            vec![RuleViolation::new(
                400,
                "Importance field value cannot be less than 0",
            )]
        } else {
            Vec::new()
        }
    }
}

impl Verify for CompanyLocation {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if is_missing(self.country_code.as_deref()) {
            out.push(RuleViolation::new(500, "Country Code cannot be empty"));
        }
        let addressed = [
            (501, "Province", self.province.as_deref()),
            (502, "Street", self.street.as_deref()),
            (503, "City", self.city.as_deref()),
            (504, "Postal Code", self.postal_code.as_deref()),
        ];
        for (code, field, value) in addressed {
            if is_missing(value) {
                out.push(RuleViolation::new(
                    code,
                    format!("{field} for {} cannot be empty", self.id),
                ));
            }
        }

        out
    }
}

impl Verify for CompanyProfile {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        match self.company_website.as_deref() {
            None | Some("") => out.push(RuleViolation::new(
                600,
                format!("Company Website for {} cannot be empty.", self.id),
            )),
            Some(site) if !is_allowed_website(site) => out.push(RuleViolation::new(
                600,
                format!(
                    "You entered '{site}' which is an invalid website address as only .ca, .com, and .biz domains are allowed."
                ),
            )),
            Some(_) => {}
        }

        match self.contact_phone.as_deref() {
            None | Some("") => {
                out.push(RuleViolation::new(601, "Contact Phone Number is required"))
            }
            Some(phone) if !is_phone_number(phone) => out.push(RuleViolation::new(
                601,
                "Contact Phone must correspond to a valid phone number (e.g., 416-555-1234).",
            )),
            Some(_) => {}
        }

        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn profile(website: &str, phone: &str) -> CompanyProfile {
        CompanyProfile {
            company_website: Some(website.to_string()),
            contact_phone: Some(phone.to_string()),
            ..CompanyProfile::new(Uuid::new_v4(), now())
        }
    }

    #[test]
    fn test_phone_without_dashes_is_one_violation() {
        let err =
            CompanyProfile::verify(&[profile("www.acme.ca", "4165551234")], now()).unwrap_err();
        assert_eq!(err.codes(), vec![601]);
        assert_eq!(
            err.violations()[0].message,
            "Contact Phone must correspond to a valid phone number (e.g., 416-555-1234)."
        );
    }

    #[test]
    fn test_website_domain_restriction() {
        let err = CompanyProfile::verify(&[profile("acme.org", "416-555-1234")], now()).unwrap_err();
        assert_eq!(err.codes(), vec![600]);
        assert!(err.violations()[0].message.contains("'acme.org'"));

        assert!(CompanyProfile::verify(&[profile("https://acme.biz", "416-555-1234")], now()).is_ok());
    }

    #[test]
    fn test_profile_violations_collected_across_batch() {
        let items = [
            profile("acme.org", "416-555-1234"),
            profile("acme.ca", "416-555-1234"),
            profile("", ""),
        ];
        let err = CompanyProfile::verify(&items, now()).unwrap_err();
        assert_eq!(err.codes(), vec![600, 600, 601]);
        assert_eq!(err.violations()[2].message, "Contact Phone Number is required");
    }

    #[test]
    fn test_description_name_and_text() {
        let mut d = CompanyDescription::new(Uuid::new_v4(), Uuid::new_v4(), "EN");
        let err = CompanyDescription::verify(&[d.clone()], now()).unwrap_err();
        assert_eq!(err.codes(), vec![106, 107]);

        d.company_name = Some("HP".into());
        d.company_description = Some("We make printers".into());
        let err = CompanyDescription::verify(&[d.clone()], now()).unwrap_err();
        assert_eq!(err.codes(), vec![106]);
        assert_eq!(
            err.violations()[0].message,
            "Company Name must be of more than 2 characters."
        );

        d.company_name = Some("IBM".into());
        assert!(CompanyDescription::verify(&[d], now()).is_ok());
    }

    #[test]
    fn test_job_education_major_and_importance() {
        let mut e = CompanyJobEducation::new(Uuid::new_v4(), Uuid::new_v4());
        e.major = Some("X".into());
        e.importance = -1;
        assert_eq!(CompanyJobEducation::verify(&[e.clone()], now()).unwrap_err().codes(), vec![200, 201]);

        e.major = Some("CS".into());
        e.importance = 0;
        assert!(CompanyJobEducation::verify(&[e], now()).is_ok());
    }

    #[test]
    fn test_job_description_fields() {
        let mut d = CompanyJobDescription::new(Uuid::new_v4(), Uuid::new_v4());
        d.job_name = Some("Engineer".into());
        assert_eq!(CompanyJobDescription::verify(&[d], now()).unwrap_err().codes(), vec![301]);
    }

    #[test]
    fn test_job_skill_importance() {
        let mut s = CompanyJobSkill::new(Uuid::new_v4(), Uuid::new_v4(), "Rust", "Senior");
        s.importance = -5;
        assert_eq!(CompanyJobSkill::verify(&[s.clone()], now()).unwrap_err().codes(), vec![400]);
        s.importance = 5;
        assert!(CompanyJobSkill::verify(&[s], now()).is_ok());
    }

    #[test]
    fn test_location_every_field_checked() {
        let mut l = CompanyLocation::new(Uuid::new_v4(), Uuid::new_v4());
        let err = CompanyLocation::verify(&[l.clone()], now()).unwrap_err();
        assert_eq!(err.codes(), vec![500, 501, 502, 503, 504]);

        l.country_code = Some("CA".into());
        l.province = Some("ON".into());
        l.street = Some("1 Yonge St".into());
        l.city = Some("Toronto".into());
        l.postal_code = Some("M5E 1W7".into());
        assert!(CompanyLocation::verify(&[l], now()).is_ok());
    }

    #[test]
    fn test_company_job_has_no_rules() {
        let job = CompanyJob::new(Uuid::new_v4(), Uuid::new_v4(), now());
        assert!(CompanyJob::verify(&[job], now()).is_ok());
        assert!(CompanyJob::verify(&[], now()).is_ok());
    }
}
