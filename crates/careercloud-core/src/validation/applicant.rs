//! Applicant rules: codes 101-113.

use chrono::{DateTime, Utc};

use super::{is_after, is_missing, required_min_len, Verify};
use crate::error::RuleViolation;
use crate::types::{
    ApplicantEducation, ApplicantJobApplication, ApplicantProfile, ApplicantResume,
    ApplicantSkill, ApplicantWorkHistory,
};

impl Verify for ApplicantEducation {
    fn violations(&self, now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        out.extend(required_min_len(
            self.major.as_deref(),
            3,
            107,
            || "Major field cannot be null".to_string(),
            || "Major field cannot be of less than 3 characters.".to_string(),
        ));
        if is_after(self.start_date, Some(now)) {
            out.push(RuleViolation::new(
                108,
                format!("Start date for {} cannot be greater than today's date.", self.id),
            ));
        }
        if is_after(self.start_date, self.completion_date) {
            out.push(RuleViolation::new(
                109,
                format!(
                    "Completion date for {} cannot be earlier than the start date.",
                    self.id
                ),
            ));
        }

        out
    }
}

impl Verify for ApplicantJobApplication {
    fn violations(&self, now: DateTime<Utc>) -> Vec<RuleViolation> {
        if self.application_date > now {
            vec![RuleViolation::new(
                110,
                format!("Application Date for {} cannot be greater than today.", self.id),
            )]
        } else {
            Vec::new()
        }
    }
}

impl Verify for ApplicantProfile {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if self.current_salary.is_some_and(|m| m.is_negative()) {
            out.push(RuleViolation::new(
                111,
                format!("Current Salary for {} cannot be negative.", self.id),
            ));
        }
        if self.current_rate.is_some_and(|m| m.is_negative()) {
            out.push(RuleViolation::new(
                112,
                format!("Current Rate {} cannot be negative.", self.id),
            ));
        }

        out
    }
}

impl Verify for ApplicantResume {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        if is_missing(self.resume.as_deref()) {
            vec![RuleViolation::new(113, "Resume field cannot be empty.")]
        } else {
            Vec::new()
        }
    }
}

impl Verify for ApplicantSkill {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        let mut out = Vec::new();

        if self.start_month > 12 {
            out.push(RuleViolation::new(
                101,
                format!("The Start Month for {} cannot be greater than 12.", self.id),
            ));
        }
        // 102 has always reported itself as "Start Month".
        if self.end_month > 12 {
            out.push(RuleViolation::new(
                102,
                format!("The Start Month {} cannot be greater than 12.", self.id),
            ));
        }
        if self.start_year < 1900 {
            out.push(RuleViolation::new(
                103,
                format!("The year for {} Cannot be less then 1900.", self.id),
            ));
        }
        if self.end_year < self.start_year {
            out.push(RuleViolation::new(
                104,
                format!("End year for {} cannot be less than start year.", self.id),
            ));
        }

        out
    }
}

impl Verify for ApplicantWorkHistory {
    fn violations(&self, _now: DateTime<Utc>) -> Vec<RuleViolation> {
        if super::char_len(&self.company_name) < 3 {
            vec![RuleViolation::new(
                105,
                format!("Company Name for {} must be of more than 2 characters", self.id),
            )]
        } else {
            Vec::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn education(major: &str) -> ApplicantEducation {
        ApplicantEducation {
            major: Some(major.to_string()),
            ..ApplicantEducation::new(Uuid::new_v4(), Uuid::new_v4())
        }
    }

    #[test]
    fn test_major_minimum_length() {
        let err = ApplicantEducation::verify(&[education("AI")], now()).unwrap_err();
        assert_eq!(err.codes(), vec![107]);
        assert_eq!(
            err.violations()[0].message,
            "Major field cannot be of less than 3 characters."
        );

        assert!(ApplicantEducation::verify(&[education("Art")], now()).is_ok());

        let mut missing = education("");
        missing.major = None;
        let err = ApplicantEducation::verify(&[missing], now()).unwrap_err();
        assert_eq!(err.violations()[0].message, "Major field cannot be null");
    }

    #[test]
    fn test_short_major_and_future_start_both_reported() {
        let mut item = education("AI");
        item.start_date = Some(now() + Duration::days(1));

        let err = ApplicantEducation::verify(&[item], now()).unwrap_err();
        assert_eq!(err.codes(), vec![107, 108]);
    }

    #[test]
    fn test_completion_before_start() {
        let start = now() - Duration::days(30);
        let mut item = education("Computer Science");
        item.start_date = Some(start);
        item.completion_date = Some(start - Duration::days(1));
        let err = ApplicantEducation::verify(&[item.clone()], now()).unwrap_err();
        assert_eq!(err.codes(), vec![109]);

        item.completion_date = Some(start);
        assert!(ApplicantEducation::verify(&[item.clone()], now()).is_ok());

        item.completion_date = None;
        assert!(ApplicantEducation::verify(&[item], now()).is_ok());
    }

    #[test]
    fn test_violations_collected_across_items() {
        let items = [education("AI"), education("Biology"), education("X")];
        let err = ApplicantEducation::verify(&items, now()).unwrap_err();
        assert_eq!(err.codes(), vec![107, 107]);
    }

    #[test]
    fn test_application_date_not_in_future() {
        let (id, other) = (Uuid::new_v4(), Uuid::new_v4());
        let future = ApplicantJobApplication::new(id, other, other, now() + Duration::hours(1));
        let err = ApplicantJobApplication::verify(&[future], now()).unwrap_err();
        assert_eq!(err.codes(), vec![110]);

        let today = ApplicantJobApplication::new(id, other, other, now());
        assert!(ApplicantJobApplication::verify(&[today], now()).is_ok());
    }

    #[test]
    fn test_negative_salary_and_rate() {
        let mut profile = ApplicantProfile::new(Uuid::new_v4(), Uuid::new_v4());
        profile.current_salary = Some(Money::from_minor(-1));
        profile.current_rate = Some(Money::from_minor(-100));
        let err = ApplicantProfile::verify(&[profile.clone()], now()).unwrap_err();
        assert_eq!(err.codes(), vec![111, 112]);

        profile.current_salary = Some(Money::zero());
        profile.current_rate = None;
        assert!(ApplicantProfile::verify(&[profile], now()).is_ok());
    }

    #[test]
    fn test_resume_required() {
        let mut resume = ApplicantResume::new(Uuid::new_v4(), Uuid::new_v4(), "");
        let err = ApplicantResume::verify(&[resume.clone()], now()).unwrap_err();
        assert_eq!(err.violations()[0].message, "Resume field cannot be empty.");

        resume.resume = Some("Ten years of Rust".into());
        assert!(ApplicantResume::verify(&[resume], now()).is_ok());
    }

    #[test]
    fn test_skill_month_and_year_ranges() {
        let base = ApplicantSkill::new(Uuid::new_v4(), Uuid::new_v4(), "Rust", "Expert");

        let bad_start = base.clone().with_period((13, 2015), (1, 2016));
        assert_eq!(ApplicantSkill::verify(&[bad_start], now()).unwrap_err().codes(), vec![101]);

        for month in 1..=12 {
            let ok = base.clone().with_period((month, 2015), (month, 2016));
            assert!(ApplicantSkill::verify(&[ok], now()).is_ok());
        }

        let backwards = base.clone().with_period((1, 2016), (13, 2015));
        assert_eq!(
            ApplicantSkill::verify(&[backwards], now()).unwrap_err().codes(),
            vec![102, 104]
        );

        let ancient = base.clone().with_period((1, 1899), (1, 1899));
        assert_eq!(ApplicantSkill::verify(&[ancient], now()).unwrap_err().codes(), vec![103]);

        let same_year = base.with_period((1, 2020), (12, 2020));
        assert!(ApplicantSkill::verify(&[same_year], now()).is_ok());
    }

    #[test]
    fn test_work_history_company_name() {
        let short = ApplicantWorkHistory::new(Uuid::new_v4(), Uuid::new_v4(), "IB", "CA");
        assert_eq!(
            ApplicantWorkHistory::verify(&[short], now()).unwrap_err().codes(),
            vec![105]
        );

        let ok = ApplicantWorkHistory::new(Uuid::new_v4(), Uuid::new_v4(), "IBM", "CA");
        assert!(ApplicantWorkHistory::verify(&[ok], now()).is_ok());
    }
}
