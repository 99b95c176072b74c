use super::*;

fn filled() -> LeadForm {
    LeadForm {
        name: "Priya Nair".into(),
        email: "priya@example.com".into(),
        phone: "9000000001".into(),
        ..LeadForm::default()
    }
}

#[test]
fn defaults_answer_no() {
    let form = LeadForm::default();
    assert_eq!(form.sip_lumpsum, DropdownOption::No);
    assert_eq!(form.four_wheeler, DropdownOption::No);
}

#[test]
fn required_fields_are_reported_together() {
    let err = LeadForm::default().validate().expect_err("empty form");
    let ClientError::Validation(reason) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(reason.contains("name is required"));
    assert!(reason.contains("email is required"));
    assert!(reason.contains("phone is required"));
}

#[test]
fn email_needs_an_at_sign() {
    let form = LeadForm {
        email: "priya.example.com".into(),
        ..filled()
    };
    assert!(form.validate().is_err());
    assert!(filled().validate().is_ok());
}

#[test]
fn expiry_must_be_a_date_when_coverage_is_yes() {
    let mut form = filled();
    form.health_insurance = DropdownOption::Yes;
    form.health_insurance_expiry = "June".into();
    assert!(form.validate().is_err());

    form.health_insurance_expiry = "2025-06-30".into();
    assert!(form.validate().is_ok());

    form.health_insurance = DropdownOption::Maybe;
    form.health_insurance_expiry = "June".into();
    assert!(form.validate().is_ok());
}

#[test]
fn record_omits_created_at_and_blanks_unused_expiries() {
    let mut form = filled();
    form.term_insurance = DropdownOption::Yes;
    form.term_insurance_expiry = "2026-02-01".into();
    form.two_w_insurance_expiry = "2024-01-01".into();

    let record = form.to_record();
    assert!(!record.contains_field("createdAt"));
    assert_eq!(record.text("termInsurance").as_deref(), Some("Yes"));
    assert_eq!(record.text("termInsuranceExpiry").as_deref(), Some("2026-02-01"));
    assert_eq!(record.text("twoWInsuranceExpiry").as_deref(), Some(""));
    assert_eq!(record.len(), 13);
}

#[test]
fn dropdown_parses_loose_spellings() {
    assert_eq!("yes".parse::<DropdownOption>().ok(), Some(DropdownOption::Yes));
    assert_eq!(
        "Don't know".parse::<DropdownOption>().ok(),
        Some(DropdownOption::DontKnow)
    );
    assert_eq!(
        "dont-know".parse::<DropdownOption>().ok(),
        Some(DropdownOption::DontKnow)
    );
    assert!("perhaps".parse::<DropdownOption>().is_err());
}

#[test]
fn dropdown_serializes_as_displayed() {
    let json = serde_json::to_string(&DropdownOption::DontKnow).expect("json");
    assert_eq!(json, "\"Don't know\"");
}

#[test]
fn reset_restores_defaults() {
    let mut form = filled();
    form.reset();
    assert_eq!(form, LeadForm::default());
}
