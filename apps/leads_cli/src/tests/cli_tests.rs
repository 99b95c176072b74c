use clap::Parser;

use super::*;

#[test]
fn list_collects_repeated_filters() {
    let cli = Cli::try_parse_from([
        "leads",
        "list",
        "--contains",
        "name=ali",
        "--contains",
        "referredBy=kiran",
        "--equals",
        "healthInsurance=Yes",
        "--from",
        "2024-12-01",
        "--sort",
        "name",
        "--desc",
    ])
    .expect("parse");

    let Command::List(args) = cli.command else {
        panic!("expected list");
    };
    assert_eq!(
        args.contains,
        vec![
            ("name".to_string(), "ali".to_string()),
            ("referredBy".to_string(), "kiran".to_string())
        ]
    );
    assert_eq!(args.equals.len(), 1);
    assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 12, 1));
    assert_eq!(args.to, None);
    assert!(args.desc);
}

#[test]
fn desc_without_sort_is_rejected() {
    assert!(Cli::try_parse_from(["leads", "list", "--desc"]).is_err());
}

#[test]
fn submit_defaults_dropdowns_to_no() {
    let cli = Cli::try_parse_from([
        "leads",
        "--email",
        "ops@example.com",
        "submit",
        "--name",
        "Hari",
        "--lead-email",
        "hari@example.com",
        "--phone",
        "9",
        "--health-insurance",
        "yes",
        "--health-insurance-expiry",
        "2026-04-01",
    ])
    .expect("parse");

    assert_eq!(cli.email.as_deref(), Some("ops@example.com"));
    let Command::Submit(args) = cli.command else {
        panic!("expected submit");
    };
    let form = args.into_form();
    assert_eq!(form.email, "hari@example.com");
    assert_eq!(form.health_insurance, DropdownOption::Yes);
    assert_eq!(form.term_insurance, DropdownOption::No);
    assert_eq!(form.health_insurance_expiry, "2026-04-01");
}

#[test]
fn edit_requires_at_least_one_change() {
    assert!(Cli::try_parse_from(["leads", "edit", "1"]).is_err());
    let cli = Cli::try_parse_from(["leads", "edit", "1", "--set", "referredBy=Kiran R"])
        .expect("parse");
    let Command::Edit { phone, changes } = cli.command else {
        panic!("expected edit");
    };
    assert_eq!(phone, "1");
    assert_eq!(changes, vec![("referredBy".to_string(), "Kiran R".to_string())]);
}

#[test]
fn assignment_parsing() {
    assert_eq!(
        parse_assignment("note=a=b"),
        Ok(("note".to_string(), "a=b".to_string()))
    );
    assert_eq!(
        parse_assignment("name="),
        Ok(("name".to_string(), String::new()))
    );
    assert!(parse_assignment("novalue").is_err());
    assert!(parse_assignment("=x").is_err());
}

#[test]
fn account_commands_skip_the_login_gate() {
    let signup = Cli::try_parse_from(["leads", "signup", "--name", "Ops"]).expect("parse");
    assert!(!signup.command.requires_login());
    let login = Cli::try_parse_from(["leads", "login"]).expect("parse");
    assert!(!login.command.requires_login());
    let delete = Cli::try_parse_from(["leads", "delete", "1", "--yes"]).expect("parse");
    assert!(delete.command.requires_login());
}

#[test]
fn bad_dates_and_options_are_rejected() {
    assert!(Cli::try_parse_from(["leads", "list", "--to", "31/12/2025"]).is_err());
    assert!(Cli::try_parse_from([
        "leads",
        "submit",
        "--name",
        "A",
        "--lead-email",
        "a@b.c",
        "--phone",
        "1",
        "--two-wheeler",
        "sometimes"
    ])
    .is_err());
}
