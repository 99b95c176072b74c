use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use leads_core::{DropdownOption, LeadForm};

#[derive(Parser, Debug)]
#[command(name = "leads", about = "Collect and review insurance and investment leads")]
pub struct Cli {
    /// Base URL of the lead service.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Settings file; defaults to ./leads.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub email: Option<String>,
    #[arg(long, global = true)]
    pub password: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Signup {
        #[arg(long)]
        name: String,
    },
    /// Check credentials against the service.
    Login,
    /// Submit a new lead.
    Submit(SubmitArgs),
    /// Show the lead table.
    List(ListArgs),
    /// List the distinct values of one column.
    Values { field: String },
    /// Change fields of one lead, addressed by phone.
    Edit {
        phone: String,
        /// FIELD=VALUE; repeatable.
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        changes: Vec<(String, String)>,
    },
    /// Delete one lead, addressed by phone.
    Delete {
        phone: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

impl Command {
    /// Commands that need a logged-in session first.
    pub fn requires_login(&self) -> bool {
        !matches!(self, Command::Signup { .. } | Command::Login)
    }
}

#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long = "lead-email")]
    pub lead_email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, value_parser = parse_option, default_value = "No")]
    pub sip_lumpsum: DropdownOption,
    #[arg(long, value_parser = parse_option, default_value = "No")]
    pub health_insurance: DropdownOption,
    #[arg(long, default_value = "")]
    pub health_insurance_expiry: String,
    #[arg(long, value_parser = parse_option, default_value = "No")]
    pub term_insurance: DropdownOption,
    #[arg(long, default_value = "")]
    pub term_insurance_expiry: String,
    #[arg(long, value_parser = parse_option, default_value = "No")]
    pub two_wheeler: DropdownOption,
    #[arg(long, default_value = "")]
    pub two_w_insurance_expiry: String,
    #[arg(long, value_parser = parse_option, default_value = "No")]
    pub four_wheeler: DropdownOption,
    #[arg(long, default_value = "")]
    pub four_w_insurance_expiry: String,
    #[arg(long, default_value = "")]
    pub referred_by: String,
}

impl SubmitArgs {
    pub fn into_form(self) -> LeadForm {
        LeadForm {
            name: self.name,
            email: self.lead_email,
            phone: self.phone,
            sip_lumpsum: self.sip_lumpsum,
            health_insurance: self.health_insurance,
            term_insurance: self.term_insurance,
            two_wheeler: self.two_wheeler,
            four_wheeler: self.four_wheeler,
            health_insurance_expiry: self.health_insurance_expiry,
            term_insurance_expiry: self.term_insurance_expiry,
            two_w_insurance_expiry: self.two_w_insurance_expiry,
            four_w_insurance_expiry: self.four_w_insurance_expiry,
            referred_by: self.referred_by,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Match any column, case-insensitive.
    #[arg(long)]
    pub search: Option<String>,
    /// FIELD=NEEDLE substring match, case-insensitive; repeatable.
    #[arg(long, value_parser = parse_assignment)]
    pub contains: Vec<(String, String)>,
    /// FIELD=VALUE exact match; repeatable.
    #[arg(long, value_parser = parse_assignment)]
    pub equals: Vec<(String, String)>,
    /// Date column the --from/--to range applies to.
    #[arg(long)]
    pub date_field: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

pub fn parse_option(raw: &str) -> Result<DropdownOption, String> {
    raw.parse::<DropdownOption>().map_err(|err| err.to_string())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got '{raw}': {err}"))
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
