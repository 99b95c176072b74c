use std::{
    io::{self, Write as _},
    sync::Arc,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use leads_core::{
    FilterPredicate, HttpLeadsApi, LeadTable, LeadsController, LeadsError, LoadOutcome,
    SortDirection,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod render;

use cli::{Cli, Command, ListArgs};
use config::{load_settings, Settings};
use render::{render_record, render_table};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    if let Some(email) = cli.email {
        settings.email = Some(email);
    }
    if let Some(password) = cli.password {
        settings.password = Some(password);
    }

    let base_url = settings.api_base_url()?;
    info!(api_url = %base_url, "using lead service");
    let api = HttpLeadsApi::new(base_url, settings.request_timeout())
        .context("failed to initialize http client")?;
    let controller = LeadsController::with_table(
        Arc::new(api),
        LeadTable::with_date_field(settings.date_field.clone()),
    );

    if cli.command.requires_login() {
        let (email, password) = credentials(&settings)?;
        controller
            .login(email, password)
            .await
            .map_err(surfaced)?;
    }

    match cli.command {
        Command::Signup { name } => {
            let (email, password) = credentials(&settings)?;
            controller
                .signup(&name, email, password)
                .await
                .map_err(surfaced)?;
            println!("Signup successful!");
        }
        Command::Login => {
            let (email, password) = credentials(&settings)?;
            let response = controller
                .login(email, password)
                .await
                .map_err(surfaced)?;
            println!(
                "{}",
                response.message.as_deref().unwrap_or("Login successful!")
            );
        }
        Command::Submit(args) => {
            let mut form = args.into_form();
            let stored = controller.submit_lead(&mut form).await.map_err(surfaced)?;
            println!("Form submitted successfully!");
            print!("{}", render_record(&stored));
        }
        Command::List(args) => {
            load_table(&controller).await?;
            let mut table = controller.table().await;
            apply_list_args(&mut table, args);
            let view = table.view();
            print!(
                "{}",
                render_table(table.fields(), &view, table.store().len(), table.sort_state())
            );
        }
        Command::Values { field } => {
            load_table(&controller).await?;
            let table = controller.table().await;
            warn_unknown_field(&table, &field);
            for value in table.distinct_values(&field) {
                println!("{value}");
            }
        }
        Command::Edit { phone, changes } => {
            load_table(&controller).await?;
            let record = controller
                .table()
                .await
                .store()
                .find(&phone)
                .cloned()
                .ok_or_else(|| anyhow!("no lead with phone {phone}"))?;
            let mut session = controller.begin_edit(&record)?;
            for (field, value) in changes {
                session.set(field, value)?;
            }
            let updated = controller
                .commit_edit(session)
                .await
                .map_err(|err| surfaced(err.error))?;
            println!("Record updated.");
            print!("{}", render_record(&updated));
        }
        Command::Delete { phone, yes } => {
            load_table(&controller).await?;
            if controller.table().await.store().find(&phone).is_none() {
                warn!(%phone, "lead is not in the fetched table");
            }
            let request = controller.request_delete(phone);
            if !yes && !confirm(format!("Delete lead {}?", request.phone())).await? {
                println!("Delete cancelled.");
                return Ok(());
            }
            let phone = request.phone().to_string();
            controller
                .delete_record(request.confirm())
                .await
                .map_err(surfaced)?;
            println!("Deleted lead {phone}.");
        }
    }

    Ok(())
}

fn credentials(settings: &Settings) -> Result<(&str, &str)> {
    match (settings.email.as_deref(), settings.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => bail!(
            "email and password are required; pass --email/--password or set LEADS_EMAIL/LEADS_PASSWORD"
        ),
    }
}

fn surfaced(err: LeadsError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

async fn load_table(controller: &LeadsController) -> Result<()> {
    match controller.load().await.map_err(surfaced)? {
        LoadOutcome::Applied { records } => debug!(records, "table ready"),
        LoadOutcome::Superseded => debug!("load superseded by a newer request"),
    }
    Ok(())
}

fn apply_list_args(table: &mut LeadTable, args: ListArgs) {
    if let Some(field) = args.date_field {
        table.set_date_field(field);
    }
    if let Some(needle) = args.search {
        table.add_predicate(FilterPredicate::search(needle));
    }
    for (field, needle) in args.contains {
        warn_unknown_field(table, &field);
        table.add_predicate(FilterPredicate::contains(field, needle));
    }
    for (field, value) in args.equals {
        warn_unknown_field(table, &field);
        table.add_predicate(FilterPredicate::equals(field, value));
    }
    if args.from.is_some() || args.to.is_some() {
        table.set_date_range(args.from, args.to);
    }
    if let Some(field) = args.sort {
        warn_unknown_field(table, &field);
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        table.sort_state_mut().set(field, direction);
    }
}

fn warn_unknown_field(table: &LeadTable, field: &str) {
    if !table.fields().is_empty() && !table.fields().contains(field) {
        warn!(field, "column not present in fetched data");
    }
}

async fn confirm(prompt: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || read_confirmation(&prompt))
        .await
        .context("confirmation prompt failed")?
}

fn read_confirmation(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
