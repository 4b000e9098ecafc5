//! Command execution on top of a headless [`Session`]

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use colored::Colorize;
use community_client::{ClientConfig, HttpCommunityApi};
use community_core::{FieldErrors, RecordId};
use community_engine::api::fetch_page;
use community_engine::{AutoConfirm, Confirm, DeleteOutcome, FormMode, PageQuery, RecordForm, Session};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::args::{Assignment, Cli, Command};
use crate::output::{field_error_lines, record_table, schema_table};

type HttpSession = Session<HttpCommunityApi>;

// ============================================================================
// Confirmation
// ============================================================================

/// Asks on stdout and reads the answer from stdin
pub struct StdinConfirm;

#[async_trait(?Send)]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if let Err(err) = io::stdout().flush() {
            tracing::warn!("Could not flush prompt: {}", err);
        }

        let mut answer = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut answer).await {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!("Could not read confirmation: {}", err);
                false
            }
        }
    }
}

/// `y` or `yes`, any case
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

// ============================================================================
// Entry Point
// ============================================================================

/// Layer `--config` and `--api-url` over file and environment settings
pub fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
        config.validate()?;
    }

    Ok(config)
}

/// Run one command to completion
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!("Using API at {}", config.base_url());

    let api = Arc::new(HttpCommunityApi::new(&config)?);
    let mut session = Session::open(api, config.page_size).await?;

    match cli.command {
        Command::Schema => print_lines(&schema_table(session.schema())),
        Command::List { page, search, all } => {
            list(session, config.page_size, page, search, all).await?
        }
        Command::Create { set } => {
            let mut form = session.form(FormMode::Create);
            fill_form(&mut form, &set)?;
            save(&mut session, &mut form).await?;
        }
        Command::Update { id, set } => {
            let record = session.find_record(id).await?;
            let mut form = session.form(FormMode::Edit(record));
            fill_form(&mut form, &set)?;
            save(&mut session, &mut form).await?;
        }
        Command::Delete { id, yes } => delete(&mut session, id, yes).await?,
    }

    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

async fn list(
    session: HttpSession,
    page_size: u32,
    page: Option<u32>,
    search: Option<String>,
    all: bool,
) -> anyhow::Result<()> {
    if let Some(page) = page {
        let mut query = PageQuery::new(page, page_size);
        if let Some(term) = search {
            query = query.with_search(term);
        }

        let fetched = fetch_page(session.api(), &query).await?;
        let records: Vec<_> = fetched.items.iter().collect();
        print_lines(&record_table(session.schema(), &records));
        match fetched.next_page {
            Some(next) => println!("{}", format!("More on page {next}").dimmed()),
            None => println!("{}", "End of list".dimmed()),
        }
        return Ok(());
    }

    let mut session = match search {
        Some(term) => session.with_search(term),
        None => session,
    };

    if all {
        session.load_all().await?;
    } else {
        session.refresh().await?;
    }

    let records = session.records();
    print_lines(&record_table(session.schema(), &records));

    let next = session.list().and_then(|list| list.next_page());
    match next {
        Some(next) => println!(
            "{}",
            format!(
                "{} loaded; more with --all or --page {next}",
                records.len()
            )
            .dimmed()
        ),
        None => println!("{}", format!("{} loaded", records.len()).dimmed()),
    }
    Ok(())
}

async fn save(session: &mut HttpSession, form: &mut RecordForm) -> anyhow::Result<()> {
    let operation = if form.mode().is_edit() { "Updated" } else { "Created" };

    match session.submit(form).await {
        Ok(Some(record)) => {
            let id = record
                .id
                .map(|id| format!(" #{id}"))
                .unwrap_or_default();
            println!("{} community{}", operation.green().bold(), id);
            Ok(())
        }
        Ok(None) => bail!("a submission is already in progress"),
        Err(err) => {
            if let Some(errors) = err.field_errors() {
                report_field_errors(errors);
                bail!("{} field(s) rejected, nothing was sent", errors.len());
            }
            Err(err.into())
        }
    }
}

async fn delete(session: &mut HttpSession, id: RecordId, yes: bool) -> anyhow::Result<()> {
    let outcome = if yes {
        session.delete(id, &AutoConfirm(true)).await?
    } else {
        session.delete(id, &StdinConfirm).await?
    };

    match outcome {
        DeleteOutcome::Deleted => println!("{} community #{}", "Deleted".green().bold(), id),
        DeleteOutcome::Cancelled => println!("{}", "Cancelled".yellow()),
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Copy `--set` values into the form, rejecting names it has no input for
fn fill_form(form: &mut RecordForm, set: &[Assignment]) -> anyhow::Result<()> {
    for assignment in set {
        if !form.fields().iter().any(|f| f.name == assignment.name) {
            let known: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
            bail!(
                "unknown field `{}` (editable: {})",
                assignment.name,
                known.join(", ")
            );
        }
        form.set_value(&assignment.name, assignment.value.clone());
    }
    Ok(())
}

fn report_field_errors(errors: &FieldErrors) {
    eprintln!("{}", "Validation failed:".red().bold());
    for line in field_error_lines(errors) {
        eprintln!("{}", line);
    }
}

fn print_lines(lines: &[String]) {
    let mut lines = lines.iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use community_core::{FieldDescriptor, Schema};

    fn schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::number("subs", "Subscribers"),
            FieldDescriptor::date("createdAt", "Created"),
        ])
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes("  YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_fill_form() {
        let mut form = RecordForm::new(&schema(), FormMode::Create);
        let set = vec![Assignment {
            name: "name".into(),
            value: "Rustaceans".into(),
        }];
        fill_form(&mut form, &set).unwrap();
        assert_eq!(form.value("name"), "Rustaceans");
    }

    #[test]
    fn test_fill_form_rejects_timestamps_and_unknown() {
        let mut form = RecordForm::new(&schema(), FormMode::Create);
        let set = vec![Assignment {
            name: "createdAt".into(),
            value: "01.01.2024 10:00".into(),
        }];
        let err = fill_form(&mut form, &set).unwrap_err();
        assert!(err.to_string().contains("unknown field `createdAt`"));
        assert!(err.to_string().contains("name, subs"));
    }

    #[test]
    fn test_resolve_config_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://from-file:3000\"\npage_size = 25").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "community",
            "--config",
            &path,
            "--api-url",
            "http://from-flag:4000",
            "schema",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.api_url, "http://from-flag:4000");
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_resolve_config_rejects_bad_flag_url() {
        let cli = Cli::parse_from(["community", "--api-url", "ftp://nowhere", "schema"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn test_resolve_config_missing_file() {
        let cli = Cli::parse_from(["community", "--config", "/no/such/community.toml", "schema"]);
        let err = resolve_config(&cli).unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to load configuration"));
    }
}
