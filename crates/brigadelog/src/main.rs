//! `briglog` - CLI for brigadelog
//!
//! This binary drives the supply-needs wizard from the command line:
//! logging in, validating and submitting draft files, and rendering the
//! printable summary.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use brigadelog::catalog::{SectionId, SECTIONS};
use brigadelog::cli::{
    BrigadesCommand, Cli, Command, ConfigCommand, DraftCommand, LoginCommand, ReportCommand,
    SectionsCommand, SubmitCommand, ValidateCommand,
};
use brigadelog::remote::{ApiClient, BrigadeId, RemoteApi};
use brigadelog::render;
use brigadelog::session::{Session, SessionStore, UserProfile};
use brigadelog::validate;
use brigadelog::{init_logging, Config, Draft, Error, Phase, SubmitOutcome, Wizard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("could not load configuration")?;

    // Execute the command
    match cli.command {
        Command::Login(login_cmd) => handle_login(&config, login_cmd).await,
        Command::Logout => handle_logout(&config),
        Command::Sections(sections_cmd) => handle_sections(&sections_cmd),
        Command::Draft(draft_cmd) => handle_draft(&draft_cmd),
        Command::Validate(validate_cmd) => handle_validate(&validate_cmd),
        Command::Submit(submit_cmd) => handle_submit(&config, submit_cmd).await,
        Command::Report(report_cmd) => handle_report(&config, &report_cmd),
        Command::Brigades(brigades_cmd) => handle_brigades(&config, brigades_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn session_store(config: &Config) -> SessionStore {
    SessionStore::new(config.session_path())
}

fn client(config: &Config, token: Option<String>) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(&config.api, token)?)
}

/// Build a client carrying the stored session token, or fail when none is
/// stored.
fn authenticated_client(config: &Config) -> anyhow::Result<ApiClient> {
    let session = session_store(config).load().ok_or(Error::NotLoggedIn)?;
    client(config, Some(session.token))
}

async fn handle_login(config: &Config, cmd: LoginCommand) -> anyhow::Result<()> {
    let password = match cmd.password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let api = client(config, None)?;
    let (token, user) = api.login(&cmd.username, &password).await?;

    let store = session_store(config);
    store.save(&Session::new(token, user.clone()))?;
    println!("Logged in as {}.", display_name(&user));
    Ok(())
}

fn prompt_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

fn display_name(user: &UserProfile) -> &str {
    user.display_name.as_deref().unwrap_or(&user.username)
}

fn handle_logout(config: &Config) -> anyhow::Result<()> {
    session_store(config).clear()?;
    println!("Session cleared.");
    Ok(())
}

fn handle_sections(cmd: &SectionsCommand) -> anyhow::Result<()> {
    if cmd.json {
        let sections: Vec<_> = SECTIONS
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "display_name": s.display_name,
                    "catalog_items": s.catalog.len(),
                    "required_fields": s.required_fields.iter()
                        .map(|f| f.label())
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("Wizard sections");
    println!("---------------");
    for (index, section) in SECTIONS.iter().enumerate() {
        let marker = if section.required_fields.is_empty() {
            ""
        } else {
            "  (required fields)"
        };
        println!(
            "{:>2}. {:<28} {:>2} catalog item(s){marker}",
            index + 1,
            section.display_name,
            section.catalog.len()
        );
    }
    Ok(())
}

fn handle_draft(cmd: &DraftCommand) -> anyhow::Result<()> {
    match cmd {
        DraftCommand::Template { output } => {
            let json = Draft::new().to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(path, &json)
                        .with_context(|| format!("could not write {}", path.display()))?;
                    println!("Draft template written to {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

fn handle_validate(cmd: &ValidateCommand) -> anyhow::Result<()> {
    let draft = Draft::load(&cmd.draft)?;

    let sections: Vec<SectionId> = match cmd.section {
        Some(section) => vec![section.into()],
        None => SECTIONS.iter().map(|s| s.id).collect(),
    };

    let mut failed = false;
    for section in sections {
        let errors = validate::validate(section, &draft);
        if errors.is_empty() {
            continue;
        }
        failed = true;
        println!("{section}:");
        for error in errors {
            println!("  {error}");
        }
    }

    if failed {
        bail!("draft is not valid");
    }
    println!("Draft is valid.");
    Ok(())
}

async fn handle_submit(config: &Config, cmd: SubmitCommand) -> anyhow::Result<()> {
    let draft = Draft::load(&cmd.draft)?;
    let api = authenticated_client(config)?;
    let mut wizard = Wizard::new(draft);

    while wizard.phase() == Phase::InProgress {
        let section = wizard.current_section();
        let percent = wizard.progress() * 100.0;
        match wizard.submit(&api).await {
            Ok(SubmitOutcome::Advanced { .. }) => {
                println!("[{percent:>3.0}%] {} submitted", section.display_name);
            }
            Ok(SubmitOutcome::Finished) => {
                println!("[100%] {} submitted", section.display_name);
                break;
            }
            Ok(SubmitOutcome::Rejected { errors }) => {
                eprintln!("{} was rejected:", section.display_name);
                for error in &errors {
                    eprintln!("  {error}");
                }
                return Err(Error::validation(section.id, errors).into());
            }
            Ok(SubmitOutcome::Stale) => unreachable!("no concurrent navigation in the CLI"),
            Err(err) => {
                bail!("submission stopped at {}: {err}", section.display_name);
            }
        }
    }

    if let Some(id) = wizard.brigade_id() {
        println!("All sections submitted for brigade {id}.");
    }

    if cmd.report {
        let path = write_report(config, wizard.draft(), cmd.output.as_deref())?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn handle_report(config: &Config, cmd: &ReportCommand) -> anyhow::Result<()> {
    let draft = Draft::load(&cmd.draft)?;
    let path = write_report(config, &draft, cmd.output.as_deref())?;
    println!("Summary written to {}", path.display());
    Ok(())
}

fn write_report(
    config: &Config,
    draft: &Draft,
    output: Option<&std::path::Path>,
) -> anyhow::Result<PathBuf> {
    let options = render::RenderOptions::from_config(&config.document);
    let today = chrono::Local::now().date_naive();
    let document = render::render(draft, today, &options);

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => config
            .output_dir()
            .join(render::suggested_filename(&draft.profile.name)),
    };
    document.save(&path)?;
    Ok(path)
}

async fn handle_brigades(config: &Config, cmd: BrigadesCommand) -> anyhow::Result<()> {
    let api = authenticated_client(config)?;
    match cmd {
        BrigadesCommand::List { json } => {
            let brigades = api.list_brigades().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&brigades)?);
                return Ok(());
            }
            if brigades.is_empty() {
                println!("No brigades submitted yet.");
                return Ok(());
            }
            println!("{:<12} {:<32} {}", "ID", "Brigade", "Commander");
            for brigade in brigades {
                println!(
                    "{:<12} {:<32} {}",
                    brigade.id,
                    brigade.name,
                    brigade.commander_name.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        BrigadesCommand::Download { id, output } => {
            let brigade_id = BrigadeId::new(id);
            let bytes = api.fetch_summary(&brigade_id).await?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(format!("summary-{brigade_id}.pdf")));
            std::fs::write(&path, bytes)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("Summary downloaded to {}", path.display());
            Ok(())
        }
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Api]");
                println!("  Base URL:        {}", config.api.base_url);
                println!("  Timeout (secs):  {}", config.api.timeout_secs);
                println!();
                println!("[Document]");
                println!("  Output dir:      {}", config.output_dir().display());
                println!("  Page height:     {}", config.document.page_height);
                println!("  Page width:      {}", config.document.page_width);
                println!();
                println!("[Session]");
                println!("  Session file:    {}", config.session_path().display());
            }
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
            Ok(())
        }
    }
}
