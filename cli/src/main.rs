use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use food_core::{render, AnalysisClient, FormController, FormState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod output;
mod transport;

use cli::Cli;
use transport::Transport;

const EXIT_ERROR_PANEL: u8 = 1;
const EXIT_NOTHING_TO_SUBMIT: u8 = 2;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Ask for both fields, the way the web form lays them out.
fn prompt(form: &mut FormController) -> Result<()> {
    let barcode: String = Input::new()
        .with_prompt("Barcode Number (Optional)")
        .allow_empty(true)
        .interact_text()
        .context("reading barcode")?;
    form.set_barcode(barcode);

    let ingredients: String = Input::new()
        .with_prompt("Ingredients List")
        .allow_empty(!form.ingredients_required())
        .interact_text()
        .context("reading ingredients")?;
    form.set_ingredients(ingredients);
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.client_config();
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "client configured");
    let client = AnalysisClient::from_config(&config);
    let transport = Transport::new(&config);

    let mut form = FormController::new();
    if cli.is_blank() && std::io::stdin().is_terminal() {
        prompt(&mut form)?;
    } else {
        form.set_barcode(cli.barcode.clone().unwrap_or_default());
        form.set_ingredients(cli.ingredients.clone().unwrap_or_default());
    }

    let Some(submission) = form.submit(&client)? else {
        eprintln!("Nothing to check: provide a barcode or an ingredients list (--barcode / --ingredients).");
        return Ok(ExitCode::from(EXIT_NOTHING_TO_SUBMIT));
    };

    let show_progress = !cli.json && std::io::stderr().is_terminal();
    if show_progress {
        eprintln!("Analyzing...");
    }
    let outcome = transport.execute(submission.request);
    form.settle(&client, submission.id, outcome);

    let Some(panel) = render(form.state()) else {
        anyhow::bail!("submission {} did not settle", submission.id);
    };
    if cli.json {
        println!("{}", output::render_json(&panel)?);
    } else {
        let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        print!("{}", output::render_text(&panel, color)?);
    }

    Ok(match form.state() {
        FormState::Failed(_) => ExitCode::from(EXIT_ERROR_PANEL),
        _ => ExitCode::SUCCESS,
    })
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
