use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use namesprout::core::config::{load_config, locate_config, resolve};
use namesprout::core::error::StartupError;
use namesprout::core::prompts::load_naming_prompts;
use namesprout::core::request::{NameKind, build_request};
use namesprout::core::state::App;
use namesprout::inference::task::{self, WARMUP_TIMEOUT};
use namesprout::inference::{BackendPool, BackendRegistry};
use namesprout::tui::{self, RunOptions};

#[derive(Parser)]
#[command(
    name = "namesprout",
    version,
    about = "Ask a language model for function, variable and project names"
)]
#[command(group(ArgGroup::new("kind").required(true).args(["function", "variable", "project"])))]
struct Args {
    /// Generate function names
    #[arg(short, long)]
    function: bool,

    /// Generate variable names
    #[arg(short, long)]
    variable: bool,

    /// Generate project names
    #[arg(short, long)]
    project: bool,

    /// Naming style (identifier, label or alias, e.g. "snake_case", "camel")
    #[arg(short, long)]
    style: Option<String>,

    /// Path to config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend table to use instead of app.default_backend
    #[arg(short, long)]
    backend: Option<String>,

    /// Render below the prompt instead of using the alternate screen
    #[arg(long)]
    inline: bool,

    /// Write debug-level entries to namesprout.log
    #[arg(long)]
    debug: bool,

    /// What the name is for
    #[arg(required = true, num_args = 1..)]
    description: Vec<String>,
}

impl Args {
    fn kind(&self) -> NameKind {
        if self.variable {
            NameKind::Variable
        } else if self.project {
            NameKind::Project
        } else {
            NameKind::Function
        }
    }
}

fn init_logging(debug: bool) {
    // File logger only: stdout belongs to the TUI.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create("namesprout.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

/// Everything that can fail before the interactive loop starts, then the loop.
async fn start(args: Args) -> Result<(), StartupError> {
    let config_path = locate_config(args.config.as_deref())?;
    let config = load_config(&config_path)?;
    let resolved = resolve(&config, Some(&config_path), args.backend.as_deref())?;

    let prompts = load_naming_prompts(resolved.naming_prompt_file.as_deref())?;
    let description = args.description.join(" ");
    let request = build_request(
        &resolved,
        &prompts,
        args.kind(),
        args.style.as_deref(),
        &description,
    )?;
    info!(
        "Request: kind={}, style={}, count={}",
        request.kind, request.style, request.count
    );

    let registry = BackendRegistry::builtin();
    let mut pool = BackendPool::new(&registry, &resolved);
    let backend = pool.selected()?;
    let backend_type = resolved
        .backend_settings(&resolved.backend)
        .and_then(|settings| settings.backend_type.as_deref())
        .unwrap_or(resolved.backend.as_str());
    info!(
        "Using backend '{}' ({})",
        resolved.backend,
        registry.display_name(backend_type).unwrap_or(backend_type)
    );
    task::warm_up(&backend, WARMUP_TIMEOUT).await?;

    let app = App::new(backend, Arc::new(request));
    let options = RunOptions {
        inline: args.inline,
        clipboard: resolved.clipboard,
        ..RunOptions::default()
    };
    tui::run(app, options)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();
    init_logging(args.debug);

    log::info!("namesprout {} starting up", env!("CARGO_PKG_VERSION"));

    match start(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("namesprout: {e}");
            ExitCode::FAILURE
        }
    }
}
