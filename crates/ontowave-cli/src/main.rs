use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use ontowave_common::source::FsSource;
use ontowave_common::telemetry::{self, TelemetryConfig};
use ontowave_common::{
    CONFIG_LOCATION, RenderOutcome, Route, StringTarget, Viewer, ViewerSettings, candidates,
    load_config,
};
use ontowave_renderer::css::{DEFAULT_THEME, highlight_css};

mod modules_index;

#[derive(Parser)]
#[command(version, about = "OntoWave - Markdown documentation viewer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log at debug level regardless of build profile
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a route to HTML on stdout
    Render {
        /// Logical path, e.g. /guide
        route: String,

        /// Site directory holding config.json and the content roots
        #[arg(long, env = "ONTOWAVE_SITE", default_value = ".")]
        site: PathBuf,

        /// Suffix for document titles
        #[arg(long, env = "ONTOWAVE_APP_NAME", default_value = "OntoWave")]
        app_name: String,
    },
    /// List the locations tried for a route, in order
    Candidates {
        route: String,

        #[arg(long, env = "ONTOWAVE_SITE", default_value = ".")]
        site: PathBuf,
    },
    /// Print the stylesheet for highlighted code blocks
    Css {
        #[arg(long, default_value = DEFAULT_THEME)]
        theme: String,
    },
    /// Generate the modules documentation index
    ModulesIndex {
        /// Directory whose subdirectories are modules
        dir: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();

    let mut telemetry_config = TelemetryConfig::new("ontowave");
    if cli.verbose {
        telemetry_config = telemetry_config.with_level(tracing::Level::DEBUG);
    }
    telemetry::init(telemetry_config);

    match cli.command {
        Commands::Render {
            route,
            site,
            app_name,
        } => render(&route, site, app_name).await?,
        Commands::Candidates { route, site } => list_candidates(&route, site).await?,
        Commands::Css { theme } => print!("{}", highlight_css(&theme)?),
        Commands::ModulesIndex { dir, output } => write_modules_index(&dir, output.as_deref())?,
    }

    Ok(())
}

async fn render(route: &str, site: PathBuf, app_name: String) -> Result<()> {
    let settings = ViewerSettings {
        app_name,
        ..ViewerSettings::default()
    };
    let viewer = Viewer::load(FsSource::new(site), StringTarget::new(), settings).await?;

    let route = Route::new(route);
    if let RenderOutcome::Rendered { title } = viewer.render_route(&route).await {
        tracing::info!(%route, title = title.as_deref().unwrap_or("(none)"), "title");
    }
    print!("{}", viewer.target().html());
    Ok(())
}

async fn list_candidates(route: &str, site: PathBuf) -> Result<()> {
    let config = load_config(&FsSource::new(site), CONFIG_LOCATION).await?;
    for location in candidates(&config.roots, Route::new(route).path()) {
        println!("{location}");
    }
    Ok(())
}

fn write_modules_index(dir: &Path, output: Option<&Path>) -> Result<()> {
    let index = modules_index::render(&modules_index::scan(dir)?);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }
            std::fs::write(path, index).into_diagnostic()?;
            println!("Wrote {}", path.display());
        }
        None => print!("{index}"),
    }
    Ok(())
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
