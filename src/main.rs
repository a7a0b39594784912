//! Homelab status service and topology renderer entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use homelab_stack::api::{create_router, AppState};
use homelab_stack::config::Config;
use homelab_stack::metrics;
use homelab_stack::topology::{render_all, OutputFormat, Renderer, Variant};
use homelab_stack::utils::shutdown_signal;

/// Homelab status service and network diagram renderer.
#[derive(Parser, Debug)]
#[command(name = "homelab")]
#[command(about = "Status API and network topology diagrams for the homelab")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the status HTTP service (default).
    Serve {
        /// Interface to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render topology diagrams.
    Render {
        /// Diagram to render: logical or physical. Renders both when omitted.
        variant: Option<Variant>,

        /// Output format: png, svg, jpg, pdf or dot (overrides TOPOLOGY_FORMAT).
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output directory (overrides TOPOLOGY_OUTPUT_DIR).
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Open each diagram with the system viewer once written.
        #[arg(long)]
        show: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("homelab_stack=debug,homelab=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Some(Command::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Command::Render {
            variant,
            format,
            output_dir,
            show,
        }) => cmd_render(&config, variant, format, output_dir, show),
        Some(Command::CheckConfig) => cmd_check_config(&config),
        None => cmd_serve(config, None, None).await,
    }
}

/// Run the status service until a shutdown signal arrives.
async fn cmd_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let addr = config.bind_addr()?;

    if let Some(metrics_port) = config.metrics_port {
        metrics::install_exporter(SocketAddr::new(addr.ip(), metrics_port))?;
    }

    let app_state = AppState::new(config.env.clone());
    let router = create_router(app_state);

    let listener = TcpListener::bind(addr).await?;
    info!(environment = %config.env, "HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build, validate and render the requested diagrams.
fn cmd_render(
    config: &Config,
    variant: Option<Variant>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
    show: bool,
) -> anyhow::Result<()> {
    let mut renderer = Renderer::from_config(config)?;
    if let Some(format) = format {
        renderer = renderer.with_format(format);
    }
    if let Some(dir) = output_dir {
        renderer = renderer.with_output_dir(dir);
    }

    let variants: Vec<Variant> = match variant {
        Some(v) => vec![v],
        None => Variant::iter().collect(),
    };

    for path in render_all(&renderer, variants)? {
        println!("{}", path.display());
        if show {
            if let Err(e) = open::that(&path) {
                warn!(path = %path.display(), "Could not open diagram: {}", e);
            }
        }
    }

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HOMELAB - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.env);
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    match config.metrics_port {
        Some(port) => println!("  Metrics Port: {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("  Diagram Output: {}", config.topology_output_dir.display());
    println!("  Diagram Format: {}", config.topology_format);
    println!("  Graphviz Binary: {}", config.graphviz_dot);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
