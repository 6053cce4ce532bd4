use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tatami::prelude::*;

/// Render server-driven screen documents from a file or a live backend.
#[derive(Parser)]
#[command(name = "tatami-cli", version, about)]
struct Cli {
    /// Backend base URL for `fetch` and relative action URLs.
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a screen document from a JSON file.
    Render {
        /// Path to a screen document (`{"ui": [...], "data": {...}}`).
        file: PathBuf,
    },
    /// Fetch a screen from the backend and render it.
    Fetch {
        /// Screen path, e.g. `/bff/driver/home`.
        path: String,
        /// Phone number forwarded as a query parameter.
        #[arg(long)]
        phone: Option<String>,
    },
}

/// Prints routes instead of navigating; the CLI has no navigation stack.
struct PrintingNavigator;

#[async_trait::async_trait]
impl Navigator for PrintingNavigator {
    async fn push(&self, route: &str) {
        println!("[navigate] push {route}");
    }
    async fn replace(&self, route: &str) {
        println!("[navigate] replace {route}");
    }
    async fn back(&self) {
        println!("[navigate] back");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.base_url)?;

    let store = match FormStore::default_path() {
        Some(path) => FormStore::open(path),
        None => FormStore::in_memory(),
    };
    let renderer = Renderer::builder(store)
        .with_navigator(Arc::new(PrintingNavigator))
        .build();

    let document = match cli.command {
        Command::Render { file } => ScreenDocument::from_file(&file)?,
        Command::Fetch { path, phone } => {
            let client = ScreenClient::new(config);
            client.fetch(&path, phone.as_deref()).await?
        }
    };

    if !document.screen.is_empty() {
        println!("screen: {}", document.screen);
    }
    let tree = renderer.render_document(&document);
    print!("{tree}");
    Ok(())
}
