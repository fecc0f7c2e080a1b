use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use folio::platform::DeviceMetrics;
use folio::{App, LoadState, LoaderOptions, Page, Viewport, DEFAULT_USER_AGENT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Populate a portfolio page from its content configuration", long_about = None)]
struct Cli {
    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page, bind its content and print the resulting HTML
    Render(RenderArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Page path or http(s)/file URL
    page: String,

    /// Content configuration path or URL, resolved against the page
    #[arg(long, default_value = "/config/content.json")]
    config: String,

    /// Directory absolute config paths resolve against for local pages
    #[arg(long)]
    site_root: Option<PathBuf>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Device preset: desktop, tablet or phone
    #[arg(long, default_value = "desktop")]
    device: String,

    /// Override the preset's viewport width
    #[arg(long)]
    width: Option<u32>,

    /// Override the preset's viewport height
    #[arg(long)]
    height: Option<u32>,

    /// Bind immediately even on narrow viewports
    #[arg(long)]
    no_idle_scheduling: bool,

    /// Skip the social links binder
    #[arg(long)]
    no_social_links: bool,

    /// Activate this tab before writing the page
    #[arg(long)]
    tab: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new().parse_filters(&cli.log_level).init();

    match cli.command {
        Commands::Render(args) => render(args).await,
    }
}

async fn render(args: RenderArgs) -> anyhow::Result<()> {
    let mut metrics = DeviceMetrics::preset(&args.device)
        .with_context(|| format!("unknown device preset `{}`", args.device))?;
    if let Some(width) = args.width {
        metrics.width = width;
    }
    if let Some(height) = args.height {
        metrics.height = height;
    }
    let viewport = Viewport { width: metrics.width, height: metrics.height };

    let mut page = Page::load(&args.page, viewport, DEFAULT_USER_AGENT)
        .await
        .with_context(|| format!("failed to load {}", args.page))?;
    page.window.emulate(&metrics);

    let options = LoaderOptions {
        config_path: args.config,
        site_root: args.site_root,
        idle_scheduling: !args.no_idle_scheduling,
        bind_social_links: !args.no_social_links,
        ..Default::default()
    };
    let mut app = App::bootstrap(page, options).await?;
    app.run_idle();

    if app.loader().state() == LoadState::Failed {
        let reason = app
            .page()
            .window
            .console()
            .last()
            .map(|m| m.text.clone())
            .unwrap_or_else(|| "content configuration failed to load".to_string());
        bail!(reason);
    }

    if let Some(tab) = &args.tab {
        if !app.set_active_tab(tab) {
            log::warn!("tab `{}` is not on this page", tab);
        }
    }

    let page = app.into_page();
    let html = page.document.to_html();
    match &args.out {
        Some(path) => {
            tokio::fs::write(path, &html)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", html),
    }
    log::info!("document digest {}", page.digest());
    Ok(())
}
