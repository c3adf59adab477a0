// Pipeline runner: scrape, process, attach media, publish.
//
// Runs stages once by default; --daemon loops with a fixed sleep between
// runs.

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_core::domains::media::activities::attach_media;
use content_core::domains::processing::activities::process_pending_posts;
use content_core::domains::publishing::activities::publish_validated_contents;
use content_core::domains::scraping::activities::scrape_subreddits;
use content_core::kernel::PipelineDeps;
use content_core::Config;

#[derive(Debug, Parser)]
#[command(name = "pipeline", about = "Reddit content pipeline runner")]
struct Args {
    /// Scrape trending posts from the configured subreddits
    #[arg(long)]
    scrape: bool,

    /// Generate captions for scraped posts
    #[arg(long)]
    process: bool,

    /// Find and download stock media for processed posts
    #[arg(long)]
    media: bool,

    /// Publish validated posts to the configured platforms
    #[arg(long)]
    publish: bool,

    /// Run every stage
    #[arg(long)]
    all: bool,

    /// Keep running, sleeping between runs
    #[arg(long)]
    daemon: bool,

    /// Seconds between daemon runs
    #[arg(long, default_value_t = 3600)]
    interval: u64,
}

impl Args {
    /// No stage flag at all means run everything
    fn effective_all(&self) -> bool {
        self.all || !(self.scrape || self.process || self.media || self.publish)
    }
    fn run_scrape(&self) -> bool {
        self.scrape || self.effective_all()
    }
    fn run_process(&self) -> bool {
        self.process || self.effective_all()
    }
    fn run_media(&self) -> bool {
        self.media || self.effective_all()
    }
    fn run_publish(&self, auto_publish: bool) -> bool {
        // Daemon runs publish only when auto-publish is enabled
        if self.daemon {
            return auto_publish;
        }
        self.publish || self.effective_all()
    }
}

async fn run_once(args: &Args, deps: &PipelineDeps) -> Result<()> {
    if args.run_scrape() {
        scrape_subreddits(deps).await.context("Scrape stage failed")?;
    }
    if args.run_process() {
        process_pending_posts(deps)
            .await
            .context("Process stage failed")?;
    }
    if args.run_media() {
        attach_media(deps).await.context("Media stage failed")?;
    }
    if args.run_publish(deps.config.auto_publish) {
        publish_validated_contents(deps)
            .await
            .context("Publish stage failed")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,content_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let deps = PipelineDeps::new(pool, config);

    if !args.daemon {
        run_once(&args, &deps).await?;
        return Ok(());
    }

    tracing::info!(interval = args.interval, "Starting pipeline daemon");
    loop {
        if let Err(e) = run_once(&args, &deps).await {
            tracing::error!(error = %e, "Pipeline run failed");
        }

        tracing::info!(
            "Next run in {} seconds, Ctrl-C to stop",
            args.interval
        );
        tokio::select! {
            _ = tokio::time::sleep(std::time::Duration::from_secs(args.interval)) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
