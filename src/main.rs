use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lark_image_resolver::auth::StaticTokenClient;
use lark_image_resolver::image::{
    ContentAcquirer, ImageApiService, ImageResolver, LruImageKeyCache, OpenApiImageClient,
};
use lark_image_resolver::models::Config;
use lark_image_resolver::openapi::OpenApiHttpClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "lark-image")]
#[command(about = "Upload images to Lark and fetch them back by image key")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a local file or remote URL and print its image key.
    Resolve {
        #[arg(long)]
        tenant_key: String,
        #[arg(long)]
        app_id: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        path: String,
    },
    /// Download the raw bytes behind an image key.
    Fetch {
        #[arg(long)]
        tenant_key: String,
        #[arg(long)]
        app_id: String,
        #[arg(long)]
        image_key: String,
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
}

async fn run(args: CliArgs) -> Result<()> {
    let config = Config::from_env()?;
    let token = config
        .tenant_access_token
        .clone()
        .context("LARK_TENANT_ACCESS_TOKEN not set")?;

    let http = OpenApiHttpClient::new(config.open_api_host.clone(), config.http_timeout)?;
    let api = Arc::new(OpenApiImageClient::new(
        http,
        Arc::new(StaticTokenClient::new(token)),
    ));

    match args.command {
        Command::Resolve {
            tenant_key,
            app_id,
            url,
            path,
        } => {
            let resolver = ImageResolver::new(
                ContentAcquirer::with_timeout(config.http_timeout)?,
                api,
                Arc::new(LruImageKeyCache::new(config.cache_capacity)),
            );
            let image_key = resolver.resolve(&tenant_key, &app_id, &url, &path).await?;
            println!("{}", image_key);
        }
        Command::Fetch {
            tenant_key,
            app_id,
            image_key,
            output,
        } => {
            let bytes = api.get_image(&tenant_key, &app_id, &image_key).await?;
            tokio::fs::write(&output, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lark_image_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    if let Err(e) = run(args).await {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
