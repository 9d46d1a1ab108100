use std::path::PathBuf;

use clap::{Parser, Subcommand};

use seo_edge::config::{load_config, ApiConfig, EdgeConfig, InjectionMode};
use seo_edge::meta;
use seo_edge::posts::{PostClient, PostEnvelope};

#[derive(Parser)]
#[command(name = "edge-cli")]
#[command(about = "Offline tools for the SEO edge", long_about = None)]
struct Cli {
    /// Config file supplying site settings (defaults when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a local HTML page with a post JSON file and print the result
    Render {
        /// HTML page to rewrite
        #[arg(long)]
        page: PathBuf,
        /// JSON file holding `{"post": {...}}`
        #[arg(long = "post")]
        post_file: PathBuf,
        #[arg(long, value_enum, default_value = "append")]
        mode: InjectionMode,
        /// Slug used for the canonical URL when the post has none
        #[arg(long, default_value = "")]
        slug: String,
    },
    /// Fetch a post from the blog API and print it
    Fetch {
        /// API base URL (overrides config)
        #[arg(long)]
        api: Option<String>,
        #[arg(long)]
        slug: String,
    },
    /// Validate the config file and print the effective configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EdgeConfig::default(),
    };

    match cli.command {
        Commands::Render {
            page,
            post_file,
            mode,
            slug,
        } => {
            let html = std::fs::read_to_string(&page)?;
            let envelope: PostEnvelope =
                serde_json::from_str(&std::fs::read_to_string(&post_file)?)?;
            let Some(post) = envelope.post else {
                eprintln!("No post in {}; page left unchanged", post_file.display());
                print!("{}", html);
                return Ok(());
            };
            print!("{}", meta::transform(&html, &post, &config.site, &slug, mode));
        }
        Commands::Fetch { api, slug } => {
            let api_config = ApiConfig {
                base_url: api.unwrap_or_else(|| config.api.base_url.clone()),
                ..config.api.clone()
            };
            let client = PostClient::new(&api_config)?;
            eprintln!("GET {}", client.post_url(&slug));
            let post = client.fetch(&slug).await?;
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
        Commands::Check => {
            println!("{}", toml::to_string_pretty(&config)?);
            eprintln!("Configuration OK");
        }
    }

    Ok(())
}
