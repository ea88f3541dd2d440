//! CLI for GenPin - generate images and pin them to IPFS.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use genpin::pipeline::{DEFAULT_BASE_PROMPT, DEFAULT_COUNT};
use genpin::single::{DEFAULT_OUTPUT_FILE, DEFAULT_PROMPT};
use genpin::{
    BatchPipeline, Gateway, GeminiProvider, GenerationRequest, ImageProvider, PinProvider,
    PinataProvider,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genpin")]
#[command(about = "Generate images with Gemini and pin them to IPFS through Pinata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single image and save it locally
    Image(ImageArgs),

    /// Generate prompt variations and upload each image to Pinata
    Batch(BatchArgs),

    /// Verify that both services accept the configured credentials
    Check(Credentials),
}

#[derive(Args)]
struct ImageArgs {
    /// The text prompt describing the image
    prompt: Option<String>,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
}

#[derive(Args)]
struct BatchArgs {
    /// Base prompt that style variations are appended to
    prompt: Option<String>,

    /// Number of images to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    count: u32,

    /// Pause between requests in milliseconds
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    #[command(flatten)]
    credentials: Credentials,
}

#[derive(Args)]
struct Credentials {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Pinata JWT
    #[arg(long, env = "PINATA_JWT", hide_env_values = true)]
    pinata_jwt: Option<String>,

    /// Pinata gateway host (e.g. example.mypinata.cloud)
    #[arg(long, env = "PINATA_GATEWAY")]
    gateway: Option<String>,

    /// Pinata gateway access token
    #[arg(long, env = "PINATA_GATEWAY_TOKEN", hide_env_values = true)]
    gateway_token: Option<String>,
}

struct Clients {
    generator: GeminiProvider,
    pinner: PinataProvider,
    gateway: Gateway,
}

impl Credentials {
    /// Builds every client up front so missing configuration fails before any request.
    fn into_clients(self) -> anyhow::Result<Clients> {
        let generator = gemini_provider(self.gemini_api_key)?;

        let mut pinata = PinataProvider::builder();
        if let Some(jwt) = self.pinata_jwt {
            pinata = pinata.jwt(jwt);
        }
        let pinner = pinata.build().context("Pinata is not configured")?;

        let gateway = Gateway::resolve(self.gateway, self.gateway_token)
            .context("Pinata gateway is not configured")?;

        Ok(Clients {
            generator,
            pinner,
            gateway,
        })
    }
}

fn gemini_provider(api_key: Option<String>) -> anyhow::Result<GeminiProvider> {
    let mut builder = GeminiProvider::builder();
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    builder.build().context("Gemini is not configured")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "genpin=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Image(args) => {
            generate_image(args, cli.json).await?;
        }
        Commands::Batch(args) => {
            run_batch(args, cli.json).await?;
        }
        Commands::Check(credentials) => {
            check(credentials, cli.json).await?;
        }
    }

    Ok(())
}

async fn generate_image(args: ImageArgs, json_output: bool) -> anyhow::Result<()> {
    let provider = gemini_provider(args.gemini_api_key)?;
    let prompt = args.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let request = GenerationRequest::new(prompt);

    let image = match genpin::single::generate_to_file(&provider, &request, &args.output).await
    {
        Ok(image) => image,
        Err(e) => {
            tracing::error!(error = %e, "error generating image");
            return Err(e).context("no image was written");
        }
    };

    if json_output {
        let result = serde_json::json!({
            "type": "image",
            "success": true,
            "output": args.output.display().to_string(),
            "size_bytes": image.size(),
            "format": image.format.extension(),
            "model": image.metadata.model,
            "duration_ms": image.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Image saved to {} ({} bytes)",
            args.output.display(),
            image.size()
        );
        if let Some(duration) = image.metadata.duration_ms {
            println!("Duration: {}ms", duration);
        }
    }

    Ok(())
}

async fn run_batch(args: BatchArgs, json_output: bool) -> anyhow::Result<()> {
    let clients = args.credentials.into_clients()?;
    let base_prompt = args
        .prompt
        .unwrap_or_else(|| DEFAULT_BASE_PROMPT.to_string());

    let report = BatchPipeline::new(&clients.generator, &clients.pinner, clients.gateway)
        .with_delay(Duration::from_millis(args.delay_ms))
        .run(&base_prompt, args.count)
        .await;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}

async fn check(credentials: Credentials, json_output: bool) -> anyhow::Result<()> {
    let clients = credentials.into_clients()?;

    let gemini = clients.generator.health_check().await;
    let pinata = clients.pinner.health_check().await;

    if json_output {
        let status = |r: &genpin::Result<()>| match r {
            Ok(()) => serde_json::json!({ "ok": true }),
            Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
        };
        let result = serde_json::json!({
            "gemini": status(&gemini),
            "pinata": status(&pinata),
            "gateway": clients.gateway.host(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for (name, outcome) in [
            (clients.generator.name(), &gemini),
            (clients.pinner.name(), &pinata),
        ] {
            match outcome {
                Ok(()) => println!("  ✓ {}", name),
                Err(e) => println!("  ✗ {}: {}", name, e),
            }
        }
        println!("  Gateway: {}", clients.gateway.host());
    }

    if gemini.is_err() || pinata.is_err() {
        anyhow::bail!("health check failed");
    }
    Ok(())
}
