use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use designlens_rs::config::ModelArgs;
use designlens_rs::llm::openai::LlmClient;
use designlens_rs::media::load_image;
use designlens_rs::server::{run_server, Engine};
use designlens_rs::*;

#[derive(Parser)]
#[command(name = "designlens", version, about = "LLM-backed design and user-flow feedback")]
struct Cli {
    #[command(flatten)]
    model: ModelArgs,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Serve the JSON API
    Serve {
        #[arg(long, env = "DESIGNLENS_ADDR", default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Review a single design screenshot
    Review {
        image: PathBuf,
        #[arg(long)]
        concise: bool,
    },
    /// Compare your design against a competitor's
    Compare { yours: PathBuf, competitor: PathBuf },
    /// Analyze a user flow from a description or a screenshot
    #[command(group(ArgGroup::new("input").required(true).args(["text", "text_file", "image"])))]
    Flow {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        text_file: Option<PathBuf>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Parse a saved model response without calling the model
    Parse {
        #[arg(long, value_enum)]
        kind: KindArg,
        /// Raw response file; stdin when omitted
        #[arg(long)]
        input_file: Option<PathBuf>,
        /// Treat a flow response as screenshot-derived (keeps competitor insights)
        #[arg(long)]
        image_source: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Design,
    Compare,
    Flow,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "designlens=info,designlens_rs=info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Cmd::Parse { kind, input_file, image_source } = &cli.cmd {
        let raw = read_input(input_file.as_deref())?;
        let kind = match kind {
            KindArg::Design => AnalysisKind::Design,
            KindArg::Compare => AnalysisKind::Comparison,
            KindArg::Flow if *image_source => AnalysisKind::Flow(FlowSource::Image),
            KindArg::Flow => AnalysisKind::Flow(FlowSource::Text),
        };
        return print_json(&assemble(kind, Some(raw.as_str()))?);
    }

    let settings = cli.model.settings();
    let client = LlmClient::new(&settings, cli.model.api_key()?)?;

    match cli.cmd {
        Cmd::Serve { addr } => run_server(Engine { llm: Arc::new(client) }, &addr).await?,
        Cmd::Review { image, concise } => {
            let detail = if concise { ReviewDetail::Concise } else { ReviewDetail::Detailed };
            print_json(&analyze_design(&client, &load_image(&image)?, detail).await?)?
        }
        Cmd::Compare { yours, competitor } => {
            let analysis = compare_designs(&client, &load_image(&yours)?, &load_image(&competitor)?).await?;
            print_json(&analysis)?
        }
        Cmd::Flow { text, text_file, image } => {
            let input = match (text, text_file, image) {
                (Some(t), _, _) => FlowInput::Text(t),
                (_, Some(p), _) => FlowInput::Text(read_input(Some(p.as_path()))?),
                (_, _, Some(p)) => FlowInput::Image(load_image(&p)?),
                _ => unreachable!("clap requires one flow input"),
            };
            print_json(&analyze_flow(&client, &input).await?)?
        }
        Cmd::Parse { .. } => unreachable!("handled above"),
    }
    Ok(())
}
