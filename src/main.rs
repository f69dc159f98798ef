//! tldw CLI - summarise a URL and grade the summary for grounding
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;
use tldw::config::{resolve_secret, COMPLETION_API_KEY, SPEECH_API_KEY};
use tldw::{
    input, interactive, logging, render, ChatCompletionsClient, Config, ContentClassifier,
    ContentType, CreativityLevel, DocumentLoader, ExtractorSet, HttpClassifier,
    InteractionOptions, OpenAiSpeech, Voice, WorkflowBuilder, WorkflowError,
};

#[derive(Parser)]
#[command(name = "tldw")]
#[command(author, version, about = "Summarise web pages, PDFs and videos, then grade the summary", long_about = None)]
struct Cli {
    /// Path to a tldw.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a URL and grade the summary
    Summarise {
        /// Web page, PDF or YouTube video URL
        url: String,
        /// Creativity level, 0 (deterministic) to 10
        #[arg(long)]
        creativity: Option<CreativityLevel>,
        /// Read the summary aloud
        #[arg(long)]
        tts: bool,
        /// Voice for text-to-speech (implies --tts)
        #[arg(long, value_enum)]
        voice: Option<Voice>,
        /// Also print the extracted source text
        #[arg(long)]
        show_source: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show which content type a URL is classified as
    Classify {
        url: String,
    },
    /// Print the text extracted from a URL without summarising it
    Extract {
        url: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_tracing_subscriber(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let defaults = InteractionOptions::from_config(&config.summary);

    match cli.command {
        Some(Commands::Summarise {
            url,
            creativity,
            tts,
            voice,
            show_source,
            json,
        }) => {
            let mut options = defaults;
            if let Some(level) = creativity {
                options.creativity = level;
            }
            if tts || voice.is_some() {
                options.voice = Some(voice.or(options.voice).unwrap_or(config.summary.voice));
            }
            summarise(&config, &url, options, show_source, json).await?;
        }
        Some(Commands::Classify { url }) => {
            let Ok(url) = input::validate_url(&url) else {
                return Ok(());
            };
            let content_type = HttpClassifier::new()?.classify(&url).await;
            println!("{content_type}");
        }
        Some(Commands::Extract { url }) => {
            let Ok(url) = input::validate_url(&url) else {
                return Ok(());
            };
            let content_type = HttpClassifier::new()?.classify(&url).await;
            if content_type == ContentType::Unknown {
                eprintln!("[classification] could not determine the content type of {url}");
                std::process::exit(1);
            }
            let text = ExtractorSet::http()?.load(&url, content_type).await?;
            println!("{text}");
            eprintln!("--- Extracted {} characters ---", text.chars().count());
        }
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "tldw", &mut std::io::stdout());
        }
        None => {
            if !atty::is(atty::Stream::Stdin) {
                Cli::command().print_help()?;
                return Ok(());
            }
            if let Some((url, options)) = interactive::prompt(defaults)? {
                summarise(&config, &url, options, false, false).await?;
            }
        }
    }

    Ok(())
}

async fn summarise(
    config: &Config,
    url: &str,
    options: InteractionOptions,
    show_source: bool,
    json: bool,
) -> anyhow::Result<()> {
    let secrets = config.secret_store()?;

    let completion = ChatCompletionsClient::new(
        resolve_secret(COMPLETION_API_KEY, &secrets)?,
        &config.completion.model,
        Duration::from_secs(config.completion.timeout_secs),
    )?
    .with_base_url(&config.completion.base_url);

    let speech = match options.voice {
        Some(_) => Some(
            OpenAiSpeech::new(
                resolve_secret(SPEECH_API_KEY, &secrets)?,
                &config.speech.scratch_dir,
                Duration::from_secs(config.speech.timeout_secs),
            )?
            .with_base_url(&config.speech.base_url)
            .with_model(&config.speech.model),
        ),
        None => None,
    };

    let workflow = WorkflowBuilder::new()
        .classifier(HttpClassifier::new()?)
        .loader(ExtractorSet::http()?)
        .completion(completion)
        .speech(speech)
        .max_source_chars(config.summary.max_source_chars)
        .build();

    if !json {
        eprintln!(
            "Processing (creativity {}, temperature {:.1})...",
            options.creativity,
            options.creativity.temperature().value()
        );
    }

    match workflow.run(url, &options).await {
        Ok(report) if json => println!("{}", render::render_json(&report)?),
        Ok(report) => print!("{}", render::render_report(&report, show_source)),
        // A malformed URL ends the interaction without output
        Err(WorkflowError::InvalidInput(_)) => {}
        Err(error) => {
            eprintln!("{}", render::render_error(&error));
            std::process::exit(1);
        }
    }

    Ok(())
}
