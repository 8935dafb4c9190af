//! serving-cli - call a model serving endpoint from the shell
//!
//! Reads the token from the environment, sends one request, and prints the
//! result to stdout. Logs go to stderr.

use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use serving_client::{
    ChatMessage, ChatPromptTemplate, ChatRequest, Credential, CurlCommand, EmbeddingInput,
    GenerationParams, InferenceClient, Role, Route, Settings,
};

const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI assistant";

/// Call an OpenAI-compatible model serving endpoint
#[derive(Parser)]
#[command(name = "serving-cli", version)]
struct Cli {
    /// Serving endpoints base URL (overrides SERVING_BASE_URL / DATABRICKS_HOST)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// URL layout: `openai` or `invocations` (overrides SERVING_ROUTE)
    #[arg(long, global = true)]
    route: Option<Route>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a chat completion and print the first choice
    Chat {
        /// User message.
        prompt: String,

        /// Model to call (overrides SERVING_CHAT_MODEL).
        #[arg(short, long)]
        model: Option<String>,

        /// System message sent before the prompt.
        #[arg(short, long, default_value = DEFAULT_SYSTEM_PROMPT)]
        system: String,

        /// Maximum number of tokens to generate.
        #[arg(long, default_value_t = 256)]
        max_tokens: u32,

        /// Sampling temperature in [0, 1].
        #[arg(short, long)]
        temperature: Option<f32>,
    },

    /// Embed one or more strings and print one JSON vector per line
    Embed {
        /// Texts to embed.
        #[arg(required = true)]
        texts: Vec<String>,

        /// Model to call (overrides SERVING_EMBEDDING_MODEL).
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Render a system template plus the question and print the answer
    Prompt {
        /// Question bound to the `{question}` placeholder.
        question: String,

        /// System message template; `{name}` placeholders take --var values.
        #[arg(long)]
        system_template: String,

        /// Template variable as key=value (repeatable).
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Model to call (overrides SERVING_CHAT_MODEL).
        #[arg(short, long)]
        model: Option<String>,

        #[arg(long, default_value_t = 500)]
        max_tokens: u32,

        #[arg(short, long, default_value_t = 0.01)]
        temperature: f32,
    },

    /// Print the equivalent curl command for a chat request
    Curl {
        /// User message.
        prompt: String,

        /// Model to call (overrides SERVING_CHAT_MODEL).
        #[arg(short, long)]
        model: Option<String>,

        #[arg(long, default_value_t = 256)]
        max_tokens: u32,

        /// File name the command reads the body from.
        #[arg(long, default_value = "data.json")]
        body_file: String,

        /// Also write the body to --body-file.
        #[arg(long)]
        write_body: bool,
    },
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// A lone text goes out as a bare string, several as an array
fn embedding_input(mut texts: Vec<String>) -> EmbeddingInput {
    if texts.len() == 1 {
        EmbeddingInput::Single(texts.remove(0))
    } else {
        EmbeddingInput::Batch(texts)
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr so stdout carries only results
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "serving_client=info,serving_cli=info".into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);
    if std::env::var("SERVING_LOG_FORMAT").is_ok_and(|f| f == "json") {
        builder.json().init();
    } else {
        builder.init();
    }

    let cli = Cli::parse();

    let mut settings = Settings::from_env_with(cli.base_url)?;
    if let Some(route) = cli.route {
        settings.route = route;
    }
    info!(base_url = %settings.base_url, route = %settings.route, "Configuration loaded");

    match cli.command {
        Command::Chat {
            prompt,
            model,
            system,
            max_tokens,
            temperature,
        } => {
            if let Some(model) = model {
                settings.chat_model = model;
            }
            let mut request = ChatRequest::new(vec![
                ChatMessage::system(system),
                ChatMessage::user(prompt),
            ])
            .max_tokens(max_tokens);
            if let Some(t) = temperature {
                request = request.temperature(t);
            }

            let credential = Credential::from_env(&settings.token_var);
            let content = InferenceClient::new()
                .chat_complete(&settings.chat_endpoint(), &credential, &request)
                .await?;
            println!("{}", content);
        }

        Command::Embed { texts, model } => {
            if let Some(model) = model {
                settings.embedding_model = model;
            }
            let credential = Credential::from_env(&settings.token_var);
            let input = embedding_input(texts);
            let vectors = InferenceClient::new()
                .embed(&settings.embedding_endpoint(), &credential, input)
                .await?;
            for vector in vectors {
                println!("{}", serde_json::to_string(&vector)?);
            }
        }

        Command::Prompt {
            question,
            system_template,
            vars,
            model,
            max_tokens,
            temperature,
        } => {
            if let Some(model) = model {
                settings.chat_model = model;
            }
            let template = ChatPromptTemplate::from_messages([
                (Role::System, system_template.as_str()),
                (Role::User, "{question}"),
            ])?;
            let mut variables: HashMap<String, String> = vars.into_iter().collect();
            variables.insert("question".to_string(), question);
            let params = GenerationParams::default()
                .temperature(temperature)
                .max_tokens(max_tokens);

            let credential = Credential::from_env(&settings.token_var);
            let answer = InferenceClient::new()
                .complete_prompt(
                    &settings.chat_endpoint(),
                    &credential,
                    &template,
                    &variables,
                    params,
                )
                .await?;
            println!("{}", answer);
        }

        Command::Curl {
            prompt,
            model,
            max_tokens,
            body_file,
            write_body,
        } => {
            if let Some(model) = model {
                settings.chat_model = model;
            }
            let request = ChatRequest::new(vec![
                ChatMessage::system(DEFAULT_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ])
            .max_tokens(max_tokens);
            let command = CurlCommand::chat(&settings.chat_endpoint(), &request)?;

            if write_body {
                fs::write(&body_file, command.body())
                    .with_context(|| format!("Failed to write {}", body_file))?;
            } else {
                eprintln!("# {}:\n{}", body_file, command.body());
            }
            println!("{}", command.render(&settings.token_var, &body_file));
        }
    }

    Ok(())
}
