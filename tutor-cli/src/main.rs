//! vta CLI: chat REPL and one-shot quiz generation. Config from env
//! (GROQ_API_KEY / OPENAI_BASE_URL / MODEL / LLM_TIMEOUT_SECS) via .env.

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llm_client::{EnvLlmConfig, LlmClient, OpenAiLlmClient};
use prompt::LearnerContext;
use quiz_gen::QuizGenerator;
use tutor_core::ConversationId;
use tutor_engine::TutorEngine;

#[derive(Parser)]
#[command(name = "vta")]
#[command(about = "Virtual Teaching Assistant CLI: chat, quiz", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive tutoring session (reads lines from stdin; exit/quit to leave).
    Chat {
        /// Conversation id; reuse an id to continue its history.
        #[arg(short, long, default_value = "local")]
        conversation: String,
        /// Who the learner is, e.g. "a third-year CS student".
        #[arg(long, default_value = "a student")]
        context: String,
        /// Learner interests, used for the opening analogy.
        #[arg(long, default_value = "learning")]
        interests: String,
        /// Session topic; omit for general tutoring.
        #[arg(long)]
        topic: Option<String>,
        /// Detected emotion label (normally supplied by the classifier).
        #[arg(long, default_value = "Neutral")]
        emotion: String,
    },
    /// Generate a quiz from a transcript file (or stdin) and print it as JSON.
    Quiz {
        /// Transcript file; reads stdin when omitted.
        #[arg(short, long)]
        transcript: Option<PathBuf>,
        #[arg(short, long, default_value = "Medium")]
        difficulty: String,
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tutor_core::init_tracing("vta.log")?;

    let cli = Cli::parse();
    let config = EnvLlmConfig::from_env()?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "LLM client configured");
    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiLlmClient::from_config(&config));

    match cli.command {
        Commands::Chat {
            conversation,
            context,
            interests,
            topic,
            emotion,
        } => {
            let mut ctx = LearnerContext::new(context, interests).with_emotion(emotion);
            if let Some(topic) = topic {
                ctx = ctx.with_topic(topic);
            }
            run_chat(llm, conversation, ctx).await
        }
        Commands::Quiz {
            transcript,
            difficulty,
            count,
        } => run_quiz(llm, transcript, &difficulty, count).await,
    }
}

async fn run_chat(llm: Arc<dyn LlmClient>, conversation: String, ctx: LearnerContext) -> Result<()> {
    let engine = TutorEngine::new(llm);
    let id = ConversationId::from(conversation);

    if let Some(topic) = &ctx.topic {
        println!("{}\n", prompt::topic_acknowledgment(topic));
    } else {
        println!("{}\n", prompt::welcome_message("there"));
    }

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }
        let reply = engine.respond(&id, line, &ctx).await;
        println!("vta> {reply}\n");
    }
    Ok(())
}

async fn run_quiz(
    llm: Arc<dyn LlmClient>,
    transcript: Option<PathBuf>,
    difficulty: &str,
    count: usize,
) -> Result<()> {
    let text = match transcript {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading transcript {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let quiz = QuizGenerator::new(llm)
        .generate(&text, difficulty, count)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{}", serde_json::to_string_pretty(&quiz)?);
    Ok(())
}
