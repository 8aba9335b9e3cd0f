//! Subcommands and the helpers they share.

pub mod account;
pub mod countries;
pub mod init;
pub mod levels;
pub mod play;
pub mod practice;
pub mod status;

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use geoquiz_backend::config::{create_backend, load_config_from, GeoquizConfig};
use geoquiz_backend::SupabaseClient;
use geoquiz_core::account::Accounts;
use geoquiz_core::catalog;
use geoquiz_core::game::Game;
use geoquiz_core::mirror::ProgressMirror;
use geoquiz_core::model::{Choice, Domain, Question, QuestionType};
use geoquiz_core::session::AnswerFeedback;

/// Options accepted by every subcommand.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub user: Option<String>,
}

impl GlobalArgs {
    pub fn load_config(&self) -> Result<GeoquizConfig> {
        load_config_from(self.config.as_deref())
    }
}

pub fn parse_domain(raw: Option<&str>, config: &GeoquizConfig) -> Result<Domain> {
    match raw {
        Some(name) => name.parse::<Domain>().map_err(anyhow::Error::msg),
        None => Ok(config.default_domain),
    }
}

pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// One line read from the player.
pub enum Line {
    Text(String),
    TimedOut,
    Closed,
}

/// Line-oriented stdin shared by password prompts and answers.
///
/// Lines are read on a detached thread so a pending read never holds the
/// runtime open after the command returns.
pub struct Input {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
}

impl Input {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { lines: rx }
    }

    pub async fn read(&mut self, limit: Option<Duration>) -> Result<Line> {
        let next = match limit {
            Some(limit) => match tokio::time::timeout(limit, self.lines.recv()).await {
                Ok(next) => next,
                Err(_) => return Ok(Line::TimedOut),
            },
            None => self.lines.recv().await,
        };
        Ok(match next {
            Some(line) => Line::Text(line.context("failed to read stdin")?.trim().to_string()),
            None => Line::Closed,
        })
    }
}

/// Password from `GEOQUIZ_PASSWORD`, or the next stdin line.
pub async fn read_password(input: &mut Input) -> Result<String> {
    if let Ok(password) = std::env::var("GEOQUIZ_PASSWORD") {
        return Ok(password);
    }
    eprintln!("Password:");
    match input.read(None).await? {
        Line::Text(password) => Ok(password),
        _ => anyhow::bail!("no password given (set GEOQUIZ_PASSWORD or pipe it on stdin)"),
    }
}

pub fn require_backend(config: &GeoquizConfig) -> Result<Arc<SupabaseClient>> {
    create_backend(config)?.context(
        "no backend configured; add a [backend] section to geoquiz.toml or set GEOQUIZ_SUPABASE_URL",
    )
}

/// Offline game, or the signed-in user's game when `--user` is given.
pub async fn open_game(global: &GlobalArgs, config: &GeoquizConfig, input: &mut Input) -> Result<Game> {
    let Some(identifier) = &global.user else {
        tracing::debug!("no user given, playing offline");
        return Ok(Game::offline());
    };

    let backend = require_backend(config)?;
    let password = read_password(input).await?;
    let mut accounts = Accounts::new(backend.clone());
    let session = accounts.sign_in(identifier, &password).await?;
    eprintln!("Signed in as {}", session.email);
    Ok(Game::connect(session.user_id, ProgressMirror::new(backend)).await)
}

/// Turn a typed answer into a submission for `question`.
pub fn parse_answer(question: &Question, raw: &str) -> Option<Choice> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match question.kind {
        QuestionType::TrueFalse => match raw.to_lowercase().as_str() {
            "v" | "vrai" | "t" | "true" | "1" => Some(Choice::Truth(true)),
            "f" | "faux" | "false" | "2" => Some(Choice::Truth(false)),
            _ => None,
        },
        QuestionType::MapClick => {
            let region = catalog::find_by_name(raw)
                .map(|c| c.iso.to_string())
                .unwrap_or_else(|| raw.to_string());
            Some(Choice::Region(region))
        }
        _ => {
            if let Ok(index) = raw.parse::<usize>() {
                return question
                    .options
                    .get(index.wrapping_sub(1))
                    .map(|iso| Choice::Country(iso.clone()));
            }
            let labels = question.option_labels();
            let picked = question
                .options
                .iter()
                .zip(&labels)
                .find(|(iso, label)| iso.eq_ignore_ascii_case(raw) || label.eq_ignore_ascii_case(raw))
                .map(|(iso, _)| iso.clone());
            Some(Choice::Country(picked.unwrap_or_else(|| raw.to_string())))
        }
    }
}

pub fn print_question(question: &Question, position: usize, total: Option<usize>) {
    match total {
        Some(total) => println!("\n[{}/{}] {}", position + 1, total, question.kind.label()),
        None => println!("\n[{}] {}", position + 1, question.kind.label()),
    }
    println!("{}", question.prompt);
    if let Some(statement) = &question.statement {
        println!("  « {statement} »");
        println!("  v) Vrai   f) Faux");
    }
    for (i, label) in question.option_labels().iter().enumerate() {
        println!("  {}) {label}", i + 1);
    }
    if question.kind == QuestionType::MapClick {
        println!("  (code ISO ou nom du pays)");
    }
}

pub fn print_feedback(feedback: &AnswerFeedback) {
    if feedback.correct {
        println!("✔ Bonne réponse !");
    } else if !feedback.answered {
        println!("⏱ Temps écoulé. Réponse : {}", feedback.correct_name);
    } else {
        println!("✘ Mauvaise réponse. Réponse : {}", feedback.correct_name);
    }
    println!("  {}", feedback.explanation);
}
