//! List command implementation

use anyhow::Result;
use serde::Serialize;
use sp_core::{Difficulty, Question};

use crate::cli::{GlobalArgs, LsArgs, OutputFormat};
use crate::context::load_project;

/// Question summary for JSON output
#[derive(Debug, Serialize)]
struct QuestionInfo<'a> {
    id: u32,
    title: &'a str,
    difficulty: Difficulty,
    topics: &'a [String],
    has_hint: bool,
}

impl<'a> From<&'a Question> for QuestionInfo<'a> {
    fn from(q: &'a Question) -> Self {
        Self {
            id: q.id,
            title: &q.title,
            difficulty: q.difficulty,
            topics: &q.topics,
            has_hint: q.hint.is_some(),
        }
    }
}

/// Whether `question` carries `topic` (case-insensitive)
fn has_topic(question: &Question, topic: &str) -> bool {
    question
        .topics
        .iter()
        .any(|t| t.eq_ignore_ascii_case(topic.trim()))
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global, args.difficulty.map(Difficulty::from))?;

    let questions: Vec<&Question> = project
        .questions
        .all()
        .iter()
        .filter(|q| args.topic.as_deref().map_or(true, |t| has_topic(q, t)))
        .collect();

    match args.output {
        OutputFormat::Json => {
            let infos: Vec<QuestionInfo> =
                questions.iter().map(|q| QuestionInfo::from(*q)).collect();
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        OutputFormat::Text => print_text(&questions),
    }

    Ok(())
}

fn print_text(questions: &[&Question]) {
    if questions.is_empty() {
        println!("No questions found.");
        return;
    }

    let title_width = questions
        .iter()
        .map(|q| q.title.chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    println!(
        "{:<5}  {:<10}  {:<width$}  TOPICS",
        "ID",
        "DIFFICULTY",
        "TITLE",
        width = title_width
    );
    println!("{}", "-".repeat(5 + 2 + 10 + 2 + title_width + 2 + 6));
    for q in questions {
        println!(
            "{:<5}  {:<10}  {:<width$}  {}",
            q.id,
            q.difficulty.as_str().to_uppercase(),
            q.title,
            q.topics.join(", "),
            width = title_width
        );
    }

    let count = |d: Difficulty| questions.iter().filter(|q| q.difficulty == d).count();
    println!(
        "\n{} questions (easy: {}, medium: {}, hard: {})",
        questions.len(),
        count(Difficulty::Easy),
        count(Difficulty::Medium),
        count(Difficulty::Hard)
    );
}
