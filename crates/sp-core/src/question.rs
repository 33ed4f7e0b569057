//! Question definitions and the read-only question repository
//!
//! Questions ship as JSON arrays, one file per difficulty
//! (`easy_questions.json`, `medium_questions.json`, `hard_questions.json`).
//! Every record is validated when it is loaded; nothing downstream sees a
//! partially-formed question.

use crate::error::{CoreError, CoreResult};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in load order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase name used in files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Name of the question file holding this difficulty
    pub fn file_name(&self) -> String {
        format!("{}_questions.json", self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(CoreError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// A single practice question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// Unique identifier across all loaded files
    pub id: u32,

    /// Short title
    pub title: String,

    /// Problem statement shown to the user
    pub description: String,

    /// Optional hint
    pub hint: Option<String>,

    /// Difficulty bucket
    pub difficulty: Difficulty,

    /// Topic tags, in file order
    pub topics: Vec<String>,

    /// Reference solution query
    pub solution: String,

    /// Explicit column names the answer must produce
    pub expected_columns: Option<Vec<String>>,
}

/// Record shape as written in question files, before validation
#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: Option<u32>,
    title: Option<String>,
    description: Option<String>,
    hint: Option<String>,
    difficulty: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    solution: Option<String>,
    expected_columns: Option<Vec<String>>,
}

impl RawQuestion {
    fn into_question(self, index: usize, path: &Path) -> CoreResult<Question> {
        let path_str = path.display().to_string();
        let id = self.id.ok_or_else(|| CoreError::QuestionParseError {
            path: path_str.clone(),
            details: format!("record {} is missing required field 'id'", index + 1),
        })?;

        let invalid = |reason: String| CoreError::QuestionInvalid {
            id,
            path: path_str.clone(),
            reason,
        };

        let title = require_text(self.title, "title").map_err(&invalid)?;
        let description = self
            .description
            .ok_or_else(|| invalid("missing required field 'description'".to_string()))?;
        let solution = require_text(self.solution, "solution").map_err(&invalid)?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| invalid("missing required field 'difficulty'".to_string()))?
            .parse::<Difficulty>()
            .map_err(|e| invalid(e.to_string()))?;

        if let Some(columns) = &self.expected_columns {
            validate_expected_columns(columns).map_err(&invalid)?;
        }

        Ok(Question {
            id,
            title,
            description,
            hint: self.hint.filter(|h| !h.trim().is_empty()),
            difficulty,
            topics: self.topics,
            solution,
            expected_columns: self.expected_columns,
        })
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        None => Err(format!("missing required field '{}'", field)),
        Some(v) if v.trim().is_empty() => Err(format!("field '{}' must not be empty", field)),
        Some(v) => Ok(v),
    }
}

fn validate_expected_columns(columns: &[String]) -> Result<(), String> {
    if columns.is_empty() {
        return Err("expected_columns must not be empty when present".to_string());
    }
    let mut seen = HashSet::new();
    for column in columns {
        if column.trim().is_empty() {
            return Err("expected_columns contains an empty name".to_string());
        }
        if !seen.insert(column.to_lowercase()) {
            return Err(format!("expected_columns lists '{}' more than once", column));
        }
    }
    Ok(())
}

/// Parse and validate the contents of one question file.
///
/// When `expected` is set, every record must declare that difficulty.
pub fn parse_questions(
    content: &str,
    path: &Path,
    expected: Option<Difficulty>,
) -> CoreResult<Vec<Question>> {
    let raw: Vec<RawQuestion> =
        serde_json::from_str(content).map_err(|e| CoreError::QuestionParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            let question = record.into_question(index, path)?;
            match expected {
                Some(d) if d != question.difficulty => Err(CoreError::QuestionInvalid {
                    id: question.id,
                    path: path.display().to_string(),
                    reason: format!(
                        "difficulty '{}' does not match file for '{}' questions",
                        question.difficulty, d
                    ),
                }),
                _ => Ok(question),
            }
        })
        .collect()
}

/// Immutable collection of validated questions
#[derive(Debug, Clone, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Load question files from each directory.
    ///
    /// `difficulty` restricts loading to one bucket; `None` loads all three.
    /// A missing file is skipped with a warning.
    pub fn load(paths: &[PathBuf], difficulty: Option<Difficulty>) -> CoreResult<Self> {
        let selected: Vec<Difficulty> = match difficulty {
            Some(d) => vec![d],
            None => Difficulty::ALL.to_vec(),
        };

        let mut questions = Vec::new();
        let mut origins: HashMap<u32, PathBuf> = HashMap::new();

        for d in selected {
            for dir in paths {
                let file = dir.join(d.file_name());
                if !file.exists() {
                    log::warn!("Question file not found, skipping: {}", file.display());
                    continue;
                }

                let content =
                    std::fs::read_to_string(&file).map_err(|e| CoreError::IoWithPath {
                        path: file.display().to_string(),
                        source: e,
                    })?;

                for question in parse_questions(&content, &file, Some(d))? {
                    if let Some(previous) = origins.get(&question.id) {
                        return Err(CoreError::DuplicateQuestion {
                            id: question.id,
                            path1: previous.display().to_string(),
                            path2: file.display().to_string(),
                        });
                    }
                    origins.insert(question.id, file.clone());
                    questions.push(question);
                }
            }
        }

        log::debug!("Loaded {} questions", questions.len());
        Ok(Self { questions })
    }

    /// All questions in load order
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    /// Look up a question by id
    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Look up a question by id, failing when absent
    pub fn require(&self, id: u32) -> CoreResult<&Question> {
        self.get(id).ok_or(CoreError::QuestionNotFound { id })
    }

    /// Pick a question uniformly at random
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Question> {
        self.questions.choose(rng)
    }

    /// Number of questions per difficulty (all buckets present)
    pub fn counts_by_difficulty(&self) -> BTreeMap<Difficulty, usize> {
        let mut counts: BTreeMap<Difficulty, usize> =
            Difficulty::ALL.iter().map(|d| (*d, 0)).collect();
        for q in &self.questions {
            *counts.entry(q.difficulty).or_default() += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
#[path = "question_test.rs"]
mod tests;
