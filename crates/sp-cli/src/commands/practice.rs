//! Practice command implementation
//!
//! Presents questions one at a time and grades each query the user types.
//! Queries span several lines and end with `END` on a line of its own.

use anyhow::Result;
use sp_core::{Difficulty, Question, SessionStats};
use sp_verify::AttemptChecker;
use std::io::BufRead;

use crate::cli::{GlobalArgs, PracticeArgs};
use crate::commands::common::{print_attempt, print_question, print_solution, print_stats, rule};
use crate::commands::prompt::{confirm, read_block, Input, Keyword};
use crate::context::RuntimeContext;

const ACCEPTED: &[Keyword] = &[
    Keyword::Skip,
    Keyword::Solution,
    Keyword::Hint,
    Keyword::Quit,
];

/// How the next question is chosen
enum Order<'a> {
    Sequential(std::slice::Iter<'a, Question>),
    Random,
}

/// What happened to one question
enum Step {
    Next,
    Quit,
}

/// Execute the practice command
pub async fn execute(args: &PracticeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args.difficulty.map(Difficulty::from)).await?;
    let questions = ctx.project.questions.all();
    if questions.is_empty() {
        println!("No questions loaded.");
        return Ok(());
    }

    let start = match args.id {
        Some(id) => questions
            .iter()
            .position(|q| q.id == id)
            .ok_or(sp_core::CoreError::QuestionNotFound { id })?,
        None => 0,
    };

    let mut order = if args.random {
        Order::Random
    } else {
        Order::Sequential(questions[start..].iter())
    };
    // Random order still opens with the requested question
    let mut first = if args.random {
        args.id.and_then(|id| ctx.project.questions.get(id))
    } else {
        None
    };

    let checker = AttemptChecker::new(ctx.db.as_ref());
    let mut stats = SessionStats::new();
    let mut rng = rand::rng();
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let max_rows = ctx.project.config.display.max_rows;

    println!("{}", rule('='));
    println!(
        "Welcome to {}! {} questions loaded.",
        ctx.project.config.name,
        questions.len()
    );
    println!("{}", rule('='));

    loop {
        let question = match first.take() {
            Some(q) => q,
            None => match &mut order {
                Order::Sequential(iter) => match iter.next() {
                    Some(q) => q,
                    None => {
                        println!("\nYou have reached the last question.");
                        break;
                    }
                },
                Order::Random => match ctx.project.questions.random(&mut rng) {
                    Some(q) => q,
                    None => break,
                },
            },
        };

        let step = practice_question(
            &checker,
            question,
            &mut stats,
            &mut input,
            max_rows,
        )
        .await?;
        if let Step::Quit = step {
            break;
        }
    }

    println!();
    print_stats(&stats.current_stats());
    Ok(())
}

/// Run one question until it is answered, skipped, or the user quits.
///
/// A question whose reference solution cannot run ends the question, not
/// the session.
async fn practice_question<R: BufRead>(
    checker: &AttemptChecker<'_>,
    question: &Question,
    stats: &mut SessionStats,
    input: &mut R,
    max_rows: usize,
) -> Result<Step> {
    println!();
    print_question(question, false);
    println!("\n{}", rule('-'));
    println!("Enter your SQL query (type 'END' on a new line when done)");
    println!("Other commands: HINT, SKIP, SOLUTION, QUIT");
    println!("{}", rule('-'));

    loop {
        match read_block(input, ACCEPTED)? {
            Input::Eof | Input::Command(Keyword::Quit) => return Ok(Step::Quit),
            Input::Command(Keyword::Skip) => {
                println!("Question skipped.");
                return Ok(Step::Next);
            }
            Input::Command(Keyword::Solution) => {
                match checker.reference(question).await {
                    Ok(result) => print_solution(question, Some(&*result), max_rows),
                    Err(e) => {
                        print_solution(question, None, max_rows);
                        println!("✗ The solution could not be run: {}", e);
                    }
                }
                return Ok(Step::Next);
            }
            Input::Command(Keyword::Hint) => {
                match &question.hint {
                    Some(hint) => println!("Hint: {}", hint),
                    None => println!("No hint for this question."),
                }
                continue;
            }
            Input::Command(_) => continue,
            Input::Query(sql) if sql.is_empty() => {
                println!("No query entered.");
                continue;
            }
            Input::Query(sql) => {
                let attempt = match checker.check(question, &sql).await {
                    Ok(attempt) => attempt,
                    Err(e) => {
                        println!("✗ This question cannot be checked: {}", e);
                        return Ok(Step::Next);
                    }
                };
                stats.record_attempt(attempt.is_correct());

                let expected = if attempt.outcome().is_some_and(|o| !o.is_equivalent()) {
                    checker.reference(question).await.ok()
                } else {
                    None
                };
                println!();
                print_attempt(&attempt, expected.as_deref(), max_rows);

                if attempt.is_correct() || !confirm(input, "Try again?")? {
                    return Ok(Step::Next);
                }
                println!("Enter your SQL query (type 'END' on a new line when done)");
            }
        }
    }
}

#[cfg(test)]
#[path = "practice_test.rs"]
mod tests;
