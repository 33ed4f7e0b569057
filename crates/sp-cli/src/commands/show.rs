//! Show command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ShowArgs};
use crate::commands::common::print_question;
use crate::context::load_project;

/// Execute the show command
pub async fn execute(args: &ShowArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global, None)?;
    let question = project.questions.require(args.id)?;

    print_question(question, args.hint);
    if !args.hint && question.hint.is_some() {
        println!("\n(run with --hint to see the hint)");
    }
    Ok(())
}
