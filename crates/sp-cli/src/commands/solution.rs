//! Solution command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, SolutionArgs};
use crate::commands::common::print_solution;
use crate::context::{load_project, RuntimeContext};

/// Execute the solution command
pub async fn execute(args: &SolutionArgs, global: &GlobalArgs) -> Result<()> {
    if args.no_run {
        let project = load_project(global, None)?;
        let question = project.questions.require(args.id)?;
        print_solution(question, None, project.config.display.max_rows);
        return Ok(());
    }

    let ctx = RuntimeContext::new(global, None).await?;
    let question = ctx.project.questions.require(args.id)?;
    let result = ctx
        .db
        .query(&question.solution)
        .await
        .with_context(|| format!("Solution for question {} failed to run", question.id))?;

    print_solution(question, Some(&result), ctx.project.config.display.max_rows);
    Ok(())
}
