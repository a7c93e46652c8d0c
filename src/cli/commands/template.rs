//! qbank template - print a sample Aiken file.

use clap::Args;

use crate::aiken::template::{FORMAT_NOTES, SAMPLE_AIKEN};
use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Print only the sample, without format notes
    #[arg(long)]
    pub bare: bool,
}

pub fn run(ctx: &AppContext, args: &TemplateArgs) -> Result<()> {
    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "sample": SAMPLE_AIKEN,
            "notes": FORMAT_NOTES,
        })));
    }

    if !args.bare {
        for note in FORMAT_NOTES {
            println!("# {note}");
        }
        println!();
    }
    print!("{SAMPLE_AIKEN}");
    Ok(())
}
