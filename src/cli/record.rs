//! Record command - launch the app under Instruments

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use crate::xctrace::{RecordOptions, XcTrace};

pub struct RecordArgs {
    pub app: String,
    pub template: String,
    pub device: Option<String>,
    pub time_limit: String,
    pub out: PathBuf,
}

/// Run the record command
pub fn run(args: RecordArgs) -> Result<()> {
    eprintln!(
        "{} Recording {} with the {} template for {}",
        style("●").red(),
        style(&args.app).cyan(),
        args.template,
        args.time_limit
    );

    let opts = RecordOptions {
        template: Some(args.template),
        device: args.device,
        app: args.app,
        time_limit: Some(args.time_limit),
        output: Some(args.out.clone()),
    };
    XcTrace::new().record(&opts).context("record failed")?;

    println!("{}", args.out.display());
    Ok(())
}
