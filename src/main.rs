use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cytostat::cli::{Cli, Commands, RunArgs, ValidateArgs};
use cytostat::ctx::Ctx;
use cytostat::io;
use cytostat::pipeline::stage0_scaffold::Stage0Scaffold;
use cytostat::pipeline::stage1_input::Stage1Input;
use cytostat::pipeline::stage2_normalize::Stage2Normalize;
use cytostat::pipeline::stage3_frequency::Stage3Frequency;
use cytostat::pipeline::stage4_cohort::Stage4Cohort;
use cytostat::pipeline::stage5_stats::Stage5Stats;
use cytostat::pipeline::stage6_output::Stage6Output;
use cytostat::pipeline::Pipeline;
use cytostat::query::CohortFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Validate(args) => validate(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let cohort = if args.all_subjects {
        CohortFilter::default()
    } else {
        CohortFilter {
            condition: Some(args.condition),
            treatment: Some(args.treatment),
            sample_type: Some(args.sample_type),
            time: None,
        }
    };

    let mut ctx = Ctx::new(
        args.input,
        args.out,
        cohort,
        args.json,
        env!("CARGO_PKG_VERSION"),
    );

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Input::new()),
        Box::new(Stage2Normalize::new()),
        Box::new(Stage3Frequency::new()),
        Box::new(Stage4Cohort::new()),
        Box::new(Stage5Stats::new()),
        Box::new(Stage6Output::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_summary(&ctx)?;
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let mut ctx = Ctx::new(
        args.input,
        PathBuf::from("."),
        CohortFilter::default(),
        false,
        env!("CARGO_PKG_VERSION"),
    );

    let pipeline = Pipeline::new(vec![
        Box::new(Stage1Input::new()),
        Box::new(Stage2Normalize::new()),
        Box::new(Stage3Frequency::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_validate_summary(&ctx)?;
    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) -> Result<()> {
    let store = ctx.store()?;
    println!("cytostat validate ok");
    println!("subjects: {}", store.subject_count());
    println!("samples: {}", store.sample_count());
    println!("cell count rows: {}", store.cell_count_rows());
    let violations = store.verify();
    for violation in &violations {
        println!("violation: {}", violation);
    }
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
