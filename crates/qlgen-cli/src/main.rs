// qlgen entry point

use clap::Parser;

use qlgen_cli::{batch, logging, Cli, OutputStyle};
use qlgen_render::DispatcherConfig;

fn main() {
    logging::init();
    let cli = Cli::parse();
    let style = OutputStyle::default();

    match run(&cli, &style) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{}", style.error(&format!("{err:#}")));
            std::process::exit(1);
        }
    }
}

/// Run the batch; returns whether every spec succeeded
fn run(cli: &Cli, style: &OutputStyle) -> anyhow::Result<bool> {
    let specs = if cli.specs.is_empty() {
        batch::discover_specs()?
    } else {
        cli.specs.clone()
    };
    if specs.is_empty() {
        eprintln!("{}", style.warning("no spec files found"));
        return Ok(true);
    }

    let config = DispatcherConfig {
        out_dir: cli.out_dir.clone(),
        dry_run: cli.dry_run,
    };
    let outcomes = batch::run_batch(&specs, config)?;

    let mut all_ok = true;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(files) => {
                for file in files {
                    let verb = if file.written { "Generated" } else { "Would generate" };
                    println!("{}", style.success(&format!("{verb} {}", file.path.display())));
                }
            }
            Err(err) => {
                all_ok = false;
                eprintln!(
                    "{}",
                    style.error(&format!("{}: {err}", outcome.path.display()))
                );
            }
        }
    }
    Ok(all_ok)
}
