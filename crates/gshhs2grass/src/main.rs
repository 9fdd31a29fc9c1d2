use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use std::fs;

use gshhs2grass::{config::Config, convert_file, dig::DigMetadata, output};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::parse();
    let query = config.query_rect()?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Could not create {}", config.output_dir.display()))?;

    let jobs = output::plan(&config.inputs, &config.output_dir, config.layout)?;
    let meta = DigMetadata::now(config.resolve_digit_name());

    info!("Processing {} inputs...", jobs.len());

    // Each input is an independent stream; the first failure aborts the run.
    jobs.par_iter().try_for_each(|(input, outputs)| -> Result<()> {
        if outputs.any_exists() && !config.overwrite {
            warn!(
                "Skipping {}: {} already exists (use --overwrite)",
                input.display(),
                outputs.ascii.display()
            );
            return Ok(());
        }

        convert_file(input, outputs, &meta, &query)?;
        Ok(())
    })?;

    Ok(())
}
