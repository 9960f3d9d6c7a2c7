use crate::cli::MapArgs;
use crate::config::build_map_config;
use crate::error::Result;
use crate::output;
use crate::utils::progress::CliProgressHandler;
use seqvis::engine::progress::ProgressReporter;
use seqvis::workflows;
use tracing::info;

pub fn run(args: MapArgs) -> Result<()> {
    info!("Building contact map configuration...");
    let app_config = build_map_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Computing contact map for {}...",
        app_config.core_config.structure.display()
    );
    info!("Invoking the core contact map workflow...");
    let report = workflows::contact_map::run(&app_config.core_config, &reporter)?;

    println!(
        "Loaded chains {} ({} residues); vmax = {:.2} Å.",
        report.loaded_chains.join(","),
        report.structure.len(),
        report.vmax
    );
    for track in &report.tracks {
        println!(
            "  Track '{}' ({:?}, {} categories)",
            track.name,
            track.kind,
            track.categories.len()
        );
    }

    let written = output::write_contact_map(
        &report,
        &app_config.output_directory,
        &app_config.output_name,
    )?;
    println!(
        "✓ Wrote {} file(s) to {}",
        written.len(),
        app_config.output_directory.display()
    );
    Ok(())
}
