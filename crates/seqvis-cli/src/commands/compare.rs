use crate::cli::CompareArgs;
use crate::config::build_compare_config;
use crate::error::Result;
use crate::output;
use crate::utils::progress::CliProgressHandler;
use seqvis::engine::progress::ProgressReporter;
use seqvis::workflows;
use tracing::{info, warn};

pub fn run(args: CompareArgs) -> Result<()> {
    info!("Building comparison configuration...");
    let app_config = build_compare_config(&args)?;
    let config = &app_config.core_config;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Comparing {} ({}) with {} ({})...",
        config.structure_a.display(),
        config.chains_a.join(","),
        config.structure_b.display(),
        config.chains_b.join(",")
    );
    info!("Invoking the core comparison workflow...");
    let report = workflows::compare::run(config, &reporter)?;

    let result = &report.result;
    println!(
        "Compared {} residues; vmax = {:.2} Å, vdiff = {:.2} Å.",
        result.size(),
        report.bounds.vmax,
        report.bounds.vdiff
    );
    for detail in &result.details {
        let means = &detail.means;
        if means.ab.is_nan() {
            warn!("Region {} vs {} has no finite differences.", detail.pair.rows, detail.pair.cols);
        }
        println!(
            "  Region {} x {} ({}x{}): mean A = {:.2}, mean B = {:.2}, mean A-B = {:.2}, mean B-A = {:.2}",
            detail.pair.rows,
            detail.pair.cols,
            detail.shape.0,
            detail.shape.1,
            means.a,
            means.b,
            means.ab,
            means.ba
        );
    }

    let written = output::write_comparison(
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
