pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

use config::Config;
use error::AppError;
use models::AnalysisResult;
use services::AnalysisSession;

/// Load, analyze, print a short summary to stdout and render the plots.
pub fn run(config: &Config) -> Result<AnalysisResult, AppError> {
    tracing::info!("Starting data analysis...");

    let mut session = AnalysisSession::new(config.data_path.clone());
    session.load_data();
    let analysis = session.analyze();
    tracing::debug!("Analysis result: {}", serde_json::to_string(&analysis)?);

    println!("{}", format_summary(&analysis));

    session.create_visualizations(&config.output_dir)?;

    tracing::info!("Analysis completed successfully!");
    Ok(analysis)
}

pub fn format_summary(analysis: &AnalysisResult) -> String {
    let missing = analysis
        .missing_values
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\n=== ANALYSIS RESULT ===\nShape: {:?}\nColumns: {:?}\nMissing values: {{{}}}",
        analysis.shape, analysis.columns, missing
    )
}
