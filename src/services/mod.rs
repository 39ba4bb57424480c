pub mod analyzer;
pub mod loader;
pub mod sample;
pub mod session;
pub mod stats;
pub mod visualizer;

pub use analyzer::analyze;
pub use loader::load;
pub use sample::generate_sample;
pub use session::AnalysisSession;
pub use visualizer::render;
