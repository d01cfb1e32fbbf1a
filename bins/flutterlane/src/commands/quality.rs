//! Quality commands - passthrough toolchain invocations

use flutterlane_cli::output::Status;
use flutterlane_core::error::{Result, exit_codes};
use flutterlane_flutter::tool::FlutterTool;

/// A passthrough toolchain step
#[derive(Debug, Clone, Copy)]
pub enum QualityStep {
    Test,
    Analyze,
    Format,
    Gen,
}

impl QualityStep {
    fn name(&self) -> &'static str {
        match self {
            QualityStep::Test => "test",
            QualityStep::Analyze => "analyze",
            QualityStep::Format => "format",
            QualityStep::Gen => "gen",
        }
    }

    fn invoke(&self, tool: &FlutterTool) -> Result<()> {
        match self {
            QualityStep::Test => tool.test(),
            QualityStep::Analyze => tool.analyze(),
            QualityStep::Format => tool.format(),
            QualityStep::Gen => tool.build_runner(),
        }
    }
}

/// Run a passthrough step, surfacing the toolchain result verbatim
pub fn run(tool: &FlutterTool, step: QualityStep) -> i32 {
    if let Err(e) = tool.ensure_available() {
        Status::error(&e.to_string());
        return e.exit_code();
    }

    match step.invoke(tool) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            Status::error(&e.to_string());
            e.exit_code()
        }
    }
}
