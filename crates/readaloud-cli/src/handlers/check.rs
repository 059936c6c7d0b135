//! Check command handler.
//!
//! Reports which speech program would be used and whether the control
//! would render at all.

use readaloud_core::{ReadAloudSettings, SpeechSynthesisPort};
use readaloud_speech::{SpeechProgram, detect_engine};
use serde::Serialize;

use crate::error::CliError;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// One known speech program and where it was found.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramStatus {
    pub name: &'static str,
    pub path: Option<String>,
}

/// Result of probing the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineReport {
    /// Whether speech synthesis is available; when false the control is hidden.
    pub supported: bool,
    /// Engine that would be used, `"none"` when unsupported.
    pub engine: &'static str,
    /// Language tag that would be passed to the engine.
    pub language: String,
    pub programs: Vec<ProgramStatus>,
}

impl EngineReport {
    /// Inspect the host using `settings`.
    pub fn inspect(settings: &ReadAloudSettings) -> Result<Self, CliError> {
        let engine = detect_engine(settings)?;
        Ok(Self::from_engine(engine.as_ref(), settings))
    }

    fn from_engine(engine: &dyn SpeechSynthesisPort, settings: &ReadAloudSettings) -> Self {
        let programs = SpeechProgram::SEARCH_ORDER
            .into_iter()
            .map(|program| ProgramStatus {
                name: program.binary(),
                path: program.locate().map(|p| p.display().to_string()),
            })
            .collect();

        Self {
            supported: engine.is_supported(),
            engine: engine.name(),
            language: settings.effective_language().to_string(),
            programs,
        }
    }

    /// Human-readable rendering.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.supported {
            out.push_str(&format!(
                "{GREEN}✓ Speech available{RESET} via {BOLD}{}{RESET} ({})\n",
                self.engine, self.language
            ));
        } else {
            out.push_str(&format!(
                "{YELLOW}○ No speech engine found{RESET}: the read-aloud control is hidden\n"
            ));
        }

        for program in &self.programs {
            let status = program
                .path
                .as_deref()
                .map_or_else(|| "not found".to_string(), ToString::to_string);
            out.push_str(&format!("  {:<10} {status}\n", program.name));
        }
        out
    }
}

/// Execute the check command.
pub fn execute(settings: &ReadAloudSettings, json: bool) -> Result<(), CliError> {
    let report = EngineReport::inspect(settings)?;
    if json {
        let body = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Io(format!("failed to encode report: {e}")))?;
        println!("{body}");
    } else {
        print!("{}", report.render());
    }
    Ok(())
}
