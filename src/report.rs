//! Rendering of resolved event sets

use crate::cli::OutputFormat;
use crate::descriptor::EventDescriptor;
use crate::event_set::MethodEvents;
use anyhow::Result;

const PHASES: [&str; 3] = ["call", "completion", "faulted"];

/// Render `events` in the requested format
pub fn render(events: &[MethodEvents], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(events)),
        OutputFormat::Json => render_json(events),
    }
}

/// One line per event: `Type::method phase id=.. level=.. ... message=".."`
pub fn render_text(events: &[MethodEvents]) -> String {
    let mut out = String::new();
    for set in events {
        for (phase, descriptor) in PHASES.iter().zip(set.descriptors()) {
            out.push_str(&format!(
                "{}::{} {:<10} {}\n",
                set.type_name,
                set.method,
                phase,
                describe(descriptor)
            ));
        }
    }
    out
}

/// Pretty-printed JSON array
pub fn render_json(events: &[MethodEvents]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(events)?;
    json.push('\n');
    Ok(json)
}

fn describe(d: &EventDescriptor) -> String {
    format!(
        "id={} level={} keywords={:#x} opcode={} task={} version={} message={:?}",
        d.id, d.level, d.keywords, d.opcode, d.task, d.version, d.message
    )
}
