use crate::domain::Winding;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub const BEGIN_MARKER: &str = "begin_data";
pub const END_MARKER: &str = "end_data";
pub const TIME_TOKEN: &str = "time";
pub const SOURCE_TOKEN: &str = "windingSrc";
pub const RESISTANCE_TOKEN: &str = "windingR";
pub const INDUCTANCE_TOKEN: &str = "windingL";

/// Shortest round-trip decimal, always with a fraction or exponent
/// (`-1.0`, `0.0005`, `2e-7`).
pub fn format_control_number(value: f64) -> String {
    format!("{value:?}")
}

/// Renders the control file text the solver's fixed-format reader expects.
pub fn render_control_block(time: f64, windings: &[Winding]) -> String {
    let mut output = String::with_capacity(32 + windings.len() * 96);
    output.push_str(BEGIN_MARKER);
    output.push('\n');
    push_line(&mut output, TIME_TOKEN, None, time);
    for winding in windings {
        push_line(&mut output, SOURCE_TOKEN, Some(&winding.name), winding.source);
        push_line(&mut output, RESISTANCE_TOKEN, Some(&winding.name), winding.resistance);
        push_line(&mut output, INDUCTANCE_TOKEN, Some(&winding.name), winding.inductance);
    }
    output.push_str(END_MARKER);
    output.push('\n');
    output
}

fn push_line(output: &mut String, token: &str, name: Option<&str>, value: f64) {
    let value = format_control_number(value);
    // Writing into a String cannot fail.
    let _ = match name {
        Some(name) => writeln!(output, "{} {} {}", token, name, value),
        None => writeln!(output, "{} {}", token, value),
    };
}

/// Truncates and rewrites `path` in one call.
pub fn write_text_artifact(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}
