//! Terminal rendering of segments and styled status text.

use crate::Segment;

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Black on yellow (for search-term highlights).
    pub const MARK: &str = "\x1b[30;43m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Renders segments for a 24-bit color terminal.
///
/// Highlights are drawn as marked text, entities in their label color followed
/// by a dimmed label name.
pub fn render_ansi(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Highlight { text } => {
                out.push_str(colors::MARK);
                out.push_str(text);
                out.push_str(colors::RESET);
            }
            Segment::Entity { text, label, color } => {
                match foreground(color) {
                    Some(fg) => out.push_str(&fg),
                    None => out.push_str(colors::BOLD),
                }
                out.push_str(text);
                out.push_str(colors::RESET);
                out.push_str(&dim(&format!("[{label}]")));
            }
        }
    }
    out
}

/// 24-bit foreground escape for a `#rrggbb` color.
fn foreground(color: &str) -> Option<String> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(format!(
        "\x1b[38;2;{};{};{}m",
        channel(0)?,
        channel(2)?,
        channel(4)?
    ))
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}
