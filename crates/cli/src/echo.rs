use owo_colors::OwoColorize;

use brevis_core::Digest;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Brevis".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Summarize articles from web pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a tip message
pub fn print_tip(message: &str) {
    eprintln!("{} {}", "💡".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print elapsed time for a step
pub fn print_timing(label: &str, duration: std::time::Duration) {
    eprintln!(
        "  {} {:>8.2}ms",
        format!("{}:", label).dimmed(),
        duration.as_secs_f64() * 1000.0
    );
}

/// Render a digest as plain text with a processing details block
pub fn render_digest(digest: &Digest) -> String {
    let mut out = String::new();

    if let Some(title) = &digest.title {
        out.push_str(&format!("# {}\n\n", title));
    }
    out.push_str(&digest.summary);
    out.push_str("\n\n");
    out.push_str("Processing details\n");
    out.push_str(&format!("  Source URL: {}\n", digest.url));
    out.push_str(&format!("  Extraction method: {}\n", digest.method));
    out.push_str(&format!("  Content length: {} characters\n", format_count(digest.content_length)));
    out.push_str(&format!("  Summary length: {}\n", digest.length));
    if let Some(title) = &digest.title {
        out.push_str(&format!("  Original title: {}\n", title));
    }

    out
}

/// Format a count with thousands separators, e.g. `12,345`
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
