//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::builder::Builder;
use tabled::settings::{Panel, Style};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print a titled red box around a (possibly multi-line) message on stderr
pub fn error_panel(title: &str, body: &str) {
    eprintln!("{}", style(render_panel(title, body)).red());
}

fn render_panel(title: &str, body: &str) -> String {
    let mut builder = Builder::default();
    let mut rows = 0;
    for line in body.lines() {
        builder.push_record([line.to_string()]);
        rows += 1;
    }
    if rows == 0 {
        builder.push_record([String::new()]);
    }

    let mut table = builder.build();
    table
        .with(Panel::header(title.to_string()))
        .with(Style::rounded());
    table.to_string()
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
