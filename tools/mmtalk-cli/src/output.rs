//! Terminal rendering for command results.
//!
//! In `--json` mode every human-oriented method is silent and commands emit
//! a single document through [`Output::json`].

use console::style;
use mmtalk_commerce::catalog::ChoiceItem;
use serde::Serialize;

#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn human(&self) -> bool {
        !self.json
    }

    /// Plain line on stdout; an empty string separates sections.
    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{msg}");
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {msg}", style("✓").green());
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {msg}", style("⚠").yellow());
        }
    }

    /// Errors are reported in both modes; JSON mode wraps them in an object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Progress detail, shown with `--verbose` only.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// `[n/total] msg`, used for replayed intents.
    pub fn step(&self, n: usize, total: usize, msg: &str) {
        if self.human() {
            let counter = format!("[{n}/{total}]");
            println!("{} {msg}", style(counter).dim());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {value}", style(key).dim());
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {item}", style("•").dim());
        }
    }

    /// Selector menu entry such as `Navy (+1,000원)`.
    pub fn choice(&self, choice: &ChoiceItem) {
        let text = choice.display();
        if choice.sold_out {
            self.list_item(&sold_out(&text));
        } else {
            self.list_item(&text);
        }
    }

    /// Left-aligned columns padded to `widths`.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if !self.human() {
            return;
        }
        let row = cols
            .iter()
            .zip(widths)
            .map(|(col, &width)| format!("{col:width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {row}");
    }

    /// Pretty-printed JSON document on stdout.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(err) => self.error(&format!("Failed to encode output: {err}")),
        }
    }
}

/// Red percentage badge, e.g. `20%`.
pub fn discount_badge(percent: u32) -> String {
    style(format!("{percent}%")).red().bold().to_string()
}

/// Dimmed text with a sold-out marker.
pub fn sold_out(text: &str) -> String {
    style(format!("{text} (품절)")).dim().to_string()
}
