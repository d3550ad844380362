//! Rich console output: panels, tables, JSON and progress helpers.

use super::output::Output;
use super::text::ToLogText;
use crate::error::Result;
use crate::indent::IndentCoordinator;
use crate::progress::{
    LayeredProgressSession, ProgressBarOpts, SessionOptions, StageDescriptor, StyleOptions,
    TrackedSequence,
};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use console::{measure_text_width, pad_str, Alignment, Style};
use indicatif::ProgressBar;
use std::fmt::{self, Display};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Colored output beyond single log lines.
///
/// Every block is prefixed with the shared indentation, line by line.
#[derive(Debug, Clone)]
pub struct Wizard {
    output: Arc<Output>,
    indent: Arc<IndentCoordinator>,
    hidden_progress: bool,
    tick_interval: Duration,
}

impl Wizard {
    pub fn new(output: Arc<Output>, indent: Arc<IndentCoordinator>) -> Self {
        Self {
            output,
            indent,
            hidden_progress: false,
            tick_interval: SessionOptions::DEFAULT_TICK_INTERVAL,
        }
    }

    /// Draw no progress bars; sessions and handles still track state.
    pub fn with_hidden_progress(mut self, hidden: bool) -> Self {
        self.hidden_progress = hidden;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    fn write_indented(&self, block: &str) {
        let prefix = self.indent.render_prefix();
        let text: Vec<String> = block.lines().map(|line| format!("{prefix}{line}")).collect();
        self.output.write_block(&text.join("\n"));
    }

    // Panels

    /// Draw `content` inside a rounded box, with `title` in the top border.
    pub fn panel(&self, content: impl ToLogText, title: Option<&str>, border: Style) {
        let content = content.to_log_text();
        let border = self.output.paint(border);
        let lines: Vec<&str> = match content.is_empty() {
            true => vec![""],
            false => content.lines().collect(),
        };
        let title_width = title.map(|t| measure_text_width(t) + 2).unwrap_or(0);
        let width = lines
            .iter()
            .map(|line| measure_text_width(line))
            .max()
            .unwrap_or(0)
            .max(title_width)
            + 2;

        let top = match title {
            Some(title) => {
                let title = format!(" {title} ");
                let rest = width.saturating_sub(measure_text_width(&title) + 1);
                format!("╭─{}{}╮", self.output.paint(Style::new().bold()).apply_to(&title), "─".repeat(rest))
            }
            None => format!("╭{}╮", "─".repeat(width)),
        };
        let mut block = vec![border.apply_to(top).to_string()];
        for line in lines {
            block.push(format!(
                "{} {} {}",
                border.apply_to("│"),
                pad_str(line, width - 2, Alignment::Left, None),
                border.apply_to("│")
            ));
        }
        block.push(border.apply_to(format!("╰{}╯", "─".repeat(width))).to_string());
        self.write_indented(&block.join("\n"));
    }

    pub fn info_panel(&self, title: &str, content: impl ToLogText) {
        self.panel(content, Some(title), Style::new().blue());
    }

    pub fn success_panel(&self, title: &str, content: impl ToLogText) {
        self.panel(content, Some(title), Style::new().green());
    }

    pub fn error_panel(&self, title: &str, content: impl ToLogText) {
        self.panel(content, Some(title), Style::new().red());
    }

    pub fn warning_panel(&self, title: &str, content: impl ToLogText) {
        self.panel(content, Some(title), Style::new().yellow());
    }

    /// Panel announcing the status of an installation step.
    ///
    /// The border follows the status: green for success, red for failure,
    /// yellow while in progress and blue otherwise.
    pub fn installation_panel(&self, step: &str, status: &str, details: Option<&str>) {
        let (icon, border) = match status_tone(status) {
            Tone::Good => ("✓", Style::new().green()),
            Tone::Bad => ("✗", Style::new().red()),
            Tone::Busy => ("▸", Style::new().yellow()),
            Tone::Neutral => ("·", Style::new().blue()),
        };
        let mut content = format!("{icon} {step}: {status}");
        if let Some(details) = details {
            content.push('\n');
            content.push_str(details);
        }
        self.panel(content, Some("Installation"), border);
    }

    // Tables

    fn new_table(&self, title: Option<&str>, headers: &[String]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).apply_modifier(UTF8_ROUND_CORNERS);
        match self.output.colors() {
            true => table.enforce_styling(),
            false => table.force_no_tty(),
        };
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
        if let Some(title) = title {
            self.write_indented(&self.output.paint(Style::new().bold()).apply_to(title).to_string());
        }
        table
    }

    fn print_table(&self, table: &Table) {
        self.write_indented(&table.to_string());
    }

    /// Print JSON object records as a table.
    ///
    /// Columns are the union of the records' keys in first-seen order.
    /// Records that are not objects are skipped.
    pub fn table(&self, records: &[serde_json::Value], title: Option<&str>) {
        let objects: Vec<&serde_json::Map<String, serde_json::Value>> = records
            .iter()
            .filter_map(|record| match record.as_object() {
                Some(object) => Some(object),
                None => {
                    debug!("Skipping non-object table record: {}", record);
                    None
                }
            })
            .collect();
        if objects.is_empty() {
            debug!("No table records to print");
            return;
        }
        let mut headers: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
        let mut table = self.new_table(title, &headers);
        for object in objects {
            table.add_row(
                headers
                    .iter()
                    .map(|h| Cell::new(object.get(h).map(ToLogText::to_log_text).unwrap_or_default())),
            );
        }
        self.print_table(&table);
    }

    /// Print named columns side by side; short columns are padded with
    /// empty cells.
    pub fn table_from_columns<V: ToLogText>(&self, columns: &[(&str, Vec<V>)], title: Option<&str>) {
        if columns.is_empty() {
            return;
        }
        let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
        let rows = columns.iter().map(|(_, values)| values.len()).max().unwrap_or(0);
        let mut table = self.new_table(title, &headers);
        for row in 0..rows {
            table.add_row(columns.iter().map(|(_, values)| {
                Cell::new(values.get(row).map(ToLogText::to_log_text).unwrap_or_default())
            }));
        }
        self.print_table(&table);
    }

    /// Print `(item, status)` pairs with the status colored by its tone.
    pub fn status_table(&self, rows: &[(&str, &str)], title: Option<&str>) {
        let headers = ["Item".to_string(), "Status".to_string()];
        let mut table = self.new_table(title, &headers);
        for (item, status) in rows {
            table.add_row(vec![Cell::new(item), tone_cell(status)]);
        }
        self.print_table(&table);
    }

    /// Print `(name, version, status)` dependency rows.
    pub fn dependency_table(&self, rows: &[(&str, &str, &str)], title: Option<&str>) {
        let headers = ["Package".to_string(), "Version".to_string(), "Status".to_string()];
        let mut table = self.new_table(title.or(Some("Dependencies")), &headers);
        for (name, version, status) in rows {
            table.add_row(vec![Cell::new(name), Cell::new(version), tone_cell(status)]);
        }
        self.print_table(&table);
    }

    /// Print `(command, description)` rows.
    pub fn command_table(&self, rows: &[(&str, &str)], title: Option<&str>) {
        let headers = ["Command".to_string(), "Description".to_string()];
        let mut table = self.new_table(title.or(Some("Commands")), &headers);
        for (command, description) in rows {
            table.add_row(vec![Cell::new(command).fg(Color::Green), Cell::new(description)]);
        }
        self.print_table(&table);
    }

    // JSON

    /// Pretty-print a JSON value; a titled value is framed in a blue panel.
    pub fn json(&self, value: &serde_json::Value, title: Option<&str>) -> Result<()> {
        let pretty = serde_json::to_string_pretty(value)?;
        match title {
            Some(title) => self.panel(pretty, Some(title), Style::new().blue()),
            None => self.write_indented(&pretty),
        }
        Ok(())
    }

    /// Pretty-print JSON text; text that does not parse is printed verbatim.
    pub fn json_str(&self, text: &str, title: Option<&str>) {
        let printed = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => self.json(&value, title),
            Err(e) => {
                debug!("Printing invalid JSON verbatim: {}", e);
                self.write_indented(text);
                Ok(())
            }
        };
        if let Err(e) = printed {
            debug!("Could not print JSON: {}", e);
        }
    }

    // Progress

    fn bar_opts(&self, opts: ProgressBarOpts) -> ProgressBarOpts {
        match self.hidden_progress {
            true => ProgressBarOpts::hidden(),
            false => opts,
        }
    }

    /// A bar over `total` units.
    pub fn progress(&self, description: &str, total: u64) -> ProgressHandle {
        let bar = self.bar_opts(ProgressBarOpts::with_position_style()).to_progress_bar(total);
        bar.set_message(description.to_string());
        ProgressHandle::new(bar)
    }

    pub fn spinner(&self, description: &str) -> ProgressHandle {
        let bar = self.bar_opts(ProgressBarOpts::with_spinner_style()).to_progress_bar(0);
        bar.set_message(description.to_string());
        bar.enable_steady_tick(self.tick_interval);
        ProgressHandle::new(bar)
    }

    /// A byte-counting bar for downloading `filename`.
    pub fn file_download_progress(&self, filename: &str, total_size: u64) -> ProgressHandle {
        let bar = self.bar_opts(ProgressBarOpts::with_pip_style()).to_progress_bar(total_size);
        bar.set_message(filename.to_string());
        ProgressHandle::new(bar)
    }

    /// A step counter over `steps`; the first step is shown right away.
    pub fn step_progress(&self, steps: Vec<String>) -> ProgressHandle {
        let bar = self
            .bar_opts(ProgressBarOpts::with_steps_style())
            .to_progress_bar(steps.len() as u64);
        if let Some(first) = steps.first() {
            bar.set_message(first.clone());
        }
        ProgressHandle::with_steps(bar, steps)
    }

    fn tracked<T: Display>(
        &self,
        items: impl IntoIterator<Item = T>,
        label: impl Fn(&T) -> String,
        finish_message: &str,
    ) -> TrackedSequence<T> {
        let items = items.into_iter().map(|item| (label(&item), item)).collect();
        TrackedSequence::new(items, self.bar_opts(ProgressBarOpts::with_steps_style()), finish_message)
    }

    /// Yield each dependency while showing which one is being installed.
    pub fn dependency_progress<T: Display>(&self, dependencies: impl IntoIterator<Item = T>) -> TrackedSequence<T> {
        self.tracked(dependencies, |d| format!("Installing {d}"), "Dependencies installed")
    }

    pub fn package_install_progress<T: Display>(&self, packages: impl IntoIterator<Item = T>) -> TrackedSequence<T> {
        self.tracked(packages, |p| format!("Installing package {p}"), "Packages installed")
    }

    pub fn build_progress<T: Display>(&self, phases: impl IntoIterator<Item = T>) -> TrackedSequence<T> {
        self.tracked(phases, |p| format!("Building: {p}"), "Build complete")
    }

    pub fn deployment_progress<T: Display>(&self, stages: impl IntoIterator<Item = T>) -> TrackedSequence<T> {
        self.tracked(stages, |s| format!("Deploying: {s}"), "Deployment complete")
    }

    /// Open a layered progress session over `stages`.
    pub fn layered_progress(&self, stages: &[StageDescriptor], show_elapsed: bool) -> Result<LayeredProgressSession> {
        let style_options = match self.hidden_progress {
            true => StyleOptions::hidden(),
            false => StyleOptions::default(),
        };
        let options = SessionOptions::new(show_elapsed)
            .tick_interval(self.tick_interval)
            .style_options(style_options);
        LayeredProgressSession::open(stages, options)
    }
}

/// Single progress bar that finishes itself when dropped.
pub struct ProgressHandle {
    bar: ProgressBar,
    steps: Vec<String>,
    finished: bool,
}

impl ProgressHandle {
    fn new(bar: ProgressBar) -> Self {
        Self::with_steps(bar, Vec::new())
    }

    fn with_steps(bar: ProgressBar, steps: Vec<String>) -> Self {
        Self {
            bar,
            steps,
            finished: false,
        }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    pub fn set_position(&self, position: u64) {
        self.bar.set_position(position);
    }

    pub fn set_message(&self, message: impl ToLogText) {
        self.bar.set_message(message.to_log_text());
    }

    /// Move to the next step and show its name.
    pub fn next_step(&self) {
        self.bar.inc(1);
        let index = self.bar.position() as usize;
        if let Some(step) = self.steps.get(index) {
            self.bar.set_message(step.clone());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.bar.finish();
    }

    pub fn finish_with_message(&mut self, message: impl ToLogText) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.bar.finish_with_message(message.to_log_text());
    }
}

impl fmt::Debug for ProgressHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressHandle")
            .field("position", &self.bar.position())
            .field("length", &self.bar.length())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

enum Tone {
    Good,
    Bad,
    Busy,
    Neutral,
}

fn status_tone(status: &str) -> Tone {
    match status.trim().to_ascii_lowercase().as_str() {
        "ok" | "success" | "done" | "installed" | "complete" | "completed" | "up to date" => Tone::Good,
        "error" | "failed" | "fail" | "missing" | "errored" => Tone::Bad,
        "running" | "installing" | "in progress" | "pending" | "outdated" | "warning" => Tone::Busy,
        _ => Tone::Neutral,
    }
}

fn tone_cell(status: &str) -> Cell {
    let color = match status_tone(status) {
        Tone::Good => Color::Green,
        Tone::Bad => Color::Red,
        Tone::Busy => Color::Yellow,
        Tone::Neutral => Color::White,
    };
    Cell::new(status).fg(color)
}
