use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Verbose => write!(f, "VERBOSE"),
        }
    }
}

/// Line-oriented stdout logger. Errors go to stderr.
#[derive(Debug, Clone)]
pub struct Logger {
    verbose: bool,
    debug: bool,
}

impl Logger {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self { verbose, debug }
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        match level {
            LogLevel::Error | LogLevel::Warning | LogLevel::Info => true,
            LogLevel::Debug => self.debug || self.verbose,
            LogLevel::Verbose => self.verbose,
        }
    }

    /// Prefix for a level; info lines are printed bare
    fn icon(level: LogLevel) -> &'static str {
        match level {
            LogLevel::Error => "❌",
            LogLevel::Warning => "⚠️",
            LogLevel::Info => "",
            LogLevel::Debug => "🔍",
            LogLevel::Verbose => "💬",
        }
    }

    pub fn format_line(level: LogLevel, message: &str) -> String {
        match Self::icon(level) {
            "" => message.to_string(),
            icon => format!("{} {}", icon, message),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.should_log(level) {
            return;
        }
        let line = Self::format_line(level, message);
        if level == LogLevel::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Step-by-step progress for a generation run.
///
/// Non-verbose runs show a single spinner; verbose runs print one line per step
/// so they interleave cleanly with folder and file log lines.
pub struct ProgressReporter {
    logger: Logger,
    progress_bar: Option<ProgressBar>,
    current_step: usize,
    total_steps: usize,
    step_name: String,
}

impl ProgressReporter {
    pub fn new(logger: Logger, total_steps: usize) -> Self {
        let progress_bar = if logger.is_verbose() {
            None
        } else {
            Some(spinner())
        };

        Self {
            logger,
            progress_bar,
            current_step: 0,
            total_steps,
            step_name: String::new(),
        }
    }

    /// A reporter that never draws a spinner, for library callers and tests
    pub fn silent(logger: Logger, total_steps: usize) -> Self {
        Self {
            logger,
            progress_bar: None,
            current_step: 0,
            total_steps,
            step_name: String::new(),
        }
    }

    pub fn start_step(&mut self, step_name: &str) {
        self.current_step += 1;
        self.step_name = step_name.to_string();
        let label = format!("{} ({}/{})", step_name, self.current_step, self.total_steps);

        match self.progress_bar {
            Some(ref pb) => pb.set_message(label),
            None => self.logger.verbose(&format!("🚀 {}", label)),
        }
    }

    pub fn complete_step(&mut self, message: Option<&str>) {
        match message {
            Some(msg) => self
                .logger
                .verbose(&format!("✅ {} - {}", self.step_name, msg)),
            None => self.logger.verbose(&format!("✅ {}", self.step_name)),
        }
    }

    pub fn fail_step(&mut self, error: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
        self.logger
            .error(&format!("Failed {}: {}", self.step_name, error));
    }

    pub fn finish(&self, total_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
        self.logger.info(&format!("✓ {}", total_message));
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print where the project was written and how to start it
pub fn print_summary(target_path: &str, project_name: &str, generated_files: &[String]) {
    println!(
        "\n✓ Generated {} file{} for project '{}'",
        generated_files.len(),
        if generated_files.len() == 1 { "" } else { "s" },
        project_name
    );
    println!("📁 Location: {}", target_path);
    println!("\n💡 Run the generated tests:");
    println!("  cd {} && PYTHONPATH=src pytest", target_path);
}
