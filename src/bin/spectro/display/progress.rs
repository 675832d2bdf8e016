use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Numbered spinner steps on stderr, each closed with a check mark and the
/// time it took.
pub struct Spinner {
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    step: u8,
    total: u8,
}

impl Spinner {
    fn new(total: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            started: now,
            step_started: now,
            step: 0,
            total,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn start(&mut self, description: &str) {
        self.clear();
        self.step += 1;
        self.step_started = Instant::now();

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars(TICKS));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!("[{}/{}] {description}...", self.step, self.total));
        self.bar = Some(bar);
    }

    fn done(&mut self, description: &str, details: &[String]) {
        self.clear();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {description:<44} {:>5.1}s",
            self.step_started.elapsed().as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {detail}");
        }
    }

    fn finish(mut self) {
        self.clear();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[2m╺━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╸\x1b[0m"
        );
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m Done {:>45}",
            format!("Total: {:.2}s", self.started.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Step reporting that is a no-op when stderr is not interactive.
pub enum Progress {
    Interactive(Spinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(Spinner::new(total_steps))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(spinner) = self {
            spinner.start(description);
        }
    }

    pub fn complete_step(&mut self, description: &str, details: &[String]) {
        if let Self::Interactive(spinner) = self {
            spinner.done(description, details);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(spinner) = self {
            spinner.finish();
        }
    }
}
