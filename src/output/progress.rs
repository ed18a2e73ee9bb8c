use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::bright_yellow;

/// Spinner shown on stderr while a request is in flight.
///
/// Hidden when stderr is not a terminal so piped output stays clean.
pub struct RequestProgress {
    pb: ProgressBar,
}

impl RequestProgress {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        if Term::stderr().is_term() {
            pb.set_draw_target(ProgressDrawTarget::stderr());
        } else {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {msg} {spinner}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(bright_yellow("Waiting for Drone").to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
