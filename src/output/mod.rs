mod progress;
mod response;
mod styling;
mod tables;

pub use progress::RequestProgress;
pub use response::print_response;
use styling::{dim, magenta_bold};

/// Prints the dronectl banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("🚀 dronectl"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Drone CI API client")
    );
}
