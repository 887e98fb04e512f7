use std::fs::File;

mod runtime;
mod ui;

const LOG_FILE: &str = "tracklist.log";

/// Logs go to a file in the temp dir so they don't draw over the terminal UI.
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    if let Ok(file) = File::create(std::env::temp_dir().join(LOG_FILE)) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    runtime::run()
}
