//! Result output: stdout or file

mod console;
mod file;

pub use console::{print_error, print_info, print_summary, print_warning, ProgressTracker};
pub(crate) use file::FileWriter;

use crate::error::Result;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write every URL on its own line to `path`, or to stdout when `None`
pub async fn write_results(urls: &[String], path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), count = urls.len(), "writing results to file");
            let mut writer = FileWriter::new(path).await?;
            for url in urls {
                writer.write_line(url).await?;
            }
            writer.finalize().await?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for url in urls {
                writeln!(out, "{}", url)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
