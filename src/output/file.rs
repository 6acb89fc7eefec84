//! Plain-text file output, one URL per line

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Buffered line writer; creating it truncates any existing file
pub struct FileWriter {
    file: BufWriter<File>,
}

impl FileWriter {
    pub async fn new(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path).await?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    pub async fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        self.file.write_all(line.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        Ok(())
    }

    /// Flush buffered lines to disk
    pub async fn finalize(mut self) -> std::io::Result<()> {
        self.file.flush().await?;
        self.file.into_inner().sync_all().await
    }
}
