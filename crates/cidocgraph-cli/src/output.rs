//! Output helpers

use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::Context;

/// Write rendered output to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    let Some(path) = path else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    #[cfg(unix)]
    {
        // owner read/write only
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        file.write_all(content.as_bytes())?;
    }
    #[cfg(not(unix))]
    {
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    }
    tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
