//! Clipboard output.
//!
//! X11 and Wayland clipboards are served by the owning process, so the
//! contents vanish when it exits unless a clipboard manager has taken them.
//! On Linux the copy therefore blocks until another client reads the
//! selection or `HOLD` elapses, whichever comes first.
use anyhow::Result;
use arboard::Clipboard;
use std::time::Duration;

pub const HOLD: Duration = Duration::from_secs(30);

/// Places `text` on the system clipboard.
#[cfg(target_os = "linux")]
pub fn copy(text: &str) -> Result<()> {
    use arboard::SetExtLinux;
    use std::time::Instant;

    let mut clipboard = Clipboard::new()?;
    tracing::info!("Serving the URL on the clipboard for up to {}s", HOLD.as_secs());
    clipboard
        .set()
        .wait_until(Instant::now() + HOLD)
        .text(text.to_owned())?;
    Ok(())
}

/// Places `text` on the system clipboard.
#[cfg(not(target_os = "linux"))]
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    Ok(())
}
