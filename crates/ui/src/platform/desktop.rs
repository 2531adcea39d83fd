use std::process::Command;

use services::FileOpener;
use url::Url;

/// Hands documents and links to the operating system's default handler.
pub struct DesktopLinkOpener;

impl FileOpener for DesktopLinkOpener {
    fn open(&self, url: &Url) -> Result<(), String> {
        let url = url.as_str();
        #[cfg(target_os = "macos")]
        let spawned = Command::new("open").arg(url).spawn();
        #[cfg(target_os = "windows")]
        let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = Command::new("xdg-open").arg(url).spawn();

        spawned.map(|_| ()).map_err(|err| err.to_string())
    }
}
