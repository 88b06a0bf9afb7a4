use std::path::PathBuf;
use std::process::Command;

/// Steam's library folder relative to the user's home directory.
pub const STEAM_LIBRARY: &str = ".steam/steam/steamapps";

/// Where removable media (sd cards, usb drives) get auto-mounted.
pub const MOUNT_ROOT: &str = "/run/media";

/// Name of the library folder at the top of each mounted volume.
pub const VOLUME_LIBRARY: &str = "steamapps";

/// Entries under the mount root that are the device itself, not a volume.
pub const RESERVED_MOUNTS: &[&str] = &["deck"];

pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

pub fn du_available() -> bool {
    Command::new("du")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
