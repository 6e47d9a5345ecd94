//! Operating system and architecture detection.
//!
//! The download key (`<platform>-<arch>`, e.g. `linux-x64`) is what release
//! assets are matched against.

use sysinfo::System;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    /// Normalised platform: `linux`, `macos`, `windows`, or the raw target OS.
    pub platform: &'static str,
    /// Normalised architecture: `x64`, `arm64`, `x86`, `arm`, or the raw target arch.
    pub arch: &'static str,
    pub display_name: String,
    pub release: String,
    pub download_key: String,
}

/// Detect the host this binary runs on.
pub fn detect() -> OsInfo {
    OsInfo::new(
        std::env::consts::OS,
        std::env::consts::ARCH,
        System::long_os_version(),
        System::kernel_version(),
    )
}

impl OsInfo {
    pub fn new(
        os: &'static str,
        arch: &'static str,
        long_name: Option<String>,
        release: Option<String>,
    ) -> Self {
        let platform = platform_key(os);
        let arch = arch_key(arch);
        Self {
            platform,
            arch,
            display_name: long_name.unwrap_or_else(|| fallback_display_name(platform).to_string()),
            release: release.unwrap_or_else(|| "unknown".to_string()),
            download_key: format!("{platform}-{arch}"),
        }
    }

    /// Whether a release asset file name targets this platform and architecture.
    ///
    /// Names are compared token by token so `darwin` never matches `win`.
    pub fn asset_matches(&self, asset_name: &str) -> bool {
        let normalised = asset_name
            .to_lowercase()
            .replace("x86_64", "x64")
            .replace("aarch64", "arm64");
        let tokens: Vec<&str> = normalised
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        let platform_hit = platform_aliases(self.platform)
            .iter()
            .any(|alias| tokens.contains(alias));
        let arch_hit = arch_aliases(self.arch)
            .iter()
            .any(|alias| tokens.contains(alias));
        platform_hit && arch_hit
    }
}

fn platform_key(os: &'static str) -> &'static str {
    match os {
        "macos" | "ios" => "macos",
        other => other,
    }
}

fn arch_key(arch: &'static str) -> &'static str {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

fn fallback_display_name(platform: &str) -> &str {
    match platform {
        "linux" => "Linux",
        "macos" => "macOS",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

fn platform_aliases(platform: &'static str) -> Vec<&'static str> {
    match platform {
        "macos" => vec!["macos", "darwin", "osx", "mac", "apple"],
        "windows" => vec!["windows", "win", "win64", "win32"],
        other => vec![other],
    }
}

fn arch_aliases(arch: &'static str) -> Vec<&'static str> {
    match arch {
        "x64" => vec!["x64", "amd64"],
        "arm64" => vec!["arm64"],
        "x86" => vec!["x86", "i686", "i386", "386"],
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_x64() -> OsInfo {
        OsInfo::new("linux", "x86_64", None, Some("6.1.0".to_string()))
    }

    #[test]
    fn test_download_key_is_normalised() {
        assert_eq!(linux_x64().download_key, "linux-x64");
        assert_eq!(OsInfo::new("macos", "aarch64", None, None).download_key, "macos-arm64");
        assert_eq!(OsInfo::new("windows", "x86_64", None, None).display_name, "Windows");
    }

    #[test]
    fn test_asset_matching_uses_aliases() {
        let linux = linux_x64();
        assert!(linux.asset_matches("easier-linux-x64.tar.gz"));
        assert!(linux.asset_matches("easier_Linux_x86_64.zip"));
        assert!(linux.asset_matches("easier-linux-amd64"));
        assert!(!linux.asset_matches("easier-linux-arm64.tar.gz"));
        assert!(!linux.asset_matches("easier-macos-x64.tar.gz"));
    }

    #[test]
    fn test_darwin_is_not_windows() {
        let windows = OsInfo::new("windows", "x86_64", None, None);
        assert!(!windows.asset_matches("easier-darwin-x64.tar.gz"));
        assert!(windows.asset_matches("easier-win-x64.zip"));

        let mac = OsInfo::new("macos", "aarch64", None, None);
        assert!(mac.asset_matches("easier-darwin-aarch64.tar.gz"));
    }

    #[test]
    fn test_detect_reports_current_target() {
        let info = detect();
        assert!(info.download_key.contains('-'));
        assert!(!info.display_name.is_empty());
    }
}
