//! `download-artifacts <project> [owner/repo]`.
//!
//! Looks up the latest GitHub release of the repository, picks the asset
//! built for this platform and streams it into `<project>/<asset>`.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use super::Toolbox;
use crate::error::{HandlerError, HandlerResult};
use crate::io::{Console, ExitCode, Tone};
use crate::platform::{self, OsInfo};

#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// `owner/repo` override; anything without a slash keeps the defaults.
/// Segments past the second are ignored.
pub fn parse_repository<'a>(arg: Option<&'a str>, defaults: (&'a str, &'a str)) -> (&'a str, &'a str) {
    let segments = arg.map(|value| {
        let mut parts = value.split('/');
        (parts.next(), parts.next())
    });
    match segments {
        Some((Some(owner), Some(repo))) if !owner.is_empty() && !repo.is_empty() => (owner, repo),
        _ => {
            if let Some(value) = arg {
                tracing::warn!("ignoring repository '{value}', expected owner/repo");
            }
            defaults
        }
    }
}

/// First asset built for `os`.
pub fn select_asset<'a>(release: &'a Release, os: &OsInfo) -> HandlerResult<&'a Asset> {
    release
        .assets
        .iter()
        .find(|asset| os.asset_matches(&asset.name))
        .ok_or_else(|| HandlerError::NoMatchingAsset {
            key: os.download_key.clone(),
            available: release.assets.iter().map(|a| a.name.clone()).collect(),
        })
}

pub fn run(
    toolbox: &Toolbox,
    project: &str,
    repository: Option<&str>,
    console: &mut Console,
) -> HandlerResult<ExitCode> {
    download(toolbox, project, repository, &platform::detect(), console)
}

pub fn download(
    toolbox: &Toolbox,
    project: &str,
    repository: Option<&str>,
    os: &OsInfo,
    console: &mut Console,
) -> HandlerResult<ExitCode> {
    let templates = &toolbox.settings().templates;
    let (owner, repo) = parse_repository(
        repository,
        (templates.artifact_owner.as_str(), templates.artifact_repo.as_str()),
    );

    let start = console.paint("🚀 Starting artifact download...", Tone::Info);
    let project_line = console.paint(format!("📋 Project: {project}"), Tone::Warning);
    let repo_line = console.paint(format!("📦 Repository: {owner}/{repo}"), Tone::Warning);
    writeln!(console.out(), "{start}\n{project_line}\n{repo_line}")?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("easier/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let url = format!(
        "{}/repos/{owner}/{repo}/releases/latest",
        templates.github_api.trim_end_matches('/')
    );

    let release = toolbox.block_on(fetch_release(&client, &url))??;
    let asset = select_asset(&release, os)?;
    let found = console.paint(
        format!(
            "🎯 {} matches {} in release {}",
            asset.name, os.download_key, release.tag_name
        ),
        Tone::Info,
    );
    writeln!(console.out(), "{found}")?;

    let project_dir = toolbox.resolve(project);
    std::fs::create_dir_all(&project_dir)
        .map_err(|e| HandlerError::fs("Error creating folder", &project_dir, e))?;
    let destination = project_dir.join(&asset.name);

    let bytes = toolbox.block_on(fetch_asset(&client, asset, &destination))??;
    crate::log_event!("artifacts", "downloaded", "{bytes} bytes into {}", destination.display());
    let done = console.paint(
        format!("✅ Downloaded {} ({bytes} bytes) to {project}/{}", asset.name, asset.name),
        Tone::Success,
    );
    writeln!(console.out(), "{done}")?;
    Ok(ExitCode::Success)
}

async fn fetch_release(client: &reqwest::Client, url: &str) -> HandlerResult<Release> {
    crate::debug_event!("artifacts", "release", "{url}");
    let release = client
        .get(url)
        .header("Accept", "application/vnd.github+json")
        .send()
        .await?
        .error_for_status()?
        .json::<Release>()
        .await?;
    Ok(release)
}

async fn fetch_asset(client: &reqwest::Client, asset: &Asset, destination: &Path) -> HandlerResult<u64> {
    let mut response = client
        .get(&asset.browser_download_url)
        .send()
        .await?
        .error_for_status()?;

    let total = response.content_length().unwrap_or(asset.size);
    let progress = ProgressBar::new(total);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    progress.set_message(asset.name.clone());

    // Stream into a sibling temp file; only a complete body is renamed into place.
    let staging = tempfile::NamedTempFile::new_in(destination.parent().unwrap_or(Path::new(".")))
        .map_err(|e| HandlerError::fs("Error creating", destination, e))?;
    let (handle, staged) = staging.into_parts();
    let mut file = tokio::fs::File::from_std(handle);
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| HandlerError::fs("Error writing", destination, e))?;
        written += chunk.len() as u64;
        progress.set_position(written);
    }
    file.flush()
        .await
        .map_err(|e| HandlerError::fs("Error writing", destination, e))?;
    drop(file);
    staged
        .persist(destination)
        .map_err(|e| HandlerError::fs("Error writing", destination, e.error))?;
    progress.finish_and_clear();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{console, toolbox};
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;

    const PAYLOAD: &[u8] = b"easier-binary-contents";

    fn linux_x64() -> OsInfo {
        OsInfo::new("linux", "x86_64", None, None)
    }

    fn release(names: &[&str]) -> Release {
        Release {
            tag_name: "v1.0.0".to_string(),
            assets: names
                .iter()
                .map(|name| Asset {
                    name: name.to_string(),
                    browser_download_url: format!("http://localhost/{name}"),
                    size: 0,
                })
                .collect(),
        }
    }

    /// Serves the release document and the asset, one request per connection.
    fn serve_release() -> String {
        serve_release_with(PAYLOAD, PAYLOAD.len())
    }

    /// Like `serve_release`, but the asset response advertises `advertised`
    /// bytes and sends `asset`.
    fn serve_release_with(asset: &'static [u8], advertised: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let asset_url = format!("{base}/download/easier-linux-x64.tar.gz");

        std::thread::spawn(move || {
            for stream in listener.incoming().take(2) {
                let mut stream = stream.unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    if header == "\r\n" || header.is_empty() {
                        break;
                    }
                }

                let (body, length): (Vec<u8>, usize) = if request_line.contains("/releases/latest") {
                    let json = serde_json::json!({
                        "tag_name": "v2.1.0",
                        "assets": [
                            { "name": "easier-windows-x64.zip", "browser_download_url": "http://invalid/", "size": 1 },
                            { "name": "easier-linux-x64.tar.gz", "browser_download_url": asset_url, "size": PAYLOAD.len() }
                        ]
                    })
                    .to_string()
                    .into_bytes();
                    let length = json.len();
                    (json, length)
                } else {
                    (asset.to_vec(), advertised)
                };
                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {length}\r\nConnection: close\r\n\r\n"
                );
                stream.write_all(head.as_bytes()).unwrap();
                stream.write_all(&body).unwrap();
            }
        });
        base
    }

    #[test]
    fn test_parse_repository() {
        let defaults = ("Daftyon", "Easier-language");
        assert_eq!(parse_repository(None, defaults), defaults);
        assert_eq!(parse_repository(Some("acme/tool"), defaults), ("acme", "tool"));
        assert_eq!(parse_repository(Some("no-slash"), defaults), defaults);
        assert_eq!(parse_repository(Some("/tool"), defaults), defaults);
        assert_eq!(parse_repository(Some("acme/tool/extra"), defaults), ("acme", "tool"));
    }

    #[test]
    fn test_select_asset_matches_platform() {
        let release = release(&["easier-darwin-arm64.tar.gz", "easier-linux-amd64.tar.gz"]);
        let asset = select_asset(&release, &linux_x64()).unwrap();
        assert_eq!(asset.name, "easier-linux-amd64.tar.gz");
    }

    #[test]
    fn test_select_asset_lists_available_on_miss() {
        let release = release(&["easier-windows-x64.zip", "easier-macos-arm64.tar.gz"]);
        let err = select_asset(&release, &linux_x64()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("linux-x64"));
        assert!(message.contains("easier-windows-x64.zip, easier-macos-arm64.tar.gz"));
    }

    #[test]
    fn test_download_streams_asset_into_project() {
        let (mut toolbox, dir) = toolbox();
        toolbox.settings.templates.github_api = serve_release();
        let (mut console, transcript) = console("");

        let code = download(&toolbox, "proj", None, &linux_x64(), &mut console).unwrap();

        assert_eq!(code, ExitCode::Success);
        let saved = std::fs::read(dir.path().join("proj/easier-linux-x64.tar.gz")).unwrap();
        assert_eq!(saved, PAYLOAD);
        let output = transcript.contents();
        assert!(output.contains("📦 Repository: Daftyon/Easier-language"));
        assert!(output.contains("release v2.1.0"));
    }

    #[test]
    fn test_truncated_download_leaves_no_file() {
        let (mut toolbox, dir) = toolbox();
        toolbox.settings.templates.github_api = serve_release_with(b"PARTIAL", 100);
        let (mut console, _) = console("");

        let result = download(&toolbox, "proj", None, &linux_x64(), &mut console);

        assert!(result.is_err());
        let project = dir.path().join("proj");
        assert!(!project.join("easier-linux-x64.tar.gz").exists());
        let leftovers = std::fs::read_dir(&project).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_unreachable_api_is_network_error() {
        let (mut toolbox, _dir) = toolbox();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        toolbox.settings.templates.github_api = format!("http://{addr}");
        let (mut console, _) = console("");

        let err = download(&toolbox, "proj", Some("acme/tool"), &linux_x64(), &mut console)
            .unwrap_err();
        assert!(matches!(err, HandlerError::Network(_)));
    }
}
