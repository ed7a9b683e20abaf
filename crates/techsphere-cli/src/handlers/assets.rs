//! Turn `--image` arguments into asset sources.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use techsphere_core::AssetSource;

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// A URL argument is used as-is; anything else is read from disk.
pub async fn resolve_source(arg: &str) -> Result<AssetSource> {
    let arg = arg.trim();
    if URL_SCHEMES.iter().any(|scheme| arg.starts_with(scheme)) {
        return Ok(AssetSource::url(arg));
    }

    let path = Path::new(arg);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("'{}' does not name a file", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image '{}'", path.display()))?;

    Ok(AssetSource::upload(file_name, bytes))
}

/// Resolve every argument, keeping order.
pub async fn resolve_sources(args: &[String]) -> Result<Vec<AssetSource>> {
    let mut sources = Vec::with_capacity(args.len());
    for arg in args {
        sources.push(resolve_source(arg).await?);
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_url_is_kept() {
        let source = resolve_source(" https://img.test/a.png ").await.unwrap();
        assert_eq!(source, AssetSource::url("https://img.test/a.png"));
    }

    #[tokio::test]
    async fn test_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let sources = resolve_sources(&[path.to_string_lossy().into_owned()])
            .await
            .unwrap();
        assert_eq!(sources, vec![AssetSource::upload("front.png", vec![1, 2, 3])]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_source(&dir.path().join("nope.png").to_string_lossy())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
