use anyhow::{bail, Context, Result};
use skilltwin_types::ProofSource;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::warn;

/// Extensions of files that would need OCR before scanning
const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// One piece of text to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    Stdin,
    Inline(String),
    File(PathBuf),
}

impl ScanInput {
    /// Build the input list from command-line arguments
    ///
    /// `-` stands for stdin. Without any file or inline content, stdin is read.
    pub fn collect(files: &[PathBuf], content: Option<&str>) -> Vec<Self> {
        let mut inputs = Vec::with_capacity(files.len() + 1);

        if let Some(content) = content {
            inputs.push(ScanInput::Inline(content.to_string()));
        }

        for file in files {
            if file.as_os_str() == "-" {
                if inputs.contains(&ScanInput::Stdin) {
                    warn!("stdin listed more than once, reading it once");
                    continue;
                }
                inputs.push(ScanInput::Stdin);
            } else {
                inputs.push(ScanInput::File(file.clone()));
            }
        }

        if inputs.is_empty() {
            inputs.push(ScanInput::Stdin);
        }
        inputs
    }

    /// Name of the input in reports and logs
    pub fn label(&self) -> String {
        match self {
            ScanInput::Stdin => "<stdin>".to_string(),
            ScanInput::Inline(_) => "<content>".to_string(),
            ScanInput::File(path) => path.display().to_string(),
        }
    }

    pub fn proof_source(&self) -> ProofSource {
        match self {
            ScanInput::File(_) => ProofSource::File,
            ScanInput::Stdin | ScanInput::Inline(_) => ProofSource::Text,
        }
    }

    /// Read the text of this input
    pub async fn read(&self) -> Result<String> {
        match self {
            ScanInput::Inline(content) => Ok(content.clone()),
            ScanInput::Stdin => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read stdin")?;
                Ok(text)
            }
            ScanInput::File(path) => {
                if is_image(path) {
                    bail!(
                        "{:?} is an image; text extraction (OCR) is not supported, scan the extracted text instead",
                        path
                    );
                }
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {:?}", path))
            }
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|image| ext.eq_ignore_ascii_case(image))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_defaults_to_stdin() {
        assert_eq!(ScanInput::collect(&[], None), vec![ScanInput::Stdin]);
    }

    #[test]
    fn test_collect_keeps_order_and_dedupes_stdin() {
        let files = vec![
            PathBuf::from("README.md"),
            PathBuf::from("-"),
            PathBuf::from("-"),
        ];
        let inputs = ScanInput::collect(&files, Some("rust"));
        assert_eq!(
            inputs,
            vec![
                ScanInput::Inline("rust".to_string()),
                ScanInput::File(PathBuf::from("README.md")),
                ScanInput::Stdin,
            ]
        );
    }

    #[test]
    fn test_labels_and_sources() {
        let file = ScanInput::File(PathBuf::from("notes.txt"));
        assert_eq!(file.label(), "notes.txt");
        assert_eq!(file.proof_source(), ProofSource::File);
        assert_eq!(ScanInput::Inline(String::new()).proof_source(), ProofSource::Text);
        assert_eq!(ScanInput::Stdin.label(), "<stdin>");
    }

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("scan.PNG")));
        assert!(is_image(Path::new("dir/photo.jpeg")));
        assert!(!is_image(Path::new("README.md")));
        assert!(!is_image(Path::new("Makefile")));
    }

    #[tokio::test]
    async fn test_read_rejects_images() {
        let err = ScanInput::File(PathBuf::from("certificate.jpg"))
            .read()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OCR"));
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "Learning Rust").unwrap();

        let text = ScanInput::File(path).read().await.unwrap();
        assert_eq!(text, "Learning Rust");
    }
}
