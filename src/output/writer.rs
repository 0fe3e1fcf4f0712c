// src/output/writer.rs
// =============================================================================
// Saves qualifying images to an output directory.
//
// Layout:
//   out/index.txt   "0: https://a.neocities.org/me.gif" per line
//   out/0.gif
//   out/1.png
//   ...
//
// Files are numbered in the order they are written. Images whose url path
// does not end in a known image extension are not saved (a button served
// from /button.php has no sensible file name), and do not use up a number.
// =============================================================================

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use url::Url;

use crate::crawl::QualifiedImage;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug)]
pub struct ImageWriter {
    dir: PathBuf,
    index: File,
    written: usize,
}

impl ImageWriter {
    /// Creates `dir` if needed and starts a fresh, empty index.txt
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir)
            .with_context(|| format!("could not create output directory {}", dir.display()))?;

        let index_path = dir.join("index.txt");
        File::create(&index_path)
            .with_context(|| format!("could not create {}", index_path.display()))?;
        let index = OpenOptions::new()
            .append(true)
            .open(&index_path)
            .with_context(|| format!("could not open {}", index_path.display()))?;

        Ok(Self {
            dir,
            index,
            written: 0,
        })
    }

    /// Writes one image. Returns the path it was saved to, or None when
    /// the url has no image extension.
    pub fn write(&mut self, image: &QualifiedImage) -> Result<Option<PathBuf>> {
        let Some(extension) = image_extension(&image.url) else {
            return Ok(None);
        };

        let path = self.dir.join(format!("{}.{}", self.written, extension));
        fs::write(&path, &image.bytes)
            .with_context(|| format!("could not write {}", path.display()))?;

        writeln!(self.index, "{}: {}", self.written, image.url)
            .context("could not append to index.txt")?;

        self.written += 1;
        Ok(Some(path))
    }

    /// Number of images saved so far
    pub fn written(&self) -> usize {
        self.written
    }
}

/// The extension of an image url's path, if it is one we save.
/// Case is kept as it appears in the url.
pub fn image_extension(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let (_, extension) = url.path().rsplit_once('.')?;

    if extension.contains('/') || !IMAGE_EXTENSIONS.contains(&extension) {
        return None;
    }
    Some(extension.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, bytes: &[u8]) -> QualifiedImage {
        QualifiedImage {
            url: url.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("https://a.org/b.gif").as_deref(), Some("gif"));
        assert_eq!(image_extension("https://a.org/x/b.jpeg?v=2").as_deref(), Some("jpeg"));
        assert_eq!(image_extension("https://a.org/button.php"), None);
        assert_eq!(image_extension("https://a.org/dir.png/button"), None);
        assert_eq!(image_extension("https://a.org/"), None);
        // same as the server would see it, no case folding
        assert_eq!(image_extension("https://a.org/B.GIF"), None);
    }

    #[test]
    fn test_writes_numbered_files_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("buttons");
        let mut writer = ImageWriter::create(&out).unwrap();

        let first = writer.write(&image("https://a.org/me.gif", b"gif")).unwrap();
        let skipped = writer.write(&image("https://a.org/button.php", b"php")).unwrap();
        let second = writer.write(&image("https://b.org/you.png", b"png")).unwrap();

        assert_eq!(first, Some(out.join("0.gif")));
        assert_eq!(skipped, None);
        assert_eq!(second, Some(out.join("1.png")));
        assert_eq!(writer.written(), 2);

        assert_eq!(fs::read(out.join("0.gif")).unwrap(), b"gif");
        assert_eq!(fs::read(out.join("1.png")).unwrap(), b"png");
        assert_eq!(
            fs::read_to_string(out.join("index.txt")).unwrap(),
            "0: https://a.org/me.gif\n1: https://b.org/you.png\n"
        );
    }

    #[test]
    fn test_create_truncates_old_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.txt"), "0: https://old.org/x.gif\n").unwrap();

        ImageWriter::create(dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("index.txt")).unwrap(), "");
    }
}
