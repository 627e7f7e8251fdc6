//! Artifact storage
//!
//! Resolves where rendered equations go, names them and writes them out.
//! Naming is content-addressed: an equation without an explicit id is
//! stored as `stem-<digest>.<ext>`, where the digest covers the wrapped
//! input, so identical equations always land on the same path. Writes
//! overwrite unconditionally.
//!
//! The digest is 64-bit blake3, so names differ from those of tools that
//! name files by the MD5 of the input.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::attr::AttrScope;
use crate::error::{StemError, StemResult};
use crate::hash::content_id;
use crate::node::DocOptions;
use crate::render::Rendered;

/// Attribute naming an explicit image output directory.
pub const IMAGESOUTDIR_ATTR: &str = "imagesoutdir";
/// Attribute naming the general output directory.
pub const OUTDIR_ATTR: &str = "outdir";
/// Attribute naming the images directory relative to the output directory.
pub const IMAGESDIR_ATTR: &str = "imagesdir";

// =============================================================================
// ArtifactRecord
// =============================================================================

/// A persisted equation image.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactRecord {
    /// Explicit id or `stem-<digest>`
    pub id: String,
    /// Full path of the written file
    pub path: PathBuf,
    pub width: f64,
    pub height: f64,
}

impl ArtifactRecord {
    /// Path as written into image targets.
    pub fn target(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

// =============================================================================
// ArtifactStore
// =============================================================================

/// Output directory of the equations of one parent block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Store writing into `dir` as given.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve the output directory for blocks under `scope`.
    ///
    /// `imagesoutdir` wins when set. Otherwise `imagesdir` is joined to
    /// `outdir`, or the `to_dir` option, or the document base directory.
    /// Relative results are anchored at the base directory and `.`/`..`
    /// components are folded away. Nothing is created here.
    pub fn resolve(scope: AttrScope<'_>, options: &DocOptions) -> Self {
        let base_dir = options.base_dir.as_path();
        let dir = match scope.get(IMAGESOUTDIR_ATTR) {
            Some(out) => base_dir.join(out),
            None => {
                let base = scope
                    .get(OUTDIR_ATTR)
                    .map(PathBuf::from)
                    .or_else(|| options.to_dir.clone())
                    .map_or_else(|| base_dir.to_path_buf(), |dir| base_dir.join(dir));
                match scope.get(IMAGESDIR_ATTR) {
                    Some(images) => base.join(images),
                    None => base,
                }
            }
        };
        Self::new(normalize_path(&dir))
    }

    /// Resolved output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of an artifact: `<id>.<ext>`.
    pub fn file_name(rendered: &Rendered, explicit_id: Option<&str>) -> (String, String) {
        let id = explicit_id.map_or_else(|| content_id(&rendered.input), str::to_owned);
        let name = format!("{id}.{}", rendered.format.extension());
        (id, name)
    }

    /// Write a rendered equation, creating the directory first if needed.
    pub fn persist(&self, rendered: &Rendered, explicit_id: Option<&str>) -> StemResult<ArtifactRecord> {
        fs::create_dir_all(&self.dir).map_err(|source| StemError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let (id, name) = Self::file_name(rendered, explicit_id);
        let path = self.dir.join(name);
        fs::write(&path, &rendered.data).map_err(|source| StemError::Write {
            path: path.clone(),
            source,
        })?;
        log::debug!("wrote {} ({} bytes)", path.display(), rendered.data.len());

        Ok(ArtifactRecord {
            id,
            path,
            width: rendered.width,
            height: rendered.height,
        })
    }
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root or a leading prefix.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let climbed = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if climbed {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::{Attrs, DocAttrs};
    use crate::config::ImageFormat;
    use crate::render::wrap_equation;

    fn rendered(body: &str, format: ImageFormat) -> Rendered {
        Rendered {
            input: wrap_equation(body, false),
            data: body.as_bytes().to_vec(),
            width: 40.0,
            height: 12.0,
            format,
        }
    }

    fn doc_attrs(pairs: &[(&str, &str)]) -> DocAttrs {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn options(base: &str, to_dir: Option<&str>) -> DocOptions {
        DocOptions {
            base_dir: PathBuf::from(base),
            to_dir: to_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_imagesoutdir_wins() {
        let attrs = doc_attrs(&[("imagesoutdir", "/tmp/eq"), ("outdir", "/out"), ("imagesdir", "img")]);
        let store = ArtifactStore::resolve(AttrScope::document(&attrs), &options("/doc", None));
        assert_eq!(store.dir(), Path::new("/tmp/eq"));

        let attrs = doc_attrs(&[("imagesoutdir", "eq/../math")]);
        let store = ArtifactStore::resolve(AttrScope::document(&attrs), &options("/doc", None));
        assert_eq!(store.dir(), Path::new("/doc/math"));
    }

    #[test]
    fn test_outdir_then_to_dir_then_base_dir() {
        let attrs = doc_attrs(&[("outdir", "/out"), ("imagesdir", "img")]);
        let store = ArtifactStore::resolve(AttrScope::document(&attrs), &options("/doc", Some("/to")));
        assert_eq!(store.dir(), Path::new("/out/img"));

        let attrs = doc_attrs(&[("imagesdir", "img")]);
        let store = ArtifactStore::resolve(AttrScope::document(&attrs), &options("/doc", Some("build")));
        assert_eq!(store.dir(), Path::new("/doc/build/img"));

        let store = ArtifactStore::resolve(AttrScope::document(&attrs), &options("/doc", None));
        assert_eq!(store.dir(), Path::new("/doc/img"));

        let empty = DocAttrs::default();
        let store = ArtifactStore::resolve(AttrScope::document(&empty), &options("/doc", None));
        assert_eq!(store.dir(), Path::new("/doc"));
    }

    #[test]
    fn test_block_attrs_override_document() {
        let doc = doc_attrs(&[("imagesdir", "img")]);
        let local: Attrs = vec![("imagesdir".into(), "figures".into())];
        let store = ArtifactStore::resolve(AttrScope::block(&local, &doc), &options("/doc", None));
        assert_eq!(store.dir(), Path::new("/doc/figures"));
    }

    #[test]
    fn test_file_name() {
        let png = rendered("x^2", ImageFormat::Png);
        let (id, name) = ArtifactStore::file_name(&png, None);
        assert_eq!(id, content_id("$$x^2$$"));
        assert_eq!(name, format!("{id}.png"));
        let digest = id.strip_prefix("stem-").unwrap();
        assert_eq!(digest.len(), 16);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));

        let svg = rendered("x^2", ImageFormat::Svg);
        let (id, name) = ArtifactStore::file_name(&svg, Some("eq-area"));
        assert_eq!(id, "eq-area");
        assert_eq!(name, "eq-area.svg");
    }

    #[test]
    fn test_persist_creates_dir_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("nested/images"));

        let first = store.persist(&rendered("a", ImageFormat::Png), Some("eq")).unwrap();
        assert_eq!(first.path, tmp.path().join("nested/images/eq.png"));
        assert_eq!(fs::read(&first.path).unwrap(), b"a");

        let second = store.persist(&rendered("b", ImageFormat::Png), Some("eq")).unwrap();
        assert_eq!(second.path, first.path);
        assert_eq!(fs::read(&second.path).unwrap(), b"b");
        assert_eq!((second.width, second.height), (40.0, 12.0));
    }

    #[test]
    fn test_persist_reports_directory_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"").unwrap();

        let store = ArtifactStore::new(blocker.join("images"));
        let err = store.persist(&rendered("a", ImageFormat::Png), None).unwrap_err();
        assert!(matches!(err, StemError::CreateDir { .. }));
        assert_eq!(err.path(), Some(blocker.join("images").as_path()));
    }
}
