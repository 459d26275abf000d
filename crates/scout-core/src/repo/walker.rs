use std::path::{Component, Path};

use walkdir::{DirEntry, WalkDir};

use super::parse::SourceParser;
use super::{AnalyzeError, FileInfo, RepoSummary};

/// File extensions (without the dot) that are analyzed.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Directory names whose whole subtree is skipped, at any depth.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "out", "coverage"];

/// Walk `root` and build a [`RepoSummary`] of its JavaScript/TypeScript
/// sources.
///
/// Entries are visited in file-name order so repeated runs over the same
/// tree yield the same sequence. The root itself is never excluded, even if
/// its name is on the exclusion list.
pub fn analyze_repo(root: &Path) -> Result<RepoSummary, AnalyzeError> {
    // A missing root surfaces as a walk error below.
    if root.metadata().is_ok_and(|m| !m.is_dir()) {
        return Err(AnalyzeError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut parser = SourceParser::new()?;
    let mut summary = RepoSummary::default();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                tracing::warn!(
                    path = ?err.path(),
                    "skipping symlink loop"
                );
                continue;
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                return Err(AnalyzeError::Walk { path, source: err });
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(ext) = source_extension(entry.path()) else {
            continue;
        };

        let bytes = std::fs::read(entry.path()).map_err(|source| AnalyzeError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let rel = relative_path(root, entry.path());

        let (imports, exports) = match parser.outline(&text) {
            Some(outline) => (outline.imports, outline.exports),
            None => {
                tracing::debug!(path = %rel, "parse failed, recording without imports/exports");
                summary.degraded += 1;
                (Vec::new(), Vec::new())
            }
        };

        summary.files.push(FileInfo {
            path: rel,
            lang: format!(".{ext}"),
            imports,
            exports,
        });
    }

    tracing::info!(
        root = %root.display(),
        files = summary.files.len(),
        degraded = summary.degraded,
        "repository analyzed"
    );
    if summary.degraded > 0 {
        tracing::warn!(
            degraded = summary.degraded,
            "some files could not be parsed and carry no import/export data"
        );
    }

    Ok(summary)
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn source_extension(path: &Path) -> Option<&str> {
    let ext = path.extension()?.to_str()?;
    SOURCE_EXTENSIONS.contains(&ext).then_some(ext)
}

/// Render `path` relative to `root` with `/` separators.
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn keeps_only_source_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.ts", "export const a = 1;");
        write(dir.path(), "b.tsx", "export const B = () => <div />;");
        write(dir.path(), "c.js", "module.exports = {};");
        write(dir.path(), "d.jsx", "export function D() { return <p />; }");
        write(dir.path(), "e.css", "body {}");
        write(dir.path(), "f.json", "{}");
        write(dir.path(), "g.d", "nope");

        let summary = analyze_repo(dir.path()).unwrap();
        let paths: Vec<&str> = summary.paths().collect();
        assert_eq!(paths, vec!["a.ts", "b.tsx", "c.js", "d.jsx"]);
        let langs: Vec<&str> = summary.files.iter().map(|f| f.lang.as_str()).collect();
        assert_eq!(langs, vec![".ts", ".tsx", ".js", ".jsx"]);
    }

    #[test]
    fn skips_excluded_directories_at_any_depth() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/app.ts", "");
        write(dir.path(), "node_modules/react/index.js", "");
        write(dir.path(), "packages/ui/node_modules/x/y.ts", "");
        write(dir.path(), "packages/ui/dist/bundle.js", "");
        write(dir.path(), "build/out.js", "");
        write(dir.path(), "src/out/gen.ts", "");
        write(dir.path(), "coverage/lcov.js", "");
        write(dir.path(), ".git/hooks/pre-commit.js", "");
        write(dir.path(), "src/outlet.ts", "");

        let summary = analyze_repo(dir.path()).unwrap();
        let paths: Vec<&str> = summary.paths().collect();
        assert_eq!(paths, vec!["src/app.ts", "src/outlet.ts"]);
    }

    #[test]
    fn excluded_name_on_a_file_is_not_a_directory_match() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/build.ts", "export const build = 1;");

        let summary = analyze_repo(dir.path()).unwrap();
        assert_eq!(summary.files.len(), 1);
        assert_eq!(summary.files[0].exports, vec!["build"]);
    }

    #[test]
    fn root_named_like_excluded_dir_is_still_walked() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("build");
        write(&root, "index.ts", "");

        let summary = analyze_repo(&root).unwrap();
        assert_eq!(summary.paths().collect::<Vec<_>>(), vec!["index.ts"]);
    }

    #[test]
    fn parse_failures_degrade_silently() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.ts", "import { from ;;; export const = {{");
        write(dir.path(), "good.ts", "import x from \"x\";\nexport const y = x;");

        let summary = analyze_repo(dir.path()).unwrap();
        assert_eq!(summary.degraded, 1);
        let bad = &summary.files[0];
        assert_eq!(bad.path, "bad.ts");
        assert!(bad.imports.is_empty() && bad.exports.is_empty());
        let good = &summary.files[1];
        assert_eq!(good.imports, vec!["x"]);
        assert_eq!(good.exports, vec!["y"]);
    }

    #[test]
    fn traversal_order_is_stable() {
        let dir = TempDir::new().unwrap();
        for name in ["z.ts", "a/b.ts", "m.tsx", "a/a.ts"] {
            write(dir.path(), name, "");
        }
        let first = analyze_repo(dir.path()).unwrap();
        let second = analyze_repo(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.paths().collect::<Vec<_>>(),
            vec!["a/a.ts", "a/b.ts", "m.tsx", "z.ts"]
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = analyze_repo(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AnalyzeError::Walk { .. }));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "x.ts", "export const x = 1;");

        let err = analyze_repo(&dir.path().join("x.ts")).unwrap_err();
        assert!(matches!(err, AnalyzeError::NotADirectory { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/a.ts", "export const a = 1;");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("src/loop")).unwrap();

        let summary = analyze_repo(dir.path()).unwrap();
        assert_eq!(summary.paths().collect::<Vec<_>>(), vec!["src/a.ts"]);
        assert_eq!(summary.degraded, 0);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/locked.ts", "export const locked = 1;");
        let locked = dir.path().join("src/locked.ts");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read(&locked).is_ok() {
            // Running with privileges that ignore file modes.
            return;
        }

        let err = analyze_repo(dir.path()).unwrap_err();
        match err {
            AnalyzeError::Read { path, .. } => assert_eq!(path, locked),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
