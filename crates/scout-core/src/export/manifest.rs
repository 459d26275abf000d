use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ExportError, normalize_path, write_file};

/// File name of the batch manifest inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "index.json";

/// One exported plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub goal: String,
    /// Path of the plan file as written.
    pub file: String,
}

/// Index of every plan produced in one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub plans: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn push(&mut self, goal: impl Into<String>, file: &Path) {
        self.plans.push(ManifestEntry {
            goal: goal.into(),
            file: file.display().to_string(),
        });
    }

    /// Write the manifest as `<out_dir>/index.json`, creating `out_dir` if
    /// needed. Returns the written path, normalized like
    /// [`plan_path`](super::plan_path).
    pub fn write(&self, out_dir: &Path) -> Result<PathBuf, ExportError> {
        let path = normalize_path(&out_dir.join(MANIFEST_FILE_NAME));
        let json = serde_json::to_string_pretty(self).map_err(|source| ExportError::Serialize {
            what: "manifest",
            source,
        })?;
        // Covers the zero-plan case, where no export created the directory.
        std::fs::create_dir_all(out_dir).map_err(|source| ExportError::CreateDir {
            path: out_dir.to_path_buf(),
            source,
        })?;
        write_file(&path, &json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn writes_plans_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("plans");
        let mut manifest = Manifest::default();
        manifest.push("A", &out.join("a.json"));
        manifest.push("B", &out.join("b.json"));

        let path = manifest.write(&out).unwrap();

        assert_eq!(path, out.join("index.json"));
        let back: Manifest = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, manifest);
        assert_eq!(back.plans[0].goal, "A");
        assert_eq!(back.plans[1].file, out.join("b.json").display().to_string());
    }

    #[test]
    fn written_path_drops_current_dir_components() {
        let dir = TempDir::new().unwrap();
        let path = Manifest::default().write(&dir.path().join("./plans/")).unwrap();
        assert_eq!(path, dir.path().join("plans/index.json"));
        assert!(path.is_file());
    }

    #[test]
    fn empty_manifest_still_written() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("fresh");
        let path = Manifest::default().write(&out).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "{\n  \"plans\": []\n}");
    }
}
