//! Lesson directory layout discovery.
//!
//! A lesson directory holds everything one video is built from:
//!
//! ```text
//! lesson_07/
//!   script.txt          narration script with slide markers
//!   audios/slide_NN.wav per-slide narration clips
//!   frames/slide_NN.png rendered slide images
//!   vignette.mp4        optional intro/outro clip
//!   output/             encode target (created on demand)
//! ```

use std::path::{Path, PathBuf};

use super::errors::{StepError, StepResult};

const AUDIO_SUBDIR: &str = "audios";
const FRAMES_SUBDIR: &str = "frames";
const VIGNETTE_NAMES: &[&str] = &["vignette.mp4", "vinheta.mp4"];

/// Resolved paths inside one lesson directory.
#[derive(Debug, Clone)]
pub struct LessonPaths {
    /// The lesson directory itself.
    pub root: PathBuf,
    /// Narration script, if one exists.
    pub script: Option<PathBuf>,
    /// Directory of per-slide narration clips.
    pub audio_dir: PathBuf,
    /// Directory of rendered slide images.
    pub frames_dir: PathBuf,
    /// Optional vignette clip.
    pub vignette: Option<PathBuf>,
    /// Final video path.
    pub output: PathBuf,
}

impl LessonPaths {
    /// Resolve the layout of a lesson directory.
    ///
    /// The directory must exist; everything inside it is optional and
    /// validated later by the steps that need it.
    pub fn discover(root: &Path, output_subdir: &str) -> StepResult<Self> {
        if !root.is_dir() {
            return Err(StepError::file_not_found(root.display().to_string()));
        }

        let script = find_script(root)?;
        let vignette = VIGNETTE_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|p| p.is_file());

        Ok(Self {
            root: root.to_path_buf(),
            script,
            audio_dir: root.join(AUDIO_SUBDIR),
            frames_dir: root.join(FRAMES_SUBDIR),
            vignette,
            output: root.join(output_subdir).join("output.mp4"),
        })
    }

    /// Job name derived from the lesson directory name.
    pub fn job_name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "lesson".to_string())
    }
}

/// Find the narration script: `script.txt`, or the lexically first
/// `script*.txt` file.
fn find_script(root: &Path) -> StepResult<Option<PathBuf>> {
    let exact = root.join("script.txt");
    if exact.is_file() {
        return Ok(Some(exact));
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(root)
        .map_err(|e| StepError::io_error("scanning lesson directory", e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("script") && n.ends_with(".txt"))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    Ok(candidates.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_full_lesson_layout() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("script.txt"), "[slide_01]").unwrap();
        fs::create_dir(tmp.path().join("audios")).unwrap();
        fs::create_dir(tmp.path().join("frames")).unwrap();
        fs::write(tmp.path().join("vignette.mp4"), b"").unwrap();

        let paths = LessonPaths::discover(tmp.path(), "output").unwrap();

        assert_eq!(paths.script.unwrap(), tmp.path().join("script.txt"));
        assert_eq!(paths.audio_dir, tmp.path().join("audios"));
        assert_eq!(paths.frames_dir, tmp.path().join("frames"));
        assert!(paths.vignette.is_some());
        assert_eq!(paths.output, tmp.path().join("output").join("output.mp4"));
    }

    #[test]
    fn script_and_vignette_are_optional() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = LessonPaths::discover(tmp.path(), "output").unwrap();
        assert!(paths.script.is_none());
        assert!(paths.vignette.is_none());
    }

    #[test]
    fn prefixed_script_name_is_found() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("script_lesson07.txt"), "[slide_01]").unwrap();

        let paths = LessonPaths::discover(tmp.path(), "output").unwrap();
        assert_eq!(
            paths.script.unwrap(),
            tmp.path().join("script_lesson07.txt")
        );
    }

    #[test]
    fn alternate_vignette_name_is_recognized() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("vinheta.mp4"), b"").unwrap();

        let paths = LessonPaths::discover(tmp.path(), "output").unwrap();
        assert!(paths.vignette.unwrap().ends_with("vinheta.mp4"));
    }

    #[test]
    fn missing_lesson_directory_is_an_error() {
        let err = LessonPaths::discover(Path::new("/nonexistent/lesson"), "output").unwrap_err();
        assert!(matches!(err, StepError::FileNotFound { .. }));
    }
}
