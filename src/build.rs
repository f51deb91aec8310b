//! Static export of every page to an output directory

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::blueprint::output_file;
use crate::config::BuildSection;
use crate::Site;

/// File name of the exported not-found view
pub const NOT_FOUND_FILE: &str = "404.html";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IO error when writing `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// A page path that would land outside the output directory
    #[error("page '{page}' has path '{path}' that cannot be written safely")]
    UnsafePath { page: String, path: String },

    #[error("refusing to clean `{}`", .0.display())]
    UnsafeClean(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    pub output: PathBuf,
    /// Remove the output directory before writing
    pub clean: bool,
}

impl BuildOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            clean: false,
        }
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }
}

impl From<&BuildSection> for BuildOptions {
    fn from(section: &BuildSection) -> Self {
        Self::new(section.output.clone()).with_clean(section.clean)
    }
}

/// Summary of a finished build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Files written, relative to the output directory, in page order
    pub files: Vec<PathBuf>,
    pub pages: usize,
    pub bytes: u64,
    /// Components rendered as placeholders across all pages
    pub placeholders: usize,
    /// Components rendered as invalid-props diagnostics across all pages
    pub invalid_props: usize,
}

/// Render every page of the site into `options.output`
///
/// Every page path is checked before anything is written, so an unsafe
/// path leaves the output directory untouched.
pub fn build_site(site: &Site, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let mut targets = Vec::with_capacity(site.blueprint.pages.len());
    for page in &site.blueprint.pages {
        let key = page.route_key();
        let file = output_file(&key).ok_or_else(|| BuildError::UnsafePath {
            page: page.page_name.clone(),
            path: page.page_path.clone(),
        })?;
        targets.push((key, file));
    }

    if options.clean && options.output.exists() {
        let cwd = std::env::current_dir().ok();
        let home = std::env::var_os("HOME").map(PathBuf::from);
        clean_output(&options.output, cwd.as_deref(), home.as_deref())?;
    }
    fs::create_dir_all(&options.output)
        .map_err(|err| BuildError::Io(options.output.clone(), err))?;

    let mut report = BuildReport::default();
    for (key, file) in targets {
        let rendered = site.render(&key);
        report.placeholders += rendered.placeholders.len();
        report.invalid_props += rendered.invalid_props.len();
        report.bytes += write_file(&options.output, &file, &rendered.html)?;
        report.pages += 1;
        debug!("wrote {} -> {}", key, file.display());
        report.files.push(file);
    }

    let not_found = site.render_generic_not_found();
    let file = PathBuf::from(NOT_FOUND_FILE);
    report.bytes += write_file(&options.output, &file, &not_found.html)?;
    report.files.push(file);

    if report.placeholders > 0 {
        warn!(
            "{} component(s) rendered as placeholders; run `check` for details",
            report.placeholders
        );
    }
    info!(
        "built {} pages ({} bytes) into {}",
        report.pages,
        report.bytes,
        options.output.display()
    );

    Ok(report)
}

fn write_file(root: &Path, relative: &Path, content: &str) -> Result<u64, BuildError> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::Io(parent.to_path_buf(), err))?;
    }
    fs::write(&path, content).map_err(|err| BuildError::Io(path.clone(), err))?;
    Ok(content.len() as u64)
}

/// Directories that are never removed, nor anything below them
const PROTECTED_TREES: &[&str] = &["/etc", "/sys", "/proc", "/dev"];

/// Directories that are never removed themselves
const PROTECTED_DIRS: &[&str] = &[
    "/bin", "/boot", "/home", "/lib", "/lib64", "/opt", "/root", "/sbin", "/srv", "/usr", "/var",
    "/Users", "/System", "/Library", "/Applications",
];

/// Remove a previous build, refusing obviously dangerous targets
fn clean_output(output: &Path, cwd: Option<&Path>, home: Option<&Path>) -> Result<(), BuildError> {
    let canonical = output
        .canonicalize()
        .map_err(|err| BuildError::Io(output.to_path_buf(), err))?;
    let cwd = cwd.and_then(|d| d.canonicalize().ok());
    let home = home.and_then(|d| d.canonicalize().ok());

    if is_protected(&canonical, cwd.as_deref(), home.as_deref()) {
        return Err(BuildError::UnsafeClean(output.to_path_buf()));
    }

    debug!("cleaning {}", output.display());
    fs::remove_dir_all(output).map_err(|err| BuildError::Io(output.to_path_buf(), err))
}

/// A clean target must not be a filesystem root, the working directory or
/// one of its ancestors, the home directory or one of its ancestors, or a
/// system directory.
fn is_protected(target: &Path, cwd: Option<&Path>, home: Option<&Path>) -> bool {
    target.parent().is_none()
        || cwd.is_some_and(|cwd| cwd.starts_with(target))
        || home.is_some_and(|home| home.starts_with(target))
        || PROTECTED_TREES.iter().any(|dir| target.starts_with(dir))
        || PROTECTED_DIRS.iter().any(|dir| target == Path::new(dir))
}
