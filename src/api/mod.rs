//! High-level library API: read a CTL file, locate its dataset files, and
//! convert each of them to an ENVI header/data pair. Prefer these entrypoints
//! over the low-level `core` and `io` modules when embedding the converter.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::core::descriptor::Descriptor;
use crate::core::params::ConversionParams;
use crate::core::parser::read_ctl_file;
use crate::core::pattern::ResolvedPattern;
use crate::error::Result;
use crate::io::envi::transcode_file;

/// Outputs written for one dataset file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub header: PathBuf,
    pub data: PathBuf,
}

/// Summary of a conversion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Every dataset file the pattern matched, sorted
    pub matched: Vec<PathBuf>,
    pub converted: usize,
    pub failed: usize,
    pub outputs: Vec<ConvertedFile>,
}

/// Parse a CTL file from disk
pub fn read_ctl(path: &Path) -> Result<Descriptor> {
    Ok(read_ctl_file(path)?)
}

/// Locate the physical files backing a descriptor
pub fn resolve_dataset(descriptor: &Descriptor) -> Result<Vec<PathBuf>> {
    let resolved = ResolvedPattern::new(&descriptor.dataset_pattern, &descriptor.source_path);
    info!(
        "Dataset base directory: {:?}, pattern: {}",
        resolved.base_dir, resolved.glob
    );
    Ok(resolved.matching_files()?)
}

/// Pretty JSON rendering of a descriptor
pub fn describe(descriptor: &Descriptor) -> Result<String> {
    Ok(serde_json::to_string_pretty(descriptor)?)
}

/// Convert every dataset file of an already parsed descriptor, one at a time.
///
/// The X/Y geometry is checked and the files are resolved before anything is
/// written. By default the first failing file aborts the run; with
/// `continue_on_error` failures are counted in the report instead.
pub fn convert_descriptor(
    descriptor: &Descriptor,
    params: &ConversionParams,
) -> Result<ConversionReport> {
    let geometry = descriptor.geometry()?;
    let matched = resolve_dataset(descriptor)?;

    let mut report = ConversionReport {
        matched,
        ..ConversionReport::default()
    };

    if params.dry_run {
        for path in &report.matched {
            info!("Would convert {:?}", path);
        }
        return Ok(report);
    }

    for input in &report.matched {
        match transcode_file(input, descriptor, &geometry) {
            Ok((header, data)) => {
                report.converted += 1;
                report.outputs.push(ConvertedFile {
                    input: input.clone(),
                    header,
                    data,
                });
            }
            Err(e) if params.continue_on_error => {
                warn!("Error converting {:?}: {}", input, e);
                report.failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        "Conversion complete: converted={}, failed={}",
        report.converted, report.failed
    );
    Ok(report)
}

/// Parse `ctl_path` and convert every dataset file it describes
pub fn convert_ctl(ctl_path: &Path, params: &ConversionParams) -> Result<ConversionReport> {
    let descriptor = read_ctl(ctl_path)?;
    convert_descriptor(&descriptor, params)
}
