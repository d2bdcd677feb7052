//! ENVI output: a text header (`.hdr`) and a raw band file (`.env`) written
//! next to each matched dataset file.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::descriptor::{Descriptor, Geometry};
use crate::core::reorder;
use crate::io::raw::{read_f32_file, write_f32_file};

/// Errors raised while converting one dataset file
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("{path}: expected {expected} f32 samples, found {actual}")]
    ShapeMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
    #[error("cannot read {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot derive output name for {0}: file name contains no `bin`")]
    OutputPath(PathBuf),
}

const HEADER_PREAMBLE: &str = "ENVI
header offset = 0
file type = ENVI Standard
data type = 4
interleave = bsq
sensor type = Unknown
byte order = 0
coordinate system string = {GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]}
wavelength units = Unknown
";

/// Fixed pixel size written into `map info`
const PIXEL_SIZE: &str = "1.5000";

/// Replace every `bin` in the file name with `replacement`. The directory is
/// kept as is. A name without `bin` would map onto the input itself.
pub fn sibling_path(input: &Path, replacement: &str) -> Result<PathBuf, TranscodeError> {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy())
        .filter(|n| n.contains("bin"))
        .ok_or_else(|| TranscodeError::OutputPath(input.to_path_buf()))?;
    Ok(input.with_file_name(name.replace("bin", replacement)))
}

pub fn header_path(input: &Path) -> Result<PathBuf, TranscodeError> {
    sibling_path(input, "hdr")
}

pub fn data_path(input: &Path) -> Result<PathBuf, TranscodeError> {
    sibling_path(input, "env")
}

/// Render the header text for a dataset.
///
/// The second `map info` pair repeats `values[1]` of X and Y as they appear in
/// the CTL file (for LINEAR axes that is the increment, not an extent).
pub fn render_header(geometry: &Geometry<'_>, title: &str) -> String {
    let mut txt = String::from(HEADER_PREAMBLE);
    txt.push_str(&format!("samples = {}\n", geometry.samples()));
    txt.push_str(&format!("lines = {}\n", geometry.lines()));
    txt.push_str(&format!("bands = {}\n", geometry.bands));
    txt.push_str(&format!(
        "map info = {{Geographic Lat/Lon, {px}, {px}, {}, {}, {}, {}, WGS-84, units=Degrees}}\n",
        format_coord(geometry.x.values[0]),
        format_coord(geometry.y.values[0]),
        format_coord(geometry.x.values[1]),
        format_coord(geometry.y.values[1]),
        px = PIXEL_SIZE,
    ));
    txt.push_str(&format!("description = {{{} }}\n", title));
    txt
}

// Always keep a decimal point: 0 -> "0.0", -60 -> "-60.0"
fn format_coord(v: f64) -> String {
    format!("{:?}", v)
}

/// Write the `.hdr` companion of `input`
pub fn write_header(
    input: &Path,
    geometry: &Geometry<'_>,
    title: &str,
) -> Result<PathBuf, TranscodeError> {
    let path = header_path(input)?;
    let write = || -> io::Result<()> {
        let mut file = BufWriter::new(File::create(&path)?);
        file.write_all(render_header(geometry, title).as_bytes())?;
        file.flush()
    };
    write().map_err(|source| TranscodeError::WriteFailure {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote header {:?}", path);
    Ok(path)
}

/// Write the `.env` band file of `input`, reordering rows when `y_reversed`.
/// Values are copied bit for bit.
pub fn write_data(
    input: &Path,
    geometry: &Geometry<'_>,
    y_reversed: bool,
) -> Result<PathBuf, TranscodeError> {
    let samples = read_f32_file(input).map_err(|source| TranscodeError::ReadFailure {
        path: input.to_path_buf(),
        source,
    })?;

    let shape = (geometry.lines(), geometry.samples());
    let expected = geometry.element_count();
    if samples.len() != expected {
        return Err(TranscodeError::ShapeMismatch {
            path: input.to_path_buf(),
            expected,
            actual: samples.len(),
        });
    }
    let matrix = ArrayView2::from_shape(shape, &samples).map_err(|_| {
        TranscodeError::ShapeMismatch {
            path: input.to_path_buf(),
            expected,
            actual: samples.len(),
        }
    })?;

    let output = if y_reversed {
        reorder::yrev(matrix)
    } else {
        matrix
    };

    let path = data_path(input)?;
    write_f32_file(&path, output.iter()).map_err(|source| TranscodeError::WriteFailure {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote data {:?} ({} samples)", path, expected);
    Ok(path)
}

/// Header then data for one matched file. A failed data write leaves the
/// header behind.
pub fn transcode_file(
    input: &Path,
    descriptor: &Descriptor,
    geometry: &Geometry<'_>,
) -> Result<(PathBuf, PathBuf), TranscodeError> {
    info!("Converting {:?}", input);
    let header = write_header(input, geometry, &descriptor.title)?;
    let data = write_data(input, geometry, descriptor.is_y_reversed())?;
    Ok((header, data))
}
