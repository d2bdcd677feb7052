//! Line-oriented CTL reader.
//!
//! The file is walked with a three-state machine: `FindSection` looks at the
//! leading keyword of each line, `FindKey` dispatches a `KEY value` entry onto
//! the `Descriptor`, and `FindVar` collects VARS entries until `ENDVARS`.
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::descriptor::{Descriptor, DimensionDef, TimeDimensionDef, VarSpec};
use crate::types::Axis;

/// Errors raised while reading a CTL file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read CTL file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown CTL key `{0}`")]
    UnknownKey(String),
    #[error("malformed dimension definition: {0}")]
    MalformedDimensionDef(String),
    #[error("malformed VAR entry: {0}")]
    MalformedVar(String),
    #[error("invalid mapping method for {0}DEF")]
    InvalidMappingKind(String),
    #[error("invalid numeric value `{value}` for {field}")]
    InvalidNumericValue { field: String, value: String },
    #[error("OPTIONS entry lists no options")]
    EmptyOptions,
    #[error("CTL file has no {0}DEF entry")]
    MissingDimension(Axis),
    #[error("{0}DEF needs a positive count and at least two values")]
    IncompleteDimension(Axis),
    #[error("grid of {samples} x {lines} samples does not fit in memory")]
    GridTooLarge { samples: usize, lines: usize },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum ReadState {
    FindSection,
    FindKey,
    FindVar,
}

/// Outcome of feeding one line to the state machine
enum Step {
    /// The line was handled; continue with the next one in this state
    Consumed(ReadState),
    /// Feed the same line again in this state
    Reprocess(ReadState),
}

/// Read and parse a CTL file from disk
pub fn read_ctl_file(path: impl AsRef<Path>) -> Result<Descriptor, ParseError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ctl_str(&content, path)
}

/// Parse CTL text. `source_path` is recorded on the descriptor for `^` patterns.
pub fn parse_ctl_str(content: &str, source_path: impl Into<PathBuf>) -> Result<Descriptor, ParseError> {
    let mut descriptor = Descriptor::new(source_path);
    let mut state = ReadState::FindSection;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if is_comment(line) {
            continue;
        }

        loop {
            match step(&mut descriptor, state, line) {
                Ok(Step::Consumed(next)) => {
                    state = next;
                    break;
                }
                Ok(Step::Reprocess(next)) => state = next,
                Err(e) => {
                    debug!("CTL parse failed at line {}: {}", index + 1, line);
                    return Err(e);
                }
            }
        }
    }

    if state == ReadState::FindVar {
        warn!("VARS block not terminated by ENDVARS in {:?}", descriptor.source_path);
    }

    debug!(
        "Parsed CTL {:?}: dset={}, options={:?}, vars={}",
        descriptor.source_path,
        descriptor.dataset_pattern,
        descriptor.options,
        descriptor.variables.len()
    );

    Ok(descriptor)
}

fn step(descriptor: &mut Descriptor, state: ReadState, line: &str) -> Result<Step, ParseError> {
    match state {
        ReadState::FindSection => {
            if line.is_empty() {
                return Ok(Step::Consumed(ReadState::FindSection));
            }
            let (key, _) = split_key_value(line);
            Ok(match key {
                "VARS" => Step::Consumed(ReadState::FindVar),
                "ENDVARS" => Step::Consumed(ReadState::FindSection),
                _ => Step::Reprocess(ReadState::FindKey),
            })
        }
        ReadState::FindKey => {
            if !line.is_empty() {
                let (key, value) = split_key_value(line);
                set_key_value(descriptor, key, value)?;
            }
            Ok(Step::Consumed(ReadState::FindSection))
        }
        ReadState::FindVar => {
            if line == "ENDVARS" {
                return Ok(Step::Consumed(ReadState::FindSection));
            }
            if !line.is_empty() {
                descriptor.variables.push(VarSpec::parse(line)?);
            }
            Ok(Step::Consumed(ReadState::FindVar))
        }
    }
}

fn set_key_value(descriptor: &mut Descriptor, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "DSET" => descriptor.dataset_pattern = value.to_string(),
        "TITLE" => descriptor.title = value.to_string(),
        "UNDEF" => {
            let value = value.trim();
            if !value.is_empty() {
                let undef = value
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumericValue {
                        field: "UNDEF".to_string(),
                        value: value.to_string(),
                    })?;
                descriptor.undef = Some(undef);
            }
        }
        "OPTIONS" => {
            let options: Vec<String> = value
                .split_whitespace()
                .map(|o| o.to_ascii_lowercase())
                .collect();
            if options.is_empty() {
                return Err(ParseError::EmptyOptions);
            }
            descriptor.options = options.into_iter().collect();
        }
        "XDEF" => descriptor.x_axis = Some(DimensionDef::parse(value, Axis::X)?),
        "YDEF" => descriptor.y_axis = Some(DimensionDef::parse(value, Axis::Y)?),
        "ZDEF" => descriptor.z_axis = Some(DimensionDef::parse(value, Axis::Z)?),
        "TDEF" => descriptor.t_axis = Some(TimeDimensionDef::parse(value)?),
        other => return Err(ParseError::UnknownKey(other.to_string())),
    }
    Ok(())
}

/// Split `KEY rest of line` at the first run of whitespace
fn split_key_value(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim_start()),
        None => (line, ""),
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('*')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MappingKind, TimeMappingKind};

    const SAMPLE: &str = "\
DSET ^data/%y4%m2%d2.bin
TITLE Daily precipitation  (mm)
UNDEF -999.0
OPTIONS YREV little_endian
* grid
XDEF 2 LINEAR 0 1
YDEF 2 LINEAR 0 1
ZDEF 1 LINEAR 0 1
TDEF 365 LINEAR 00Z01JAN2020 1dy

VARS 2
prec 0 99 total precipitation
temp 1 K air temperature
ENDVARS
";

    #[test]
    fn parses_full_descriptor() {
        let d = parse_ctl_str(SAMPLE, "/x/y/f.ctl").unwrap();

        assert_eq!(d.source_path, PathBuf::from("/x/y/f.ctl"));
        assert_eq!(d.dataset_pattern, "^data/%y4%m2%d2.bin");
        assert_eq!(d.title, "Daily precipitation  (mm)");
        assert_eq!(d.undef, Some(-999.0));
        assert!(d.has_option("yrev"));
        assert!(d.has_option("little_endian"));

        let x = d.x_axis.as_ref().unwrap();
        let y = d.y_axis.as_ref().unwrap();
        let z = d.z_axis.as_ref().unwrap();
        assert_eq!((x.count, y.count, z.count), (2, 2, 1));
        assert_eq!(x.mapping, MappingKind::Linear);

        let t = d.t_axis.as_ref().unwrap();
        assert_eq!(t.mapping, TimeMappingKind::Linear);
        assert_eq!(t.values, vec!["00Z01JAN2020", "1dy"]);

        assert_eq!(d.variables.len(), 2);
        assert_eq!(d.variables[1].name, "temp");
        assert_eq!(d.variables[1].vertical_levels, "1");
        assert_eq!(d.variables[1].units, "K");
        assert_eq!(d.variables[1].description, "air temperature");
    }

    #[test]
    fn unknown_key_aborts() {
        let err = parse_ctl_str("DSET a.bin\nFOO bar\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::UnknownKey(ref k) if k == "FOO"));
    }

    #[test]
    fn keys_are_case_sensitive() {
        let err = parse_ctl_str("dset a.bin\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::UnknownKey(ref k) if k == "dset"));
    }

    #[test]
    fn short_var_line_aborts() {
        let err = parse_ctl_str("VARS 1\ntemp 1 K\nENDVARS\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::MalformedVar(_)));
    }

    #[test]
    fn gaussian_x_axis_aborts() {
        let err = parse_ctl_str("XDEF 4 GAUST62 1\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::InvalidMappingKind(ref d) if d == "X"));

        let d = parse_ctl_str("YDEF 4 GAUST62 1\n", "f.ctl").unwrap();
        assert_eq!(d.y_axis.unwrap().mapping, MappingKind::GaussianT62);
    }

    #[test]
    fn bad_undef_aborts() {
        let err = parse_ctl_str("UNDEF nothing\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumericValue { ref field, .. } if field == "UNDEF"));
    }

    #[test]
    fn empty_undef_is_absent() {
        let d = parse_ctl_str("UNDEF\n", "f.ctl").unwrap();
        assert_eq!(d.undef, None);
    }

    #[test]
    fn empty_options_abort() {
        let err = parse_ctl_str("OPTIONS\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::EmptyOptions));
    }

    #[test]
    fn later_options_replace_earlier_ones() {
        let d = parse_ctl_str("OPTIONS yrev\nOPTIONS big_endian\n", "f.ctl").unwrap();
        assert!(!d.is_y_reversed());
        assert!(d.has_option("big_endian"));
        assert_eq!(d.options.len(), 1);
    }

    #[test]
    fn short_tdef_aborts() {
        let err = parse_ctl_str("TDEF 12 LINEAR\n", "f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDimensionDef(_)));
    }

    #[test]
    fn unterminated_vars_block_is_accepted() {
        let d = parse_ctl_str("VARS 1\nprec 0 99 rain rate\n", "f.ctl").unwrap();
        assert_eq!(d.variables.len(), 1);
        assert_eq!(d.variables[0].description, "rain rate");
    }

    #[test]
    fn keys_after_vars_block_are_read() {
        let ctl = "VARS 1\nprec 0 99 rain\nENDVARS\nTITLE after\n";
        let d = parse_ctl_str(ctl, "f.ctl").unwrap();
        assert_eq!(d.title, "after");
    }

    #[test]
    fn duplicate_vars_keep_order() {
        let ctl = "VARS 3\nb 0 x one\na 0 x two\nb 0 x three\nENDVARS\n";
        let d = parse_ctl_str(ctl, "f.ctl").unwrap();
        let names: Vec<&str> = d.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_ctl_file("/nonexistent/dir/f.ctl").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
