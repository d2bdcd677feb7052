//! Parsed form of a CTL file: the `Descriptor` aggregate and the dimension
//! model (`DimensionDef`, `TimeDimensionDef`, `VarSpec`) it is built from.
//!
//! Every value here is constructed once by the parser and only read afterwards.
use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::parser::ParseError;
use crate::types::{Axis, MappingKind, TimeMappingKind};

/// One spatial axis (XDEF, YDEF or ZDEF)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionDef {
    /// Number of samples along the axis
    pub count: usize,
    pub mapping: MappingKind,
    /// `[origin, increment]` for `Linear`, otherwise the listed values
    pub values: Vec<f64>,
}

impl DimensionDef {
    /// Parse the value part of an XDEF/YDEF/ZDEF line, e.g. `144 LINEAR 0.0 2.5`.
    pub fn parse(value: &str, axis: Axis) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::MalformedDimensionDef(format!(
                "{} expects at least 3 fields, got {}",
                axis.keyword(),
                tokens.len()
            )));
        }

        let count = parse_count(tokens[0], axis.keyword())?;
        let mapping = MappingKind::from_keyword(tokens[1], axis)
            .ok_or_else(|| ParseError::InvalidMappingKind(axis.to_string()))?;

        let values = tokens[2..]
            .iter()
            .map(|t| {
                t.parse::<f64>().map_err(|_| ParseError::InvalidNumericValue {
                    field: format!("{} value", axis.keyword()),
                    value: t.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            count,
            mapping,
            values,
        })
    }
}

/// The time axis (TDEF). Values are kept as raw tokens (e.g. `00Z01JAN2000`, `6hr`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDimensionDef {
    pub count: usize,
    pub mapping: TimeMappingKind,
    pub values: Vec<String>,
}

impl TimeDimensionDef {
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(ParseError::MalformedDimensionDef(format!(
                "TDEF expects at least 3 fields, got {}",
                tokens.len()
            )));
        }

        let count = parse_count(tokens[0], "TDEF")?;
        let mapping = TimeMappingKind::from_keyword(tokens[1])
            .ok_or_else(|| ParseError::InvalidMappingKind("T".to_string()))?;

        Ok(Self {
            count,
            mapping,
            values: tokens[2..].iter().map(|t| t.to_string()).collect(),
        })
    }
}

/// One entry of the VARS block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarSpec {
    pub name: String,
    /// Kept verbatim; GrADS allows forms such as `0` or `1,40,1`
    pub vertical_levels: String,
    pub units: String,
    pub description: String,
}

impl VarSpec {
    /// Parse a VARS line: `name levels units description...`
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(ParseError::MalformedVar(format!(
                "expected at least 4 fields, got {} in `{}`",
                tokens.len(),
                line.trim()
            )));
        }

        Ok(Self {
            name: tokens[0].to_string(),
            vertical_levels: tokens[1].to_string(),
            units: tokens[2].to_string(),
            description: tokens[3..].join(" "),
        })
    }
}

/// Everything read from one CTL file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Path of the CTL file; `^` dataset patterns resolve against its directory
    pub source_path: PathBuf,
    pub dataset_pattern: String,
    pub title: String,
    /// Lowercased OPTIONS tokens
    pub options: BTreeSet<String>,
    pub undef: Option<f64>,
    pub x_axis: Option<DimensionDef>,
    pub y_axis: Option<DimensionDef>,
    pub z_axis: Option<DimensionDef>,
    pub t_axis: Option<TimeDimensionDef>,
    pub variables: Vec<VarSpec>,
}

/// Raster geometry needed to emit ENVI output, borrowed from a validated `Descriptor`
#[derive(Debug, Clone, Copy)]
pub struct Geometry<'a> {
    pub x: &'a DimensionDef,
    pub y: &'a DimensionDef,
    pub bands: usize,
    elements: usize,
}

impl Geometry<'_> {
    pub fn samples(&self) -> usize {
        self.x.count
    }

    pub fn lines(&self) -> usize {
        self.y.count
    }

    /// Number of f32 elements one band file must hold
    pub fn element_count(&self) -> usize {
        self.elements
    }
}

impl Descriptor {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    /// Rows are stored north-to-south and must be flipped on output
    pub fn is_y_reversed(&self) -> bool {
        self.has_option("yrev")
    }

    /// Check the X/Y invariants and hand out the geometry used by the transcoder.
    /// `map info` reads the first two values of both axes, so each needs two.
    pub fn geometry(&self) -> Result<Geometry<'_>, ParseError> {
        let x = Self::required_axis(self.x_axis.as_ref(), Axis::X)?;
        let y = Self::required_axis(self.y_axis.as_ref(), Axis::Y)?;
        let bands = self.z_axis.as_ref().map_or(1, |z| z.count);
        let elements = x
            .count
            .checked_mul(y.count)
            .ok_or(ParseError::GridTooLarge {
                samples: x.count,
                lines: y.count,
            })?;
        Ok(Geometry {
            x,
            y,
            bands,
            elements,
        })
    }

    fn required_axis(def: Option<&DimensionDef>, axis: Axis) -> Result<&DimensionDef, ParseError> {
        let def = def.ok_or(ParseError::MissingDimension(axis))?;
        if def.count == 0 || def.values.len() < 2 {
            return Err(ParseError::IncompleteDimension(axis));
        }
        Ok(def)
    }
}

fn parse_count(token: &str, keyword: &str) -> Result<usize, ParseError> {
    token
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidNumericValue {
            field: format!("{} count", keyword),
            value: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_axis() {
        let def = DimensionDef::parse("144  LINEAR   0.0 2.5", Axis::X).unwrap();
        assert_eq!(def.count, 144);
        assert_eq!(def.mapping, MappingKind::Linear);
        assert_eq!(def.values, vec![0.0, 2.5]);
    }

    #[test]
    fn gaussian_on_y_only() {
        let def = DimensionDef::parse("4 GAUST62 1", Axis::Y).unwrap();
        assert_eq!(def.mapping, MappingKind::GaussianT62);

        let err = DimensionDef::parse("4 GAUST62 1", Axis::X).unwrap_err();
        assert!(matches!(err, ParseError::InvalidMappingKind(ref d) if d == "X"));
    }

    #[test]
    fn axis_needs_three_fields() {
        let err = DimensionDef::parse("4 LINEAR", Axis::Z).unwrap_err();
        assert!(matches!(err, ParseError::MalformedDimensionDef(_)));
    }

    #[test]
    fn axis_rejects_bad_numbers() {
        let err = DimensionDef::parse("four LINEAR 0 1", Axis::X).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumericValue { .. }));

        let err = DimensionDef::parse("4 LEVELS 1000 85O 700 500", Axis::Z).unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidNumericValue { ref value, .. } if value == "85O")
        );
    }

    #[test]
    fn time_axis_keeps_tokens() {
        let def = TimeDimensionDef::parse("12 LINEAR 00Z01JAN2000 1mo").unwrap();
        assert_eq!(def.count, 12);
        assert_eq!(def.mapping, TimeMappingKind::Linear);
        assert_eq!(def.values, vec!["00Z01JAN2000", "1mo"]);

        let err = TimeDimensionDef::parse("12 GAUST62 00Z01JAN2000").unwrap_err();
        assert!(matches!(err, ParseError::InvalidMappingKind(ref d) if d == "T"));
    }

    #[test]
    fn var_description_is_rejoined() {
        let var = VarSpec::parse("temp 1 K   air    temperature").unwrap();
        assert_eq!(
            var,
            VarSpec {
                name: "temp".into(),
                vertical_levels: "1".into(),
                units: "K".into(),
                description: "air temperature".into(),
            }
        );
    }

    #[test]
    fn var_with_three_fields_is_malformed() {
        let err = VarSpec::parse("temp 1 K").unwrap_err();
        assert!(matches!(err, ParseError::MalformedVar(_)));
    }

    #[test]
    fn fresh_containers_per_descriptor() {
        let mut a = Descriptor::new("a.ctl");
        a.options.insert("yrev".into());
        let b = Descriptor::new("b.ctl");
        assert!(a.is_y_reversed());
        assert!(b.options.is_empty());
    }

    #[test]
    fn geometry_requires_x_and_y() {
        let mut d = Descriptor::new("f.ctl");
        d.y_axis = Some(DimensionDef::parse("2 LINEAR 0 1", Axis::Y).unwrap());
        assert!(matches!(
            d.geometry().unwrap_err(),
            ParseError::MissingDimension(Axis::X)
        ));

        d.x_axis = Some(DimensionDef::parse("3 LEVELS 5", Axis::X).unwrap());
        assert!(matches!(
            d.geometry().unwrap_err(),
            ParseError::IncompleteDimension(Axis::X)
        ));

        d.x_axis = Some(DimensionDef::parse("3 LINEAR 0 1", Axis::X).unwrap());
        let g = d.geometry().unwrap();
        assert_eq!((g.samples(), g.lines(), g.bands), (3, 2, 1));
        assert_eq!(g.element_count(), 6);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_grid_is_rejected() {
        let mut d = Descriptor::new("f.ctl");
        d.x_axis = Some(DimensionDef::parse("4294967296 LINEAR 0 1", Axis::X).unwrap());
        d.y_axis = Some(DimensionDef::parse("4294967296 LINEAR 0 1", Axis::Y).unwrap());
        assert!(matches!(
            d.geometry().unwrap_err(),
            ParseError::GridTooLarge {
                samples: 4294967296,
                lines: 4294967296,
            }
        ));
    }

    #[test]
    fn time_axis_needs_three_fields() {
        let err = TimeDimensionDef::parse("12 LINEAR").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDimensionDef(_)));
    }
}
