#![doc = r#"
CTL2ENVI — convert GrADS control-file datasets into ENVI rasters.

A GrADS control file (CTL) describes a gridded dataset: where its binary files
live (`DSET`, possibly with date templates such as `%y4%m2%d2`), the X/Y/Z/T
axes, options such as `yrev`, and the list of variables. This crate parses the
CTL file, locates every dataset file it refers to, and writes for each one an
ENVI header (`bin` → `hdr`) and a reordered copy of the f32 band data
(`bin` → `env`).

Quick start
-----------
```rust,no_run
use std::path::Path;
use ctl2envi::{convert_ctl, ConversionParams};

fn main() -> ctl2envi::Result<()> {
    let report = convert_ctl(Path::new("/data/prec.ctl"), &ConversionParams::default())?;
    println!("converted {} file(s)", report.converted);
    Ok(())
}
```

Working with the descriptor
---------------------------
```rust
use ctl2envi::parse_ctl_str;

let ctl = "DSET ^%y4%m2%d2.bin\nXDEF 2 LINEAR 0 1\nYDEF 2 LINEAR 0 1\n";
let descriptor = parse_ctl_str(ctl, "/data/prec.ctl").unwrap();
let geometry = descriptor.geometry().unwrap();
assert_eq!((geometry.samples(), geometry.lines(), geometry.bands), (2, 2, 1));
```

Error handling
--------------
All high-level functions return `ctl2envi::Result<T>`; `ctl2envi::Error` tells
which stage failed (`Parse`, `Resolve` or `Transcode`).

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — descriptor model, CTL parser, pattern resolver.
- [`io`] — ENVI header/data writers.
- [`types`] — axis and mapping-kind enums.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use crate::core::descriptor::{Descriptor, DimensionDef, Geometry, TimeDimensionDef, VarSpec};
pub use crate::core::params::ConversionParams;
pub use error::{Error, Result};
pub use types::{Axis, MappingKind, TimeMappingKind};

// Stage errors
pub use crate::core::parser::ParseError;
pub use crate::core::pattern::ResolutionError;
pub use io::envi::TranscodeError;

// Parsing and resolution
pub use crate::core::parser::{parse_ctl_str, read_ctl_file};
pub use crate::core::pattern::{ResolvedPattern, replace_date_templates};

// High-level API re-exports
pub use api::{
    ConversionReport, ConvertedFile, convert_ctl, convert_descriptor, describe, read_ctl,
    resolve_dataset,
};
