use tracing::info;
use tracing_subscriber::EnvFilter;

use ctl2envi::{ConversionParams, Error, Result, convert_descriptor, describe, read_ctl};

use super::args::CliArgs;

/// One-line message printed on failure, e.g. `error: parse error: unknown CTL key `FOO``
pub fn error_line(e: &Error) -> String {
    format!("error: {e}")
}

pub fn run(args: CliArgs) -> Result<()> {
    if args.log {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let params = ConversionParams {
        continue_on_error: args.keep_going,
        dry_run: args.dry_run,
    };

    info!("Reading control file: {:?}", args.ctl);
    let descriptor = read_ctl(&args.ctl)?;

    if args.describe {
        println!("{}", describe(&descriptor)?);
    }

    let report = convert_descriptor(&descriptor, &params)?;

    if params.dry_run {
        for path in &report.matched {
            println!("{}", path.display());
        }
        return Ok(());
    }

    if report.failed > 0 {
        return Err(Error::PartialFailure {
            failed: report.failed,
            total: report.matched.len(),
        });
    }

    info!("Successfully converted {} file(s)", report.converted);
    Ok(())
}
