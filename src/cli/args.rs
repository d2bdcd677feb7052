use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctl2envi", version, about = "Convert GrADS CTL datasets to ENVI rasters")]
pub struct CliArgs {
    /// GrADS control file describing the dataset
    pub ctl: PathBuf,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Continue with the remaining dataset files when one fails
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,

    /// List the dataset files that would be converted and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Print the parsed descriptor as JSON before converting
    #[arg(long, default_value_t = false)]
    pub describe: bool,
}
