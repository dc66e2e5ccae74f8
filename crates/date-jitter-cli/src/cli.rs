//! Command-line arguments for `date-jitter`.

use clap::Parser;
use date_jitter::options::DEFAULT_DAYS;
use date_jitter::{JitterOptions, ValueRepresentation};

/// Shift DICOM dates and timestamps by a fixed number of days, keeping
/// their original encoding.
#[derive(Debug, Parser)]
#[command(name = "date-jitter")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
  date-jitter --vr DA --days 10 20200101
  date-jitter --vr DT 20200101120000.000000
  date-jitter --vr DA --extras 'days=-3 years=1' 20200101 20200103
  echo '[20200101, 20200103]' | date-jitter --vr DA")]
pub struct Cli {
    /// Values to jitter. One value is a single-valued field, several form a
    /// multi-value field. Read from stdin (one per line) when omitted.
    #[arg(value_name = "VALUE")]
    pub values: Vec<String>,

    /// DICOM value representation: DA, DT, or anything else for unknown.
    #[arg(long, default_value = "UN")]
    pub vr: String,

    /// Field name used in log messages.
    #[arg(long, default_value = "value")]
    pub name: String,

    /// Base day offset. Negative values shift into the past.
    #[arg(long, default_value_t = DEFAULT_DAYS, allow_negative_numbers = true)]
    pub days: i64,

    /// Additional whole years, counted as 365 days each.
    #[arg(long, allow_negative_numbers = true)]
    pub years: Option<i64>,

    /// Option string such as "days=10 years=1". Overrides --days and --years.
    #[arg(long, value_name = "OPTIONS")]
    pub extras: Option<String>,

    /// Print jittered multi-value fields one value per line instead of
    /// joined with a backslash.
    #[arg(long)]
    pub multi: bool,

    /// Emit a JSON object instead of the bare value.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Enable verbose logging (use multiple times for more detail)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn options(&self) -> JitterOptions {
        match &self.extras {
            Some(extras) => JitterOptions::from_extras(extras),
            None => JitterOptions {
                days: self.days,
                years: self.years,
            },
        }
    }

    pub fn vr(&self) -> ValueRepresentation {
        ValueRepresentation::from_code(&self.vr)
    }
}
