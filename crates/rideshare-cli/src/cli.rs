//! CLI argument definitions for the rideshare client.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `validate` | Check a ride or parcel offer against its schema |
//! | `submit` | Validate an offer and create it on the backend |
//! | `list` | List rides or parcels |
//! | `get` | Fetch one ride or parcel |
//! | `search` | Search rides or parcels by route and filters |
//! | `book` | Book seats on a ride |
//! | `accept` | Accept a parcel delivery |
//! | `cancel` | Cancel a ride or parcel |
//! | `status` | Set the status of a ride or parcel |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `RIDESHARE_API_URL` or `http://localhost:8000` | Backend endpoint |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Check an offer without sending it
//! rideshare validate --kind ride --input ride.json
//!
//! # Submit a parcel offer read from stdin
//! cat parcel.json | rideshare submit --kind parcel
//!
//! # Book two seats
//! rideshare book 42 --seats 2 --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use rideshare_core::ResourceKind;

/// Rideshare - ride and parcel marketplace client
#[derive(Debug, Parser)]
#[command(
    name = "rideshare",
    author,
    version,
    about = "Validate and submit ride and parcel offers to the marketplace backend"
)]
pub struct Cli {
    /// Backend base URL for this invocation, overriding RIDESHARE_API_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Resource kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Ride,
    Parcel,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Ride => Self::Ride,
            KindArg::Parcel => Self::Parcel,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check an offer against its schema without contacting the backend.
    ///
    /// Exits with code 3 when the offer is invalid.
    ///
    ///   rideshare validate --kind ride --input ride.json
    Validate(ValidateArgs),

    /// Validate an offer and, if it passes, create it.
    ///
    ///   rideshare submit --kind parcel --input parcel.json
    Submit(RecordArgs),

    /// List every ride or parcel.
    List(KindArgs),

    /// Fetch one ride or parcel by id.
    Get(ResourceArgs),

    /// Search rides or parcels by route and filters.
    ///
    ///   rideshare search --kind ride --origin 52.52,13.40 --destination 48.14,11.58 --seats 2
    Search(SearchArgs),

    /// Book seats on a ride.
    ///
    ///   rideshare book 42 --seats 2
    Book(BookArgs),

    /// Accept a parcel delivery.
    Accept(IdArgs),

    /// Cancel a ride or parcel.
    Cancel(ResourceArgs),

    /// Set the status of a ride or parcel.
    ///
    ///   rideshare status --kind ride 42 inProgress
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Schema to apply.
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// JSON object file with the offer fields, or `-` for stdin.
    #[arg(long, default_value = "-")]
    pub input: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Reference time (RFC 3339) for future-date rules. Defaults to now.
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, Args)]
pub struct KindArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,
}

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Resource identifier.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Origin coordinates as LAT,LNG.
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination coordinates as LAT,LNG.
    #[arg(long)]
    pub destination: Option<String>,

    /// Departure time (RFC 3339, UTC).
    #[arg(long)]
    pub departure: Option<String>,

    /// Seats needed (1-8).
    #[arg(long)]
    pub seats: Option<u8>,

    /// Parcel size: small, medium or large.
    #[arg(long)]
    pub size: Option<String>,

    /// Maximum parcel weight in kg.
    #[arg(long)]
    pub max_weight: Option<f64>,
}

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Ride identifier.
    pub id: String,

    /// Number of seats to book (1-8).
    #[arg(long)]
    pub seats: u8,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Parcel identifier.
    pub id: String,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    /// Resource identifier.
    pub id: String,

    /// New status: pending, accepted, inProgress, completed or cancelled.
    pub status: String,
}
