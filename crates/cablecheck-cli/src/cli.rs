use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cablecheck",
    about = "Cablecheck: table-driven cable selection and ampacity claim validation",
    version
)]
pub struct Cli {
    /// Path to cablecheck.toml (defaults to ./cablecheck.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the loaded catalogue: version, digest, families and their tables
    Tables {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank cables suitable for a circuit requirement
    Select {
        /// Requirement JSON: a file path, `-` for stdin, or an inline object
        #[arg(long)]
        requirement: String,

        /// Also report why each excluded family was excluded
        #[arg(long)]
        explain: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check one capacity or minimum-size claim
    Validate {
        /// Cable family as free text (e.g. "SWA", "PVC twin and earth")
        #[arg(long)]
        family: String,

        /// Conductor size (e.g. 35, 2.5mm², "16 mm2")
        #[arg(long)]
        size: String,

        /// Claimed capacity (e.g. 210, 210A)
        #[arg(long, conflicts_with = "device_rating", required_unless_present = "device_rating")]
        claimed: Option<String>,

        /// Protective-device rating the size is claimed to be the minimum for
        #[arg(long)]
        device_rating: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a JSON array of claims; exits 1 unless every claim is valid
    ValidateBatch {
        /// Claims JSON: a file path, `-` for stdin, or an inline array
        #[arg(long)]
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Smallest standard size of a family rated for a protective device
    MinSize {
        /// Cable family as free text
        #[arg(long)]
        family: String,

        /// Protective-device rating in amperes
        #[arg(long)]
        rating: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cheaper families offering the same size within a budget
    Alternatives {
        /// Catalogue family id (e.g. micc)
        #[arg(long)]
        family: String,

        /// Conductor size
        #[arg(long)]
        size: String,

        /// Run length in metres
        #[arg(long)]
        length: String,

        /// Maximum installed cost
        #[arg(long)]
        budget: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
