use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "metaspace",
    about = "Inspect metaspace segment keys, positions and listings",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encode or decode segment keys
    #[command(name = "segment-key")]
    SegmentKey(SegmentKeyArgs),
    /// Parse bucket prefixes
    #[command(name = "bucket-prefix")]
    BucketPrefix(BucketPrefixArgs),
    /// Pack or unpack segment positions
    Position(PositionArgs),
    /// Run a listing over the given locations
    List(ListArgs),
}

#[derive(Args)]
pub struct SegmentKeyArgs {
    #[command(subcommand)]
    pub action: SegmentKeyAction,
}

#[derive(Subcommand)]
pub enum SegmentKeyAction {
    /// Decode a raw segment key
    Decode { key: String },
    /// Build a segment key from its parts
    Encode {
        #[arg(long)]
        project: String,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
        /// Segment index; -1 addresses the last segment
        #[arg(long, default_value = "-1", allow_negative_numbers = true)]
        index: i64,
    },
}

#[derive(Args)]
pub struct BucketPrefixArgs {
    #[command(subcommand)]
    pub action: BucketPrefixAction,
}

#[derive(Subcommand)]
pub enum BucketPrefixAction {
    /// Parse `<project>/<bucket>`
    Parse { prefix: String },
}

#[derive(Args)]
pub struct PositionArgs {
    #[command(subcommand)]
    pub action: PositionAction,
}

#[derive(Subcommand)]
pub enum PositionAction {
    /// Pack a part and index into a u64
    Encode {
        #[arg(long)]
        part: u32,
        #[arg(long)]
        index: u32,
    },
    /// Unpack a u64 into part and index
    Decode { value: u64 },
}

#[derive(Args)]
pub struct ListArgs {
    /// Listing prefix, e.g. `sj://bucket/dir/`
    #[arg(long)]
    pub prefix: String,
    #[arg(short, long)]
    pub recursive: bool,
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub cursor: Option<String>,
    /// Locations to list; sorted before listing
    pub locations: Vec<String>,
}
