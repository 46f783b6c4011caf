use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "sn-cli")]
#[command(about = "Translate derivation trees into block scripts")]
pub(crate) struct Cli {
    /// Raise log output on stderr (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub(crate) verbose: u8,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Translate(TranslateArgs),
    Batch(BatchArgs),
    Vocabulary(VocabularyArgs),
}

#[derive(Debug, Args)]
pub(crate) struct TranslateArgs {
    #[arg(long = "tree")]
    pub(crate) tree: String,
    #[arg(long = "state-in")]
    pub(crate) state_in: Option<String>,
    #[arg(long = "state-out")]
    pub(crate) state_out: Option<String>,
    #[arg(long = "record-program")]
    pub(crate) record_program: bool,
    #[arg(long = "sound")]
    pub(crate) sounds: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct BatchArgs {
    #[arg(long = "trees-dir")]
    pub(crate) trees_dir: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: Option<String>,
    #[arg(long = "sound")]
    pub(crate) sounds: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct VocabularyArgs {
    #[arg(long = "sound")]
    pub(crate) sounds: Vec<String>,
}
