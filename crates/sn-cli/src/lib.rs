use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use sn_api::{translate_sources, translate_text, vocabulary, TranslateSourcesOptions};
use sn_core::Session;
use sn_semantics::{Translator, TranslatorOptions};

mod cli_args;
mod error_map;
mod models;
mod source_loader;
mod state_store;

pub(crate) use cli_args::{BatchArgs, Cli, Mode, TranslateArgs, VocabularyArgs};
pub(crate) use error_map::{
    emit_error, map_cli_output, map_cli_source_path, map_cli_source_read, map_cli_source_scan,
    map_cli_state_invalid, map_cli_state_read, map_cli_state_write, CliError,
};
pub(crate) use models::{LoadedTrees, SessionStateV1, SESSION_STATE_SCHEMA};
pub(crate) use source_loader::{load_trees_by_dir, read_tree_file};
#[cfg(test)]
pub(crate) use source_loader::{read_tree_sources_from_dir, resolve_trees_dir};
pub(crate) use state_store::{load_session_state, save_session_state};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_logging(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

// Logs go to stderr so stdout stays line-oriented for callers. `RUST_LOG`
// wins over `-v`.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Translate(args) => run_translate(args),
        Mode::Batch(args) => run_batch(args),
        Mode::Vocabulary(args) => run_vocabulary(args),
    }
}

fn translator_options(sounds: Vec<String>) -> TranslatorOptions {
    if sounds.is_empty() {
        return TranslatorOptions::default();
    }
    TranslatorOptions {
        sound_names: sounds,
        ..TranslatorOptions::default()
    }
}

fn run_translate(args: TranslateArgs) -> Result<i32, CliError> {
    let text = read_tree_file(&args.tree)?;
    let mut session = match &args.state_in {
        Some(path) => load_session_state(Path::new(path))?.session,
        None => Session::new(),
    };
    if args.record_program && session.program.is_none() {
        session.program = Some(Vec::new());
    }

    let translator = Translator::new(translator_options(args.sounds));
    let translation = translate_text(&translator, &text, &session)?;

    if let Some(path) = &args.state_out {
        save_session_state(Path::new(path), &SessionStateV1::new(translation.session.clone()))?;
    }

    println!("RESULT:OK");
    println!(
        "SCRIPT_JSON:{}",
        serde_json::to_string(&translation.script).map_err(map_cli_output)?
    );
    if let Some(program) = &translation.session.program {
        println!(
            "PROGRAM_JSON:{}",
            serde_json::to_string(program).map_err(map_cli_output)?
        );
    }
    Ok(0)
}

fn run_batch(args: BatchArgs) -> Result<i32, CliError> {
    let LoadedTrees { root, sources } = load_trees_by_dir(&args.trees_dir)?;
    let batch = translate_sources(TranslateSourcesOptions {
        sources,
        session: None,
        translator: translator_options(args.sounds),
    })?;

    if let Some(path) = &args.state_out {
        save_session_state(Path::new(path), &SessionStateV1::new(batch.session.clone()))?;
    }

    println!("RESULT:OK");
    println!("TREES_DIR:{}", root.display());
    for (source, script) in &batch.scripts {
        println!("SOURCE:{}", source);
        println!(
            "SCRIPT_JSON:{}",
            serde_json::to_string(script).map_err(map_cli_output)?
        );
    }
    println!("SOURCES:{}", batch.scripts.len());
    Ok(0)
}

fn run_vocabulary(args: VocabularyArgs) -> Result<i32, CliError> {
    let translator = Translator::new(translator_options(args.sounds));
    let vocabulary = vocabulary(&translator);
    println!("RESULT:OK");
    println!(
        "VOCABULARY_JSON:{}",
        serde_json::to_string(&vocabulary).map_err(map_cli_output)?
    );
    Ok(0)
}
