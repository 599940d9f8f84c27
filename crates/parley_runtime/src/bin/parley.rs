//! Parley CLI entry point.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::Env;
use parley_runtime::{Player, PlayerConfig, dump_tokens, highlight_script, load_from_file};
use parley_script::Interpreter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    file: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    check: bool,
    tokens: bool,
    highlight: bool,
    start: Option<String>,
    no_color: bool,
    verbose: bool,
    save: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--check" => config.check = true,
            "--tokens" => config.tokens = true,
            "--highlight" => config.highlight = true,
            "--no-color" => config.no_color = true,
            "-v" | "--verbose" => config.verbose = true,
            "-s" | "--start" => {
                config.start = Some(args.next().ok_or("--start requires a conversation name")?);
            }
            "--save" => {
                config.save = Some(PathBuf::from(args.next().ok_or("--save requires a path")?));
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {flag}").into());
            }
            path => {
                if config.file.is_some() {
                    return Err(format!("unexpected argument: {path}").into());
                }
                config.file = Some(PathBuf::from(path));
            }
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    let level = if config.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("parley {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(file) = &config.file else {
        print_help();
        return Err("no script given".into());
    };
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read '{}': {e}", file.display()))?;

    let mut interpreter = Interpreter::new()?;

    if config.tokens || config.highlight {
        let outcome = interpreter.parse(&text);
        if config.tokens {
            print!("{}", dump_tokens(&outcome.tokens));
        }
        if config.highlight {
            print!("{}", highlight_script(&outcome, &text));
        }
        if let Some(diagnostic) = outcome.first_diagnostic() {
            return Err(diagnostic.to_string().into());
        }
        return Ok(());
    }

    interpreter.load(&text)?;

    if config.check {
        let script = interpreter.script().ok_or("script did not load")?;
        println!(
            "{}: {} commands in {} conversations",
            file.display(),
            script.commands().len(),
            script.conversations().len()
        );
        return Ok(());
    }

    let mut player_config = PlayerConfig::new().with_color(!config.no_color);
    if let Some(start) = config.start {
        player_config = player_config.with_start(start);
    }
    if let Some(save) = config.save {
        if save.exists() {
            let snapshot = load_from_file(&save)?;
            interpreter.restore(&snapshot)?;
            if player_config.start.is_none() {
                player_config = player_config.with_start(snapshot.conversation);
            }
        }
        player_config = player_config.with_save_path(save);
    }

    let mut player = Player::new(interpreter)?.with_config(player_config);
    player.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParley\x1b[0m - Dialogue scripting for games

\x1b[1mUSAGE:\x1b[0m
    parley [OPTIONS] FILE

\x1b[1mARGUMENTS:\x1b[0m
    FILE    Script to play

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -c, --check         Load the script, report problems, and exit
    -s, --start NAME    Conversation to play (default: the first)
        --save PATH     Restore state from PATH if it exists, save on exit
        --no-color      Disable colored output
    -v, --verbose       Log load and runtime details

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --tokens            Print the token list and exit
    --highlight         Print the highlighted script and exit

\x1b[1mEXAMPLES:\x1b[0m
    parley intro.parley                 Play the first conversation
    parley -s Shop town.parley          Play the Shop conversation
    parley -c town.parley               Check a script
    parley --save game.msgpack town.parley

\x1b[1mWHILE PLAYING:\x1b[0m
    Enter                Continue
    1, 2, ...            Choose an option
    :save [PATH]         Save numbers and names
    :load [PATH]         Restore numbers and names
    :state               Show numbers and names
    :quit                Stop playing
    Ctrl+D               Stop playing"
    );
}
