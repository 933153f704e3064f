use std::env;
use std::fs;
use std::process;

use chordsheet::song::parse_song_with;
use chordsheet::twoline::MAX_TAB_WIDTH;
use chordsheet::{render_song, validate, Emit, InputMode};

const USAGE: &str = "Usage: chordsheet [options] <input> [output]

Options:
  --chordpro         Body text uses inline [C] markers
  --two-line         Body text has chord rows above lyric rows
  --tab-width N      Default tab width for two-line input (1-32)
  --transpose KEY    Render in KEY instead of the song's key
  --emit FORMAT      json (default), text or chordpro
  --no-validate      Skip title/key validation";

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("{}", USAGE);
    process::exit(1);
}

struct Options {
    no_validate: bool,
    mode: Option<InputMode>,
    tab_width: Option<usize>,
    transpose: Option<String>,
    emit: Emit,
    input_path: String,
    output_path: Option<String>,
}

fn parse_tab_width(value: &str) -> Option<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|width| (1..=MAX_TAB_WIDTH).contains(width))
}

fn parse_args(args: &[String]) -> Options {
    let mut no_validate = false;
    let mut mode = None;
    let mut tab_width = None;
    let mut transpose = None;
    let mut emit = Emit::default();
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--no-validate" => no_validate = true,
            "--chordpro" => mode = Some(InputMode::ChordPro),
            "--two-line" => mode = Some(InputMode::TwoLine),
            "--tab-width" => {
                let value = iter.next().unwrap_or_else(|| usage_error("--tab-width needs a value"));
                tab_width = Some(
                    parse_tab_width(value)
                        .unwrap_or_else(|| usage_error(&format!("Invalid tab width '{}'", value))),
                );
            }
            "--transpose" => {
                let value = iter.next().unwrap_or_else(|| usage_error("--transpose needs a key"));
                transpose = Some(value.clone());
            }
            "--emit" => {
                let value = iter.next().unwrap_or_else(|| usage_error("--emit needs a format"));
                emit = Emit::from_str(value)
                    .unwrap_or_else(|| usage_error(&format!("Unknown output format '{}'", value)));
            }
            flag if flag.starts_with("--") => usage_error(&format!("Unknown option '{}'", flag)),
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let input_path = positional
        .next()
        .unwrap_or_else(|| usage_error("Missing input file"));
    let output_path = positional.next();

    Options {
        no_validate,
        mode,
        tab_width,
        transpose,
        emit,
        input_path,
        output_path,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args);

    // Read input file
    let source = match fs::read_to_string(&options.input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", options.input_path, e);
            process::exit(1);
        }
    };

    // Command-line flags win over front matter
    let result = parse_song_with(&source, options.mode, options.tab_width).and_then(|song| {
        if !options.no_validate {
            validate(&song)?;
        }
        Ok(song)
    });
    let song = match result {
        Ok(song) => song,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = match render_song(&song, options.transpose.as_deref(), options.emit) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match options.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            log::info!("wrote {} bytes to {}", output.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }
}
