use std::{
    fs,
    io::{IsTerminal, Read},
    path::PathBuf,
};

use clap::Parser;

use quizmath::{Converter, LatexError, MathDisplay};

mod config_file;

use config_file::{CliConfig, load_config_file};

/// Converts the LaTeX math of quiz texts to MathML
#[derive(Parser, Debug)]
#[command(version, about = "Converts the LaTeX math of quiz texts to MathML", long_about = None)]
struct Args {
    /// The text file in which `$`-delimited formulas are converted; `-` reads from stdin
    #[arg(conflicts_with = "formula", value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specifies a single LaTeX formula
    #[arg(short, long, conflicts_with = "file")]
    formula: Option<String>,

    /// Sets the display style for the formulas to "inline"
    #[arg(short, long, group = "mode")]
    inline: bool,

    /// Sets the display style for the formulas to "block"
    #[arg(short, long, group = "mode")]
    block: bool,

    /// Reads the converter configuration from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let config = match args.config {
        Some(ref path) => load_config_file(path).unwrap_or_else(|e| exit_config_error(&e)),
        None => CliConfig::default(),
    };
    let display = if args.block {
        MathDisplay::Block
    } else if args.inline {
        MathDisplay::Inline
    } else {
        config.display.into()
    };
    let converter = Converter::new(config.converter);

    if let Some(ref fpath) = args.file {
        let text = if fpath == &PathBuf::from("-") {
            read_stdin()
        } else {
            fs::read_to_string(fpath).unwrap_or_else(|e| exit_io_error(&e))
        };
        print!("{}", converter.scan(&text, display));
    } else if let Some(ref formula) = args.formula {
        convert_and_exit(&converter, formula, display);
    } else {
        convert_and_exit(&converter, read_stdin().trim_end(), display);
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(&e);
    }
    buffer
}

fn convert_and_exit(converter: &Converter, latex: &str, display: MathDisplay) {
    match converter.convert(latex, display) {
        Ok(mathml) => println!("{mathml}"),
        Err(e) => exit_latex_error(&e, latex),
    }
}

fn exit_latex_error(e: &LatexError, latex: &str) -> ! {
    let source_name = "<formula>";
    let report = e.to_report(source_name, std::io::stderr().is_terminal());
    if report
        .eprint((source_name, ariadne::Source::from(latex)))
        .is_err()
    {
        eprintln!("Conversion error: {e}");
    }
    std::process::exit(2);
}

fn exit_config_error(e: &config_file::ConfigError) -> ! {
    eprintln!("{e}");
    std::process::exit(1);
}

fn exit_io_error(e: &std::io::Error) -> ! {
    eprintln!("IO Error: {e}");
    std::process::exit(1);
}
