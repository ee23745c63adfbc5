mod samples;

use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use pegrat_core::StrInput;
use pegrat_vm::{Engine, PrintTracer, Verbosity};

use samples::Sample;

#[derive(Clone, Copy, ValueEnum)]
enum Grammar {
    Arithmetic,
    KeyValue,
}

/// Parse text against a built-in demonstration grammar and print the AST.
#[derive(Parser)]
#[command(name = "pegrat", version, about)]
struct Cli {
    /// Which demonstration grammar to parse against.
    #[arg(value_enum)]
    grammar: Grammar,

    /// Text to parse. Reads stdin if omitted.
    input: Option<String>,

    /// Print a trace of engine decisions to stderr.
    #[arg(long)]
    debug: bool,

    /// Recursion depth limit before the engine refuses to keep parsing.
    #[arg(long, default_value_t = 4096)]
    max_depth: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let text = match cli.input {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("failed to read stdin: {e}");
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    let Sample {
        automata,
        tags,
        registry,
        start_index,
    } = match cli.grammar {
        Grammar::Arithmetic => samples::arithmetic(),
        Grammar::KeyValue => samples::key_value(),
    };

    let mut builder = Engine::builder(automata, tags, registry)
        .start_index(start_index)
        .max_depth(cli.max_depth);
    if cli.debug {
        builder = builder.tracer(PrintTracer::new(io::stderr(), Verbosity::Verbose));
    }
    let mut engine = builder.build();

    let mut input = StrInput::new(&text);
    match engine.parse(&mut input) {
        Err(runtime_err) => {
            eprintln!("runtime error: {runtime_err}");
            ExitCode::FAILURE
        }
        Ok(Err(parse_err)) => {
            eprintln!("{parse_err}");
            ExitCode::FAILURE
        }
        Ok(Ok(ast)) => {
            let json = serde_json::to_string_pretty(&ast).expect("Ast serialization is infallible");
            println!("{json}");
            ExitCode::SUCCESS
        }
    }
}
