use clap::Parser;
use interpol::prelude::*;
use interpol::syntax::lexer::tokenize;
use interpol::syntax::source::SourceFile;
use log::*;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

/// Dump the tokens or syntax tree of Interpol source text.
#[derive(Parser)]
#[command(name = "astdump", version)]
struct Options {
    /// File to read source text from. Reads from stdin if not given.
    file: Option<PathBuf>,

    /// Dump the token stream instead of the syntax tree.
    #[arg(long)]
    tokens: bool,

    /// Type check the syntax tree against the variables and functions in a TOML scope file.
    #[arg(long, value_name = "FILE")]
    scope: Option<PathBuf>,

    /// Increase log verbosity. May be given more than once.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::parse();

    simple_logging::log_to_stderr(match options.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });

    let file = match &options.file {
        Some(path) => SourceFile::open(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            SourceFile::named("<stdin>", source)
        },
    };

    info!("read {} bytes from {}", file.len(), file.name());

    if options.tokens {
        match tokenize(&file) {
            Ok(tokens) => {
                for info in tokens {
                    println!("{}: {:?}", info.span.start, info.token);
                }
            },
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            },
        }

        return Ok(());
    }

    let ast = match interpol::parse(file) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        },
    };

    println!("{:?}", ast);

    if let Some(path) = &options.scope {
        let scope = load_scope(path)?;

        match interpol::resolve_type(&ast, &scope) {
            Ok(ty) => println!("type: {}", ty),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(2);
            },
        }
    }

    Ok(())
}

fn load_scope(path: &Path) -> Result<MapScope, Box<dyn Error>> {
    let scope: MapScope = toml::from_str(&fs::read_to_string(path)?)?;

    info!(
        "loaded scope from {} with {} variables and {} functions",
        path.display(),
        scope.variables.len(),
        scope.functions.len(),
    );

    Ok(scope)
}
