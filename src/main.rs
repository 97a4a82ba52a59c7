use std::{error::Error, fs, path::PathBuf, process};

use clap::Parser;
use clap_stdin::FileOrStdin;
use exprc::{compile_with, CompileOptions};
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

const AST_FILE: &str = "AST.txt";
const SYMBOLS_FILE: &str = "TABLA_SIMBOLOS.txt";
const TAC_FILE: &str = "TAC.txt";

/// Compile an arithmetic expression into an AST, a symbol table and three-address code
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File whose first line holds the expression, or "-" for stdin
    #[arg(default_value = "-")]
    input: FileOrStdin,

    /// Directory the three output files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Reject expressions with parentheses nested deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// Also print the artifacts to stdout
    #[arg(short, long)]
    print: bool,
}

/// Info by default; `RUST_LOG` can raise or lower it.
fn logger() -> SimpleLogger {
    SimpleLogger::new().with_level(LevelFilter::Info)
}

fn main() -> Result<(), Box<dyn Error>> {
    logger().env().init()?;

    let args = Args::parse();
    let contents = args.input.contents()?;
    let expr = contents.lines().next().unwrap_or("").trim();
    if expr.is_empty() {
        error!("the first line of the input is empty");
        process::exit(1);
    }

    let options = CompileOptions {
        max_depth: args.max_depth,
    };
    let artifacts = match compile_with(expr, &options) {
        Ok(artifacts) => artifacts,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    let outputs = [
        (AST_FILE, artifacts.ast_text()),
        (SYMBOLS_FILE, artifacts.symbol_table_text()),
        (TAC_FILE, artifacts.tac_text()),
    ];

    fs::create_dir_all(&args.out_dir)?;
    println!("Expression: {expr}");
    println!("Generated files:");
    for (name, text) in &outputs {
        let path = args.out_dir.join(name);
        fs::write(&path, format!("{text}\n"))?;
        info!("wrote {}", path.display());
        println!(" - {}", path.display());
    }

    if args.print {
        for (name, text) in &outputs {
            println!("\n== {name}\n{text}");
        }
    }

    Ok(())
}
