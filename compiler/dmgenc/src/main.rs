//! dmgen CLI
//!
//! Generates the TypeScript data model from a schema JSON dump.

use std::path::PathBuf;

use dmgenc::commands::{check, generate, GenerateOptions};
use dmgenc::{init_tracing, CliError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "generate" => run_generate(&args[2..]),
        "check" => run_check(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("dmgen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        if matches!(err, CliError::Usage(_)) {
            eprintln!();
            print_usage();
        }
        std::process::exit(1);
    }
}

fn run_generate(args: &[String]) -> Result<(), CliError> {
    let options = GenerateOptions::parse(args)?;
    for (path, status) in generate(&options)? {
        println!("{status:>9}  {}", path.display());
    }
    Ok(())
}

fn run_check(args: &[String]) -> Result<(), CliError> {
    let mut schema = None;
    let mut extensions = Vec::new();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        if arg == "--extend" {
            let Some(path) = args.next() else {
                return Err(CliError::Usage("missing value for `--extend`".into()));
            };
            extensions.push(PathBuf::from(path));
        } else if !arg.starts_with('-') && schema.is_none() {
            schema = Some(PathBuf::from(arg));
        } else {
            return Err(CliError::Usage(format!("unexpected argument `{arg}`")));
        }
    }
    let Some(schema) = schema else {
        return Err(CliError::Usage("missing schema path".into()));
    };

    let summary = check(&schema, &extensions)?;
    println!("{}: ok", schema.display());
    println!("  schema entries:   {}", summary.schema_entries);
    println!("  emitted types:    {}", summary.types);
    println!("  queries:          {}", summary.queries);
    println!("  singular queries: {}", summary.singular_queries);
    println!("  selector ids:     {}", summary.selectors);
    Ok(())
}

fn print_usage() {
    println!("dmgen - data model code generator");
    println!();
    println!("Usage: dmgen <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <schema.json> [options]   Write the generated TypeScript sources");
    println!("  check <schema.json> [--extend <f>] Compile without writing and print a summary");
    println!("  help                               Show this message");
    println!("  version                            Show the version");
    println!();
    println!("Generate options:");
    println!("  -o, --out-dir <dir>        Output directory (default: .)");
    println!("  --lib-module <module>      Runtime module of types.generated.ts");
    println!("  --prototypes-lib <module>  Module imported by prototypes.generated.ts");
    println!("  --client-lib <module>      Client module of find-api.generated.ts");
    println!("  --breakpoint <Ident>       Extra lazily referenced identifier (repeatable)");
    println!("  --extend <schema.json>     Merge extra schema entries (repeatable)");
    println!("  --update                   Overwrite files whose contents changed");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=dmgen_resolve=debug) to trace compilation.");
}
