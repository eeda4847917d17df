//! Simple CLI for document path queries
//!
//! Loads a JSON or YAML document from disk, resolves a path against it, and
//! compiles tag expressions for a test runner.

use std::fs;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use docpath::{
    CacheConfig, DocumentCache, EngineOptions, KeyTemplate, TagCompiler, TagExpression, Value,
    ValueType,
};

#[derive(Parser)]
#[command(name = "docpath")]
#[command(about = "Query configuration documents by path and compile tag expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path against a JSON or YAML document
    Get {
        /// Path or key template, e.g. `test.users.?.mailboxes[1]`
        path: String,
        /// Document file (`.yml` is appended when it has no extension)
        #[arg(short, long)]
        file: String,
        /// Argument substituted for the next `?` placeholder
        #[arg(short, long = "arg")]
        args: Vec<String>,
        /// Expected type of the resolved value
        #[arg(short = 't', long = "type", value_enum)]
        value_type: Option<TypeArg>,
        /// Print `null` for missing values instead of failing
        #[arg(short, long)]
        lenient: bool,
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Compile a tag expression into one clause per line
    Tags {
        /// Tag expression, e.g. "wip fun01,fun03 ~fun02"
        expression: String,
        /// Reject empty tags
        #[arg(short, long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Text,
    Integer,
    Float,
    Boolean,
    Sequence,
    Mapping,
}

impl From<TypeArg> for ValueType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Text => ValueType::Text,
            TypeArg::Integer => ValueType::Integer,
            TypeArg::Float => ValueType::Float,
            TypeArg::Boolean => ValueType::Boolean,
            TypeArg::Sequence => ValueType::Sequence,
            TypeArg::Mapping => ValueType::Mapping,
        }
    }
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Get {
            path,
            file,
            args,
            value_type,
            lenient,
            pretty,
        } => handle_get(&path, &file, &args, value_type.map(ValueType::from), lenient, pretty),
        Commands::Tags { expression, strict } => handle_tags(&expression, strict),
    };

    if let Err(e) = outcome {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

/// Reads documents from the file system, choosing the format by extension
fn load_file(key: &str) -> anyhow::Result<Value> {
    let text = fs::read_to_string(key).with_context(|| format!("reading '{key}'"))?;
    if key.ends_with(".json") {
        let json: serde_json::Value =
            serde_json::from_str(&text).with_context(|| format!("parsing JSON '{key}'"))?;
        Ok(Value::from(json))
    } else {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&text).with_context(|| format!("parsing YAML '{key}'"))?;
        Ok(Value::from(yaml))
    }
}

fn handle_get(
    path: &str,
    file: &str,
    args: &[String],
    value_type: Option<ValueType>,
    lenient: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let engine_options = if lenient {
        EngineOptions::lenient()
    } else {
        EngineOptions::strict()
    };
    let config = CacheConfig {
        engine: engine_options,
        ..CacheConfig::for_file(file)
    };
    let cache = DocumentCache::with_config(config, load_file);
    let document = cache.build(file)?;
    let engine = cache.engine();

    let path = if args.is_empty() {
        path.to_string()
    } else {
        KeyTemplate::new(path).expand(args)
    };

    let resolved = match value_type {
        Some(expected) => engine.resolve_as(&document, &path, expected)?,
        None => engine.resolve(&document, &path)?,
    };

    let value = resolved.map(|v| v.into_owned()).unwrap_or(Value::Null);
    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}

fn handle_tags(expression: &str, strict: bool) -> anyhow::Result<()> {
    let compiler = if strict {
        TagCompiler::strict()
    } else {
        TagCompiler::new()
    };
    let compiled: TagExpression = compiler.compile(expression)?;
    for clause in compiled.clauses() {
        println!("{clause}");
    }
    Ok(())
}
