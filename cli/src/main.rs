use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use slate::{
    RegionError, Request, RequestError, Worksheet, WorksheetOptions, handle_request, parse,
    parse_request, render_parse_error,
};
use std::io::{BufRead, BufReader, Read};
use tracing::debug;

/// Slate - evaluate math notation and freeform worksheets
#[derive(Parser, Debug)]
#[command(name = "slate")]
#[command(about = "Evaluate math expressions and worksheet requests", long_about = None)]
struct Args {
    /// Evaluate a JSON request body read from PATH (`-` for stdin)
    #[arg(long, value_name = "PATH", conflicts_with = "expression")]
    request: Option<String>,

    /// Significant digits in numeric results
    #[arg(long)]
    digits: Option<usize>,

    /// Number of samples per plot
    #[arg(long)]
    samples: Option<usize>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Print the parsed expression (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Expression to evaluate (if not provided, reads one per line from stdin)
    expression: Option<String>,
}

impl Args {
    fn options(&self) -> WorksheetOptions {
        let defaults = WorksheetOptions::default();
        WorksheetOptions {
            plot_samples: self.samples.unwrap_or(defaults.plot_samples),
            significant_digits: self.digits.unwrap_or(defaults.significant_digits),
            ..defaults
        }
    }
}

fn print_json(value: &impl Serialize, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .into_diagnostic()?;
    println!("{json}");
    Ok(())
}

/// Print the response, or the error body for a failed request.
fn respond(worksheet: &Worksheet, request: Request, pretty: bool) -> Result<bool> {
    match handle_request(worksheet, request) {
        Ok(response) => {
            print_json(&response, pretty)?;
            Ok(true)
        }
        Err(err) => {
            if let RequestError::Expression(RegionError::Parse(parse_error)) = &err {
                render_parse_error(parse_error);
            }
            debug!(status = err.status(), "request failed");
            print_json(&err.to_response(), pretty)?;
            Ok(false)
        }
    }
}

fn interpret_input(worksheet: &Worksheet, input: &str, args: &Args) -> Result<bool> {
    if args.debug_parse {
        match parse(input) {
            Ok(expr) => {
                println!("=== Parsed Expression ===");
                println!("{:#?}", expr);
                println!();
            }
            Err(e) => render_parse_error(&e),
        }
    }

    let request = Request {
        expression: Some(input.to_string()),
        regions: None,
    };
    respond(worksheet, request, args.pretty)
}

fn read_request(path: &str) -> Result<String> {
    if path == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body).into_diagnostic()?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| miette!("Failed to read request from {path}: {e}"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control log level, default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let worksheet = Worksheet::new(args.options());

    if let Some(path) = &args.request {
        let body = read_request(path)?;
        let request = match parse_request(&body) {
            Ok(request) => request,
            Err(err) => {
                print_json(&err.to_response(), args.pretty)?;
                return Err(miette!("{err}"));
            }
        };
        if !respond(&worksheet, request, args.pretty)? {
            return Err(miette!("request failed"));
        }
        return Ok(());
    }

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        if !interpret_input(&worksheet, expr, &args)? {
            return Err(miette!("evaluation failed"));
        }
        return Ok(());
    }

    // Otherwise evaluate stdin line by line
    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = line.map_err(|e| miette!("Error reading line from stdin: {e}"))?;
        if line.trim().is_empty() {
            continue;
        }
        interpret_input(&worksheet, &line, &args)?;
    }

    Ok(())
}
