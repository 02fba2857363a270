//! A miniature lint tool: parse Cypher from the command line or stdin,
//! print diagnostics, and dump the AST.
//!
//! ```bash
//! cargo run --example cypher_lint -- "MATCH (n) RETURN n;"
//! echo "RETURN 1;" | cargo run --example cypher_lint
//! ```

use std::io::{self, Read, Write};

use anyhow::Result;
use cypher_parser::{Parser, ANSI_COLORIZATION, NO_COLORIZATION};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(query) => query,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let colorization = if io::IsTerminal::is_terminal(&io::stderr()) {
        &ANSI_COLORIZATION
    } else {
        &NO_COLORIZATION
    };

    let result = Parser::new(&input).colorization(colorization).parse()?;

    let stderr = io::stderr();
    for error in result.errors() {
        error.fprint(&mut stderr.lock(), "<stdin>", colorization)?;
    }

    let stdout = io::stdout();
    result.fprint_ast(&mut stdout.lock(), 100, &NO_COLORIZATION)?;
    stdout.lock().flush()?;

    if result.nerrors() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
