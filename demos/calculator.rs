//! Line-oriented front end: one expression per line on stdin.
//!
//! `:basic 3 // 2` and `:sci factorial 5` run the two form modes,
//! `:names` lists everything an expression may refer to.

use safecalc_rs::calculator::{basic_operation, scientific_operation};
use safecalc_rs::functions::Registry;
use safecalc_rs::{evaluate, Operator};
use std::io::{self, BufRead, Write};

fn run_command(line: &str) -> Result<String, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [":names"] => Ok(Registry::global().names().join(", ")),
        [":basic", lhs, operator, rhs] => {
            let lhs: f64 = lhs.parse().map_err(|_| format!("Not a number: {}", lhs))?;
            let rhs: f64 = rhs.parse().map_err(|_| format!("Not a number: {}", rhs))?;
            let operator = Operator::try_from(*operator)?;
            let result = basic_operation(lhs, rhs, operator).map_err(|e| e.to_string())?;
            Ok(format!("{} {} {} = {}", lhs, operator, rhs, result))
        }
        [":sci", name, value] => {
            let value: f64 = value
                .parse()
                .map_err(|_| format!("Not a number: {}", value))?;
            let result = scientific_operation(value, name).map_err(|e| e.to_string())?;
            Ok(format!("{}({}) = {}", name, value, result))
        }
        _ => Err(format!("Unknown command: {}", line)),
    }
}

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let output = if line.starts_with(':') {
            run_command(line)
        } else {
            evaluate(line)
                .map(|result| format!("{} = {}", line, result))
                .map_err(|e| e.to_string())
        };

        match output {
            Ok(text) => writeln!(stdout, "{}", text)?,
            Err(err) => writeln!(stdout, "Error: {}", err)?,
        }
    }

    Ok(())
}
