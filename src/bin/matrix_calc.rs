//! Interactive driver: reads two matrix files and an operation choice,
//! writes the result to `output/result.txt`

use sparse_matrix::{MatrixError, SparseMatrix};

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const RESULT_PATH: &str = "output/result.txt";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let path_a = prompt(&mut input, "Enter path for first matrix: ")?;
    let path_b = prompt(&mut input, "Enter path for second matrix: ")?;

    let a = SparseMatrix::from_file(&path_a)?;
    let b = SparseMatrix::from_file(&path_b)?;

    let choice = prompt(&mut input, "Choose operation:\n1. Add\n2. Subtract\n3. Multiply\n")?;
    let result = match choice.as_str() {
        "1" => a.add(&b)?,
        "2" => a.subtract(&b)?,
        "3" => a.multiply(&b)?,
        other => return Err(format!("Invalid choice '{}'", other).into()),
    };

    std::fs::create_dir_all("output")
        .map_err(|err| MatrixError::ResourceUnavailable(format!("output: {}", err)))?;
    result.save_to_file(RESULT_PATH)?;
    println!("Result saved to {}", RESULT_PATH);

    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
