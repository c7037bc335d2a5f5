use std::path::Path;
use std::{env, process};

use rlox::Lox;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut lox = Lox::new();

    let code = match args.len() {
        n if n > 2 => {
            eprintln!("Usage: rlox [script]");
            64
        }
        2 => lox.run_file(Path::new(&args[1])),
        _ => {
            lox.run_prompt();
            0
        }
    };

    process::exit(code);
}
