use std::{env, io};

use brainrot::{
    init_tracing,
    repl::{self, ReplConfig},
};

fn main() -> io::Result<()> {
    init_tracing();

    let user = env::var("USER").unwrap_or_else(|_| String::from("fam"));
    println!("No cap {}! This is the BrainrotLang programming language!", user);
    println!("It's giving ✨runtime✨ (hit that Ctrl+C once it gets cringe though)");

    let config = ReplConfig::from_env();
    let stdin = io::stdin();
    repl::start(stdin.lock(), io::stdout(), &config)
}
