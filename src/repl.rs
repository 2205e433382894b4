//! Line-oriented read-eval-print loop.

use std::{
    env,
    io::{self, BufRead, Write},
    rc::Rc,
    str::FromStr,
};

use tracing::{debug, warn};

use crate::{
    ast::ast::Stmt,
    evaluator::evaluator::eval,
    lexer::lexer::Lexer,
    object::{
        environment::{Env, Environment, Output},
        object::null,
    },
    parser::parser::parse,
    render_error,
};

pub const PROMPT: &str = ">> ";

/// Environment variable selecting the REPL mode (`eval` or `tokens`).
pub const MODE_VAR: &str = "BRAINROT_REPL_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplMode {
    /// Parse and evaluate each line against one persistent environment.
    #[default]
    Evaluate,
    /// Print every token of each line.
    Tokens,
}

impl FromStr for ReplMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "eval" | "evaluate" => Ok(ReplMode::Evaluate),
            "tokens" => Ok(ReplMode::Tokens),
            other => Err(format!("unknown repl mode {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    pub mode: ReplMode,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: String::from(PROMPT),
            mode: ReplMode::default(),
        }
    }
}

impl ReplConfig {
    /// Reads the mode from `BRAINROT_REPL_MODE`, falling back to evaluation.
    pub fn from_env() -> Self {
        Self::with_mode_setting(env::var(MODE_VAR).ok().as_deref())
    }

    fn with_mode_setting(setting: Option<&str>) -> Self {
        let mode = match setting {
            None => ReplMode::default(),
            Some(value) => value.parse().unwrap_or_else(|error| {
                warn!("{}; falling back to evaluate mode", error);
                ReplMode::default()
            }),
        };

        ReplConfig {
            mode,
            ..ReplConfig::default()
        }
    }
}

/// Runs the loop until `reader` hits end of input.
pub fn start<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    config: &ReplConfig,
) -> io::Result<()> {
    debug!(mode = ?config.mode, "starting repl");

    // `puts` output is buffered and flushed ahead of each result.
    let output = Output::buffer();
    let env = Environment::with_output(output.clone());
    let mut line = String::new();

    loop {
        write!(writer, "{}", config.prompt)?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            debug!("end of input");
            return Ok(());
        }

        let source = line.trim_end();
        if source.trim().is_empty() {
            continue;
        }

        match config.mode {
            ReplMode::Evaluate => evaluate_line(&mut writer, source, &env, &output)?,
            ReplMode::Tokens => {
                for token in Lexer::new(source, None) {
                    writeln!(writer, "{}", token)?;
                }
            }
        }
    }
}

fn evaluate_line<W: Write>(
    writer: &mut W,
    source: &str,
    env: &Env,
    output: &Output,
) -> io::Result<()> {
    let (program, errors) = parse(source);

    if !errors.is_empty() {
        debug!(count = errors.len(), "line rejected by parser");
        for error in &errors {
            write!(writer, "{}", render_error(source, error))?;
        }
        return Ok(());
    }

    let evaluated = eval(&program, env);
    writer.write_all(&output.take())?;

    // A line ending in a binding shows nothing when it produced null.
    let binding = matches!(program.statements.last(), Some(Stmt::VarDecl(_)));
    if !(binding && Rc::ptr_eq(&evaluated, &null())) {
        writeln!(writer, "{}", evaluated)?;
    }

    Ok(())
}
