use log::info;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use shunt_calc::func::function_names;
use shunt_calc::{eval, format_f64, init_logger, CalcConfig, CalcError, CalcState};

const MENU: &str = "0 - insert expression\n1 - print history\n2 - undo\n3 - clear history\n4 - list functions\n9 - quit";

enum Step {
    Next,
    Quit,
}

// Reads one line. `None` means the user closed the input
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> rustyline::Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => {
            let line = line.trim().to_string();
            if !line.is_empty() {
                rl.add_history_entry(line.as_str())?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err),
    }
}

fn print_history(state: &CalcState) {
    let history = state.history();
    if history.is_empty() {
        println!("No logs saved.");
        return;
    }
    println!("Total logs: {}", history.len());
    for entry in history {
        println!("{}", entry);
    }
}

fn insert_expression(rl: &mut DefaultEditor, cfg: &CalcConfig, state: &mut CalcState) -> rustyline::Result<Step> {
    let expr = match read_line(rl, &cfg.prompt)? {
        Some(expr) => expr,
        None => return Ok(Step::Quit),
    };
    match eval(&expr, state) {
        Ok(v) => println!("Result: {}", format_f64(v)),
        Err(e @ CalcError::HistoryFull(..)) => {
            println!("Got {:?}", e);
            if let Some(limit) = state.history().limit() {
                println!("History keeps up to {} entries", limit);
            }
            println!("Clear the history (option 3) to continue");
        }
        Err(e) => println!("Got {:?}", e),
    }
    Ok(Step::Next)
}

fn step(rl: &mut DefaultEditor, cfg: &CalcConfig, state: &mut CalcState) -> rustyline::Result<Step> {
    if let Some(v) = state.result() {
        println!("Current value: {}", format_f64(v));
    }
    println!("{}", MENU);
    let choice = match read_line(rl, "> ")? {
        Some(choice) => choice,
        None => return Ok(Step::Quit),
    };
    match choice.as_str() {
        "0" => return insert_expression(rl, cfg, state),
        "1" => print_history(state),
        "2" => {
            if !state.undo() {
                println!("Failed to undo operation (No logs saved).");
            }
        }
        "3" => {
            state.clear_history();
            println!("Cleared history.");
        }
        "4" => {
            let names: Vec<&str> = function_names().collect();
            println!("Functions: {}", names.join(", "));
            println!("Constants: e, pi, phi");
        }
        "9" => return Ok(Step::Quit),
        _ => println!("Unknown option '{}'", choice),
    }
    Ok(Step::Next)
}

fn main() -> rustyline::Result<()> {
    init_logger();
    let cfg = CalcConfig::from_env();
    info!("starting with {:?}", cfg);
    let mut state = CalcState::with_config(&cfg);
    let mut rl = DefaultEditor::new()?;

    println!("Welcome to the calculator!");
    loop {
        match step(&mut rl, &cfg, &mut state)? {
            Step::Next => println!(),
            Step::Quit => break,
        }
    }
    Ok(())
}
