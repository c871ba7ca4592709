use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn stderr_colors() -> bool {
    std::io::stderr().is_terminal()
}

/// Progress line such as "Checking out feature-x"
pub fn print_status(msg: &str) {
    if should_use_colors() {
        println!("{}", msg.cyan());
    } else {
        println!("{}", msg);
    }
}

/// Echo the picked row under its prompt once the list is gone
pub fn print_answer(prompt: &str, answer: &str) {
    if should_use_colors() {
        println!("{} {} {}", "?".green().bold(), prompt.bold(), answer.trim_start().cyan());
    } else {
        println!("? {} {}", prompt, answer.trim_start());
    }
}

/// One-line error report on stderr
pub fn print_error(msg: &str) {
    if stderr_colors() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
    } else {
        eprintln!("Error: {}", msg);
    }
}
