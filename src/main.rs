//! vitric - a terminal code workbench

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use crossterm::{cursor, execute, terminal};

use vitric::app::App;
use vitric::config::Config;
use vitric::error::{Result, WorkbenchError};
use vitric::terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    // Handle --help and --version
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    // Workspace root: first argument, or the current directory
    let root = if args.len() > 1 && !args[1].starts_with('-') {
        PathBuf::from(&args[1])
    } else {
        env::current_dir()?
    };
    if !root.is_dir() {
        return Err(WorkbenchError::NotADirectory(root.display().to_string()));
    }

    let config = Config::load();
    let terminal = Terminal::new()?;

    // Restore the terminal even if we panic mid-frame
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        original_hook(panic_info);
    }));

    let mut app = App::new(terminal, config, &root);
    app.run()?;

    Ok(())
}

fn print_usage() {
    println!("vitric {} - terminal code workbench", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: vitric [OPTIONS] [DIR]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  C-b            Focus the file tree");
    println!("  C-e            Focus the editor");
    println!("  C-t            Focus the shell panel");
    println!("  C-j            Focus the assistant bar");
    println!("  C-q            Quit");
    println!();
    println!("  Tree:   Up/Down move, Enter open, Left/Right collapse/expand");
    println!("  Editor: arrows/PageUp/PageDown move, C-s save, C-w close tab,");
    println!("          C-n/C-p next/previous tab");
    println!("  Shell:  type a command and press Enter to run it");
    println!();
    println!("Configuration is read from ~/.vitric.toml");
}

fn print_version() {
    println!("vitric {}", env!("CARGO_PKG_VERSION"));
}
