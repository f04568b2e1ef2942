use clap::{Parser, Subcommand};

use kana_cli::commands::{session_ops, table_ops};

#[derive(Parser)]
#[command(name = "kanatool", about = "Kana typing engine diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the default kana table as TOML
    TableExport,
    /// Validate a custom kana table TOML file
    TableValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Show the typing tokens for a kana text
    Tokenize {
        /// Kana text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Type romaji into a session and report every keystroke
    Simulate {
        /// Kana text
        text: String,
        /// Romaji input; `<` is one backspace
        input: String,
        /// Simulated milliseconds between keystrokes
        #[arg(long, default_value = "200")]
        ms_per_key: u64,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List characters of a text file that the table does not cover
    Coverage {
        /// Text file, one practice text per line
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::TableExport => table_ops::table_export(),
        Command::TableValidate { file } => table_ops::table_validate(&file),
        Command::SettingsExport => table_ops::settings_export(),
        Command::SettingsValidate { file } => table_ops::settings_validate(&file),
        Command::Tokenize { text, json } => table_ops::tokenize_cmd(&text, json),
        Command::Simulate {
            text,
            input,
            ms_per_key,
            json,
        } => session_ops::simulate_cmd(&text, &input, ms_per_key, json),
        Command::Coverage { file } => table_ops::coverage_cmd(&file),
    }
}
