use crate::types::{CommandSuggestion, RiskLevel};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Color, Stylize},
    terminal,
};
use std::io::{self, BufRead, IsTerminal, Write};

const PANEL_WIDTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Dim,
}

/// Everything the assistant shows to, or asks of, the operator.
pub trait Console {
    fn say(&mut self, tone: Tone, message: &str);

    fn show_suggestion(&mut self, persona: &str, suggestion: &CommandSuggestion);

    fn high_risk_banner(&mut self);

    /// Ask a yes/no question. `None` means the operator interrupted.
    fn confirm(&mut self, question: &str, default: bool) -> Option<bool>;

    fn table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]);

    fn show_file(&mut self, title: &str, content: &str);

    fn prompt(&mut self, text: &str);
}

pub fn risk_color(level: &RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
        RiskLevel::Unrecognized(_) => Color::White,
    }
}

pub fn parse_answer(line: &str, default: bool) -> bool {
    match line.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}

#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }

    fn confirm_raw(&self, default: bool) -> Option<bool> {
        let answer = loop {
            match event::read() {
                Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => match k.code {
                    KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                        break None
                    }
                    KeyCode::Enter => break Some(default),
                    KeyCode::Char('y') | KeyCode::Char('Y') => break Some(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                        break Some(false)
                    }
                    _ => {}
                },
                Ok(_) => {}
                Err(_) => break None,
            }
        };
        terminal::disable_raw_mode().ok();
        answer
    }

    fn confirm_line(&self, default: bool) -> Option<bool> {
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(parse_answer(&input, default)),
        }
    }
}

impl Console for TerminalConsole {
    fn say(&mut self, tone: Tone, message: &str) {
        let styled = match tone {
            Tone::Info => message.cyan(),
            Tone::Success => message.green(),
            Tone::Warning => message.yellow(),
            Tone::Error => message.red(),
            Tone::Dim => message.dim(),
        };
        println!("{}", styled);
    }

    fn show_suggestion(&mut self, persona: &str, suggestion: &CommandSuggestion) {
        let color = risk_color(&suggestion.risk_level);
        let title = format!(" {} Assistant ", persona.to_uppercase());
        let rule = "─".repeat(PANEL_WIDTH.saturating_sub(title.chars().count() + 2));

        println!("{}{}{}", "╭─".with(color), title.bold(), rule.with(color));
        let bar = "│".with(color);
        println!("{} {} {}", bar, "💻 Command:".bold(), suggestion.command.as_str().with(color).bold());
        println!("{}", bar);
        println!("{} {} {}", bar, "📝 Explanation:".bold(), suggestion.explanation);
        println!("{}", bar);
        println!(
            "{} {} {}",
            bar,
            "⚠️  Risk Level:".bold(),
            suggestion.risk_level.to_string().to_uppercase().with(color).bold()
        );
        if !suggestion.alternatives.is_empty() {
            println!("{}", bar);
            println!("{} {}", bar, "🔄 Alternatives:".bold());
            for alt in &suggestion.alternatives {
                println!("{}   • {}", bar, alt.as_str().cyan());
            }
        }
        println!("{}", format!("╰{}", "─".repeat(PANEL_WIDTH - 1)).with(color));
    }

    fn high_risk_banner(&mut self) {
        println!();
        println!("{}", "🚨 HIGH RISK COMMAND DETECTED!".red().bold());
        println!("{}", "This command could potentially harm your system or data.".red());
    }

    fn confirm(&mut self, question: &str, default: bool) -> Option<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        print!("\n{} {} ", question.bold(), hint.dim());
        io::stdout().flush().ok();

        let answer = if io::stdin().is_terminal() && terminal::enable_raw_mode().is_ok() {
            let answer = self.confirm_raw(default);
            println!(
                "{}",
                match answer {
                    Some(true) => "yes",
                    Some(false) => "no",
                    None => "^C",
                }
            );
            answer
        } else {
            self.confirm_line(default)
        };
        tracing::debug!(?answer, default, "confirmation answered");
        answer
    }

    fn table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        println!("{}", title.bold());
        let header = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", header.bold());
        for row in rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<w$}", c, w = *w))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", line.trim_end());
        }
    }

    fn show_file(&mut self, title: &str, content: &str) {
        println!("{}", format!("📄 {}", title).blue().bold());
        let lines: Vec<&str> = content.lines().collect();
        let width = lines.len().max(1).to_string().len();
        for (i, line) in lines.iter().enumerate() {
            println!("{} {}", format!("{:>width$}", i + 1, width = width).dim(), line);
        }
    }

    fn prompt(&mut self, text: &str) {
        print!("{}", text);
        io::stdout().flush().ok();
    }
}

pub fn print_banner() {
    println!("{} {}{}", "🤖".green(), "groq-cli".cyan().bold(), " - AI Command Assistant".dim());
    println!();
    println!("{} {}", "🎭 Personas:".yellow().bold(), "linux • windows • macos • devops • developer • security".cyan());
    println!("{} {}", "📁 Files:".yellow().bold(), "/files • /cd • /read • /write".cyan());
    println!("{} {}", "🔧 Tools:".yellow().bold(), "/apps • /debug • /persona • /help".cyan());
    println!("{} {}", "💬 Usage:".yellow().bold(), "Type requests naturally or use /slash commands".dim());
    println!();
}

pub fn prompt_text(cwd: &std::path::Path) -> String {
    let name = cwd
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "/".to_string());
    format!("{} {} {} ", "groq-cli".cyan(), name.dim(), "❯".white().bold())
}
