//! Console presentation helpers. Plain functions over [`console::Style`],
//! one per color the CLI speaks in.

use console::{Color, Style};

const RAINBOW: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

pub fn log(text: &str) {
    println!("{}", Style::new().green().apply_to(text));
}

pub fn warn(text: &str) {
    println!("{}", Style::new().yellow().apply_to(text));
}

pub fn error(text: &str) {
    eprintln!("{}", Style::new().red().apply_to(text));
}

pub fn banner(text: &str) {
    println!(
        "{}",
        Style::new()
            .green()
            .on_white()
            .bold()
            .underlined()
            .apply_to(text)
    );
}

/// Success line, one color per character.
pub fn rainbow(text: &str) {
    println!("{}", rainbowize(text));
}

fn rainbowize(text: &str) -> String {
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            Style::new()
                .fg(RAINBOW[i % RAINBOW.len()])
                .apply_to(ch)
                .to_string()
        })
        .collect()
}
