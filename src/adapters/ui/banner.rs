//! Startup banner: "SUMMARIZER" in figlet's standard font with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Parchment gold (#d4a017).
const GOLD: (u8, u8, u8) = (0xd4, 0xa0, 0x17);
/// Ink blue (#1e6fd9).
const INK_BLUE: (u8, u8, u8) = (0x1e, 0x6f, 0xd9);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn blend(from: (u8, u8, u8), to: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Prints the banner, then the title and version. Falls back to the plain title if the font
/// cannot render.
pub fn print_welcome() {
    let mut out = stdout();
    let art = match FIGfont::standard() {
        Ok(font) => font
            .convert("SUMMARIZER")
            .map(|figure| figure.to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    let lines: Vec<&str> = art.lines().collect();
    let last = lines.len().saturating_sub(1).max(1);

    for (i, line) in lines.iter().enumerate() {
        let (r, g, b) = blend(GOLD, INK_BLUE, i as f64 / last as f64);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let (r, g, b) = INK_BLUE;
    let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
    let _ = out.execute(Print(format!(
        "Legal Document Summarizer v{}\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
