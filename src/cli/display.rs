// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the proxima CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Respects `NO_COLOR`
//! and falls back to plain text when stdout is not a TTY, so piping a report
//! into a file or `grep` works.
//!
//! # Theme detection order
//!
//! 1. `PROXIMA_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use proxima::query::Operator;
use std::sync::OnceLock;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("PROXIMA_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": 7 and up (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

type Rgb = (u8, u8, u8);

/// What a piece of report text means, mapped to a color per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Exact matches, fast timings, close similarities.
    Good,
    /// Missing exact matches, middling timings and similarities.
    Warn,
    /// Errors and slow timings.
    Bad,
    Operator,
    Heading,
    /// Section labels.
    Label,
    /// Box borders, `AND`, weak similarities.
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    good: Rgb,
    warn: Rgb,
    bad: Rgb,
    operator: Rgb,
    heading: Rgb,
    label: Rgb,
    muted: Rgb,
}

const ONEDARK: Palette = Palette {
    good: (152, 195, 121),     // #98c379
    warn: (229, 192, 123),     // #e5c07b
    bad: (224, 108, 117),      // #e06c75
    operator: (198, 120, 221), // #c678dd
    heading: (97, 175, 239),   // #61afef
    label: (86, 182, 194),     // #56b6c2
    muted: (92, 99, 112),      // #5c6370
};

const ONELIGHT: Palette = Palette {
    good: (80, 161, 79),      // #50a14f
    warn: (193, 132, 1),      // #c18401
    bad: (228, 86, 73),       // #e45649
    operator: (166, 38, 164), // #a626a4
    heading: (64, 120, 242),  // #4078f2
    label: (1, 132, 188),     // #0184bc
    muted: (160, 161, 167),   // #a0a1a7
};

impl Palette {
    fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &ONEDARK,
            Theme::Light => &ONELIGHT,
        }
    }

    fn get(&self, role: Role) -> Rgb {
        match role {
            Role::Good => self.good,
            Role::Warn => self.warn,
            Role::Bad => self.bad,
            Role::Operator => self.operator,
            Role::Heading => self.heading,
            Role::Label => self.label,
            Role::Muted => self.muted,
        }
    }
}

fn rgb((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Escape sequence for `role` in the detected theme.
pub fn color(role: Role) -> String {
    rgb(Palette::for_theme(theme()).get(role))
}

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or plain text when colors are off.
pub fn themed(role: Role, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color(role), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ANSI escapes excluded.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = color(Role::Muted);
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}│{}{}{}{}│{}", border, RESET, content, " ".repeat(pad), border, RESET);
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    section_edge('┌', '┐', label);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    section_edge('├', '┤', label);
}

/// └──────────────────┘
pub fn section_bot() {
    let border = color(Role::Muted);
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

fn section_edge(left: char, right: char, label: &str) {
    let border = color(Role::Muted);
    let label_part = format!("─ {} ", themed(Role::Label, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}{}{}{}{}{}",
        border,
        left,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        right,
        RESET
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// `[exact]` or `[fuzzy]` next to a query term.
pub fn match_badge(is_exact: bool) -> String {
    if is_exact {
        themed(Role::Good, &[BOLD], "[exact]")
    } else {
        themed(Role::Warn, &[BOLD], "[no exact match]")
    }
}

pub fn operator_label(op: Operator) -> String {
    match op {
        Operator::And => themed(Role::Muted, &[], "AND"),
        op => themed(Role::Operator, &[BOLD], &op.to_string()),
    }
}

/// Similarity ratio, greener when closer to 1.
pub fn similarity_value(ratio: f64) -> String {
    let text = format!("{:>4.2}", ratio);
    let role = if ratio >= 0.7 {
        Role::Good
    } else if ratio >= 0.4 {
        Role::Warn
    } else {
        Role::Muted
    };
    themed(role, &[], &text)
}

/// Color-coded timing value in ms (green=fast, yellow=medium, red=slow).
pub fn timing_ms(value: f64) -> String {
    let text = format!("{:.3} ms", value);
    let role = if value < 5.0 {
        Role::Good
    } else if value < 50.0 {
        Role::Warn
    } else {
        Role::Bad
    };
    themed(role, &[], &text)
}

/// At most `max` positions, then `… (+N)`.
pub fn positions_preview(positions: &[u32], max: usize) -> String {
    let shown: Vec<String> = positions.iter().take(max).map(u32::to_string).collect();
    let mut out = shown.join(", ");
    if positions.len() > max {
        out.push_str(&format!(", … (+{})", positions.len() - max));
    }
    out
}

pub fn dim(text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", DIM, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn error_line(message: &str) -> String {
    themed(Role::Bad, &[BOLD], message)
}

pub fn heading(text: &str) -> String {
    themed(Role::Heading, &[BOLD], text)
}
