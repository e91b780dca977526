//! Theming and color definitions.
//!
//! The preview pane shows raw Markdown or HTML, so styling works per line:
//! each line is classified once and mapped to a style. Uses ANSI colors that
//! adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

/// What a preview line looks like, for styling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewLine {
    Heading(u8),
    ListItem,
    CodeFence,
    Code,
    BlockQuote,
    Html,
    Paragraph,
    Empty,
}

/// Classify every line of a Markdown document.
///
/// Fence state carries across lines so headings inside code blocks stay code.
pub fn classify_markdown(text: &str) -> Vec<PreviewLine> {
    let mut in_fence = false;
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                return PreviewLine::CodeFence;
            }
            if in_fence {
                return PreviewLine::Code;
            }
            classify_markdown_line(trimmed)
        })
        .collect()
}

fn classify_markdown_line(trimmed: &str) -> PreviewLine {
    if trimmed.is_empty() {
        return PreviewLine::Empty;
    }
    let hashes = trimmed.bytes().take_while(|b| *b == b'#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        // At most 6, fits in u8
        #[allow(clippy::cast_possible_truncation)]
        return PreviewLine::Heading(hashes as u8);
    }
    if trimmed.starts_with('>') {
        return PreviewLine::BlockQuote;
    }
    if trimmed.starts_with('<') {
        return PreviewLine::Html;
    }
    let bullet = trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ");
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    let ordered = digits > 0 && trimmed[digits..].starts_with(". ");
    if bullet || ordered {
        return PreviewLine::ListItem;
    }
    PreviewLine::Paragraph
}

/// Classify every line of rendered HTML.
pub fn classify_html(text: &str) -> Vec<PreviewLine> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let bytes = trimmed.as_bytes();
            match bytes {
                [] => PreviewLine::Empty,
                [b'<', b'h', level @ b'1'..=b'6', ..] => PreviewLine::Heading(level - b'0'),
                _ if trimmed.starts_with("<li") => PreviewLine::ListItem,
                _ if trimmed.starts_with("<pre") => PreviewLine::Code,
                _ if trimmed.starts_with("<blockquote") => PreviewLine::BlockQuote,
                _ => PreviewLine::Html,
            }
        })
        .collect()
}

/// Get the style for a preview line.
///
/// Uses semantic ANSI colors that respect the terminal's theme.
pub fn style_for_preview_line(line: PreviewLine) -> Style {
    let light_bg = is_light_background();
    match line {
        // Headings - bold with distinct colors per level
        PreviewLine::Heading(1) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        PreviewLine::Heading(2) => Style::default()
            .fg(if light_bg {
                Color::Indexed(22)
            } else {
                Color::Green
            })
            .add_modifier(Modifier::BOLD),
        PreviewLine::Heading(3) => Style::default()
            .fg(if light_bg {
                Color::Indexed(58)
            } else {
                Color::Yellow
            })
            .add_modifier(Modifier::BOLD),
        PreviewLine::Heading(_) => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::BOLD),

        PreviewLine::CodeFence | PreviewLine::Code => Style::default()
            .fg(if light_bg {
                Color::Indexed(238)
            } else {
                Color::Indexed(245)
            })
            .add_modifier(Modifier::DIM),

        PreviewLine::BlockQuote => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::ITALIC),

        // Inline HTML (logos, badges) - magenta to stand out
        PreviewLine::Html => Style::default().fg(if light_bg {
            Color::Indexed(90)
        } else {
            Color::Magenta
        }),

        PreviewLine::ListItem | PreviewLine::Paragraph | PreviewLine::Empty => Style::default(),
    }
}

fn is_light_background() -> bool {
    is_light_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn is_light_from_colorfgbg(colorfgbg: Option<&str>) -> bool {
    let Some(value) = colorfgbg else {
        return false;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    bg_str.parse::<u8>().is_ok_and(|bg| bg >= 7)
}
