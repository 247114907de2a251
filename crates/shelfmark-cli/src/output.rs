//! Plain-text rendering helpers.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use shelfmark_types::Article;

/// Colors only when stdout is a terminal
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn detect() -> Self {
        Self {
            enabled: std::io::stdout().is_terminal(),
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.enabled {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.enabled {
            text.bright_blue().to_string()
        } else {
            text.to_string()
        }
    }
}

/// One line per article: id, title, status, reading time, favorite marker.
pub fn article_line(article: &Article, palette: Palette) -> String {
    let title = article.title.as_deref().unwrap_or("(untitled)");
    let duration = article
        .duration_estimate
        .map(|m| format!("{}m", m))
        .unwrap_or_else(|| "-".to_string());
    let favorite = if article.is_favorite { " *" } else { "" };

    format!(
        "{:<16} {} {} {}{}",
        palette.dim(&article.id),
        palette.bold(title),
        palette.accent(&format!("[{}]", article.status.as_str())),
        duration,
        favorite
    )
}
