//! Text renderings of an imported collection.

mod json;
mod markdown;

pub use json::render_json;
pub use markdown::render_markdown;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Markdown,
    Json,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown render format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
