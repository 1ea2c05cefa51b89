use anyhow::{Context, Result};
use serde::Deserialize;

const ENV_PREFIX: &str = "PAPER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    pub fn default_title(self) -> &'static str {
        match self {
            Locale::Pt => "Artigo Carregado",
            Locale::En => "Uploaded article",
        }
    }
}

/// How a short line has to look before it is taken as a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Any short line containing a section keyword.
    #[default]
    Lenient,
    /// The line is the keyword alone, optionally numbered ("2. Methods").
    Strict,
}

/// Knobs of the structuring passes.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureOptions {
    pub locale: Locale,
    /// Lines must be strictly longer than this to become paragraphs.
    pub min_paragraph_chars: usize,
    /// Header candidates must be strictly shorter than this.
    pub max_header_chars: usize,
    pub header_mode: HeaderMode,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            locale: Locale::Pt,
            min_paragraph_chars: 30,
            max_header_chars: 50,
            header_mode: HeaderMode::Lenient,
        }
    }
}

/// Settings read from `PAPER_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub locale: Locale,
    pub min_paragraph_chars: usize,
    pub max_header_chars: usize,
    pub header_mode: HeaderMode,
    /// Files handed to the worker pool per round in `batch`.
    pub batch_chunk: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let opts = StructureOptions::default();
        Self {
            locale: opts.locale,
            min_paragraph_chars: opts.min_paragraph_chars,
            max_header_chars: opts.max_header_chars,
            header_mode: opts.header_mode,
            batch_chunk: 500,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read PAPER_* settings")?
            .try_deserialize::<Settings>()
            .context("Invalid PAPER_* settings")?;
        Ok(settings)
    }

    pub fn structure_options(&self) -> StructureOptions {
        StructureOptions {
            locale: self.locale,
            min_paragraph_chars: self.min_paragraph_chars,
            max_header_chars: self.max_header_chars,
            header_mode: self.header_mode,
        }
    }
}
