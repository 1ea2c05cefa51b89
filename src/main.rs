mod extract;
mod glossary;
mod identify;
mod model;
mod parser;
mod reading;
mod settings;
mod summary;

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use glossary::TermLookup;
use identify::Identification;
use model::{Document, SectionStatus};
use reading::{Position, ReadingSession};
use settings::{HeaderMode, Locale, Settings, StructureOptions};
use summary::SummaryLength;

#[derive(Parser)]
#[command(name = "paper_parser", about = "Structure scientific articles for guided reading")]
struct Cli {
    /// Language of section titles and default labels (overrides PAPER_LOCALE)
    #[arg(long, global = true, value_enum)]
    locale: Option<Locale>,
    /// Only accept bare section keywords as headers
    #[arg(long, global = true)]
    strict_headers: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split an article (text or PDF) into sections and paragraphs
    Structure {
        file: PathBuf,
        /// Document title (default: file name)
        #[arg(short, long)]
        title: Option<String>,
        /// Print the document as JSON instead of the article map
        #[arg(long)]
        json: bool,
        /// Only print the paragraphs of this section (e.g. "methods")
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Explain a technical term from the glossary
    Explain {
        term: String,
        /// Print the glossary entry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Identify the rhetorical function of an excerpt of an article
    Identify { file: PathBuf, selection: String },
    /// Guided reading: show one paragraph at a time
    Guide {
        file: PathBuf,
        /// 1-based paragraph number
        #[arg(short, long, default_value = "1")]
        paragraph: usize,
        /// Step through the article from stdin: n(ext), p(revious), r(ead),
        /// s <section> <unread|in-progress|read>, q(uit)
        #[arg(short, long)]
        interactive: bool,
    },
    /// Summarize one section from its most informative paragraphs
    Summary {
        file: PathBuf,
        /// Section id (e.g. "results")
        section: String,
        #[arg(short, long, value_enum, default_value = "short")]
        length: SummaryLength,
        #[arg(long)]
        json: bool,
    },
    /// Structure every file of a directory
    Batch {
        dir: PathBuf,
        /// Write one <name>.json per article here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    if cli.strict_headers {
        settings.header_mode = HeaderMode::Strict;
    }
    info!(?settings, "Settings loaded");
    let opts = settings.structure_options();

    match cli.command {
        Commands::Structure {
            file,
            title,
            json,
            section,
        } => {
            let doc = load_document(&file, title.as_deref(), &opts)?;
            match (section, json) {
                (Some(id), _) => match doc.section(&id) {
                    Some(s) if json => println!("{}", serde_json::to_string_pretty(s)?),
                    Some(s) => {
                        println!("{}\n", s.title);
                        for p in &s.paragraphs {
                            println!("[{} | {}] {}\n", p.id, p.function.as_str(), p.text);
                        }
                    }
                    None => println!("No section \"{}\" in {}.", id, file.display()),
                },
                (None, true) => println!("{}", serde_json::to_string_pretty(&doc)?),
                (None, false) => print_map(&doc, opts.locale),
            }
        }
        Commands::Explain { term, json } => match glossary::explain_term(&term) {
            TermLookup::Found(t) if json => println!("{}", serde_json::to_string_pretty(t)?),
            TermLookup::Found(t) => {
                println!("{}\n", t.term);
                println!("Definição:\n  {}\n", t.definition);
                println!("Função no estudo:\n  {}", t.context);
            }
            TermLookup::NotFound => {
                println!("Termo não encontrado no banco de dados: {}", term.trim());
            }
            TermLookup::EmptySelection => println!("Selecione um termo no texto primeiro."),
        },
        Commands::Identify { file, selection } => {
            let doc = load_document(&file, None, &opts)?;
            match identify::identify_function(&doc, &selection) {
                Identification::Found {
                    paragraph_id,
                    section_title,
                    function,
                    description,
                    explanation,
                } => {
                    println!("Seção:   {}", section_title);
                    println!("Trecho:  {} ({})", paragraph_id, function.as_str());
                    println!("Função:  {}", description);
                    println!("Por que importa: {}", explanation);
                }
                Identification::Unknown => {
                    println!("Não foi possível identificar a função deste trecho.");
                    println!("Selecione um trecho completo do artigo para identificação precisa.");
                }
                Identification::EmptySelection => println!("Selecione um trecho no texto primeiro."),
            }
        }
        Commands::Guide {
            file,
            paragraph,
            interactive,
        } => {
            let doc = load_document(&file, None, &opts)?;
            let mut session = ReadingSession::new(doc);
            let total = session.total_paragraphs();
            if session.start_guided().is_none() {
                println!("No paragraphs found.");
                return Ok(());
            }
            match seek_paragraph(&mut session, paragraph) {
                Some(pos) => print_position(&pos),
                None => {
                    println!("Parágrafo {} fora do intervalo (1-{}).", paragraph, total);
                    return Ok(());
                }
            }
            if interactive {
                run_guided(&mut session, std::io::stdin().lock(), opts.locale)?;
            }
        }
        Commands::Summary {
            file,
            section,
            length,
            json,
        } => {
            let doc = load_document(&file, None, &opts)?;
            let found = doc
                .section(&section)
                .and_then(|s| summary::summarize_section(s, length));
            match found {
                Some(summary) if json => println!("{}", serde_json::to_string_pretty(&summary)?),
                Some(summary) => {
                    println!("{} ({})\n", summary.section_title, summary.sources.join(", "));
                    println!("{}", summary.text);
                }
                None => println!("Resumo não disponível para a seção \"{}\".", section),
            }
        }
        Commands::Batch { dir, out } => {
            let files = list_files(&dir)?;
            if files.is_empty() {
                println!("No files in {}.", dir.display());
                return Ok(());
            }
            if let Some(out) = &out {
                std::fs::create_dir_all(out)
                    .with_context(|| format!("Failed to create {}", out.display()))?;
            }
            println!("Structuring {} files...", files.len());
            let started = Instant::now();
            let counts = process_files(&files, out.as_deref(), &opts, settings.batch_chunk)?;
            counts.print();
            info!(elapsed = ?started.elapsed(), "Batch finished");
        }
    }

    Ok(())
}

fn load_document(path: &Path, title: Option<&str>, opts: &StructureOptions) -> Result<Document> {
    let text = extract::extract_text(path)?;
    let title = title
        .map(str::to_string)
        .or_else(|| extract::title_from_path(path));
    Ok(parser::structure_article(&text, title.as_deref(), opts))
}

/// Jump to a 1-based paragraph number; 0 is out of range.
fn seek_paragraph(session: &mut ReadingSession, number: usize) -> Option<Position<'_>> {
    number.checked_sub(1).and_then(|i| session.seek(i))
}

fn print_position(pos: &Position<'_>) {
    println!(
        "Parágrafo {} de {} | {}\n",
        pos.index + 1,
        pos.total,
        pos.section.title
    );
    println!("{}\n", pos.paragraph.text);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GuideCommand {
    Next,
    Previous,
    MarkRead,
    SetStatus(String, SectionStatus),
    Quit,
}

fn parse_guide_command(line: &str) -> Option<GuideCommand> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("").to_lowercase();
    let command = match command.as_str() {
        "" | "n" | "next" => GuideCommand::Next,
        "p" | "prev" | "previous" => GuideCommand::Previous,
        "r" | "read" => GuideCommand::MarkRead,
        "q" | "quit" => GuideCommand::Quit,
        "s" | "status" => {
            let section = words.next()?.to_string();
            let status = SectionStatus::from_id(words.next()?)?;
            GuideCommand::SetStatus(section, status)
        }
        _ => return None,
    };
    words.next().is_none().then_some(command)
}

/// Drive the guided-reading cursor from line commands until `q` or EOF.
fn run_guided(session: &mut ReadingSession, input: impl BufRead, locale: Locale) -> Result<()> {
    if !session.is_guided() {
        session.start_guided();
    }
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        match parse_guide_command(&line) {
            Some(GuideCommand::Next) => match session.next() {
                Some(pos) => print_position(&pos),
                None => println!("Último parágrafo."),
            },
            Some(GuideCommand::Previous) => match session.previous() {
                Some(pos) => print_position(&pos),
                None => println!("Primeiro parágrafo."),
            },
            Some(GuideCommand::MarkRead) => {
                if let Some(id) = session.current().map(|pos| pos.section.id.clone()) {
                    session.set_status(&id, SectionStatus::Read);
                    println!("Seção marcada como: {}", SectionStatus::Read.label(locale));
                }
            }
            Some(GuideCommand::SetStatus(id, status)) => {
                if session.set_status(&id, status) {
                    println!("Seção {} marcada como: {}", id, status.label(locale));
                } else {
                    println!("Seção desconhecida: {}", id);
                }
            }
            Some(GuideCommand::Quit) => break,
            None => println!(
                "Comandos: n (próximo), p (anterior), r (marcar seção lida), \
                 s <seção> <unread|in-progress|read>, q (sair)"
            ),
        }
    }
    session.stop_guided();

    let progress = session.progress();
    println!(
        "{} de {} seções lidas, {} em progresso.",
        progress.read, progress.total, progress.in_progress
    );
    Ok(())
}

fn print_map(doc: &Document, locale: Locale) {
    println!("{}\n", doc.title);
    if doc.sections.is_empty() {
        println!("No paragraphs found.");
        return;
    }

    println!(
        "{:>2} | {:<16} | {:<12} | {:>5} | {}",
        "#", "Section", "Status", "Paras", "Functions"
    );
    println!("{}", "-".repeat(90));

    for (i, s) in doc.sections.iter().enumerate() {
        let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
        for p in &s.paragraphs {
            *tally.entry(p.function.as_str()).or_default() += 1;
        }
        let functions = tally
            .iter()
            .map(|(f, n)| format!("{}×{}", f, n))
            .collect::<Vec<_>>()
            .join(", ");

        println!(
            "{:>2} | {:<16} | {:<12} | {:>5} | {}",
            i + 1,
            fit_cell(&s.title, 16),
            s.status.label(locale),
            s.paragraphs.len(),
            functions
        );
    }

    println!(
        "\n{} sections | {} paragraphs{}",
        doc.sections.len(),
        doc.paragraph_count(),
        if doc.is_full_text() { " | no headers recognised" } else { "" }
    );
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Default, PartialEq)]
struct BatchCounts {
    files: usize,
    ok: usize,
    errors: usize,
    sections: usize,
    paragraphs: usize,
    full_text: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Done: {} files ({} ok, {} errors). {} sections, {} paragraphs, {} without headers.",
            self.files, self.ok, self.errors, self.sections, self.paragraphs, self.full_text,
        );
    }
}

fn process_files(
    files: &[PathBuf],
    out: Option<&Path>,
    opts: &StructureOptions,
    chunk_size: usize,
) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts {
        files: files.len(),
        ..BatchCounts::default()
    };

    for chunk in files.chunks(chunk_size.max(1)) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| (path, load_document(path, None, opts)))
            .collect();

        for (path, result) in results {
            match result {
                Ok(doc) => {
                    counts.ok += 1;
                    counts.sections += doc.sections.len();
                    counts.paragraphs += doc.paragraph_count();
                    if doc.is_full_text() {
                        counts.full_text += 1;
                    }
                    if let Some(out) = out {
                        write_json(out, path, &doc)?;
                    }
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    counts.errors += 1;
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

/// `<file name>.json`, so `a.txt` and `a.pdf` in one batch do not collide.
fn json_target(out: &Path, source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "article".to_string());
    out.join(format!("{}.json", name))
}

fn write_json(out: &Path, source: &Path, doc: &Document) -> Result<()> {
    let target = json_target(out, source);
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(&target, json).with_context(|| format!("Failed to write {}", target.display()))
}

/// Cut a table cell to `width` chars, marking the cut with `…`.
fn fit_cell(s: &str, width: usize) -> String {
    match s.char_indices().nth(width) {
        Some((cut, _)) if width > 0 => {
            let kept = s[..cut].char_indices().last().map_or(0, |(i, _)| i);
            format!("{}…", &s[..kept])
        }
        _ => s.to_string(),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_counts_and_json_output() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        for name in ["tdah_article.txt", "no_headers.txt"] {
            std::fs::copy(format!("tests/fixtures/{}", name), input.path().join(name)).unwrap();
        }
        std::fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();

        let files = list_files(input.path()).unwrap();
        assert_eq!(files.len(), 3);

        let counts =
            process_files(&files, Some(output.path()), &StructureOptions::default(), 2).unwrap();
        assert_eq!(
            counts,
            BatchCounts {
                files: 3,
                ok: 2,
                errors: 1,
                sections: 7,
                paragraphs: 21,
                full_text: 1,
            }
        );

        let json = std::fs::read_to_string(output.path().join("tdah_article.txt.json")).unwrap();
        let doc: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.title, "tdah_article");
        assert_eq!(doc.sections.len(), 6);
    }

    #[test]
    fn load_document_uses_file_stem_as_title() {
        let doc = load_document(
            Path::new("tests/fixtures/english_trial.txt"),
            None,
            &StructureOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.title, "english_trial");

        let doc = load_document(
            Path::new("tests/fixtures/english_trial.txt"),
            Some("CBT trial"),
            &StructureOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.title, "CBT trial");
    }

    #[test]
    fn guided_session_from_commands() {
        let doc = load_document(
            Path::new("tests/fixtures/english_trial.txt"),
            None,
            &StructureOptions::default(),
        )
        .unwrap();
        let mut session = ReadingSession::new(doc);
        session.start_guided();

        let input = std::io::Cursor::new("n\nr\nx\np\np\nq\nn\n");
        run_guided(&mut session, input, Locale::Pt).unwrap();

        assert!(!session.is_guided());
        let introduction = session.document().section("introduction").unwrap();
        assert_eq!(introduction.status, SectionStatus::Read);
        assert_eq!(session.progress().read, 1);
    }

    #[test]
    fn guide_commands() {
        assert_eq!(parse_guide_command(""), Some(GuideCommand::Next));
        assert_eq!(parse_guide_command(" P "), Some(GuideCommand::Previous));
        assert_eq!(parse_guide_command("read"), Some(GuideCommand::MarkRead));
        assert_eq!(parse_guide_command("q"), Some(GuideCommand::Quit));
        assert_eq!(parse_guide_command("jump"), None);
        assert_eq!(
            parse_guide_command("s methods In-Progress"),
            Some(GuideCommand::SetStatus("methods".to_string(), SectionStatus::InProgress))
        );
        assert_eq!(parse_guide_command("s methods"), None);
        assert_eq!(parse_guide_command("s methods done"), None);
        assert_eq!(parse_guide_command("n extra"), None);
    }

    #[test]
    fn guided_session_sets_any_status() {
        let doc = load_document(
            Path::new("tests/fixtures/tdah_article.txt"),
            None,
            &StructureOptions::default(),
        )
        .unwrap();
        let mut session = ReadingSession::new(doc);
        session.set_status("abstract", SectionStatus::Read);

        let input = std::io::Cursor::new(
            "s methods in-progress\ns results read\ns abstract unread\ns appendix read\nq\n",
        );
        run_guided(&mut session, input, Locale::En).unwrap();

        let doc = session.document();
        assert_eq!(doc.section("methods").unwrap().status, SectionStatus::InProgress);
        assert_eq!(doc.section("results").unwrap().status, SectionStatus::Read);
        assert_eq!(doc.section("abstract").unwrap().status, SectionStatus::Unread);
        assert_eq!(session.progress().read, 1);
        assert_eq!(session.progress().in_progress, 1);
    }

    #[test]
    fn paragraph_numbers_are_one_based() {
        let doc = load_document(
            Path::new("tests/fixtures/english_trial.txt"),
            None,
            &StructureOptions::default(),
        )
        .unwrap();
        let total = doc.paragraph_count();
        let mut session = ReadingSession::new(doc);
        assert!(seek_paragraph(&mut session, 0).is_none());
        assert!(!session.is_guided());
        assert_eq!(seek_paragraph(&mut session, 1).map(|p| p.paragraph.id.clone()), Some("p1".to_string()));
        assert!(seek_paragraph(&mut session, total + 1).is_none());
        assert_eq!(seek_paragraph(&mut session, total).map(|p| p.index), Some(total - 1));
    }

    #[test]
    fn guide_and_summary_arguments() {
        let cli = Cli::try_parse_from(["paper_parser", "guide", "a.txt", "-p", "0"]).unwrap();
        assert!(matches!(cli.command, Commands::Guide { paragraph: 0, .. }));

        let cli =
            Cli::try_parse_from(["paper_parser", "summary", "a.txt", "results", "--length", "long"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Summary { length: SummaryLength::Long, json: false, .. }
        ));
    }

    #[test]
    fn same_stem_gets_distinct_outputs() {
        let out = Path::new("out");
        assert_ne!(json_target(out, Path::new("in/a.txt")), json_target(out, Path::new("in/a.pdf")));
        assert_eq!(json_target(out, Path::new("in/a.pdf")), Path::new("out/a.pdf.json"));
    }

    #[test]
    fn long_titles_fit_their_cell() {
        assert_eq!(fit_cell("Referências", 16), "Referências");
        assert_eq!(fit_cell("Texto Completo do Artigo", 5), "Text…");
        assert_eq!(fit_cell("Introdução", 10), "Introdução");
        assert_eq!(fit_cell("Introdução", 9), "Introduç…");
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "paper_parser",
            "structure",
            "a.txt",
            "--json",
            "--locale",
            "en",
            "--strict-headers",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::En));
        assert!(cli.strict_headers);
        assert!(matches!(cli.command, Commands::Structure { json: true, .. }));
    }
}
