use tracing::debug;

use crate::model::{Document, Paragraph, Section, SectionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingProgress {
    pub read: usize,
    pub in_progress: usize,
    pub unread: usize,
    pub total: usize,
}

/// A paragraph under the guided-reading cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position<'a> {
    /// 0-based index over all paragraphs of the document.
    pub index: usize,
    pub total: usize,
    pub section: &'a Section,
    pub paragraph: &'a Paragraph,
}

/// Reader-owned state on top of a structured document: section status and
/// the guided-reading cursor.
#[derive(Debug, Clone)]
pub struct ReadingSession {
    document: Document,
    cursor: Option<usize>,
}

impl ReadingSession {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            cursor: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns false when no section has this id.
    pub fn set_status(&mut self, section_id: &str, status: SectionStatus) -> bool {
        match self.document.sections.iter_mut().find(|s| s.id == section_id) {
            Some(section) => {
                debug!(section = section_id, ?status, "Section status changed");
                section.status = status;
                true
            }
            None => false,
        }
    }

    pub fn progress(&self) -> ReadingProgress {
        let mut p = ReadingProgress {
            total: self.document.sections.len(),
            ..ReadingProgress::default()
        };
        for section in &self.document.sections {
            match section.status {
                SectionStatus::Read => p.read += 1,
                SectionStatus::InProgress => p.in_progress += 1,
                SectionStatus::Unread => p.unread += 1,
            }
        }
        p
    }

    pub fn total_paragraphs(&self) -> usize {
        self.document.paragraph_count()
    }

    pub fn is_guided(&self) -> bool {
        self.cursor.is_some()
    }

    /// Enter guided mode at the first paragraph. Stays off for a document
    /// without paragraphs.
    pub fn start_guided(&mut self) -> Option<Position<'_>> {
        self.cursor = (self.total_paragraphs() > 0).then_some(0);
        self.current()
    }

    pub fn stop_guided(&mut self) {
        self.cursor = None;
    }

    /// Jump to a 0-based paragraph index, entering guided mode.
    pub fn seek(&mut self, index: usize) -> Option<Position<'_>> {
        if index >= self.total_paragraphs() {
            return None;
        }
        self.cursor = Some(index);
        self.current()
    }

    pub fn current(&self) -> Option<Position<'_>> {
        self.cursor.and_then(|i| self.paragraph_at(i))
    }

    /// Advance the cursor; `None` at the last paragraph or outside guided mode.
    pub fn next(&mut self) -> Option<Position<'_>> {
        let i = self.cursor?;
        if i + 1 >= self.total_paragraphs() {
            return None;
        }
        self.cursor = Some(i + 1);
        self.current()
    }

    /// Step back; `None` at the first paragraph or outside guided mode.
    pub fn previous(&mut self) -> Option<Position<'_>> {
        let i = self.cursor?;
        if i == 0 {
            return None;
        }
        self.cursor = Some(i - 1);
        self.current()
    }

    pub fn paragraph_at(&self, index: usize) -> Option<Position<'_>> {
        let total = self.total_paragraphs();
        self.document
            .paragraphs()
            .nth(index)
            .map(|(section, paragraph)| Position {
                index,
                total,
                section,
                paragraph,
            })
    }
}
