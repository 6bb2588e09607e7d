use crate::document::DocumentEntry;

/// What happened to a document offered to the packer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packed {
    Full,
    Truncated,
    Skipped,
}

pub struct BudgetResult {
    pub documents: Vec<DocumentEntry>,
    pub total_chars: usize,
    pub documents_truncated: usize,
    pub documents_skipped: usize,
}

/// Strict greedy packing in offer order: no backtracking, no reordering.
///
/// A document that does not fit is cut to the remaining space, after which
/// the budget is exhausted.
pub struct BudgetPacker {
    budget: usize,
    min_fragment_chars: usize,
    used: usize,
    documents: Vec<DocumentEntry>,
    truncated: usize,
    skipped: usize,
}

impl BudgetPacker {
    pub fn new(budget: usize, min_fragment_chars: usize) -> Self {
        Self {
            budget,
            min_fragment_chars,
            used: 0,
            documents: Vec::new(),
            truncated: 0,
            skipped: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.budget.saturating_sub(self.used)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.budget
    }

    pub fn offer(&mut self, source: &str, text: &str) -> Packed {
        let chars = text.chars().count();
        let remaining = self.remaining();

        if chars <= remaining {
            self.documents.push(DocumentEntry::new(source, text));
            self.used += chars;
            return Packed::Full;
        }

        if remaining == 0 || remaining < self.min_fragment_chars {
            self.skipped += 1;
            return Packed::Skipped;
        }

        let entry = DocumentEntry::truncated(source, text, remaining);
        self.used += entry.char_count;
        self.documents.push(entry);
        self.truncated += 1;
        Packed::Truncated
    }

    pub fn finish(self) -> BudgetResult {
        debug_assert_eq!(
            self.used,
            self.documents.iter().map(|d| d.char_count).sum::<usize>()
        );
        debug_assert!(self.used <= self.budget);

        BudgetResult {
            documents: self.documents,
            total_chars: self.used,
            documents_truncated: self.truncated,
            documents_skipped: self.skipped,
        }
    }
}

/// Pack already-cleaned `(source, text)` pairs in the given order.
pub fn apply_budget<I, S, T>(documents: I, budget: usize, min_fragment_chars: usize) -> BudgetResult
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut packer = BudgetPacker::new(budget, min_fragment_chars);
    for (source, text) in documents {
        if packer.is_exhausted() {
            break;
        }
        packer.offer(source.as_ref(), text.as_ref());
    }
    packer.finish()
}
