//! Footer content as exposed by a document backend

/// A footer table: rows of cell texts, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FooterTable {
    pub rows: Vec<Vec<String>>,
}

impl FooterTable {
    #[inline]
    #[must_use = "creates a footer table"]
    pub const fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// Footer of one document section.
///
/// Paragraph texts are untrimmed and may be empty; filtering is left to the
/// consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FooterSection {
    /// Top-level footer paragraphs
    pub paragraphs: Vec<String>,
    /// Top-level footer tables
    pub tables: Vec<FooterTable>,
}

impl FooterSection {
    #[inline]
    #[must_use = "creates an empty footer section"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Section whose footer consists of the given paragraphs only
    #[must_use = "creates a footer section"]
    pub fn with_paragraphs<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
            tables: Vec::new(),
        }
    }

    /// Append a table
    #[must_use = "returns the section with the table added"]
    pub fn with_table(mut self, table: FooterTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Whether the footer holds no paragraphs and no tables
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}
