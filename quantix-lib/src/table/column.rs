//! Column presentation and table configuration.

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Plain text; numbers use the large-number format.
    #[default]
    Text,
    /// Ticker pill linking to the asset page.
    Ticker,
    /// Number in the large-number format (`1.23B`).
    Number,
    /// Fraction shown as a percentage, toned good or bad by sign.
    Percent,
    /// Fraction shown as a percentage without tone.
    NeutralPercent,
    /// Dollar price.
    Price,
    /// Signed number relative to a baseline, toned by sign.
    Baseline,
    /// Percentile shown as a ranking bar.
    Ranking,
}

/// One displayed column: the row column, its header and how to render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec<C> {
    pub column: C,
    pub header: String,
    pub kind: ColumnKind,
}

impl<C> ColumnSpec<C> {
    /// Creates a text column.
    pub fn new(column: C, header: impl Into<String>) -> Self {
        Self {
            column,
            header: header.into(),
            kind: ColumnKind::Text,
        }
    }

    /// Sets how the column renders (builder pattern).
    pub fn with_kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Static configuration of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig<C> {
    /// Displayed columns, left to right.
    pub columns: Vec<ColumnSpec<C>>,
    /// Page size.
    pub rows_per_page: usize,
    /// Column sorted descending on first render.
    pub default_sort: Option<C>,
    /// Message for an empty table with no active filter.
    pub empty_message: String,
    /// Show the "Displaying results" line above the table.
    pub hints: bool,
    /// Emphasise the first column as a row index.
    pub indexed: bool,
}

impl<C> TableConfig<C> {
    /// Creates a configuration with 50 rows per page and no default sort.
    pub fn new(columns: Vec<ColumnSpec<C>>) -> Self {
        Self {
            columns,
            rows_per_page: 50,
            default_sort: None,
            empty_message: String::new(),
            hints: false,
            indexed: false,
        }
    }

    /// Sets the page size (builder pattern).
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    /// Sets the initial descending sort column (builder pattern).
    pub fn with_default_sort(mut self, column: C) -> Self {
        self.default_sort = Some(column);
        self
    }

    /// Sets the empty-dataset message (builder pattern).
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Enables the results hint line (builder pattern).
    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    /// Marks the first column as an index (builder pattern).
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Returns the headers in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|spec| spec.header.as_str())
    }
}

impl<C> Default for TableConfig<C> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
