use crate::domain::record::Record;
use crate::domain::response::Page;
use crate::domain::validation::ValidationError;
use crate::domain::value::{FieldName, PageSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Sort direction for `ORDER BY`.
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// AWQL keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Value side of a filter predicate.
pub enum PredicateValue {
    Text(String),
    Integer(i64),
    List(Vec<String>),
}

impl From<i64> for PredicateValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for PredicateValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PredicateValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Comparison operator applied server-side.
pub enum PredicateOperator {
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
    In,
}

#[derive(Debug, Clone, PartialEq)]
/// A server-side filter: `(field, operator, value)`.
pub struct Predicate {
    field: FieldName,
    operator: PredicateOperator,
    value: PredicateValue,
}

impl Predicate {
    /// `field = value`.
    pub fn equal_to(
        field: impl Into<String>,
        value: impl Into<PredicateValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            field: FieldName::new(field)?,
            operator: PredicateOperator::EqualTo,
            value: value.into(),
        })
    }

    /// `field != value`.
    pub fn not_equal_to(
        field: impl Into<String>,
        value: impl Into<PredicateValue>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            field: FieldName::new(field)?,
            operator: PredicateOperator::NotEqualTo,
            value: value.into(),
        })
    }

    /// `field > value`.
    pub fn greater_than(field: impl Into<String>, value: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            field: FieldName::new(field)?,
            operator: PredicateOperator::GreaterThan,
            value: PredicateValue::Integer(value),
        })
    }

    /// `field < value`.
    pub fn less_than(field: impl Into<String>, value: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            field: FieldName::new(field)?,
            operator: PredicateOperator::LessThan,
            value: PredicateValue::Integer(value),
        })
    }

    /// `field IN [values...]`.
    ///
    /// The list must not be empty; the server rejects empty `IN` sets anyway,
    /// so this is caught before a request is issued.
    pub fn in_list<I, S>(field: impl Into<String>, values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let field = FieldName::new(field)?;
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ValidationError::EmptyInList {
                field: field.as_str().to_owned(),
            });
        }
        Ok(Self {
            field,
            operator: PredicateOperator::In,
            value: PredicateValue::List(values),
        })
    }

    /// Field this predicate filters on.
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// Comparison operator.
    pub fn operator(&self) -> PredicateOperator {
        self.operator
    }

    /// Value side of the predicate.
    pub fn value(&self) -> &PredicateValue {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// `(offset, limit)` pair selecting a sub-range of the remote collection.
pub struct PageWindow {
    offset: u32,
    limit: PageSize,
}

impl PageWindow {
    /// Window starting at offset zero.
    pub fn first(limit: PageSize) -> Self {
        Self { offset: 0, limit }
    }

    /// Current offset.
    pub fn offset(self) -> u32 {
        self.offset
    }

    /// Page size limit.
    pub fn limit(self) -> PageSize {
        self.limit
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A paged read query: field list, filter predicates, sort order, and the
/// current page window.
///
/// The only mutation a query supports is [`ServiceQuery::advance`], which
/// moves the window forward by exactly one page.
pub struct ServiceQuery {
    fields: Vec<FieldName>,
    predicates: Vec<Predicate>,
    ordering: Option<(FieldName, SortOrder)>,
    window: PageWindow,
}

impl ServiceQuery {
    /// Start building a query.
    pub fn builder() -> ServiceQueryBuilder {
        ServiceQueryBuilder::new()
    }

    /// Fields to retrieve, in selection order.
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// Filter predicates, in the order they were added.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Sort key, if any.
    pub fn ordering(&self) -> Option<(&FieldName, SortOrder)> {
        self.ordering.as_ref().map(|(field, order)| (field, *order))
    }

    /// Current page window.
    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Whether a further page remains after `page` (fetched at the current
    /// window).
    ///
    /// Prefers the explicit total when the server reports one: more pages
    /// remain while `offset + limit < total`. Without a total, falls back to
    /// the full-page heuristic (a page shorter than `limit` is final). The
    /// heuristic can cost one empty trailing request when the data size is an
    /// exact multiple of the page size; the total check cannot.
    pub fn has_next(&self, page: &Page) -> bool {
        let consumed = u64::from(self.window.offset) + u64::from(self.window.limit.get());
        match page.total_entries {
            Some(total) => consumed < total,
            None => page.entries.len() as u64 == u64::from(self.window.limit.get()),
        }
    }

    /// Advance the window to the next page.
    ///
    /// Offsets are strictly increasing multiples of the page size.
    pub fn advance(&mut self) {
        self.window.offset += self.window.limit.get();
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`ServiceQuery`].
pub struct ServiceQueryBuilder {
    fields: Vec<FieldName>,
    predicates: Vec<Predicate>,
    ordering: Option<(FieldName, SortOrder)>,
    page_size: Option<PageSize>,
}

impl ServiceQueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one field to retrieve.
    pub fn field(mut self, name: impl Into<String>) -> Result<Self, ValidationError> {
        self.fields.push(FieldName::new(name)?);
        Ok(self)
    }

    /// Add several fields to retrieve.
    pub fn fields<I, S>(mut self, names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.fields.push(FieldName::new(name)?);
        }
        Ok(self)
    }

    /// Add a filter predicate.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Set the sort key. The last call wins.
    pub fn order_by(
        mut self,
        field: impl Into<String>,
        order: SortOrder,
    ) -> Result<Self, ValidationError> {
        self.ordering = Some((FieldName::new(field)?, order));
        Ok(self)
    }

    /// Set the page size (defaults to [`PageSize::default`]).
    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the query, starting at offset zero.
    pub fn build(self) -> Result<ServiceQuery, ValidationError> {
        if self.fields.is_empty() {
            return Err(ValidationError::NoFieldsSelected);
        }
        Ok(ServiceQuery {
            fields: self.fields,
            predicates: self.predicates,
            ordering: self.ordering,
            window: PageWindow::first(self.page_size.unwrap_or_default()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Kind of change a mutate operation applies.
pub enum Operator {
    Add,
    Set,
    Remove,
}

impl Operator {
    /// Wire name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Set => "SET",
            Self::Remove => "REMOVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A single mutate operation: an operator applied to an operand record.
pub struct Operation {
    operator: Operator,
    operand: Record,
}

impl Operation {
    /// Create an operation.
    pub fn new(operator: Operator, operand: Record) -> Self {
        Self { operator, operand }
    }

    /// Shorthand for an ADD operation.
    pub fn add(operand: Record) -> Self {
        Self::new(Operator::Add, operand)
    }

    /// The operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The operand record.
    pub fn operand(&self) -> &Record {
        &self.operand
    }
}
