//! # Dataset Façade
//!
//! A thin column view over a [`Schema`] for tabular consumers: a row is a
//! slice of raw values, one per column, and each cell is validated by the
//! column's datatype. Validation does not stop at the first bad cell; the
//! [`RowReport`] carries every column's outcome.

use std::fmt;

use gpd_core::{Facet, Value, ValueError, ValueErrorKind};
use gpd_types::{Schema, TypeId, TypeRef};

/// A named column and the datatype of its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub type_ref: TypeRef,
}

impl Column {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// Ordered columns over a frozen schema.
#[derive(Debug, Clone)]
pub struct RowSchema<'s> {
    schema: &'s Schema,
    columns: Vec<Column>,
}

impl<'s> RowSchema<'s> {
    pub fn new(schema: &'s Schema, columns: Vec<Column>) -> Self {
        Self { schema, columns }
    }

    /// Columns taken from an aggregate's members, inherited members
    /// included. `None` if `ty` is not an aggregate.
    pub fn from_aggregate(schema: &'s Schema, ty: impl Into<TypeId>) -> Option<Self> {
        let id = ty.into();
        if !matches!(
            schema.get(id).map(|d| d.category()),
            Some(gpd_types::Category::Aggregate)
        ) {
            return None;
        }
        let columns = schema
            .members(id)
            .into_iter()
            .map(|m| Column::new(m.name.clone(), m.type_ref.clone()))
            .collect();
        Some(Self { schema, columns })
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Datatype of the column at `index`.
    pub fn datatype(&self, index: usize) -> Option<TypeId> {
        self.columns.get(index).map(|c| c.type_ref.id())
    }

    /// Position of a column, matching the name exactly first and then
    /// ignoring case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
            })
    }

    /// Validate one row, cell by cell.
    ///
    /// A row with more cells than columns reports each extra cell as a
    /// `DataTypeMismatch`; a short row reports each missing column the
    /// same way.
    pub fn validate_row(&self, row: &[Value]) -> RowReport {
        let width = self.columns.len().max(row.len());
        let mut cells = Vec::with_capacity(width);
        for index in 0..width {
            let result = match (self.columns.get(index), row.get(index)) {
                (Some(column), Some(raw)) => self
                    .schema
                    .to_value(&column.type_ref, raw)
                    .map_err(|e| e.at_member(column.name.clone())),
                (Some(column), None) => Err(ValueError::new(
                    ValueErrorKind::DataTypeMismatch,
                    Facet::Members,
                    format!("missing value for column '{}'", column.name),
                )
                .at_member(column.name.clone())),
                (None, _) => Err(ValueError::new(
                    ValueErrorKind::DataTypeMismatch,
                    Facet::Members,
                    format!("row has {} cells but only {} columns", row.len(), self.len()),
                )
                .at_index(index)),
            };
            cells.push(result);
        }
        let report = RowReport { cells };
        if !report.is_valid() {
            tracing::trace!(errors = report.errors().count(), "row rejected");
        }
        report
    }
}

/// Outcome of validating one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    cells: Vec<Result<Value, ValueError>>,
}

impl RowReport {
    pub fn is_valid(&self) -> bool {
        self.cells.iter().all(Result::is_ok)
    }

    /// Per-cell results in column order.
    pub fn cells(&self) -> &[Result<Value, ValueError>] {
        &self.cells
    }

    /// Failing cells with their column index.
    pub fn errors(&self) -> impl Iterator<Item = (usize, &ValueError)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().err().map(|e| (i, e)))
    }

    /// The canonical row, if every cell passed.
    pub fn values(&self) -> Option<Vec<Value>> {
        self.cells.iter().map(|c| c.as_ref().ok().cloned()).collect()
    }
}

impl fmt::Display for RowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("row valid");
        }
        for (index, error) in self.errors() {
            writeln!(f, "  [{index}] {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpd_types::{Aggregate, Integral, Member, SchemaBuilder, Sequence};

    fn people() -> (Schema, TypeRef) {
        let mut b = SchemaBuilder::new();
        let octet = b.add(Integral::octet()).unwrap();
        let latin1 = b.add(gpd_types::Character::latin1()).unwrap();
        let name = b.add(Sequence::unbounded(latin1)).unwrap();
        let person = b
            .define(
                "Person",
                Aggregate::record(vec![Member::new("Name", name), Member::new("age", octet)])
                    .unwrap(),
            )
            .unwrap();
        (b.build().unwrap(), person)
    }

    #[test]
    fn test_columns_from_record() {
        let (schema, person) = people();
        let rows = RowSchema::from_aggregate(&schema, &person).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.column_index("Name"), Some(0));
        assert_eq!(rows.column_index("AGE"), Some(1));
        assert_eq!(rows.column_index("height"), None);
        assert!(rows.datatype(1).is_some());
        assert!(rows.datatype(2).is_none());
    }

    #[test]
    fn test_non_aggregate_has_no_columns() {
        let (schema, person) = people();
        let age = schema.members(&person)[1].type_ref.clone();
        assert!(RowSchema::from_aggregate(&schema, &age).is_none());
    }

    #[test]
    fn test_row_collects_every_error() {
        let (schema, person) = people();
        let rows = RowSchema::from_aggregate(&schema, &person).unwrap();

        let ok = rows.validate_row(&[Value::text("Ada"), Value::from(36)]);
        assert!(ok.is_valid());
        assert_eq!(ok.values().unwrap()[1], Value::from(36));

        let bad = rows.validate_row(&[Value::from(1), Value::from(300), Value::Null]);
        assert!(!bad.is_valid());
        let indices: Vec<usize> = bad.errors().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(bad.errors().nth(1).unwrap().1.kind, ValueErrorKind::NumericOutOfRange);
        assert!(bad.values().is_none());
    }

    #[test]
    fn test_short_row_reports_missing_column() {
        let (schema, person) = people();
        let rows = RowSchema::from_aggregate(&schema, &person).unwrap();
        let report = rows.validate_row(&[Value::text("Ada")]);
        let (index, error) = report.errors().next().unwrap();
        assert_eq!(index, 1);
        assert_eq!(error.facet, Facet::Members);
        assert_eq!(error.path.to_string(), "$.age");
    }
}
