//! Boolean design matrix: the input surface produced by discretization.
//!
//! A [`BoolMatrix`] is a set of named boolean columns of equal length. It is
//! the output of the (external) discretization front-ends and the only view
//! of the data the induction pipeline ever sees. Column names tie the matrix
//! to the [`Semantics`][crate::semantics::Semantics] table.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::semantics::Semantics;

/// A table of named boolean columns, all with the same number of rows.
#[derive(Debug, Default, Clone)]
pub struct BoolMatrix {
    names: Vec<String>,
    index: HashMap<String, usize>,
    columns: Vec<Vec<bool>>,
}

impl BoolMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. The first column fixes the row count; every later
    /// column must match it.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<bool>) -> Result<usize> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::DuplicateColumn(name));
        }
        if let Some(first) = self.columns.first() {
            if values.len() != first.len() {
                return Err(Error::ColumnLength {
                    name,
                    expected: first.len(),
                    actual: values.len(),
                });
            }
        }
        let col = self.columns.len();
        self.index.insert(name.clone(), col);
        self.names.push(name);
        self.columns.push(values);
        Ok(col)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn column(&self, col: usize) -> &[bool] {
        &self.columns[col]
    }

    pub fn value(&self, col: usize, row: usize) -> bool {
        self.columns[col][row]
    }

    /// Resolves a set of variables against this matrix's columns by name.
    ///
    /// Fails with [`Error::UnknownColumn`] if any variable's column is
    /// missing; extra columns in the matrix are ignored.
    pub fn bind(
        &self,
        semantics: &Semantics,
        vars: impl IntoIterator<Item = u32>,
    ) -> Result<Binding> {
        let mut map = HashMap::new();
        for var in vars {
            let name = semantics.name(var);
            let col = self
                .column_index(name)
                .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
            map.insert(var, col);
        }
        Ok(Binding { map })
    }
}

/// Resolved variable-to-column mapping for one matrix.
#[derive(Debug, Clone)]
pub struct Binding {
    map: HashMap<u32, usize>,
}

impl Binding {
    /// Column index for a bound variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable was not part of the binding; that indicates a
    /// term referencing a variable outside the fitted literal subset.
    pub fn column(&self, var: u32) -> usize {
        *self
            .map
            .get(&var)
            .unwrap_or_else(|| panic!("variable x{} is not bound to a column", var))
    }
}
