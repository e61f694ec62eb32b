//! Statement compilers.
//!
//! Every compiler runs the unsupported-feature guard before emitting any
//! text, then assembles clause fragments in a fixed order.

use super::{Fragment, Grammar};
use crate::error::{CompileError, Result};
use crate::query::{Column, Predicate, QueryDescriptor, Rows, UpsertUpdate, ValuesMap};
use crate::record::RecordId;
use crate::value::Param;
use crate::statement::{CompiledStatement, StatementKind};

/// The only unique-by key set UPSERT supports.
const UPSERT_KEY: &str = "id";

impl Grammar {
    /// Compiles a SELECT.
    ///
    /// Without requested columns every field is selected. FETCH, the
    /// TIMEOUT/PARALLEL flags and SPLIT follow the clauses, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Unsupported`] for joins, unions, HAVING,
    /// DISTINCT, locks or bitwise predicates, and
    /// [`CompileError::InvalidIdentifier`] for a malformed record reference.
    pub fn compile_select(&self, query: &QueryDescriptor) -> Result<CompiledStatement> {
        self.guard(query)?;
        Ok(Self::finish(StatementKind::Select, self.select_fragment(query)?))
    }

    /// Compiles a SELECT without guarding it; sub-selects share this.
    pub(crate) fn select_fragment(&self, query: &QueryDescriptor) -> Result<Fragment> {
        if let Some(aggregate) = &query.aggregate {
            let mut fragment = self.compile_aggregate(query, aggregate)?;
            self.push_select_clauses(&mut fragment, query)?;
            return Ok(fragment);
        }

        let columns = query
            .columns
            .clone()
            .unwrap_or_else(|| vec![Column::from("*")]);
        let mut fragment = self.compile_columns(query, &columns)?;
        self.push_select_clauses(&mut fragment, query)?;

        for suffix in [
            Self::compile_fetch(&query.fetch),
            Self::compile_flags_without_return(&query.flags),
            Self::compile_split(&query.split),
        ]
        .into_iter()
        .flatten()
        {
            fragment.push(suffix);
        }
        Ok(fragment)
    }

    fn push_select_clauses(&self, fragment: &mut Fragment, query: &QueryDescriptor) -> Result<()> {
        fragment.push(self.compile_from(&query.from)?);
        for clause in [
            self.compile_wheres(&query.wheres)?,
            self.compile_groups(&query.groups),
            self.compile_orders(&query.orders),
            Self::compile_limit(query.limit),
            Self::compile_offset(query.offset),
        ]
        .into_iter()
        .flatten()
        {
            fragment.push(clause);
        }
        Ok(())
    }

    /// Compiles an existence check over the query limited to one row.
    ///
    /// The result is a single row with a single boolean `exists` field.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`].
    pub fn compile_exists(&self, query: &QueryDescriptor) -> Result<CompiledStatement> {
        self.guard(query)?;
        let inner = self.select_fragment(&query.clone().limit(1))?;
        let exists = Self::wrap_value("exists");
        Ok(Self::finish(
            StatementKind::Select,
            inner.wrapped(
                &format!("SELECT {exists} FROM {{exists: <bool> count(("),
                "))}",
            ),
        ))
    }

    /// Compiles a batch INSERT.
    ///
    /// The column list comes from the first record; each record adds one
    /// parenthesised group of placeholders in that column order. Without any field the statement
    /// becomes `CREATE <table>`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::ConstraintViolation`] when a record's fields
    /// differ from the first record's. Otherwise same as
    /// [`Grammar::compile_select`].
    pub fn compile_insert(&self, query: &QueryDescriptor, rows: &Rows) -> Result<CompiledStatement> {
        self.guard(query)?;
        let (kind, fragment) = self.insert_fragment(query, rows)?;
        Ok(Self::finish(kind, fragment))
    }

    fn insert_fragment(
        &self,
        query: &QueryDescriptor,
        rows: &Rows,
    ) -> Result<(StatementKind, Fragment)> {
        let table = self.wrap_table(&query.from)?;
        if rows.is_empty() {
            return Ok((StatementKind::Create, Fragment::raw(format!("CREATE {table}"))));
        }

        let fields: Vec<&str> = rows
            .first()
            .map_or_else(Vec::new, |first| first.keys().collect());
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, record)| -> Result<Fragment> {
                Ok(Self::parameterize(project(record, &fields, index)?).wrapped("(", ")"))
            })
            .collect::<Result<Vec<_>>>()?;
        let records = Fragment::join(records, ", ");

        let columns = fields
            .iter()
            .map(|field| self.wrap_name(field))
            .collect::<Vec<_>>()
            .join(", ");
        let fragment = records.wrapped(&format!("INSERT INTO {table} ({columns}) VALUES "), "");
        Ok((StatementKind::Insert, fragment))
    }

    /// Compiles an INSERT that skips records whose id already exists.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`].
    pub fn compile_insert_or_ignore(
        &self,
        query: &QueryDescriptor,
        rows: &Rows,
    ) -> Result<CompiledStatement> {
        self.guard(query)?;
        let (kind, mut fragment) = self.insert_fragment(query, rows)?;
        if kind == StatementKind::Insert {
            fragment.sql = fragment.sql.replacen("INSERT", "INSERT IGNORE", 1);
        }
        Ok(Self::finish(kind, fragment))
    }

    /// Compiles an INSERT whose values come from a sub-select.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`], for both descriptors.
    pub fn compile_insert_using(
        &self,
        query: &QueryDescriptor,
        columns: &[Column],
        source: &QueryDescriptor,
    ) -> Result<CompiledStatement> {
        self.guard(query)?;
        self.guard(source)?;

        let mut fragment = Fragment::raw(format!("INSERT INTO {} (", self.wrap_table(&query.from)?));
        fragment.append(self.columnize(columns));
        fragment.push_str(") VALUES ");
        fragment.append(self.select_fragment(source)?.wrapped("((", "))"));
        Ok(Self::finish(StatementKind::Insert, fragment))
    }

    /// Compiles a single-record CREATE with a CONTENT object.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`].
    pub fn compile_create(
        &self,
        query: &QueryDescriptor,
        values: &ValuesMap,
    ) -> Result<CompiledStatement> {
        self.guard(query)?;
        let mut fragment = Fragment::raw(format!("CREATE {}", self.wrap_table(&query.from)?));
        if let Some(content) = Self::compile_content(values) {
            fragment.push(content);
        }
        if let Some(flags) = Self::compile_flags(&query.flags) {
            fragment.push(flags);
        }
        Ok(Self::finish(StatementKind::Create, fragment))
    }

    /// Compiles an UPDATE of the filtered records.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`].
    pub fn compile_update(
        &self,
        query: &QueryDescriptor,
        values: &ValuesMap,
    ) -> Result<CompiledStatement> {
        self.guard(query)?;
        let mut fragment = Fragment::raw(format!("UPDATE {}", self.wrap_table(&query.from)?));
        if !values.is_empty() {
            fragment.push(self.compile_assignments(values).wrapped("SET ", ""));
        }
        if let Some(wheres) = self.compile_wheres(&query.wheres)? {
            fragment.push(wheres);
        }
        if let Some(flags) = Self::compile_flags(&query.flags) {
            fragment.push(flags);
        }
        Ok(Self::finish(StatementKind::Update, fragment))
    }

    /// Compiles an INSERT updating existing records on a duplicate id.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::ConstraintViolation`] when `unique_by` is not
    /// exactly `["id"]`, when `update` does not name the keys to update or
    /// when there is no record to insert. These are checked before anything
    /// else. Otherwise same as
    /// [`Grammar::compile_select`].
    pub fn compile_upsert<S: AsRef<str>>(
        &self,
        query: &QueryDescriptor,
        rows: &Rows,
        unique_by: &[S],
        update: &UpsertUpdate,
    ) -> Result<CompiledStatement> {
        if !matches!(unique_by, [key] if key.as_ref() == UPSERT_KEY) {
            let given = unique_by
                .iter()
                .map(|key| self.wrap_name(key.as_ref()))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CompileError::ConstraintViolation(format!(
                "SurrealDB only supports upsert on the [{UPSERT_KEY}] primary key, {given} given."
            )));
        }

        let values = match update {
            UpsertUpdate::Values(values) if !values.is_empty() => values,
            _ => {
                return Err(CompileError::ConstraintViolation(String::from(
                    "SurrealDB UPSERT requires the keys to update.",
                )))
            }
        };

        if rows.is_empty() {
            return Err(CompileError::ConstraintViolation(String::from(
                "SurrealDB UPSERT requires at least one record.",
            )));
        }

        self.guard(query)?;
        let (_, mut fragment) = self.insert_fragment(query, rows)?;
        fragment.push_str(" ON DUPLICATE KEY UPDATE ");
        fragment.append(self.compile_assignments(values));
        Ok(Self::finish(StatementKind::Insert, fragment))
    }

    /// Compiles a DELETE.
    ///
    /// The first basic predicate on `<table>.id` is rewritten to the bare
    /// `id` column, and `FROM` is left out for a record reference.
    ///
    /// # Errors
    ///
    /// Same as [`Grammar::compile_select`].
    pub fn compile_delete(&self, query: &QueryDescriptor) -> Result<CompiledStatement> {
        self.guard(query)?;
        let table = self.wrap_table(&query.from)?;

        let qualified_id = format!("{}.id", query.from);
        let mut wheres = query.wheres.clone();
        if let Some(Predicate::Basic { column, .. }) = wheres
            .iter_mut()
            .map(|clause| &mut clause.predicate)
            .find(|predicate| {
                matches!(predicate, Predicate::Basic { column, .. } if column.is_named(&qualified_id))
            })
        {
            *column = Column::from("id");
        }

        let mut fragment = Fragment::raw("DELETE");
        if !RecordId::is_record(&query.from) {
            fragment.push(Fragment::raw("FROM"));
        }
        fragment.push(Fragment::raw(table));
        if let Some(wheres) = self.compile_wheres(&wheres)? {
            fragment.push(wheres);
        }
        if let Some(flags) = Self::compile_flags(&query.flags) {
            fragment.push(flags);
        }
        Ok(Self::finish(StatementKind::Delete, fragment))
    }

    /// Compiles a RELATE creating an `edge` from the query's record to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidIdentifier`] if either endpoint is not
    /// a `table:id` reference. Otherwise same as [`Grammar::compile_select`].
    pub fn compile_relate(
        &self,
        query: &QueryDescriptor,
        edge: &str,
        to: &str,
        values: &ValuesMap,
    ) -> Result<CompiledStatement> {
        self.guard(query)?;
        let from = RecordId::parse(&query.from)?;
        let to = RecordId::parse(to)?;

        let mut fragment = Fragment::raw(format!("RELATE {from}->{edge}->{to}"));
        if let Some(content) = Self::compile_content(values) {
            fragment.push(content);
        }
        if let Some(flags) = Self::compile_flags(&query.flags) {
            fragment.push(flags);
        }
        Ok(Self::finish(StatementKind::Relate, fragment))
    }
}

/// Orders a record's values by `fields`, the first record's keys.
fn project<'a>(record: &'a ValuesMap, fields: &[&str], index: usize) -> Result<Vec<&'a Param>> {
    let projected = fields
        .iter()
        .map(|field| record.get(field))
        .collect::<Option<Vec<_>>>()
        .filter(|projected| projected.len() == record.len());
    projected.ok_or_else(|| {
        CompileError::ConstraintViolation(format!(
            "INSERT records must share the same fields: record {} has [{}], expected [{}].",
            index + 1,
            record.keys().collect::<Vec<_>>().join(", "),
            fields.join(", ")
        ))
    })
}
