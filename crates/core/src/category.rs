// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reference data: the allowed categories for each transaction type.
//!
//! The remote service owns the canonical lists. Clients cache them and use
//! them to reject records whose category is not offered for their type.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::transaction::TransactionType;

const BUILTIN_EXPENSE: &[&str] = &[
    "food",
    "rent",
    "transport",
    "utilities",
    "health",
    "entertainment",
    "shopping",
    "other",
];

const BUILTIN_INCOME: &[&str] = &["salary", "freelance", "investment", "gift", "other"];

/// Normalizes a category name for storage and comparison.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Allowed category names, keyed by transaction type.
///
/// Serialized with the `expenseTypes`/`incomeTypes` keys used on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySet {
    #[serde(default)]
    pub expense_types: Vec<String>,
    #[serde(default)]
    pub income_types: Vec<String>,
}

impl CategorySet {
    /// Creates a set from raw names, normalizing and dropping blanks and repeats.
    pub fn new<E, I>(expense: E, income: I) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        CategorySet {
            expense_types: normalize_list(expense),
            income_types: normalize_list(income),
        }
    }

    /// The set used when neither a cache nor the remote is available.
    pub fn builtin() -> Self {
        CategorySet::new(BUILTIN_EXPENSE.iter(), BUILTIN_INCOME.iter())
    }

    /// Returns the allowed categories for a type, in display order.
    pub fn for_type(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Expense => &self.expense_types,
            TransactionType::Income => &self.income_types,
        }
    }

    /// Returns true if `category` is offered for `kind` (case-insensitive).
    pub fn contains(&self, kind: TransactionType, category: &str) -> bool {
        let wanted = normalize_category(category);
        self.for_type(kind).iter().any(|c| *c == wanted)
    }

    /// Checks membership, producing a validation error naming the allowed set.
    pub fn check(&self, kind: TransactionType, category: &str) -> Result<(), ValidationError> {
        if self.contains(kind, category) {
            return Ok(());
        }
        Err(ValidationError::UnknownCategory {
            kind: kind.to_string(),
            category: category.to_string(),
            allowed: self.for_type(kind).join(", "),
        })
    }

    /// Returns true if neither type has any categories.
    pub fn is_empty(&self) -> bool {
        self.expense_types.is_empty() && self.income_types.is_empty()
    }

    /// Returns a copy with every name normalized.
    ///
    /// Lists received from the remote are passed through this before caching.
    pub fn normalized(&self) -> Self {
        CategorySet::new(self.expense_types.iter(), self.income_types.iter())
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        CategorySet::builtin()
    }
}

fn normalize_list<T>(names: T) -> Vec<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = normalize_category(name.as_ref());
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
