//! Country-name matching that ignores internal whitespace and periods.
//!
//! A query such as `estadosunidos` must match the stored `Estados Unidos`, and
//! `e.s.t.a.d.o.s` must match `Estados`. The query is normalised (whitespace and
//! periods dropped), every remaining character is escaped and followed by a
//! "zero or more whitespace-or-period" gap, and the result is anchored.

use regex::{Regex, RegexBuilder};
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, IdenStatic,
    QuerySelect,
};

use crate::db::entities::{country, Country};

/// Characters the matcher treats as insignificant.
const GAP: &str = r"[\s.]*";

fn is_gap(c: char) -> bool {
    c.is_whitespace() || c == '.'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern {
    normalized: String,
    source: String,
}

impl FuzzyPattern {
    /// Builds the pattern for `query`. Returns `None` when nothing significant is
    /// left after normalisation; callers reject such queries before matching.
    pub fn new(query: &str) -> Option<Self> {
        let normalized: String = query.chars().filter(|c| !is_gap(*c)).collect();
        if normalized.is_empty() {
            return None;
        }

        let mut source = String::with_capacity(normalized.len() * 10 + 2);
        source.push('^');
        source.push_str(GAP);
        for c in normalized.chars() {
            source.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4])));
            source.push_str(GAP);
        }
        source.push('$');

        Some(Self { normalized, source })
    }

    /// The anchored regular expression, with metacharacters from the query escaped.
    pub fn as_regex(&self) -> &str {
        &self.source
    }

    /// The query with whitespace and periods removed.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    fn compile(&self) -> Option<Regex> {
        RegexBuilder::new(&self.source)
            .case_insensitive(true)
            .build()
            .ok()
    }

    /// Evaluates the match in-process, case-insensitively (Unicode case folding).
    pub fn matches(&self, text: &str) -> bool {
        self.compile().is_some_and(|re| re.is_match(text))
    }

    /// Filter expression for a country-name `column`.
    ///
    /// PostgreSQL evaluates the regex itself with its case-insensitive operator.
    /// Other backends only fold ASCII case in SQL, so the stored country names are
    /// matched here with [`FuzzyPattern::matches`] and the column is restricted to
    /// the names that matched.
    pub async fn country_condition<C>(
        &self,
        db: &DatabaseConnection,
        column: C,
    ) -> Result<SimpleExpr, DbErr>
    where
        C: ColumnTrait,
    {
        if db.get_database_backend() == DbBackend::Postgres {
            return Ok(Expr::cust_with_values(
                format!("\"{}\" ~* ?", column.as_str()),
                [self.source.clone()],
            ));
        }

        let names: Vec<String> = Country::find()
            .select_only()
            .column(country::Column::Nombre)
            .into_tuple()
            .all(db)
            .await?;
        let matched: Vec<String> = match self.compile() {
            Some(re) => names.into_iter().filter(|name| re.is_match(name)).collect(),
            None => Vec::new(),
        };
        Ok(column.is_in(matched))
    }
}
