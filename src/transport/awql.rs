//! AWQL query-string rendering.
//!
//! The query language is line-oriented SQL-ish text:
//! `SELECT f1, f2 WHERE p1 AND p2 ORDER BY f ASC LIMIT offset,limit`.
//! The page window is part of the string, so each page fetch renders the
//! query again with the advanced offset.

use std::fmt::Write as _;

use crate::domain::{
    FieldName, Predicate, PredicateOperator, PredicateValue, ServiceQuery, SortOrder,
};

/// Render `query` as an AWQL string for its current page window.
pub fn render_awql(query: &ServiceQuery) -> String {
    let mut awql = String::from("SELECT ");
    push_field_list(&mut awql, query.fields());

    if !query.predicates().is_empty() {
        awql.push_str(" WHERE ");
        for (idx, predicate) in query.predicates().iter().enumerate() {
            if idx > 0 {
                awql.push_str(" AND ");
            }
            push_predicate(&mut awql, predicate);
        }
    }

    if let Some((field, order)) = query.ordering() {
        let _ = write!(awql, " ORDER BY {} {}", field.as_str(), order.as_str());
    }

    let window = query.window();
    let _ = write!(awql, " LIMIT {},{}", window.offset(), window.limit().get());
    awql
}

fn push_field_list(awql: &mut String, fields: &[FieldName]) {
    for (idx, field) in fields.iter().enumerate() {
        if idx > 0 {
            awql.push_str(", ");
        }
        awql.push_str(field.as_str());
    }
}

fn push_predicate(awql: &mut String, predicate: &Predicate) {
    awql.push_str(predicate.field().as_str());
    match predicate.operator() {
        PredicateOperator::EqualTo => awql.push_str(" = "),
        PredicateOperator::NotEqualTo => awql.push_str(" != "),
        PredicateOperator::GreaterThan => awql.push_str(" > "),
        PredicateOperator::LessThan => awql.push_str(" < "),
        PredicateOperator::In => awql.push_str(" IN "),
    }
    push_value(awql, predicate.value());
}

fn push_value(awql: &mut String, value: &PredicateValue) {
    match value {
        PredicateValue::Integer(number) => {
            let _ = write!(awql, "{number}");
        }
        PredicateValue::Text(text) => push_quoted(awql, text),
        PredicateValue::List(values) => {
            awql.push('[');
            for (idx, entry) in values.iter().enumerate() {
                if idx > 0 {
                    awql.push_str(", ");
                }
                push_quoted(awql, entry);
            }
            awql.push(']');
        }
    }
}

// Single quotes with backslash escaping for embedded quotes/backslashes.
fn push_quoted(awql: &mut String, text: &str) {
    awql.push('\'');
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            awql.push('\\');
        }
        awql.push(ch);
    }
    awql.push('\'');
}

#[cfg(test)]
mod tests {
    use crate::domain::{PageSize, Predicate, ServiceQuery, SortOrder};

    use super::*;

    #[test]
    fn renders_full_disapproved_ads_query() {
        let query = ServiceQuery::builder()
            .fields(["Id", "PolicySummary"])
            .unwrap()
            .filter(Predicate::equal_to("AdGroupId", 12345_i64).unwrap())
            .filter(Predicate::equal_to("CombinedApprovalStatus", "DISAPPROVED").unwrap())
            .order_by("Id", SortOrder::Ascending)
            .unwrap()
            .page_size(PageSize::new(100).unwrap())
            .build()
            .unwrap();

        assert_eq!(
            render_awql(&query),
            "SELECT Id, PolicySummary \
             WHERE AdGroupId = 12345 AND CombinedApprovalStatus = 'DISAPPROVED' \
             ORDER BY Id ASC LIMIT 0,100"
        );
    }

    #[test]
    fn limit_clause_follows_the_advanced_window() {
        let mut query = ServiceQuery::builder()
            .fields(["Id"])
            .unwrap()
            .page_size(PageSize::new(100).unwrap())
            .build()
            .unwrap();

        assert!(render_awql(&query).ends_with("LIMIT 0,100"));
        query.advance();
        assert!(render_awql(&query).ends_with("LIMIT 100,100"));
        query.advance();
        assert!(render_awql(&query).ends_with("LIMIT 200,100"));
    }

    #[test]
    fn renders_in_list_predicates() {
        let query = ServiceQuery::builder()
            .fields(["Id", "GoogleGlobalSiteTag"])
            .unwrap()
            .filter(Predicate::in_list("Id", ["101", "102"]).unwrap())
            .build()
            .unwrap();

        assert_eq!(
            render_awql(&query),
            "SELECT Id, GoogleGlobalSiteTag WHERE Id IN ['101', '102'] LIMIT 0,100"
        );
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_text_values() {
        let query = ServiceQuery::builder()
            .fields(["Id"])
            .unwrap()
            .filter(Predicate::equal_to("Name", r"it's a \ test").unwrap())
            .build()
            .unwrap();

        assert!(render_awql(&query).contains(r"Name = 'it\'s a \\ test'"));
    }

    #[test]
    fn renders_comparison_operators() {
        let query = ServiceQuery::builder()
            .fields(["Id"])
            .unwrap()
            .filter(Predicate::greater_than("Id", 10).unwrap())
            .filter(Predicate::less_than("Id", 100).unwrap())
            .filter(Predicate::not_equal_to("Status", "REMOVED").unwrap())
            .build()
            .unwrap();

        assert_eq!(
            render_awql(&query),
            "SELECT Id WHERE Id > 10 AND Id < 100 AND Status != 'REMOVED' LIMIT 0,100"
        );
    }
}
