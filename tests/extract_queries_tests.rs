use querydetect::models::QueryInfo;
use querydetect::query_detect::extract_all_queries;

fn info(text: &str, lines: (usize, usize), span: (usize, usize)) -> QueryInfo {
    QueryInfo {
        text: text.to_string(),
        start_line: lines.0,
        end_line: lines.1,
        start_position: span.0,
        end_position: span.1,
    }
}

#[test]
fn multiple_simple_queries() {
    let text = "SELECT * FROM table1;\nSELECT * FROM table2;\nSELECT * FROM table3;";
    let queries = extract_all_queries(text);
    assert_eq!(
        queries,
        vec![
            info("SELECT * FROM table1", (0, 0), (0, 20)),
            info("SELECT * FROM table2", (0, 1), (21, 42)),
            info("SELECT * FROM table3", (1, 2), (43, 64)),
        ]
    );
}

#[test]
fn mixed_query_types() {
    let text =
        "SELECT * FROM users;\nINSERT INTO users (name) VALUES ('John');\nUPDATE users SET age = 30;";
    let queries = extract_all_queries(text);
    assert_eq!(
        queries,
        vec![
            info("SELECT * FROM users", (0, 0), (0, 19)),
            info("INSERT INTO users (name) VALUES ('John')", (0, 1), (20, 61)),
            info("UPDATE users SET age = 30", (1, 2), (62, 88)),
        ]
    );
}

#[test]
fn trailing_statement_without_semicolon() {
    let text = "SELECT 1;\nSELECT 2";
    let queries = extract_all_queries(text);
    assert_eq!(
        queries,
        vec![
            info("SELECT 1", (0, 0), (0, 8)),
            info("SELECT 2", (0, 1), (9, 18)),
        ]
    );
}

#[test]
fn invalid_chunks_are_dropped() {
    let text = "SELECT 1;\nthis is not sql;\nSELECT 2;";
    let queries = extract_all_queries(text);
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].text, "SELECT 1");
    assert_eq!(queries[1].text, "SELECT 2");
}

#[test]
fn no_statements_anywhere() {
    assert!(extract_all_queries("").is_empty());
    assert!(extract_all_queries("plain prose; more prose;").is_empty());
}

#[test]
fn packed_statements_skip_spaces_after_semicolon() {
    let text = "SELECT 1; SELECT 2; SELECT 3;";
    let queries = extract_all_queries(text);
    assert_eq!(
        queries,
        vec![
            info("SELECT 1", (0, 0), (0, 8)),
            info("SELECT 2", (0, 0), (10, 18)),
            info("SELECT 3", (0, 0), (20, 28)),
        ]
    );
}

#[test]
fn spans_are_ordered_and_disjoint() {
    let text = "SELECT a FROM t1;\n\nSELECT b FROM t2;\nUPDATE t2 SET b = 1;\n";
    let queries = extract_all_queries(text);
    assert_eq!(queries.len(), 3);
    for pair in queries.windows(2) {
        assert!(pair[0].end_position <= pair[1].start_position);
        assert!(pair[0].start_line <= pair[1].start_line);
    }
}

#[test]
fn round_trip_property() {
    let text = "SELECT a FROM t1;\nSELECT b\nFROM t2;\nSELECT c FROM t3";
    for query in extract_all_queries(text) {
        assert_eq!(
            text[query.start_position..query.end_position].trim(),
            query.text
        );
    }
}
