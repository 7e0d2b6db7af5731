use rstest::rstest;
use std::str::FromStr;
use yaml_contents::{LineKind, YamlContents};

fn first_line(text: &str) -> yaml_contents::Line {
    let doc = YamlContents::from_str(text).unwrap();
    doc.line(0).unwrap()
}

#[rstest]
#[case::blank("\n", LineKind::Blank)]
#[case::whitespace_only("    \n", LineKind::Blank)]
#[case::comment("# heading\n", LineKind::Comment)]
#[case::indented_comment("    # nested note\n", LineKind::Comment)]
#[case::key_value("adapter: postgresql\n", LineKind::KeyValue)]
#[case::key_value_with_comment("pool: 5 # per process\n", LineKind::KeyValue)]
#[case::key_only("production:\n", LineKind::KeyOnly)]
#[case::key_only_with_comment("production: # live\n", LineKind::KeyOnly)]
#[case::anchored_parent("default: &default\n", LineKind::KeyValue)]
#[case::merge_key("<<: *default\n", LineKind::KeyValue)]
#[case::quoted_key("'a: b': 1\n", LineKind::KeyValue)]
#[case::url_value("url: http://localhost:8080/path\n", LineKind::KeyValue)]
#[case::sequence_item("- item\n", LineKind::Text)]
#[case::sequence_mapping("- name: x\n", LineKind::Text)]
#[case::flow_mapping("{a: 1}\n", LineKind::Text)]
#[case::document_marker("---\n", LineKind::Text)]
#[case::plain_text("just some words\n", LineKind::Text)]
#[case::no_space_after_colon("a:b\n", LineKind::Text)]
fn test_line_kind(#[case] text: &str, #[case] expected: LineKind) {
    assert_eq!(first_line(text).kind(), expected);
}

#[rstest]
#[case::plain("key: value\n", Some("key"), Some("value"), None)]
#[case::double_quoted_hash("key: \"a # b\" # c\n", Some("key"), Some("\"a # b\""), Some("# c"))]
#[case::single_quoted_hash("key: 'it''s # here'\n", Some("key"), Some("'it''s # here'"), None)]
#[case::hash_without_space("color: #fff\n", Some("color"), None, Some("#fff"))]
#[case::hash_inside_word("channel: irc#rust # chat\n", Some("channel"), Some("irc#rust"), Some("# chat"))]
#[case::template("host: <%= ENV['DB_HOST'] %>\n", Some("host"), Some("<%= ENV['DB_HOST'] %>"), None)]
#[case::quoted_key("\"a.b\": 1\n", Some("a.b"), Some("1"), None)]
#[case::group_comment("group: # note\n", Some("group"), None, Some("# note"))]
fn test_line_parts(
    #[case] text: &str,
    #[case] key: Option<&str>,
    #[case] value: Option<&str>,
    #[case] comment: Option<&str>,
) {
    let line = first_line(text);
    assert_eq!(line.key().as_deref(), key);
    assert_eq!(line.value().as_deref(), value);
    assert_eq!(line.comment().as_deref(), comment);
}

#[rstest]
#[case("a: 1\n", 0)]
#[case("  a: 1\n", 2)]
#[case("        - x\n", 8)]
#[case("    # c\n", 4)]
fn test_indent(#[case] text: &str, #[case] indent: usize) {
    assert_eq!(first_line(text).indent(), indent);
}

#[test]
fn test_block_scalar_body_is_text() {
    let doc = YamlContents::from_str("script: |\n  key: not a key\n  # not a comment\nnext: 1\n")
        .unwrap();
    let kinds: Vec<LineKind> = doc.lines().map(|l| l.kind()).collect();
    assert_eq!(
        kinds,
        [
            LineKind::KeyValue,
            LineKind::Text,
            LineKind::Text,
            LineKind::KeyValue
        ]
    );
}

#[test]
fn test_multiline_quoted_value_is_one_line() {
    let text = "message: \"first\n  second\" # note\nnext: 1\n";
    let doc = YamlContents::from_str(text).unwrap();
    assert_eq!(doc.len(), 2);
    let line = doc.line(0).unwrap();
    assert_eq!(line.value().as_deref(), Some("\"first\n  second\""));
    assert_eq!(line.comment().as_deref(), Some("# note"));
    assert_eq!(doc.to_string(), text);
}
