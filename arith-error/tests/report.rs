use ariadne::Source;
use arith_attrs::ErrorKind;
use arith_error::Error;

#[derive(Debug, ErrorKind)]
#[error(
    message = format!("{:?} is unexpected", found),
    labels = ["this token"],
    help = "remove it",
)]
struct Unexpected {
    found: char,
}

#[derive(Debug, ErrorKind)]
#[error(message = "nothing to do", labels = [""])]
struct Nothing;

/// Renders the report of the error without colors.
fn render(error: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    error
        .build_report("input")
        .write(("input", Source::from(input)), &mut buf)
        .unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn message_uses_fields() {
    let error = Error::new(vec![1..2], Unexpected { found: '$' });
    assert_eq!(error.message(), "'$' is unexpected");
    assert_eq!(error.to_string(), "'$' is unexpected at 1..2");
}

#[test]
fn report_contains_message_label_and_help() {
    let error = Error::new(vec![1..2], Unexpected { found: '$' });
    let report = render(&error, "a$b");
    assert!(report.contains("'$' is unexpected"));
    assert!(report.contains("this token"));
    assert!(report.contains("remove it"));
}

#[test]
fn kind_can_be_inspected() {
    let error = Error::new(vec![0..1], Unexpected { found: ')' });
    assert!(error.kind_is::<Unexpected>());
    assert!(!error.kind_is::<Nothing>());
    assert_eq!(error.downcast_ref::<Unexpected>().map(|kind| kind.found), Some(')'));
}

#[test]
fn report_without_spans() {
    let error = Error::new(Vec::new(), Nothing);
    assert_eq!(error.span(), None);
    assert_eq!(error.to_string(), "nothing to do");
    assert!(render(&error, "a+b").contains("nothing to do"));
}
