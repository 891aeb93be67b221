use std::io::Write;

use super::*;

#[test]
fn values() {
    assert_eq!(parse_value("0x1F").unwrap(), 0x1f);
    assert_eq!(parse_value("0b0101").unwrap(), 5);
    assert_eq!(parse_value("42").unwrap(), 42);
    assert_eq!(parse_value("0xffffffff").unwrap(), u32::MAX);

    assert!(parse_value("0x1_0000_0000").is_err());
    assert!(parse_value("0b2").is_err());
    assert_eq!(
        parse_value("x").unwrap_err().to_string(),
        "invalid value \"x\": invalid digit found in string"
    );
}

#[test]
fn lines_and_comments() {
    let src = "
# header
0x1, 0b10 3
  # indented comment

0 0 0 # all up
4,,5
";

    assert_eq!(
        parse_trace(src).unwrap(),
        [vec![1, 2, 3], vec![0, 0, 0], vec![4, 5]]
    );
}

#[test]
fn error_names_the_line() {
    let err = parse_trace("1 2\n3 q\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2");
    assert_eq!(
        format!("{:#}", err),
        "line 2: invalid value \"q\": invalid digit found in string"
    );
}

#[test]
fn read_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "0x3 # two keys").unwrap();
    writeln!(file, "0").unwrap();

    assert_eq!(read_trace(file.path()).unwrap(), [vec![3], vec![0]]);

    let missing = file.path().with_extension("missing");
    let err = read_trace(&missing).unwrap_err();
    assert!(err.to_string().starts_with("failed to read"), "{err}");
}
