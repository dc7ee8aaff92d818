use crate::error::IndexError;
use crate::linked_list::StringLinkedList;
use crate::utils::script::{parse_line, Command, RunSummary, ScriptError, Session};

fn run(script: &str, strict: bool) -> (Result<RunSummary, ScriptError>, String, Vec<String>) {
    let mut session = Session::new(StringLinkedList::new(), strict);
    let mut output = Vec::new();
    let result = session.run(script.as_bytes(), &mut output);
    let output = String::from_utf8(output).unwrap();
    (result, output, session.into_list().to_vec())
}

#[test]
fn test1_parse_commands() {
    assert_eq!(Ok(Some(Command::Push("a b".to_string()))), parse_line("push a b"));
    assert_eq!(Ok(Some(Command::Unshift(String::new()))), parse_line("unshift"));
    assert_eq!(Ok(Some(Command::Pop)), parse_line("  POP "));
    assert_eq!(Ok(Some(Command::Get(3))), parse_line("get 3"));
    assert_eq!(Ok(Some(Command::Set(0, "x".to_string()))), parse_line("set 0 x"));
    assert_eq!(Ok(Some(Command::Insert(2, "y z".to_string()))), parse_line("Insert 2 y z"));
    assert_eq!(Ok(Some(Command::Remove(1))), parse_line("remove 1"));
    assert_eq!(Ok(Some(Command::Average)), parse_line("average"));
    assert_eq!(Ok(None), parse_line("   "));
    assert_eq!(Ok(None), parse_line("# comment"));
}

#[test]
fn test2_parse_rejects_garbage() {
    assert!(parse_line("pushx").is_err());
    assert!(parse_line("get").is_err());
    assert!(parse_line("get -1").is_err());
    assert!(parse_line("remove 1 2").is_err());
    assert!(parse_line("set 1a b").is_err());
    assert!(parse_line("get 99999999999999999999999999").is_err());
}

#[test]
fn test3_apply_returns_printed_values() {
    let mut session = Session::new(StringLinkedList::from_values(["1", "2"]), false);

    assert_eq!(Ok(None), session.apply(Command::Push("3".to_string())));
    assert_eq!(Ok(Some("3".to_string())), session.apply(Command::Len));
    assert_eq!(Ok(Some("2".to_string())), session.apply(Command::Average));
    assert_eq!(Ok(Some("2".to_string())), session.apply(Command::Get(1)));
    assert_eq!(
        Err(IndexError::OutOfRange { index: 9, len: 3 }),
        session.apply(Command::Remove(9))
    );
    assert_eq!(vec!["1", "2", "3"], session.list().to_vec());
}

#[test]
fn test4_run_scenario() {
    let script = "\
# build
push 1
push 2
push 3
print
remove 1
pop
pop
len
";
    let (result, output, list) = run(script, false);

    assert_eq!(RunSummary { commands: 8, errors: 0 }, result.unwrap());
    assert_eq!("[\"1\", \"2\", \"3\"]\n2\n3\n1\n0\n", output);
    assert!(list.is_empty());
}

#[test]
fn test5_lenient_mode_reports_and_continues() {
    let (result, output, list) = run("pop\npush a\nget 1\nget 0\n", false);

    assert_eq!(RunSummary { commands: 4, errors: 2 }, result.unwrap());
    assert_eq!(
        "error: line 1: list is empty\n\
         error: line 3: index 1 out of range for list of length 1\n\
         a\n",
        output
    );
    assert_eq!(vec!["a"], list);
}

#[test]
fn test6_strict_mode_stops_on_index_error() {
    let (result, output, list) = run("push a\ninsert 5 b\npush c\n", true);

    match result {
        Err(ScriptError::Index { line, source }) => {
            assert_eq!(2, line);
            assert_eq!(IndexError::InsertOutOfRange { index: 5, len: 1 }, source);
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!("", output);
    assert_eq!(vec!["a"], list);
}

#[test]
fn test7_parse_error_aborts() {
    let (result, _, list) = run("push a\nfrobnicate\npush b\n", false);

    match result {
        Err(ScriptError::Parse { line, text, .. }) => {
            assert_eq!(2, line);
            assert_eq!("frobnicate", text);
        }
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(vec!["a"], list);
}

#[test]
fn test8_clear_and_average_of_empty() {
    let (result, output, list) = run("push 4\nclear\naverage\n", false);

    assert!(result.is_ok());
    assert_eq!("0\n", output);
    assert!(list.is_empty());
}
