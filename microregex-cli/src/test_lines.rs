use crate::{Cli, CliError, TestLinesArgs};
use std::fs;

/// Tests every line of `args.file` against the compiled program, reporting
/// a pass/fail tally — the `--lines FILE` counterpart to `limregex-demo`'s
/// single-haystack match report.
///
/// A line "passes" when the pattern matches its *entire* length, not just
/// some prefix of it: `execute` only ever reports a prefix length, so a
/// partial match (e.g. `\d\d\d` against `"123x"`) is treated the same as
/// this CLI's single-haystack mode treats it — informational, not a pass.
pub fn test_lines(
    main_args: &Cli,
    args: &TestLinesArgs,
    mut output: impl FnMut(&str),
) -> Result<(), CliError> {
    let log = |s: &str| {
        if !main_args.quiet {
            println!("{s}");
        }
    };
    macro_rules! output {
        ($($t:tt)*) => (output(&format!($($t)*)))
    }

    let program = microregex::compile(&args.pattern)?;
    log(&format!("Compiled pattern {:?} ({} cells)", args.pattern, program.len()));

    let contents = fs::read_to_string(&args.file)?;

    output!("Testing file {}:", args.file.display());
    let mut total = 0;
    let mut passed = 0;
    for line in contents.lines() {
        total += 1;
        let matched = microregex::execute(line.as_bytes(), &program);
        let ok = if matched == line.len() {
            passed += 1;
            "[ OK ]"
        } else {
            "[FAIL]"
        };
        output!("{ok} {line}");
    }
    output!("{passed}/{total} lines passed in file {}", args.file.display());

    Ok(())
}
