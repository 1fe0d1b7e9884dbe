/// Integration tests for converting .mod files on disk
use rapid_socket::{ConvertError, Converter, ConverterConfig, FileOutcome, PathReport};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAIN: &str = "MODULE MainModule\n\
                    PROC main_RoboDK()\n\
                    \x20   Extruder123456\n\
                    \x20   SetRPM1500\n\
                    \x20   M_RunCode104\n\
                    ENDPROC\n\
                    ENDMODULE\n";

const PART: &str = "MODULE Part1\n\
                    PROC Part1()\n\
                    \x20   Extruder50000\n\
                    \x20   MoveL [[0,0,0],[1,0,0,0]], v100, z1, tool0;\n\
                    ENDPROC\n\
                    ENDMODULE\n";

fn converter() -> Converter {
    Converter::new(ConverterConfig::new("rapid")).unwrap()
}

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_single_file_conversion() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "program.mod", MAIN);

    let outcome = converter()
        .process_file(temp_dir.path().join("program.mod"))
        .unwrap();
    assert!(matches!(outcome, FileOutcome::Converted { injected: true, .. }));

    let result = read(temp_dir.path(), "program.mod");
    assert!(result.contains("VAR socketdev my_socket;"));
    assert!(result.contains("SocketCreate my_socket;"));
    assert!(result.contains("SocketConnect my_socket, \"10.0.0.10\", 1234;"));
    assert!(result.contains("SocketSend my_socket \\Str := \"E1.23456\";"));
    assert!(result.contains("SocketSend my_socket \\Str := \"F1500.0\";"));
    assert!(result.contains("SocketSend my_socket \\Str := \"M104.0\";"));
    assert!(result.ends_with("ENDMODULE\n"));
}

#[test]
fn test_single_file_rerun_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "program.mod", MAIN);
    let path = temp_dir.path().join("program.mod");

    converter().process_file(&path).unwrap();
    let once = fs::read_to_string(&path).unwrap();
    converter().process_file(&path).unwrap();
    let twice = fs::read_to_string(&path).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_directory_injects_only_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "main.mod", MAIN);
    write(temp_dir.path(), "part1.mod", PART);

    let report = converter().process_directory(temp_dir.path()).unwrap();
    assert_eq!(report.converted(), 2);
    assert!(report.unexpected_entries.is_empty());

    let main = read(temp_dir.path(), "main.mod");
    assert!(main.contains("VAR socketdev my_socket;"));

    let part = read(temp_dir.path(), "part1.mod");
    assert!(!part.contains("VAR socketdev"));
    assert!(!part.contains("SocketCreate"));
    assert!(part.contains("    SocketSend my_socket \\Str := \"E0.5\";"));
    assert!(part.contains("MoveL [[0,0,0],[1,0,0,0]], v100, z1, tool0;"));
}

#[test]
fn test_directory_structural_error_skips_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    let broken = "PROC main_RoboDK()\n    SetRPM1500\nENDPROC\n";
    write(temp_dir.path(), "main.mod", broken);
    write(temp_dir.path(), "part1.mod", PART);

    let report = converter().process_directory(temp_dir.path()).unwrap();
    assert_eq!(report.converted(), 1);

    let skipped: Vec<&FileOutcome> = report.skipped().collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].path().ends_with("main.mod"));
    assert!(matches!(
        skipped[0],
        FileOutcome::Skipped {
            error: ConvertError::ModuleAnchorMissing,
            ..
        }
    ));

    // Untouched, not even the SetRPM line.
    assert_eq!(read(temp_dir.path(), "main.mod"), broken);
    assert!(read(temp_dir.path(), "part1.mod").contains("E0.5"));
}

#[test]
fn test_directory_aborts_on_foreign_file() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.mod", PART);
    write(temp_dir.path(), "b.txt", "notes");
    write(temp_dir.path(), "c.mod", PART);

    let err = converter().process_directory(temp_dir.path()).unwrap_err();
    match err {
        ConvertError::BatchAborted { converted, source } => {
            assert_eq!(converted, 1);
            assert!(matches!(*source, ConvertError::InvalidExtension { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Files before the offending one are already rewritten; later ones are not.
    assert!(read(temp_dir.path(), "a.mod").contains("SocketSend"));
    assert_eq!(read(temp_dir.path(), "c.mod"), PART);
}

#[test]
fn test_directory_aborts_on_unreadable_file() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.mod", PART);
    fs::write(temp_dir.path().join("b.mod"), b"\xff\xfe").unwrap();
    write(temp_dir.path(), "c.mod", PART);

    let err = converter().process_directory(temp_dir.path()).unwrap_err();
    match err {
        ConvertError::BatchAborted { converted, source } => {
            assert_eq!(converted, 1);
            match *source {
                ConvertError::Io { path, .. } => assert!(path.ends_with("b.mod")),
                other => panic!("unexpected source: {other}"),
            }
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(read(temp_dir.path(), "a.mod").contains("SocketSend"));
    assert_eq!(fs::read(temp_dir.path().join("b.mod")).unwrap(), b"\xff\xfe");
    assert_eq!(read(temp_dir.path(), "c.mod"), PART);
}

#[test]
fn test_directory_reports_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "main.mod", MAIN);
    fs::create_dir(temp_dir.path().join("backup")).unwrap();
    fs::create_dir(temp_dir.path().join(".git")).unwrap();

    let report = converter().process_directory(temp_dir.path()).unwrap();
    assert_eq!(report.converted(), 1);
    assert_eq!(report.unexpected_entries.len(), 1);
    assert!(report.unexpected_entries[0].ends_with("backup"));
}

#[test]
fn test_directory_custom_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "main.mod", PART);
    write(temp_dir.path(), "printer.mod", MAIN);

    let config = ConverterConfig::new("rapid").with_entry_point("printer.mod");
    Converter::new(config)
        .unwrap()
        .process_directory(temp_dir.path())
        .unwrap();

    assert!(!read(temp_dir.path(), "main.mod").contains("VAR socketdev"));
    assert!(read(temp_dir.path(), "printer.mod").contains("VAR socketdev"));
}

#[test]
fn test_process_path_dispatch() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "main.mod", MAIN);

    let report = converter()
        .process_path(temp_dir.path().join("main.mod"))
        .unwrap();
    assert!(matches!(report, PathReport::File(FileOutcome::Converted { .. })));

    let report = converter().process_path(temp_dir.path()).unwrap();
    assert!(matches!(report, PathReport::Directory(_)));
}

#[test]
fn test_uppercase_extension_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "MAIN.MOD", MAIN);

    let err = converter()
        .process_file(temp_dir.path().join("MAIN.MOD"))
        .unwrap_err();
    assert!(matches!(err, ConvertError::InvalidExtension { .. }));
    assert_eq!(read(temp_dir.path(), "MAIN.MOD"), MAIN);
}
