//! Example: converting a program file on disk
//!
//! Run with: cargo run --example convert_file
//!
//! This example demonstrates:
//! - Loading socket settings from a TOML file
//! - Merging them over builder defaults
//! - Converting a `.mod` file with `Converter::process_path`
//! - Re-running on an already converted file

use rapid_socket::{Converter, ConverterConfig, FileConfig, FileOutcome, PathReport, Postprocessor};
use std::fs;
use tempfile::TempDir;

const PROGRAM: &str = "MODULE MainModule
PROC main_RoboDK()
    MoveL [[0,0,0],[1,0,0,0]], v100, z1, tool0;
    SetRPM1500
    M_RunCode104
    Extruder123456
    MoveL [[50,0,0],[1,0,0,0]], v100, z1, tool0;
ENDPROC
ENDMODULE
";

const SETTINGS: &str = r#"
socket_name = "toolhead"
address = "192.168.0.42"
port = 6969
atomic_writes = true
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let workdir = TempDir::new()?;
    let program = workdir.path().join("main.mod");
    let settings = workdir.path().join("rapid-socket.toml");
    fs::write(&program, PROGRAM)?;
    fs::write(&settings, SETTINGS)?;

    // =========================================================================
    // Configuration
    // =========================================================================
    //
    // Values present in the file override the builder defaults:
    //
    // | Key            | Default     |
    // |----------------|-------------|
    // | socket_name    | my_socket   |
    // | address        | 10.0.0.10   |
    // | port           | 1234        |
    // | entry_point    | main.mod    |
    // | atomic_writes  | false       |

    let config = ConverterConfig::new(Postprocessor::Rapid).merge(FileConfig::load(&settings)?);
    println!("Socket: {} -> {}", config.socket.name, config.socket.endpoint);

    // Fails here if the socket name is not a usable RAPID identifier.
    let converter = Converter::new(config)?;

    // =========================================================================
    // Conversion
    // =========================================================================

    match converter.process_path(&program)? {
        PathReport::File(FileOutcome::Converted { path, injected }) => {
            println!("Converted {} (setup injected: {})", path.display(), injected);
        }
        PathReport::File(FileOutcome::Skipped { path, error }) => {
            println!("Skipped {}: {}", path.display(), error);
        }
        PathReport::Directory(report) => {
            println!("Converted {} file(s)", report.converted());
        }
    }

    println!("\n{}", fs::read_to_string(&program)?);

    // A second run finds the setup already present and no commands left.
    let before = fs::read_to_string(&program)?;
    converter.process_path(&program)?;
    assert_eq!(before, fs::read_to_string(&program)?);
    println!("Re-run left the file unchanged");

    Ok(())
}
