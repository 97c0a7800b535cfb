use std::fs;
use std::process::Command;

#[test]
fn encode_then_decode_cli() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("packed.bin");

    let output = Command::new(exe)
        .args([
            "encode",
            packed.to_str().unwrap(),
            "--pattern",
            "3,2,9",
            "--values",
            "7,3,483",
        ])
        .output()
        .expect("encode failed");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ff8c"));
    assert_eq!(fs::read(&packed).unwrap(), vec![0xFF, 0x8C]);

    let output = Command::new(exe)
        .args(["decode", packed.to_str().unwrap(), "--pattern", "3,2,9"])
        .output()
        .expect("decode failed");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "7 3 483");
}

#[test]
fn decode_with_config_and_csv() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("packed.bin");
    let config = dir.path().join("tilepack.json");
    let csv = dir.path().join("values.csv");
    fs::write(&packed, [0xFF, 0x8F, 0xDF, 0xE0]).unwrap();
    fs::write(&config, r#"{ "pattern": [3, 2, 9] }"#).unwrap();

    let status = Command::new(exe)
        .args([
            "--config",
            config.to_str().unwrap(),
            "decode",
            packed.to_str().unwrap(),
            "--csv",
            csv.to_str().unwrap(),
        ])
        .status()
        .expect("decode failed");
    assert!(status.success());
    assert_eq!(fs::read_to_string(&csv).unwrap(), "7,3,483\n7,2,510\n0\n");
}

#[test]
fn lengths_cli() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let output = Command::new(exe)
        .args(["lengths", "--pattern", "3,2,9", "--bytes", "3", "--values", "6"])
        .output()
        .expect("lengths failed");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("decoded length of 3 bytes: 5"));
    assert!(stdout.contains("encoded length of 6 values: 4 bytes"));
}

#[test]
fn invalid_width_error() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let output = Command::new(exe)
        .args(["lengths", "--pattern", "3,17"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
}

#[test]
fn truncated_input_error() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("short.bin");
    fs::write(&packed, [0xFF]).unwrap();
    let output = Command::new(exe)
        .args(["decode", packed.to_str().unwrap(), "-p", "8", "--bytes", "4"])
        .output()
        .expect("run failed");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Request fewer bytes"));
}

#[test]
fn demo_cli() {
    let exe = env!("CARGO_BIN_EXE_tilepack");
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let out = dir.path().join("out.bin");
    fs::write(&input, [0xFF, 0x8C]).unwrap();
    let output = Command::new(exe)
        .args(["demo", "-i", input.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .output()
        .expect("demo failed");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("decoded: 7 3 483"));
    assert_eq!(fs::read(&out).unwrap(), vec![0xFF, 0x8F, 0xDF, 0xE0]);
}
