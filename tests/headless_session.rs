use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn scratch_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("mdsurround-{label}-{nanos}"));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

fn run(args: &[&str], dir: &PathBuf) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_mdsurround"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run mdsurround");
    assert!(
        output.status.success(),
        "mdsurround failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf8 stdout")
}

#[test]
fn scripted_session_writes_events_and_metrics() {
    let dir = scratch_dir("session");
    let scenario = dir.join("scenario.json");
    fs::write(
        &scenario,
        r#"{"steps":[
            {"ticks":40,"biome":"minecraft:ice_flats","world_time":15000},
            {"ticks":40,"surroundings":"underground","inside":true},
            {"ticks":10,"paused":true}
        ]}"#,
    )
    .expect("write scenario");
    let events = dir.join("out/events.jsonl");
    let metrics = dir.join("out/metrics.json");

    let stdout = run(
        &[
            "--scenario",
            scenario.to_str().unwrap(),
            "--events",
            events.to_str().unwrap(),
            "--metrics",
            metrics.to_str().unwrap(),
            "--world-seed",
            "7",
            "--diagnostics",
        ],
        &dir,
    );
    assert!(stdout.contains("SoundSystem:"), "stdout: {stdout}");
    assert!(stdout.contains("Biome: Underground"), "stdout: {stdout}");
    assert!(stdout.contains("90 ticks (81 counted)"), "stdout: {stdout}");

    let kinds: Vec<String> = fs::read_to_string(&events)
        .expect("read events")
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line).expect("event json");
            value["kind"].as_str().expect("kind").to_string()
        })
        .collect();
    assert_eq!(kinds.first().map(String::as_str), Some("session_start"));
    assert_eq!(kinds.last().map(String::as_str), Some("session_end"));
    assert!(kinds.iter().any(|k| k == "aurora_spawn"));
    assert!(kinds.iter().any(|k| k == "inside"));

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&metrics).expect("read metrics")).expect("json");
    assert_eq!(report["result"], "pass");
    assert_eq!(report["environment"]["ticks"], 90);
    assert_eq!(report["environment"]["biomes_seen"], 2);
    assert!(report["sound"]["admitted"].as_u64().unwrap() > 0);
    // 128 hardware sources: 96 total, 16 streaming.
    assert_eq!(report["sound"]["normal_channels"], 80);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unknown_hardware_keeps_configured_channels() {
    let dir = scratch_dir("unknown-hw");
    let metrics = dir.join("metrics.json");
    run(
        &[
            "--unknown-hardware",
            "--max-ticks",
            "20",
            "--metrics",
            metrics.to_str().unwrap(),
        ],
        &dir,
    );
    let report: Value =
        serde_json::from_str(&fs::read_to_string(&metrics).expect("read metrics")).expect("json");
    assert_eq!(report["sound"]["normal_channels"], 28);
    assert_eq!(report["environment"]["ticks"], 20);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn written_config_is_loaded_back() {
    let dir = scratch_dir("config");
    let path = dir.join("surround.toml");
    run(&["--write-config", path.to_str().unwrap()], &dir);

    let mut table: toml::Table =
        toml::from_str(&fs::read_to_string(&path).expect("read config")).expect("toml");
    assert_eq!(table["normal_channel_count"].as_integer(), Some(28));
    table.insert("auto_configure_channels".into(), toml::Value::Boolean(false));
    table.insert("normal_channel_count".into(), toml::Value::Integer(12));
    fs::write(&path, toml::to_string(&table).expect("render")).expect("write config");

    let metrics = dir.join("metrics.json");
    run(
        &[
            "--config",
            path.to_str().unwrap(),
            "--max-ticks",
            "5",
            "--metrics",
            metrics.to_str().unwrap(),
        ],
        &dir,
    );
    let report: Value =
        serde_json::from_str(&fs::read_to_string(&metrics).expect("read metrics")).expect("json");
    assert_eq!(report["sound"]["normal_channels"], 12);
    let _ = fs::remove_dir_all(&dir);
}
