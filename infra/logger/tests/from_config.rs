use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use vanity_domain::config::LoggingConfig;
use vanity_logger::Logger;

#[test]
fn configured_directory_receives_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let config = LoggingConfig {
        level: "debug".to_owned(),
        directory: Some(tmp_dir.path().join("logs")),
        json: true,
        ..LoggingConfig::default()
    };

    let logger = Logger::from_config("vanity-json", &config)?;
    assert!(logger.writes_files());

    tracing::debug!(slot = "width", value = 80, "Change requested");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(tmp_dir.path().join("logs"))?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    let line = contents.lines().find(|line| line.contains("Change requested")).expect("event logged");
    let event: serde_json::Value = serde_json::from_str(line)?;
    assert_eq!(event["fields"]["slot"], "width");
    assert_eq!(event["level"], "DEBUG");
    Ok(())
}
