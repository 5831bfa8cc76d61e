use admin_domain::config::LogConfig;
use admin_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_from_config_creates_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config = LogConfig { console: false, path: Some(log_dir.clone()), ..LogConfig::default() };

    let logger = Logger::builder("integration-file-logging").from_config(&config)?.init()?;
    assert!(logger.guard().is_some());

    tracing::info!(view = "users", "hello from integration test");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    assert!(fs::metadata(&log_file)?.len() > 0, "log file should not be empty");
    Ok(())
}
