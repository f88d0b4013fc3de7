use std::sync::Arc;

use multilog_core::destination::{FileDestination, MemoryDestination};
use multilog_core::file_store::FileStoreConfig;
use multilog_core::{location, log_debug, log_info, Destination, Logger, LogLevel};
use tempfile::tempdir;

fn lines(logs: &[Vec<u8>]) -> Vec<String> {
    logs.iter()
        .flat_map(|file| {
            String::from_utf8_lossy(file)
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[test]
fn test_file_destination_round_trip_and_purge() {
    let dir = tempdir().unwrap();
    let file = Arc::new(
        FileDestination::new(
            "com.example.file",
            LogLevel::ALL,
            FileStoreConfig::new().with_log_folder(dir.path()),
        )
        .unwrap(),
    );
    let logger = Logger::new(vec![file.clone()]);

    log_debug!(logger, "e1");
    log_info!(logger, "e2");

    let logs = file.get_logs().unwrap();
    assert_eq!(logs.len(), 1);
    let written = lines(&logs);
    assert_eq!(written.len(), 2);
    assert!(written[0].contains("\"e1\""));
    assert!(written[1].contains("\"e2\""));

    let results = logger.purge_logs();
    assert_eq!(results.len(), 1);
    assert!(results[0].1.is_ok());

    let logs = file.get_logs().unwrap();
    assert!(lines(&logs).is_empty());

    logger.info("after", None, None, &location!());
    logger.warning("purge", None, None, &location!());
    let written = lines(&file.get_logs().unwrap());
    assert_eq!(written.len(), 2);
    assert!(written[0].contains("\"after\""));
    assert!(written[1].contains("\"purge\""));
}

#[test]
fn test_levels_are_filtered_per_destination() {
    let dir = tempdir().unwrap();
    let file = Arc::new(
        FileDestination::new(
            "file",
            LogLevel::WARNING,
            FileStoreConfig::new().with_log_folder(dir.path()),
        )
        .unwrap(),
    );
    let memory = Arc::new(MemoryDestination::new("memory", LogLevel::ALL));
    let logger = Logger::new(vec![file.clone(), memory.clone()]);

    log_debug!(logger, "verbose");
    logger.error("failure", Some("disk full"), None, &location!());

    assert_eq!(memory.len(), 2);
    let written = lines(&file.get_logs().unwrap());
    assert_eq!(written.len(), 1);
    assert!(written[0].contains("🛑 \"failure\""));
    assert!(written[0].contains("\"message\": \"disk full\""));

    logger.set_log_level(LogLevel::OFF, &["file"]);
    logger.error("muted", None, None, &location!());
    assert_eq!(lines(&file.get_logs().unwrap()).len(), 1);
    assert_eq!(file.level(), LogLevel::OFF);
}

#[test]
fn test_logs_survive_restart_with_retention() {
    let dir = tempdir().unwrap();
    let config = FileStoreConfig::new()
        .with_log_folder(dir.path())
        .with_file_name("app.log")
        .with_max_files(2);

    {
        let file = FileDestination::new("file", LogLevel::ALL, config.clone()).unwrap();
        file.log(LogLevel::INFO, "first session", None, None, &location!());
    }

    let file = FileDestination::new("file", LogLevel::ALL, config).unwrap();
    file.log(LogLevel::INFO, "second session", None, None, &location!());

    let written = lines(&file.get_logs().unwrap());
    assert_eq!(written.len(), 2);
    assert!(written[0].contains("first session"));
    assert!(written[1].contains("second session"));
    assert_eq!(file.current_log_path(), Some(dir.path().join("app.log")));
}
