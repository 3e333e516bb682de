/// Integration tests for loading states and regions from a data directory.

use std::fs;
use std::path::PathBuf;

use citypath_core::DataConfig;
use citypath_ingest::{DataSet, IngestError};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create a unique temp directory for each test.
fn test_data_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "citypath-test-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_fixture(root: &PathBuf) {
    fs::write(root.join("States.csv"), "India\nKerala\n\n").unwrap();

    fs::create_dir_all(root.join("Kerala")).unwrap();
    fs::write(
        root.join("Kerala").join("Kerala.csv"),
        "Kerala,Kochi,Thrissur,Kozhikode,Munnar\n\
         Kochi,0,80,-1,130\n\
         Thrissur,80,0,115,-1\n\
         Kozhikode,-1,115,0,-1\n\
         Munnar,130,-1,-1,0\n",
    )
    .unwrap();
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn lists_states_skipping_blank_lines() {
    let root = test_data_dir("states");
    write_fixture(&root);

    let data = DataSet::new(&root, "States.csv");
    assert_eq!(data.states().unwrap(), vec!["India", "Kerala"]);
    assert_eq!(data.resolve_state("2").unwrap(), "Kerala");
    assert_eq!(data.resolve_state("kerala").unwrap(), "Kerala");
    assert!(matches!(
        data.resolve_state("Goa"),
        Err(IngestError::UnknownState(_))
    ));

    fs::remove_dir_all(&root).ok();
}

#[test]
fn loads_region_from_state_directory() {
    let root = test_data_dir("region");
    write_fixture(&root);

    let data = DataSet::from_config(&DataConfig {
        data_dir: root.clone(),
        states_file: "States.csv".to_string(),
    });
    let region = data.load_region("Kerala").unwrap();

    assert_eq!(region.city_count(), 4);
    assert_eq!(region.city_index("Munnar").unwrap(), 3);
    assert_eq!(region.matrix.weight(0, 3), 130.0);
    assert!(region.matrix.edge(2, 0).is_none());

    let graph = region.graph_from(region.city_index("Kozhikode").unwrap()).unwrap();
    assert_eq!(graph.source(), 2);

    fs::remove_dir_all(&root).ok();
}

#[test]
fn missing_files_report_path() {
    let root = test_data_dir("missing");
    let data = DataSet::new(&root, "States.csv");

    match data.states() {
        Err(IngestError::Io { path, .. }) => assert_eq!(path, root.join("States.csv")),
        other => panic!("expected Io error, got {:?}", other),
    }
    match data.load_region("Nowhere") {
        Err(IngestError::Io { path, .. }) => {
            assert_eq!(path, root.join("Nowhere").join("Nowhere.csv"))
        }
        other => panic!("expected Io error, got {:?}", other),
    }

    fs::remove_dir_all(&root).ok();
}
