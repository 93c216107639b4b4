// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_core::{
    canonical::stable_json_pretty, ExitCode, MachineError, CATALOG_FILE_NAME,
    ENV_BIJUX_COVERAGE_CATALOG, ENV_BIJUX_LOG_JSON, ENV_BIJUX_LOG_LEVEL,
};

#[test]
fn environment_contract_names_are_stable() {
    assert_eq!(ENV_BIJUX_LOG_LEVEL, "BIJUX_LOG_LEVEL");
    assert_eq!(ENV_BIJUX_LOG_JSON, "BIJUX_LOG_JSON");
    assert_eq!(ENV_BIJUX_COVERAGE_CATALOG, "BIJUX_COVERAGE_CATALOG");
    assert_eq!(CATALOG_FILE_NAME, "service-catalog.json");
}

#[test]
fn machine_error_round_trips_and_rejects_unknown_fields() {
    let err = MachineError::new("dependency_failure", "catalog missing")
        .with_detail("exit", ExitCode::DependencyFailure.as_str());
    let text = stable_json_pretty(&err).expect("encode");
    let decoded: MachineError = serde_json::from_str(&text).expect("decode");
    assert_eq!(decoded, err);
    assert!(serde_json::from_str::<MachineError>(
        r#"{"code":"x","message":"y","details":{},"extra":1}"#
    )
    .is_err());
}
