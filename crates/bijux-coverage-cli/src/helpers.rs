use serde_json::Value;

pub(crate) fn emit_ok(payload: &Value) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(payload).map_err(|e| e.to_string())?
    );
    Ok(())
}

pub(crate) fn utc_run_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d-%H-%M-%s").to_string()
}
